//! Quiz flow: pick a topic, wait for questions, answer, read the
//! explanation, move on, see the result.
//!
//! ```text
//! SelectingTopic ─begin─▶ Loading ─deliver─▶ Answering ─answer─▶ Explaining ─next─▶ Answering | Finished
//!                           └──fail──▶ SelectingTopic (with error)
//! ```
//!
//! The flow never calls the content provider itself; the caller fetches the
//! questions for the topic returned by [`QuizFlow::begin`] and hands the
//! outcome back through [`QuizFlow::deliver`] or [`QuizFlow::fail`].

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::types::{QuizData, QuizQuestion};

/// Topics offered on the quiz setup screen.
pub const QUIZ_TOPICS: [&str; 4] = [
    "Os Milagres de Jesus",
    "Velho Testamento",
    "Heróis da Fé",
    "Animais da Bíblia",
];

/// Message shown when the provider could not produce a quiz.
pub const QUIZ_FAILED_MESSAGE: &str = "Não conseguimos criar o quiz agora. Tente de novo!";

/// Pick one of [`QUIZ_TOPICS`] for the "play again" button.
pub fn random_topic<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUIZ_TOPICS.choose(rng).copied().unwrap_or(QUIZ_TOPICS[0])
}

/// Where the player is in the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuizState {
    /// Choosing a topic.
    #[default]
    SelectingTopic,
    /// Questions requested for `topic`.
    Loading {
        /// Topic being fetched.
        topic: String,
    },
    /// Waiting for an answer to question `index`.
    Answering {
        /// Zero-based question index.
        index: usize,
    },
    /// Showing the explanation for question `index`.
    Explaining {
        /// Zero-based question index.
        index: usize,
        /// Option the player picked.
        selected: usize,
        /// Whether it was right.
        correct: bool,
    },
    /// All questions answered.
    Finished {
        /// Correct answers.
        score: u32,
        /// Questions asked.
        total: usize,
    },
}

/// The quiz state machine.
#[derive(Debug, Clone, Default)]
pub struct QuizFlow {
    state: QuizState,
    data: Option<QuizData>,
    score: u32,
    last_error: Option<String>,
}

impl QuizFlow {
    /// A flow waiting for a topic.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a quiz on `topic`, discarding any quiz in progress.
    ///
    /// Returns the topic the caller should fetch questions for.
    pub fn begin(&mut self, topic: impl Into<String>) -> String {
        let topic = topic.into();
        self.data = None;
        self.score = 0;
        self.last_error = None;
        self.state = QuizState::Loading {
            topic: topic.clone(),
        };
        debug!(%topic, "Quiz loading");
        topic
    }

    /// Hand over the fetched questions.
    ///
    /// Only accepted while loading. An empty quiz finishes immediately.
    pub fn deliver(&mut self, data: QuizData) -> bool {
        if !matches!(self.state, QuizState::Loading { .. }) {
            return false;
        }
        self.state = if data.is_empty() {
            QuizState::Finished { score: 0, total: 0 }
        } else {
            QuizState::Answering { index: 0 }
        };
        self.data = Some(data);
        true
    }

    /// Report that the questions could not be fetched.
    pub fn fail(&mut self) -> bool {
        if !matches!(self.state, QuizState::Loading { .. }) {
            return false;
        }
        self.last_error = Some(QUIZ_FAILED_MESSAGE.to_string());
        self.state = QuizState::SelectingTopic;
        true
    }

    /// Answer the current question with `option`.
    ///
    /// Ignored unless a question is awaiting an answer, so a second click on
    /// the same question cannot change the score. An option the question
    /// does not offer is ignored too. Returns whether the answer was correct.
    pub fn answer(&mut self, option: usize) -> Option<bool> {
        let QuizState::Answering { index } = self.state else {
            return None;
        };
        let question = self.data.as_ref()?.questions.get(index)?;
        if option >= question.options.len() {
            return None;
        }
        let correct = question.is_correct(option);
        if correct {
            self.score += 1;
        }
        self.state = QuizState::Explaining {
            index,
            selected: option,
            correct,
        };
        Some(correct)
    }

    /// Move past the explanation to the next question or the result.
    pub fn next(&mut self) -> bool {
        let QuizState::Explaining { index, .. } = self.state else {
            return false;
        };
        let total = self.total();
        self.state = if index + 1 < total {
            QuizState::Answering { index: index + 1 }
        } else {
            QuizState::Finished {
                score: self.score,
                total,
            }
        };
        true
    }

    /// Back to the topic picker.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// The question being answered or explained.
    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        let index = match self.state {
            QuizState::Answering { index } | QuizState::Explaining { index, .. } => index,
            _ => return None,
        };
        self.data.as_ref()?.questions.get(index)
    }

    /// Correct answers so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Questions in the loaded quiz.
    #[must_use]
    pub fn total(&self) -> usize {
        self.data.as_ref().map_or(0, QuizData::len)
    }

    /// One-based question number and total, e.g. `(2, 3)`.
    #[must_use]
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.state {
            QuizState::Answering { index } | QuizState::Explaining { index, .. } => {
                Some((index + 1, self.total()))
            }
            _ => None,
        }
    }

    /// Set after a failed fetch, cleared by the next `begin`.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct_answer: usize) -> QuizQuestion {
        QuizQuestion {
            question: "Quem enfrentou Golias?".into(),
            options: vec!["Davi".into(), "Saul".into(), "Samuel".into(), "Jônatas".into()],
            correct_answer,
            explanation: "Davi venceu Golias com uma pedra.".into(),
        }
    }

    fn three_questions() -> QuizData {
        QuizData {
            questions: vec![question(0), question(1), question(2)],
        }
    }

    #[test]
    fn full_run_counts_correct_answers() {
        let mut quiz = QuizFlow::new();
        assert_eq!(quiz.begin("Heróis da Fé"), "Heróis da Fé");
        assert!(quiz.deliver(three_questions()));
        assert_eq!(quiz.progress(), Some((1, 3)));

        assert_eq!(quiz.answer(0), Some(true));
        assert!(quiz.next());
        assert_eq!(quiz.answer(3), Some(false));
        assert!(quiz.next());
        assert_eq!(quiz.answer(2), Some(true));
        assert!(quiz.next());

        assert_eq!(quiz.state(), &QuizState::Finished { score: 2, total: 3 });
    }

    #[test]
    fn second_answer_is_ignored() {
        let mut quiz = QuizFlow::new();
        quiz.begin("Velho Testamento");
        quiz.deliver(three_questions());
        assert_eq!(quiz.answer(0), Some(true));
        assert_eq!(quiz.answer(0), None);
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn option_outside_the_list_is_ignored() {
        let mut quiz = QuizFlow::new();
        quiz.begin("Velho Testamento");
        quiz.deliver(three_questions());
        assert_eq!(quiz.answer(4), None);
        assert_eq!(quiz.answer(99), None);
        assert_eq!(quiz.state(), &QuizState::Answering { index: 0 });
        assert_eq!(quiz.score(), 0);

        assert_eq!(quiz.answer(0), Some(true));
    }

    #[test]
    fn next_requires_an_answer() {
        let mut quiz = QuizFlow::new();
        quiz.begin("Velho Testamento");
        quiz.deliver(three_questions());
        assert!(!quiz.next());
        assert_eq!(quiz.state(), &QuizState::Answering { index: 0 });
    }

    #[test]
    fn failure_returns_to_topic_picker_with_message() {
        let mut quiz = QuizFlow::new();
        quiz.begin("Animais da Bíblia");
        assert!(quiz.fail());
        assert_eq!(quiz.state(), &QuizState::SelectingTopic);
        assert_eq!(quiz.last_error(), Some(QUIZ_FAILED_MESSAGE));

        quiz.begin("Animais da Bíblia");
        assert!(quiz.last_error().is_none());
    }

    #[test]
    fn deliver_outside_loading_is_rejected() {
        let mut quiz = QuizFlow::new();
        assert!(!quiz.deliver(three_questions()));
        assert!(!quiz.fail());
    }

    #[test]
    fn begin_mid_quiz_starts_over() {
        let mut quiz = QuizFlow::new();
        quiz.begin("A");
        quiz.deliver(three_questions());
        quiz.answer(0);
        quiz.begin("B");
        assert_eq!(quiz.score(), 0);
        assert_eq!(quiz.state(), &QuizState::Loading { topic: "B".into() });
        assert!(quiz.current_question().is_none());
    }

    #[test]
    fn random_topic_is_a_preset() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            assert!(QUIZ_TOPICS.contains(&random_topic(&mut rng)));
        }
    }
}
