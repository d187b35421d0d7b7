//! What goes into the shell and what comes out.
//!
//! A UI layer turns clicks into [`UserAction`]s and renders the
//! [`ShellEvent`]s the app returns.

use serde::{Deserialize, Serialize};

use arca_core::memory_game::{Difficulty, FlipOutcome, GameEvent, ThemeId};
use arca_core::types::{AppView, StoryResponse};

/// A user action routed by [`crate::App::handle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    /// Switch screens.
    Navigate(AppView),
    /// Deal a memory board and open the game screen.
    StartMemoryGame {
        /// Card theme.
        theme: ThemeId,
        /// Board size and bonus.
        difficulty: Difficulty,
    },
    /// Deal again with the same theme and difficulty.
    RestartMemoryGame,
    /// Turn a card over.
    FlipCard(usize),
    /// Ask for a story about a topic.
    RequestStory(String),
    /// Ask for a quiz about a topic.
    StartQuiz(String),
    /// Ask for a quiz on one of the preset topics, picked at random.
    StartRandomQuiz,
    /// Answer the current quiz question.
    AnswerQuiz(usize),
    /// Leave the explanation for the next question or the result.
    NextQuestion,
}

/// Something the UI should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// The screen changed.
    ViewChanged {
        /// Screen that was showing.
        from: AppView,
        /// Screen now showing.
        to: AppView,
    },

    // --- Memory game ---
    /// A fresh board was dealt.
    GameStarted {
        /// Card theme.
        theme: ThemeId,
        /// Board size and bonus.
        difficulty: Difficulty,
        /// Cards on the board.
        cards: usize,
    },
    /// The board could not be dealt.
    GameFailed {
        /// What went wrong.
        message: String,
    },
    /// A card turned face-up.
    CardFlipped {
        /// Board position.
        position: usize,
        /// Whether it completed a pair.
        outcome: FlipOutcome,
    },
    /// A pair resolved or the game was won.
    Game(GameEvent),

    // --- Profile ---
    /// Points credited to the profile.
    PointsAwarded {
        /// Points just added.
        points: u32,
        /// Profile total afterwards.
        total: u32,
    },
    /// The player reached a new level.
    LevelUp {
        /// New level.
        level: u32,
    },
    /// A badge was added to the profile.
    BadgeAwarded(String),

    // --- Stories ---
    /// Story request sent.
    StoryLoading {
        /// Requested topic.
        topic: String,
    },
    /// Story ready to read.
    StoryReady(StoryResponse),
    /// Story request failed; offer a retry.
    StoryFailed {
        /// Player-facing message.
        message: String,
    },

    // --- Quiz ---
    /// Quiz request sent.
    QuizLoading {
        /// Requested topic.
        topic: String,
    },
    /// A question is waiting for an answer.
    QuizQuestion {
        /// One-based question number.
        number: usize,
        /// Questions in the quiz.
        total: usize,
    },
    /// The current question was answered.
    QuizAnswered {
        /// Whether the answer was right.
        correct: bool,
        /// Index of the right option.
        correct_answer: usize,
        /// Why it is right.
        explanation: String,
    },
    /// Every question answered.
    QuizFinished {
        /// Correct answers.
        score: u32,
        /// Questions asked.
        total: usize,
    },
    /// Quiz request failed; offer a retry.
    QuizFailed {
        /// Player-facing message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_use_tagged_json() {
        let action: UserAction = serde_json::from_str(r#"{"type": "FLIP_CARD", "payload": 3}"#).expect("parse");
        assert_eq!(action, UserAction::FlipCard(3));

        let start: UserAction = serde_json::from_str(
            r#"{"type": "START_MEMORY_GAME", "payload": {"theme": "ANIMALS", "difficulty": "HARD"}}"#,
        )
        .expect("parse");
        assert_eq!(
            start,
            UserAction::StartMemoryGame {
                theme: ThemeId::Animals,
                difficulty: Difficulty::Hard
            }
        );
    }

    #[test]
    fn unit_actions_need_no_payload() {
        let action: UserAction = serde_json::from_str(r#"{"type": "NEXT_QUESTION"}"#).expect("parse");
        assert_eq!(action, UserAction::NextQuestion);

        let again: UserAction = serde_json::from_str(r#"{"type": "START_RANDOM_QUIZ"}"#).expect("parse");
        assert_eq!(again, UserAction::StartRandomQuiz);
    }

    #[test]
    fn navigate_carries_the_view_name() {
        let json = serde_json::to_string(&UserAction::Navigate(AppView::GamesHub)).expect("serialize");
        assert_eq!(json, r#"{"type":"NAVIGATE","payload":"GAMES_HUB"}"#);
    }
}
