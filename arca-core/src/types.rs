//! Shared type definitions: generated content shapes, views and the profile.
//!
//! Content types use camelCase on the wire because that is the shape the
//! provider is asked to return.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Generated content
// ---------------------------------------------------------------------------

/// A child-friendly story produced by the content provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryResponse {
    /// Creative title for the story.
    pub title: String,
    /// Story text, may contain emojis.
    pub content: String,
    /// One-sentence lesson ("A Lição de Hoje").
    pub moral: String,
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text.
    pub question: String,
    /// Exactly four answer options.
    pub options: Vec<String>,
    /// Index of the correct option, 0–3.
    pub correct_answer: usize,
    /// Friendly explanation of why the answer is right.
    pub explanation: String,
}

impl QuizQuestion {
    /// Whether `option` is the correct answer.
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        self.correct_answer == option
    }

    /// Text of the correct option, if the index is in range.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

/// An ordered set of quiz questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizData {
    /// The questions, asked in order.
    pub questions: Vec<QuizQuestion>,
}

impl QuizData {
    /// Number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether there are no questions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Navigation & profile
// ---------------------------------------------------------------------------

/// Top-level screens the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppView {
    /// Landing page.
    #[default]
    Home,
    /// Story generator.
    Story,
    /// Bible quiz.
    Quiz,
    /// Game picker.
    GamesHub,
    /// Memory match game.
    MemoryGame,
    /// Adventure map.
    Journey,
    /// Printable activities.
    Activities,
    /// Player profile.
    Profile,
    /// Sign-in screen.
    Login,
}

impl fmt::Display for AppView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "HOME",
            Self::Story => "STORY",
            Self::Quiz => "QUIZ",
            Self::GamesHub => "GAMES_HUB",
            Self::MemoryGame => "MEMORY_GAME",
            Self::Journey => "JOURNEY",
            Self::Activities => "ACTIVITIES",
            Self::Profile => "PROFILE",
            Self::Login => "LOGIN",
        };
        write!(f, "{name}")
    }
}

/// The player's in-memory profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Avatar emoji.
    pub avatar: String,
    /// Total points earned.
    pub points: u32,
    /// Current level, starting at 1.
    pub level: u32,
    /// Badge names, in the order they were earned.
    pub badges: Vec<String>,
    /// Stories read this session.
    pub completed_stories: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_question_uses_camel_case_on_the_wire() {
        let raw = r#"{
            "question": "Quem construiu a arca?",
            "options": ["Moisés", "Noé", "Davi", "Jonas"],
            "correctAnswer": 1,
            "explanation": "Deus pediu a Noé para construir a arca."
        }"#;
        let q: QuizQuestion = serde_json::from_str(raw).expect("should parse");
        assert_eq!(q.correct_answer, 1);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert_eq!(q.correct_option(), Some("Noé"));
    }

    #[test]
    fn view_display_matches_serde_name() {
        let json = serde_json::to_string(&AppView::GamesHub).expect("serialize");
        assert_eq!(json, "\"GAMES_HUB\"");
        assert_eq!(AppView::GamesHub.to_string(), "GAMES_HUB");
    }
}
