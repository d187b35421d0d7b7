//! # arca-shell — App Shell for Arca
//!
//! The thin layer between a UI and the engines. It holds navigation and the
//! player's profile, routes each [`UserAction`] to the memory game, the quiz
//! flow or the content service, and credits the profile when a game is won
//! or a story arrives.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  UI layer                    │
//! └───────────┬───────────────────▲──────────────┘
//!        UserAction          ShellEvent
//! ┌───────────▼───────────────────┴──────────────┐
//! │                 arca-shell                   │
//! │   App ── hooks ──▶ AppSession (profile)      │
//! │    │                                         │
//! │    ├──▶ MemoryGame      (arca-core)          │
//! │    ├──▶ QuizFlow        (arca-core)          │
//! │    └──▶ ContentService  (arca-content)       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `app` — the [`App`] router and story-screen state
//! - `events` — [`UserAction`] in, [`ShellEvent`] out
//! - `hooks` — profile credit on wins and delivered stories
//! - `logging` — tracing subscriber setup

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod events;
pub mod hooks;
pub mod logging;

pub use app::{App, STORY_FAILED_MESSAGE, StoryState};
pub use events::{ShellEvent, UserAction};
