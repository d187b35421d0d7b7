//! # Arca Core Library
//!
//! The engines behind a children's Bible-learning app, free of any UI or
//! network concerns:
//!
//! - **Memory match** — a turn-based card game with a deterministic clock,
//!   scoring, time bonuses and achievements ([`MemoryGame`]).
//! - **Quiz flow** — the linear topic → answer → explain → finish machine
//!   ([`QuizFlow`]).
//! - **App session** — navigation and the player's profile ([`AppSession`]).
//!
//! Story and quiz content is produced elsewhere (see `arca-content`); this
//! crate only defines the shapes that content must take.
//!
//! ## Determinism
//!
//! Nothing here reads the wall clock. Reveal delays and elapsed time are
//! driven by [`MemoryGame::advance`], and shuffling accepts a caller-supplied
//! RNG, so every game can be replayed exactly in tests.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod memory_game;
pub mod quiz;
pub mod session;
pub mod types;

pub use config::ArcaConfig;
pub use error::ArcaError;
pub use memory_game::{Difficulty, MemoryGame, ThemeId};
pub use quiz::QuizFlow;
pub use session::AppSession;
pub use types::*;
