//! Error types for the Arca core library.

use thiserror::Error;

use crate::memory_game::ThemeId;

/// Top-level error type for all Arca core operations.
///
/// Memory-game input (flipping cards) never fails; invalid flips are
/// no-ops. Errors only come from setting a game up or loading config.
#[derive(Error, Debug)]
pub enum ArcaError {
    /// The chosen difficulty needs more pairs than the theme can supply.
    #[error("Theme {theme} has {available} items but {requested} pairs were requested")]
    ThemeTooSmall {
        /// Theme that was asked for.
        theme: ThemeId,
        /// Pairs the difficulty needs.
        requested: usize,
        /// Items the theme has.
        available: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, ArcaError>;
