//! Content error types.

use std::fmt;

use thiserror::Error;

/// Errors a content provider can report for a single call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("content request failed: {0}")]
    RequestFailed(String),

    /// Request timed out.
    #[error("content request timed out after {0}ms")]
    Timeout(u64),

    /// Provider is unreachable or not configured.
    #[error("content provider unavailable: {0}")]
    Unavailable(String),

    /// Provider answered with a non-success status.
    #[error("content provider returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// Provider answered successfully but with no text.
    #[error("content provider returned an empty response")]
    EmptyResponse,

    /// Response text was not valid JSON.
    #[error("failed to parse content response as JSON: {0}")]
    ParseError(String),

    /// Response JSON did not match the requested shape.
    #[error("content response schema validation failed: {0}")]
    SchemaValidation(String),

    /// Configuration error.
    #[error("content configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(0)
        } else if err.is_connect() {
            ProviderError::Unavailable(err.to_string())
        } else {
            ProviderError::RequestFailed(err.to_string())
        }
    }
}

/// What was being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// A Bible story.
    Story,
    /// A three-question quiz.
    Quiz,
}

impl ContentKind {
    /// Message shown to the player when this kind of content fails.
    #[must_use]
    pub fn retry_message(self) -> &'static str {
        match self {
            Self::Story => "Não foi possível criar a história agora. Tente novamente!",
            Self::Quiz => "Não foi possível criar o quiz agora. Tente outro tema!",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Story => write!(f, "story"),
            Self::Quiz => write!(f, "quiz"),
        }
    }
}

/// The single failure surfaced by the content service.
///
/// Displays as the player-facing retry message; the underlying
/// [`ProviderError`] is kept as the error source for logs.
#[derive(Debug, Error)]
#[error("{}", .kind.retry_message())]
pub struct ContentUnavailable {
    /// What was being requested.
    pub kind: ContentKind,
    /// Why it failed.
    #[source]
    pub source: ProviderError,
}

impl ContentUnavailable {
    /// Wrap a provider error for `kind`.
    #[must_use]
    pub fn new(kind: ContentKind, source: ProviderError) -> Self {
        Self { kind, source }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn unavailable_displays_the_retry_message() {
        let err = ContentUnavailable::new(ContentKind::Story, ProviderError::EmptyResponse);
        assert_eq!(err.to_string(), ContentKind::Story.retry_message());
    }

    #[test]
    fn unavailable_keeps_the_cause() {
        let err = ContentUnavailable::new(
            ContentKind::Quiz,
            ProviderError::SchemaValidation("questions: expected 3".into()),
        );
        let source = err.source().expect("has a source").to_string();
        assert!(source.contains("expected 3"));
    }

    #[test]
    fn api_error_shows_status() {
        let err = ProviderError::Api { status: 429, body: "quota".into() };
        assert_eq!(err.to_string(), "content provider returned HTTP 429: quota");
    }
}
