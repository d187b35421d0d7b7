//! # arca-content — Story and Quiz Generation for Arca
//!
//! Turns a topic into validated content by way of a generative text API:
//!   - **Gemini** `generateContent` (default)
//!   - **OpenAI-compatible** chat completions
//!   - **None**, for running without a credential
//!
//! Every call asks for structured JSON against an explicit schema and then
//! checks the answer again on receipt, so a malformed response never reaches
//! the UI as typed content.
//!
//! # Flow
//!
//! ```text
//! topic ──render──▶ prompt + schema ──ContentProvider──▶ raw text ──validate──▶ StoryResponse | QuizData
//!                                                              └──any failure──▶ ContentUnavailable
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod prompt;
pub mod schema;
pub mod service;
pub mod types;

pub use client::{ContentProvider, HttpContentProvider, ProviderBackend};
pub use error::{ContentKind, ContentUnavailable, ProviderError};
pub use prompt::PromptTemplates;
pub use service::ContentService;
pub use types::{GenerationRequest, GenerationResponse};
