//! Story and quiz requests.
//!
//! Each operation renders a prompt, attaches the matching schema, calls the
//! provider once and validates the answer. Any failure along the way comes
//! back as a [`ContentUnavailable`] for the caller to show as a retry prompt.

use tracing::{info, warn};

use arca_core::config::ContentConfig;
use arca_core::types::{QuizData, StoryResponse};

use crate::client::ContentProvider;
use crate::error::{ContentKind, ContentUnavailable, ProviderError};
use crate::prompt::{PromptId, PromptTemplates};
use crate::schema;
use crate::types::GenerationRequest;

/// Fetches validated stories and quizzes from a [`ContentProvider`].
pub struct ContentService<P> {
    provider: P,
    prompts: PromptTemplates,
    temperature: Option<f32>,
}

impl<P: ContentProvider> ContentService<P> {
    /// A service using the built-in prompts and the provider's default
    /// temperature.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            prompts: PromptTemplates::builtin(),
            temperature: None,
        }
    }

    /// A service with the temperature from `config`.
    #[must_use]
    pub fn from_config(provider: P, config: &ContentConfig) -> Self {
        Self::new(provider).with_temperature(config.temperature)
    }

    /// Replace the prompt templates.
    #[must_use]
    pub fn with_prompts(mut self, prompts: PromptTemplates) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the sampling temperature sent with each request.
    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// The underlying provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Ask for a children's story about `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentUnavailable`] if the call fails, returns nothing, or
    /// the answer lacks a non-blank `title`, `content` or `moral`.
    pub async fn request_story(&self, topic: &str) -> Result<StoryResponse, ContentUnavailable> {
        let text = self
            .fetch(PromptId::Story, topic, schema::story_schema())
            .await
            .map_err(|e| unavailable(ContentKind::Story, topic, e))?;
        let story = schema::validate_story(&text).map_err(|e| unavailable(ContentKind::Story, topic, e))?;

        info!(topic, title = %story.title, "Story delivered");
        Ok(story)
    }

    /// Ask for a three-question quiz about `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentUnavailable`] if the call fails, returns nothing, or
    /// the answer is not exactly three well-formed questions.
    pub async fn request_quiz(&self, topic: &str) -> Result<QuizData, ContentUnavailable> {
        let text = self
            .fetch(PromptId::Quiz, topic, schema::quiz_schema())
            .await
            .map_err(|e| unavailable(ContentKind::Quiz, topic, e))?;
        let quiz = schema::validate_quiz(&text).map_err(|e| unavailable(ContentKind::Quiz, topic, e))?;

        info!(topic, questions = quiz.len(), "Quiz delivered");
        Ok(quiz)
    }

    async fn fetch(
        &self,
        id: PromptId,
        topic: &str,
        response_schema: serde_json::Value,
    ) -> Result<String, ProviderError> {
        let prompt = self.prompts.render(id, topic.trim());
        let request = GenerationRequest::new(prompt, response_schema).with_temperature(self.temperature);
        let response = self.provider.generate(&request).await?;
        Ok(response.text)
    }
}

fn unavailable(kind: ContentKind, topic: &str, source: ProviderError) -> ContentUnavailable {
    warn!(%kind, topic, error = %source, "Content unavailable");
    ContentUnavailable::new(kind, source)
}
