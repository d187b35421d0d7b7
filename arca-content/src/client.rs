//! Content providers: the trait seam and the HTTP client behind it.
//!
//! Each [`ContentProvider::generate`] call is single-shot. There is no retry
//! loop or cache; a failed call is reported and the player decides whether
//! to ask again.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, warn};

use arca_core::config::ContentConfig;

use crate::error::ProviderError;
use crate::types::{GenerationRequest, GenerationResponse};

/// Anything that can turn a prompt plus schema into raw response text.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Run one generation call.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError>;

    /// Whether a backend is configured at all.
    fn is_available(&self) -> bool {
        true
    }
}

#[async_trait]
impl<P: ContentProvider + ?Sized> ContentProvider for Arc<P> {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        (**self).generate(request).await
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Provider backend for content generation.
#[derive(Debug, Clone)]
pub enum ProviderBackend {
    /// Google Gemini `generateContent` API.
    Gemini {
        /// API root, e.g. `https://generativelanguage.googleapis.com`.
        base_url: String,
        /// API credential.
        api_key: String,
    },
    /// OpenAI-compatible chat completions API.
    OpenAiCompatible {
        /// API root; `/v1/chat/completions` is appended.
        base_url: String,
        /// Bearer token.
        api_key: String,
    },
    /// No backend; every call fails with `Unavailable`.
    None,
}

/// HTTP client that routes requests to the configured backend.
pub struct HttpContentProvider {
    backend: ProviderBackend,
    http: Client,
    model: String,
    timeout_ms: u64,
}

impl HttpContentProvider {
    /// Create a new provider.
    #[must_use]
    pub fn new(backend: ProviderBackend, model: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            backend,
            http: Client::new(),
            model: model.into(),
            timeout_ms,
        }
    }

    /// A provider with no backend (all calls fail).
    #[must_use]
    pub fn none() -> Self {
        Self::new(ProviderBackend::None, String::new(), 0)
    }

    /// Build from config, reading the credential from the environment
    /// variable named by `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown provider name or a missing
    /// credential.
    pub fn from_config(config: &ContentConfig) -> Result<Self, ProviderError> {
        let api_key = std::env::var(&config.api_key_env).ok();
        Self::from_config_with_key(config, api_key)
    }

    /// Build from config with an explicit credential.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown provider name, or if a backend
    /// that needs a credential gets none.
    pub fn from_config_with_key(
        config: &ContentConfig,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let require_key = || {
            api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    ProviderError::ConfigError(format!(
                        "{} is not set; '{}' needs an API key",
                        config.api_key_env, config.provider
                    ))
                })
        };

        let backend = match config.provider.to_ascii_lowercase().as_str() {
            "gemini" => ProviderBackend::Gemini { base_url, api_key: require_key()? },
            "openai" | "openai_compatible" => {
                ProviderBackend::OpenAiCompatible { base_url, api_key: require_key()? }
            }
            "none" => ProviderBackend::None,
            other => {
                return Err(ProviderError::ConfigError(format!(
                    "unknown content provider: '{other}'"
                )));
            }
        };

        Ok(Self::new(backend, config.model.clone(), config.timeout_ms))
    }

    /// The configured backend.
    #[must_use]
    pub fn backend(&self) -> &ProviderBackend {
        &self.backend
    }

    /// Model name sent with every request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_gemini(
        &self,
        base_url: &str,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{base_url}/v1beta/models/{}:generateContent", self.model);
        let body = gemini_body(request);
        let start = Instant::now();

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let json = read_success(resp).await?;
        let latency_ms = elapsed_ms(start);
        let text = gemini_text(&json).ok_or(ProviderError::EmptyResponse)?;

        debug!(model = %self.model, latency_ms, "Gemini response received");
        Ok(GenerationResponse {
            text,
            model: self.model.clone(),
            latency_ms,
        })
    }

    async fn generate_openai(
        &self,
        base_url: &str,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{base_url}/v1/chat/completions");
        let body = openai_body(&self.model, request);
        let start = Instant::now();

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let json = read_success(resp).await?;
        let latency_ms = elapsed_ms(start);
        let text = openai_text(&json).ok_or(ProviderError::EmptyResponse)?;

        debug!(model = %self.model, latency_ms, "OpenAI-compatible response received");
        Ok(GenerationResponse {
            text,
            model: self.model.clone(),
            latency_ms,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            warn!(timeout_ms = self.timeout_ms, "Content request timed out");
            ProviderError::Timeout(self.timeout_ms)
        } else {
            warn!(error = %err, "Content request failed");
            err.into()
        }
    }
}

#[async_trait]
impl ContentProvider for HttpContentProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        match &self.backend {
            ProviderBackend::None => {
                Err(ProviderError::Unavailable("No content provider configured".into()))
            }
            ProviderBackend::Gemini { base_url, api_key } => {
                self.generate_gemini(base_url, api_key, request).await
            }
            ProviderBackend::OpenAiCompatible { base_url, api_key } => {
                self.generate_openai(base_url, api_key, request).await
            }
        }
    }

    fn is_available(&self) -> bool {
        !matches!(self.backend, ProviderBackend::None)
    }
}

// ---------------------------------------------------------------------------
// Wire bodies
// ---------------------------------------------------------------------------

/// `generateContent` body: JSON output constrained by the request schema.
pub(crate) fn gemini_body(request: &GenerationRequest) -> Value {
    let mut body = json!({
        "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": gemini_schema(&request.response_schema),
        }
    });
    if let Some(temperature) = request.temperature {
        body["generationConfig"]["temperature"] = json!(temperature);
    }
    body
}

/// Chat completions body with a `json_schema` response format.
pub(crate) fn openai_body(model: &str, request: &GenerationRequest) -> Value {
    let mut body = json!({
        "model": model,
        "messages": [{ "role": "user", "content": request.prompt }],
        "response_format": {
            "type": "json_schema",
            "json_schema": { "name": "content", "schema": request.response_schema },
        }
    });
    if let Some(temperature) = request.temperature {
        body["temperature"] = json!(temperature);
    }
    body
}

/// Gemini spells schema types in upper case (`OBJECT`, `STRING`).
pub(crate) fn gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let value = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_ascii_uppercase()),
                        _ => gemini_schema(value),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(gemini_schema).collect()),
        other => other.clone(),
    }
}

/// Concatenated text parts of the first candidate, if any.
pub(crate) fn gemini_text(json: &Value) -> Option<String> {
    let parts = json["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    (!text.trim().is_empty()).then_some(text)
}

/// Message content of the first choice, if any.
pub(crate) fn openai_text(json: &Value) -> Option<String> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

async fn read_success(resp: reqwest::Response) -> Result<Value, ProviderError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Content provider returned error");
        return Err(ProviderError::Api {
            status: status.as_u16(),
            body,
        });
    }
    resp.json()
        .await
        .map_err(|e| ProviderError::ParseError(e.to_string()))
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    fn config(provider: &str) -> ContentConfig {
        ContentConfig {
            provider: provider.into(),
            base_url: "https://example.test/".into(),
            ..ContentConfig::default()
        }
    }

    #[test]
    fn gemini_config_needs_a_key() {
        let err = HttpContentProvider::from_config_with_key(&config("gemini"), None);
        assert!(matches!(err, Err(ProviderError::ConfigError(_))));

        let blank = HttpContentProvider::from_config_with_key(&config("gemini"), Some("  ".into()));
        assert!(matches!(blank, Err(ProviderError::ConfigError(_))));
    }

    #[test]
    fn gemini_config_builds_backend() {
        let provider =
            HttpContentProvider::from_config_with_key(&config("Gemini"), Some("k".into())).expect("build");
        assert!(provider.is_available());
        assert_eq!(provider.model(), "gemini-2.5-flash");
        match provider.backend() {
            ProviderBackend::Gemini { base_url, api_key } => {
                assert_eq!(base_url, "https://example.test");
                assert_eq!(api_key, "k");
            }
            other => panic!("unexpected backend {other:?}"),
        }
    }

    #[test]
    fn openai_config_builds_backend() {
        let provider =
            HttpContentProvider::from_config_with_key(&config("openai"), Some("k".into())).expect("build");
        assert!(matches!(provider.backend(), ProviderBackend::OpenAiCompatible { .. }));
    }

    #[test]
    fn none_config_needs_no_key() {
        let provider = HttpContentProvider::from_config_with_key(&config("none"), None).expect("build");
        assert!(!provider.is_available());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = HttpContentProvider::from_config_with_key(&config("carrier-pigeon"), Some("k".into()));
        assert!(matches!(err, Err(ProviderError::ConfigError(_))));
    }

    #[tokio::test]
    async fn none_backend_is_unavailable() {
        let provider = HttpContentProvider::none();
        let request = GenerationRequest::new("oi", schema::story_schema());
        let result = provider.generate(&request).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[test]
    fn gemini_body_requests_json_with_schema() {
        let request = GenerationRequest::new("Conte Davi", schema::story_schema()).with_temperature(Some(0.5));
        let body = gemini_body(&request);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Conte Davi");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["moral"]["type"],
            "STRING"
        );
        assert_eq!(body["generationConfig"]["temperature"], json!(0.5));
    }

    #[test]
    fn gemini_body_omits_unset_temperature() {
        let body = gemini_body(&GenerationRequest::new("x", schema::quiz_schema()));
        assert!(body["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn gemini_schema_keeps_property_names() {
        let converted = gemini_schema(&schema::quiz_schema());
        let item = &converted["properties"]["questions"]["items"];
        assert_eq!(item["type"], "OBJECT");
        assert_eq!(item["properties"]["correctAnswer"]["type"], "INTEGER");
        assert_eq!(item["required"][2], "correctAnswer");
    }

    #[test]
    fn openai_body_uses_json_schema_format() {
        let body = openai_body("gpt-4o-mini", &GenerationRequest::new("x", schema::story_schema()));
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["schema"]["type"], "object");
    }

    #[test]
    fn gemini_text_joins_parts() {
        let json = json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        });
        assert_eq!(gemini_text(&json).as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn gemini_text_missing_or_blank_is_none() {
        assert!(gemini_text(&json!({ "candidates": [] })).is_none());
        assert!(gemini_text(&json!({
            "candidates": [{ "content": { "parts": [{ "text": " " }] } }]
        }))
        .is_none());
    }

    #[test]
    fn openai_text_reads_first_choice() {
        let json = json!({ "choices": [{ "message": { "content": "{}" } }] });
        assert_eq!(openai_text(&json).as_deref(), Some("{}"));
        assert!(openai_text(&json!({ "choices": [] })).is_none());
    }
}
