//! Request and response types at the provider boundary.

use serde::Serialize;
use serde_json::Value;

/// One generation call: a prompt plus the JSON shape the answer must take.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Natural-language prompt.
    pub prompt: String,
    /// JSON-schema literal the response must satisfy.
    pub response_schema: Value,
    /// Sampling temperature; provider default when `None`.
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// A request with the provider's default temperature.
    #[must_use]
    pub fn new(prompt: impl Into<String>, response_schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema,
            temperature: None,
        }
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Raw provider output, before validation.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// The generated text, expected to be JSON.
    pub text: String,
    /// Which model answered.
    pub model: String,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
}
