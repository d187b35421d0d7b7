//! Configuration for Arca.
//!
//! Maps directly to `arca.toml`. Every field has a default, so an empty
//! file (or no file at all) yields the stock game rules.

use serde::{Deserialize, Serialize};

/// Top-level Arca configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArcaConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory match scoring and timing.
    #[serde(default)]
    pub memory_game: MemoryGameConfig,
    /// Content provider settings.
    #[serde(default)]
    pub content: ContentConfig,
    /// Player profile defaults.
    #[serde(default)]
    pub session: SessionConfig,
}

impl ArcaConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ArcaError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::ArcaError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Memory match rules: reveal delays, points and time bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryGameConfig {
    /// How long a matched pair stays on show before it is resolved.
    #[serde(default = "default_600")]
    pub match_delay_ms: u64,
    /// How long a mismatched pair stays face-up before flipping back.
    #[serde(default = "default_1000")]
    pub mismatch_delay_ms: u64,
    /// Points for each matched pair.
    #[serde(default = "default_10")]
    pub match_points: u32,
    /// Points lost for each mismatch (score never drops below zero).
    #[serde(default = "default_2")]
    pub mismatch_penalty: u32,
    /// Finishing under this many seconds earns `fast_bonus`.
    #[serde(default = "default_60")]
    pub fast_bonus_threshold_secs: u32,
    /// Bonus for finishing under `fast_bonus_threshold_secs`.
    #[serde(default = "default_20")]
    pub fast_bonus: u32,
    /// Finishing under this many seconds also earns `very_fast_bonus`.
    #[serde(default = "default_30")]
    pub very_fast_bonus_threshold_secs: u32,
    /// Extra bonus, stacked on top of `fast_bonus`.
    #[serde(default = "default_30")]
    pub very_fast_bonus: u32,
    /// Finishing under this many seconds unlocks the Speedster trophy.
    #[serde(default = "default_45")]
    pub speedster_threshold_secs: u32,
}

impl Default for MemoryGameConfig {
    fn default() -> Self {
        Self {
            match_delay_ms: 600,
            mismatch_delay_ms: 1000,
            match_points: 10,
            mismatch_penalty: 2,
            fast_bonus_threshold_secs: 60,
            fast_bonus: 20,
            very_fast_bonus_threshold_secs: 30,
            very_fast_bonus: 30,
            speedster_threshold_secs: 45,
        }
    }
}

/// Generative-content provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Provider: "gemini", "openai" or "none".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Provider base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for stories and quizzes.
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API credential.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_30000")]
    pub timeout_ms: u64,
    /// Sampling temperature; provider default when unset.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Optional TOML file overriding the built-in prompt templates.
    #[serde(default)]
    pub prompts_file: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_ms: 30_000,
            temperature: None,
            prompts_file: None,
        }
    }
}

/// Player profile defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name shown before the player picks one.
    #[serde(default = "default_name")]
    pub default_name: String,
    /// Avatar emoji shown before the player picks one.
    #[serde(default = "default_avatar")]
    pub default_avatar: String,
    /// Points needed to climb one level.
    #[serde(default = "default_100")]
    pub points_per_level: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_name: default_name(),
            default_avatar: default_avatar(),
            points_per_level: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "info".to_string() }
fn default_provider() -> String { "gemini".to_string() }
fn default_base_url() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_model() -> String { "gemini-2.5-flash".to_string() }
fn default_api_key_env() -> String { "API_KEY".to_string() }
fn default_name() -> String { "Explorador".to_string() }
fn default_avatar() -> String { "🦁".to_string() }
fn default_2() -> u32 { 2 }
fn default_10() -> u32 { 10 }
fn default_20() -> u32 { 20 }
fn default_30() -> u32 { 30 }
fn default_45() -> u32 { 45 }
fn default_60() -> u32 { 60 }
fn default_100() -> u32 { 100 }
fn default_600() -> u64 { 600 }
fn default_1000() -> u64 { 1000 }
fn default_30000() -> u64 { 30_000 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ArcaConfig::from_toml("").expect("empty config should parse");
        assert_eq!(config.memory_game.match_delay_ms, 600);
        assert_eq!(config.memory_game.mismatch_delay_ms, 1000);
        assert_eq!(config.content.model, "gemini-2.5-flash");
        assert_eq!(config.content.api_key_env, "API_KEY");
        assert_eq!(config.session.points_per_level, 100);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = ArcaConfig::from_toml(
            r#"
            [memory_game]
            mismatch_penalty = 5

            [content]
            provider = "none"
            "#,
        )
        .expect("should parse");
        assert_eq!(config.memory_game.mismatch_penalty, 5);
        assert_eq!(config.memory_game.match_points, 10);
        assert_eq!(config.content.provider, "none");
        assert_eq!(config.content.timeout_ms, 30_000);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ArcaConfig::from_toml("[memory_game\nmatch_points = ").unwrap_err();
        assert!(matches!(err, crate::ArcaError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("arca.toml");
        std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").expect("write");
        let config = ArcaConfig::from_file(&path).expect("should load");
        assert_eq!(config.general.log_level, "debug");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ArcaConfig::from_file(std::path::Path::new("/nonexistent/arca.toml")).unwrap_err();
        assert!(matches!(err, crate::ArcaError::Io(_)));
    }
}
