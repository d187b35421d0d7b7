//! Tracing subscriber setup.

use arca_core::config::GeneralConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"`, from
/// `general.log_level`) applies to every crate. Calling this twice is
/// harmless: the second attempt is ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}

/// Like [`init`], but emits one JSON object per line.
pub fn init_json(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init();
}

/// Pick [`init`] or [`init_json`] from the `[general]` config section.
pub fn init_from(general: &GeneralConfig) {
    if general.json_logs {
        init_json(&general.log_level);
    } else {
        init(&general.log_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_ignored() {
        let general = GeneralConfig {
            json_logs: true,
            ..GeneralConfig::default()
        };
        init_from(&general);
        init_from(&GeneralConfig::default());
        tracing::info!("still logging");
    }
}
