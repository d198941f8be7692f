//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives; `RUST_LOG` overrides when set
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LogConfig {
    /// Builds the filter, preferring `RUST_LOG` over the configured directives.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .unwrap_or_else(|_| EnvFilter::new(default_filter()))
    }

    /// Installs the global subscriber. Later calls are ignored.
    pub fn init(&self) {
        let builder = tracing_subscriber::fmt().with_env_filter(self.env_filter());
        let _ = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "briefing_engine=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.filter, "briefing_engine=info");
        assert!(!config.json);
    }
}
