//! Generative provider configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Value shipped in sample `.env` files; never a real key.
pub const PLACEHOLDER_API_KEY: &str = "PLACEHOLDER_API_KEY";

/// Environment variables consulted, in order, when no key is configured.
pub const FALLBACK_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Generative provider configuration (Gemini)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token cap, provider default when unset
    pub max_output_tokens: Option<u32>,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the API key from configuration, then the process environment.
    pub fn resolve_api_key(&self) -> Option<Secret<String>> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using `lookup` for the environment fallbacks.
    ///
    /// Blank values and [`PLACEHOLDER_API_KEY`] count as absent.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<Secret<String>>
    where
        F: Fn(&str) -> Option<String>,
    {
        std::iter::once(self.gemini_api_key.clone())
            .chain(FALLBACK_KEY_VARS.iter().map(|&name| lookup(name)))
            .flatten()
            .map(|key| key.trim().to_string())
            .find(|key| is_usable_key(key))
            .map(Secret::new)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        Ok(())
    }
}

fn is_usable_key(key: &str) -> bool {
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            max_output_tokens: None,
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn resolve(config: &AiConfig, env: &[(&str, &str)]) -> Option<String> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config
            .resolve_api_key_with(|name| env.get(name).cloned())
            .map(|s| s.expose_secret().clone())
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout(), Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configured_key_wins() {
        let config = AiConfig {
            gemini_api_key: Some("configured".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve(&config, &[("GEMINI_API_KEY", "env"), ("API_KEY", "generic")]),
            Some("configured".to_string())
        );
    }

    #[test]
    fn test_environment_fallback_order() {
        let config = AiConfig::default();
        assert_eq!(
            resolve(&config, &[("GEMINI_API_KEY", "env"), ("API_KEY", "generic")]),
            Some("env".to_string())
        );
        assert_eq!(resolve(&config, &[("API_KEY", "generic")]), Some("generic".to_string()));
        assert_eq!(resolve(&config, &[]), None);
    }

    #[test]
    fn test_blank_and_placeholder_keys_are_absent() {
        let config = AiConfig {
            gemini_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve(&config, &[("GEMINI_API_KEY", PLACEHOLDER_API_KEY), ("API_KEY", "")]),
            None
        );
        assert_eq!(
            resolve(&config, &[("GEMINI_API_KEY", PLACEHOLDER_API_KEY), ("API_KEY", "real")]),
            Some("real".to_string())
        );
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_rejects_temperature() {
        let config = AiConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }
}
