//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BRIEFING` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use briefing_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reports generated with {}", config.ai.model);
//! ```

mod ai;
mod error;
mod logging;
mod notifications;
mod persistence;

pub use ai::{AiConfig, FALLBACK_KEY_VARS, PLACEHOLDER_API_KEY};
pub use error::{ConfigError, ValidationError};
pub use logging::LogConfig;
pub use notifications::NotificationsConfig;
pub use persistence::PersistenceConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// local setup (in-memory storage, recorded notifications, no provider).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generative provider (Gemini)
    #[serde(default)]
    pub ai: AiConfig,

    /// Submission storage and fallback file
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Operator and submitter e-mails (Resend)
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Tracing subscriber
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BRIEFING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BRIEFING__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    /// - `BRIEFING__PERSISTENCE__DATABASE_URL=...` -> `persistence.database_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BRIEFING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.persistence.validate()?;
        self.notifications.validate()?;
        Ok(())
    }
}
