//! Notification configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Notification configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    /// Resend API key; notifications are only recorded locally when unset
    pub resend_api_key: Option<String>,

    /// Receives a summary of every submission
    #[serde(default = "default_operator_email")]
    pub operator_email: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Send a receipt to the submitter
    #[serde(default = "default_send_confirmation")]
    pub send_confirmation: bool,
}

impl NotificationsConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Configured Resend key, ignoring blank values
    pub fn resend_api_key(&self) -> Option<&str> {
        self.resend_api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = self.resend_api_key() {
            if !key.starts_with("re_") {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.operator_email.contains('@') {
            return Err(ValidationError::InvalidOperatorEmail);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            operator_email: default_operator_email(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            send_confirmation: default_send_confirmation(),
        }
    }
}

fn default_operator_email() -> String {
    "martonnedias@gmail.com".to_string()
}

fn default_from_email() -> String {
    "noreply@mdsolution.com.br".to_string()
}

fn default_from_name() -> String {
    "MD Solution".to_string()
}

fn default_send_confirmation() -> bool {
    true
}
