//! Resend implementation of Notifier.
//!
//! Sends plain-text e-mail through `POST /emails`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ports::{Notification, Notifier, NotifyError};

/// Configuration for the Resend notifier.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    api_key: Secret<String>,
    /// Sender, already formatted as `Name <address>`.
    pub from: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            from: from.into(),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Resend e-mail notifier.
pub struct ResendNotifier {
    config: ResendConfig,
    client: Client,
}

impl ResendNotifier {
    pub fn new(config: ResendConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| NotifyError::Configuration(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }

    fn to_request<'a>(&'a self, notification: &'a Notification) -> SendEmailRequest<'a> {
        SendEmailRequest {
            from: &self.config.from,
            to: vec![notification.to.as_str()],
            subject: &notification.subject,
            text: &notification.body,
        }
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.to_request(&notification))
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        debug!(to = %notification.to, "Notification accepted by Resend");
        Ok(())
    }
}

fn rejection(status: u16, body: &str) -> NotifyError {
    let message = serde_json::from_str::<ResendErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string());
    NotifyError::Rejected { status, message }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> ResendNotifier {
        ResendNotifier::new(
            ResendConfig::new("re_test", "MD Solution <contato@mdsolution.com.br>")
                .with_base_url("http://localhost:1/"),
        )
        .unwrap()
    }

    #[test]
    fn request_uses_plain_text_body() {
        let notifier = notifier();
        let notification = Notification::new("ops@example.com", "Novo", "Empresa: Acme");

        let json = serde_json::to_value(notifier.to_request(&notification)).unwrap();

        assert_eq!(json["from"], "MD Solution <contato@mdsolution.com.br>");
        assert_eq!(json["to"][0], "ops@example.com");
        assert_eq!(json["subject"], "Novo");
        assert_eq!(json["text"], "Empresa: Acme");
        assert_eq!(notifier.emails_url(), "http://localhost:1/emails");
    }

    #[test]
    fn rejection_reads_provider_message() {
        let err = rejection(422, r#"{"statusCode":422,"name":"validation_error","message":"Invalid `to` field."}"#);
        assert_eq!(
            err,
            NotifyError::Rejected {
                status: 422,
                message: "Invalid `to` field.".to_string()
            }
        );
    }

    #[test]
    fn rejection_falls_back_to_raw_body() {
        let err = rejection(500, "oops");
        assert!(matches!(err, NotifyError::Rejected { status: 500, message } if message == "oops"));
    }
}
