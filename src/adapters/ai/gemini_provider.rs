//! Gemini Provider - Implementation of AIProvider for Google's Generative
//! Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-flash")
//!     .with_timeout(Duration::from_secs(120));
//!
//! let provider = GeminiProvider::new(config)?;
//! ```
//!
//! Each `generate` call issues exactly one `generateContent` request.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ports::{
    AIError, AIProvider, FinishReason, GenerationRequest, GenerationResponse, ProviderInfo,
    TokenUsage,
};

/// Seconds suggested to the caller when a 429 carries no retry hint.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a configuration from an already wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Converts our request to Gemini's format.
    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            system_instruction: request.system_instruction.as_ref().map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart { text: text.clone() }],
            }),
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: if request.temperature.is_some() || request.max_output_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_output_tokens,
                })
            } else {
                None
            },
        }
    }

    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, AIError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&Self::to_gemini_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn parse_response(&self, response: Response) -> Result<GenerationResponse, AIError> {
        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, &error_body));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        into_generation_response(body, &self.config.model)
    }
}

#[async_trait]
impl AIProvider for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, AIError> {
        debug!(
            record_id = %request.metadata.record_id,
            model = %self.config.model,
            prompt_chars = request.prompt.len(),
            "Sending generateContent request"
        );
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

/// Maps a non-success HTTP status to an error.
fn map_error_status(status: StatusCode, error_body: &str) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        400 if error_body.contains("API_KEY_INVALID") || error_body.contains("API key not valid") => {
            AIError::AuthenticationFailed
        }
        400 => AIError::InvalidRequest(error_body.to_string()),
        429 => AIError::rate_limited(parse_retry_after(error_body)),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Extracts the `retryDelay` hint ("37s") from a 429 body.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/details")?
                .as_array()?
                .iter()
                .find_map(|d| d.get("retryDelay")?.as_str().map(str::to_string))
        })
        .and_then(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
        .map(|secs| secs.ceil() as u32)
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("STOP") | None => FinishReason::Stop,
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT")
        | Some("SPII") => FinishReason::ContentFilter,
        Some(_) => FinishReason::Other,
    }
}

/// Converts a successful body into a response, surfacing safety blocks.
fn into_generation_response(body: GeminiResponse, model: &str) -> Result<GenerationResponse, AIError> {
    let block_reason = body.prompt_feedback.and_then(|f| f.block_reason);

    let candidate = match body.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            return Err(match block_reason {
                Some(reason) => AIError::content_filtered(reason),
                None => AIError::EmptyResponse,
            })
        }
    };

    let finish_reason = map_finish_reason(candidate.finish_reason.as_deref());
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() && finish_reason == FinishReason::ContentFilter {
        return Err(AIError::content_filtered(
            candidate.finish_reason.unwrap_or_else(|| "SAFETY".to_string()),
        ));
    }

    let usage = body
        .usage_metadata
        .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
        .unwrap_or_default();

    Ok(GenerationResponse::new(text, body.model_version.unwrap_or_else(|| model.to_string()), finish_reason)
        .with_usage(usage))
}

// === Gemini wire types ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SubmissionId;
    use crate::domain::intake::IntakeKind;
    use crate::ports::RequestMetadata;

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            "Gere o relatório",
            RequestMetadata::new(SubmissionId::new(), IntakeKind::BusinessBriefing),
        )
        .with_system_instruction("Você é um consultor")
        .with_temperature(0.7)
    }

    fn body(json: &str) -> GeminiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = GeminiConfig::new("key")
            .with_model("gemini-1.5-pro")
            .with_base_url("http://localhost:9999/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), "key");

        let provider = GeminiProvider::new(config).unwrap();
        assert_eq!(
            provider.generate_url(),
            "http://localhost:9999/models/gemini-1.5-pro:generateContent"
        );
        assert_eq!(provider.provider_info(), ProviderInfo::new("gemini", "gemini-1.5-pro"));
    }

    #[test]
    fn request_serializes_to_gemini_shape() {
        let json = serde_json::to_value(GeminiProvider::to_gemini_request(&request())).unwrap();

        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Você é um consultor");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Gere o relatório");
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!(json["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(map_error_status(StatusCode::FORBIDDEN, ""), AIError::AuthenticationFailed));
        assert!(matches!(
            map_error_status(StatusCode::BAD_REQUEST, r#"{"error":{"status":"INVALID_ARGUMENT","message":"API key not valid"}}"#),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(map_error_status(StatusCode::BAD_REQUEST, "bad"), AIError::InvalidRequest(_)));
        assert!(matches!(
            map_error_status(StatusCode::TOO_MANY_REQUESTS, ""),
            AIError::RateLimited { retry_after_secs: DEFAULT_RETRY_AFTER_SECS }
        ));
        assert!(matches!(map_error_status(StatusCode::SERVICE_UNAVAILABLE, ""), AIError::Unavailable { .. }));
        assert!(matches!(map_error_status(StatusCode::NOT_FOUND, ""), AIError::Network(_)));
    }

    #[test]
    fn retry_delay_is_read_from_details() {
        let body = r#"{"error":{"code":429,"details":[{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"37s"}]}}"#;
        assert_eq!(parse_retry_after(body), 37);
        assert_eq!(parse_retry_after("not json"), DEFAULT_RETRY_AFTER_SECS);
    }

    #[test]
    fn text_parts_are_concatenated() {
        let response = into_generation_response(
            body(r###"{"candidates":[{"content":{"role":"model","parts":[{"text":"## Resumo\n"},{"text":"- item"}]},"finishReason":"STOP"}],
                    "usageMetadata":{"promptTokenCount":12,"candidatesTokenCount":30,"totalTokenCount":42}}"###),
            "gemini-1.5-flash",
        )
        .unwrap();

        assert_eq!(response.text, "## Resumo\n- item");
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.model, "gemini-1.5-flash");
        assert_eq!(response.usage.total_tokens, 42);
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let err = into_generation_response(body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#), "m").unwrap_err();
        assert!(matches!(err, AIError::ContentFiltered { reason } if reason == "SAFETY"));
    }

    #[test]
    fn safety_finish_without_text_is_content_filtered() {
        let err = into_generation_response(
            body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#),
            "m",
        )
        .unwrap_err();
        assert!(matches!(err, AIError::ContentFiltered { .. }));
    }

    #[test]
    fn no_candidates_is_empty_response() {
        let err = into_generation_response(body("{}"), "m").unwrap_err();
        assert!(matches!(err, AIError::EmptyResponse));
    }

    #[test]
    fn finish_reason_mapping() {
        assert_eq!(map_finish_reason(Some("MAX_TOKENS")), FinishReason::Length);
        assert_eq!(map_finish_reason(Some("RECITATION")), FinishReason::ContentFilter);
        assert_eq!(map_finish_reason(Some("OTHER")), FinishReason::Other);
        assert_eq!(map_finish_reason(None), FinishReason::Stop);
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = GeminiProvider::new(
            GeminiConfig::new("key")
                .with_base_url(format!("http://{}", addr))
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap();

        let err = provider.generate(request()).await.unwrap_err();
        assert!(matches!(err, AIError::Network(_)), "got {:?}", err);
    }
}
