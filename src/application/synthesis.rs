//! SynthesisOrchestrator - Turns a submitted record into a parsed report.
//!
//! One provider call per invocation. A failed synthesis is reported once and
//! left for the user to retry.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::intake::IntakeRecord;
use crate::domain::report::{ParsedDocument, PromptTemplate, SynthesisError};
use crate::ports::{AIProvider, FinishReason, GenerationRequest, ReportParser, RequestMetadata};

/// Sends records to the generative provider and structures the answer.
pub struct SynthesisOrchestrator {
    /// `None` when no credential could be resolved.
    provider: Option<Arc<dyn AIProvider>>,
    parser: Arc<dyn ReportParser>,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

impl SynthesisOrchestrator {
    pub fn new(provider: Option<Arc<dyn AIProvider>>, parser: Arc<dyn ReportParser>) -> Self {
        Self {
            provider,
            parser,
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// True when a provider is wired in.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Generates and parses the report for `record`.
    pub async fn synthesize(&self, record: &IntakeRecord) -> Result<ParsedDocument, SynthesisError> {
        let rendered = PromptTemplate::for_kind(record.kind()).render(record);

        let Some(provider) = &self.provider else {
            let err = SynthesisError::ConfigMissing;
            warn!(
                record_id = %record.id(),
                kind = %record.kind(),
                classification = err.classification(),
                "Synthesis skipped: no provider credential"
            );
            return Err(err);
        };

        let mut request = GenerationRequest::new(
            rendered.prompt,
            RequestMetadata::new(record.id(), record.kind()),
        )
        .with_system_instruction(rendered.system_instruction);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max) = self.max_output_tokens {
            request = request.with_max_output_tokens(max);
        }

        let info = provider.provider_info();
        info!(
            record_id = %record.id(),
            kind = %record.kind(),
            provider = %info.name,
            model = %info.model,
            "Requesting report synthesis"
        );

        let response = match provider.generate(request).await {
            Ok(response) => response,
            Err(provider_err) => {
                let err = SynthesisError::from_provider(provider_err.clone());
                warn!(
                    record_id = %record.id(),
                    kind = %record.kind(),
                    classification = err.classification(),
                    error = %provider_err,
                    "Report synthesis failed"
                );
                return Err(err);
            }
        };

        if response.text.trim().is_empty() {
            let err = match response.finish_reason {
                FinishReason::ContentFilter => SynthesisError::ContentFiltered("content_filter".to_string()),
                _ => SynthesisError::EmptyResponse,
            };
            warn!(
                record_id = %record.id(),
                kind = %record.kind(),
                classification = err.classification(),
                "Provider returned no report text"
            );
            return Err(err);
        }

        let document = self.parser.parse(&response.text);
        info!(
            record_id = %record.id(),
            kind = %record.kind(),
            blocks = document.len(),
            total_tokens = response.usage.total_tokens,
            "Report synthesized"
        );
        Ok(document)
    }
}
