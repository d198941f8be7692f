//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Synthesis Ports
//!
//! - `AIProvider` - Generative-text backend
//! - `ReportParser` - Structures raw report text
//! - `DocumentRenderer` - External export of a parsed report
//!
//! ## Submission Ports
//!
//! - `SubmissionGateway` - Primary persistence of submitted records
//! - `FallbackQueue` - Append-only local backup when persistence fails
//! - `Notifier` - Operator summary and submitter confirmation e-mails

mod ai_provider;
mod document_renderer;
mod fallback_queue;
mod notifier;
mod report_parser;
mod submission_gateway;

pub use ai_provider::{
    AIError, AIProvider, FinishReason, GenerationRequest, GenerationResponse, ProviderInfo,
    RequestMetadata, TokenUsage,
};
pub use document_renderer::{export_file_name, DocumentRenderer, RenderError};
pub use fallback_queue::{FallbackEntry, FallbackQueue};
pub use notifier::{Notification, Notifier, NotifyError};
pub use report_parser::ReportParser;
pub use submission_gateway::{PersistenceError, SubmissionGateway};
