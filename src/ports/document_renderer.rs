//! Document Renderer Port - Export of a report to a binary format.

use thiserror::Error;

use crate::domain::intake::IntakeKind;
use crate::domain::report::ParsedDocument;

/// Port for rendering a parsed report (e.g., to PDF).
///
/// Renderers only read the document through its iteration API.
pub trait DocumentRenderer: Send + Sync {
    /// Render the document to bytes.
    fn render(&self, document: &ParsedDocument) -> Result<Vec<u8>, RenderError>;

    /// File extension of the rendered output, without the dot.
    fn extension(&self) -> &'static str {
        "pdf"
    }

    /// Download file name for a report of `kind` about `company`.
    fn file_name(&self, kind: IntakeKind, company: Option<&str>) -> String {
        export_file_name(kind, company, self.extension())
    }
}

/// Builds download names such as `Relatorio_SWOT_Construtora_XYZ.pdf`.
///
/// Runs of whitespace in the company name become a single underscore.
pub fn export_file_name(kind: IntakeKind, company: Option<&str>, extension: &str) -> String {
    let prefix = match kind {
        IntakeKind::BusinessBriefing => "Diagnostico_MDSolution",
        IntakeKind::SwotAnalysis => "Relatorio_SWOT",
    };
    let company = company
        .map(|c| c.split_whitespace().collect::<Vec<_>>().join("_"))
        .filter(|c| !c.is_empty());

    match company {
        Some(c) => format!("{}_{}.{}", prefix, c, extension),
        None => format!("{}.{}", prefix, extension),
    }
}

/// Errors raised by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("renderer failed: {0}")]
    Failed(String),

    #[error("document is empty")]
    EmptyDocument,
}
