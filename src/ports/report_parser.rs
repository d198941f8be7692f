//! Report Parser Port - Turns raw provider text into a document.

use crate::domain::report::ParsedDocument;

/// Port for structuring free-form report text.
///
/// # Contract
///
/// Implementations must be total and deterministic: every input, including
/// the empty string, yields a document, and the same input always yields the
/// same blocks in line order.
pub trait ReportParser: Send + Sync {
    /// Parse raw report text into blocks.
    fn parse(&self, raw: &str) -> ParsedDocument;
}
