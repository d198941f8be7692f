//! Document adapters - Structuring of generated report text.

mod line_parser;

pub use line_parser::{parse, LineReportParser};
