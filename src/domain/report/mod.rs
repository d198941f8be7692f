//! Report module - Generated report model and synthesis prompts.
//!
//! - `document` - Typed blocks and plain-text export
//! - `prompt` - Per-kind system instructions and prompt templates
//! - `errors` - Classification of synthesis failures

mod document;
mod errors;
mod prompt;

pub use document::{DocumentBlock, ParsedDocument};
pub use errors::SynthesisError;
pub use prompt::{interpolate, PromptTemplate, RenderedPrompt, MISSING_VALUE};
