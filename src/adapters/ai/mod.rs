//! AI provider adapters.
//!
//! - `GeminiProvider` - Google Generative Language API
//! - `MockAIProvider` - Scripted responses for tests and offline runs

mod gemini_provider;
mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
