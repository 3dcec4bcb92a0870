//! Completion provider adapters.
//!
//! - `OpenAIProvider` - OpenAI Chat Completions API
//! - `MockCompletionProvider` - Scriptable provider for tests and offline runs

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockCompletionProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider, DEFAULT_BASE_URL};
