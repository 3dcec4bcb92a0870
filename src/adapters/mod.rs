//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Completion providers (OpenAI, mock)

pub mod ai;

pub use ai::{MockCompletionProvider, MockError, OpenAIConfig, OpenAIProvider};
