//! Ports layer.
//!
//! Interfaces the core depends on but does not implement.

mod completion_provider;

pub use completion_provider::{
    AIError, CompletionProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    ProviderInfo, RequestMetadata, TokenUsage,
};
