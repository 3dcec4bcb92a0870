//! Completion Provider Port - Interface for the LLM chat completion service.
//!
//! The interview core treats the model as an opaque collaborator: it hands
//! over the whole transcript and gets one reply back, or an error.
//!
//! # Design
//!
//! - Provider-agnostic message format (role + content)
//! - Credential check separate from completion, so a bad key surfaces at
//!   session start rather than on the first answer
//! - Error types for common failure modes (rate limits, auth, context too long)
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl CompletionProvider for EchoProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
//!         Ok(CompletionResponse::stop(last, request.model))
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;
use crate::domain::session::{Role, Turn};

/// Port for chat completion providers.
///
/// Implementations translate between the provider's wire format and these
/// types. They must not mutate or trim the message list they are given.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a single completion for the given conversation.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Check that the configured credential is accepted by the provider.
    ///
    /// Called once before a session is created.
    async fn verify_credentials(&self) -> Result<(), AIError>;

    /// Estimate token count for text.
    fn estimate_tokens(&self, text: &str) -> u32 {
        // ~4 characters per token for GPT-family tokenizers.
        (text.len() / 4).max(1) as u32
    }

    /// Get provider information.
    fn provider_info(&self) -> ProviderInfo;

    /// Complete a single stand-alone prompt sent as one user message.
    async fn complete_prompt(
        &self,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<CompletionResponse, AIError> {
        let request = CompletionRequest::new(model, temperature, RequestMetadata::detached())
            .with_message(Role::User, prompt);
        self.complete(request).await
    }
}

/// Request for a chat completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Full conversation, system turn first.
    pub messages: Vec<Message>,
    /// Model identifier (e.g., "gpt-3.5-turbo").
    pub model: String,
    /// Sampling temperature (0.0 = deterministic).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates an empty request for the given model settings.
    pub fn new(model: impl Into<String>, temperature: f32, metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            model: model.into(),
            temperature,
            max_tokens: None,
            metadata,
        }
    }

    /// Creates a request carrying every turn of a transcript, in order.
    pub fn from_turns<'a>(
        turns: impl IntoIterator<Item = &'a Turn>,
        model: impl Into<String>,
        temperature: f32,
        metadata: RequestMetadata,
    ) -> Self {
        let mut request = Self::new(model, temperature, metadata);
        request.messages = turns.into_iter().map(Message::from).collect();
        request
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: Role, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        Self::new(turn.role(), turn.content())
    }
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Session the request belongs to, if any.
    pub session_id: Option<SessionId>,
    /// Trace ID for correlating logs.
    pub trace_id: String,
}

impl RequestMetadata {
    /// Creates metadata for a request made on behalf of a session.
    pub fn for_session(session_id: SessionId, trace_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id),
            trace_id: trace_id.into(),
        }
    }

    /// Creates metadata for a one-off request outside any session.
    pub fn detached() -> Self {
        Self {
            session_id: None,
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Response from a chat completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Token usage.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    /// Creates a response that finished naturally with no usage data.
    pub fn stop(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::default(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates new token usage.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// Content was filtered for safety.
    ContentFilter,
}

impl FinishReason {
    /// Maps the provider's finish reason string; unknown values count as `Stop`.
    pub fn from_wire(reason: Option<&str>) -> Self {
        match reason {
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai").
    pub name: String,
    /// API endpoint the provider talks to.
    pub endpoint: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Completion provider errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// Rate limited or out of quota.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Transcript exceeds the model's context window.
    #[error("context too long: {message}")]
    ContextTooLong { message: String },

    /// Content was filtered for safety.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key missing, malformed or rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider rejected the request (unknown model, bad parameters).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn context_too_long(message: impl Into<String>) -> Self {
        Self::ContextTooLong {
            message: message.into(),
        }
    }

    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }

    /// Short stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AIError::RateLimited { .. } => "rate_limited",
            AIError::ContextTooLong { .. } => "context_too_long",
            AIError::ContentFiltered { .. } => "content_filtered",
            AIError::Unavailable { .. } => "unavailable",
            AIError::AuthenticationFailed => "authentication_failed",
            AIError::Network(_) => "network",
            AIError::Parse(_) => "parse",
            AIError::InvalidRequest(_) => "invalid_request",
            AIError::Timeout { .. } => "timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Transcript;

    #[test]
    fn request_from_turns_preserves_order_and_roles() {
        let mut transcript = Transcript::new("sys").unwrap();
        transcript.append(Turn::user("Hola").unwrap()).unwrap();
        transcript.append(Turn::assistant("¡Hola!").unwrap()).unwrap();

        let request = CompletionRequest::from_turns(
            transcript.turns(),
            "gpt-3.5-turbo",
            0.0,
            RequestMetadata::detached(),
        );

        let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(request.messages[1].content, "Hola");
        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.temperature, 0.0);
    }

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new("m", 0.7, RequestMetadata::detached())
            .with_message(Role::User, "Hello")
            .with_max_tokens(100);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, 0.7);
    }

    #[test]
    fn session_metadata_carries_ids() {
        let session_id = SessionId::new();
        let meta = RequestMetadata::for_session(session_id, "trace-1");
        assert_eq!(meta.session_id, Some(session_id));
        assert_eq!(meta.trace_id, "trace-1");
        assert!(RequestMetadata::detached().session_id.is_none());
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn finish_reason_maps_wire_values() {
        assert_eq!(FinishReason::from_wire(Some("stop")), FinishReason::Stop);
        assert_eq!(FinishReason::from_wire(Some("length")), FinishReason::Length);
        assert_eq!(
            FinishReason::from_wire(Some("content_filter")),
            FinishReason::ContentFilter
        );
        assert_eq!(FinishReason::from_wire(None), FinishReason::Stop);
    }

    #[test]
    fn ai_error_retryable_classification() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::unavailable("down").is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::context_too_long("too long").is_retryable());
        assert!(!AIError::content_filtered("bad").is_retryable());
        assert!(!AIError::parse("garbled").is_retryable());
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(
            AIError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            AIError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
        assert_eq!(AIError::AuthenticationFailed.kind(), "authentication_failed");
    }
}
