//! Interview session manager.
//!
//! Owns the transcript of one interview and is the only code that talks to
//! the completion provider on its behalf.
//!
//! # Flow
//!
//! `submit` records the user turn, sends the whole transcript to the
//! provider, and records the reply. If the call fails, times out or is
//! cancelled, the user turn stays and no assistant turn is added; the session
//! then waits in `AwaitingResponse` until `retry_last` succeeds.
//!
//! # Concurrency
//!
//! One call at a time per session. A second `submit`/`retry_last` issued
//! while one is in flight fails with `SessionError::Busy` and changes
//! nothing. Read accessors never wait on the provider.
//!
//! The full transcript is re-sent on every call, so request size grows with
//! every turn. There is no windowing; the size is logged per call.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use crate::domain::interview::{InterviewProtocol, ProtocolError};
use crate::domain::session::{SessionStatus, Transcript, Turn};
use crate::ports::{
    AIError, CompletionProvider, CompletionRequest, CompletionResponse, RequestMetadata,
    TokenUsage,
};

use super::errors::{ConfigurationError, SessionError};
use super::settings::SessionSettings;

/// A successful reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Assistant text, as appended to the transcript.
    pub content: String,
    /// Token usage reported by the provider.
    pub usage: TokenUsage,
    /// Transcript length after the reply was appended.
    pub transcript_len: usize,
}

/// One interview session.
pub struct InterviewSession<P>
where
    P: CompletionProvider,
{
    id: SessionId,
    provider: Arc<P>,
    settings: SessionSettings,
    transcript: Mutex<Transcript>,
    in_flight: tokio::sync::Mutex<()>,
    created_at: Timestamp,
}

impl<P> InterviewSession<P>
where
    P: CompletionProvider,
{
    /// Creates a session seeded with the protocol's system turn.
    ///
    /// Validates settings and checks the provider credential before anything
    /// else, so a bad key is reported here and never on a later `submit`.
    ///
    /// # Errors
    ///
    /// - `Configuration(InvalidSettings)` if the settings are invalid
    /// - `Configuration(InvalidCredential)` if the provider rejects the key
    /// - `Configuration(MissingProtocol)` if the instructions are empty
    pub async fn start(
        provider: Arc<P>,
        protocol: &InterviewProtocol,
        settings: SessionSettings,
    ) -> Result<Self, SessionError> {
        settings.validate()?;

        let transcript = Transcript::new(protocol.instructions())
            .map_err(|_| ConfigurationError::MissingProtocol(ProtocolError::Empty))?;

        provider.verify_credentials().await.map_err(|e| {
            tracing::error!(error = %e, provider = %provider.provider_info().name, "Credential check failed");
            ConfigurationError::InvalidCredential(e)
        })?;

        let id = SessionId::new();
        tracing::info!(
            session_id = %id,
            model = %settings.model,
            temperature = settings.temperature,
            provider = %provider.provider_info().name,
            "Interview session started"
        );

        Ok(Self {
            id,
            provider,
            settings,
            transcript: Mutex::new(transcript),
            in_flight: tokio::sync::Mutex::new(()),
            created_at: Timestamp::now(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a user message and asks the provider for the reply.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for empty or whitespace-only text (nothing recorded)
    /// - `Busy` if another call is in flight (nothing recorded)
    /// - `ResponsePending` if an earlier input has no reply yet (nothing recorded)
    /// - `Collaborator` if the provider call failed (input recorded, no reply)
    pub async fn submit(&self, user_text: &str) -> Result<Reply, SessionError> {
        if user_text.trim().is_empty() {
            return Err(SessionError::InvalidInput);
        }

        let _guard = self.in_flight.try_lock().map_err(|_| SessionError::Busy)?;

        let request = {
            let mut transcript = self.lock_transcript();
            if !transcript.status().accepts_user_input() {
                let pending_input = transcript
                    .pending_user_turn()
                    .map(|t| t.content().to_string())
                    .unwrap_or_default();
                return Err(SessionError::ResponsePending { pending_input });
            }
            transcript.append(Turn::user(user_text).map_err(DomainError::from)?)?;
            tracing::debug!(
                session_id = %self.id,
                user_turns = transcript.user_turn_count(),
                "User turn recorded"
            );
            self.build_request(&transcript)
        };

        self.request_reply(request).await
    }

    /// Re-sends the unchanged transcript when the last user turn has no reply.
    ///
    /// # Errors
    ///
    /// - `NothingToRetry` if the transcript does not end in a user turn
    /// - `Busy` if another call is in flight
    /// - `Collaborator` if the provider call failed again
    pub async fn retry_last(&self) -> Result<Reply, SessionError> {
        let _guard = self.in_flight.try_lock().map_err(|_| SessionError::Busy)?;

        let request = {
            let transcript = self.lock_transcript();
            if !transcript.status().awaits_response() {
                return Err(SessionError::NothingToRetry);
            }
            self.build_request(&transcript)
        };

        tracing::info!(session_id = %self.id, "Retrying pending user turn");
        self.request_reply(request).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Wall-clock time since the session started.
    pub fn elapsed(&self) -> chrono::Duration {
        Timestamp::now().duration_since(&self.created_at)
    }

    /// Snapshot of the full transcript.
    pub fn transcript(&self) -> Transcript {
        self.lock_transcript().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.lock_transcript().status()
    }

    /// All user inputs in order, including one still waiting for a reply.
    pub fn user_inputs(&self) -> Vec<String> {
        self.lock_transcript()
            .user_inputs()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// All assistant outputs in order.
    pub fn assistant_outputs(&self) -> Vec<String> {
        self.lock_transcript()
            .assistant_outputs()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// User inputs paired with their replies, for history views.
    pub fn exchanges(&self) -> Vec<(String, Option<String>)> {
        self.lock_transcript()
            .exchanges()
            .into_iter()
            .map(|e| (e.user.to_string(), e.assistant.map(str::to_string)))
            .collect()
    }

    /// The recorded user input that has no reply yet.
    pub fn pending_input(&self) -> Option<String> {
        self.lock_transcript()
            .pending_user_turn()
            .map(|t| t.content().to_string())
    }

    /// True while a `submit` or `retry_last` call is waiting on the provider.
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    // The transcript lock is never held across an await, and every mutation
    // leaves the transcript valid, so a poisoned lock still holds good data.
    fn lock_transcript(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn build_request(&self, transcript: &Transcript) -> CompletionRequest {
        let trace_id = transcript.last_turn().id().to_string();
        let mut request = CompletionRequest::from_turns(
            transcript.turns(),
            self.settings.model.clone(),
            self.settings.temperature,
            RequestMetadata::for_session(self.id, trace_id),
        );
        request.max_tokens = self.settings.max_tokens;

        tracing::debug!(
            session_id = %self.id,
            turns = transcript.len(),
            transcript_chars = transcript.content_chars(),
            estimated_tokens = self.provider.estimate_tokens(&joined_content(transcript)),
            "Sending full transcript to provider"
        );
        request
    }

    async fn call_provider(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, AIError> {
        match self.settings.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.complete(request))
                .await
                .unwrap_or(Err(AIError::Timeout {
                    timeout_secs: limit.as_secs(),
                })),
            None => self.provider.complete(request).await,
        }
    }

    /// Calls the provider and appends the reply. Must be called with the
    /// in-flight guard held and the transcript ending in a user turn.
    async fn request_reply(&self, request: CompletionRequest) -> Result<Reply, SessionError> {
        let started = Instant::now();
        let result = self.call_provider(request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let mut transcript = self.lock_transcript();
        let pending_input = transcript
            .pending_user_turn()
            .map(|t| t.content().to_string())
            .unwrap_or_default();

        let fail = |source: AIError| {
            tracing::warn!(
                session_id = %self.id,
                error = %source,
                kind = source.kind(),
                retryable = source.is_retryable(),
                elapsed_ms,
                "Completion failed; user turn kept without reply"
            );
            SessionError::Collaborator {
                source,
                pending_input: pending_input.clone(),
            }
        };

        let response = result.map_err(&fail)?;
        let turn = Turn::assistant(response.content.as_str())
            .map_err(|_| fail(AIError::parse("Completion has no content")))?;
        transcript.append(turn)?;

        tracing::info!(
            session_id = %self.id,
            turns = transcript.len(),
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            elapsed_ms,
            "Assistant turn recorded"
        );

        Ok(Reply {
            content: response.content,
            usage: response.usage,
            transcript_len: transcript.len(),
        })
    }
}

fn joined_content(transcript: &Transcript) -> String {
    transcript
        .turns()
        .iter()
        .map(Turn::content)
        .collect::<Vec<_>>()
        .join("\n")
}
