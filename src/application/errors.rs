//! Caller-facing error taxonomy for interview sessions.

use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::domain::interview::ProtocolError;
use crate::ports::AIError;

/// Problems that prevent a session from being created.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("interview protocol unavailable: {0}")]
    MissingProtocol(#[from] ProtocolError),

    #[error("API credential rejected: {0}")]
    InvalidCredential(#[source] AIError),

    #[error("invalid session settings: {0}")]
    InvalidSettings(String),
}

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Session could not be created. Fatal.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The completion call failed. The user input is recorded and can be retried.
    #[error("completion failed: {source}")]
    Collaborator {
        #[source]
        source: AIError,
        /// The recorded user input still waiting for a reply.
        pending_input: String,
    },

    /// Empty or whitespace-only input. Nothing was recorded.
    #[error("invalid input: message cannot be empty")]
    InvalidInput,

    /// New input while an earlier input still has no reply. Nothing was recorded.
    #[error("a reply to an earlier message is still outstanding; retry it first")]
    ResponsePending {
        /// The earlier input that is still unanswered.
        pending_input: String,
    },

    /// `retry_last` called while no input is waiting for a reply.
    #[error("nothing to retry: the last message already has a reply")]
    NothingToRetry,

    /// Another call is in flight on this session. Nothing was recorded.
    #[error("another request is already in flight for this session")]
    Busy,

    /// A transcript invariant was violated.
    #[error("transcript error: {0}")]
    Transcript(#[from] DomainError),
}

impl SessionError {
    /// True when the user's input was recorded even though no reply exists.
    ///
    /// Lets the presentation layer say "your message is saved, no reply yet"
    /// instead of "your message was not sent".
    pub fn input_recorded(&self) -> bool {
        matches!(self, SessionError::Collaborator { .. })
    }

    /// The unanswered input, if the session has one.
    pub fn pending_input(&self) -> Option<&str> {
        match self {
            SessionError::Collaborator { pending_input, .. }
            | SessionError::ResponsePending { pending_input } => Some(pending_input),
            _ => None,
        }
    }

    /// The underlying collaborator error, if any.
    pub fn collaborator_error(&self) -> Option<&AIError> {
        match self {
            SessionError::Collaborator { source, .. } => Some(source),
            SessionError::Configuration(ConfigurationError::InvalidCredential(source)) => {
                Some(source)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_collaborator_failures_record_input() {
        let failed = SessionError::Collaborator {
            source: AIError::network("reset"),
            pending_input: "Bien".into(),
        };
        assert!(failed.input_recorded());
        assert_eq!(failed.pending_input(), Some("Bien"));

        let pending = SessionError::ResponsePending {
            pending_input: "Bien".into(),
        };
        assert!(!pending.input_recorded());
        assert_eq!(pending.pending_input(), Some("Bien"));

        assert!(!SessionError::InvalidInput.input_recorded());
        assert!(!SessionError::Busy.input_recorded());
    }

    #[test]
    fn credential_error_exposes_cause() {
        let err: SessionError =
            ConfigurationError::InvalidCredential(AIError::AuthenticationFailed).into();
        assert_eq!(err.collaborator_error(), Some(&AIError::AuthenticationFailed));
        assert_eq!(
            err.to_string(),
            "configuration error: API credential rejected: authentication failed"
        );
    }

    #[test]
    fn protocol_failure_is_configuration_error() {
        let err: SessionError = ConfigurationError::from(ProtocolError::Empty).into();
        assert!(matches!(
            err,
            SessionError::Configuration(ConfigurationError::MissingProtocol(ProtocolError::Empty))
        ));
        assert!(!err.input_recorded());
        assert_eq!(err.collaborator_error(), None);
    }

    #[test]
    fn collaborator_error_displays_cause() {
        let err = SessionError::Collaborator {
            source: AIError::rate_limited(20),
            pending_input: "x".into(),
        };
        assert_eq!(err.to_string(), "completion failed: rate limited: retry after 20s");
    }
}
