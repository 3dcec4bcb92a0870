//! Session status derived from the transcript tail.
//!
//! The transcript shape is the source of truth: a tail of `system` or
//! `assistant` means the session waits for the interviewee, a tail of `user`
//! means a reply is outstanding (in flight or failed and retriable).

use serde::{Deserialize, Serialize};

use super::Role;
use crate::domain::foundation::StateMachine;

/// Two-state view of an interview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Waiting for the next user message.
    #[default]
    AwaitingUser,

    /// The last user message has no assistant reply yet.
    AwaitingResponse,
}

impl SessionStatus {
    /// Derives the status from the role of the last turn.
    pub fn from_tail(role: Role) -> Self {
        match role {
            Role::System | Role::Assistant => Self::AwaitingUser,
            Role::User => Self::AwaitingResponse,
        }
    }

    /// Returns true if a new user message may be submitted.
    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::AwaitingUser)
    }

    /// Returns true if the collaborator may be (re)invoked.
    pub fn awaits_response(&self) -> bool {
        matches!(self, Self::AwaitingResponse)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (AwaitingUser, AwaitingResponse) | (AwaitingResponse, AwaitingUser)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            AwaitingUser => vec![AwaitingResponse],
            AwaitingResponse => vec![AwaitingUser],
        }
    }
}
