//! Transcript aggregate.
//!
//! The transcript is the full ordered history of one interview session. It is
//! the only state carried between completion calls and is sent to the model
//! in full on every call.
//!
//! # Aggregate Boundary
//!
//! - Turns are appended only through [`Transcript::append`]
//! - There is no way to edit or remove a turn once appended
//! - The user-input and assistant-output projections are views, never stored

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};

use super::status::SessionStatus;
use super::turn::{Role, Turn};

/// Ordered, append-only sequence of turns.
///
/// # Invariants
///
/// - Exactly one `system` turn, always at index 0
/// - Turns after the first strictly alternate `user`, `assistant`, `user`, ...
/// - `status` always equals `SessionStatus::from_tail(last turn role)`
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    turns: Vec<Turn>,
    status: SessionStatus,
}

/// One rendered exchange: a user input and, if it arrived, the reply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange<'a> {
    pub user: &'a str,
    pub assistant: Option<&'a str>,
}

impl Transcript {
    /// Creates a transcript seeded with the system instructions.
    ///
    /// # Errors
    ///
    /// - `MissingSystemTurn` if the instructions are empty or whitespace only
    pub fn new(system_instructions: impl Into<String>) -> Result<Self, DomainError> {
        let system = Turn::system(system_instructions).map_err(|_| {
            DomainError::new(
                ErrorCode::MissingSystemTurn,
                "Transcript requires non-empty system instructions",
            )
        })?;
        Ok(Self {
            turns: vec![system],
            status: SessionStatus::AwaitingUser,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns all turns in order, system turn first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns including the system turn.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; a transcript holds at least its system turn.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the system turn.
    pub fn system_turn(&self) -> &Turn {
        &self.turns[0]
    }

    /// Returns the most recent turn.
    pub fn last_turn(&self) -> &Turn {
        // Non-empty by construction.
        &self.turns[self.turns.len() - 1]
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Role the next appended turn must have.
    pub fn expected_next_role(&self) -> Role {
        match self.status {
            SessionStatus::AwaitingUser => Role::User,
            SessionStatus::AwaitingResponse => Role::Assistant,
        }
    }

    /// Returns the trailing user turn that has no reply yet.
    pub fn pending_user_turn(&self) -> Option<&Turn> {
        match self.status {
            SessionStatus::AwaitingResponse => Some(self.last_turn()),
            SessionStatus::AwaitingUser => None,
        }
    }

    /// Number of user turns recorded so far.
    pub fn user_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_user()).count()
    }

    /// Total characters across all turns, i.e. what every completion call re-sends.
    pub fn content_chars(&self) -> usize {
        self.turns.iter().map(|t| t.content().chars().count()).sum()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Projections
    // ─────────────────────────────────────────────────────────────────────────

    /// All user inputs, in order.
    pub fn user_inputs(&self) -> Vec<&str> {
        self.contents_of(Role::User)
    }

    /// All assistant outputs, in order.
    pub fn assistant_outputs(&self) -> Vec<&str> {
        self.contents_of(Role::Assistant)
    }

    /// User inputs paired with their replies, in order. A pending input shows
    /// up as the final exchange with no assistant text.
    pub fn exchanges(&self) -> Vec<Exchange<'_>> {
        self.turns[1..]
            .chunks(2)
            .map(|pair| Exchange {
                user: pair[0].content(),
                assistant: pair.get(1).map(Turn::content),
            })
            .collect()
    }

    fn contents_of(&self, role: Role) -> Vec<&str> {
        self.turns
            .iter()
            .filter(|t| t.role() == role)
            .map(Turn::content)
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a turn, enforcing strict user/assistant alternation.
    ///
    /// # Errors
    ///
    /// - `DuplicateSystemTurn` if the turn is a system turn
    /// - `RoleOutOfOrder` if the turn's role is not the expected next role
    pub fn append(&mut self, turn: Turn) -> Result<(), DomainError> {
        if turn.role() == Role::System {
            return Err(DomainError::new(
                ErrorCode::DuplicateSystemTurn,
                "Transcript already has its system turn",
            ));
        }

        let expected = self.expected_next_role();
        if turn.role() != expected {
            return Err(DomainError::new(
                ErrorCode::RoleOutOfOrder,
                format!("Expected a {} turn, got {}", expected, turn.role()),
            )
            .with_detail("expected", expected.as_str())
            .with_detail("actual", turn.role().as_str()));
        }

        let next = SessionStatus::from_tail(turn.role());
        self.status = self.status.transition_to(next).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
        })?;
        self.turns.push(turn);
        Ok(())
    }
}
