//! Interview domain module.
//!
//! The fixed PHQ-9 script handed to the model as its system instruction.

mod protocol;
mod questions;
mod severity;

pub use protocol::{InterviewProtocol, ProtocolError};
pub use questions::{PHQ9_QUESTIONS, QUESTION_COUNT, RECALL_WINDOW};
pub use severity::SeverityLevel;
