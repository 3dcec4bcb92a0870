//! Application layer.
//!
//! The interview session manager and the settings and errors it exposes to
//! callers.

mod errors;
mod interview_session;
mod settings;

pub use errors::{ConfigurationError, SessionError};
pub use interview_session::{InterviewSession, Reply};
pub use settings::{SessionSettings, DEFAULT_MODEL, MAX_TEMPERATURE};
