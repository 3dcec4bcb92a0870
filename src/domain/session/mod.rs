//! Session domain module.
//!
//! Turns, the append-only transcript that owns them, and the two-state status
//! mirrored from the transcript tail.

mod status;
mod transcript;
mod turn;

pub use status::SessionStatus;
pub use transcript::{Exchange, Transcript};
pub use turn::{Role, Turn};
