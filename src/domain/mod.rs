//! Domain layer.
//!
//! Pure types with no I/O: shared primitives, the interview protocol, and the
//! transcript that records one session.

pub mod foundation;
pub mod interview;
pub mod session;
