//! PerlaGPT interview sessions
//!
//! Runs a guided PHQ-9 screening interview in which a chat completion model
//! asks the questions and the crate keeps the strictly alternating transcript
//! that every call re-sends.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
