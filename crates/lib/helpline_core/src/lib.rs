//! # helpline_core
//!
//! Core domain logic for Helpline: the chat transcript, the client-side
//! session state machine, and the completion provider the relay forwards to.
//!
//! The `provider` feature (on by default) enables `completion` and
//! `relay::relay`; without it only the sans-IO types remain.

#[cfg(feature = "provider")]
pub mod completion;
pub mod dashboard;
pub mod failure;
pub mod message;
pub mod relay;
pub mod session;
pub mod transcript;

pub use message::{Message, Role};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
