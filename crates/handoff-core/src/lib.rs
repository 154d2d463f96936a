//! Domain layer for the conversation hand-off directory.
//!
//! Holds the endpoint and connection models, the collaborator traits the
//! directory consumes, and the fault isolator that keeps collaborator
//! failures away from callers.

pub mod config;
pub mod conversation;
pub mod error;
pub mod fault;
pub mod fixture;
pub mod routing;

// Re-export common error type
pub use error::HandoffError;
