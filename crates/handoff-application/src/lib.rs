//! Application layer for the hand-off directory.
//!
//! This crate provides the connection directory use case and the sample
//! listing generator that UIs consume.

pub mod conversation_manager;
pub mod sample_fixtures;

pub use conversation_manager::{ConversationManager, DeleteOutcome};
pub use sample_fixtures::RandomFixtureProvider;
