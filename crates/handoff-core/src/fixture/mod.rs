//! Mock conversation listings for UI mock-ups.
//!
//! Kept behind `FixtureProvider` so the sample generator can be swapped or
//! removed without touching the connection directory.

mod model;

pub use model::{ConversationInformation, ConversationSummary, UserInformation};

use crate::conversation::ConnectionRequest;

/// Supplies sample conversation listings.
pub trait FixtureProvider: Send + Sync {
    /// Returns exactly `top` summaries. `pending` holds the store's pending
    /// requests, which a provider may use to seed the listing.
    fn sample_conversations(
        &self,
        top: usize,
        pending: &[ConnectionRequest],
    ) -> Vec<ConversationSummary>;
}
