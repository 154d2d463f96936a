//! Connection directory.
//!
//! Resolves a `(channel_id, conversation_id)` pair to the live connection
//! that involves it and tears down both endpoints. Every collaborator call
//! goes through the `FaultIsolator`, so callers only ever see a normal
//! return; the reporter sees what actually happened.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use handoff_core::HandoffError;
use handoff_core::config::MAX_CONVERSATION_LISTING;
use handoff_core::conversation::{Connection, ConversationReference};
use handoff_core::error::Result;
use handoff_core::fault::FaultIsolator;
use handoff_core::fixture::{ConversationSummary, FixtureProvider};
use handoff_core::routing::{Disconnector, RoutingDataStore};

/// What a delete did. Only exposed for diagnostics and tests; the public
/// `delete_conversation` discards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The connection snapshot could not be fetched; nothing was attempted.
    StoreUnavailable,
    /// No live connection involves the endpoint.
    NoMatch,
    /// Both endpoints of the first matching connection were attempted.
    Disconnected { failed_endpoints: usize },
}

pub struct ConversationManager {
    fault_isolator: FaultIsolator,
    routing_data_store: Arc<dyn RoutingDataStore>,
    disconnector: Arc<dyn Disconnector>,
    fixture_provider: Arc<dyn FixtureProvider>,
    multi_match_count: AtomicU64,
}

impl ConversationManager {
    pub fn new(
        fault_isolator: FaultIsolator,
        routing_data_store: Arc<dyn RoutingDataStore>,
        disconnector: Arc<dyn Disconnector>,
        fixture_provider: Arc<dyn FixtureProvider>,
    ) -> Self {
        Self {
            fault_isolator,
            routing_data_store,
            disconnector,
            fixture_provider,
            multi_match_count: AtomicU64::new(0),
        }
    }

    /// Disconnects both sides of the connection involving the given endpoint.
    ///
    /// Best-effort: an unreachable store, an unknown endpoint and a failed
    /// teardown all return normally.
    pub async fn delete_conversation(&self, channel_id: &str, conversation_id: &str) {
        let Ok(connection) = self.select_connection(channel_id, conversation_id).await else {
            return;
        };

        // Endpoint 1 then endpoint 2; a failure on one never skips the other.
        for endpoint in connection.endpoints() {
            self.fault_isolator
                .execute("disconnect", self.disconnect_endpoint(endpoint))
                .await;
        }
    }

    /// Same as [`delete_conversation`](Self::delete_conversation) but reports
    /// which path was taken.
    ///
    /// Only the first matching connection in store order is torn down. When
    /// more than one matches, the extra ones are left alone, a warning is
    /// logged and [`multi_match_count`](Self::multi_match_count) is bumped.
    pub async fn delete_conversation_outcome(
        &self,
        channel_id: &str,
        conversation_id: &str,
    ) -> DeleteOutcome {
        let connection = match self.select_connection(channel_id, conversation_id).await {
            Ok(connection) => connection,
            Err(outcome) => return outcome,
        };

        let mut failed_endpoints = 0;
        for endpoint in connection.endpoints() {
            if self
                .fault_isolator
                .try_get("disconnect", self.disconnect_endpoint(endpoint))
                .await
                .is_err()
            {
                failed_endpoints += 1;
            }
        }

        tracing::debug!(
            "[ConversationManager] delete {}/{} attempted both endpoints, {} failed",
            channel_id,
            conversation_id,
            failed_endpoints
        );
        DeleteOutcome::Disconnected { failed_endpoints }
    }

    /// Sample listing for UIs, `None` unless `1 <= top <= 50`.
    ///
    /// Pending requests are read through the fault isolator and handed to the
    /// fixture provider; a failed read just means an unseeded listing.
    pub async fn get_conversations(&self, top: u32) -> Option<Vec<ConversationSummary>> {
        if top == 0 || top > MAX_CONVERSATION_LISTING {
            return None;
        }

        let pending = self
            .fault_isolator
            .get(
                "get_connection_requests",
                self.routing_data_store.get_connection_requests(),
            )
            .await
            .unwrap_or_default();

        Some(
            self.fixture_provider
                .sample_conversations(top as usize, &pending),
        )
    }

    /// Number of deletes that found more than one matching connection.
    pub fn multi_match_count(&self) -> u64 {
        self.multi_match_count.load(Ordering::Relaxed)
    }

    /// First connection in store order involving the endpoint, or the
    /// outcome that ends the delete early.
    async fn select_connection(
        &self,
        channel_id: &str,
        conversation_id: &str,
    ) -> std::result::Result<Connection, DeleteOutcome> {
        let connections = self
            .fault_isolator
            .get("get_connections", self.fetch_connections())
            .await
            .ok_or(DeleteOutcome::StoreUnavailable)?;

        let mut matching = connections
            .into_iter()
            .filter(|connection| connection.involves(channel_id, conversation_id));

        let Some(connection) = matching.next() else {
            self.fault_isolator.report(
                "delete_conversation",
                &HandoffError::no_match(channel_id, conversation_id),
            );
            return Err(DeleteOutcome::NoMatch);
        };

        let ignored = matching.count();
        if ignored > 0 {
            self.multi_match_count.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                "[ConversationManager] {} further connections involve {}/{}; only the first is disconnected",
                ignored,
                channel_id,
                conversation_id
            );
        }

        Ok(connection)
    }

    async fn fetch_connections(&self) -> Result<Vec<Connection>> {
        self.routing_data_store
            .get_connections()
            .await
            .map_err(|e| match e {
                HandoffError::StoreUnavailable(_) => e,
                other => HandoffError::store_unavailable(other.to_string()),
            })
    }

    async fn disconnect_endpoint(&self, endpoint: &ConversationReference) -> Result<()> {
        self.disconnector
            .disconnect(endpoint)
            .await
            .map_err(|e| match e {
                HandoffError::TeardownFailure { .. } => e,
                other => HandoffError::teardown_failure(
                    endpoint.channel_id.clone(),
                    endpoint.conversation_id(),
                    other.to_string(),
                ),
            })
    }
}
