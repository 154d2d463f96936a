//! Store-backed hand-off router.
//!
//! Joins and severs endpoints by writing to a `RoutingDataStoreWriter`.
//! Transport notification of the affected parties is not done here.

use std::sync::Arc;

use async_trait::async_trait;

use handoff_core::conversation::{Connection, ConversationReference};
use handoff_core::error::Result;
use handoff_core::routing::{Disconnector, RoutingDataStoreWriter};

pub struct MessageRouter {
    store: Arc<dyn RoutingDataStoreWriter>,
}

impl MessageRouter {
    pub fn new(store: Arc<dyn RoutingDataStoreWriter>) -> Self {
        Self { store }
    }

    /// Links two endpoints and clears their pending requests.
    ///
    /// # Errors
    ///
    /// - `InvalidConnection` if both references name the same endpoint
    /// - `AlreadyConnected` if the store already has either endpoint connected
    pub async fn connect(
        &self,
        requestor: ConversationReference,
        acceptor: ConversationReference,
    ) -> Result<Connection> {
        let connection = Connection::new(requestor, acceptor)?;
        self.store.add_connection(connection.clone()).await?;

        for endpoint in connection.endpoints() {
            self.store.remove_connection_requests_from(endpoint).await?;
        }

        let [first, second] = connection.endpoints();
        tracing::info!(
            "[MessageRouter] Connected {}/{} <-> {}/{}",
            first.channel_id,
            first.conversation_id(),
            second.channel_id,
            second.conversation_id()
        );

        Ok(connection)
    }
}

#[async_trait]
impl Disconnector for MessageRouter {
    /// Removes the connection involving `reference` and any request it left pending.
    ///
    /// An endpoint whose connection is already gone (typically the second side
    /// of a pair torn down together) is not an error.
    async fn disconnect(&self, reference: &ConversationReference) -> Result<()> {
        let removed = self.store.remove_connection_involving(reference).await?;
        let dropped_requests = self.store.remove_connection_requests_from(reference).await?;

        match removed {
            Some(connection) => {
                let counterpart = connection
                    .counterpart(reference)
                    .map(|other| format!("{}/{}", other.channel_id, other.conversation_id()))
                    .unwrap_or_default();
                tracing::info!(
                    "[MessageRouter] Disconnected {}/{} from {} ({} pending requests dropped)",
                    reference.channel_id,
                    reference.conversation_id(),
                    counterpart,
                    dropped_requests
                );
            }
            None => {
                tracing::debug!(
                    "[MessageRouter] {}/{} has no live connection",
                    reference.channel_id,
                    reference.conversation_id()
                );
            }
        }

        Ok(())
    }
}
