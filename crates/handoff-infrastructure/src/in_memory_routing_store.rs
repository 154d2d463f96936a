//! Process-local routing data store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use handoff_core::conversation::{Connection, ConnectionRequest, ConversationReference};
use handoff_core::error::Result;
use handoff_core::routing::{RoutingDataStore, RoutingDataStoreWriter};

use crate::routing_snapshot::RoutingSnapshot;

/// Routing data held in memory behind a `RwLock`.
///
/// Iteration order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRoutingDataStore {
    snapshot: RwLock<RoutingSnapshot>,
}

impl InMemoryRoutingDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing data.
    ///
    /// The data goes through [`RoutingSnapshot::from_loaded`], so a connection
    /// reusing an endpoint held by an earlier one is dropped.
    pub fn from_snapshot(snapshot: RoutingSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(RoutingSnapshot::from_loaded(
                snapshot.connections,
                snapshot.connection_requests,
            )),
        }
    }

    pub async fn snapshot(&self) -> RoutingSnapshot {
        self.snapshot.read().await.clone()
    }
}

#[async_trait]
impl RoutingDataStore for InMemoryRoutingDataStore {
    async fn get_connections(&self) -> Result<Vec<Connection>> {
        Ok(self.snapshot.read().await.connections.clone())
    }

    async fn get_connection_requests(&self) -> Result<Vec<ConnectionRequest>> {
        Ok(self.snapshot.read().await.connection_requests.clone())
    }
}

#[async_trait]
impl RoutingDataStoreWriter for InMemoryRoutingDataStore {
    async fn add_connection(&self, connection: Connection) -> Result<()> {
        self.snapshot.write().await.insert_connection(connection)
    }

    async fn remove_connection_involving(
        &self,
        reference: &ConversationReference,
    ) -> Result<Option<Connection>> {
        Ok(self
            .snapshot
            .write()
            .await
            .remove_connection_involving(reference))
    }

    async fn add_connection_request(&self, request: ConnectionRequest) -> Result<()> {
        if !self.snapshot.write().await.insert_request(request) {
            tracing::debug!("[InMemoryRoutingDataStore] Requestor already has a pending request");
        }
        Ok(())
    }

    async fn remove_connection_requests_from(
        &self,
        reference: &ConversationReference,
    ) -> Result<usize> {
        Ok(self.snapshot.write().await.remove_requests_from(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection(a: (&str, &str), b: (&str, &str)) -> Connection {
        Connection::new(
            ConversationReference::new(a.0, a.1),
            ConversationReference::new(b.0, b.1),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_connections_keep_insertion_order() {
        let store = InMemoryRoutingDataStore::new();
        store
            .add_connection(connection(("skype", "c1"), ("facebook", "c2")))
            .await
            .unwrap();
        store
            .add_connection(connection(("directline", "c3"), ("skype for business", "c4")))
            .await
            .unwrap();

        let connections = store.get_connections().await.unwrap();
        assert_eq!(connections.len(), 2);
        assert!(connections[0].involves("skype", "c1"));
        assert!(connections[1].involves("directline", "c3"));
    }

    #[tokio::test]
    async fn test_duplicate_endpoint_is_rejected() {
        let store = InMemoryRoutingDataStore::new();
        store
            .add_connection(connection(("skype", "c1"), ("facebook", "c2")))
            .await
            .unwrap();

        let err = store
            .add_connection(connection(("skype", "c1"), ("directline", "c3")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            handoff_core::HandoffError::AlreadyConnected { .. }
        ));
    }

    #[tokio::test]
    async fn test_from_snapshot_drops_duplicate_endpoints() {
        let store = InMemoryRoutingDataStore::from_snapshot(RoutingSnapshot {
            connections: vec![
                connection(("skype", "c1"), ("facebook", "c2")),
                connection(("skype", "c1"), ("directline", "c3")),
            ],
            connection_requests: Vec::new(),
        });

        let connections = store.get_connections().await.unwrap();
        assert_eq!(connections.len(), 1);
        assert!(connections[0].involves("facebook", "c2"));
    }

    #[tokio::test]
    async fn test_requests_round_trip() {
        let store = InMemoryRoutingDataStore::new();
        let requestor = ConversationReference::new("webchat", "w1");

        store
            .add_connection_request(ConnectionRequest::new(requestor.clone()))
            .await
            .unwrap();
        store
            .add_connection_request(ConnectionRequest::new(requestor.clone()))
            .await
            .unwrap();

        assert_eq!(store.get_connection_requests().await.unwrap().len(), 1);
        assert_eq!(
            store.remove_connection_requests_from(&requestor).await.unwrap(),
            1
        );
        assert!(store.snapshot().await.connection_requests.is_empty());
    }
}
