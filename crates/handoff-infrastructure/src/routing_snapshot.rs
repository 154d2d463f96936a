//! In-memory routing collections shared by the store implementations.

use handoff_core::conversation::{Connection, ConnectionRequest, ConversationReference};
use handoff_core::error::{HandoffError, Result};

/// Validated routing data, in store iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingSnapshot {
    pub connections: Vec<Connection>,
    pub connection_requests: Vec<ConnectionRequest>,
}

impl RoutingSnapshot {
    /// Builds a snapshot from data read elsewhere, applying the insert rules.
    ///
    /// A connection reusing an endpoint that an earlier one already holds is
    /// dropped, as is a repeated request from the same requestor. The first
    /// occurrence wins.
    pub fn from_loaded(
        connections: Vec<Connection>,
        connection_requests: Vec<ConnectionRequest>,
    ) -> Self {
        let mut snapshot = Self::default();

        for connection in connections {
            if let Err(error) = snapshot.insert_connection(connection) {
                tracing::warn!("[RoutingSnapshot] Dropping loaded connection: {}", error);
            }
        }

        let mut dropped_requests = 0;
        for request in connection_requests {
            if !snapshot.insert_request(request) {
                dropped_requests += 1;
            }
        }
        if dropped_requests > 0 {
            tracing::warn!(
                "[RoutingSnapshot] Dropped {} repeated connection requests",
                dropped_requests
            );
        }

        snapshot
    }

    /// Appends `connection` unless one of its endpoints is already connected.
    pub fn insert_connection(&mut self, connection: Connection) -> Result<()> {
        for endpoint in connection.endpoints() {
            let (channel_id, conversation_id) = endpoint.identity_key();
            if self
                .connections
                .iter()
                .any(|existing| existing.involves(channel_id, conversation_id))
            {
                return Err(HandoffError::already_connected(channel_id, conversation_id));
            }
        }

        self.connections.push(connection);
        Ok(())
    }

    /// Removes the first connection involving `reference`, keeping the order of the rest.
    pub fn remove_connection_involving(
        &mut self,
        reference: &ConversationReference,
    ) -> Option<Connection> {
        let (channel_id, conversation_id) = reference.identity_key();
        let position = self
            .connections
            .iter()
            .position(|connection| connection.involves(channel_id, conversation_id))?;

        Some(self.connections.remove(position))
    }

    /// Appends a request unless the requestor already has one pending.
    pub fn insert_request(&mut self, request: ConnectionRequest) -> bool {
        if self
            .connection_requests
            .iter()
            .any(|pending| pending.requestor.same_endpoint(&request.requestor))
        {
            return false;
        }

        self.connection_requests.push(request);
        true
    }

    pub fn remove_requests_from(&mut self, reference: &ConversationReference) -> usize {
        let before = self.connection_requests.len();
        self.connection_requests
            .retain(|pending| !pending.requestor.same_endpoint(reference));
        before - self.connection_requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(channel_id: &str, conversation_id: &str) -> ConversationReference {
        ConversationReference::new(channel_id, conversation_id)
    }

    fn connection(a: (&str, &str), b: (&str, &str)) -> Connection {
        Connection::new(reference(a.0, a.1), reference(b.0, b.1)).unwrap()
    }

    #[test]
    fn test_insert_rejects_already_connected_endpoint() {
        let mut snapshot = RoutingSnapshot::default();
        snapshot
            .insert_connection(connection(("skype", "c1"), ("facebook", "c2")))
            .unwrap();

        let err = snapshot
            .insert_connection(connection(("directline", "c3"), ("facebook", "c2")))
            .unwrap_err();

        assert_eq!(err, HandoffError::already_connected("facebook", "c2"));
        assert_eq!(snapshot.connections.len(), 1);
    }

    #[test]
    fn test_remove_connection_from_either_side() {
        let mut snapshot = RoutingSnapshot::default();
        snapshot
            .insert_connection(connection(("skype", "c1"), ("facebook", "c2")))
            .unwrap();
        snapshot
            .insert_connection(connection(("directline", "c3"), ("skype for business", "c4")))
            .unwrap();

        let removed = snapshot
            .remove_connection_involving(&reference("skype for business", "c4"))
            .unwrap();

        assert!(removed.involves("directline", "c3"));
        assert_eq!(snapshot.connections.len(), 1);
        assert!(snapshot.connections[0].involves("skype", "c1"));
        assert!(
            snapshot
                .remove_connection_involving(&reference("skype for business", "c4"))
                .is_none()
        );
    }

    #[test]
    fn test_from_loaded_keeps_first_connection_per_endpoint() {
        let snapshot = RoutingSnapshot::from_loaded(
            vec![
                connection(("skype", "agent"), ("directline", "z")),
                connection(("skype", "agent"), ("facebook", "y")),
                connection(("webchat", "w1"), ("teams", "t1")),
            ],
            vec![
                ConnectionRequest::new(reference("skype", "c9")),
                ConnectionRequest::new(reference("skype", "c9")),
            ],
        );

        assert_eq!(snapshot.connections.len(), 2);
        assert!(snapshot.connections[0].involves("directline", "z"));
        assert!(snapshot.connections[1].involves("webchat", "w1"));
        assert!(
            !snapshot
                .connections
                .iter()
                .any(|connection| connection.involves("facebook", "y"))
        );
        assert_eq!(snapshot.connection_requests.len(), 1);
    }

    #[test]
    fn test_requests_are_unique_per_requestor() {
        let mut snapshot = RoutingSnapshot::default();

        assert!(snapshot.insert_request(ConnectionRequest::new(reference("skype", "c1"))));
        assert!(!snapshot.insert_request(ConnectionRequest::new(reference("skype", "c1"))));
        assert!(snapshot.insert_request(ConnectionRequest::new(reference("skype", "c2"))));

        assert_eq!(snapshot.remove_requests_from(&reference("skype", "c1")), 1);
        assert_eq!(snapshot.remove_requests_from(&reference("skype", "c1")), 0);
        assert_eq!(snapshot.connection_requests.len(), 1);
    }
}
