//! Connection domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::ConversationReference;
use crate::error::{HandoffError, Result};

/// Two conversation endpoints that are currently linked.
///
/// The pair is conceptually unordered: a connection involves an endpoint if
/// either reference matches it. Connections are never edited in place; the
/// hand-off subsystem replaces or removes them.
///
/// Only `Serialize` is derived; persisted connections come back through
/// [`Connection::restore`] so the invariant is re-checked on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    conversation_reference_1: ConversationReference,
    conversation_reference_2: ConversationReference,
    time_since_last_activity: DateTime<Utc>,
}

impl Connection {
    /// Links two endpoints.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConnection` if both references share an identity key.
    pub fn new(
        conversation_reference_1: ConversationReference,
        conversation_reference_2: ConversationReference,
    ) -> Result<Self> {
        Self::restore(conversation_reference_1, conversation_reference_2, Utc::now())
    }

    /// Rebuilds a connection from persisted parts, re-checking the invariant.
    pub fn restore(
        conversation_reference_1: ConversationReference,
        conversation_reference_2: ConversationReference,
        time_since_last_activity: DateTime<Utc>,
    ) -> Result<Self> {
        if conversation_reference_1.same_endpoint(&conversation_reference_2) {
            let (channel_id, conversation_id) = conversation_reference_1.identity_key();
            return Err(HandoffError::invalid_connection(format!(
                "connection references channel '{}' conversation '{}' on both sides",
                channel_id, conversation_id
            )));
        }

        Ok(Self {
            conversation_reference_1,
            conversation_reference_2,
            time_since_last_activity,
        })
    }

    pub fn conversation_reference_1(&self) -> &ConversationReference {
        &self.conversation_reference_1
    }

    pub fn conversation_reference_2(&self) -> &ConversationReference {
        &self.conversation_reference_2
    }

    pub fn time_since_last_activity(&self) -> DateTime<Utc> {
        self.time_since_last_activity
    }

    /// Endpoints in teardown order.
    pub fn endpoints(&self) -> [&ConversationReference; 2] {
        [&self.conversation_reference_1, &self.conversation_reference_2]
    }

    /// True if either endpoint has the given identity key.
    pub fn involves(&self, channel_id: &str, conversation_id: &str) -> bool {
        self.conversation_reference_1.matches(channel_id, conversation_id)
            || self.conversation_reference_2.matches(channel_id, conversation_id)
    }

    /// Returns the endpoint on the other side of `reference`, if it takes part.
    pub fn counterpart(&self, reference: &ConversationReference) -> Option<&ConversationReference> {
        if self.conversation_reference_1.same_endpoint(reference) {
            Some(&self.conversation_reference_2)
        } else if self.conversation_reference_2.same_endpoint(reference) {
            Some(&self.conversation_reference_1)
        } else {
            None
        }
    }
}

/// A pending request to be joined with another party. Read-only for the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub requestor: ConversationReference,
    pub connection_request_time: DateTime<Utc>,
}

impl ConnectionRequest {
    pub fn new(requestor: ConversationReference) -> Self {
        Self {
            requestor,
            connection_request_time: Utc::now(),
        }
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

    #[test]
    fn test_involves_is_symmetric() {
        let conn = connection(("skype", "c1"), ("facebook", "c2"));

        assert!(conn.involves("skype", "c1"));
        assert!(conn.involves("facebook", "c2"));
        assert!(!conn.involves("skype", "c2"));
        assert!(!conn.involves("facebook", "c1"));
    }

    #[test]
    fn test_rejects_self_reference() {
        let err = Connection::new(
            ConversationReference::new("skype", "c1"),
            ConversationReference::new("skype", "c1"),
        )
        .unwrap_err();

        assert!(matches!(err, HandoffError::InvalidConnection(_)));
    }

    #[test]
    fn test_same_conversation_id_on_different_channels_is_allowed() {
        let conn = Connection::new(
            ConversationReference::new("skype", "c1"),
            ConversationReference::new("facebook", "c1"),
        );
        assert!(conn.is_ok());
    }

    #[test]
    fn test_endpoints_keep_teardown_order() {
        let conn = connection(("directline", "c3"), ("skype for business", "c4"));
        let [first, second] = conn.endpoints();

        assert_eq!(first.identity_key(), ("directline", "c3"));
        assert_eq!(second.identity_key(), ("skype for business", "c4"));
    }

    #[test]
    fn test_counterpart() {
        let conn = connection(("skype", "c1"), ("facebook", "c2"));
        let customer = ConversationReference::new("skype", "c1");

        assert_eq!(
            conn.counterpart(&customer).map(|r| r.identity_key()),
            Some(("facebook", "c2"))
        );
        assert!(conn.counterpart(&ConversationReference::new("skype", "zz")).is_none());
    }
}
