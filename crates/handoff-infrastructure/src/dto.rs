//! Persisted representation of the routing data.
//!
//! `Connection` is not `Deserialize`; snapshots are read into DTOs and
//! converted with `TryFrom`, which re-checks the connection invariant and
//! drops connections that reuse an already connected endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use handoff_core::conversation::{Connection, ConnectionRequest, ConversationReference};
use handoff_core::error::{HandoffError, Result};

use crate::routing_snapshot::RoutingSnapshot;

/// Current on-disk schema version.
pub const ROUTING_SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    ROUTING_SNAPSHOT_VERSION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDto {
    pub conversation_reference_1: ConversationReference,
    pub conversation_reference_2: ConversationReference,
    pub time_since_last_activity: DateTime<Utc>,
}

impl From<&Connection> for ConnectionDto {
    fn from(connection: &Connection) -> Self {
        Self {
            conversation_reference_1: connection.conversation_reference_1().clone(),
            conversation_reference_2: connection.conversation_reference_2().clone(),
            time_since_last_activity: connection.time_since_last_activity(),
        }
    }
}

impl TryFrom<ConnectionDto> for Connection {
    type Error = HandoffError;

    fn try_from(dto: ConnectionDto) -> Result<Self> {
        Connection::restore(
            dto.conversation_reference_1,
            dto.conversation_reference_2,
            dto.time_since_last_activity,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingSnapshotDto {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub connections: Vec<ConnectionDto>,
    #[serde(default)]
    pub connection_requests: Vec<ConnectionRequest>,
}

impl From<&RoutingSnapshot> for RoutingSnapshotDto {
    fn from(snapshot: &RoutingSnapshot) -> Self {
        Self {
            version: ROUTING_SNAPSHOT_VERSION,
            connections: snapshot.connections.iter().map(ConnectionDto::from).collect(),
            connection_requests: snapshot.connection_requests.clone(),
        }
    }
}

impl TryFrom<RoutingSnapshotDto> for RoutingSnapshot {
    type Error = HandoffError;

    fn try_from(dto: RoutingSnapshotDto) -> Result<Self> {
        if dto.version > ROUTING_SNAPSHOT_VERSION {
            return Err(HandoffError::Serialization {
                format: "JSON".to_string(),
                message: format!(
                    "routing snapshot version {} is newer than supported version {}",
                    dto.version, ROUTING_SNAPSHOT_VERSION
                ),
            });
        }

        let connections = dto
            .connections
            .into_iter()
            .map(Connection::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(RoutingSnapshot::from_loaded(
            connections,
            dto.connection_requests,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_referencing_connection_is_rejected_on_load() {
        let json = r#"{
            "version": 1,
            "connections": [{
                "conversationReference1": { "channelId": "skype", "conversation": { "id": "c1" } },
                "conversationReference2": { "channelId": "skype", "conversation": { "id": "c1" } },
                "timeSinceLastActivity": "2024-05-01T10:00:00Z"
            }]
        }"#;

        let dto: RoutingSnapshotDto = serde_json::from_str(json).unwrap();
        let err = RoutingSnapshot::try_from(dto).unwrap_err();

        assert!(matches!(err, HandoffError::InvalidConnection(_)));
    }

    #[test]
    fn test_loaded_file_keeps_one_connection_per_endpoint() {
        let json = r#"{
            "version": 1,
            "connections": [
                {
                    "conversationReference1": { "channelId": "skype", "conversation": { "id": "agent" } },
                    "conversationReference2": { "channelId": "directline", "conversation": { "id": "z" } },
                    "timeSinceLastActivity": "2024-05-01T10:00:00Z"
                },
                {
                    "conversationReference1": { "channelId": "skype", "conversation": { "id": "agent" } },
                    "conversationReference2": { "channelId": "facebook", "conversation": { "id": "y" } },
                    "timeSinceLastActivity": "2024-05-01T10:05:00Z"
                }
            ]
        }"#;

        let dto: RoutingSnapshotDto = serde_json::from_str(json).unwrap();
        let snapshot = RoutingSnapshot::try_from(dto).unwrap();

        assert_eq!(snapshot.connections.len(), 1);
        assert!(snapshot.connections[0].involves("directline", "z"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let dto: RoutingSnapshotDto = serde_json::from_str("{}").unwrap();
        assert_eq!(dto.version, ROUTING_SNAPSHOT_VERSION);

        let snapshot = RoutingSnapshot::try_from(dto).unwrap();
        assert!(snapshot.connections.is_empty());
        assert!(snapshot.connection_requests.is_empty());
    }

    #[test]
    fn test_newer_version_is_refused() {
        let dto: RoutingSnapshotDto = serde_json::from_str(r#"{ "version": 2 }"#).unwrap();
        assert!(RoutingSnapshot::try_from(dto).is_err());
    }
}
