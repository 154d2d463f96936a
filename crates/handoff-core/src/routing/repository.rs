//! Routing data store traits.

use async_trait::async_trait;

use crate::conversation::{Connection, ConnectionRequest, ConversationReference};
use crate::error::Result;

/// The authoritative collection of live connections and pending requests.
///
/// Implementations synchronise internally. Every call returns a snapshot;
/// the directory never writes through this trait.
#[async_trait]
pub trait RoutingDataStore: Send + Sync {
    /// Lists all live connections in store iteration order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Connection>)`: All live connections (possibly empty)
    /// - `Err(_)`: The store could not be read
    async fn get_connections(&self) -> Result<Vec<Connection>>;

    /// Lists all pending connection requests.
    async fn get_connection_requests(&self) -> Result<Vec<ConnectionRequest>>;
}

/// Write access used by the hand-off subsystem (joining and severing).
#[async_trait]
pub trait RoutingDataStoreWriter: RoutingDataStore {
    /// Stores a new connection.
    ///
    /// # Errors
    ///
    /// Implementations may reject a connection whose endpoints are already
    /// connected (`AlreadyConnected`).
    async fn add_connection(&self, connection: Connection) -> Result<()>;

    /// Removes the first connection involving `reference`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Connection))`: The removed connection
    /// - `Ok(None)`: No connection involved the endpoint
    async fn remove_connection_involving(
        &self,
        reference: &ConversationReference,
    ) -> Result<Option<Connection>>;

    async fn add_connection_request(&self, request: ConnectionRequest) -> Result<()>;

    /// Removes every pending request made by `reference`, returning how many were dropped.
    async fn remove_connection_requests_from(
        &self,
        reference: &ConversationReference,
    ) -> Result<usize>;
}
