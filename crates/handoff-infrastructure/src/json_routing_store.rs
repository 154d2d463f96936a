//! File-backed routing data store.
//!
//! Stores connections and pending requests as one versioned JSON document.
//!
//! File location: `{data_dir}/handoff/routing.json` unless configured.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use handoff_core::conversation::{Connection, ConnectionRequest, ConversationReference};
use handoff_core::error::{HandoffError, Result};
use handoff_core::routing::{RoutingDataStore, RoutingDataStoreWriter};

use crate::dto::RoutingSnapshotDto;
use crate::routing_snapshot::RoutingSnapshot;

/// JSON file routing data store.
///
/// Reads always go to disk, so several processes see each other's writes.
/// Writers within this process are serialised. Each write lands in a
/// uniquely named temporary sibling that is then renamed over the file, so
/// concurrent processes never share a half-written temporary.
pub struct JsonFileRoutingDataStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRoutingDataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and validates the snapshot. A missing file is an empty store.
    pub async fn load(&self) -> Result<RoutingSnapshot> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(RoutingSnapshot::default());
            }
            Err(e) => {
                return Err(HandoffError::store_unavailable(format!(
                    "Failed to read routing store at {:?}: {}",
                    self.path, e
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(RoutingSnapshot::default());
        }

        let dto: RoutingSnapshotDto = serde_json::from_str(&content)?;
        RoutingSnapshot::try_from(dto)
    }

    async fn persist(&self, snapshot: &RoutingSnapshot) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .await
            .map_err(|e| HandoffError::io(format!("Failed to create directory: {}", e)))?;

        let serialized = serde_json::to_string_pretty(&RoutingSnapshotDto::from(snapshot))?;
        let target = self.path.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut temp_file = tempfile::NamedTempFile::new_in(&parent)
                .map_err(|e| HandoffError::io(format!("Failed to create temporary file: {}", e)))?;
            temp_file
                .write_all(serialized.as_bytes())
                .map_err(|e| HandoffError::io(format!("Failed to write routing store: {}", e)))?;
            temp_file.as_file().sync_all()?;
            temp_file.persist(&target).map_err(|e| {
                HandoffError::io(format!("Failed to replace routing store: {}", e.error))
            })?;
            Ok(())
        })
        .await
        .map_err(|e| HandoffError::internal(format!("Routing store writer task failed: {}", e)))?
    }

    /// Runs `mutate` against the current snapshot and persists the result.
    async fn update<T>(&self, mutate: impl FnOnce(&mut RoutingSnapshot) -> Result<T>) -> Result<T> {
        let _guard = self.write_lock.lock().await;

        let mut snapshot = self.load().await?;
        let value = mutate(&mut snapshot)?;
        self.persist(&snapshot).await?;

        Ok(value)
    }
}

#[async_trait]
impl RoutingDataStore for JsonFileRoutingDataStore {
    async fn get_connections(&self) -> Result<Vec<Connection>> {
        Ok(self.load().await?.connections)
    }

    async fn get_connection_requests(&self) -> Result<Vec<ConnectionRequest>> {
        Ok(self.load().await?.connection_requests)
    }
}

#[async_trait]
impl RoutingDataStoreWriter for JsonFileRoutingDataStore {
    async fn add_connection(&self, connection: Connection) -> Result<()> {
        self.update(|snapshot| snapshot.insert_connection(connection))
            .await
    }

    async fn remove_connection_involving(
        &self,
        reference: &ConversationReference,
    ) -> Result<Option<Connection>> {
        self.update(|snapshot| Ok(snapshot.remove_connection_involving(reference)))
            .await
    }

    async fn add_connection_request(&self, request: ConnectionRequest) -> Result<()> {
        let inserted = self
            .update(|snapshot| Ok(snapshot.insert_request(request)))
            .await?;
        if !inserted {
            tracing::debug!("[JsonFileRoutingDataStore] Requestor already has a pending request");
        }
        Ok(())
    }

    async fn remove_connection_requests_from(
        &self,
        reference: &ConversationReference,
    ) -> Result<usize> {
        self.update(|snapshot| Ok(snapshot.remove_requests_from(reference)))
            .await
    }
}
