use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use handoff_application::{ConversationManager, RandomFixtureProvider};
use handoff_core::config::{HandoffSettings, StoreKind};
use handoff_core::fault::FaultIsolator;
use handoff_core::routing::{RoutingDataStore, RoutingDataStoreWriter};
use handoff_infrastructure::config_storage::{load_settings, load_settings_from, routing_store_path};
use handoff_infrastructure::{InMemoryRoutingDataStore, JsonFileRoutingDataStore, MessageRouter};

/// Everything a command needs, wired from settings.
pub struct AppContext {
    pub manager: ConversationManager,
    pub router: Arc<MessageRouter>,
    pub store: Arc<dyn RoutingDataStore>,
}

type StorePair = (Arc<dyn RoutingDataStore>, Arc<dyn RoutingDataStoreWriter>);

fn json_store(path: PathBuf) -> StorePair {
    tracing::debug!("[Bootstrap] Using JSON routing store at {:?}", path);
    let store = Arc::new(JsonFileRoutingDataStore::new(path));
    let reader: Arc<dyn RoutingDataStore> = store.clone();
    (reader, store)
}

fn memory_store() -> StorePair {
    tracing::debug!("[Bootstrap] Using in-memory routing store");
    let store = Arc::new(InMemoryRoutingDataStore::new());
    let reader: Arc<dyn RoutingDataStore> = store.clone();
    (reader, store)
}

impl AppContext {
    /// Loads settings (from `config_path` or the default location) and wires the services.
    pub fn load(config_path: Option<&Path>, store_override: Option<PathBuf>) -> Result<Self> {
        let settings = match config_path {
            Some(path) => load_settings_from(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => load_settings().context("Failed to load settings")?,
        };

        Self::from_settings(&settings, store_override)
    }

    pub fn from_settings(settings: &HandoffSettings, store_override: Option<PathBuf>) -> Result<Self> {
        let (reader, writer) = match (store_override, settings.store.kind) {
            (Some(path), _) => json_store(path),
            (None, StoreKind::Json) => json_store(
                routing_store_path(settings).context("Failed to resolve routing store path")?,
            ),
            (None, StoreKind::Memory) => memory_store(),
        };

        let router = Arc::new(MessageRouter::new(writer));
        let fixtures = RandomFixtureProvider::new(settings.fixtures.clone())
            .context("Invalid fixture settings")?;

        let manager = ConversationManager::new(
            FaultIsolator::with_tracing(),
            reader.clone(),
            router.clone(),
            Arc::new(fixtures),
        );

        Ok(Self {
            manager,
            router,
            store: reader,
        })
    }
}
