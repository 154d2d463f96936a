pub mod config_storage;
pub mod dto;
pub mod in_memory_routing_store;
pub mod json_routing_store;
pub mod message_router;
pub mod paths;
pub mod routing_snapshot;

pub use crate::in_memory_routing_store::InMemoryRoutingDataStore;
pub use crate::json_routing_store::JsonFileRoutingDataStore;
pub use crate::message_router::MessageRouter;
