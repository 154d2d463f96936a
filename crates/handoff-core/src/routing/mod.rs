//! Routing collaborator interfaces.
//!
//! - `repository`: Read (and, for infrastructure, write) access to live connections
//! - `disconnector`: Severs one side of a hand-off

mod disconnector;
mod repository;

pub use disconnector::Disconnector;
pub use repository::{RoutingDataStore, RoutingDataStoreWriter};
