use anyhow::{Context, Result};
use handoff_core::conversation::{Connection, ConnectionRequest};
use handoff_core::routing::RoutingDataStore;
use serde::Serialize;

use super::context::AppContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoutingView {
    connections: Vec<Connection>,
    connection_requests: Vec<ConnectionRequest>,
}

pub async fn run(context: &AppContext) -> Result<()> {
    let view = RoutingView {
        connections: context
            .store
            .get_connections()
            .await
            .context("Failed to read connections")?,
        connection_requests: context
            .store
            .get_connection_requests()
            .await
            .context("Failed to read connection requests")?,
    };

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
