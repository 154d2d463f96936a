use anyhow::Result;
use handoff_application::DeleteOutcome;

use super::context::AppContext;

pub async fn run(context: &AppContext, channel_id: &str, conversation_id: &str) -> Result<()> {
    let outcome = context
        .manager
        .delete_conversation_outcome(channel_id, conversation_id)
        .await;

    match outcome {
        DeleteOutcome::Disconnected { failed_endpoints: 0 } => {
            println!("Disconnected {}/{} and its counterpart", channel_id, conversation_id)
        }
        DeleteOutcome::Disconnected { failed_endpoints } => println!(
            "Disconnect requested for {}/{} ({} endpoint(s) failed, see log)",
            channel_id, conversation_id, failed_endpoints
        ),
        DeleteOutcome::NoMatch => {
            println!("No connection involves {}/{}", channel_id, conversation_id)
        }
        DeleteOutcome::StoreUnavailable => {
            println!("Routing store unavailable, nothing was disconnected (see log)")
        }
    }

    Ok(())
}
