use anyhow::{Result, bail};
use handoff_core::config::MAX_CONVERSATION_LISTING;

use super::context::AppContext;

pub async fn run(context: &AppContext, top: u32) -> Result<()> {
    let Some(conversations) = context.manager.get_conversations(top).await else {
        bail!("--top must be between 1 and {}", MAX_CONVERSATION_LISTING);
    };

    println!("{}", serde_json::to_string_pretty(&conversations)?);
    Ok(())
}
