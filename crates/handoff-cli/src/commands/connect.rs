use anyhow::{Context, Result};
use handoff_core::conversation::ConversationReference;

use super::context::AppContext;

pub async fn run(
    context: &AppContext,
    (channel_a, conversation_a): (&str, &str),
    (channel_b, conversation_b): (&str, &str),
) -> Result<()> {
    let connection = context
        .router
        .connect(
            ConversationReference::new(channel_a, conversation_a),
            ConversationReference::new(channel_b, conversation_b),
        )
        .await
        .context("Failed to connect endpoints")?;

    println!("{}", serde_json::to_string_pretty(&connection)?);
    Ok(())
}
