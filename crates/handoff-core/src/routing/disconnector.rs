//! Disconnector trait.

use async_trait::async_trait;

use crate::conversation::ConversationReference;
use crate::error::Result;

/// Severs one endpoint of a hand-off.
///
/// Owned by the wider hand-off subsystem; the directory only asks for one
/// endpoint at a time and never assumes the other side went with it.
#[async_trait]
pub trait Disconnector: Send + Sync {
    async fn disconnect(&self, reference: &ConversationReference) -> Result<()>;
}
