//! Conversation endpoint identity.

use serde::{Deserialize, Serialize};

/// A participant identity on a channel (user or bot).
///
/// The directory never interprets these; they are carried so that the
/// disconnector can address the participants of a severed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl ChannelAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: None,
        }
    }
}

/// The conversation a reference points at, unique within its channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_group: bool,
}

impl ConversationAccount {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            is_group: false,
        }
    }
}

/// Identifies one endpoint of a conversation.
///
/// Two references denote the same endpoint when their identity keys
/// (`channel_id`, `conversation.id`) are equal; participant identities and
/// the service URL do not take part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReference {
    pub channel_id: String,
    pub conversation: ConversationAccount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
}

impl ConversationReference {
    /// Creates a reference with no participant identities attached.
    pub fn new(channel_id: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            conversation: ConversationAccount::new(conversation_id),
            user: None,
            bot: None,
            service_url: None,
        }
    }

    pub fn with_user(mut self, user: ChannelAccount) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_bot(mut self, bot: ChannelAccount) -> Self {
        self.bot = Some(bot);
        self
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation.id
    }

    /// Returns the `(channel_id, conversation_id)` pair used for matching.
    pub fn identity_key(&self) -> (&str, &str) {
        (&self.channel_id, &self.conversation.id)
    }

    pub fn matches(&self, channel_id: &str, conversation_id: &str) -> bool {
        self.channel_id == channel_id && self.conversation.id == conversation_id
    }

    pub fn same_endpoint(&self, other: &ConversationReference) -> bool {
        self.identity_key() == other.identity_key()
    }
}
