//! Listing models returned to UIs.

use serde::{Deserialize, Serialize};

use crate::conversation::ConversationReference;

/// Per-conversation counters shown next to a listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationInformation {
    pub messages_count: u32,
}

/// Sample customer profile attached to a listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInformation {
    pub name: String,
    #[serde(rename = "isvip")]
    pub is_vip: bool,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub conversation_information: ConversationInformation,
    pub conversation_reference: ConversationReference,
    pub user_information: UserInformation,
}
