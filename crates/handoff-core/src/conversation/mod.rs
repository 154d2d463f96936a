//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `reference`: One endpoint of a conversation (`ConversationReference`)
//! - `connection`: Linked endpoint pairs and pending requests (`Connection`, `ConnectionRequest`)
//!
//! # Usage
//!
//! ```ignore
//! use handoff_core::conversation::{Connection, ConversationReference};
//! ```

mod connection;
mod reference;

// Re-export public API
pub use connection::{Connection, ConnectionRequest};
pub use reference::{ChannelAccount, ConversationAccount, ConversationReference};
