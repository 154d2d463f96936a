//! Error types for the hand-off directory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every hand-off crate.
///
/// The first three variants are the failure kinds of a conversation
/// teardown. The fault isolator absorbs them, so callers of the directory
/// never see them directly.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandoffError {
    /// Fetching connections or requests from the routing data store failed
    #[error("Routing data store unavailable: {0}")]
    StoreUnavailable(String),

    /// No connection involves the given endpoint
    #[error("No connection found for channel '{channel_id}' conversation '{conversation_id}'")]
    NoMatch {
        channel_id: String,
        conversation_id: String,
    },

    /// The disconnector failed for one endpoint
    #[error("Failed to disconnect channel '{channel_id}' conversation '{conversation_id}': {message}")]
    TeardownFailure {
        channel_id: String,
        conversation_id: String,
        message: String,
    },

    /// A connection that violates the two-distinct-endpoints invariant
    #[error("Invalid connection: {0}")]
    InvalidConnection(String),

    /// The endpoint already takes part in a live connection
    #[error("Endpoint already connected: channel '{channel_id}' conversation '{conversation_id}'")]
    AlreadyConnected {
        channel_id: String,
        conversation_id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// An isolated operation panicked
    #[error("Operation panicked: {0}")]
    Panicked(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandoffError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a StoreUnavailable error
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Creates a NoMatch error
    pub fn no_match(channel_id: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        Self::NoMatch {
            channel_id: channel_id.into(),
            conversation_id: conversation_id.into(),
        }
    }

    /// Creates a TeardownFailure error
    pub fn teardown_failure(
        channel_id: impl Into<String>,
        conversation_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::TeardownFailure {
            channel_id: channel_id.into(),
            conversation_id: conversation_id.into(),
            message: message.into(),
        }
    }

    /// Creates an InvalidConnection error
    pub fn invalid_connection(message: impl Into<String>) -> Self {
        Self::InvalidConnection(message.into())
    }

    /// Creates an AlreadyConnected error
    pub fn already_connected(
        channel_id: impl Into<String>,
        conversation_id: impl Into<String>,
    ) -> Self {
        Self::AlreadyConnected {
            channel_id: channel_id.into(),
            conversation_id: conversation_id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a StoreUnavailable error
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Check if this is a NoMatch error
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::NoMatch { .. })
    }

    /// Check if this is a TeardownFailure error
    pub fn is_teardown_failure(&self) -> bool {
        matches!(self, Self::TeardownFailure { .. })
    }

    /// Check if this is a Panicked error
    pub fn is_panicked(&self) -> bool {
        matches!(self, Self::Panicked(_))
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HandoffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HandoffError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HandoffError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for HandoffError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HandoffError>`.
pub type Result<T> = std::result::Result<T, HandoffError>;
