//! Hand-off settings model.
//!
//! Loading from disk lives in `handoff-infrastructure`; this module only
//! defines the shape and its validation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{HandoffError, Result};

/// Upper bound for `ConversationManager::get_conversations`.
pub const MAX_CONVERSATION_LISTING: u32 = 50;

/// Channels used for generated listings when none are configured.
pub const DEFAULT_FIXTURE_CHANNELS: [&str; 4] =
    ["facebook", "skype", "skype for business", "directline"];

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct HandoffSettings {
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub fixtures: FixtureSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    #[default]
    Json,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSettings {
    #[serde(default)]
    pub kind: StoreKind,
    /// JSON snapshot location. Falls back to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FixtureSettings {
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    #[serde(default = "default_min_messages")]
    pub min_messages: u32,
    /// Exclusive upper bound.
    #[serde(default = "default_max_messages")]
    pub max_messages: u32,
}

fn default_channels() -> Vec<String> {
    DEFAULT_FIXTURE_CHANNELS
        .iter()
        .map(|channel| channel.to_string())
        .collect()
}

fn default_min_messages() -> u32 {
    2
}

fn default_max_messages() -> u32 {
    30
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            min_messages: default_min_messages(),
            max_messages: default_max_messages(),
        }
    }
}

impl HandoffSettings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.fixtures.validate()
    }
}

impl FixtureSettings {
    pub fn validate(&self) -> Result<()> {
        if self.channels.is_empty() {
            return Err(HandoffError::config("fixtures.channels must not be empty"));
        }
        if self.min_messages >= self.max_messages {
            return Err(HandoffError::config(format!(
                "fixtures.min_messages ({}) must be lower than fixtures.max_messages ({})",
                self.min_messages, self.max_messages
            )));
        }
        Ok(())
    }
}
