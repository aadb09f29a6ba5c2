//! Channel entity - a guild channel as seen by the bot

use serde::{Deserialize, Serialize};

use crate::value_objects::{Permissions, Snowflake};

/// Channel kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Guild text channel
    #[default]
    Text,
    /// Guild voice channel
    Voice,
    /// Guild category for organizing channels
    Category,
    /// Anything else (threads, stages, forums, ...)
    Other,
}

/// Channel entity
///
/// `bot_permissions` holds the bot's effective permissions on this channel,
/// computed by the platform adapter when the guild snapshot is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    pub kind: ChannelKind,
    pub position: u16,
    pub bot_permissions: Permissions,
}

impl Channel {
    /// Create a new text channel
    #[must_use]
    pub fn new_text(id: Snowflake, name: impl Into<String>, bot_permissions: Permissions) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ChannelKind::Text,
            position: 0,
            bot_permissions,
        }
    }

    /// Create a new voice channel
    #[must_use]
    pub fn new_voice(id: Snowflake, name: impl Into<String>, bot_permissions: Permissions) -> Self {
        Self {
            kind: ChannelKind::Voice,
            ..Self::new_text(id, name, bot_permissions)
        }
    }

    /// Set the listing position
    #[must_use]
    pub fn at_position(mut self, position: u16) -> Self {
        self.position = position;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, ChannelKind::Text)
    }

    #[inline]
    #[must_use]
    pub fn is_voice(&self) -> bool {
        matches!(self.kind, ChannelKind::Voice)
    }

    /// Whether the bot may post in this channel
    #[inline]
    #[must_use]
    pub fn bot_can_send(&self) -> bool {
        self.bot_permissions.can_send_messages()
    }

    /// Mention form that the platform renders as a clickable channel
    #[must_use]
    pub fn mention(&self) -> String {
        self.id.channel_mention()
    }
}
