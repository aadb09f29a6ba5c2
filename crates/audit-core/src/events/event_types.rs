//! Gateway event types
//!
//! The dispatch events the bot subscribes to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway event types
///
/// These are the names the platform sends in the `t` field of dispatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventType {
    /// Session established
    Ready,
    /// New message (command surface)
    MessageCreate,
    /// A user was banned from a guild
    GuildBanAdd,
    /// A user was unbanned from a guild
    GuildBanRemove,
    /// A member joined, left, or switched voice channels
    VoiceStateUpdate,
}

impl GatewayEventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::MessageCreate => "MESSAGE_CREATE",
            Self::GuildBanAdd => "GUILD_BAN_ADD",
            Self::GuildBanRemove => "GUILD_BAN_REMOVE",
            Self::VoiceStateUpdate => "VOICE_STATE_UPDATE",
        }
    }

    /// Parse an event type from a string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "READY" => Some(Self::Ready),
            "MESSAGE_CREATE" => Some(Self::MessageCreate),
            "GUILD_BAN_ADD" => Some(Self::GuildBanAdd),
            "GUILD_BAN_REMOVE" => Some(Self::GuildBanRemove),
            "VOICE_STATE_UPDATE" => Some(Self::VoiceStateUpdate),
            _ => None,
        }
    }

    /// Whether this event produces audit records
    #[must_use]
    pub const fn is_audited(self) -> bool {
        matches!(
            self,
            Self::GuildBanAdd | Self::GuildBanRemove | Self::VoiceStateUpdate
        )
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
