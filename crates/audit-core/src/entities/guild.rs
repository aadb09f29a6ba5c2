//! Guild entity - a read-only snapshot of a server from the bot's perspective

use crate::entities::{Channel, User};
use crate::value_objects::{Permissions, Snowflake};

/// Guild (server) snapshot
///
/// Channels are kept in the order the platform lists them; fallback delivery
/// depends on that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    /// The bot's own user in this guild
    pub bot_user: User,
    /// The bot's guild-wide permissions
    pub bot_permissions: Permissions,
    pub channels: Vec<Channel>,
}

impl Guild {
    /// Create a new Guild snapshot with no channels
    pub fn new(id: Snowflake, name: impl Into<String>, bot_user: User) -> Self {
        Self {
            id,
            name: name.into(),
            bot_user,
            bot_permissions: Permissions::empty(),
            channels: Vec::new(),
        }
    }

    /// Append a channel at the end of the listing
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Set the bot's guild-wide permissions
    #[must_use]
    pub fn with_bot_permissions(mut self, permissions: Permissions) -> Self {
        self.bot_permissions = permissions;
        self
    }

    /// Text channels in listed order
    pub fn text_channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(|c| c.is_text())
    }

    /// Find a channel by ID
    pub fn channel(&self, id: Snowflake) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    /// Check if a user is the bot itself
    #[inline]
    pub fn is_bot_user(&self, user_id: Snowflake) -> bool {
        self.bot_user.id == user_id
    }
}
