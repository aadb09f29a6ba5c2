//! User entity - a platform account as seen by the bot

use crate::value_objects::Snowflake;

/// User entity (read-only view of a platform account)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    /// Unique account name
    pub name: String,
    /// Optional profile-wide display name
    pub global_name: Option<String>,
    pub bot: bool,
}

impl User {
    /// Create a new human user
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            global_name: None,
            bot: false,
        }
    }

    /// Create a new bot user
    pub fn new_bot(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            bot: true,
            ..Self::new(id, name)
        }
    }

    /// Mention form that the platform renders as a clickable user
    pub fn mention(&self) -> String {
        self.id.user_mention()
    }

    /// Display name: global name if set, otherwise the account name
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.name)
    }

    /// `mention (id)`, the form used in record fields
    pub fn mention_with_id(&self) -> String {
        format!("{} ({})", self.mention(), self.id)
    }

    /// Check if user is a bot account
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.bot
    }
}
