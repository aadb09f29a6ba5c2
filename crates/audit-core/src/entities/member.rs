//! Member entity - a user's membership in a guild

use crate::entities::User;
use crate::value_objects::Snowflake;

/// Guild member (junction between User and Guild)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub guild_id: Snowflake,
    pub user: User,
    pub nickname: Option<String>,
}

impl Member {
    /// Create a new Member without a guild nickname
    pub fn new(guild_id: Snowflake, user: User) -> Self {
        Self {
            guild_id,
            user,
            nickname: None,
        }
    }

    /// Get display name (nickname if set, otherwise the user's display name)
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .unwrap_or_else(|| self.user.display_name())
    }

    #[inline]
    pub fn id(&self) -> Snowflake {
        self.user.id
    }
}
