//! Administrative action log entry - a row of the guild's moderation history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::User;
use crate::value_objects::Snowflake;

/// Administrative action types the bot queries for
///
/// Numeric values are the platform's audit-log event codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    MemberBanAdd,
    MemberBanRemove,
    /// A moderator moved a member to another voice channel
    MemberMove,
    /// A moderator disconnected a member from voice
    MemberDisconnect,
    Other(u8),
}

impl AuditAction {
    /// Platform event code
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::MemberBanAdd => 22,
            Self::MemberBanRemove => 23,
            Self::MemberMove => 26,
            Self::MemberDisconnect => 27,
            Self::Other(code) => code,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MemberBanAdd => "MEMBER_BAN_ADD",
            Self::MemberBanRemove => "MEMBER_BAN_REMOVE",
            Self::MemberMove => "MEMBER_MOVE",
            Self::MemberDisconnect => "MEMBER_DISCONNECT",
            Self::Other(_) => "OTHER",
        }
    }
}

impl From<u8> for AuditAction {
    fn from(code: u8) -> Self {
        match code {
            22 => Self::MemberBanAdd,
            23 => Self::MemberBanRemove,
            26 => Self::MemberMove,
            27 => Self::MemberDisconnect,
            other => Self::Other(other),
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative action log entry
///
/// Externally owned; the bot queries these and never stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdministrativeActionEntry {
    pub id: Snowflake,
    pub action: AuditAction,
    /// Who performed the action, when the platform reports it
    pub actor: Option<User>,
    /// Who the action targeted, when the platform reports it
    pub target_id: Option<Snowflake>,
    /// Voice channel name before the action, if recorded
    pub before_channel: Option<String>,
    /// Voice channel name after the action, if recorded
    pub after_channel: Option<String>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AdministrativeActionEntry {
    /// Create an entry whose creation time is derived from its ID
    pub fn new(id: Snowflake, action: AuditAction, actor: Option<User>) -> Self {
        Self {
            id,
            action,
            actor,
            target_id: None,
            before_channel: None,
            after_channel: None,
            reason: None,
            created_at: id.created_at(),
        }
    }

    /// Set the target
    #[must_use]
    pub fn with_target(mut self, target_id: Snowflake) -> Self {
        self.target_id = Some(target_id);
        self
    }

    /// Set the voice channel names on each side of the action
    #[must_use]
    pub fn with_channels(mut self, before: Option<String>, after: Option<String>) -> Self {
        self.before_channel = before;
        self.after_channel = after;
        self
    }

    /// Whether the entry targets `user_id`; entries without a target match anyone
    pub fn may_target(&self, user_id: Snowflake) -> bool {
        self.target_id.is_none_or(|target| target == user_id)
    }

    /// Age of the entry relative to `now`
    pub fn age_at(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.created_at
    }
}
