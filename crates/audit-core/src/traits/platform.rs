//! Platform ports - the interface the audit pipeline needs from the chat platform
//!
//! The domain layer defines what it needs, and the adapter crate provides
//! the implementation on top of the platform client library.

use async_trait::async_trait;

use crate::entities::{AdministrativeActionEntry, AuditAction, BanDetail};
use crate::error::DomainError;
use crate::record::AuditRecord;
use crate::value_objects::Snowflake;

/// Result type for platform operations
pub type PlatformResult<T> = Result<T, DomainError>;

// ============================================================================
// Administrative Action Log
// ============================================================================

/// Filter for action log queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionQuery {
    pub action: AuditAction,
    pub limit: u8,
}

impl ActionQuery {
    /// The single most recent entry of one action type
    pub const fn latest(action: AuditAction) -> Self {
        Self { action, limit: 1 }
    }

    pub const fn recent(action: AuditAction, limit: u8) -> Self {
        Self { action, limit }
    }
}

#[async_trait]
pub trait AuditLogSource: Send + Sync {
    /// Query the guild's action log, newest entry first
    async fn recent_actions(
        &self,
        guild_id: Snowflake,
        query: ActionQuery,
    ) -> PlatformResult<Vec<AdministrativeActionEntry>>;
}

// ============================================================================
// Bans
// ============================================================================

#[async_trait]
pub trait BanLookup: Send + Sync {
    /// Get the ban record for a user, if any
    async fn fetch_ban(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> PlatformResult<Option<BanDetail>>;
}

// ============================================================================
// Outbound
// ============================================================================

#[async_trait]
pub trait RecordSender: Send + Sync {
    /// Post a record to a channel
    async fn send_record(&self, channel_id: Snowflake, record: &AuditRecord) -> PlatformResult<()>;
}
