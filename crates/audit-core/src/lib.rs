//! # audit-core
//!
//! Domain layer for the voice/moderation audit bot: a read-only view of the
//! guild, the records the bot posts, voice-state transitions, and the port
//! traits the platform adapter implements.
//! This crate has zero dependencies on the chat-platform client library.

pub mod entities;
pub mod error;
pub mod events;
pub mod record;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AdministrativeActionEntry, AuditAction, BanDetail, Channel, ChannelKind, Guild, Member, User,
};
pub use error::DomainError;
pub use events::{GatewayEventType, TransitionKind, VoiceChannelRef, VoiceStateTransition};
pub use record::{AuditRecord, RecordField};
pub use traits::{ActionQuery, AuditLogSource, BanLookup, PlatformResult, RecordSender};
pub use value_objects::{Permissions, Snowflake};
