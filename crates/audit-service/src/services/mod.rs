//! Audit pipeline services
//!
//! Event router → attribution → formatter → delivery → channel resolver.
//! Services borrow a shared `ServiceContext` and are constructed per call.

pub mod attribution;
pub mod commands;
pub mod context;
pub mod delivery;
pub mod error;
pub mod formatter;
pub mod resolver;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use attribution::{Attribution, AttributionService};
pub use commands::{CommandReply, CommandService, DebugInfo};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use delivery::{DeliveryOutcome, DeliveryService, DropReason};
pub use error::{ServiceError, ServiceResult};
pub use formatter::{ModerationActor, RecordFormatter, VoiceVerb};
pub use resolver::resolve_audit_channel;
pub use router::{EventRouter, GuildAuditStatus};
