//! # audit-service
//!
//! Application layer: resolves the audit channel, attributes voice moves to
//! moderators, formats audit records, and routes them to a channel.

pub mod services;

pub use services::{
    Attribution, AttributionService, CommandReply, CommandService, DebugInfo, DeliveryOutcome,
    DeliveryService, DropReason, EventRouter, GuildAuditStatus, ModerationActor, RecordFormatter,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, VoiceVerb,
};
