//! Delivery service - routes a record to exactly one channel
//!
//! Order of preference:
//! 1. the audit channel, when it exists and the bot can post there
//! 2. the first text channel (listed order) the bot can post in, with a
//!    visible fallback annotation on the record
//! 3. nowhere: the record is dropped and an error is logged
//!
//! A failed send is never retried and never redirected to another channel.

use audit_core::{AuditRecord, Channel, DomainError, Guild, Snowflake};
use tracing::{error, info, instrument, warn};

use super::context::ServiceContext;
use super::resolver::resolve_audit_channel;

/// Why a record was not delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// Neither the audit channel nor any text channel accepts messages from the bot
    NoAvailableChannel,
    /// The single send attempt failed
    SendFailed(DomainError),
}

/// Result of one delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Posted to the audit channel
    Sent(Snowflake),
    /// Posted to a fallback text channel with the fallback annotation
    SentFallback(Snowflake),
    Dropped(DropReason),
}

impl DeliveryOutcome {
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_) | Self::SentFallback(_))
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::SentFallback(_))
    }

    /// Channel the record landed in, if any
    #[must_use]
    pub fn channel_id(&self) -> Option<Snowflake> {
        match self {
            Self::Sent(id) | Self::SentFallback(id) => Some(*id),
            Self::Dropped(_) => None,
        }
    }
}

/// Delivery service
pub struct DeliveryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DeliveryService<'a> {
    /// Create a new DeliveryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Deliver a record to the guild's audit channel, or to a fallback channel
    #[instrument(skip(self, guild, record), fields(guild_id = %guild.id, title = %record.title))]
    pub async fn deliver(&self, guild: &Guild, mut record: AuditRecord) -> DeliveryOutcome {
        match self.audit_channel(guild) {
            Ok(channel) => return self.send(channel, &record, false).await,
            Err(e) if e.triggers_fallback() => {
                warn!(code = e.code(), "{e}, trying fallback channel");
            }
            Err(e) => {
                error!(code = e.code(), error = %e, "Audit channel unusable");
                return DeliveryOutcome::Dropped(DropReason::SendFailed(e));
            }
        }

        let Some(fallback) = guild.text_channels().find(|c| c.bot_can_send()) else {
            error!("No channel available for audit records");
            return DeliveryOutcome::Dropped(DropReason::NoAvailableChannel);
        };

        record.annotate_fallback();
        self.send(fallback, &record, true).await
    }

    /// The configured audit channel, if the bot can post there
    fn audit_channel<'g>(&self, guild: &'g Guild) -> Result<&'g Channel, DomainError> {
        let name = self.ctx.audit_channel_name();
        match resolve_audit_channel(guild, name) {
            Some(channel) if channel.bot_can_send() => Ok(channel),
            Some(channel) => Err(DomainError::PermissionDenied {
                id: channel.id,
                name: channel.name.clone(),
            }),
            None => Err(DomainError::ChannelNotFound(name.to_string())),
        }
    }

    async fn send(&self, channel: &Channel, record: &AuditRecord, fallback: bool) -> DeliveryOutcome {
        match self.ctx.sender().send_record(channel.id, record).await {
            Ok(()) if fallback => {
                info!(channel = %channel.name, channel_id = %channel.id, "Audit record sent to fallback channel");
                DeliveryOutcome::SentFallback(channel.id)
            }
            Ok(()) => {
                info!(channel = %channel.name, channel_id = %channel.id, "Audit record sent");
                DeliveryOutcome::Sent(channel.id)
            }
            Err(e) => {
                error!(channel = %channel.name, channel_id = %channel.id, error = %e, "Failed to send audit record");
                DeliveryOutcome::Dropped(DropReason::SendFailed(e))
            }
        }
    }
}
