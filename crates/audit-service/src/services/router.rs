//! Event router - turns gateway events into delivered audit records
//!
//! Every handler catches its own failures: the outcome of each delivery is
//! returned and logged, and nothing propagates to the gateway loop.

use audit_core::{AuditAction, Guild, Snowflake, TransitionKind, User, VoiceStateTransition};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use super::attribution::{Attribution, AttributionService};
use super::context::ServiceContext;
use super::delivery::{DeliveryOutcome, DeliveryService};
use super::formatter::{ModerationActor, RecordFormatter, VoiceVerb};
use super::resolver::resolve_audit_channel;

/// Reason shown when the ban record has no reason or cannot be fetched
pub const UNSPECIFIED_REASON: &str = "reason unspecified";
/// Reason shown on unban records
pub const UNBAN_REASON: &str = "unban detected";
/// Moderator field of ban and unban records
pub const UNKNOWN_MODERATOR: &str =
    "Unknown: the platform does not report the banning actor for this event";

/// Audit channel presence in one guild, as checked at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildAuditStatus {
    pub guild_id: Snowflake,
    pub guild_name: String,
    pub audit_channel: Option<Snowflake>,
}

/// Event router
pub struct EventRouter<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventRouter<'a> {
    /// Create a new EventRouter
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Check each guild for the audit channel and log the result
    #[instrument(skip(self, guilds), fields(guild_count = guilds.len()))]
    pub fn on_ready(&self, guilds: &[Guild]) -> Vec<GuildAuditStatus> {
        let name = self.ctx.audit_channel_name();
        guilds
            .iter()
            .map(|guild| {
                let audit_channel = resolve_audit_channel(guild, name).map(|c| c.id);
                match audit_channel {
                    Some(channel_id) => {
                        info!(guild = %guild.name, guild_id = %guild.id, %channel_id, "Audit channel found");
                    }
                    None => {
                        warn!(guild = %guild.name, guild_id = %guild.id, channel = name, "Audit channel not found");
                    }
                }
                GuildAuditStatus {
                    guild_id: guild.id,
                    guild_name: guild.name.clone(),
                    audit_channel,
                }
            })
            .collect()
    }

    // ========================================================================
    // Moderation
    // ========================================================================

    /// A user was banned
    #[instrument(skip(self, guild, user), fields(guild_id = %guild.id, user_id = %user.id))]
    pub async fn on_ban(&self, guild: &Guild, user: &User) -> DeliveryOutcome {
        let reason = match self.ctx.bans().fetch_ban(guild.id, user.id).await {
            Ok(Some(ban)) => ban
                .reason()
                .map_or_else(|| UNSPECIFIED_REASON.to_string(), str::to_string),
            Ok(None) => {
                debug!("Ban record not found");
                UNSPECIFIED_REASON.to_string()
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "Ban lookup failed");
                UNSPECIFIED_REASON.to_string()
            }
        };

        let record = RecordFormatter::format_moderation_record(
            guild.id,
            "Member Banned",
            &ModerationActor::Unknown(UNKNOWN_MODERATOR.to_string()),
            user,
            Some(&reason),
            &[],
            Utc::now(),
        );

        let outcome = DeliveryService::new(self.ctx).deliver(guild, record).await;
        info!(user = %user.name, delivered = outcome.is_sent(), "Ban processed");
        outcome
    }

    /// A user was unbanned
    #[instrument(skip(self, guild, user), fields(guild_id = %guild.id, user_id = %user.id))]
    pub async fn on_unban(&self, guild: &Guild, user: &User) -> DeliveryOutcome {
        let record = RecordFormatter::format_moderation_record(
            guild.id,
            "Member Unbanned",
            &ModerationActor::Unknown(UNKNOWN_MODERATOR.to_string()),
            user,
            Some(UNBAN_REASON),
            &[],
            Utc::now(),
        );

        let outcome = DeliveryService::new(self.ctx).deliver(guild, record).await;
        info!(user = %user.name, delivered = outcome.is_sent(), "Unban processed");
        outcome
    }

    // ========================================================================
    // Voice
    // ========================================================================

    /// A member's voice state changed
    ///
    /// Returns one outcome per emitted record, in emission order: none when
    /// the channel did not change, one for a join or leave, two for a move.
    #[instrument(
        skip(self, guild, transition),
        fields(guild_id = %guild.id, user_id = %transition.member.id())
    )]
    pub async fn on_voice_state_change(
        &self,
        guild: &Guild,
        transition: &VoiceStateTransition,
    ) -> Vec<DeliveryOutcome> {
        let member = &transition.member;
        let observed_at = transition.observed_at;
        let attribution = AttributionService::new(self.ctx);
        let delivery = DeliveryService::new(self.ctx);

        match transition.kind() {
            TransitionKind::Unchanged => {
                debug!("Voice state update without channel change");
                Vec::new()
            }
            TransitionKind::Joined(after) => {
                let actor = attribution
                    .attribute_presence_change(guild, member, AuditAction::MemberMove, observed_at)
                    .await;
                let verb = if actor.is_known() {
                    VoiceVerb::MovedTo
                } else {
                    VoiceVerb::Joined
                };
                let record =
                    RecordFormatter::format_voice_record(member, verb, &after.name, &actor, observed_at);
                info!(channel = %after.name, "Member joined voice channel");
                vec![delivery.deliver(guild, record).await]
            }
            TransitionKind::Left(before) => {
                let actor = attribution
                    .attribute_presence_change(
                        guild,
                        member,
                        AuditAction::MemberDisconnect,
                        observed_at,
                    )
                    .await;
                let verb = if actor.is_known() {
                    VoiceVerb::RemovedFrom
                } else {
                    VoiceVerb::Left
                };
                let record =
                    RecordFormatter::format_voice_record(member, verb, &before.name, &actor, observed_at);
                info!(channel = %before.name, "Member left voice channel");
                vec![delivery.deliver(guild, record).await]
            }
            TransitionKind::Moved { from, to } => {
                let actor: Attribution = attribution.attribute_move(guild, member, observed_at).await;

                let left = RecordFormatter::format_voice_record(
                    member,
                    VoiceVerb::Left,
                    &from.name,
                    &actor,
                    observed_at,
                );
                let entered = RecordFormatter::format_voice_record(
                    member,
                    VoiceVerb::Entered,
                    &to.name,
                    &actor,
                    observed_at,
                );

                let first = delivery.deliver(guild, left).await;
                let second = delivery.deliver(guild, entered).await;
                info!(from = %from.name, to = %to.name, "Member switched voice channels");
                vec![first, second]
            }
        }
    }
}
