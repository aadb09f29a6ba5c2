//! Attribution service - works out who moved or disconnected a member
//!
//! Voice-state events do not say who caused them. The guild's administrative
//! action log does, after the fact, so each lookup is a fresh point query for
//! the newest entry of the relevant action. Any failure degrades to
//! `Attribution::Unknown`; attribution never blocks delivery.

use audit_core::traits::ActionQuery;
use audit_core::{AdministrativeActionEntry, AuditAction, DomainError, Guild, Member, User};
use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;

/// Who caused a voice-state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution {
    Actor {
        user: User,
        /// The actor is the bot's own account
        is_system: bool,
    },
    Unknown,
}

impl Attribution {
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Actor { .. })
    }

    #[must_use]
    pub fn actor(&self) -> Option<&User> {
        match self {
            Self::Actor { user, .. } => Some(user),
            Self::Unknown => None,
        }
    }

    fn from_actor(guild: &Guild, user: User) -> Self {
        Self::Actor {
            is_system: guild.is_bot_user(user.id),
            user,
        }
    }
}

/// Attribution service
pub struct AttributionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttributionService<'a> {
    /// Create a new AttributionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Attribute a channel-to-channel move
    ///
    /// Takes the newest `MemberMove` entry with an actor. The entry's target
    /// is not compared with `member`, so a concurrent move of another member
    /// can be credited here.
    #[instrument(skip(self, guild, member), fields(guild_id = %guild.id, user_id = %member.id()))]
    pub async fn attribute_move(
        &self,
        guild: &Guild,
        member: &Member,
        observed_at: DateTime<Utc>,
    ) -> Attribution {
        let Ok(entry) = self.latest(guild, AuditAction::MemberMove).await else {
            return Attribution::Unknown;
        };

        if !entry.may_target(member.id()) {
            debug!(
                entry_id = %entry.id,
                target_id = ?entry.target_id,
                "Newest move entry targets another member, using it anyway"
            );
        }
        let age_ms = entry.age_at(observed_at).num_milliseconds();

        let Some(actor) = entry.actor else {
            warn!(entry_id = %entry.id, "Newest move entry has no actor");
            return Attribution::Unknown;
        };

        debug!(
            actor = %actor.name,
            age_ms,
            before = ?entry.before_channel,
            after = ?entry.after_channel,
            "Move attributed"
        );
        Attribution::from_actor(guild, actor)
    }

    /// Attribute a join (`MemberMove`) or leave (`MemberDisconnect`)
    ///
    /// The newest entry of `action` counts only if it has an actor, targets
    /// `member` (when it names a target), and is no older than the configured
    /// attribution window at `observed_at`.
    #[instrument(skip(self, guild, member), fields(guild_id = %guild.id, user_id = %member.id()))]
    pub async fn attribute_presence_change(
        &self,
        guild: &Guild,
        member: &Member,
        action: AuditAction,
        observed_at: DateTime<Utc>,
    ) -> Attribution {
        let Ok(entry) = self.latest(guild, action).await else {
            return Attribution::Unknown;
        };

        let age = entry.age_at(observed_at);
        if age > self.ctx.attribution_window() {
            debug!(entry_id = %entry.id, age_secs = age.num_seconds(), "Newest entry is outside the window");
            return Attribution::Unknown;
        }
        if !entry.may_target(member.id()) {
            debug!(entry_id = %entry.id, target_id = ?entry.target_id, "Newest entry targets another member");
            return Attribution::Unknown;
        }

        match entry.actor {
            Some(actor) => {
                debug!(actor = %actor.name, "Presence change attributed");
                Attribution::from_actor(guild, actor)
            }
            None => Attribution::Unknown,
        }
    }

    /// Newest entry of one action
    ///
    /// An empty log and a failed query both come back as
    /// `AttributionUnavailable`, already logged.
    async fn latest(
        &self,
        guild: &Guild,
        action: AuditAction,
    ) -> Result<AdministrativeActionEntry, DomainError> {
        let result = self
            .ctx
            .audit_log()
            .recent_actions(guild.id, ActionQuery::latest(action))
            .await
            .map_err(|e| DomainError::AttributionUnavailable(e.to_string()))
            .and_then(|entries| {
                entries.into_iter().next().ok_or_else(|| {
                    DomainError::AttributionUnavailable(format!("no {action} entry in the log"))
                })
            });

        if let Err(e) = &result {
            warn!(%action, code = e.code(), error = %e, "Action log gave no actor");
        }
        result
    }
}
