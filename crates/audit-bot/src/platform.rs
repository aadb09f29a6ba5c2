//! Serenity adapter - platform ports and guild snapshots
//!
//! Converts between serenity's models and the domain view the services work
//! on. Cache reads happen in synchronous functions so that no cache guard is
//! ever held across an await point.

use std::sync::Arc;

use async_trait::async_trait;
use audit_core::traits::{ActionQuery, AuditLogSource, BanLookup, PlatformResult, RecordSender};
use audit_core::{
    AdministrativeActionEntry, AuditAction, AuditRecord, BanDetail, Channel, ChannelKind,
    DomainError, Guild, Member, Permissions, Snowflake, User,
};
use serenity::all::{
    ChannelId, ChannelType, Context, CreateEmbed, CreateEmbedFooter, CreateMessage, GuildChannel,
    GuildId, Http, Timestamp, UserId,
};
use serenity::model::guild::audit_log::{Action, MemberAction};
use tracing::debug;

// ============================================================================
// Conversions
// ============================================================================

pub fn snowflake(id: impl Into<u64>) -> Snowflake {
    Snowflake::new(id.into())
}

pub fn user_from(user: &serenity::all::User) -> User {
    User {
        id: snowflake(user.id),
        name: user.name.clone(),
        global_name: user.global_name.clone(),
        bot: user.bot,
    }
}

pub fn member_from(member: &serenity::all::Member) -> Member {
    Member {
        guild_id: snowflake(member.guild_id),
        user: user_from(&member.user),
        nickname: member.nick.clone(),
    }
}

fn channel_kind(kind: ChannelType) -> ChannelKind {
    match kind {
        ChannelType::Text | ChannelType::News => ChannelKind::Text,
        ChannelType::Voice | ChannelType::Stage => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        _ => ChannelKind::Other,
    }
}

fn action_filter(action: AuditAction) -> Action {
    match action {
        AuditAction::MemberBanAdd => Action::Member(MemberAction::BanAdd),
        AuditAction::MemberBanRemove => Action::Member(MemberAction::BanRemove),
        AuditAction::MemberMove => Action::Member(MemberAction::MemberMove),
        AuditAction::MemberDisconnect => Action::Member(MemberAction::MemberDisconnect),
        AuditAction::Other(code) => Action::Unknown(code),
    }
}

/// Render a record as an embed message
pub fn message_from(record: &AuditRecord) -> CreateMessage {
    CreateMessage::new().embed(embed_from(record))
}

pub fn embed_from(record: &AuditRecord) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&record.title)
        .colour(record.color);

    if let Some(description) = &record.description {
        embed = embed.description(description);
    }
    for field in &record.fields {
        embed = embed.field(&field.label, &field.value, field.inline);
    }
    if let Some(footer) = &record.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(at) = record
        .timestamp
        .and_then(|at| Timestamp::from_unix_timestamp(at.timestamp()).ok())
    {
        embed = embed.timestamp(at);
    }
    embed
}

// ============================================================================
// Guild snapshot
// ============================================================================

/// The bot's own account, from the cache
pub fn bot_user(ctx: &Context) -> User {
    let current = ctx.cache.current_user();
    User {
        id: snowflake(current.id),
        name: current.name.clone(),
        global_name: current.global_name.clone(),
        bot: true,
    }
}

/// Build a read-only view of a cached guild
///
/// Channels are ordered the way the client lists them: by position, then ID.
/// Returns `None` if the guild is not cached.
pub fn guild_snapshot(ctx: &Context, guild_id: GuildId) -> Option<Guild> {
    let bot = bot_user(ctx);
    let bot_id = UserId::new(bot.id.get());

    let guild = ctx.cache.guild(guild_id)?;
    let bot_member = guild.members.get(&bot_id);

    let bot_permissions = bot_member
        .map(|m| Permissions::from_platform_bits(guild.member_permissions(m).bits()))
        .unwrap_or_default();

    let mut channels: Vec<&GuildChannel> = guild.channels.values().collect();
    channels.sort_by_key(|c| (c.position, c.id));

    let channels = channels
        .into_iter()
        .map(|c| {
            let permissions = bot_member
                .map(|m| Permissions::from_platform_bits(guild.user_permissions_in(c, m).bits()))
                .unwrap_or_default();
            Channel {
                id: snowflake(c.id),
                name: c.name.clone(),
                kind: channel_kind(c.kind),
                position: c.position,
                bot_permissions: permissions,
            }
        })
        .collect();

    Some(Guild {
        id: snowflake(guild.id),
        name: guild.name.clone(),
        bot_user: bot,
        bot_permissions,
        channels,
    })
}

/// Look up a cached member of a guild
pub fn cached_member(ctx: &Context, guild_id: GuildId, user_id: UserId) -> Option<Member> {
    let guild = ctx.cache.guild(guild_id)?;
    guild.members.get(&user_id).map(member_from)
}

/// Guild IDs known to the cache
pub fn cached_guilds(ctx: &Context) -> Vec<GuildId> {
    ctx.cache.guilds()
}

// ============================================================================
// Ports
// ============================================================================

/// Platform ports backed by the HTTP API
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuditLogSource for SerenityPlatform {
    async fn recent_actions(
        &self,
        guild_id: Snowflake,
        query: ActionQuery,
    ) -> PlatformResult<Vec<AdministrativeActionEntry>> {
        let logs = GuildId::new(guild_id.get())
            .audit_logs(
                &self.http,
                Some(action_filter(query.action)),
                None,
                None,
                Some(query.limit),
            )
            .await
            .map_err(DomainError::platform)?;

        debug!(%guild_id, action = %query.action, count = logs.entries.len(), "Action log fetched");

        let entries = logs
            .entries
            .iter()
            .map(|entry| {
                let actor = logs.users.get(&entry.user_id).map(user_from);
                let destination = entry
                    .options
                    .as_ref()
                    .and_then(|o| o.channel_id)
                    .map(|c| format!("<#{c}>"));

                let mut domain =
                    AdministrativeActionEntry::new(snowflake(entry.id), query.action, actor)
                        .with_channels(None, destination);
                domain.target_id = entry.target_id.map(snowflake);
                domain.reason = entry.reason.clone();
                domain
            })
            .collect();

        Ok(entries)
    }
}

#[async_trait]
impl BanLookup for SerenityPlatform {
    async fn fetch_ban(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> PlatformResult<Option<BanDetail>> {
        let ban = self
            .http
            .get_ban(GuildId::new(guild_id.get()), UserId::new(user_id.get()))
            .await
            .map_err(DomainError::platform)?;

        Ok(ban.map(|ban| BanDetail {
            user: user_from(&ban.user),
            reason: ban.reason,
        }))
    }
}

#[async_trait]
impl RecordSender for SerenityPlatform {
    async fn send_record(&self, channel_id: Snowflake, record: &AuditRecord) -> PlatformResult<()> {
        ChannelId::new(channel_id.get())
            .send_message(&self.http, message_from(record))
            .await
            .map(|_| ())
            .map_err(|e| DomainError::DeliveryFailure(e.to_string()))
    }
}
