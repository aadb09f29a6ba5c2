//! Gateway event handler
//!
//! Translates serenity events into snapshots and transitions, then hands them
//! to the audit services. No handler returns an error: failures end up in
//! the operator log or, for commands, in a short reply to the invoker.

use std::sync::Arc;

use audit_core::{GatewayEventType, VoiceChannelRef, VoiceStateTransition};
use audit_service::{CommandReply, CommandService, DebugInfo, EventRouter, ServiceContext};
use chrono::Utc;
use serenity::{
    all::{
        ChannelId, Context, EventHandler, GatewayIntents, GuildId, Message, Ready, User,
        VoiceState,
    },
    async_trait,
};
use tracing::{debug, info, warn};

use crate::commands::Command;
use crate::platform::{
    bot_user, cached_guilds, cached_member, guild_snapshot, member_from, message_from, snowflake,
    user_from,
};

/// Handler for gateway events
pub struct AuditHandler {
    services: Arc<ServiceContext>,
    prefix: String,
}

impl AuditHandler {
    pub fn new(services: Arc<ServiceContext>, prefix: impl Into<String>) -> Self {
        Self {
            services,
            prefix: prefix.into(),
        }
    }

    /// Required gateway intents for the bot
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_VOICE_STATES
            | GatewayIntents::GUILD_MODERATION
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    fn channel_ref(guild: &audit_core::Guild, id: ChannelId) -> VoiceChannelRef {
        let id = snowflake(id);
        let name = guild
            .channel(id)
            .map_or_else(|| id.channel_mention(), |c| c.name.clone());
        VoiceChannelRef::new(id, name)
    }

    async fn run_command(&self, ctx: &Context, msg: &Message, command: Command) -> CommandReply {
        let service = CommandService::new(&self.services);
        let guild = msg.guild_id.and_then(|id| guild_snapshot(ctx, id));

        match (command, guild) {
            (Command::Ping, _) => service.ping(),
            (Command::TestMove, _) => service.testmove(),
            (Command::Permissions, _) => service.permissions_guide(),
            (_, None) => CommandReply::Text("❌ This command only works in a server.".to_string()),
            (Command::Config, Some(guild)) => service.config(&guild),
            (Command::Perms, Some(guild)) => service.perms(&guild),
            (Command::Test, Some(guild)) => {
                service.status(&guild, &user_from(&msg.author), Utc::now())
            }
            (Command::Debug, Some(guild)) => {
                let channel = guild
                    .channel(snowflake(msg.channel_id))
                    .map_or_else(|| msg.channel_id.to_string(), |c| c.name.clone());
                let info = DebugInfo {
                    bot: bot_user(ctx).name,
                    channel,
                    invoker: msg.author.name.clone(),
                    prefix: self.prefix.clone(),
                    command_count: Command::ALL.len(),
                    intents: format!("{:?}", Self::intents()),
                };
                service.debug(&guild, &info)
            }
            (Command::Audit, Some(guild)) => service.audit(&guild).await,
        }
    }
}

#[async_trait]
impl EventHandler for AuditHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            event = %GatewayEventType::Ready,
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            prefix = %self.prefix,
            commands = ?Command::ALL.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "Bot is online"
        );
    }

    async fn cache_ready(&self, ctx: Context, _guilds: Vec<GuildId>) {
        let guilds: Vec<_> = cached_guilds(&ctx)
            .into_iter()
            .filter_map(|id| guild_snapshot(&ctx, id))
            .collect();
        EventRouter::new(&self.services).on_ready(&guilds);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore the bot's own messages
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }

        let Some(command) = Command::parse(&msg.content, &self.prefix) else {
            return;
        };
        info!(
            event = %GatewayEventType::MessageCreate,
            %command,
            user = %msg.author.name,
            "Command received"
        );

        let reply = self.run_command(&ctx, &msg, command).await;
        let sent = match &reply {
            CommandReply::Text(text) => msg.channel_id.say(&ctx.http, text).await.map(|_| ()),
            CommandReply::Record(record) => msg
                .channel_id
                .send_message(&ctx.http, message_from(record))
                .await
                .map(|_| ()),
        };

        if let Err(e) = sent {
            warn!(%command, error = %e, "Failed to send command reply");
            if let Err(e) = msg
                .channel_id
                .say(&ctx.http, format!("❌ Command error: {e}"))
                .await
            {
                warn!(%command, error = %e, "Failed to report command error");
            }
        }
    }

    async fn guild_ban_addition(&self, ctx: Context, guild_id: GuildId, banned_user: User) {
        let Some(guild) = guild_snapshot(&ctx, guild_id) else {
            warn!(event = %GatewayEventType::GuildBanAdd, %guild_id, "Guild not cached");
            return;
        };
        EventRouter::new(&self.services)
            .on_ban(&guild, &user_from(&banned_user))
            .await;
    }

    async fn guild_ban_removal(&self, ctx: Context, guild_id: GuildId, unbanned_user: User) {
        let Some(guild) = guild_snapshot(&ctx, guild_id) else {
            warn!(event = %GatewayEventType::GuildBanRemove, %guild_id, "Guild not cached");
            return;
        };
        EventRouter::new(&self.services)
            .on_unban(&guild, &user_from(&unbanned_user))
            .await;
    }

    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        let Some(guild_id) = new.guild_id else {
            debug!("Voice state update outside a guild");
            return;
        };
        let Some(guild) = guild_snapshot(&ctx, guild_id) else {
            warn!(event = %GatewayEventType::VoiceStateUpdate, %guild_id, "Guild not cached");
            return;
        };
        let member = match new.member.as_ref() {
            Some(member) => member_from(member),
            None => match cached_member(&ctx, guild_id, new.user_id) {
                Some(member) => member,
                None => {
                    warn!(%guild_id, user_id = %new.user_id, "Member not cached");
                    return;
                }
            },
        };

        let before = old
            .and_then(|state| state.channel_id)
            .map(|id| Self::channel_ref(&guild, id));
        let after = new.channel_id.map(|id| Self::channel_ref(&guild, id));

        let transition = VoiceStateTransition::new(member, before, after, Utc::now());
        EventRouter::new(&self.services)
            .on_voice_state_change(&guild, &transition)
            .await;
    }
}
