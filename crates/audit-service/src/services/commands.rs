//! Command service - builds replies for the prefix commands
//!
//! Replies are plain text or an `AuditRecord` rendered as an embed. The
//! adapter owns parsing and sending; this service only decides content.

use audit_core::traits::ActionQuery;
use audit_core::{AuditAction, AuditRecord, Guild, Permissions, RecordField, User};
use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::resolver::resolve_audit_channel;

const INFO_COLOR: u32 = 0x0099ff;
const OK_COLOR: u32 = 0x00ff00;
const ALERT_COLOR: u32 = 0xff6b6b;

/// How many action log entries `audit` scans, and how many it shows
const AUDIT_SCAN_LIMIT: u8 = 10;
const AUDIT_SHOW_LIMIT: usize = 5;

/// Reply to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    Text(String),
    Record(AuditRecord),
}

impl CommandReply {
    pub fn record(&self) -> Option<&AuditRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Text(_) => None,
        }
    }
}

/// Session details shown by `debug`
#[derive(Debug, Clone)]
pub struct DebugInfo {
    /// The bot's account tag
    pub bot: String,
    /// Name of the channel the command was sent in
    pub channel: String,
    pub invoker: String,
    pub prefix: String,
    pub command_count: usize,
    /// Gateway intents the session was opened with
    pub intents: String,
}

fn check(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// Command service
pub struct CommandService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommandService<'a> {
    /// Create a new CommandService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// `ping`
    pub fn ping(&self) -> CommandReply {
        CommandReply::Text("🏓 Pong!".to_string())
    }

    /// `config`: where records go and whether the bot can post there
    pub fn config(&self, guild: &Guild) -> CommandReply {
        let name = self.ctx.audit_channel_name();
        let audit = resolve_audit_channel(guild, name);

        let mut record = AuditRecord::new("⚙️ Bot Configuration", INFO_COLOR)
            .field(RecordField::inline(
                "Audit Channel",
                audit.map_or_else(|| "❌ Not found".to_string(), |c| c.mention()),
            ))
            .field(RecordField::inline("Channel Name", name))
            .field(RecordField::inline("Server", guild.name.as_str()));

        if let Some(channel) = audit {
            record.push_field(RecordField::inline(
                "Channel Permissions",
                format!("{} Send Messages", check(channel.bot_can_send())),
            ));
        }

        CommandReply::Record(record)
    }

    /// `perms`: the bot's guild-wide and audit-channel permissions
    pub fn perms(&self, guild: &Guild) -> CommandReply {
        let general = guild.bot_permissions;
        let mut record = AuditRecord::new("🔐 Bot Permissions", ALERT_COLOR)
            .field(RecordField::block("General Permissions", "Server-wide"))
            .field(RecordField::inline(
                "View Channels",
                check(general.has(Permissions::VIEW_CHANNEL)),
            ))
            .field(RecordField::inline(
                "Send Messages",
                check(general.has(Permissions::SEND_MESSAGES)),
            ))
            .field(RecordField::inline(
                "Use Commands",
                check(general.has(Permissions::USE_APPLICATION_COMMANDS)),
            ))
            .field(RecordField::inline(
                "View Audit Log",
                check(general.has(Permissions::VIEW_AUDIT_LOG)),
            ));

        match resolve_audit_channel(guild, self.ctx.audit_channel_name()) {
            Some(channel) => {
                let perms = channel.bot_permissions;
                record.push_field(RecordField::block(
                    "Audit Channel Permissions",
                    channel.mention(),
                ));
                record.push_field(RecordField::inline(
                    "View Channel",
                    check(perms.has(Permissions::VIEW_CHANNEL)),
                ));
                record.push_field(RecordField::inline(
                    "Send Messages",
                    check(perms.has(Permissions::SEND_MESSAGES)),
                ));
                record.push_field(RecordField::inline(
                    "Embed Links",
                    check(perms.has(Permissions::EMBED_LINKS)),
                ));
                let missing = perms.missing(Permissions::AUDIT_CHANNEL);
                if !missing.is_empty() {
                    record.push_field(RecordField::block("Missing", missing.to_string()));
                }
            }
            None => {
                record.push_field(RecordField::block("Audit Channel", "❌ Not found"));
            }
        }

        CommandReply::Record(record)
    }

    /// `test`: liveness record
    pub fn status(&self, guild: &Guild, invoker: &User, at: DateTime<Utc>) -> CommandReply {
        let record = AuditRecord::new("🤖 Audit Bot", OK_COLOR)
            .description("Bot is working correctly!")
            .field(RecordField::inline("Status", "✅ Online"))
            .field(RecordField::inline("Audit Channel", self.ctx.audit_channel_name()))
            .field(RecordField::inline("Server", guild.name.as_str()))
            .field(RecordField::inline("User", invoker.mention()))
            .timestamp(at);
        CommandReply::Record(record)
    }

    /// `debug`: session summary as plain text
    pub fn debug(&self, guild: &Guild, info: &DebugInfo) -> CommandReply {
        CommandReply::Text(format!(
            "**Bot Debug:**\n\
             - Bot: {}\n\
             - Server: {}\n\
             - Channel: {}\n\
             - User: {}\n\
             - Prefix: {}\n\
             - Commands: {}\n\
             - Intents: {}\n\
             - Audit channel: {}",
            info.bot,
            guild.name,
            info.channel,
            info.invoker,
            info.prefix,
            info.command_count,
            info.intents,
            self.ctx.audit_channel_name(),
        ))
    }

    /// `audit`: check action log access and list recent moves
    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    pub async fn audit(&self, guild: &Guild) -> CommandReply {
        let mut record = AuditRecord::new("📋 Action Log Check", INFO_COLOR)
            .description("Checking whether the bot can read the action log...");

        let query = ActionQuery::recent(AuditAction::MemberMove, AUDIT_SCAN_LIMIT);
        match self.ctx.audit_log().recent_actions(guild.id, query).await {
            Ok(entries) => {
                let moves: Vec<String> = entries
                    .iter()
                    .filter_map(|entry| {
                        let actor = entry.actor.as_ref()?;
                        let target = entry.target_id?;
                        Some(format!(
                            "**{}** - **{}** moved {} from {} to {}",
                            entry.created_at.format("%H:%M:%S"),
                            actor.name,
                            target.user_mention(),
                            entry.before_channel.as_deref().unwrap_or("None"),
                            entry.after_channel.as_deref().unwrap_or("None"),
                        ))
                    })
                    .take(AUDIT_SHOW_LIMIT)
                    .collect();

                if moves.is_empty() {
                    record.push_field(RecordField::block(
                        "✅ Action Log Available",
                        "The bot can read the action log, but there are no recent moves.",
                    ));
                } else {
                    record.push_field(RecordField::block(
                        "✅ Action Log Available",
                        "The bot can read the action log!",
                    ));
                    record.push_field(RecordField::block("Recent Moves", moves.join("\n")));
                }
            }
            Err(e) => {
                warn!(code = e.code(), error = %e, "Action log check failed");
                record.push_field(RecordField::block(
                    "❌ Action Log Unavailable",
                    format!("Error: {e}"),
                ));
                record.push_field(RecordField::block(
                    "Solution",
                    "The bot needs the 'View Audit Log' permission. Re-invite it with that permission enabled.",
                ));
            }
        }

        CommandReply::Record(record)
    }

    /// `testmove`: instructions for a live move test
    pub fn testmove(&self) -> CommandReply {
        let record = AuditRecord::new("🧪 Move Detection Test", OK_COLOR)
            .description("Now move a user between voice channels to test detection!")
            .field(RecordField::block(
                "📋 What to do:",
                "1. Move a user to another voice channel\n\
                 2. Check the bot logs\n\
                 3. See whether the moderator's name appears",
            ))
            .field(RecordField::block(
                "⏰ Time limit:",
                format!(
                    "{} seconds to detect the moderator",
                    self.ctx.config().attribution_window_secs
                ),
            ));
        CommandReply::Record(record)
    }

    /// `permissions`: the permissions the bot needs and how to grant them
    pub fn permissions_guide(&self) -> CommandReply {
        let record = AuditRecord::new("📋 Required Bot Permissions", OK_COLOR)
            .description("For the bot to work correctly it needs the following permissions:")
            .field(RecordField::block(
                "🔧 Basic Permissions (Required)",
                "✅ **View Channels** - to access channels\n\
                 ✅ **Send Messages** - to post audit records\n\
                 ✅ **Use Application Commands** - for commands to work\n\
                 ✅ **Read Message History** - to read messages\n\
                 ✅ **Connect** - to watch voice channels\n\
                 ✅ **View Audit Log** - to identify moderators",
            ))
            .field(RecordField::block(
                "📝 Audit Channel Permissions",
                "✅ **View Channel** - to access the channel\n\
                 ✅ **Send Messages** - to post records\n\
                 ✅ **Embed Links** - for formatted records\n\
                 ✅ **Attach Files** - for detailed records",
            ))
            .field(RecordField::block(
                "⚙️ How to Configure",
                "1. Open **Server Settings**\n\
                 2. **Integrations** → **Bots**\n\
                 3. Find the bot and click **Manage**\n\
                 4. Enable the permissions listed above\n\
                 5. Save",
            ))
            .field(RecordField::block(
                "🔗 Direct Link",
                "[Developer Portal](https://discord.com/developers/applications/)",
            ));
        CommandReply::Record(record)
    }
}
