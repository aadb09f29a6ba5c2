//! Test fixtures and data generators
//!
//! Guild layouts and users shared by the scenario tests.

use audit_core::{
    AdministrativeActionEntry, AuditAction, Channel, Guild, Member, Permissions, Snowflake, User,
    VoiceChannelRef, VoiceStateTransition,
};
use chrono::{Duration, Utc};

pub const GUILD_ID: Snowflake = Snowflake::new(1000);
pub const BOT_ID: Snowflake = Snowflake::new(1001);
pub const AUDIT_CHANNEL_NAME: &str = "🔐╺╸auditoria";

pub const LOBBY_ID: Snowflake = Snowflake::new(2001);
pub const MUSIC_ID: Snowflake = Snowflake::new(2002);
pub const ANNOUNCEMENTS_ID: Snowflake = Snowflake::new(3001);
pub const GENERAL_ID: Snowflake = Snowflake::new(3002);
pub const OFF_TOPIC_ID: Snowflake = Snowflake::new(3003);
pub const AUDIT_ID: Snowflake = Snowflake::new(3004);

const WRITABLE: Permissions = Permissions::AUDIT_CHANNEL;
const READ_ONLY: Permissions = Permissions::VIEW_CHANNEL;

pub fn bot_user() -> User {
    User::new_bot(BOT_ID, "Auditor")
}

pub fn moderator() -> User {
    User::new(Snowflake::new(4001), "Mod1")
}

pub fn alice() -> Member {
    Member::new(GUILD_ID, User::new(Snowflake::new(5001), "alice"))
}

pub fn bob() -> Member {
    Member::new(GUILD_ID, User::new(Snowflake::new(5002), "bob"))
}

pub fn lobby() -> VoiceChannelRef {
    VoiceChannelRef::new(LOBBY_ID, "Lobby")
}

pub fn music() -> VoiceChannelRef {
    VoiceChannelRef::new(MUSIC_ID, "Music")
}

/// Builder for guild layouts
pub struct GuildFixture {
    guild: Guild,
}

impl GuildFixture {
    /// Two voice channels and a read-only announcements channel
    pub fn new() -> Self {
        let guild = Guild::new(GUILD_ID, "Fixture Guild", bot_user())
            .with_bot_permissions(Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES)
            .with_channel(
                Channel::new_voice(LOBBY_ID, "Lobby", Permissions::CONNECT).at_position(0),
            )
            .with_channel(
                Channel::new_voice(MUSIC_ID, "Music", Permissions::CONNECT).at_position(1),
            )
            .with_channel(
                Channel::new_text(ANNOUNCEMENTS_ID, "announcements", READ_ONLY).at_position(2),
            );
        Self { guild }
    }

    pub fn with_general(self) -> Self {
        self.text(GENERAL_ID, "general", WRITABLE, 3)
    }

    pub fn with_off_topic(self) -> Self {
        self.text(OFF_TOPIC_ID, "off-topic", WRITABLE, 4)
    }

    pub fn with_audit_channel(self) -> Self {
        self.text(AUDIT_ID, AUDIT_CHANNEL_NAME, WRITABLE, 5)
    }

    pub fn with_locked_audit_channel(self) -> Self {
        self.text(AUDIT_ID, AUDIT_CHANNEL_NAME, READ_ONLY, 5)
    }

    fn text(mut self, id: Snowflake, name: &str, permissions: Permissions, position: u16) -> Self {
        self.guild = self
            .guild
            .with_channel(Channel::new_text(id, name, permissions).at_position(position));
        self
    }

    pub fn build(self) -> Guild {
        self.guild
    }
}

impl Default for GuildFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// An action-log entry created `age_secs` ago by `actor`
pub fn action_entry(
    action: AuditAction,
    actor: User,
    target: Option<Snowflake>,
    age_secs: i64,
) -> AdministrativeActionEntry {
    let id = Snowflake::from_datetime(Utc::now() - Duration::seconds(age_secs));
    let entry = AdministrativeActionEntry::new(id, action, Some(actor));
    match target {
        Some(target) => entry.with_target(target),
        None => entry,
    }
}

pub fn transition(
    member: Member,
    before: Option<VoiceChannelRef>,
    after: Option<VoiceChannelRef>,
) -> VoiceStateTransition {
    VoiceStateTransition::new(member, before, after, Utc::now())
}
