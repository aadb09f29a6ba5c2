//! Permission bitflags mirroring the platform's permission bitfield
//!
//! Only the permissions the audit bot inspects are named; unknown bits are
//! truncated on conversion.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Platform permission flags, at the platform's bit positions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        /// Kick members from guild
        const KICK_MEMBERS             = 1 << 1;
        /// Ban members from guild
        const BAN_MEMBERS              = 1 << 2;
        /// Bypass all permission checks
        const ADMINISTRATOR            = 1 << 3;
        /// Create, edit, delete channels
        const MANAGE_CHANNELS          = 1 << 4;
        /// Edit guild settings
        const MANAGE_GUILD             = 1 << 5;
        /// Read the guild's administrative action log
        const VIEW_AUDIT_LOG           = 1 << 7;
        /// View channel and read messages
        const VIEW_CHANNEL             = 1 << 10;
        /// Send messages in text channels
        const SEND_MESSAGES            = 1 << 11;
        /// Post rich embeds
        const EMBED_LINKS              = 1 << 14;
        /// Upload files and images
        const ATTACH_FILES             = 1 << 15;
        /// Read message history
        const READ_MESSAGE_HISTORY     = 1 << 16;
        /// Connect to voice channels
        const CONNECT                  = 1 << 20;
        /// Move members between voice channels
        const MOVE_MEMBERS             = 1 << 24;
        /// Use application (slash) commands
        const USE_APPLICATION_COMMANDS = 1 << 31;

        /// What the bot needs in the audit channel to post a record
        const AUDIT_CHANNEL = Self::VIEW_CHANNEL.bits()
            | Self::SEND_MESSAGES.bits()
            | Self::EMBED_LINKS.bits();
    }
}

impl Permissions {
    /// Whether `permission` is granted; administrators pass every check
    #[inline]
    pub fn has(&self, permission: Permissions) -> bool {
        self.contains(Permissions::ADMINISTRATOR) || self.contains(permission)
    }

    #[inline]
    pub fn can_send_messages(&self) -> bool {
        self.has(Permissions::SEND_MESSAGES)
    }

    /// Named permissions from `required` that are not granted
    pub fn missing(&self, required: Permissions) -> Permissions {
        if self.contains(Permissions::ADMINISTRATOR) {
            Permissions::empty()
        } else {
            required.difference(*self)
        }
    }

    /// Convert the platform's raw bitfield; unnamed bits are dropped
    #[inline]
    pub fn from_platform_bits(bits: u64) -> Self {
        Permissions::from_bits_truncate(bits)
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::empty()
    }
}

/// Flag names joined with `, `, or `none`
impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        f.write_str(&names.join(", "))
    }
}
