//! Prefix command parsing

use std::fmt;

/// Commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Ping,
    Config,
    Perms,
    Test,
    Debug,
    Audit,
    TestMove,
    Permissions,
}

impl Command {
    /// Every command, in help order
    pub const ALL: [Command; 8] = [
        Self::Ping,
        Self::Config,
        Self::Perms,
        Self::Test,
        Self::Debug,
        Self::Audit,
        Self::TestMove,
        Self::Permissions,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Config => "config",
            Self::Perms => "perms",
            Self::Test => "test",
            Self::Debug => "debug",
            Self::Audit => "audit",
            Self::TestMove => "testmove",
            Self::Permissions => "permissions",
        }
    }

    /// Look up a command by name; the Portuguese names of the earlier deployment still work
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ping" => Some(Self::Ping),
            "config" => Some(Self::Config),
            "perms" => Some(Self::Perms),
            "test" | "teste" => Some(Self::Test),
            "debug" => Some(Self::Debug),
            "audit" => Some(Self::Audit),
            "testmove" => Some(Self::TestMove),
            "permissions" | "permissoes" => Some(Self::Permissions),
            _ => None,
        }
    }

    /// Parse a message body: `<prefix><name> [args...]`
    ///
    /// Returns `None` for messages without the prefix or with an unknown name.
    #[must_use]
    pub fn parse(content: &str, prefix: &str) -> Option<Self> {
        if prefix.is_empty() {
            return None;
        }
        let rest = content.trim_start().strip_prefix(prefix)?;
        let name = rest.split_whitespace().next()?;
        Self::from_name(name)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
