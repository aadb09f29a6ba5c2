//! Channel resolver - finds the audit channel in a guild snapshot

use audit_core::{Channel, Guild};

/// Find the channel whose name equals `name` exactly (case-sensitive)
///
/// Scans every channel in listed order and returns the first match.
/// Nothing is cached; each call sees the snapshot it is given.
pub fn resolve_audit_channel<'g>(guild: &'g Guild, name: &str) -> Option<&'g Channel> {
    guild.channels.iter().find(|channel| channel.name == name)
}
