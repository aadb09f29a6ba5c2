//! Port traits implemented by the platform adapter

mod platform;

pub use platform::{ActionQuery, AuditLogSource, BanLookup, PlatformResult, RecordSender};
