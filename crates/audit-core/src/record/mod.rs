//! Audit records - the structured output the bot posts

mod audit_record;

pub use audit_record::{AuditRecord, RecordField};
