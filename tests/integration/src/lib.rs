//! Integration test utilities for the audit bot
//!
//! This crate provides an in-memory platform and guild fixtures for running
//! gateway events end to end through the audit services.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
