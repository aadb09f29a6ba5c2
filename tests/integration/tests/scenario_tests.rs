//! Scenario Tests
//!
//! Gateway events run through the event router against the in-memory
//! platform; assertions look only at what the bot sent.
//!
//! Run with: cargo test -p integration-tests --test scenario_tests

use audit_core::{AuditAction, AuditRecord, BanDetail, DomainError, User};
use audit_service::services::formatter::{ACTION_LABEL, MODERATOR_LABEL, REASON_LABEL};
use audit_service::services::router::UNSPECIFIED_REASON;
use audit_service::{DeliveryOutcome, DropReason};
use integration_tests::fixtures::*;
use integration_tests::TestBot;

fn moderator_value(record: &AuditRecord) -> Option<&str> {
    record.field_value(MODERATOR_LABEL)
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_moderator_move_is_reported_twice_in_audit_channel() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_general().with_audit_channel().build();
    bot.platform.record_action(action_entry(
        AuditAction::MemberMove,
        moderator(),
        Some(alice().id()),
        1,
    ));

    let outcomes = bot
        .router()
        .on_voice_state_change(&guild, &transition(alice(), Some(lobby()), Some(music())))
        .await;

    assert_eq!(
        outcomes,
        vec![DeliveryOutcome::Sent(AUDIT_ID), DeliveryOutcome::Sent(AUDIT_ID)]
    );

    let sent = bot.sent();
    assert_eq!(sent.len(), 2);
    let mod1 = moderator().mention_with_id();
    for message in &sent {
        assert_eq!(message.channel_id, AUDIT_ID);
        assert_eq!(moderator_value(&message.record), Some(mod1.as_str()));
        assert!(!message.record.is_fallback_annotated());
    }

    let left = sent[0].record.text();
    let entered = sent[1].record.text();
    assert!(left.contains("left the voice channel"));
    assert!(left.contains("Lobby"));
    assert!(entered.contains("entered the voice channel"));
    assert!(entered.contains("Music"));
}

#[tokio::test]
async fn test_join_without_audit_channel_falls_back() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_general().with_off_topic().build();

    let outcomes = bot
        .router()
        .on_voice_state_change(&guild, &transition(alice(), None, Some(lobby())))
        .await;

    assert_eq!(outcomes, vec![DeliveryOutcome::SentFallback(GENERAL_ID)]);

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    let record = &sent[0].record;
    assert_eq!(sent[0].channel_id, GENERAL_ID);
    assert!(record.text().contains("joined the voice channel"));
    assert!(record.text().contains("Lobby"));
    assert!(record.is_fallback_annotated());
    assert_eq!(moderator_value(record), None);
    assert_eq!(record.field_value(ACTION_LABEL), Some("Self-initiated"));
}

#[tokio::test]
async fn test_nothing_writable_drops_the_record() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_locked_audit_channel().build();

    let outcomes = bot
        .router()
        .on_voice_state_change(&guild, &transition(alice(), None, Some(lobby())))
        .await;

    assert!(matches!(
        outcomes.as_slice(),
        [DeliveryOutcome::Dropped(DropReason::NoAvailableChannel)]
    ));
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn test_ban_with_failing_lookup_reports_unspecified_reason() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_general().with_audit_channel().build();
    bot.platform
        .fail_ban_lookup(DomainError::platform("503 Service Unavailable"));

    let banned = User::new(alice().id(), "alice");
    let outcome = bot.router().on_ban(&guild, &banned).await;

    assert_eq!(outcome, DeliveryOutcome::Sent(AUDIT_ID));
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].record.field_value(REASON_LABEL),
        Some(UNSPECIFIED_REASON)
    );
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn test_same_channel_update_sends_nothing() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_audit_channel().build();

    let outcomes = bot
        .router()
        .on_voice_state_change(&guild, &transition(alice(), Some(lobby()), Some(lobby())))
        .await;

    assert!(outcomes.is_empty());
    assert!(bot.sent().is_empty());
    assert_eq!(bot.platform.log_queries(), 0);
}

#[tokio::test]
async fn test_join_by_moderator_reads_moved_to() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_audit_channel().build();
    bot.platform.record_action(action_entry(
        AuditAction::MemberMove,
        moderator(),
        Some(alice().id()),
        2,
    ));

    let outcomes = bot
        .router()
        .on_voice_state_change(&guild, &transition(alice(), None, Some(music())))
        .await;

    assert_eq!(outcomes.len(), 1);
    let sent = bot.sent();
    assert!(sent[0].record.text().contains("was moved to the voice channel"));
    assert_eq!(
        moderator_value(&sent[0].record),
        Some(moderator().mention_with_id().as_str())
    );
}

#[tokio::test]
async fn test_stale_or_foreign_entries_do_not_attribute_a_leave() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_audit_channel().build();
    bot.platform.record_action(action_entry(
        AuditAction::MemberDisconnect,
        moderator(),
        Some(alice().id()),
        120,
    ));

    bot.router()
        .on_voice_state_change(&guild, &transition(alice(), Some(lobby()), None))
        .await;

    bot.platform.record_action(action_entry(
        AuditAction::MemberDisconnect,
        moderator(),
        Some(bob().id()),
        1,
    ));

    bot.router()
        .on_voice_state_change(&guild, &transition(alice(), Some(lobby()), None))
        .await;

    let sent = bot.sent();
    assert_eq!(sent.len(), 2);
    for message in &sent {
        assert!(message.record.text().contains("left the voice channel"));
        assert_eq!(moderator_value(&message.record), None);
    }
}

#[tokio::test]
async fn test_recent_disconnect_reads_removed_from() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_audit_channel().build();
    bot.platform.record_action(action_entry(
        AuditAction::MemberDisconnect,
        moderator(),
        Some(alice().id()),
        3,
    ));

    bot.router()
        .on_voice_state_change(&guild, &transition(alice(), Some(music()), None))
        .await;

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].record.text().contains("was removed from the voice channel"));
    assert!(sent[0].record.text().contains("Music"));
}

#[tokio::test]
async fn test_action_log_failure_still_delivers() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_audit_channel().build();
    bot.platform
        .fail_action_log(DomainError::platform("Missing Access"));

    let outcomes = bot
        .router()
        .on_voice_state_change(&guild, &transition(bob(), Some(lobby()), Some(music())))
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(DeliveryOutcome::is_sent));
    for message in bot.sent() {
        assert_eq!(moderator_value(&message.record), None);
        assert_eq!(message.record.field_value(ACTION_LABEL), Some("Self-initiated"));
    }
}

#[tokio::test]
async fn test_locked_audit_channel_uses_first_writable_text_channel() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new()
        .with_general()
        .with_off_topic()
        .with_locked_audit_channel()
        .build();

    let outcome = bot.router().on_unban(&guild, &alice().user).await;

    assert_eq!(outcome, DeliveryOutcome::SentFallback(GENERAL_ID));
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].record.is_fallback_annotated());
}

#[tokio::test]
async fn test_ban_reason_is_reported() {
    let bot = TestBot::start().unwrap();
    let guild = GuildFixture::new().with_audit_channel().build();
    let banned = bob().user;
    bot.platform.set_ban(BanDetail {
        user: banned.clone(),
        reason: Some("spam".to_string()),
    });

    bot.router().on_ban(&guild, &banned).await;

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].record.field_value(REASON_LABEL), Some("spam"));
}

#[tokio::test]
async fn test_ready_reports_audit_channel_per_guild() {
    let bot = TestBot::start().unwrap();
    let with_audit = GuildFixture::new().with_audit_channel().build();
    let without_audit = GuildFixture::new().with_general().build();

    let statuses = bot.router().on_ready(&[with_audit, without_audit]);

    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].audit_channel, Some(AUDIT_ID));
    assert_eq!(statuses[1].audit_channel, None);
    assert!(bot.sent().is_empty());
}
