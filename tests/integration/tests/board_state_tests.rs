//! Board state integration tests
//!
//! Drive presence and notifications through `BoardContext` the way board
//! views do, on a manual clock.
//!
//! Run with: cargo test -p integration-tests --test board_state_tests

use board_common::UnreadCountPolicy;
use board_core::{CardId, ColumnId, NotificationId, PresenceUpdate, UserId, UserStatus};
use chrono::Duration;
use integration_tests::{drain_event_types, epoch, fixtures::*, TestBoard};

// ============================================================================
// Presence
// ============================================================================

#[test]
fn test_upserts_keep_one_entry_per_id() {
    let board = TestBoard::start();
    let presence = board.ctx.presence();

    let a = unique_user();
    let b = unique_user();
    board.ctx.track(a.clone()).unwrap();
    board.ctx.join(b.clone()).unwrap();
    board.ctx.track(a.clone().with_status(UserStatus::Offline)).unwrap();
    board.ctx.join(b.clone().with_avatar("b.png")).unwrap();

    let users = presence.users();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, a.id);
    assert_eq!(users[0].status, UserStatus::Offline);
    assert_eq!(users[1].avatar.as_deref(), Some("b.png"));
    assert_eq!(presence.current_user(), Some(users[1].clone()));
}

#[test]
fn test_remove_then_readd() {
    let board = TestBoard::start();
    let presence = board.ctx.presence();
    let a = unique_user();
    board.ctx.track(a.clone()).unwrap();

    assert!(board.ctx.leave(&a.id).unwrap());
    assert!(!presence.contains(&a.id));

    let before = presence.snapshot();
    assert!(!board.ctx.leave(&UserId::new("nobody")).unwrap());
    assert_eq!(presence.snapshot(), before);

    board.ctx.track(a.clone()).unwrap();
    assert_eq!(presence.user(&a.id), Some(a));
}

#[test]
fn test_going_offline_stamps_both_views() {
    let board = TestBoard::start();
    let me = user("me");
    board.ctx.join(me.clone()).unwrap();
    board.clock.advance(Duration::seconds(42));

    assert!(board.ctx.set_status(&me.id, UserStatus::Offline).unwrap());

    let presence = board.ctx.presence();
    let listed = presence.user(&me.id).unwrap();
    let current = presence.current_user().unwrap();
    assert_eq!(listed.status, UserStatus::Offline);
    assert_eq!(listed.last_seen, epoch() + Duration::seconds(42));
    assert_eq!(current.last_seen, listed.last_seen);
    assert_eq!(current, listed);
}

#[test]
fn test_supplied_last_seen_is_overridden() {
    let board = TestBoard::start();
    let a = user("a");
    board.ctx.track(a.clone()).unwrap();
    board.clock.advance(Duration::minutes(3));

    let update = PresenceUpdate::new().last_seen(epoch() - Duration::days(30));
    assert!(board.ctx.presence().update_user_presence(&a.id, update));

    assert_eq!(
        board.ctx.presence().user(&a.id).unwrap().last_seen,
        epoch() + Duration::minutes(3)
    );
}

#[test]
fn test_cursor_moves_between_cards() {
    let board = TestBoard::strict();
    let presence = board.ctx.presence();
    let ada = user("ada");
    let bob = user("bob");
    board.ctx.track(ada.clone()).unwrap();
    board.ctx.track(bob.clone()).unwrap();

    board
        .ctx
        .move_cursor(&ada.id, Some(CardId::new("c1")), Some(ColumnId::new("todo")))
        .unwrap();
    board
        .ctx
        .move_cursor(&bob.id, Some(CardId::new("c1")), Some(ColumnId::new("todo")))
        .unwrap();
    assert_eq!(presence.users_on_card(&CardId::new("c1")).len(), 2);

    board
        .ctx
        .move_cursor(&bob.id, None, Some(ColumnId::new("done")))
        .unwrap();
    assert_eq!(presence.users_on_card(&CardId::new("c1")), vec![presence.user(&ada.id).unwrap()]);
    assert_eq!(presence.users_in_column(&ColumnId::new("done")).len(), 1);
    assert!(board
        .ctx
        .move_cursor(&UserId::new("ghost"), None, None)
        .is_err());
}

#[test]
fn test_presence_event_stream() {
    let board = TestBoard::start();
    let mut events = board.ctx.presence().events();
    let me = user("me");

    board.ctx.join(me.clone()).unwrap();
    board.ctx.track(user("other")).unwrap();
    board.ctx.set_status(&me.id, UserStatus::Offline).unwrap();
    board.ctx.leave(&UserId::new("nobody")).unwrap();
    board.ctx.leave(&UserId::new("other")).unwrap();

    assert_eq!(
        drain_event_types(&mut events),
        vec![
            "CURRENT_USER_CHANGED",
            "USER_UPSERTED",
            "PRESENCE_UPDATED",
            "USER_REMOVED"
        ]
    );
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_newest_notification_is_first() {
    let board = TestBoard::start();
    for _ in 0..5 {
        let n = unique_mention();
        let id = n.id.clone();
        board.ctx.notify(n).unwrap();
        assert_eq!(board.ctx.notifications().notifications()[0].id, id);
    }
}

#[test]
fn test_unread_counter_follows_adds() {
    let board = TestBoard::start();
    let store = board.ctx.notifications();

    board.ctx.notify(unique_mention()).unwrap();
    assert_eq!(store.unread_count(), 1);

    board.ctx.notify(unique_mention().with_read(true)).unwrap();
    assert_eq!(store.unread_count(), 1);

    board.ctx.notify(unique_mention()).unwrap();
    assert_eq!(store.unread_count(), 2);
    assert!(store.is_consistent());
}

#[test]
fn test_mark_all_read_from_any_state() {
    for policy in [UnreadCountPolicy::Corrected, UnreadCountPolicy::Legacy] {
        let board = TestBoard::with_policy(policy);
        let store = board.ctx.notifications();
        board.ctx.notify(mention("n1")).unwrap();
        board.ctx.notify(mention("n2").with_read(true)).unwrap();
        board.ctx.read(&NotificationId::new("n2")).unwrap();
        board.ctx.read(&NotificationId::new("zz")).unwrap();

        board.ctx.read_all();

        assert_eq!(store.unread_count(), 0);
        assert!(store.notifications().iter().all(|n| n.read));
    }
}

#[test]
fn test_double_read_with_corrected_counter() {
    let board = TestBoard::with_policy(UnreadCountPolicy::Corrected);
    let store = board.ctx.notifications();
    let n1 = NotificationId::new("n1");
    assert_eq!(store.unread_count(), 0);

    board.ctx.notify(mention("n1")).unwrap();
    assert_eq!(store.unread_count(), 1);

    assert!(board.ctx.read(&n1).unwrap());
    assert!(store.notification(&n1).unwrap().read);
    assert_eq!(store.unread_count(), 0);

    assert!(!board.ctx.read(&n1).unwrap());
    assert_eq!(store.unread_count(), 0);
}

#[test]
fn test_double_read_with_legacy_counter() {
    let board = TestBoard::with_policy(UnreadCountPolicy::Legacy);
    let store = board.ctx.notifications();
    let n1 = NotificationId::new("n1");

    board.ctx.notify(mention("n1")).unwrap();
    assert_eq!(store.unread_count(), 1);

    assert!(board.ctx.read(&n1).unwrap());
    assert_eq!(store.unread_count(), 0);

    assert!(!board.ctx.read(&n1).unwrap());
    assert_eq!(store.unread_count(), -1);
    assert!(!store.is_consistent());
}

#[test]
fn test_strict_read_of_unknown_id() {
    let board = TestBoard::strict();
    let err = board.ctx.read(&NotificationId::new("missing")).unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_NOTIFICATION");
}

// ============================================================================
// Observation
// ============================================================================

#[tokio::test]
async fn test_views_observe_both_stores_independently() {
    let board = TestBoard::start();
    let mut people = board.ctx.presence().subscribe();
    let mut badge = board.ctx.notifications().subscribe();

    board.ctx.notify(mention("n1")).unwrap();
    badge.changed().await.unwrap();
    assert_eq!(badge.borrow_and_update().unread_count, 1);
    assert!(!people.has_changed().unwrap());

    board.ctx.join(user("me")).unwrap();
    people.changed().await.unwrap();
    assert_eq!(people.borrow_and_update().users.len(), 1);
    assert!(!badge.has_changed().unwrap());
}

#[test]
fn test_noops_do_not_wake_views() {
    let board = TestBoard::start();
    board.ctx.track(user("a")).unwrap();
    let mut people = board.ctx.presence().subscribe();
    let mut badge = board.ctx.notifications().subscribe();

    board.ctx.leave(&UserId::new("ghost")).unwrap();
    board
        .ctx
        .set_status(&UserId::new("ghost"), UserStatus::Offline)
        .unwrap();
    board.ctx.read(&NotificationId::new("ghost")).unwrap();
    board.ctx.read_all();

    assert!(!people.has_changed().unwrap());
    assert!(!badge.has_changed().unwrap());
}

#[test]
fn test_snapshots_serialize_for_views() {
    let board = TestBoard::start();
    board.ctx.join(user("me")).unwrap();
    board.ctx.notify(mention("n1")).unwrap();

    let people = serde_json::to_value(board.ctx.presence().snapshot()).unwrap();
    assert_eq!(people["currentUser"]["id"], "me");
    assert_eq!(people["users"][0]["status"], "online");
    assert_eq!(people["users"][0]["lastSeen"], "2024-06-01T08:00:00Z");

    let inbox = serde_json::to_value(board.ctx.notifications().snapshot()).unwrap();
    assert_eq!(inbox["unreadCount"], 1);
    assert_eq!(inbox["notifications"][0]["userEmail"], "me@example.com");
    assert_eq!(inbox["notifications"][0]["cardId"], "card-1");
}
