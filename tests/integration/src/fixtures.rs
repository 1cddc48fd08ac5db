//! Test fixtures and data generators
//!
//! Provides reusable presence and notification records.

use board_core::{Notification, UserPresence};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Fixed instant all fixtures start from
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

/// Online user with a unique id and email
pub fn unique_user() -> UserPresence {
    let suffix = unique_suffix();
    user(&format!("user{suffix}"))
}

/// Online user `id` with email `id@example.com`
pub fn user(id: &str) -> UserPresence {
    UserPresence::new(id, format!("{id}@example.com")).with_last_seen(epoch())
}

/// Unread mention with a unique id
pub fn unique_mention() -> Notification {
    let suffix = unique_suffix();
    mention(&format!("n{suffix}"))
}

/// Unread mention `id` on card `card-1` of board `board-1`
pub fn mention(id: &str) -> Notification {
    Notification::mention("me@example.com", format!("@me ping {id}"), "card-1", "board-1")
        .with_id(id)
        .with_created_at(epoch())
}
