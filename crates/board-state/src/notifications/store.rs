//! In-memory notification store.
//!
//! Notifications are kept newest first. `unread_count` is not recomputed on
//! read; every mutation adjusts it alongside the list. Under
//! [`UnreadCountPolicy::Legacy`] `mark_as_read` decrements unconditionally and
//! the counter may drift below the real unread total, or below zero.

use board_common::UnreadCountPolicy;
use board_core::{BoardEvent, CardId, Notification, NotificationId};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

use crate::clock::{SharedClock, SystemClock};
use crate::observer::{Observable, DEFAULT_EVENT_BUFFER};

/// What notification views render from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSnapshot {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

/// Notification store
pub struct NotificationStore {
    state: Observable<NotificationSnapshot>,
    policy: UnreadCountPolicy,
    clock: SharedClock,
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(UnreadCountPolicy::default())
    }
}

impl NotificationStore {
    /// Create an empty store
    #[must_use]
    pub fn new(policy: UnreadCountPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock), DEFAULT_EVENT_BUFFER)
    }

    /// Create an empty store with a custom clock and event buffer
    #[must_use]
    pub fn with_clock(policy: UnreadCountPolicy, clock: SharedClock, event_buffer: usize) -> Self {
        Self {
            state: Observable::new(NotificationSnapshot::default(), event_buffer),
            policy,
            clock,
        }
    }

    /// Counter policy in effect
    pub fn policy(&self) -> UnreadCountPolicy {
        self.policy
    }

    /// Put `notification` at the front of the inbox
    pub fn add_notification(&self, notification: Notification) {
        let notification_id = notification.id.clone();
        let unread_count = self
            .state
            .update(|state| {
                if notification.is_unread() {
                    state.unread_count += 1;
                }
                state.notifications.insert(0, notification);
                Some(state.unread_count)
            })
            .unwrap_or_default();

        tracing::debug!(
            notification_id = %notification_id,
            unread_count,
            "Added notification"
        );

        self.state.emit(BoardEvent::NotificationAdded {
            notification_id,
            unread_count,
            timestamp: self.clock.now(),
        });
    }

    /// Mark one notification as read.
    ///
    /// Returns whether an unread notification with this id became read.
    pub fn mark_as_read(&self, notification_id: &NotificationId) -> bool {
        let policy = self.policy;
        let outcome = self.state.update(|state| {
            let transitioned = state
                .notifications
                .iter_mut()
                .find(|n| &n.id == notification_id)
                .is_some_and(Notification::mark_read);

            match policy {
                UnreadCountPolicy::Corrected if !transitioned => None,
                UnreadCountPolicy::Corrected | UnreadCountPolicy::Legacy => {
                    state.unread_count -= 1;
                    Some((transitioned, state.unread_count))
                }
            }
        });

        let Some((transitioned, unread_count)) = outcome else {
            tracing::trace!(
                notification_id = %notification_id,
                "Mark as read ignored, nothing unread with this id"
            );
            return false;
        };

        if unread_count < 0 {
            tracing::warn!(
                notification_id = %notification_id,
                unread_count,
                "Unread count went negative"
            );
        }

        tracing::debug!(
            notification_id = %notification_id,
            transitioned,
            unread_count,
            "Marked notification as read"
        );

        self.state.emit(BoardEvent::NotificationRead {
            notification_id: notification_id.clone(),
            unread_count,
            timestamp: self.clock.now(),
        });

        transitioned
    }

    /// Mark everything read and reset the counter
    pub fn mark_all_as_read(&self) {
        let changed = self
            .state
            .update(|state| {
                let mut flipped = 0usize;
                for notification in &mut state.notifications {
                    if notification.mark_read() {
                        flipped += 1;
                    }
                }
                let changed = flipped > 0 || state.unread_count != 0;
                state.unread_count = 0;
                changed.then_some(flipped)
            });

        match changed {
            Some(flipped) => {
                tracing::debug!(flipped, "Marked all notifications as read");
                self.state.emit(BoardEvent::AllNotificationsRead {
                    timestamp: self.clock.now(),
                });
            }
            None => tracing::trace!("Mark all as read ignored, inbox already read"),
        }
    }

    /// All notifications, newest first
    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read(|s| s.notifications.clone())
    }

    /// The maintained unread counter
    pub fn unread_count(&self) -> i64 {
        self.state.read(|s| s.unread_count)
    }

    /// Look up one notification
    pub fn notification(&self, notification_id: &NotificationId) -> Option<Notification> {
        self.state.read(|s| {
            s.notifications
                .iter()
                .find(|n| &n.id == notification_id)
                .cloned()
        })
    }

    /// Unread notifications, newest first
    pub fn unread(&self) -> Vec<Notification> {
        self.state.read(|s| {
            s.notifications
                .iter()
                .filter(|n| n.is_unread())
                .cloned()
                .collect()
        })
    }

    /// Notifications that came from one card
    pub fn for_card(&self, card_id: &CardId) -> Vec<Notification> {
        self.state.read(|s| {
            s.notifications
                .iter()
                .filter(|n| &n.card_id == card_id)
                .cloned()
                .collect()
        })
    }

    /// Count unread notifications from the list itself
    pub fn recount(&self) -> i64 {
        let unread = self
            .state
            .read(|s| s.notifications.iter().filter(|n| n.is_unread()).count());
        i64::try_from(unread).unwrap_or(i64::MAX)
    }

    /// Check that the counter matches the list
    pub fn is_consistent(&self) -> bool {
        self.recount() == self.unread_count()
    }

    pub fn len(&self) -> usize {
        self.state.read(|s| s.notifications.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone out the full state
    pub fn snapshot(&self) -> NotificationSnapshot {
        self.state.snapshot()
    }

    /// Subscribe to state snapshots
    pub fn subscribe(&self) -> watch::Receiver<NotificationSnapshot> {
        self.state.subscribe()
    }

    /// Subscribe to notification events
    pub fn events(&self) -> broadcast::Receiver<BoardEvent> {
        self.state.events()
    }
}
