//! In-memory presence store.
//!
//! Holds at most one record per user id. Inserting a user that is already
//! present removes the old record and appends the new one, so the list order
//! is "least recently upserted first".

use board_core::{BoardEvent, CardId, ColumnId, PresenceUpdate, UserId, UserPresence};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

use crate::clock::{SharedClock, SystemClock};
use crate::observer::{Observable, DEFAULT_EVENT_BUFFER};

/// What presence views render from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceSnapshot {
    pub users: Vec<UserPresence>,
    pub current_user: Option<UserPresence>,
}

impl PresenceSnapshot {
    fn upsert(&mut self, user: UserPresence) {
        self.users.retain(|u| u.id != user.id);
        self.users.push(user);
    }
}

/// Presence store
pub struct PresenceStore {
    state: Observable<PresenceSnapshot>,
    clock: SharedClock,
}

impl Default for PresenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceStore {
    /// Create an empty store on the wall clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_EVENT_BUFFER)
    }

    /// Create an empty store with a custom clock and event buffer
    #[must_use]
    pub fn with_clock(clock: SharedClock, event_buffer: usize) -> Self {
        Self {
            state: Observable::new(PresenceSnapshot::default(), event_buffer),
            clock,
        }
    }

    /// Make `user` the local user and upsert them into the list
    pub fn set_current_user(&self, user: UserPresence) {
        let user_id = user.id.clone();
        self.state.update(|state| {
            state.upsert(user.clone());
            state.current_user = Some(user);
            Some(())
        });

        tracing::debug!(user_id = %user_id, "Set current user");

        self.state.emit(BoardEvent::CurrentUserChanged {
            user_id,
            timestamp: self.clock.now(),
        });
    }

    /// Upsert `user` without touching the current user
    pub fn add_user(&self, user: UserPresence) {
        let user_id = user.id.clone();
        self.state.update(|state| {
            state.upsert(user);
            Some(())
        });

        tracing::debug!(user_id = %user_id, "Upserted user presence");

        self.state.emit(BoardEvent::UserUpserted {
            user_id,
            timestamp: self.clock.now(),
        });
    }

    /// Drop a user's record. Returns `false` if the user was not present.
    ///
    /// The current user is left as is even when it has this id.
    pub fn remove_user(&self, user_id: &UserId) -> bool {
        let removed = self
            .state
            .update(|state| {
                let before = state.users.len();
                state.users.retain(|u| &u.id != user_id);
                (state.users.len() != before).then_some(())
            })
            .is_some();

        if removed {
            tracing::debug!(user_id = %user_id, "Removed user presence");
            self.state.emit(BoardEvent::UserRemoved {
                user_id: user_id.clone(),
                timestamp: self.clock.now(),
            });
        } else {
            tracing::trace!(user_id = %user_id, "Remove ignored, user not present");
        }

        removed
    }

    /// Merge `update` into the user's record and stamp `last_seen`.
    ///
    /// The current user receives the same merge and the same stamp when the
    /// id matches. Returns whether the user was found in the list.
    pub fn update_user_presence(&self, user_id: &UserId, update: PresenceUpdate) -> bool {
        let now = self.clock.now();
        let outcome = self.state.update(|state| {
            let listed = state
                .users
                .iter_mut()
                .find(|u| &u.id == user_id)
                .map(|user| {
                    user.apply(&update, now);
                    user.clone()
                });

            let current = state
                .current_user
                .as_mut()
                .filter(|current| &current.id == user_id)
                .map(|current| {
                    current.apply(&update, now);
                    current.clone()
                });

            let found = listed.is_some();
            listed.or(current).map(|record| (found, record))
        });

        let Some((found, record)) = outcome else {
            tracing::trace!(user_id = %user_id, "Presence update ignored, user not present");
            return false;
        };

        tracing::debug!(
            user_id = %user_id,
            status = %record.status,
            last_seen = %now,
            "Updated user presence"
        );

        self.state.emit(BoardEvent::PresenceUpdated {
            user_id: user_id.clone(),
            status: record.status,
            current_card: record.current_card,
            current_column: record.current_column,
            timestamp: now,
        });

        found
    }

    /// All known users, least recently upserted first
    pub fn users(&self) -> Vec<UserPresence> {
        self.state.read(|s| s.users.clone())
    }

    /// The local user, if set
    pub fn current_user(&self) -> Option<UserPresence> {
        self.state.read(|s| s.current_user.clone())
    }

    /// Look up one user
    pub fn user(&self, user_id: &UserId) -> Option<UserPresence> {
        self.state
            .read(|s| s.users.iter().find(|u| &u.id == user_id).cloned())
    }

    /// Check if a user is in the list
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.state.read(|s| s.users.iter().any(|u| &u.id == user_id))
    }

    /// Users currently online
    pub fn online_users(&self) -> Vec<UserPresence> {
        self.filtered(|u| u.status.is_online())
    }

    /// Number of users currently online
    pub fn online_count(&self) -> usize {
        self.state
            .read(|s| s.users.iter().filter(|u| u.status.is_online()).count())
    }

    /// Users focused on a card
    pub fn users_on_card(&self, card_id: &CardId) -> Vec<UserPresence> {
        self.filtered(|u| u.is_on_card(card_id))
    }

    /// Users focused on a column
    pub fn users_in_column(&self, column_id: &ColumnId) -> Vec<UserPresence> {
        self.filtered(|u| u.is_in_column(column_id))
    }

    pub fn len(&self) -> usize {
        self.state.read(|s| s.users.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone out the full state
    pub fn snapshot(&self) -> PresenceSnapshot {
        self.state.snapshot()
    }

    /// Subscribe to state snapshots
    pub fn subscribe(&self) -> watch::Receiver<PresenceSnapshot> {
        self.state.subscribe()
    }

    /// Subscribe to presence events
    pub fn events(&self) -> broadcast::Receiver<BoardEvent> {
        self.state.events()
    }

    fn filtered(&self, keep: impl Fn(&UserPresence) -> bool) -> Vec<UserPresence> {
        self.state
            .read(|s| s.users.iter().filter(|&u| keep(u)).cloned().collect())
    }
}
