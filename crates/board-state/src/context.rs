//! Board context - owns the collaboration stores for one client session
//!
//! Views receive a `BoardContext` (or a clone of it) instead of reaching for
//! global stores. The `join`/`track`/`notify` entry points validate records
//! before they reach a store; the stores themselves accept anything.

use std::sync::Arc;

use board_common::{AppResult, BoardConfig};
use board_core::{
    CardId, ColumnId, DomainError, Notification, NotificationId, PresenceUpdate, UserId,
    UserPresence, UserStatus,
};
use tracing::instrument;
use validator::Validate;

use crate::clock::{SharedClock, SystemClock};
use crate::notifications::NotificationStore;
use crate::presence::PresenceStore;

/// Collaboration state container
#[derive(Clone)]
pub struct BoardContext {
    config: Arc<BoardConfig>,
    presence: Arc<PresenceStore>,
    notifications: Arc<NotificationStore>,
}

impl BoardContext {
    /// Build both stores from `config` on the wall clock
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build both stores sharing one clock
    #[must_use]
    pub fn with_clock(config: BoardConfig, clock: SharedClock) -> Self {
        let buffer = config.store.event_buffer;
        let presence = PresenceStore::with_clock(clock.clone(), buffer);
        let notifications = NotificationStore::with_clock(config.store.unread_policy, clock, buffer);

        tracing::info!(
            app = %config.app.name,
            unread_policy = ?config.store.unread_policy,
            strict_lookups = config.store.strict_lookups,
            "Board context created"
        );

        Self {
            config: Arc::new(config),
            presence: Arc::new(presence),
            notifications: Arc::new(notifications),
        }
    }

    /// Build from environment variables
    pub fn from_env() -> AppResult<Self> {
        Ok(Self::new(BoardConfig::from_env()?))
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn presence(&self) -> &PresenceStore {
        &self.presence
    }

    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    /// Validate and register the local user
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn join(&self, user: UserPresence) -> AppResult<()> {
        user.validate().map_err(DomainError::from)?;
        self.presence.set_current_user(user);
        Ok(())
    }

    /// Validate and upsert a remote collaborator
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub fn track(&self, user: UserPresence) -> AppResult<()> {
        user.validate().map_err(DomainError::from)?;
        self.presence.add_user(user);
        Ok(())
    }

    /// Drop a collaborator
    #[instrument(skip(self))]
    pub fn leave(&self, user_id: &UserId) -> AppResult<bool> {
        let removed = self.presence.remove_user(user_id);
        if !removed && self.config.store.strict_lookups {
            return Err(DomainError::UserNotFound(user_id.clone()).into());
        }
        Ok(removed)
    }

    /// Move a collaborator's card/column focus
    #[instrument(skip(self))]
    pub fn move_cursor(
        &self,
        user_id: &UserId,
        card: Option<CardId>,
        column: Option<ColumnId>,
    ) -> AppResult<bool> {
        self.update(user_id, PresenceUpdate::new().card(card).column(column))
    }

    /// Change a collaborator's online status
    #[instrument(skip(self))]
    pub fn set_status(&self, user_id: &UserId, status: UserStatus) -> AppResult<bool> {
        self.update(user_id, PresenceUpdate::new().status(status))
    }

    /// Validate and deliver a notification
    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    pub fn notify(&self, notification: Notification) -> AppResult<()> {
        notification.validate().map_err(DomainError::from)?;
        self.notifications.add_notification(notification);
        Ok(())
    }

    /// Mark one notification as read
    #[instrument(skip(self))]
    pub fn read(&self, notification_id: &NotificationId) -> AppResult<bool> {
        // Checked before mutating: a strict miss must not move the legacy counter.
        if self.config.store.strict_lookups
            && self.notifications.notification(notification_id).is_none()
        {
            return Err(DomainError::NotificationNotFound(notification_id.clone()).into());
        }
        Ok(self.notifications.mark_as_read(notification_id))
    }

    /// Mark the whole inbox as read
    #[instrument(skip(self))]
    pub fn read_all(&self) {
        self.notifications.mark_all_as_read();
    }

    fn update(&self, user_id: &UserId, update: PresenceUpdate) -> AppResult<bool> {
        if self.config.store.strict_lookups && !self.presence.contains(user_id) {
            return Err(DomainError::UserNotFound(user_id.clone()).into());
        }
        Ok(self.presence.update_user_presence(user_id, update))
    }
}
