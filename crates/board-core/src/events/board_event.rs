//! Board events - emitted by the stores after each effective mutation
//!
//! Views that only need deltas (an avatar sliding to another card, a badge
//! bump) listen to these instead of diffing whole snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::UserStatus;
use crate::value_objects::{CardId, ColumnId, NotificationId, UserId};

/// All collaboration state changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardEvent {
    // =========================================================================
    // Presence Events
    // =========================================================================
    UserUpserted {
        user_id: UserId,
        timestamp: DateTime<Utc>,
    },
    CurrentUserChanged {
        user_id: UserId,
        timestamp: DateTime<Utc>,
    },
    UserRemoved {
        user_id: UserId,
        timestamp: DateTime<Utc>,
    },
    PresenceUpdated {
        user_id: UserId,
        status: UserStatus,
        current_card: Option<CardId>,
        current_column: Option<ColumnId>,
        timestamp: DateTime<Utc>,
    },

    // =========================================================================
    // Notification Events
    // =========================================================================
    NotificationAdded {
        notification_id: NotificationId,
        unread_count: i64,
        timestamp: DateTime<Utc>,
    },
    NotificationRead {
        notification_id: NotificationId,
        unread_count: i64,
        timestamp: DateTime<Utc>,
    },
    AllNotificationsRead {
        timestamp: DateTime<Utc>,
    },
}

impl BoardEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::UserUpserted { .. } => "USER_UPSERTED",
            Self::CurrentUserChanged { .. } => "CURRENT_USER_CHANGED",
            Self::UserRemoved { .. } => "USER_REMOVED",
            Self::PresenceUpdated { .. } => "PRESENCE_UPDATED",
            Self::NotificationAdded { .. } => "NOTIFICATION_ADDED",
            Self::NotificationRead { .. } => "NOTIFICATION_READ",
            Self::AllNotificationsRead { .. } => "ALL_NOTIFICATIONS_READ",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserUpserted { timestamp, .. }
            | Self::CurrentUserChanged { timestamp, .. }
            | Self::UserRemoved { timestamp, .. }
            | Self::PresenceUpdated { timestamp, .. }
            | Self::NotificationAdded { timestamp, .. }
            | Self::NotificationRead { timestamp, .. }
            | Self::AllNotificationsRead { timestamp } => *timestamp,
        }
    }

    /// Check if this is a presence event
    pub fn is_presence(&self) -> bool {
        matches!(
            self,
            Self::UserUpserted { .. }
                | Self::CurrentUserChanged { .. }
                | Self::UserRemoved { .. }
                | Self::PresenceUpdated { .. }
        )
    }

    /// The user this event is about, if any
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::UserUpserted { user_id, .. }
            | Self::CurrentUserChanged { user_id, .. }
            | Self::UserRemoved { user_id, .. }
            | Self::PresenceUpdated { user_id, .. } => Some(user_id),
            _ => None,
        }
    }
}
