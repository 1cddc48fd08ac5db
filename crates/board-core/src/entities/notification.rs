//! Notification entity - a mention delivered to the current user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::value_objects::{BoardId, CardId, NotificationId};

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    /// Someone wrote `@user` on a card
    #[default]
    Mention,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mention => write!(f, "mention"),
        }
    }
}

/// A notification for the current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[validate(custom(function = "validate_notification_id"))]
    pub id: NotificationId,

    #[validate(email(message = "Invalid recipient email"))]
    pub user_email: String,

    #[serde(rename = "type")]
    pub kind: NotificationType,

    #[validate(length(min = 1, message = "Notification content must not be empty"))]
    pub content: String,

    pub card_id: CardId,

    pub board_id: BoardId,

    pub read: bool,

    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread mention with a fresh id
    pub fn mention(
        user_email: impl Into<String>,
        content: impl Into<String>,
        card_id: impl Into<CardId>,
        board_id: impl Into<BoardId>,
    ) -> Self {
        Self {
            id: NotificationId::generate(),
            user_email: user_email.into(),
            kind: NotificationType::Mention,
            content: content.into(),
            card_id: card_id.into(),
            board_id: board_id.into(),
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Use a specific id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the read flag
    #[must_use]
    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Set the creation timestamp
    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Check if the notification is still unread
    #[inline]
    pub fn is_unread(&self) -> bool {
        !self.read
    }

    /// Mark as read, returning whether the flag actually flipped
    pub fn mark_read(&mut self) -> bool {
        let was_unread = !self.read;
        self.read = true;
        was_unread
    }
}

fn validate_notification_id(id: &NotificationId) -> Result<(), ValidationError> {
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::new("empty_id")
            .with_message("Notification id must not be empty".into()));
    }
    Ok(())
}
