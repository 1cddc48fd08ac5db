//! User presence entity - who is on the board and where they are looking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::value_objects::{CardId, ColumnId, UserId};

/// User online status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// User has the board open
    Online,
    /// User left or went idle long enough to be dropped
    #[default]
    Offline,
}

impl UserStatus {
    /// Check if this status should show an avatar on the board
    #[must_use]
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

/// A collaborator's presence on the board
///
/// `current_card` and `current_column` are plain references; nothing checks
/// that the card or column still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPresence {
    #[validate(custom(function = "validate_user_id"))]
    pub id: UserId,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    pub last_seen: DateTime<Utc>,

    pub status: UserStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_card: Option<CardId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_column: Option<ColumnId>,
}

impl UserPresence {
    /// Create an online presence record seen now
    pub fn new(id: impl Into<UserId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            avatar: None,
            last_seen: Utc::now(),
            status: UserStatus::Online,
            current_card: None,
            current_column: None,
        }
    }

    /// Set the avatar reference
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Set the status
    #[must_use]
    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the card/column focus
    #[must_use]
    pub fn with_focus(mut self, card: Option<CardId>, column: Option<ColumnId>) -> Self {
        self.current_card = card;
        self.current_column = column;
        self
    }

    /// Set the last-seen timestamp
    #[must_use]
    pub fn with_last_seen(mut self, last_seen: DateTime<Utc>) -> Self {
        self.last_seen = last_seen;
        self
    }

    /// Check if the user is looking at the given card
    pub fn is_on_card(&self, card_id: &CardId) -> bool {
        self.current_card.as_ref() == Some(card_id)
    }

    /// Check if the user is looking at the given column
    pub fn is_in_column(&self, column_id: &ColumnId) -> bool {
        self.current_column.as_ref() == Some(column_id)
    }

    /// Shallow-merge `update` into this record and stamp `last_seen`.
    ///
    /// Any `last_seen` carried by the update is ignored; `now` always wins.
    pub fn apply(&mut self, update: &PresenceUpdate, now: DateTime<Utc>) {
        if let Some(email) = &update.email {
            self.email.clone_from(email);
        }
        if let Some(avatar) = &update.avatar {
            self.avatar.clone_from(avatar);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(card) = &update.current_card {
            self.current_card.clone_from(card);
        }
        if let Some(column) = &update.current_column {
            self.current_column.clone_from(column);
        }
        self.last_seen = now;
    }
}

fn validate_user_id(id: &UserId) -> Result<(), ValidationError> {
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::new("empty_id").with_message("User id must not be empty".into()));
    }
    Ok(())
}

/// Partial presence update
///
/// `None` leaves a field untouched. For the optional fields the inner
/// `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceUpdate {
    pub email: Option<String>,
    pub avatar: Option<Option<String>>,
    pub status: Option<UserStatus>,
    pub current_card: Option<Option<CardId>>,
    pub current_column: Option<Option<ColumnId>>,
    /// Accepted for shape compatibility; always replaced by the store clock.
    pub last_seen: Option<DateTime<Utc>>,
}

impl PresenceUpdate {
    /// Create an empty update (only touches `last_seen`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the status
    #[must_use]
    pub fn status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Change the display email
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Replace or clear the avatar
    #[must_use]
    pub fn avatar(mut self, avatar: Option<String>) -> Self {
        self.avatar = Some(avatar);
        self
    }

    /// Replace or clear the focused card
    #[must_use]
    pub fn card(mut self, card: Option<CardId>) -> Self {
        self.current_card = Some(card);
        self
    }

    /// Replace or clear the focused column
    #[must_use]
    pub fn column(mut self, column: Option<ColumnId>) -> Self {
        self.current_column = Some(column);
        self
    }

    /// Carry a caller-supplied timestamp (overridden when applied)
    #[must_use]
    pub fn last_seen(mut self, last_seen: DateTime<Utc>) -> Self {
        self.last_seen = Some(last_seen);
        self
    }

    /// Check if no field other than `last_seen` would change
    pub fn is_touch_only(&self) -> bool {
        self.email.is_none()
            && self.avatar.is_none()
            && self.status.is_none()
            && self.current_card.is_none()
            && self.current_column.is_none()
    }
}
