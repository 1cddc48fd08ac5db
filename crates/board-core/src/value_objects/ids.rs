//! Opaque string identifiers for board entities
//!
//! Every id is a thin newtype over `String` so a card id can never be
//! passed where a user id is expected. Ids serialize as plain JSON strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error when parsing an identifier from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("identifier must not be empty")]
    Empty,
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an id from any string-like value
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw string
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Get the inner string
            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Check if the id is empty (uninitialized)
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Err(IdParseError::Empty)
                } else {
                    Ok(Self(trimmed.to_string()))
                }
            }
        }
    };
}

string_id!(
    /// Identity of a collaborator on the board
    UserId
);
string_id!(
    /// Identity of a single notification
    NotificationId
);
string_id!(
    /// A card on the board
    CardId
);
string_id!(
    /// A column on the board
    ColumnId
);
string_id!(
    /// A board
    BoardId
);

impl NotificationId {
    /// Generate a fresh random notification id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}
