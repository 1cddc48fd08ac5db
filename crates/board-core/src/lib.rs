//! # board-core
//!
//! Domain layer for the Ideation Board collaboration state: presence and
//! notification records, identifier value objects, and change events.
//! This crate has no dependency on the stores that hold these records.

pub mod entities;
pub mod error;
pub mod events;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Notification, NotificationType, PresenceUpdate, UserPresence, UserStatus};
pub use error::{DomainError, DomainResult};
pub use events::BoardEvent;
pub use value_objects::{BoardId, CardId, ColumnId, IdParseError, NotificationId, UserId};
