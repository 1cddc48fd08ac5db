//! Notification store module.
//!
//! Mention inbox for the current user with an unread badge counter.

mod store;

pub use store::{NotificationSnapshot, NotificationStore};
