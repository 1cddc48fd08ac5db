//! # board-state
//!
//! In-memory collaboration state for the Ideation Board client.
//!
//! ## Features
//!
//! - **Presence**: who is on the board, online status, and card/column focus
//! - **Notifications**: mention inbox with an incrementally maintained unread count
//! - **Observers**: snapshot subscriptions and a change-event stream per store
//! - **Context**: one owned container for both stores, built from config
//!
//! ## Example
//!
//! ```ignore
//! use board_state::BoardContext;
//! use board_common::BoardConfig;
//! use board_core::{Notification, UserPresence};
//!
//! let ctx = BoardContext::new(BoardConfig::from_env()?);
//!
//! ctx.join(UserPresence::new("u1", "ada@example.com"))?;
//! ctx.notify(Notification::mention("ada@example.com", "@ada look", "card-1", "board-1"))?;
//!
//! let mut badge = ctx.notifications().subscribe();
//! assert_eq!(badge.borrow_and_update().unread_count, 1);
//! ```

pub mod clock;
pub mod context;
pub mod notifications;
pub mod observer;
pub mod presence;

pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use context::BoardContext;
pub use notifications::{NotificationSnapshot, NotificationStore};
pub use observer::Observable;
pub use presence::{PresenceSnapshot, PresenceStore};
