//! Presence store module.
//!
//! Tracks which collaborators are on the board and where they are looking.

mod store;

pub use store::{PresenceSnapshot, PresenceStore};
