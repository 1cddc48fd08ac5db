//! Domain entities - the records held by the collaboration stores

mod notification;
mod presence;

pub use notification::{Notification, NotificationType};
pub use presence::{PresenceUpdate, UserPresence, UserStatus};
