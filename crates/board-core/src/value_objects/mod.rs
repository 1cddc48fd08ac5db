//! Value objects - immutable types that represent domain concepts

mod ids;

pub use ids::{BoardId, CardId, ColumnId, IdParseError, NotificationId, UserId};
