//! Change events emitted by the collaboration stores

mod board_event;

pub use board_event::BoardEvent;
