//! Configuration structs

mod board_config;

pub use board_config::{
    AppSettings, BoardConfig, ConfigError, Environment, StoreConfig, UnreadCountPolicy,
};
