//! Test helpers for integration tests
//!
//! Builds contexts on a manual clock and drains event streams.

use std::sync::Arc;

use board_common::{BoardConfig, StoreConfig, UnreadCountPolicy};
use board_core::BoardEvent;
use board_state::{BoardContext, FixedClock};
use tokio::sync::broadcast;

use crate::fixtures::epoch;

/// Context plus the clock driving it
pub struct TestBoard {
    pub ctx: BoardContext,
    pub clock: Arc<FixedClock>,
}

impl TestBoard {
    /// Lenient lookups, corrected unread counting
    pub fn start() -> Self {
        Self::with_store(StoreConfig::default())
    }

    /// Lenient lookups with the given unread policy
    pub fn with_policy(policy: UnreadCountPolicy) -> Self {
        Self::with_store(StoreConfig {
            unread_policy: policy,
            ..StoreConfig::default()
        })
    }

    /// Strict lookups, corrected unread counting
    pub fn strict() -> Self {
        Self::with_store(StoreConfig {
            strict_lookups: true,
            ..StoreConfig::default()
        })
    }

    pub fn with_store(store: StoreConfig) -> Self {
        let clock = FixedClock::new_shared(epoch());
        let config = BoardConfig {
            store,
            ..BoardConfig::default()
        };
        Self {
            ctx: BoardContext::with_clock(config, clock.clone()),
            clock,
        }
    }
}

/// Collect every event currently buffered, as type names
pub fn drain_event_types(rx: &mut broadcast::Receiver<BoardEvent>) -> Vec<&'static str> {
    std::iter::from_fn(|| rx.try_recv().ok())
        .map(|event| event.event_type())
        .collect()
}
