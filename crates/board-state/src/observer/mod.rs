//! Store observation
//!
//! Each store keeps its state inside a `watch` channel: the channel value is
//! the authoritative snapshot, mutations go through `send_if_modified`, and
//! subscribers see a new version only when something actually changed.
//! Deltas go out separately on a `broadcast` channel of [`BoardEvent`]s.

use board_core::BoardEvent;
use tokio::sync::{broadcast, watch};

/// Default capacity of the event channel
pub const DEFAULT_EVENT_BUFFER: usize = 256;

/// Observable state cell shared by the stores
pub struct Observable<S> {
    state: watch::Sender<S>,
    events: broadcast::Sender<BoardEvent>,
}

impl<S> Observable<S> {
    /// Create a cell holding `initial`
    pub fn new(initial: S, event_buffer: usize) -> Self {
        let (state, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(event_buffer.max(1));
        Self { state, events }
    }

    /// Read the current state without cloning it.
    ///
    /// `f` must not call back into the owning store's mutators.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.state.borrow())
    }

    /// Mutate the state.
    ///
    /// `f` returns `Some` when it changed something; only then are
    /// subscribers notified. The closure's output is handed back.
    pub fn update<R>(&self, f: impl FnOnce(&mut S) -> Option<R>) -> Option<R> {
        let mut outcome = None;
        self.state.send_if_modified(|state| {
            outcome = f(state);
            outcome.is_some()
        });
        outcome
    }

    /// Publish a change event. Having no listeners is fine.
    pub fn emit(&self, event: BoardEvent) {
        tracing::trace!(event_type = event.event_type(), "Emitting board event");
        let _ = self.events.send(event);
    }

    /// Subscribe to state snapshots
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    /// Subscribe to change events
    pub fn events(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Number of live snapshot subscribers
    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }
}

impl<S: Clone> Observable<S> {
    /// Clone out the current state
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }
}
