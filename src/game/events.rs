//! Engine events and the observer seam
//!
//! The engine informs collaborators (presentation layers, the AI memory)
//! through a typed event stream instead of direct callbacks. The board
//! queues events as state changes happen; the session drains the queue and
//! fans each event out to its subscribers.

use crate::core::Symbol;
use std::cell::RefCell;
use std::rc::Rc;

/// A state change announced by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A card started its (possibly staggered) deal animation
    DealStarted {
        position: usize,
        stagger_index: usize,
    },

    /// A card finished arriving on the board
    DealCompleted { position: usize },

    /// A card was turned face up
    CardFlipped { position: usize, symbol: Symbol },

    /// A card was part of a successful match
    CardMatched { position: usize },

    /// A matched card left play (hook for exit animations)
    CardRemoved { position: usize },

    /// A two-card selection was resolved
    MoveResolved { success: bool },

    /// Every card is matched; fires exactly once per game
    BoardCleared,
}

/// How much of the event stream a presentation sink should narrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VerbosityLevel {
    /// No output during the game
    Silent = 0,
    /// Only the outcome
    Minimal = 1,
    /// Flips, resolutions, and the clear (default)
    #[default]
    Normal = 2,
    /// Everything, including deal progress
    Verbose = 3,
}

/// Consumer of board events
///
/// Implement this to connect a presentation layer (renderer, sound,
/// terminal output) to the engine. Event delivery is synchronous and
/// in emission order.
pub trait EventSink {
    fn on_event(&mut self, event: &BoardEvent);
}

/// Sink that discards every event
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &BoardEvent) {}
}

/// Sink that records events for later inspection (used by tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<BoardEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far
    pub fn events(&self) -> Vec<BoardEvent> {
        self.events.borrow().clone()
    }

    /// Count events matching a predicate
    pub fn count(&self, predicate: impl Fn(&BoardEvent) -> bool) -> usize {
        self.events
            .borrow()
            .iter()
            .copied()
            .filter(|event| predicate(event))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn on_event(&mut self, event: &BoardEvent) {
        self.events.borrow_mut().push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_shares_storage_across_clones() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();
        handle.on_event(&BoardEvent::BoardCleared);

        assert_eq!(sink.events(), vec![BoardEvent::BoardCleared]);
        assert_eq!(sink.count(|e| matches!(e, BoardEvent::BoardCleared)), 1);
    }
}
