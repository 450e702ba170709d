//! Card representation
//!
//! Cards live in a flat arena owned by the board and are addressed by a
//! stable 0-based, row-major position. A matched card is never removed
//! from the arena; it is marked `Matched` and becomes unselectable.

use crate::core::Symbol;

/// Face state of a card on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    /// Face down, selectable
    #[default]
    FaceDown,
    /// Face up, awaiting resolution
    FaceUp,
    /// Matched and removed from play
    Matched,
}

/// A single card on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    /// Face symbol (immutable after the deal)
    pub symbol: Symbol,

    /// Stable row-major position on the board
    pub position: usize,

    /// Current face state
    pub state: CardState,
}

impl Card {
    pub fn new(symbol: Symbol, position: usize) -> Self {
        Card {
            symbol,
            position,
            state: CardState::FaceDown,
        }
    }

    pub fn is_face_down(&self) -> bool {
        self.state == CardState::FaceDown
    }

    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }
}
