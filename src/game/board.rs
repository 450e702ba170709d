//! Board match engine
//!
//! The board owns the card arena and the two-card selection/resolution
//! state machine. Lifecycle per game:
//!
//! ```text
//! Undealt -> Dealing -> Ready -> (Selecting <-> Resolving) -> Cleared
//! ```
//!
//! Timers live outside the engine: flipping the second card arms a single
//! pending resolution, and the driver fires it by calling [`Board::resolve`]
//! after its chosen delay (1000 ms by default in the session config). There
//! is no cancellation path; an armed resolution always fires and is the
//! only way out of `Resolving`.

use crate::core::{Card, CardState};
use crate::game::events::BoardEvent;
use crate::{MemoryError, Result};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Phase of the board state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPhase {
    /// Cards exist but have not been dealt
    Undealt,
    /// Deal announced, waiting for every per-card completion
    Dealing,
    /// Accepting the first flip of a pair
    Ready,
    /// One card selected, accepting the second flip
    Selecting,
    /// Two cards selected, resolution armed
    Resolving,
    /// Every card matched; the game is over
    Cleared,
}

/// The match engine: card arena plus selection state machine
#[derive(Debug)]
pub struct Board {
    columns: usize,
    rows: usize,
    cards: Vec<Card>,
    /// Ordered selection of 0-2 face-up, unmatched positions
    selection: SmallVec<[usize; 2]>,
    phase: BoardPhase,
    /// Positions announced by `deal` but not yet confirmed by the
    /// sequencing hook; the board is `Ready` once this barrier empties
    undealt: FxHashSet<usize>,
    /// Queued events awaiting `drain_events`
    events: Vec<BoardEvent>,
}

impl Board {
    /// Create a board for a dealt-out deck
    ///
    /// The grid must exactly hold the deck: `columns * rows == deck.len()`.
    pub fn new(columns: usize, rows: usize, deck: Vec<Card>) -> Result<Self> {
        if columns == 0 || rows == 0 || columns * rows != deck.len() {
            return Err(MemoryError::Configuration(format!(
                "{}x{} grid cannot hold {} cards",
                columns,
                rows,
                deck.len()
            )));
        }

        Ok(Board {
            columns,
            rows,
            cards: deck,
            selection: SmallVec::new(),
            phase: BoardPhase::Undealt,
            undealt: FxHashSet::default(),
            events: Vec::new(),
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Positions still waiting for their deal confirmation, in board order
    pub fn pending_deals(&self) -> Vec<usize> {
        let mut pending: Vec<usize> = self.undealt.iter().copied().collect();
        pending.sort_unstable();
        pending
    }

    /// True while a resolution is armed and must be fired via [`resolve`]
    ///
    /// [`resolve`]: Board::resolve
    pub fn resolution_pending(&self) -> bool {
        self.phase == BoardPhase::Resolving
    }

    pub fn is_cleared(&self) -> bool {
        self.phase == BoardPhase::Cleared
    }

    /// Announce the deal
    ///
    /// Emits `DealStarted(position, stagger_index)` for every card so a
    /// collaborator can animate cards arriving with its own stagger. The
    /// board stays in `Dealing` until every position has been confirmed
    /// through [`Board::confirm_dealt`]; callers without an animation use
    /// [`Board::deal_immediately`]. Calling `deal` after the cards are
    /// already out is a no-op.
    pub fn deal(&mut self) {
        if self.phase != BoardPhase::Undealt {
            return;
        }

        self.phase = BoardPhase::Dealing;
        for (stagger_index, card) in self.cards.iter().enumerate() {
            self.undealt.insert(card.position);
            self.events.push(BoardEvent::DealStarted {
                position: card.position,
                stagger_index,
            });
        }
    }

    /// Confirm that one card finished arriving (the sequencing hook)
    ///
    /// Unknown or repeated positions are ignored. Once all cards are
    /// confirmed the barrier opens and the board becomes `Ready`.
    pub fn confirm_dealt(&mut self, position: usize) {
        if self.phase != BoardPhase::Dealing || !self.undealt.remove(&position) {
            return;
        }

        self.events.push(BoardEvent::DealCompleted { position });
        if self.undealt.is_empty() {
            self.phase = BoardPhase::Ready;
        }
    }

    /// Deal and confirm every card in one step (no animation)
    pub fn deal_immediately(&mut self) {
        self.deal();
        for position in self.pending_deals() {
            self.confirm_dealt(position);
        }
    }

    /// Attempt to flip a card face up
    ///
    /// Flipping before the deal is a `State` error; every other invalid
    /// request (unknown position, matched or already-selected card, a
    /// third flip, a flip during `Resolving`) is silently ignored because
    /// it represents an expected user or timing race, not a fault.
    pub fn flip(&mut self, position: usize) -> Result<()> {
        if self.phase == BoardPhase::Undealt || self.phase == BoardPhase::Dealing {
            return Err(MemoryError::State(
                "cannot flip before the deal has completed".to_string(),
            ));
        }
        if self.phase != BoardPhase::Ready && self.phase != BoardPhase::Selecting {
            return Ok(());
        }
        debug_assert!(self.selection.len() < 2);

        let Some(card) = self.cards.get_mut(position) else {
            return Ok(());
        };
        if !card.is_face_down() || self.selection.contains(&position) {
            return Ok(());
        }

        card.state = CardState::FaceUp;
        let symbol = card.symbol;
        self.selection.push(position);
        self.events.push(BoardEvent::CardFlipped { position, symbol });

        // Arming happens only on the 0 -> 2 selection edge, so at most one
        // resolution is ever outstanding.
        self.phase = if self.selection.len() == 2 {
            BoardPhase::Resolving
        } else {
            BoardPhase::Selecting
        };

        Ok(())
    }

    /// Fire the armed resolution and evaluate the two selected cards
    ///
    /// Drivers call this when the resolution delay elapses. Calling it
    /// without an armed resolution is a `State` error.
    pub fn resolve(&mut self) -> Result<()> {
        if self.phase != BoardPhase::Resolving {
            return Err(MemoryError::State(
                "no resolution is pending".to_string(),
            ));
        }

        let (first, second) = (self.selection[0], self.selection[1]);
        let success = self.cards[first].symbol == self.cards[second].symbol;

        if success {
            for position in [first, second] {
                self.cards[position].state = CardState::Matched;
                self.events.push(BoardEvent::CardMatched { position });
                self.events.push(BoardEvent::CardRemoved { position });
            }
        } else {
            for position in [first, second] {
                self.cards[position].state = CardState::FaceDown;
            }
        }

        self.selection.clear();
        self.events.push(BoardEvent::MoveResolved { success });

        if self.cards.iter().all(Card::is_matched) {
            self.phase = BoardPhase::Cleared;
            self.events.push(BoardEvent::BoardCleared);
        } else {
            self.phase = BoardPhase::Ready;
        }

        Ok(())
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of currently selected positions (0-2)
    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    #[cfg(test)]
    fn selection(&self) -> &[usize] {
        &self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{deck, SYMBOL_PALETTE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn board_2x2() -> Board {
        let mut rng = ChaCha12Rng::seed_from_u64(5);
        let deck = deck::build(2, &SYMBOL_PALETTE, &mut rng).unwrap();
        Board::new(2, 2, deck).unwrap()
    }

    /// Positions of the two cards sharing the first card's symbol
    fn first_pair(board: &Board) -> (usize, usize) {
        let symbol = board.card(0).unwrap().symbol;
        let partner = board
            .cards()
            .iter()
            .skip(1)
            .find(|c| c.symbol == symbol)
            .unwrap()
            .position;
        (0, partner)
    }

    fn mismatched_pair(board: &Board) -> (usize, usize) {
        let symbol = board.card(0).unwrap().symbol;
        let other = board
            .cards()
            .iter()
            .skip(1)
            .find(|c| c.symbol != symbol)
            .unwrap()
            .position;
        (0, other)
    }

    #[test]
    fn test_grid_must_match_deck_size() {
        let mut rng = ChaCha12Rng::seed_from_u64(5);
        let deck = deck::build(2, &SYMBOL_PALETTE, &mut rng).unwrap();
        assert!(matches!(
            Board::new(3, 2, deck),
            Err(MemoryError::Configuration(_))
        ));
    }

    #[test]
    fn test_flip_before_deal_is_fatal() {
        let mut board = board_2x2();
        assert!(matches!(board.flip(0), Err(MemoryError::State(_))));
    }

    #[test]
    fn test_deal_barrier_opens_when_all_confirmed() {
        let mut board = board_2x2();
        board.deal();
        assert_eq!(board.phase(), BoardPhase::Dealing);
        assert_eq!(board.pending_deals(), vec![0, 1, 2, 3]);

        // Still dealing until the last confirmation
        board.confirm_dealt(0);
        board.confirm_dealt(2);
        board.confirm_dealt(2); // repeat is ignored
        assert!(matches!(board.flip(1), Err(MemoryError::State(_))));

        board.confirm_dealt(1);
        board.confirm_dealt(3);
        assert_eq!(board.phase(), BoardPhase::Ready);

        let events = board.drain_events();
        let started = events
            .iter()
            .filter(|e| matches!(e, BoardEvent::DealStarted { .. }))
            .count();
        let completed = events
            .iter()
            .filter(|e| matches!(e, BoardEvent::DealCompleted { .. }))
            .count();
        assert_eq!(started, 4);
        assert_eq!(completed, 4);
    }

    #[test]
    fn test_second_deal_is_ignored() {
        let mut board = board_2x2();
        board.deal_immediately();
        board.drain_events();

        board.deal();
        assert_eq!(board.phase(), BoardPhase::Ready);
        assert!(board.drain_events().is_empty());
    }

    #[test]
    fn test_selection_never_exceeds_two() {
        let mut board = board_2x2();
        board.deal_immediately();

        board.flip(0).unwrap();
        assert_eq!(board.phase(), BoardPhase::Selecting);
        board.flip(1).unwrap();
        assert_eq!(board.phase(), BoardPhase::Resolving);
        assert_eq!(board.selection().len(), 2);

        // Third flip while resolving is ignored
        board.flip(2).unwrap();
        assert_eq!(board.selection().len(), 2);
        assert!(board.card(2).unwrap().is_face_down());
    }

    #[test]
    fn test_same_card_cannot_be_selected_twice() {
        let mut board = board_2x2();
        board.deal_immediately();

        board.flip(0).unwrap();
        board.flip(0).unwrap();
        assert_eq!(board.selection(), &[0]);
    }

    #[test]
    fn test_mismatch_flips_back_and_reports_failure() {
        let mut board = board_2x2();
        board.deal_immediately();
        board.drain_events();

        let (a, b) = mismatched_pair(&board);
        board.flip(a).unwrap();
        board.flip(b).unwrap();
        board.resolve().unwrap();

        assert_eq!(board.phase(), BoardPhase::Ready);
        assert!(board.card(a).unwrap().is_face_down());
        assert!(board.card(b).unwrap().is_face_down());

        let events = board.drain_events();
        assert!(events.contains(&BoardEvent::MoveResolved { success: false }));
        assert!(!events.iter().any(|e| matches!(e, BoardEvent::CardMatched { .. })));
    }

    #[test]
    fn test_match_marks_cards_and_keeps_them_out_of_play() {
        let mut board = board_2x2();
        board.deal_immediately();
        board.drain_events();

        let (a, b) = first_pair(&board);
        board.flip(a).unwrap();
        board.flip(b).unwrap();
        board.resolve().unwrap();

        assert!(board.card(a).unwrap().is_matched());
        assert!(board.card(b).unwrap().is_matched());
        assert_eq!(board.phase(), BoardPhase::Ready);

        // Matched cards never re-enter the selection
        board.flip(a).unwrap();
        assert_eq!(board.selection().len(), 0);

        let events = board.drain_events();
        assert!(events.contains(&BoardEvent::MoveResolved { success: true }));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, BoardEvent::CardMatched { .. }))
                .count(),
            2
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, BoardEvent::CardRemoved { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_board_cleared_fires_exactly_once() {
        let mut board = board_2x2();
        board.deal_immediately();
        board.drain_events();

        // Clear the whole 2x2 board pair by pair
        let mut cleared = 0;
        while !board.is_cleared() {
            let next = board
                .cards()
                .iter()
                .find(|c| c.is_face_down())
                .unwrap()
                .position;
            let partner = board
                .cards()
                .iter()
                .find(|c| c.position != next && c.is_face_down()
                    && c.symbol == board.card(next).unwrap().symbol)
                .unwrap()
                .position;
            board.flip(next).unwrap();
            board.flip(partner).unwrap();
            board.resolve().unwrap();
            cleared += board
                .drain_events()
                .iter()
                .filter(|e| matches!(e, BoardEvent::BoardCleared))
                .count();
        }

        assert_eq!(cleared, 1);
        assert_eq!(board.phase(), BoardPhase::Cleared);

        // Flips after the game is over are ignored, and no resolution can fire
        board.flip(0).unwrap();
        assert!(matches!(board.resolve(), Err(MemoryError::State(_))));
    }

    #[test]
    fn test_resolve_without_pending_is_fatal() {
        let mut board = board_2x2();
        board.deal_immediately();
        assert!(matches!(board.resolve(), Err(MemoryError::State(_))));

        board.flip(0).unwrap();
        assert!(matches!(board.resolve(), Err(MemoryError::State(_))));
    }
}
