//! Computer player controller
//!
//! Implements a least-information heuristic: the controller only ever
//! remembers symbols it has seen announced through `CardFlipped`, so it
//! never knows more than a human watching the same game would.
//!
//! When it is the AI's turn:
//! 1. If two known cards form a pair, flip the first of the earliest such
//!    pair (earliest `i`, then earliest `j > i`, in position order).
//! 2. Otherwise flip a random card that has not been seen yet.
//! 3. For the second card: flip the known partner if one exists, else a
//!    random already-seen card, else a random unseen card.

use crate::core::Symbol;
use crate::game::events::BoardEvent;
use crate::{MemoryError, Result};
use rand::Rng;
use smallvec::SmallVec;

/// What the AI knows about one board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Knowledge {
    /// Never seen face up
    #[default]
    Unknown,
    /// Seen face up at least once
    Known(Symbol),
    /// Matched and gone; no longer choosable
    Removed,
}

/// Card memory for computer-controlled players
///
/// One controller instance observes the whole game and serves every
/// computer player in it; memory resets only when a new game starts.
#[derive(Debug)]
pub struct AiController {
    memory: Vec<Knowledge>,
    /// Positions flipped face up for the current pending resolution (0-2)
    active_reveals: SmallVec<[usize; 2]>,
}

impl AiController {
    pub fn new(card_count: usize) -> Self {
        AiController {
            memory: vec![Knowledge::default(); card_count],
            active_reveals: SmallVec::new(),
        }
    }

    /// Update memory from a board event
    ///
    /// Only `CardFlipped`, `CardRemoved` and `MoveResolved` carry
    /// information the AI may use; everything else is ignored.
    pub fn observe(&mut self, event: &BoardEvent) {
        match *event {
            BoardEvent::CardFlipped { position, symbol } => {
                if let Some(slot) = self.memory.get_mut(position) {
                    *slot = Knowledge::Known(symbol);
                }
                if !self.active_reveals.contains(&position) {
                    self.active_reveals.push(position);
                }
            }
            BoardEvent::CardRemoved { position } => {
                if let Some(slot) = self.memory.get_mut(position) {
                    *slot = Knowledge::Removed;
                }
                self.active_reveals.retain(|&mut p| p != position);
            }
            BoardEvent::MoveResolved { .. } => {
                self.active_reveals.clear();
            }
            _ => {}
        }
    }

    /// True while the controller still owes a flip for the current pair
    pub fn wants_another_flip(&self) -> bool {
        self.active_reveals.len() < 2
    }

    /// Pick the next position to flip
    ///
    /// `NoMovesAvailable` is a defensive invariant check; it cannot occur
    /// while unresolved cards remain on the board.
    pub fn choose_card(&mut self, rng: &mut impl Rng) -> Result<usize> {
        let known: Vec<usize> = self
            .candidates()
            .filter(|&p| matches!(self.memory[p], Knowledge::Known(_)))
            .collect();
        let unknown: Vec<usize> = self
            .candidates()
            .filter(|&p| self.memory[p] == Knowledge::Unknown)
            .collect();

        match self.active_reveals.as_slice() {
            // Second flip: prefer the guaranteed partner, then probe a
            // known-but-non-matching card the way a guessing human would.
            &[revealed] => {
                if let Knowledge::Known(target) = self.memory[revealed] {
                    if let Some(&partner) = known
                        .iter()
                        .find(|&&p| self.memory[p] == Knowledge::Known(target))
                    {
                        return Ok(partner);
                    }
                }
                Self::pick_random(&known, rng)
                    .or_else(|| Self::pick_random(&unknown, rng))
                    .ok_or(MemoryError::NoMovesAvailable)
            }

            // First flip: uncover a remembered pair if one exists.
            &[] => {
                for (offset, &first) in known.iter().enumerate() {
                    for &second in &known[offset + 1..] {
                        if self.memory[first] == self.memory[second] {
                            return Ok(first);
                        }
                    }
                }
                Self::pick_random(&unknown, rng)
                    .or_else(|| Self::pick_random(&known, rng))
                    .ok_or(MemoryError::NoMovesAvailable)
            }

            _ => Err(MemoryError::State(
                "choose_card called with two reveals already active".to_string(),
            )),
        }
    }

    /// Choosable positions: not removed and not already revealed this turn
    fn candidates(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.memory.len()).filter(|&p| {
            self.memory[p] != Knowledge::Removed && !self.active_reveals.contains(&p)
        })
    }

    fn pick_random(positions: &[usize], rng: &mut impl Rng) -> Option<usize> {
        if positions.is_empty() {
            None
        } else {
            Some(positions[rng.gen_range(0..positions.len())])
        }
    }
}
