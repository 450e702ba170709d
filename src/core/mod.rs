//! Core game types

pub mod card;
pub mod deck;
pub mod player;
pub mod symbol;

pub use card::{Card, CardState};
pub use player::Player;
pub use symbol::{Symbol, SYMBOL_PALETTE};
