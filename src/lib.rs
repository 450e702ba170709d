//! Memory match game engine
//!
//! A turn-based memory-matching ("concentration") game engine: deck
//! construction, the two-card selection/resolution state machine,
//! multi-player turn rotation and scoring, a least-information AI
//! opponent, and a capped, stably-ranked highscore store. Rendering,
//! animation and input widgets are external collaborators reached
//! through the [`game::BoardEvent`] stream.

pub mod core;
pub mod error;
pub mod game;
pub mod highscores;

pub use error::{MemoryError, Result};
