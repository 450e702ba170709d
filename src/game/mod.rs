//! Board state machine, turn control, and the computer player

pub mod ai_controller;
pub mod board;
pub mod difficulty;
pub mod events;
pub mod session;

pub use ai_controller::AiController;
pub use board::{Board, BoardPhase};
pub use difficulty::{Difficulty, GridSpec};
pub use events::{BoardEvent, EventSink, NullSink, RecordingSink, VerbosityLevel};
pub use session::{
    format_elapsed, GameConfig, GameResult, GameSession, PlayerConfig,
    DEFAULT_DEAL_STAGGER, DEFAULT_RESOLUTION_DELAY,
};
