//! Game session: turn rotation, scoring, and AI driving
//!
//! The session is the turn controller from the board's point of view: it
//! owns the players, watches the board's event stream, updates scores and
//! move counts, advances the turn on a failed resolution ("go again" on a
//! match), and plays for any computer-controlled player by forwarding the
//! AI's chosen positions to the board as if they were clicks.
//!
//! Timing is owned by the driver: the session exposes
//! [`GameSession::resolution_pending`] and the configured delays, and the
//! driver (the terminal front end, a test, a benchmark) decides when to
//! call [`GameSession::resolve`] and when to confirm staggered deals.

use crate::core::{deck, Player, SYMBOL_PALETTE};
use crate::game::ai_controller::AiController;
use crate::game::board::{Board, BoardPhase};
use crate::game::difficulty::GridSpec;
use crate::game::events::{BoardEvent, EventSink, NullSink};
use crate::highscores::{HighscoreEntry, HighscoreStore};
use crate::{MemoryError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::time::{Duration, Instant};

/// Delay between the second flip and its resolution
pub const DEFAULT_RESOLUTION_DELAY: Duration = Duration::from_millis(1000);

/// Delay between consecutive card deals
pub const DEFAULT_DEAL_STAGGER: Duration = Duration::from_millis(200);

/// One player slot in a [`GameConfig`]
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub name: String,
    pub is_human: bool,
}

impl PlayerConfig {
    pub fn human(name: impl Into<String>) -> Self {
        PlayerConfig {
            name: name.into(),
            is_human: true,
        }
    }

    pub fn computer(name: impl Into<String>) -> Self {
        PlayerConfig {
            name: name.into(),
            is_human: false,
        }
    }
}

/// Full configuration for one game session
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub columns: usize,
    pub rows: usize,
    pub pair_count: usize,
    pub players: Vec<PlayerConfig>,
    pub resolution_delay: Duration,
    pub deal_stagger: Duration,
}

impl GameConfig {
    /// Configuration from a difficulty grid preset
    pub fn from_grid(grid: GridSpec, players: Vec<PlayerConfig>) -> Self {
        GameConfig {
            columns: grid.columns,
            rows: grid.rows,
            pair_count: grid.pairs,
            players,
            resolution_delay: DEFAULT_RESOLUTION_DELAY,
            deal_stagger: DEFAULT_DEAL_STAGGER,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.players.is_empty() {
            return Err(MemoryError::Configuration(
                "at least one player is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone)]
pub struct GameResult {
    /// The winning player (first in list order on score ties)
    pub winner: Player,
    pub winner_index: usize,
    /// Play time from deal completion to board clear
    pub elapsed: Duration,
}

/// A single game session
///
/// Exclusively owns its board, players, AI memory and RNG; `start` fully
/// replaces the board and AI memory, so one session can host consecutive
/// games (play again) without leaking knowledge between them.
pub struct GameSession {
    config: GameConfig,
    players: Vec<Player>,
    current_player: usize,
    board: Option<Board>,
    /// One shared card memory serves every computer player, mirroring what
    /// a table of humans watching the same reveals would each know.
    ai: Option<AiController>,
    rng: ChaCha12Rng,
    sink: Box<dyn EventSink>,
    highscores: Option<HighscoreStore>,
    started_at: Option<Instant>,
    result: Option<GameResult>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_sink(config, Box::new(NullSink))
    }

    /// Create a session that forwards every board event to `sink`
    pub fn with_sink(config: GameConfig, sink: Box<dyn EventSink>) -> Result<Self> {
        config.validate()?;
        let players = config
            .players
            .iter()
            .map(|p| Player::new(p.name.clone(), p.is_human))
            .collect();

        Ok(GameSession {
            config,
            players,
            current_player: 0,
            board: None,
            ai: None,
            rng: ChaCha12Rng::from_entropy(),
            sink,
            highscores: None,
            started_at: None,
            result: None,
        })
    }

    /// Seed the session RNG for deterministic deals and AI games
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Attach the highscore store consumed at game end
    pub fn attach_highscores(&mut self, store: HighscoreStore) {
        self.highscores = Some(store);
    }

    pub fn highscores(&self) -> Option<&HighscoreStore> {
        self.highscores.as_ref()
    }

    /// Start (or restart) a game
    ///
    /// Builds a freshly shuffled deck, replaces the board and the AI
    /// memory, resets every player, and announces the deal. The deal must
    /// then be confirmed card by card ([`confirm_dealt`]) or all at once
    /// ([`skip_deal_animation`]).
    ///
    /// [`confirm_dealt`]: GameSession::confirm_dealt
    /// [`skip_deal_animation`]: GameSession::skip_deal_animation
    pub fn start(&mut self) -> Result<()> {
        let cards = deck::build(self.config.pair_count, &SYMBOL_PALETTE, &mut self.rng)?;
        let mut board = Board::new(self.config.columns, self.config.rows, cards)?;

        for player in &mut self.players {
            player.reset();
        }
        self.current_player = 0;
        self.started_at = None;
        self.result = None;
        self.ai = if self.players.iter().any(|p| !p.is_human) {
            Some(AiController::new(board.card_count()))
        } else {
            None
        };

        board.deal();
        self.board = Some(board);
        self.pump_events()
    }

    /// Positions still waiting for their deal confirmation
    pub fn pending_deals(&self) -> Vec<usize> {
        self.board
            .as_ref()
            .map(Board::pending_deals)
            .unwrap_or_default()
    }

    /// Confirm one card's deal animation finished
    ///
    /// When the last card is confirmed the play clock starts, and if the
    /// opening player is computer-controlled its turn begins.
    pub fn confirm_dealt(&mut self, position: usize) -> Result<()> {
        let board = self.board_mut()?;
        board.confirm_dealt(position);
        let ready = board.phase() == BoardPhase::Ready;
        self.pump_events()?;

        if ready && self.started_at.is_none() {
            self.started_at = Some(Instant::now());
            self.run_ai_turn()?;
        }
        Ok(())
    }

    /// Confirm every pending deal in one step
    pub fn skip_deal_animation(&mut self) -> Result<()> {
        for position in self.pending_deals() {
            self.confirm_dealt(position)?;
        }
        Ok(())
    }

    /// Handle a flip request from the human input layer
    ///
    /// Ignored while a computer player holds the turn (the input surface
    /// is disabled for AI turns) and after the game has finished.
    pub fn flip(&mut self, position: usize) -> Result<()> {
        if self.is_finished() || !self.players[self.current_player].is_human {
            return Ok(());
        }
        self.board_mut()?.flip(position)?;
        self.pump_events()
    }

    /// True while a two-card selection awaits [`GameSession::resolve`]
    pub fn resolution_pending(&self) -> bool {
        self.board
            .as_ref()
            .map(Board::resolution_pending)
            .unwrap_or(false)
    }

    /// Fire the pending resolution
    ///
    /// The driver calls this once the resolution delay has elapsed. If the
    /// turn passes to (or stays with) a computer player, its flips happen
    /// here, leaving either another pending resolution or a finished game.
    pub fn resolve(&mut self) -> Result<()> {
        self.board_mut()?.resolve()?;
        self.pump_events()?;
        self.run_ai_turn()
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn resolution_delay(&self) -> Duration {
        self.config.resolution_delay
    }

    pub fn deal_stagger(&self) -> Duration {
        self.config.deal_stagger
    }

    /// Rename a player (names stay editable between and during games)
    pub fn rename_player(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let player = self.players.get_mut(index).ok_or_else(|| {
            MemoryError::Configuration(format!("no player at index {index}"))
        })?;
        player.name = name.into();
        Ok(())
    }

    /// Record the finished game's winner into the highscore table
    ///
    /// The entry name is editable; `None` keeps the winner's player name.
    pub fn submit_highscore(&mut self, name: Option<&str>) -> Result<()> {
        let result = self.result.as_ref().ok_or_else(|| {
            MemoryError::State("cannot submit a highscore before the game ends".to_string())
        })?;
        let store = self.highscores.as_mut().ok_or_else(|| {
            MemoryError::State("no highscore store attached".to_string())
        })?;

        let name = name.unwrap_or(&result.winner.name).to_string();
        store.insert(HighscoreEntry {
            name,
            score: result.winner.score,
        })
    }

    fn board_mut(&mut self) -> Result<&mut Board> {
        self.board.as_mut().ok_or_else(|| {
            MemoryError::State("game has not been started".to_string())
        })
    }

    /// Drain board events and fan them out: AI memory first, then the
    /// presentation sink, then the turn/score bookkeeping.
    fn pump_events(&mut self) -> Result<()> {
        let events = match self.board.as_mut() {
            Some(board) => board.drain_events(),
            None => return Ok(()),
        };

        for event in events {
            if let Some(ai) = self.ai.as_mut() {
                ai.observe(&event);
            }
            self.sink.on_event(&event);

            match event {
                BoardEvent::MoveResolved { success } => {
                    self.players[self.current_player].add_moves(1);
                    if success {
                        self.players[self.current_player].add_score(1);
                    } else {
                        self.current_player = (self.current_player + 1) % self.players.len();
                    }
                }
                BoardEvent::BoardCleared => self.finish_game(),
                _ => {}
            }
        }
        Ok(())
    }

    fn finish_game(&mut self) {
        let elapsed = self
            .started_at
            .map(|start| start.elapsed())
            .unwrap_or_default();

        let mut winner_index = 0;
        for (index, player) in self.players.iter().enumerate() {
            if player.score > self.players[winner_index].score {
                winner_index = index;
            }
        }

        self.result = Some(GameResult {
            winner: self.players[winner_index].clone(),
            winner_index,
            elapsed,
        });
    }

    /// Let computer players flip until a resolution is pending or the
    /// board is cleared
    fn run_ai_turn(&mut self) -> Result<()> {
        loop {
            if self.is_finished()
                || self.players[self.current_player].is_human
                || self.resolution_pending()
            {
                return Ok(());
            }

            let ai = self.ai.as_mut().ok_or_else(|| {
                MemoryError::State("computer player has no AI controller".to_string())
            })?;
            let choice = ai.choose_card(&mut self.rng)?;

            let board = self.board.as_mut().ok_or_else(|| {
                MemoryError::State("game has not been started".to_string())
            })?;
            let selected_before = board.selection_len();
            board.flip(choice)?;
            if board.selection_len() == selected_before {
                // The heuristic only proposes face-down, unselected cards;
                // a rejected flip here means its memory diverged from the
                // board, which would loop forever if ignored.
                return Err(MemoryError::State(format!(
                    "AI chose unflippable position {choice}"
                )));
            }
            self.pump_events()?;
        }
    }
}

/// Format a play duration as `mm:ss`, dropping fractional seconds
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
