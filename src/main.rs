//! Memory Match - terminal front end
//!
//! Presentation glue around the engine: renders the board as a text grid,
//! reads flip positions from stdin, drives the deal stagger and the
//! resolution delay with real timers, and shows the highscore table.

use clap::{Parser, Subcommand, ValueEnum};
use memory_match_rs::{
    core::CardState,
    game::{
        format_elapsed, BoardEvent, Difficulty, EventSink, GameConfig, GameSession, PlayerConfig,
        VerbosityLevel,
    },
    highscores::{HighscoreStore, JsonFileBackend},
    Result,
};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Difficulty tier argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    /// 6x5 grid, 15 pairs
    Easy,
    /// 8x5 grid, 20 pairs
    Medium,
    /// 9x6 grid, 25 pairs
    Hard,
    /// 10x7 grid, 35 pairs
    ExtraHard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::ExtraHard => Difficulty::ExtraHard,
        }
    }
}

#[derive(Parser)]
#[command(name = "memory-match")]
#[command(about = "Memory Match - turn-based concentration card game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        /// Difficulty tier
        #[arg(long, short = 'd', value_enum, default_value = "easy")]
        difficulty: DifficultyArg,

        /// Human player name (repeat for multiple players)
        #[arg(long = "player", value_name = "NAME")]
        players: Vec<String>,

        /// Number of computer players
        #[arg(long, default_value_t = 0)]
        computers: usize,

        /// Swap grid columns and rows (for tall terminal windows)
        #[arg(long)]
        portrait: bool,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the staggered deal and resolution delays
        #[arg(long)]
        fast: bool,

        /// Directory holding the highscore file
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        /// Number of entries kept in the highscore table
        #[arg(long, default_value_t = 10)]
        max_highscores: usize,

        /// Verbosity level for event output
        #[arg(long, value_enum, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Show the persisted highscore table
    Highscores {
        /// Directory holding the highscore file
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },
}

/// Verbosity argument wrapper for clap
#[derive(Debug, Clone, Copy, ValueEnum)]
enum VerbosityArg {
    Silent,
    Minimal,
    Normal,
    Verbose,
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        match arg {
            VerbosityArg::Silent => VerbosityLevel::Silent,
            VerbosityArg::Minimal => VerbosityLevel::Minimal,
            VerbosityArg::Normal => VerbosityLevel::Normal,
            VerbosityArg::Verbose => VerbosityLevel::Verbose,
        }
    }
}

/// Event sink that narrates the game on stdout
struct TextSink {
    verbosity: VerbosityLevel,
}

impl EventSink for TextSink {
    fn on_event(&mut self, event: &BoardEvent) {
        if self.verbosity < VerbosityLevel::Normal {
            return;
        }
        match *event {
            BoardEvent::CardFlipped { position, symbol } => {
                println!("  card {position} shows '{symbol}'");
            }
            BoardEvent::CardMatched { position } => {
                if self.verbosity >= VerbosityLevel::Verbose {
                    println!("  card {position} matched");
                }
            }
            BoardEvent::MoveResolved { success } => {
                println!("  {}", if success { "match!" } else { "no match" });
            }
            BoardEvent::BoardCleared => println!("Board cleared!"),
            BoardEvent::DealStarted { position, .. } => {
                if self.verbosity >= VerbosityLevel::Verbose {
                    println!("  dealing card {position}");
                }
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            difficulty,
            players,
            computers,
            portrait,
            seed,
            fast,
            data_dir,
            max_highscores,
            verbosity,
        } => {
            run_play(
                difficulty.into(),
                players,
                computers,
                portrait,
                seed,
                fast,
                data_dir,
                max_highscores,
                verbosity.into(),
            )
            .await
        }
        Commands::Highscores { data_dir } => show_highscores(&data_dir),
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_play(
    difficulty: Difficulty,
    player_names: Vec<String>,
    computers: usize,
    portrait: bool,
    seed: Option<u64>,
    fast: bool,
    data_dir: PathBuf,
    max_highscores: usize,
    verbosity: VerbosityLevel,
) -> Result<()> {
    let mut grid = difficulty.grid();
    if portrait {
        grid = grid.transposed();
    }

    let mut players: Vec<PlayerConfig> = player_names
        .iter()
        .map(|name| PlayerConfig::human(name.clone()))
        .collect();
    if players.is_empty() && computers == 0 {
        players.push(PlayerConfig::human("Player 1"));
    }
    for n in 1..=computers {
        players.push(PlayerConfig::computer(format!("Computer {n}")));
    }

    let store =
        HighscoreStore::with_max_entries(Box::new(JsonFileBackend::new(&data_dir)), max_highscores)?;
    let sink = TextSink { verbosity };
    let mut session = GameSession::with_sink(GameConfig::from_grid(grid, players), Box::new(sink))?;
    session.attach_highscores(store);
    if let Some(seed) = seed {
        session.seed_rng(seed);
    }

    session.start()?;
    if fast {
        session.skip_deal_animation()?;
    } else {
        let stagger = session.deal_stagger();
        for position in session.pending_deals() {
            tokio::time::sleep(stagger).await;
            session.confirm_dealt(position)?;
        }
    }

    while !session.is_finished() {
        if session.resolution_pending() {
            if !fast {
                tokio::time::sleep(session.resolution_delay()).await;
            }
            session.resolve()?;
            continue;
        }

        render_board(&session);
        let player = session.current_player();
        println!(
            "{} (score {}) - pick a card, or q to quit:",
            player.name, player.score
        );
        match read_position()? {
            Some(position) => session.flip(position)?,
            None => return Ok(()),
        }
    }

    render_board(&session);
    let result = session.result().expect("finished game has a result").clone();
    println!(
        "{} won with {} pairs in {} moves - time {}",
        result.winner.name,
        result.winner.score,
        result.winner.moves,
        format_elapsed(result.elapsed)
    );

    println!("Name for the highscore table [{}]:", result.winner.name);
    let name = read_line()?;
    let name = name.trim();
    session.submit_highscore(if name.is_empty() { None } else { Some(name) })?;

    if let Some(store) = session.highscores() {
        print_table(store);
    }
    Ok(())
}

fn show_highscores(data_dir: &Path) -> Result<()> {
    let store = HighscoreStore::new(Box::new(JsonFileBackend::new(data_dir)))?;
    print_table(&store);
    Ok(())
}

fn print_table(store: &HighscoreStore) {
    println!("=== Highscores ===");
    if store.list().is_empty() {
        println!("(no entries yet)");
        return;
    }
    for (place, entry) in store.list().iter().enumerate() {
        println!("{:>2}. {:>4}  {}", place + 1, entry.score, entry.name);
    }
}

fn render_board(session: &GameSession) {
    let Some(board) = session.board() else {
        return;
    };
    println!();
    for row in 0..board.rows() {
        let mut line = String::new();
        for column in 0..board.columns() {
            let position = row * board.columns() + column;
            let cell = match board.card(position).map(|c| (c.state, c.symbol)) {
                Some((CardState::FaceDown, _)) => format!("[{position:>3}]"),
                Some((CardState::FaceUp, symbol)) => {
                    format!("{:>5}", truncate(symbol.name(), 5))
                }
                Some((CardState::Matched, _)) | None => "     ".to_string(),
            };
            line.push_str(&cell);
            line.push(' ');
        }
        println!("{line}");
    }
    println!();
}

fn truncate(name: &str, width: usize) -> &str {
    &name[..name.len().min(width)]
}

fn read_position() -> Result<Option<usize>> {
    loop {
        let line = read_line()?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match trimmed.parse::<usize>() {
            Ok(position) => return Ok(Some(position)),
            Err(_) => {
                print!("enter a card number: ");
                std::io::stdout().flush()?;
            }
        }
    }
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
