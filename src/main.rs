//! dlgo-rust: a Go engine driven by PUCT tree search.
//!
//! ## Usage
//!
//! - `dlgo-rust` - Start GTP server (same as `dlgo-rust gtp`)
//! - `dlgo-rust gtp` - Start GTP server for GUI integration
//! - `dlgo-rust demo` - Play a few moves and run one search

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

use dlgo_rust::board::Board;
use dlgo_rust::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_KOMI, DEFAULT_PLAYOUTS, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
    RESIGN_THRESHOLD,
};
use dlgo_rust::evaluator::{Evaluator, UniformEvaluator};
use dlgo_rust::gtp::GtpEngine;
use dlgo_rust::mcts::{Search, SearchConfig};
use dlgo_rust::playout::RolloutEvaluator;
use dlgo_rust::time_control::TimeControl;

/// dlgo-rust: a Go engine driven by PUCT tree search
#[derive(Parser)]
#[command(name = "dlgo-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Maximum number of simulations per move
    #[arg(long, global = true, default_value_t = DEFAULT_PLAYOUTS)]
    playouts: usize,

    /// Resign when the best move's win rate drops below this
    #[arg(long, global = true, default_value_t = RESIGN_THRESHOLD)]
    resign_threshold: f32,

    /// Komi for new games
    #[arg(long, global = true, default_value_t = DEFAULT_KOMI)]
    komi: f32,

    /// Board size for new games
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_BOARD_SIZE,
        value_parser = parse_board_size
    )]
    boardsize: usize,

    /// Position evaluator
    #[arg(long, global = true, value_enum, default_value_t = EvaluatorKind::Rollout)]
    evaluator: EvaluatorKind,

    /// Seed for the rollout evaluator
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug logging, including search tree summaries
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Run a simple demo of the engine
    Demo,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EvaluatorKind {
    /// Equal priors, neutral value
    Uniform,
    /// Equal priors, value from one random playout
    Rollout,
}

fn parse_board_size(s: &str) -> Result<usize, String> {
    let size: usize = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!(
            "board size must be between {MIN_BOARD_SIZE} and {MAX_BOARD_SIZE}"
        ))
    }
}

impl Cli {
    fn evaluator(&self) -> Box<dyn Evaluator> {
        match (self.evaluator, self.seed) {
            (EvaluatorKind::Uniform, _) => Box::new(UniformEvaluator::new()),
            (EvaluatorKind::Rollout, Some(seed)) => Box::new(RolloutEvaluator::new(seed)),
            (EvaluatorKind::Rollout, None) => Box::new(RolloutEvaluator::default()),
        }
    }

    fn search_config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_playouts(self.playouts)
            .with_resign_threshold(self.resign_threshold)
            .with_verbose(self.verbose)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol, so logs go to stderr.
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.command {
        Some(Commands::Gtp) | None => {
            let mut engine = GtpEngine::new(cli.evaluator(), cli.search_config())
                .with_board(cli.boardsize, cli.komi);
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Demo) => run_demo(&cli)?,
    }
    Ok(())
}

fn run_demo(cli: &Cli) -> Result<()> {
    println!("dlgo-rust: Go engine demo\n");

    let mut board = Board::new(cli.boardsize, cli.komi);
    for mv in ["C3", "G7", "C7"] {
        let vertex = board.text_to_vertex(mv);
        if !board.play(vertex) {
            anyhow::bail!("demo move {mv} is not playable on a {0}x{0} board", cli.boardsize);
        }
    }
    println!("{board}");

    let evaluator = cli.evaluator();
    let config = cli.search_config();
    let mut clock = TimeControl::new();
    println!("Running {} simulations...", config.playouts);
    let result = Search::new(&board, evaluator.as_ref(), &mut clock, &config)
        .think()
        .context("search failed")?;

    println!("Best move: {}", board.vertex_to_text(result.best_move));
    println!("Playouts: {}", result.playouts);
    println!("Win rate: {:.1}%", result.winrate * 100.0);
    Ok(())
}
