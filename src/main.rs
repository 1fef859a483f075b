//! Go-Board command line.
//!
//! ## Usage
//!
//! - `go-board` - Show a demo
//! - `go-board gtp` - Start a GTP server for GUI integration
//! - `go-board selfplay --games 20` - Play random games and print the tally

use std::io;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use go_board::constants::{DEFAULT_SIZE, MAX_GAME_LEN_FACTOR, MAX_SIZE, MIN_SIZE};
use go_board::gtp::GtpEngine;
use go_board::policy::{Action, Policy, RandomPolicy};
use go_board::session::{GameSession, MoveOutcome, PassOutcome};

/// Go-Board: placement, capture, ko and scoring for the game of Go
#[derive(Parser)]
#[command(name = "go-board")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board size
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Seed for random move generation
    #[arg(long)]
    seed: Option<u64>,

    /// Print diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Run a short demo of the rules engine
    Demo,
    /// Play random games against itself and report the win tally
    Selfplay {
        /// Number of games
        #[arg(long, default_value_t = 10)]
        games: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !(MIN_SIZE..=MAX_SIZE).contains(&cli.size) {
        bail!("board size must be between {MIN_SIZE} and {MAX_SIZE}, got {}", cli.size);
    }
    let session = GameSession::new(cli.size)?;

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::new(session, cli.seed, cli.verbose);
            engine
                .run(io::stdin().lock(), io::stdout().lock())
                .context("GTP session failed")?;
        }
        Some(Commands::Selfplay { games }) => run_selfplay(session, games, cli.seed, cli.verbose),
        Some(Commands::Demo) | None => run_demo(session),
    }
    Ok(())
}

fn run_demo(mut game: GameSession) {
    println!("Go-Board: rules engine demo\n");

    // Black plays (0,0), White surrounds and captures it
    for (x, y) in [(0, 0), (1, 0), (4, 4), (0, 1)] {
        let outcome = game.request_move(x, y);
        println!("{} at ({x},{y}): {outcome:?}", game.current_player().opponent());
    }
    println!("{}", game.position());

    // Black may not play back into the corner: suicide
    println!("Black at (0,0): {:?}", game.request_move(0, 0));

    game.request_pass();
    if let PassOutcome::Ended(result) = game.request_pass() {
        println!(
            "Score: black {} white {} -> {} ({} wins)",
            result.score.black, result.score.white, result.score, result.winner
        );
    }
}

fn run_selfplay(mut game: GameSession, games: u32, seed: Option<u64>, verbose: bool) {
    let mut policy = seed.map_or_else(RandomPolicy::new, RandomPolicy::with_seed);
    let size = game.position().size();
    let max_moves = size * size * MAX_GAME_LEN_FACTOR;

    for i in 0..games {
        game.restart();
        let mut moves = 0;
        while !game.is_over() && moves < max_moves {
            match policy.choose(game.position()) {
                Action::Play { x, y } => {
                    if let MoveOutcome::Rejected(err) = game.request_move(x, y) {
                        eprintln!("policy chose an illegal move ({x},{y}): {err}");
                        game.request_pass();
                    }
                }
                Action::Pass => {
                    game.request_pass();
                }
            }
            moves += 1;
        }
        let result = game.end_game();
        if verbose {
            eprintln!("game {}: {} after {moves} moves", i + 1, result.score);
            eprint!("{}", game.position());
        }
    }

    let tally = game.tally();
    println!(
        "{games} games on {size}x{size}: black {} white {}",
        tally.black_wins, tally.white_wins
    );
}
