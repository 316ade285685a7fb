//! Tsumego-Core: the board and transposition table of a tsumego solver.
//!
//! ## Usage
//!
//! - `tsumego show <file>` - Load a problem from SGF or text and describe it
//! - `tsumego bench` - Run random play/undo walks and report throughput

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::{Parser, Subcommand};

use tsumego_core::board::Board;
use tsumego_core::constants::MAX_SIZE;
use tsumego_core::setup::TextMode;
use tsumego_core::stone::{Color, Stone};

/// Tsumego-Core: incremental Go board for life-and-death search
#[derive(Parser)]
#[command(name = "tsumego")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a problem and print the board, its SGF and block statistics
    Show {
        /// An SGF record, or a text grid of X, O and -
        file: PathBuf,
        /// 1-based SGF variation to add on top of the root setup
        #[arg(long)]
        variation: Option<usize>,
        /// Print liberty counts instead of stones
        #[arg(long)]
        libs: bool,
    },
    /// Play random moves, undo them and check the board comes back intact
    Bench {
        /// Board size
        #[arg(long, default_value_t = 9)]
        size: usize,
        /// Number of walks
        #[arg(long, default_value_t = 10_000)]
        iterations: usize,
        /// Seed of the move generator
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Show {
            file,
            variation,
            libs,
        } => show(&file, variation, libs),
        Commands::Bench {
            size,
            iterations,
            seed,
        } => bench(size, iterations, seed),
    }
}

fn load(file: &Path, variation: Option<usize>) -> Result<Board> {
    let src = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    if src.trim_start().starts_with('(') {
        return Board::from_sgf(&src, variation)
            .with_context(|| format!("loading SGF from {}", file.display()));
    }

    ensure!(variation.is_none(), "variations need an SGF record");

    let rows: Vec<&str> = src.lines().filter(|l| !l.trim().is_empty()).collect();
    let width = rows
        .iter()
        .map(|r| r.chars().filter(|c| !c.is_whitespace()).count())
        .max()
        .unwrap_or(0);
    let size = rows.len().max(width);

    ensure!(size <= MAX_SIZE, "{} is {size}x{size}, above {MAX_SIZE}x{MAX_SIZE}", file.display());

    Board::from_rows(size, rows).with_context(|| format!("loading text from {}", file.display()))
}

fn show(file: &Path, variation: Option<usize>, libs: bool) -> Result<()> {
    let board = load(file, variation)?;

    let mode = TextMode {
        hide_labels: false,
        show_libs: libs,
    };

    println!("{}\n", board.to_text(mode));
    println!("{}", board.to_sgf());
    println!("hash: {:016x}", board.hash());

    for color in [Color::Black, Color::White] {
        let rect = board
            .rect(color)
            .map_or_else(|| "-".to_string(), |r| r.to_string());

        println!(
            "{color:?}: {} stones, {} blocks, {} libs, {} in atari, rect {rect}",
            board.nstones(color),
            board.nblocks(color),
            board.sumlibs(color),
            board.natari(color),
        );
    }

    Ok(())
}

fn bench(size: usize, iterations: usize, seed: u64) -> Result<()> {
    let mut board = Board::new(size)?;
    let mut rng = fastrand::Rng::with_seed(seed);

    // keeps every walk far below the block id limit
    let attempts = size * size / 2;
    let start = board.hash();
    let mut moves = 0u64;
    let timer = Instant::now();

    for i in 0..iterations {
        let mut color = Color::Black;

        for _ in 0..attempts {
            let s = Stone::new(rng.usize(..size), rng.usize(..size), color);

            if board.try_play(s).with_context(|| format!("walk {i}: {s}"))? == 0 {
                continue;
            }

            moves += 1;

            // take it back and play it again: served by the redo cache
            if rng.bool() {
                board.undo();
                board.try_play(s)?;
                moves += 1;
            }

            color = color.opponent();
        }

        while board.undo().is_some() {}

        ensure!(
            board.hash() == start,
            "walk {i}: hash {:016x} after undoing every move",
            board.hash()
        );
    }

    let elapsed = timer.elapsed();
    let stats = board.stats();

    println!("{iterations} walks on {size}x{size}, {moves} moves in {elapsed:.2?}");
    println!("plays: {}, redos: {}", stats.plays, stats.redos);

    if elapsed.as_secs_f64() > 0.0 {
        println!("{:.0} moves/s", moves as f64 / elapsed.as_secs_f64());
    }

    Ok(())
}
