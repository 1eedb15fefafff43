//! Headless tile-blast driver (default binary).
//!
//! Deals a board, plays it with the greedy advisor until the game ends and
//! writes one JSON line per turn to stdout, then a summary line. Logging goes
//! to stderr through `env_logger` (`RUST_LOG=session=debug,resolve=trace`).

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use tile_blast::core::{GameConfig, GameSession, ResolutionTrace, SessionSnapshot};
use tile_blast::engine::play_turn;
use tile_blast::types::{MatchRule, Phase};

/// Play a tile-blast game with the greedy advisor and print each turn as JSON.
#[derive(Debug, Parser)]
#[command(
    name = "tile-blast",
    version,
    about = "Headless tile-matching game driver. Unset options fall back to TILE_BLAST_* environment variables, then built-in defaults."
)]
struct Args {
    /// Board width in columns.
    #[arg(long, value_name = "COLS")]
    width: Option<u16>,

    /// Board height in rows.
    #[arg(long, value_name = "ROWS")]
    height: Option<u16>,

    /// Number of tile kinds in play (1-6).
    #[arg(long, value_name = "N")]
    types: Option<u8>,

    /// Score that wins the game.
    #[arg(long, value_name = "POINTS")]
    target: Option<u32>,

    /// Move budget.
    #[arg(long, value_name = "N")]
    moves: Option<u32>,

    /// Bomb booster charges.
    #[arg(long, value_name = "N")]
    bombs: Option<u32>,

    /// RNG seed; the same seed replays the same game.
    #[arg(long)]
    seed: Option<u32>,

    /// Match rule.
    #[arg(long)]
    rule: Option<Rule>,

    /// Stop after this many turns even if the game is still running.
    #[arg(long, value_name = "N")]
    max_turns: Option<u32>,

    /// Print the board to stderr after each turn.
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Rule {
    Region,
    LineRun,
}

impl From<Rule> for MatchRule {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Region => MatchRule::ConnectedRegion,
            Rule::LineRun => MatchRule::LineRun,
        }
    }
}

impl Args {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::from_env();
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(types) = self.types {
            config.type_count = types;
        }
        if let Some(target) = self.target {
            config.target_score = target;
        }
        if let Some(moves) = self.moves {
            config.max_moves = moves;
        }
        if let Some(bombs) = self.bombs {
            config.bomb_charges = bombs;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rule) = self.rule {
            config.match_rule = rule.into();
        }
        config
    }
}

#[derive(Serialize)]
struct TurnLine<'a> {
    turn: u32,
    trace: &'a ResolutionTrace,
    snapshot: &'a SessionSnapshot,
}

#[derive(Serialize)]
struct SummaryLine {
    phase: Phase,
    score: u32,
    target_score: u32,
    moves_left: u32,
    turns: u32,
    longest_cascade: usize,
    seed: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config();
    let seed = config.seed;

    let mut session = GameSession::new(config).context("could not start a game")?;
    info!(
        "playing {}x{} with seed {seed}, target {}",
        session.grid().width(),
        session.grid().height(),
        session.target_score()
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut snapshot = SessionSnapshot::default();
    let mut longest_cascade = 0;

    if args.pretty {
        eprintln!("{}\n", session.grid());
    }

    while args.max_turns.map_or(true, |max| session.turn() < max) {
        let trace = match play_turn(&mut session) {
            Ok(trace) => trace,
            Err(err) => {
                info!("autoplay stopped: {} ({})", err.message(), err.code());
                break;
            }
        };
        longest_cascade = longest_cascade.max(trace.cascade_depth());

        session.snapshot_into(&mut snapshot);
        let line = TurnLine {
            turn: session.turn(),
            trace: &trace,
            snapshot: &snapshot,
        };
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;

        if args.pretty {
            eprintln!(
                "turn {} score {} moves {}\n{}\n",
                session.turn(),
                snapshot.score_label(),
                session.moves_left(),
                session.grid()
            );
        }
    }

    let summary = SummaryLine {
        phase: session.phase(),
        score: session.score(),
        target_score: session.target_score(),
        moves_left: session.moves_left(),
        turns: session.turn(),
        longest_cascade,
        seed,
    };
    serde_json::to_writer(&mut out, &summary)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
