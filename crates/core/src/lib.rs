//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of a tap-to-clear tile game: a rectangular
//! board of colored tiles where tapping a large enough same-colored group
//! removes it, the tiles above fall, new tiles spawn at the top and any groups
//! formed by the refill cascade away in the same turn. It has no dependency on
//! UI, timing or I/O:
//!
//! - **Deterministic**: the same seed deals the same boards and refills
//! - **Synchronous**: a turn resolves completely inside one call
//! - **Observable**: every turn returns a [`ResolutionTrace`] describing each
//!   removal, fall and spawn, for whoever animates it
//!
//! # Module Structure
//!
//! - [`grid`]: tile storage, bounds, neighbours and a text form for fixtures
//! - [`matcher`]: group search (connected region or line run) and board scans
//! - [`booster`]: booster effects (bomb) and booster errors
//! - [`rng`]: seeded LCG and the tile source used for fills and refills
//! - [`scoring`]: points per removed tile
//! - [`resolve`]: gravity, spawning and the cascade loop
//! - [`trace`]: per-turn resolution record
//! - [`config`]: session settings and environment overlay
//! - [`session`]: the player-facing state machine with win/lose evaluation
//! - [`snapshot`]: display-ready copy of a session
//!
//! # Game Rules
//!
//! - A tap removes the tapped group when it has at least
//!   [`MIN_GROUP_SIZE`](types::MIN_GROUP_SIZE) tiles and costs one move
//! - Each removed tile scores [`SCORE_PER_TILE`](types::SCORE_PER_TILE),
//!   cascades included
//! - The bomb clears the 3x3 block around its target and costs a charge, not
//!   a move
//! - Reaching the target score wins; running out of moves or valid groups
//!   loses
//!
//! # Example
//!
//! ```
//! use tile_blast_core::new_game;
//!
//! let mut game = new_game(8, 8, 5, 1000, 30, 3).unwrap();
//!
//! // Fresh boards always have a valid move
//! let tap = game
//!     .grid()
//!     .cells()
//!     .find(|&c| game.engine().removable_group_at(c).is_some())
//!     .unwrap();
//! let trace = game.attempt_move(tap).unwrap();
//!
//! assert_eq!(game.score(), trace.total_score());
//! assert_eq!(game.moves_left(), 29);
//! assert!(game.grid().is_full());
//! ```

pub mod booster;
pub mod config;
pub mod grid;
pub mod matcher;
pub mod resolve;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod trace;

pub use tile_blast_types as types;

// Re-export commonly used types for convenience
pub use booster::{booster_effect, BoosterError};
pub use config::{ConfigError, GameConfig};
pub use grid::{Grid, GridParseError};
pub use matcher::{
    all_removable_groups, booster_area, connected_region, has_any_valid_move, is_removable,
    line_run, CellSet, LineRunFinder, MatchFinder, RegionFinder,
};
pub use resolve::{apply_gravity, spawn_tiles, Counters, EngineState, ResolutionEngine};
pub use rng::{SimpleRng, TileSource};
pub use scoring::calculate_removal_score;
pub use session::{new_game, GameSession};
pub use snapshot::SessionSnapshot;
pub use trace::{CascadePass, ResolutionTrace, TileMove, TileSpawn, TraceCause};
pub use types::{BoosterKind, Cell, MatchRule, Phase, PlayerAction, Tile, TileKind};
