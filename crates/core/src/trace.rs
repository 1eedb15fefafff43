//! Resolution traces - what a presentation layer needs to animate a turn
//!
//! A trace is advisory: by the time it is returned the grid, score and move
//! counters already hold their final values. Each [`CascadePass`] lists, in
//! order, the cells that were cleared, the tiles that fell and the tiles that
//! spawned, so a renderer keyed by cell can replay the turn at its own pace.

use serde::{Deserialize, Serialize};

use crate::matcher::CellSet;
use crate::types::{BoosterKind, Cell, Tile};

/// What started a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TraceCause {
    /// A tap on a removable group
    Move { cell: Cell },
    /// A booster fired at `cell`
    Booster { booster: BoosterKind, cell: Cell },
}

/// A surviving tile falling from `from` to `to` (same column, lower row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMove {
    pub from: Cell,
    pub to: Cell,
}

/// A new tile appearing at `cell`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpawn {
    pub cell: Cell,
    pub tile: Tile,
}

/// One remove → gravity → spawn step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CascadePass {
    pub removed: CellSet,
    pub moved: Vec<TileMove>,
    pub spawned: Vec<TileSpawn>,
    pub score_delta: u32,
}

/// Ordered record of every pass of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTrace {
    pub cause: TraceCause,
    pub passes: Vec<CascadePass>,
    /// The turn stopped at the cascade pass limit with matches still on the
    /// board.
    #[serde(default)]
    pub capped: bool,
}

impl ResolutionTrace {
    pub fn new(cause: TraceCause) -> Self {
        Self {
            cause,
            passes: Vec::new(),
            capped: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Sum of every pass's score delta
    pub fn total_score(&self) -> u32 {
        self.passes
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.score_delta))
    }

    /// Tiles removed across all passes
    pub fn removed_count(&self) -> usize {
        self.passes.iter().map(|p| p.removed.len()).sum()
    }

    /// Passes after the first one
    pub fn cascade_depth(&self) -> usize {
        self.passes.len().saturating_sub(1)
    }
}
