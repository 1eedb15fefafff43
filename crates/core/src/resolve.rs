//! Resolution engine - runs one complete turn
//!
//! A turn starts from a full board and a removal set (a tapped group or a
//! booster blast) and loops:
//!
//! 1. remove every cell of the set and award points
//! 2. gravity: per column, survivors drop to the lowest rows in order
//! 3. spawn: fill the gaps left at the top of each column
//! 4. collect every removable group on the new board; if any, their union is
//!    the next removal set
//!
//! until no group remains or the cascade pass limit is reached. The whole loop
//! runs inside one call, so callers only ever see a full board.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::booster::booster_effect;
use crate::grid::Grid;
use crate::matcher::{CellSet, MatchFinder};
use crate::rng::TileSource;
use crate::scoring::{award, calculate_removal_score};
use crate::trace::{CascadePass, ResolutionTrace, TileMove, TileSpawn, TraceCause};
use crate::types::{BoosterKind, Cell, MatchRule};

/// Whether a turn is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Resolving,
}

/// Score, move budget and booster charges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    pub score: u32,
    pub moves_left: u32,
    pub bomb_charges: u32,
    pub swap_charges: u32,
}

impl Counters {
    fn charges_mut(&mut self, kind: BoosterKind) -> Option<&mut u32> {
        match kind {
            BoosterKind::Bomb => Some(&mut self.bomb_charges),
            BoosterKind::Swap => Some(&mut self.swap_charges),
            BoosterKind::None => None,
        }
    }

    pub fn charges(&self, kind: BoosterKind) -> u32 {
        match kind {
            BoosterKind::Bomb => self.bomb_charges,
            BoosterKind::Swap => self.swap_charges,
            BoosterKind::None => 0,
        }
    }
}

/// Compact every column downward, preserving the order of surviving tiles.
///
/// Returns one [`TileMove`] per tile that changed row, column by column,
/// bottom to top.
pub fn apply_gravity(grid: &mut Grid) -> Vec<TileMove> {
    let mut moves = Vec::new();
    let (width, height) = (grid.width() as i32, grid.height() as i32);

    for x in 0..width {
        let mut write_y = 0;
        for y in 0..height {
            let from = Cell::new(x, y);
            let Some(tile) = grid.take(from) else {
                continue;
            };
            let to = Cell::new(x, write_y);
            grid.set(to, Some(tile));
            if to != from {
                moves.push(TileMove { from, to });
            }
            write_y += 1;
        }

        debug_assert!(
            (0..height).all(|y| grid.is_occupied(Cell::new(x, y)) == (y < write_y)),
            "gravity left a gap below a tile in column {x}"
        );
    }
    moves
}

/// Fill every empty cell with a fresh tile.
///
/// After [`apply_gravity`] the empty cells are exactly the top of each column.
pub fn spawn_tiles(grid: &mut Grid, source: &mut TileSource) -> Vec<TileSpawn> {
    let mut spawned = Vec::new();
    let (width, height) = (grid.width() as i32, grid.height() as i32);

    for x in 0..width {
        for y in 0..height {
            let cell = Cell::new(x, y);
            if grid.is_occupied(cell) {
                continue;
            }
            let tile = source.next_tile();
            grid.set(cell, Some(tile));
            spawned.push(TileSpawn { cell, tile });
        }
    }
    spawned
}

/// Owns the grid and the counters, and resolves moves and boosters
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    grid: Grid,
    tiles: TileSource,
    rule: MatchRule,
    counters: Counters,
    state: EngineState,
    max_cascade_passes: u32,
}

impl ResolutionEngine {
    pub fn new(
        grid: Grid,
        tiles: TileSource,
        rule: MatchRule,
        counters: Counters,
        max_cascade_passes: u32,
    ) -> Self {
        Self {
            grid,
            tiles,
            rule,
            counters,
            state: EngineState::Idle,
            max_cascade_passes: max_cascade_passes.max(1),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn rule(&self) -> MatchRule {
        self.rule
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_resolving(&self) -> bool {
        self.state == EngineState::Resolving
    }

    /// RNG state of the tile source
    pub fn seed(&self) -> u32 {
        self.tiles.seed()
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: EngineState) {
        self.state = state;
    }

    /// Group a tap on `cell` would remove, if removable
    pub fn removable_group_at(&self, cell: Cell) -> Option<CellSet> {
        let group = self.rule.group_at(&self.grid, cell);
        self.rule.is_removable(&group).then_some(group)
    }

    /// Resolve a tap on `cell`.
    ///
    /// Returns `None` without touching any state when a turn is in flight, the
    /// cell is empty or outside the board, or its group is too small.
    /// Otherwise consumes one move and runs the cascade.
    pub fn attempt_move(&mut self, cell: Cell) -> Option<ResolutionTrace> {
        if self.is_resolving() {
            trace!(target: "resolve", "move at {cell} rejected: resolution in flight");
            return None;
        }
        if !self.grid.is_occupied(cell) {
            trace!(target: "resolve", "move at {cell} rejected: no tile");
            return None;
        }
        let Some(group) = self.removable_group_at(cell) else {
            trace!(target: "resolve", "move at {cell} rejected: group too small");
            return None;
        };

        self.counters.moves_left = self.counters.moves_left.saturating_sub(1);
        debug!(
            target: "resolve",
            "move at {cell}: removing {} tiles, {} moves left",
            group.len(),
            self.counters.moves_left
        );
        Some(self.resolve(TraceCause::Move { cell }, group))
    }

    /// Fire the bomb at `cell`.
    ///
    /// Needs a bomb charge and an in-bounds target; does not consume a move.
    pub fn attempt_bomb_booster(&mut self, cell: Cell) -> Option<ResolutionTrace> {
        self.attempt_booster(BoosterKind::Bomb, cell)
    }

    /// Fire any booster kind that has an effect
    pub fn attempt_booster(&mut self, kind: BoosterKind, cell: Cell) -> Option<ResolutionTrace> {
        if self.is_resolving() || !self.grid.in_bounds(cell) {
            trace!(target: "resolve", "{} at {cell} rejected", kind.as_str());
            return None;
        }
        if self.counters.charges(kind) == 0 {
            trace!(target: "resolve", "{} at {cell} rejected: no charges", kind.as_str());
            return None;
        }
        let area = match booster_effect(kind, &self.grid, cell) {
            Ok(area) => area,
            Err(err) => {
                warn!(target: "resolve", "{} at {cell} rejected: {err}", kind.as_str());
                return None;
            }
        };

        if let Some(charges) = self.counters.charges_mut(kind) {
            *charges -= 1;
        }
        debug!(
            target: "resolve",
            "{} at {cell}: clearing {} tiles, {} charges left",
            kind.as_str(),
            area.len(),
            self.counters.charges(kind)
        );
        Some(self.resolve(TraceCause::Booster { booster: kind, cell }, area))
    }

    /// Cascade loop seeded with `removal`
    fn resolve(&mut self, cause: TraceCause, mut removal: CellSet) -> ResolutionTrace {
        self.state = EngineState::Resolving;
        let mut out = ResolutionTrace::new(cause);

        loop {
            let pass = self.run_pass(&removal);
            self.counters.score = award(self.counters.score, pass.score_delta);
            trace!(
                target: "resolve",
                "pass {}: removed {}, moved {}, spawned {}",
                out.passes.len(),
                pass.removed.len(),
                pass.moved.len(),
                pass.spawned.len()
            );
            out.passes.push(pass);

            let groups = self.rule.all_removable_groups(&self.grid);
            if groups.is_empty() {
                break;
            }
            if out.passes.len() as u32 >= self.max_cascade_passes {
                warn!(
                    target: "resolve",
                    "cascade stopped after {} passes with {} groups still on the board",
                    out.passes.len(),
                    groups.len()
                );
                out.capped = true;
                break;
            }
            removal = groups.into_iter().flatten().collect();
        }

        self.state = EngineState::Idle;
        debug_assert!(self.grid.is_full(), "turn ended with holes in the grid");
        debug!(
            target: "resolve",
            "turn settled: {} passes, +{} points, score {}",
            out.passes.len(),
            out.total_score(),
            self.counters.score
        );
        out
    }

    fn run_pass(&mut self, removal: &CellSet) -> CascadePass {
        for &cell in removal {
            let removed = self.grid.take(cell);
            debug_assert!(removed.is_some(), "cell {cell} removed twice");
        }
        let score_delta = calculate_removal_score(removal.len());
        let moved = apply_gravity(&mut self.grid);
        let spawned = spawn_tiles(&mut self.grid, &mut self.tiles);

        CascadePass {
            removed: removal.clone(),
            moved,
            spawned,
            score_delta,
        }
    }
}
