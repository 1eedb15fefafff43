use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{BoosterKind, Phase, TileKind};

/// Everything a UI layer displays, detached from the session
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major, bottom row first
    pub board: Vec<Option<TileKind>>,
    pub score: u32,
    pub target_score: u32,
    pub moves_left: u32,
    pub bomb_charges: u32,
    pub swap_charges: u32,
    pub phase: Phase,
    pub armed_booster: BoosterKind,
    pub episode_id: u32,
    pub turn: u32,
}

impl SessionSnapshot {
    pub fn write_board(&mut self, grid: &Grid) {
        self.width = grid.width();
        self.height = grid.height();
        self.board.clear();
        self.board
            .extend(grid.tiles().iter().map(|t| t.map(|tile| tile.kind)));
    }

    pub fn playable(&self) -> bool {
        !self.phase.is_terminal()
    }

    /// Score as the UI shows it, e.g. `"120/1000"`
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.score, self.target_score)
    }
}
