//! Core types module - shared data structures and constants
//!
//! This module defines the plain data records used by every other crate in the
//! workspace: cells, tiles, tile kinds, booster kinds, session phases and the
//! player intents emitted by a UI layer. Nothing here has behavior beyond
//! parsing and formatting, so the types are usable from the engine, from a
//! presentation process, and from tests alike.
//!
//! # Coordinates
//!
//! A [`Cell`] is an `(x, y)` pair. `x` grows to the right, `y = 0` is the
//! **bottom** row and higher `y` is higher on screen. Tiles fall toward `y = 0`.
//! Coordinates are signed so that out-of-bounds input from a UI can be
//! represented and rejected instead of wrapping.
//!
//! # Rule Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_GROUP_SIZE` | 3 | Smallest removable group |
//! | `SCORE_PER_TILE` | 10 | Points per removed tile |
//! | `BOMB_RADIUS` | 1 | Chebyshev radius of the bomb booster (3x3) |
//!
//! # Session Defaults
//!
//! | Constant | Value |
//! |----------|-------|
//! | `DEFAULT_WIDTH` x `DEFAULT_HEIGHT` | 8 x 8 |
//! | `DEFAULT_TYPE_COUNT` | 5 |
//! | `DEFAULT_MAX_MOVES` | 30 |
//! | `DEFAULT_BOMB_CHARGES` | 3 |
//! | `DEFAULT_SWAP_CHARGES` | 3 |
//! | `DEFAULT_TARGET_SCORE` | 1000 |
//! | `DEFAULT_MAX_CASCADE_PASSES` | 64 |
//!
//! # Examples
//!
//! ```
//! use tile_blast_types::{BoosterKind, Cell, MatchRule, TileKind, MIN_GROUP_SIZE};
//!
//! // Parse a tile kind from its letter (case-insensitive)
//! assert_eq!(TileKind::from_char('r'), Some(TileKind::Red));
//! assert_eq!(TileKind::Red.as_char(), 'R');
//!
//! // Cells order row-major, bottom row first
//! assert!(Cell::new(5, 0) < Cell::new(0, 1));
//!
//! // Parse a booster kind and a match rule
//! assert_eq!(BoosterKind::from_str("bomb"), Some(BoosterKind::Bomb));
//! assert_eq!(MatchRule::from_str("line-run"), Some(MatchRule::LineRun));
//!
//! assert_eq!(MIN_GROUP_SIZE, 3);
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest group size that may be removed by a normal move
pub const MIN_GROUP_SIZE: usize = 3;

/// Points awarded per removed tile
pub const SCORE_PER_TILE: u32 = 10;

/// Chebyshev radius of the bomb booster (radius 1 = 3x3 block)
pub const BOMB_RADIUS: i32 = 1;

/// Default board width in cells
pub const DEFAULT_WIDTH: u16 = 8;

/// Default board height in cells
pub const DEFAULT_HEIGHT: u16 = 8;

/// Default number of tile kinds in play
pub const DEFAULT_TYPE_COUNT: u8 = 5;

/// Default move budget per game
pub const DEFAULT_MAX_MOVES: u32 = 30;

/// Default bomb booster charges per game
pub const DEFAULT_BOMB_CHARGES: u32 = 3;

/// Default swap booster charges per game
pub const DEFAULT_SWAP_CHARGES: u32 = 3;

/// Default score needed to win
pub const DEFAULT_TARGET_SCORE: u32 = 1000;

/// Default upper bound on cascade passes within one turn.
///
/// A board with a single kind in play refills into a removable board forever,
/// so a turn must stop somewhere.
pub const DEFAULT_MAX_CASCADE_PASSES: u32 = 64;

/// Random fills tried before a board is declared unplayable
pub const BOARD_GEN_ATTEMPTS: u32 = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_constants() {
        assert_eq!(MIN_GROUP_SIZE, 3);
        assert_eq!(SCORE_PER_TILE, 10);
        assert_eq!(BOMB_RADIUS, 1);
        assert!(DEFAULT_TYPE_COUNT as usize <= TileKind::ALL.len());
    }

    #[test]
    fn cell_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 1), Cell::new(0, 1), Cell::new(2, 0)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(2, 0), Cell::new(0, 1), Cell::new(1, 1)]);
    }

    #[test]
    fn cell_chebyshev_distance() {
        let c = Cell::new(3, 3);
        assert_eq!(c.chebyshev(Cell::new(3, 3)), 0);
        assert_eq!(c.chebyshev(Cell::new(4, 2)), 1);
        assert_eq!(c.chebyshev(Cell::new(1, 4)), 2);
    }

    #[test]
    fn tile_kind_index_roundtrip() {
        for (i, kind) in TileKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(TileKind::from_char(kind.as_char()), Some(*kind));
        }
    }

    #[test]
    fn player_action_names() {
        let select = PlayerAction::Select {
            cell: Cell::new(0, 0),
        };
        let arm = PlayerAction::ArmBooster {
            booster: BoosterKind::Bomb,
        };
        assert_eq!(select.as_str(), "select");
        assert_eq!(arm.as_str(), "armBooster");
        assert_eq!(PlayerAction::Restart.as_str(), "restart");
    }
}

/// A grid coordinate
///
/// Cells order row-major starting at the bottom row (`y` first, then `x`), which
/// is also the order in which the engine scans a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (king-move) distance to `other`
    pub fn chebyshev(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The colour classes a tile can have
///
/// A session plays with the first `type_count` kinds of [`TileKind::ALL`].
/// Each kind has a single-letter form used by the text board format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl TileKind {
    /// Every kind, in index order
    pub const ALL: [TileKind; 6] = [
        TileKind::Red,
        TileKind::Green,
        TileKind::Blue,
        TileKind::Yellow,
        TileKind::Purple,
        TileKind::Orange,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse from the single-letter form (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_blast_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_char('G'), Some(TileKind::Green));
    /// assert_eq!(TileKind::from_char('y'), Some(TileKind::Yellow));
    /// assert_eq!(TileKind::from_char('?'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(TileKind::Red),
            'G' => Some(TileKind::Green),
            'B' => Some(TileKind::Blue),
            'Y' => Some(TileKind::Yellow),
            'P' => Some(TileKind::Purple),
            'O' => Some(TileKind::Orange),
            _ => None,
        }
    }

    /// Uppercase single-letter form
    pub fn as_char(self) -> char {
        match self {
            TileKind::Red => 'R',
            TileKind::Green => 'G',
            TileKind::Blue => 'B',
            TileKind::Yellow => 'Y',
            TileKind::Purple => 'P',
            TileKind::Orange => 'O',
        }
    }
}

/// Booster attached to a tile or armed by the player
///
/// - **None**: plain tile / no booster armed
/// - **Bomb**: clears the 3x3 block around the target cell
/// - **Swap**: declared with its own charge counter, has no effect yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoosterKind {
    #[default]
    None,
    Bomb,
    Swap,
}

impl BoosterKind {
    /// Parse booster kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_blast_types::BoosterKind;
    ///
    /// assert_eq!(BoosterKind::from_str("BOMB"), Some(BoosterKind::Bomb));
    /// assert_eq!(BoosterKind::from_str("swap"), Some(BoosterKind::Swap));
    /// assert_eq!(BoosterKind::from_str("none"), Some(BoosterKind::None));
    /// assert_eq!(BoosterKind::from_str("rocket"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(BoosterKind::None),
            "bomb" => Some(BoosterKind::Bomb),
            "swap" => Some(BoosterKind::Swap),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoosterKind::None => "none",
            BoosterKind::Bomb => "bomb",
            BoosterKind::Swap => "swap",
        }
    }
}

/// A tile record stored in a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub booster: BoosterKind,
}

impl Tile {
    /// Plain tile without a booster
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            booster: BoosterKind::None,
        }
    }
}

/// Session lifecycle phase
///
/// `Won` and `Lost` are terminal until the session is restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Active,
    Won,
    Lost,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Phase::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Active => "active",
            Phase::Won => "won",
            Phase::Lost => "lost",
        }
    }
}

/// Which predicate decides that a set of tiles is removable
///
/// - **ConnectedRegion**: the 4-connected same-kind region around the tapped
///   tile, any shape
/// - **LineRun**: the straight same-kind runs through the tapped tile, merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    #[default]
    ConnectedRegion,
    LineRun,
}

impl MatchRule {
    /// Parse match rule from string
    ///
    /// Accepts `"region"` / `"connected-region"` and `"line"` / `"line-run"`
    /// (case-insensitive, `_` and `-` interchangeable).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "region" | "connected-region" => Some(MatchRule::ConnectedRegion),
            "line" | "line-run" => Some(MatchRule::LineRun),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchRule::ConnectedRegion => "connected-region",
            MatchRule::LineRun => "line-run",
        }
    }
}

/// Player intents emitted by a UI layer
///
/// These are the only inputs a session accepts; the UI holds no game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum PlayerAction {
    /// Tap a tile (fires the armed booster, if any)
    Select { cell: Cell },
    /// Arm a booster for the next tap, or disarm with [`BoosterKind::None`]
    ArmBooster { booster: BoosterKind },
    /// Throw the current game away and start over
    Restart,
}

impl PlayerAction {
    /// camelCase action name
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Select { .. } => "select",
            PlayerAction::ArmBooster { .. } => "armBooster",
            PlayerAction::Restart => "restart",
        }
    }
}
