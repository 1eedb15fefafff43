//! Booster effects
//!
//! Each [`BoosterKind`] maps to the set of cells it clears when fired at a
//! target cell. `Swap` has a charge counter but no effect yet; asking for its
//! effect is an error rather than an empty blast.

use thiserror::Error;

use crate::grid::Grid;
use crate::matcher::{booster_area, CellSet};
use crate::types::{BoosterKind, Cell, BOMB_RADIUS};

/// Why a booster could not be armed or fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoosterError {
    #[error("no {} charges left", .0.as_str())]
    NoCharges(BoosterKind),
    #[error("{} booster has no effect implemented", .0.as_str())]
    Unimplemented(BoosterKind),
    #[error("`none` is not a booster")]
    NotABooster,
    #[error("the game is over")]
    GameOver,
}

/// Cells cleared by firing `kind` at `target`.
///
/// The bomb clears the in-bounds part of the 3x3 block around `target`.
pub fn booster_effect(kind: BoosterKind, grid: &Grid, target: Cell) -> Result<CellSet, BoosterError> {
    match kind {
        BoosterKind::Bomb => Ok(booster_area(grid, target, BOMB_RADIUS)),
        BoosterKind::Swap => Err(BoosterError::Unimplemented(BoosterKind::Swap)),
        BoosterKind::None => Err(BoosterError::NotABooster),
    }
}
