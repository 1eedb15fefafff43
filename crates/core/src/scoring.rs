//! Scoring module - points for removed tiles
//!
//! Every removed tile is worth [`SCORE_PER_TILE`] points, whether it went in a
//! tapped group, a booster blast, or a cascade pass. There is no combo or
//! chain multiplier; a long cascade pays through the extra tiles it removes.

use crate::types::SCORE_PER_TILE;

/// Points for removing `tiles` tiles in one pass
pub fn calculate_removal_score(tiles: usize) -> u32 {
    (tiles as u32).saturating_mul(SCORE_PER_TILE)
}

/// Add `delta` to `score` without wrapping
pub fn award(score: u32, delta: u32) -> u32 {
    score.saturating_add(delta)
}
