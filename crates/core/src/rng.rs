//! RNG module - deterministic tile generation
//!
//! Spawned tiles are the only nondeterministic input to the engine. They come
//! from a seeded LCG owned by the session, so a seed fully determines a game:
//! the same seed and the same taps replay the same board, which is what the
//! tests and the headless driver rely on.

use crate::grid::Grid;
use crate::types::{Tile, TileKind};

/// 32-bit linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Seed 0 is replaced by 1
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        // state = 1664525 * state + 1013904223 (mod 2^32)
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform-ish value in `[0, max)`
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Multiply-high keeps the upper bits; the low bits of an LCG cycle quickly.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of freshly spawned tiles for one session
///
/// Draws uniformly among the first `type_count` kinds of [`TileKind::ALL`].
#[derive(Debug, Clone)]
pub struct TileSource {
    rng: SimpleRng,
    type_count: u8,
}

impl TileSource {
    /// `type_count` is clamped to `1..=TileKind::ALL.len()`; sessions validate
    /// it before getting here.
    pub fn new(seed: u32, type_count: u8) -> Self {
        let type_count = type_count.clamp(1, TileKind::ALL.len() as u8);
        Self {
            rng: SimpleRng::new(seed),
            type_count,
        }
    }

    /// Current RNG state (restarting from it continues the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    pub fn next_kind(&mut self) -> TileKind {
        let index = self.rng.next_range(self.type_count as u32) as usize;
        TileKind::ALL[index]
    }

    /// Plain tile of a random kind
    pub fn next_tile(&mut self) -> Tile {
        Tile::new(self.next_kind())
    }

    /// Overwrite every cell of `grid` with a fresh tile
    pub fn fill(&mut self, grid: &mut Grid) {
        for cell in grid.cells() {
            let tile = self.next_tile();
            grid.set(cell, Some(tile));
        }
    }
}
