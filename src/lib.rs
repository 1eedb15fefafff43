//! Tile Blast (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches share a single import path.

pub use tile_blast_core as core;
pub use tile_blast_engine as engine;
pub use tile_blast_types as types;
