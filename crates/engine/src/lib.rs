//! Move advisor built on `tile-blast-core`.
//!
//! [`best_move`] suggests the tap clearing the most tiles right now;
//! [`play_turn`] plays it. Looping `play_turn` until it errors is the greedy
//! autoplay the headless driver uses.

pub mod advisor;

pub use advisor::{best_move, play_turn, Hint, HintError};
