//! Session configuration
//!
//! Every tunable of a game is supplied here at session creation; nothing else
//! is read implicitly. Defaults come from the constants in
//! [`tile_blast_types`](crate::types), and [`GameConfig::from_env`] overlays
//! `TILE_BLAST_*` environment variables for the headless driver.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TILE_BLAST_WIDTH` | `width` |
//! | `TILE_BLAST_HEIGHT` | `height` |
//! | `TILE_BLAST_TYPES` | `type_count` |
//! | `TILE_BLAST_TARGET` | `target_score` |
//! | `TILE_BLAST_MOVES` | `max_moves` |
//! | `TILE_BLAST_BOMBS` | `bomb_charges` |
//! | `TILE_BLAST_SWAPS` | `swap_charges` |
//! | `TILE_BLAST_SEED` | `seed` |
//! | `TILE_BLAST_RULE` | `match_rule` (`region` / `line-run`) |
//!
//! Unparsable values fall back to the default for that field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    MatchRule, TileKind, DEFAULT_BOMB_CHARGES, DEFAULT_HEIGHT, DEFAULT_MAX_CASCADE_PASSES,
    DEFAULT_MAX_MOVES, DEFAULT_SWAP_CHARGES, DEFAULT_TARGET_SCORE, DEFAULT_TYPE_COUNT,
    DEFAULT_WIDTH,
};

/// Why a session could not be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board width must be positive")]
    ZeroWidth,
    #[error("board height must be positive")]
    ZeroHeight,
    #[error("at least one tile kind is required")]
    ZeroTypeCount,
    #[error("{requested} tile kinds requested, only {max} exist")]
    TooManyTypes { requested: u8, max: u8 },
    #[error("cascade pass limit must be positive")]
    ZeroCascadeLimit,
    #[error("no board with a valid move found in {attempts} attempts")]
    NoPlayableBoard { attempts: u32 },
    #[error("starting grid has {empty} empty cells")]
    IncompleteGrid { empty: usize },
}

/// Starting values and rules for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Number of tile kinds in play (first N of `TileKind::ALL`)
    pub type_count: u8,
    pub target_score: u32,
    pub max_moves: u32,
    pub bomb_charges: u32,
    pub swap_charges: u32,
    pub match_rule: MatchRule,
    pub max_cascade_passes: u32,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            type_count: DEFAULT_TYPE_COUNT,
            target_score: DEFAULT_TARGET_SCORE,
            max_moves: DEFAULT_MAX_MOVES,
            bomb_charges: DEFAULT_BOMB_CHARGES,
            swap_charges: DEFAULT_SWAP_CHARGES,
            match_rule: MatchRule::default(),
            max_cascade_passes: DEFAULT_MAX_CASCADE_PASSES,
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Defaults overlaid with `TILE_BLAST_*` environment variables
    pub fn from_env() -> Self {
        use std::env;

        fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            width: parsed("TILE_BLAST_WIDTH").unwrap_or(defaults.width),
            height: parsed("TILE_BLAST_HEIGHT").unwrap_or(defaults.height),
            type_count: parsed("TILE_BLAST_TYPES").unwrap_or(defaults.type_count),
            target_score: parsed("TILE_BLAST_TARGET").unwrap_or(defaults.target_score),
            max_moves: parsed("TILE_BLAST_MOVES").unwrap_or(defaults.max_moves),
            bomb_charges: parsed("TILE_BLAST_BOMBS").unwrap_or(defaults.bomb_charges),
            swap_charges: parsed("TILE_BLAST_SWAPS").unwrap_or(defaults.swap_charges),
            match_rule: env::var("TILE_BLAST_RULE")
                .ok()
                .and_then(|s| MatchRule::from_str(s.trim()))
                .unwrap_or(defaults.match_rule),
            max_cascade_passes: defaults.max_cascade_passes,
            seed: parsed("TILE_BLAST_SEED").unwrap_or(defaults.seed),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if self.type_count == 0 {
            return Err(ConfigError::ZeroTypeCount);
        }
        let max = TileKind::ALL.len() as u8;
        if self.type_count > max {
            return Err(ConfigError::TooManyTypes {
                requested: self.type_count,
                max,
            });
        }
        if self.max_cascade_passes == 0 {
            return Err(ConfigError::ZeroCascadeLimit);
        }
        Ok(())
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_type_count(mut self, type_count: u8) -> Self {
        self.type_count = type_count;
        self
    }

    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.target_score = target_score;
        self
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_bomb_charges(mut self, bomb_charges: u32) -> Self {
        self.bomb_charges = bomb_charges;
        self
    }

    pub fn with_swap_charges(mut self, swap_charges: u32) -> Self {
        self.swap_charges = swap_charges;
        self
    }

    pub fn with_match_rule(mut self, match_rule: MatchRule) -> Self {
        self.match_rule = match_rule;
        self
    }

    pub fn with_max_cascade_passes(mut self, max_cascade_passes: u32) -> Self {
        self.max_cascade_passes = max_cascade_passes;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!(config.width, 8);
        assert_eq!(config.height, 8);
        assert_eq!(config.max_moves, 30);
        assert_eq!(config.bomb_charges, 3);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = GameConfig::default();
        assert_eq!(
            base.clone().with_size(0, 5).validate(),
            Err(ConfigError::ZeroWidth)
        );
        assert_eq!(
            base.clone().with_size(5, 0).validate(),
            Err(ConfigError::ZeroHeight)
        );
        assert_eq!(
            base.clone().with_type_count(0).validate(),
            Err(ConfigError::ZeroTypeCount)
        );
        assert_eq!(
            base.clone().with_type_count(7).validate(),
            Err(ConfigError::TooManyTypes {
                requested: 7,
                max: 6
            })
        );
        assert_eq!(
            base.with_max_cascade_passes(0).validate(),
            Err(ConfigError::ZeroCascadeLimit)
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"width": 5, "match_rule": "line_run"}"#).unwrap();
        assert_eq!(config.width, 5);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.match_rule, MatchRule::LineRun);
    }
}
