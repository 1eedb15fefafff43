//! Game session - the player-facing state machine
//!
//! A session owns one [`ResolutionEngine`] plus the target score and the
//! win/lose phase. Every UI intent goes through here:
//!
//! - taps ([`GameSession::attempt_move`] / [`GameSession::select`])
//! - boosters, either fired directly ([`GameSession::attempt_bomb_booster`])
//!   or armed from a button and fired by the next tap
//!   ([`GameSession::arm_booster`])
//! - [`GameSession::restart`]
//!
//! After every committed turn the phase is re-evaluated: reaching the target
//! wins (even if the last move was spent on it), otherwise running out of
//! moves or valid groups loses. Once the game is over, taps and boosters are
//! ignored until a restart.

use log::{debug, trace, warn};

use crate::booster::BoosterError;
use crate::config::{ConfigError, GameConfig};
use crate::grid::Grid;
use crate::matcher::MatchFinder;
use crate::resolve::{Counters, ResolutionEngine};
use crate::rng::TileSource;
use crate::snapshot::SessionSnapshot;
use crate::trace::ResolutionTrace;
use crate::types::{BoosterKind, Cell, MatchRule, Phase, PlayerAction, BOARD_GEN_ATTEMPTS};

/// Fill `grid` at random until the board has a valid move.
///
/// Returns the number of fills used. On failure the grid keeps the last fill.
fn fill_playable(
    grid: &mut Grid,
    tiles: &mut TileSource,
    rule: MatchRule,
) -> Result<u32, ConfigError> {
    for attempt in 1..=BOARD_GEN_ATTEMPTS {
        tiles.fill(grid);
        if rule.has_any_valid_move(grid) {
            if attempt > BOARD_GEN_ATTEMPTS / 4 {
                warn!(target: "session", "playable board took {attempt} fills");
            } else if attempt > 1 {
                trace!(target: "session", "playable board after {attempt} fills");
            }
            return Ok(attempt);
        }
    }
    Err(ConfigError::NoPlayableBoard {
        attempts: BOARD_GEN_ATTEMPTS,
    })
}

fn starting_counters(config: &GameConfig) -> Counters {
    Counters {
        score: 0,
        moves_left: config.max_moves,
        bomb_charges: config.bomb_charges,
        swap_charges: config.swap_charges,
    }
}

/// One game: board, counters, phase
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    engine: ResolutionEngine,
    phase: Phase,
    armed: BoosterKind,
    /// Increments on restart
    episode_id: u32,
    /// Committed turns this episode
    turn: u32,
}

impl GameSession {
    /// Validate `config` and deal the first board
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut tiles = TileSource::new(config.seed, config.type_count);
        let mut grid = Grid::new(config.width, config.height);
        fill_playable(&mut grid, &mut tiles, config.match_rule)?;

        let engine = ResolutionEngine::new(
            grid,
            tiles,
            config.match_rule,
            starting_counters(&config),
            config.max_cascade_passes,
        );
        debug!(
            target: "session",
            "new game {}x{}, {} kinds, target {}, {} moves",
            config.width,
            config.height,
            config.type_count,
            config.target_score,
            config.max_moves
        );

        Ok(Self {
            config,
            engine,
            phase: Phase::Active,
            armed: BoosterKind::None,
            episode_id: 0,
            turn: 0,
        })
    }

    /// Start a session from an explicit grid, e.g. a designed level or a
    /// test fixture. Only the dimensions of `config` are replaced.
    ///
    /// The grid must be full, and its dimensions must admit a playable random
    /// deal so that [`restart`](Self::restart) can replace it.
    pub fn with_grid(config: GameConfig, grid: Grid) -> Result<Self, ConfigError> {
        let config = config.with_size(grid.width(), grid.height());
        config.validate()?;
        if !grid.is_full() {
            return Err(ConfigError::IncompleteGrid {
                empty: grid.empty_count(),
            });
        }

        let tiles = TileSource::new(config.seed, config.type_count);
        let mut scratch = Grid::new(config.width, config.height);
        fill_playable(&mut scratch, &mut tiles.clone(), config.match_rule)?;

        let engine = ResolutionEngine::new(
            grid,
            tiles,
            config.match_rule,
            starting_counters(&config),
            config.max_cascade_passes,
        );
        let mut session = Self {
            config,
            engine,
            phase: Phase::Active,
            armed: BoosterKind::None,
            episode_id: 0,
            turn: 0,
        };
        session.evaluate_phase();
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn score(&self) -> u32 {
        self.engine.counters().score
    }

    pub fn target_score(&self) -> u32 {
        self.config.target_score
    }

    pub fn moves_left(&self) -> u32 {
        self.engine.counters().moves_left
    }

    pub fn bomb_charges(&self) -> u32 {
        self.engine.counters().bomb_charges
    }

    pub fn swap_charges(&self) -> u32 {
        self.engine.counters().swap_charges
    }

    pub fn armed_booster(&self) -> BoosterKind {
        self.armed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Tap `cell` as a normal move
    pub fn attempt_move(&mut self, cell: Cell) -> Option<ResolutionTrace> {
        if !self.is_active() {
            trace!(target: "session", "move at {cell} ignored: game is {}", self.phase.as_str());
            return None;
        }
        let out = self.engine.attempt_move(cell)?;
        self.commit();
        Some(out)
    }

    /// Fire the bomb at `cell` (does not consume a move)
    pub fn attempt_bomb_booster(&mut self, cell: Cell) -> Option<ResolutionTrace> {
        if !self.is_active() {
            trace!(target: "session", "bomb at {cell} ignored: game is {}", self.phase.as_str());
            return None;
        }
        let out = self.engine.attempt_bomb_booster(cell)?;
        self.commit();
        Some(out)
    }

    /// Arm a booster for the next [`select`](Self::select).
    ///
    /// `BoosterKind::None` disarms. Arming is rejected when the game is over,
    /// when no charge is left, and for boosters without an effect.
    pub fn arm_booster(&mut self, kind: BoosterKind) -> Result<(), BoosterError> {
        if !self.is_active() {
            return Err(BoosterError::GameOver);
        }
        match kind {
            BoosterKind::None => {}
            BoosterKind::Bomb => {
                if self.bomb_charges() == 0 {
                    return Err(BoosterError::NoCharges(kind));
                }
            }
            BoosterKind::Swap => return Err(BoosterError::Unimplemented(kind)),
        }
        debug!(target: "session", "armed booster: {}", kind.as_str());
        self.armed = kind;
        Ok(())
    }

    /// Tap `cell`: fires the armed booster if there is one, else a normal move.
    ///
    /// A booster stays armed when its shot is rejected.
    pub fn select(&mut self, cell: Cell) -> Option<ResolutionTrace> {
        match self.armed {
            BoosterKind::None => self.attempt_move(cell),
            kind => {
                if !self.is_active() {
                    return None;
                }
                let out = self.engine.attempt_booster(kind, cell)?;
                self.armed = BoosterKind::None;
                self.commit();
                Some(out)
            }
        }
    }

    /// Route a UI intent.
    ///
    /// Returns the trace of a committed turn; arming and restarting return
    /// `None`.
    pub fn apply_action(&mut self, action: PlayerAction) -> Option<ResolutionTrace> {
        match action {
            PlayerAction::Select { cell } => {
                trace!(target: "session", "{} at {cell}", action.as_str());
                self.select(cell)
            }
            PlayerAction::ArmBooster { booster } => {
                if let Err(err) = self.arm_booster(booster) {
                    debug!(target: "session", "arm {} rejected: {err}", booster.as_str());
                }
                None
            }
            PlayerAction::Restart => {
                self.restart();
                None
            }
        }
    }

    /// Throw the game away and deal a fresh board with the configured
    /// starting counters.
    ///
    /// The tile sequence continues from the current RNG state, so a restart
    /// deals a new board rather than replaying the first one.
    pub fn restart(&mut self) {
        let mut tiles = TileSource::new(self.engine.seed(), self.config.type_count);
        let mut grid = Grid::new(self.config.width, self.config.height);
        if let Err(err) = fill_playable(&mut grid, &mut tiles, self.config.match_rule) {
            warn!(target: "session", "restart dealt an unplayable board: {err}");
        }

        self.engine = ResolutionEngine::new(
            grid,
            tiles,
            self.config.match_rule,
            starting_counters(&self.config),
            self.config.max_cascade_passes,
        );
        self.armed = BoosterKind::None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.turn = 0;
        self.phase = Phase::Active;
        self.evaluate_phase();
        debug!(target: "session", "restarted, episode {}", self.episode_id);
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        let counters = self.engine.counters();
        out.write_board(self.engine.grid());
        out.score = counters.score;
        out.target_score = self.config.target_score;
        out.moves_left = counters.moves_left;
        out.bomb_charges = counters.bomb_charges;
        out.swap_charges = counters.swap_charges;
        out.phase = self.phase;
        out.armed_booster = self.armed;
        out.episode_id = self.episode_id;
        out.turn = self.turn;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn commit(&mut self) {
        self.turn = self.turn.wrapping_add(1);
        self.evaluate_phase();
    }

    fn evaluate_phase(&mut self) {
        let counters = self.engine.counters();
        let next = if counters.score >= self.config.target_score {
            Phase::Won
        } else if counters.moves_left == 0
            || !self.engine.rule().has_any_valid_move(self.engine.grid())
        {
            Phase::Lost
        } else {
            Phase::Active
        };

        if next != self.phase {
            debug!(
                target: "session",
                "phase {} -> {} (score {}/{}, {} moves left)",
                self.phase.as_str(),
                next.as_str(),
                counters.score,
                self.config.target_score,
                counters.moves_left
            );
            if next.is_terminal() {
                self.armed = BoosterKind::None;
            }
            self.phase = next;
        }
    }
}

/// Build a session from the six core settings; everything else defaults
pub fn new_game(
    width: u16,
    height: u16,
    type_count: u8,
    target_score: u32,
    max_moves: u32,
    bomb_charges: u32,
) -> Result<GameSession, ConfigError> {
    let config = GameConfig::default()
        .with_size(width, height)
        .with_type_count(type_count)
        .with_target_score(target_score)
        .with_max_moves(max_moves)
        .with_bomb_charges(bomb_charges);
    GameSession::new(config)
}
