use log::{debug, trace};

use tile_blast_core::{CellSet, GameSession, ResolutionTrace};
use tile_blast_types::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintError {
    NotPlayable,
    NoMove,
}

impl HintError {
    pub fn code(self) -> &'static str {
        match self {
            HintError::NotPlayable => "not_playable",
            HintError::NoMove => "no_move",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            HintError::NotPlayable => "game is not playable",
            HintError::NoMove => "no removable group on the board",
        }
    }
}

/// A suggested tap and the group it would clear
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub cell: Cell,
    pub group: CellSet,
}

impl Hint {
    pub fn size(&self) -> usize {
        self.group.len()
    }
}

/// Largest removable group under the session's rule.
///
/// Every occupied cell is tried as a tap, so the suggested cell is one the
/// engine accepts. Ties go to the first such cell in scan order (bottom row
/// first, left to right).
pub fn best_move(session: &GameSession) -> Result<Hint, HintError> {
    if !session.is_active() {
        return Err(HintError::NotPlayable);
    }

    let engine = session.engine();
    let mut best: Option<Hint> = None;
    for cell in session.grid().cells() {
        let Some(group) = engine.removable_group_at(cell) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| group.len() > b.size()) {
            best = Some(Hint { cell, group });
        }
    }

    let hint = best.ok_or(HintError::NoMove)?;
    trace!(target: "advisor", "best move at {} clears {}", hint.cell, hint.size());
    Ok(hint)
}

/// Play the [`best_move`] and return its trace
pub fn play_turn(session: &mut GameSession) -> Result<ResolutionTrace, HintError> {
    let hint = best_move(session)?;
    let out = session.attempt_move(hint.cell).ok_or(HintError::NoMove)?;
    debug_assert_eq!(out.passes[0].removed, hint.group);
    debug!(
        target: "advisor",
        "turn {}: tapped {} for +{} over {} passes",
        session.turn(),
        hint.cell,
        out.total_score(),
        out.cascade_depth()
    );
    Ok(out)
}
