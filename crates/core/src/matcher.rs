//! Match finding - pure queries over a grid
//!
//! Two rules decide which tiles a tap removes:
//!
//! - **Connected region** (canonical): breadth-first flood fill over
//!   orthogonally adjacent tiles of the same kind. Any shape counts.
//! - **Line run**: the tapped tile plus the unbroken same-kind runs to its
//!   left, right, above and below, merged. Only straight lines count.
//!
//! Either way a group is removable once it holds [`MIN_GROUP_SIZE`] cells.
//! Both rules sit behind the [`MatchFinder`] trait, and [`MatchRule`] picks one
//! per session.
//!
//! Groups are returned as [`CellSet`] (an ordered set), so merging several
//! groups into one removal batch can never list a cell twice.

use std::collections::{BTreeSet, VecDeque};

use crate::grid::Grid;
use crate::types::{Cell, MatchRule, MIN_GROUP_SIZE};

/// Ordered set of cells, iterated row-major from the bottom row
pub type CellSet = BTreeSet<Cell>;

/// Straight-line directions walked by the line-run rule
const LINE_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Maximal 4-connected same-kind region containing `start`.
///
/// Returns an empty set when `start` is empty or out of bounds.
pub fn connected_region(grid: &Grid, start: Cell) -> CellSet {
    let mut region = CellSet::new();
    let Some(kind) = grid.kind_at(start) else {
        return region;
    };

    let mut queue = VecDeque::from([start]);
    region.insert(start);

    while let Some(cell) = queue.pop_front() {
        for next in grid.neighbors(cell) {
            if grid.kind_at(next) == Some(kind) && region.insert(next) {
                queue.push_back(next);
            }
        }
    }
    region
}

/// `start` plus the same-kind straight runs through it.
///
/// Returns an empty set when `start` is empty or out of bounds.
pub fn line_run(grid: &Grid, start: Cell) -> CellSet {
    let mut run = CellSet::new();
    let Some(kind) = grid.kind_at(start) else {
        return run;
    };

    run.insert(start);
    for (dx, dy) in LINE_DIRECTIONS {
        let mut cell = start.offset(dx, dy);
        while grid.kind_at(cell) == Some(kind) {
            run.insert(cell);
            cell = cell.offset(dx, dy);
        }
    }
    run
}

/// In-bounds cells within Chebyshev distance `radius` of `center`, regardless
/// of what they hold.
pub fn booster_area(grid: &Grid, center: Cell, radius: i32) -> CellSet {
    let radius = radius.max(0);
    (-radius..=radius)
        .flat_map(|dy| (-radius..=radius).map(move |dx| center.offset(dx, dy)))
        .filter(|&cell| grid.in_bounds(cell))
        .collect()
}

pub fn is_removable(group: &CellSet) -> bool {
    group.len() >= MIN_GROUP_SIZE
}

/// Every removable connected region on the board
pub fn all_removable_groups(grid: &Grid) -> Vec<CellSet> {
    RegionFinder.all_removable_groups(grid)
}

/// True if some connected region of at least [`MIN_GROUP_SIZE`] tiles exists
pub fn has_any_valid_move(grid: &Grid) -> bool {
    RegionFinder.has_any_valid_move(grid)
}

/// A match rule: which cells a tap on `cell` would remove
pub trait MatchFinder {
    /// Candidate group for a tap on `cell` (empty if the cell is empty)
    fn group_at(&self, grid: &Grid, cell: Cell) -> CellSet;

    fn is_removable(&self, group: &CellSet) -> bool {
        is_removable(group)
    }

    /// Scan every occupied cell as a seed, skipping cells already claimed by
    /// an earlier removable group.
    fn all_removable_groups(&self, grid: &Grid) -> Vec<CellSet> {
        let mut claimed = CellSet::new();
        let mut groups = Vec::new();

        for cell in grid.cells() {
            if !grid.is_occupied(cell) || claimed.contains(&cell) {
                continue;
            }
            let group = self.group_at(grid, cell);
            if self.is_removable(&group) {
                claimed.extend(group.iter().copied());
                groups.push(group);
            }
        }
        groups
    }

    fn has_any_valid_move(&self, grid: &Grid) -> bool {
        grid.cells()
            .filter(|&cell| grid.is_occupied(cell))
            .any(|cell| self.is_removable(&self.group_at(grid, cell)))
    }
}

/// Flood-fill rule
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionFinder;

impl MatchFinder for RegionFinder {
    fn group_at(&self, grid: &Grid, cell: Cell) -> CellSet {
        connected_region(grid, cell)
    }

    // Regions partition the board, so every visited cell is settled whether
    // or not its region turned out removable.
    fn all_removable_groups(&self, grid: &Grid) -> Vec<CellSet> {
        let mut visited = CellSet::new();
        let mut groups = Vec::new();

        for cell in grid.cells() {
            if !grid.is_occupied(cell) || visited.contains(&cell) {
                continue;
            }
            let region = connected_region(grid, cell);
            visited.extend(region.iter().copied());
            if self.is_removable(&region) {
                groups.push(region);
            }
        }
        groups
    }
}

/// Straight-run rule
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRunFinder;

impl MatchFinder for LineRunFinder {
    fn group_at(&self, grid: &Grid, cell: Cell) -> CellSet {
        line_run(grid, cell)
    }
}

impl MatchFinder for MatchRule {
    fn group_at(&self, grid: &Grid, cell: Cell) -> CellSet {
        match self {
            MatchRule::ConnectedRegion => RegionFinder.group_at(grid, cell),
            MatchRule::LineRun => LineRunFinder.group_at(grid, cell),
        }
    }

    fn all_removable_groups(&self, grid: &Grid) -> Vec<CellSet> {
        match self {
            MatchRule::ConnectedRegion => RegionFinder.all_removable_groups(grid),
            MatchRule::LineRun => LineRunFinder.all_removable_groups(grid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(i32, i32)]) -> CellSet {
        list.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_region_follows_bends() {
        // Bottom row is the last text row.
        let grid = Grid::parse(
            "
            RBB
            RRB
            GRB
            ",
        )
        .unwrap();
        let region = connected_region(&grid, Cell::new(1, 0));
        assert_eq!(region, cells(&[(1, 0), (0, 1), (1, 1), (0, 2)]));
    }

    #[test]
    fn test_region_ignores_diagonals() {
        let grid = Grid::parse(
            "
            RG
            GR
            ",
        )
        .unwrap();
        assert_eq!(connected_region(&grid, Cell::new(0, 1)).len(), 1);
    }

    #[test]
    fn test_region_of_empty_or_outside_is_empty() {
        let grid = Grid::parse("R.R").unwrap();
        assert!(connected_region(&grid, Cell::new(1, 0)).is_empty());
        assert!(connected_region(&grid, Cell::new(7, 7)).is_empty());
    }

    #[test]
    fn test_line_run_is_straight_only() {
        let grid = Grid::parse(
            "
            RRG
            GRG
            GGR
            ",
        )
        .unwrap();
        // Region through (1, 1) bends into (0, 2); the run does not.
        let seed = Cell::new(1, 1);
        assert_eq!(connected_region(&grid, seed).len(), 3);
        assert_eq!(line_run(&grid, seed), cells(&[(1, 1), (1, 2)]));
    }

    #[test]
    fn test_line_run_merges_both_axes() {
        let grid = Grid::parse(
            "
            GRG
            RRG
            GGB
            ",
        )
        .unwrap();
        // L-shape through the seed: right/left arm and up arm.
        let run = line_run(&grid, Cell::new(1, 1));
        assert_eq!(run, cells(&[(0, 1), (1, 1), (1, 2)]));
        assert!(is_removable(&run));
    }

    #[test]
    fn test_booster_area_clipped() {
        let grid = Grid::new(4, 4);
        assert_eq!(booster_area(&grid, Cell::new(1, 1), 1).len(), 9);
        assert_eq!(booster_area(&grid, Cell::new(0, 0), 1).len(), 4);
        assert_eq!(booster_area(&grid, Cell::new(3, 1), 1).len(), 6);
        assert_eq!(booster_area(&grid, Cell::new(2, 2), 0).len(), 1);
    }

    #[test]
    fn test_all_groups_disjoint_and_removable() {
        let grid = Grid::parse(
            "
            RRGB
            RGGB
            YYPB
            ",
        )
        .unwrap();
        let groups = all_removable_groups(&grid);
        assert_eq!(groups.len(), 3);
        let total: usize = groups.iter().map(CellSet::len).sum();
        let union: CellSet = groups.iter().flatten().copied().collect();
        assert_eq!(total, union.len());
        assert!(groups.iter().all(is_removable));
    }

    #[test]
    fn test_dead_board() {
        let grid = Grid::parse(
            "
            RGR
            GRG
            ",
        )
        .unwrap();
        assert!(!has_any_valid_move(&grid));
        assert!(!MatchRule::LineRun.has_any_valid_move(&grid));
    }

    #[test]
    fn test_rules_disagree_on_corner_shape() {
        // Three reds in an L that does not pass straight through every seed.
        let grid = Grid::parse(
            "
            RG
            RR
            ",
        )
        .unwrap();
        let corner_seed = Cell::new(1, 0);
        assert_eq!(MatchRule::ConnectedRegion.group_at(&grid, corner_seed).len(), 3);
        // From (1, 0) the runs are (0, 0) to the left only.
        assert_eq!(MatchRule::LineRun.group_at(&grid, corner_seed).len(), 2);
        // From the elbow both arms are straight.
        assert_eq!(MatchRule::LineRun.group_at(&grid, Cell::new(0, 0)).len(), 3);
    }
}
