//! Grid module - owns the tile records of a board
//!
//! The grid is a `width x height` array of optional tiles stored flat in
//! row-major order, bottom row first (`y * width + x`). It carries no game
//! rules: callers decide what may be removed, moved, or spawned.
//!
//! A text form is provided for tests and debugging. Each line is one row,
//! **top row first**, one kind letter per cell (`R G B Y P O`) and `.` for an
//! empty cell:
//!
//! ```
//! use tile_blast_core::Grid;
//! use tile_blast_core::types::{Cell, TileKind};
//!
//! let grid = Grid::parse("
//!     RGB
//!     RR.
//! ").unwrap();
//!
//! assert_eq!(grid.width(), 3);
//! assert_eq!(grid.kind_at(Cell::new(0, 0)), Some(TileKind::Red));
//! assert_eq!(grid.kind_at(Cell::new(2, 1)), Some(TileKind::Blue));
//! assert_eq!(grid.get(Cell::new(2, 0)), None);
//! ```

use std::fmt;

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::types::{Cell, Tile, TileKind};

/// Orthogonal neighbour offsets: right, left, up, down
const NEIGHBOURS_4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Error returned by [`Grid::parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    #[error("board text has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile letter {letter:?} in row {row}")]
    UnknownKind { letter: char, row: usize },
    #[error("board dimensions exceed {max} cells per side")]
    TooLarge { max: usize },
}

/// A rectangular board of optional tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x), y = 0 first
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from a cell, `None` when out of bounds
    #[inline(always)]
    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width as i32 && cell.y < self.height as i32
    }

    /// Tile at `cell`; `None` when the cell is empty or out of bounds
    pub fn get(&self, cell: Cell) -> Option<Tile> {
        self.index(cell).and_then(|idx| self.cells[idx])
    }

    pub fn kind_at(&self, cell: Cell) -> Option<TileKind> {
        self.get(cell).map(|tile| tile.kind)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Set the tile at `cell`.
    /// Returns false if out of bounds
    pub fn set(&mut self, cell: Cell, tile: Option<Tile>) -> bool {
        match self.index(cell) {
            Some(idx) => {
                self.cells[idx] = tile;
                true
            }
            None => false,
        }
    }

    /// Remove and return the tile at `cell`
    pub fn take(&mut self, cell: Cell) -> Option<Tile> {
        self.index(cell).and_then(|idx| self.cells[idx].take())
    }

    /// True when every cell holds a tile
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Every in-bounds cell, row-major, bottom row first
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Cell::new(x, y)))
    }

    /// In-bounds orthogonal neighbours of `cell`
    pub fn neighbors(&self, cell: Cell) -> ArrayVec<Cell, 4> {
        NEIGHBOURS_4
            .iter()
            .map(|&(dx, dy)| cell.offset(dx, dy))
            .filter(|&n| self.in_bounds(n))
            .collect()
    }

    /// Raw tile slice, row-major, bottom row first
    pub fn tiles(&self) -> &[Option<Tile>] {
        &self.cells
    }

    /// Parse the text form described in the module docs.
    ///
    /// Blank lines and surrounding whitespace are ignored, so indented raw
    /// strings work.
    pub fn parse(text: &str) -> Result<Self, GridParseError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridParseError::Empty);
        };

        let width = first.chars().count();
        let height = rows.len();
        let max = u16::MAX as usize;
        if width > max || height > max {
            return Err(GridParseError::TooLarge { max });
        }

        let mut grid = Grid::new(width as u16, height as u16);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridParseError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            // First text row is the top of the board.
            let y = (height - 1 - row) as i32;
            for (x, letter) in line.chars().enumerate() {
                let tile = match letter {
                    '.' => None,
                    _ => match TileKind::from_char(letter) {
                        Some(kind) => Some(Tile::new(kind)),
                        None => return Err(GridParseError::UnknownKind { letter, row }),
                    },
                };
                grid.set(Cell::new(x as i32, y), tile);
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height as i32).rev() {
            for x in 0..self.width as i32 {
                let c = self
                    .kind_at(Cell::new(x, y))
                    .map(TileKind::as_char)
                    .unwrap_or('.');
                write!(f, "{c}")?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.index(Cell::new(0, 0)), Some(0));
        assert_eq!(grid.index(Cell::new(3, 0)), Some(3));
        assert_eq!(grid.index(Cell::new(0, 1)), Some(4));
        assert_eq!(grid.index(Cell::new(3, 2)), Some(11));
        assert_eq!(grid.index(Cell::new(-1, 0)), None);
        assert_eq!(grid.index(Cell::new(4, 0)), None);
        assert_eq!(grid.index(Cell::new(0, 3)), None);
    }

    #[test]
    fn test_grid_flat_storage() {
        let mut grid = Grid::new(4, 3);
        grid.set(Cell::new(1, 2), Some(Tile::new(TileKind::Blue)));
        assert_eq!(grid.cells[2 * 4 + 1], Some(Tile::new(TileKind::Blue)));
    }

    #[test]
    fn test_neighbors_clipped_at_corner() {
        let grid = Grid::new(3, 3);
        let corner = grid.neighbors(Cell::new(0, 0));
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&Cell::new(1, 0)));
        assert!(corner.contains(&Cell::new(0, 1)));
        assert_eq!(grid.neighbors(Cell::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_parse_display_roundtrip() {
        let text = "RGB\nY.P\nOOR";
        let grid = Grid::parse(text).unwrap();
        assert_eq!(grid.to_string(), text);
        assert_eq!(grid.kind_at(Cell::new(0, 2)), Some(TileKind::Red));
        assert_eq!(grid.kind_at(Cell::new(0, 0)), Some(TileKind::Orange));
        assert_eq!(grid.empty_count(), 1);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Grid::parse("  \n "), Err(GridParseError::Empty));
        assert_eq!(
            Grid::parse("RG\nR"),
            Err(GridParseError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Grid::parse("RX"),
            Err(GridParseError::UnknownKind { letter: 'X', row: 0 })
        );
    }
}
