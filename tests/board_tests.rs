//! Board-level tests: grid text form, gravity, spawning, group search

use tile_blast::core::{
    apply_gravity, connected_region, has_any_valid_move, line_run, spawn_tiles, Grid,
    GridParseError, MatchFinder, TileSource,
};
use tile_blast::types::{Cell, MatchRule, TileKind};

#[test]
fn test_parse_and_display_round_trip() {
    let text = "RGB\nYPO\n.RR";
    let grid = Grid::parse(text).unwrap();
    assert_eq!(grid.width(), 3);
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.kind_at(Cell::new(0, 2)), Some(TileKind::Red));
    assert_eq!(grid.kind_at(Cell::new(0, 0)), None);
    assert_eq!(grid.to_string(), text);
}

#[test]
fn test_parse_errors() {
    assert_eq!(Grid::parse("  \n "), Err(GridParseError::Empty));
    assert!(matches!(
        Grid::parse("RG\nR"),
        Err(GridParseError::Ragged {
            row: 1,
            expected: 2,
            found: 1
        })
    ));
    assert!(matches!(
        Grid::parse("RX"),
        Err(GridParseError::UnknownKind { letter: 'X', .. })
    ));
}

#[test]
fn test_region_is_maximal_four_connected_component() {
    let grid = Grid::parse(
        "
        RRGR
        GRGR
        RRRG
        ",
    )
    .unwrap();
    let region = connected_region(&grid, Cell::new(0, 0));
    let expected: Vec<Cell> = vec![
        Cell::new(0, 0),
        Cell::new(1, 0),
        Cell::new(2, 0),
        Cell::new(1, 1),
        Cell::new(0, 2),
        Cell::new(1, 2),
    ];
    assert_eq!(region.len(), expected.len());
    assert!(expected.iter().all(|c| region.contains(c)));
    // Diagonal and disconnected reds stay out.
    assert!(!region.contains(&Cell::new(3, 1)));
    assert!(!region.contains(&Cell::new(3, 2)));

    // Any seed in the component yields the same component.
    assert_eq!(connected_region(&grid, Cell::new(1, 2)), region);
}

#[test]
fn test_region_of_empty_or_outside_cell_is_empty() {
    let grid = Grid::parse("R.\nRR").unwrap();
    assert!(connected_region(&grid, Cell::new(1, 1)).is_empty());
    assert!(connected_region(&grid, Cell::new(5, 5)).is_empty());
}

#[test]
fn test_line_run_l_shape_and_diagonal() {
    let grid = Grid::parse(
        "
        RGG
        RGR
        RRB
        ",
    )
    .unwrap();
    // Corner of the L: vertical run of 3 plus the red to its right.
    let run = line_run(&grid, Cell::new(0, 0));
    assert_eq!(run.len(), 4);
    assert!(MatchRule::LineRun.is_removable(&run));

    // (2, 1) touches the L only diagonally.
    let lone = line_run(&grid, Cell::new(2, 1));
    assert_eq!(lone.len(), 1);
    assert!(!MatchRule::LineRun.is_removable(&lone));
}

#[test]
fn test_valid_move_detection() {
    let dead = Grid::parse("RGR\nGRG\nRGR").unwrap();
    assert!(!has_any_valid_move(&dead));
    assert!(!MatchRule::LineRun.has_any_valid_move(&dead));

    let live = Grid::parse("RGR\nGRG\nRRR").unwrap();
    assert!(has_any_valid_move(&live));
    assert!(MatchRule::LineRun.has_any_valid_move(&live));
}

#[test]
fn test_gravity_then_spawn_fills_board() {
    let mut grid = Grid::parse(
        "
        R..
        .G.
        B.Y
        ",
    )
    .unwrap();
    let moves = apply_gravity(&mut grid);
    assert_eq!(grid.to_string(), "...\nR..\nBGY");
    assert_eq!(moves.len(), 2);

    let mut source = TileSource::new(42, 4);
    let spawned = spawn_tiles(&mut grid, &mut source);
    assert_eq!(spawned.len(), 5);
    assert!(grid.is_full());
    // Survivors kept their places.
    assert_eq!(grid.kind_at(Cell::new(0, 1)), Some(TileKind::Red));
    assert_eq!(grid.kind_at(Cell::new(1, 0)), Some(TileKind::Green));
}
