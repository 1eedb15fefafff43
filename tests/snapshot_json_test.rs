use tile_blast::core::{GameConfig, GameSession, Grid, SessionSnapshot};
use tile_blast::types::{BoosterKind, Cell, Phase, PlayerAction, TileKind};

#[test]
fn snapshot_serializes_for_presentation() {
    let config = GameConfig::default().with_target_score(500).with_bomb_charges(2);
    let grid = Grid::parse("RGB\nRRR").unwrap();
    let mut game = GameSession::with_grid(config, grid).unwrap();
    game.arm_booster(BoosterKind::Bomb).unwrap();

    let snap = game.snapshot();
    let v = serde_json::to_value(&snap).unwrap();
    assert_eq!(v["width"], 3);
    assert_eq!(v["height"], 2);
    assert_eq!(v["board"][0], "red");
    assert_eq!(v["board"][5], "blue");
    assert_eq!(v["phase"], "active");
    assert_eq!(v["armed_booster"], "bomb");
    assert_eq!(v["target_score"], 500);

    let back: SessionSnapshot = serde_json::from_value(v).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn snapshot_tracks_turns_and_episodes() {
    let grid = Grid::parse("GBY\nBYG\nRRR").unwrap();
    let mut game = GameSession::with_grid(GameConfig::default(), grid).unwrap();
    game.attempt_move(Cell::new(0, 0)).unwrap();

    let mut snap = SessionSnapshot::default();
    game.snapshot_into(&mut snap);
    assert_eq!(snap.turn, 1);
    assert_eq!(snap.episode_id, 0);
    assert_eq!(snap.board.len(), 9);
    assert!(snap.board.iter().all(Option::is_some));

    game.restart();
    game.snapshot_into(&mut snap);
    assert_eq!(snap.turn, 0);
    assert_eq!(snap.episode_id, 1);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.phase, Phase::Active);
}

#[test]
fn player_actions_parse_from_json() {
    let select: PlayerAction =
        serde_json::from_str(r#"{"type":"select","cell":{"x":2,"y":0}}"#).unwrap();
    assert_eq!(
        select,
        PlayerAction::Select {
            cell: Cell::new(2, 0)
        }
    );

    let arm: PlayerAction =
        serde_json::from_str(r#"{"type":"armBooster","booster":"bomb"}"#).unwrap();
    assert_eq!(
        arm,
        PlayerAction::ArmBooster {
            booster: BoosterKind::Bomb
        }
    );

    let restart: PlayerAction = serde_json::from_str(r#"{"type":"restart"}"#).unwrap();
    assert_eq!(restart, PlayerAction::Restart);
    assert_eq!(TileKind::from_char('O'), Some(TileKind::Orange));
}
