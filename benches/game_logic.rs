use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_blast::core::{
    all_removable_groups, connected_region, GameConfig, GameSession, Grid, MatchFinder,
    TileSource,
};
use tile_blast::engine::best_move;
use tile_blast::types::{Cell, MatchRule};

fn random_grid(width: u16, height: u16, type_count: u8) -> Grid {
    let mut grid = Grid::new(width, height);
    TileSource::new(12345, type_count).fill(&mut grid);
    grid
}

fn bench_region_search(c: &mut Criterion) {
    // Worst case: the whole board is one region.
    let grid = random_grid(16, 16, 1);

    c.bench_function("connected_region_16x16_single_kind", |b| {
        b.iter(|| connected_region(black_box(&grid), black_box(Cell::new(8, 8))))
    });
}

fn bench_full_scan(c: &mut Criterion) {
    let grid = random_grid(8, 8, 5);

    c.bench_function("all_removable_groups_8x8", |b| {
        b.iter(|| all_removable_groups(black_box(&grid)))
    });

    c.bench_function("line_run_has_any_valid_move_8x8", |b| {
        b.iter(|| MatchRule::LineRun.has_any_valid_move(black_box(&grid)))
    });
}

fn bench_move_resolution(c: &mut Criterion) {
    let config = GameConfig::default().with_target_score(u32::MAX);
    let session = GameSession::new(config).unwrap();
    let cell = best_move(&session).unwrap().cell;

    c.bench_function("resolve_best_move_8x8", |b| {
        b.iter_batched(
            || session.clone(),
            |mut s| s.attempt_move(black_box(cell)),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_new_game(c: &mut Criterion) {
    c.bench_function("new_game_8x8", |b| {
        b.iter(|| GameSession::new(black_box(GameConfig::default())))
    });
}

criterion_group!(
    benches,
    bench_region_search,
    bench_full_scan,
    bench_move_resolution,
    bench_new_game
);
criterion_main!(benches);
