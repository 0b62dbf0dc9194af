use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, GameState, PieceBag};
use blockfall::types::{PieceKind, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if !state.tick(black_box(TICK_MS)) && state.active().is_none() {
                state.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for row in 16..20 {
                for col in 0..10 {
                    board.set(row, col, Some(PieceKind::I));
                }
            }
            black_box(board.clear_full_lines());
        })
    });
}

fn bench_bag_draw(c: &mut Criterion) {
    let mut bag = PieceBag::new(12345);

    c.bench_function("bag_draw", |b| b.iter(|| black_box(bag.draw())));
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut right = true;

    c.bench_function("move", |b| {
        b.iter(|| {
            let moved = if right {
                state.move_right()
            } else {
                state.move_left()
            };
            if !moved {
                right = !right;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate_cw();
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop_and_lock", |b| {
        b.iter(|| {
            if !state.hard_drop() {
                state.restart();
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_bag_draw,
    bench_move,
    bench_rotate,
    bench_hard_drop
);
criterion_main!(benches);
