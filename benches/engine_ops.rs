use anti_2048::engine::{Board, GameState, Move};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = GameState::new(&mut rng);
    let mut boards = vec![*state.board()];
    // Derive a variety of densities deterministically
    for _ in 0..64 {
        if state.is_lost() {
            break;
        }
        let legal = state.legal_moves();
        let dir = legal[rng.gen_range(0..legal.len())];
        state = state.apply_move_and_spawn(dir, &mut rng);
        boards.push(*state.board());
    }
    boards
}

fn bench_shift(c: &mut Criterion) {
    let boards = corpus();
    for dir in Move::ALL {
        c.bench_function(&format!("shift/{:?}", dir), |bch| {
            bch.iter(|| {
                let mut acc = 0u64;
                for &bd in &boards {
                    acc = acc.wrapping_add(u64::from(bd.shift(dir).highest_tile()));
                }
                black_box(acc)
            })
        });
    }
}

fn bench_legal_moves(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("legal_moves", |bch| {
        bch.iter(|| {
            let mut acc = 0usize;
            for bd in &boards {
                acc += bd.legal_moves().len();
            }
            black_box(acc)
        })
    });
}

fn bench_is_lost(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("is_lost", |bch| {
        bch.iter(|| {
            let mut acc = 0usize;
            for bd in &boards {
                acc += usize::from(bd.is_lost());
            }
            black_box(acc)
        })
    });
}

criterion_group!(engine_ops, bench_shift, bench_legal_moves, bench_is_lost);
criterion_main!(engine_ops);
