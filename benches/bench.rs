use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sudoku_solver::sudoku::codec;
use sudoku_solver::sudoku::solver::{Backtracker, EXAMPLE_PUZZLE, SELFTEST_PAIRS};

fn bench_example_puzzle(c: &mut Criterion) {
    let board = codec::decode(EXAMPLE_PUZZLE).expect("example puzzle must decode");

    c.bench_function("solve_example_puzzle", |b| {
        b.iter(|| {
            let mut solver = Backtracker::new(black_box(board));
            black_box(solver.solve())
        });
    });
}

fn bench_selftest_corpus(c: &mut Criterion) {
    let boards: Vec<_> = SELFTEST_PAIRS
        .iter()
        .map(|(puzzle, _)| codec::decode(puzzle).expect("corpus puzzle must decode"))
        .collect();

    c.bench_function("solve_selftest_corpus", |b| {
        b.iter(|| {
            for &board in &boards {
                let mut solver = Backtracker::new(black_box(board));
                black_box(solver.solve());
            }
        });
    });
}

fn bench_decode_encode(c: &mut Criterion) {
    c.bench_function("decode_example_puzzle", |b| {
        b.iter(|| codec::decode(black_box(EXAMPLE_PUZZLE)));
    });

    let board = codec::decode(EXAMPLE_PUZZLE).expect("example puzzle must decode");
    c.bench_function("encode_compact", |b| {
        b.iter(|| codec::encode_compact(black_box(&board)));
    });
}

criterion_group!(
    benches,
    bench_example_puzzle,
    bench_selftest_corpus,
    bench_decode_encode
);
criterion_main!(benches);
