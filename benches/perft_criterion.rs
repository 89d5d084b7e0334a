use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sage_chess::engine::RuleEngine;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Promotion-free reference positions; the generator emits promotions as a
// single Queen move, so deeper promotion perfts would not match published
// counts.
const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8_902, 197_281],
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2_039],
    },
    BenchCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2_812, 43_238],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.measurement_time(Duration::from_secs(10));

    for case in CASES {
        let depth = case.expected_nodes.len() as u8;
        let expected = *case.expected_nodes.last().expect("cases are non-empty");
        group.throughput(Throughput::Elements(expected));

        group.bench_with_input(
            BenchmarkId::new(case.name, depth),
            &(case.fen, depth),
            |b, &(fen, depth)| {
                let mut engine = RuleEngine::from_fen(fen).expect("bench FEN should parse");
                b.iter(|| {
                    let nodes = engine.perft(black_box(depth));
                    assert_eq!(nodes, expected);
                    nodes
                });
            },
        );
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.measurement_time(Duration::from_secs(10));

    // Out-of-book middlegame position.
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

    for depth in [2u8, 3, 4] {
        group.bench_with_input(BenchmarkId::new("italian", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut engine = RuleEngine::from_fen(fen).expect("bench FEN should parse");
                engine.search(black_box(depth))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_search);
criterion_main!(benches);
