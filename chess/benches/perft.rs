use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bitchess::{moves::Move, Position, TT, START_FEN};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    depth: usize,
    nodes: u64,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: START_FEN,
        depth: 4,
        nodes: 197_281,
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 3,
        nodes: 97_862,
    },
    BenchCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 5,
        nodes: 674_624,
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    for case in CASES {
        let mut pos: Position = case.fen.parse().expect("bench positions are valid");
        assert_eq!(pos.perft(case.depth), case.nodes, "{}", case.name);

        group.throughput(Throughput::Elements(case.nodes));
        group.bench_with_input(BenchmarkId::new(case.name, case.depth), &case.depth, |b, &depth| {
            b.iter(|| black_box(pos.perft(black_box(depth))))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let pos: Position = CASES[1].fen.parse().expect("bench positions are valid");

    c.bench_function("legal_moves/kiwipete", |b| b.iter(|| black_box(pos.legal_moves())));
    c.bench_function("pseudo_moves/kiwipete", |b| {
        b.iter(|| {
            let mut count = 0;
            pos.gen_all_moves(black_box(pos.side()), false, &mut |_: Move| count += 1);
            black_box(count)
        })
    });
}

fn bench_tt(c: &mut Criterion) {
    let tt = TT::default();
    let pos = Position::default();
    let hash = pos.hash();

    c.bench_function("tt/store_lookup", |b| {
        b.iter(|| {
            tt.store(black_box(hash), 4, 25, bitchess::Bound::Exact, Move::NULL);
            black_box(tt.lookup(black_box(hash)))
        })
    });
}

criterion_group!(benches, bench_perft, bench_movegen, bench_tt);
criterion_main!(benches);
