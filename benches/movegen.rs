use criterion::{criterion_group, criterion_main, Criterion};
use lib::chess::{legal, Position};

fn bench(c: &mut Criterion) {
    let positions = [
        (
            "opening",
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 6 5",
        ),
        (
            "middlegame",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        ),
        ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    ];

    let mut group = c.benchmark_group("movegen");

    for (name, fen) in positions {
        let pos: Position = fen.parse().unwrap();
        group.bench_function(name, |b| b.iter(|| legal(pos.board())));
    }

    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
