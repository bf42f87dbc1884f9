use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pawnshop::game::{
    board::Board, castling_rights::CastlingRights, colour::Colour, perft::perft,
    state::GameState,
};

struct BenchCase {
    name: &'static str,
    diagram: &'static str,
    side: Colour,
    rights: CastlingRights,
    depth: u8,
    expected_nodes: u64,
}

fn cases() -> [BenchCase; 3] {
    [
        BenchCase {
            name: "initial",
            diagram: "rnbqkbnr pppppppp ........ ........ ........ ........ PPPPPPPP RNBQKBNR",
            side: Colour::White,
            rights: CastlingRights::full(),
            depth: 3,
            expected_nodes: 8902,
        },
        BenchCase {
            name: "kiwipete",
            diagram: "r...k..r p.ppqpb. bn..pnp. ...PN... .p..P... ..N..Q.p PPPBBPPP R...K..R",
            side: Colour::White,
            rights: CastlingRights::full(),
            depth: 2,
            expected_nodes: 2039,
        },
        BenchCase {
            name: "endgame",
            diagram: "........ ..p..... ...p.... KP.....r .R...p.k ........ ....P.P. ........",
            side: Colour::White,
            rights: CastlingRights::none(),
            depth: 3,
            expected_nodes: 2812,
        },
    ]
}

fn state_for(case: &BenchCase) -> GameState {
    let board: Board = case.diagram.parse().expect("bench diagram should parse");
    GameState::setup(board, case.side, case.rights, None).expect("bench position should be valid")
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    for case in cases() {
        let mut state = state_for(&case);
        group.bench_function(case.name, |b| b.iter(|| black_box(state.legal_moves())));
    }
    group.finish();
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);
    for case in cases() {
        let mut state = state_for(&case);
        assert_eq!(perft(&mut state, case.depth, true), case.expected_nodes);

        group.throughput(Throughput::Elements(case.expected_nodes));
        group.bench_with_input(
            BenchmarkId::new(case.name, case.depth),
            &case.depth,
            |b, &depth| b.iter(|| perft(black_box(&mut state), depth, true)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_legal_moves, bench_perft);
criterion_main!(benches);
