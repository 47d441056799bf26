//! Make/undo consistency: after every mutation the piece masks, occupancy caches, square array
//! and incremental hash must agree with each other and with a full recomputation.

use bitchess::{moves::Move, piece::Color, zobrist::ZHash, Position};

const POSITIONS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
];

/// Play random legal moves, checking the position after every make and every undo
fn random_walk(fen: &str, seed: u64, plies: usize) {
    let rng = fastrand::Rng::with_seed(seed);
    let mut pos: Position = fen.parse().unwrap();
    let mut hashes = vec![pos.hash()];

    for _ in 0..plies {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            break;
        }

        let m = moves.as_slice()[rng.usize(..moves.len())];
        pos.make_move(m);

        assert!(pos.validate().is_ok(), "{fen}: {m} broke the position\n{pos}");
        assert_eq!(pos.hash(), ZHash::new(&pos));
        hashes.push(pos.hash());
    }

    while pos.ply() > 0 {
        hashes.pop();
        pos.undo_move();

        assert!(pos.validate().is_ok(), "{fen}: undo broke the position\n{pos}");
        assert_eq!(Some(&pos.hash()), hashes.last());
    }

    let original: Position = fen.parse().unwrap();
    assert_eq!(pos.to_record(), original.to_record());
}

#[test]
fn random_walks_stay_consistent() {
    for (i, fen) in POSITIONS.iter().enumerate() {
        for seed in 0..8 {
            random_walk(fen, seed * 31 + i as u64, 120);
        }
    }
}

#[test]
fn occupancy_matches_masks() {
    let pos: Position = POSITIONS[1].parse().unwrap();

    for color in Color::ALL {
        let union = bitchess::piece::PieceType::ALL
            .into_iter()
            .fold(bitchess::bitboard::BitBoard::EMPTY, |acc, kind| acc | pos.pieces(color, kind));

        assert_eq!(union, pos.color_occupancy(color));
        for square in union {
            assert_eq!(pos.piece_at(square).map(|p| p.color()), Some(color));
        }
    }
    assert_eq!(
        pos.occupancy(),
        pos.color_occupancy(Color::White) | pos.color_occupancy(Color::Black)
    );
}

#[test]
fn generation_is_idempotent() {
    for fen in POSITIONS {
        let pos: Position = fen.parse().unwrap();

        let mut first: Vec<Move> = pos.legal_moves().into_iter().collect();
        let mut second: Vec<Move> = pos.moves(pos.side(), false).collect();
        let mut visited = Vec::new();
        pos.gen_all_moves(pos.side(), false, &mut |m: Move| visited.push(m));

        first.sort_by_key(|m| m.0);
        second.sort_by_key(|m| m.0);
        visited.sort_by_key(|m| m.0);

        assert_eq!(first, second);
        assert_eq!(first, visited);
    }
}

#[test]
fn illegal_moves_rejected() {
    let mut pos = Position::default();

    assert!(pos.play("e2e5").is_err());
    assert!(pos.play("zz").is_err());
    assert!(pos.play("e1e2").is_err());
    assert_eq!(pos.ply(), 0);
}
