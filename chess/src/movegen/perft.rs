/// Perft is a debugging tool for chess move generators: https://www.chessprogramming.org/Perft
/// Since we generate legal moves, once we are at depth 1 we just return how many moves we can
/// generate from that position (bulk counting).
use crate::{moves::Move, position::Position};

impl Position {
    /// Count the leaves of the legal move tree
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let move_list = self.legal_moves();
        if depth == 1 {
            return move_list.len() as u64;
        }

        let mut nodes = 0;
        for m in move_list {
            self.make_move(m);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }

        nodes
    }

    /// Cumulative (divide) perft: leaf count below every root move
    pub fn divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }

        self.legal_moves()
            .into_iter()
            .map(|m| {
                self.make_move(m);
                let nodes = self.perft(depth - 1);
                self.undo_move();

                (m, nodes)
            })
            .collect()
    }
}
