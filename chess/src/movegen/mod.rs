/// Move generation, legality filtering, make/undo and perft, all implemented on Position.
mod gen;
mod legality;
mod make_move;
mod perft;
