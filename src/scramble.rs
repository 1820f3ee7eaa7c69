use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::data::CELLS;
use crate::moves::{Move, Moves};
use crate::solvability::is_solvable;

/// Random walk of `steps` legal moves starting at the goal.
///
/// With `avoid_undo` the walk never immediately reverts its previous move
/// which makes the result noticeably harder for the same number of steps.
/// Returns the board and the moves that produced it.
pub fn scramble<R: Rng + ?Sized>(steps: usize, avoid_undo: bool, rng: &mut R) -> (Board, Moves) {
    let mut board = Board::goal();
    let mut moves = Moves::default();
    let mut last: Option<Move> = None;

    for _ in 0..steps {
        let candidates: Vec<_> = board
            .legal_moves()
            .filter(|&m| !avoid_undo || Some(m.inverse()) != last)
            .collect();
        let &mov = candidates
            .choose(rng)
            .expect("every cell has at least two neighbors");
        board = board
            .apply(mov)
            .expect("only legal moves are considered");
        moves.add(mov);
        last = Some(mov);
    }

    (board, moves)
}

/// Uniformly random board among the solvable ones.
/// Exactly half of all permutations are solvable so this takes 2 shuffles on average.
pub fn random_solvable<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut tiles = [0u8; CELLS];
    for (i, tile) in tiles.iter_mut().enumerate() {
        *tile = i as u8;
    }

    loop {
        tiles.shuffle(rng);
        let board = Board::new(tiles).expect("shuffling keeps a permutation");
        if is_solvable(&board) {
            return board;
        }
    }
}
