use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::board::Board;
use crate::moves::{Move, Moves};

/// Walks the predecessor chain from `last` back to the root of the search
/// (the only board without a predecessor) and returns the moves in forward order.
pub(crate) fn backtrack_moves<H: BuildHasher>(
    prevs: &HashMap<Board, (Board, Move), H>,
    last: Board,
) -> Moves {
    let mut moves = Vec::new();
    let mut cur = last;
    while let Some(&(prev, mov)) = prevs.get(&cur) {
        moves.push(mov);
        cur = prev;
    }
    moves.reverse();
    Moves::new(moves)
}
