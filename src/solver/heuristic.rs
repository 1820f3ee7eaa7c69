use crate::board::Board;
use crate::data::{Pos, BLANK, SIZE};

/// Estimate of the number of moves left, less is better.
///
/// Manhattan distance plus linear conflict.
/// Never overestimates within 12 moves of the goal (checked exhaustively),
/// further out the pairwise conflict count occasionally does.
pub fn heuristic(board: &Board) -> u16 {
    manhattan(board) + linear_conflict(board)
}

/// Sum of distances of all tiles (not the blank) from their goal positions.
pub fn manhattan(board: &Board) -> u16 {
    board
        .positions()
        .filter(|&(_, tile)| tile != BLANK)
        .map(|(pos, tile)| pos.dist(Pos::goal_of(tile)))
        .sum()
}

/// Two extra moves for every pair of tiles which are both in their goal row (or column)
/// but in the wrong order relative to each other.
///
/// This counts all such pairs in a line, not the smallest number of tiles
/// that have to step aside, so a line with 3 or more tiles in reverse order
/// is charged more than the usual formulation would.
/// That also means a single move can change the estimate by 3.
pub fn linear_conflict(board: &Board) -> u16 {
    let mut conflicts = 0;

    for line in 0..SIZE {
        // goal columns of the tiles that belong to this row, left to right
        let goal_cols: Vec<u8> = (0..SIZE)
            .map(|c| Pos::new(line, c))
            .map(|pos| board.at(pos))
            .filter(|&tile| tile != BLANK)
            .map(Pos::goal_of)
            .filter(|goal| goal.r == line)
            .map(|goal| goal.c)
            .collect();
        conflicts += inversions(&goal_cols);

        // goal rows of the tiles that belong to this column, top to bottom
        let goal_rows: Vec<u8> = (0..SIZE)
            .map(|r| Pos::new(r, line))
            .map(|pos| board.at(pos))
            .filter(|&tile| tile != BLANK)
            .map(Pos::goal_of)
            .filter(|goal| goal.c == line)
            .map(|goal| goal.r)
            .collect();
        conflicts += inversions(&goal_rows);
    }

    2 * conflicts
}

fn inversions(seq: &[u8]) -> u16 {
    let mut cnt = 0;
    for (i, &a) in seq.iter().enumerate() {
        cnt += seq[i + 1..].iter().filter(|&&b| a > b).count() as u16;
    }
    cnt
}
