use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Pos, BLANK, CELLS, SIZE};
use crate::moves::{Move, Moves, ALL_MOVES};
use crate::parser::ParserErr;

/// A 4x4 board, tiles in row-major order, `0` is the blank.
///
/// Boards are small `Copy` values and are never mutated in place,
/// every move produces a new board.
/// The blank index is cached but it's fully determined by the tiles
/// so the derived `Eq` and `Hash` are still purely structural.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    tiles: [u8; CELLS],
    blank: u8,
}

impl Board {
    pub const GOAL: Board = Board {
        tiles: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0],
        blank: (CELLS - 1) as u8,
    };

    /// Fails unless `tiles` is a permutation of `0..16`.
    pub fn new(tiles: [u8; CELLS]) -> Result<Board, ParserErr> {
        let out_of_range: Vec<_> = tiles
            .iter()
            .cloned()
            .filter(|&t| usize::from(t) >= CELLS)
            .collect();
        if !out_of_range.is_empty() {
            return Err(ParserErr::OutOfRange(
                out_of_range.iter().map(u8::to_string).collect(),
            ));
        }

        let mut counts = [0u8; CELLS];
        for &t in &tiles {
            counts[usize::from(t)] += 1;
        }
        let duplicates: Vec<u8> = (0..CELLS as u8)
            .filter(|&t| counts[usize::from(t)] > 1)
            .collect();
        let missing: Vec<u8> = (0..CELLS as u8)
            .filter(|&t| counts[usize::from(t)] == 0)
            .collect();
        if !duplicates.is_empty() || !missing.is_empty() {
            return Err(ParserErr::NotPermutation {
                duplicates,
                missing,
            });
        }

        Ok(Board::from_tiles_unchecked(tiles))
    }

    fn from_tiles_unchecked(tiles: [u8; CELLS]) -> Board {
        let blank = tiles
            .iter()
            .position(|&t| t == BLANK)
            .expect("a permutation always contains the blank");
        Board {
            tiles,
            blank: blank as u8,
        }
    }

    pub fn goal() -> Board {
        Board::GOAL
    }

    pub fn is_goal(&self) -> bool {
        *self == Board::GOAL
    }

    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// Row-major index of the blank
    pub fn blank_index(&self) -> usize {
        usize::from(self.blank)
    }

    pub(crate) fn blank_pos(&self) -> Pos {
        Pos::from_index(self.blank_index())
    }

    /// Tiles with their current positions, blank included
    pub(crate) fn positions(&self) -> impl Iterator<Item = (Pos, u8)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &t)| (Pos::from_index(i), t))
    }

    pub(crate) fn at(&self, pos: Pos) -> u8 {
        self.tiles[pos.index()]
    }

    pub fn can_move(&self, mov: Move) -> bool {
        let blank = self.blank_pos();
        match mov {
            Move::Up => blank.r > 0,
            Move::Down => blank.r < SIZE - 1,
            Move::Left => blank.c > 0,
            Move::Right => blank.c < SIZE - 1,
        }
    }

    /// Slides the blank one cell, `None` if that would leave the board.
    ///
    /// The edge check is done on the row and column separately
    /// so left and right can never wrap around to the neighboring row.
    pub fn apply(self, mov: Move) -> Option<Board> {
        if !self.can_move(mov) {
            return None;
        }

        let from = self.blank_index();
        let to = (from as i8 + mov.offset()) as usize;
        debug_assert_eq!(
            Pos::from_index(from).dist(Pos::from_index(to)),
            1,
            "moves must stay on the board"
        );

        let mut tiles = self.tiles;
        tiles.swap(from, to);
        Some(Board {
            tiles,
            blank: to as u8,
        })
    }

    /// Legal moves in canonical order
    pub fn legal_moves(self) -> impl Iterator<Item = Move> {
        ALL_MOVES.iter().cloned().filter(move |&m| self.can_move(m))
    }

    /// Successor boards in canonical order
    pub fn neighbors(self) -> impl Iterator<Item = (Move, Board)> {
        ALL_MOVES
            .iter()
            .cloned()
            .filter_map(move |m| self.apply(m).map(|b| (m, b)))
    }

    /// Applies `moves` one by one, stops at the first one that's illegal.
    pub fn replay(self, moves: &Moves) -> Result<Board, MoveErr> {
        let mut board = self;
        for (index, &mov) in moves.iter().enumerate() {
            board = board
                .apply(mov)
                .ok_or(MoveErr::InvalidMove { index, mov })?;
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::GOAL
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(usize::from(SIZE)) {
            let cells: Vec<_> = row
                .iter()
                .map(|&t| {
                    if t == BLANK {
                        " .".to_string()
                    } else {
                        format!("{:2}", t)
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Board{:?}", self.tiles)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveErr {
    /// `index` is the position of the offending move in the replayed sequence
    InvalidMove { index: usize, mov: Move },
}

impl Display for MoveErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MoveErr::InvalidMove { index, mov } => write!(
                f,
                "Invalid move {:?} at step {} - the blank would leave the board",
                mov,
                index + 1
            ),
        }
    }
}

impl Error for MoveErr {}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(tiles: [u8; CELLS]) -> Board {
        Board::new(tiles).unwrap()
    }

    #[test]
    fn goal() {
        assert!(Board::goal().is_goal());
        assert_eq!(Board::goal().blank_index(), 15);
        assert_eq!(
            board([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0]),
            Board::GOAL
        );
    }

    #[test]
    fn rejecting_non_permutations() {
        assert_eq!(
            Board::new([1, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0]),
            Err(ParserErr::NotPermutation {
                duplicates: vec![1],
                missing: vec![2],
            })
        );
        assert_eq!(
            Board::new([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 16, 0]),
            Err(ParserErr::OutOfRange(vec!["16".to_string()]))
        );
    }

    #[test]
    fn legal_moves_in_corners_and_center() {
        let goal = Board::goal();
        assert_eq!(
            goal.legal_moves().collect::<Vec<_>>(),
            vec![Move::Up, Move::Left]
        );

        let top_left = board([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(
            top_left.legal_moves().collect::<Vec<_>>(),
            vec![Move::Down, Move::Right]
        );

        let center = board([1, 2, 3, 4, 5, 0, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(
            center.legal_moves().collect::<Vec<_>>(),
            vec![Move::Up, Move::Down, Move::Left, Move::Right]
        );
    }

    #[test]
    fn no_wrapping_between_rows() {
        // blank at the end of the first row
        let b = board([1, 2, 3, 0, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(b.apply(Move::Right), None);
        assert_eq!(b.apply(Move::Up), None);

        // blank at the start of the second row
        let b = board([1, 2, 3, 4, 0, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(b.apply(Move::Left), None);
        assert_eq!(
            b.apply(Move::Right),
            Some(board([1, 2, 3, 4, 5, 0, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]))
        );
    }

    #[test]
    fn applying_moves() {
        let goal = Board::goal();
        let b = goal.apply(Move::Left).unwrap();
        assert_eq!(
            b,
            board([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15])
        );
        assert_eq!(b.blank_index(), 14);

        let b = goal.apply(Move::Up).unwrap();
        assert_eq!(
            b,
            board([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 13, 14, 15, 12])
        );
        assert_eq!(goal.apply(Move::Down), None);
        assert_eq!(goal.apply(Move::Right), None);
    }

    #[test]
    fn moves_round_trip() {
        // walk the blank around every cell and check every legal move there
        let mut b = board([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        let snake = "rrrdllldrrrdlll".parse::<Moves>().unwrap();
        for &step in &snake {
            for (mov, next) in b.neighbors() {
                assert_eq!(next.apply(mov.inverse()), Some(b));
                assert_ne!(next, b);
            }
            b = b.apply(step).unwrap();
        }
        assert_eq!(b.blank_index(), 12);
    }

    #[test]
    fn replaying() {
        let moves: Moves = "ulld".parse().unwrap();
        let b = Board::goal().replay(&moves).unwrap();
        assert_eq!(
            b,
            board([1, 2, 3, 4, 5, 6, 7, 8, 9, 14, 10, 11, 13, 0, 15, 12])
        );
        assert_eq!(b.replay(&moves.inverted_reversed()), Ok(Board::goal()));

        let back_and_forth: Moves = "ulr".parse().unwrap();
        assert_eq!(
            Board::goal().replay(&back_and_forth),
            Ok(Board::goal().apply(Move::Up).unwrap())
        );

        let bad: Moves = "uddd".parse().unwrap();
        assert_eq!(
            Board::goal().replay(&bad),
            Err(MoveErr::InvalidMove {
                index: 2,
                mov: Move::Down
            })
        );
    }

    #[test]
    fn formatting() {
        let expected = " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14 15  .\n";
        assert_eq!(Board::goal().to_string(), expected);
    }
}
