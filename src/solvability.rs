use std::fmt::{self, Display, Formatter};

use crate::board::Board;
use crate::data::{BLANK, SIZE};

/// The numbers behind the parity test.
///
/// On a board with an even width a horizontal move changes neither the inversion count
/// nor the blank's row, a vertical move changes the row by one and the inversion count
/// by an odd number (3 tiles are jumped over). So the parity of `I + R` never changes
/// and the goal has `0 + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parity {
    /// Pairs of non-blank tiles out of order, reading row by row
    pub inversions: u32,
    /// 1 for the bottom row, 4 for the top one
    pub blank_row_from_bottom: u8,
}

impl Parity {
    pub fn of(board: &Board) -> Parity {
        let tiles: Vec<u8> = board
            .tiles()
            .iter()
            .cloned()
            .filter(|&t| t != BLANK)
            .collect();

        let mut inversions = 0;
        for (i, &a) in tiles.iter().enumerate() {
            inversions += tiles[i + 1..].iter().filter(|&&b| a > b).count() as u32;
        }

        Parity {
            inversions,
            blank_row_from_bottom: SIZE - board.blank_pos().r,
        }
    }

    pub fn sum(&self) -> u32 {
        self.inversions + u32::from(self.blank_row_from_bottom)
    }

    pub fn is_solvable(&self) -> bool {
        self.sum() % 2 == 1
    }
}

impl Display for Parity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inversions (I): {}", self.inversions)?;
        writeln!(f, "Blank row from bottom (R): {}", self.blank_row_from_bottom)?;
        write!(
            f,
            "I + R = {} is {} -> {}",
            self.sum(),
            if self.sum() % 2 == 1 { "odd" } else { "even" },
            if self.is_solvable() {
                "solvable"
            } else {
                "not solvable"
            }
        )
    }
}

/// Whether the goal can be reached from `board` at all.
pub fn is_solvable(board: &Board) -> bool {
    Parity::of(board).is_solvable()
}
