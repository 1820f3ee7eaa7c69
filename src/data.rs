/// Rows and columns of the board
pub(crate) const SIZE: u8 = 4;
/// Number of cells including the blank
pub(crate) const CELLS: usize = (SIZE * SIZE) as usize;

pub(crate) const BLANK: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pos {
    pub(crate) r: u8,
    pub(crate) c: u8,
}

impl Pos {
    pub(crate) fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    pub(crate) fn from_index(index: usize) -> Pos {
        Pos::new(index as u8 / SIZE, index as u8 % SIZE)
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.r) * usize::from(SIZE) + usize::from(self.c)
    }

    /// Where `tile` sits in the goal configuration.
    /// The blank goes last, everything else is shifted by one.
    pub(crate) fn goal_of(tile: u8) -> Pos {
        if tile == BLANK {
            Pos::from_index(CELLS - 1)
        } else {
            Pos::from_index(usize::from(tile) - 1)
        }
    }

    pub(crate) fn dist(self, other: Pos) -> u16 {
        let dr = (i16::from(self.r) - i16::from(other.r)).abs();
        let dc = (i16::from(self.c) - i16::from(other.c)).abs();
        (dr + dc) as u16
    }
}
