use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::board::Board;
use crate::data::CELLS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    Count(usize),
    NotANumber(String),
    /// Tokens as written, in input order
    OutOfRange(Vec<String>),
    NotPermutation { duplicates: Vec<u8>, missing: Vec<u8> },
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Count(cnt) => write!(
                f,
                "Read {} values, exactly {} are required",
                cnt, CELLS
            ),
            ParserErr::NotANumber(ref token) => write!(f, "'{}' is not an integer", token),
            ParserErr::OutOfRange(ref values) => {
                write!(
                    f,
                    "Values out of range [0..{}]: {}",
                    CELLS - 1,
                    values.join(", ")
                )
            }
            ParserErr::NotPermutation {
                ref duplicates,
                ref missing,
            } => {
                write!(f, "Not a permutation of 0..{}", CELLS - 1)?;
                if !duplicates.is_empty() {
                    write!(f, " - duplicates: {:?}", duplicates)?;
                }
                if !missing.is_empty() {
                    write!(f, " - missing: {:?}", missing)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Board {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses 16 integers separated by whitespace and/or commas (newlines included)
/// so both `1 2 3 ...` and a 4x4 grid with one row per line work.
pub(crate) fn parse(text: &str) -> Result<Board, ParserErr> {
    let tokens: Vec<_> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() != CELLS {
        return Err(ParserErr::Count(tokens.len()));
    }

    let mut tiles = [0; CELLS];
    let mut out_of_range = Vec::new();
    for (tile, token) in tiles.iter_mut().zip(tokens) {
        match token.parse::<i64>() {
            Ok(value) if value >= 0 && value < CELLS as i64 => *tile = value as u8,
            Ok(_) => out_of_range.push(token.to_string()),
            // still an integer, just too large for i64
            Err(ref err) if overflowed(err) => out_of_range.push(token.to_string()),
            Err(_) => return Err(ParserErr::NotANumber(token.to_string())),
        }
    }
    if !out_of_range.is_empty() {
        return Err(ParserErr::OutOfRange(out_of_range));
    }

    Board::new(tiles)
}

fn overflowed(err: &ParseIntError) -> bool {
    matches!(
        err.kind(),
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
    )
}
