// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod board;
pub mod config;
pub mod moves;
pub mod parser;
pub mod scramble;
pub mod solvability;
pub mod solver;

mod data;
mod fs;

use std::error::Error;

pub use crate::board::{Board, MoveErr};
pub use crate::config::{Limits, Method};
pub use crate::moves::{Move, Moves};
pub use crate::parser::ParserErr;
pub use crate::scramble::{random_solvable, scramble};
pub use crate::solvability::{is_solvable, Parity};
pub use crate::solver::heuristic::heuristic;
pub use crate::solver::stats::Stats;
pub use crate::solver::{solve, Limit, Outcome, Reason, Report};

pub trait LoadBoard {
    fn load_board(&self) -> Result<Board, Box<dyn Error>>;
}

pub trait Solve {
    fn solve(&self, method: Method, limits: Limits, print_status: bool) -> Report;
}
