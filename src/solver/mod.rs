pub mod heuristic;
pub mod stats;

mod a_star;
mod backtracking;
mod bfs;
mod bidirectional;

use std::fmt::{self, Debug, Display, Formatter};
use std::time::Instant;

use log::debug;
use separator::Separatable;

use crate::board::Board;
use crate::config::{Limits, Method};
use crate::moves::Moves;
use crate::solvability::is_solvable;
use crate::Solve;

use self::stats::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Expansions,
    Time,
}

impl Display for Limit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Limit::Expansions => write!(f, "expansion limit"),
            Limit::Time => write!(f, "time limit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    ExceededLimit(Limit),
    NoPathExists,
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Reason::ExceededLimit(limit) => write!(f, "Exceeded {}", limit),
            Reason::NoPathExists => write!(f, "No path exists"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved { moves: Moves, expansions: u64 },
    Unsolved { reason: Reason, expansions: u64 },
}

impl Outcome {
    pub fn moves(&self) -> Option<&Moves> {
        match self {
            Outcome::Solved { moves, .. } => Some(moves),
            Outcome::Unsolved { .. } => None,
        }
    }

    pub fn expansions(&self) -> u64 {
        match *self {
            Outcome::Solved { expansions, .. } | Outcome::Unsolved { expansions, .. } => expansions,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.moves().is_some()
    }
}

pub struct Report {
    pub outcome: Outcome,
    /// Bidirectional search adds up both sides, each counting depth from its own root
    pub stats: Stats,
    pub method: Method,
}

impl Report {
    fn new(outcome: Outcome, stats: Stats, method: Method) -> Self {
        Self {
            outcome,
            stats,
            method,
        }
    }
}

impl Debug for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Solved { ref moves, .. } => writeln!(f, "{}: {}", self.method, moves.len())?,
            Outcome::Unsolved { reason, .. } => writeln!(f, "{}: {}", self.method, reason)?,
        }
        write!(f, "{:?}", self.stats)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.outcome {
            Outcome::Solved { ref moves, .. } => {
                writeln!(f, "Solution: {}", moves)?;
                writeln!(f, "Moves: {}", moves.len())?;
            }
            Outcome::Unsolved { reason, .. } => writeln!(f, "No solution: {}", reason)?,
        }
        writeln!(
            f,
            "Expansions: {}",
            self.outcome.expansions().separated_string()
        )?;
        write!(f, "{}", self.stats)
    }
}

/// Expansion counter and deadline shared by all search methods.
#[derive(Debug)]
pub(crate) struct Budget {
    expansions: u64,
    max_expansions: u64,
    deadline: Option<Instant>,
}

impl Budget {
    /// The clock starts now.
    pub(crate) fn new(limits: Limits) -> Self {
        Budget {
            expansions: 0,
            max_expansions: limits.max_expansions,
            // a timeout too large to represent is no timeout
            deadline: limits
                .timeout
                .and_then(|timeout| Instant::now().checked_add(timeout)),
        }
    }

    pub(crate) fn expansions(&self) -> u64 {
        self.expansions
    }

    /// Counts one expansion, fails once the counter reaches the maximum or time is up.
    pub(crate) fn expand(&mut self) -> Result<(), Limit> {
        self.expansions += 1;
        if self.expansions >= self.max_expansions {
            return Err(Limit::Expansions);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Limit::Time),
            _ => Ok(()),
        }
    }

    pub(crate) fn solved(&self, moves: Moves) -> Outcome {
        debug!(
            "Solved with {} moves after {} expansions",
            moves.len(),
            self.expansions
        );
        Outcome::Solved {
            moves,
            expansions: self.expansions,
        }
    }

    pub(crate) fn exceeded(&self, limit: Limit) -> Outcome {
        debug!("Hit the {} after {} expansions", limit, self.expansions);
        Outcome::Unsolved {
            reason: Reason::ExceededLimit(limit),
            expansions: self.expansions,
        }
    }

    pub(crate) fn exhausted(&self) -> Outcome {
        debug!("Ran out of states after {} expansions", self.expansions);
        Outcome::Unsolved {
            reason: Reason::NoPathExists,
            expansions: self.expansions,
        }
    }
}

/// Progress output for the first state expanded at a new depth.
pub(crate) fn print_new_depth(stats: &Stats, depth: u16, print_status: bool) {
    if print_status {
        println!("Visited new depth: {}", depth);
        println!("{:?}", stats);
    }
}

impl Solve for Board {
    fn solve(&self, method: Method, limits: Limits, print_status: bool) -> Report {
        solve(self, method, limits, print_status)
    }
}

/// Finds a shortest sequence of blank moves from `board` to the goal.
///
/// Boards that fail the parity test are rejected without searching.
/// Running out of states on a board that passed it means the parity test
/// or the search is broken so that panics instead of returning.
pub fn solve(board: &Board, method: Method, limits: Limits, print_status: bool) -> Report {
    debug!("Solving {:?} using {} ({})", board, method, limits);

    if !is_solvable(board) {
        debug!("Parity test failed, not searching");
        let outcome = Outcome::Unsolved {
            reason: Reason::NoPathExists,
            expansions: 0,
        };
        return Report::new(outcome, Stats::new(), method);
    }

    let (outcome, stats) = match method {
        Method::AStar => a_star::search(board, limits, print_status),
        Method::Bfs => bfs::search(board, limits, print_status),
        Method::Bidirectional => bidirectional::search(board, limits, print_status),
    };

    if let Outcome::Unsolved {
        reason: Reason::NoPathExists,
        expansions,
    } = outcome
    {
        panic!(
            "{} exhausted all {} reachable states of solvable board {:?}",
            method, expansions, board
        );
    }

    Report::new(outcome, stats, method)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::moves::Move;
    use crate::scramble::{random_solvable, scramble};

    const METHODS: [Method; 3] = [Method::AStar, Method::Bfs, Method::Bidirectional];

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn moves(report: &Report) -> &Moves {
        report.outcome.moves().expect("should be solved")
    }

    #[test]
    fn goal_needs_no_moves() {
        for &method in &METHODS {
            let report = Board::goal().solve(method, Limits::default(), false);
            assert_eq!(
                report.outcome,
                Outcome::Solved {
                    moves: Moves::default(),
                    expansions: 0,
                },
                "{}",
                method
            );
        }
    }

    #[test]
    fn one_move() {
        let b = board("1 2 3 4 5 6 7 8 9 10 11 0 13 14 15 12");
        for &method in &METHODS {
            let report = b.solve(method, Limits::default(), false);
            assert_eq!(moves(&report), &Moves::new(vec![Move::Down]), "{}", method);
            assert_eq!(b.replay(moves(&report)), Ok(Board::goal()));
        }
    }

    #[test]
    fn unsolvable_is_not_searched() {
        let b = board("2 1 3 4 5 6 7 8 9 10 11 12 13 14 15 0");
        assert!(!is_solvable(&b));
        for &method in &METHODS {
            let report = solve(&b, method, Limits::default(), false);
            assert_eq!(
                report.outcome,
                Outcome::Unsolved {
                    reason: Reason::NoPathExists,
                    expansions: 0,
                }
            );
            assert_eq!(report.stats.total_created(), 0);
        }
    }

    #[test]
    fn thirty_random_moves() {
        // an undo-allowed walk usually ends up close to the goal,
        // take the first one that all three methods finish quickly
        let (b, walk) = (0..1000)
            .map(|seed| scramble(30, false, &mut SmallRng::seed_from_u64(seed)))
            .find(|(b, _)| {
                let limits = Limits::default().with_max_expansions(20_000);
                let report = solve(b, Method::Bidirectional, limits, false);
                report.outcome.moves().map_or(false, |m| m.len() <= 12)
            })
            .expect("some 30 move walk ends within 12 moves of the goal");
        assert_eq!(walk.len(), 30);

        let lens: Vec<_> = METHODS
            .iter()
            .map(|&method| {
                let report = solve(&b, method, Limits::default(), false);
                let solution = moves(&report);
                assert_eq!(b.replay(solution), Ok(Board::goal()), "{}", method);
                solution.len()
            })
            .collect();
        assert_eq!(lens[0], lens[1]);
        assert_eq!(lens[1], lens[2]);
        assert!(lens[0] <= walk.len());
    }

    #[test]
    fn thirty_moves_without_undo() {
        // far deeper than the walk above, bfs would take too long here
        let (b, walk) = scramble(30, true, &mut SmallRng::seed_from_u64(0));
        let a_star = solve(&b, Method::AStar, Limits::default(), false);
        let bidirectional = solve(&b, Method::Bidirectional, Limits::default(), false);

        let len = moves(&bidirectional).len();
        assert!(len > 12 && len <= walk.len(), "{}", len);
        assert_eq!(len % 2, walk.len() % 2);
        assert_eq!(moves(&a_star).len(), len);
        assert_eq!(b.replay(moves(&a_star)), Ok(Board::goal()));
        assert_eq!(b.replay(moves(&bidirectional)), Ok(Board::goal()));
    }

    #[test]
    fn methods_agree_on_length() {
        for seed in 0..40 {
            let (b, walk) = scramble(12, seed % 2 == 0, &mut SmallRng::seed_from_u64(seed));
            let bfs = solve(&b, Method::Bfs, Limits::default(), false);
            let optimal = moves(&bfs).len();
            assert!(optimal <= walk.len());
            // every move changes the parity of the blank's position
            assert_eq!(optimal % 2, walk.len() % 2);

            for &method in &[Method::AStar, Method::Bidirectional] {
                let report = solve(&b, method, Limits::default(), false);
                assert_eq!(moves(&report).len(), optimal, "{} {:?}", method, b);
                assert_eq!(b.replay(moves(&report)), Ok(Board::goal()));
            }
        }
    }

    #[test]
    fn expansion_limit() {
        // random boards are around 50 moves from the goal
        let b = random_solvable(&mut SmallRng::seed_from_u64(3));
        for &method in &METHODS {
            let report = solve(&b, method, Limits::default().with_max_expansions(50), false);
            assert_eq!(
                report.outcome,
                Outcome::Unsolved {
                    reason: Reason::ExceededLimit(Limit::Expansions),
                    expansions: 50,
                },
                "{}",
                method
            );
            assert_eq!(report.stats.total_unique_visited(), 50);
        }
    }

    #[test]
    fn zero_timeout() {
        let b = board("1 2 3 4 5 6 7 8 9 10 11 0 13 14 15 12");
        for &method in &METHODS {
            let limits = Limits::default().with_timeout(Duration::from_secs(0));
            let report = solve(&b, method, limits, false);
            assert_eq!(
                report.outcome,
                Outcome::Unsolved {
                    reason: Reason::ExceededLimit(Limit::Time),
                    expansions: 1,
                },
                "{}",
                method
            );
        }

        // nothing to expand
        let limits = Limits::default().with_timeout(Duration::from_secs(0));
        assert!(solve(&Board::goal(), Method::AStar, limits, false)
            .outcome
            .is_solved());
    }

    #[test]
    fn budget() {
        let mut budget = Budget::new(Limits::new(3, None));
        assert_eq!(budget.expand(), Ok(()));
        assert_eq!(budget.expand(), Ok(()));
        assert_eq!(budget.expand(), Err(Limit::Expansions));
        assert_eq!(budget.expansions(), 3);

        let budget = Budget::new(Limits::new(3, Some(Duration::from_secs(u64::max_value()))));
        assert_eq!(budget.deadline, None);
    }

    #[test]
    fn formatting() {
        let b = board("1 2 3 4 5 6 7 8 9 10 11 0 13 14 15 12");
        let report = solve(&b, Method::Bfs, Limits::default(), false);
        let text = report.to_string();
        assert!(text.starts_with("Solution: d\nMoves: 1\nExpansions: 1\n"), "{}", text);
        assert!(format!("{:?}", report).starts_with("bfs: 1\n"));

        let limited = solve(&b, Method::Bfs, Limits::new(0, None), false);
        assert!(limited
            .to_string()
            .starts_with("No solution: Exceeded expansion limit\nExpansions: 1\n"));
    }
}
