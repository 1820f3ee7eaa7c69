use std::collections::VecDeque;

use fnv::FnvHashMap;
use log::debug;

use crate::board::Board;
use crate::config::Limits;
use crate::moves::{Move, Moves};

use super::backtracking::backtrack_moves;
use super::stats::Stats;
use super::{Budget, Limit, Outcome};

pub(crate) fn search(start: &Board, limits: Limits, print_status: bool) -> (Outcome, Stats) {
    debug!("Bidirectional BFS from {:?}", start);
    let mut search = Bidirectional::new(*start, limits, print_status);
    let outcome = search.run();
    let mut stats = search.forward.stats;
    stats.merge(&search.backward.stats);
    (outcome, stats)
}

/// One half of the search: a plain BFS rooted at either the start or the goal.
///
/// Each side keeps its own stats since depths count from its own root.
#[derive(Debug)]
struct Side {
    name: &'static str,
    to_visit: VecDeque<Board>,
    depths: FnvHashMap<Board, u16>,
    prevs: FnvHashMap<Board, (Board, Move)>,
    stats: Stats,
}

impl Side {
    fn new(name: &'static str, root: Board) -> Self {
        let mut to_visit = VecDeque::new();
        to_visit.push_back(root);
        let mut depths = FnvHashMap::default();
        depths.insert(root, 0);
        let mut stats = Stats::new();
        stats.add_created(0);
        Side {
            name,
            to_visit,
            depths,
            prevs: FnvHashMap::default(),
            stats,
        }
    }

    /// Moves from this side's root to `board`
    fn path_to(&self, board: Board) -> Moves {
        backtrack_moves(&self.prevs, board)
    }

    /// Expands the oldest queued board.
    /// Returns the first successor the other side has already seen.
    fn expand(
        &mut self,
        other: &Side,
        budget: &mut Budget,
        print_status: bool,
    ) -> Result<Option<Board>, Limit> {
        let cur = match self.to_visit.pop_front() {
            Some(board) => board,
            None => return Ok(None),
        };

        let dist = self.depths[&cur];
        if self.stats.add_unique_visited(dist) && print_status {
            println!("Visited new depth: {} (from {})", dist, self.name);
            println!("{:?}", self.stats);
        }
        budget.expand()?;

        for (mov, next) in cur.neighbors() {
            self.stats.add_created(dist + 1);
            if self.depths.contains_key(&next) {
                self.stats.add_reached_duplicate(dist + 1);
                continue;
            }

            self.depths.insert(next, dist + 1);
            self.prevs.insert(next, (cur, mov));
            if other.depths.contains_key(&next) {
                return Ok(Some(next));
            }
            self.to_visit.push_back(next);
        }

        Ok(None)
    }
}

struct Bidirectional {
    forward: Side,
    backward: Side,
    budget: Budget,
    print_status: bool,
}

impl Bidirectional {
    fn new(start: Board, limits: Limits, print_status: bool) -> Self {
        Bidirectional {
            forward: Side::new("start", start),
            backward: Side::new("goal", Board::goal()),
            budget: Budget::new(limits),
            print_status,
        }
    }

    fn run(&mut self) -> Outcome {
        if self.forward.depths.contains_key(&Board::goal()) {
            return self.budget.solved(Moves::default());
        }

        // an empty queue means that side's whole component was explored without meeting
        while !self.forward.to_visit.is_empty() && !self.backward.to_visit.is_empty() {
            // the smaller frontier is cheaper to grow, ties go to the start side
            let forward = self.forward.to_visit.len() <= self.backward.to_visit.len();
            let res = if forward {
                self.forward
                    .expand(&self.backward, &mut self.budget, self.print_status)
            } else {
                self.backward
                    .expand(&self.forward, &mut self.budget, self.print_status)
            };

            match res {
                Err(limit) => return self.budget.exceeded(limit),
                Ok(None) => {}
                Ok(Some(meeting)) => {
                    debug!(
                        "Met at {:?}, {} moves from start and {} from goal",
                        meeting, self.forward.depths[&meeting], self.backward.depths[&meeting]
                    );
                    let mut moves = self.forward.path_to(meeting);
                    moves.extend(&self.backward.path_to(meeting).inverted_reversed());
                    return self.budget.solved(moves);
                }
            }
        }

        self.budget.exhausted()
    }
}
