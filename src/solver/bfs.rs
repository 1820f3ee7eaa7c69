use std::collections::VecDeque;

use fnv::FnvHashMap;
use log::debug;

use crate::board::Board;
use crate::config::Limits;
use crate::moves::Move;

use super::backtracking::backtrack_moves;
use super::stats::Stats;
use super::{print_new_depth, Budget, Outcome};

pub(crate) fn search(start: &Board, limits: Limits, print_status: bool) -> (Outcome, Stats) {
    debug!("BFS from {:?}", start);
    let mut bfs = Bfs::new(limits, print_status);
    let outcome = bfs.run(*start);
    (outcome, bfs.stats)
}

struct Bfs {
    to_visit: VecDeque<Board>,
    depths: FnvHashMap<Board, u16>,
    prevs: FnvHashMap<Board, (Board, Move)>,
    budget: Budget,
    stats: Stats,
    print_status: bool,
}

impl Bfs {
    fn new(limits: Limits, print_status: bool) -> Self {
        Bfs {
            to_visit: VecDeque::new(),
            depths: FnvHashMap::default(),
            prevs: FnvHashMap::default(),
            budget: Budget::new(limits),
            stats: Stats::new(),
            print_status,
        }
    }

    fn run(&mut self, start: Board) -> Outcome {
        self.depths.insert(start, 0);
        self.stats.add_created(0);
        self.to_visit.push_back(start);

        while let Some(cur) = self.to_visit.pop_front() {
            if cur.is_goal() {
                return self.budget.solved(backtrack_moves(&self.prevs, cur));
            }

            let dist = self.depths[&cur];
            if self.stats.add_unique_visited(dist) {
                print_new_depth(&self.stats, dist, self.print_status);
            }
            if let Err(limit) = self.budget.expand() {
                return self.budget.exceeded(limit);
            }

            for (mov, next) in cur.neighbors() {
                self.stats.add_created(dist + 1);
                if self.depths.contains_key(&next) {
                    self.stats.add_reached_duplicate(dist + 1);
                    continue;
                }

                self.depths.insert(next, dist + 1);
                self.prevs.insert(next, (cur, mov));
                // no need to wait until it's dequeued, nothing in the queue is closer
                if next.is_goal() {
                    return self.budget.solved(backtrack_moves(&self.prevs, next));
                }
                self.to_visit.push_back(next);
            }
        }

        self.budget.exhausted()
    }
}
