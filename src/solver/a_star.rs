use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use fnv::FnvHashMap;
use log::debug;

use crate::board::Board;
use crate::config::Limits;
use crate::moves::Move;

use super::backtracking::backtrack_moves;
use super::heuristic::heuristic;
use super::stats::Stats;
use super::{print_new_depth, Budget, Outcome};

pub(crate) fn search(start: &Board, limits: Limits, print_status: bool) -> (Outcome, Stats) {
    debug!("A* from {:?}, h = {}", start, heuristic(start));
    let mut a_star = AStar::new(limits, print_status);
    let outcome = a_star.run(*start);
    (outcome, a_star.stats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchNode {
    board: Board,
    dist: u16,
    h: u16,
    /// Insertion order, makes the ordering total and FIFO among equal nodes
    seq: u64,
}

impl SearchNode {
    fn cost(&self) -> u16 {
        self.dist + self.h
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // lower h first among equal costs, it's probably closer to the goal
        (self.cost(), self.h, self.seq).cmp(&(other.cost(), other.h, other.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct AStar {
    to_visit: BinaryHeap<Reverse<SearchNode>>,
    /// Distance each board had when it was expanded
    closed: FnvHashMap<Board, u16>,
    /// Best known distance of every board pushed so far
    dists: FnvHashMap<Board, u16>,
    prevs: FnvHashMap<Board, (Board, Move)>,
    next_seq: u64,
    budget: Budget,
    stats: Stats,
    print_status: bool,
}

impl AStar {
    fn new(limits: Limits, print_status: bool) -> Self {
        AStar {
            to_visit: BinaryHeap::new(),
            closed: FnvHashMap::default(),
            dists: FnvHashMap::default(),
            prevs: FnvHashMap::default(),
            next_seq: 0,
            budget: Budget::new(limits),
            stats: Stats::new(),
            print_status,
        }
    }

    fn push(&mut self, board: Board, dist: u16) {
        let node = SearchNode {
            board,
            dist,
            h: heuristic(&board),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.to_visit.push(Reverse(node));
    }

    fn is_closed_with(&self, board: &Board, dist: u16) -> bool {
        self.closed.get(board).map_or(false, |&closed| closed <= dist)
    }

    fn run(&mut self, start: Board) -> Outcome {
        self.dists.insert(start, 0);
        self.stats.add_created(0);
        self.push(start, 0);

        while let Some(Reverse(cur)) = self.to_visit.pop() {
            // the heap can hold several nodes for the same board, only the best one is expanded
            // (but a board can be expanded again if it's later reached by a shorter path)
            if self.is_closed_with(&cur.board, cur.dist) {
                self.stats.add_reached_duplicate(cur.dist);
                continue;
            }

            if cur.board.is_goal() {
                return self.budget.solved(backtrack_moves(&self.prevs, cur.board));
            }

            self.closed.insert(cur.board, cur.dist);
            if self.stats.add_unique_visited(cur.dist) {
                print_new_depth(&self.stats, cur.dist, self.print_status);
            }
            if let Err(limit) = self.budget.expand() {
                return self.budget.exceeded(limit);
            }

            let dist = cur.dist + 1;
            for (mov, next) in cur.board.neighbors() {
                self.stats.add_created(dist);
                // closed boards are in `dists` too, never with a larger distance
                // so this also skips everything closed with `dist` or less
                let known = self.dists.get(&next).map_or(false, |&known| known <= dist);
                if known {
                    self.stats.add_reached_duplicate(dist);
                    continue;
                }
                self.dists.insert(next, dist);
                self.prevs.insert(next, (cur.board, mov));
                self.push(next, dist);
            }
        }

        self.budget.exhausted()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::moves::Moves;
    use crate::scramble::scramble;

    fn node(dist: u16, h: u16, seq: u64) -> SearchNode {
        SearchNode {
            board: Board::goal(),
            dist,
            h,
            seq,
        }
    }

    #[test]
    fn node_ordering() {
        assert!(node(2, 2, 0) < node(2, 2, 1));

        let mut heap = BinaryHeap::new();
        heap.push(Reverse(node(3, 5, 0)));
        heap.push(Reverse(node(5, 2, 1)));
        heap.push(Reverse(node(6, 1, 2)));
        heap.push(Reverse(node(4, 3, 3)));
        heap.push(Reverse(node(1, 5, 4)));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|Reverse(n)| n.seq)
            .collect();
        // cost 6 first, then the 7s by lower h
        assert_eq!(order, vec![4, 2, 1, 3, 0]);
    }

    #[test]
    fn straight_line() {
        // heuristic is exact here so nothing off the path is expanded
        let b: Board = "1 2 3 4 5 6 7 8 9 10 11 12 0 13 14 15".parse().unwrap();
        let (outcome, stats) = search(&b, Limits::default(), false);
        assert_eq!(outcome.moves().unwrap().to_string(), "rrr");
        assert_eq!(outcome.expansions(), 3);
        assert_eq!(stats.total_unique_visited(), 3);
    }

    #[test]
    fn outdated_entries_are_discarded() {
        // a board gets pushed again with a shorter distance before it's expanded,
        // the older entry must not be expanded after it
        let walk: Moves = "lluldrrruldrul".parse().unwrap();
        let b = Board::goal().replay(&walk).unwrap();
        let (outcome, stats) = search(&b, Limits::default(), false);
        assert_eq!(outcome.moves().unwrap().to_string(), "druldllurdrr");
        assert_eq!(outcome.expansions(), 18);
        assert_eq!(stats.total_created(), 55);
        assert_eq!(stats.total_unique_visited(), 18);
        // 18 known successors and the one outdated entry
        assert_eq!(stats.total_reached_duplicates(), 19);
    }

    #[test]
    fn closed_board_is_reopened() {
        let b: Board = "1 2 3 4 5 6 7 8 9 10 11 12 13 0 14 15".parse().unwrap();
        let middle = Board::goal().apply(Move::Left).unwrap();

        // pretend `middle` was expanded earlier through a longer path
        let mut a_star = AStar::new(Limits::default(), false);
        a_star.closed.insert(middle, 7);
        a_star.dists.insert(middle, 7);
        let outcome = a_star.run(b);
        assert_eq!(outcome.moves().unwrap().to_string(), "rr");
        assert_eq!(outcome.expansions(), 2);
        assert_eq!(a_star.closed[&middle], 1);

        // closed at the same distance, the search has to go around it
        let mut a_star = AStar::new(Limits::default(), false);
        a_star.closed.insert(middle, 1);
        a_star.dists.insert(middle, 1);
        let outcome = a_star.run(b);
        assert!(outcome.moves().unwrap().len() > 2);
        assert_eq!(b.replay(outcome.moves().unwrap()), Ok(Board::goal()));
        assert_eq!(a_star.closed[&middle], 1);
    }

    #[test]
    fn solutions_are_valid() {
        for seed in 0..30 {
            let (b, walk) = scramble(20, true, &mut SmallRng::seed_from_u64(seed));
            let (outcome, _) = search(&b, Limits::default(), false);
            let moves = outcome.moves().expect("scrambles are solvable");
            assert_eq!(moves.len() % 2, walk.len() % 2);
            assert_eq!(b.replay(moves), Ok(Board::goal()));
        }
    }
}
