use std::fmt::{self, Debug, Display, Formatter};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

/// Search counters bucketed by depth (distance from the root of the search).
///
/// Unique visited states are the expanded ones so their total is the expansion count.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u64>,
    visited_states: Vec<u64>,
    duplicate_states: Vec<u64>,
}

impl Stats {
    pub fn new() -> Self {
        Stats {
            created_states: vec![],
            visited_states: vec![],
            duplicate_states: vec![],
        }
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> u64 {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    /// Returns true if this is the first state created at this depth
    pub(crate) fn add_created(&mut self, depth: u16) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    /// Returns true if this is the first state visited at this depth
    pub(crate) fn add_unique_visited(&mut self, depth: u16) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub(crate) fn add_reached_duplicate(&mut self, depth: u16) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    /// Adds up the counters depth by depth.
    ///
    /// Used for the two halves of bidirectional search
    /// so each depth means "this far from either root".
    pub(crate) fn merge(&mut self, other: &Stats) {
        Self::merge_counts(&mut self.created_states, &other.created_states);
        Self::merge_counts(&mut self.visited_states, &other.visited_states);
        Self::merge_counts(&mut self.duplicate_states, &other.duplicate_states);
    }

    fn merge_counts(counts: &mut Vec<u64>, other: &[u64]) {
        if counts.len() < other.len() {
            counts.resize(other.len(), 0);
        }
        for (count, &o) in counts.iter_mut().zip(other) {
            *count += o;
        }
    }

    fn add(counts: &mut Vec<u64>, depth: u16) -> bool {
        let depth = usize::from(depth);
        let mut ret = false;

        // while because a search can skip depths (bidirectional alternates sides)
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn at(counts: &[u64], depth: usize) -> u64 {
        counts.get(depth).cloned().unwrap_or(0)
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(
            ["Depth", "Created", "Unique", "Duplicates", "Unknown (not reached)"]
                .iter()
                .map(|title| Cell::new(title))
                .collect(),
        ));

        // created is always the longest, everything else was created first
        for depth in 0..self.created_states.len() {
            let created = Self::at(&self.created_states, depth);
            let visited = Self::at(&self.visited_states, depth);
            let duplicates = Self::at(&self.duplicate_states, depth);
            let left = created.saturating_sub(visited + duplicates);
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&created.separated_string()),
                Cell::new(&visited.separated_string()),
                Cell::new(&duplicates.separated_string()),
                Cell::new(&left.separated_string()),
            ]));
        }

        table
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "total created / unique visited / reached duplicates:")?;
        writeln!(
            f,
            "{:<16}{:<17}{}",
            self.total_created().separated_string(),
            self.total_unique_visited().separated_string(),
            self.total_reached_duplicates().separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let visited = self.total_unique_visited();
        let duplicates = self.total_reached_duplicates();
        let left = created.saturating_sub(visited + duplicates);
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f, "Created but not reached total: {}", left.separated_string())?;
        writeln!(f)?;
        write!(f, "{}", self.table())
    }
}
