//! Generation stepping with double buffering.

use crate::alive_set::AliveSet;
use crate::rule;
use life_core::Cell;
use std::collections::HashSet;
use tracing::trace;

/// Summary of one generation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Cells evaluated this step
    pub candidates: usize,
    pub births: usize,
    pub deaths: usize,
    /// Population after the step
    pub population: usize,
}

/// Computes successive generations.
///
/// The engine owns the write-side buffer and the candidate set. Both are
/// reused between steps so a running simulation does not reallocate every
/// tick. The caller's set is only read while the next generation is built
/// and is replaced by a single swap at the end.
#[derive(Debug, Default)]
pub struct StepEngine {
    next: AliveSet,
    candidates: HashSet<Cell>,
}

impl StepEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `current` by one generation in place
    pub fn step(&mut self, current: &mut AliveSet) -> StepReport {
        self.candidates.clear();
        self.next.clear();

        for &cell in current.iter() {
            self.candidates.insert(cell);
            self.candidates.extend(cell.neighbors());
        }

        let mut births = 0;
        let mut deaths = 0;

        for &cell in &self.candidates {
            let alive = current.contains(cell);
            let alive_next = rule::next_state(alive, neighbor_count(current, cell));

            if alive_next {
                self.next.insert(cell);
            }
            match (alive, alive_next) {
                (false, true) => births += 1,
                (true, false) => deaths += 1,
                _ => {}
            }
        }

        std::mem::swap(current, &mut self.next);

        let report = StepReport {
            candidates: self.candidates.len(),
            births,
            deaths,
            population: current.count(),
        };
        trace!(
            candidates = report.candidates,
            births = report.births,
            deaths = report.deaths,
            population = report.population,
            "Generation computed"
        );
        report
    }
}

/// Number of alive cells among the 8 neighbors of `cell`
pub fn neighbor_count(alive: &AliveSet, cell: Cell) -> u8 {
    cell.neighbors().filter(|&n| alive.contains(n)).count() as u8
}

/// The generation after `current`, leaving `current` untouched
pub fn next_generation(current: &AliveSet) -> AliveSet {
    let mut next = current.clone();
    StepEngine::new().step(&mut next);
    next
}
