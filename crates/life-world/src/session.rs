//! Simulation session state owned by the driver.

use crate::alive_set::AliveSet;
use crate::pattern::Pattern;
use crate::step::{StepEngine, StepReport};
use life_core::{Cell, Error, Result, ScatterConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, trace};

/// Everything that changes over the lifetime of one simulation.
///
/// Counters are only updated at step boundaries and on reset. Cell edits
/// are accepted only while paused.
#[derive(Debug)]
pub struct Session {
    alive: AliveSet,
    engine: StepEngine,
    population: usize,
    iterations: u64,
    elapsed: Duration,
    paused: bool,
    update_interval: Duration,
}

impl Session {
    pub fn new(update_interval: Duration) -> Self {
        Self {
            alive: AliveSet::new(),
            engine: StepEngine::new(),
            population: 0,
            iterations: 0,
            elapsed: Duration::ZERO,
            paused: true,
            update_interval,
        }
    }

    /// Reset, then fill the board with `pattern`. The session stays paused.
    #[instrument(skip(self, pattern), fields(pattern = %pattern.name))]
    pub fn seed(&mut self, pattern: &Pattern) {
        self.reset();
        pattern.seed(&mut self.alive);
        self.population = self.alive.count();
        info!(population = self.population, "Board seeded");
    }

    /// Clear all cells, zero the counters and pause
    pub fn reset(&mut self) {
        self.alive.clear();
        self.population = 0;
        self.iterations = 0;
        self.elapsed = Duration::ZERO;
        self.paused = true;
        info!("Session reset");
    }

    /// Step once if running. Returns the report when a step happened.
    pub fn tick(&mut self) -> Option<StepReport> {
        if self.paused {
            return None;
        }
        let report = self.step();
        self.elapsed += self.update_interval;
        Some(report)
    }

    /// Step once regardless of the pause flag
    pub fn step(&mut self) -> StepReport {
        let report = self.engine.step(&mut self.alive);
        self.population = report.population;
        self.iterations += 1;
        debug!(
            iteration = self.iterations,
            population = self.population,
            births = report.births,
            deaths = report.deaths,
            "Step complete"
        );
        report
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        info!(paused = self.paused, "Pause toggled");
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip one cell. Returns its new state.
    pub fn toggle_cell(&mut self, cell: Cell) -> Result<bool> {
        self.ensure_paused("toggle a cell")?;
        let alive = self.alive.toggle(cell);
        self.population = self.alive.count();
        trace!(%cell, alive, "Cell toggled");
        Ok(alive)
    }

    /// Toggle a random handful of cells near the origin. Returns how many.
    pub fn scatter_random<R: Rng>(&mut self, rng: &mut R, config: &ScatterConfig) -> Result<usize> {
        self.ensure_paused("scatter cells")?;
        let count = rng.gen_range(config.min_cells..config.max_cells);
        let radius = i64::from(config.radius);
        for _ in 0..count {
            let cell = Cell::new(rng.gen_range(-radius..radius), rng.gen_range(-radius..radius));
            self.alive.toggle(cell);
        }
        self.population = self.alive.count();
        debug!(count, population = self.population, "Random cells scattered");
        Ok(count)
    }

    /// Reset the board; only allowed while paused
    pub fn clean_field(&mut self) -> Result<()> {
        self.ensure_paused("clean the field")?;
        self.reset();
        Ok(())
    }

    pub fn set_update_interval(&mut self, interval: Duration) {
        self.update_interval = interval;
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Simulated time, the sum of the interval over every running tick
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn alive(&self) -> &AliveSet {
        &self.alive
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.alive.contains(cell)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            population: self.population,
            iterations: self.iterations,
            elapsed_ms: self.elapsed.as_millis() as u64,
            paused: self.paused,
            cells: self.alive.snapshot(),
        }
    }

    fn ensure_paused(&self, action: &str) -> Result<()> {
        if self.paused {
            Ok(())
        } else {
            Err(Error::InvalidState(format!(
                "cannot {} while the simulation is running",
                action
            )))
        }
    }
}

/// Point-in-time view of a session for observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub population: usize,
    pub iterations: u64,
    pub elapsed_ms: u64,
    pub paused: bool,
    pub cells: Vec<Cell>,
}
