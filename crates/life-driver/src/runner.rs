//! Fixed-interval tick loop driving a session.

use anyhow::Result;
use life_core::{Cell, SimulationConfig};
use life_world::{Pattern, Session, SessionSnapshot, Viewport};
use parking_lot::RwLock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// Shared handle to the session. Steps hold the write lock for their whole
/// duration, so readers see either the previous or the next generation.
pub type SharedSession = Arc<RwLock<Session>>;

pub struct Runner {
    config: SimulationConfig,
    session: SharedSession,
    viewport: Viewport,
}

/// Outcome of a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub ticks: u64,
    pub wall_time: Duration,
    pub snapshot: SessionSnapshot,
}

impl Runner {
    /// Build a session from the configuration and seed it
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let pattern = Pattern::load(&config.pattern)?;

        let mut session = Session::new(config.update_interval());
        session.seed(&pattern);
        if config.scatter.on_start {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            let count = session.scatter_random(&mut rng, &config.scatter)?;
            debug!(count, seed = config.seed, "Scattered random cells on start");
        }
        if !config.start_paused {
            session.resume();
        }

        let viewport = Viewport::new(
            Cell::new(config.render.origin_x, config.render.origin_y),
            1.0,
        );

        Ok(Self {
            config,
            session: Arc::new(RwLock::new(session)),
            viewport,
        })
    }

    pub fn session(&self) -> SharedSession {
        self.session.clone()
    }

    /// Tick until `max_ticks` steps have run, or forever if unset
    #[instrument(skip(self), fields(max_ticks = ?self.config.max_ticks))]
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let mut period = self.session.read().update_interval();
        let mut ticker = fixed_interval(period);
        let mut ticks = 0u64;

        info!(interval_ms = period.as_millis() as u64, "Simulation loop started");

        loop {
            if let Some(max) = self.config.max_ticks {
                if self.session.read().iterations() >= max {
                    break;
                }
            }

            ticker.tick().await;

            let (stepped, iteration, current_period) = {
                let mut session = self.session.write();
                let report = session.tick();
                (report.is_some(), session.iterations(), session.update_interval())
            };

            if stepped {
                ticks += 1;
                if self.config.render.enabled && iteration % self.config.render.every_n_ticks == 0 {
                    self.render();
                }
            }

            if current_period != period {
                debug!(
                    interval_ms = current_period.as_millis() as u64,
                    "Update interval changed"
                );
                period = current_period;
                ticker = fixed_interval(period);
            }
        }

        let snapshot = self.session.read().snapshot();
        info!(
            ticks,
            population = snapshot.population,
            iterations = snapshot.iterations,
            "Simulation loop finished"
        );

        Ok(RunSummary {
            ticks,
            wall_time: started.elapsed(),
            snapshot,
        })
    }

    /// Print the configured window of the board
    pub fn render(&self) {
        let session = self.session.read();
        let frame = self.viewport.render_ascii(
            session.alive(),
            self.config.render.width,
            self.config.render.height,
        );
        println!(
            "generation {} population {}\n{}",
            session.iterations(),
            session.population(),
            frame
        );
    }
}

/// Periodically log population without touching the tick loop
pub async fn report_loop(session: SharedSession, every: Duration) {
    let mut ticker = fixed_interval(every);
    loop {
        ticker.tick().await;
        let (population, iterations, paused) = {
            let session = session.read();
            (session.population(), session.iterations(), session.is_paused())
        };
        info!(population, iterations, paused, "Simulation status");
    }
}

fn fixed_interval(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::PatternSource;

    fn config(pattern: &str, max_ticks: u64) -> SimulationConfig {
        SimulationConfig {
            update_interval_ms: 1,
            max_ticks: Some(max_ticks),
            pattern: PatternSource::Builtin {
                name: pattern.to_string(),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_run_stops_at_max_ticks() {
        let runner = Runner::new(config("blinker", 5)).unwrap();
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.snapshot.iterations, 5);
        assert_eq!(summary.snapshot.population, 3);
        assert_eq!(summary.snapshot.elapsed_ms, 5);
    }

    #[tokio::test]
    async fn test_block_survives_run() {
        let runner = Runner::new(config("block", 20)).unwrap();
        let before = runner.session().read().snapshot().cells;
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.snapshot.cells, before);
    }

    #[test]
    fn test_start_paused_leaves_board_seeded() {
        let mut config = config("glider", 3);
        config.start_paused = true;
        config.max_ticks = None;
        let runner = Runner::new(config).unwrap();

        assert!(runner.session().read().is_paused());
        assert_eq!(runner.session().read().population(), 5);
    }

    #[test]
    fn test_start_paused_with_max_ticks_fails() {
        let mut config = config("glider", 3);
        config.start_paused = true;
        assert!(Runner::new(config).is_err());
    }

    #[test]
    fn test_scatter_on_start_is_reproducible() {
        let mut config = config("block", 1);
        config.scatter.on_start = true;
        config.seed = 7;

        let a = Runner::new(config.clone()).unwrap().session().read().snapshot();
        let b = Runner::new(config).unwrap().session().read().snapshot();
        assert_eq!(a.cells, b.cells);
        assert_eq!(a.population, a.cells.len());
    }

    #[test]
    fn test_unknown_pattern_fails() {
        assert!(Runner::new(config("nonexistent", 1)).is_err());
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut config = config("block", 1);
        config.render.every_n_ticks = 0;
        assert!(Runner::new(config).is_err());
    }
}
