//! Runs a Game of Life session on a fixed tick interval.

mod telemetry;
mod runner;

use anyhow::{Context, Result};
use life_core::SimulationConfig;
use std::path::PathBuf;
use tokio::signal;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = load_config()?;
    info!(
        interval_ms = config.update_interval_ms,
        pattern = ?config.pattern,
        "Starting Game of Life driver"
    );

    let runner = runner::Runner::new(config).context("failed to set up session")?;
    if runner.session().read().is_paused() {
        warn!("Session starts paused; no generations will run");
    }

    let reporter = tokio::spawn(runner::report_loop(
        runner.session(),
        Duration::from_secs(5),
    ));

    tokio::select! {
        result = runner.run() => {
            match result {
                Ok(summary) => {
                    info!(
                        ticks = summary.ticks,
                        population = summary.snapshot.population,
                        elapsed_ms = summary.snapshot.elapsed_ms,
                        wall_time_ms = summary.wall_time.as_millis() as u64,
                        "Run complete"
                    );
                    debug!(snapshot = %serde_json::to_string(&summary.snapshot)?, "Final board");
                }
                Err(e) => error!("Simulation failed: {}", e),
            }
        }
        _ = shutdown_signal() => {
            let session = runner.session();
            let mut session = session.write();
            session.pause();
            info!(
                iterations = session.iterations(),
                population = session.population(),
                "Stopped before completion"
            );
        }
    }

    reporter.abort();
    info!("Shutting down");

    Ok(())
}

/// Config path from the first argument or `LIFE_CONFIG`; defaults otherwise
fn load_config() -> Result<SimulationConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LIFE_CONFIG").ok())
        .map(PathBuf::from);

    match path {
        Some(path) => SimulationConfig::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => {
            info!("No config given, using defaults");
            Ok(SimulationConfig::default())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
