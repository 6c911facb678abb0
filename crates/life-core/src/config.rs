//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Largest render window side, in cells
pub const MAX_RENDER_SIDE: u32 = 4096;

/// Where the starting configuration comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternSource {
    /// One of the built-in named patterns
    Builtin { name: String },
    /// A run-length encoded pattern file
    RleFile { path: PathBuf },
    /// A plain-text (`.cells`) pattern file
    PlaintextFile { path: PathBuf },
}

impl Default for PatternSource {
    fn default() -> Self {
        PatternSource::Builtin {
            name: "r-pentomino".to_string(),
        }
    }
}

/// Random scatter parameters used while the board is paused
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Minimum number of cells toggled (inclusive)
    pub min_cells: usize,
    /// Maximum number of cells toggled (exclusive)
    pub max_cells: usize,
    /// Half-width of the square around the origin cells are drawn from
    pub radius: i32,
    /// Scatter once after seeding, before the run starts
    pub on_start: bool,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            min_cells: 5,
            max_cells: 10,
            radius: 10,
            on_start: false,
        }
    }
}

/// Terminal rendering of a window of the plane
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub enabled: bool,
    /// Render once every this many ticks
    pub every_n_ticks: u64,
    /// Window width in cells
    pub width: u32,
    /// Window height in cells
    pub height: u32,
    /// Cell shown in the top-left corner
    pub origin_x: i64,
    pub origin_y: i64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            every_n_ticks: 10,
            width: 40,
            height: 20,
            origin_x: -20,
            origin_y: -10,
        }
    }
}

/// Top-level simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Interval between ticks (milliseconds)
    pub update_interval_ms: u64,
    /// Leave the board paused after seeding
    pub start_paused: bool,
    /// Stop after this many ticks; run until interrupted if unset
    pub max_ticks: Option<u64>,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Starting configuration
    pub pattern: PatternSource,
    pub scatter: ScatterConfig,
    pub render: RenderConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 50,
            start_paused: false,
            max_ticks: None,
            seed: 0,
            pattern: PatternSource::default(),
            scatter: ScatterConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading simulation config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.update_interval_ms == 0 {
            return Err(Error::Config(
                "update_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.scatter.min_cells >= self.scatter.max_cells {
            return Err(Error::Config(format!(
                "scatter.min_cells ({}) must be below scatter.max_cells ({})",
                self.scatter.min_cells, self.scatter.max_cells
            )));
        }
        if self.scatter.radius <= 0 {
            return Err(Error::Config("scatter.radius must be positive".to_string()));
        }
        if self.render.enabled && (self.render.width == 0 || self.render.height == 0) {
            return Err(Error::Config("render window must not be empty".to_string()));
        }
        if self.render.width > MAX_RENDER_SIDE || self.render.height > MAX_RENDER_SIDE {
            return Err(Error::Config(format!(
                "render window must be at most {} cells per side",
                MAX_RENDER_SIDE
            )));
        }
        if self.start_paused && self.max_ticks.is_some() {
            return Err(Error::Config(
                "max_ticks cannot be reached when start_paused is set".to_string(),
            ));
        }
        if self.render.every_n_ticks == 0 {
            return Err(Error::Config(
                "render.every_n_ticks must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_paused_with_max_ticks_rejected() {
        let err = SimulationConfig::from_json(r#"{ "start_paused": true, "max_ticks": 3 }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let paused = SimulationConfig::from_json(r#"{ "start_paused": true }"#).unwrap();
        assert!(paused.max_ticks.is_none());

        let bounded = SimulationConfig::from_json(r#"{ "max_ticks": 3 }"#).unwrap();
        assert_eq!(bounded.max_ticks, Some(3));
    }

    #[test]
    fn test_default_configs() {
        let config = SimulationConfig::default();
        assert_eq!(config.update_interval(), Duration::from_millis(50));
        assert!(!config.start_paused);
        assert_eq!(config.scatter.min_cells, 5);
        assert_eq!(config.scatter.max_cells, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json(
            r#"{ "update_interval_ms": 100, "pattern": { "kind": "builtin", "name": "glider" } }"#,
        )
        .unwrap();

        assert_eq!(config.update_interval_ms, 100);
        assert_eq!(
            config.pattern,
            PatternSource::Builtin {
                name: "glider".to_string()
            }
        );
        assert_eq!(config.scatter.radius, 10);
        assert_eq!(config.max_ticks, None);
    }

    #[test]
    fn test_rle_source_serialization() {
        let source = PatternSource::RleFile {
            path: PathBuf::from("patterns/gun.rle"),
        };
        let json = serde_json::to_string(&source).unwrap();
        assert!(json.contains("\"kind\":\"rle_file\""));
        let back: PatternSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let err = SimulationConfig::from_json(r#"{ "update_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = SimulationConfig::from_json(
            r#"{ "scatter": { "min_cells": 4, "max_cells": 4, "radius": 3 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = SimulationConfig::from_json(
            r#"{ "render": { "enabled": true, "width": 100000, "height": 10 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = SimulationConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
