//! Configuration module for the bubble board.
//!
//! Groups the physics tuning constants, canvas setup, spawn rules and gesture
//! scaling into one JSON-serialisable [`SimulationConfig`]. Every group has a
//! `Default` that reproduces the stock feel, and missing keys in a config file
//! fall back to those defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning constants for the per-tick physics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParameters {
    /// Velocity multiplier applied every tick
    pub damping: f64,

    /// Fraction of speed kept after a wall bounce
    pub wall_restitution: f64,

    /// Total repulsive speed an overlapping pair gains per tick
    pub repulsion_budget: f64,

    /// Overlap resolution sweeps per tick
    pub iterations: u32,

    /// Distance clamp used when normalising the contact normal
    pub min_separation: f64,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self {
            damping: 0.992,
            wall_restitution: 0.7,
            repulsion_budget: 0.05,
            iterations: 5,
            min_separation: 0.1,
        }
    }
}

/// Playfield dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasParameters {
    /// Initial width before the first resize
    pub width: f64,

    /// Initial height before the first resize
    pub height: f64,

    /// Margin subtracted from the viewport on each axis when resizing
    pub inset: f64,
}

impl Default for CanvasParameters {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            inset: 200.0,
        }
    }
}

/// Rules for newly created bubbles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnParameters {
    /// Spread of a new task's velocity on each axis
    pub task_launch_speed: f64,

    /// Spread of a new habit's velocity on each axis
    pub habit_launch_speed: f64,

    /// Diameter of habit bubbles
    pub habit_size: f64,
}

impl Default for SpawnParameters {
    fn default() -> Self {
        Self {
            task_launch_speed: 2.0,
            habit_launch_speed: 1.0,
            habit_size: 90.0,
        }
    }
}

/// Drag gesture scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureParameters {
    /// Scale from last per-frame drag delta to launch velocity
    pub launch_multiplier: f64,
}

impl Default for GestureParameters {
    fn default() -> Self {
        Self {
            launch_multiplier: 5.0,
        }
    }
}

/// Complete simulation configuration combining all parameter groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsParameters,

    pub canvas: CanvasParameters,

    pub spawn: SpawnParameters,

    pub gesture: GestureParameters,

    /// Tick period in milliseconds (the caller drives the cadence)
    pub tick_ms: u64,

    /// Seed for spawn velocities; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsParameters::default(),
            canvas: CanvasParameters::default(),
            spawn: SpawnParameters::default(),
            gesture: GestureParameters::default(),
            tick_ms: 16,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON configuration file
    ///
    /// # Returns
    /// * `Ok(SimulationConfig)` - Parsed configuration
    /// * `Err` - If file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })?;
        serde_json::from_str(&contents).map_err(|error| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Save configuration to a JSON file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents =
            serde_json::to_string_pretty(self).map_err(|error| ConfigError::Serialize { error })?;
        fs::write(path.as_ref(), contents).map_err(|error| ConfigError::Io {
            path: path.as_ref().to_path_buf(),
            error,
        })
    }

    /// Tick period as a `Duration`.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms)
    }
}

/// Error types for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error when reading or writing configuration files
    Io {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
    /// JSON parsing error
    Parse {
        path: std::path::PathBuf,
        error: serde_json::Error,
    },
    /// JSON serialization error
    Serialize { error: serde_json::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(
                    formatter,
                    "Failed to read/write config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Parse { path, error } => {
                write!(
                    formatter,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    error
                )
            }
            ConfigError::Serialize { error } => {
                write!(formatter, "Failed to serialize config: {}", error)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { error, .. } => Some(error),
            ConfigError::Parse { error, .. } => Some(error),
            ConfigError::Serialize { error } => Some(error),
        }
    }
}
