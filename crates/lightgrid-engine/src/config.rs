use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default grid height (rows).
pub const DEFAULT_GRID_HEIGHT: usize = 100;
/// Default grid width (columns).
pub const DEFAULT_GRID_WIDTH: usize = 100;
/// Attempt cap for random empty-cell placement.
pub const DEFAULT_PLACEMENT_ATTEMPTS: u32 = 100;
/// Tick rate used when the configured one is unusable.
pub const DEFAULT_TICK_RATE: f32 = 20.0;
/// Shortest tick interval handed to the driver.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);
/// Longest tick interval handed to the driver.
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Data-driven configuration for a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Grid rows.
    pub grid_height: usize,
    /// Grid columns.
    pub grid_width: usize,
    /// Ticks per second the driver should call `step()` at.
    pub tick_rate: f32,
    /// Attempts before random placement gives up with `NoSpaceAvailable`.
    pub placement_attempts: u32,
    /// Fixed RNG seed for reproducible placement. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Matches played back to back by the driver.
    pub rounds: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            grid_height: DEFAULT_GRID_HEIGHT,
            grid_width: DEFAULT_GRID_WIDTH,
            tick_rate: DEFAULT_TICK_RATE,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            seed: None,
            rounds: 1,
        }
    }
}

impl MatchConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("LIGHTGRID_CONFIG")
            && let Some(config) = Self::from_file(&path)
        {
            return config;
        }
        Self::from_file("config/lightgrid.toml").unwrap_or_default()
    }

    /// Parse a TOML file. Unreadable or malformed files yield `None`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<Self>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path, error = %e, "Ignoring malformed lightgrid config");
                None
            },
        }
    }

    /// Wall-clock time between ticks, within `[MIN_TICK_INTERVAL, MAX_TICK_INTERVAL]`.
    ///
    /// Non-positive, infinite and NaN rates fall back to `DEFAULT_TICK_RATE`.
    pub fn tick_interval(&self) -> Duration {
        let rate = if self.tick_rate.is_finite() && self.tick_rate > 0.0 {
            self.tick_rate
        } else {
            tracing::warn!(tick_rate = self.tick_rate, "Unusable tick rate, using default");
            DEFAULT_TICK_RATE
        };
        Duration::try_from_secs_f64(1.0 / f64::from(rate))
            .unwrap_or(MAX_TICK_INTERVAL)
            .clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL)
    }
}
