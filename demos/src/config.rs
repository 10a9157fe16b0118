//! Visualizer settings with environment overrides.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use pathviz_search::Algorithm;

/// Settings for one visualizer run.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
    /// Rows and columns of the square grid.
    pub grid_size: i32,
    /// Chance for each cell to become an obstacle when scattering.
    pub obstacle_density: f64,
    /// Animation speed, 1 (slowest) to 100 (fastest).
    pub speed: u32,
    pub algorithm: Algorithm,
    /// Fixed RNG seed for reproducible obstacle layouts.
    pub seed: Option<u64>,
    pub log_dir: PathBuf,
}

impl VisualizerConfig {
    pub const DEFAULT_GRID_SIZE: i32 = 20;
    pub const MAX_GRID_SIZE: i32 = 60;
    pub const DEFAULT_DENSITY: f64 = 0.3;
    pub const DEFAULT_SPEED: u32 = 50;
    pub const MIN_SPEED: u32 = 1;
    pub const MAX_SPEED: u32 = 100;

    /// Defaults overridden by `PATHVIZ_*` environment variables. Unparsable
    /// values are ignored and out-of-range ones are clamped.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<i32>("PATHVIZ_GRID_SIZE") {
            config.grid_size = size.clamp(1, Self::MAX_GRID_SIZE);
        }
        if let Some(density) = read_env::<f64>("PATHVIZ_DENSITY") {
            if density.is_finite() {
                config.obstacle_density = density.clamp(0.0, 1.0);
            }
        }
        if let Some(speed) = read_env::<u32>("PATHVIZ_SPEED") {
            config.speed = clamp_speed(speed);
        }
        if let Some(algorithm) = read_env::<Algorithm>("PATHVIZ_ALGORITHM") {
            config.algorithm = algorithm;
        }
        if let Some(seed) = read_env::<u64>("PATHVIZ_SEED") {
            config.seed = Some(seed);
        }
        if let Some(dir) = env::var_os("PATHVIZ_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        config
    }

    /// Delay between two search steps at the configured speed.
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.speed)
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            obstacle_density: Self::DEFAULT_DENSITY,
            speed: Self::DEFAULT_SPEED,
            algorithm: Algorithm::default(),
            seed: None,
            log_dir: env::temp_dir().join("pathviz"),
        }
    }
}

/// `max(1, 100 / speed)` milliseconds.
pub fn tick_interval(speed: u32) -> Duration {
    let speed = clamp_speed(speed);
    Duration::from_millis(u64::from((100 / speed).max(1)))
}

pub fn clamp_speed(speed: u32) -> u32 {
    speed.clamp(VisualizerConfig::MIN_SPEED, VisualizerConfig::MAX_SPEED)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
