//! Interactive terminal visualizer for the step-by-step path search.
//!
//! [`Visualizer`] holds all UI state and reacts to [`Action`]s; the
//! [`terminal`] module draws it with crossterm and feeds it input.

pub mod config;
pub mod logging;
pub mod scatter;
pub mod terminal;
pub mod visualizer;

pub use config::VisualizerConfig;
pub use scatter::scatter_obstacles;
pub use visualizer::{Action, CellView, Visualizer};
