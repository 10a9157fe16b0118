//! Resumable shortest-path search over obstacle grids.
//!
//! The search advances exactly one cell expansion per [`StepEngine::step`]
//! call, so a driver can animate it, pause it, or throw it away with
//! [`StepEngine::reset`] at any point. Two algorithms share the same
//! bookkeeping and differ only in their heuristic:
//!
//! - **Uniform cost** (Dijkstra): zero heuristic.
//! - **Heuristic guided** (A\*): Manhattan distance to the goal.
//!
//! # Pieces
//!
//! | Type | Role |
//! |---|---|
//! | [`Algorithm`] | heuristic policy chosen at session start |
//! | [`SearchState`] | per-cell cost, estimate, predecessor and closed flag |
//! | [`Frontier`] | min-queue keyed by `(estimated_total, insertion order)` |
//! | [`StepEngine`] | `Idle → Running → Succeeded / Exhausted` state machine |
//! | [`reconstruct`] | predecessor walk from goal back to start |
//! | [`Metrics`] | explored-cell and path-length counts |
//!
//! ```
//! use pathviz_core::{Coord, Grid};
//! use pathviz_search::{Algorithm, StepEngine, StepStatus};
//!
//! let grid = Grid::new(5, 5);
//! let mut engine = StepEngine::new();
//! engine
//!     .start(&grid, Coord::new(0, 0), Coord::new(4, 4), Algorithm::HeuristicGuided)
//!     .unwrap();
//! while engine.step().unwrap() == StepStatus::Running {}
//! assert_eq!(engine.path().unwrap().len(), 9);
//! ```

mod engine;
mod error;
mod frontier;
mod heuristic;
mod metrics;
mod path;
mod state;

pub use engine::{Phase, StepEngine, StepStatus};
pub use error::{Endpoint, EndpointFault, SearchError};
pub use frontier::{Frontier, FrontierEntry};
pub use heuristic::{Algorithm, ParseAlgorithmError};
pub use metrics::Metrics;
pub use path::reconstruct;
pub use state::{SearchState, UNREACHABLE};
