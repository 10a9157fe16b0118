//! **pathviz-core** — grid and coordinate types for step-by-step path search.
//!
//! This crate provides the map a search runs over: [`Coord`] and [`Bounds`]
//! geometry plus a [`Grid`] of free/obstacle [`Tile`]s. The search itself
//! lives in `pathviz-search`.

pub mod geom;
pub mod grid;

pub use geom::{Bounds, Coord};
pub use grid::{Grid, GridParseError, Tile};
