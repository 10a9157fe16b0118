//! Heuristic policy selecting between the two search variants.

use std::fmt;
use std::str::FromStr;

use pathviz_core::Coord;

/// Which search runs. Both variants share the same bookkeeping and differ
/// only in [`estimate`](Self::estimate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// A\*: Manhattan distance to the goal.
    #[default]
    HeuristicGuided,
    /// Dijkstra: no heuristic.
    UniformCost,
}

impl Algorithm {
    /// Every variant, in selector order.
    pub const ALL: [Algorithm; 2] = [Algorithm::HeuristicGuided, Algorithm::UniformCost];

    /// Estimated remaining cost from `from` to `goal`.
    ///
    /// The Manhattan estimate is admissible and consistent for unit-cost
    /// 4-way movement, so closed cells never need reopening.
    #[inline]
    pub fn estimate(self, from: Coord, goal: Coord) -> i32 {
        match self {
            Self::UniformCost => 0,
            Self::HeuristicGuided => from.manhattan(goal),
        }
    }

    /// The next variant, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Self::HeuristicGuided => Self::UniformCost,
            Self::UniformCost => Self::HeuristicGuided,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HeuristicGuided => "A* Algorithm",
            Self::UniformCost => "Dijkstra's Algorithm",
        })
    }
}

/// Returned by `Algorithm::from_str` for unknown names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?} (expected \"astar\" or \"dijkstra\")")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" | "heuristic" => Ok(Self::HeuristicGuided),
            "dijkstra" | "uniform" | "uniform-cost" => Ok(Self::UniformCost),
            _ => Err(ParseAlgorithmError(s.to_owned())),
        }
    }
}
