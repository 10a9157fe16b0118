use std::fmt;

use pathviz_core::Coord;

use crate::state::SearchState;

/// Counts shown after a successful search.
///
/// Neither count includes the start or goal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Closed cells other than the endpoints.
    pub explored_count: usize,
    /// Interior cells of the path.
    pub path_length: usize,
}

impl Metrics {
    /// Derive the counts from a finished search and its reconstructed path.
    pub fn derive(state: &SearchState, start: Coord, goal: Coord, path: &[Coord]) -> Self {
        let mut endpoints = usize::from(state.is_closed(start));
        if goal != start && state.is_closed(goal) {
            endpoints += 1;
        }
        Self {
            explored_count: state.closed_count().saturating_sub(endpoints),
            path_length: path.len().saturating_sub(2),
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path Length: {} cells", self.path_length)?;
        write!(f, "Explored Nodes: {} cells", self.explored_count)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::{Algorithm, StepStatus};

    #[test]
    fn metrics_round_trip() {
        let m = Metrics {
            explored_count: 12,
            path_length: 5,
        };
        let json = serde_json::to_string(&m).unwrap();
        let back: Metrics = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }

    #[test]
    fn enums_serialize_by_name() {
        assert_eq!(
            serde_json::to_string(&Algorithm::UniformCost).unwrap(),
            "\"UniformCost\""
        );
        assert_eq!(
            serde_json::to_string(&StepStatus::Exhausted).unwrap(),
            "\"Exhausted\""
        );
    }
}
