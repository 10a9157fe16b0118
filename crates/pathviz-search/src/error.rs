use std::fmt;

use pathviz_core::Coord;

use crate::engine::Phase;

/// Which end of the search an endpoint error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Goal => "goal",
        })
    }
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointFault {
    OutOfBounds,
    Obstacle,
}

impl fmt::Display for EndpointFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OutOfBounds => "is out of bounds",
            Self::Obstacle => "is an obstacle",
        })
    }
}

/// Errors reported by the search engine.
///
/// All errors are raised synchronously by the offending call and nothing is
/// retried. An exhausted search is not an error; it is reported through
/// [`StepStatus::Exhausted`](crate::StepStatus::Exhausted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start or goal is out of bounds or on an obstacle.
    #[error("{endpoint} {coord} {reason}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        coord: Coord,
        reason: EndpointFault,
    },

    /// The operation is not allowed in the current phase. `phase` is `None`
    /// when the check was made against a bare [`SearchState`](crate::SearchState).
    #[error("cannot {operation} while search is {}", phase_name(.phase))]
    InvalidState {
        operation: &'static str,
        phase: Option<Phase>,
    },

    /// Internal bookkeeping is inconsistent, e.g. a predecessor cycle.
    #[error("search invariant violated: {0}")]
    InvariantViolation(String),
}

impl SearchError {
    /// Whether this error indicates a bug rather than a caller mistake.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }

    pub(crate) fn invalid_state(operation: &'static str, phase: Phase) -> Self {
        Self::InvalidState {
            operation,
            phase: Some(phase),
        }
    }
}

fn phase_name(phase: &Option<Phase>) -> String {
    match phase {
        Some(p) => p.to_string(),
        None => "unfinished".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = SearchError::InvalidEndpoint {
            endpoint: Endpoint::Goal,
            coord: Coord::new(1, 2),
            reason: EndpointFault::Obstacle,
        };
        assert_eq!(e.to_string(), "goal (1, 2) is an obstacle");

        let e = SearchError::invalid_state("step", Phase::Idle);
        assert_eq!(e.to_string(), "cannot step while search is idle");

        let e = SearchError::InvalidState {
            operation: "reconstruct",
            phase: None,
        };
        assert_eq!(e.to_string(), "cannot reconstruct while search is unfinished");
    }

    #[test]
    fn only_invariant_violations_are_internal() {
        assert!(SearchError::InvariantViolation("cycle".into()).is_internal());
        assert!(!SearchError::invalid_state("step", Phase::Exhausted).is_internal());
    }
}
