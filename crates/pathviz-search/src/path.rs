use pathviz_core::Coord;

use crate::error::SearchError;
use crate::state::SearchState;

/// Rebuild the path from `start` to `goal`, both inclusive, by following
/// predecessor links back from the goal.
///
/// The goal must be closed, i.e. the search succeeded; otherwise this fails
/// with [`SearchError::InvalidState`]. A chain longer than the grid or one
/// that ends before reaching `start` is an
/// [`InvariantViolation`](SearchError::InvariantViolation).
pub fn reconstruct(
    state: &SearchState,
    start: Coord,
    goal: Coord,
) -> Result<Vec<Coord>, SearchError> {
    if !state.is_closed(goal) {
        return Err(SearchError::InvalidState {
            operation: "reconstruct",
            phase: None,
        });
    }

    let limit = state.bounds().len();
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        if path.len() > limit {
            log::error!("predecessor chain from {goal} exceeds {limit} cells");
            return Err(SearchError::InvariantViolation(format!(
                "predecessor chain from {goal} is longer than the grid ({limit} cells)"
            )));
        }
        let Some(prev) = state.predecessor(cur) else {
            log::error!("{cur} has no predecessor on the way to {start}");
            return Err(SearchError::InvariantViolation(format!(
                "{cur} has no predecessor before reaching {start}"
            )));
        };
        path.push(prev);
        cur = prev;
    }

    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use pathviz_core::Bounds;

    use super::*;

    fn closed_state(bounds: Bounds, cells: &[Coord]) -> SearchState {
        let mut s = SearchState::new(bounds);
        for &c in cells {
            if let Some(i) = bounds.index(c) {
                s.close(i);
            }
        }
        s
    }

    #[test]
    fn walks_back_and_reverses() {
        let a = Coord::new(0, 0);
        let b = Coord::new(0, 1);
        let g = Coord::new(1, 1);
        let mut s = closed_state(Bounds::new(2, 2), &[a, b, g]);
        s.set_parent(b, Some(a));
        s.set_parent(g, Some(b));
        assert_eq!(reconstruct(&s, a, g).unwrap(), vec![a, b, g]);
    }

    #[test]
    fn start_equal_goal_is_single_cell() {
        let a = Coord::new(1, 0);
        let s = closed_state(Bounds::new(2, 2), &[a]);
        assert_eq!(reconstruct(&s, a, a).unwrap(), vec![a]);
    }

    #[test]
    fn unfinished_goal_is_invalid_state() {
        let s = SearchState::new(Bounds::new(2, 2));
        let err = reconstruct(&s, Coord::new(0, 0), Coord::new(1, 1)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidState { phase: None, .. }));
    }

    #[test]
    fn cycle_is_invariant_violation() {
        let a = Coord::new(0, 0);
        let b = Coord::new(0, 1);
        let g = Coord::new(1, 1);
        let mut s = closed_state(Bounds::new(2, 2), &[b, g]);
        s.set_parent(g, Some(b));
        s.set_parent(b, Some(g));
        let err = reconstruct(&s, a, g).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn broken_chain_is_invariant_violation() {
        let g = Coord::new(1, 1);
        let s = closed_state(Bounds::new(2, 2), &[g]);
        let err = reconstruct(&s, Coord::new(0, 0), g).unwrap_err();
        assert!(matches!(err, SearchError::InvariantViolation(_)));
    }
}
