//! The step-by-step search state machine.

use std::fmt;
use std::ops::Deref;

use pathviz_core::{Coord, Grid};

use crate::error::{Endpoint, EndpointFault, SearchError};
use crate::frontier::Frontier;
use crate::heuristic::Algorithm;
use crate::metrics::Metrics;
use crate::path::reconstruct;
use crate::state::SearchState;

/// Lifecycle of a [`StepEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Idle,
    Running,
    Succeeded,
    Exhausted,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Exhausted => "exhausted",
        })
    }
}

/// Outcome of a single [`StepEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepStatus {
    /// One cell was expanded; more work remains.
    Running,
    /// The goal was popped and closed.
    Succeeded,
    /// The frontier ran dry: no path exists.
    Exhausted,
}

impl From<StepStatus> for Phase {
    fn from(s: StepStatus) -> Self {
        match s {
            StepStatus::Running => Phase::Running,
            StepStatus::Succeeded => Phase::Succeeded,
            StepStatus::Exhausted => Phase::Exhausted,
        }
    }
}

/// Everything owned by one `start()` .. `reset()` span.
struct Session<G> {
    grid: G,
    start: Coord,
    goal: Coord,
    algorithm: Algorithm,
    state: SearchState,
    frontier: Frontier,
    explored: Vec<Coord>,
    last_explored: Option<Coord>,
    status: StepStatus,
}

impl<G: Deref<Target = Grid>> Session<G> {
    fn new(grid: G, start: Coord, goal: Coord, algorithm: Algorithm) -> Self {
        let bounds = grid.bounds();
        let mut state = SearchState::new(bounds);
        let mut frontier = Frontier::new();
        let h = algorithm.estimate(start, goal);
        if let Some(si) = bounds.index(start) {
            state.relax(si, 0, h, None);
            frontier.push(h, start);
        }
        Self {
            grid,
            start,
            goal,
            algorithm,
            state,
            frontier,
            explored: Vec::new(),
            last_explored: None,
            status: StepStatus::Running,
        }
    }

    /// Expand one cell, skipping stale frontier entries on the way.
    fn advance(&mut self) -> StepStatus {
        self.last_explored = None;
        let bounds = self.grid.bounds();

        loop {
            let Some(entry) = self.frontier.pop() else {
                log::debug!(
                    "search exhausted after {} expansions, no path to {}",
                    self.explored.len(),
                    self.goal
                );
                return StepStatus::Exhausted;
            };
            let cur = entry.coord;
            let Some(ci) = bounds.index(cur) else {
                continue;
            };
            if self.state.closed_at(ci) {
                log::trace!("skip stale entry {cur} (f={})", entry.estimated_total);
                continue;
            }

            self.state.close(ci);
            if cur == self.goal {
                log::debug!(
                    "goal {} reached after {} expansions",
                    self.goal,
                    self.explored.len()
                );
                return StepStatus::Succeeded;
            }

            self.explored.push(cur);
            self.last_explored = Some(cur);
            log::trace!("expand {cur} (f={})", entry.estimated_total);

            let tentative = self.state.g_at(ci) + 1;
            let grid: &Grid = &self.grid;
            for n in grid.neighbors(cur) {
                let Some(ni) = bounds.index(n) else {
                    continue;
                };
                if self.state.closed_at(ni) {
                    continue;
                }
                let f = tentative + self.algorithm.estimate(n, self.goal);
                if self.state.relax(ni, tentative, f, Some(ci)) {
                    self.frontier.push(f, n);
                }
            }
            return StepStatus::Running;
        }
    }
}

/// Incremental shortest-path search, one expansion per [`step`](Self::step).
///
/// `G` is any handle to a [`Grid`]: a plain `&Grid`, or an `Rc<Grid>` /
/// `Arc<Grid>` when the engine lives next to the grid's owner. The session
/// holds the handle until [`reset`](Self::reset), so a borrowed grid cannot
/// be edited under a live search, and a shared one can only be edited in
/// place (`Rc::make_mut`) once the session has let go of it.
///
/// ```
/// use pathviz_core::{Coord, Grid};
/// use pathviz_search::{Algorithm, Phase, StepEngine, StepStatus};
///
/// let grid = Grid::new(3, 3);
/// let mut engine = StepEngine::new();
/// assert_eq!(engine.phase(), Phase::Idle);
///
/// engine.start(&grid, Coord::new(0, 0), Coord::new(0, 2), Algorithm::UniformCost).unwrap();
/// assert_eq!(engine.step().unwrap(), StepStatus::Running);
/// assert_eq!(engine.last_explored(), Some(Coord::new(0, 0)));
///
/// engine.reset();
/// assert_eq!(engine.phase(), Phase::Idle);
/// ```
pub struct StepEngine<G> {
    session: Option<Session<G>>,
}

impl<G> Default for StepEngine<G> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<G: Deref<Target = Grid>> StepEngine<G> {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.session
            .as_ref()
            .map_or(Phase::Idle, |s| Phase::from(s.status))
    }

    /// Begin a new search from `start` to `goal`.
    ///
    /// Only valid while idle; call [`reset`](Self::reset) first to rerun.
    /// Both endpoints must be in bounds and free. `start == goal` is allowed
    /// and succeeds on the first step.
    pub fn start(
        &mut self,
        grid: G,
        start: Coord,
        goal: Coord,
        algorithm: Algorithm,
    ) -> Result<(), SearchError> {
        let phase = self.phase();
        if phase != Phase::Idle {
            return Err(SearchError::invalid_state("start", phase));
        }
        check_endpoint(&grid, Endpoint::Start, start)?;
        check_endpoint(&grid, Endpoint::Goal, goal)?;

        log::debug!(
            "start {algorithm} on {} grid: {start} -> {goal}",
            grid.bounds()
        );
        self.session = Some(Session::new(grid, start, goal, algorithm));
        Ok(())
    }

    /// Perform exactly one cell expansion, or detect success or exhaustion.
    ///
    /// Stale duplicate frontier entries are discarded inside the same call.
    pub fn step(&mut self) -> Result<StepStatus, SearchError> {
        let phase = self.phase();
        let Some(session) = self.session.as_mut().filter(|_| phase == Phase::Running) else {
            return Err(SearchError::invalid_state("step", phase));
        };
        let status = session.advance();
        session.status = status;
        Ok(status)
    }

    /// Step until the search succeeds or is exhausted.
    pub fn run_to_completion(&mut self) -> Result<StepStatus, SearchError> {
        loop {
            match self.step()? {
                StepStatus::Running => {}
                done => return Ok(done),
            }
        }
    }

    /// Drop all search state and return to [`Phase::Idle`]. Valid in any phase.
    pub fn reset(&mut self) {
        if let Some(s) = self.session.take() {
            log::debug!(
                "reset {} search after {} expansions",
                Phase::from(s.status),
                s.explored.len()
            );
        }
    }

    /// The cell expanded by the most recent `step()`, if that step expanded one.
    pub fn last_explored(&self) -> Option<Coord> {
        self.session.as_ref().and_then(|s| s.last_explored)
    }

    /// Every expanded cell in expansion order. The start comes first; the
    /// goal is never included.
    pub fn explored(&self) -> &[Coord] {
        self.session.as_ref().map_or(&[][..], |s| s.explored.as_slice())
    }

    /// Bookkeeping of the current session, if any.
    pub fn state(&self) -> Option<&SearchState> {
        self.session.as_ref().map(|s| &s.state)
    }

    pub fn is_closed(&self, c: Coord) -> bool {
        self.state().is_some_and(|s| s.is_closed(c))
    }

    /// Queued frontier entries, stale duplicates included.
    pub fn frontier_len(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.frontier.len())
    }

    /// `(start, goal)` of the current session.
    pub fn endpoints(&self) -> Option<(Coord, Coord)> {
        self.session.as_ref().map(|s| (s.start, s.goal))
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.session.as_ref().map(|s| s.algorithm)
    }

    /// The shortest path, start to goal inclusive. Only after success.
    pub fn path(&self) -> Result<Vec<Coord>, SearchError> {
        let s = self.finished("path")?;
        reconstruct(&s.state, s.start, s.goal)
    }

    /// Explored and path counts. Only after success.
    pub fn metrics(&self) -> Result<Metrics, SearchError> {
        let s = self.finished("metrics")?;
        let path = reconstruct(&s.state, s.start, s.goal)?;
        Ok(Metrics::derive(&s.state, s.start, s.goal, &path))
    }

    fn finished(&self, operation: &'static str) -> Result<&Session<G>, SearchError> {
        let phase = self.phase();
        self.session
            .as_ref()
            .filter(|_| phase == Phase::Succeeded)
            .ok_or(SearchError::invalid_state(operation, phase))
    }
}

fn check_endpoint(grid: &Grid, endpoint: Endpoint, coord: Coord) -> Result<(), SearchError> {
    let reason = if !grid.is_in_bounds(coord) {
        EndpointFault::OutOfBounds
    } else if grid.is_obstacle(coord) {
        EndpointFault::Obstacle
    } else {
        return Ok(());
    };
    log::warn!("rejecting {endpoint} {coord}: {reason}");
    Err(SearchError::InvalidEndpoint {
        endpoint,
        coord,
        reason,
    })
}
