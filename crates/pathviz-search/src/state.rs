use pathviz_core::{Bounds, Coord};

/// Sentinel cost meaning "not reached yet" (+∞).
pub const UNREACHABLE: i32 = i32::MAX;

#[derive(Clone, Debug)]
struct Node {
    g: i32,
    f: i32,
    parent: Option<usize>,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: None,
            closed: false,
        }
    }
}

/// Per-cell bookkeeping for one search session.
///
/// Every cell starts unreached: infinite cost, infinite estimate, no
/// predecessor, not closed. Costs only ever decrease through relaxation, and
/// a closed cell is frozen.
#[derive(Clone, Debug)]
pub struct SearchState {
    bounds: Bounds,
    nodes: Vec<Node>,
    closed: usize,
}

impl SearchState {
    /// Fresh state covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            nodes: vec![Node::default(); bounds.len()],
            closed: 0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Best known cost from the start, or `None` while unreached.
    pub fn cost_so_far(&self, c: Coord) -> Option<i32> {
        self.node(c).map(|n| n.g).filter(|&g| g != UNREACHABLE)
    }

    /// `cost_so_far + heuristic`, or `None` while unreached.
    pub fn estimated_total(&self, c: Coord) -> Option<i32> {
        self.node(c).map(|n| n.f).filter(|&f| f != UNREACHABLE)
    }

    /// The cell `c` was last relaxed from. The start has none.
    pub fn predecessor(&self, c: Coord) -> Option<Coord> {
        self.node(c)?.parent.map(|p| self.bounds.coord(p))
    }

    pub fn is_closed(&self, c: Coord) -> bool {
        self.node(c).is_some_and(|n| n.closed)
    }

    /// Number of closed cells.
    pub fn closed_count(&self) -> usize {
        self.closed
    }

    /// Closed cells in row-major order.
    pub fn closed_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.closed)
            .map(|(i, _)| self.bounds.coord(i))
    }

    fn node(&self, c: Coord) -> Option<&Node> {
        self.bounds.index(c).map(|i| &self.nodes[i])
    }

    // -----------------------------------------------------------------------
    // Index-based mutation used by the engine
    // -----------------------------------------------------------------------

    #[inline]
    pub(crate) fn g_at(&self, idx: usize) -> i32 {
        self.nodes[idx].g
    }

    #[inline]
    pub(crate) fn closed_at(&self, idx: usize) -> bool {
        self.nodes[idx].closed
    }

    /// Record a strictly better route to `idx`. Returns `false` and leaves the
    /// node untouched when `g` is no improvement or the node is closed.
    pub(crate) fn relax(&mut self, idx: usize, g: i32, f: i32, parent: Option<usize>) -> bool {
        let n = &mut self.nodes[idx];
        if n.closed || g >= n.g {
            return false;
        }
        n.g = g;
        n.f = f;
        n.parent = parent;
        true
    }

    /// Mark `idx` final. Returns `false` if it was already closed.
    pub(crate) fn close(&mut self, idx: usize) -> bool {
        let n = &mut self.nodes[idx];
        if n.closed {
            return false;
        }
        n.closed = true;
        self.closed += 1;
        true
    }

    #[cfg(test)]
    pub(crate) fn set_parent(&mut self, c: Coord, parent: Option<Coord>) {
        if let Some(i) = self.bounds.index(c) {
            self.nodes[i].parent = parent.and_then(|p| self.bounds.index(p));
        }
    }
}
