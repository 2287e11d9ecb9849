//! Minimum-cost route search over a point grid.

use std::fmt;

use relief_core::{GridPoint, PointGrid};

use crate::frontier::Frontier;
use crate::neighbors::grid_neighbors;

/// Guidance applied to the frontier ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// No guidance: uniform-cost (Dijkstra-equivalent) expansion.
    #[default]
    None,
    /// 3D straight-line distance to the goal node. Admissible and
    /// consistent, since every edge costs its own 3D length; the
    /// result cost is identical to [`Heuristic::None`], only fewer
    /// nodes are expanded.
    StraightLine,
}

/// Search lifecycle. `Ready` on construction, `Running` while the
/// frontier loop executes, then one of the two terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    Ready,
    Running,
    /// The goal was popped from the frontier; a path is available.
    Succeeded,
    /// The frontier emptied before the goal was reached.
    Exhausted,
}

/// Errors surfaced by construction or the convenience entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or end index does not address a grid node.
    IndexOutOfBounds { index: usize, len: usize },
    /// The search exhausted its frontier without reaching the goal.
    NoPath,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} is outside the grid (len {len})")
            }
            SearchError::NoPath => write!(f, "no path between the requested nodes"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Per-node bookkeeping, allocated once per search.
#[derive(Clone)]
struct Node {
    g: f64,
    parent: usize,
    open: bool,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: usize::MAX,
            open: false,
            closed: false,
        }
    }
}

/// A single least-cost route query against an immutable [`PointGrid`].
///
/// The search owns its open set, closed set, and parent map; nothing
/// is shared, so several searches over one grid may run concurrently.
/// Construct, [`run`](Self::run), then read [`path`](Self::path) and
/// [`cost`](Self::cost).
pub struct PathSearch<'g> {
    grid: &'g PointGrid,
    start: usize,
    end: usize,
    heuristic: Heuristic,
    max_cost: Option<f64>,
    state: SearchState,
    nodes: Vec<Node>,
    nbuf: Vec<usize>,
}

impl<'g> PathSearch<'g> {
    /// Create a search from `start` to `end`.
    ///
    /// Returns [`SearchError::IndexOutOfBounds`] when either index
    /// does not address a node of `grid`. The grid's square layout is
    /// already guaranteed by [`PointGrid`] itself.
    pub fn new(
        grid: &'g PointGrid,
        start: usize,
        end: usize,
        heuristic: Heuristic,
    ) -> Result<Self, SearchError> {
        let len = grid.len();
        for index in [start, end] {
            if index >= len {
                return Err(SearchError::IndexOutOfBounds { index, len });
            }
        }
        Ok(Self {
            grid,
            start,
            end,
            heuristic,
            max_cost: None,
            state: SearchState::Ready,
            nodes: vec![Node::default(); len],
            nbuf: Vec::with_capacity(8),
        })
    }

    /// Limit expansion to routes of accumulated cost at most `limit`.
    ///
    /// Nodes whose tentative cost exceeds the limit are never opened;
    /// a goal outside the budget makes the search end `Exhausted`.
    pub fn with_max_cost(mut self, limit: f64) -> Self {
        self.max_cost = Some(limit);
        self
    }

    /// Start index of the query.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End (goal) index of the query.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Run the search to completion and return the terminal state.
    ///
    /// Calling `run` again after completion is a no-op that returns
    /// the terminal state unchanged.
    pub fn run(&mut self) -> SearchState {
        if self.state != SearchState::Ready {
            return self.state;
        }
        self.state = SearchState::Running;
        log::trace!(
            "search {} -> {} running ({:?})",
            self.start,
            self.end,
            self.heuristic
        );

        let side = self.grid.side();
        let mut frontier = Frontier::new();
        let mut expanded = 0usize;

        self.nodes[self.start].g = 0.0;
        self.nodes[self.start].open = true;
        frontier.push(self.start, self.estimate(self.start));

        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.state = loop {
            let Some(entry) = frontier.pop() else {
                break SearchState::Exhausted;
            };
            let ci = entry.index;

            // Skip entries superseded by a cheaper re-insertion.
            if !self.nodes[ci].open {
                continue;
            }

            if ci == self.end {
                break SearchState::Succeeded;
            }

            self.nodes[ci].open = false;
            self.nodes[ci].closed = true;
            let curr_g = self.nodes[ci].g;
            expanded += 1;

            nbuf.clear();
            grid_neighbors(ci, side, &mut nbuf);

            for &ni in nbuf.iter() {
                if self.nodes[ni].closed {
                    continue;
                }
                // True 3D segment length: slopes cost more than flats.
                let tentative = curr_g + self.grid.distance(ci, ni);
                if let Some(limit) = self.max_cost {
                    if tentative > limit {
                        continue;
                    }
                }
                // Standard relaxation: an unopened node has g = +inf,
                // so insertion and improvement share one comparison.
                if tentative < self.nodes[ni].g {
                    self.nodes[ni].g = tentative;
                    self.nodes[ni].parent = ci;
                    self.nodes[ni].open = true;
                    frontier.push(ni, tentative + self.estimate(ni));
                }
            }
        };

        self.nbuf = nbuf;
        log::debug!(
            "search {} -> {} finished {:?} after expanding {} nodes",
            self.start,
            self.end,
            self.state,
            expanded
        );
        self.state
    }

    /// The reconstructed route, or `None` unless the search has
    /// succeeded.
    ///
    /// Ordered goal-to-start: the first element is the goal node and
    /// the walk stops just before the start node, whose coordinates
    /// are not included. Callers wanting start-to-goal order reverse
    /// the sequence. For a query with `start == end` the path is
    /// empty.
    pub fn path(&self) -> Option<Vec<GridPoint>> {
        if self.state != SearchState::Succeeded {
            return None;
        }
        let mut path = Vec::new();
        let mut current = self.end;
        // The parent map is a tree rooted at start, so the walk is
        // bounded by the node count.
        let mut remaining = self.grid.len();
        while current != self.start {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            path.push(self.grid[current]);
            current = self.nodes[current].parent;
        }
        Some(path)
    }

    /// Total cost of the found route, or `None` unless succeeded.
    #[inline]
    pub fn cost(&self) -> Option<f64> {
        if self.state == SearchState::Succeeded {
            Some(self.nodes[self.end].g)
        } else {
            None
        }
    }

    /// Heuristic estimate from `index` to the goal.
    #[inline]
    fn estimate(&self, index: usize) -> f64 {
        match self.heuristic {
            Heuristic::None => 0.0,
            Heuristic::StraightLine => self.grid.distance(index, self.end),
        }
    }
}

/// Run a whole query in one call.
///
/// Returns the goal-to-start route (as [`PathSearch::path`]) or
/// [`SearchError::NoPath`] when the grid offers none.
pub fn shortest_path(
    grid: &PointGrid,
    start: usize,
    end: usize,
    heuristic: Heuristic,
) -> Result<Vec<GridPoint>, SearchError> {
    let mut search = PathSearch::new(grid, start, end, heuristic)?;
    match search.run() {
        SearchState::Succeeded => search.path().ok_or(SearchError::NoPath),
        _ => Err(SearchError::NoPath),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    /// Flat `side × side` grid, unit spacing, elevation 0.
    fn flat(side: usize) -> PointGrid {
        let mut nodes = Vec::with_capacity(side * side);
        for x in 0..side {
            for y in 0..side {
                nodes.push(GridPoint::new(x as f64, y as f64, 0.0));
            }
        }
        PointGrid::from_nodes(nodes).unwrap()
    }

    /// Deterministically bumpy grid: elevation from a smooth product
    /// of sines, steep enough that the cheapest route is not obvious.
    fn bumpy(side: usize) -> PointGrid {
        let mut nodes = Vec::with_capacity(side * side);
        for x in 0..side {
            for y in 0..side {
                let (xf, yf) = (x as f64, y as f64);
                let z = 4.0 * (xf * 0.9).sin() * (yf * 1.3).cos();
                nodes.push(GridPoint::new(xf, yf, z));
            }
        }
        PointGrid::from_nodes(nodes).unwrap()
    }

    fn run(grid: &PointGrid, start: usize, end: usize, h: Heuristic) -> PathSearch<'_> {
        let mut s = PathSearch::new(grid, start, end, h).unwrap();
        s.run();
        s
    }

    #[test]
    fn flat_diagonal_costs_four_root_two() {
        let g = flat(5);
        for h in [Heuristic::None, Heuristic::StraightLine] {
            let s = run(&g, 0, 24, h);
            assert_eq!(s.state(), SearchState::Succeeded);
            let cost = s.cost().unwrap();
            assert!(
                (cost - 4.0 * 2.0_f64.sqrt()).abs() < EPS,
                "{h:?} cost {cost}"
            );
        }
    }

    #[test]
    fn heuristic_and_uniform_cost_agree_on_rough_terrain() {
        let g = bumpy(9);
        let plain = run(&g, 0, 80, Heuristic::None);
        let guided = run(&g, 0, 80, Heuristic::StraightLine);
        let (a, b) = (plain.cost().unwrap(), guided.cost().unwrap());
        assert!((a - b).abs() < EPS, "uniform {a} vs guided {b}");
    }

    #[test]
    fn path_is_goal_to_start_chain_of_adjacent_nodes() {
        let g = bumpy(7);
        let s = run(&g, 3, 45, Heuristic::StraightLine);
        let path = s.path().unwrap();
        assert!(!path.is_empty());
        assert!(path.len() < g.len());

        // First element is the goal; start is excluded.
        assert_eq!(path[0], g[45]);
        assert!(path.iter().all(|&p| p != g[3]));

        // Walk goal-to-start, appending the start node to close the
        // chain: every hop is grid-adjacent and the segment lengths
        // sum to the reported cost.
        let mut full: Vec<GridPoint> = path.clone();
        full.push(g[3]);
        let mut total = 0.0;
        for pair in full.windows(2) {
            let (dr, dc) = (pair[0].x - pair[1].x, pair[0].y - pair[1].y);
            assert!(dr.abs() <= 1.0 + EPS && dc.abs() <= 1.0 + EPS, "non-adjacent hop");
            assert!(dr != 0.0 || dc != 0.0, "repeated node");
            total += pair[0].distance(pair[1]);
        }
        assert!((total - s.cost().unwrap()).abs() < EPS);
    }

    #[test]
    fn costs_along_path_are_monotone() {
        let g = bumpy(8);
        let s = run(&g, 0, 63, Heuristic::None);
        let path = s.path().unwrap();
        // Walking goal-to-start, each node's remaining cost-from-start
        // shrinks by exactly the segment just crossed, so accumulated
        // G is non-decreasing start-to-goal.
        let mut g_at = s.cost().unwrap();
        let mut prev = path[0];
        for &p in &path[1..] {
            g_at -= prev.distance(p);
            assert!(g_at > -EPS, "negative accumulated cost");
            prev = p;
        }
    }

    #[test]
    fn start_equals_end_is_trivially_succeeded() {
        let g = flat(4);
        let s = run(&g, 6, 6, Heuristic::StraightLine);
        assert_eq!(s.state(), SearchState::Succeeded);
        assert_eq!(s.cost(), Some(0.0));
        assert_eq!(s.path(), Some(Vec::new()));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let g = flat(3);
        assert_eq!(
            PathSearch::new(&g, 9, 0, Heuristic::None).err(),
            Some(SearchError::IndexOutOfBounds { index: 9, len: 9 })
        );
        assert_eq!(
            PathSearch::new(&g, 0, 42, Heuristic::None).err(),
            Some(SearchError::IndexOutOfBounds { index: 42, len: 9 })
        );
    }

    #[test]
    fn budget_exhaustion_reports_no_path() {
        let g = flat(5);
        // Opposite corners are 4·√2 apart; a 2.0 budget cannot reach.
        let mut s = PathSearch::new(&g, 0, 24, Heuristic::None)
            .unwrap()
            .with_max_cost(2.0);
        assert_eq!(s.run(), SearchState::Exhausted);
        assert_eq!(s.path(), None);
        assert_eq!(s.cost(), None);
    }

    #[test]
    fn shortest_path_propagates_bad_indices() {
        let g = flat(3);
        assert_eq!(
            shortest_path(&g, 0, 99, Heuristic::None).err(),
            Some(SearchError::IndexOutOfBounds { index: 99, len: 9 })
        );
    }

    #[test]
    fn rerun_returns_terminal_state_unchanged() {
        let g = flat(4);
        let mut s = PathSearch::new(&g, 0, 15, Heuristic::None).unwrap();
        let first = s.run();
        assert_eq!(first, SearchState::Succeeded);
        let cost = s.cost();
        assert_eq!(s.run(), first);
        assert_eq!(s.cost(), cost);
    }

    #[test]
    fn state_machine_starts_ready() {
        let g = flat(3);
        let s = PathSearch::new(&g, 0, 8, Heuristic::None).unwrap();
        assert_eq!(s.state(), SearchState::Ready);
        assert_eq!(s.path(), None);
        assert_eq!(s.cost(), None);
    }

    #[test]
    fn elevation_changes_the_route() {
        // A 3x3 grid with a prohibitively tall center: the cheapest
        // route from corner to corner goes around the peak.
        let mut nodes = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                let z = if (x, y) == (1, 1) { 50.0 } else { 0.0 };
                nodes.push(GridPoint::new(x as f64, y as f64, z));
            }
        }
        let g = PointGrid::from_nodes(nodes).unwrap();
        let s = run(&g, 0, 8, Heuristic::StraightLine);
        let cost = s.cost().unwrap();
        // Around the rim: two unit steps and one diagonal, or four
        // unit steps; either way far below a climb over z = 50.
        assert!(cost < 5.0, "route climbed the peak: {cost}");
        let path = s.path().unwrap();
        assert!(path.iter().all(|&p| p != g[4]), "path crossed the peak");
    }

    #[test]
    fn shortest_path_convenience_matches_search() {
        let g = bumpy(6);
        let s = run(&g, 2, 33, Heuristic::StraightLine);
        let direct = shortest_path(&g, 2, 33, Heuristic::StraightLine).unwrap();
        assert_eq!(s.path().unwrap(), direct);
    }

    #[test]
    fn budget_generous_enough_still_succeeds() {
        let g = flat(5);
        let mut s = PathSearch::new(&g, 0, 24, Heuristic::StraightLine)
            .unwrap()
            .with_max_cost(10.0);
        assert_eq!(s.run(), SearchState::Succeeded);
        assert!((s.cost().unwrap() - 4.0 * 2.0_f64.sqrt()).abs() < EPS);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn heuristic_round_trip() {
        for h in [Heuristic::None, Heuristic::StraightLine] {
            let json = serde_json::to_string(&h).unwrap();
            let back: Heuristic = serde_json::from_str(&json).unwrap();
            assert_eq!(h, back);
        }
    }

    #[test]
    fn search_state_round_trip() {
        let json = serde_json::to_string(&SearchState::Succeeded).unwrap();
        let back: SearchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SearchState::Succeeded);
    }
}
