//! **relief-paths** — Least-cost routing over sampled terrain grids.
//!
//! [`PathSearch`] computes a minimum-cost route between two nodes of a
//! [`PointGrid`](relief_core::PointGrid), where every edge costs its
//! true 3D segment length, so climbing terrain is more expensive than
//! crossing flat ground. With [`Heuristic::StraightLine`] the search is
//! A*; with [`Heuristic::None`] it degenerates to uniform-cost
//! (Dijkstra) expansion. Both return the same optimal cost.
//!
//! A search is a self-contained value: it borrows the immutable grid
//! and owns all of its mutable state, so independent searches over the
//! same grid can run on separate threads without locking.

mod frontier;
mod neighbors;
mod search;

pub use neighbors::grid_neighbors;
pub use search::{Heuristic, PathSearch, SearchError, SearchState, shortest_path};
