//! Row-major point grid.

use std::fmt;
use std::ops::Index;

use crate::point::GridPoint;

/// Construction error for [`PointGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The node sequence was empty.
    Empty,
    /// The node count is not a perfect square, so no row width exists
    /// for which fixed-offset adjacency is valid.
    NotSquare { len: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "point grid cannot be empty"),
            GridError::NotSquare { len } => {
                write!(f, "point grid length {len} is not a perfect square")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// An ordered, immutable sequence of surface sample points.
///
/// Layout is row-major with y varying fastest within an x, so
/// `index = row * side + column` where `side` is the number of samples
/// per row. The length is guaranteed to be a perfect square; adjacency
/// arithmetic in the search crate depends on that invariant, which is
/// why it is enforced here at construction rather than trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGrid {
    nodes: Vec<GridPoint>,
    side: usize,
}

#[cfg(feature = "serde")]
impl serde::Serialize for PointGrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Only the nodes travel; `side` is re-derived on the way back in.
        self.nodes.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PointGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let nodes = Vec::<GridPoint>::deserialize(deserializer)?;
        PointGrid::from_nodes(nodes).map_err(serde::de::Error::custom)
    }
}

impl PointGrid {
    /// Build a grid from a row-major node sequence.
    ///
    /// Returns [`GridError::NotSquare`] unless the length is a perfect
    /// square, and [`GridError::Empty`] for an empty sequence.
    pub fn from_nodes(nodes: Vec<GridPoint>) -> Result<Self, GridError> {
        if nodes.is_empty() {
            return Err(GridError::Empty);
        }
        let side = nodes.len().isqrt();
        if side * side != nodes.len() {
            return Err(GridError::NotSquare { len: nodes.len() });
        }
        Ok(Self { nodes, side })
    }

    /// Number of nodes in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A grid is never empty; provided for clippy-friendly symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Samples per row (`⌊√len⌋`, exact by the square invariant).
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Node at `index`, or `None` when out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<GridPoint> {
        self.nodes.get(index).copied()
    }

    /// All nodes in index order.
    #[inline]
    pub fn points(&self) -> &[GridPoint] {
        &self.nodes
    }

    /// Iterate over nodes in index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.nodes.iter().copied()
    }

    /// 3D Euclidean distance between the nodes at `a` and `b`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        self.nodes[a].distance(self.nodes[b])
    }

    /// Index of the node closest to `p` in 3D Euclidean distance.
    ///
    /// This is the picking contract used by interactive callers: given
    /// an arbitrary point (e.g. a surface pick), snap to the grid.
    /// Earliest index wins among exact ties.
    pub fn nearest(&self, p: GridPoint) -> usize {
        let mut min = f64::INFINITY;
        let mut min_index = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            let d = node.distance(p);
            if d < min {
                min = d;
                min_index = i;
            }
        }
        min_index
    }
}

impl Index<usize> for PointGrid {
    type Output = GridPoint;

    #[inline]
    fn index(&self, index: usize) -> &GridPoint {
        &self.nodes[index]
    }
}
