//! 8-connectivity on a row-major square grid of flat indices.

/// The eight adjacency offsets relative to the current index, in terms
/// of (row delta, column delta). With side `s` the flat offsets are
/// +1, −1, +s, +s+1, +s−1, −s, −s+1, −s−1; enumeration order matters
/// for tie-breaking among equal-cost routes and is kept stable.
const OFFSETS: [(isize, isize); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (1, 1),
    (1, -1),
    (-1, 0),
    (-1, 1),
    (-1, -1),
];

/// Append the valid 8-connected neighbors of `index` on a `side × side`
/// grid into `buf`. The caller clears `buf` before calling.
///
/// Both row and column are bounds-checked, so a ±1 step at the first or
/// last column never wraps onto the adjacent row.
pub fn grid_neighbors(index: usize, side: usize, buf: &mut Vec<usize>) {
    let row = (index / side) as isize;
    let col = (index % side) as isize;
    let s = side as isize;
    for (dr, dc) in OFFSETS {
        let r = row + dr;
        let c = col + dc;
        if r >= 0 && r < s && c >= 0 && c < s {
            buf.push((r * s + c) as usize);
        }
    }
}
