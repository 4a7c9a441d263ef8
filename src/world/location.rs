use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell on the grid. `x` is the row, `y` the column, both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub x: usize,
    pub y: usize,
}

impl Location {
    pub fn new(x: usize, y: usize) -> Self {
        Location { x, y }
    }

    /// Orthogonal neighbours only. Identical and diagonal cells are not adjacent.
    pub fn adjacent(&self, other: &Location) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    /// Shift by `(dx, dy)`, `None` when either coordinate would go negative.
    /// Upper bounds are checked by the owning world.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Location> {
        Some(Location {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Whether the cell lies inside a grid of `dims.x` rows and `dims.y` columns.
    pub fn within(&self, dims: &Location) -> bool {
        self.x < dims.x && self.y < dims.y
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Location {
    fn from((x, y): (usize, usize)) -> Self {
        Location { x, y }
    }
}
