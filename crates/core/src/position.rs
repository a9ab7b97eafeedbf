//! Candidate anchor positions with depth-scoped validity.

use crate::geometry::Point;

/// A candidate anchor offered by a placed rectangle.
///
/// Validity is relative to the search depth: a position closed at depth `d`
/// is still open when evaluated at depth `d` or shallower, and closed for
/// every deeper frame. Retreating the search past `d` makes the position
/// visible again without touching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    coordinates: Point,
    closing_depth: Option<usize>,
}

impl Position {
    /// Creates a position that is open at every depth.
    pub fn new(coordinates: Point) -> Self {
        Self {
            coordinates,
            closing_depth: None,
        }
    }

    /// Anchor coordinates.
    pub fn coordinates(&self) -> Point {
        self.coordinates
    }

    /// Depth at which the position was closed, `None` while open everywhere.
    pub fn closing_depth(&self) -> Option<usize> {
        self.closing_depth
    }

    /// Returns true if the position is closed when evaluated at `at_depth`.
    pub fn is_closed(&self, at_depth: usize) -> bool {
        matches!(self.closing_depth, Some(depth) if depth < at_depth)
    }

    /// Returns true if the position is open when evaluated at `at_depth`.
    pub fn is_open(&self, at_depth: usize) -> bool {
        !self.is_closed(at_depth)
    }

    /// Closes the position at `depth`.
    ///
    /// Only tightens: returns `false` and leaves the position unchanged if it
    /// is already closed at `depth` or shallower.
    pub fn close(&mut self, depth: usize) -> bool {
        match self.closing_depth {
            Some(current) if current <= depth => false,
            _ => {
                self.closing_depth = Some(depth);
                true
            }
        }
    }

    /// Opens the position at every depth again.
    pub fn reopen(&mut self) {
        self.closing_depth = None;
    }
}
