//! Rectangles committed to a search frame.

use pagefill_core::{Coord, PageBounds, PaddedRect, Point, Position};

/// A padded rectangle placed by the search, hosting its corners as anchors.
#[derive(Debug, Clone)]
pub struct PlacedRectangle {
    queue_index: Option<usize>,
    rect: PaddedRect,
    rotated: bool,
    neighbours: Vec<usize>,
    hosted_positions: Vec<Position>,
}

impl PlacedRectangle {
    /// Creates a rectangle for the queue item at `queue_index`.
    ///
    /// `neighbours` are the arena indices of the rectangles it touches.
    pub fn new(queue_index: usize, rect: PaddedRect, rotated: bool, neighbours: Vec<usize>) -> Self {
        let hosted_positions = rect.corners().into_iter().map(Position::new).collect();
        Self {
            queue_index: Some(queue_index),
            rect,
            rotated,
            neighbours,
            hosted_positions,
        }
    }

    /// Creates the zero-size rectangle that seeds a page with its top-left
    /// corner as the only anchor.
    pub fn seed(bounds: &PageBounds) -> Self {
        let origin = bounds.top_left();
        Self {
            queue_index: None,
            rect: PaddedRect::new(origin.x, origin.y, 1, 1),
            rotated: false,
            neighbours: Vec::new(),
            hosted_positions: vec![Position::new(origin)],
        }
    }

    /// Queue index of the item, `None` for the seed.
    pub fn queue_index(&self) -> Option<usize> {
        self.queue_index
    }

    /// Returns true for the synthetic seed rectangle.
    pub fn is_seed(&self) -> bool {
        self.queue_index.is_none()
    }

    /// Padded extents.
    pub fn rect(&self) -> &PaddedRect {
        &self.rect
    }

    /// Whether the item is turned by 90 degrees.
    pub fn rotated(&self) -> bool {
        self.rotated
    }

    /// Arena indices of rectangles touched when this one was placed.
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }

    /// Padded area, zero for the seed.
    pub fn square(&self) -> Coord {
        if self.is_seed() {
            0
        } else {
            self.rect.square()
        }
    }

    /// Corner anchors hosted by this rectangle.
    pub fn positions(&self) -> &[Position] {
        &self.hosted_positions
    }

    /// Mutable access to the hosted anchor in `slot`.
    pub fn position_mut(&mut self, slot: usize) -> &mut Position {
        &mut self.hosted_positions[slot]
    }

    /// Anchors open at `depth`, with their slot index.
    pub fn open_positions(&self, depth: usize) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.hosted_positions
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.is_open(depth))
            .map(|(slot, p)| (slot, p.coordinates()))
    }
}
