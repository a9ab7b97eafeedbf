//! Single-position placement attempts.
//!
//! An attempt positions a padded rectangle at an anchor, rejects it if it
//! leaves the page or overlaps a placed rectangle, and otherwise scores it by
//! coverage: the edge length it shares with placed rectangles and page borders.

use pagefill_core::{Coord, PageBounds, PaddedRect, Point, Size, Spacing};

use crate::placed::PlacedRectangle;

/// Why an attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    /// The rectangle would extend past the page bounds.
    OutOfBounds,
    /// The rectangle would overlap a placed rectangle.
    Overlap,
}

/// A successful attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Top-left border pixel of the padded rectangle.
    pub anchor: Point,
    /// Shared edge length with neighbours and page borders.
    pub coverage: Coord,
    /// Arena indices of the placed rectangles it touches.
    pub touching: Vec<usize>,
}

/// The rectangles placed in one search frame.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    arena: &'a [PlacedRectangle],
    members: &'a [usize],
}

impl<'a> Layout<'a> {
    /// Creates a view over `members`, given as indices into `arena`.
    pub fn new(arena: &'a [PlacedRectangle], members: &'a [usize]) -> Self {
        Self { arena, members }
    }

    /// Iterates over the placed item rectangles, skipping the seed.
    pub fn rects(&self) -> impl Iterator<Item = (usize, &'a PaddedRect)> + 'a {
        let arena = self.arena;
        self.members
            .iter()
            .map(move |&i| (i, &arena[i]))
            .filter(|(_, placed)| !placed.is_seed())
            .map(|(i, placed)| (i, placed.rect()))
    }
}

/// Tries to place a rectangle of padded `size` with its top-left at `anchor`.
pub fn try_place(
    anchor: Point,
    size: Size,
    layout: Layout<'_>,
    bounds: &PageBounds,
    spacing: Spacing,
) -> Result<Attempt, Rejected> {
    let rect = PaddedRect::at(anchor, size);
    if !bounds.contains_rect(&rect, spacing) {
        return Err(Rejected::OutOfBounds);
    }

    let mut coverage = bounds.border_coverage(&rect, spacing);
    let mut touching = Vec::new();
    for (index, placed) in layout.rects() {
        if rect.overlaps(placed) {
            return Err(Rejected::Overlap);
        }
        let length = rect.touch_length(placed);
        if length > 0 {
            coverage += length;
            touching.push(index);
        }
    }

    Ok(Attempt {
        anchor,
        coverage,
        touching,
    })
}

/// Anchors worth trying for a rectangle of padded `size` offered `position`.
///
/// Before the position itself come up to two slid variants: moved left until
/// it meets the nearest placed rectangle (or the page border) on its rows, and
/// moved up until it meets the nearest one on its columns. Variants equal to
/// the position are skipped. Whether a slid anchor is valid is left to
/// [`try_place`].
pub fn candidate_anchors(
    position: Point,
    size: Size,
    layout: Layout<'_>,
    bounds: &PageBounds,
) -> Vec<Point> {
    let probe = PaddedRect::at(position, size);
    let mut anchors = Vec::with_capacity(3);

    let left_stop = layout
        .rects()
        .filter(|(_, r)| r.right() <= position.x && r.overlaps_vertically(&probe))
        .map(|(_, r)| r.right())
        .fold(bounds.left, Coord::max);
    if left_stop < position.x {
        anchors.push(Point::new(left_stop, position.y));
    }

    let top_stop = layout
        .rects()
        .filter(|(_, r)| r.bottom() <= position.y && r.overlaps_horizontally(&probe))
        .map(|(_, r)| r.bottom())
        .fold(bounds.top, Coord::max);
    if top_stop < position.y {
        anchors.push(Point::new(position.x, top_stop));
    }

    anchors.push(position);
    anchors
}
