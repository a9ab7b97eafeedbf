//! Page result representation.

use crate::geometry::{Coord, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One item placed on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PagePlacement<I> {
    /// The placed item, already resized to its final orientation.
    pub item: I,
    /// Top-left pixel of the item.
    pub position: Point,
    /// Whether the item was turned by 90 degrees.
    pub rotated: bool,
}

impl<I> PagePlacement<I> {
    /// Creates a new placement.
    pub fn new(item: I, position: Point, rotated: bool) -> Self {
        Self {
            item,
            position,
            rotated,
        }
    }
}

/// Counters collected while searching one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Number of items in the placement queue.
    pub queue_len: usize,
    /// Search frames pushed, excluding the root frame.
    pub frames_pushed: usize,
    /// Frames revisited after a deeper frame was exhausted.
    pub backtracks: usize,
    /// Frames in which no further item could be placed.
    pub terminal_frames: usize,
    /// Cumulative padded square of the best placement sequence.
    pub best_square: Coord,
    /// Cumulative coverage of the best placement sequence.
    pub best_coverage: Coord,
    /// Cumulative padded square of every terminal frame, in visiting order.
    pub terminal_squares: Vec<Coord>,
}

/// Result of filling one page.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageResult<I> {
    /// Items placed on this page, in placement order.
    pub placements: Vec<PagePlacement<I>>,

    /// True while leftover items are waiting or the source has more items.
    pub has_more_pages: bool,

    /// Number of queued items that did not fit and were kept for the next page.
    pub leftover_count: usize,

    /// Whether filling was cancelled while building the queue.
    pub cancelled: bool,

    /// Placed padded area divided by the padded page area (0.0 - 1.0).
    pub utilization: f64,

    /// Search counters.
    pub stats: SearchStats,
}

impl<I> PageResult<I> {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
            has_more_pages: false,
            leftover_count: 0,
            cancelled: false,
            utilization: 0.0,
            stats: SearchStats::default(),
        }
    }

    /// Creates the result of a cancelled page.
    pub fn cancelled(has_more_pages: bool) -> Self {
        Self {
            cancelled: true,
            has_more_pages,
            ..Self::new()
        }
    }

    /// Number of placed items.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns utilization as a percentage string.
    pub fn utilization_percent(&self) -> String {
        format!("{:.1}%", self.utilization * 100.0)
    }

    /// Iterates over the placed items.
    pub fn items(&self) -> impl Iterator<Item = &I> {
        self.placements.iter().map(|p| &p.item)
    }
}

impl<I> Default for PageResult<I> {
    fn default() -> Self {
        Self::new()
    }
}
