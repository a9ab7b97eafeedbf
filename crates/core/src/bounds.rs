//! Page bounds.

use crate::config::PageOptions;
use crate::geometry::{Coord, PaddedRect, Point, Size, Spacing};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive pixel bounds of the printable page area.
///
/// The bounds start one pixel outside the printable area on the left and top,
/// where the shared border of the first row and column of padded rectangles
/// lies. A padded rectangle for an item exactly the printable size is equal
/// to these bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageBounds {
    /// Left border pixel.
    pub left: Coord,
    /// Top border pixel.
    pub top: Coord,
    /// Right border pixel.
    pub right: Coord,
    /// Bottom border pixel.
    pub bottom: Coord,
    /// Inclusive pixel width.
    pub width: Coord,
    /// Inclusive pixel height.
    pub height: Coord,
}

impl PageBounds {
    /// Creates bounds from inclusive border pixels.
    pub fn new(left: Coord, top: Coord, right: Coord, bottom: Coord) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            width: right - left + 1,
            height: bottom - top + 1,
        }
    }

    /// Derives bounds from page size and margins.
    ///
    /// The options are expected to be validated.
    pub fn from_options(options: &PageOptions) -> Self {
        let m = &options.margins;
        Self::new(
            m.left - 1,
            m.top - 1,
            options.page_size.width - m.right - 1,
            options.page_size.height - m.bottom - 1,
        )
    }

    /// Top-left border pixel, the seed anchor of every page.
    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Size available to items.
    pub fn printable_size(&self) -> Size {
        Size::new(self.width - 1, self.height - 1)
    }

    /// Padded page area.
    pub fn area(&self) -> Coord {
        self.width * self.height
    }

    /// Returns true if `rect` lies inside the bounds.
    ///
    /// The right and bottom edges may extend by the spacing, since the
    /// trailing gap of the last column and row falls outside the page.
    pub fn contains_rect(&self, rect: &PaddedRect, spacing: Spacing) -> bool {
        rect.left() >= self.left
            && rect.top() >= self.top
            && rect.right() <= self.right + spacing.horizontal
            && rect.bottom() <= self.bottom + spacing.vertical
    }

    /// Edge length `rect` shares with the page borders.
    pub fn border_coverage(&self, rect: &PaddedRect, spacing: Spacing) -> Coord {
        let mut coverage = 0;
        if rect.left() == self.left {
            coverage += rect.edge_height();
        }
        if rect.top() == self.top {
            coverage += rect.edge_width();
        }
        if rect.right() == self.right + spacing.horizontal {
            coverage += rect.edge_height();
        }
        if rect.bottom() == self.bottom + spacing.vertical {
            coverage += rect.edge_width();
        }
        coverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Margins;

    #[test]
    fn test_bounds_from_options() {
        let bounds = PageBounds::from_options(&PageOptions::new(200, 100));
        assert_eq!(bounds.left, -1);
        assert_eq!(bounds.top, -1);
        assert_eq!(bounds.right, 199);
        assert_eq!(bounds.bottom, 99);
        assert_eq!(bounds.width, 201);
        assert_eq!(bounds.height, 101);
        assert_eq!(bounds.printable_size(), Size::new(200, 100));
    }

    #[test]
    fn test_bounds_with_margins() {
        let options = PageOptions::new(200, 100).with_margins(Margins::new(10, 5, 20, 15));
        let bounds = PageBounds::from_options(&options);
        assert_eq!(bounds.top_left(), Point::new(9, 4));
        assert_eq!(bounds.printable_size(), options.printable_size());
    }

    #[test]
    fn test_full_page_rect_is_contained() {
        let bounds = PageBounds::from_options(&PageOptions::new(100, 100));
        let rect = PaddedRect::new(-1, -1, 101, 101);
        assert!(bounds.contains_rect(&rect, Spacing::default()));
        assert_eq!(bounds.border_coverage(&rect, Spacing::default()), 400);

        let too_wide = PaddedRect::new(-1, -1, 102, 101);
        assert!(!bounds.contains_rect(&too_wide, Spacing::default()));
    }

    #[test]
    fn test_trailing_spacing_allowed() {
        let bounds = PageBounds::from_options(&PageOptions::new(100, 100));
        let spacing = Spacing::new(5, 5);
        // 100x100 item padded by 5 pixels of spacing
        let rect = PaddedRect::new(-1, -1, 106, 106);
        assert!(bounds.contains_rect(&rect, spacing));
        assert!(!bounds.contains_rect(&rect, Spacing::default()));
        assert_eq!(bounds.border_coverage(&rect, spacing), 4 * 105);
    }
}
