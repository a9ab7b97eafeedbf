//! Integer geometry for padded page rectangles.
//!
//! All placement geometry works on *padded* rectangles: the item size plus the
//! configured spacing plus a 1-pixel border that neighbouring rectangles share.
//! A padded rectangle spans its border pixels inclusively, so two rectangles
//! whose edges sit on the same pixel column or row touch without overlapping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Device-pixel coordinate.
pub type Coord = i64;

/// A width/height pair in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Horizontal extent.
    pub width: Coord,
    /// Vertical extent.
    pub height: Coord,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }

    /// Returns the area.
    pub fn area(&self) -> Coord {
        self.width * self.height
    }

    /// Returns the size turned by 90 degrees.
    pub fn rotated(&self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Returns true if this size fits inside `bounds` without rotation.
    pub fn fits_within(&self, bounds: Size) -> bool {
        self.width <= bounds.width && self.height <= bounds.height
    }

    /// Returns true if either dimension is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Scales the size down proportionally so that it fits inside `bounds`.
    ///
    /// Sizes that already fit are returned unchanged. Scaling rounds down,
    /// keeping each dimension at least one pixel.
    pub fn scaled_to_fit(&self, bounds: Size) -> Self {
        if self.fits_within(bounds) {
            return *self;
        }
        if self.is_empty() {
            return Self::new(
                self.width.clamp(0, bounds.width),
                self.height.clamp(0, bounds.height),
            );
        }

        // Compare bounds.width / width against bounds.height / height without division.
        if bounds.width * self.height <= bounds.height * self.width {
            let height = (self.height * bounds.width / self.width).max(1);
            Self::new(bounds.width, height.min(bounds.height))
        } else {
            let width = (self.width * bounds.height / self.height).max(1);
            Self::new(width.min(bounds.width), bounds.height)
        }
    }
}

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: Coord,
    /// Vertical coordinate.
    pub y: Coord,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Returns the point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: Coord, dy: Coord) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Horizontal and vertical spacing kept between neighbouring items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spacing {
    /// Gap between horizontally adjacent items.
    pub horizontal: Coord,
    /// Gap between vertically adjacent items.
    pub vertical: Coord,
}

impl Spacing {
    /// Creates a new spacing.
    pub const fn new(horizontal: Coord, vertical: Coord) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Converts a logical item size into its padded, placement-ready size.
///
/// The padded size adds the spacing and one pixel for the border shared with
/// the next rectangle.
pub fn padded_size(size: Size, spacing: Spacing) -> Size {
    Size::new(
        size.width + spacing.horizontal + 1,
        size.height + spacing.vertical + 1,
    )
}

/// A padded rectangle anchored on the page.
///
/// `x`/`y` are the left/top border pixels; `width`/`height` count pixels
/// inclusively, so the right border pixel is `x + width - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaddedRect {
    /// Left border pixel.
    pub x: Coord,
    /// Top border pixel.
    pub y: Coord,
    /// Inclusive pixel width.
    pub width: Coord,
    /// Inclusive pixel height.
    pub height: Coord,
}

impl PaddedRect {
    /// Creates a rectangle from its top-left border pixel and padded size.
    pub fn new(x: Coord, y: Coord, width: Coord, height: Coord) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of `size` anchored at `anchor`.
    pub fn at(anchor: Point, size: Size) -> Self {
        Self::new(anchor.x, anchor.y, size.width, size.height)
    }

    /// Left border pixel.
    pub fn left(&self) -> Coord {
        self.x
    }

    /// Top border pixel.
    pub fn top(&self) -> Coord {
        self.y
    }

    /// Right border pixel.
    pub fn right(&self) -> Coord {
        self.x + self.width - 1
    }

    /// Bottom border pixel.
    pub fn bottom(&self) -> Coord {
        self.y + self.height - 1
    }

    /// Padded area used to rank placements.
    pub fn square(&self) -> Coord {
        self.width * self.height
    }

    /// Length of the top and bottom edges.
    pub fn edge_width(&self) -> Coord {
        self.width - 1
    }

    /// Length of the left and right edges.
    pub fn edge_height(&self) -> Coord {
        self.height - 1
    }

    /// Corners in the order top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.left(), self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Returns true if the two rectangles share a region of non-zero area.
    ///
    /// Rectangles that only share a border pixel row or column touch and do
    /// not overlap.
    pub fn overlaps(&self, other: &PaddedRect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Length of the edge shared with `other`, or zero if they do not touch.
    ///
    /// Only full edge-to-edge contact counts; meeting at a single corner
    /// contributes nothing.
    pub fn touch_length(&self, other: &PaddedRect) -> Coord {
        let mut length = 0;
        if self.right() == other.left() || self.left() == other.right() {
            length += span_overlap(self.top(), self.bottom(), other.top(), other.bottom());
        }
        if self.bottom() == other.top() || self.top() == other.bottom() {
            length += span_overlap(self.left(), self.right(), other.left(), other.right());
        }
        length
    }

    /// Returns true if an anchor at `point` would start inside this rectangle.
    ///
    /// Uses the half-open region `[left, right) x [top, bottom)`: any rectangle
    /// anchored there overlaps this one.
    pub fn shadows(&self, point: Point) -> bool {
        self.left() <= point.x
            && point.x < self.right()
            && self.top() <= point.y
            && point.y < self.bottom()
    }

    /// Returns true if the vertical span of `self` overlaps `other`'s with
    /// non-zero length.
    pub fn overlaps_vertically(&self, other: &PaddedRect) -> bool {
        self.top() < other.bottom() && other.top() < self.bottom()
    }

    /// Returns true if the horizontal span of `self` overlaps `other`'s with
    /// non-zero length.
    pub fn overlaps_horizontally(&self, other: &PaddedRect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }
}

fn span_overlap(a_start: Coord, a_end: Coord, b_start: Coord, b_end: Coord) -> Coord {
    (a_end.min(b_end) - a_start.max(b_start)).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_size() {
        let padded = padded_size(Size::new(100, 50), Spacing::new(4, 2));
        assert_eq!(padded, Size::new(105, 53));

        let padded = padded_size(Size::new(10, 10), Spacing::default());
        assert_eq!(padded, Size::new(11, 11));
    }

    #[test]
    fn test_rect_edges() {
        let rect = PaddedRect::new(-1, -1, 101, 51);
        assert_eq!(rect.right(), 99);
        assert_eq!(rect.bottom(), 49);
        assert_eq!(rect.edge_width(), 100);
        assert_eq!(rect.edge_height(), 50);
        assert_eq!(rect.square(), 101 * 51);
    }

    #[test]
    fn test_shared_border_is_not_overlap() {
        let a = PaddedRect::new(0, 0, 11, 11);
        let b = PaddedRect::new(10, 0, 11, 11);
        assert!(!a.overlaps(&b));
        assert_eq!(a.touch_length(&b), 10);
        assert_eq!(b.touch_length(&a), 10);
    }

    #[test]
    fn test_overlap() {
        let a = PaddedRect::new(0, 0, 11, 11);
        let b = PaddedRect::new(9, 9, 11, 11);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_corner_contact_has_no_touch_length() {
        let a = PaddedRect::new(0, 0, 11, 11);
        let b = PaddedRect::new(10, 10, 11, 11);
        assert!(!a.overlaps(&b));
        assert_eq!(a.touch_length(&b), 0);
    }

    #[test]
    fn test_partial_touch() {
        let a = PaddedRect::new(0, 0, 21, 11);
        let b = PaddedRect::new(5, 10, 31, 11);
        assert_eq!(a.touch_length(&b), 15);
    }

    #[test]
    fn test_shadows_half_open() {
        let rect = PaddedRect::new(0, 0, 11, 11);
        assert!(rect.shadows(Point::new(0, 0)));
        assert!(rect.shadows(Point::new(9, 9)));
        assert!(!rect.shadows(Point::new(10, 0)));
        assert!(!rect.shadows(Point::new(0, 10)));
    }

    #[test]
    fn test_scaled_to_fit() {
        let bounds = Size::new(100, 100);
        assert_eq!(Size::new(50, 80).scaled_to_fit(bounds), Size::new(50, 80));
        assert_eq!(Size::new(200, 100).scaled_to_fit(bounds), Size::new(100, 50));
        assert_eq!(Size::new(100, 300).scaled_to_fit(bounds), Size::new(33, 100));

        let scaled = Size::new(333, 77).scaled_to_fit(bounds);
        assert!(scaled.fits_within(bounds));
        assert_eq!(scaled.scaled_to_fit(bounds), scaled);
    }
}
