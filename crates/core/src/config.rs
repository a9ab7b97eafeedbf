//! Page options.

use crate::bounds::PageBounds;
use crate::geometry::{Coord, Size, Spacing};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default multiple of the page area the placement queue may hold.
pub const DEFAULT_AREA_CAP_FACTOR: u32 = 3;

/// Page margins in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Margins {
    /// Left margin.
    pub left: Coord,
    /// Top margin.
    pub top: Coord,
    /// Right margin.
    pub right: Coord,
    /// Bottom margin.
    pub bottom: Coord,
}

impl Margins {
    /// Creates margins from individual edges.
    pub const fn new(left: Coord, top: Coord, right: Coord, bottom: Coord) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates equal margins on all four edges.
    pub const fn uniform(margin: Coord) -> Self {
        Self::new(margin, margin, margin, margin)
    }
}

/// Configuration for filling one page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageOptions {
    /// Physical page size in device pixels.
    pub page_size: Size,

    /// Margins kept free on each edge.
    pub margins: Margins,

    /// Gap between horizontally adjacent items.
    pub horizontal_spacing: Coord,

    /// Gap between vertically adjacent items.
    pub vertical_spacing: Coord,

    /// Whether items may be turned by 90 degrees.
    pub auto_rotate: bool,

    /// Deepest search frame that still branches on backtrack.
    ///
    /// Frames at or above this depth evaluate both orientations together and
    /// retry with the next item when the search backtracks into them.
    pub branching_depth_limit: usize,

    /// Multiple of the page area the placement queue may hold before it stops
    /// pulling items from the source.
    pub area_cap_factor: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            page_size: Size::new(0, 0),
            margins: Margins::default(),
            horizontal_spacing: 0,
            vertical_spacing: 0,
            auto_rotate: false,
            branching_depth_limit: 0,
            area_cap_factor: DEFAULT_AREA_CAP_FACTOR,
        }
    }
}

impl PageOptions {
    /// Creates options for a page of the given size with default settings.
    pub fn new(width: Coord, height: Coord) -> Self {
        Self {
            page_size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets horizontal and vertical spacing.
    pub fn with_spacing(mut self, horizontal: Coord, vertical: Coord) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    /// Enables or disables 90 degree rotation.
    pub fn with_auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }

    /// Sets the branching depth limit.
    pub fn with_branching_depth_limit(mut self, limit: usize) -> Self {
        self.branching_depth_limit = limit;
        self
    }

    /// Sets the queue area cap as a multiple of the page area.
    pub fn with_area_cap_factor(mut self, factor: u32) -> Self {
        self.area_cap_factor = factor.max(1);
        self
    }

    /// Returns the configured spacing.
    pub fn spacing(&self) -> Spacing {
        Spacing::new(self.horizontal_spacing, self.vertical_spacing)
    }

    /// Size of the printable area between the margins.
    pub fn printable_size(&self) -> Size {
        Size::new(
            self.page_size.width - self.margins.left - self.margins.right,
            self.page_size.height - self.margins.top - self.margins.bottom,
        )
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<()> {
        if self.page_size.width <= 0 || self.page_size.height <= 0 {
            return Err(Error::InvalidPage(format!(
                "page size must be positive, got {}x{}",
                self.page_size.width, self.page_size.height
            )));
        }

        if self.horizontal_spacing < 0 || self.vertical_spacing < 0 {
            return Err(Error::InvalidSpacing(format!(
                "spacing must not be negative, got {}x{}",
                self.horizontal_spacing, self.vertical_spacing
            )));
        }

        let m = &self.margins;
        if m.left < 0 || m.top < 0 || m.right < 0 || m.bottom < 0 {
            return Err(Error::InvalidMargins(
                "margins must not be negative".into(),
            ));
        }

        let printable = self.printable_size();
        if printable.width <= 0 || printable.height <= 0 {
            return Err(Error::InvalidMargins(format!(
                "margins leave no printable area on a {}x{} page",
                self.page_size.width, self.page_size.height
            )));
        }

        Ok(())
    }

    /// Validates the options and derives the page bounds.
    pub fn bounds(&self) -> Result<PageBounds> {
        self.validate()?;
        Ok(PageBounds::from_options(self))
    }
}
