//! Item and item-source traits, plus simple concrete implementations.

use std::collections::VecDeque;

use crate::geometry::Size;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Something that occupies a rectangle on a page.
///
/// The engine never inspects an item beyond its size. It asks the item to fit
/// itself to the printable area once, when the item enters the placement
/// queue, and applies the chosen orientation through [`Item::set_size`] once
/// the item is placed.
pub trait Item {
    /// Adjusts the item so that it fits inside `bounds`.
    ///
    /// With `allow_rotate` the item may keep a size that only fits when
    /// turned by 90 degrees. Fitting an item that already fits must leave its
    /// size unchanged.
    fn fit_size(&mut self, bounds: Size, allow_rotate: bool);

    /// Current size.
    fn size(&self) -> Size;

    /// Size after a 90 degree turn.
    fn rotated_size(&self) -> Size {
        self.size().rotated()
    }

    /// Replaces the current size.
    fn set_size(&mut self, size: Size);
}

/// A lazy supplier of items.
pub trait ItemSource {
    /// Item type produced by the source.
    type Item: Item;

    /// Returns true while more items are available.
    fn has_next(&self) -> bool;

    /// Takes the next item.
    fn next_item(&mut self) -> Option<Self::Item>;
}

/// A rectangular item with an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RectItem {
    id: String,
    requested: Size,
    size: Size,
}

impl RectItem {
    /// Creates an item with the requested size.
    pub fn new(id: impl Into<String>, width: i64, height: i64) -> Self {
        let size = Size::new(width, height);
        Self {
            id: id.into(),
            requested: size,
            size,
        }
    }

    /// Item identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Size the item was created with.
    pub fn requested_size(&self) -> Size {
        self.requested
    }

    /// Returns true if the item was shrunk to fit.
    pub fn is_scaled(&self) -> bool {
        self.size.area() < self.requested.area()
    }
}

impl Item for RectItem {
    fn fit_size(&mut self, bounds: Size, allow_rotate: bool) {
        if self.size.fits_within(bounds)
            || (allow_rotate && self.size.rotated().fits_within(bounds))
        {
            return;
        }

        let normal = self.size.scaled_to_fit(bounds);
        self.size = if allow_rotate {
            let turned = self.size.rotated().scaled_to_fit(bounds).rotated();
            if turned.area() > normal.area() {
                turned
            } else {
                normal
            }
        } else {
            normal
        };
    }

    fn size(&self) -> Size {
        self.size
    }

    fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}

/// An item source backed by an in-memory queue.
#[derive(Debug, Clone, Default)]
pub struct VecSource<I> {
    items: VecDeque<I>,
}

impl<I> VecSource<I> {
    /// Creates a source that yields `items` in order.
    pub fn new(items: impl IntoIterator<Item = I>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Number of items not yet taken.
    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}

impl<I: Item> ItemSource for VecSource<I> {
    type Item = I;

    fn has_next(&self) -> bool {
        !self.items.is_empty()
    }

    fn next_item(&mut self) -> Option<I> {
        self.items.pop_front()
    }
}
