//! # Pagefill
//!
//! Packs axis-aligned rectangular items onto fixed-size pages.
//!
//! Each page is filled by a best-fit search: items are queued largest first,
//! every item is tried at every open corner of the rectangles already placed,
//! and the anchor sharing the most edge length with neighbours and page
//! borders wins. Near the root of the search, alternatives are retried and
//! the sequence covering the largest padded area is kept. Items that do not
//! fit are carried over to the next page.
//!
//! ## Features
//!
//! - Margins and horizontal/vertical spacing between items
//! - Optional 90 degree rotation
//! - Oversized items scaled down to the printable area
//! - Lazy item sources, cancellable from another thread
//!
//! ## Quick Start
//!
//! ```rust
//! use pagefill::{Margins, PageFiller, PageOptions, RectItem, VecSource};
//!
//! let options = PageOptions::new(210, 297)
//!     .with_margins(Margins::uniform(10))
//!     .with_spacing(2, 2)
//!     .with_auto_rotate(true);
//!
//! let mut filler = PageFiller::new(options).unwrap();
//! let mut source = VecSource::new(vec![
//!     RectItem::new("photo", 90, 60),
//!     RectItem::new("label", 40, 20),
//!     RectItem::new("poster", 180, 120),
//! ]);
//!
//! let page = filler.fill_page(&mut source);
//! for placement in &page.placements {
//!     println!("{} at ({}, {})", placement.item.id(), placement.position.x, placement.position.y);
//! }
//! assert_eq!(page.placed_count(), 3);
//! assert!(!page.has_more_pages);
//! ```

pub mod attempt;
pub mod filler;
pub mod placed;
pub mod queue;
pub mod search;

pub use filler::PageFiller;
pub use queue::{PlacementQueue, QueuedItem};
pub use search::{SearchEngine, SearchOutcome};

// Re-export core types
pub use pagefill_core::{
    padded_size, Coord, Error, Item, ItemSource, Margins, PageBounds, PageOptions, PagePlacement,
    PageResult, PaddedRect, Point, Position, RectItem, Result, SearchStats, Size, Spacing,
    VecSource,
};
