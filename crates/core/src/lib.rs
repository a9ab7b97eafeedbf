//! # Pagefill Core
//!
//! Core types and traits for the pagefill rectangle page-packing engine.
//!
//! This crate provides the foundational pieces shared by the search engine and
//! its callers:
//!
//! - **Geometry**: [`Size`], [`Point`], [`Spacing`], [`PaddedRect`] and
//!   [`padded_size`] for turning item sizes into placement-ready rectangles
//! - **Positions**: [`Position`], a candidate anchor whose validity depends
//!   on the search depth
//! - **Page setup**: [`PageOptions`], [`Margins`] and the derived [`PageBounds`]
//! - **Items**: the [`Item`] and [`ItemSource`] traits, with [`RectItem`] and
//!   [`VecSource`] as ready-made implementations
//! - **Results**: [`PageResult`], [`PagePlacement`], [`SearchStats`]
//!
//! ## Configuration
//!
//! ```rust
//! use pagefill_core::{Margins, PageOptions};
//!
//! let options = PageOptions::new(2480, 3508)
//!     .with_margins(Margins::uniform(60))
//!     .with_spacing(10, 10)
//!     .with_auto_rotate(true);
//!
//! let bounds = options.bounds().unwrap();
//! assert_eq!(bounds.printable_size(), options.printable_size());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod bounds;
pub mod config;
pub mod error;
pub mod geometry;
pub mod item;
pub mod position;
pub mod result;

// Re-exports
pub use bounds::PageBounds;
pub use config::{Margins, PageOptions, DEFAULT_AREA_CAP_FACTOR};
pub use error::{Error, Result};
pub use geometry::{padded_size, Coord, PaddedRect, Point, Size, Spacing};
pub use item::{Item, ItemSource, RectItem, VecSource};
pub use position::Position;
pub use result::{PagePlacement, PageResult, SearchStats};
