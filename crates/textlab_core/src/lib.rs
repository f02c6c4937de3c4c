//! textlab core types
//!
//! This crate provides the leaf types shared by the rendering pipeline:
//!
//! - **Colors**: 8-bit RGBA colors, hex parsing and a bounded conversion cache
//! - **Geometry**: canvas sizes, margins and text bounding boxes
//! - **Alignment**: the nine anchor positions text can be pinned to
//! - **Coercion**: lenient numeric helpers that clamp instead of failing
//!
//! # Example
//!
//! ```rust
//! use textlab_core::{Alignment, Color, ColorCache};
//!
//! let mut colors = ColorCache::new();
//! assert_eq!(colors.get("#FF0000"), Color::rgb(255, 0, 0));
//! assert_eq!(colors.get("not a color"), Color::BLACK);
//!
//! let anchor: Alignment = "se".parse().unwrap();
//! assert_eq!(anchor, Alignment::SouthEast);
//! ```

pub mod alignment;
pub mod coerce;
pub mod color;
pub mod geometry;

pub use alignment::{Alignment, AxisAnchor, ParseAlignmentError};
pub use color::{Color, ColorCache, COLOR_CACHE_CAPACITY};
pub use geometry::{Margins, Size, TextBounds};
