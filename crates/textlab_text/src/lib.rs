//! Text rasterization for textlab
//!
//! This crate provides:
//! - Font loading and parsing (TTF/OTF via ttf-parser)
//! - Text shaping (HarfBuzz via rustybuzz)
//! - Glyph rasterization (swash)
//! - An embedded bitmap font used whenever no font file can be resolved
//! - Font discovery in user-configured directories
//! - Glyph masks and ink bounding boxes for the compositor
//! - Alignment of a text block inside a canvas

pub mod builtin;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod font;
pub mod layout;
pub mod rasterizer;
pub mod shaper;

pub use builtin::BuiltinFont;
pub use cache::{FontCache, FONT_CACHE_CAPACITY};
pub use catalog::{clean_font_name, FontCatalog, FontLocation};
pub use config::{FontDirectories, CONFIG_FILE_NAME, DEFAULT_FONT_DIR};
pub use engine::{GlyphMask, TextEngine, TextLayout, LINE_SPACING};
pub use font::{Font, FontFace, FontMetrics, OutlineFont};
pub use layout::text_origin;
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
pub use shaper::{shape_line, ShapedGlyph, ShapedLine};

use thiserror::Error;

/// Text rendering errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to load font: {0}")]
    FontLoadError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid font data")]
    InvalidFontData,

    #[error("Font directory config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Invalid font directory config: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TextError>;

/// Box-glyph font used by the outline tests: 1000 units per em, ascender
/// 800, descender -200. Capitals are 500x700 boxes on a 600 advance,
/// lowercase 400x500 boxes on a 500 advance, both inset 50 units, and the
/// space advances 250.
#[cfg(test)]
pub(crate) const TEST_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/BoxSans.ttf");
