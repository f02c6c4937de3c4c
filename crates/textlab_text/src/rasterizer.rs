//! Outline glyph rasterization
//!
//! swash scales and renders each glyph to an 8-bit coverage mask. Fonts with
//! embedded bitmap strikes (including color emoji) are rendered from the
//! best matching strike, and only their alpha is kept.

use crate::font::FontFace;
use crate::{Result, TextError};
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::FontRef;

/// Sources tried in order for every glyph
const SOURCES: [Source; 3] = [
    Source::Outline,
    Source::Bitmap(StrikeWith::BestFit),
    Source::ColorBitmap(StrikeWith::BestFit),
];

/// Coverage bitmap of one glyph, positioned relative to its pen point
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    /// Row-major coverage, `width * height` bytes
    pub coverage: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Pen position to the left edge
    pub left: i32,
    /// Baseline up to the top edge
    pub top: i32,
}

impl RasterizedGlyph {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn from_swash(image: Image) -> Self {
        let coverage = match image.content {
            Content::Mask => image.data,
            // RGBA (color bitmaps) or RGB-plus-alpha (subpixel masks)
            Content::Color | Content::SubpixelMask => {
                image.data.chunks_exact(4).map(|px| px[3]).collect()
            }
        };
        Self {
            coverage,
            width: image.placement.width,
            height: image.placement.height,
            left: image.placement.left,
            top: image.placement.top,
        }
    }
}

/// Renders glyphs of outline fonts; reuses swash's scaling state between calls
pub struct GlyphRasterizer {
    context: ScaleContext,
}

impl GlyphRasterizer {
    pub fn new() -> Self {
        Self {
            context: ScaleContext::new(),
        }
    }

    /// Render one glyph at `size` pixels per em
    ///
    /// Returns `Ok(None)` for glyphs without ink, such as spaces.
    pub fn rasterize(
        &mut self,
        face: &FontFace,
        glyph_id: u16,
        size: f32,
    ) -> Result<Option<RasterizedGlyph>> {
        let font = FontRef::from_index(face.data(), face.face_index() as usize)
            .ok_or(TextError::InvalidFontData)?;
        let mut scaler = self.context.builder(font).size(size).build();

        let glyph = Render::new(&SOURCES)
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id)
            .map(RasterizedGlyph::from_swash)
            .filter(|glyph| !glyph.is_empty());
        Ok(glyph)
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}
