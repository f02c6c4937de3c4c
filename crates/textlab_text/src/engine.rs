//! Font resolution, text measurement and glyph masks
//!
//! [`TextEngine`] owns the font catalog and a bounded font cache. Text is
//! laid out once into a [`TextLayout`]: a list of rasterized glyphs
//! positioned relative to the text origin (top-left of the first line box).
//! The layout yields the ink bounding box and renders the coverage mask at
//! any canvas position.

use crate::builtin::BuiltinFont;
use crate::cache::FontCache;
use crate::catalog::FontCatalog;
use crate::font::{Font, FontFace, OutlineFont};
use crate::rasterizer::{GlyphRasterizer, RasterizedGlyph};
use crate::shaper::shape_line;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use textlab_core::{Size, TextBounds};
use textlab_paint::AlphaMask;

/// Extra pixels between consecutive lines
pub const LINE_SPACING: i32 = 4;

/// Coverage mask of rendered text plus its ink bounding box
#[derive(Debug, Clone)]
pub struct GlyphMask {
    /// Canvas-sized coverage
    pub mask: AlphaMask,
    /// Ink bounding box in canvas coordinates, possibly partly off-canvas
    pub bounds: TextBounds,
}

impl GlyphMask {
    /// The covered region cropped out of the mask, with its canvas position
    ///
    /// Returns `None` when no ink lands on the canvas.
    pub fn ink(&self) -> Option<(AlphaMask, i32, i32)> {
        if self.bounds.is_empty() {
            return None;
        }
        let left = self.bounds.left.max(0);
        let top = self.bounds.top.max(0);
        let right = self.bounds.right().min(self.mask.width() as i32);
        let bottom = self.bounds.bottom().min(self.mask.height() as i32);
        if left >= right || top >= bottom {
            return None;
        }
        let visible = TextBounds::from_edges(left, top, right, bottom);
        Some((self.mask.cropped(visible), left, top))
    }
}

/// A glyph bitmap positioned relative to the text origin
#[derive(Debug, Clone)]
struct PlacedGlyph {
    x: i32,
    y: i32,
    glyph: Arc<RasterizedGlyph>,
}

/// Text laid out with one font, independent of where it is drawn
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    glyphs: Vec<PlacedGlyph>,
    bounds: TextBounds,
}

impl TextLayout {
    /// Ink bounding box relative to the text origin
    pub fn bounds(&self) -> TextBounds {
        self.bounds
    }

    /// True when no glyph has any ink
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Draw the glyphs with the text origin at `origin` on a `canvas` sized mask
    pub fn render_mask(&self, origin: (i32, i32), canvas: Size) -> GlyphMask {
        let (ox, oy) = origin;
        let mut mask = AlphaMask::new(canvas.width, canvas.height);
        for placed in &self.glyphs {
            let glyph = &placed.glyph;
            mask.draw_coverage(
                ox + placed.x,
                oy + placed.y,
                glyph.width,
                glyph.height,
                &glyph.coverage,
            );
        }
        GlyphMask {
            mask,
            bounds: self.bounds.translate(ox, oy),
        }
    }
}

/// Resolves fonts and turns text into glyph masks
pub struct TextEngine {
    catalog: FontCatalog,
    cache: FontCache,
    rasterizer: GlyphRasterizer,
}

impl TextEngine {
    pub fn new(catalog: FontCatalog) -> Self {
        Self {
            catalog,
            cache: FontCache::new(),
            rasterizer: GlyphRasterizer::new(),
        }
    }

    /// An engine with no font directories; all text uses the built-in font
    pub fn builtin_only() -> Self {
        Self::new(FontCatalog::empty())
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &FontCache {
        &self.cache
    }

    /// Resolve a font name at a pixel size
    ///
    /// Never fails: names that cannot be located or loaded resolve to the
    /// built-in bitmap font. Results are cached by (name, size).
    pub fn resolve_font(&mut self, name: &str, size: u32) -> Arc<Font> {
        if let Some(font) = self.cache.get(name, size) {
            return font;
        }

        let font = Arc::new(self.load_font(name, size));
        tracing::debug!(
            "Resolved font '{}' at {}px to {}",
            name,
            size,
            if font.is_builtin() { "built-in font" } else { font.name() }
        );
        self.cache.insert(name, size, Arc::clone(&font));
        font
    }

    fn load_font(&self, name: &str, size: u32) -> Font {
        let builtin = Font::Builtin(BuiltinFont::new(size));
        if name.is_empty() {
            return builtin;
        }

        let Some(location) = self.catalog.locate(name) else {
            tracing::warn!("Font '{}' not found, using built-in font", name);
            return builtin;
        };

        match FontFace::from_file_with_index(&location.path, location.face_index) {
            Ok(face) => Font::Outline(OutlineFont {
                name: name.to_string(),
                face: Arc::new(face),
                size: size as f32,
            }),
            Err(e) => {
                tracing::warn!(
                    "Failed to load font '{}' from {}: {}; using built-in font",
                    name,
                    location.path.display(),
                    e
                );
                builtin
            }
        }
    }

    /// Lay out text, one line per `\n`, lines left-aligned
    pub fn layout_text(&mut self, text: &str, font: &Font) -> TextLayout {
        let line_advance = font.line_height() + LINE_SPACING;
        let ascent = font.ascent();

        let mut glyphs = Vec::new();
        for (index, line) in text.split('\n').enumerate() {
            let baseline = index as i32 * line_advance + ascent;
            match font {
                Font::Outline(outline) => {
                    self.place_outline_line(line, outline, baseline, &mut glyphs)
                }
                Font::Builtin(builtin) => place_builtin_line(line, builtin, baseline, &mut glyphs),
            }
        }

        let bounds = glyphs
            .iter()
            .map(|p| TextBounds::new(p.x, p.y, p.glyph.width, p.glyph.height))
            .fold(TextBounds::default(), |acc, b| acc.union(&b));

        TextLayout { glyphs, bounds }
    }

    fn place_outline_line(
        &mut self,
        line: &str,
        font: &OutlineFont,
        baseline: i32,
        out: &mut Vec<PlacedGlyph>,
    ) {
        let shaped = shape_line(line, &font.face, font.size);
        // Ligature-free text repeats glyphs a lot; render each id once per line
        let mut rendered: FxHashMap<u16, Option<Arc<RasterizedGlyph>>> = FxHashMap::default();

        for glyph in &shaped.glyphs {
            let bitmap = rendered.entry(glyph.glyph_id).or_insert_with(|| {
                match self.rasterizer.rasterize(&font.face, glyph.glyph_id, font.size) {
                    Ok(bitmap) => bitmap.map(Arc::new),
                    Err(e) => {
                        tracing::warn!("Failed to rasterize glyph {}: {}", glyph.glyph_id, e);
                        None
                    }
                }
            });
            if let Some(bitmap) = bitmap {
                out.push(PlacedGlyph {
                    x: glyph.x.round() as i32 + bitmap.left,
                    y: baseline - glyph.y.round() as i32 - bitmap.top,
                    glyph: Arc::clone(bitmap),
                });
            }
        }
    }

    /// Ink bounding box of `text` relative to its origin
    pub fn measure_text(&mut self, text: &str, font: &Font) -> TextBounds {
        self.layout_text(text, font).bounds()
    }

    /// Coverage mask of `text` drawn with its origin at `origin`
    pub fn render_text_mask(
        &mut self,
        text: &str,
        font: &Font,
        origin: (i32, i32),
        canvas: Size,
    ) -> GlyphMask {
        self.layout_text(text, font).render_mask(origin, canvas)
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::builtin_only()
    }
}

fn place_builtin_line(line: &str, font: &BuiltinFont, baseline: i32, out: &mut Vec<PlacedGlyph>) {
    let advance = font.advance() as i32;
    let mut rendered: FxHashMap<char, Option<Arc<RasterizedGlyph>>> = FxHashMap::default();
    for (index, c) in line.chars().enumerate() {
        let bitmap = rendered
            .entry(c)
            .or_insert_with(|| font.rasterize(c).map(Arc::new));
        if let Some(bitmap) = bitmap {
            out.push(PlacedGlyph {
                x: index as i32 * advance + bitmap.left,
                y: baseline - bitmap.top,
                glyph: Arc::clone(bitmap),
            });
        }
    }
}
