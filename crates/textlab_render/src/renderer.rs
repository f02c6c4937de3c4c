//! Compositor
//!
//! Layer order, bottom to top: background, glow, outline, fill. The text
//! effects are first merged into their own transparent layer, which is then
//! composited over the background in one pass.

use crate::background::background_layer;
use crate::effects::{fill_layer, glow_layer, outline_layer};
use crate::render_spec::RenderSpec;
use textlab_paint::Canvas;
use textlab_text::{text_origin, FontCatalog, FontDirectories, GlyphMask, TextEngine};

/// Renders [`RenderSpec`]s to canvases
///
/// Holds the text engine, whose font cache is the only state shared
/// between calls.
pub struct Renderer {
    engine: TextEngine,
}

impl Renderer {
    pub fn new(engine: TextEngine) -> Self {
        Self { engine }
    }

    /// A renderer that only knows the built-in font
    pub fn builtin_only() -> Self {
        Self::new(TextEngine::builtin_only())
    }

    /// Scan the configured directories and render with the fonts found
    pub fn with_font_directories(directories: &FontDirectories) -> Self {
        Self::new(TextEngine::new(FontCatalog::scan(directories)))
    }

    pub fn engine(&self) -> &TextEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TextEngine {
        &mut self.engine
    }

    /// Render one image; out-of-range fields are clamped first
    pub fn render(&mut self, spec: &RenderSpec) -> Canvas {
        let spec = spec.sanitized();
        let size = spec.size();

        let mut canvas = Canvas::new(size.width, size.height);
        canvas.composite_over(&background_layer(&spec.background, size));

        let glyphs = self.glyph_mask(&spec);

        let mut text = Canvas::new(size.width, size.height);
        if let Some(glow) = spec.glow.as_ref().and_then(|glow| glow_layer(&glyphs, glow)) {
            text.composite_over(&glow);
        }
        if let Some(outline) = spec
            .outline
            .as_ref()
            .and_then(|outline| outline_layer(&glyphs, outline))
        {
            text.composite_over(&outline);
        }
        text.composite_over(&fill_layer(&glyphs, &spec.fill));

        canvas.composite_over(&text);
        canvas
    }

    /// Lay out the text and draw its mask with the ink box at the aligned spot
    fn glyph_mask(&mut self, spec: &RenderSpec) -> GlyphMask {
        let size = spec.size();
        let font = self.engine.resolve_font(&spec.font.family, spec.font.size);
        let layout = self.engine.layout_text(&spec.text, &font);
        let bounds = layout.bounds();

        let (x, y) = text_origin(size, spec.margins, bounds.size(), spec.alignment);
        let origin = (x - bounds.left, y - bounds.top);

        tracing::debug!(
            "Rendering {}x{} '{}' with {} at {}px: ink {}x{} at ({}, {})",
            size.width,
            size.height,
            spec.text,
            if font.is_builtin() { "built-in font" } else { font.name() },
            spec.font.size,
            bounds.width,
            bounds.height,
            x,
            y
        );

        layout.render_mask(origin, size)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::builtin_only()
    }
}
