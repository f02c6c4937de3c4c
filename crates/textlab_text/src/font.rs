//! Font faces and the font handles the engine resolves
//!
//! [`FontFace`] owns the bytes of one TTF/OTF face; shaping and rasterization
//! borrow them. [`Font`] is either an outline face bound to a pixel size or
//! the embedded bitmap font.

use crate::builtin::BuiltinFont;
use crate::{Result, TextError};
use std::path::Path;
use std::sync::Arc;
use ttf_parser::{name_id, GlyphId};

/// Vertical metrics of a face, in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    /// Usually negative
    pub descender: i16,
    pub line_gap: i16,
}

impl FontMetrics {
    fn of(face: &ttf_parser::Face<'_>) -> Self {
        Self {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        }
    }

    /// Convert font units to pixels at `size` pixels per em
    pub fn to_px(&self, units: i32, size: f32) -> f32 {
        units as f32 * size / f32::from(self.units_per_em.max(1))
    }

    pub fn ascent_px(&self, size: f32) -> f32 {
        self.to_px(i32::from(self.ascender), size)
    }

    /// Baseline-to-baseline distance in pixels
    pub fn line_height_px(&self, size: f32) -> f32 {
        let units =
            i32::from(self.ascender) - i32::from(self.descender) + i32::from(self.line_gap);
        self.to_px(units, size)
    }
}

/// One face of a font file
pub struct FontFace {
    bytes: Arc<[u8]>,
    index: u32,
    family: String,
    metrics: FontMetrics,
}

impl FontFace {
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::parse(data.into(), 0)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_index(path, 0)
    }

    /// Load face `index` of a file; collections (.ttc) hold several faces
    pub fn from_file_with_index(path: &Path, index: u32) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            TextError::FontLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::parse(bytes.into(), index)
    }

    fn parse(bytes: Arc<[u8]>, index: u32) -> Result<Self> {
        let (family, metrics) = {
            let face = ttf_parser::Face::parse(&bytes, index)
                .map_err(|e| TextError::FontParseError(e.to_string()))?;
            (family_of(&face), FontMetrics::of(&face))
        };
        Ok(Self {
            bytes,
            index,
            family,
            metrics,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.bytes
    }

    pub fn face_index(&self) -> u32 {
        self.index
    }

    pub fn family_name(&self) -> &str {
        &self.family
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    // Parsing only reads the table directory, so faces are not kept around
    fn with_face<T>(&self, f: impl FnOnce(&ttf_parser::Face<'_>) -> Option<T>) -> Option<T> {
        ttf_parser::Face::parse(&self.bytes, self.index)
            .ok()
            .and_then(|face| f(&face))
    }

    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.with_face(|face| face.glyph_index(c)).map(|id| id.0)
    }

    /// Horizontal advance in font units
    pub fn glyph_advance(&self, glyph_id: u16) -> Option<u16> {
        self.with_face(|face| face.glyph_hor_advance(GlyphId(glyph_id)))
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FontFace({:?}#{})", self.family, self.index)
    }
}

/// Family name from the name table, preferring the typographic family
fn family_of(face: &ttf_parser::Face<'_>) -> String {
    [name_id::TYPOGRAPHIC_FAMILY, name_id::FAMILY]
        .into_iter()
        .find_map(|id| {
            face.names()
                .into_iter()
                .filter(|name| name.name_id == id)
                .find_map(|name| name.to_string())
        })
        .unwrap_or_else(|| "Unknown".to_string())
}

/// An outline face at a pixel size
#[derive(Debug, Clone)]
pub struct OutlineFont {
    pub name: String,
    pub face: Arc<FontFace>,
    pub size: f32,
}

/// Font resolved for a render
#[derive(Debug, Clone)]
pub enum Font {
    Outline(OutlineFont),
    Builtin(BuiltinFont),
}

impl Font {
    /// The built-in font is named `"builtin"`
    pub fn name(&self) -> &str {
        match self {
            Font::Outline(font) => &font.name,
            Font::Builtin(_) => "builtin",
        }
    }

    pub fn size(&self) -> f32 {
        match self {
            Font::Outline(font) => font.size,
            Font::Builtin(font) => font.size() as f32,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Font::Builtin(_))
    }

    /// Top of the line box to the baseline, in pixels
    pub fn ascent(&self) -> i32 {
        match self {
            Font::Outline(font) => font.face.metrics().ascent_px(font.size).round() as i32,
            Font::Builtin(font) => font.ascent() as i32,
        }
    }

    /// Line box height in pixels, excluding the engine's extra line spacing
    pub fn line_height(&self) -> i32 {
        match self {
            Font::Outline(font) => font.face.metrics().line_height_px(font.size).round() as i32,
            Font::Builtin(font) => font.line_height() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes() {
        let err = FontFace::from_data(vec![0u8; 16]).unwrap_err();
        assert!(matches!(err, TextError::FontParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = FontFace::from_file(Path::new("/nonexistent/font.ttf")).unwrap_err();
        assert!(matches!(err, TextError::FontLoadError(_)));
    }

    #[test]
    fn test_pixel_metrics() {
        let metrics = FontMetrics {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 100,
        };
        assert_eq!(metrics.ascent_px(50.0), 40.0);
        assert_eq!(metrics.line_height_px(10.0), 11.0);
        assert_eq!(metrics.to_px(-200, 50.0), -10.0);
    }

    #[test]
    fn test_builtin_handle() {
        let font = Font::Builtin(BuiltinFont::new(16));
        assert!(font.is_builtin());
        assert_eq!(font.name(), "builtin");
        assert_eq!(font.size(), 16.0);
        assert_eq!(font.ascent(), 14);
        assert_eq!(font.line_height(), 16);
    }
}
