//! Line shaping
//!
//! rustybuzz applies kerning, ligatures and mark positioning. Positions come
//! back in font units; they are scaled to pixels here so layout code only
//! deals with pixels.

use crate::font::FontFace;
use rustybuzz::UnicodeBuffer;

/// A glyph placed along a line, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    pub glyph_id: u16,
    /// Pen position plus the glyph's horizontal offset
    pub x: f32,
    /// Vertical offset from the baseline, positive is up
    pub y: f32,
}

/// One shaped line of text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedLine {
    pub glyphs: Vec<ShapedGlyph>,
    /// Pen position after the last glyph
    pub advance: f32,
}

/// Shape `text` as a single line at `size` pixels per em
///
/// Faces rustybuzz cannot open are laid out with plain cmap lookups and
/// horizontal advances, without kerning.
pub fn shape_line(text: &str, face: &FontFace, size: f32) -> ShapedLine {
    let px = size / face.metrics().units_per_em.max(1) as f32;

    let Some(hb_face) = rustybuzz::Face::from_slice(face.data(), face.face_index()) else {
        tracing::debug!("No shaping for '{}', using cmap advances", face.family_name());
        return unshaped_line(text, face, px);
    };

    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    let output = rustybuzz::shape(&hb_face, &[], buffer);

    let mut line = ShapedLine::default();
    let mut pen = 0i32;
    for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
        line.glyphs.push(ShapedGlyph {
            glyph_id: info.glyph_id as u16,
            x: (pen + pos.x_offset) as f32 * px,
            y: pos.y_offset as f32 * px,
        });
        pen += pos.x_advance;
    }
    line.advance = pen as f32 * px;
    line
}

fn unshaped_line(text: &str, face: &FontFace, px: f32) -> ShapedLine {
    let missing_advance = face.metrics().units_per_em / 2;
    let mut line = ShapedLine::default();
    let mut pen = 0u32;
    for c in text.chars() {
        let glyph_id = face.glyph_id(c).unwrap_or(0);
        line.glyphs.push(ShapedGlyph {
            glyph_id,
            x: pen as f32 * px,
            y: 0.0,
        });
        pen += u32::from(face.glyph_advance(glyph_id).unwrap_or(missing_advance));
    }
    line.advance = pen as f32 * px;
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TEST_FONT;
    use std::path::Path;

    fn xs(line: &ShapedLine) -> Vec<f32> {
        line.glyphs.iter().map(|g| g.x).collect()
    }

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-3, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(ShapedLine::default().advance, 0.0);
        assert!(ShapedLine::default().glyphs.is_empty());
    }

    #[test]
    fn test_shaped_positions() {
        let face = FontFace::from_file(Path::new(TEST_FONT)).unwrap();
        let line = shape_line("A b", &face, 32.0);

        let ids: Vec<u16> = line.glyphs.iter().map(|g| g.glyph_id).collect();
        assert_eq!(ids, vec![2, 1, 29]);
        // Advances of 600, 250 and 500 units at 0.032 px per unit
        assert_close(&xs(&line), &[0.0, 19.2, 27.2]);
        assert!((line.advance - 43.2).abs() < 1e-3);
        assert!(line.glyphs.iter().all(|g| g.y == 0.0));
    }

    #[test]
    fn test_unshaped_matches_shaped() {
        let face = FontFace::from_file(Path::new(TEST_FONT)).unwrap();
        let shaped = shape_line("abc", &face, 32.0);
        let plain = unshaped_line("abc", &face, 32.0 / 1000.0);
        assert_close(&xs(&shaped), &xs(&plain));
        assert!((shaped.advance - plain.advance).abs() < 1e-3);
        assert!((plain.advance - 48.0).abs() < 1e-3);
    }

    #[test]
    fn test_unmapped_char_uses_notdef() {
        let face = FontFace::from_file(Path::new(TEST_FONT)).unwrap();
        let line = unshaped_line("!", &face, 0.01);
        assert_eq!(line.glyphs[0].glyph_id, 0);
        // .notdef has its own 500 unit advance
        assert!((line.advance - 5.0).abs() < 1e-4);
    }
}
