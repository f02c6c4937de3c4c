//! Embedded 5x7 bitmap font
//!
//! Used whenever no font file can be resolved. Glyphs cover printable ASCII;
//! anything else renders as `?`. The bitmap is scaled by an integer factor
//! so coverage stays binary (0 or 255).

use crate::rasterizer::RasterizedGlyph;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal cell size, glyph plus one column of spacing
const CELL_ADVANCE: u32 = 6;
/// Vertical cell size, glyph plus one row of descent
const CELL_HEIGHT: u32 = 8;

const FIRST_CHAR: u32 = 32;
const LAST_CHAR: u32 = 126;
const REPLACEMENT: char = '?';

/// 7 rows of 5 bits per character, bit 4 is the leftmost column
#[rustfmt::skip]
const GLYPHS: [[u8; 7]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04], // '!'
    [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A], // '#'
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04], // '$'
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // '%'
    [0x08, 0x14, 0x14, 0x08, 0x15, 0x12, 0x0D], // '&'
    [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00], // '\''
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // '('
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // ')'
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00], // '*'
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x08], // ','
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04], // '.'
    [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10], // '/'
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // '0'
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // '1'
    [0x0E, 0x11, 0x01, 0x06, 0x08, 0x10, 0x1F], // '2'
    [0x0E, 0x11, 0x01, 0x06, 0x01, 0x11, 0x0E], // '3'
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // '4'
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // '5'
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // '6'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // '7'
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // '8'
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // '9'
    [0x00, 0x00, 0x04, 0x00, 0x04, 0x00, 0x00], // ':'
    [0x00, 0x00, 0x04, 0x00, 0x04, 0x04, 0x08], // ';'
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // '<'
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // '='
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // '>'
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // '?'
    [0x0E, 0x11, 0x17, 0x15, 0x17, 0x10, 0x0E], // '@'
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // 'A'
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // 'B'
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // 'C'
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E], // 'D'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // 'E'
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // 'F'
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0E], // 'G'
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // 'H'
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 'I'
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // 'J'
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // 'K'
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // 'L'
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // 'M'
    [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11], // 'N'
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 'O'
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // 'P'
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // 'Q'
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // 'R'
    [0x0E, 0x11, 0x10, 0x0E, 0x01, 0x11, 0x0E], // 'S'
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // 'T'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // 'U'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // 'V'
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11], // 'W'
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // 'X'
    [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04], // 'Y'
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // 'Z'
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // '['
    [0x10, 0x10, 0x08, 0x04, 0x02, 0x01, 0x01], // '\\'
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // ']'
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // '_'
    [0x08, 0x04, 0x02, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F], // 'a'
    [0x10, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x1E], // 'b'
    [0x00, 0x00, 0x0F, 0x10, 0x10, 0x10, 0x0F], // 'c'
    [0x01, 0x01, 0x0F, 0x11, 0x11, 0x11, 0x0F], // 'd'
    [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E], // 'e'
    [0x06, 0x08, 0x1C, 0x08, 0x08, 0x08, 0x08], // 'f'
    [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x0E], // 'g'
    [0x10, 0x10, 0x1E, 0x11, 0x11, 0x11, 0x11], // 'h'
    [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E], // 'i'
    [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C], // 'j'
    [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12], // 'k'
    [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // 'l'
    [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11], // 'm'
    [0x00, 0x00, 0x1E, 0x11, 0x11, 0x11, 0x11], // 'n'
    [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E], // 'o'
    [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10], // 'p'
    [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x01], // 'q'
    [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10], // 'r'
    [0x00, 0x00, 0x0F, 0x10, 0x0E, 0x01, 0x1E], // 's'
    [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06], // 't'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x11, 0x0F], // 'u'
    [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04], // 'v'
    [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A], // 'w'
    [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11], // 'x'
    [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E], // 'y'
    [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F], // 'z'
    [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02], // '{'
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // '|'
    [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08], // '}'
    [0x00, 0x08, 0x15, 0x02, 0x00, 0x00, 0x00], // '~'
];

/// The embedded bitmap font at a given nominal size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFont {
    size: u32,
    scale: u32,
}

impl BuiltinFont {
    /// Scale factor is `max(1, round(size / 8))`
    pub fn new(size: u32) -> Self {
        let scale = ((size as f32 / CELL_HEIGHT as f32).round() as u32).max(1);
        Self { size, scale }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Pixels per bitmap dot
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Pen advance per character
    pub fn advance(&self) -> u32 {
        CELL_ADVANCE * self.scale
    }

    pub fn ascent(&self) -> u32 {
        GLYPH_HEIGHT * self.scale
    }

    pub fn line_height(&self) -> u32 {
        CELL_HEIGHT * self.scale
    }

    /// Bitmap rows for a character, substituting `?` outside printable ASCII
    pub fn rows(c: char) -> &'static [u8; 7] {
        let code = c as u32;
        let code = if (FIRST_CHAR..=LAST_CHAR).contains(&code) {
            code
        } else {
            REPLACEMENT as u32
        };
        &GLYPHS[(code - FIRST_CHAR) as usize]
    }

    /// Whether dot `(col, row)` of the unscaled glyph is set
    pub fn is_set(c: char, col: u32, row: u32) -> bool {
        if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return false;
        }
        (Self::rows(c)[row as usize] >> (GLYPH_WIDTH - 1 - col)) & 1 == 1
    }

    /// Rasterize one character, cropped to its lit dots
    ///
    /// Placement matches the outline rasterizer: `left` from the pen
    /// position, `top` from the baseline up. Blank glyphs yield `None`.
    pub fn rasterize(&self, c: char) -> Option<RasterizedGlyph> {
        let (col0, row0, col1, row1) = Self::ink_dots(c)?;

        let s = self.scale;
        let width = (col1 - col0) * s;
        let height = (row1 - row0) * s;
        let coverage = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| {
                if Self::is_set(c, col0 + x / s, row0 + y / s) {
                    255
                } else {
                    0
                }
            })
            .collect();

        Some(RasterizedGlyph {
            coverage,
            width,
            height,
            left: (col0 * s) as i32,
            top: self.ascent() as i32 - (row0 * s) as i32,
        })
    }

    /// Half-open dot range `(col0, row0, col1, row1)` of lit dots
    fn ink_dots(c: char) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !Self::is_set(c, col, row) {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (col, row, col + 1, row + 1),
                    Some((c0, r0, c1, r1)) => {
                        (c0.min(col), r0.min(row), c1.max(col + 1), r1.max(row + 1))
                    }
                });
            }
        }
        bounds
    }
}
