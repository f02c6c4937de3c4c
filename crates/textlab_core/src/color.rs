//! RGBA colors and hex conversion

use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;

/// Number of hex strings the [`ColorCache`] keeps before evicting
pub const COLOR_CACHE_CAPACITY: usize = 50;

/// 8-bit straight-alpha RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#RRGGBB` string
    ///
    /// Any number of leading `#` characters is accepted. Returns `None` unless
    /// exactly six hex digits remain.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Parse a `#RRGGBB` string, falling back to opaque black
    pub fn parse_hex_or_black(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::BLACK)
    }

    /// Format as `#RRGGBB` (alpha is not encoded)
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation of all four channels, truncated towards zero
    ///
    /// Equal endpoints always reproduce the endpoint exactly.
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| {
            let x = x as f32;
            (x + (y as f32 - x) * t).clamp(0.0, 255.0) as u8
        };
        Color {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Bounded hex → color conversion cache
///
/// Invalid strings are cached too (as black) so repeated bad input does not
/// get reparsed. Entries are only ever evicted, never invalidated.
pub struct ColorCache {
    entries: LruCache<String, Color>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::with_capacity(COLOR_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Convert a hex string, using the cached value when present
    pub fn get(&mut self, hex: &str) -> Color {
        if let Some(color) = self.entries.get(hex) {
            return *color;
        }

        let color = match Color::from_hex(hex) {
            Some(color) => color,
            None => {
                tracing::debug!("Invalid hex color '{}', using black", hex);
                Color::BLACK
            }
        };
        self.entries.put(hex.to_string(), color);
        color
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, hex: &str) -> bool {
        self.entries.contains(hex)
    }
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::new()
    }
}
