//! Glow, outline and fill layers
//!
//! Each function returns a transparent canvas the size of the glyph mask
//! with one effect painted on it. The renderer composites them in order.

use crate::render_spec::{Fill, GlowParams, OutlineParams};
use textlab_paint::{generate_gradient, Canvas};
use textlab_text::GlyphMask;

/// Blurred copy of the glyph mask in the glow color
///
/// Returns `None` for an inactive glow.
pub fn glow_layer(glyphs: &GlyphMask, glow: &GlowParams) -> Option<Canvas> {
    if !glow.is_active() {
        return None;
    }
    let alpha = glyphs.mask.blurred(glow.sigma()).scaled(glow.max_alpha());
    let size = glyphs.mask.size();
    let mut layer = Canvas::filled(size.width, size.height, glow.color.with_alpha(0));
    layer.put_alpha(&alpha);
    Some(layer)
}

/// The glyph mask stamped at every offset of a square around each pixel
///
/// Offsets run over `[-t, t]²` without `(0, 0)`, column by column. Returns
/// `None` for zero thickness or when no ink is on the canvas.
pub fn outline_layer(glyphs: &GlyphMask, outline: &OutlineParams) -> Option<Canvas> {
    if outline.thickness == 0 {
        return None;
    }
    let (ink, left, top) = glyphs.ink()?;
    let size = glyphs.mask.size();
    let mut layer = Canvas::new(size.width, size.height);

    let t = outline.thickness as i32;
    for dx in -t..=t {
        for dy in -t..=t {
            if dx == 0 && dy == 0 {
                continue;
            }
            layer.stamp(&ink, left + dx, top + dy, outline.color);
        }
    }
    Some(layer)
}

/// Glyphs painted with a solid color or a gradient spanning the ink box
pub fn fill_layer(glyphs: &GlyphMask, fill: &Fill) -> Canvas {
    let size = glyphs.mask.size();
    match fill {
        Fill::Solid(color) => {
            let mut layer = Canvas::new(size.width, size.height);
            layer.stamp(&glyphs.mask, 0, 0, color.with_alpha(255));
            layer
        }
        Fill::Gradient(gradient) => {
            let bounds = glyphs.bounds;
            let mut layer = Canvas::new(size.width, size.height);
            if !bounds.is_empty() {
                let span = generate_gradient(
                    bounds.width,
                    bounds.height,
                    gradient.from,
                    gradient.to,
                    gradient.kind,
                    gradient.angle,
                    gradient.size,
                );
                layer.paste(&span, bounds.left, bounds.top);
            }
            layer.put_alpha(&glyphs.mask);
            layer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_spec::GradientFill;
    use textlab_core::{Color, Size, TextBounds};
    use textlab_paint::{AlphaMask, GradientKind};

    /// A 3x2 block of full coverage at (4, 5) on a 16x16 canvas
    fn block() -> GlyphMask {
        let mut mask = AlphaMask::new(16, 16);
        mask.draw_coverage(4, 5, 3, 2, &[255; 6]);
        GlyphMask {
            mask,
            bounds: TextBounds::new(4, 5, 3, 2),
        }
    }

    fn alpha_at(layer: &Canvas, x: u32, y: u32) -> u8 {
        layer.pixel(x, y).map(|c| c.a).unwrap_or(0)
    }

    #[test]
    fn test_glow_inactive() {
        let glow = GlowParams {
            color: Color::BLUE,
            radius: 5,
            intensity: 0,
        };
        assert!(glow_layer(&block(), &glow).is_none());
        let glow = GlowParams { radius: 0, intensity: 50, ..glow };
        assert!(glow_layer(&block(), &glow).is_none());
    }

    #[test]
    fn test_glow_unsanitized_params() {
        let glow = GlowParams {
            color: Color::BLUE,
            radius: 2,
            intensity: u32::MAX / 2,
        };
        let layer = glow_layer(&block(), &glow).unwrap();
        let full = GlowParams {
            intensity: 100,
            ..glow
        };
        assert_eq!(layer.pixels(), glow_layer(&block(), &full).unwrap().pixels());
    }

    #[test]
    fn test_glow_spreads_beyond_ink() {
        let glow = GlowParams {
            color: Color::BLUE,
            radius: 2,
            intensity: 100,
        };
        let layer = glow_layer(&block(), &glow).unwrap();
        assert_eq!(layer.size(), Size::new(16, 16));
        assert!(alpha_at(&layer, 3, 5) > 0);
        assert!(alpha_at(&layer, 5, 5) > alpha_at(&layer, 1, 1));
        let center = layer.pixel(5, 5).unwrap();
        assert_eq!((center.r, center.g, center.b), (0, 0, 255));
    }

    #[test]
    fn test_outline_ring() {
        let outline = OutlineParams {
            color: Color::WHITE,
            thickness: 1,
        };
        let layer = outline_layer(&block(), &outline).unwrap();
        // One pixel around the block is covered, the corner included
        assert_eq!(alpha_at(&layer, 3, 4), 255);
        assert_eq!(alpha_at(&layer, 7, 7), 255);
        assert_eq!(alpha_at(&layer, 2, 5), 0);
        assert_eq!(alpha_at(&layer, 8, 5), 0);
        // Interior is covered by neighbouring stamps too
        assert_eq!(alpha_at(&layer, 5, 5), 255);
    }

    #[test]
    fn test_outline_without_ink() {
        let glyphs = GlyphMask {
            mask: AlphaMask::new(8, 8),
            bounds: TextBounds::default(),
        };
        let outline = OutlineParams {
            color: Color::WHITE,
            thickness: 2,
        };
        assert!(outline_layer(&glyphs, &outline).is_none());
    }

    #[test]
    fn test_solid_fill() {
        let layer = fill_layer(&block(), &Fill::Solid(Color::rgb(200, 0, 0)));
        assert_eq!(layer.pixel(4, 5), Some(Color::rgb(200, 0, 0)));
        assert_eq!(alpha_at(&layer, 3, 5), 0);
    }

    #[test]
    fn test_gradient_fill_spans_ink_box() {
        let fill = Fill::Gradient(GradientFill {
            from: Color::BLACK,
            to: Color::WHITE,
            kind: GradientKind::Linear,
            angle: 0.0,
            size: 100,
        });
        let layer = fill_layer(&block(), &fill);
        let first = layer.pixel(4, 5).unwrap();
        let last = layer.pixel(6, 5).unwrap();
        assert_eq!(first, Color::BLACK);
        assert_eq!(last.a, 255);
        assert!(last.r > first.r);
        assert_eq!(alpha_at(&layer, 7, 5), 0);
    }
}
