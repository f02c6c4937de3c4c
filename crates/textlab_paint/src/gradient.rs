//! Two-color gradient generation
//!
//! Every kind reduces to a factor field in [0, 1] that picks a color between
//! the two endpoints. Rows are generated one at a time: the factors of a row
//! go through the sharpness ("size") remap and then index a 256-entry palette
//! written straight into the pixel buffer.

use crate::canvas::Canvas;
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use textlab_core::coerce::normalize_degrees;
use textlab_core::Color;

/// Smallest window width used by the sharpness remap
const MIN_BAND: f32 = 0.001;

/// Palette entries; factors are quantized to this many steps
const PALETTE_SIZE: usize = 256;

/// Gradient geometry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientKind {
    /// Solid first color
    #[default]
    None,
    /// Straight bands perpendicular to the angle
    Linear,
    /// Distance from the center
    Radial,
    /// Angle around the center (conic sweep)
    Circular,
}

impl GradientKind {
    pub const ALL: [GradientKind; 4] = [
        GradientKind::None,
        GradientKind::Linear,
        GradientKind::Radial,
        GradientKind::Circular,
    ];

    /// Name as stored in presets
    pub fn name(&self) -> &'static str {
        match self {
            GradientKind::None => "None",
            GradientKind::Linear => "Linear",
            GradientKind::Radial => "Radial",
            GradientKind::Circular => "Circular",
        }
    }

    /// Parse a preset name; unknown names mean no gradient
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .unwrap_or(GradientKind::None)
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generate a `width × height` gradient from `color1` to `color2`
///
/// `angle_degrees` orients linear gradients and offsets circular ones; it is
/// ignored by radial gradients. `size_percent` (1–100) controls sharpness:
/// at 100 the transition is smooth, lower values squeeze it into a band of
/// `size_percent`% around the midpoint.
///
/// Never fails: a zero dimension yields a buffer of at least 1×1 filled with
/// `color1`, and zero denominators are replaced by 1.
pub fn generate_gradient(
    width: u32,
    height: u32,
    color1: Color,
    color2: Color,
    kind: GradientKind,
    angle_degrees: f32,
    size_percent: u32,
) -> Canvas {
    if width == 0 || height == 0 {
        return Canvas::filled(width.max(1), height.max(1), color1);
    }
    if kind == GradientKind::None {
        return Canvas::filled(width, height, color1);
    }

    let angle = normalize_degrees(angle_degrees);
    let sharpness = Sharpness::new(size_percent.clamp(1, 100));
    let palette = Palette::new(color1, color2);
    let field = FactorField::new(kind, width, height, angle);

    let mut canvas = Canvas::new(width, height);
    let mut factors = vec![0.0f32; width as usize];
    let row_bytes = width as usize * 4;
    for (y, row) in canvas.pixels_mut().chunks_exact_mut(row_bytes).enumerate() {
        field.fill_row(y as u32, &mut factors);
        for (px, &f) in row.chunks_exact_mut(4).zip(&factors) {
            px.copy_from_slice(palette.pick(sharpness.apply(f)));
        }
    }
    canvas
}

/// Per-kind state for computing one row of factors at a time
enum FactorField {
    /// Projection onto the angle's unit vector, normalized to [0, 1]
    Linear {
        /// Column term of the projection, which is separable
        columns: Vec<f32>,
        sin: f32,
        half_h: f32,
        max_proj: f32,
        scale: f32,
    },
    /// Distance from the integer center, saturating at half the longer side
    Radial {
        dx2: Vec<f32>,
        cy: f32,
        max_distance: f32,
    },
    /// Angle around the integer center plus offset, as a fraction of a turn
    Circular { cx: f32, cy: f32, offset: f32 },
    Flat,
}

impl FactorField {
    fn new(kind: GradientKind, width: u32, height: u32, angle: f32) -> Self {
        match kind {
            GradientKind::None => FactorField::Flat,
            GradientKind::Linear => {
                let (sin, cos) = angle.to_radians().sin_cos();
                let half_w = width as f32 / 2.0;
                let half_h = height as f32 / 2.0;
                let mut max_proj = (half_w * cos).abs() + (half_h * sin).abs();
                if max_proj == 0.0 {
                    max_proj = 1.0;
                }
                FactorField::Linear {
                    columns: (0..width).map(|x| (x as f32 - half_w) * cos).collect(),
                    sin,
                    half_h,
                    max_proj,
                    scale: 1.0 / (2.0 * max_proj),
                }
            }
            GradientKind::Radial => {
                let cx = (width / 2) as f32;
                let max_distance = match width.max(height) / 2 {
                    0 => 1.0,
                    d => d as f32,
                };
                FactorField::Radial {
                    dx2: (0..width)
                        .map(|x| {
                            let dx = x as f32 - cx;
                            dx * dx
                        })
                        .collect(),
                    cy: (height / 2) as f32,
                    max_distance,
                }
            }
            GradientKind::Circular => FactorField::Circular {
                cx: (width / 2) as f32,
                cy: (height / 2) as f32,
                offset: angle / 360.0,
            },
        }
    }

    fn fill_row(&self, y: u32, out: &mut [f32]) {
        match self {
            FactorField::Linear {
                columns,
                sin,
                half_h,
                max_proj,
                scale,
            } => {
                let row = (y as f32 - half_h) * sin + max_proj;
                for (f, &col) in out.iter_mut().zip(columns) {
                    *f = ((col + row) * scale).clamp(0.0, 1.0);
                }
            }
            FactorField::Radial {
                dx2,
                cy,
                max_distance,
            } => {
                let dy = y as f32 - cy;
                let dy2 = dy * dy;
                for (f, &dx2) in out.iter_mut().zip(dx2) {
                    *f = ((dx2 + dy2).sqrt() / max_distance).min(1.0);
                }
            }
            FactorField::Circular { cx, cy, offset } => {
                let dy = y as f32 - cy;
                for (x, f) in out.iter_mut().enumerate() {
                    let turn = fast_atan2(dy, x as f32 - cx) / TAU + offset;
                    // atan2 spans half a turn either side of zero
                    *f = if turn < 0.0 {
                        turn + 1.0
                    } else if turn >= 1.0 {
                        turn - 1.0
                    } else {
                        turn
                    };
                }
            }
            FactorField::Flat => out.fill(0.0),
        }
    }
}

/// `atan2(y, x)` in radians, accurate to about 1e-5
///
/// Exact on the axes, so the zero and half-turn directions map to the
/// endpoint colors without rounding.
fn fast_atan2(y: f32, x: f32) -> f32 {
    let (ax, ay) = (x.abs(), y.abs());
    if ax == 0.0 && ay == 0.0 {
        return 0.0;
    }
    let octant = if ay <= ax { ay / ax } else { ax / ay };
    let z2 = octant * octant;
    let mut angle = octant
        * (0.999_977_3
            + z2 * (-0.332_623_5
                + z2 * (0.193_543_5 + z2 * (-0.116_432_9 + z2 * (0.052_653_3 - z2 * 0.011_721_2)))));
    if ay > ax {
        angle = FRAC_PI_2 - angle;
    }
    if x < 0.0 {
        angle = PI - angle;
    }
    if y < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Dead-zone remap centered at 0.5 with a window of `size_percent`%
///
/// At 100% the window covers [0, 1] and factors pass through unchanged.
#[derive(Debug, Clone, Copy)]
struct Sharpness {
    low: f32,
    high: f32,
    inv: f32,
}

impl Sharpness {
    fn new(size_percent: u32) -> Self {
        let band = size_percent as f32 / 100.0;
        Self {
            low: 0.5 - band / 2.0,
            high: 0.5 + band / 2.0,
            inv: 1.0 / band.max(MIN_BAND),
        }
    }

    #[inline]
    fn apply(&self, f: f32) -> f32 {
        if f < self.low {
            0.0
        } else if f > self.high {
            1.0
        } else {
            (f - self.low) * self.inv
        }
    }
}

/// Colors between the two endpoints, one per quantized factor
struct Palette([[u8; 4]; PALETTE_SIZE]);

impl Palette {
    fn new(from: Color, to: Color) -> Self {
        let last = (PALETTE_SIZE - 1) as f32;
        Self(std::array::from_fn(|i| {
            Color::lerp(&from, &to, i as f32 / last).to_array()
        }))
    }

    #[inline]
    fn pick(&self, f: f32) -> &[u8; 4] {
        let index = (f * (PALETTE_SIZE - 1) as f32 + 0.5) as usize;
        &self.0[index.min(PALETTE_SIZE - 1)]
    }
}
