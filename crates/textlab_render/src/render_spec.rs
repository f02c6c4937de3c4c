//! Render parameters
//!
//! A [`RenderSpec`] fully describes one render. Optional effects are `Option`
//! fields and fills are a closed enum, so there are no separate enable flags
//! to keep in sync. Every numeric field has a valid range; [`RenderSpec::sanitized`]
//! clamps into those ranges instead of rejecting input.

use textlab_core::coerce::normalize_degrees;
use textlab_core::{Alignment, Color, Margins, Size};
use textlab_paint::GradientKind;

pub const FONT_SIZE_RANGE: (u32, u32) = (1, 1000);
pub const OUTLINE_THICKNESS_MAX: u32 = 50;
pub const GLOW_RADIUS_MAX: u32 = 100;
pub const PERCENT_MAX: u32 = 100;
pub const GRADIENT_SIZE_RANGE: (u32, u32) = (1, 100);
pub const CANVAS_DIMENSION_RANGE: (u32, u32) = (1, 16384);

/// Text used when the requested text is empty
pub const PLACEHOLDER_TEXT: &str = "Sample Text";

/// Font family name and pixel size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    /// Catalog display name, file stem or family name; empty selects the
    /// built-in font
    pub family: String,
    pub size: u32,
}

/// Two-color gradient parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientFill {
    pub from: Color,
    pub to: Color,
    /// Never [`GradientKind::None`]; a plain color is [`Fill::Solid`]
    pub kind: GradientKind,
    /// Degrees in [0, 360)
    pub angle: f32,
    /// Sharpness, 1 (hard edge) to 100 (smooth)
    pub size: u32,
}

/// How a region is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Color),
    Gradient(GradientFill),
}

impl Fill {
    /// Build a fill from loose gradient settings; `GradientKind::None` is solid
    pub fn from_parts(from: Color, to: Color, kind: GradientKind, angle: f32, size: u32) -> Self {
        match kind {
            GradientKind::None => Fill::Solid(from),
            kind => Fill::Gradient(GradientFill {
                from,
                to,
                kind,
                angle,
                size,
            }),
        }
    }

    /// The solid color, or the gradient's starting color
    pub fn primary(&self) -> Color {
        match self {
            Fill::Solid(color) => *color,
            Fill::Gradient(gradient) => gradient.from,
        }
    }

    pub fn gradient(&self) -> Option<&GradientFill> {
        match self {
            Fill::Solid(_) => None,
            Fill::Gradient(gradient) => Some(gradient),
        }
    }

    fn sanitized(&self) -> Self {
        match self {
            Fill::Solid(color) => Fill::Solid(color.with_alpha(255)),
            Fill::Gradient(gradient) => Fill::from_parts(
                gradient.from.with_alpha(255),
                gradient.to.with_alpha(255),
                gradient.kind,
                normalize_degrees(gradient.angle),
                gradient
                    .size
                    .clamp(GRADIENT_SIZE_RANGE.0, GRADIENT_SIZE_RANGE.1),
            ),
        }
    }
}

/// Stamped outline around the glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineParams {
    pub color: Color,
    /// Stamp distance in pixels, 0..=50
    pub thickness: u32,
}

/// Blurred halo behind the glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlowParams {
    pub color: Color,
    /// 0..=100; the blur sigma is `max(1, radius * 1.5)`
    pub radius: u32,
    /// Percent, 0..=100
    pub intensity: u32,
}

impl GlowParams {
    /// A glow with zero radius or zero intensity draws nothing
    pub fn is_active(&self) -> bool {
        self.radius > 0 && self.intensity > 0
    }

    /// Gaussian standard deviation for the blur
    pub fn sigma(&self) -> f32 {
        (self.radius.min(GLOW_RADIUS_MAX) as f32 * 1.5).max(1.0)
    }

    /// Alpha reached where the blurred mask is fully covered
    ///
    /// Intensity is scaled by four, so 25% already saturates.
    pub fn max_alpha(&self) -> u8 {
        let scaled = (self.intensity.min(PERCENT_MAX) * 4).max(1);
        (255 * scaled / 100).min(255) as u8
    }
}

/// Canvas background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub fill: Fill,
    /// Percent, 0..=100, applied to both gradient colors
    pub opacity: u32,
}

impl Background {
    /// Alpha derived from the opacity percentage
    pub fn alpha(&self) -> u8 {
        (255 * self.opacity.min(PERCENT_MAX) / 100) as u8
    }
}

/// Everything needed to render one image
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSpec {
    pub text: String,
    pub font: FontSpec,
    pub fill: Fill,
    pub outline: Option<OutlineParams>,
    pub glow: Option<GlowParams>,
    pub background: Background,
    pub width: u32,
    pub height: u32,
    pub margins: Margins,
    pub alignment: Alignment,
}

impl RenderSpec {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// A copy with every field inside its valid range
    ///
    /// Colors become opaque (background transparency comes from
    /// `background.opacity`), an outline of thickness 0 becomes `None`, and
    /// empty text is replaced by a placeholder.
    pub fn sanitized(&self) -> Self {
        let text = if self.text.is_empty() {
            PLACEHOLDER_TEXT.to_string()
        } else {
            self.text.clone()
        };

        let outline = self
            .outline
            .map(|outline| OutlineParams {
                color: outline.color.with_alpha(255),
                thickness: outline.thickness.min(OUTLINE_THICKNESS_MAX),
            })
            .filter(|outline| outline.thickness > 0);

        let glow = self.glow.map(|glow| GlowParams {
            color: glow.color.with_alpha(255),
            radius: glow.radius.min(GLOW_RADIUS_MAX),
            intensity: glow.intensity.min(PERCENT_MAX),
        });

        Self {
            text,
            font: FontSpec {
                family: self.font.family.clone(),
                size: self.font.size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1),
            },
            fill: self.fill.sanitized(),
            outline,
            glow,
            background: Background {
                fill: self.background.fill.sanitized(),
                opacity: self.background.opacity.min(PERCENT_MAX),
            },
            width: clamp_dimension(self.width),
            height: clamp_dimension(self.height),
            margins: Margins::new(
                clamp_margin(self.margins.left),
                clamp_margin(self.margins.right),
                clamp_margin(self.margins.top),
                clamp_margin(self.margins.bottom),
            ),
            alignment: self.alignment,
        }
    }
}

impl Default for RenderSpec {
    /// Black text with a white outline and a faint blue glow on white
    fn default() -> Self {
        Self {
            text: PLACEHOLDER_TEXT.to_string(),
            font: FontSpec {
                family: String::new(),
                size: 48,
            },
            fill: Fill::Solid(Color::BLACK),
            outline: Some(OutlineParams {
                color: Color::WHITE,
                thickness: 2,
            }),
            glow: Some(GlowParams {
                color: Color::BLUE,
                radius: 5,
                intensity: 19,
            }),
            background: Background {
                fill: Fill::Solid(Color::WHITE),
                opacity: 100,
            },
            width: 800,
            height: 400,
            margins: Margins::uniform(10),
            alignment: Alignment::Center,
        }
    }
}

fn clamp_dimension(value: u32) -> u32 {
    value.clamp(CANVAS_DIMENSION_RANGE.0, CANVAS_DIMENSION_RANGE.1)
}

/// Margins may be zero but never exceed the largest canvas side
fn clamp_margin(value: u32) -> u32 {
    value.min(CANVAS_DIMENSION_RANGE.1)
}
