//! Preset files
//!
//! A preset is a flat JSON object holding every render setting. Missing keys
//! take loader defaults and ill-typed values read as missing, so presets
//! written by older versions (or by hand) still load. Only a document that is
//! not a JSON object at all is an error.

use crate::lenient;
use crate::render_spec::{
    Background, Fill, FontSpec, GlowParams, OutlineParams, RenderSpec, CANVAS_DIMENSION_RANGE,
    FONT_SIZE_RANGE, GLOW_RADIUS_MAX, GRADIENT_SIZE_RANGE, OUTLINE_THICKNESS_MAX, PERCENT_MAX,
    PLACEHOLDER_TEXT,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use textlab_core::coerce::clamp_u32;
use textlab_core::{Alignment, Color, ColorCache, Margins};
use textlab_paint::GradientKind;
use thiserror::Error;

/// Errors from reading or writing preset files
#[derive(Error, Debug)]
pub enum PresetError {
    /// The file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The document is not a valid preset object
    #[error("Preset parsing error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PresetError>;

// Loader defaults for keys missing from a preset document. These differ from
// `RenderSpec::default()` in the glow settings.
const DEFAULT_FONT_SIZE: i64 = 48;
const DEFAULT_TEXT_COLOR: &str = "#000000";
const DEFAULT_TEXT_COLOR2: &str = "#FFFFFF";
const DEFAULT_OUTLINE_COLOR: &str = "#FFFFFF";
const DEFAULT_GLOW_COLOR: &str = "#0000FF";
const DEFAULT_GLOW_INTENSITY: i64 = 50;
const DEFAULT_GLOW_RADIUS: i64 = 3;
const DEFAULT_OUTLINE_THICKNESS: i64 = 2;
const DEFAULT_GRADIENT_SIZE: i64 = 100;
const DEFAULT_BG_OPACITY: i64 = 100;
const DEFAULT_BG_COLOR: &str = "#FFFFFF";
const DEFAULT_BG_COLOR2: &str = "#000000";
const DEFAULT_WIDTH: i64 = 800;
const DEFAULT_HEIGHT: i64 = 400;
const DEFAULT_MARGIN: i64 = 10;

/// Glow intensities above this were saved on the old 0-400 scale
const LEGACY_GLOW_SCALE_LIMIT: i64 = 100;

const PRESET_EXTENSION: &str = "json";

/// Render settings as stored on disk
///
/// Every field is optional; [`Preset::to_spec`] fills the gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub font_size: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text_color2: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text_outline_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text_glow_color: Option<String>,

    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub glow_intensity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub glow_radius: Option<i64>,
    #[serde(default, deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub glow_enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub outline_thickness: Option<i64>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub text_gradient: Option<String>,
    #[serde(default, deserialize_with = "lenient::float", skip_serializing_if = "Option::is_none")]
    pub text_gradient_angle: Option<f64>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub text_gradient_size: Option<i64>,

    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub bg_opacity: Option<i64>,
    /// Older name of `bg_opacity`; read but never written
    #[serde(default, deserialize_with = "lenient::int", skip_serializing)]
    pub bg_transparency: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub bg_color2: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub bg_gradient: Option<String>,
    #[serde(default, deserialize_with = "lenient::float", skip_serializing_if = "Option::is_none")]
    pub bg_gradient_angle: Option<f64>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub bg_gradient_size: Option<i64>,

    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub image_width: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub image_height: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int", skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
}

impl Preset {
    /// Read a preset file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let preset = Self::from_json(&json)?;
        tracing::debug!("Loaded preset {}", path.display());
        Ok(preset)
    }

    /// Parse a preset document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the preset, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json)?;
        tracing::debug!("Saved preset {}", path.display());
        Ok(())
    }

    /// Capture every setting of a [`RenderSpec`]
    ///
    /// Disabled effects keep neutral settings so that the preset reads back
    /// to the same settings.
    pub fn from_spec(spec: &RenderSpec) -> Self {
        let spec = spec.sanitized();
        let (text_gradient, text_color2, text_angle, text_size) = gradient_parts(&spec.fill);
        let (bg_gradient, bg_color2, bg_angle, bg_size) = gradient_parts(&spec.background.fill);
        let glow = spec.glow.unwrap_or(GlowParams {
            color: Color::BLUE,
            radius: DEFAULT_GLOW_RADIUS as u32,
            intensity: DEFAULT_GLOW_INTENSITY as u32,
        });
        let outline = spec.outline.unwrap_or(OutlineParams {
            color: Color::WHITE,
            thickness: 0,
        });

        Self {
            text: Some(spec.text),
            font_size: Some(spec.font.size.into()),
            font: Some(spec.font.family),
            text_color: Some(spec.fill.primary().to_hex()),
            text_color2: Some(text_color2),
            text_outline_color: Some(outline.color.to_hex()),
            text_glow_color: Some(glow.color.to_hex()),
            glow_intensity: Some(glow.intensity.into()),
            glow_radius: Some(glow.radius.into()),
            glow_enabled: Some(spec.glow.is_some()),
            outline_thickness: Some(outline.thickness.into()),
            text_gradient: Some(text_gradient),
            text_gradient_angle: Some(text_angle),
            text_gradient_size: Some(text_size),
            bg_opacity: Some(spec.background.opacity.into()),
            bg_transparency: None,
            bg_color: Some(spec.background.fill.primary().to_hex()),
            bg_color2: Some(bg_color2),
            bg_gradient: Some(bg_gradient),
            bg_gradient_angle: Some(bg_angle),
            bg_gradient_size: Some(bg_size),
            image_width: Some(spec.width.into()),
            image_height: Some(spec.height.into()),
            margin_left: Some(spec.margins.left.into()),
            margin_right: Some(spec.margins.right.into()),
            margin_top: Some(spec.margins.top.into()),
            margin_bottom: Some(spec.margins.bottom.into()),
            alignment: Some(spec.alignment.name().to_string()),
        }
    }

    /// Build a render spec, applying loader defaults and legacy conversions
    pub fn to_spec(&self) -> RenderSpec {
        self.to_spec_with(&mut ColorCache::new())
    }

    /// Like [`Preset::to_spec`], converting hex colors through `colors`
    pub fn to_spec_with(&self, colors: &mut ColorCache) -> RenderSpec {
        let mut color = |value: &Option<String>, default: &str| {
            colors.get(value.as_deref().unwrap_or(default))
        };

        let text_color = color(&self.text_color, DEFAULT_TEXT_COLOR);
        let text_color2 = color(&self.text_color2, DEFAULT_TEXT_COLOR2);
        let outline_color = color(&self.text_outline_color, DEFAULT_OUTLINE_COLOR);
        let glow_color = color(&self.text_glow_color, DEFAULT_GLOW_COLOR);
        let bg_color = color(&self.bg_color, DEFAULT_BG_COLOR);
        let bg_color2 = color(&self.bg_color2, DEFAULT_BG_COLOR2);

        let glow = self.glow_enabled.unwrap_or(true).then(|| GlowParams {
            color: glow_color,
            radius: int_or(self.glow_radius, DEFAULT_GLOW_RADIUS, 0, GLOW_RADIUS_MAX),
            intensity: glow_intensity(self.glow_intensity.unwrap_or(DEFAULT_GLOW_INTENSITY)),
        });

        let outline = Some(OutlineParams {
            color: outline_color,
            thickness: int_or(
                self.outline_thickness,
                DEFAULT_OUTLINE_THICKNESS,
                0,
                OUTLINE_THICKNESS_MAX,
            ),
        });

        let fill = gradient_fill(
            text_color,
            text_color2,
            self.text_gradient.as_deref(),
            self.text_gradient_angle,
            self.text_gradient_size,
        );
        let background_fill = gradient_fill(
            bg_color,
            bg_color2,
            self.bg_gradient.as_deref(),
            self.bg_gradient_angle,
            self.bg_gradient_size,
        );
        // The current key wins over the legacy one
        let opacity = self.bg_opacity.or(self.bg_transparency);

        let margin = |value: Option<i64>| int_or(value, DEFAULT_MARGIN, 0, CANVAS_DIMENSION_RANGE.1);

        RenderSpec {
            text: self
                .text
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_TEXT.to_string()),
            font: FontSpec {
                family: self.font.clone().unwrap_or_default(),
                size: int_or(
                    self.font_size,
                    DEFAULT_FONT_SIZE,
                    FONT_SIZE_RANGE.0,
                    FONT_SIZE_RANGE.1,
                ),
            },
            fill,
            outline,
            glow,
            background: Background {
                fill: background_fill,
                opacity: int_or(opacity, DEFAULT_BG_OPACITY, 0, PERCENT_MAX),
            },
            width: int_or(
                self.image_width,
                DEFAULT_WIDTH,
                CANVAS_DIMENSION_RANGE.0,
                CANVAS_DIMENSION_RANGE.1,
            ),
            height: int_or(
                self.image_height,
                DEFAULT_HEIGHT,
                CANVAS_DIMENSION_RANGE.0,
                CANVAS_DIMENSION_RANGE.1,
            ),
            margins: Margins::new(
                margin(self.margin_left),
                margin(self.margin_right),
                margin(self.margin_top),
                margin(self.margin_bottom),
            ),
            alignment: self
                .alignment
                .as_deref()
                .map(Alignment::from_name_or_center)
                .unwrap_or_default(),
        }
        .sanitized()
    }
}

/// Stems of the `.json` files in `dir`, sorted
///
/// A missing or unreadable directory has no presets.
pub fn list_presets(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("No presets in {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.is_file() && is_preset_file(path))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    names
}

/// Path of the preset named `name` inside `dir`
pub fn preset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{PRESET_EXTENSION}"))
}

fn is_preset_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(PRESET_EXTENSION))
}

fn int_or(value: Option<i64>, default: i64, min: u32, max: u32) -> u32 {
    clamp_u32(value.unwrap_or(default), min, max)
}

/// Map old 0-400 intensities onto the 0-100 scale
fn glow_intensity(value: i64) -> u32 {
    let value = if value > LEGACY_GLOW_SCALE_LIMIT {
        (value / 4).min(LEGACY_GLOW_SCALE_LIMIT)
    } else {
        value
    };
    clamp_u32(value, 0, PERCENT_MAX)
}

fn gradient_fill(
    from: Color,
    to: Color,
    kind: Option<&str>,
    angle: Option<f64>,
    size: Option<i64>,
) -> Fill {
    Fill::from_parts(
        from,
        to,
        kind.map(GradientKind::from_name).unwrap_or_default(),
        angle.unwrap_or(0.0) as f32,
        int_or(size, DEFAULT_GRADIENT_SIZE, GRADIENT_SIZE_RANGE.0, GRADIENT_SIZE_RANGE.1),
    )
}

/// Kind name, second color, angle and size as stored in a preset
fn gradient_parts(fill: &Fill) -> (String, String, f64, i64) {
    match fill.gradient() {
        Some(gradient) => (
            gradient.kind.name().to_string(),
            gradient.to.to_hex(),
            gradient.angle as f64,
            gradient.size.into(),
        ),
        None => (
            GradientKind::None.name().to_string(),
            Color::WHITE.to_hex(),
            0.0,
            DEFAULT_GRADIENT_SIZE,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_spec::GradientFill;

    #[test]
    fn test_empty_document_uses_loader_defaults() {
        let spec = Preset::from_json("{}").unwrap().to_spec();
        assert_eq!(spec.text, "Sample Text");
        assert_eq!(spec.font.size, 48);
        assert_eq!(spec.font.family, "");
        assert_eq!(spec.fill, Fill::Solid(Color::BLACK));
        assert_eq!(
            spec.outline,
            Some(OutlineParams {
                color: Color::WHITE,
                thickness: 2
            })
        );
        assert_eq!(
            spec.glow,
            Some(GlowParams {
                color: Color::BLUE,
                radius: 3,
                intensity: 50
            })
        );
        assert_eq!(spec.background.fill, Fill::Solid(Color::WHITE));
        assert_eq!(spec.background.opacity, 100);
        assert_eq!((spec.width, spec.height), (800, 400));
        assert_eq!(spec.margins, Margins::uniform(10));
        assert_eq!(spec.alignment, Alignment::Center);
    }

    #[test]
    fn test_round_trip() {
        let spec = RenderSpec {
            text: "Line one\nLine two".to_string(),
            font: FontSpec {
                family: "Roboto".to_string(),
                size: 72,
            },
            fill: Fill::Gradient(GradientFill {
                from: Color::rgb(255, 0, 0),
                to: Color::rgb(0, 0, 255),
                kind: GradientKind::Circular,
                angle: 135.0,
                size: 40,
            }),
            outline: None,
            glow: Some(GlowParams {
                color: Color::rgb(0, 255, 0),
                radius: 12,
                intensity: 80,
            }),
            background: Background {
                fill: Fill::Gradient(GradientFill {
                    from: Color::BLACK,
                    to: Color::rgb(40, 40, 40),
                    kind: GradientKind::Radial,
                    angle: 0.0,
                    size: 100,
                }),
                opacity: 35,
            },
            width: 1280,
            height: 720,
            margins: Margins::new(1, 2, 3, 4),
            alignment: Alignment::SouthEast,
        };

        let json = Preset::from_spec(&spec).to_json().unwrap();
        let restored = Preset::from_json(&json).unwrap().to_spec();
        assert_eq!(restored, spec);
    }

    #[test]
    fn test_oversized_margins_round_trip() {
        let spec = RenderSpec {
            margins: Margins::new(20000, 0, 0, 16385),
            ..RenderSpec::default()
        }
        .sanitized();

        let json = Preset::from_spec(&spec).to_json().unwrap();
        let restored = Preset::from_json(&json).unwrap().to_spec();
        assert_eq!(restored.margins, spec.margins);
        assert_eq!(restored, spec);
    }

    #[test]
    fn test_disabled_glow_round_trips() {
        let spec = RenderSpec {
            glow: None,
            ..RenderSpec::default()
        };
        let preset = Preset::from_spec(&spec);
        assert_eq!(preset.glow_enabled, Some(false));
        assert_eq!(preset.to_spec(), spec);
    }

    #[test]
    fn test_legacy_glow_intensity() {
        let spec = Preset::from_json(r#"{"glow_intensity": 300}"#).unwrap().to_spec();
        assert_eq!(spec.glow.unwrap().intensity, 75);
        let spec = Preset::from_json(r#"{"glow_intensity": 400}"#).unwrap().to_spec();
        assert_eq!(spec.glow.unwrap().intensity, 100);
        let spec = Preset::from_json(r#"{"glow_intensity": 100}"#).unwrap().to_spec();
        assert_eq!(spec.glow.unwrap().intensity, 100);
    }

    #[test]
    fn test_bg_transparency_alias() {
        let spec = Preset::from_json(r#"{"bg_transparency": 40}"#).unwrap().to_spec();
        assert_eq!(spec.background.opacity, 40);
        let spec = Preset::from_json(r#"{"bg_transparency": 40, "bg_opacity": 70}"#)
            .unwrap()
            .to_spec();
        assert_eq!(spec.background.opacity, 70);
    }

    #[test]
    fn test_non_numeric_values_use_defaults() {
        let spec = Preset::from_json(
            r#"{"font_size": "big", "image_width": null, "glow_radius": "7", "margin_left": -5}"#,
        )
        .unwrap()
        .to_spec();
        assert_eq!(spec.font.size, 48);
        assert_eq!(spec.width, 800);
        assert_eq!(spec.glow.unwrap().radius, 7);
        assert_eq!(spec.margins.left, 0);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let spec = Preset::from_json(
            r##"{"text": "", "text_color": "red", "alignment": "middle", "text_gradient": "Spiral"}"##,
        )
        .unwrap()
        .to_spec();
        assert_eq!(spec.text, "Sample Text");
        assert_eq!(spec.fill, Fill::Solid(Color::BLACK));
        assert_eq!(spec.alignment, Alignment::Center);
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            Preset::from_json("{not json"),
            Err(PresetError::Parse(_))
        ));
        assert!(matches!(Preset::from_json("42"), Err(PresetError::Parse(_))));
    }

    #[test]
    fn test_bg_transparency_not_written() {
        let preset = Preset {
            bg_transparency: Some(20),
            ..Preset::default()
        };
        assert_eq!(preset.to_json().unwrap(), "{}");
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let json = Preset::from_spec(&RenderSpec::default()).to_json().unwrap();
        assert!(json.starts_with("{\n  \"text\": \"Sample Text\","));
        assert!(json.contains("\"text_color\": \"#000000\""));
    }

    #[test]
    fn test_list_presets() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.JSON", "notes.txt", "c.json.bak"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(dir.path().join("folder.json")).unwrap();
        assert_eq!(list_presets(dir.path()), vec!["a", "b"]);
        assert!(list_presets(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Preset::load(&preset_path(dir.path(), "nope")),
            Err(PresetError::Io(_))
        ));
    }
}
