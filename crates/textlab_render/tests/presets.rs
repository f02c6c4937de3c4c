//! Preset files on disk

use std::fs;
use textlab_core::{Alignment, Color, Margins};
use textlab_render::preset::preset_path;
use textlab_render::{list_presets, Fill, FontSpec, Preset, PresetError, RenderSpec, Renderer};
use textlab_paint::GradientKind;

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let spec = RenderSpec {
        text: "Saved".to_string(),
        font: FontSpec {
            family: "Anything".to_string(),
            size: 64,
        },
        fill: Fill::from_parts(
            Color::rgb(12, 34, 56),
            Color::rgb(200, 100, 0),
            GradientKind::Linear,
            45.0,
            60,
        ),
        margins: Margins::new(5, 6, 7, 8),
        alignment: Alignment::West,
        ..RenderSpec::default()
    };

    let path = preset_path(dir.path(), "saved");
    Preset::from_spec(&spec).save(&path).unwrap();
    assert_eq!(Preset::load(&path).unwrap().to_spec(), spec);
    assert_eq!(list_presets(dir.path()), vec!["saved"]);
}

#[test]
fn test_saved_file_is_readable_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = preset_path(dir.path(), "default");
    Preset::from_spec(&RenderSpec::default()).save(&path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["text"], "Sample Text");
    assert_eq!(value["alignment"], "center");
    assert_eq!(value["text_gradient"], "None");
    assert_eq!(value["glow_enabled"], true);
    assert_eq!(value["glow_intensity"], 19);
    assert!(value.get("bg_transparency").is_none());
}

#[test]
fn test_legacy_preset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.json");
    fs::write(
        &path,
        r##"{
            "text": "Old",
            "font_size": "36",
            "glow_intensity": 240,
            "bg_transparency": 25,
            "bg_color": "#102030",
            "alignment": "s"
        }"##,
    )
    .unwrap();

    let spec = Preset::load(&path).unwrap().to_spec();
    assert_eq!(spec.text, "Old");
    assert_eq!(spec.font.size, 36);
    assert_eq!(spec.glow.map(|g| g.intensity), Some(60));
    assert_eq!(spec.background.opacity, 25);
    assert_eq!(spec.background.fill, Fill::Solid(Color::rgb(16, 32, 48)));
    assert_eq!(spec.alignment, Alignment::South);
}

#[test]
fn test_malformed_preset_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"text\": ").unwrap();
    assert!(matches!(Preset::load(&path), Err(PresetError::Parse(_))));
}

#[test]
fn test_loaded_preset_renders() {
    let preset = Preset::from_json(r#"{"text": "Hi", "image_width": 120, "image_height": 40}"#).unwrap();
    let canvas = Renderer::builtin_only().render(&preset.to_spec());
    assert_eq!((canvas.width(), canvas.height()), (120, 40));
}
