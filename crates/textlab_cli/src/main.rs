//! textlab CLI
//!
//! Render styled text images from presets and manage font directories.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use textlab_core::Alignment;
use textlab_render::{list_presets, save_image, Preset, RenderSpec, Renderer};
use textlab_text::{FontCatalog, FontDirectories, CONFIG_FILE_NAME};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "textlab")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Styled text image renderer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a preset to a PNG or JPEG file
    Render {
        /// Preset file (defaults are used when omitted)
        preset: Option<PathBuf>,

        /// Output image; the extension picks the format (.png, .jpg, .jpeg)
        #[arg(short, long)]
        output: PathBuf,

        /// Replace the preset's text (use \n for line breaks)
        #[arg(long)]
        text: Option<String>,

        /// Replace the preset's font name
        #[arg(long)]
        font: Option<String>,

        /// Replace the preset's font size in pixels
        #[arg(long)]
        size: Option<u32>,

        /// Replace the preset's alignment (nw, n, ne, w, center, e, sw, s, se)
        #[arg(long)]
        align: Option<Alignment>,

        /// Font directory config
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        font_config: PathBuf,
    },

    /// List the fonts found in the configured directories
    Fonts {
        /// Font directory config
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        font_config: PathBuf,

        /// Add a directory to the config before listing
        #[arg(long)]
        add: Option<PathBuf>,
    },

    /// List the presets in a directory
    Presets {
        /// Preset directory
        #[arg(short, long, default_value = "presets")]
        dir: PathBuf,
    },

    /// Write a preset holding the default settings
    InitPreset {
        /// Preset file to create
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Command-line replacements for preset values
#[derive(Default)]
struct Overrides {
    text: Option<String>,
    font: Option<String>,
    size: Option<u32>,
    align: Option<Alignment>,
}

impl Overrides {
    fn apply(self, spec: &mut RenderSpec) {
        if let Some(text) = self.text {
            spec.text = text.replace("\\n", "\n");
        }
        if let Some(font) = self.font {
            spec.font.family = font;
        }
        if let Some(size) = self.size {
            spec.font.size = size;
        }
        if let Some(align) = self.align {
            spec.alignment = align;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            preset,
            output,
            text,
            font,
            size,
            align,
            font_config,
        } => cmd_render(
            preset.as_deref(),
            &output,
            Overrides {
                text,
                font,
                size,
                align,
            },
            &font_config,
        ),

        Commands::Fonts { font_config, add } => cmd_fonts(&font_config, add.as_deref()),

        Commands::Presets { dir } => cmd_presets(&dir),

        Commands::InitPreset { path, force } => cmd_init_preset(&path, force),
    }
}

/// Configured font directories, or the default `fonts` directory
fn font_directories(config: &Path) -> FontDirectories {
    FontDirectories::load(config).or_default_dir()
}

fn cmd_render(
    preset: Option<&Path>,
    output: &Path,
    overrides: Overrides,
    font_config: &Path,
) -> Result<()> {
    let mut spec = match preset {
        Some(path) => Preset::load(path)
            .with_context(|| format!("Failed to load preset {}", path.display()))?
            .to_spec(),
        None => RenderSpec::default(),
    };
    overrides.apply(&mut spec);

    let mut renderer = Renderer::with_font_directories(&font_directories(font_config));
    let canvas = renderer.render(&spec);

    let format = save_image(&canvas, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Rendered {}x{} {:?} to {}",
        canvas.width(),
        canvas.height(),
        format,
        output.display()
    );
    Ok(())
}

fn cmd_fonts(font_config: &Path, add: Option<&Path>) -> Result<()> {
    if let Some(dir) = add {
        anyhow::ensure!(dir.is_dir(), "Not a directory: {}", dir.display());
        let mut config = FontDirectories::load(font_config);
        if !config.directories.iter().any(|d| d == dir) {
            config.directories.push(dir.to_path_buf());
            config
                .save(font_config)
                .with_context(|| format!("Failed to save {}", font_config.display()))?;
            info!("Added font directory {}", dir.display());
        }
    }

    let catalog = FontCatalog::scan(&font_directories(font_config));
    if catalog.is_empty() {
        info!("No fonts found; text renders with the built-in font");
        return Ok(());
    }

    for name in catalog.names() {
        match catalog.path(name) {
            Some(path) => println!("{name}\t{}", path.display()),
            None => println!("{name}"),
        }
    }
    Ok(())
}

fn cmd_presets(dir: &Path) -> Result<()> {
    let names = list_presets(dir);
    if names.is_empty() {
        info!("No presets in {}", dir.display());
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn cmd_init_preset(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "{} already exists (use --force to overwrite)",
        path.display()
    );
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    Preset::from_spec(&RenderSpec::default())
        .save(path)
        .with_context(|| format!("Failed to write preset {}", path.display()))?;
    info!("Wrote default preset to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "textlab", "-v", "render", "p.json", "-o", "out.png", "--align", "se", "--size", "20",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Render {
                preset,
                output,
                align,
                size,
                font_config,
                ..
            } => {
                assert_eq!(preset, Some(PathBuf::from("p.json")));
                assert_eq!(output, PathBuf::from("out.png"));
                assert_eq!(align, Some(Alignment::SouthEast));
                assert_eq!(size, Some(20));
                assert_eq!(font_config, PathBuf::from(CONFIG_FILE_NAME));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_bad_alignment_rejected() {
        assert!(Cli::try_parse_from(["textlab", "render", "-o", "x.png", "--align", "up"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut spec = RenderSpec::default();
        Overrides {
            text: Some("a\\nb".to_string()),
            font: Some("Mono".to_string()),
            size: None,
            align: Some(Alignment::North),
        }
        .apply(&mut spec);
        assert_eq!(spec.text, "a\nb");
        assert_eq!(spec.font.family, "Mono");
        assert_eq!(spec.font.size, 48);
        assert_eq!(spec.alignment, Alignment::North);
    }

    #[test]
    fn test_render_and_init_preset() {
        let dir = tempfile::tempdir().unwrap();
        let preset = dir.path().join("presets").join("default.json");
        cmd_init_preset(&preset, false).unwrap();
        assert!(cmd_init_preset(&preset, false).is_err());
        cmd_init_preset(&preset, true).unwrap();

        let output = dir.path().join("out.png");
        let overrides = Overrides {
            text: Some("Hi".to_string()),
            ..Overrides::default()
        };
        cmd_render(Some(&preset), &output, overrides, &dir.path().join("none.json")).unwrap();
        assert!(output.is_file());
    }

    #[test]
    fn test_render_rejects_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.bmp");
        let result = cmd_render(None, &output, Overrides::default(), &dir.path().join("none.json"));
        assert!(result.is_err());
    }
}
