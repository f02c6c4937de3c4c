//! PNG and JPEG export
//!
//! PNG keeps the alpha channel. JPEG has none, so the canvas is first
//! flattened onto opaque white.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::{self, Write};
use std::path::Path;
use textlab_paint::Canvas;
use thiserror::Error;

/// JPEG encoder quality (1-100)
pub const JPEG_QUALITY: u8 = 95;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Unsupported output format '{0}' (expected .png, .jpg or .jpeg)")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Encoded image container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from a file extension, ignoring case
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(ExportError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&ext)
    }
}

/// Composite the canvas onto opaque white, dropping alpha
pub fn flatten_onto_white(canvas: &Canvas) -> RgbImage {
    let mut rgb = Vec::with_capacity(canvas.size().area() * 3);
    for p in canvas.pixels().chunks_exact(4) {
        let a = p[3] as u32;
        for &c in &p[..3] {
            rgb.push(((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8);
        }
    }
    // The buffer length always matches the dimensions
    RgbImage::from_raw(canvas.width(), canvas.height(), rgb).unwrap_or_default()
}

/// Encode the canvas into `writer`
pub fn encode_image<W: Write>(canvas: &Canvas, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Png => PngEncoder::new(writer).write_image(
            canvas.pixels(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )?,
        OutputFormat::Jpeg => {
            let flat = flatten_onto_white(canvas);
            JpegEncoder::new_with_quality(writer, JPEG_QUALITY).write_image(
                flat.as_raw(),
                flat.width(),
                flat.height(),
                ExtendedColorType::Rgb8,
            )?
        }
    }
    Ok(())
}

/// Write the canvas to `path`, choosing the format from the extension
pub fn save_image(canvas: &Canvas, path: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path)?;
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    encode_image(canvas, format, &mut file)?;
    file.flush()?;
    tracing::debug!(
        "Saved {}x{} {:?} image to {}",
        canvas.width(),
        canvas.height(),
        format,
        path.display()
    );
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textlab_core::Color;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_extension("png").unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_extension("JPG").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_extension("jpeg").unwrap(), OutputFormat::Jpeg);
        assert!(matches!(
            OutputFormat::from_extension("bmp"),
            Err(ExportError::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_flatten() {
        let mut pixels = image::RgbaImage::new(3, 1);
        pixels.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
        pixels.put_pixel(1, 0, image::Rgba([0, 0, 0, 0]));
        pixels.put_pixel(2, 0, image::Rgba([0, 0, 0, 128]));
        let canvas = Canvas::from_image(pixels);
        let flat = flatten_onto_white(&canvas);
        assert_eq!(flat.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(flat.get_pixel(1, 0).0, [255, 255, 255]);
        // 255 * 127 / 255 rounded
        assert_eq!(flat.get_pixel(2, 0).0, [127, 127, 127]);
    }

    #[test]
    fn test_png_signature() {
        let mut bytes = Vec::new();
        encode_image(&Canvas::filled(4, 4, Color::BLUE), OutputFormat::Png, &mut bytes).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_jpeg_signature() {
        let mut bytes = Vec::new();
        encode_image(&Canvas::filled(4, 4, Color::BLUE), OutputFormat::Jpeg, &mut bytes).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
