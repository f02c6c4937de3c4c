//! Single-channel coverage buffers

use image::{GrayImage, Luma};
use textlab_core::{Size, TextBounds};

/// 8-bit coverage mask (0 = empty, 255 = fully covered)
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaMask {
    image: GrayImage,
}

impl AlphaMask {
    /// Create an empty (all zero) mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    pub fn from_image(image: GrayImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Coverage at a pixel; out-of-bounds reads are empty
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return 0;
        }
        self.image.get_pixel(x as u32, y as u32).0[0]
    }

    pub fn data(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    /// True when no pixel has any coverage
    pub fn is_clear(&self) -> bool {
        self.data().iter().all(|&v| v == 0)
    }

    /// Draw a coverage bitmap with its top-left corner at `(x, y)`
    ///
    /// Overlapping coverage keeps the maximum. Parts outside the mask are
    /// clipped.
    pub fn draw_coverage(&mut self, x: i32, y: i32, width: u32, height: u32, coverage: &[u8]) {
        if width == 0 || height == 0 || coverage.len() < (width * height) as usize {
            return;
        }

        let mask_w = self.width() as i64;
        let mask_h = self.height() as i64;
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + width as i64).min(mask_w);
        let y1 = (y as i64 + height as i64).min(mask_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = mask_w as usize;
        let dst = &mut *self.image;
        for py in y0..y1 {
            let src_row = ((py - y as i64) as usize) * width as usize;
            for px in x0..x1 {
                let value = coverage[src_row + (px - x as i64) as usize];
                let slot = &mut dst[py as usize * stride + px as usize];
                if value > *slot {
                    *slot = value;
                }
            }
        }
    }

    /// Gaussian blur with the given standard deviation
    pub fn blurred(&self, sigma: f32) -> AlphaMask {
        if sigma <= 0.0 || self.width() == 0 || self.height() == 0 {
            return self.clone();
        }
        AlphaMask {
            image: image::imageops::blur(&self.image, sigma),
        }
    }

    /// Rescale coverage so that full coverage maps to `max_alpha`
    ///
    /// Each value becomes `floor(value / 255 * max_alpha)`.
    pub fn scaled(&self, max_alpha: u8) -> AlphaMask {
        let mut image = self.image.clone();
        for Luma([v]) in image.pixels_mut() {
            *v = ((*v as u32 * max_alpha as u32) / 255) as u8;
        }
        AlphaMask { image }
    }

    /// Copy out the part of the mask inside `bounds`
    ///
    /// Bounds are clipped to the mask first.
    pub fn cropped(&self, bounds: TextBounds) -> AlphaMask {
        let left = bounds.left.clamp(0, self.width() as i32) as u32;
        let top = bounds.top.clamp(0, self.height() as i32) as u32;
        let right = bounds.right().clamp(0, self.width() as i32) as u32;
        let bottom = bounds.bottom().clamp(0, self.height() as i32) as u32;
        let view = image::imageops::crop_imm(
            &self.image,
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        );
        AlphaMask {
            image: view.to_image(),
        }
    }

    /// Tight bounding box of all covered pixels
    pub fn coverage_bounds(&self) -> Option<TextBounds> {
        let width = self.width() as usize;
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        for (i, &v) in self.data().iter().enumerate() {
            if v == 0 {
                continue;
            }
            let x = (i % width) as i32;
            let y = (i / width) as i32;
            bounds = Some(match bounds {
                None => (x, y, x + 1, y + 1),
                Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x + 1), b.max(y + 1)),
            });
        }
        bounds.map(|(l, t, r, b)| TextBounds::from_edges(l, t, r, b))
    }
}
