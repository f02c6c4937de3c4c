//! RGBA pixel buffers

use crate::composite;
use crate::mask::AlphaMask;
use image::{Rgba, RgbaImage};
use textlab_core::{Color, Size};

/// Owned straight-alpha RGBA8 pixel buffer
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Create a canvas where every pixel is `color`
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(color.to_array())),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
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

    /// Color at a pixel, `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|p| Color::from(p.0))
    }

    /// Raw packed RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Alpha-composite `layer` over this canvas
    ///
    /// Layers are anchored at the top-left corner; only the overlapping
    /// region is blended.
    pub fn composite_over(&mut self, layer: &Canvas) {
        if layer.size() == self.size() {
            composite::over_in_place(self.pixels_mut(), layer.pixels());
            return;
        }

        let width = self.width().min(layer.width());
        let height = self.height().min(layer.height());
        for y in 0..height {
            for x in 0..width {
                let dst = self.image.get_pixel_mut(x, y);
                dst.0 = composite::over(dst.0, layer.image.get_pixel(x, y).0);
            }
        }
    }

    /// Copy `src` into this canvas with its top-left corner at `(x, y)`
    ///
    /// Pixels are replaced, not blended. Parts outside the canvas are clipped.
    pub fn paste(&mut self, src: &Canvas, x: i32, y: i32) {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + src.width() as i64).min(self.width() as i64);
        let y1 = (y as i64 + src.height() as i64).min(self.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let dst_stride = self.width() as usize * 4;
        let src_stride = src.width() as usize * 4;
        let row_bytes = (x1 - x0) as usize * 4;
        let src_x = (x0 - x as i64) as usize * 4;
        let src_pixels = src.pixels();
        let dst_pixels = self.pixels_mut();
        for py in y0..y1 {
            let src_y = (py - y as i64) as usize;
            let s = src_y * src_stride + src_x;
            let d = py as usize * dst_stride + x0 as usize * 4;
            dst_pixels[d..d + row_bytes].copy_from_slice(&src_pixels[s..s + row_bytes]);
        }
    }

    /// Replace the alpha channel with the mask's coverage
    ///
    /// Pixels outside the mask keep their alpha.
    pub fn put_alpha(&mut self, mask: &AlphaMask) {
        let width = self.width().min(mask.width());
        let height = self.height().min(mask.height());
        for y in 0..height {
            for x in 0..width {
                self.image.get_pixel_mut(x, y).0[3] = mask.get(x as i32, y as i32);
            }
        }
    }

    /// Paint `color` through `mask` shifted by `(dx, dy)`
    ///
    /// Each covered pixel receives `color` over-composited with alpha
    /// `coverage * color.a / 255`.
    pub fn stamp(&mut self, mask: &AlphaMask, dx: i32, dy: i32, color: Color) {
        let width = self.width() as i32;
        let height = self.height() as i32;
        // Only the shifted mask area can change
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (mask.width() as i32 + dx).min(width);
        let y1 = (mask.height() as i32 + dy).min(height);

        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = mask.get(x - dx, y - dy);
                if coverage == 0 {
                    continue;
                }
                let alpha = (coverage as u32 * color.a as u32 / 255) as u8;
                let src = [color.r, color.g, color.b, alpha];
                let dst = self.image.get_pixel_mut(x as u32, y as u32);
                dst.0 = composite::over(dst.0, src);
            }
        }
    }

    /// True when every pixel has the same value
    pub fn is_uniform(&self) -> bool {
        let mut pixels = self.pixels().chunks_exact(4);
        match pixels.next() {
            Some(first) => pixels.all(|p| p == first),
            None => true,
        }
    }
}
