//! Software RGBA surface for headless frames.

use crate::error::{Result, SketchError};
use crate::render::{GradientRect, Surface};

/// RGBA8 pixel buffer that frames can be painted onto without a browser.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SketchError::CanvasSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// `[r, g, b, a]` at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Pixel index range whose centres fall inside `[start, start + len)`.
    fn span(start: f64, len: f64, limit: u32) -> std::ops::Range<u32> {
        let lo = (start - 0.5).ceil().max(0.0);
        let hi = (start + len - 0.5).ceil().clamp(0.0, limit as f64);
        if !(lo < hi) {
            return 0..0;
        }
        lo as u32..hi as u32
    }

    /// Encode the buffer as a PNG file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_png(&self, path: &std::path::Path) -> Result<()> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| SketchError::Export("pixel buffer does not match dimensions".into()))?;
        img.save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| SketchError::Export(format!("{}: {e}", path.display())))
    }
}

impl Surface for PixelSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[0, 0, 0, 255]);
        }
    }

    fn fill_gradient(&mut self, rect: &GradientRect) {
        if !(rect.w > 0.0) || !(rect.h > 0.0) {
            return;
        }
        let alpha = rect.opacity.clamp(0.0, 1.0);
        let from = rect.from.level() as f64;
        let to = rect.to.level() as f64;
        let rows = Self::span(rect.y, rect.h, self.height);
        for x in Self::span(rect.x, rect.w, self.width) {
            let t = ((x as f64 + 0.5 - rect.x) / rect.w).clamp(0.0, 1.0);
            let level = from + (to - from) * t;
            for y in rows.clone() {
                let i = (y as usize * self.width as usize + x as usize) * 4;
                let px = &mut self.pixels[i..i + 4];
                for c in px.iter_mut().take(3) {
                    *c = (level * alpha + *c as f64 * (1.0 - alpha)).round() as u8;
                }
                let da = px[3] as f64 / 255.0;
                px[3] = ((alpha + da * (1.0 - alpha)) * 255.0).round() as u8;
            }
        }
    }
}
