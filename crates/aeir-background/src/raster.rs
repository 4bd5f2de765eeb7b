//! Software raster surface.

use std::sync::{Arc, Mutex};

use crate::color::{Rgb, Rgba};
use crate::surface::{Paint, Point, RectF, Surface, SurfaceError};

/// An opaque RGB pixel buffer implementing [`Surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    global_alpha: f32,
}

impl Default for Raster {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Raster {
    /// Create a black raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
            global_alpha: 1.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Overwrite with `other`, reusing the pixel allocation.
    fn copy_from(&mut self, other: &Raster) {
        self.width = other.width;
        self.height = other.height;
        self.global_alpha = other.global_alpha;
        self.pixels.clone_from(&other.pixels);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Blend `color` into one pixel with extra `coverage` in `[0, 1]`.
    fn blend(&mut self, x: i64, y: i64, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        self.pixels[idx] = color.blend_over(self.pixels[idx], self.global_alpha * coverage);
    }

    /// Pixel span covered by `[start, start + len)`, clipped to `max`.
    fn clip_span(start: f32, len: f32, max: u32) -> (u32, u32) {
        let lo = start.max(0.0).round();
        let hi = (start + len).min(max as f32).round();
        if hi <= lo {
            (0, 0)
        } else {
            (lo as u32, hi as u32)
        }
    }
}

impl Surface for Raster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, Rgb::BLACK);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, rect: RectF, paint: &Paint) {
        let (x0, x1) = Self::clip_span(rect.x, rect.width, self.width);
        let (y0, y1) = Self::clip_span(rect.y, rect.height, self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                // Sample at the pixel center
                let color = paint.color_at(Point::new(x as f32 + 0.5, y as f32 + 0.5));
                self.blend(x as i64, y as i64, color, 1.0);
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i64;
        // Thin strokes draw lighter instead of thinner
        let coverage = width.clamp(0.0, 1.0);

        let mut last = None;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let px = (from.x + dx * t).floor() as i64;
            let py = (from.y + dy * t).floor() as i64;
            if last == Some((px, py)) {
                continue;
            }
            last = Some((px, py));
            self.blend(px, py, color, coverage);
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        if radius < 0.5 {
            // Sub-pixel dot: weight by covered area
            let coverage = (std::f32::consts::PI * radius * radius).min(1.0);
            self.blend(center.x.floor() as i64, center.y.floor() as i64, color, coverage);
            return;
        }

        // Only visit the part of the bounding box that lies on the raster
        let x0 = ((center.x - radius).floor() as i64).max(0);
        let x1 = ((center.x + radius).ceil() as i64).min(self.width as i64);
        let y0 = ((center.y - radius).floor() as i64).max(0);
        let y1 = ((center.y + radius).ceil() as i64).min(self.height as i64);
        let r_sq = radius * radius;

        for y in y0..y1 {
            for x in x0..x1 {
                let cx = x as f32 + 0.5 - center.x;
                let cy = y as f32 + 0.5 - center.y;
                if cx * cx + cy * cy <= r_sq {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }
}

/// Shared handle to the most recently presented frame.
pub type FrontBuffer = Arc<Mutex<Raster>>;

/// Double-buffered raster: draws into a private back buffer and copies it
/// to a shared front buffer on [`Surface::present`].
#[derive(Debug)]
pub struct PresentingRaster {
    back: Raster,
    front: FrontBuffer,
}

impl PresentingRaster {
    /// Create a surface presenting into `front`.
    pub fn new(width: u32, height: u32, front: FrontBuffer) -> Self {
        Self {
            back: Raster::new(width, height),
            front,
        }
    }

    /// Handle to the front buffer.
    pub fn front(&self) -> FrontBuffer {
        Arc::clone(&self.front)
    }
}

impl Surface for PresentingRaster {
    fn size(&self) -> (u32, u32) {
        self.back.size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.back.resize(width, height);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.back.set_global_alpha(alpha);
    }

    fn fill_rect(&mut self, rect: RectF, paint: &Paint) {
        self.back.fill_rect(rect, paint);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.back.stroke_line(from, to, color, width);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.back.fill_circle(center, radius, color);
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        let mut front = self
            .front
            .lock()
            .map_err(|e| SurfaceError::Lost(e.to_string()))?;
        front.copy_from(&self.back);
        Ok(())
    }
}
