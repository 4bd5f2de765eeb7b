//! The 2D drawing surface the animator paints into.

use crate::color::Rgba;

/// Errors raised by drawing surfaces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The surface could not be acquired.
    #[error("drawing surface unavailable")]
    Unavailable,

    /// The surface was acquired but can no longer be drawn to.
    #[error("drawing surface lost: {0}")]
    Lost(String),
}

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Two-stop gradient along the line from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub from: Rgba,
    pub to: Rgba,
}

impl LinearGradient {
    /// Color at the given point, projected onto the gradient axis.
    pub fn color_at(&self, p: Point) -> Rgba {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq <= f32::EPSILON {
            return self.to;
        }
        let t = ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len_sq;
        self.from.lerp(self.to, t)
    }
}

/// Two-stop gradient between two concentric circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub from: Rgba,
    pub to: Rgba,
}

impl RadialGradient {
    /// Color at the given point by distance from the center.
    pub fn color_at(&self, p: Point) -> Rgba {
        let span = self.outer_radius - self.inner_radius;
        if span <= f32::EPSILON {
            return self.to;
        }
        let d = ((p.x - self.center.x).powi(2) + (p.y - self.center.y).powi(2)).sqrt();
        self.from.lerp(self.to, (d - self.inner_radius) / span)
    }
}

/// Fill style for rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    /// Color of this paint at a point.
    pub fn color_at(&self, p: Point) -> Rgba {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear(gradient) => gradient.color_at(p),
            Paint::Radial(gradient) => gradient.color_at(p),
        }
    }
}

/// An immediate-mode 2D raster surface.
///
/// Drawing calls are infallible; a surface that has gone bad reports it
/// from [`Surface::present`], which the render loop calls once per frame.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the surface. Contents are unspecified afterwards.
    fn resize(&mut self, width: u32, height: u32);

    /// Alpha multiplier applied to every subsequent draw.
    fn set_global_alpha(&mut self, alpha: f32);

    /// Fill a rectangle, clipped to the surface.
    fn fill_rect(&mut self, rect: RectF, paint: &Paint);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);

    /// Publish the finished frame.
    fn present(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        (**self).set_global_alpha(alpha)
    }

    fn fill_rect(&mut self, rect: RectF, paint: &Paint) {
        (**self).fill_rect(rect, paint)
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        (**self).stroke_line(from, to, color, width)
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        (**self).fill_circle(center, radius, color)
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        (**self).present()
    }
}
