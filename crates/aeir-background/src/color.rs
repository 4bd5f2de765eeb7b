//! Color utilities for the flight grid.

use ratatui::style::Color;

/// Non-premultiplied RGBA color with a fractional alpha, as in CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Interpolate between two colors in premultiplied space, so that a
    /// fade to transparent keeps its hue instead of darkening.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let a = self.a + (other.a - self.a) * t;
        if a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let channel = |c0: u8, c1: u8| {
            let p0 = c0 as f32 * self.a;
            let p1 = c1 as f32 * other.a;
            ((p0 + (p1 - p0) * t) / a).round().clamp(0.0, 255.0) as u8
        };
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a,
        }
    }

    /// Composite this color over an opaque destination pixel, scaling the
    /// source alpha by `global_alpha`.
    pub fn blend_over(self, dst: Rgb, global_alpha: f32) -> Rgb {
        let a = (self.a * global_alpha).clamp(0.0, 1.0);
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
        Rgb {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
        }
    }
}

/// Opaque pixel value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(px: Rgb) -> Self {
        Color::Rgb(px.r, px.g, px.b)
    }
}

/// Slate 950, top of the night sky.
pub const SKY_TOP: Rgba = Rgba::opaque(0x02, 0x06, 0x17);
/// Slate 900, bottom of the night sky.
pub const SKY_BOTTOM: Rgba = Rgba::opaque(0x0f, 0x17, 0x2a);
/// Cyan used for grid lines.
pub const GRID_CYAN: Rgba = Rgba::opaque(34, 211, 238);
/// Cyan used for the horizon glow.
pub const GLOW_CYAN: Rgba = Rgba::opaque(6, 182, 212);
