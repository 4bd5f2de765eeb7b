//! Viewport dimensions.

/// Size of the drawing area in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport of the given size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pack into a single `u64` (width in the high half).
    pub const fn to_bits(self) -> u64 {
        ((self.width as u64) << 32) | self.height as u64
    }

    /// Inverse of [`Viewport::to_bits`].
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            width: (bits >> 32) as u32,
            height: bits as u32,
        }
    }

    /// Width as a float.
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Height as a float.
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}
