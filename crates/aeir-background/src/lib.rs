//! Perspective flight grid background for the AEIR flyover.
//!
//! This crate renders a pseudo-3D "flying over a grid at night" scene: a
//! particle field with depth parallax, grid lines converging on a horizon,
//! and a horizon glow. The scene draws into any [`Surface`]; [`Animator`]
//! runs it in a loop on its own thread, and [`HeroBackground`] shows it on
//! a ratatui screen.

mod animator;
mod color;
mod raster;
mod scene;
mod state;
mod surface;
mod widget;

#[cfg(test)]
mod testing;

pub use animator::{AnimationHandle, Animator, IntervalTicker, SharedViewport, Ticker};
pub use color::{Rgb, Rgba};
pub use raster::{FrontBuffer, PresentingRaster, Raster};
pub use scene::{
    FlightScene, GridState, Particle, Projection, depth_line_opacity, depth_line_y,
    depth_opacity, horizon_y,
};
pub use state::HeroBackground;
pub use surface::{LinearGradient, Paint, Point, RadialGradient, RectF, Surface, SurfaceError};
pub use widget::{RasterView, viewport_for_cells};
