//! Flight grid backdrop for a ratatui screen.

use std::sync::{Arc, Mutex};

use aeir_core::FlightConfig;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::debug;

use crate::animator::{Animator, IntervalTicker};
use crate::raster::{FrontBuffer, PresentingRaster, Raster};
use crate::widget::{RasterView, viewport_for_cells};

/// Animated backdrop sized in terminal cells.
///
/// Frames are produced on the animator thread; rendering shows whichever
/// frame was presented last.
#[derive(Debug)]
pub struct HeroBackground {
    front: FrontBuffer,
    animator: Option<Animator>,
}

impl HeroBackground {
    /// Start the backdrop for a `cols` x `rows` terminal.
    pub fn start(cols: u16, rows: u16, config: &FlightConfig) -> Self {
        let viewport = viewport_for_cells(cols, rows);
        let front: FrontBuffer = Arc::new(Mutex::new(Raster::new(viewport.width, viewport.height)));
        let surface = PresentingRaster::new(viewport.width, viewport.height, Arc::clone(&front));
        let ticker = IntervalTicker::from_hz(config.refresh_hz);

        // A failed start has already been logged; the screen stays blank
        let animator = Animator::start(Some(surface), viewport, config, ticker).ok();

        Self { front, animator }
    }

    /// Follow a terminal resize.
    pub fn resize(&self, cols: u16, rows: u16) {
        if let Some(animator) = &self.animator {
            let viewport = viewport_for_cells(cols, rows);
            debug!(width = viewport.width, height = viewport.height, "Backdrop resized");
            animator.resize(viewport);
        }
    }

    pub fn is_running(&self) -> bool {
        self.animator.as_ref().is_some_and(Animator::is_running)
    }

    /// Stop the animation and wait for the render thread.
    pub fn stop(&mut self) {
        if let Some(animator) = self.animator.take() {
            animator.join();
        }
    }

    /// Copy of the latest presented frame.
    pub fn snapshot(&self) -> Option<Raster> {
        self.front.lock().ok().map(|raster| raster.clone())
    }
}

impl Widget for &HeroBackground {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Ok(raster) = self.front.lock() {
            RasterView::new(&raster).render(area, buf);
        }
    }
}
