//! Recording surface for tests.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use crate::color::Rgba;
use crate::surface::{Paint, Point, RectF, Surface, SurfaceError};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize(u32, u32),
    GlobalAlpha(f32),
    FillRect(RectF, Paint),
    StrokeLine(Point, Point, Rgba),
    FillCircle(Point, f32, Rgba),
}

/// Surface that records every call into a shared log.
#[derive(Debug, Clone, Default)]
pub struct SpySurface {
    calls: Arc<Mutex<Vec<DrawCall>>>,
    size: (u32, u32),
    presented: Option<Sender<usize>>,
    frames: usize,
    fail_present: bool,
}

impl SpySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify `tx` with the frame count after every present.
    pub fn notify_on_present(mut self, tx: Sender<usize>) -> Self {
        self.presented = Some(tx);
        self
    }

    /// Make every present fail.
    pub fn failing(mut self) -> Self {
        self.fail_present = true;
        self
    }

    /// Shared handle to the call log.
    pub fn log(&self) -> Arc<Mutex<Vec<DrawCall>>> {
        Arc::clone(&self.calls)
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    fn record(&self, call: DrawCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Surface for SpySurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.record(DrawCall::Resize(width, height));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.record(DrawCall::GlobalAlpha(alpha));
    }

    fn fill_rect(&mut self, rect: RectF, paint: &Paint) {
        self.record(DrawCall::FillRect(rect, *paint));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, _width: f32) {
        self.record(DrawCall::StrokeLine(from, to, color));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.record(DrawCall::FillCircle(center, radius, color));
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        if self.fail_present {
            return Err(SurfaceError::Lost("spy configured to fail".to_string()));
        }
        self.frames += 1;
        if let Some(tx) = &self.presented {
            let _ = tx.send(self.frames);
        }
        Ok(())
    }
}
