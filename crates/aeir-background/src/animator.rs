//! Render loop driving a [`FlightScene`] on its own thread.
//!
//! The loop waits for a [`Ticker`] tick, snapshots the viewport, renders one
//! frame and presents it. [`Animator::stop`] flips a shared flag that the
//! loop checks after every tick, so a tick that was already pending when the
//! animator stopped never draws.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use aeir_core::{FlightConfig, Viewport};
use tracing::{debug, warn};

use crate::scene::FlightScene;
use crate::surface::{Surface, SurfaceError};

/// Host display-refresh primitive.
pub trait Ticker: Send + 'static {
    /// Block until the next frame is due. Returns `false` once the host
    /// will never tick again.
    fn wait(&mut self) -> bool;
}

/// Highest tick rate; keeps the period at one millisecond or more.
const MAX_HZ: u32 = 1000;

/// Ticks at a fixed rate, catching up without bursts after a stall.
#[derive(Debug)]
pub struct IntervalTicker {
    period: Duration,
    next: Option<Instant>,
}

impl IntervalTicker {
    /// Tick `hz` times per second, between once and a thousand times.
    pub fn from_hz(hz: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / hz.clamp(1, MAX_HZ),
            next: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Ticker for IntervalTicker {
    fn wait(&mut self) -> bool {
        let now = Instant::now();
        let due = self.next.unwrap_or(now);
        if due > now {
            thread::sleep(due - now);
        }
        // Schedule from the later of the deadline and now so a slow frame
        // does not cause a burst of catch-up frames.
        self.next = Some(due.max(now) + self.period);
        true
    }
}

/// One tick per received message; ends when every sender is gone.
impl Ticker for Receiver<()> {
    fn wait(&mut self) -> bool {
        self.recv().is_ok()
    }
}

/// Viewport shared between the resize handler and the render loop.
///
/// Packed into one atomic so a reader never sees a torn width/height pair.
#[derive(Debug, Clone, Default)]
pub struct SharedViewport(Arc<AtomicU64>);

impl SharedViewport {
    pub fn new(viewport: Viewport) -> Self {
        Self(Arc::new(AtomicU64::new(viewport.to_bits())))
    }

    pub fn load(&self) -> Viewport {
        Viewport::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, viewport: Viewport) {
        self.0.store(viewport.to_bits(), Ordering::Relaxed);
    }
}

/// Cancellation token for a running render loop.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    active: Arc<AtomicBool>,
}

impl AnimationHandle {
    fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the loop may still draw.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Stop the loop. Safe to call any number of times.
    pub fn cancel(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            debug!("Flight grid animation cancelled");
        }
    }
}

/// A running flight grid animation.
///
/// Dropping the animator stops the loop.
#[derive(Debug)]
pub struct Animator {
    viewport: SharedViewport,
    handle: AnimationHandle,
    worker: Option<JoinHandle<()>>,
}

impl Animator {
    /// Start animating into `surface`.
    ///
    /// `surface` is `None` when the host could not provide one; the
    /// animator then stays inert and reports [`SurfaceError::Unavailable`]
    /// for the host to log. Nothing is drawn and no loop is started.
    pub fn start<S, T>(
        surface: Option<S>,
        viewport: Viewport,
        config: &FlightConfig,
        ticker: T,
    ) -> Result<Self, SurfaceError>
    where
        S: Surface + Send + 'static,
        T: Ticker,
    {
        let Some(surface) = surface else {
            warn!("No drawing surface, flight grid stays idle");
            return Err(SurfaceError::Unavailable);
        };

        let shared = SharedViewport::new(viewport);
        let handle = AnimationHandle::new();
        let scene = FlightScene::new(viewport, config);

        debug!(
            width = viewport.width,
            height = viewport.height,
            particles = config.particle_count,
            "Starting flight grid animation"
        );

        let worker = {
            let shared = shared.clone();
            let handle = handle.clone();
            thread::spawn(move || run(scene, surface, ticker, shared, handle))
        };

        Ok(Self {
            viewport: shared,
            handle,
            worker: Some(worker),
        })
    }

    /// Cancellation handle for this animation.
    pub fn handle(&self) -> AnimationHandle {
        self.handle.clone()
    }

    /// Shared viewport, for resize handlers living elsewhere.
    pub fn viewport(&self) -> SharedViewport {
        self.viewport.clone()
    }

    /// Apply a new viewport size from the next frame on.
    pub fn resize(&self, viewport: Viewport) {
        self.viewport.store(viewport);
    }

    /// Stop the loop. Idempotent.
    pub fn stop(&self) {
        self.handle.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_active()
    }

    /// Stop the loop and wait for its thread to exit.
    ///
    /// Blocks until the ticker returns from its current wait.
    pub fn join(mut self) {
        self.stop();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("Flight grid render thread panicked");
        }
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The render loop body.
fn run<S: Surface, T: Ticker>(
    mut scene: FlightScene,
    mut surface: S,
    mut ticker: T,
    viewport: SharedViewport,
    handle: AnimationHandle,
) {
    while handle.is_active() {
        if !ticker.wait() {
            debug!("Ticker closed, flight grid stopping");
            break;
        }
        // A tick that was already pending when stop() ran must not draw
        if !handle.is_active() {
            break;
        }

        let current = viewport.load();
        if surface.size() != (current.width, current.height) {
            surface.resize(current.width, current.height);
        }

        scene.render(&mut surface, current);

        if let Err(e) = surface.present() {
            warn!(error = %e, "Flight grid surface lost, stopping animation");
            handle.cancel();
            break;
        }
    }
}
