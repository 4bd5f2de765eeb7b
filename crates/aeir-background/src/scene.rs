//! Perspective flight grid scene.
//!
//! Each frame paints, back to front: a night-sky wash, a particle field
//! with depth parallax, grid lines converging on the horizon, horizontal
//! grid lines rushing toward the camera, and a glow over the horizon.
//!
//! All motion is per frame, not per second.

use aeir_core::{FlightConfig, Viewport};

use crate::color::{GLOW_CYAN, GRID_CYAN, Rgba, SKY_BOTTOM, SKY_TOP};
use crate::surface::{LinearGradient, Paint, Point, RadialGradient, RectF, Surface};

/// Horizon height as a fraction of the viewport height.
pub const HORIZON_RATIO: f32 = 0.4;

/// Depth compression curve for horizontal grid lines.
pub const DEPTH_EXPONENT: f32 = 2.5;

/// Radial lines are this many grid cells apart along the bottom edge.
pub const RADIAL_SPACING_FACTOR: f32 = 3.0;

/// How far a radial line's top end sits from the center toward its bottom end.
pub const CONVERGENCE: f32 = 0.1;

const RADIAL_LINE_ALPHA: f32 = 0.15;
const DEPTH_LINE_ALPHA: f32 = 0.3;
const GLOW_ALPHA: f32 = 0.2;
const GLOW_RADIUS_DIVISOR: f32 = 1.5;
const GLOW_MARGIN: f32 = 100.0;

/// A dust particle, positioned relative to the viewport center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Depth, kept in `(0, z_max]`.
    pub z: f32,
    /// Base radius at depth `focal_length`.
    pub size: f32,
}

impl Particle {
    /// Move toward the camera by `step`, respawning at `z_max` once the
    /// particle reaches the camera plane.
    pub fn advance(&mut self, step: f32, z_max: f32) {
        self.z -= step;
        if self.z <= 0.0 {
            self.z = z_max;
        }
    }

    /// Project onto the screen with a pinhole camera.
    pub fn project(&self, viewport: Viewport, focal_length: f32) -> Projection {
        let k = focal_length / self.z;
        Projection {
            x: viewport.width_f32() / 2.0 + self.x * k,
            y: viewport.height_f32() / 2.0 + self.y * k,
            size: self.size * k,
            opacity: depth_opacity(self.z, focal_length),
        }
    }
}

/// Screen-space placement of a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

impl Projection {
    /// Whether the center lies strictly inside the viewport.
    pub fn is_visible(&self, viewport: Viewport) -> bool {
        self.x > 0.0
            && self.x < viewport.width_f32()
            && self.y > 0.0
            && self.y < viewport.height_f32()
    }
}

/// Opacity of a particle at depth `z`: fully opaque up to the focal
/// distance, fading as `focal_length / z` beyond it.
pub fn depth_opacity(z: f32, focal_length: f32) -> f32 {
    (focal_length / z).min(1.0)
}

/// Screen y of the horizon.
pub fn horizon_y(height: f32) -> f32 {
    height * HORIZON_RATIO
}

/// Screen y of the horizontal grid line at depth step `z`.
pub fn depth_line_y(z: f32, offset: f32, height: f32) -> f32 {
    let horizon = horizon_y(height);
    horizon + ((z + offset) / height).powf(DEPTH_EXPONENT) * (height - horizon)
}

/// Opacity of a horizontal grid line at screen y: zero on the horizon,
/// growing linearly toward the bottom edge.
pub fn depth_line_opacity(y: f32, height: f32) -> f32 {
    let horizon = horizon_y(height);
    let span = height - horizon;
    if span <= 0.0 {
        return 0.0;
    }
    ((y - horizon) / span).max(0.0)
}

/// Phase of the horizontal grid lines.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridState {
    offset: f32,
}

impl GridState {
    /// Current phase in `[0, spacing)`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Advance the phase by `speed`, wrapping at `spacing`.
    pub fn advance(&mut self, speed: f32, spacing: f32) {
        self.offset = (self.offset + speed).rem_euclid(spacing);
    }
}

/// Complete animation state for the flight grid.
#[derive(Debug, Clone)]
pub struct FlightScene {
    config: FlightConfig,
    particles: Vec<Particle>,
    grid: GridState,
}

impl FlightScene {
    /// Create a scene with a particle field spread over `viewport`.
    pub fn new(viewport: Viewport, config: &FlightConfig) -> Self {
        let config = sanitize(config);
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let width = viewport.width_f32();
        let height = viewport.height_f32();
        let particles = (0..config.particle_count)
            .map(|_| {
                let x = (rng.f32() - 0.5) * width * 2.0;
                let y = (rng.f32() - 0.5) * height;
                let z = rng.f32() * config.z_max;
                Particle {
                    x,
                    y,
                    // A zero draw would start on the camera plane
                    z: if z > 0.0 { z } else { config.z_max },
                    size: rng.f32() * 2.0,
                }
            })
            .collect();

        Self::with_particles(&config, particles)
    }

    /// Create a scene with an explicit particle field.
    pub fn with_particles(config: &FlightConfig, particles: Vec<Particle>) -> Self {
        Self {
            config: sanitize(config),
            particles,
            grid: GridState::default(),
        }
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn grid(&self) -> GridState {
        self.grid
    }

    /// Advance the animation by one frame and paint it into `surface`.
    ///
    /// State advances even for an empty viewport; only drawing is skipped.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: Viewport) {
        let step = 2.0 * self.config.speed;
        let z_max = self.config.z_max;
        for particle in &mut self.particles {
            particle.advance(step, z_max);
        }
        // Far particles first so near ones blend on top
        self.particles.sort_unstable_by(|a, b| b.z.total_cmp(&a.z));
        self.grid.advance(self.config.speed, self.config.grid_spacing);

        if viewport.is_empty() {
            return;
        }

        self.draw_sky(surface, viewport);
        self.draw_particles(surface, viewport);
        self.draw_radial_lines(surface, viewport);
        self.draw_depth_lines(surface, viewport);
        self.draw_glow(surface, viewport);
    }

    fn draw_sky<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        let height = viewport.height_f32();
        let wash = Paint::Linear(LinearGradient {
            start: Point::new(0.0, 0.0),
            end: Point::new(0.0, height),
            from: SKY_TOP,
            to: SKY_BOTTOM,
        });
        surface.fill_rect(RectF::new(0.0, 0.0, viewport.width_f32(), height), &wash);
    }

    fn draw_particles<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        for particle in &self.particles {
            let projected = particle.project(viewport, self.config.focal_length);
            if projected.is_visible(viewport) {
                surface.set_global_alpha(projected.opacity);
                surface.fill_circle(
                    Point::new(projected.x, projected.y),
                    projected.size,
                    Rgba::WHITE,
                );
            }
        }
        surface.set_global_alpha(1.0);
    }

    fn draw_radial_lines<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        let width = viewport.width_f32();
        let height = viewport.height_f32();
        let center_x = width / 2.0;
        let horizon = horizon_y(height);
        let color = GRID_CYAN.with_alpha(RADIAL_LINE_ALPHA);
        let spacing = self.config.grid_spacing * RADIAL_SPACING_FACTOR;

        let mut x = -width;
        while x < width * 2.0 {
            surface.stroke_line(
                Point::new(center_x + (x - center_x) * CONVERGENCE, horizon),
                Point::new(x, height),
                color,
                1.0,
            );
            x += spacing;
        }
    }

    fn draw_depth_lines<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        let width = viewport.width_f32();
        let height = viewport.height_f32();
        let offset = self.grid.offset();

        let mut z = 0.0;
        while z < height {
            let y = depth_line_y(z, offset, height);
            if y < height {
                let alpha = depth_line_opacity(y, height) * DEPTH_LINE_ALPHA;
                surface.stroke_line(
                    Point::new(0.0, y),
                    Point::new(width, y),
                    GRID_CYAN.with_alpha(alpha),
                    1.0,
                );
            }
            z += self.config.grid_spacing;
        }
    }

    fn draw_glow<S: Surface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        let width = viewport.width_f32();
        let height = viewport.height_f32();
        let glow = Paint::Radial(RadialGradient {
            center: Point::new(width / 2.0, horizon_y(height)),
            inner_radius: 0.0,
            outer_radius: width / GLOW_RADIUS_DIVISOR,
            from: GLOW_CYAN.with_alpha(GLOW_ALPHA),
            to: Rgba::TRANSPARENT,
        });
        surface.fill_rect(
            RectF::new(0.0, 0.0, width, height / 2.0 + GLOW_MARGIN),
            &glow,
        );
    }
}

/// Replace values that would stall or break the loop with defaults.
fn sanitize(config: &FlightConfig) -> FlightConfig {
    let defaults = FlightConfig::default();
    let positive = |value: f32, fallback: f32| {
        if value.is_finite() && value > 0.0 {
            value
        } else {
            fallback
        }
    };
    FlightConfig {
        // Zero freezes the flight; negative would fly away from the horizon
        speed: if config.speed.is_finite() && config.speed >= 0.0 {
            config.speed
        } else {
            defaults.speed
        },
        focal_length: positive(config.focal_length, defaults.focal_length),
        z_max: positive(config.z_max, defaults.z_max),
        grid_spacing: positive(config.grid_spacing, defaults.grid_spacing),
        ..config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawCall, SpySurface};

    fn seeded(count: usize) -> FlightConfig {
        FlightConfig {
            particle_count: count,
            seed: Some(7),
            ..FlightConfig::default()
        }
    }

    #[test]
    fn test_depth_stays_in_range_over_many_frames() {
        let viewport = Viewport::new(320, 200);
        let mut scene = FlightScene::new(viewport, &seeded(100));
        let mut surface = SpySurface::new();

        for _ in 0..1500 {
            scene.render(&mut surface, viewport);
            assert!(
                scene
                    .particles()
                    .iter()
                    .all(|p| p.z > 0.0 && p.z <= 1000.0)
            );
        }
    }

    #[test]
    fn test_particle_respawns_on_the_same_frame() {
        let mut particle = Particle {
            x: 0.0,
            y: 0.0,
            z: 3.0,
            size: 1.0,
        };
        particle.advance(3.0, 1000.0);
        assert_eq!(particle.z, 1000.0);

        particle.advance(3.0, 1000.0);
        assert_eq!(particle.z, 997.0);
    }

    #[test]
    fn test_initial_particles_are_seeded_and_in_range() {
        let viewport = Viewport::new(800, 600);
        let a = FlightScene::new(viewport, &seeded(100));
        let b = FlightScene::new(viewport, &seeded(100));

        assert_eq!(a.particles().len(), 100);
        assert_eq!(a.particles(), b.particles());
        for p in a.particles() {
            assert!(p.z > 0.0 && p.z <= 1000.0);
            assert!(p.x >= -800.0 && p.x < 800.0);
            assert!(p.y >= -300.0 && p.y < 300.0);
            assert!(p.size >= 0.0 && p.size < 2.0);
        }
    }

    #[test]
    fn test_depth_opacity() {
        assert_eq!(depth_opacity(500.0, 500.0), 1.0);
        assert_eq!(depth_opacity(1000.0, 500.0), 0.5);
        assert_eq!(depth_opacity(1e-6, 500.0), 1.0);
        assert_eq!(depth_opacity(250.0, 500.0), 1.0);
    }

    #[test]
    fn test_projection_at_focal_distance() {
        let particle = Particle {
            x: 0.0,
            y: 0.0,
            z: 500.0,
            size: 2.0,
        };
        let projected = particle.project(Viewport::new(1920, 1080), 500.0);
        assert_eq!(
            projected,
            Projection {
                x: 960.0,
                y: 540.0,
                size: 2.0,
                opacity: 1.0,
            }
        );
    }

    #[test]
    fn test_projection_scales_offsets_with_depth() {
        let particle = Particle {
            x: 100.0,
            y: -50.0,
            z: 1000.0,
            size: 2.0,
        };
        let projected = particle.project(Viewport::new(1920, 1080), 500.0);
        assert_eq!(projected.x, 1010.0);
        assert_eq!(projected.y, 515.0);
        assert_eq!(projected.size, 1.0);
        assert_eq!(projected.opacity, 0.5);
    }

    #[test]
    fn test_offset_tracks_frame_count_for_any_viewport() {
        for viewport in [
            Viewport::new(1920, 1080),
            Viewport::new(37, 11),
            Viewport::default(),
        ] {
            let mut scene = FlightScene::new(viewport, &seeded(0));
            let mut surface = SpySurface::new();
            for n in 1..=100u32 {
                scene.render(&mut surface, viewport);
                let expected = (n as f32 * 1.5) % 40.0;
                assert!((scene.grid().offset() - expected).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_depth_line_opacity_grows_from_horizon() {
        let height = 1080.0;
        let horizon = horizon_y(height);
        assert_eq!(horizon, 432.0);
        assert_eq!(depth_line_opacity(horizon, height), 0.0);
        assert_eq!(depth_line_opacity(horizon - 10.0, height), 0.0);

        let mut previous = 0.0;
        for step in 1..=20 {
            let y = horizon + (height - horizon) * step as f32 / 20.0;
            let opacity = depth_line_opacity(y, height);
            assert!(opacity > previous);
            previous = opacity;
        }
        assert!((previous - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_depth_lines_bunch_up_near_horizon() {
        let height = 1000.0;
        let gaps: Vec<f32> = (0..5)
            .map(|i| {
                let z = i as f32 * 40.0;
                depth_line_y(z + 40.0, 0.0, height) - depth_line_y(z, 0.0, height)
            })
            .collect();
        assert!(gaps.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(depth_line_y(0.0, 0.0, height), horizon_y(height));
    }

    #[test]
    fn test_frame_paints_layers_in_order() {
        let viewport = Viewport::new(1920, 1080);
        let mut scene = FlightScene::new(viewport, &seeded(0));
        let mut surface = SpySurface::new();
        scene.render(&mut surface, viewport);

        let calls = surface.take_calls();
        match calls.first() {
            Some(DrawCall::FillRect(rect, Paint::Linear(gradient))) => {
                assert_eq!(*rect, RectF::new(0.0, 0.0, 1920.0, 1080.0));
                assert_eq!(gradient.from, SKY_TOP);
                assert_eq!(gradient.to, SKY_BOTTOM);
            }
            other => panic!("expected sky wash first, got {other:?}"),
        }
        match calls.last() {
            Some(DrawCall::FillRect(rect, Paint::Radial(glow))) => {
                assert_eq!(*rect, RectF::new(0.0, 0.0, 1920.0, 640.0));
                assert_eq!(glow.center, Point::new(960.0, 432.0));
                assert_eq!(glow.outer_radius, 1280.0);
            }
            other => panic!("expected horizon glow last, got {other:?}"),
        }

        let strokes: Vec<_> = calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::StrokeLine(from, to, color) => Some((*from, *to, *color)),
                _ => None,
            })
            .collect();
        // 48 radial lines from -1920 to 3840 every 120, then 27 depth lines
        assert_eq!(strokes.len(), 48 + 27);

        let (from, to, color) = strokes[0];
        assert_eq!(from, Point::new(960.0 + (-1920.0 - 960.0) * 0.1, 432.0));
        assert_eq!(to, Point::new(-1920.0, 1080.0));
        assert_eq!(color.a, 0.15);

        let depth_lines = &strokes[48..];
        assert!(depth_lines.iter().all(|(from, to, _)| from.x == 0.0
            && to.x == 1920.0
            && from.y == to.y
            && from.y >= 432.0
            && from.y < 1080.0));
    }

    #[test]
    fn test_visible_particle_uses_depth_alpha() {
        let viewport = Viewport::new(1920, 1080);
        let config = seeded(0);
        let particle = Particle {
            x: 0.0,
            y: 0.0,
            z: 1003.0,
            size: 2.0,
        };
        let mut scene = FlightScene::with_particles(&config, vec![particle]);
        let mut surface = SpySurface::new();
        scene.render(&mut surface, viewport);

        let calls = surface.take_calls();
        assert_eq!(calls[1], DrawCall::GlobalAlpha(0.5));
        assert_eq!(
            calls[2],
            DrawCall::FillCircle(Point::new(960.0, 540.0), 1.0, Rgba::WHITE)
        );
        assert_eq!(calls[3], DrawCall::GlobalAlpha(1.0));
    }

    #[test]
    fn test_offscreen_particle_is_skipped() {
        let viewport = Viewport::new(100, 100);
        let particle = Particle {
            x: 5000.0,
            y: 0.0,
            z: 500.0,
            size: 2.0,
        };
        let mut scene = FlightScene::with_particles(&seeded(0), vec![particle]);
        let mut surface = SpySurface::new();
        scene.render(&mut surface, viewport);

        assert!(
            !surface
                .take_calls()
                .iter()
                .any(|call| matches!(call, DrawCall::FillCircle(..)))
        );
    }

    #[test]
    fn test_empty_viewport_draws_nothing() {
        let mut scene = FlightScene::new(Viewport::default(), &seeded(10));
        let mut surface = SpySurface::new();
        scene.render(&mut surface, Viewport::default());
        assert!(surface.take_calls().is_empty());
        assert_eq!(scene.grid().offset(), 1.5);
    }

    #[test]
    fn test_new_viewport_changes_geometry() {
        let mut scene = FlightScene::new(Viewport::new(100, 50), &seeded(0));
        let mut surface = SpySurface::new();

        scene.render(&mut surface, Viewport::new(100, 50));
        surface.take_calls();
        scene.render(&mut surface, Viewport::new(200, 80));

        match surface.take_calls().first() {
            Some(DrawCall::FillRect(rect, _)) => {
                assert_eq!(*rect, RectF::new(0.0, 0.0, 200.0, 80.0));
            }
            other => panic!("expected sky wash, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_is_sanitized() {
        let config = FlightConfig {
            grid_spacing: 0.0,
            z_max: -1.0,
            focal_length: f32::NAN,
            ..seeded(5)
        };
        let scene = FlightScene::new(Viewport::new(10, 10), &config);
        assert_eq!(scene.config().grid_spacing, 40.0);
        assert_eq!(scene.config().z_max, 1000.0);
        assert_eq!(scene.config().focal_length, 500.0);
        assert!(scene.particles().iter().all(|p| p.z > 0.0));
    }

    #[test]
    fn test_negative_speed_keeps_particles_in_range() {
        let config = FlightConfig {
            speed: -1.5,
            ..seeded(20)
        };
        let mut scene = FlightScene::new(Viewport::new(64, 32), &config);
        assert_eq!(scene.config().speed, 1.5);

        let mut spy = SpySurface::new();
        for _ in 0..400 {
            scene.render(&mut spy, Viewport::new(64, 32));
            spy.take_calls();
        }
        let z_max = scene.config().z_max;
        assert!(scene.particles().iter().all(|p| p.z > 0.0 && p.z <= z_max));
        assert!((0.0..40.0).contains(&scene.grid().offset()));
    }

    #[test]
    fn test_zero_speed_is_kept() {
        let config = FlightConfig {
            speed: 0.0,
            ..seeded(3)
        };
        let mut scene = FlightScene::new(Viewport::new(8, 8), &config);
        let depths = |scene: &FlightScene| {
            let mut z: Vec<f32> = scene.particles().iter().map(|p| p.z).collect();
            z.sort_by(f32::total_cmp);
            z
        };
        let before = depths(&scene);
        scene.render(&mut SpySurface::new(), Viewport::new(8, 8));

        assert_eq!(depths(&scene), before);
        assert_eq!(scene.grid().offset(), 0.0);
    }
}
