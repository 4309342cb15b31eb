use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::raster::Rgb;

pub const MAX_DEPTH: f32 = 1000.0;
pub const RESPAWN_DEPTH: f32 = 1.0;
pub const TRAIL_CAPACITY: usize = 10;
pub const FOCAL_LENGTH: f32 = 1000.0;
pub const MIN_SCREEN_SIZE: f32 = 0.1;
pub const STREAK_THRESHOLD: f32 = 1.0;
/// Spawn volume, as a multiple of the viewport on each axis.
pub const SPAWN_SPREAD: f32 = 3.0;

pub const PALETTE: [Rgb; 9] = [
    Rgb::new(0xFF, 0x6B, 0x6B),
    Rgb::new(0x4E, 0xCD, 0xC4),
    Rgb::new(0x45, 0xB7, 0xD1),
    Rgb::new(0xFF, 0xA0, 0x7A),
    Rgb::new(0x98, 0xD8, 0xC8),
    Rgb::new(0xF7, 0xDC, 0x6F),
    Rgb::new(0xBB, 0x8F, 0xCE),
    Rgb::new(0xFF, 0xD7, 0x00),
    Rgb::new(0x87, 0xCE, 0xFA),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && x <= self.width as f32 && y >= 0.0 && y <= self.height as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

/// Where a particle lands on screen this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Most-recent-first history of projected points.
#[derive(Clone, Debug, Default)]
pub struct Trail {
    points: VecDeque<ScreenPoint>,
}

impl Trail {
    pub fn push(&mut self, point: ScreenPoint) {
        self.points.push_front(point);
        self.points.truncate(TRAIL_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScreenPoint> {
        self.points.iter()
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
    pub size: f32,
    pub color: Rgb,
    pub trail: Trail,
}

impl Particle {
    pub fn project(&self, viewport: Viewport) -> Projection {
        let scale = FOCAL_LENGTH / (self.depth + 1.0);
        Projection {
            x: self.x * scale + viewport.width as f32 / 2.0,
            y: self.y * scale + viewport.height as f32 / 2.0,
            size: (self.size * scale).max(MIN_SCREEN_SIZE),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedTarget {
    Cruise,
    Hyperdrive,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub star_count: usize,
    pub cruise_speed: f32,
    pub hyperdrive_speed: f32,
    pub initial_speed: f32,
    /// Fraction of the remaining distance to the target covered per frame.
    pub smoothing: f32,
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            star_count: 1000,
            cruise_speed: 0.2,
            hyperdrive_speed: 20.0,
            initial_speed: 0.1,
            smoothing: 0.05,
            seed: None,
        }
    }
}

/// Exponential approach: moves `current` a `factor` of the way to `target`.
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Receding starfield state. Owned by one background instance for its whole
/// mounted lifetime; the particle collection is never resized.
#[derive(Debug)]
pub struct FieldSimulation {
    particles: Vec<Particle>,
    speed: f32,
    target: SpeedTarget,
    paused: bool,
    config: FieldConfig,
    rng: StdRng,
}

impl FieldSimulation {
    pub fn new(config: FieldConfig, viewport: Viewport) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let particles = (0..config.star_count)
            .map(|_| {
                let (x, y) = spawn_position(&mut rng, viewport);
                Particle {
                    x,
                    y,
                    depth: rng.random_range(RESPAWN_DEPTH..=MAX_DEPTH),
                    size: rng.random_range(0.4..0.7),
                    color: PALETTE[rng.random_range(0..PALETTE.len())],
                    trail: Trail::default(),
                }
            })
            .collect();
        log::debug!("field created with {} particles", config.star_count);
        Self {
            particles,
            speed: config.initial_speed,
            target: SpeedTarget::Cruise,
            paused: false,
            config,
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn target(&self) -> SpeedTarget {
        self.target
    }

    pub fn target_speed(&self) -> f32 {
        match self.target {
            SpeedTarget::Cruise => self.config.cruise_speed,
            SpeedTarget::Hyperdrive => self.config.hyperdrive_speed,
        }
    }

    pub fn set_hyperdrive(&mut self, engaged: bool) {
        let target = if engaged {
            SpeedTarget::Hyperdrive
        } else {
            SpeedTarget::Cruise
        };
        if target != self.target {
            log::debug!(
                "field target {:?} -> {:?} at speed {:.2}",
                self.target,
                target,
                self.speed
            );
            self.target = target;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether trails are being recorded and drawn this frame.
    pub fn is_streaking(&self) -> bool {
        self.speed > STREAK_THRESHOLD && !self.paused
    }

    /// One animation frame of state update.
    ///
    /// Speed keeps approaching its target while paused, so a pause taken
    /// mid-acceleration resumes further along the curve.
    pub fn step(&mut self, viewport: Viewport) {
        self.speed = approach(self.speed, self.target_speed(), self.config.smoothing);
        if self.paused {
            return;
        }

        let streaking = self.is_streaking();
        for i in 0..self.particles.len() {
            self.particles[i].depth -= self.speed;
            if self.particles[i].depth <= RESPAWN_DEPTH {
                self.respawn(i, viewport);
                // A respawned particle starts its next frame with an empty trail.
                continue;
            }

            let particle = &mut self.particles[i];
            let projected = particle.project(viewport);
            if streaking && viewport.contains(projected.x, projected.y) {
                particle.trail.push(ScreenPoint {
                    x: projected.x,
                    y: projected.y,
                });
            }
        }
    }

    /// Puts the particle back at the far plane with a fresh position.
    pub fn respawn(&mut self, index: usize, viewport: Viewport) {
        let (x, y) = spawn_position(&mut self.rng, viewport);
        if let Some(particle) = self.particles.get_mut(index) {
            particle.x = x;
            particle.y = y;
            particle.depth = MAX_DEPTH;
            particle.trail.clear();
        }
    }
}

fn spawn_position(rng: &mut StdRng, viewport: Viewport) -> (f32, f32) {
    let w = viewport.width.max(1) as f32;
    let h = viewport.height.max(1) as f32;
    (
        (rng.random::<f32>() - 0.5) * w * SPAWN_SPREAD,
        (rng.random::<f32>() - 0.5) * h * SPAWN_SPREAD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    fn field(count: usize) -> FieldSimulation {
        let config = FieldConfig {
            star_count: count,
            seed: Some(7),
            ..Default::default()
        };
        FieldSimulation::new(config, VIEW)
    }

    #[test]
    fn particles_start_inside_depth_range() {
        let field = field(500);
        assert_eq!(field.particles().len(), 500);
        for p in field.particles() {
            assert!(p.depth > 0.0 && p.depth <= MAX_DEPTH);
            assert!(PALETTE.contains(&p.color));
            assert!(p.trail.is_empty());
        }
    }

    #[test]
    fn single_hyperdrive_step_matches_formula() {
        let mut field = field(1);
        field.set_speed(0.2);
        field.set_hyperdrive(true);
        field.step(VIEW);
        assert!((field.speed() - 1.19).abs() < 1e-5);
        assert!(field.speed() > 0.2 && field.speed() < 20.0);
    }

    #[test]
    fn approach_converges_without_overshoot() {
        for (start, target) in [(0.1_f32, 20.0_f32), (20.0, 0.2), (5.0, 5.0)] {
            let mut speed = start;
            let mut previous_gap = (target - speed).abs();
            for _ in 0..1000 {
                speed = approach(speed, target, 0.05);
                let gap = (target - speed).abs();
                assert!(gap <= previous_gap);
                if start < target {
                    assert!(speed <= target);
                } else {
                    assert!(speed >= target);
                }
                previous_gap = gap;
            }
            assert!((speed - target).abs() < 1e-3);
        }
    }

    #[test]
    fn hyperdrive_toggle_is_monotonic_both_ways() {
        let mut field = field(10);
        field.set_hyperdrive(true);
        let mut last = field.speed();
        for _ in 0..200 {
            field.step(VIEW);
            assert!(field.speed() >= last);
            last = field.speed();
        }
        assert!((last - 20.0).abs() < 0.01);

        field.set_hyperdrive(false);
        for _ in 0..300 {
            field.step(VIEW);
            assert!(field.speed() <= last);
            last = field.speed();
        }
        assert!((last - 0.2).abs() < 0.01);
    }

    #[test]
    fn reaching_depth_one_respawns_at_far_plane() {
        let mut field = field(3);
        for round in 0..5 {
            // From a standstill the next step moves 0.01 toward cruise.
            field.set_speed(0.0);
            for p in field.particles_mut() {
                p.depth = 1.01;
                p.trail.push(ScreenPoint {
                    x: 1.0,
                    y: round as f32,
                });
            }
            field.step(VIEW);
            for p in field.particles() {
                assert_eq!(p.depth, MAX_DEPTH);
                assert!(p.trail.is_empty());
            }
        }
    }

    #[test]
    fn pause_freezes_depth_and_trails() {
        let mut field = field(50);
        field.set_hyperdrive(true);
        field.set_speed(10.0);
        for _ in 0..3 {
            field.step(VIEW);
        }
        field.set_paused(true);
        let snapshot: Vec<(f32, usize)> = field
            .particles()
            .iter()
            .map(|p| (p.depth, p.trail.len()))
            .collect();
        for _ in 0..20 {
            field.step(Viewport::new(1024, 768));
        }
        let after: Vec<(f32, usize)> = field
            .particles()
            .iter()
            .map(|p| (p.depth, p.trail.len()))
            .collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn speed_keeps_smoothing_while_paused() {
        let mut field = field(1);
        field.set_speed(0.2);
        field.set_hyperdrive(true);
        field.set_paused(true);
        field.step(VIEW);
        assert!((field.speed() - 1.19).abs() < 1e-5);
        field.step(VIEW);
        assert!(field.speed() > 1.19);
    }

    #[test]
    fn trail_is_bounded_and_newest_first() {
        let mut trail = Trail::default();
        for i in 0..25 {
            trail.push(ScreenPoint {
                x: i as f32,
                y: 0.0,
            });
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs.first(), Some(&24.0));
        assert_eq!(xs.last(), Some(&15.0));
    }

    #[test]
    fn no_trails_below_streak_threshold() {
        let mut field = field(100);
        for _ in 0..30 {
            field.step(VIEW);
        }
        assert!(field.speed() < STREAK_THRESHOLD);
        assert!(field.particles().iter().all(|p| p.trail.is_empty()));
    }

    #[test]
    fn fast_travel_records_trails() {
        let mut field = field(200);
        field.set_hyperdrive(true);
        field.set_speed(5.0);
        field.step(VIEW);
        assert!(field.particles().iter().any(|p| !p.trail.is_empty()));
    }

    #[test]
    fn projection_is_centred_pinhole() {
        let p = Particle {
            x: 0.0,
            y: 0.0,
            depth: 999.0,
            size: 0.5,
            color: PALETTE[0],
            trail: Trail::default(),
        };
        let proj = p.project(VIEW);
        assert_eq!((proj.x, proj.y), (400.0, 300.0));
        assert!((proj.size - 0.5).abs() < 1e-6);

        let far = Particle {
            depth: MAX_DEPTH * 100.0,
            ..p.clone()
        };
        assert_eq!(far.project(VIEW).size, MIN_SCREEN_SIZE);

        let near = Particle {
            x: 10.0,
            y: -10.0,
            depth: 9.0,
            ..p
        };
        let proj = near.project(VIEW);
        assert_eq!((proj.x, proj.y), (1400.0, -700.0));
        assert!(!VIEW.contains(proj.x, proj.y));
    }
}
