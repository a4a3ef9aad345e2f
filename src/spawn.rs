//! Random particle generation.
//!
//! A [`Spawner`] owns the field's RNG and turns canvas dimensions into fresh
//! particles. Every random draw of the simulation goes through it, so seeding
//! the spawner makes a whole run reproducible:
//!
//! ```ignore
//! let mut spawner = Spawner::seeded(7);
//! let p = spawner.spawn(Vec2::new(800.0, 600.0), 0.4);
//! assert!(p.position.x < 800.0);
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::math::round_to;
use crate::particle::Particle;

/// Generates particles at random in-bounds positions.
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SmallRng,
}

impl Spawner {
    /// Spawner seeded from the system clock, different every program execution.
    pub fn new() -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self::seeded(seed)
    }

    /// Spawner with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 between 0.0 (inclusive) and 1.0 (exclusive).
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random whole-pixel coordinate in `[0, extent)`.
    ///
    /// Drawn in f64 so large extents cannot round up onto the far edge.
    fn random_pixel(&mut self, extent: f32) -> f32 {
        (self.rng.gen::<f64>() * extent as f64).floor() as f32
    }

    /// Create one particle inside a canvas of `canvas` CSS pixels.
    ///
    /// * position - whole pixels in `[0, width) x [0, height)`
    /// * radius - `base_size` or `base_size + 1`
    /// * target alpha - one decimal place in `[0.1, 0.7]`
    /// * velocity - each axis in `[-0.05, 0.05)`
    /// * magnetism - in `[0.1, 4.1)`
    pub fn spawn(&mut self, canvas: Vec2, base_size: f32) -> Particle {
        let x = self.random_pixel(canvas.x);
        let y = self.random_pixel(canvas.y);
        let radius = (self.random() * 2.0).floor() + base_size;
        let target_alpha = round_to(self.random() * 0.6 + 0.1, 1);
        let dx = (self.random() - 0.5) * 0.1;
        let dy = (self.random() - 0.5) * 0.1;
        let magnetism = 0.1 + self.random() * 4.0;

        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(dx, dy),
            translate: Vec2::ZERO,
            radius,
            alpha: 0.0,
            target_alpha,
            magnetism,
        }
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}
