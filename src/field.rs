//! The particle field: a fixed-size set of drifting dots that fade near the
//! canvas edges and lean toward the pointer.
//!
//! # Frame update
//!
//! Every [`tick`](ParticleField::tick) clears the surface and, for each
//! particle in order:
//!
//! 1. updates alpha from the distance to the closest edge,
//! 2. moves the particle by its velocity plus the global drift,
//! 3. eases its displacement toward `pointer / (staticity / magnetism)`,
//! 4. draws it,
//! 5. replaces it in place with a fresh particle once it has left the canvas.
//!
//! Replacement happens at the same index during a single forward pass, so no
//! particle is skipped and the count never changes between resizes.
//!
//! # Coordinates
//!
//! The simulation runs in CSS (logical) pixels. The backing surface is
//! `width * pixel_ratio` by `height * pixel_ratio` device pixels, and drawing
//! goes through a pixel-ratio scale transform.

use glam::{Affine2, UVec2, Vec2};

use crate::color::Rgb;
use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::particle::Particle;
use crate::spawn::Spawner;
use crate::surface::{Canvas, Surface};

/// A pointer-reactive particle field bound to one container.
pub struct ParticleField<S: Surface = Canvas> {
    config: FieldConfig,
    rgb: Rgb,
    particles: Vec<Particle>,
    /// Container size in CSS pixels.
    canvas: Vec2,
    pixel_ratio: f32,
    /// Container top-left in the coordinate space of pointer events.
    origin: Vec2,
    /// Last accepted pointer position, relative to the canvas center.
    pointer: Vec2,
    spawner: Spawner,
    surface: Option<S>,
}

impl<S: Surface> ParticleField<S> {
    /// Create an unsized field with no surface.
    ///
    /// The field holds no particles until the first [`resize`](Self::resize).
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rgb = config.rgb()?;
        Ok(Self {
            config,
            rgb,
            particles: Vec::new(),
            canvas: Vec2::ZERO,
            pixel_ratio: 1.0,
            origin: Vec2::ZERO,
            pointer: Vec2::ZERO,
            spawner: Spawner::new(),
            surface: None,
        })
    }

    /// Attach a drawing surface.
    pub fn with_surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Use a fixed RNG seed so particle generation is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.spawner = Spawner::seeded(seed);
        self
    }

    /// Attach or detach the drawing surface.
    ///
    /// Without a surface the simulation still runs; drawing is skipped.
    pub fn set_surface(&mut self, surface: Option<S>) {
        self.surface = surface;
        let size = self.backing_size();
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size.x, size.y);
            surface.set_transform(Affine2::from_scale(Vec2::splat(self.pixel_ratio)));
        }
    }

    /// Set the container's top-left corner in pointer-event coordinates.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Resize the container and regenerate every particle.
    ///
    /// Previous particles are discarded. The surface is resized to the
    /// device-pixel backing size and `quantity` fresh particles are drawn.
    /// Negative or non-finite sizes are treated as zero and a non-positive
    /// pixel ratio as 1.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.canvas = Vec2::new(sanitize(width), sanitize(height));
        self.pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };

        let size = self.backing_size();
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size.x, size.y);
            surface.set_transform(Affine2::from_scale(Vec2::splat(self.pixel_ratio)));
        }
        log::debug!(
            "particle field resized to {}x{} css px ({}x{} device px)",
            self.canvas.x,
            self.canvas.y,
            size.x,
            size.y
        );

        self.populate();
    }

    /// Regenerate all particles at the current size.
    pub fn refresh(&mut self) {
        self.populate();
    }

    fn populate(&mut self) {
        self.particles.clear();
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
        for _ in 0..self.config.quantity {
            let particle = self.spawner.spawn(self.canvas, self.config.size);
            draw_particle(self.surface.as_mut(), self.pixel_ratio, self.rgb, &particle);
            self.particles.push(particle);
        }
    }

    /// Advance every particle by one frame and redraw.
    pub fn tick(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }

        let canvas = self.canvas;
        let drift = Vec2::new(self.config.vx, self.config.vy);
        let (staticity, ease, size) = (self.config.staticity, self.config.ease, self.config.size);

        for particle in &mut self.particles {
            particle.update_alpha(canvas);
            particle.advance(drift);
            particle.follow_pointer(self.pointer, staticity, ease);
            draw_particle(self.surface.as_mut(), self.pixel_ratio, self.rgb, particle);

            if particle.is_outside(canvas) {
                let fresh = self.spawner.spawn(canvas, size);
                draw_particle(self.surface.as_mut(), self.pixel_ratio, self.rgb, &fresh);
                *particle = fresh;
            }
        }
    }

    /// Track a pointer position given in the same space as the container origin.
    ///
    /// The position is stored relative to the canvas center, and only when it
    /// lies strictly inside the container. Returns whether it was accepted.
    pub fn pointer_moved(&mut self, client: Vec2) -> bool {
        let half = self.canvas / 2.0;
        let relative = client - self.origin - half;
        let inside = relative.x < half.x
            && relative.x > -half.x
            && relative.y < half.y
            && relative.y > -half.y;
        if inside {
            self.pointer = relative;
        }
        inside
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the live particles, for placing them by hand.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Container size in CSS pixels.
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas
    }

    /// Backing surface size in device pixels.
    ///
    /// Rounded, so a size that came from whole physical pixels maps back to
    /// the same physical pixels.
    pub fn backing_size(&self) -> UVec2 {
        (self.canvas * self.pixel_ratio).round().as_uvec2()
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Tracked pointer position relative to the canvas center.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Detach and return the surface.
    pub fn take_surface(&mut self) -> Option<S> {
        self.surface.take()
    }
}

/// Draw one particle: translate by its displacement, fill, then restore the
/// plain pixel-ratio transform.
fn draw_particle<S: Surface>(surface: Option<&mut S>, pixel_ratio: f32, rgb: Rgb, particle: &Particle) {
    let Some(surface) = surface else {
        return;
    };
    let base = Affine2::from_scale(Vec2::splat(pixel_ratio));
    surface.set_transform(base * Affine2::from_translation(particle.translate));
    surface.fill_circle(particle.position, particle.radius, rgb.with_alpha(particle.alpha));
    surface.set_transform(base);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FieldEvent, Input};
    use winit::dpi::PhysicalSize;

    fn field(quantity: usize) -> ParticleField {
        ParticleField::new(FieldConfig::new().with_quantity(quantity))
            .unwrap()
            .with_seed(11)
    }

    #[test]
    fn test_new_field_is_empty() {
        let f = field(10);
        assert!(f.is_empty());
        assert_eq!(f.canvas_size(), Vec2::ZERO);
        assert!(!f.has_surface());
    }

    #[test]
    fn test_new_rejects_zero_ease() {
        let result = ParticleField::<Canvas>::new(FieldConfig::new().with_ease(0.0));
        assert!(matches!(result, Err(ConfigError::NonPositiveEase(_))));
    }

    #[test]
    fn test_resize_populates() {
        let mut f = field(25);
        f.resize(300.0, 200.0, 2.0);
        assert_eq!(f.len(), 25);
        assert_eq!(f.backing_size(), UVec2::new(600, 400));
        for p in f.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 300.0);
            assert!(p.position.y >= 0.0 && p.position.y < 200.0);
        }
    }

    #[test]
    fn test_resize_sanitizes_inputs() {
        let mut f = field(3);
        f.resize(-10.0, f32::NAN, 0.0);
        assert_eq!(f.canvas_size(), Vec2::ZERO);
        assert_eq!(f.pixel_ratio(), 1.0);
        assert_eq!(f.len(), 3);
    }

    #[test]
    fn test_tick_keeps_count() {
        let mut f = field(40);
        f.resize(30.0, 30.0, 1.0);
        for _ in 0..500 {
            f.tick();
            assert_eq!(f.len(), 40);
        }
    }

    #[test]
    fn test_tick_before_resize_is_noop() {
        let mut f = field(5);
        f.tick();
        assert!(f.is_empty());
    }

    #[test]
    fn test_out_of_bounds_particle_replaced_in_place() {
        let mut f = ParticleField::<Canvas>::new(FieldConfig::new().with_quantity(3).with_drift(0.0, 0.0))
            .unwrap()
            .with_seed(5);
        f.resize(100.0, 100.0, 1.0);
        let before = f.particles().to_vec();
        f.particles_mut()[1].position = Vec2::new(500.0, 50.0);
        f.tick();

        assert_eq!(f.len(), 3);
        let replaced = f.particles()[1];
        assert!(replaced.position.x < 100.0);
        assert_eq!(replaced.alpha, 0.0);
        // Neighbours were updated, not replaced.
        assert_eq!(f.particles()[0].target_alpha, before[0].target_alpha);
        assert_eq!(f.particles()[2].magnetism, before[2].magnetism);
    }

    #[test]
    fn test_adjacent_exits_in_same_frame_are_all_replaced() {
        let mut f = field(4);
        f.resize(50.0, 50.0, 1.0);
        for p in f.particles_mut() {
            p.position = Vec2::new(-100.0, -100.0);
        }
        f.tick();
        assert_eq!(f.len(), 4);
        for p in f.particles() {
            assert!(!p.is_outside(Vec2::new(50.0, 50.0)));
        }
    }

    #[test]
    fn test_pointer_inside_is_tracked_relative_to_center() {
        let mut f = field(1);
        f.resize(200.0, 100.0, 1.0);
        assert!(f.pointer_moved(Vec2::new(150.0, 25.0)));
        assert_eq!(f.pointer(), Vec2::new(50.0, -25.0));
    }

    #[test]
    fn test_pointer_outside_is_ignored() {
        let mut f = field(1);
        f.resize(200.0, 100.0, 1.0);
        f.pointer_moved(Vec2::new(150.0, 25.0));
        assert!(!f.pointer_moved(Vec2::new(500.0, 25.0)));
        // The exact edge counts as outside.
        assert!(!f.pointer_moved(Vec2::new(200.0, 50.0)));
        assert_eq!(f.pointer(), Vec2::new(50.0, -25.0));
    }

    #[test]
    fn test_pointer_respects_origin() {
        let mut f = field(1);
        f.resize(100.0, 100.0, 1.0);
        f.set_origin(Vec2::new(1000.0, 500.0));
        assert!(!f.pointer_moved(Vec2::new(50.0, 50.0)));
        assert!(f.pointer_moved(Vec2::new(1060.0, 550.0)));
        assert_eq!(f.pointer(), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_surface_resized_with_pixel_ratio() {
        let mut f = field(10).with_surface(Canvas::new(1, 1));
        f.resize(64.0, 32.0, 1.5);
        assert_eq!(f.surface().unwrap().size(), UVec2::new(96, 48));
    }

    #[test]
    fn test_set_surface_after_resize() {
        let mut f = field(10);
        f.resize(64.0, 32.0, 1.5);
        f.set_surface(Some(Canvas::new(1, 1)));
        let surface = f.surface().unwrap();
        assert_eq!(surface.size(), UVec2::new(96, 48));
        assert_eq!(surface.transform(), Affine2::from_scale(Vec2::splat(1.5)));
        assert_eq!(f.len(), 10);
    }

    #[test]
    fn test_set_surface_none_detaches() {
        let mut f = field(2).with_surface(Canvas::new(1, 1));
        f.resize(10.0, 10.0, 1.0);
        f.set_surface(None);
        assert!(!f.has_surface());
        f.tick();
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn test_backing_size_matches_window_at_fractional_scale() {
        for scale in [1.1, 1.25, 4.0 / 3.0, 1.5, 1.75, 2.25, 2.5] {
            for width in 1000..1100u32 {
                let input = Input::new(scale, PhysicalSize::new(width, 700));
                let FieldEvent::Resized {
                    width: w,
                    height: h,
                    scale_factor,
                } = input.current_size()
                else {
                    unreachable!()
                };
                let mut f = field(0);
                f.resize(w, h, scale_factor);
                assert_eq!(f.backing_size(), UVec2::new(width, 700), "scale {}", scale);
            }
        }
    }

    #[test]
    fn test_draws_visible_particles() {
        let mut f = ParticleField::new(FieldConfig::new().with_quantity(50).with_size(2.0))
            .unwrap()
            .with_seed(3)
            .with_surface(Canvas::new(1, 1));
        f.resize(120.0, 120.0, 1.0);
        // Freshly spawned particles are fully transparent.
        assert_eq!(f.surface().unwrap().painted_pixels(), 0);
        for _ in 0..60 {
            f.tick();
        }
        assert!(f.surface().unwrap().painted_pixels() > 0);
    }

    #[test]
    fn test_refresh_regenerates() {
        let mut f = field(8);
        f.resize(400.0, 400.0, 1.0);
        let before = f.particles().to_vec();
        f.refresh();
        assert_eq!(f.len(), 8);
        assert_ne!(f.particles(), before.as_slice());
    }
}
