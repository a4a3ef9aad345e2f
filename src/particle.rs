//! The particle record and its per-frame update.

use glam::Vec2;

use crate::math::{remap_value, round_to};

/// Width in pixels of the band along each canvas edge where particles fade.
pub const EDGE_FADE_WIDTH: f32 = 20.0;

/// Alpha gained per frame while a particle is clear of every edge band.
pub const ALPHA_STEP: f32 = 0.02;

/// One animated dot.
///
/// Positions are in CSS (logical) pixels with the origin at the top-left of
/// the canvas. `translate` is the pointer-driven displacement applied on top
/// of `position` when drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Own velocity, fixed at creation.
    pub velocity: Vec2,
    pub translate: Vec2,
    pub radius: f32,
    pub alpha: f32,
    /// Opacity reached when away from the edges, in `[0.1, 0.7]`.
    pub target_alpha: f32,
    /// Multiplier on how strongly the pointer pulls this particle.
    pub magnetism: f32,
}

impl Particle {
    /// Distance from the drawn circle to the nearest canvas edge.
    ///
    /// Negative when the circle pokes past an edge.
    pub fn edge_distance(&self, canvas: Vec2) -> f32 {
        let drawn = self.position + self.translate;
        [
            drawn.x - self.radius,
            canvas.x - drawn.x - self.radius,
            drawn.y - self.radius,
            canvas.y - drawn.y - self.radius,
        ]
        .into_iter()
        .fold(f32::INFINITY, f32::min)
    }

    /// Fade factor from the closest edge: 0 on an edge, 1 at the inner rim of
    /// the fade band, above 1 further in.
    pub fn edge_factor(&self, canvas: Vec2) -> f32 {
        round_to(
            remap_value(self.edge_distance(canvas), 0.0, EDGE_FADE_WIDTH, 0.0, 1.0),
            2,
        )
    }

    /// Move `alpha` toward `target_alpha` based on the distance to the edges.
    ///
    /// Inside the fade band alpha is set directly to a fraction of the target;
    /// clear of it, alpha climbs by [`ALPHA_STEP`] and is capped at the target.
    pub fn update_alpha(&mut self, canvas: Vec2) {
        let factor = self.edge_factor(canvas);
        if factor > 1.0 {
            self.alpha = (self.alpha + ALPHA_STEP).min(self.target_alpha);
        } else {
            self.alpha = self.target_alpha * factor;
        }
    }

    /// Advance position by the particle's own velocity plus the global drift.
    #[inline]
    pub fn advance(&mut self, drift: Vec2) {
        self.position += self.velocity + drift;
    }

    /// Ease the displacement toward the pointer-driven target.
    ///
    /// `pointer` is relative to the canvas center. The target is
    /// `pointer / (staticity / magnetism)`, and `1 / ease` of the remaining
    /// distance is covered each frame.
    #[inline]
    pub fn follow_pointer(&mut self, pointer: Vec2, staticity: f32, ease: f32) {
        let target = pointer / (staticity / self.magnetism);
        self.translate += (target - self.translate) / ease;
    }

    /// Whether the particle has fully left the canvas.
    ///
    /// Only `position` counts here, not the displacement offset.
    pub fn is_outside(&self, canvas: Vec2) -> bool {
        self.position.x < -self.radius
            || self.position.x > canvas.x + self.radius
            || self.position.y < -self.radius
            || self.position.y > canvas.y + self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            translate: Vec2::ZERO,
            radius: 1.0,
            alpha: 0.0,
            target_alpha: 0.5,
            magnetism: 1.0,
        }
    }

    const CANVAS: Vec2 = Vec2::new(200.0, 100.0);

    #[test]
    fn test_edge_distance_picks_closest() {
        // Left edge: 10 - 1 = 9, top: 40 - 1 = 39
        assert_eq!(dot(10.0, 40.0).edge_distance(CANVAS), 9.0);
        // Bottom edge: 100 - 95 - 1 = 4
        assert_eq!(dot(100.0, 95.0).edge_distance(CANVAS), 4.0);
    }

    #[test]
    fn test_edge_distance_includes_translate() {
        let mut p = dot(50.0, 50.0);
        p.translate = Vec2::new(-45.0, 0.0);
        assert_eq!(p.edge_distance(CANVAS), 4.0);
    }

    #[test]
    fn test_alpha_zero_on_edge() {
        let mut p = dot(1.0, 50.0);
        p.alpha = 0.4;
        p.update_alpha(CANVAS);
        assert_eq!(p.alpha, 0.0);
    }

    #[test]
    fn test_alpha_scales_inside_fade_band() {
        let mut p = dot(11.0, 50.0);
        p.update_alpha(CANVAS);
        assert!((p.alpha - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_steps_and_caps() {
        let mut p = dot(100.0, 50.0);
        p.update_alpha(CANVAS);
        assert!((p.alpha - ALPHA_STEP).abs() < 1e-6);

        p.alpha = 0.49;
        p.update_alpha(CANVAS);
        assert_eq!(p.alpha, 0.5);
    }

    #[test]
    fn test_follow_pointer_moves_by_one_over_ease() {
        let mut p = dot(50.0, 50.0);
        p.magnetism = 2.0;
        // target = 100 / (50 / 2) = 4, step = 4 / 4 = 1
        p.follow_pointer(Vec2::new(100.0, 0.0), 50.0, 4.0);
        assert_eq!(p.translate, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_is_outside_accounts_for_radius() {
        assert!(!dot(-1.0, 50.0).is_outside(CANVAS));
        assert!(dot(-1.5, 50.0).is_outside(CANVAS));
        assert!(!dot(201.0, 50.0).is_outside(CANVAS));
        assert!(dot(201.5, 50.0).is_outside(CANVAS));
        assert!(dot(50.0, 101.5).is_outside(CANVAS));
    }
}
