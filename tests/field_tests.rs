//! Integration tests for the particle field.
//!
//! These drive the public API the way a host would: build a field, size it,
//! feed it events and frames, then inspect particles and rendered pixels.

use std::time::Duration;

use particle_field::prelude::*;
use particle_field::{FrameClock, Particle};

fn sized_field(config: FieldConfig, width: f32, height: f32) -> ParticleField {
    let mut field = ParticleField::new(config)
        .unwrap()
        .with_seed(1234)
        .with_surface(Canvas::new(0, 0));
    field.resize(width, height, 1.0);
    field
}

/// Put a single still particle at `position` with the given target alpha.
fn place(field: &mut ParticleField, position: Vec2, target_alpha: f32) {
    let particle = &mut field.particles_mut()[0];
    particle.position = position;
    particle.velocity = Vec2::ZERO;
    particle.translate = Vec2::ZERO;
    particle.alpha = 0.0;
    particle.target_alpha = target_alpha;
}

// ============================================================================
// Population
// ============================================================================

#[test]
fn test_count_preserved_with_heavy_drift() {
    // Strong drift forces constant replacement at the right edge.
    let config = FieldConfig::new().with_quantity(64).with_drift(7.5, -3.0);
    let mut field = sized_field(config, 160.0, 90.0);

    for _ in 0..500 {
        field.tick();
        assert_eq!(field.len(), 64);
    }
}

#[test]
fn test_resize_discards_and_regenerates_in_bounds() {
    let mut field = sized_field(FieldConfig::new().with_quantity(40), 500.0, 500.0);
    for _ in 0..10 {
        field.tick();
    }

    field.resize(120.0, 30.0, 2.0);
    assert_eq!(field.len(), 40);
    for p in field.particles() {
        assert!(p.position.x >= 0.0 && p.position.x < 120.0);
        assert!(p.position.y >= 0.0 && p.position.y < 30.0);
        assert_eq!(p.alpha, 0.0);
        assert_eq!(p.translate, Vec2::ZERO);
    }
}

#[test]
fn test_zero_quantity_stays_empty() {
    let mut field = sized_field(FieldConfig::new().with_quantity(0), 100.0, 100.0);
    field.tick();
    assert!(field.is_empty());
    assert_eq!(field.surface().unwrap().painted_pixels(), 0);
}

// ============================================================================
// Alpha
// ============================================================================

#[test]
fn test_alpha_stays_within_target() {
    let mut field = sized_field(FieldConfig::new().with_quantity(100).with_drift(0.3, 0.2), 80.0, 60.0);
    for _ in 0..300 {
        field.tick();
        for p in field.particles() {
            assert!(p.alpha >= 0.0);
            assert!(p.alpha <= p.target_alpha);
        }
    }
}

#[test]
fn test_particle_on_edge_is_invisible() {
    let mut field = sized_field(FieldConfig::new().with_quantity(1), 100.0, 100.0);
    let radius = field.particles()[0].radius;
    // Circle touches the left edge exactly
    place(&mut field, Vec2::new(radius, 50.0), 0.6);

    field.tick();
    assert_eq!(field.particles()[0].alpha, 0.0);
}

#[test]
fn test_interior_particle_reaches_target_alpha() {
    let mut field = sized_field(FieldConfig::new().with_quantity(1), 200.0, 200.0);
    place(&mut field, Vec2::new(100.0, 100.0), 0.5);

    for _ in 0..40 {
        field.tick();
    }
    assert_eq!(field.particles()[0].alpha, 0.5);
}

#[test]
fn test_alpha_in_fade_band_is_fraction_of_target() {
    let mut field = sized_field(FieldConfig::new().with_quantity(1).with_size(0.0), 200.0, 200.0);
    place(&mut field, Vec2::new(100.0, 100.0), 0.4);
    field.particles_mut()[0].radius = 0.0;
    field.particles_mut()[0].position = Vec2::new(10.0, 100.0);

    field.tick();
    // Halfway into the 20px band
    assert!((field.particles()[0].alpha - 0.2).abs() < 1e-6);
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_offset_converges_toward_pointer_target() {
    let mut field = sized_field(FieldConfig::new().with_quantity(1), 200.0, 200.0);
    place(&mut field, Vec2::new(100.0, 100.0), 0.5);
    field.particles_mut()[0].magnetism = 2.0;

    assert!(field.pointer_moved(Vec2::new(150.0, 120.0)));
    assert_eq!(field.pointer(), Vec2::new(50.0, 20.0));

    for _ in 0..3000 {
        field.tick();
    }
    // staticity 50, magnetism 2: target = pointer / 25
    let offset = field.particles()[0].translate;
    assert!((offset - Vec2::new(2.0, 0.8)).length() < 1e-3, "offset {:?}", offset);
}

#[test]
fn test_pointer_outside_keeps_last_position() {
    let mut field = sized_field(FieldConfig::new().with_quantity(1), 100.0, 100.0);
    assert!(field.pointer_moved(Vec2::new(75.0, 25.0)));
    assert!(!field.pointer_moved(Vec2::new(-500.0, -500.0)));
    assert!(!field.pointer_moved(Vec2::new(100.0, 50.0)));
    assert_eq!(field.pointer(), Vec2::new(25.0, -25.0));
}

// ============================================================================
// Example scenario
// ============================================================================

#[test]
fn test_single_particle_lifecycle() {
    let mut field = sized_field(FieldConfig::new().with_quantity(1), 100.0, 100.0);
    place(&mut field, Vec2::new(0.0, 50.0), 0.5);
    assert!(!field.pointer_moved(Vec2::new(1000.0, 1000.0)));

    field.tick();
    assert!(field.particles()[0].alpha.abs() < 1e-6);

    let radius = field.particles()[0].radius;
    field.particles_mut()[0].position.x = 100.0 + radius + 1.0;
    field.tick();

    let fresh = field.particles()[0];
    assert_eq!(field.len(), 1);
    assert!(fresh.position.x >= 0.0 && fresh.position.x < 100.0);
    assert!(fresh.position.y >= 0.0 && fresh.position.y < 100.0);
    assert_eq!(fresh.alpha, 0.0);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_rendered_color_matches_config() {
    let config = FieldConfig::contact_hero().with_quantity(1).with_size(3.0);
    let mut field = sized_field(config, 40.0, 40.0);
    place(&mut field, Vec2::new(20.0, 20.0), 0.7);
    field.particles_mut()[0].alpha = 0.7;

    field.tick();
    let canvas = field.surface().unwrap();
    let [r, g, b, a] = canvas.pixel(20, 20).unwrap();
    assert_eq!((r, g, b), (0x0e, 0xa5, 0xe9));
    assert!(a > 0);
}

#[test]
fn test_pixel_ratio_scales_drawing() {
    let mut field = ParticleField::new(FieldConfig::new().with_quantity(1).with_size(2.0))
        .unwrap()
        .with_seed(5)
        .with_surface(Canvas::new(0, 0));
    field.resize(50.0, 50.0, 2.0);
    place(&mut field, Vec2::new(25.0, 25.0), 0.7);
    field.particles_mut()[0].alpha = 0.7;

    field.tick();
    let canvas = field.surface().unwrap();
    assert_eq!(canvas.image().dimensions(), (100, 100));
    assert!(canvas.pixel(50, 50).unwrap()[3] > 0);
    assert_eq!(canvas.pixel(25, 25).unwrap()[3], 0);
}

#[test]
fn test_field_without_surface_still_simulates() {
    let mut field: ParticleField = ParticleField::new(FieldConfig::new().with_quantity(10)).unwrap();
    field.resize(100.0, 100.0, 1.0);
    for _ in 0..20 {
        field.tick();
    }
    assert_eq!(field.len(), 10);
    assert!(!field.has_surface());
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn test_stopped_animation_is_inert() {
    let mut animation = Animation::new(sized_field(FieldConfig::new().with_quantity(5), 100.0, 100.0));
    animation.start();
    animation.run_frames(10);
    animation.stop();

    let snapshot: Vec<Particle> = animation.field().particles().to_vec();
    assert!(!animation.frame());
    assert!(!animation.dispatch(FieldEvent::PointerMoved { x: 10.0, y: 10.0 }));
    assert_eq!(animation.field().particles(), snapshot.as_slice());
    assert_eq!(animation.field().pointer(), Vec2::ZERO);
}

#[test]
fn test_cancel_token_from_another_thread() {
    let mut animation = Animation::new(sized_field(FieldConfig::new().with_quantity(5), 100.0, 100.0));
    animation.start();
    let token = animation.cancel_token();

    std::thread::spawn(move || token.cancel()).join().unwrap();
    assert!(!animation.frame());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_ease_must_be_positive() {
    assert!(matches!(
        ParticleField::<Canvas>::new(FieldConfig::new().with_ease(0.0)),
        Err(ConfigError::NonPositiveEase(_))
    ));
    assert!(matches!(
        ParticleField::<Canvas>::new(FieldConfig::new().with_ease(-2.0)),
        Err(ConfigError::NonPositiveEase(_))
    ));
}

#[test]
fn test_short_and_long_hex_match() {
    assert_eq!(Rgb::from_hex("#0af").unwrap(), Rgb::from_hex("#00aaff").unwrap());
    assert_eq!(Rgb::from_hex("fff").unwrap(), Rgb::WHITE);
    assert!(Rgb::from_hex("#ggg").is_err());
}

#[test]
fn test_partial_json_takes_defaults() {
    let config = FieldConfig::from_json(r##"{ "quantity": 12, "color": "#0ea5e9" }"##).unwrap();
    assert_eq!(config.quantity, 12);
    assert_eq!(config.color, "#0ea5e9");
    assert_eq!(config.staticity, 50.0);
    assert_eq!(config.ease, 50.0);
    assert_eq!(config.size, 0.4);
    assert_eq!((config.vx, config.vy), (0.0, 0.0));
}

// ============================================================================
// Counters and timing
// ============================================================================

#[test]
fn test_stats_strip_counts_once_visible() {
    let mut trigger = VisibilityTrigger::default();
    let stats = CountUp::company_stats();

    assert!(!trigger.observe(0.1));
    assert!(trigger.observe(0.6));
    assert!(!trigger.observe(1.0));

    let done: Vec<String> = stats.iter().map(|c| c.text_at(Duration::from_secs(5))).collect();
    assert_eq!(done, ["1974", "10,000+", "150+", "4"]);
    assert_eq!(stats[1].text_at(Duration::ZERO), "0+");
}

#[test]
fn test_frame_clock_counts_animation_frames() {
    let mut animation = Animation::new(sized_field(FieldConfig::new().with_quantity(3), 50.0, 50.0));
    animation.start();
    animation.run_frames(12);
    let clock: &FrameClock = animation.clock();
    assert_eq!(clock.frame(), 12);
}
