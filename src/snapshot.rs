//! Headless rendering.
//!
//! A [`Snapshot`] runs a field on a software [`Canvas`] for a fixed number of
//! frames and hands back (or saves) the last frame. Useful for previews and
//! for checking what a configuration looks like without a window.

use std::path::Path;

use glam::Vec2;

use crate::animation::Animation;
use crate::config::FieldConfig;
use crate::error::{ConfigError, SnapshotError};
use crate::field::ParticleField;
use crate::surface::Canvas;

/// A headless render of a particle field.
///
/// ```ignore
/// Snapshot::new(FieldConfig::contact_hero())
///     .with_size(800, 400)
///     .with_frames(120)
///     .with_seed(7)
///     .save("contact.png")?;
/// ```
#[derive(Debug, Clone)]
pub struct Snapshot {
    config: FieldConfig,
    width: u32,
    height: u32,
    pixel_ratio: f32,
    frames: u64,
    seed: Option<u64>,
    pointer: Option<Vec2>,
}

impl Snapshot {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            width: 800,
            height: 600,
            pixel_ratio: 1.0,
            frames: 60,
            seed: None,
            pointer: None,
        }
    }

    /// Container size in CSS pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Number of frames to simulate before capturing.
    pub fn with_frames(mut self, frames: u64) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Hold the pointer at a container-relative position for the whole run.
    pub fn with_pointer(mut self, x: f32, y: f32) -> Self {
        self.pointer = Some(Vec2::new(x, y));
        self
    }

    /// Simulate and return the canvas holding the final frame.
    ///
    /// With zero frames the canvas shows the freshly spawned particles.
    pub fn render(&self) -> Result<Canvas, ConfigError> {
        let mut field = ParticleField::new(self.config.clone())?.with_surface(Canvas::new(0, 0));
        if let Some(seed) = self.seed {
            field = field.with_seed(seed);
        }
        field.resize(self.width as f32, self.height as f32, self.pixel_ratio);
        if let Some(pointer) = self.pointer {
            field.pointer_moved(pointer);
        }

        let mut animation = Animation::new(field);
        animation.start();
        let ran = animation.run_frames(self.frames);
        animation.stop();
        log::debug!("snapshot rendered after {} frames", ran);

        let size = animation.field().backing_size();
        Ok(animation
            .field_mut()
            .take_surface()
            .unwrap_or_else(|| Canvas::new(size.x, size.y)))
    }

    /// Render and write the result as a PNG.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        let canvas = self.render()?;
        canvas.save_png(path)?;
        log::info!(
            "wrote {}x{} snapshot to {}",
            canvas.image().width(),
            canvas.image().height(),
            path.display()
        );
        Ok(())
    }
}
