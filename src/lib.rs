//! # particle-field
//!
//! A pointer-reactive particle background: a fixed number of small dots drift
//! across a container, fade in and out near its edges, and lean toward the
//! pointer with a per-particle "magnetism".
//!
//! The simulation runs on the CPU in CSS pixels and draws through the
//! [`Surface`] trait, so the same field can render into a window
//! ([`GpuSurface`], wgpu) or into memory ([`Canvas`]).
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_field::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Runner::new(FieldConfig::contact_hero())
//!         .with_title("Contact")
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Configuration
//!
//! [`FieldConfig`] holds the eight recognized options (`class_name`,
//! `quantity`, `staticity`, `ease`, `size`, `color`, `vx`, `vy`). Every option
//! has a default; `ease` and `staticity` must be positive.
//!
//! ### The field
//!
//! [`ParticleField`] owns the particles, the pointer position and the drawing
//! surface. [`resize`](ParticleField::resize) regenerates every particle and
//! [`tick`](ParticleField::tick) advances one frame.
//!
//! ### The frame loop
//!
//! [`Animation`] wraps a field in a cancellable loop. Hosts call
//! [`Animation::frame`] once per frame and deliver events through
//! [`Animation::dispatch`]; a [`CancelToken`] stops both.
//!
//! ```ignore
//! let mut field = ParticleField::new(FieldConfig::new())?.with_surface(Canvas::new(0, 0));
//! field.resize(800.0, 600.0, 2.0);
//!
//! let mut animation = Animation::new(field);
//! animation.start();
//! animation.dispatch(FieldEvent::PointerMoved { x: 420.0, y: 310.0 });
//! animation.run_frames(120);
//! ```
//!
//! ### Hosts
//!
//! | Host | Surface | Scheduler |
//! |------|---------|-----------|
//! | [`Runner`] | [`GpuSurface`] | winit redraw requests |
//! | [`Snapshot`] | [`Canvas`] | [`Animation::run_frames`] |
//!
//! ### Counters
//!
//! [`CountUp`] and [`VisibilityTrigger`] animate the statistics strip that
//! sits next to the field: numbers ease from 0 to their target once the strip
//! scrolls into view.

pub mod animation;
pub mod color;
pub mod config;
pub mod counter;
pub mod error;
pub mod field;
mod gpu;
pub mod input;
pub mod math;
pub mod particle;
mod runner;
pub mod shader;
mod snapshot;
pub mod spawn;
pub mod surface;
pub mod time;

pub use animation::{Animation, CancelToken};
pub use color::Rgb;
pub use config::FieldConfig;
pub use counter::{CountStyle, CountUp, VisibilityTrigger};
pub use error::{ConfigError, GpuError, LoadError, RunError, SnapshotError};
pub use field::ParticleField;
pub use glam::{Vec2, Vec4};
pub use gpu::GpuSurface;
pub use input::{FieldEvent, Input};
pub use particle::Particle;
pub use runner::Runner;
pub use snapshot::Snapshot;
pub use spawn::Spawner;
pub use surface::{Canvas, Surface};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use particle_field::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animation::{Animation, CancelToken};
    pub use crate::color::Rgb;
    pub use crate::config::FieldConfig;
    pub use crate::counter::{CountStyle, CountUp, VisibilityTrigger};
    pub use crate::error::{ConfigError, RunError, SnapshotError};
    pub use crate::field::ParticleField;
    pub use crate::input::FieldEvent;
    pub use crate::runner::Runner;
    pub use crate::snapshot::Snapshot;
    pub use crate::surface::{Canvas, Surface};
    pub use crate::{Vec2, Vec4};
}
