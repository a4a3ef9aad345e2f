//! The cancellable frame loop around a [`ParticleField`].
//!
//! A host scheduler (winit redraw requests, a headless loop, a browser
//! animation-frame callback) calls [`Animation::frame`] once per frame and
//! schedules another frame only while it returns `true`. Events reach the
//! field only through [`Animation::dispatch`]. After [`Animation::stop`] both
//! paths go quiet: no further tick runs, no further frame is requested, and
//! events are dropped as if their listeners had been removed.
//!
//! The running flag lives behind a [`CancelToken`] so other owners (a signal
//! handler, a supervising thread) can stop the loop without borrowing it.
//!
//! ```ignore
//! let mut animation = Animation::new(field);
//! animation.start();
//! while animation.frame() {
//!     // present, then wait for the next vsync
//! }
//! ```

use glam::Vec2;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::field::ParticleField;
use crate::input::FieldEvent;
use crate::surface::{Canvas, Surface};
use crate::time::FrameClock;

/// Shared handle to an animation's running flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    running: Arc<AtomicBool>,
}

impl CancelToken {
    /// Stop the associated animation. Idempotent.
    pub fn cancel(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether the associated animation may schedule another frame.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn start(&self) {
        self.running.store(true, Ordering::Release);
    }
}

/// A particle field driven one frame at a time.
pub struct Animation<S: Surface = Canvas> {
    field: ParticleField<S>,
    token: CancelToken,
    clock: FrameClock,
}

impl<S: Surface> Animation<S> {
    /// Wrap a field. The animation starts stopped.
    pub fn new(field: ParticleField<S>) -> Self {
        Self {
            field,
            token: CancelToken::default(),
            clock: FrameClock::new(),
        }
    }

    /// Begin scheduling frames.
    pub fn start(&mut self) {
        if !self.token.is_running() {
            log::info!("particle field animation started ({} particles)", self.field.len());
            self.clock.reset();
            self.token.start();
        }
    }

    /// Stop scheduling frames and stop accepting events.
    pub fn stop(&mut self) {
        if self.token.is_running() {
            log::info!(
                "particle field animation stopped after {} frames ({:.1}s)",
                self.clock.frame(),
                self.clock.elapsed().as_secs_f32()
            );
        }
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.token.is_running()
    }

    /// A handle that can stop this animation from elsewhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Run one frame if running.
    ///
    /// Returns whether the host should schedule the next frame. The flag is
    /// re-checked after the tick, so a cancel that lands mid-frame still
    /// prevents the reschedule.
    pub fn frame(&mut self) -> bool {
        if !self.token.is_running() {
            return false;
        }
        self.field.tick();
        if self.clock.tick() {
            log::debug!(
                "{:.1} fps, last frame {:.2} ms, {} frames",
                self.clock.fps(),
                self.clock.delta() * 1000.0,
                self.clock.frame()
            );
        }
        self.token.is_running()
    }

    /// Drive up to `frames` frames back to back. Returns how many ran.
    pub fn run_frames(&mut self, frames: u64) -> u64 {
        let mut ran = 0;
        while ran < frames && self.token.is_running() {
            self.frame();
            ran += 1;
        }
        ran
    }

    /// Deliver a host event. Returns `false` if the event was dropped.
    ///
    /// Events are dropped while stopped; pointer moves outside the container
    /// are dropped by the field itself.
    pub fn dispatch(&mut self, event: FieldEvent) -> bool {
        if !self.token.is_running() {
            return false;
        }
        match event {
            FieldEvent::PointerMoved { x, y } => self.field.pointer_moved(Vec2::new(x, y)),
            FieldEvent::Resized {
                width,
                height,
                scale_factor,
            } => {
                self.field.resize(width, height, scale_factor);
                true
            }
        }
    }

    pub fn field(&self) -> &ParticleField<S> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField<S> {
        &mut self.field
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}

impl<S: Surface> Drop for Animation<S> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
