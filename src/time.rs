//! Frame timing for the animation loop.
//!
//! The field itself is frame-based (its update rules are per frame, not per
//! second), so timing here is only for reporting: frame counts, delta time,
//! and a periodically refreshed FPS figure.

use std::time::{Duration, Instant};

/// Counts frames and measures frame rate.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Record one frame. Returns `true` when the FPS figure was refreshed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let since_update = now.duration_since(self.fps_update_time);
        if since_update >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since_update.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    /// Seconds between the last two frames.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames recorded since creation or the last reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent frames-per-second measurement.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time since creation or the last reset.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Restart counting from now.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
