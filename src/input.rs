//! Host events delivered to a particle field.
//!
//! The field reacts to exactly two things: the pointer moving and its
//! container changing size. [`FieldEvent`] is the host-neutral form of both.
//! [`Input`] turns winit window events into field events, converting physical
//! pixels into the logical pixels the simulation runs in.
//!
//! ```ignore
//! if let Some(event) = input.handle_event(&window_event) {
//!     animation.dispatch(event);
//! }
//! ```

use glam::Vec2;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;

/// An event the field listens for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEvent {
    /// Pointer position in logical pixels, in the same space as the container origin.
    PointerMoved { x: f32, y: f32 },
    /// New container size in logical pixels and the device pixel ratio.
    Resized {
        width: f32,
        height: f32,
        scale_factor: f32,
    },
}

/// Tracks window scale and size to translate winit events.
#[derive(Debug, Clone)]
pub struct Input {
    scale_factor: f64,
    physical_size: PhysicalSize<u32>,
    pointer: Vec2,
}

impl Input {
    /// Create a tracker for a window with the given scale factor and size.
    pub fn new(scale_factor: f64, physical_size: PhysicalSize<u32>) -> Self {
        Self {
            scale_factor: sanitize_scale(scale_factor),
            physical_size,
            pointer: Vec2::ZERO,
        }
    }

    /// Last pointer position in logical pixels.
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Window size in physical pixels.
    pub fn physical_size(&self) -> PhysicalSize<u32> {
        self.physical_size
    }

    /// The resize event describing the current window.
    pub fn current_size(&self) -> FieldEvent {
        let logical = self.physical_size.to_logical::<f32>(self.scale_factor);
        FieldEvent::Resized {
            width: logical.width,
            height: logical.height,
            scale_factor: self.scale_factor as f32,
        }
    }

    /// Convert a physical cursor position into a pointer event.
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> FieldEvent {
        let logical = position.to_logical::<f32>(self.scale_factor);
        self.pointer = Vec2::new(logical.x, logical.y);
        FieldEvent::PointerMoved {
            x: logical.x,
            y: logical.y,
        }
    }

    /// Record a new physical window size.
    pub fn resized(&mut self, size: PhysicalSize<u32>) -> FieldEvent {
        self.physical_size = size;
        self.current_size()
    }

    /// Record a new scale factor; the logical size changes with it.
    pub fn scale_factor_changed(&mut self, scale_factor: f64) -> FieldEvent {
        self.scale_factor = sanitize_scale(scale_factor);
        self.current_size()
    }

    /// Translate a winit window event, if it is one the field listens for.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<FieldEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(self.cursor_moved(*position)),
            WindowEvent::Resized(size) => Some(self.resized(*size)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                Some(self.scale_factor_changed(*scale_factor))
            }
            _ => None,
        }
    }
}

fn sanitize_scale(scale_factor: f64) -> f64 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}
