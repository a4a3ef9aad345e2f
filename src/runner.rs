//! Native window host.
//!
//! [`Runner`] opens a winit window, puts a [`GpuSurface`] behind it and drives
//! the field from redraw requests. Window events are translated by
//! [`Input`] and reach the field only through [`Animation::dispatch`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::animation::Animation;
use crate::color::Rgb;
use crate::config::FieldConfig;
use crate::error::RunError;
use crate::field::ParticleField;
use crate::gpu::GpuSurface;
use crate::input::Input;

/// Frame pacing when there is no swapchain to wait on.
const FALLBACK_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A windowed particle field builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// Runner::new(FieldConfig::contact_hero())
///     .with_title("Contact")
///     .with_window_size(1280, 720)
///     .run()?;
/// ```
pub struct Runner {
    config: FieldConfig,
    title: String,
    window_size: (u32, u32),
    seed: Option<u64>,
    background: Rgb,
}

impl Runner {
    /// Create a runner for the given field configuration.
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            title: "Particle Field".to_string(),
            window_size: (1280, 720),
            seed: None,
            background: Rgb::WHITE,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Seed the particle generator for a reproducible field.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Color the window is cleared to behind the particles.
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Open the window and animate. Blocks until the window is closed.
    pub fn run(self) -> Result<(), RunError> {
        self.config.validate()?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App {
    runner: Runner,
    window: Option<Arc<Window>>,
    input: Option<Input>,
    animation: Option<Animation<GpuSurface>>,
    error: Option<RunError>,
}

impl App {
    fn new(runner: Runner) -> Self {
        Self {
            runner,
            window: None,
            input: None,
            animation: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RunError) {
        log::error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RunError> {
        let (width, height) = self.runner.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.runner.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let input = Input::new(window.scale_factor(), window.inner_size());

        let surface = match pollster::block_on(GpuSurface::new(window.clone(), self.runner.background)) {
            Ok(surface) => Some(surface),
            Err(err) => {
                log::warn!("{}; animating without a drawing surface", err);
                None
            }
        };

        let mut field = ParticleField::new(self.runner.config.clone())?;
        if let Some(seed) = self.runner.seed {
            field = field.with_seed(seed);
        }
        field.set_surface(surface);

        let mut animation = Animation::new(field);
        animation.start();
        animation.dispatch(input.current_size());

        window.request_redraw();
        self.window = Some(window);
        self.input = Some(input);
        self.animation = Some(animation);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(animation) = &mut self.animation else {
            return;
        };

        let keep_going = animation.frame();

        let presented = match animation.field_mut().surface_mut() {
            Some(surface) => match surface.present() {
                Ok(()) => true,
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    surface.reconfigure();
                    true
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory, closing");
                    animation.stop();
                    event_loop.exit();
                    return;
                }
                Err(e) => {
                    log::warn!("Render error: {:?}", e);
                    true
                }
            },
            None => false,
        };

        if !keep_going {
            return;
        }
        if presented {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(
                Instant::now() + FALLBACK_FRAME_INTERVAL,
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            event_loop.set_control_flow(ControlFlow::Wait);
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(animation) = &mut self.animation {
                    animation.stop();
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                let (Some(input), Some(animation)) = (&mut self.input, &mut self.animation) else {
                    return;
                };
                if let Some(field_event) = input.handle_event(&event) {
                    animation.dispatch(field_event);
                }
            }
        }
    }
}
