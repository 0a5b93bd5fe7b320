use std::any::Any;
use std::ffi::CString;
use std::num::NonZeroU32;
use std::panic::UnwindSafe;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use thiserror::Error;
use winit::dpi::{PhysicalSize, Size};
use winit::event::KeyboardInput;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use gl_wrapper::LoadError;

use crate::input::WindowInput;

/// winit 0.27 panics instead of returning an error when no display
/// connection can be made.
pub fn create_event_loop() -> Result<EventLoop<()>, HostError> {
    catch_quiet(EventLoop::new).map_err(HostError::EventLoop)
}

/// Runs `f` with the panic hook silenced, returning the panic message on
/// unwind.
fn catch_quiet<T, F>(f: F) -> Result<T, String>
where
    F: FnOnce() -> T + UnwindSafe,
{
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let res = std::panic::catch_unwind(f);
    std::panic::set_hook(hook);

    res.map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The window and its current GL context.
pub struct GlHost {
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    input: WindowInput,
}

impl GlHost {
    pub fn initialize(
        event_loop: &EventLoop<()>,
        width: u32,
        height: u32,
        title: &str,
        vsync: bool,
    ) -> Result<Self, HostError> {
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(width, height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title(title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            // glutin reports BadConfig itself when nothing matches the template
            .build(event_loop, template, |mut configs| configs.next().unwrap())
            .map_err(|e| HostError::Window(e.to_string()))?;

        let window = window.ok_or_else(|| HostError::Window("no window was created".into()))?;

        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 5))))
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr) }
            .and_then(|context| context.make_current(&gl_window.surface))
            .map_err(HostError::Context)?;

        gl_wrapper::load_with(|s| match CString::new(s) {
            Ok(name) => gl_display.get_proc_address(name.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        })?;

        log::info!(
            "OpenGL version: {}",
            gl_wrapper::version_string().unwrap_or_else(|| "unknown".to_string())
        );

        let interval = if vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };

        if let Err(e) = gl_window.surface.set_swap_interval(&gl_context, interval) {
            log::warn!("Failed to set swap interval: {e}");
        }

        Ok(Self {
            gl_context,
            gl_window,
            input: WindowInput::default(),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.gl_window.window.inner_size().into()
    }

    /// Resizes the surface. Returns `false` for zero sized (minimized) windows.
    pub fn resize(&self, width: u32, height: u32) -> bool {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(w), Some(h)) => {
                self.gl_window.surface.resize(&self.gl_context, w, h);
                true
            }
            _ => false,
        }
    }

    pub fn key(&mut self, input: &KeyboardInput) {
        self.input.key(input);
    }

    pub fn request_close(&mut self) {
        self.input.request_close();
    }

    pub fn poll_escape(&mut self) {
        self.input.poll_escape();
    }

    pub fn should_close(&self) -> bool {
        self.input.should_close()
    }

    /// Presents the frame. Pending events are drained by the event loop
    /// before the next frame.
    pub fn swap_and_poll(&self) {
        if let Err(e) = self.gl_window.surface.swap_buffers(&self.gl_context) {
            log::error!("Failed to swap buffers: {e}");
        }
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, HostError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs) }
            .map_err(HostError::Surface)?;

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to initialize the windowing library: {0}")]
    EventLoop(String),
    #[error("Failed to create window: {0}")]
    Window(String),
    #[error("Failed to create window surface: {0}")]
    Surface(#[source] glutin::error::Error),
    #[error("Failed to create OpenGL context: {0}")]
    Context(#[source] glutin::error::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
}
