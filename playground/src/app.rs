use thiserror::Error;

use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;

use gl_wrapper::renderer::GlRenderer;

use crate::args::ArgsPlayground;
use crate::assets::{self, AssetError};
use crate::clock::FrameClock;
use crate::host::{self, GlHost, HostError};
use crate::lifecycle::{Lifecycle, LifecycleError};
use crate::renderer::{FrameRenderer, RendererError};

pub struct App {
    lifecycle: Lifecycle,
    // fields drop in order: GPU objects go before the context that owns them
    renderer: FrameRenderer,
    gl_renderer: GlRenderer,
    host: GlHost,
    event_loop: EventLoop<()>,
    clock: FrameClock,
}

impl App {
    /// Acquires the window, context and GPU resources. Anything acquired
    /// before a failing stage is released before the error is returned.
    pub fn new(args: &ArgsPlayground) -> Result<Self, AppError> {
        match Self::acquire(args) {
            Ok(mut app) => {
                app.lifecycle.advance(Lifecycle::Initialized)?;
                Ok(app)
            }
            Err(e) => {
                log::debug!(
                    "lifecycle {:?} -> {:?}",
                    Lifecycle::Uninitialized,
                    Lifecycle::Terminated
                );
                Err(e)
            }
        }
    }

    fn acquire(args: &ArgsPlayground) -> Result<Self, AppError> {
        let image = assets::load_image(&args.texture)?;
        log::debug!(
            "loaded {:?}, {}x{} {:?}",
            args.texture,
            image.width,
            image.height,
            image.format
        );

        let event_loop = host::create_event_loop()?;
        let host = GlHost::initialize(
            &event_loop,
            args.width,
            args.height,
            &args.title,
            !args.no_vsync,
        )?;

        let mut gl_renderer = GlRenderer::new();
        let (width, height) = host.size();
        gl_renderer.resize(width, height);

        let renderer = FrameRenderer::setup_resources(&mut gl_renderer, &image)?;

        Ok(Self {
            lifecycle: Lifecycle::Uninitialized,
            renderer,
            gl_renderer,
            host,
            event_loop,
            clock: FrameClock::new(),
        })
    }

    /// Runs until escape is pressed or the window is closed, then tears
    /// everything down.
    pub fn run(mut self) -> Result<(), AppError> {
        self.lifecycle.advance(Lifecycle::Running)?;

        let Self {
            lifecycle,
            renderer,
            gl_renderer,
            host,
            event_loop,
            clock,
        } = &mut self;

        event_loop.run_return(|event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if host.resize(size.width, size.height) {
                            gl_renderer.resize(size.width, size.height);
                        }
                    }
                    WindowEvent::KeyboardInput { input, .. } => host.key(&input),
                    WindowEvent::CloseRequested => host.request_close(),
                    _ => (),
                },
                Event::MainEventsCleared => {
                    host.poll_escape();
                    if host.should_close() {
                        control_flow.set_exit();
                        return;
                    }

                    let time = clock.tick();
                    log::trace!("frame at {:.3}s, delta {:.4}s", time.elapsed, time.delta);

                    renderer.render_frame(gl_renderer, time.elapsed);
                    host.swap_and_poll();
                }
                _ => (),
            }
        });

        lifecycle.advance(Lifecycle::Terminated)?;
        log::info!("window closed, shutting down");

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_texture_startup_test() {
        let args = ArgsPlayground::try_parse_from([
            "playground",
            "--texture",
            "assets/does-not-exist.jpg",
        ])
        .unwrap();

        match App::new(&args) {
            Err(AppError::Asset(AssetError::Decode(path, _))) => {
                assert_eq!(path, std::path::PathBuf::from("assets/does-not-exist.jpg"));
            }
            Err(e) => panic!("unexpected startup error {e}"),
            Ok(_) => panic!("startup must fail without a texture"),
        }
    }
}
