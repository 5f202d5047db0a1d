//! Frustum viewer demo
//!
//! Opens a window showing a white cube through an orbitable perspective
//! camera, together with the outline of a second, orthographic camera. The
//! orthographic camera is watched by a frustum monitor: moving it with the
//! "Cameras" panel so the cube leaves its view logs a visibility change and
//! updates the window title.
//!
//! Controls: left drag rotates, right drag pans, the wheel zooms.
//!
//! Run with: RUST_LOG=info cargo run -p frustum_viewer_demo

use std::sync::Arc;
use frustum_viewer::fviewer::log::{self, LogEntry, LogSeverity, Logger};
use frustum_viewer::fviewer::{
    FrameHandle, FrameScheduler, MountAdapter, RenderLoop, Renderer, Result, SurfaceContainer,
    Viewer, ViewerConfig, VisibilityTransition,
};
use frustum_viewer::{engine_err, engine_error, engine_info};
use frustum_viewer_renderer_wgpu::winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};
use frustum_viewer_renderer_wgpu::WgpuRenderer;

const TITLE: &str = "Frustum Viewer";
const SOURCE: &str = "demo::App";

/// Forwards viewer log entries to the `log` facade, so `RUST_LOG` filters them.
struct LogFacade;

impl Logger for LogFacade {
    fn log(&self, entry: &LogEntry) {
        let level = match entry.severity {
            LogSeverity::Trace => ::log::Level::Trace,
            LogSeverity::Debug => ::log::Level::Debug,
            LogSeverity::Info => ::log::Level::Info,
            LogSeverity::Warn => ::log::Level::Warn,
            LogSeverity::Error => ::log::Level::Error,
        };
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => {
                ::log::log!(target: entry.source.as_str(), level, "{} ({}:{})", entry.message, file, line)
            }
            _ => ::log::log!(target: entry.source.as_str(), level, "{}", entry.message),
        }
    }
}

/// Schedules frames as window redraws.
struct WindowScheduler {
    window: Arc<Window>,
    issued: u64,
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.issued += 1;
        self.window.request_redraw();
        FrameHandle(self.issued)
    }

    // A requested redraw cannot be withdrawn; the loop ignores it once stopped.
    fn cancel_frame(&mut self, _handle: FrameHandle) {}
}

/// The window slot the renderer is mounted into.
#[derive(Default)]
struct WindowHost {
    renderer: Option<WgpuRenderer>,
}

impl SurfaceContainer for WindowHost {
    type Surface = WgpuRenderer;

    fn attach(&mut self, surface: WgpuRenderer) -> Result<()> {
        self.renderer = Some(surface);
        Ok(())
    }

    fn detach(&mut self) -> Option<WgpuRenderer> {
        self.renderer.take()
    }
}

#[derive(Default)]
struct Pointer {
    rotating: bool,
    panning: bool,
    last: Option<PhysicalPosition<f64>>,
}

struct Session {
    window: Arc<Window>,
    viewer: Viewer,
    host: WindowHost,
    mount: MountAdapter,
    render_loop: RenderLoop<WindowScheduler>,
    pointer: Pointer,
}

impl Session {
    fn start(event_loop: &ActiveEventLoop, config: ViewerConfig) -> Result<Self> {
        let attrs = Window::default_attributes().with_title(TITLE);
        let window = event_loop.create_window(attrs).map(Arc::new).map_err(|e| {
            engine_err!(InitializationFailed, SOURCE, "Failed to create window: {}", e)
        })?;
        let size = window.inner_size();

        let mut viewer = Viewer::new(config, size.width.max(1), size.height.max(1))?;
        let title_window = Arc::clone(&window);
        viewer.subscribe_visibility(move |t: &VisibilityTransition| {
            let state = if t.visible() { "target visible" } else { "target hidden" };
            title_window.set_title(&format!("{} - {}", TITLE, state));
        });

        let renderer = WgpuRenderer::new(Arc::clone(&window), viewer.config())?;
        let mut host = WindowHost::default();
        let mut mount = MountAdapter::new();
        mount.mount(&mut host, renderer)?;

        let mut render_loop = RenderLoop::new(WindowScheduler { window: Arc::clone(&window), issued: 0 });
        render_loop.start();

        Ok(Self {
            window,
            viewer,
            host,
            mount,
            render_loop,
            pointer: Pointer::default(),
        })
    }

    fn stop(&mut self) {
        self.render_loop.stop();
        self.viewer.dispose();
        self.mount.unmount(&mut self.host);
    }

    fn on_window_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) {
        let consumed = match self.host.renderer.as_mut() {
            Some(renderer) => renderer.handle_window_event(&event),
            None => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                self.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Err(e) = self.viewer.on_resize(size.width, size.height) {
                    engine_error!(SOURCE, "Resize failed: {}", e);
                }
                if let Some(renderer) = self.host.renderer.as_mut() {
                    renderer.resize(size.width, size.height, self.window.scale_factor() as f32);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = state == ElementState::Pressed && !consumed;
                match button {
                    MouseButton::Left => self.pointer.rotating = pressed,
                    MouseButton::Right => self.pointer.panning = pressed,
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(prev) = self.pointer.last {
                    let dx = (position.x - prev.x) as f32;
                    let dy = (position.y - prev.y) as f32;
                    if self.pointer.rotating {
                        self.viewer.rotate(dx, dy);
                    } else if self.pointer.panning {
                        self.viewer.pan(dx, dy);
                    }
                }
                self.pointer.last = Some(position);
            }
            WindowEvent::CursorLeft { .. } => self.pointer.last = None,
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y as f32) / 120.0,
                };
                self.viewer.zoom(steps);
            }
            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.host.renderer.as_mut() else {
                    return;
                };
                if let Err(e) = self.render_loop.on_display_refresh(&mut self.viewer, renderer) {
                    engine_error!(SOURCE, "Frame failed: {}", e);
                }
            }
            _ => {}
        }
    }
}

struct App {
    config: ViewerConfig,
    session: Option<Session>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match Session::start(event_loop, self.config.clone()) {
            Ok(session) => {
                engine_info!(SOURCE, "Viewer mounted");
                self.session = Some(session);
            }
            Err(e) => {
                engine_error!(SOURCE, "Could not start the viewer: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(session) = self.session.as_mut() {
            session.on_window_event(event_loop, event);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut session) = self.session.take() {
            session.stop();
        }
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::set_logger(LogFacade);

    let event_loop = EventLoop::new()?;
    let mut app = App { config: ViewerConfig::default(), session: None };
    event_loop.run_app(&mut app)?;
    Ok(())
}
