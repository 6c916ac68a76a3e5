use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::Event;
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use gl_wrapper::api::NativeGl;

use two_triangles::bootstrap::{Bootstrap, BootstrapError, FrameStatus};
use two_triangles::config::{GL_VERSION, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use two_triangles::input::{translate_window_event, InputEvent};
use two_triangles::scene::SceneSettings;

pub struct App {
    event_loop: EventLoop<()>,
    gl_window: GlWindow,
}

impl App {
    /// Opens the window, makes a 3.3 core context current on it and loads the
    /// GL entry points.
    pub fn new() -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let gl_window = GlWindow::new(&event_loop)?;

        Ok(Self {
            event_loop,
            gl_window,
        })
    }

    /// Runs until the window is closed or Escape is pressed, then releases the
    /// GL objects while the context is still current.
    pub fn run(self, settings: &SceneSettings) -> Result<(), AppError> {
        let Self {
            mut event_loop,
            gl_window,
        } = self;

        let gl = NativeGl;
        let mut bootstrap = Bootstrap::new();
        bootstrap.initialize(&gl, settings, gl_window.size())?;

        let mut failure: Option<AppError> = None;

        let code = event_loop.run_return(|event, _window_target, control_flow| {
            control_flow.set_poll();
            match event {
                Event::WindowEvent { event, .. } => {
                    if let Some(input) = translate_window_event(&event) {
                        if let InputEvent::Resized { width, height } = input {
                            gl_window.resize(width, height);
                        }
                        bootstrap.handle_event(input);
                    }
                }
                Event::MainEventsCleared => match bootstrap.frame() {
                    Ok(FrameStatus::Present) => {
                        if let Err(e) = gl_window.swap_buffers() {
                            failure = Some(e.into());
                            control_flow.set_exit();
                        }
                    }
                    Ok(FrameStatus::Exit) => control_flow.set_exit(),
                    Err(e) => {
                        failure = Some(e.into());
                        control_flow.set_exit();
                    }
                },
                _ => (),
            }
        });

        log::debug!("event loop returned {code}");

        bootstrap.shutdown();

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

pub struct GlWindow {
    context: PossiblyCurrentContext,
    // XXX the surface must be dropped before the window.
    surface: Surface<WindowSurface>,
    window: Window,
}

impl GlWindow {
    pub fn new(event_loop: &EventLoop<()>) -> Result<Self, AppError> {
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(
                WINDOW_WIDTH,
                WINDOW_HEIGHT,
            )))
            .with_title(WINDOW_TITLE);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(event_loop, template, pick_config)
            .map_err(|e| AppError::WindowCreation(e.to_string()))?;
        let window =
            window.ok_or_else(|| AppError::WindowCreation("no window was built".to_string()))?;

        let raw_window_handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let (major, minor) = GL_VERSION;
        let context_attr = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        let (width, height): (u32, u32) = window.inner_size().into();
        let (width, height) = match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(AppError::WindowCreation(format!(
                    "window has no area ({width}x{height})"
                )))
            }
        };
        let attrs =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);

        let surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };
        let context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        if !NativeGl::is_loaded() {
            return Err(AppError::FunctionLoading);
        }

        log::info!(
            "created {width}x{height} window with OpenGL {major}.{minor} core context"
        );

        Ok(Self {
            context,
            surface,
            window,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        self.window.inner_size().into()
    }

    /// Zero sized surfaces (minimized windows) are left alone.
    pub fn resize(&self, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, w, h);
        }
    }

    pub fn swap_buffers(&self) -> Result<(), glutin::error::Error> {
        self.surface.swap_buffers(&self.context)
    }
}

fn pick_config(mut configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    // the picker callback cannot return an error, an empty list is unrecoverable
    configs
        .next()
        .expect("display offered no framebuffer configs")
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to create window: {0}")]
    WindowCreation(String),
    #[error("GL context error: {0}")]
    Context(#[from] glutin::error::Error),
    #[error("Failed to load GL function pointers")]
    FunctionLoading,
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}
