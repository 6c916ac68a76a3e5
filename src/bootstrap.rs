use std::fmt;

use thiserror::Error;

use gl_wrapper::api::GlApi;

use crate::input::{InputEvent, InputState};
use crate::scene::{Scene, SceneError, SceneSettings};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Looping,
    Terminated,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Lifecycle::Uninitialized => "uninitialized",
            Lifecycle::Initialized => "initialized",
            Lifecycle::Looping => "looping",
            Lifecycle::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// What the caller should do after [`Bootstrap::frame`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// A frame was drawn and needs to be presented.
    Present,
    /// The close flag is set, leave the loop.
    Exit,
}

/// Owns the scene and drives it through
/// `Uninitialized -> Initialized -> Looping -> Terminated`.
///
/// Windowing stays with the caller: it feeds translated events in, calls
/// [`frame`](Self::frame) once per iteration and swaps buffers on
/// [`FrameStatus::Present`].
pub struct Bootstrap<'gl, G: GlApi + ?Sized> {
    lifecycle: Lifecycle,
    scene: Option<Scene<'gl, G>>,
    input: InputState,
    should_close: bool,
}

impl<'gl, G: GlApi + ?Sized> Default for Bootstrap<'gl, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'gl, G: GlApi + ?Sized> Bootstrap<'gl, G> {
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            scene: None,
            input: InputState::default(),
            should_close: false,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }

    pub fn scene(&self) -> Option<&Scene<'gl, G>> {
        self.scene.as_ref()
    }

    /// Compiles the program and uploads the geometry. The context behind `gl`
    /// must be current.
    pub fn initialize(
        &mut self,
        gl: &'gl G,
        settings: &SceneSettings,
        (width, height): (u32, u32),
    ) -> Result<(), BootstrapError> {
        self.require(Lifecycle::Uninitialized, "initialize")?;

        let scene = Scene::new(gl, settings)?;
        scene.resize(width, height);
        self.scene = Some(scene);

        self.transition(Lifecycle::Initialized);

        Ok(())
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resized { width, height } => {
                log::debug!("viewport resized to {width}x{height}");
                if let Some(scene) = &self.scene {
                    scene.resize(width, height);
                }
            }
            InputEvent::Key { key, pressed } => self.input.update(key, pressed),
            InputEvent::CloseRequested => {
                log::info!("close requested by the window manager");
                self.should_close = true;
            }
        }
    }

    /// One loop iteration: poll the Escape key, clear and draw.
    ///
    /// Returns [`FrameStatus::Exit`] without drawing once the close flag was
    /// set by an earlier iteration or event.
    pub fn frame(&mut self) -> Result<FrameStatus, BootstrapError> {
        if self.lifecycle == Lifecycle::Initialized {
            self.transition(Lifecycle::Looping);
        }
        self.require(Lifecycle::Looping, "draw a frame")?;

        if self.should_close {
            return Ok(FrameStatus::Exit);
        }

        self.process_input();

        if let Some(scene) = &self.scene {
            scene.draw();
        }

        Ok(FrameStatus::Present)
    }

    /// Releases the vertex array, both buffers and the program. Safe to call
    /// from any state; a second call does nothing.
    pub fn shutdown(&mut self) {
        if self.lifecycle == Lifecycle::Terminated {
            return;
        }

        self.scene = None;
        self.transition(Lifecycle::Terminated);
    }

    fn process_input(&mut self) {
        if self.input.escape_pressed() {
            log::info!("escape pressed, closing");
            self.should_close = true;
        }
    }

    fn require(&self, state: Lifecycle, action: &'static str) -> Result<(), BootstrapError> {
        if self.lifecycle != state {
            return Err(BootstrapError::InvalidTransition {
                from: self.lifecycle,
                action,
            });
        }

        Ok(())
    }

    fn transition(&mut self, to: Lifecycle) {
        log::info!("renderer {} -> {}", self.lifecycle, to);
        self.lifecycle = to;
    }
}

impl<'gl, G: GlApi + ?Sized> Drop for Bootstrap<'gl, G> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: Lifecycle,
        action: &'static str,
    },
}
