use winit::event::{ElementState, VirtualKeyCode, WindowEvent};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Key {
    Escape,
    Other,
}

/// Window events the render loop reacts to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InputEvent {
    /// New framebuffer size in physical pixels.
    Resized { width: u32, height: u32 },
    Key { key: Key, pressed: bool },
    CloseRequested,
}

/// Returns `None` for events the render loop ignores.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Resized(size) => Some(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => Some(InputEvent::Resized {
            width: new_inner_size.width,
            height: new_inner_size.height,
        }),
        WindowEvent::KeyboardInput { input, .. } => {
            let key = match input.virtual_keycode? {
                VirtualKeyCode::Escape => Key::Escape,
                _ => Key::Other,
            };

            Some(InputEvent::Key {
                key,
                pressed: input.state == ElementState::Pressed,
            })
        }
        WindowEvent::CloseRequested => Some(InputEvent::CloseRequested),
        _ => None,
    }
}

/// Held-key state, polled once per frame.
#[derive(Debug, Default)]
pub struct InputState {
    escape: bool,
}

impl InputState {
    pub fn update(&mut self, key: Key, pressed: bool) {
        if let Key::Escape = key {
            self.escape = pressed;
        }
    }

    pub fn escape_pressed(&self) -> bool {
        self.escape
    }
}
