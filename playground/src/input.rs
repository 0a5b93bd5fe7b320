use winit::event::{ElementState, KeyboardInput, VirtualKeyCode};

/// Keyboard and close state gathered from window events between frames.
#[derive(Debug, Default)]
pub struct WindowInput {
    escape: bool,
    close_requested: bool,
}

impl WindowInput {
    pub fn key(&mut self, input: &KeyboardInput) {
        if let Some(VirtualKeyCode::Escape) = input.virtual_keycode {
            self.escape = input.state == ElementState::Pressed;
        }
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Marks the window for closing while escape is held.
    pub fn poll_escape(&mut self) {
        if self.escape {
            self.close_requested = true;
        }
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(deprecated)]
    fn key_event(key: VirtualKeyCode, state: ElementState) -> KeyboardInput {
        KeyboardInput {
            scancode: 0,
            state,
            virtual_keycode: Some(key),
            modifiers: Default::default(),
        }
    }

    #[test]
    fn fresh_input_test() {
        let input = WindowInput::default();

        assert!(!input.should_close());
    }

    #[test]
    fn escape_test() {
        let mut input = WindowInput::default();

        input.key(&key_event(VirtualKeyCode::Escape, ElementState::Pressed));
        assert!(!input.should_close());

        input.poll_escape();
        assert!(input.should_close());
    }

    #[test]
    fn released_escape_test() {
        let mut input = WindowInput::default();

        input.key(&key_event(VirtualKeyCode::Escape, ElementState::Pressed));
        input.key(&key_event(VirtualKeyCode::Escape, ElementState::Released));
        input.poll_escape();

        assert!(!input.should_close());
    }

    #[test]
    fn other_keys_test() {
        let mut input = WindowInput::default();

        input.key(&key_event(VirtualKeyCode::Space, ElementState::Pressed));
        input.poll_escape();

        assert!(!input.should_close());
    }

    #[test]
    fn close_request_test() {
        let mut input = WindowInput::default();

        input.request_close();

        assert!(input.should_close());
    }
}
