// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Release the pending fruit at the pointer column
    Drop,
    /// Start a new round once the current one is over
    Restart,
    Pause,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::mouse(MouseButton::Left), Action::Drop),
        (InputSource::key(KeyCode::Space), Action::Drop),
        (InputSource::key(KeyCode::KeyR), Action::Restart),
        (InputSource::key(KeyCode::Enter), Action::Restart),
        (InputSource::key(KeyCode::KeyP), Action::Pause),
        (InputSource::key(KeyCode::Escape), Action::Pause),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::KeyR);
        assert_eq!(source, InputSource::Keyboard(KeyCode::KeyR));
    }

    #[test]
    fn test_input_source_mouse_creation() {
        let source = InputSource::mouse(MouseButton::Left);
        assert_eq!(source, InputSource::Mouse(MouseButton::Left));
    }

    #[test]
    fn test_left_click_drops() {
        let bindings = default_bindings();
        assert!(bindings.contains(&(InputSource::mouse(MouseButton::Left), Action::Drop)));
    }

    #[test]
    fn test_every_action_has_a_binding() {
        let bindings = default_bindings();
        for action in [Action::Drop, Action::Restart, Action::Pause] {
            assert!(
                bindings.iter().any(|(_, a)| *a == action),
                "{action:?} has no default binding"
            );
        }
    }

    #[test]
    fn test_no_duplicate_inputs() {
        let bindings = default_bindings();
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(
                seen_sources.insert(source),
                "Duplicate input source found in default bindings"
            );
        }
    }
}
