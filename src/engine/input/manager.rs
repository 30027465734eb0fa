// Input manager - turns window events into game actions

use super::action::{Action, InputSource};
use super::config::InputConfig;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Tracks action state and the pointer for the single local player
#[derive(Debug)]
pub struct InputManager {
    config: InputConfig,

    /// Actions that are currently held
    pressed: HashSet<Action>,

    /// Actions pressed since the last `update`
    just_pressed: HashSet<Action>,

    /// Last pointer x in window pixels
    pointer_x: Option<f32>,
}

impl InputManager {
    /// Create a new input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            pointer_x: None,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Key repeat is not a new press
            if event.repeat && event.state == ElementState::Pressed {
                return;
            }
            self.process_source(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state);
    }

    /// Record the cursor's horizontal position in window pixels
    pub fn process_cursor_moved(&mut self, x: f64) {
        self.pointer_x = Some(x as f32);
    }

    fn process_source(&mut self, source: InputSource, state: ElementState) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };

        match state {
            ElementState::Pressed => self.press(action),
            ElementState::Released => self.release(action),
        }
    }

    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Clear per-frame edges; call once per frame after handling input
    pub fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Last known pointer x, if the cursor has entered the window
    pub fn pointer_x(&self) -> Option<f32> {
        self.pointer_x
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
