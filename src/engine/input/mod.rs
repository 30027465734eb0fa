// Input handling system
//
// - `action`: game actions and default key/mouse bindings
// - `config`: remappable source -> action table
// - `manager`: turns winit events into per-frame action edges and a pointer position

pub mod action;
pub mod config;
pub mod manager;

pub use action::Action;
pub use manager::InputManager;
