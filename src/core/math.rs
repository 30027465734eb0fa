// Math utilities and helper functions

use glam::Vec2;

/// Clamp a value between min and max
///
/// Never panics when `min > max`; the lower bound wins.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Arithmetic midpoint of two points
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, 0.5), lerp(a.y, b.y, 0.5))
}
