// Contract between game rules and whatever simulates the bodies

use glam::Vec2;
use std::fmt::Debug;
use std::hash::Hash;

/// Opaque payload a backend carries for each gameplay body
///
/// Fixtures such as walls and sensors carry no tag.
pub type BodyTag = usize;

/// Surface properties for a new body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.4,
        }
    }
}

/// Everything needed to spawn one circular gameplay body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSpec {
    pub radius: f32,
    pub position: Vec2,
    pub material: Material,
    pub tag: BodyTag,
}

/// The operations game logic may perform on a physics simulation
///
/// Lookups on a handle that no longer exists return `None`.
pub trait PhysicsBackend {
    type Handle: Copy + Eq + Hash + Debug;

    /// Spawn a tagged circle and return its handle
    fn create_circle(&mut self, circle: &CircleSpec) -> Self::Handle;

    /// Remove bodies; unknown handles are skipped
    fn remove_bodies(&mut self, handles: &[Self::Handle]);

    /// Current centre of a body
    fn position(&self, handle: Self::Handle) -> Option<Vec2>;

    /// Payload attached at creation
    fn tag(&self, handle: Self::Handle) -> Option<BodyTag>;

    /// Every body that currently carries a tag
    fn tagged_bodies(&self) -> Vec<Self::Handle>;

    /// Body pairs that started touching since the last drain
    fn drain_collision_starts(&mut self) -> Vec<(Self::Handle, Self::Handle)>;
}
