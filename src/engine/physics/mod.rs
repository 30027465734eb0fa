// Physics system using rapier2d

mod backend;
pub mod body;
mod collision;
mod world;

pub use backend::{CircleSpec, Material, PhysicsBackend};
pub use body::RigidBodyHandle;
pub use world::PhysicsWorld;
