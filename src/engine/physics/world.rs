use glam::Vec2;
use rapier2d::prelude::*;
use std::collections::HashMap;

use super::backend::{BodyTag, CircleSpec, PhysicsBackend};
use super::body::presets;
use super::collision::CollisionEventQueue;

/// Physics world that manages all physics simulation
///
/// Works in screen units: x grows to the right, y grows downward.
pub struct PhysicsWorld {
    /// Gravity vector (positive y pulls bodies down the screen)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,

    /// Gameplay payload per body
    body_tags: HashMap<RigidBodyHandle, BodyTag>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(800.0)
    }

    /// Create a new physics world with custom downward gravity
    pub fn with_gravity(gravity_y: Real) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity: vector![0.0, gravity_y],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            body_tags: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    ///
    /// Events left undrained from the previous step are discarded.
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
        self.body_tags.remove(&handle);
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Move a body directly, e.g. a sensor that follows the pointer
    pub fn set_translation(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    /// Attach a gameplay payload to a rigid body
    pub fn set_tag(&mut self, body_handle: RigidBodyHandle, tag: BodyTag) {
        self.body_tags.insert(body_handle, tag);
    }

    /// Number of rigid bodies, fixtures included
    #[cfg(test)]
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    fn parent_of(&self, collider: ColliderHandle) -> Option<RigidBodyHandle> {
        self.collider_set.get(collider).and_then(|c| c.parent())
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsBackend for PhysicsWorld {
    type Handle = RigidBodyHandle;

    fn create_circle(&mut self, circle: &CircleSpec) -> RigidBodyHandle {
        let body = presets::fruit_body(circle.position.x, circle.position.y);
        let handle = self.add_rigid_body(body);

        let collider = presets::fruit_collider(
            circle.radius,
            circle.material.friction,
            circle.material.restitution,
        );
        self.add_collider(collider, handle);
        self.set_tag(handle, circle.tag);

        handle
    }

    fn remove_bodies(&mut self, handles: &[RigidBodyHandle]) {
        for &handle in handles {
            self.remove_rigid_body(handle);
        }
    }

    fn position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.get_rigid_body(handle).map(|body| {
            let pos = body.translation();
            Vec2::new(pos.x, pos.y)
        })
    }

    fn tag(&self, handle: RigidBodyHandle) -> Option<BodyTag> {
        self.body_tags.get(&handle).copied()
    }

    fn tagged_bodies(&self) -> Vec<RigidBodyHandle> {
        self.body_tags.keys().copied().collect()
    }

    fn drain_collision_starts(&mut self) -> Vec<(RigidBodyHandle, RigidBodyHandle)> {
        self.collision_event_queue
            .take()
            .iter()
            .filter_map(|event| event.started_pair())
            .filter_map(|(c1, c2)| Some((self.parent_of(c1)?, self.parent_of(c2)?)))
            .collect()
    }
}
