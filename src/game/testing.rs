// Deterministic physics stand-in for exercising game rules

use glam::Vec2;
use std::collections::BTreeMap;

use super::tiers::TierId;
use crate::engine::physics::{CircleSpec, PhysicsBackend};

#[derive(Debug, Clone, Copy)]
pub struct ScriptedBody {
    pub position: Vec2,
    pub radius: f32,
    pub tag: TierId,
}

/// Bodies never move on their own; tests place them and queue collisions
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    next_handle: u32,
    bodies: BTreeMap<u32, ScriptedBody>,
    queued: Vec<(u32, u32)>,
    /// Handles in the order they were removed
    pub removed: Vec<u32>,
}

impl ScriptedWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a body of `tier` at a position without going through the engine
    pub fn spawn(&mut self, tier: TierId, x: f32, y: f32) -> u32 {
        self.create_circle(&CircleSpec {
            radius: 10.0,
            position: Vec2::new(x, y),
            material: Default::default(),
            tag: tier,
        })
    }

    pub fn move_body(&mut self, handle: u32, x: f32, y: f32) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.position = Vec2::new(x, y);
        }
    }

    pub fn queue_collision(&mut self, a: u32, b: u32) {
        self.queued.push((a, b));
    }

    pub fn body(&self, handle: u32) -> Option<&ScriptedBody> {
        self.bodies.get(&handle)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Handles of every body carrying `tier`
    pub fn bodies_of_tier(&self, tier: TierId) -> Vec<u32> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.tag == tier)
            .map(|(handle, _)| *handle)
            .collect()
    }
}

impl PhysicsBackend for ScriptedWorld {
    type Handle = u32;

    fn create_circle(&mut self, circle: &CircleSpec) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.bodies.insert(
            handle,
            ScriptedBody {
                position: circle.position,
                radius: circle.radius,
                tag: circle.tag,
            },
        );
        handle
    }

    fn remove_bodies(&mut self, handles: &[u32]) {
        for handle in handles {
            if self.bodies.remove(handle).is_some() {
                self.removed.push(*handle);
            }
        }
    }

    fn position(&self, handle: u32) -> Option<Vec2> {
        self.bodies.get(&handle).map(|body| body.position)
    }

    fn tag(&self, handle: u32) -> Option<TierId> {
        self.bodies.get(&handle).map(|body| body.tag)
    }

    fn tagged_bodies(&self) -> Vec<u32> {
        self.bodies.keys().copied().collect()
    }

    fn drain_collision_starts(&mut self) -> Vec<(u32, u32)> {
        std::mem::take(&mut self.queued)
    }
}
