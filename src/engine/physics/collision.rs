use rapier2d::prelude::*;
use std::sync::Mutex;

/// Collision groups for filtering what objects can collide with each other
///
/// Fruits touch everything, walls only stop fruits, and the guide/limit
/// sensors only report overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Droppable, mergeable bodies
    Fruit = 0b0000_0010,

    /// Static ground and side walls
    Wall = 0b0000_0100,

    /// Game-over line and drop guide - never cause a physical response
    Sensor = 0b0000_1000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            CollisionGroups::Fruit => Group::from_bits_truncate(
                CollisionGroups::Default as u32
                    | CollisionGroups::Fruit as u32
                    | CollisionGroups::Wall as u32
                    | CollisionGroups::Sensor as u32,
            ),

            // Walls never need to interact with each other
            CollisionGroups::Wall => Group::from_bits_truncate(
                CollisionGroups::Default as u32 | CollisionGroups::Fruit as u32,
            ),

            CollisionGroups::Sensor => Group::from_bits_truncate(CollisionGroups::Fruit as u32),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// The collider pair if this is a collision start
    pub fn started_pair(&self) -> Option<(ColliderHandle, ColliderHandle)> {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            } => Some((collider1, collider2)),
            CollisionEvent::Stopped { .. } => None,
        }
    }
}

/// Queue for storing collision events during physics step
///
/// rapier hands events to `&self`, so the buffer sits behind a mutex.
pub struct CollisionEventQueue {
    events: Mutex<Vec<CollisionEvent>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::with_capacity(32)),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Take the buffered events, leaving the queue empty
    pub fn take(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
