// Session - one play field wired to the rapier world

use super::arena::Arena;
use super::config::{ConfigError, GameConfig};
use super::dropper::DropController;
use super::merge::{MergeEngine, MergeEvent};
use super::state::GameState;
use super::tiers::TierTable;
use crate::engine::physics::{PhysicsBackend, PhysicsWorld, RigidBodyHandle};

/// Everything needed to play: physics, rules, input mapping and fixtures
pub struct Session {
    physics: PhysicsWorld,
    engine: MergeEngine<RigidBodyHandle>,
    dropper: DropController,
    arena: Arena,
}

impl Session {
    /// Build a session for a view of the given pixel width
    pub fn new(config: GameConfig, view_width: f32) -> Result<Self, ConfigError> {
        let mut physics = PhysicsWorld::with_gravity(config.gravity);
        let arena = Arena::build(&mut physics, &config);
        let dropper = DropController::new(config.drop_cooldown_secs, view_width);
        let engine = MergeEngine::new(config)?;

        let mut session = Self {
            physics,
            engine,
            dropper,
            arena,
        };
        session.sync_guide();

        Ok(session)
    }

    /// Run one fixed step: physics, merges, timers
    pub fn fixed_update(&mut self, dt: f32) -> Vec<MergeEvent<RigidBodyHandle>> {
        self.physics.step();

        let batch = self.physics.drain_collision_starts();
        let merges = self.engine.on_collisions(&batch, &mut self.physics);

        self.engine.advance(dt, &self.physics);
        self.dropper.advance(dt);

        merges
    }

    /// Pointer moved to `raw_x` view pixels
    pub fn pointer_moved(&mut self, raw_x: f32) {
        self.dropper.pointer_moved(raw_x, &mut self.engine);
        self.sync_guide();
    }

    /// Player asked to drop; returns whether a fruit was released
    pub fn activate(&mut self) -> bool {
        let dropped = self
            .dropper
            .activate(&mut self.engine, &mut self.physics)
            .is_some();
        if dropped {
            self.sync_guide();
        }
        dropped
    }

    /// Clear the field and start over
    pub fn restart(&mut self) {
        self.engine.reset(&mut self.physics);
        self.dropper.reset();
        self.sync_guide();
    }

    pub fn set_view_width(&mut self, view_width: f32) {
        self.dropper.set_view_width(view_width);
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn tiers(&self) -> &TierTable {
        self.engine.tiers()
    }

    #[cfg(test)]
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    fn sync_guide(&mut self) {
        let drop_line_y = self.engine.config().drop_line_y;
        self.arena
            .follow_aim(&mut self.physics, self.engine.state().drop_x(), drop_line_y);
    }
}
