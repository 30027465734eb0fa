// Static play-field fixtures: ground, side walls and guide sensors

use glam::Vec2;

use super::config::GameConfig;
use crate::engine::physics::{body::presets, PhysicsWorld, RigidBodyHandle};

/// Width of the game-over line inset from each side
const LINE_INSET: f32 = 20.0;

/// Size of the drop guide marker
const GUIDE_SIZE: Vec2 = Vec2::new(2.0, 20.0);

/// Handles to the untagged fixtures of a play field
#[derive(Debug, Clone, Copy)]
pub struct Arena {
    pub ground: RigidBodyHandle,
    pub left_wall: RigidBodyHandle,
    pub right_wall: RigidBodyHandle,
    pub game_over_line: RigidBodyHandle,
    pub drop_guide: RigidBodyHandle,
}

impl Arena {
    /// Add the fixtures to the world
    pub fn build(physics: &mut PhysicsWorld, config: &GameConfig) -> Self {
        let (width, height, wall) = (config.width, config.height, config.wall_thickness);

        let ground = add_wall(
            physics,
            Vec2::new(width / 2.0, height - wall / 2.0),
            Vec2::new(width, wall),
        );
        let left_wall = add_wall(
            physics,
            Vec2::new(wall / 2.0, height / 2.0),
            Vec2::new(wall, height),
        );
        let right_wall = add_wall(
            physics,
            Vec2::new(width - wall / 2.0, height / 2.0),
            Vec2::new(wall, height),
        );

        let game_over_line = add_sensor(
            physics,
            Vec2::new(width / 2.0, config.game_over_line_y()),
            Vec2::new(width - LINE_INSET * 2.0, 2.0),
        );
        let drop_guide = add_sensor(
            physics,
            Vec2::new(width / 2.0, config.drop_line_y),
            GUIDE_SIZE,
        );

        Self {
            ground,
            left_wall,
            right_wall,
            game_over_line,
            drop_guide,
        }
    }

    /// Slide the drop guide to the current aim
    pub fn follow_aim(&self, physics: &mut PhysicsWorld, drop_x: f32, drop_line_y: f32) {
        physics.set_translation(self.drop_guide, Vec2::new(drop_x, drop_line_y));
    }
}

fn add_wall(physics: &mut PhysicsWorld, center: Vec2, size: Vec2) -> RigidBodyHandle {
    let handle = physics.add_rigid_body(presets::wall_body(center.x, center.y));
    physics.add_collider(presets::wall_collider(size.x, size.y), handle);
    handle
}

fn add_sensor(physics: &mut PhysicsWorld, center: Vec2, size: Vec2) -> RigidBodyHandle {
    let handle = physics.add_rigid_body(presets::wall_body(center.x, center.y));
    physics.add_collider(presets::sensor_collider(size.x, size.y), handle);
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::PhysicsBackend;

    #[test]
    fn test_fixtures_are_untagged() {
        let mut physics = PhysicsWorld::new();
        let arena = Arena::build(&mut physics, &GameConfig::default());

        assert_eq!(physics.body_count(), 5);
        assert!(physics.tagged_bodies().is_empty());
        assert_eq!(physics.tag(arena.ground), None);
    }

    #[test]
    fn test_fixture_positions() {
        let mut physics = PhysicsWorld::new();
        let arena = Arena::build(&mut physics, &GameConfig::default());

        assert_eq!(physics.position(arena.ground), Some(Vec2::new(400.0, 590.0)));
        assert_eq!(physics.position(arena.left_wall), Some(Vec2::new(10.0, 300.0)));
        assert_eq!(physics.position(arena.right_wall), Some(Vec2::new(790.0, 300.0)));
        assert_eq!(
            physics.position(arena.game_over_line),
            Some(Vec2::new(400.0, 150.0))
        );
    }

    #[test]
    fn test_guide_follows_aim() {
        let mut physics = PhysicsWorld::new();
        let arena = Arena::build(&mut physics, &GameConfig::default());

        arena.follow_aim(&mut physics, 123.0, 100.0);
        assert_eq!(
            physics.position(arena.drop_guide),
            Some(Vec2::new(123.0, 100.0))
        );
    }
}
