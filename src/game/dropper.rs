// Drop controller - pointer to play-field mapping and drop cool-down

use log::debug;
use std::fmt::Debug;
use std::hash::Hash;

use super::merge::MergeEngine;
use crate::engine::physics::PhysicsBackend;

/// Turns pointer motion and clicks into aim and drop commands
#[derive(Debug, Clone)]
pub struct DropController {
    /// Width of the view the pointer coordinates are measured in
    view_width: f32,
    cooldown_secs: f32,
    cooldown_remaining: f32,
}

impl DropController {
    pub fn new(cooldown_secs: f32, view_width: f32) -> Self {
        Self {
            view_width,
            cooldown_secs,
            cooldown_remaining: 0.0,
        }
    }

    /// Track a resized view
    pub fn set_view_width(&mut self, view_width: f32) {
        self.view_width = view_width;
    }

    /// Convert a view x into play-field units
    pub fn to_field_x(&self, raw_x: f32, field_width: f32) -> f32 {
        if self.view_width > 0.0 {
            raw_x / self.view_width * field_width
        } else {
            raw_x
        }
    }

    /// Aim the engine at the pointer; returns the published, clamped column
    pub fn pointer_moved<H>(&self, raw_x: f32, engine: &mut MergeEngine<H>) -> f32
    where
        H: Copy + Eq + Hash + Debug,
    {
        let field_x = self.to_field_x(raw_x, engine.config().width);
        engine.aim(field_x)
    }

    /// Drop at the current aim unless cooling down or the round is over
    pub fn activate<H, P>(&mut self, engine: &mut MergeEngine<H>, physics: &mut P) -> Option<H>
    where
        H: Copy + Eq + Hash + Debug,
        P: PhysicsBackend<Handle = H>,
    {
        if self.is_cooling_down() {
            debug!(
                "Drop ignored: cooling down for {:.2}s",
                self.cooldown_remaining
            );
            return None;
        }
        if engine.state().is_over() {
            return None;
        }

        let handle = engine.drop(engine.state().drop_x(), physics)?;
        self.cooldown_remaining = self.cooldown_secs;
        Some(handle)
    }

    /// Run the cool-down timer
    pub fn advance(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooldown_remaining > 0.0
    }

    /// Forget any running cool-down
    pub fn reset(&mut self) {
        self.cooldown_remaining = 0.0;
    }
}
