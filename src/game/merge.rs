// Merge engine - same-tier collisions, scoring, drops and game over

use glam::Vec2;
use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::fmt::{self, Debug};
use std::hash::Hash;

use super::config::{ConfigError, GameConfig, MergeBatchPolicy};
use super::settle::SettleChecks;
use super::state::GameState;
use super::tiers::{TierId, TierTable};
use crate::core::math::{clamp, midpoint};
use crate::engine::physics::{CircleSpec, PhysicsBackend};

/// One completed merge, handed out for sound and particle effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeEvent<H> {
    /// The two bodies that were removed
    pub consumed: [H; 2],
    pub consumed_tier: TierId,
    /// The body that replaced them
    pub produced: H,
    pub produced_tier: TierId,
    /// Midpoint where the new body spawned
    pub at: Vec2,
    pub awarded: u32,
}

impl<H: Debug> fmt::Display for MergeEvent<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Merged {:?} and {:?} (tier {}) into {:?} (tier {}) at ({:.1}, {:.1}), +{}",
            self.consumed[0],
            self.consumed[1],
            self.consumed_tier,
            self.produced,
            self.produced_tier,
            self.at.x,
            self.at.y,
            self.awarded
        )
    }
}

/// Owns the tier table and the round state; talks to physics only through
/// [`PhysicsBackend`]
///
/// A pair at the top tier is left untouched: no merge, no points, and no tier
/// id past the table is ever created.
pub struct MergeEngine<H> {
    config: GameConfig,
    tiers: TierTable,
    state: GameState,
    settle: SettleChecks<H>,
    rng: Pcg32,
    /// Seconds of simulated time seen by `advance`
    clock: f64,
}

impl<H> MergeEngine<H>
where
    H: Copy + Eq + Hash + Debug,
{
    /// Create an engine for a validated config
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let tiers = config.tier_table()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        debug!("Next-tier RNG seed: {seed}");
        let mut rng = Pcg32::seed_from_u64(seed);

        let next_tier = tiers.sample_starter(&mut rng);
        let mut engine = Self {
            state: GameState::new(next_tier, 0.0),
            config,
            tiers,
            settle: SettleChecks::new(),
            rng,
            clock: 0.0,
        };
        engine.aim(engine.config.width / 2.0);

        Ok(engine)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Game-over checks still waiting to fire
    #[cfg(test)]
    pub fn pending_checks(&self) -> usize {
        self.settle.len()
    }

    /// Allowed spawn columns for a tier: its radius plus the wall keeps it inside
    pub fn drop_range(&self, tier: TierId) -> (f32, f32) {
        let inset = self.config.wall_thickness + self.tiers.radius(tier);
        (inset, self.config.width - inset)
    }

    /// Point the dropper at a play-field x; returns the clamped column
    pub fn aim(&mut self, x: f32) -> f32 {
        let (min, max) = self.drop_range(self.state.next_tier());
        let clamped = clamp(x, min, max);
        self.state.set_drop_x(clamped);
        clamped
    }

    /// Spawn the pending tier at `x` on the drop line
    ///
    /// Does nothing once the round is over. On success the next tier is
    /// redrawn and a game-over check is scheduled for the new body.
    pub fn drop<P>(&mut self, x: f32, physics: &mut P) -> Option<H>
    where
        P: PhysicsBackend<Handle = H>,
    {
        if self.state.is_over() {
            debug!("Drop ignored: round is over");
            return None;
        }

        let tier = self.state.next_tier();
        let (min, max) = self.drop_range(tier);
        let position = Vec2::new(clamp(x, min, max), self.config.drop_line_y);

        let handle = physics.create_circle(&CircleSpec {
            radius: self.tiers.radius(tier),
            position,
            material: self.config.material(),
            tag: tier,
        });

        let next = self.tiers.sample_starter(&mut self.rng);
        self.state.set_next_tier(next);
        // Keep the aim valid for the new, possibly wider, fruit
        self.aim(self.state.drop_x());

        self.settle
            .schedule(handle, self.clock + f64::from(self.config.settle_delay_secs));

        debug!(
            "Dropped tier {} at x={:.1} ({:?}); next tier {}",
            tier, position.x, handle, next
        );

        Some(handle)
    }

    /// Resolve one batch of collision-start pairs
    ///
    /// Pairs are independent of delivery order. A pair whose bodies were
    /// consumed earlier in the batch is skipped, so no body merges twice.
    pub fn on_collisions<P>(&mut self, pairs: &[(H, H)], physics: &mut P) -> Vec<MergeEvent<H>>
    where
        P: PhysicsBackend<Handle = H>,
    {
        let mut merges = Vec::new();

        for &(a, b) in pairs {
            let Some(event) = self.try_merge(a, b, physics) else {
                continue;
            };
            merges.push(event);

            if self.config.batch_policy == MergeBatchPolicy::FirstPairOnly {
                break;
            }
        }

        merges
    }

    fn try_merge<P>(&mut self, a: H, b: H, physics: &mut P) -> Option<MergeEvent<H>>
    where
        P: PhysicsBackend<Handle = H>,
    {
        if a == b {
            return None;
        }

        // Walls and sensors carry no tag
        let tier = physics.tag(a)?;
        if physics.tag(b)? != tier {
            return None;
        }

        let Some(produced_tier) = self.tiers.successor(tier) else {
            debug!("Pair of top tier {} left in place", tier);
            return None;
        };
        let at = midpoint(physics.position(a)?, physics.position(b)?);

        physics.remove_bodies(&[a, b]);
        self.settle.cancel(a);
        self.settle.cancel(b);

        let produced = physics.create_circle(&CircleSpec {
            radius: self.tiers.radius(produced_tier),
            position: at,
            material: self.config.material(),
            tag: produced_tier,
        });

        let awarded = self
            .tiers
            .get(produced_tier)
            .map(|t| t.score_value)
            .unwrap_or(0);
        self.state.add_score(awarded);

        let event = MergeEvent {
            consumed: [a, b],
            consumed_tier: tier,
            produced,
            produced_tier,
            at,
            awarded,
        };
        debug!("{event} (score {})", self.state.score());

        Some(event)
    }

    /// Advance the engine clock and run game-over checks that fell due
    pub fn advance<P>(&mut self, dt: f32, physics: &P)
    where
        P: PhysicsBackend<Handle = H>,
    {
        self.clock += f64::from(dt);

        for body in self.settle.take_due(self.clock) {
            if self.state.is_over() {
                break;
            }

            let Some(position) = physics.position(body) else {
                debug!("Settle check skipped: {:?} no longer exists", body);
                continue;
            };

            if position.y < self.config.game_over_line_y() && self.state.mark_over() {
                info!(
                    "Game over: {:?} rests above the line at y={:.1}; final score {}",
                    body,
                    position.y,
                    self.state.score()
                );
            }
        }
    }

    /// Remove every fruit and start a fresh round
    ///
    /// Pending checks are cancelled, so a timer from the old round can never
    /// end the new one.
    pub fn reset<P>(&mut self, physics: &mut P)
    where
        P: PhysicsBackend<Handle = H>,
    {
        let fruits = physics.tagged_bodies();
        physics.remove_bodies(&fruits);
        let cancelled = self.settle.len();
        self.settle.clear();

        let next = self.tiers.sample_starter(&mut self.rng);
        let aim = self.state.drop_x();
        self.state.restart(next, aim);
        self.aim(aim);

        info!(
            "Round {} started; cleared {} fruit, cancelled {} pending checks",
            self.state.round(),
            fruits.len(),
            cancelled
        );
    }
}
