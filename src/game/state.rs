// Per-round game state, read by the presentation layer

use super::tiers::TierId;

/// Score, next tier, terminal flag and aim column for the current round
///
/// Only the merge engine mutates this; everything else gets read access.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    score: u64,
    next_tier: TierId,
    is_over: bool,
    drop_x: f32,
    round: u32,
}

impl GameState {
    pub(super) fn new(next_tier: TierId, drop_x: f32) -> Self {
        Self {
            score: 0,
            next_tier,
            is_over: false,
            drop_x,
            round: 1,
        }
    }

    /// Points earned this round
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Tier the next drop will spawn
    pub fn next_tier(&self) -> TierId {
        self.next_tier
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Clamped column the next fruit will spawn in
    pub fn drop_x(&self) -> f32 {
        self.drop_x
    }

    /// 1-based round counter, bumped by every reset
    pub fn round(&self) -> u32 {
        self.round
    }

    pub(super) fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(u64::from(points));
    }

    pub(super) fn set_next_tier(&mut self, tier: TierId) {
        self.next_tier = tier;
    }

    pub(super) fn set_drop_x(&mut self, x: f32) {
        self.drop_x = x;
    }

    /// Returns true only on the transition into the game-over state
    pub(super) fn mark_over(&mut self) -> bool {
        let newly_over = !self.is_over;
        self.is_over = true;
        newly_over
    }

    /// Start the next round
    pub(super) fn restart(&mut self, next_tier: TierId, drop_x: f32) {
        *self = Self {
            round: self.round + 1,
            ..Self::new(next_tier, drop_x)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round() {
        let state = GameState::new(2, 400.0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.next_tier(), 2);
        assert!(!state.is_over());
        assert_eq!(state.drop_x(), 400.0);
        assert_eq!(state.round(), 1);
    }

    #[test]
    fn test_mark_over_once() {
        let mut state = GameState::new(0, 400.0);
        assert!(state.mark_over());
        assert!(!state.mark_over());
        assert!(state.is_over());
    }

    #[test]
    fn test_restart_clears_round() {
        let mut state = GameState::new(0, 400.0);
        state.add_score(36);
        state.mark_over();

        state.restart(3, 250.0);
        assert_eq!(state.score(), 0);
        assert!(!state.is_over());
        assert_eq!(state.next_tier(), 3);
        assert_eq!(state.drop_x(), 250.0);
        assert_eq!(state.round(), 2);
    }

    #[test]
    fn test_score_accumulates() {
        let mut state = GameState::new(0, 400.0);
        state.add_score(3);
        state.add_score(6);
        assert_eq!(state.score(), 9);
    }
}
