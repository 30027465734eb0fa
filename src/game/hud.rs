// Text presentation of the game state

use super::merge::MergeEvent;
use super::state::GameState;
use super::tiers::{TierId, TierTable};

const TITLE: &str = "Fruit Merge";

/// Largest tier produced by a merge this round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestTier(Option<TierId>);

impl BestTier {
    /// Fold in one merge; returns the tier if it is a new best
    pub fn record<H>(&mut self, merge: &MergeEvent<H>) -> Option<TierId> {
        if self.0.is_some_and(|best| best >= merge.produced_tier) {
            return None;
        }
        self.0 = Some(merge.produced_tier);
        self.0
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }
}

fn tier_name(tiers: &TierTable, id: TierId) -> &str {
    tiers.get(id).map(|tier| tier.name.as_str()).unwrap_or("?")
}

/// Window title for the current state
pub fn title(state: &GameState, tiers: &TierTable, best: BestTier, paused: bool) -> String {
    let best = best
        .0
        .map(|id| format!(" | Best: {}", tier_name(tiers, id)))
        .unwrap_or_default();

    if state.is_over() {
        return format!(
            "{TITLE} | GAME OVER | Final score: {}{best} | Press R to play again",
            state.score()
        );
    }

    let next = tier_name(tiers, state.next_tier());
    let paused = if paused { " | Paused" } else { "" };

    format!(
        "{TITLE} | Score: {} | Next: {next}{best}{paused}",
        state.score()
    )
}

/// The merge progression, smallest first
pub fn evolution(tiers: &TierTable) -> String {
    tiers
        .iter()
        .map(|tier| tier.name.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn merge_into(produced_tier: TierId) -> MergeEvent<u32> {
        MergeEvent {
            consumed: [0, 1],
            consumed_tier: produced_tier - 1,
            produced: 2,
            produced_tier,
            at: Vec2::ZERO,
            awarded: 0,
        }
    }

    #[test]
    fn test_title_in_play() {
        let tiers = TierTable::standard();
        let mut state = GameState::new(2, 400.0);
        state.add_score(9);

        assert_eq!(
            title(&state, &tiers, BestTier::default(), false),
            "Fruit Merge | Score: 9 | Next: Grape"
        );
        assert!(title(&state, &tiers, BestTier::default(), true).ends_with(" | Paused"));
    }

    #[test]
    fn test_title_shows_best_tier() {
        let tiers = TierTable::standard();
        let state = GameState::new(0, 400.0);
        let mut best = BestTier::default();
        best.record(&merge_into(3));

        assert_eq!(
            title(&state, &tiers, best, false),
            "Fruit Merge | Score: 0 | Next: Cherry | Best: Orange"
        );
    }

    #[test]
    fn test_title_game_over() {
        let tiers = TierTable::standard();
        let mut state = GameState::new(0, 400.0);
        state.add_score(21);
        state.mark_over();

        assert_eq!(
            title(&state, &tiers, BestTier::default(), false),
            "Fruit Merge | GAME OVER | Final score: 21 | Press R to play again"
        );
    }

    #[test]
    fn test_best_tier_only_moves_up() {
        let mut best = BestTier::default();

        assert_eq!(best.record(&merge_into(2)), Some(2));
        assert_eq!(best.record(&merge_into(1)), None);
        assert_eq!(best.record(&merge_into(2)), None);
        assert_eq!(best.record(&merge_into(5)), Some(5));

        best.clear();
        assert_eq!(best, BestTier::default());
        assert_eq!(best.record(&merge_into(1)), Some(1));
    }

    #[test]
    fn test_evolution() {
        let line = evolution(&TierTable::standard());
        assert!(line.starts_with("Cherry -> Strawberry"));
        assert!(line.ends_with("Melon -> Watermelon"));
    }
}
