// Tier table - the ordered progression of mergeable fruits

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// Rank of a tier, also its index in the table
pub type TierId = usize;

/// One rank in the fruit progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub id: TierId,
    /// Display name
    pub name: String,
    /// Collision radius in play-field units
    pub radius: f32,
    /// Points awarded when two of the previous tier merge into this one
    pub score_value: u32,
    /// Colour used to draw the fruit
    pub color: String,
}

impl Tier {
    fn new(id: TierId, name: &str, radius: f32, score_value: u32, color: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            radius,
            score_value,
            color: color.to_string(),
        }
    }
}

/// The stock eleven-fruit progression
pub fn standard_tiers() -> Vec<Tier> {
    vec![
        Tier::new(0, "Cherry", 15.0, 1, "#FF6B6B"),
        Tier::new(1, "Strawberry", 20.0, 3, "#FF8E8E"),
        Tier::new(2, "Grape", 25.0, 6, "#9B59B6"),
        Tier::new(3, "Orange", 30.0, 10, "#F39C12"),
        Tier::new(4, "Lemon", 35.0, 15, "#F1C40F"),
        Tier::new(5, "Apple", 40.0, 21, "#E74C3C"),
        Tier::new(6, "Pear", 45.0, 28, "#27AE60"),
        Tier::new(7, "Peach", 50.0, 36, "#E67E22"),
        Tier::new(8, "Pineapple", 55.0, 45, "#F39C12"),
        Tier::new(9, "Melon", 60.0, 55, "#2ECC71"),
        Tier::new(10, "Watermelon", 70.0, 66, "#27AE60"),
    ]
}

/// How many of the smallest tiers may be handed to the player
pub const STANDARD_STARTER_COUNT: usize = 5;

/// Validated, immutable tier progression
#[derive(Debug, Clone)]
pub struct TierTable {
    tiers: Vec<Tier>,
    starter_count: usize,
}

impl TierTable {
    /// Build a table, checking ids, ordering and the starter range
    pub fn new(tiers: Vec<Tier>, starter_count: usize) -> Result<Self, ConfigError> {
        if tiers.is_empty() {
            return Err(ConfigError::InvalidTiers("tier table is empty".to_string()));
        }

        for (index, tier) in tiers.iter().enumerate() {
            if tier.id != index {
                return Err(ConfigError::InvalidTiers(format!(
                    "tier '{}' has id {} but sits at index {}",
                    tier.name, tier.id, index
                )));
            }
            if !(tier.radius > 0.0) {
                return Err(ConfigError::InvalidTiers(format!(
                    "tier '{}' has non-positive radius {}",
                    tier.name, tier.radius
                )));
            }
        }

        if let Some(pair) = tiers.windows(2).find(|w| w[1].radius <= w[0].radius) {
            return Err(ConfigError::InvalidTiers(format!(
                "radius must strictly increase: '{}' ({}) is followed by '{}' ({})",
                pair[0].name, pair[0].radius, pair[1].name, pair[1].radius
            )));
        }

        if starter_count == 0 || starter_count > tiers.len() {
            return Err(ConfigError::InvalidTiers(format!(
                "starter count {} is outside 1..={}",
                starter_count,
                tiers.len()
            )));
        }

        Ok(Self {
            tiers,
            starter_count,
        })
    }

    /// The stock table
    pub fn standard() -> Self {
        Self {
            tiers: standard_tiers(),
            starter_count: STANDARD_STARTER_COUNT,
        }
    }

    pub fn get(&self, id: TierId) -> Option<&Tier> {
        self.tiers.get(id)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn starter_count(&self) -> usize {
        self.starter_count
    }

    /// Highest tier id in the table
    pub fn max_tier(&self) -> TierId {
        self.tiers.len() - 1
    }

    /// Tier produced by merging two of `id`, `None` at the top of the table
    pub fn successor(&self, id: TierId) -> Option<TierId> {
        (id < self.max_tier()).then(|| id + 1)
    }

    /// Radius of a tier, 0 for an unknown id
    pub fn radius(&self, id: TierId) -> f32 {
        self.get(id).map(|tier| tier.radius).unwrap_or(0.0)
    }

    /// Draw the next droppable tier uniformly from the starter range
    pub fn sample_starter<R: Rng + ?Sized>(&self, rng: &mut R) -> TierId {
        rng.random_range(0..self.starter_count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.iter()
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}
