// Game configuration - play field geometry, physics, timing and tiers

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::tiers::{standard_tiers, Tier, TierTable, STANDARD_STARTER_COUNT};
use crate::engine::physics::Material;

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tier table: {0}")]
    InvalidTiers(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// What to do when one collision batch holds several mergeable pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeBatchPolicy {
    /// Merge the first eligible pair and ignore the rest of the batch
    FirstPairOnly,
    /// Merge every eligible pair whose bodies still exist
    #[default]
    EveryPair,
}

/// All tunables for one game
///
/// Coordinates are screen-style: x to the right, y downward, origin top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Play field width
    pub width: f32,
    /// Play field height
    pub height: f32,
    /// Thickness of the side walls and ground
    pub wall_thickness: f32,
    /// Height at which dropped fruit spawn
    pub drop_line_y: f32,
    /// Distance below the drop line where the game-over line sits
    pub game_over_offset: f32,

    /// Downward acceleration in units/s²
    pub gravity: f32,
    pub friction: f32,
    pub restitution: f32,

    /// Wait after a drop before checking the game-over line
    pub settle_delay_secs: f32,
    /// Minimum time between two drops
    pub drop_cooldown_secs: f32,

    /// How many of the smallest tiers can be handed to the player
    pub starter_count: usize,
    pub batch_policy: MergeBatchPolicy,
    /// Fixed seed for the next-tier draw; random when absent
    pub seed: Option<u64>,
    pub tiers: Vec<Tier>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            wall_thickness: 20.0,
            drop_line_y: 100.0,
            game_over_offset: 50.0,
            gravity: 800.0,
            friction: 0.5,
            restitution: 0.4,
            settle_delay_secs: 2.0,
            drop_cooldown_secs: 0.5,
            starter_count: STANDARD_STARTER_COUNT,
            batch_policy: MergeBatchPolicy::default(),
            seed: None,
            tiers: standard_tiers(),
        }
    }
}

impl GameConfig {
    /// Load and validate a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// y coordinate of the game-over line
    pub fn game_over_line_y(&self) -> f32 {
        self.drop_line_y + self.game_over_offset
    }

    /// Surface properties shared by every fruit
    pub fn material(&self) -> Material {
        Material {
            friction: self.friction,
            restitution: self.restitution,
        }
    }

    /// Build the validated tier table
    pub fn tier_table(&self) -> Result<TierTable, ConfigError> {
        TierTable::new(self.tiers.clone(), self.starter_count)
    }

    /// Check every field; the tier table is validated too
    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = self.tier_table()?;

        positive("width", self.width)?;
        positive("height", self.height)?;
        non_negative("wall_thickness", self.wall_thickness)?;
        non_negative("game_over_offset", self.game_over_offset)?;
        non_negative("friction", self.friction)?;
        non_negative("restitution", self.restitution)?;
        non_negative("settle_delay_secs", self.settle_delay_secs)?;
        non_negative("drop_cooldown_secs", self.drop_cooldown_secs)?;

        if !self.gravity.is_finite() {
            return Err(invalid("gravity", "must be finite"));
        }

        if !(self.drop_line_y > 0.0 && self.game_over_line_y() < self.height) {
            return Err(invalid(
                "drop_line_y",
                format!(
                    "drop line {} and game-over line {} must lie inside the field height {}",
                    self.drop_line_y,
                    self.game_over_line_y(),
                    self.height
                ),
            ));
        }

        // The biggest droppable fruit must fit between the walls
        let widest = table.radius(table.starter_count() - 1) * 2.0;
        let inner = self.width - self.wall_thickness * 2.0;
        if widest > inner {
            return Err(invalid(
                "width",
                format!("inner width {inner} cannot fit a starter fruit of diameter {widest}"),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidField {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must not be negative")))
    }
}
