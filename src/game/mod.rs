// Game rules
//
// - `tiers`: the fruit progression
// - `state`: score, next tier, game over, aim
// - `merge`: same-tier merging, drops, game-over checks, reset
// - `settle`: deferred game-over checks
// - `dropper`: pointer mapping and drop cool-down
// - `arena`: walls and guide sensors
// - `session`: wires the above to the physics world each fixed step
// - `hud`: text presentation

pub mod arena;
pub mod config;
pub mod dropper;
pub mod hud;
pub mod merge;
pub mod session;
pub mod settle;
pub mod state;
pub mod tiers;

#[cfg(test)]
mod testing;

pub use config::GameConfig;
pub use session::Session;
