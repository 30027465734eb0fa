/// Game loop timing and control system
///
/// Fixed timestep for physics and game rules, variable rate for presentation.
/// Game timers (settle delay, drop cool-down) advance only on fixed steps.
use std::time::{Duration, Instant};

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the game is paused
    paused: bool,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.accumulate(frame_time)
    }

    /// Feed one frame's wall time into the accumulator
    fn accumulate(&mut self, frame_time: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop the backlog once the step cap is hit
        if updates == MAX_PHYSICS_STEPS && self.accumulator > FIXED_TIMESTEP_DURATION {
            let dropped = self.accumulator - FIXED_TIMESTEP_DURATION;
            log::debug!(
                "Slow frame ({:.1}ms): dropped {:.1}ms of simulation backlog",
                frame_time.as_secs_f64() * 1000.0,
                dropped.as_secs_f64() * 1000.0
            );
            self.accumulator = FIXED_TIMESTEP_DURATION;
        }

        updates
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert!(!game_loop.is_paused());
        assert_eq!(game_loop.accumulator, Duration::ZERO);
    }

    #[test]
    fn test_fixed_timestep_matches_duration() {
        assert_relative_eq!(
            FIXED_TIMESTEP_DURATION.as_secs_f32(),
            FIXED_TIMESTEP,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());

        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_paused_no_updates() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();

        let updates = game_loop.accumulate(Duration::from_millis(50));
        assert_eq!(updates, 0);
        assert_eq!(game_loop.accumulator, Duration::ZERO);
    }

    #[test]
    fn test_resume_discards_time() {
        let mut game_loop = GameLoop::new();
        game_loop.accumulate(Duration::from_millis(10));
        game_loop.pause();
        game_loop.resume();

        assert_eq!(game_loop.accumulator, Duration::ZERO);
        assert_eq!(game_loop.accumulate(Duration::from_millis(10)), 0);
    }

    #[test]
    fn test_update_accumulation() {
        let mut game_loop = GameLoop::new();

        assert_eq!(game_loop.accumulate(Duration::from_millis(10)), 0);
        // 10ms + 10ms crosses one step
        assert_eq!(game_loop.accumulate(Duration::from_millis(10)), 1);
        assert_eq!(game_loop.accumulate(Duration::from_millis(34)), 2);
    }

    #[test]
    fn test_max_physics_steps_limit() {
        let mut game_loop = GameLoop::new();

        // 300ms would allow 18 updates
        let updates = game_loop.accumulate(Duration::from_millis(300));
        assert_eq!(updates, MAX_PHYSICS_STEPS);
        assert_eq!(game_loop.accumulator, FIXED_TIMESTEP_DURATION);

        // The backlog is not replayed on the next short frame
        let next = game_loop.accumulate(Duration::from_millis(1));
        assert_eq!(next, 1);
    }

    #[test]
    fn test_exact_cap_keeps_remainder() {
        let mut game_loop = GameLoop::new();

        // Five steps plus a little: nothing to drop
        let updates = game_loop.accumulate(FIXED_TIMESTEP_DURATION * 5 + Duration::from_millis(3));
        assert_eq!(updates, MAX_PHYSICS_STEPS);
        assert_eq!(game_loop.accumulator, Duration::from_millis(3));
    }
}
