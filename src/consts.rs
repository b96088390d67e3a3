//! Fixed tuning values for the simulation and the terminal front end.

use std::time::Duration;

/// Simulation ticks per second
pub const FPS: u32 = 60;

/// Travel speed in arena units per second
pub const LOW_SPEED: f64 = 100.0;
pub const HIGH_SPEED: f64 = 300.0;

pub const BODY_WIDTH: f64 = 10.0;
pub const HALF_BODY_WIDTH: f64 = BODY_WIDTH / 2.0;

/// Pickup distance between head and food, also their drawn radius
pub const FOOD_RADIUS: f64 = 10.0;
/// Length gained per food
pub const PER_FOOD_INCRE: f64 = 20.0;
pub const INIT_LEN: f64 = 100.0;

pub const ARENA_WIDTH: f64 = 600.0;
pub const ARENA_HEIGHT: f64 = 400.0;

pub const LOG_FILE: &str = "snekline.log";

/// How long a speed-key press counts as held when the terminal never
/// reports the release. Longer than the usual key-repeat delay.
pub const SPEED_HOLD_TIMEOUT: Duration = Duration::from_millis(550);

pub fn tick_interval() -> Duration {
    Duration::from_secs(1) / FPS
}
