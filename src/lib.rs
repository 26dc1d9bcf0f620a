//! Underwell Pit - a destructible-block tower defence sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (monsters, defences, damage, game over)
//! - `game`: Run session driving the simulation from real time and commands
//! - `tuning`: Data-driven game balance
//! - `highscores`: Best survival time persistence

pub mod error;
pub mod game;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use game::{Game, Hud};
pub use highscores::BestTime;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical ticks per simulated second
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / TICK_RATE as f64;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Health value marking an indestructible wall block
    pub const WALL_HEALTH: i32 = 999;

    /// Default arena dimensions for headless runs
    pub const DEFAULT_ARENA_WIDTH: f32 = 960.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 640.0;
}

/// Convert a duration in seconds to whole ticks (rounded to nearest)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs.max(0.0) * consts::TICK_RATE as f32).round() as u32
}

/// Convert a tick count to seconds
#[inline]
pub fn ticks_to_secs(ticks: u64) -> f32 {
    (ticks as f64 / consts::TICK_RATE as f64) as f32
}

/// Sign of `v` with `0.0` for zero (unlike `f32::signum`)
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
