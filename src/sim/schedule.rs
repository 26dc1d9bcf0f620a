//! Survival timer and difficulty ramp
//!
//! Spawn intervals shrink by one second for every `spawn_ramp_secs` survived,
//! down to `spawn_floor_secs`, then get a random jitter so waves never fall
//! into a perfectly periodic rhythm.

use rand::Rng;

use super::state::World;
use crate::secs_to_ticks;
use crate::tuning::Tuning;

/// Un-jittered spawn interval in seconds for a given survival time
pub fn base_interval_secs(elapsed_secs: f32, tuning: &Tuning) -> f32 {
    let ramp = if tuning.spawn_ramp_secs > 0.0 {
        (elapsed_secs / tuning.spawn_ramp_secs).floor()
    } else {
        0.0
    };
    (tuning.spawn_base_secs - ramp).max(tuning.spawn_floor_secs)
}

/// Draw the next spawn interval in ticks
pub fn next_interval_ticks<R: Rng>(elapsed_secs: f32, rng: &mut R, tuning: &Tuning) -> u32 {
    let jitter = if tuning.spawn_jitter_min < tuning.spawn_jitter_max {
        rng.random_range(tuning.spawn_jitter_min..=tuning.spawn_jitter_max)
    } else {
        tuning.spawn_jitter_min
    };
    secs_to_ticks(base_interval_secs(elapsed_secs, tuning) * jitter).max(1)
}

/// Advance the survival clock by one tick.
///
/// Returns `true` when the spawn countdown ran out this tick; the countdown
/// is already re-armed from the pre-tick survival time.
pub fn advance<R: Rng>(world: &mut World, rng: &mut R, tuning: &Tuning) -> bool {
    if !world.is_running() {
        return false;
    }

    world.spawn_countdown = world.spawn_countdown.saturating_sub(1);
    let spawn = world.spawn_countdown == 0;
    if spawn {
        world.spawn_countdown = next_interval_ticks(world.elapsed_secs(), rng, tuning);
    }

    world.elapsed_ticks += 1;
    spawn
}
