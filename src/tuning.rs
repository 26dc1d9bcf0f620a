//! Data-driven game balance
//!
//! Every gameplay number lives here so runs can be rebalanced from a JSON
//! file without touching the simulation. Durations are authored in seconds
//! or ticks as noted; the simulation only ever sees ticks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::secs_to_ticks;

/// Gameplay balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Monsters ===
    /// Health of a freshly spawned monster
    pub monster_health: f32,
    /// Per-tick probability of a random lateral impulse
    pub monster_wander_chance: f64,
    /// Full width of the wander impulse (centered on zero)
    pub monster_wander_impulse: f32,
    /// Horizontal speed cap right after a wander impulse
    pub monster_wander_max_vx: f32,
    /// Speed factor of an unhurt monster
    pub monster_base_speed: f32,
    /// Extra speed factor reached as health runs out
    pub monster_wounded_bonus_max: f32,
    /// Horizontal acceleration toward the everstone (per tick, before speed factor)
    pub monster_seek_accel: f32,
    /// Horizontal speed cap (pixels per tick)
    pub monster_max_vx: f32,
    /// Vertical velocity toward the everstone (pixels per tick)
    pub monster_vertical_seek: f32,
    /// Vertical speed cap (pixels per tick)
    pub monster_max_vy: f32,

    // === Digging ===
    /// Look-ahead distance for the blocking probe
    pub dig_probe: f32,
    /// Ticks of contact before a dig lands
    pub dig_threshold_ticks: u32,
    /// Damage dealt to the blocking block per dig
    pub dig_damage: i32,

    // === Arena ===
    /// Horizontal clamp inset from the arena edges
    pub arena_inset_x: f32,
    /// Vertical clamp inset from the arena top
    pub arena_inset_top: f32,
    /// Vertical clamp inset from the arena bottom
    pub arena_inset_bottom: f32,

    // === Everstone ===
    /// Distance beyond the everstone radius at which monsters drain it
    pub everstone_contact_margin: f32,
    /// Health drained per adjacent monster per tick
    pub everstone_drain: f32,

    // === Spawning ===
    /// Horizontal distance of the spawn points from the side walls
    pub spawn_edge_offset: f32,
    /// Topmost spawn height
    pub spawn_top: f32,
    /// Fraction of the arena height used as spawn band below `spawn_top`
    pub spawn_band_fraction: f32,
    /// Spawn interval at the start of a run (seconds)
    pub spawn_base_secs: f32,
    /// Lower bound of the un-jittered spawn interval (seconds)
    pub spawn_floor_secs: f32,
    /// Survival seconds per one-second reduction of the interval
    pub spawn_ramp_secs: f32,
    pub spawn_jitter_min: f32,
    pub spawn_jitter_max: f32,

    // === Turrets ===
    /// Shots per second
    pub turret_rate: f32,
    pub turret_range: f32,
    pub turret_damage: f32,

    // === Traps ===
    pub trap_radius: f32,
    /// Extra reach added to the trap radius when testing monsters
    pub trap_margin: f32,
    pub trap_stun_ticks: u32,
    pub trap_cooldown_ticks: u32,

    // === Bombs ===
    pub bomb_fuse_ticks: u32,
    pub bomb_monster_radius: f32,
    pub bomb_monster_damage: f32,
    /// Blast radius for blocks (to block center) and the everstone
    pub bomb_block_radius: f32,
    pub bomb_block_damage: i32,
    pub bomb_everstone_damage: f32,

    // === Conveyors ===
    /// Horizontal velocity added per tick on a conveyor
    pub conveyor_push: f32,

    // === Welder ===
    /// Health cap for repaired blocks
    pub block_repair_cap: i32,
    /// Distance beyond the everstone radius within which the welder heals it
    pub everstone_repair_reach: f32,
    pub everstone_repair_amount: f32,

    // === Cleanup ===
    /// Blocks this thin (or thinner) on either axis are purged
    pub degenerate_block_extent: f32,
    pub purge_interval_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            monster_health: 20.0,
            monster_wander_chance: 0.01,
            monster_wander_impulse: 0.6,
            monster_wander_max_vx: 1.8,
            monster_base_speed: 0.6,
            monster_wounded_bonus_max: 1.2,
            monster_seek_accel: 0.05,
            monster_max_vx: 2.0,
            monster_vertical_seek: 0.02,
            monster_max_vy: 1.2,

            dig_probe: 8.0,
            dig_threshold_ticks: 45,
            dig_damage: 8,

            arena_inset_x: 10.0,
            arena_inset_top: 40.0,
            arena_inset_bottom: 10.0,

            everstone_contact_margin: 10.0,
            everstone_drain: 0.08,

            spawn_edge_offset: 80.0,
            spawn_top: 60.0,
            spawn_band_fraction: 1.0 / 3.0,
            spawn_base_secs: 30.0,
            spawn_floor_secs: 10.0,
            spawn_ramp_secs: 20.0,
            spawn_jitter_min: 0.7,
            spawn_jitter_max: 1.3,

            turret_rate: 0.25,
            turret_range: 300.0,
            turret_damage: 8.0,

            trap_radius: 28.0,
            trap_margin: 8.0,
            trap_stun_ticks: 90,
            trap_cooldown_ticks: 240,

            bomb_fuse_ticks: 60,
            bomb_monster_radius: 90.0,
            bomb_monster_damage: 30.0,
            bomb_block_radius: 120.0,
            bomb_block_damage: 80,
            bomb_everstone_damage: 25.0,

            conveyor_push: 0.8,

            block_repair_cap: 200,
            everstone_repair_reach: 40.0,
            everstone_repair_amount: 15.0,

            degenerate_block_extent: 4.0,
            purge_interval_ticks: 180,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidTuning(msg.to_string()));

        if !(0.0..=1.0).contains(&self.monster_wander_chance) {
            return invalid("monster_wander_chance must be within [0, 1]");
        }
        if !(self.monster_wounded_bonus_max >= 0.0) {
            return invalid("monster_wounded_bonus_max must not be negative");
        }
        if !(self.monster_max_vx >= 0.0
            && self.monster_max_vy >= 0.0
            && self.monster_wander_max_vx >= 0.0)
        {
            return invalid("monster speed caps must not be negative");
        }
        if !(self.turret_rate.is_finite() && self.turret_rate >= 0.0) {
            return invalid("turret_rate must be finite and not negative");
        }
        if !(self.spawn_jitter_min > 0.0 && self.spawn_jitter_min <= self.spawn_jitter_max) {
            return invalid("spawn jitter needs 0 < spawn_jitter_min <= spawn_jitter_max");
        }
        if !(self.spawn_floor_secs > 0.0 && self.spawn_floor_secs <= self.spawn_base_secs) {
            return invalid("spawn intervals need 0 < spawn_floor_secs <= spawn_base_secs");
        }
        if self.block_repair_cap <= 0 {
            return invalid("block_repair_cap must be positive");
        }
        Ok(())
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Ticks between shots for a turret firing `rate` shots per second
    pub fn reload_ticks(rate: f32) -> u32 {
        if rate <= 0.0 {
            return u32::MAX;
        }
        secs_to_ticks(1.0 / rate).max(1)
    }
}
