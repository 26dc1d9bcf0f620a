//! Monster spawning, steering and digging
//!
//! Monsters walk toward the everstone, mostly horizontally, and chew through
//! any destructible block standing in their way. Velocities are in pixels
//! per tick.

use glam::Vec2;
use rand::Rng;

use super::state::{Block, Conveyor, Everstone, GameEvent, Monster, World};
use crate::sign;
use crate::tuning::Tuning;

/// Distance below which the everstone direction is treated as undefined
const MIN_SEEK_DISTANCE: f32 = 1e-4;

/// Spawn a monster at the mouth of the left or right tunnel
pub fn spawn_monster<R: Rng>(world: &mut World, rng: &mut R, tuning: &Tuning) -> (u32, Vec2) {
    let x = if rng.random_bool(0.5) {
        tuning.spawn_edge_offset
    } else {
        world.width - tuning.spawn_edge_offset
    };
    let y = tuning.spawn_top + rng.random::<f32>() * world.height * tuning.spawn_band_fraction;
    let pos = Vec2::new(x, y);
    let id = world.add_monster(pos, tuning.monster_health);
    log::debug!("Monster {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
    (id, pos)
}

/// Advance every living monster by one tick
pub fn update_monsters<R: Rng>(
    world: &mut World,
    rng: &mut R,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let (width, height) = (world.width, world.height);

    for monster in world.monsters.iter_mut() {
        if !monster.is_alive() {
            continue;
        }

        if monster.is_stunned() {
            monster.stunned -= 1;
            monster.vel = Vec2::ZERO;
            continue;
        }

        steer(monster, world.everstone.pos, rng, tuning);
        dig(monster, &mut world.blocks, tuning, events);
        apply_conveyors(monster, &world.conveyors, tuning);
        integrate(monster, width, height, tuning);
        drain_everstone(monster, &mut world.everstone, tuning);
    }
}

/// Wander, then bias velocity toward the target
fn steer<R: Rng>(monster: &mut Monster, target: Vec2, rng: &mut R, tuning: &Tuning) {
    let to_target = target - monster.pos;
    let dist = to_target.length();
    let dir = if dist > MIN_SEEK_DISTANCE {
        to_target / dist
    } else {
        Vec2::ZERO
    };

    if rng.random_bool(tuning.monster_wander_chance.clamp(0.0, 1.0)) {
        let impulse = (rng.random::<f32>() - 0.5) * tuning.monster_wander_impulse;
        monster.vel.x = clamp_abs(monster.vel.x + impulse, tuning.monster_wander_max_vx);
    }

    let speed = tuning.monster_base_speed + wound_bonus(monster.health, tuning);
    monster.vel.x = clamp_abs(
        monster.vel.x + dir.x * tuning.monster_seek_accel * speed,
        tuning.monster_max_vx,
    );
    monster.vel.y = clamp_abs(dir.y * tuning.monster_vertical_seek, tuning.monster_max_vy);
}

/// Extra speed factor for a wounded monster
fn wound_bonus(health: f32, tuning: &Tuning) -> f32 {
    if tuning.monster_health <= 0.0 {
        return 0.0;
    }
    ((tuning.monster_health - health) / tuning.monster_health)
        .min(tuning.monster_wounded_bonus_max)
        .max(0.0)
}

/// Probe one step ahead; a destructible block there stops the monster and
/// slowly gets chewed through.
fn dig(monster: &mut Monster, blocks: &mut Vec<Block>, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let probe = Vec2::new(
        monster.pos.x + sign(monster.vel.x) * tuning.dig_probe,
        monster.pos.y,
    );
    let Some(index) = blocks
        .iter()
        .rposition(|b| !b.is_wall() && b.contains(probe))
    else {
        return;
    };

    monster.dig_progress += 1;
    if monster.dig_progress > tuning.dig_threshold_ticks {
        monster.dig_progress = 0;
        let block = &mut blocks[index];
        block.health -= tuning.dig_damage;
        if block.health <= 0 {
            let removed = blocks.remove(index);
            log::debug!("Monster {} dug through block {}", monster.id, removed.id);
            events.push(GameEvent::BlockDestroyed { id: removed.id });
        }
    }
    monster.vel.x = 0.0;
}

fn apply_conveyors(monster: &mut Monster, conveyors: &[Conveyor], tuning: &Tuning) {
    for conveyor in conveyors {
        if conveyor.contains(monster.pos) {
            monster.vel.x += conveyor.dir.sign() * tuning.conveyor_push;
        }
    }
}

/// Move by velocity and keep inside the playfield
fn integrate(monster: &mut Monster, width: f32, height: f32, tuning: &Tuning) {
    monster.pos += monster.vel;
    monster.pos.x = monster
        .pos
        .x
        .min(width - tuning.arena_inset_x)
        .max(tuning.arena_inset_x);
    monster.pos.y = monster
        .pos
        .y
        .min(height - tuning.arena_inset_bottom)
        .max(tuning.arena_inset_top);
}

fn drain_everstone(monster: &Monster, everstone: &mut Everstone, tuning: &Tuning) {
    if monster.pos.distance(everstone.pos) < everstone.radius + tuning.everstone_contact_margin {
        everstone.health -= tuning.everstone_drain;
    }
}

#[inline]
fn clamp_abs(v: f32, limit: f32) -> f32 {
    v.min(limit).max(-limit)
}
