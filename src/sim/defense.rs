//! Player defences: hitscan turrets, shock traps and timed bombs
//!
//! All timers count whole ticks. Damage is applied immediately; monsters
//! killed here are swept up by the lifecycle pass at the end of the tick.

use super::state::{Bomb, GameEvent, World};
use super::store::{monsters_in_circle, nearest_monster_within};
use crate::tuning::Tuning;

/// Cool down every turret and fire at the nearest monster in range
pub fn update_turrets(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for turret in world.turrets.iter_mut() {
        turret.cooldown = turret.cooldown.saturating_sub(1);
        if turret.cooldown > 0 {
            continue;
        }

        let Some(index) = nearest_monster_within(&world.monsters, turret.pos, tuning.turret_range)
        else {
            continue;
        };

        let monster = &mut world.monsters[index];
        monster.health -= tuning.turret_damage;
        turret.cooldown = Tuning::reload_ticks(turret.rate);
        events.push(GameEvent::TurretFired {
            turret: turret.id,
            monster: monster.id,
        });
    }
}

/// Re-arm traps and stun monsters that wander into an armed one.
///
/// An armed trap stuns every monster in reach during the tick it fires;
/// the single cooldown only engages afterwards.
pub fn update_traps(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for trap in world.traps.iter_mut() {
        if trap.cooldown > 0 {
            trap.cooldown -= 1;
        }
        if !trap.is_armed() {
            continue;
        }

        let reach = trap.radius + tuning.trap_margin;
        let mut stunned = 0;
        for monster in world.monsters.iter_mut() {
            if monster.is_alive() && monster.pos.distance(trap.pos) < reach {
                monster.stunned = tuning.trap_stun_ticks;
                stunned += 1;
            }
        }

        if stunned > 0 {
            trap.cooldown = tuning.trap_cooldown_ticks;
            events.push(GameEvent::TrapTriggered {
                trap: trap.id,
                stunned,
            });
        }
    }
}

/// Burn bomb fuses and detonate the ones that run out
pub fn update_bombs(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for i in (0..world.bombs.len()).rev() {
        let bomb = &mut world.bombs[i];
        bomb.fuse = bomb.fuse.saturating_sub(1);
        if bomb.fuse > 0 {
            continue;
        }

        let bomb = world.bombs.remove(i);
        detonate(world, &bomb, tuning, events);
    }
}

fn detonate(world: &mut World, bomb: &Bomb, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    log::debug!("Bomb {} detonated at ({:.0}, {:.0})", bomb.id, bomb.pos.x, bomb.pos.y);
    events.push(GameEvent::BombDetonated {
        id: bomb.id,
        pos: bomb.pos,
    });

    let hits: Vec<usize> =
        monsters_in_circle(&world.monsters, bomb.pos, tuning.bomb_monster_radius).collect();
    for index in hits {
        world.monsters[index].health -= tuning.bomb_monster_damage;
    }

    for j in (0..world.blocks.len()).rev() {
        let block = &mut world.blocks[j];
        if block.is_wall() || block.center().distance(bomb.pos) >= tuning.bomb_block_radius {
            continue;
        }
        block.health -= tuning.bomb_block_damage;
        if block.health <= 0 {
            let removed = world.blocks.remove(j);
            events.push(GameEvent::BlockDestroyed { id: removed.id });
        }
    }

    if world.everstone.pos.distance(bomb.pos) < tuning.bomb_block_radius {
        world.everstone.health -= tuning.bomb_everstone_damage;
    }
}
