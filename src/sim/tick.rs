//! Fixed timestep simulation tick
//!
//! One logical tick runs the systems in a fixed order: survival clock and
//! spawning, defences, monsters, then cleanup and the game over check.

use rand::Rng;

use super::state::{GameEvent, World};
use super::{defense, lifecycle, monster, schedule};
use crate::tuning::Tuning;

/// Advance the world by one tick. Does nothing unless the run is active.
pub fn tick<R: Rng>(world: &mut World, rng: &mut R, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if !world.is_running() {
        return;
    }

    if schedule::advance(world, rng, tuning) {
        let (id, pos) = monster::spawn_monster(world, rng, tuning);
        events.push(GameEvent::MonsterSpawned { id, pos });
    }

    defense::update_turrets(world, tuning, events);
    defense::update_traps(world, tuning, events);
    defense::update_bombs(world, tuning, events);

    monster::update_monsters(world, rng, tuning, events);

    lifecycle::resolve(world, tuning, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::init_level;
    use crate::sim::state::GamePhase;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn started(seed: u64) -> (World, Pcg32) {
        let mut world = init_level(960.0, 640.0);
        world.phase = GamePhase::Running;
        (world, Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn first_tick_spawns_a_monster() {
        let tuning = Tuning::default();
        let (mut world, mut rng) = started(5);
        let mut events = Vec::new();

        tick(&mut world, &mut rng, &tuning, &mut events);

        assert_eq!(world.monsters.len(), 1);
        assert!(matches!(events[0], GameEvent::MonsterSpawned { .. }));
        assert_eq!(world.elapsed_ticks, 1);
    }

    #[test]
    fn ready_world_does_not_tick() {
        let tuning = Tuning::default();
        let mut world = init_level(960.0, 640.0);
        let before = world.clone();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut events = Vec::new();

        for _ in 0..100 {
            tick(&mut world, &mut rng, &tuning, &mut events);
        }
        assert_eq!(world, before);
        assert!(events.is_empty());
    }

    #[test]
    fn monster_killed_by_turret_is_gone_by_end_of_tick() {
        let tuning = Tuning::default();
        let (mut world, mut rng) = started(5);
        world.spawn_countdown = 10_000;
        let turret = world.add_turret(Vec2::new(200.0, 200.0), tuning.turret_rate);
        let victim = world.add_monster(Vec2::new(220.0, 200.0), 5.0);
        let mut events = Vec::new();

        tick(&mut world, &mut rng, &tuning, &mut events);

        assert!(world.monster(victim).is_none());
        assert_eq!(
            events,
            vec![
                GameEvent::TurretFired {
                    turret,
                    monster: victim
                },
                GameEvent::MonsterKilled { id: victim },
            ]
        );
    }

    #[test]
    fn scenario_e_game_over_freezes_the_run() {
        let tuning = Tuning::default();
        let (mut world, mut rng) = started(5);
        world.elapsed_ticks = 299;
        world.spawn_countdown = 1;
        world.everstone.health = 0.0;
        let mut events = Vec::new();

        tick(&mut world, &mut rng, &tuning, &mut events);
        assert!(!world.is_running());
        assert_eq!(world.phase, GamePhase::Ended);
        let game_overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs, vec![&GameEvent::GameOver { survival_secs: 5.0 }]);

        let frozen = world.clone();
        events.clear();
        for _ in 0..500 {
            tick(&mut world, &mut rng, &tuning, &mut events);
        }
        assert!(events.is_empty());
        assert_eq!(world, frozen);
    }

    #[test]
    fn bomb_taking_everstone_to_exactly_zero_ends_the_run() {
        let tuning = Tuning::default();
        let (mut world, mut rng) = started(5);
        world.spawn_countdown = 10_000;
        world.elapsed_ticks = 119;
        world.everstone.health = tuning.bomb_everstone_damage;
        world.add_bomb(world.everstone.pos, 1);
        let mut events = Vec::new();

        tick(&mut world, &mut rng, &tuning, &mut events);

        assert_eq!(world.everstone.health, 0.0);
        assert_eq!(world.phase, GamePhase::Ended);
        let game_overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs, vec![&GameEvent::GameOver { survival_secs: 2.0 }]);

        let frozen = world.clone();
        events.clear();
        for _ in 0..120 {
            tick(&mut world, &mut rng, &tuning, &mut events);
        }
        assert!(events.is_empty());
        assert_eq!(world, frozen);
    }

    #[test]
    fn same_seed_same_run() {
        let tuning = Tuning::default();
        let (mut a, mut rng_a) = started(99_999);
        let (mut b, mut rng_b) = started(99_999);
        let mut events_a = Vec::new();
        let mut events_b = Vec::new();

        for _ in 0..5_000 {
            tick(&mut a, &mut rng_a, &tuning, &mut events_a);
            tick(&mut b, &mut rng_b, &tuning, &mut events_b);
        }

        assert_eq!(a, b);
        assert_eq!(events_a, events_b);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn everstone_health_stays_in_range(seed in any::<u64>(), bombs in 0usize..6, ticks in 1usize..900) {
            let tuning = Tuning::default();
            let (mut world, mut rng) = started(seed);
            let center = world.everstone.pos;
            for i in 0..bombs {
                world.add_bomb(center + Vec2::new(i as f32 * 10.0, 0.0), (i as u32) * 7);
            }
            let mut events = Vec::new();
            for _ in 0..ticks {
                tick(&mut world, &mut rng, &tuning, &mut events);
                let stone = &world.everstone;
                prop_assert!(stone.health >= 0.0 && stone.health <= stone.max_health);
            }
        }

        #[test]
        fn block_health_never_rises_and_removed_blocks_stay_gone(seed in any::<u64>(), ticks in 1usize..3_000) {
            let tuning = Tuning {
                spawn_base_secs: 1.0,
                spawn_floor_secs: 0.5,
                ..Tuning::default()
            };
            let (mut world, mut rng) = started(seed);
            let mut last: Vec<(u32, i32)> = world.blocks.iter().map(|b| (b.id, b.health)).collect();
            let mut events = Vec::new();
            for _ in 0..ticks {
                tick(&mut world, &mut rng, &tuning, &mut events);
                for (id, health) in &last {
                    if let Some(block) = world.block(*id) {
                        prop_assert!(block.health <= *health);
                        prop_assert!(block.health > 0);
                    }
                }
                let removed: Vec<u32> = last
                    .iter()
                    .filter(|(id, _)| world.block(*id).is_none())
                    .map(|(id, _)| *id)
                    .collect();
                last = world.blocks.iter().map(|b| (b.id, b.health)).collect();
                for id in removed {
                    prop_assert!(world.block(id).is_none());
                }
            }
        }

        #[test]
        fn dead_monsters_never_survive_a_tick(seed in any::<u64>(), ticks in 1usize..2_000) {
            let tuning = Tuning {
                spawn_base_secs: 2.0,
                spawn_floor_secs: 1.0,
                ..Tuning::default()
            };
            let (mut world, mut rng) = started(seed);
            let center = world.everstone.pos;
            world.add_turret(center + Vec2::new(-200.0, -150.0), 2.0);
            world.add_turret(center + Vec2::new(200.0, -150.0), 2.0);
            let mut events = Vec::new();
            for _ in 0..ticks {
                tick(&mut world, &mut rng, &tuning, &mut events);
                prop_assert!(world.monsters.iter().all(|m| m.is_alive()));
            }
        }
    }
}
