//! End-of-tick cleanup and the game over transition

use super::state::{GameEvent, GamePhase, World};
use crate::tuning::Tuning;

/// Sweep the dead, clamp the everstone and end the run when it falls
pub fn resolve(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    world.monsters.retain(|m| {
        if m.is_alive() {
            return true;
        }
        events.push(GameEvent::MonsterKilled { id: m.id });
        false
    });

    if tuning.purge_interval_ticks > 0
        && world.elapsed_ticks % u64::from(tuning.purge_interval_ticks) == 0
    {
        let purged = world.purge_degenerate_blocks(tuning.degenerate_block_extent);
        if purged > 0 {
            log::debug!("Purged {} degenerate blocks", purged);
        }
    }

    let everstone = &mut world.everstone;
    everstone.health = everstone.health.min(everstone.max_health).max(0.0);

    if everstone.is_destroyed() && world.phase != GamePhase::Ended {
        world.phase = GamePhase::Ended;
        let survival_secs = world.elapsed_secs();
        log::info!("Everstone destroyed after {:.1}s", survival_secs);
        events.push(GameEvent::GameOver { survival_secs });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn running_world() -> World {
        let mut world = World::new(800.0, 600.0);
        world.phase = GamePhase::Running;
        world
    }

    #[test]
    fn dead_monsters_are_removed_with_events() {
        let tuning = Tuning::default();
        let mut world = running_world();
        let alive = world.add_monster(Vec2::ZERO, 4.0);
        let dead = world.add_monster(Vec2::ONE, -4.0);
        let mut events = Vec::new();

        resolve(&mut world, &tuning, &mut events);

        assert_eq!(world.monsters.len(), 1);
        assert_eq!(world.monsters[0].id, alive);
        assert_eq!(events, vec![GameEvent::MonsterKilled { id: dead }]);
    }

    #[test]
    fn everstone_health_is_clamped() {
        let tuning = Tuning::default();
        let mut world = running_world();
        world.everstone.health = 140.0;
        resolve(&mut world, &tuning, &mut Vec::new());
        assert_eq!(world.everstone.health, 100.0);
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn game_over_fires_once() {
        let tuning = Tuning::default();
        let mut world = running_world();
        world.elapsed_ticks = 600;
        world.everstone.health = -12.0;
        let mut events = Vec::new();

        resolve(&mut world, &tuning, &mut events);
        resolve(&mut world, &tuning, &mut events);

        assert_eq!(world.everstone.health, 0.0);
        assert_eq!(world.phase, GamePhase::Ended);
        assert_eq!(events, vec![GameEvent::GameOver { survival_secs: 10.0 }]);
    }

    #[test]
    fn degenerate_blocks_purged_on_interval() {
        let tuning = Tuning::default();
        let mut world = running_world();
        world.add_block(Vec2::ZERO, Vec2::new(2.0, 50.0), 100);

        world.elapsed_ticks = 179;
        resolve(&mut world, &tuning, &mut Vec::new());
        assert_eq!(world.blocks.len(), 1);

        world.elapsed_ticks = 180;
        resolve(&mut world, &tuning, &mut Vec::new());
        assert!(world.blocks.is_empty());
    }
}
