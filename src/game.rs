//! Run session
//!
//! Owns the world together with everything needed to drive it: the seeded
//! RNG, the balance table, the fixed-step clock and the command queue.
//! Commands are applied between ticks, so no tick ever sees a torn world.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::{Command, FixedClock, GameEvent, GamePhase, World, apply, init_level, tick};
use crate::tuning::Tuning;

/// What the HUD needs each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub elapsed_secs: f32,
    pub everstone_health: f32,
    pub everstone_max: f32,
    pub phase: GamePhase,
    /// Best survival time known to this session
    pub best_secs: f32,
}

pub struct Game {
    world: World,
    rng: Pcg32,
    seed: u64,
    tuning: Tuning,
    clock: FixedClock,
    pending: VecDeque<Command>,
    best_secs: f32,
}

impl Game {
    pub fn new(width: f32, height: f32, seed: u64, tuning: Tuning) -> Self {
        Self {
            world: init_level(width, height),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            tuning,
            clock: FixedClock::default(),
            pending: VecDeque::new(),
            best_secs: 0.0,
        }
    }

    /// Read-only view for renderers
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Queue a command for the next frame boundary
    pub fn queue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Apply queued commands, then run as many ticks as `real_dt` covers.
    ///
    /// While not running the clock is held at zero, so unpausing resumes
    /// from the frozen timers with no catch-up burst.
    pub fn advance(&mut self, real_dt: f64) -> Vec<GameEvent> {
        self.apply_pending();

        let mut events = Vec::new();
        if !self.world.is_running() {
            self.clock.reset();
            return events;
        }

        let ticks = self.clock.advance(real_dt);
        for _ in 0..ticks {
            tick(&mut self.world, &mut self.rng, &self.tuning, &mut events);
            if !self.world.is_running() {
                self.clock.reset();
                break;
            }
        }
        self.observe(&events);
        events
    }

    /// Apply queued commands and run exactly one tick
    pub fn step(&mut self) -> Vec<GameEvent> {
        self.apply_pending();
        let mut events = Vec::new();
        tick(&mut self.world, &mut self.rng, &self.tuning, &mut events);
        self.observe(&events);
        events
    }

    pub fn hud(&self) -> Hud {
        Hud {
            elapsed_secs: self.world.elapsed_secs(),
            everstone_health: self.world.everstone.health,
            everstone_max: self.world.everstone.max_health,
            phase: self.world.phase,
            best_secs: self.best_secs,
        }
    }

    /// Seed the session with a best time loaded from storage
    pub fn set_best_secs(&mut self, secs: f32) {
        self.best_secs = secs.max(0.0);
    }

    fn apply_pending(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            let reset = command == Command::Reset;
            apply(&mut self.world, command, &self.tuning);
            if reset {
                self.rng = Pcg32::seed_from_u64(self.seed);
                self.clock.reset();
            }
        }
    }

    fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::GameOver { survival_secs } if survival_secs > self.best_secs => {
                    log::info!(
                        "New best time {:.1}s (was {:.1}s)",
                        survival_secs,
                        self.best_secs
                    );
                    self.best_secs = survival_secs;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use glam::Vec2;

    fn game() -> Game {
        Game::new(960.0, 640.0, 1234, Tuning::default())
    }

    #[test]
    fn nothing_moves_before_start() {
        let mut game = game();
        let before = game.world().clone();
        assert!(game.advance(1.0).is_empty());
        assert_eq!(game.world(), &before);
        assert_eq!(game.hud().phase, GamePhase::Ready);
    }

    #[test]
    fn one_second_is_sixty_ticks() {
        let mut game = game();
        game.queue(Command::Start);
        for _ in 0..60 {
            game.advance(SIM_DT);
        }
        assert_eq!(game.world().elapsed_ticks, 60);
        assert!((game.hud().elapsed_secs - 1.0).abs() < 1e-6);
    }

    #[test]
    fn pause_freezes_timers_without_catch_up() {
        let mut game = game();
        game.queue(Command::Start);
        game.advance(SIM_DT * 10.0);
        let frozen = game.world().clone();

        game.queue(Command::TogglePause);
        for _ in 0..120 {
            game.advance(SIM_DT);
        }
        assert_eq!(game.world().elapsed_ticks, frozen.elapsed_ticks);
        assert_eq!(game.world().spawn_countdown, frozen.spawn_countdown);

        game.queue(Command::TogglePause);
        game.advance(SIM_DT);
        assert_eq!(game.world().elapsed_ticks, frozen.elapsed_ticks + 1);
    }

    #[test]
    fn reset_replays_the_same_run() {
        let mut game = game();
        game.queue(Command::Start);
        let first: Vec<_> = (0..600).flat_map(|_| game.step()).collect();
        let first_world = game.world().clone();

        game.queue(Command::Reset);
        game.queue(Command::Start);
        let second: Vec<_> = (0..600).flat_map(|_| game.step()).collect();

        assert_eq!(first, second);
        assert_eq!(game.world(), &first_world);
    }

    #[test]
    fn reset_twice_is_identical() {
        let mut game = game();
        game.queue(Command::Start);
        for _ in 0..300 {
            game.step();
        }
        game.queue(Command::Reset);
        game.advance(0.0);
        let once = game.world().clone();
        game.queue(Command::Reset);
        game.advance(0.0);
        assert_eq!(game.world(), &once);
        assert_eq!(once.elapsed_ticks, 0);
        assert!(once.monsters.is_empty());
    }

    #[test]
    fn game_over_updates_best_time() {
        let mut game = game();
        game.set_best_secs(0.5);
        game.queue(Command::Start);
        for _ in 0..60 {
            game.step();
        }
        let stone = game.world().everstone.pos;
        for i in 0..4 {
            game.queue(Command::PlaceBomb {
                pos: stone + Vec2::new(i as f32, 0.0),
            });
        }

        let events: Vec<_> = (0..70).flat_map(|_| game.step()).collect();

        let overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);
        let hud = game.hud();
        assert_eq!(hud.phase, GamePhase::Ended);
        assert_eq!(hud.everstone_health, 0.0);
        assert!(hud.best_secs > 1.0);
        assert_eq!(hud.best_secs, hud.elapsed_secs);
    }
}
