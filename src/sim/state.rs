//! Game state and core simulation types
//!
//! The `World` is the single owner of every entity in a run. Entities never
//! hold references to each other; relationships such as "nearest monster"
//! are computed by query each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WALL_HEALTH;
use crate::ticks_to_secs;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level built, waiting for start
    #[default]
    Ready,
    /// Simulation advancing
    Running,
    /// Frozen by the player; timers hold their values
    Paused,
    /// Everstone destroyed; only a reset leaves this phase
    Ended,
}

/// Axis-aligned destructible (or wall) block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// `WALL_HEALTH` marks an indestructible wall
    pub health: i32,
}

impl Block {
    pub fn is_wall(&self) -> bool {
        self.health == WALL_HEALTH
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Edge-inclusive point test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.size.x
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.size.y
    }

    pub fn is_degenerate(&self, min_extent: f32) -> bool {
        self.size.x <= min_extent || self.size.y <= min_extent
    }
}

/// The objective the player defends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Everstone {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
}

impl Everstone {
    pub fn new(pos: Vec2, radius: f32, max_health: f32) -> Self {
        Self {
            pos,
            radius,
            health: max_health,
            max_health,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

/// A digging monster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub health: f32,
    /// Ticks spent pushing against the current obstruction
    pub dig_progress: u32,
    /// Ticks of stun remaining
    pub stunned: u32,
}

impl Monster {
    pub fn new(id: u32, pos: Vec2, health: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            health,
            dig_progress: 0,
            stunned: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn is_stunned(&self) -> bool {
        self.stunned > 0
    }
}

/// Hitscan laser turret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub id: u32,
    pub pos: Vec2,
    /// Shots per second
    pub rate: f32,
    /// Ticks until the turret may fire again
    pub cooldown: u32,
}

/// Shock trap that stuns monsters in range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Ticks until the trap re-arms
    pub cooldown: u32,
}

impl Trap {
    pub fn is_armed(&self) -> bool {
        self.cooldown == 0
    }
}

/// Timed area bomb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub pos: Vec2,
    /// Ticks until detonation
    pub fuse: u32,
}

/// Horizontal push direction of a conveyor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConveyorDir {
    Left,
    Right,
}

impl ConveyorDir {
    pub fn sign(self) -> f32 {
        match self {
            ConveyorDir::Left => -1.0,
            ConveyorDir::Right => 1.0,
        }
    }
}

/// Belt that pushes monsters sideways
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conveyor {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub dir: ConveyorDir,
}

impl Conveyor {
    /// Strict interior test (monsters on the edge are not carried)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.pos.x
            && point.x < self.pos.x + self.size.x
            && point.y > self.pos.y
            && point.y < self.pos.y + self.size.y
    }
}

/// Events emitted by the simulation for presentation and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MonsterSpawned { id: u32, pos: Vec2 },
    TurretFired { turret: u32, monster: u32 },
    TrapTriggered { trap: u32, stunned: u32 },
    BombDetonated { id: u32, pos: Vec2 },
    BlockDestroyed { id: u32 },
    MonsterKilled { id: u32 },
    /// Emitted once per run when the everstone falls
    GameOver { survival_secs: f32 },
}

/// Complete state of one run (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Arena dimensions
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<Block>,
    pub turrets: Vec<Turret>,
    pub traps: Vec<Trap>,
    pub bombs: Vec<Bomb>,
    pub conveyors: Vec<Conveyor>,
    pub monsters: Vec<Monster>,
    pub everstone: Everstone,
    pub phase: GamePhase,
    /// Survival time; advances only while running
    pub elapsed_ticks: u64,
    /// Ticks until the next monster spawn
    pub spawn_countdown: u32,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Create an empty arena with an everstone at its center
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            blocks: Vec::new(),
            turrets: Vec::new(),
            traps: Vec::new(),
            bombs: Vec::new(),
            conveyors: Vec::new(),
            monsters: Vec::new(),
            everstone: Everstone::new(Vec2::new(width / 2.0, height / 2.0), 34.0, 100.0),
            phase: GamePhase::Ready,
            elapsed_ticks: 0,
            spawn_countdown: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn elapsed_secs(&self) -> f32 {
        ticks_to_secs(self.elapsed_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_never_panic_at_the_top() {
        let mut world = World::new(800.0, 600.0);
        assert_eq!(world.next_entity_id(), 1);
        assert_eq!(world.next_entity_id(), 2);

        world.next_id = u32::MAX;
        assert_eq!(world.next_entity_id(), u32::MAX);
        assert_eq!(world.next_entity_id(), 0);
    }
}
