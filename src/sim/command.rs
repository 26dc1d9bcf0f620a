//! Player commands and tool presets
//!
//! Commands are applied between ticks, never inside one. Input layers map a
//! pointer press through a [`Tool`] to a [`Command`], then queue it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::init_level;
use super::state::{ConveyorDir, GamePhase, World};
use super::store::nearest_block_within;
use crate::tuning::Tuning;

/// Every mutation the outside world may request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    PlaceBlock { pos: Vec2, size: Vec2, health: i32 },
    PlaceTurret { pos: Vec2 },
    PlaceTrap { pos: Vec2 },
    PlaceBomb { pos: Vec2 },
    PlaceConveyor { pos: Vec2, size: Vec2, dir: ConveyorDir },
    /// Welder: patch the nearest block (and the everstone when close)
    RepairNearest { pos: Vec2, radius: f32, amount: i32 },
    /// Move a block so its top-left corner lands on `to`
    DragBlock { id: u32, to: Vec2 },
    Start,
    TogglePause,
    Reset,
    ClearPlayerObjects,
}

/// Toolbar tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Pick up blocks for dragging
    #[default]
    Select,
    Builder,
    Barrier,
    Conveyor,
    Laser,
    Shock,
    Bomb,
    Welder,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Select,
        Tool::Builder,
        Tool::Barrier,
        Tool::Conveyor,
        Tool::Laser,
        Tool::Shock,
        Tool::Bomb,
        Tool::Welder,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Builder => "Builder",
            Tool::Barrier => "Barrier",
            Tool::Conveyor => "Conveyor",
            Tool::Laser => "Laser",
            Tool::Shock => "Shock",
            Tool::Bomb => "Bomb",
            Tool::Welder => "Welder",
        }
    }

    /// Command produced by pressing this tool at `pointer`.
    ///
    /// `Select` places nothing; use [`World::block_at`] to pick the block to
    /// drag and send [`Command::DragBlock`] as the pointer moves.
    pub fn command_at(self, pointer: Vec2) -> Option<Command> {
        let centered = |w: f32, h: f32| pointer - Vec2::new(w, h) * 0.5;
        match self {
            Tool::Select => None,
            Tool::Builder => Some(Command::PlaceBlock {
                pos: centered(60.0, 36.0),
                size: Vec2::new(60.0, 36.0),
                health: 120,
            }),
            Tool::Barrier => Some(Command::PlaceBlock {
                pos: centered(80.0, 20.0),
                size: Vec2::new(80.0, 20.0),
                health: 180,
            }),
            Tool::Conveyor => Some(Command::PlaceConveyor {
                pos: centered(120.0, 24.0),
                size: Vec2::new(120.0, 24.0),
                dir: ConveyorDir::Right,
            }),
            Tool::Laser => Some(Command::PlaceTurret { pos: pointer }),
            Tool::Shock => Some(Command::PlaceTrap { pos: pointer }),
            Tool::Bomb => Some(Command::PlaceBomb { pos: pointer }),
            Tool::Welder => Some(Command::RepairNearest {
                pos: pointer,
                radius: 80.0,
                amount: 30,
            }),
        }
    }
}

/// Apply a command to the world
pub fn apply(world: &mut World, command: Command, tuning: &Tuning) {
    match command {
        Command::PlaceBlock { pos, size, health } => {
            world.add_block(pos, size, health);
            world.purge_degenerate_blocks(tuning.degenerate_block_extent);
        }
        Command::PlaceTurret { pos } => {
            world.add_turret(pos, tuning.turret_rate);
        }
        Command::PlaceTrap { pos } => {
            world.add_trap(pos, tuning.trap_radius);
        }
        Command::PlaceBomb { pos } => {
            world.add_bomb(pos, tuning.bomb_fuse_ticks);
        }
        Command::PlaceConveyor { pos, size, dir } => {
            world.add_conveyor(pos, size, dir);
        }
        Command::RepairNearest {
            pos,
            radius,
            amount,
        } => repair(world, pos, radius, amount, tuning),
        Command::DragBlock { id, to } => match world.block_mut(id) {
            Some(block) => {
                block.pos = to;
                world.purge_degenerate_blocks(tuning.degenerate_block_extent);
            }
            None => log::debug!("Ignoring drag of unknown block {}", id),
        },
        Command::Start => match world.phase {
            GamePhase::Ready | GamePhase::Paused => {
                world.phase = GamePhase::Running;
                log::info!("Run started at {:.1}s", world.elapsed_secs());
            }
            GamePhase::Running | GamePhase::Ended => {}
        },
        Command::TogglePause => match world.phase {
            GamePhase::Running => {
                world.phase = GamePhase::Paused;
                log::info!("Paused at {:.1}s", world.elapsed_secs());
            }
            GamePhase::Paused => {
                world.phase = GamePhase::Running;
                log::info!("Resumed at {:.1}s", world.elapsed_secs());
            }
            GamePhase::Ready | GamePhase::Ended => {}
        },
        Command::Reset => {
            *world = init_level(world.width, world.height);
            log::info!("Level reset");
        }
        Command::ClearPlayerObjects => world.clear_player_objects(),
    }
}

fn repair(world: &mut World, pos: Vec2, radius: f32, amount: i32, tuning: &Tuning) {
    if let Some(index) = nearest_block_within(&world.blocks, pos, radius, |b| !b.is_wall()) {
        let block = &mut world.blocks[index];
        if block.health < tuning.block_repair_cap {
            block.health = (block.health + amount).min(tuning.block_repair_cap);
        }
    }

    let stone = &mut world.everstone;
    if world.phase != GamePhase::Ended
        && pos.distance(stone.pos) < stone.radius + tuning.everstone_repair_reach
    {
        stone.health = (stone.health + tuning.everstone_repair_amount).min(stone.max_health);
    }
}
