//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod command;
pub mod defense;
pub mod level;
pub mod lifecycle;
pub mod monster;
pub mod schedule;
pub mod state;
pub mod store;
pub mod tick;

pub use clock::FixedClock;
pub use command::{Command, Tool, apply};
pub use level::init_level;
pub use state::{
    Block, Bomb, Conveyor, ConveyorDir, Everstone, GameEvent, GamePhase, Monster, Trap, Turret,
    World,
};
pub use tick::tick;
