//! Pit layout: boundary walls, central platform and the everstone

use glam::Vec2;

use super::state::{Everstone, World};
use crate::consts::WALL_HEALTH;

const GROUND_HEIGHT: f32 = 120.0;
const TUNNEL_WIDTH: f32 = 60.0;
/// Gap between the tunnel walls and the ground where monsters walk in
const TUNNEL_CLEARANCE: f32 = 180.0;
const CEILING_HEIGHT: f32 = 40.0;

const PLATFORM_SIZE: Vec2 = Vec2::new(320.0, 120.0);
const PLATFORM_HEALTH: i32 = 200;
const SUPPORT_SIZE: Vec2 = Vec2::new(60.0, 40.0);
const SUPPORT_HEALTH: i32 = 100;

const EVERSTONE_RADIUS: f32 = 34.0;
const EVERSTONE_HEALTH: f32 = 100.0;

/// Build a fresh, not-yet-started run for an arena of the given size
pub fn init_level(width: f32, height: f32) -> World {
    let mut world = World::new(width, height);

    // Ground, side tunnels and ceiling
    world.add_block(
        Vec2::new(0.0, height - GROUND_HEIGHT),
        Vec2::new(width, GROUND_HEIGHT),
        WALL_HEALTH,
    );
    world.add_block(
        Vec2::ZERO,
        Vec2::new(TUNNEL_WIDTH, height - TUNNEL_CLEARANCE),
        WALL_HEALTH,
    );
    world.add_block(
        Vec2::new(width - TUNNEL_WIDTH, 0.0),
        Vec2::new(TUNNEL_WIDTH, height - TUNNEL_CLEARANCE),
        WALL_HEALTH,
    );
    world.add_block(Vec2::ZERO, Vec2::new(width, CEILING_HEIGHT), WALL_HEALTH);

    let center = Vec2::new(width / 2.0, height / 2.0 + 30.0);
    world.add_block(center - PLATFORM_SIZE * 0.5, PLATFORM_SIZE, PLATFORM_HEALTH);
    world.add_block(
        center + Vec2::new(-220.0, 40.0),
        SUPPORT_SIZE,
        SUPPORT_HEALTH,
    );
    world.add_block(center + Vec2::new(160.0, 40.0), SUPPORT_SIZE, SUPPORT_HEALTH);

    world.everstone = Everstone::new(
        center - Vec2::new(0.0, 10.0),
        EVERSTONE_RADIUS,
        EVERSTONE_HEALTH,
    );
    world
}
