//! Spatial queries and entity bookkeeping
//!
//! Queries are free functions over slices so the tick systems can hold
//! disjoint borrows of the world's collections. Entity counts are small
//! (tens), so every query is a linear scan in stable insertion order.

use glam::Vec2;

use super::state::{Block, Bomb, Conveyor, ConveyorDir, Monster, Trap, Turret, World};

/// Index of the topmost block containing `point` (last added wins)
pub fn block_index_at(blocks: &[Block], point: Vec2) -> Option<usize> {
    blocks.iter().rposition(|b| b.contains(point))
}

/// Index of the block whose center is closest to `point`, strictly within `radius`
pub fn nearest_block_within(
    blocks: &[Block],
    point: Vec2,
    radius: f32,
    mut accept: impl FnMut(&Block) -> bool,
) -> Option<usize> {
    let mut best = None;
    let mut best_dist = radius;
    for (i, block) in blocks.iter().enumerate() {
        if !accept(block) {
            continue;
        }
        let d = block.center().distance(point);
        if d < best_dist {
            best_dist = d;
            best = Some(i);
        }
    }
    best
}

/// Index of the closest living monster strictly within `radius`
pub fn nearest_monster_within(monsters: &[Monster], point: Vec2, radius: f32) -> Option<usize> {
    let mut best = None;
    let mut best_dist = radius;
    for (i, monster) in monsters.iter().enumerate() {
        if !monster.is_alive() {
            continue;
        }
        let d = monster.pos.distance(point);
        if d < best_dist {
            best_dist = d;
            best = Some(i);
        }
    }
    best
}

/// Indices of living monsters strictly within `radius` of `center`
pub fn monsters_in_circle(
    monsters: &[Monster],
    center: Vec2,
    radius: f32,
) -> impl Iterator<Item = usize> + '_ {
    monsters
        .iter()
        .enumerate()
        .filter(move |(_, m)| m.is_alive() && m.pos.distance(center) < radius)
        .map(|(i, _)| i)
}

impl World {
    pub fn add_block(&mut self, pos: Vec2, size: Vec2, health: i32) -> u32 {
        let id = self.next_entity_id();
        self.blocks.push(Block {
            id,
            pos,
            size,
            health,
        });
        id
    }

    pub fn add_turret(&mut self, pos: Vec2, rate: f32) -> u32 {
        let id = self.next_entity_id();
        self.turrets.push(Turret {
            id,
            pos,
            rate,
            cooldown: 0,
        });
        id
    }

    pub fn add_trap(&mut self, pos: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        self.traps.push(Trap {
            id,
            pos,
            radius,
            cooldown: 0,
        });
        id
    }

    pub fn add_bomb(&mut self, pos: Vec2, fuse: u32) -> u32 {
        let id = self.next_entity_id();
        self.bombs.push(Bomb { id, pos, fuse });
        id
    }

    pub fn add_conveyor(&mut self, pos: Vec2, size: Vec2, dir: ConveyorDir) -> u32 {
        let id = self.next_entity_id();
        self.conveyors.push(Conveyor { id, pos, size, dir });
        id
    }

    pub fn add_monster(&mut self, pos: Vec2, health: f32) -> u32 {
        let id = self.next_entity_id();
        self.monsters.push(Monster::new(id, pos, health));
        id
    }

    pub fn block(&self, id: u32) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn block_mut(&mut self, id: u32) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn monster(&self, id: u32) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn monster_mut(&mut self, id: u32) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    pub fn remove_block(&mut self, id: u32) -> Option<Block> {
        let index = self.blocks.iter().position(|b| b.id == id)?;
        Some(self.blocks.remove(index))
    }

    pub fn remove_monster(&mut self, id: u32) -> Option<Monster> {
        let index = self.monsters.iter().position(|m| m.id == id)?;
        Some(self.monsters.remove(index))
    }

    pub fn remove_turret(&mut self, id: u32) -> Option<Turret> {
        let index = self.turrets.iter().position(|t| t.id == id)?;
        Some(self.turrets.remove(index))
    }

    pub fn remove_trap(&mut self, id: u32) -> Option<Trap> {
        let index = self.traps.iter().position(|t| t.id == id)?;
        Some(self.traps.remove(index))
    }

    pub fn remove_bomb(&mut self, id: u32) -> Option<Bomb> {
        let index = self.bombs.iter().position(|b| b.id == id)?;
        Some(self.bombs.remove(index))
    }

    pub fn remove_conveyor(&mut self, id: u32) -> Option<Conveyor> {
        let index = self.conveyors.iter().position(|c| c.id == id)?;
        Some(self.conveyors.remove(index))
    }

    /// Topmost block under `point`
    pub fn block_at(&self, point: Vec2) -> Option<&Block> {
        block_index_at(&self.blocks, point).map(|i| &self.blocks[i])
    }

    /// Block whose center is closest to `point` within `radius`
    pub fn nearest_block(&self, point: Vec2, radius: f32) -> Option<&Block> {
        nearest_block_within(&self.blocks, point, radius, |_| true).map(|i| &self.blocks[i])
    }

    /// Closest living monster within `radius`
    pub fn nearest_monster(&self, point: Vec2, radius: f32) -> Option<&Monster> {
        nearest_monster_within(&self.monsters, point, radius).map(|i| &self.monsters[i])
    }

    /// Remove every player-made object, keeping only the walls
    pub fn clear_player_objects(&mut self) {
        self.blocks.retain(|b| b.is_wall());
        self.turrets.clear();
        self.traps.clear();
        self.bombs.clear();
        self.conveyors.clear();
        self.monsters.clear();
    }

    /// Drop blocks too thin to matter; returns how many were removed
    pub fn purge_degenerate_blocks(&mut self, min_extent: f32) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|b| !b.is_degenerate(min_extent));
        before - self.blocks.len()
    }
}
