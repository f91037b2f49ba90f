//! Actors moving through the maze.

pub mod ghost;
pub mod pac;
pub mod steering;

use glam::IVec2;

use crate::constants::mechanics::TILE_COST;
use crate::map::direction::Direction;
use crate::map::WorldMap;

/// Tile position, heading and movement budget shared by Pac-Man and the ghosts.
///
/// Each tick an actor earns its speed (in percent) of movement budget; it moves a tile once the
/// budget reaches [`TILE_COST`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mover {
    pub tile: IVec2,
    pub dir: Direction,
    pub wish_dir: Direction,
    budget: u32,
}

impl Mover {
    pub fn new(tile: IVec2, dir: Direction) -> Self {
        Self {
            tile,
            dir,
            wish_dir: dir,
            budget: 0,
        }
    }

    /// Puts the actor on a tile, dropping any movement budget.
    pub fn place(&mut self, tile: IVec2, dir: Direction) {
        *self = Self::new(tile, dir);
    }

    /// Adds one tick worth of movement and returns how many tiles may be moved now.
    pub fn earn(&mut self, speed: u32) -> u32 {
        self.budget += speed;
        let steps = self.budget / TILE_COST;
        self.budget %= TILE_COST;
        steps
    }

    /// Drops the movement budget, e.g. when blocked.
    pub fn halt(&mut self) {
        self.budget = 0;
    }

    /// Moves one tile in the current direction.
    pub fn step(&mut self, map: &WorldMap) {
        self.tile = map.neighbor(self.tile, self.dir);
    }

    /// The tile `n` tiles ahead in the current direction, not checked for walls.
    pub fn ahead(&self, n: i32) -> IVec2 {
        self.tile + self.dir.as_ivec2() * n
    }
}

/// The direction leading from `from` to the adjacent tile `to`, tunnels included.
pub fn direction_towards(map: &WorldMap, from: IVec2, to: IVec2) -> Option<Direction> {
    Direction::DIRECTIONS.into_iter().find(|dir| map.neighbor(from, *dir) == to)
}
