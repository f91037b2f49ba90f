use glam::IVec2;
use tracing::trace;

use crate::actor::Mover;
use crate::map::direction::Direction;
use crate::map::{Access, WorldMap};

/// The player character.
#[derive(Debug, Clone)]
pub struct Pac {
    mover: Mover,
    rest_ticks: u32,
    visible: bool,
    dead: bool,
}

impl Pac {
    pub fn new(tile: IVec2) -> Self {
        Self {
            mover: Mover::new(tile, Direction::Left),
            rest_ticks: 0,
            visible: false,
            dead: false,
        }
    }

    pub fn tile(&self) -> IVec2 {
        self.mover.tile
    }

    pub fn dir(&self) -> Direction {
        self.mover.dir
    }

    pub fn wish_dir(&self) -> Direction {
        self.mover.wish_dir
    }

    /// The direction Pac-Man turns to as soon as the way is free.
    pub fn set_wish_dir(&mut self, dir: Direction) {
        self.mover.wish_dir = dir;
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    /// Puts Pac-Man back on a tile, alive and facing left.
    pub fn place(&mut self, tile: IVec2) {
        self.mover.place(tile, Direction::Left);
        self.rest_ticks = 0;
        self.dead = false;
    }

    /// Keeps Pac-Man still for the given number of ticks.
    pub fn rest(&mut self, ticks: u32) {
        self.rest_ticks = ticks;
    }

    pub fn is_resting(&self) -> bool {
        self.rest_ticks > 0
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn die(&mut self) {
        self.dead = true;
    }

    /// Moves Pac-Man for one tick at `speed` percent. Returns the tile entered, if any.
    pub fn update(&mut self, map: &WorldMap, speed: u32) -> Option<IVec2> {
        if self.dead {
            return None;
        }
        if self.rest_ticks > 0 {
            self.rest_ticks -= 1;
            return None;
        }

        let mut entered = None;
        for _ in 0..self.mover.earn(speed) {
            let wish = self.mover.wish_dir;
            if wish != self.mover.dir && map.is_passable(map.neighbor(self.mover.tile, wish), Access::PAC) {
                trace!(from = self.mover.dir.as_ref(), to = wish.as_ref(), "Pac-Man turns");
                self.mover.dir = wish;
            }
            if !map.is_passable(map.neighbor(self.mover.tile, self.mover.dir), Access::PAC) {
                self.mover.halt();
                break;
            }
            self.mover.step(map);
            entered = Some(self.mover.tile);
        }
        entered
    }
}
