//! The maze: tiles, food, passability and ghost-house geometry.

pub mod direction;
pub mod parser;

use bitflags::bitflags;
use glam::IVec2;
use pathfinding::prelude::{bfs, bfs_reach};
use tracing::debug;

use crate::constants::{MapTile, BOARD_CELL_SIZE, RAW_BOARD};
use crate::error::GameResult;
use crate::map::direction::Direction;
use crate::map::parser::MapTileParser;

const WIDTH: usize = BOARD_CELL_SIZE.x as usize;
const HEIGHT: usize = BOARD_CELL_SIZE.y as usize;

bitflags! {
    /// Which movers may occupy a tile.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        /// Pac-Man.
        const PAC = 1 << 0;
        /// Ghosts moving through the maze.
        const GHOST = 1 << 1;
        /// Ghosts entering or leaving the house, including the door.
        const HOUSE = 1 << 2;
    }
}

/// The kind of food found on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Food {
    Pellet,
    Energizer,
}

/// The maze of one level, including the food still on it.
#[derive(Debug, Clone)]
pub struct WorldMap {
    tiles: [[MapTile; HEIGHT]; WIDTH],
    access: [[Access; HEIGHT]; WIDTH],
    food: [[Option<Food>; HEIGHT]; WIDTH],
    total_food: u32,
    food_remaining: u32,
    house_door: [IVec2; 2],
    pac_start: IVec2,
    ghost_starts: [IVec2; 4],
}

impl WorldMap {
    /// Builds a map from a raw board layout.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the layout is malformed.
    pub fn new(raw_board: [&str; HEIGHT]) -> GameResult<Self> {
        let parsed = MapTileParser::parse_board(raw_board)?;

        let mut access = [[Access::empty(); HEIGHT]; WIDTH];
        let mut food = [[None; HEIGHT]; WIDTH];
        let mut total_food = 0;

        for x in 0..WIDTH {
            for y in 0..HEIGHT {
                let tile = parsed.tiles[x][y];
                access[x][y] = match tile {
                    MapTile::Wall => Access::empty(),
                    MapTile::Door => Access::HOUSE,
                    _ => Access::all(),
                };
                food[x][y] = match tile {
                    MapTile::Pellet => Some(Food::Pellet),
                    MapTile::PowerPellet => Some(Food::Energizer),
                    _ => None,
                };
                if food[x][y].is_some() {
                    total_food += 1;
                }
            }
        }

        // The house interior is everything reachable from below the door without crossing a wall.
        // Neither Pac-Man nor hunting ghosts may enter it.
        let below_door = parsed.house_door[0] + IVec2::Y;
        let interior: Vec<IVec2> = bfs_reach(below_door, |&tile| {
            Direction::DIRECTIONS
                .iter()
                .map(move |dir| tile + dir.as_ivec2())
                .filter(|next| {
                    Self::in_bounds(*next) && !matches!(parsed.tiles[next.x as usize][next.y as usize], MapTile::Wall | MapTile::Door)
                })
                .collect::<Vec<_>>()
        })
        .collect();
        for tile in &interior {
            access[tile.x as usize][tile.y as usize] = Access::HOUSE;
        }

        debug!(total_food, house_tiles = interior.len(), "World map built");

        Ok(Self {
            tiles: parsed.tiles,
            access,
            food,
            total_food,
            food_remaining: total_food,
            house_door: parsed.house_door,
            pac_start: parsed.pacman_start,
            ghost_starts: parsed.ghost_starts,
        })
    }

    /// Builds the standard arcade maze.
    pub fn arcade() -> GameResult<Self> {
        Self::new(RAW_BOARD)
    }

    fn in_bounds(tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as usize) < WIDTH && (tile.y as usize) < HEIGHT
    }

    /// Wraps a tile that left the board through a tunnel back onto the opposite edge.
    pub fn wrap(&self, tile: IVec2) -> IVec2 {
        if tile.y < 0 || tile.y as usize >= HEIGHT || Self::in_bounds(tile) {
            return tile;
        }
        let edge = if tile.x < 0 { 0 } else { WIDTH - 1 };
        if self.tiles[edge][tile.y as usize] == MapTile::Tunnel {
            IVec2::new(tile.x.rem_euclid(WIDTH as i32), tile.y)
        } else {
            tile
        }
    }

    /// The neighbouring tile in the given direction, wrapped through tunnels.
    pub fn neighbor(&self, tile: IVec2, direction: Direction) -> IVec2 {
        self.wrap(tile + direction.as_ivec2())
    }

    /// The tile at a position, or `None` outside of the board.
    pub fn tile(&self, tile: IVec2) -> Option<MapTile> {
        let tile = self.wrap(tile);
        Self::in_bounds(tile).then(|| self.tiles[tile.x as usize][tile.y as usize])
    }

    /// The movers allowed on a tile; nothing is allowed outside of the board.
    pub fn access(&self, tile: IVec2) -> Access {
        let tile = self.wrap(tile);
        if Self::in_bounds(tile) {
            self.access[tile.x as usize][tile.y as usize]
        } else {
            Access::empty()
        }
    }

    pub fn is_passable(&self, tile: IVec2, mover: Access) -> bool {
        self.access(tile).intersects(mover)
    }

    pub fn is_tunnel(&self, tile: IVec2) -> bool {
        self.tile(tile) == Some(MapTile::Tunnel)
    }

    /// True for tiles inside the ghost house (excluding the door).
    pub fn is_inside_house(&self, tile: IVec2) -> bool {
        self.access(tile) == Access::HOUSE && self.tile(tile) != Some(MapTile::Door)
    }

    pub fn food_at(&self, tile: IVec2) -> Option<Food> {
        let tile = self.wrap(tile);
        if Self::in_bounds(tile) {
            self.food[tile.x as usize][tile.y as usize]
        } else {
            None
        }
    }

    pub fn has_food_at(&self, tile: IVec2) -> bool {
        self.food_at(tile).is_some()
    }

    /// Removes the food on a tile, returning what was eaten.
    pub fn eat_food(&mut self, tile: IVec2) -> Option<Food> {
        let tile = self.wrap(tile);
        if !Self::in_bounds(tile) {
            return None;
        }
        let eaten = self.food[tile.x as usize][tile.y as usize].take();
        if eaten.is_some() {
            self.food_remaining -= 1;
        }
        eaten
    }

    /// Tiles that still carry food, in column-major order.
    pub fn food_tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..WIDTH).flat_map(move |x| {
            (0..HEIGHT)
                .filter(move |&y| self.food[x][y].is_some())
                .map(move |y| IVec2::new(x as i32, y as i32))
        })
    }

    pub fn total_food(&self) -> u32 {
        self.total_food
    }

    pub fn food_remaining(&self) -> u32 {
        self.food_remaining
    }

    pub fn food_eaten(&self) -> u32 {
        self.total_food - self.food_remaining
    }

    pub fn pac_start(&self) -> IVec2 {
        self.pac_start
    }

    /// The start tile of a ghost, by ID index (0 = red).
    pub fn ghost_start(&self, index: usize) -> IVec2 {
        self.ghost_starts[index]
    }

    pub fn house_door(&self) -> [IVec2; 2] {
        self.house_door
    }

    /// The tile above the left door tile, where ghosts leave and enter the house.
    pub fn house_entry(&self) -> IVec2 {
        self.house_door[0] - IVec2::Y
    }

    /// The middle tile of the house, directly below the entry.
    pub fn house_center(&self) -> IVec2 {
        self.house_door[0] + IVec2::Y * 2
    }

    /// Shortest path between two tiles for the given mover, including both ends.
    pub fn path(&self, from: IVec2, to: IVec2, mover: Access) -> Option<Vec<IVec2>> {
        bfs(
            &from,
            |&tile| {
                Direction::DIRECTIONS
                    .iter()
                    .map(|dir| self.neighbor(tile, *dir))
                    .filter(|next| self.is_passable(*next, mover))
                    .collect::<Vec<_>>()
            },
            |&tile| tile == to,
        )
    }
}
