//! This module contains all the constants used by the simulation.

use std::time::Duration;

use glam::{IVec2, UVec2};

/// The number of simulation ticks in one second of game time.
pub const TICKS_PER_SECOND: u32 = 60;

/// Wall-clock duration of a single tick when the driver paces the simulation.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICKS_PER_SECOND as f64) as u64);

/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 31);

/// Gameplay rules shared by all variants.
pub mod mechanics {
    /// Upper bound of the credit counter.
    pub const MAX_COINS: u8 = 99;
    /// Lives a new game starts with.
    pub const INITIAL_LIVES: u8 = 3;
    /// Score at which the (single) extra life is awarded.
    pub const EXTRA_LIFE_SCORE: u32 = 10_000;

    pub const PELLET_POINTS: u32 = 10;
    pub const ENERGIZER_POINTS: u32 = 50;
    /// Bounty for the first ghost eaten during one power activation; doubles for each further ghost.
    pub const FIRST_GHOST_BOUNTY: u32 = 200;
    /// Bonus for eating all 16 ghosts of a level.
    pub const ALL_GHOSTS_KILLED_POINTS: u32 = 12_000;

    /// Movement accumulator cost of one tile. At 100% speed an actor moves one tile every 6 ticks.
    pub const TILE_COST: u32 = 600;
    /// Speed (in percent) of ghosts moving inside the house.
    pub const HOUSE_SPEED: u32 = 50;
    /// Speed (in percent) of eaten ghosts travelling back to the house.
    pub const RETURNING_SPEED: u32 = 150;

    /// Ticks Pac-Man rests after eating a pellet.
    pub const PELLET_REST_TICKS: u32 = 1;
    /// Ticks Pac-Man rests after eating an energizer.
    pub const ENERGIZER_REST_TICKS: u32 = 3;

    /// Number of pellets eaten after which a bonus symbol appears.
    pub const BONUS_PELLET_MILESTONES: [u32; 2] = [70, 170];
    /// How long a bonus symbol stays edible.
    pub const BONUS_EDIBLE_TICKS: u32 = 570;
    /// How long the points of an eaten bonus stay visible.
    pub const BONUS_EATEN_TICKS: u32 = 120;

    /// Ticks before the end of a power activation at which ghosts start flashing, per flash.
    pub const FLASH_TICKS_PER_FLASH: u32 = 28;
}

/// The tile where bonus symbols appear, below the ghost house.
pub const BONUS_TILE: IVec2 = IVec2::new(13, 17);

/// Scatter targets of the ghosts, in ghost ID order (outside the board, like the arcade).
pub const SCATTER_TARGETS: [IVec2; 4] = [IVec2::new(25, -3), IVec2::new(2, -3), IVec2::new(27, 31), IVec2::new(0, 31)];

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An empty tile.
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    PowerPellet,
    /// A tunnel tile; slows ghosts down and wraps around the board edge.
    Tunnel,
    /// The ghost house door, passable only by ghosts entering or leaving.
    Door,
}

/// The raw layout of the game board, as a 2D array of characters.
///
/// `X` marks Pac-Man's start, `0`-`3` the ghost starts in ID order (red, pink, cyan, orange).
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##    0     ##.#     ",
    "     #.## ###==### ##.#     ",
    "######.## #      # ##.######",
    "TTTTTT.   #2 1 3 #   .TTTTTT",
    "######.## #      # ##.######",
    "     #.## ######## ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......X .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];
