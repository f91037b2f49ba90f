//! Per-level tuning tables of the arcade game.
//!
//! Real games have unbounded level numbers while these tables are finite: every lookup past the
//! last entry clamps to it.

use crate::timer::TickDuration;

/// Tuning values of one level. Speeds are percentages of the maximum speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelData {
    pub pac_speed: u32,
    pub ghost_speed: u32,
    pub ghost_tunnel_speed: u32,
    /// Food remaining at or below which the red ghost enters its first "Elroy" speed-up.
    pub elroy1_dots: u32,
    pub elroy1_speed: u32,
    pub elroy2_dots: u32,
    pub elroy2_speed: u32,
    pub pac_power_speed: u32,
    pub ghost_frightened_speed: u32,
    /// Length of a power activation; zero means ghosts only reverse.
    pub frightened_seconds: u32,
    /// How often the maze flashes when the level is completed, and frightened ghosts flash before recovering.
    pub num_flashes: u32,
}

const fn row(values: [u32; 11]) -> LevelData {
    LevelData {
        pac_speed: values[0],
        ghost_speed: values[1],
        ghost_tunnel_speed: values[2],
        elroy1_dots: values[3],
        elroy1_speed: values[4],
        elroy2_dots: values[5],
        elroy2_speed: values[6],
        pac_power_speed: values[7],
        ghost_frightened_speed: values[8],
        frightened_seconds: values[9],
        num_flashes: values[10],
    }
}

#[rustfmt::skip]
const LEVEL_DATA: [LevelData; 21] = [
    row([ 80,  75, 40,  20,  80, 10,  85,  90, 50, 6, 5]),
    row([ 90,  85, 45,  30,  90, 15,  95,  95, 55, 5, 5]),
    row([ 90,  85, 45,  40,  90, 20,  95,  95, 55, 4, 5]),
    row([ 90,  85, 45,  40,  90, 20,  95,  95, 55, 3, 5]),
    row([100,  95, 50,  40, 100, 20, 105, 100, 60, 2, 5]),
    row([100,  95, 50,  50, 100, 25, 105, 100, 60, 5, 5]),
    row([100,  95, 50,  50, 100, 25, 105, 100, 60, 2, 5]),
    row([100,  95, 50,  50, 100, 25, 105, 100, 60, 2, 5]),
    row([100,  95, 50,  60, 100, 30, 105, 100, 60, 1, 3]),
    row([100,  95, 50,  60, 100, 30, 105, 100, 60, 5, 5]),
    row([100,  95, 50,  60, 100, 30, 105, 100, 60, 2, 5]),
    row([100,  95, 50,  80, 100, 40, 105, 100, 60, 1, 3]),
    row([100,  95, 50,  80, 100, 40, 105, 100, 60, 1, 3]),
    row([100,  95, 50,  80, 100, 40, 105, 100, 60, 3, 5]),
    row([100,  95, 50, 100, 100, 50, 105, 100, 60, 1, 3]),
    row([100,  95, 50, 100, 100, 50, 105, 100, 60, 1, 3]),
    row([100,  95, 50, 100, 100, 50, 105,   0,  0, 0, 0]),
    row([100,  95, 50, 100, 100, 50, 105, 100, 60, 1, 3]),
    row([100,  95, 50, 120, 100, 60, 105,   0,  0, 0, 0]),
    row([100,  95, 50, 120, 100, 60, 105,   0,  0, 0, 0]),
    row([ 90,  95, 50, 120, 100, 60, 105,   0,  0, 0, 0]),
];

/// The tuning values of a level (numbered from 1).
pub fn level_data(number: u32) -> &'static LevelData {
    let index = (number.max(1) as usize - 1).min(LEVEL_DATA.len() - 1);
    &LEVEL_DATA[index]
}

/// Number of hunting phases per level: four scatter/chase pairs.
pub const HUNTING_PHASE_COUNT: usize = 8;

use TickDuration::{Indefinite, Ticks};

/// Hunting phase durations: level 1, levels 2-4 and levels 5 and up.
#[rustfmt::skip]
const HUNTING_DURATIONS: [[TickDuration; HUNTING_PHASE_COUNT]; 3] = [
    [Ticks(420), Ticks(1200), Ticks(420), Ticks(1200), Ticks(300), Ticks(1200), Ticks(300), Indefinite],
    [Ticks(420), Ticks(1200), Ticks(420), Ticks(1200), Ticks(300), Ticks(61980), Ticks(1), Indefinite],
    [Ticks(300), Ticks(1200), Ticks(300), Ticks(1200), Ticks(300), Ticks(62220), Ticks(1), Indefinite],
];

/// The hunting phase durations used by a level.
pub fn hunting_durations(level_number: u32) -> &'static [TickDuration; HUNTING_PHASE_COUNT] {
    let table = match level_number {
        0 | 1 => 0,
        2..=4 => 1,
        _ => 2,
    };
    &HUNTING_DURATIONS[table]
}

/// Personal dot limits of the pink, cyan and orange ghosts (red never waits).
pub fn house_dot_limits(level_number: u32) -> [u32; 4] {
    match level_number {
        0 | 1 => [0, 0, 30, 60],
        2 => [0, 0, 0, 50],
        _ => [0, 0, 0, 0],
    }
}

/// Global dot counter values releasing pink, cyan and orange after a life was lost.
pub const GLOBAL_DOT_LIMITS: [u32; 4] = [0, 7, 17, 32];

/// Ticks without eating after which the next locked ghost is forced out.
pub fn starvation_ticks(level_number: u32) -> u32 {
    if level_number < 5 {
        240
    } else {
        180
    }
}
