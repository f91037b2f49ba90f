//! Who decides where Pac-Man goes.

use std::fmt;

use glam::IVec2;
use pathfinding::prelude::bfs;

use crate::actor::direction_towards;
use crate::actor::ghost::{Ghost, GhostState};
use crate::actor::pac::Pac;
use crate::map::direction::Direction;
use crate::map::{Access, WorldMap};

/// Chooses Pac-Man's wished direction once per tick.
pub trait Steering: fmt::Debug {
    /// Returns the new wished direction, or `None` to keep the current one.
    fn steer(&mut self, map: &WorldMap, pac: &Pac, ghosts: &[Ghost; 4]) -> Option<Direction>;
}

/// Leaves the wished direction to the player (see `GameController::steer_pac`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualSteering;

impl Steering for ManualSteering {
    fn steer(&mut self, _map: &WorldMap, _pac: &Pac, _ghosts: &[Ghost; 4]) -> Option<Direction> {
        None
    }
}

/// The autopilot used in demo levels: heads for the nearest food, keeping away from dangerous ghosts.
#[derive(Debug, Default, Clone)]
pub struct RuleBasedSteering {
    /// Tile the current route leads to.
    goal: Option<IVec2>,
}

impl RuleBasedSteering {
    /// Ghosts closer than this (in tiles) block the tiles around them.
    const DANGER_RADIUS: i32 = 2;

    pub fn goal(&self) -> Option<IVec2> {
        self.goal
    }

    fn is_dangerous(tile: IVec2, ghosts: &[Ghost; 4]) -> bool {
        ghosts.iter().any(|ghost| {
            ghost.state() == GhostState::HuntingPac
                && (ghost.tile() - tile).abs().element_sum() <= Self::DANGER_RADIUS
        })
    }
}

impl Steering for RuleBasedSteering {
    fn steer(&mut self, map: &WorldMap, pac: &Pac, ghosts: &[Ghost; 4]) -> Option<Direction> {
        let start = pac.tile();
        let route = bfs(
            &start,
            |&tile| {
                Direction::DIRECTIONS
                    .iter()
                    .map(|dir| map.neighbor(tile, *dir))
                    .filter(|next| map.is_passable(*next, Access::PAC) && !Self::is_dangerous(*next, ghosts))
                    .collect::<Vec<_>>()
            },
            |&tile| tile != start && map.has_food_at(tile),
        );

        match route {
            Some(route) if route.len() > 1 => {
                self.goal = route.last().copied();
                direction_towards(map, start, route[1])
            }
            // Cornered or nothing left to eat: turn around if that is possible.
            _ => {
                self.goal = None;
                let back = pac.dir().opposite();
                map.is_passable(map.neighbor(start, back), Access::PAC)
                    .then_some(back)
                    .filter(|_| Self::is_dangerous(map.neighbor(start, pac.dir()), ghosts))
            }
        }
    }
}
