//! The ghosts and their behavior state machine.
//!
//! ```text
//! LOCKED -> LEAVING_HOUSE -> HUNTING_PAC <-> FRIGHTENED -> EATEN -> RETURNING_HOME -> ENTERING_HOUSE -> LOCKED
//! ```
//!
//! Transitions caused by game events (power gained or lost, being caught) are methods called by the
//! level; the scripted ones (leaving and entering the house) happen inside [`Ghost::update`].

use glam::IVec2;
use rand::rngs::SmallRng;
use rand::Rng;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::trace;

use crate::actor::{direction_towards, Mover};
use crate::constants::SCATTER_TARGETS;
use crate::map::direction::Direction;
use crate::map::{Access, WorldMap};

/// The four ghosts, in the order simultaneous events are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum GhostId {
    Red,
    Pink,
    Cyan,
    Orange,
}

impl GhostId {
    pub const ALL: [GhostId; 4] = [GhostId::Red, GhostId::Pink, GhostId::Cyan, GhostId::Orange];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The corner this ghost heads for while scattering.
    pub fn scatter_target(self) -> IVec2 {
        SCATTER_TARGETS[self.index()]
    }

    /// The tile this ghost aims at while chasing.
    ///
    /// `ghost_tile` is this ghost's own tile, `red_tile` the red ghost's (used by the cyan ghost).
    pub fn chase_target(self, ghost_tile: IVec2, pac: &Mover, red_tile: IVec2) -> IVec2 {
        match self {
            GhostId::Red => pac.tile,
            GhostId::Pink => pac.ahead(4),
            GhostId::Cyan => pac.ahead(2) * 2 - red_tile,
            GhostId::Orange => {
                if ghost_tile.distance_squared(pac.tile) > 8 * 8 {
                    pac.tile
                } else {
                    self.scatter_target()
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GhostState {
    Locked,
    LeavingHouse,
    HuntingPac,
    Frightened,
    Eaten,
    ReturningHome,
    EnteringHouse,
}

/// A scripted transition that happened while a ghost moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostUpdate {
    /// Reached the house entry from inside; now hunting (or frightened).
    LeftHouse,
    /// Reached the house entry on the way back; now entering.
    ReachedHouse,
    /// Back on its home tile inside the house; now locked.
    ArrivedHome,
}

/// Per-tick input the level computes for a ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostContext {
    pub target: IVec2,
    pub speed: u32,
    /// A ghost finishing its way out of the house comes out frightened instead of hunting.
    pub leave_frightened: bool,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    id: GhostId,
    state: GhostState,
    mover: Mover,
    start_tile: IVec2,
    home_tile: IVec2,
    reverse_pending: bool,
    bounty: u32,
    visible: bool,
}

impl Ghost {
    /// Creates a locked ghost. `home_tile` is where it waits inside the house after being eaten.
    pub fn new(id: GhostId, start_tile: IVec2, home_tile: IVec2) -> Self {
        let mut ghost = Self {
            id,
            state: GhostState::Locked,
            mover: Mover::new(start_tile, Direction::Left),
            start_tile,
            home_tile,
            reverse_pending: false,
            bounty: 0,
            visible: false,
        };
        ghost.reset();
        ghost
    }

    /// Puts the ghost back on its start tile, locked.
    pub fn reset(&mut self) {
        let dir = match self.id {
            GhostId::Red => Direction::Left,
            GhostId::Pink => Direction::Down,
            GhostId::Cyan | GhostId::Orange => Direction::Up,
        };
        self.mover.place(self.start_tile, dir);
        self.state = GhostState::Locked;
        self.reverse_pending = false;
        self.bounty = 0;
    }

    pub fn id(&self) -> GhostId {
        self.id
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    pub fn in_state(&self, states: &[GhostState]) -> bool {
        states.contains(&self.state)
    }

    pub fn tile(&self) -> IVec2 {
        self.mover.tile
    }

    pub fn dir(&self) -> Direction {
        self.mover.dir
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn home_tile(&self) -> IVec2 {
        self.home_tile
    }

    /// Points awarded the last time this ghost was eaten.
    pub fn bounty(&self) -> u32 {
        self.bounty
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Moves the ghost to a tile without changing its state.
    pub fn place(&mut self, tile: IVec2, dir: Direction) {
        self.mover.place(tile, dir);
    }

    pub fn set_state(&mut self, state: GhostState) {
        if self.state != state {
            trace!(ghost = %self.id, from = %self.state, to = %state, "Ghost state changed");
            self.state = state;
        }
    }

    /// Releases a locked ghost. A ghost waiting outside the house starts hunting right away.
    pub fn start_leaving_house(&mut self, map: &WorldMap, frightened: bool) -> GhostState {
        if self.state != GhostState::Locked {
            return self.state;
        }
        if map.is_passable(self.tile(), Access::GHOST) {
            self.set_state(Self::outside_state(frightened));
        } else {
            self.set_state(GhostState::LeavingHouse);
        }
        self.state
    }

    fn outside_state(frightened: bool) -> GhostState {
        if frightened {
            GhostState::Frightened
        } else {
            GhostState::HuntingPac
        }
    }

    /// Reverses the heading of a ghost roaming the maze at its next step.
    pub fn reverse(&mut self) {
        if self.in_state(&[GhostState::HuntingPac, GhostState::Frightened]) {
            self.reverse_pending = true;
        }
    }

    /// Pac-Man gained power. Returns true if this ghost is now frightened.
    pub fn frighten(&mut self) -> bool {
        if !self.in_state(&[GhostState::HuntingPac, GhostState::Frightened]) {
            return false;
        }
        self.set_state(GhostState::Frightened);
        self.reverse();
        true
    }

    /// Pac-Man lost power.
    pub fn recover(&mut self) {
        if self.state == GhostState::Frightened {
            self.set_state(GhostState::HuntingPac);
        }
    }

    /// Pac-Man caught this frightened ghost.
    pub fn eaten(&mut self, bounty: u32) {
        if self.state == GhostState::Frightened {
            self.bounty = bounty;
            self.reverse_pending = false;
            self.set_state(GhostState::Eaten);
        }
    }

    /// The eaten ghost heads back to the house.
    pub fn start_returning_home(&mut self) -> bool {
        if self.state != GhostState::Eaten {
            return false;
        }
        self.mover.halt();
        self.set_state(GhostState::ReturningHome);
        true
    }

    /// Moves the ghost for one tick according to its state.
    pub fn update(&mut self, map: &WorldMap, ctx: GhostContext, rng: &mut SmallRng) -> Option<GhostUpdate> {
        if matches!(self.state, GhostState::Locked | GhostState::Eaten) {
            return None;
        }

        for _ in 0..self.mover.earn(ctx.speed) {
            let update = match self.state {
                GhostState::LeavingHouse => self.step_leaving_house(map, ctx.leave_frightened),
                GhostState::HuntingPac => {
                    self.step_roaming(map, |ghost, options| ghost.closest_to(map, options, ctx.target));
                    None
                }
                GhostState::Frightened => {
                    self.step_roaming(map, |_, options| options[rng.random_range(0..options.len())]);
                    None
                }
                GhostState::ReturningHome => self.step_returning_home(map),
                GhostState::EnteringHouse => self.step_entering_house(map),
                GhostState::Locked | GhostState::Eaten => None,
            };
            if update.is_some() {
                return update;
            }
        }
        None
    }

    fn step_leaving_house(&mut self, map: &WorldMap, frightened: bool) -> Option<GhostUpdate> {
        let entry = map.house_entry();
        self.mover.dir = match self.tile().x.cmp(&entry.x) {
            std::cmp::Ordering::Less => Direction::Right,
            std::cmp::Ordering::Greater => Direction::Left,
            std::cmp::Ordering::Equal => Direction::Up,
        };
        self.mover.step(map);

        if self.tile() == entry {
            self.mover.dir = Direction::Left;
            self.mover.halt();
            self.set_state(Self::outside_state(frightened));
            return Some(GhostUpdate::LeftHouse);
        }
        None
    }

    fn step_entering_house(&mut self, map: &WorldMap) -> Option<GhostUpdate> {
        let center = map.house_center();
        self.mover.dir = if self.tile().y < center.y {
            Direction::Down
        } else if self.tile().x < self.home_tile.x {
            Direction::Right
        } else {
            Direction::Left
        };
        if self.tile() != self.home_tile {
            self.mover.step(map);
        }

        if self.tile() == self.home_tile {
            self.mover.dir = Direction::Up;
            self.mover.halt();
            self.set_state(GhostState::Locked);
            return Some(GhostUpdate::ArrivedHome);
        }
        None
    }

    fn step_returning_home(&mut self, map: &WorldMap) -> Option<GhostUpdate> {
        let entry = map.house_entry();
        if self.tile() != entry {
            let next = map
                .path(self.tile(), entry, Access::GHOST)
                .and_then(|path| path.get(1).copied())
                .and_then(|next| direction_towards(map, self.tile(), next));
            match next {
                Some(dir) => {
                    self.mover.dir = dir;
                    self.mover.step(map);
                }
                None => self.mover.halt(),
            }
        }

        if self.tile() == entry {
            self.mover.halt();
            self.set_state(GhostState::EnteringHouse);
            return Some(GhostUpdate::ReachedHouse);
        }
        None
    }

    /// Takes one step through the maze, never reversing unless told to or stuck in a dead end.
    fn step_roaming(&mut self, map: &WorldMap, mut choose: impl FnMut(&Self, &[Direction]) -> Direction) {
        if self.reverse_pending {
            self.reverse_pending = false;
            self.mover.dir = self.mover.dir.opposite();
        } else {
            let options: SmallVec<[Direction; 4]> = Direction::DIRECTIONS
                .into_iter()
                .filter(|dir| *dir != self.mover.dir.opposite())
                .filter(|dir| map.is_passable(map.neighbor(self.tile(), *dir), Access::GHOST))
                .collect();
            self.mover.dir = if options.is_empty() {
                self.mover.dir.opposite()
            } else {
                choose(&*self, &options)
            };
        }

        if map.is_passable(map.neighbor(self.tile(), self.mover.dir), Access::GHOST) {
            self.mover.step(map);
        } else {
            self.mover.halt();
        }
    }

    /// The option whose next tile is closest to `target`; ties go to the earlier direction.
    fn closest_to(&self, map: &WorldMap, options: &[Direction], target: IVec2) -> Direction {
        let mut best: Option<(Direction, i32)> = None;
        for dir in options {
            let distance = map.neighbor(self.tile(), *dir).distance_squared(target);
            if best.is_none_or(|(_, shortest)| distance < shortest) {
                best = Some((*dir, distance));
            }
        }
        best.map_or(self.mover.dir, |(dir, _)| dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn hunting_red(map: &WorldMap) -> Ghost {
        let mut ghost = Ghost::new(GhostId::Red, map.ghost_start(0), map.house_center());
        ghost.start_leaving_house(map, false);
        ghost
    }

    #[test]
    fn test_red_starts_hunting_immediately() {
        let map = WorldMap::arcade().unwrap();
        let ghost = hunting_red(&map);
        assert_eq!(ghost.state(), GhostState::HuntingPac);
    }

    #[test]
    fn test_pink_leaves_through_the_door() {
        let map = WorldMap::arcade().unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ghost = Ghost::new(GhostId::Pink, map.ghost_start(1), map.ghost_start(1));
        assert_eq!(ghost.start_leaving_house(&map, false), GhostState::LeavingHouse);

        let ctx = GhostContext {
            target: IVec2::ZERO,
            speed: 100,
            leave_frightened: true,
        };
        let left = (0..120).find_map(|_| ghost.update(&map, ctx, &mut rng));
        assert_eq!(left, Some(GhostUpdate::LeftHouse));
        assert_eq!(ghost.tile(), map.house_entry());
        assert_eq!(ghost.state(), GhostState::Frightened);
    }

    #[test]
    fn test_frighten_ignores_ghosts_in_house() {
        let map = WorldMap::arcade().unwrap();
        let mut ghost = Ghost::new(GhostId::Cyan, map.ghost_start(2), map.ghost_start(2));
        assert!(!ghost.frighten());
        assert_eq!(ghost.state(), GhostState::Locked);
    }

    #[test]
    fn test_eaten_ghost_returns_home_and_locks() {
        let map = WorldMap::arcade().unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ghost = hunting_red(&map);
        ghost.place(IVec2::new(1, 1), Direction::Left);
        ghost.frighten();
        ghost.eaten(200);
        assert_eq!(ghost.state(), GhostState::Eaten);
        assert!(ghost.start_returning_home());

        let ctx = GhostContext {
            target: IVec2::ZERO,
            speed: 150,
            leave_frightened: false,
        };
        let updates: Vec<_> = (0..600).filter_map(|_| ghost.update(&map, ctx, &mut rng)).collect();
        assert_eq!(updates, vec![GhostUpdate::ReachedHouse, GhostUpdate::ArrivedHome]);
        assert_eq!(ghost.tile(), map.house_center());
        assert_eq!(ghost.state(), GhostState::Locked);
    }

    #[test]
    fn test_eaten_ghost_forgets_pending_reverse() {
        let map = WorldMap::arcade().unwrap();
        let mut ghost = hunting_red(&map);
        assert!(ghost.frighten());
        assert!(ghost.reverse_pending);

        ghost.eaten(200);
        assert!(!ghost.reverse_pending);
    }

    #[test]
    fn test_ties_prefer_up_then_left() {
        let map = WorldMap::arcade().unwrap();
        let ghost = hunting_red(&map);
        // Target straight below: left and right are equally close.
        let options = [Direction::Left, Direction::Right];
        let equidistant = ghost.tile() + IVec2::new(0, 5);
        assert_eq!(ghost.closest_to(&map, &options, equidistant), Direction::Left);
    }
}
