//! One level of the game: maze, actors and the per-tick hunting simulation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::actor::ghost::{Ghost, GhostContext, GhostId, GhostState, GhostUpdate};
use crate::actor::pac::Pac;
use crate::actor::steering::{ManualSteering, RuleBasedSteering, Steering};
use crate::constants::mechanics::{
    ALL_GHOSTS_KILLED_POINTS, BONUS_EATEN_TICKS, BONUS_EDIBLE_TICKS, BONUS_PELLET_MILESTONES, ENERGIZER_POINTS,
    ENERGIZER_REST_TICKS, FIRST_GHOST_BOUNTY, FLASH_TICKS_PER_FLASH, HOUSE_SPEED, PELLET_POINTS, PELLET_REST_TICKS,
    RETURNING_SPEED,
};
use crate::constants::{BONUS_TILE, TICKS_PER_SECOND};
use crate::error::GameResult;
use crate::events::{EventBus, GameEvent};
use crate::game::bonus::{Bonus, BonusChange, BonusSymbol};
use crate::game::house::HouseControl;
use crate::game::hunting::HuntingTimer;
use crate::game::tables::{level_data, LevelData};
use crate::game::variant::VariantRules;
use crate::map::{Food, WorldMap};
use crate::timer::{TickDuration, TickTimer};

/// Ghosts eaten in one level that earn the extra bonus: four per energizer.
const ALL_GHOSTS_IN_LEVEL: u8 = 16;

/// What happened during one simulated tick, as far as the phase machine cares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub points: u32,
    pub pac_killed: bool,
    /// Ghosts eaten this tick, in ID order.
    pub ghosts_killed: SmallVec<[GhostId; 4]>,
    pub level_complete: bool,
}

impl TickReport {
    fn merge(&mut self, other: TickReport) {
        self.points += other.points;
        self.pac_killed |= other.pac_killed;
        self.ghosts_killed.extend(other.ghosts_killed);
        self.level_complete |= other.level_complete;
    }
}

#[derive(Debug)]
pub struct GameLevel {
    number: u32,
    demo: bool,
    rules: &'static VariantRules,
    data: &'static LevelData,
    map: WorldMap,
    pac: Pac,
    ghosts: [Ghost; 4],
    bonus: Bonus,
    hunting_timer: HuntingTimer,
    power_timer: TickTimer,
    power_fading: bool,
    house: HouseControl,
    rng: SmallRng,
    ghosts_killed_by_energizer: u8,
    ghosts_killed_in_level: u8,
    /// Ghosts eaten since the last energizer; they come back out of the house hunting.
    power_victims: SmallVec<[GhostId; 4]>,
    steering: Box<dyn Steering>,
    pac_immune: bool,
    started: bool,
}

impl GameLevel {
    /// Creates level `number` on the arcade maze. Demo levels are steered by the autopilot.
    pub fn new(number: u32, demo: bool, rules: &'static VariantRules) -> GameResult<Self> {
        let map = WorldMap::arcade()?;
        let ghosts = GhostId::ALL.map(|id| {
            let start = map.ghost_start(id.index());
            // The red ghost starts outside; it waits in the middle of the house when brought back.
            let home = if id == GhostId::Red { map.house_center() } else { start };
            Ghost::new(id, start, home)
        });
        let steering: Box<dyn Steering> = if demo {
            Box::new(RuleBasedSteering::default())
        } else {
            Box::new(ManualSteering)
        };
        let symbol = rules.bonus_symbol(number);

        debug!(number, demo, variant = %rules.variant, "Level created");
        Ok(Self {
            number,
            demo,
            rules,
            data: level_data(number),
            pac: Pac::new(map.pac_start()),
            map,
            ghosts,
            bonus: Bonus::new(symbol, rules.bonus_value(symbol)),
            hunting_timer: HuntingTimer::new(number),
            power_timer: TickTimer::default(),
            power_fading: false,
            house: HouseControl::new(number),
            rng: SmallRng::seed_from_u64(u64::from(number)),
            ghosts_killed_by_energizer: 0,
            ghosts_killed_in_level: 0,
            power_victims: SmallVec::new(),
            steering,
            pac_immune: false,
            started: false,
        })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn data(&self) -> &'static LevelData {
        self.data
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut WorldMap {
        &mut self.map
    }

    pub fn pac(&self) -> &Pac {
        &self.pac
    }

    pub fn pac_mut(&mut self) -> &mut Pac {
        &mut self.pac
    }

    pub fn ghosts(&self) -> &[Ghost; 4] {
        &self.ghosts
    }

    pub fn ghost(&self, id: GhostId) -> &Ghost {
        &self.ghosts[id.index()]
    }

    pub fn ghost_mut(&mut self, id: GhostId) -> &mut Ghost {
        &mut self.ghosts[id.index()]
    }

    /// The symbol this level is counted with, whatever the bonus currently shows.
    pub fn level_symbol(&self) -> BonusSymbol {
        self.rules.bonus_symbol(self.number)
    }

    pub fn bonus(&self) -> &Bonus {
        &self.bonus
    }

    pub fn hunting_timer(&self) -> &HuntingTimer {
        &self.hunting_timer
    }

    pub fn power_timer(&self) -> &TickTimer {
        &self.power_timer
    }

    pub fn house(&self) -> &HouseControl {
        &self.house
    }

    /// How often the maze flashes when this level is completed.
    pub fn num_flashes(&self) -> u32 {
        self.data.num_flashes
    }

    pub fn is_power_active(&self) -> bool {
        self.power_timer.is_running()
    }

    /// True once the remaining power time is short enough for frightened ghosts to flash.
    pub fn is_power_fading(&self) -> bool {
        self.power_fading
    }

    pub fn ghosts_killed_by_energizer(&self) -> u8 {
        self.ghosts_killed_by_energizer
    }

    pub fn ghosts_killed_in_level(&self) -> u8 {
        self.ghosts_killed_in_level
    }

    /// The bounty the next frightened ghost is worth.
    pub fn next_bounty(&self) -> u32 {
        FIRST_GHOST_BOUNTY << self.ghosts_killed_by_energizer.min(3)
    }

    pub fn is_complete(&self) -> bool {
        self.map.food_remaining() == 0
    }

    pub fn set_steering(&mut self, steering: Box<dyn Steering>) {
        self.steering = steering;
    }

    /// An immune Pac-Man is not killed by hunting ghosts.
    pub fn set_pac_immune(&mut self, immune: bool) {
        self.pac_immune = immune;
    }

    pub fn set_actors_visible(&mut self, visible: bool) {
        self.pac.set_visible(visible);
        self.set_ghosts_visible(visible);
    }

    pub fn set_ghosts_visible(&mut self, visible: bool) {
        for ghost in self.ghosts.iter_mut() {
            ghost.set_visible(visible);
        }
    }

    /// Puts every actor back on its start tile and forgets power, bonus and hunting progress.
    pub fn reset_actors(&mut self) {
        self.pac.place(self.map.pac_start());
        for ghost in self.ghosts.iter_mut() {
            ghost.reset();
        }
        self.power_timer = TickTimer::default();
        self.power_fading = false;
        self.ghosts_killed_by_energizer = 0;
        self.power_victims.clear();
        self.bonus.deactivate();
        self.hunting_timer.reset();
    }

    /// Pac-Man lost a life in this level; locked ghosts now follow the global dot counter.
    pub fn on_life_lost(&mut self) {
        self.house.on_life_lost();
    }

    /// Freezes the level: no more hunting, power or bonus.
    pub fn stop_all(&mut self) {
        self.hunting_timer.stop();
        self.power_timer.stop();
        self.bonus.deactivate();
    }

    /// Marks the level as started. Returns true the first time only.
    pub fn mark_started(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Starts the first hunting phase unless one is already in progress.
    pub fn start_hunting(&mut self, events: &mut EventBus) {
        if self.hunting_timer.phase().is_some() {
            return;
        }
        let phase = self.hunting_timer.start_hunting_phase(0);
        events.publish(GameEvent::HuntingPhaseStarted {
            index: phase.index,
            kind: phase.kind,
        });
    }

    /// Simulates one tick of hunting.
    pub fn simulate_tick(&mut self, events: &mut EventBus) -> TickReport {
        let mut report = TickReport::default();

        self.update_hunting_timer(events);

        if let Some(dir) = self.steering.steer(&self.map, &self.pac, &self.ghosts) {
            self.pac.set_wish_dir(dir);
        }
        let speed = self.pac_speed();
        if let Some(tile) = self.pac.update(&self.map, speed) {
            self.on_pac_entered(tile, events, &mut report);
        }
        report.merge(self.resolve_collisions(events));

        if !report.pac_killed {
            self.update_house(events);
            self.update_ghosts(events);
            report.merge(self.resolve_collisions(events));
        }

        self.update_power(events);
        self.update_bonus(events, &mut report);
        report.level_complete = self.is_complete();
        report
    }

    fn update_hunting_timer(&mut self, events: &mut EventBus) {
        if self.hunting_timer.phase().is_none() {
            return;
        }
        self.hunting_timer.tick();
        if self.hunting_timer.has_expired() {
            let phase = self.hunting_timer.start_next_phase();
            events.publish(GameEvent::HuntingPhaseStarted {
                index: phase.index,
                kind: phase.kind,
            });
            for ghost in self.ghosts.iter_mut() {
                ghost.reverse();
            }
        }
    }

    fn on_pac_entered(&mut self, tile: glam::IVec2, events: &mut EventBus, report: &mut TickReport) {
        let Some(food) = self.map.eat_food(tile) else {
            return;
        };
        events.publish(GameEvent::PacFoundFood { tile, food });
        let next_locked = self.next_locked_ghost();
        self.house.on_food_eaten(next_locked);

        match food {
            Food::Pellet => {
                report.points += PELLET_POINTS;
                self.pac.rest(PELLET_REST_TICKS);
            }
            Food::Energizer => {
                report.points += ENERGIZER_POINTS;
                self.pac.rest(ENERGIZER_REST_TICKS);
                self.activate_power(events);
            }
        }

        if BONUS_PELLET_MILESTONES.contains(&self.map.food_eaten()) {
            self.activate_bonus(events);
        }
    }

    /// Pac-Man ate an energizer: ghosts in the maze turn frightened, and the bounty starts over.
    pub fn activate_power(&mut self, events: &mut EventBus) {
        self.ghosts_killed_by_energizer = 0;
        self.power_victims.clear();
        let seconds = self.data.frightened_seconds;
        if seconds == 0 {
            for ghost in self.ghosts.iter_mut() {
                ghost.reverse();
            }
            return;
        }

        for ghost in self.ghosts.iter_mut() {
            ghost.frighten();
        }
        let ticks = seconds * TICKS_PER_SECOND;
        self.power_timer.restart(TickDuration::Ticks(ticks));
        self.power_fading = false;
        events.publish(GameEvent::PacGetsPower { ticks });
    }

    fn update_power(&mut self, events: &mut EventBus) {
        if !self.power_timer.is_running() {
            return;
        }
        self.power_timer.tick();

        let flash_ticks = self.num_flashes() * FLASH_TICKS_PER_FLASH;
        if !self.power_fading && self.power_timer.remaining().is_some_and(|left| left <= flash_ticks) {
            self.power_fading = true;
            events.publish(GameEvent::PacStartsLosingPower);
        }

        if self.power_timer.has_expired() {
            self.power_timer = TickTimer::default();
            self.power_fading = false;
            self.power_victims.clear();
            for ghost in self.ghosts.iter_mut() {
                ghost.recover();
            }
            events.publish(GameEvent::PacLostPower);
        }
    }

    fn next_locked_ghost(&self) -> Option<GhostId> {
        self.ghosts
            .iter()
            .find(|ghost| ghost.state() == GhostState::Locked)
            .map(Ghost::id)
    }

    fn update_house(&mut self, events: &mut EventBus) {
        let next_locked = self.next_locked_ghost();
        if let Some((id, _)) = self.house.update(next_locked) {
            let frightened = self.leaves_frightened(id);
            self.ghosts[id.index()].start_leaving_house(&self.map, frightened);
            events.publish(GameEvent::GhostReleased { ghost: id });
        }
    }

    /// Food remaining at or below which the red ghost speeds up: 0 for none, 1 or 2 for the "Elroy" stage.
    pub fn elroy_stage(&self) -> u8 {
        let remaining = self.map.food_remaining();
        if remaining <= self.data.elroy2_dots {
            2
        } else if remaining <= self.data.elroy1_dots {
            1
        } else {
            0
        }
    }

    fn pac_speed(&self) -> u32 {
        if self.is_power_active() && self.data.pac_power_speed > 0 {
            self.data.pac_power_speed
        } else {
            self.data.pac_speed
        }
    }

    fn ghost_speed(&self, id: GhostId) -> u32 {
        let ghost = self.ghost(id);
        let in_tunnel = self.map.is_tunnel(ghost.tile());
        match ghost.state() {
            GhostState::Locked | GhostState::Eaten => 0,
            GhostState::LeavingHouse | GhostState::EnteringHouse => HOUSE_SPEED,
            GhostState::ReturningHome => RETURNING_SPEED,
            _ if in_tunnel => self.data.ghost_tunnel_speed,
            GhostState::Frightened if self.data.ghost_frightened_speed > 0 => self.data.ghost_frightened_speed,
            GhostState::HuntingPac if id == GhostId::Red => match self.elroy_stage() {
                2 => self.data.elroy2_speed,
                1 => self.data.elroy1_speed,
                _ => self.data.ghost_speed,
            },
            _ => self.data.ghost_speed,
        }
    }

    fn ghost_target(&self, id: GhostId) -> glam::IVec2 {
        let ghost = self.ghost(id);
        // Once sped up, the red ghost keeps chasing through scatter phases.
        let scatter = self.hunting_timer.in_scatter_phase() && !(id == GhostId::Red && self.elroy_stage() > 0);
        if scatter {
            id.scatter_target()
        } else {
            id.chase_target(ghost.tile(), self.pac.mover(), self.ghost(GhostId::Red).tile())
        }
    }

    /// A ghost leaving the house is frightened while power lasts, unless it was already eaten under this power.
    fn leaves_frightened(&self, id: GhostId) -> bool {
        self.is_power_active() && !self.power_victims.contains(&id)
    }

    fn update_ghosts(&mut self, events: &mut EventBus) {
        for id in GhostId::ALL {
            let ctx = GhostContext {
                target: self.ghost_target(id),
                speed: self.ghost_speed(id),
                leave_frightened: self.leaves_frightened(id),
            };
            match self.ghosts[id.index()].update(&self.map, ctx, &mut self.rng) {
                Some(GhostUpdate::ReachedHouse) => events.publish(GameEvent::GhostEntersHouse { ghost: id }),
                Some(update) => trace!(ghost = %id, ?update, "Ghost moved through the house"),
                None => {}
            }
        }
    }

    /// Resolves every ghost sharing Pac-Man's tile, in ghost ID order.
    ///
    /// Frightened ghosts are eaten for an escalating bounty; the first hunting ghost kills Pac-Man.
    pub fn resolve_collisions(&mut self, events: &mut EventBus) -> TickReport {
        let mut report = TickReport::default();
        if self.pac.is_dead() {
            return report;
        }

        for id in GhostId::ALL {
            if self.ghosts[id.index()].tile() != self.pac.tile() {
                continue;
            }
            match self.ghosts[id.index()].state() {
                GhostState::Frightened => {
                    let bounty = self.next_bounty();
                    self.ghosts[id.index()].eaten(bounty);
                    self.ghosts_killed_by_energizer += 1;
                    self.ghosts_killed_in_level += 1;
                    self.power_victims.push(id);
                    report.points += bounty;
                    report.ghosts_killed.push(id);
                    debug!(ghost = %id, bounty, "Ghost eaten");
                    events.publish(GameEvent::GhostEaten { ghost: id, bounty });

                    if self.ghosts_killed_in_level == ALL_GHOSTS_IN_LEVEL {
                        report.points += ALL_GHOSTS_KILLED_POINTS;
                        debug!(points = ALL_GHOSTS_KILLED_POINTS, "All ghosts of the level eaten");
                    }
                }
                GhostState::HuntingPac if !self.pac_immune => {
                    debug!(ghost = %id, tile = ?self.pac.tile(), "Pac-Man caught");
                    self.pac.die();
                    report.pac_killed = true;
                    break;
                }
                _ => {}
            }
        }
        report
    }

    /// Sends every eaten ghost back to the house.
    pub fn start_ghosts_returning(&mut self, events: &mut EventBus) {
        for ghost in self.ghosts.iter_mut() {
            if ghost.start_returning_home() {
                events.publish(GameEvent::GhostStartsReturningHome { ghost: ghost.id() });
            }
        }
    }

    fn activate_bonus(&mut self, events: &mut EventBus) {
        let symbol = if self.rules.has_random_bonus(self.number) {
            let symbols = self.rules.bonus_symbols;
            symbols[self.rng.random_range(0..symbols.len())]
        } else {
            self.rules.bonus_symbol(self.number)
        };
        self.bonus.activate(symbol, self.rules.bonus_value(symbol), BONUS_EDIBLE_TICKS);
        events.publish(GameEvent::BonusActivated { symbol });
    }

    fn update_bonus(&mut self, events: &mut EventBus, report: &mut TickReport) {
        if let Some(BonusChange::Expired(symbol)) = self.bonus.tick() {
            events.publish(GameEvent::BonusExpired { symbol });
        }
        if self.bonus.is_edible() && self.pac.tile() == BONUS_TILE {
            if let Some(points) = self.bonus.eat(BONUS_EATEN_TICKS) {
                report.points += points;
                events.publish(GameEvent::BonusEaten {
                    symbol: self.bonus.symbol(),
                    points,
                });
            }
        }
    }
}
