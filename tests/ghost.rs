use pacman_rules::actor::ghost::{GhostId, GhostState};
use pacman_rules::events::{EventBus, GameEvent};
use pacman_rules::game::level::GameLevel;
use pacman_rules::game::variant::GameVariant;
use pacman_rules::map::direction::Direction;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn create_level() -> GameLevel {
    let mut level = GameLevel::new(1, false, GameVariant::PacMan.rules()).unwrap();
    // Keep Pac-Man on his start tile.
    level.pac_mut().rest(1_000);
    level
}

/// Puts every ghost on Pac-Man's tile, frightened.
fn frightened_on_pac(level: &mut GameLevel) {
    let tile = level.pac().tile();
    for id in GhostId::ALL {
        let ghost = level.ghost_mut(id);
        ghost.set_state(GhostState::Frightened);
        ghost.place(tile, Direction::Left);
    }
}

#[test]
fn test_bounty_doubles_per_ghost() {
    let mut events = EventBus::new();
    let mut level = create_level();
    level.activate_power(&mut events);
    frightened_on_pac(&mut level);

    let report = level.resolve_collisions(&mut events);

    assert_eq!(report.ghosts_killed.as_slice(), &GhostId::ALL);
    assert_eq!(report.points, 200 + 400 + 800 + 1600);
    let bounties: Vec<u32> = GhostId::ALL.iter().map(|id| level.ghost(*id).bounty()).collect();
    assert_eq!(bounties, vec![200, 400, 800, 1600]);
    assert_that(&level.ghosts().iter().all(|ghost| ghost.state() == GhostState::Eaten)).is_true();

    let eaten: Vec<_> = events
        .history()
        .filter_map(|event| match event {
            GameEvent::GhostEaten { ghost, bounty } => Some((*ghost, *bounty)),
            _ => None,
        })
        .collect();
    assert_eq!(
        eaten,
        vec![
            (GhostId::Red, 200),
            (GhostId::Pink, 400),
            (GhostId::Cyan, 800),
            (GhostId::Orange, 1600)
        ]
    );
}

#[test]
fn test_bounty_restarts_with_new_energizer() {
    let mut events = EventBus::new();
    let mut level = create_level();
    level.activate_power(&mut events);
    frightened_on_pac(&mut level);
    level.resolve_collisions(&mut events);
    assert_eq!(level.next_bounty(), 1600);

    level.activate_power(&mut events);
    assert_eq!(level.ghosts_killed_by_energizer(), 0);
    assert_eq!(level.next_bounty(), 200);
}

#[test]
fn test_all_sixteen_ghosts_award_bonus() {
    let mut events = EventBus::new();
    let mut level = create_level();

    let mut rounds = Vec::new();
    for _ in 0..4 {
        level.activate_power(&mut events);
        frightened_on_pac(&mut level);
        rounds.push(level.resolve_collisions(&mut events).points);
    }

    assert_eq!(rounds, vec![3000, 3000, 3000, 15_000]);
    assert_eq!(level.ghosts_killed_in_level(), 16);
}

#[test]
fn test_hunting_ghost_kills_pac_first_in_id_order() {
    let mut events = EventBus::new();
    let mut level = create_level();
    let tile = level.pac().tile();
    level.ghost_mut(GhostId::Red).set_state(GhostState::HuntingPac);
    level.ghost_mut(GhostId::Red).place(tile, Direction::Left);
    level.ghost_mut(GhostId::Pink).set_state(GhostState::Frightened);
    level.ghost_mut(GhostId::Pink).place(tile, Direction::Left);

    let report = level.resolve_collisions(&mut events);

    assert_that(&report.pac_killed).is_true();
    assert_that(&report.ghosts_killed.is_empty()).is_true();
    assert_that(&level.pac().is_dead()).is_true();
    assert_eq!(level.ghost(GhostId::Pink).state(), GhostState::Frightened);
}

#[test]
fn test_immune_pac_survives() {
    let mut events = EventBus::new();
    let mut level = create_level();
    level.set_pac_immune(true);
    let tile = level.pac().tile();
    level.ghost_mut(GhostId::Orange).set_state(GhostState::HuntingPac);
    level.ghost_mut(GhostId::Orange).place(tile, Direction::Left);

    let report = level.resolve_collisions(&mut events);
    assert_that(&report.pac_killed).is_false();
    assert_that(&level.pac().is_dead()).is_false();
}

#[test]
fn test_eaten_ghosts_start_returning() {
    let mut events = EventBus::new();
    let mut level = create_level();
    level.activate_power(&mut events);
    frightened_on_pac(&mut level);
    level.resolve_collisions(&mut events);

    level.start_ghosts_returning(&mut events);

    assert_that(&level.ghosts().iter().all(|ghost| ghost.state() == GhostState::ReturningHome)).is_true();
    let returning = events
        .history()
        .filter(|event| matches!(event, GameEvent::GhostStartsReturningHome { .. }))
        .count();
    assert_eq!(returning, 4);
}

#[test]
fn test_power_expiry_recovers_ghosts() {
    let mut events = EventBus::new();
    let mut level = create_level();
    level.start_hunting(&mut events);
    // Release the red ghost.
    level.simulate_tick(&mut events);
    level.activate_power(&mut events);
    assert_eq!(level.ghost(GhostId::Red).state(), GhostState::Frightened);

    let ticks = level.data().frightened_seconds * 60;
    for _ in 0..ticks {
        level.simulate_tick(&mut events);
    }

    assert_that(&level.is_power_active()).is_false();
    assert_that(&level.ghosts().iter().any(|ghost| ghost.state() == GhostState::Frightened)).is_false();
    let history: Vec<_> = events.history().copied().collect();
    assert_that(&history.contains(&GameEvent::PacStartsLosingPower)).is_true();
    assert_that(&history.contains(&GameEvent::PacLostPower)).is_true();
}

/// Eats the released red ghost on Pac-Man's tile under a fresh energizer and sends it home.
fn eat_red_and_send_home(level: &mut GameLevel, events: &mut EventBus) {
    level.start_hunting(events);
    level.simulate_tick(events);
    level.activate_power(events);
    let tile = level.pac().tile();
    level.ghost_mut(GhostId::Red).place(tile, Direction::Left);

    let report = level.resolve_collisions(events);
    assert_eq!(report.ghosts_killed.as_slice(), &[GhostId::Red]);
    level.start_ghosts_returning(events);
}

/// Ticks until the red ghost is back in the maze, returning every state it went through.
fn follow_red_out_of_house(level: &mut GameLevel, events: &mut EventBus) -> Vec<GhostState> {
    let mut states = vec![level.ghost(GhostId::Red).state()];
    for _ in 0..600 {
        level.simulate_tick(events);
        let state = level.ghost(GhostId::Red).state();
        if states.last() != Some(&state) {
            states.push(state);
        }
        if matches!(state, GhostState::HuntingPac | GhostState::Frightened) {
            break;
        }
    }
    states
}

#[test]
fn test_eaten_ghost_comes_back_hunting_under_same_power() {
    let mut events = EventBus::new();
    let mut level = create_level();
    eat_red_and_send_home(&mut level, &mut events);

    let states = follow_red_out_of_house(&mut level, &mut events);

    assert_eq!(
        states,
        vec![
            GhostState::ReturningHome,
            GhostState::EnteringHouse,
            GhostState::Locked,
            GhostState::LeavingHouse,
            GhostState::HuntingPac,
        ]
    );
    assert_that(&level.is_power_active()).is_true();
    assert_eq!(level.ghosts_killed_by_energizer(), 1);
    assert_eq!(level.ghosts_killed_in_level(), 1);
}

#[test]
fn test_returned_ghost_is_frightened_by_new_energizer() {
    let mut events = EventBus::new();
    let mut level = create_level();
    eat_red_and_send_home(&mut level, &mut events);
    let locked = (0..600).any(|_| {
        level.simulate_tick(&mut events);
        level.ghost(GhostId::Red).state() == GhostState::Locked
    });
    assert_that(&locked).is_true();

    level.activate_power(&mut events);
    let states = follow_red_out_of_house(&mut level, &mut events);

    assert_eq!(
        states,
        vec![GhostState::Locked, GhostState::LeavingHouse, GhostState::Frightened]
    );
}

#[test]
fn test_returned_ghost_hunts_without_power() {
    let mut events = EventBus::new();
    let mut level = create_level();
    level.start_hunting(&mut events);
    level.simulate_tick(&mut events);
    let tile = level.pac().tile();
    let red = level.ghost_mut(GhostId::Red);
    red.place(tile, Direction::Left);
    red.set_state(GhostState::ReturningHome);

    let states = follow_red_out_of_house(&mut level, &mut events);

    assert_eq!(states.last(), Some(&GhostState::HuntingPac));
    assert_that(&states.contains(&GhostState::Locked)).is_true();
    assert_that(&level.is_power_active()).is_false();
}
