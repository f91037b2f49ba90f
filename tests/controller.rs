use glam::IVec2;
use pacman_rules::actor::ghost::{GhostId, GhostState};
use pacman_rules::clock::GameClock;
use pacman_rules::config::SimulationConfig;
use pacman_rules::controller::phases::ReadyKind;
use pacman_rules::controller::{GameController, GamePhase, Phase};
use pacman_rules::events::GameEvent;
use pacman_rules::game::bonus::BonusSymbol;
use pacman_rules::map::direction::Direction;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{
    create_controller, create_hunting_controller, record_events, start_paid_game, tick, tick_until, PHASE_TICK_LIMIT,
};

/// Holds Pac-Man in place and drops a ghost in the given state onto his tile.
fn ghost_on_pac(controller: &mut GameController, id: GhostId, state: GhostState) {
    let level = controller.model_mut().level_mut().unwrap();
    level.pac_mut().rest(1_000);
    let tile = level.pac().tile();
    let ghost = level.ghost_mut(id);
    ghost.set_state(state);
    ghost.place(tile, Direction::Left);
}

fn eat_all_food(controller: &mut GameController) {
    let level = controller.model_mut().level_mut().unwrap();
    level.pac_mut().rest(1_000);
    let tiles: Vec<IVec2> = level.map().food_tiles().collect();
    for tile in tiles {
        level.map_mut().eat_food(tile);
    }
}

#[test]
fn test_boot_then_intro() {
    let mut controller = create_controller();
    assert_eq!(controller.current_phase(), GamePhase::Boot);
    assert_eq!(tick_until(&mut controller, GamePhase::Intro, PHASE_TICK_LIMIT), 240);
    assert_eq!(controller.previous_phase(), Some(GamePhase::Boot));
}

#[test]
fn test_new_game_reaches_hunting() {
    let mut controller = create_controller();
    let events = record_events(&mut controller);
    start_paid_game(&mut controller);

    assert!(matches!(controller.phase(), Phase::Ready(state) if state.kind() == ReadyKind::NewGame));
    assert_eq!(tick_until(&mut controller, GamePhase::Hunting, PHASE_TICK_LIMIT), 240);

    let model = controller.model();
    assert_eq!(model.lives(), 3);
    assert_eq!(model.score(), 0);
    assert_that(&model.is_playing()).is_true();
    assert_eq!(model.level().map(|level| level.number()), Some(1));
    // The credit is only taken when the game ends.
    assert_eq!(model.coins().credit(), 1);

    let events = events.borrow();
    assert_that(&events.contains(&GameEvent::GameStarted)).is_true();
    assert_that(&events.contains(&GameEvent::LevelStarted { number: 1 })).is_true();
    assert_that(&events.contains(&GameEvent::GameStateChanged {
        old: GamePhase::Ready,
        new: GamePhase::Hunting,
    }))
    .is_true();
}

#[test]
fn test_last_life_lost_ends_game() {
    let mut controller = create_hunting_controller();
    controller.model_mut().set_lives(1);
    ghost_on_pac(&mut controller, GhostId::Red, GhostState::HuntingPac);

    tick(&mut controller, 1);
    assert_eq!(controller.current_phase(), GamePhase::PacmanDying);

    assert_eq!(tick_until(&mut controller, GamePhase::GameOver, PHASE_TICK_LIMIT), 240);
    assert_eq!(controller.model().lives(), 0);
    assert_that(&controller.model().is_playing()).is_false();
    assert_eq!(controller.model().coins().credit(), 0);

    assert_eq!(tick_until(&mut controller, GamePhase::Intro, PHASE_TICK_LIMIT), 120);
}

#[test]
fn test_lost_life_resumes_level() {
    let mut controller = create_hunting_controller();
    ghost_on_pac(&mut controller, GhostId::Red, GhostState::HuntingPac);
    tick(&mut controller, 1);
    tick_until(&mut controller, GamePhase::Ready, PHASE_TICK_LIMIT);

    assert_eq!(controller.model().lives(), 2);
    assert!(matches!(controller.phase(), Phase::Ready(state) if state.kind() == ReadyKind::Resume));

    let level = controller.model().level().unwrap();
    assert_eq!(level.number(), 1);
    assert_eq!(level.pac().tile(), level.map().pac_start());
    assert_that(&level.pac().is_dead()).is_false();
    assert_eq!(level.house().global_counter(), Some(0));
    assert_eq!(level.ghost(GhostId::Red).state(), GhostState::Locked);

    assert_eq!(tick_until(&mut controller, GamePhase::Hunting, PHASE_TICK_LIMIT), 90);
}

#[test]
fn test_eaten_ghost_pauses_hunting() {
    let mut controller = create_hunting_controller();
    let hunting_elapsed = controller.model().level().unwrap().hunting_timer().timer().elapsed();
    ghost_on_pac(&mut controller, GhostId::Red, GhostState::Frightened);

    tick(&mut controller, 1);
    assert_eq!(controller.current_phase(), GamePhase::GhostDying);
    assert_eq!(controller.model().score(), 200);
    assert_eq!(controller.model().level().unwrap().ghost(GhostId::Red).state(), GhostState::Eaten);
    assert_that(&controller.model().level().unwrap().pac().is_visible()).is_false();

    assert_eq!(tick_until(&mut controller, GamePhase::Hunting, PHASE_TICK_LIMIT), 60);
    assert_eq!(controller.previous_phase(), Some(GamePhase::GhostDying));

    let level = controller.model().level().unwrap();
    assert_eq!(level.ghost(GhostId::Red).state(), GhostState::ReturningHome);
    assert_that(&level.pac().is_visible()).is_true();
    // The hunting schedule carries on from where it was interrupted.
    assert_eq!(level.hunting_timer().phase_index(), Some(0));
    assert_eq!(level.hunting_timer().timer().elapsed(), hunting_elapsed + 1);
}

#[test]
fn test_cleared_level_moves_to_next() {
    let mut controller = create_hunting_controller();
    eat_all_food(&mut controller);

    tick(&mut controller, 1);
    assert_eq!(controller.current_phase(), GamePhase::LevelComplete);

    tick_until(&mut controller, GamePhase::LevelTransition, PHASE_TICK_LIMIT);
    assert_eq!(controller.model().level_counter(), &[BonusSymbol::Cherries]);
    assert_eq!(controller.model().level().map(|level| level.number()), Some(2));

    tick_until(&mut controller, GamePhase::Ready, PHASE_TICK_LIMIT);
    assert!(matches!(controller.phase(), Phase::Ready(state) if state.kind() == ReadyKind::Resume));
}

#[test]
fn test_intermission_after_level_two() {
    let mut controller = create_hunting_controller();
    let events = record_events(&mut controller);
    controller.model_mut().create_level(2, false).unwrap();
    eat_all_food(&mut controller);

    tick(&mut controller, 1);
    tick_until(&mut controller, GamePhase::Intermission, PHASE_TICK_LIMIT);
    assert!(matches!(controller.phase(), Phase::Intermission(state) if state.number() == 1));
    assert_that(&events.borrow().contains(&GameEvent::IntermissionStarted { number: 1 })).is_true();

    tick_until(&mut controller, GamePhase::LevelTransition, PHASE_TICK_LIMIT);
    assert_eq!(controller.model().level().map(|level| level.number()), Some(3));
}

#[test]
fn test_cutscenes_can_be_disabled() {
    let config = SimulationConfig {
        cutscenes_enabled: false,
        ..SimulationConfig::default()
    };
    let mut controller = GameController::new(config).unwrap();
    start_paid_game(&mut controller);
    tick_until(&mut controller, GamePhase::Hunting, PHASE_TICK_LIMIT);
    controller.model_mut().create_level(2, false).unwrap();
    eat_all_food(&mut controller);

    tick(&mut controller, 1);
    tick_until(&mut controller, GamePhase::LevelTransition, PHASE_TICK_LIMIT);
    assert_eq!(controller.previous_phase(), Some(GamePhase::LevelComplete));
}

#[test]
fn test_demo_runs_without_credit() {
    let mut controller = create_controller();
    tick_until(&mut controller, GamePhase::Ready, PHASE_TICK_LIMIT);

    assert!(matches!(controller.phase(), Phase::Ready(state) if state.kind() == ReadyKind::Demo));
    assert_that(&controller.model().is_demo_level()).is_true();
    assert_that(&controller.model().is_playing()).is_false();

    tick_until(&mut controller, GamePhase::Hunting, PHASE_TICK_LIMIT);
    tick(&mut controller, 600);
    assert_eq!(controller.model().score(), 0);
}

#[test]
fn test_coin_interrupts_demo() {
    let mut controller = create_controller();
    tick_until(&mut controller, GamePhase::Hunting, PHASE_TICK_LIMIT);
    assert_that(&controller.model().is_demo_level()).is_true();

    assert!(controller.insert_coin().unwrap());
    assert_eq!(controller.current_phase(), GamePhase::Credit);
    assert_that(&controller.model().level().is_none()).is_true();

    assert!(controller.start_game().unwrap());
    assert!(matches!(controller.phase(), Phase::Ready(state) if state.kind() == ReadyKind::NewGame));
    assert_that(&controller.model().is_demo_level()).is_false();
}

#[test]
fn test_coin_during_game_only_adds_credit() {
    let mut controller = create_hunting_controller();
    assert!(controller.insert_coin().unwrap());
    assert_eq!(controller.current_phase(), GamePhase::Hunting);
    assert_eq!(controller.model().coins().credit(), 2);
}

#[test]
fn test_coin_during_boot_keeps_booting() {
    let mut controller = create_controller();
    assert!(controller.insert_coin().unwrap());
    assert_eq!(controller.current_phase(), GamePhase::Boot);
}

#[test]
fn test_start_requires_credit() {
    let mut controller = create_controller();
    assert!(!controller.start_game().unwrap());

    tick_until(&mut controller, GamePhase::Intro, PHASE_TICK_LIMIT);
    controller.insert_coin().unwrap();
    assert!(controller.set_credit(0));
    assert!(!controller.start_game().unwrap());
    assert_eq!(controller.current_phase(), GamePhase::Credit);
}

#[test]
fn test_credit_bounds() {
    let mut controller = create_controller();
    assert!(controller.set_credit(99));
    assert!(!controller.change_credit(1));
    assert!(!controller.insert_coin().unwrap());
    assert!(!controller.set_credit(-1));
    assert_eq!(controller.model().coins().credit(), 99);
}

#[test]
fn test_game_over_returns_to_credit_with_coins_left() {
    let mut controller = create_hunting_controller();
    controller.insert_coin().unwrap();
    controller.model_mut().set_lives(1);
    ghost_on_pac(&mut controller, GhostId::Pink, GhostState::HuntingPac);
    tick(&mut controller, 1);

    tick_until(&mut controller, GamePhase::GameOver, PHASE_TICK_LIMIT);
    tick_until(&mut controller, GamePhase::Credit, PHASE_TICK_LIMIT);
    assert_eq!(controller.model().coins().credit(), 1);
}

#[test]
#[should_panic]
fn test_resume_without_history_panics() {
    let mut controller = create_controller();
    let _ = controller.resume_previous_state();
}

#[test]
fn test_restart_clears_history() {
    let mut controller = create_hunting_controller();
    controller.restart(GamePhase::Boot).unwrap();
    assert_eq!(controller.current_phase(), GamePhase::Boot);
    assert_eq!(controller.previous_phase(), None);
    assert_that(&controller.model().is_playing()).is_false();
    // Credit survives a restart.
    assert_eq!(controller.model().coins().credit(), 1);
}

#[test]
fn test_steering_is_ignored_in_demo() {
    let mut controller = create_controller();
    tick_until(&mut controller, GamePhase::Ready, PHASE_TICK_LIMIT);
    let before = controller.model().level().unwrap().pac().wish_dir();
    controller.steer_pac(before.opposite());
    assert_eq!(controller.model().level().unwrap().pac().wish_dir(), before);

    let mut controller = create_hunting_controller();
    controller.steer_pac(Direction::Right);
    assert_eq!(controller.model().level().unwrap().pac().wish_dir(), Direction::Right);
}

#[test]
fn test_testing_levels_return_to_intro() {
    let mut controller = create_controller();
    controller.change_state(GamePhase::TestingLevels).unwrap();
    assert_that(&controller.model().is_demo_level()).is_true();

    tick(&mut controller, 299);
    assert_eq!(controller.model().level().map(|level| level.number()), Some(1));
    tick(&mut controller, 1);
    assert_eq!(controller.model().level().map(|level| level.number()), Some(2));

    tick_until(&mut controller, GamePhase::Intro, 8 * 300 + 1);
    assert_eq!(controller.model().score(), 0);
}

#[test]
fn test_testing_levels_send_eaten_ghosts_home() {
    let mut controller = create_controller();
    controller.change_state(GamePhase::TestingLevels).unwrap();
    ghost_on_pac(&mut controller, GhostId::Cyan, GhostState::Frightened);

    tick(&mut controller, 1);

    let level = controller.model().level().unwrap();
    assert_eq!(level.ghosts_killed_in_level(), 1);
    assert_eq!(level.ghost(GhostId::Cyan).state(), GhostState::ReturningHome);
    assert_eq!(controller.current_phase(), GamePhase::TestingLevels);
}

#[test]
fn test_testing_cutscenes_play_all() {
    let mut controller = create_controller();
    let events = record_events(&mut controller);
    controller.change_state(GamePhase::TestingCutScenes).unwrap();
    tick_until(&mut controller, GamePhase::Intro, PHASE_TICK_LIMIT * 4);

    let played: Vec<u8> = events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            GameEvent::IntermissionStarted { number } => Some(*number),
            _ => None,
        })
        .collect();
    assert_eq!(played, vec![1, 2, 3]);
}

#[test]
fn test_clock_halts_on_failed_tick() {
    let mut clock = GameClock::new(create_hunting_controller());
    assert_that(&clock.advance_one_tick()).is_true();
    assert_eq!(clock.ticks(), 1);

    clock.controller_mut().model_mut().discard_level();
    assert_that(&clock.advance_one_tick()).is_false();
    assert_that(&clock.is_halted()).is_true();
    assert_eq!(clock.ticks(), 1);

    assert_eq!(clock.run_for(100), 0);
    assert_eq!(clock.controller().current_phase(), GamePhase::Hunting);
}

#[test]
fn test_runs_are_deterministic() {
    let run = || {
        let mut controller = create_controller();
        start_paid_game(&mut controller);
        let mut clock = GameClock::new(controller);
        clock.run_for(4_000);
        let controller = clock.into_controller();
        let model = controller.model();
        // The game may already be over, taking the level with it.
        let actors = model.level().map(|level| {
            let ghosts: Vec<_> = level.ghosts().iter().map(|ghost| (ghost.tile(), ghost.state())).collect();
            (level.pac().tile(), ghosts)
        });
        (
            controller.current_phase(),
            model.score(),
            model.lives(),
            actors,
            model.events().published(),
        )
    };

    assert_eq!(run(), run());
}
