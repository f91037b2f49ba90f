#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use pacman_rules::config::SimulationConfig;
use pacman_rules::controller::{GameController, GamePhase};
use pacman_rules::events::GameEvent;

/// Upper bound for waiting on a phase; far beyond any single timed phase.
pub const PHASE_TICK_LIMIT: u32 = 5_000;

pub fn create_controller() -> GameController {
    GameController::new(SimulationConfig::default()).unwrap()
}

/// Updates the controller until `phase` is active. Returns the number of updates it took.
///
/// Panics if the phase is not reached within `limit` updates.
pub fn tick_until(controller: &mut GameController, phase: GamePhase, limit: u32) -> u32 {
    for ticks in 0..limit {
        if controller.current_phase() == phase {
            return ticks;
        }
        controller.update().unwrap();
    }
    assert_eq!(controller.current_phase(), phase, "phase not reached within {limit} ticks");
    limit
}

pub fn tick(controller: &mut GameController, ticks: u32) {
    for _ in 0..ticks {
        controller.update().unwrap();
    }
}

/// Boots, inserts a coin during the intro and starts a game. Returns with the READY phase active.
pub fn start_paid_game(controller: &mut GameController) {
    tick_until(controller, GamePhase::Intro, PHASE_TICK_LIMIT);
    assert!(controller.insert_coin().unwrap());
    assert_eq!(controller.current_phase(), GamePhase::Credit);
    assert!(controller.start_game().unwrap());
    assert_eq!(controller.current_phase(), GamePhase::Ready);
}

/// A controller in the HUNTING phase of a paid game, one hunting tick in (the red ghost is out).
pub fn create_hunting_controller() -> GameController {
    let mut controller = create_controller();
    start_paid_game(&mut controller);
    tick_until(&mut controller, GamePhase::Hunting, PHASE_TICK_LIMIT);
    tick(&mut controller, 1);
    assert_eq!(controller.current_phase(), GamePhase::Hunting);
    controller
}

/// Subscribes a listener that records every event.
pub fn record_events(controller: &mut GameController) -> Rc<RefCell<Vec<GameEvent>>> {
    let recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&recorded);
    controller.subscribe(move |event: &GameEvent| sink.borrow_mut().push(*event));
    recorded
}
