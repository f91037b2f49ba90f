use pacman_rules::game::hunting::{HuntingKind, HuntingTimer};
use pacman_rules::game::tables::HUNTING_PHASE_COUNT;
use pacman_rules::timer::TickDuration;
use pretty_assertions::assert_eq;

fn run_phase(timer: &mut HuntingTimer) -> u32 {
    let mut ticks = 0;
    while !timer.has_expired() {
        timer.tick();
        ticks += 1;
    }
    ticks
}

#[test]
fn test_level_one_schedule() {
    let mut timer = HuntingTimer::new(1);
    let mut lengths = Vec::new();
    let mut phase = timer.start_hunting_phase(0);

    while phase.duration != TickDuration::Indefinite {
        lengths.push((phase.kind, run_phase(&mut timer)));
        phase = timer.start_next_phase();
    }

    assert_eq!(
        lengths,
        vec![
            (HuntingKind::Scatter, 420),
            (HuntingKind::Chase, 1200),
            (HuntingKind::Scatter, 420),
            (HuntingKind::Chase, 1200),
            (HuntingKind::Scatter, 300),
            (HuntingKind::Chase, 1200),
            (HuntingKind::Scatter, 300),
        ]
    );
    assert_eq!(timer.current_kind(), Some(HuntingKind::Chase));
    assert_eq!(timer.phase_index(), Some(7));
}

#[test]
fn test_phases_alternate() {
    let mut timer = HuntingTimer::new(5);
    timer.start_hunting_phase(0);
    for index in 1..HUNTING_PHASE_COUNT as u8 {
        let previous = timer.current_kind();
        let phase = timer.start_next_phase();
        assert_eq!(phase.index, index);
        assert!(previous != Some(phase.kind));
    }
}

#[test]
fn test_final_phase_never_expires() {
    let mut timer = HuntingTimer::new(2);
    timer.start_hunting_phase(7);
    for _ in 0..100_000 {
        timer.tick();
    }
    assert!(!timer.has_expired());
    assert!(timer.in_chase_phase());
}

#[test]
fn test_index_past_last_phase_is_clamped() {
    let mut timer = HuntingTimer::new(1);
    let phase = timer.start_hunting_phase(42);
    assert_eq!(phase.index, 7);

    let next = timer.start_next_phase();
    assert_eq!(next.index, 7);
    assert_eq!(next.duration, TickDuration::Indefinite);
}

#[test]
fn test_stop_freezes_phase() {
    let mut timer = HuntingTimer::new(1);
    timer.start_hunting_phase(0);
    timer.tick();
    timer.stop();
    for _ in 0..1000 {
        timer.tick();
    }
    assert!(timer.is_stopped());
    assert_eq!(timer.timer().elapsed(), 1);
    assert!(timer.in_scatter_phase());
}

#[test]
fn test_kind_display() {
    assert_eq!(HuntingKind::Scatter.to_string(), "SCATTER");
    assert_eq!(HuntingKind::of_index(3), HuntingKind::Chase);
}
