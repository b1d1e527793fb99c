//! Main-loop behaviour: time-change detection and relay/indicator coupling.

use crate::mock_hw::*;
use aromatron::app::events::AppEvent;
use aromatron::app::service::AppService;
use aromatron::drivers::relay::{RelayController, RelayPolarity};
use aromatron::error::{ClockError, RelayError};

fn service(journal: &Journal, seed: &str) -> AppService<JournalPin, JournalPin> {
    let relay = RelayController::new(
        JournalPin::new("relay", journal),
        JournalPin::new("relay_led", journal),
        RelayPolarity::ActiveLow,
    )
    .unwrap();
    AppService::new(relay, at(seed))
}

#[test]
fn one_second_step_is_reported_once() {
    let journal = Journal::new();
    let mut app = service(&journal, "2024-01-01T07:00:00");
    let mut clock = ScriptedClock::new(&journal, at("2024-01-01T07:00:00"))
        .then(at("2024-01-01T07:00:01"))
        .then(at("2024-01-01T07:00:01"));
    let mut sink = RecordingSink::default();

    assert!(app.tick(&mut clock, &mut sink));
    assert_eq!(app.last_observed(), at("2024-01-01T07:00:01"));
    assert!(!app.tick(&mut clock, &mut sink));
    assert_eq!(app.last_observed(), at("2024-01-01T07:00:01"));

    assert_eq!(
        sink.events,
        vec![AppEvent::TimeAdvanced(at("2024-01-01T07:00:01"))]
    );
}

#[test]
fn clock_stepping_backwards_is_ignored() {
    let journal = Journal::new();
    let mut app = service(&journal, "2024-01-01T07:00:05");
    let mut clock = ScriptedClock::new(&journal, at("2024-01-01T07:00:05"))
        .then(at("2024-01-01T07:00:03"));
    let mut sink = RecordingSink::default();

    assert!(!app.tick(&mut clock, &mut sink));
    assert_eq!(app.last_observed(), at("2024-01-01T07:00:05"));
    assert!(sink.events.is_empty());

    // Recovers once the clock passes the old high-water mark.
    clock.push(at("2024-01-01T07:00:06"));
    assert!(app.tick(&mut clock, &mut sink));
    assert_eq!(app.last_observed(), at("2024-01-01T07:00:06"));
}

#[test]
fn read_failure_counts_as_no_change() {
    let journal = Journal::new();
    let mut app = service(&journal, "2024-01-01T07:00:00");
    let mut clock = ScriptedClock::new(&journal, at("2024-01-01T07:00:00"))
        .then_fail(ClockError::Bus)
        .then(at("2024-01-01T07:00:02"));
    let mut sink = RecordingSink::default();

    assert!(!app.tick(&mut clock, &mut sink));
    assert_eq!(app.last_observed(), at("2024-01-01T07:00:00"));
    assert!(app.tick(&mut clock, &mut sink));
    assert_eq!(app.tick_count(), 2);
}

#[test]
fn year_rollover_is_an_advance() {
    let journal = Journal::new();
    let mut app = service(&journal, "2024-12-31T23:59:59");
    let mut clock = ScriptedClock::new(&journal, at("2024-12-31T23:59:59"))
        .then(at("2025-01-01T00:00:00"));
    let mut sink = RecordingSink::default();

    assert!(app.tick(&mut clock, &mut sink));
    assert_eq!(app.last_observed(), at("2025-01-01T00:00:00"));
}

#[test]
fn relay_and_indicator_always_agree() {
    let journal = Journal::new();
    let mut app = service(&journal, "2024-01-01T07:00:00");
    let mut sink = RecordingSink::default();

    for on in [true, true, false, true, false, false] {
        app.set_relay(on, &mut sink).unwrap();
        assert_eq!(app.relay_on(), on);
        // Active-low relay line, active-high LED.
        assert_eq!(journal.pin_levels("relay").last(), Some(&!on));
        assert_eq!(journal.pin_levels("relay_led").last(), Some(&on));
    }

    let changes: Vec<bool> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::RelayChanged { on } => Some(*on),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec![true, true, false, true, false, false]);
}

#[test]
fn broken_indicator_surfaces_error_but_relay_moves() {
    let journal = Journal::new();
    let relay = RelayController::new(
        JournalPin::new("relay", &journal),
        JournalPin::broken("relay_led", &journal),
        RelayPolarity::ActiveHigh,
    );
    assert!(matches!(relay, Err(RelayError::IndicatorPin)));
    // The relay line was still driven off.
    assert_eq!(journal.pin_levels("relay"), vec![false]);
}
