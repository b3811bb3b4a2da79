//! Persistence: event log, tick history and snapshots.

use simsre_core::{engine::SimEngine, SeriesKind, TeamConfig, WorkCategory};

fn build(run_id: &str, seed: u64) -> SimEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    SimEngine::build_test(run_id.to_string(), seed, TeamConfig::default())
        .expect("build test engine")
}

#[test]
fn run_is_registered() {
    let engine = build("store-run", 1);
    assert!(engine.store().run_exists("store-run").unwrap());
    assert!(!engine.store().run_exists("some-other-run").unwrap());
}

#[test]
fn persisted_history_mirrors_memory() {
    let run_id = "store-history";
    let mut engine = build(run_id, 0xABCD_0001);

    engine.run_to_horizon().unwrap();

    let rows = engine.store().history_rows(run_id).unwrap();
    assert_eq!(rows.len(), engine.history().len() * WorkCategory::ALL.len());

    let loaded = engine.store().load_history(run_id).unwrap();
    assert_eq!(&loaded, engine.history());

    let last = rows.last().unwrap();
    let series = engine.history().series(SeriesKind::Assigned, last.category);
    assert_eq!(Some(&last.assigned), series.last());
}

#[test]
fn every_tick_is_bracketed_in_the_event_log() {
    let mut engine = build("store-events", 3);
    engine.run_ticks(12).unwrap();

    let init = engine.store_events_for_tick(0).unwrap();
    assert_eq!(init.len(), 1);
    assert_eq!(init[0].event_type, "run_initialized");

    for tick in 1..=12 {
        let events = engine.store_events_for_tick(tick).unwrap();
        assert_eq!(events.first().unwrap().event_type, "tick_started");
        assert_eq!(events.last().unwrap().event_type, "tick_completed");
    }

    let steady = engine.store().event_count("store-events", "history_recorded").unwrap();
    assert_eq!(steady as usize, engine.history().len());
}

#[test]
fn snapshots_taken_at_interval() {
    let mut engine = build("store-snapshots", 9);
    engine.run_ticks(25).unwrap();

    assert!(engine.snapshot_at_or_before(9).unwrap().is_none());

    let snapshot = engine.snapshot_at_or_before(25).unwrap().expect("snapshot at tick 20");
    assert_eq!(snapshot.tick, 20);
    assert_eq!(snapshot.team.tick, 20);
    assert_eq!(snapshot.clock.current_tick, 20);
    // tick 1 bootstraps, so at most 19 steady ticks are recorded
    assert!(snapshot.team.history.len() <= 19);
    assert!(!snapshot.team.history.is_empty());
}
