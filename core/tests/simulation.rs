//! Simulation playback tests.
//!
//! Tests cover: per-tick running process, idle gaps, terminal convergence,
//! engine lifecycle errors, and the event stream.

use fcfs_core::{
    event::SimEvent,
    SimEngine, SimError, TickReport,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine_with(pairs: &[(f64, f64)]) -> SimEngine {
    init_logging();
    let mut engine = SimEngine::default();
    engine.compute_from_pairs(pairs).expect("valid workload");
    engine
}

/// (tick, running label, finished) for t=0 and every tick after it.
fn timeline(engine: &mut SimEngine) -> Vec<(u64, String, bool)> {
    let first = engine.start().expect("start");
    let mut reports = vec![first];
    reports.extend(engine.run_to_completion().expect("run"));
    reports
        .iter()
        .map(|r: &TickReport| {
            (r.snapshot.current_time, r.snapshot.running_label().to_string(), r.snapshot.is_finished)
        })
        .collect()
}

#[test]
fn single_late_process_playback() {
    let mut engine = engine_with(&[(5.0, 2.0)]);
    let steps = timeline(&mut engine);

    for (t, running, finished) in &steps[..5] {
        assert_eq!(running, "none", "t={t} should be idle");
        assert!(!finished);
    }
    assert_eq!(steps[5], (5, "P1".to_string(), false));
    assert_eq!(steps[6], (6, "P1".to_string(), false));
    assert_eq!(steps[7], (7, "none".to_string(), true));
    assert_eq!(steps.len(), 8);
}

#[test]
fn reference_workload_playback() {
    let mut engine = engine_with(&[(0.0, 4.0), (1.0, 3.0), (2.0, 1.0)]);
    let labels: Vec<_> = timeline(&mut engine).into_iter().map(|(_, l, _)| l).collect();
    assert_eq!(labels, ["P1", "P1", "P1", "P1", "P2", "P2", "P2", "P3", "none"]);
    assert!(engine.clock().is_finished());
    assert_eq!(engine.current_tick(), 8);
}

#[test]
fn gap_between_processes_reports_none() {
    let mut engine = engine_with(&[(0.0, 1.0), (3.0, 1.0)]);
    let steps = timeline(&mut engine);
    assert_eq!(steps[1].1, "none");
    assert_eq!(steps[2].1, "none");
    assert_eq!(steps[3].1, "P2");
}

#[test]
fn empty_workload_is_finished_at_start() {
    let mut engine = engine_with(&[]);
    let report = engine.start().unwrap();
    assert!(report.snapshot.is_finished);
    assert_eq!(report.snapshot.current_time, 0);
    assert!(report.events.contains(&SimEvent::SimulationFinished { tick: 0 }));
    assert!(engine.run_to_completion().unwrap().is_empty());
}

#[test]
fn ticks_are_monotonic_by_one() {
    let mut engine = engine_with(&[(1.0, 2.5), (2.0, 1.0), (9.0, 0.5)]);
    let steps = timeline(&mut engine);
    for (i, (t, _, _)) in steps.iter().enumerate() {
        assert_eq!(*t, i as u64);
    }
    // last finish 9.5 → first tick at or past it is 10
    assert_eq!(steps.last().unwrap().0, 10);
}

#[test]
fn no_state_change_after_finished() {
    let mut engine = engine_with(&[(0.0, 1.0)]);
    engine.start().unwrap();
    engine.run_to_completion().unwrap();
    let done = engine.snapshot();

    assert!(matches!(engine.tick(), Err(SimError::SimulationFinished { tick: 1 })));
    assert_eq!(engine.snapshot(), done);
}

#[test]
fn tick_before_compute_or_start_is_rejected() {
    init_logging();
    let mut engine = SimEngine::default();
    assert!(matches!(engine.tick(), Err(SimError::RunNotInitialized)));
    assert!(matches!(engine.start(), Err(SimError::RunNotInitialized)));

    engine.compute_from_pairs(&[(0.0, 1.0)]).unwrap();
    assert!(matches!(engine.tick(), Err(SimError::SimulationNotStarted)));
}

#[test]
fn restart_replays_from_zero() {
    let mut engine = engine_with(&[(0.0, 2.0)]);
    let first = timeline(&mut engine);
    let second = timeline(&mut engine);
    assert_eq!(first, second);
}

#[test]
fn recompute_takes_effect_on_next_start() {
    let mut engine = engine_with(&[(0.0, 5.0)]);
    engine.start().unwrap();
    engine.tick().unwrap();

    engine.compute_from_pairs(&[(0.0, 1.0)]).unwrap();
    let report = engine.tick().unwrap();
    assert_eq!(report.snapshot.running_id.as_deref(), Some("P1"));
    assert!(!report.snapshot.is_finished, "old schedule still playing");

    let restarted = engine.start().unwrap();
    assert_eq!(restarted.snapshot.current_time, 0);
    let after = engine.tick().unwrap();
    assert!(after.snapshot.is_finished, "new 1s schedule finishes at t=1");
}

#[test]
fn event_stream_for_reference_workload() {
    let mut engine = engine_with(&[(0.0, 4.0), (1.0, 3.0), (2.0, 1.0)]);
    let start = engine.start().unwrap();
    assert_eq!(
        start.events,
        vec![
            SimEvent::SimulationStarted { process_count: 3 },
            SimEvent::ProcessStarted { tick: 0, id: "P1".into(), at: 0.0 },
        ]
    );

    let reports = engine.run_to_completion().unwrap();
    let at_four = &reports[3];
    assert_eq!(at_four.snapshot.current_time, 4);
    assert_eq!(
        at_four.events,
        vec![
            SimEvent::ProcessCompleted { tick: 4, id: "P1".into(), at: 4.0 },
            SimEvent::ProcessStarted { tick: 4, id: "P2".into(), at: 4.0 },
        ]
    );

    let last = reports.last().unwrap();
    assert_eq!(
        last.events,
        vec![
            SimEvent::ProcessCompleted { tick: 8, id: "P3".into(), at: 8.0 },
            SimEvent::SimulationFinished { tick: 8 },
        ]
    );
}

#[test]
fn sub_tick_burst_still_reported() {
    let mut engine = engine_with(&[(0.25, 0.5), (3.0, 1.0)]);
    engine.start().unwrap();
    let first = engine.tick().unwrap();
    assert_eq!(first.snapshot.running_id, None);
    assert!(first.events.contains(&SimEvent::ProcessStarted { tick: 1, id: "P1".into(), at: 0.25 }));
    assert!(first.events.contains(&SimEvent::ProcessCompleted { tick: 1, id: "P1".into(), at: 0.75 }));
    assert!(first.events.contains(&SimEvent::CpuIdle { tick: 1 }));
}

#[test]
fn idle_ticks_emit_cpu_idle() {
    let mut engine = engine_with(&[(2.0, 1.0)]);
    let start = engine.start().unwrap();
    assert!(start.events.contains(&SimEvent::CpuIdle { tick: 0 }));
    let one = engine.tick().unwrap();
    assert_eq!(one.events, vec![SimEvent::CpuIdle { tick: 1 }]);
}
