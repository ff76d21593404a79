//! The simulation engine — owns the current schedule and its playback clock.
//!
//! LIFECYCLE:
//!   1. compute*()  validate input, run the scheduler, keep the result.
//!   2. start()     install the latest schedule on the clock at t=0.
//!   3. tick()      advance one second; repeat until the report says finished.
//!
//! RULES:
//!   - Recomputing supersedes the schedule; it never mutates the old one.
//!     A playback in progress keeps its schedule until the next start().
//!   - The engine never sleeps. Pacing is the driver's concern.

use crate::{
    clock::{ClockState, SimClock},
    config::SimConfig,
    error::{SimError, SimResult},
    event::SimEvent,
    input,
    rng,
    scheduler::{compute_schedule, ProcessDescriptor, Schedule, ScheduleSummary},
    snapshot::SimulationSnapshot,
    types::{SimTime, Tick},
};
use serde::Serialize;
use std::sync::Arc;

/// Everything the renderer needs after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub snapshot: SimulationSnapshot,
    pub events:   Vec<SimEvent>,
}

pub struct SimEngine {
    pub config: SimConfig,
    clock:      SimClock,
    schedule:   Option<Arc<Schedule>>,
    summary:    Option<ScheduleSummary>,
}

impl SimEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            clock:    SimClock::new(),
            schedule: None,
            summary:  None,
        }
    }

    /// Schedule already-validated descriptors.
    pub fn compute(&mut self, processes: &[ProcessDescriptor]) -> SimEvent {
        let schedule = compute_schedule(processes);
        let summary = schedule.summary();

        match (summary.average_waiting, summary.average_turnaround) {
            (Some(wait), Some(turn)) => log::info!(
                "scheduled {} processes: makespan={:?} avg_wait={wait:.2} avg_turnaround={turn:.2}",
                summary.process_count,
                summary.makespan,
            ),
            _ => log::info!("scheduled an empty workload"),
        }

        let event = SimEvent::ScheduleComputed {
            process_count: summary.process_count,
            makespan:      summary.makespan,
        };
        self.schedule = Some(Arc::new(schedule));
        self.summary = Some(summary);
        event
    }

    /// Validate form text (count + rows), then schedule.
    pub fn compute_from_form<S: AsRef<str>>(
        &mut self,
        count_raw: &str,
        rows: &[(S, S)],
    ) -> SimResult<SimEvent> {
        let processes = input::parse_processes_with_prefix(count_raw, rows, &self.config.id_prefix)?;
        Ok(self.compute(&processes))
    }

    /// Validate numeric `(arrival, burst)` pairs, then schedule.
    pub fn compute_from_pairs(&mut self, pairs: &[(SimTime, SimTime)]) -> SimResult<SimEvent> {
        let processes = input::processes_from_pairs_with_prefix(pairs, &self.config.id_prefix)?;
        Ok(self.compute(&processes))
    }

    /// Schedule a seeded random workload.
    pub fn generate(&mut self, count: usize, seed: u64) -> SimResult<SimEvent> {
        let processes =
            rng::generate_workload(count, seed, &self.config.generator, &self.config.id_prefix)?;
        Ok(self.compute(&processes))
    }

    /// Rewind the clock onto the latest schedule and report t=0.
    pub fn start(&mut self) -> SimResult<TickReport> {
        let schedule = self.schedule.clone().ok_or(SimError::RunNotInitialized)?;
        let process_count = schedule.len();
        self.clock.reset(schedule);

        let snapshot = self.clock.snapshot();
        let mut events = vec![SimEvent::SimulationStarted { process_count }];
        events.extend(self.playback_events(None, &snapshot));

        log::info!("simulation started: {process_count} processes");
        Ok(TickReport { snapshot, events })
    }

    /// Advance the playback by one tick.
    pub fn tick(&mut self) -> SimResult<TickReport> {
        if self.schedule.is_none() {
            return Err(SimError::RunNotInitialized);
        }
        match self.clock.state() {
            ClockState::Idle => return Err(SimError::SimulationNotStarted),
            ClockState::Finished => {
                return Err(SimError::SimulationFinished { tick: self.clock.current_tick() })
            }
            ClockState::Running => {}
        }

        let prev = self.clock.current_tick() as SimTime;
        let snapshot = self.clock.tick();
        let events = self.playback_events(Some(prev), &snapshot);

        log::debug!(
            "tick={} running={} events=[{}]",
            snapshot.current_time,
            snapshot.running_label(),
            events.iter().map(SimEvent::name).collect::<Vec<_>>().join(", ")
        );
        if snapshot.is_finished {
            log::info!("simulation finished at tick {}", snapshot.current_time);
        }
        Ok(TickReport { snapshot, events })
    }

    /// Tick until the clock reaches its terminal state.
    /// Used by tests and non-interactive runs.
    pub fn run_to_completion(&mut self) -> SimResult<Vec<TickReport>> {
        let mut reports = Vec::new();
        while !self.clock.is_finished() {
            reports.push(self.tick()?);
        }
        Ok(reports)
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_deref()
    }

    pub fn summary(&self) -> Option<&ScheduleSummary> {
        self.summary.as_ref()
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        self.clock.snapshot()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    /// Events for the interval `(prev, now]`, or `[.., now]` when `prev` is `None`.
    fn playback_events(&self, prev: Option<SimTime>, snapshot: &SimulationSnapshot) -> Vec<SimEvent> {
        let tick = snapshot.current_time;
        let now = tick as SimTime;
        let crossed = |t: SimTime| prev.map_or(t <= now, |p| p < t && t <= now);

        let mut events = Vec::new();
        for entry in self.clock.schedule().entries() {
            if crossed(entry.start) {
                events.push(SimEvent::ProcessStarted { tick, id: entry.id.clone(), at: entry.start });
            }
            if crossed(entry.finish) {
                events.push(SimEvent::ProcessCompleted { tick, id: entry.id.clone(), at: entry.finish });
            }
        }

        if snapshot.is_finished {
            events.push(SimEvent::SimulationFinished { tick });
        } else if snapshot.running_id.is_none() {
            events.push(SimEvent::CpuIdle { tick });
        }
        events
    }
}

impl Default for SimEngine {
    fn default() -> Self { Self::new(SimConfig::default()) }
}
