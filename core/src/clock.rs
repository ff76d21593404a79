//! Simulation clock — owns tick state and replays a schedule.
//!
//! STATE MACHINE:
//!   Idle     --reset-->  Running | Finished (empty schedule)
//!   Running  --tick--->  Running | Finished (last finish reached)
//!   Finished --reset-->  Running | Finished
//!
//! The clock only counts logical ticks. Pacing belongs to the caller.

use crate::{
    scheduler::Schedule,
    snapshot::SimulationSnapshot,
    types::{SimTime, Tick},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct SimClock {
    current_tick: Tick,
    state:        ClockState,
    schedule:     Arc<Schedule>,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            current_tick: 0,
            state:        ClockState::Idle,
            schedule:     Arc::new(Schedule::default()),
        }
    }

    /// Install `schedule` and rewind to t=0.
    pub fn reset(&mut self, schedule: Arc<Schedule>) {
        self.current_tick = 0;
        self.state = if schedule.is_empty() {
            ClockState::Finished
        } else {
            ClockState::Running
        };
        self.schedule = schedule;
    }

    /// Advance one tick and report what is running at the new time.
    ///
    /// Outside `Running` this is a no-op that returns the current snapshot,
    /// so a finished clock never changes state again.
    pub fn tick(&mut self) -> SimulationSnapshot {
        if self.state != ClockState::Running {
            log::warn!(
                "tick() ignored: clock is {:?} at tick {}",
                self.state,
                self.current_tick
            );
            return self.snapshot();
        }

        self.current_tick += 1;
        let end = self.schedule.last_finish().unwrap_or(0.0);
        if self.now() >= end {
            self.state = ClockState::Finished;
        }
        self.snapshot()
    }

    /// Snapshot of the current tick without advancing.
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            current_time: self.current_tick,
            running_id:   self.running_id(),
            is_finished:  self.is_finished(),
        }
    }

    pub fn running_id(&self) -> Option<String> {
        self.schedule.running_at(self.now()).map(|e| e.id.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.state == ClockState::Finished
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn now(&self) -> SimTime {
        self.current_tick as SimTime
    }
}

impl Default for SimClock {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{compute_schedule, ProcessDescriptor};

    fn clock_for(processes: &[ProcessDescriptor]) -> SimClock {
        let mut clock = SimClock::new();
        clock.reset(Arc::new(compute_schedule(processes)));
        clock
    }

    #[test]
    fn new_clock_is_idle() {
        let clock = SimClock::new();
        assert_eq!(clock.state(), ClockState::Idle);
        assert!(!clock.is_finished());
        assert_eq!(clock.current_tick(), 0);
    }

    #[test]
    fn empty_schedule_finishes_immediately() {
        let clock = clock_for(&[]);
        assert_eq!(clock.state(), ClockState::Finished);
        assert!(clock.snapshot().is_finished);
    }

    #[test]
    fn tick_advances_by_exactly_one() {
        let mut clock = clock_for(&[ProcessDescriptor::new("P1", 0.0, 3.0)]);
        let mut last = clock.current_tick();
        while !clock.is_finished() {
            let snap = clock.tick();
            assert_eq!(snap.current_time, last + 1);
            last = snap.current_time;
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn finished_clock_ignores_ticks() {
        let mut clock = clock_for(&[ProcessDescriptor::new("P1", 0.0, 1.0)]);
        let done = clock.tick();
        assert!(done.is_finished);

        let again = clock.tick();
        assert_eq!(again, done, "no state change after Finished");
    }

    #[test]
    fn idle_clock_ignores_ticks() {
        let mut clock = SimClock::new();
        let snap = clock.tick();
        assert_eq!(snap.current_time, 0);
        assert_eq!(clock.state(), ClockState::Idle);
    }

    #[test]
    fn reset_rewinds_a_finished_clock() {
        let mut clock = clock_for(&[ProcessDescriptor::new("P1", 0.0, 1.0)]);
        clock.tick();
        assert!(clock.is_finished());

        clock.reset(Arc::new(compute_schedule(&[ProcessDescriptor::new("P1", 0.0, 2.0)])));
        assert_eq!(clock.state(), ClockState::Running);
        assert_eq!(clock.current_tick(), 0);
        assert_eq!(clock.running_id().as_deref(), Some("P1"));
    }

    #[test]
    fn fractional_finish_rounds_up_to_next_tick() {
        let mut clock = clock_for(&[ProcessDescriptor::new("P1", 0.0, 1.5)]);
        assert_eq!(clock.tick().running_id.as_deref(), Some("P1")); // t=1
        let snap = clock.tick(); // t=2
        assert!(snap.is_finished);
        assert_eq!(snap.running_id, None);
    }
}
