//! FCFS scheduler — maps process descriptors to a computed schedule.
//!
//! RULES:
//!   - Pure: no state is retained between calls, no I/O.
//!   - Processes run strictly in arrival order, non-preemptively.
//!   - Equal arrivals keep their input order (stable sort).
//!   - Input is assumed validated by the `input` module.

use crate::types::{ProcessId, SimTime};
use serde::{Deserialize, Serialize};

/// One process as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub id:      ProcessId,
    pub arrival: SimTime,
    pub burst:   SimTime,
}

impl ProcessDescriptor {
    pub fn new(id: impl Into<ProcessId>, arrival: SimTime, burst: SimTime) -> Self {
        Self { id: id.into(), arrival, burst }
    }
}

/// A process placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id:         ProcessId,
    pub arrival:    SimTime,
    pub burst:      SimTime,
    pub start:      SimTime,
    pub finish:     SimTime,
    pub waiting:    SimTime,
    pub turnaround: SimTime,
}

impl ScheduleEntry {
    /// True if `t` falls inside `[start, finish)`.
    pub fn contains(&self, t: SimTime) -> bool {
        self.start <= t && t < self.finish
    }
}

/// Entries ordered by start time, never overlapping.
/// Built only by `compute_schedule`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry executing at time `t`, if any.
    /// Entries never overlap, so the first match is the only one.
    pub fn running_at(&self, t: SimTime) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.contains(t))
    }

    pub fn first_start(&self) -> Option<SimTime> {
        self.entries.first().map(|e| e.start)
    }

    /// Completion time of the whole workload.
    pub fn last_finish(&self) -> Option<SimTime> {
        self.entries.last().map(|e| e.finish)
    }

    pub fn total_burst(&self) -> SimTime {
        self.entries.iter().map(|e| e.burst).sum()
    }

    /// Time the CPU sat idle between t=0 and the last completion.
    pub fn idle_time(&self) -> SimTime {
        let mut cursor = 0.0;
        let mut idle = 0.0;
        for entry in &self.entries {
            idle += (entry.start - cursor).max(0.0);
            cursor = entry.finish;
        }
        idle
    }

    pub fn average_waiting(&self) -> Option<f64> {
        mean(self.entries.iter().map(|e| e.waiting))
    }

    pub fn average_turnaround(&self) -> Option<f64> {
        mean(self.entries.iter().map(|e| e.turnaround))
    }

    pub fn summary(&self) -> ScheduleSummary {
        let makespan = self.last_finish();
        let total_burst = self.total_burst();
        ScheduleSummary {
            process_count:      self.entries.len(),
            average_waiting:    self.average_waiting(),
            average_turnaround: self.average_turnaround(),
            total_burst,
            idle_time:          self.idle_time(),
            makespan,
            utilization:        makespan.filter(|m| *m > 0.0).map(|m| total_burst / m),
        }
    }
}

/// Scalar statistics shown next to the schedule table.
/// Averages are `None` for an empty schedule rather than NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub process_count:      usize,
    pub average_waiting:    Option<f64>,
    pub average_turnaround: Option<f64>,
    pub total_burst:        SimTime,
    pub idle_time:          SimTime,
    pub makespan:           Option<SimTime>,
    pub utilization:        Option<f64>,
}

/// Compute the FCFS schedule for `processes`.
pub fn compute_schedule(processes: &[ProcessDescriptor]) -> Schedule {
    let mut sorted: Vec<&ProcessDescriptor> = processes.iter().collect();
    // slice::sort_by is stable: equal arrivals keep input order.
    sorted.sort_by(|a, b| a.arrival.total_cmp(&b.arrival));

    let mut current_time: SimTime = 0.0;
    let entries = sorted
        .into_iter()
        .map(|proc| {
            let start = current_time.max(proc.arrival);
            let finish = start + proc.burst;
            current_time = finish;
            ScheduleEntry {
                id:         proc.id.clone(),
                arrival:    proc.arrival,
                burst:      proc.burst,
                start,
                finish,
                waiting:    start - proc.arrival,
                turnaround: finish - proc.arrival,
            }
        })
        .collect();

    Schedule { entries }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
