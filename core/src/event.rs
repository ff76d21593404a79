//! Events emitted while a schedule is computed and replayed.
//!
//! Start/completion events come from the continuous schedule, not from
//! sampling the running process, so a burst shorter than one tick is
//! still reported.

use crate::types::{ProcessId, SimTime, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Scheduling ─────────────────────────────────
    ScheduleComputed {
        process_count: usize,
        makespan:      Option<SimTime>,
    },

    // ── Playback ───────────────────────────────────
    SimulationStarted {
        process_count: usize,
    },
    ProcessStarted {
        tick: Tick,
        id:   ProcessId,
        at:   SimTime,
    },
    ProcessCompleted {
        tick: Tick,
        id:   ProcessId,
        at:   SimTime,
    },
    CpuIdle {
        tick: Tick,
    },
    SimulationFinished {
        tick: Tick,
    },
}

impl SimEvent {
    /// Stable snake_case name, matching the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            SimEvent::ScheduleComputed { .. }   => "schedule_computed",
            SimEvent::SimulationStarted { .. }  => "simulation_started",
            SimEvent::ProcessStarted { .. }     => "process_started",
            SimEvent::ProcessCompleted { .. }   => "process_completed",
            SimEvent::CpuIdle { .. }            => "cpu_idle",
            SimEvent::SimulationFinished { .. } => "simulation_finished",
        }
    }
}
