//! Per-tick view of the simulation handed to the renderer.

use crate::types::{ProcessId, Tick};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub current_time: Tick,
    /// `None` while the CPU is idle or once the workload has drained.
    pub running_id:   Option<ProcessId>,
    pub is_finished:  bool,
}

impl SimulationSnapshot {
    /// Label used by text renderers: the process id or `"none"`.
    pub fn running_label(&self) -> &str {
        self.running_id.as_deref().unwrap_or("none")
    }
}
