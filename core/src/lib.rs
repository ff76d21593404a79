//! FCFS CPU scheduling and time-stepped playback.
//!
//! Data flow:
//!   process descriptors → scheduler → schedule → clock → per-tick snapshot
//!
//! `input` validates caller data, `scheduler` computes the plan, `clock`
//! replays it one second at a time, and `engine` ties them together for a
//! driver such as `sim-runner`.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod input;
pub mod rng;
pub mod scheduler;
pub mod snapshot;
pub mod types;

pub use clock::{ClockState, SimClock};
pub use engine::{SimEngine, TickReport};
pub use error::{SimError, SimResult};
pub use scheduler::{compute_schedule, ProcessDescriptor, Schedule, ScheduleEntry, ScheduleSummary};
pub use snapshot::SimulationSnapshot;
