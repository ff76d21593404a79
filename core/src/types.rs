//! Shared primitive types used across the scheduler and the clock.

/// A simulation tick. One tick = one simulated second.
pub type Tick = u64;

/// Stable label for a process within one scheduling run (`P1`, `P2`, ...).
pub type ProcessId = String;

/// Continuous schedule time. Arrival, burst, start and finish are all
/// expressed in these units; ticks sample it at whole seconds.
pub type SimTime = f64;
