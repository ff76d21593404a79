//! Input boundary — validates caller data before scheduling.
//!
//! RULE: validation is all-or-nothing. The first bad value aborts the whole
//! batch; no partial process list is ever returned. Process indices in
//! errors are 1-based so they line up with the `P<n>` labels.

use crate::{
    error::{SimError, SimResult},
    scheduler::ProcessDescriptor,
    types::SimTime,
};

pub const DEFAULT_ID_PREFIX: &str = "P";

/// Parse a process count typed by the user.
pub fn parse_count(raw: &str) -> SimResult<usize> {
    raw.trim().parse::<usize>().map_err(|_| {
        log::warn!("rejected process count {raw:?}");
        SimError::InvalidCount { raw: raw.to_string() }
    })
}

/// Build descriptors from form-shaped text: a count and `(arrival, burst)`
/// rows. Only the first `count` rows are read.
pub fn parse_processes<S: AsRef<str>>(
    count_raw: &str,
    rows: &[(S, S)],
) -> SimResult<Vec<ProcessDescriptor>> {
    parse_processes_with_prefix(count_raw, rows, DEFAULT_ID_PREFIX)
}

pub fn parse_processes_with_prefix<S: AsRef<str>>(
    count_raw: &str,
    rows: &[(S, S)],
    prefix: &str,
) -> SimResult<Vec<ProcessDescriptor>> {
    let count = parse_count(count_raw)?;
    (0..count)
        .map(|i| {
            let index = i + 1;
            let (arrival_raw, burst_raw) = rows.get(i).ok_or_else(|| SimError::InvalidField {
                index,
                field:  "arrival",
                reason: "missing value".to_string(),
            })?;
            let arrival = parse_number(index, "arrival", arrival_raw.as_ref())?;
            let burst = parse_number(index, "burst", burst_raw.as_ref())?;
            describe(index, arrival, burst, prefix)
        })
        .collect()
}

/// Build descriptors from already-numeric `(arrival, burst)` pairs.
pub fn processes_from_pairs(pairs: &[(SimTime, SimTime)]) -> SimResult<Vec<ProcessDescriptor>> {
    processes_from_pairs_with_prefix(pairs, DEFAULT_ID_PREFIX)
}

pub fn processes_from_pairs_with_prefix(
    pairs: &[(SimTime, SimTime)],
    prefix: &str,
) -> SimResult<Vec<ProcessDescriptor>> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, &(arrival, burst))| describe(i + 1, arrival, burst, prefix))
        .collect()
}

fn parse_number(index: usize, field: &'static str, raw: &str) -> SimResult<SimTime> {
    raw.trim().parse::<SimTime>().map_err(|_| {
        log::warn!("process {index}: {field} {raw:?} is not a number");
        SimError::InvalidField {
            index,
            field,
            reason: format!("'{raw}' is not a number"),
        }
    })
}

fn describe(index: usize, arrival: SimTime, burst: SimTime, prefix: &str) -> SimResult<ProcessDescriptor> {
    check_field(index, "arrival", arrival, |v| v >= 0.0, "must be >= 0")?;
    check_field(index, "burst", burst, |v| v > 0.0, "must be > 0")?;
    Ok(ProcessDescriptor::new(format!("{prefix}{index}"), arrival, burst))
}

fn check_field(
    index: usize,
    field: &'static str,
    value: SimTime,
    ok: impl Fn(SimTime) -> bool,
    rule: &str,
) -> SimResult<()> {
    let reason = if !value.is_finite() {
        format!("{value} is not a finite number")
    } else if !ok(value) {
        format!("{value} {rule}")
    } else {
        return Ok(());
    };
    log::warn!("process {index}: {field} rejected: {reason}");
    Err(SimError::InvalidField { index, field, reason })
}
