use serde::{Deserialize, Serialize};
use crate::types::SimTime;

/// Commands an external renderer sends to the driver, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriverCommand {
    // ── Scheduling ────────────────────────────────
    /// Raw form fields: the typed count and `[arrival, burst]` text rows.
    Compute {
        count: String,
        #[serde(default)]
        rows:  Vec<(String, String)>,
    },
    ComputeValues {
        processes: Vec<ProcessValues>,
    },
    Generate {
        count: usize,
        #[serde(default)]
        seed:  u64,
    },

    // ── Playback ──────────────────────────────────
    Start,
    Tick {
        #[serde(default = "one")]
        count: u64,
    },
    GetState,
    Quit,
}

/// Numeric `(arrival, burst)` pair; ids are assigned by input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessValues {
    pub arrival: SimTime,
    pub burst:   SimTime,
}

fn one() -> u64 { 1 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_compute() {
        let cmd: DriverCommand = serde_json::from_str(
            r#"{"type":"compute","count":"2","rows":[["0","4"],["1","3"]]}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            DriverCommand::Compute {
                count: "2".into(),
                rows:  vec![("0".into(), "4".into()), ("1".into(), "3".into())],
            }
        );
    }

    #[test]
    fn tick_count_defaults_to_one() {
        let cmd: DriverCommand = serde_json::from_str(r#"{"type":"tick"}"#).unwrap();
        assert_eq!(cmd, DriverCommand::Tick { count: 1 });
    }
}
