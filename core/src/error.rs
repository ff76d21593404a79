use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid process count '{raw}': must be a non-negative integer")]
    InvalidCount { raw: String },

    #[error("Invalid {field} for process {index}: {reason}")]
    InvalidField {
        index:  usize,
        field:  &'static str,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Run not initialized: no schedule has been computed")]
    RunNotInitialized,

    #[error("Simulation not started: call start() before tick()")]
    SimulationNotStarted,

    #[error("Simulation already finished at tick {tick}")]
    SimulationFinished { tick: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
