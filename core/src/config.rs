use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SimSpeed {
    #[default]
    Normal,       // 1 tick per interval
    Accelerated,  // 5 ticks per interval
    FastForward,  // 20 ticks per interval
}

impl SimSpeed {
    pub fn ticks_per_interval(&self) -> u32 {
        match self {
            SimSpeed::Normal      => 1,
            SimSpeed::Accelerated => 5,
            SimSpeed::FastForward => 20,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "normal"       => Some(SimSpeed::Normal),
            "accelerated"  => Some(SimSpeed::Accelerated),
            "fast_forward" => Some(SimSpeed::FastForward),
            _ => None,
        }
    }
}

/// Largest arrival or burst the generator accepts. Keeps whole-second
/// ranges well inside `u64` once converted.
pub const MAX_GENERATED_TIME: f64 = u32::MAX as f64;

/// Bounds for randomly generated workloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub max_arrival: f64,
    pub min_burst:   f64,
    pub max_burst:   f64,
    /// Round generated values to whole seconds.
    pub integral:    bool,
}

impl GeneratorConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.max_arrival.is_finite() && (0.0..=MAX_GENERATED_TIME).contains(&self.max_arrival),
            "generator.max_arrival must be in [0, {MAX_GENERATED_TIME}], got {}",
            self.max_arrival
        );
        anyhow::ensure!(
            self.min_burst.is_finite() && self.min_burst > 0.0,
            "generator.min_burst must be > 0, got {}",
            self.min_burst
        );
        anyhow::ensure!(
            self.max_burst >= self.min_burst,
            "generator.max_burst must be >= generator.min_burst"
        );
        anyhow::ensure!(
            self.max_burst.is_finite() && self.max_burst <= MAX_GENERATED_TIME,
            "generator.max_burst must be <= {MAX_GENERATED_TIME}, got {}",
            self.max_burst
        );
        if self.integral {
            anyhow::ensure!(
                self.min_burst.ceil() <= self.max_burst.floor(),
                "generator burst range [{}, {}] contains no whole number",
                self.min_burst,
                self.max_burst
            );
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_arrival: 10.0,
            min_burst:   1.0,
            max_burst:   6.0,
            integral:    true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Wall-clock delay between ticks in the runner. 0 = as fast as possible.
    pub tick_interval_ms: u64,
    pub speed:            SimSpeed,
    /// Prefix for generated process ids (`P` gives `P1`, `P2`, ...).
    pub id_prefix:        String,
    pub generator:        GeneratorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            speed:            SimSpeed::Normal,
            id_prefix:        crate::input::DEFAULT_ID_PREFIX.to_string(),
            generator:        GeneratorConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.generator.validate()
    }

    /// Real time to wait between ticks at the configured speed.
    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms) / self.speed.ticks_per_interval()
    }
}
