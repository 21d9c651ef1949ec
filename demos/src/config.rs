//! Run configuration.
//!
//! Values come from [`RunConfig::default`], optionally overlaid by a JSON
//! file; missing fields keep their defaults:
//!
//! ```json
//! { "num_qubits": 6, "period": 2.25, "seed": 7 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use qpe_adapter_sim::{DEFAULT_MAX_QUBITS, MAX_SUPPORTED_QUBITS};

use crate::circuits::period::{
    DEFAULT_ERROR_RANGE, DEFAULT_NUM_QUBITS, DEFAULT_PERIOD, PeriodEstimation,
};
use crate::error::{DemoError, DemoResult};
use crate::runners::period::DEFAULT_SHOTS;

/// Everything needed for one period estimation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Width of the counting register.
    pub num_qubits: u32,
    /// Period to encode.
    pub period: f64,
    /// Relative phase error.
    pub error_range: f64,
    /// Number of shots.
    pub shots: u32,
    /// Seed for both phase noise and measurement sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Qubit limit of the simulator.
    pub max_qubits: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_qubits: DEFAULT_NUM_QUBITS,
            period: DEFAULT_PERIOD,
            error_range: DEFAULT_ERROR_RANGE,
            shots: DEFAULT_SHOTS,
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> DemoResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    /// The circuit parameters of this run.
    pub fn circuit_params(&self) -> PeriodEstimation {
        PeriodEstimation::new(self.num_qubits)
            .with_period(self.period)
            .with_error_range(self.error_range)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> DemoResult<()> {
        self.circuit_params().validate()?;
        if self.shots == 0 {
            return Err(DemoError::InvalidConfig("shots must be at least 1".into()));
        }
        if self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(DemoError::InvalidConfig(format!(
                "max_qubits {} exceeds the supported maximum of {MAX_SUPPORTED_QUBITS}",
                self.max_qubits
            )));
        }
        if self.num_qubits > self.max_qubits {
            return Err(DemoError::InvalidConfig(format!(
                "{} qubits exceeds the simulator limit of {}",
                self.num_qubits, self.max_qubits
            )));
        }
        Ok(())
    }
}
