//! Period estimation runner.
//!
//! Build the noisy circuit, simulate it, and read the period off the
//! measured distribution.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, instrument};

use qpe_adapter_sim::SimulatorBackend;
use qpe_hal::{Backend, Counts, ExecutionResult, HalResult};
use qpe_ir::Circuit;

use crate::circuits::period::PeriodCircuit;
use crate::config::RunConfig;
use crate::error::{DemoError, DemoResult};

/// Shots per run unless configured otherwise.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Run `circuit` on `backend` for `shots` shots.
#[instrument(skip(backend, circuit), fields(backend = backend.name(), circuit = circuit.name()))]
pub fn simulate_circuit(
    backend: &dyn Backend,
    circuit: &Circuit,
    shots: u32,
) -> HalResult<ExecutionResult> {
    let result = backend.run(circuit, shots)?;
    info!(
        outcomes = result.counts.len(),
        time_ms = result.execution_time_ms,
        "simulation complete"
    );
    Ok(result)
}

/// What the measured distribution says about the period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodEstimate {
    /// Most frequent outcome.
    pub bitstring: String,
    /// Integer value of that outcome, the period estimate.
    pub value: u64,
    /// Fraction of shots that produced it.
    pub probability: f64,
    /// Estimated phase, `value / 2^n`.
    pub phase: f64,
    /// Count-weighted mean over all outcomes.
    pub mean: f64,
}

impl PeriodEstimate {
    /// Analyse the counts of an `num_qubits`-wide measurement.
    ///
    /// Fails with [`DemoError::EmptyCounts`] when nothing was measured and
    /// [`DemoError::InvalidOutcome`] when a key is not a bitstring that fits
    /// in 64 bits.
    pub fn from_counts(counts: &Counts, num_qubits: u32) -> DemoResult<Self> {
        let total = counts.total_shots();
        let (bitstring, count) = counts.most_frequent().ok_or(DemoError::EmptyCounts)?;
        if total == 0 {
            return Err(DemoError::EmptyCounts);
        }

        let value = parse_outcome(bitstring)?;
        let mut weighted = 0.0;
        for (bits, &n) in counts.iter() {
            weighted += parse_outcome(bits)? as f64 * n as f64;
        }

        Ok(Self {
            bitstring: bitstring.to_string(),
            value,
            probability: count as f64 / total as f64,
            phase: value as f64 / 2f64.powi(num_qubits as i32),
            mean: weighted / total as f64,
        })
    }

    /// Distance between the estimate and `period`.
    pub fn deviation(&self, period: f64) -> f64 {
        (self.value as f64 - period).abs()
    }
}

fn parse_outcome(bits: &str) -> DemoResult<u64> {
    u64::from_str_radix(bits, 2).map_err(|_| DemoError::InvalidOutcome(bits.to_string()))
}

/// Output of one [`PeriodRunner::run`].
#[derive(Debug, Clone)]
pub struct PeriodRun {
    /// The circuit that was executed, with its injected noise.
    pub circuit: PeriodCircuit,
    /// Raw execution result.
    pub result: ExecutionResult,
    /// Analysis of the counts.
    pub estimate: PeriodEstimate,
}

/// Period estimation runner.
pub struct PeriodRunner {
    config: RunConfig,
    backend: Box<dyn Backend>,
}

impl PeriodRunner {
    /// Create a runner backed by the local simulator.
    ///
    /// A configured seed fixes both the phase noise and the sampling.
    pub fn new(config: RunConfig) -> DemoResult<Self> {
        let mut backend = SimulatorBackend::new().with_max_qubits(config.max_qubits);
        if let Some(seed) = config.seed {
            backend = backend.with_seed(seed);
        }
        Self::with_backend(config, Box::new(backend))
    }

    /// Create a runner on an arbitrary backend.
    pub fn with_backend(config: RunConfig, backend: Box<dyn Backend>) -> DemoResult<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// The run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The backend circuits are executed on.
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Build, simulate and analyse.
    #[instrument(skip(self), fields(qubits = self.config.num_qubits, period = self.config.period))]
    pub fn run(&self) -> DemoResult<PeriodRun> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let circuit = self.config.circuit_params().build(&mut rng)?;

        let result = simulate_circuit(self.backend(), &circuit.circuit, self.config.shots)?;
        let estimate = PeriodEstimate::from_counts(&result.counts, self.config.num_qubits)?;

        info!(
            estimate = estimate.value,
            probability = estimate.probability,
            "period estimated"
        );

        Ok(PeriodRun {
            circuit,
            result,
            estimate,
        })
    }
}
