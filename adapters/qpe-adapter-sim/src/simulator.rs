//! Simulator backend implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};

use qpe_hal::{Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult};
use qpe_ir::{Circuit, InstructionKind};

use crate::statevector::{MAX_SUPPORTED_QUBITS, Statevector};

/// Default qubit limit of the simulator.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local simulator backend.
///
/// The circuit is evolved once as a statevector and every shot is sampled
/// from the final distribution. Measurements must therefore be terminal:
/// a gate acting on an already-measured qubit is rejected.
pub struct SimulatorBackend {
    /// Static capabilities.
    capabilities: Capabilities,
    /// Source of measurement randomness.
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::simulator(DEFAULT_MAX_QUBITS),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Limit the simulator to `max_qubits` qubits, capped at
    /// [`MAX_SUPPORTED_QUBITS`].
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.capabilities.num_qubits = max_qubits.min(MAX_SUPPORTED_QUBITS);
        self
    }

    /// Seed the measurement sampler so runs are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Map each measured qubit to the classical bit it is read into.
    fn measurement_map(circuit: &Circuit) -> HalResult<Vec<(usize, usize)>> {
        let mut measured = vec![false; circuit.num_qubits()];
        let mut map = Vec::new();

        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured[q.index()]) {
                        return Err(HalError::Unsupported(format!(
                            "gate '{}' on q{} after measurement",
                            gate.name(),
                            q.0
                        )));
                    }
                }
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        measured[q.index()] = true;
                        map.push((q.index(), c.index()));
                    }
                }
                InstructionKind::Barrier => {}
            }
        }

        if map.is_empty() {
            return Err(HalError::InvalidCircuit(format!(
                "circuit '{}' has no measurements",
                circuit.name()
            )));
        }
        Ok(map)
    }

    /// Render a basis-state index as a classical bitstring, highest clbit first.
    fn outcome_to_bitstring(outcome: usize, map: &[(usize, usize)], num_clbits: usize) -> String {
        let mut bits = vec![false; num_clbits];
        for &(qubit, clbit) in map {
            bits[clbit] = outcome >> qubit & 1 == 1;
        }
        bits.iter()
            .rev()
            .map(|&set| if set { '1' } else { '0' })
            .collect()
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        self.validate(circuit, shots)?;
        let map = Self::measurement_map(circuit)?;

        let start = Instant::now();
        let num_qubits = circuit.num_qubits();
        debug!(
            "Starting simulation: {} qubits, {} shots",
            num_qubits, shots
        );

        let mut sv = Statevector::new(num_qubits)?;
        for inst in circuit.instructions() {
            sv.apply(inst);
        }
        debug!(norm = sv.norm_sqr(), "statevector evolved");

        let cdf = sv.cumulative_probabilities();
        let total = cdf.last().copied().unwrap_or(1.0);
        let last = cdf.len() - 1;

        let mut outcomes: FxHashMap<usize, u64> = FxHashMap::default();
        {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            for _ in 0..shots {
                let r = rng.r#gen::<f64>() * total;
                let outcome = cdf.partition_point(|&c| c <= r).min(last);
                *outcomes.entry(outcome).or_insert(0) += 1;
            }
        }

        let counts: Counts = outcomes
            .into_iter()
            .map(|(outcome, n)| {
                (
                    Self::outcome_to_bitstring(outcome, &map, circuit.num_clbits()),
                    n,
                )
            })
            .collect();

        let elapsed = start.elapsed();
        debug!(
            outcomes = counts.len(),
            "Simulation completed in {:?}", elapsed
        );

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}
