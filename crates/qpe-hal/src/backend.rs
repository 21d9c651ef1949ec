//! Backend trait.
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (&ref)            (checked)       (blocking)
//! ```
//!
//! Execution is synchronous: `run()` blocks until every shot has been
//! sampled and returns the tallied counts.

use qpe_ir::Circuit;
use tracing::debug;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// Trait for quantum backends.
///
/// # Contract
///
/// - `capabilities()` MUST be infallible and cached at construction time.
/// - `run()` MUST return counts whose values sum to `shots`.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check a circuit and shot count against backend constraints.
    ///
    /// The default implementation checks the shot range, the qubit count and
    /// the gate set.
    fn validate(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        let caps = self.capabilities();

        if shots == 0 || shots > caps.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} (must be between 1 and {})",
                caps.max_shots
            )));
        }

        if circuit.num_qubits() > caps.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but {} only supports {}",
                circuit.num_qubits(),
                self.name(),
                caps.num_qubits
            )));
        }

        if let Some(gate) = circuit
            .instructions()
            .iter()
            .filter_map(|inst| inst.as_gate())
            .find(|g| !caps.supports_gate(g.name()))
        {
            return Err(HalError::Unsupported(format!(
                "gate '{}' on {}",
                gate.name(),
                self.name()
            )));
        }

        debug!(
            backend = self.name(),
            qubits = circuit.num_qubits(),
            shots,
            "circuit validated"
        );
        Ok(())
    }

    /// Execute `circuit` for `shots` repetitions and tally the outcomes.
    fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;
    use qpe_ir::QubitId;

    /// Backend that reports every shot as the all-zero outcome.
    struct ZeroBackend {
        caps: Capabilities,
    }

    impl Backend for ZeroBackend {
        fn name(&self) -> &str {
            "zero"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
            self.validate(circuit, shots)?;
            let mut counts = Counts::new();
            counts.insert("0".repeat(circuit.num_clbits()), u64::from(shots));
            Ok(ExecutionResult::new(counts, shots))
        }
    }

    fn backend(num_qubits: u32) -> ZeroBackend {
        ZeroBackend {
            caps: Capabilities::simulator(num_qubits),
        }
    }

    #[test]
    fn test_validate_shots() {
        let circuit = Circuit::bell().unwrap();
        let b = backend(2);
        assert!(matches!(b.validate(&circuit, 0), Err(HalError::InvalidShots(_))));
        assert!(matches!(
            b.validate(&circuit, 1_000_001),
            Err(HalError::InvalidShots(_))
        ));
        assert!(b.validate(&circuit, 1).is_ok());
    }

    #[test]
    fn test_validate_qubit_count() {
        let circuit = Circuit::with_size("wide", 3, 0);
        assert!(matches!(
            backend(2).validate(&circuit, 10),
            Err(HalError::CircuitTooLarge(_))
        ));
    }

    #[test]
    fn test_validate_gate_set() {
        let mut b = backend(2);
        b.caps.gate_set.two_qubit.clear();
        let mut circuit = Circuit::with_size("c", 2, 0);
        circuit.cp(0.5, QubitId(0), QubitId(1)).unwrap();

        let err = b.validate(&circuit, 10).unwrap_err();
        assert!(err.to_string().contains("'cp'"));
    }

    #[test]
    fn test_trait_object_run() {
        let b: Box<dyn Backend> = Box::new(backend(2));
        let result = b.run(&Circuit::bell().unwrap(), 32).unwrap();
        assert_eq!(result.counts.get("00"), 32);
    }
}
