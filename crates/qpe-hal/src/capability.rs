//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// Gates a backend can execute, by IR gate name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// Every gate in the IR.
    pub fn universal() -> Self {
        Self {
            single_qubit: ["id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "rz", "p"]
                .map(String::from)
                .to_vec(),
            two_qubit: ["cx", "cz", "cp", "swap"].map(String::from).to_vec(),
        }
    }

    /// Whether `name` is in this gate set.
    pub fn contains(&self, name: &str) -> bool {
        self.single_qubit
            .iter()
            .chain(&self.two_qubit)
            .any(|g| g == name)
    }
}

/// Static description of what a backend accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
}

impl Capabilities {
    /// Create capabilities for a simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::universal(),
            max_shots: 1_000_000,
            is_simulator: true,
        }
    }

    /// Whether the backend can execute the named gate.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_set.contains(name)
    }
}
