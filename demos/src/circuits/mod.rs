//! Quantum circuit generators for demos.

pub mod period;

pub use period::{PeriodCircuit, PeriodEstimation, create_circuit, phase_angle};
