//! Demo runners for executing quantum algorithms.

pub mod period;

pub use period::{DEFAULT_SHOTS, PeriodEstimate, PeriodRun, PeriodRunner, simulate_circuit};
