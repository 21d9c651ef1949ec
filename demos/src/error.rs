//! Error types for the demo library.

use qpe_hal::HalError;
use qpe_ir::IrError;
use thiserror::Error;

/// Errors from building, running or reporting a demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// The backend rejected or failed to run the circuit.
    #[error(transparent)]
    Hal(#[from] HalError),

    /// A run configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend returned no outcomes.
    #[error("Backend returned no measurement outcomes")]
    EmptyCounts,

    /// A measured outcome is not a bitstring of at most 64 bits.
    #[error("Unreadable measurement outcome '{0}'")]
    InvalidOutcome(String),
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_passes_through() {
        let err = DemoError::from(IrError::InvalidParameter {
            name: "num_qubits".into(),
            reason: "must be at least 1".into(),
        });
        assert!(err.to_string().contains("num_qubits"));
        assert!(DemoError::InvalidConfig("shots".into()).to_string().contains("shots"));
        assert!(DemoError::InvalidOutcome("0x1".into()).to_string().contains("'0x1'"));
    }
}
