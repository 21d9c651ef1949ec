//! Local Statevector Simulator
//!
//! Exact statevector simulation with sampled measurements. The state is
//! evolved once per run and all shots are drawn from the final
//! distribution, so the cost of a run is dominated by the state size rather
//! than the shot count.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```
//! use qpe_adapter_sim::SimulatorBackend;
//! use qpe_hal::Backend;
//! use qpe_ir::Circuit;
//!
//! let backend = SimulatorBackend::new().with_seed(42);
//!
//! // Expect ~50% |00⟩ and ~50% |11⟩
//! let result = backend.run(&Circuit::bell()?, 1000)?;
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
pub use statevector::{MAX_SUPPORTED_QUBITS, Statevector};
