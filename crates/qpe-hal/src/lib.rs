//! Hardware Abstraction Layer
//!
//! A small, synchronous interface between circuits and the machinery that
//! executes them.
//!
//! - [`Backend`] trait: validate and run a circuit for a number of shots
//! - [`Capabilities`]: qubit limit, shot limit and gate set of a backend
//! - [`Counts`] / [`ExecutionResult`]: tallied measurement outcomes
//!
//! # Implementing a Backend
//!
//! ```
//! use qpe_hal::{Backend, Capabilities, Counts, ExecutionResult, HalResult};
//! use qpe_ir::Circuit;
//!
//! struct Constant(Capabilities);
//!
//! impl Backend for Constant {
//!     fn name(&self) -> &str {
//!         "constant"
//!     }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.0
//!     }
//!
//!     fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
//!         self.validate(circuit, shots)?;
//!         let mut counts = Counts::new();
//!         counts.insert("0".repeat(circuit.num_clbits()), u64::from(shots));
//!         Ok(ExecutionResult::new(counts, shots))
//!     }
//! }
//!
//! let backend = Constant(Capabilities::simulator(4));
//! let result = backend.run(&Circuit::bell()?, 100)?;
//! assert_eq!(result.counts.total_shots(), 100);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::Backend;
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use result::{Counts, ExecutionResult};
