//! Circuit Intermediate Representation
//!
//! This crate provides the data structures used to describe the period
//! estimation circuit before it is handed to a backend.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing quantum
//!   and classical registers
//! - **Gates**: [`StandardGate`] for the built-in gate set
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] ordered instruction list with a fluent builder API
//!
//! # Bit Ordering
//!
//! Qubit `q` is the `2^q` digit of a computational basis index. The QFT built by
//! [`Circuit::qft`] follows the same convention.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qpe_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Example: Inverse Fourier Transform on a Register
//!
//! ```rust
//! use qpe_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("estimate", 4, 4);
//! let iqft = Circuit::inverse_qft(4).unwrap();
//! let register: Vec<_> = (0..4).map(QubitId).collect();
//!
//! circuit.compose(&iqft, &register).unwrap();
//! assert_eq!(circuit.count_ops()["h"], 4);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `Rz` | 1 | Z rotation |
//! | `P` | 1 | Phase gate diag(1, e^{iθ}) |
//! | `CX`, `CZ` | 2 | Controlled-NOT and Controlled-Z |
//! | `CP` | 2 | Controlled phase |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
