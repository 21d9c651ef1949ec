//! Noisy period estimation circuit generator.
//!
//! Phase estimation with the eigenphase encoded directly as single-qubit
//! phase rotations: after a layer of Hadamards, qubit `q` picks up the phase
//! `T · 2π · 2^q / 2^n`, which is exactly the Fourier transform of `|T⟩`.
//! The inverse QFT then concentrates the amplitude on the integer nearest
//! `T`. Each rotation is perturbed by an independent uniform error to model
//! imprecise control.

use qpe_ir::{Circuit, IrError, IrResult, QubitId};
use rand::Rng;
use std::f64::consts::PI;
use tracing::{debug, trace};

/// Default register width.
pub const DEFAULT_NUM_QUBITS: u32 = 8;
/// Default encoded period.
pub const DEFAULT_PERIOD: f64 = 3.5;
/// Default relative phase error.
pub const DEFAULT_ERROR_RANGE: f64 = 0.1;

/// Base rotation for qubit `qubit` of an `num_qubits` register:
/// `2π · 2^qubit / 2^num_qubits`.
pub fn phase_angle(qubit: u32, num_qubits: u32) -> f64 {
    2.0 * PI * 2f64.powi(qubit as i32) / 2f64.powi(num_qubits as i32)
}

/// A built period estimation circuit and the noise injected into it.
#[derive(Debug, Clone)]
pub struct PeriodCircuit {
    /// The measured circuit.
    pub circuit: Circuit,
    /// Period error added on each qubit, indexed by qubit.
    pub phase_errors: Vec<f64>,
}

/// Parameters of a period estimation circuit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodEstimation {
    /// Width of the counting register.
    pub num_qubits: u32,
    /// Period `T` to encode.
    pub period: f64,
    /// Per-qubit error is drawn from `[-error_range·|T|, error_range·|T|]`.
    pub error_range: f64,
}

impl Default for PeriodEstimation {
    fn default() -> Self {
        Self {
            num_qubits: DEFAULT_NUM_QUBITS,
            period: DEFAULT_PERIOD,
            error_range: DEFAULT_ERROR_RANGE,
        }
    }
}

impl PeriodEstimation {
    /// Create parameters for an `num_qubits` register with the default
    /// period and error range.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            ..Self::default()
        }
    }

    /// Set the encoded period.
    #[must_use]
    pub fn with_period(mut self, period: f64) -> Self {
        self.period = period;
        self
    }

    /// Set the relative error range.
    #[must_use]
    pub fn with_error_range(mut self, error_range: f64) -> Self {
        self.error_range = error_range;
        self
    }

    /// Half-width of the uniform error interval.
    pub fn error_bound(&self) -> f64 {
        self.error_range * self.period.abs()
    }

    /// Check the parameters without building anything.
    pub fn validate(&self) -> IrResult<()> {
        if self.num_qubits == 0 {
            return Err(invalid("num_qubits", "must be at least 1"));
        }
        if !self.period.is_finite() {
            return Err(invalid("period", "must be finite"));
        }
        if !self.error_range.is_finite() || self.error_range < 0.0 {
            return Err(invalid("error_range", "must be finite and non-negative"));
        }
        if !self.error_bound().is_finite() {
            return Err(invalid("error_range", "error interval overflows"));
        }
        Ok(())
    }

    /// Build the circuit, drawing phase errors from `rng`.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> IrResult<PeriodCircuit> {
        self.validate()?;

        let n = self.num_qubits;
        let bound = self.error_bound();
        let mut circuit = Circuit::with_size("period_estimation", n, n);

        for q in 0..n {
            circuit.h(QubitId(q))?;
        }

        let mut phase_errors = Vec::with_capacity(n as usize);
        for q in 0..n {
            let error = if bound > 0.0 {
                rng.gen_range(-bound..=bound)
            } else {
                0.0
            };
            let theta = (self.period + error) * phase_angle(q, n);
            trace!(qubit = q, error, theta, "phase rotation");
            circuit.p(theta, QubitId(q))?;
            phase_errors.push(error);
        }

        let register: Vec<_> = (0..n).map(QubitId).collect();
        circuit.compose(&Circuit::inverse_qft(n)?, &register)?;
        circuit.measure_all()?;

        debug!(
            qubits = n,
            period = self.period,
            depth = circuit.depth(),
            ops = circuit.num_ops(),
            "period estimation circuit built"
        );

        Ok(PeriodCircuit {
            circuit,
            phase_errors,
        })
    }
}

fn invalid(name: &str, reason: &str) -> IrError {
    IrError::InvalidParameter {
        name: name.into(),
        reason: reason.into(),
    }
}

/// Build a period estimation circuit with noise from the thread RNG.
pub fn create_circuit(num_qubits: u32, period: f64, error_range: f64) -> IrResult<Circuit> {
    let params = PeriodEstimation::new(num_qubits)
        .with_period(period)
        .with_error_range(error_range);
    Ok(params.build(&mut rand::thread_rng())?.circuit)
}
