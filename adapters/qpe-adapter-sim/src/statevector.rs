//! Statevector simulation engine.

use num_complex::Complex64;
use std::f64::consts::PI;

use qpe_hal::{HalError, HalResult};
use qpe_ir::{Instruction, InstructionKind, StandardGate};

/// Widest state that will be allocated: 2^26 amplitudes, 1 GiB.
pub const MAX_SUPPORTED_QUBITS: u32 = 26;

/// A statevector representing a quantum state.
///
/// Amplitude `i` belongs to the basis state whose bit `q` is the value of
/// qubit `q`.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Fails for more than [`MAX_SUPPORTED_QUBITS`] qubits.
    pub fn new(num_qubits: usize) -> HalResult<Self> {
        if num_qubits > MAX_SUPPORTED_QUBITS as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "{num_qubits} qubits exceeds the statevector limit of {MAX_SUPPORTED_QUBITS}"
            )));
        }
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements and barriers leave the state untouched; the caller
    /// samples the final state.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_gate(gate, &qubits);
            }
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }
    }

    /// Apply a standard gate.
    fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match *gate {
            // Single-qubit gates
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_phase(qubits[0], PI),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            StandardGate::T => self.apply_phase(qubits[0], PI / 4.0),
            StandardGate::Tdg => self.apply_phase(qubits[0], -PI / 4.0),
            StandardGate::Rz(theta) => self.apply_rz(qubits[0], theta),
            StandardGate::P(theta) => self.apply_phase(qubits[0], theta),

            // Two-qubit gates
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cp(qubits[0], qubits[1], PI),
            StandardGate::CP(theta) => self.apply_cp(qubits[0], qubits[1], theta),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { phase_0 } else { phase_1 };
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_cp(&mut self, control: usize, target: usize, theta: f64) {
        let both = (1 << control) | (1 << target);
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp *= phase;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Readout
    // =========================================================================

    /// Squared norm of the state; 1 for a valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Running sum of [`Statevector::probabilities`], for inverse-CDF sampling.
    pub fn cumulative_probabilities(&self) -> Vec<f64> {
        self.amplitudes
            .iter()
            .scan(0.0, |acc, amp| {
                *acc += amp.norm_sqr();
                Some(*acc)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpe_ir::{Circuit, QubitId};

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn run(circuit: &Circuit) -> Statevector {
        let mut sv = Statevector::new(circuit.num_qubits()).unwrap();
        for inst in circuit.instructions() {
            sv.apply(inst);
        }
        sv
    }

    /// Prepare basis state |x⟩ with X gates.
    fn basis(n: u32, x: usize) -> Circuit {
        let mut circuit = Circuit::with_size("basis", n, 0);
        for q in 0..n {
            if x >> q & 1 == 1 {
                circuit.x(QubitId(q)).unwrap();
            }
        }
        circuit
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2).unwrap();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes[1..].iter().all(|a| a.norm() == 0.0));
    }

    #[test]
    fn test_width_limit() {
        assert!(Statevector::new(MAX_SUPPORTED_QUBITS as usize + 1).is_err());
        assert!(matches!(
            Statevector::new(64),
            Err(HalError::CircuitTooLarge(_))
        ));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_h(0);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_phase_gate_only_touches_one() {
        let mut sv = Statevector::new(1).unwrap();
        sv.apply_h(0);
        sv.apply_phase(0, PI / 2.0);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, sqrt2_inv)));
    }

    #[test]
    fn test_swap() {
        let mut sv = Statevector::new(2).unwrap();
        sv.apply_x(0);
        sv.apply_swap(0, 1);
        assert!(approx_eq(sv.amplitudes[0b10], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_qft_matches_dft() {
        let n = 3;
        let size = 1usize << n;
        let x = 5;

        let mut circuit = basis(n, x);
        circuit
            .compose(&Circuit::qft(n).unwrap(), &[QubitId(0), QubitId(1), QubitId(2)])
            .unwrap();
        let sv = run(&circuit);

        let norm = 1.0 / (size as f64).sqrt();
        for y in 0..size {
            let angle = 2.0 * PI * (x * y) as f64 / size as f64;
            let expected = Complex64::from_polar(norm, angle);
            assert!(
                approx_eq(sv.amplitudes[y], expected),
                "amplitude {y}: {} != {expected}",
                sv.amplitudes[y]
            );
        }
    }

    #[test]
    fn test_inverse_qft_undoes_qft() {
        let n = 4;
        let register: Vec<_> = (0..n).map(QubitId).collect();
        for x in [0usize, 1, 6, 11, 15] {
            let mut circuit = basis(n, x);
            circuit.compose(&Circuit::qft(n).unwrap(), &register).unwrap();
            circuit
                .compose(&Circuit::inverse_qft(n).unwrap(), &register)
                .unwrap();
            let sv = run(&circuit);
            assert!((sv.probabilities()[x] - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_phase_kickback_encodes_integer() {
        // H on every qubit, then P(2π·k·2^q/2^n) on qubit q, is QFT|k⟩.
        let n = 5u32;
        let k = 19.0;
        let mut circuit = Circuit::with_size("encode", n, 0);
        for q in 0..n {
            circuit.h(QubitId(q)).unwrap();
            let theta = 2.0 * PI * f64::from(1u32 << q) / f64::from(1u32 << n);
            circuit.p(k * theta, QubitId(q)).unwrap();
        }
        let register: Vec<_> = (0..n).map(QubitId).collect();
        circuit
            .compose(&Circuit::inverse_qft(n).unwrap(), &register)
            .unwrap();

        let probs = run(&circuit).probabilities();
        assert!((probs[19] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_norm_preserved() {
        let mut circuit = Circuit::with_size("mix", 3, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .rz(0.7, QubitId(1))
            .unwrap()
            .y(QubitId(1))
            .unwrap()
            .cp(1.1, QubitId(0), QubitId(2))
            .unwrap()
            .cz(QubitId(1), QubitId(0))
            .unwrap()
            .t(QubitId(2))
            .unwrap();
        let sv = run(&circuit);
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);

        let cdf = sv.cumulative_probabilities();
        assert_eq!(cdf.len(), 8);
        assert!((cdf[7] - 1.0).abs() < 1e-12);
    }
}
