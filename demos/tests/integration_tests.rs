//! Integration tests for the period estimation demo.
//!
//! These run the full build → simulate → analyse pipeline on the local
//! simulator, seeded wherever the outcome would otherwise be random.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use qpe_adapter_sim::SimulatorBackend;
use qpe_demos::circuits::period::{PeriodEstimation, create_circuit};
use qpe_demos::config::RunConfig;
use qpe_demos::plot::Histogram;
use qpe_demos::runners::{PeriodEstimate, PeriodRunner, simulate_circuit};

/// The default run reproduces the fixed example: 8 qubits, 1024 shots.
#[test]
fn test_default_run() {
    let config = RunConfig {
        seed: Some(11),
        ..RunConfig::default()
    };
    let run = PeriodRunner::new(config).unwrap().run().unwrap();

    assert_eq!(run.result.shots, 1024);
    assert_eq!(run.result.counts.total_shots(), 1024);
    assert!(run.result.counts.iter().all(|(k, _)| k.len() == 8));
    // T = 3.5 with 10% noise lands on a small neighbourhood of 3 and 4.
    assert!((2..=5).contains(&run.estimate.value), "estimate {}", run.estimate.value);
}

/// Noiseless integer periods are measured on every shot.
#[test]
fn test_noiseless_integer_period() {
    let circuit = create_circuit(8, 3.0, 0.0).unwrap();
    let backend = SimulatorBackend::new();
    let result = simulate_circuit(&backend, &circuit, 1024).unwrap();

    assert_eq!(result.counts.len(), 1);
    assert_eq!(result.counts.get("00000011"), 1024);
}

/// Periods outside the register wrap modulo 2^n.
#[test]
fn test_period_wraps_modulo_register() {
    let circuit = create_circuit(3, 10.0, 0.0).unwrap();
    let result = simulate_circuit(&SimulatorBackend::new(), &circuit, 64).unwrap();
    assert_eq!(result.counts.get("010"), 64);
}

/// A single counting qubit still produces one-character bitstrings.
#[test]
fn test_single_qubit_register() {
    let circuit = create_circuit(1, 1.0, 0.0).unwrap();
    let result = simulate_circuit(&SimulatorBackend::new(), &circuit, 10).unwrap();
    assert_eq!(result.counts.get("1"), 10);
}

/// Circuit structure does not depend on the noise draw.
#[test]
fn test_structure_is_deterministic() {
    let params = PeriodEstimation::default();
    let a = params.build(&mut StdRng::seed_from_u64(1)).unwrap();
    let b = params.build(&mut StdRng::seed_from_u64(2)).unwrap();

    assert_eq!(a.circuit.count_ops(), b.circuit.count_ops());
    assert_eq!(a.circuit.depth(), b.circuit.depth());
    assert_ne!(a.circuit, b.circuit);
}

/// More noise spreads the distribution.
#[test]
fn test_noise_lowers_peak() {
    let peak = |error_range: f64| {
        let config = RunConfig {
            period: 5.0,
            error_range,
            shots: 4000,
            seed: Some(3),
            ..RunConfig::default()
        };
        PeriodRunner::new(config).unwrap().run().unwrap().estimate.probability
    };
    assert_eq!(peak(0.0), 1.0);
    assert!(peak(0.5) < 0.9);
}

/// The histogram of a real run has one row per outcome.
#[test]
fn test_histogram_of_run() {
    let config = RunConfig {
        num_qubits: 4,
        seed: Some(8),
        ..RunConfig::default()
    };
    let run = PeriodRunner::new(config).unwrap().run().unwrap();
    let text = Histogram::from_counts(&run.result.counts).render(30);

    assert!(text.starts_with("Quantum Period Estimation Results\n"));
    assert_eq!(text.lines().count(), 2 + run.result.counts.len());
}

/// Estimates serialize for the JSON report.
#[test]
fn test_estimate_serializes() {
    let circuit = create_circuit(4, 6.0, 0.0).unwrap();
    let result = simulate_circuit(&SimulatorBackend::new(), &circuit, 16).unwrap();
    let estimate = PeriodEstimate::from_counts(&result.counts, 4).unwrap();

    let json = serde_json::to_value(&estimate).unwrap();
    assert_eq!(json["bitstring"], "0110");
    assert_eq!(json["value"], 6);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Counts sum to the shot count and keys match the register width.
    #[test]
    fn counts_cover_every_shot(
        n in 1u32..9,
        period in -40.0f64..40.0,
        error_range in 0.0f64..0.5,
        shots in 1u32..2048,
        seed in any::<u64>(),
    ) {
        let config = RunConfig {
            num_qubits: n,
            period,
            error_range,
            shots,
            seed: Some(seed),
            ..RunConfig::default()
        };
        let run = PeriodRunner::new(config).unwrap().run().unwrap();

        prop_assert_eq!(run.result.counts.total_shots(), u64::from(shots));
        for (bits, _) in run.result.counts.iter() {
            prop_assert_eq!(bits.len(), n as usize);
        }
        prop_assert!(run.estimate.value < 1 << n);
    }
}
