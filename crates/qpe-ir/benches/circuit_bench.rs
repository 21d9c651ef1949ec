//! Benchmarks for circuit construction
//!
//! Run with: cargo bench -p qpe-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qpe_ir::{Circuit, QubitId};
use std::f64::consts::PI;

fn bench_phase_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("phase_layer");

    for num_qubits in &[4u32, 8, 12, 16] {
        group.bench_with_input(BenchmarkId::new("h_p", num_qubits), num_qubits, |b, &n| {
            b.iter(|| {
                let mut circuit = Circuit::with_size("bench", n, n);
                for q in 0..n {
                    circuit.h(QubitId(q)).unwrap();
                    circuit.p(black_box(PI / f64::from(q + 1)), QubitId(q)).unwrap();
                }
                circuit
            });
        });
    }

    group.finish();
}

fn bench_inverse_qft(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse_qft");

    for num_qubits in &[4u32, 8, 16, 24] {
        group.bench_with_input(BenchmarkId::new("build", num_qubits), num_qubits, |b, &n| {
            b.iter(|| Circuit::inverse_qft(black_box(n)).unwrap());
        });
    }

    group.finish();
}

fn bench_depth(c: &mut Criterion) {
    let iqft = Circuit::inverse_qft(16).unwrap();
    c.bench_function("depth_iqft_16", |b| b.iter(|| black_box(&iqft).depth()));
}

criterion_group!(benches, bench_phase_layer, bench_inverse_qft, bench_depth);
criterion_main!(benches);
