// tests/simulation_tests.rs

// Import necessary types from the densq crate
use densq::core::approx_equal;
use densq::{
    Circuit, CircuitBuilder, CircuitPhase, ComplexMatrix, ComplexScalar, ComplexVector, EPSILON, SimError, Simulator,
};
use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

fn c(re: f64, im: f64) -> ComplexScalar {
    Complex::new(re, im)
}

fn pauli_x() -> ComplexMatrix {
    ComplexMatrix::from_rows(&[[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]).unwrap()
}

fn hadamard() -> ComplexMatrix {
    let h = FRAC_1_SQRT_2;
    ComplexMatrix::from_rows(&[[c(h, 0.0), c(h, 0.0)], [c(h, 0.0), c(-h, 0.0)]]).unwrap()
}

/// A 3-qubit operator with every entry populated, so that each output row
/// depends on the whole input vector.
fn scrambler(seed: u64) -> ComplexMatrix {
    let n = 8;
    let data = (0..n * n)
        .map(|k| {
            let k = k as u64 * 31 + seed * 17;
            c(((k % 19) as f64 - 9.0) / 10.0, ((k % 23) as f64 - 11.0) / 12.0)
        })
        .collect();
    ComplexMatrix::from_vec(n, n, data).unwrap()
}

fn three_qubit_state() -> Vec<ComplexScalar> {
    (0..8).map(|k| c(0.1 * k as f64 - 0.35, 0.05 * (k * k) as f64 - 0.2)).collect()
}

/// Asserts that two complex state vectors are approximately equal component-wise.
fn assert_states_close(actual: &[ComplexScalar], expected: &[ComplexScalar], eps: f64, context: &str) {
    assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(approx_equal(*a, *e, eps), "Mismatch at index {} - Actual: {}, Expected: {}, Context: {}", i, a, e, context);
    }
}

#[test]
fn test_bit_flip_once_and_twice() -> Result<(), SimError> {
    let mut once = CircuitBuilder::new(1)
        .state(vec![c(1.0, 0.0), c(0.0, 0.0)])
        .gate("X", pauli_x())
        .apply("X")
        .build()?;
    Simulator::new(1).run(&mut once)?;
    assert_states_close(once.state().as_slice(), &[c(0.0, 0.0), c(1.0, 0.0)], EPSILON, "X|0>");

    let mut twice = CircuitBuilder::new(1)
        .state(vec![c(1.0, 0.0), c(0.0, 0.0)])
        .gate("X", pauli_x())
        .apply("X")
        .apply("X")
        .build()?;
    Simulator::new(2).run(&mut twice)?;
    assert_states_close(twice.state().as_slice(), &[c(1.0, 0.0), c(0.0, 0.0)], EPSILON, "XX|0>");
    Ok(())
}

#[test]
fn test_hadamard_superposition() -> Result<(), SimError> {
    let mut circuit = CircuitBuilder::new(1)
        .state(vec![c(1.0, 0.0), c(0.0, 0.0)])
        .gate("H", hadamard())
        .apply("H")
        .build()?;
    Simulator::new(1).run(&mut circuit)?;
    assert_states_close(
        circuit.state().as_slice(),
        &[c(0.70711, 0.0), c(0.70711, 0.0)],
        1e-4,
        "H|0>",
    );
    Ok(())
}

#[test]
fn test_identity_gate_leaves_state_unchanged() -> Result<(), SimError> {
    let initial = three_qubit_state();
    let mut circuit = CircuitBuilder::new(3)
        .state(initial.clone())
        .gate("I", ComplexMatrix::identity(8)?)
        .apply("I")
        .apply("I")
        .build()?;
    Simulator::new(3).run(&mut circuit)?;
    assert_states_close(circuit.state().as_slice(), &initial, EPSILON, "identity");
    Ok(())
}

#[test]
fn test_empty_sequence_is_bit_identical() -> Result<(), SimError> {
    let initial = three_qubit_state();
    let mut circuit = CircuitBuilder::new(3)
        .state(initial.clone())
        .gate("S", scrambler(1))
        .build()?;
    let result = Simulator::new(4).run(&mut circuit)?;
    assert_eq!(result.gates_applied(), 0);
    assert_eq!(circuit.state().as_slice(), initial.as_slice());
    assert_eq!(circuit.phase(), CircuitPhase::Executed);
    Ok(())
}

#[test]
fn test_sequence_equals_manual_chaining() -> Result<(), SimError> {
    let initial = three_qubit_state();
    let gates = [scrambler(1), scrambler(2), scrambler(3)];

    let mut circuit = Circuit::init(3)?;
    circuit.set_state(ComplexVector::from_vec(initial.clone()))?;
    for (i, g) in gates.iter().enumerate() {
        circuit.add_gate(format!("G{}", i), g.clone())?;
    }
    circuit.set_sequence(vec![0, 1, 2, 1, 0])?;
    Simulator::new(3).run(&mut circuit)?;

    let mut expected = ComplexVector::from_vec(initial);
    for &i in &[0usize, 1, 2, 1, 0] {
        expected = ComplexMatrix::matrix_vector_mul(&gates[i], &expected)?;
    }
    assert_states_close(circuit.state().as_slice(), expected.as_slice(), EPSILON, "chained");
    Ok(())
}

#[test]
fn test_worker_count_does_not_change_results() -> Result<(), SimError> {
    let build = || {
        CircuitBuilder::new(3)
            .state(three_qubit_state())
            .gate("A", scrambler(4))
            .gate("B", scrambler(5))
            .apply("A")
            .apply("B")
            .apply("A")
            .build()
    };

    let mut reference = build()?;
    Simulator::new(1).run(&mut reference)?;

    for workers in [2usize, 3, 8, 13] {
        let mut circuit = build()?;
        Simulator::new(workers).run(&mut circuit)?;
        // Row partitioning does not change per-row summation order.
        assert_eq!(circuit.state().as_slice(), reference.state().as_slice(), "workers={}", workers);
    }
    Ok(())
}

#[test]
fn test_huge_worker_count_runs_with_one_block_per_row() -> Result<(), SimError> {
    let mut circuit = CircuitBuilder::new(1)
        .state(vec![c(1.0, 0.0), c(0.0, 0.0)])
        .gate("X", pauli_x())
        .apply("X")
        .build()?;
    let result = Simulator::new(usize::MAX / 4).run(&mut circuit)?;
    assert_eq!(result.workers(), usize::MAX / 4);
    assert_eq!(circuit.state().as_slice(), &[c(0.0, 0.0), c(1.0, 0.0)]);
    Ok(())
}

#[test]
fn test_run_rejects_uninitialized_state() -> Result<(), SimError> {
    let mut circuit = Circuit::init(1)?;
    circuit.add_gate("X", pauli_x())?;
    circuit.set_sequence(vec![0])?;
    match Simulator::new(1).run(&mut circuit) {
        Err(SimError::InvalidInput { message }) => assert!(message.contains("not been assigned")),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert_eq!(circuit.phase(), CircuitPhase::Uninitialized);
    Ok(())
}

#[test]
fn test_dimension_mismatch_is_rejected_up_front() -> Result<(), SimError> {
    let a = ComplexMatrix::alloc(2, 2)?;
    let b = ComplexMatrix::alloc(4, 4)?;
    assert!(matches!(
        ComplexMatrix::matrix_mul(&a, &b),
        Err(SimError::DimensionMismatch { .. })
    ));
    let v = ComplexVector::alloc(4)?;
    assert!(matches!(
        ComplexMatrix::matrix_vector_mul(&a, &v),
        Err(SimError::DimensionMismatch { .. })
    ));
    Ok(())
}
