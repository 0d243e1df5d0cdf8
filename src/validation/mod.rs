// src/validation/mod.rs

//! Checks that a `Circuit` honours the contract the engine relies on.

use crate::circuits::{Circuit, CircuitPhase};
use crate::core::{ComplexVector, SimError, SimResult};

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Sum of squared moduli of all amplitudes.
pub fn norm_squared(state: &ComplexVector) -> f64 {
    state.as_slice().iter().map(|c| c.norm_sqr()).sum()
}

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// The engine itself applies any matrix, unitary or not, so this is an
/// advisory check used for diagnostics rather than a precondition.
///
/// # Arguments
/// * `state` - The state vector to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to 1e-9.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(SimError::InvalidInput)` otherwise.
pub fn check_normalization(state: &ComplexVector, tolerance: Option<f64>) -> SimResult<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = norm_squared(state);
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(SimError::invalid(format!(
            "state vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
            norm_sq, effective_tolerance
        )))
    } else {
        Ok(())
    }
}

/// Verifies the structural contract of a circuit before execution:
///
/// * the state has been assigned (`Ready` or `Executed` phase),
/// * the state holds exactly `dim` amplitudes,
/// * every gate is `dim × dim`,
/// * every sequence entry names a registered gate.
pub fn validate_circuit(circuit: &Circuit) -> SimResult<()> {
    if circuit.phase() == CircuitPhase::Uninitialized {
        return Err(SimError::invalid("state vector has not been assigned"));
    }

    let dim = circuit.dim();
    if circuit.state().size() != dim {
        return Err(SimError::invalid(format!(
            "state vector has {} amplitudes, expected {}",
            circuit.state().size(),
            dim
        )));
    }

    for gate in circuit.gates() {
        if gate.matrix().shape() != (dim, dim) {
            return Err(SimError::invalid(format!(
                "gate '{}' is {:?}, expected ({}, {})",
                gate.name(),
                gate.matrix().shape(),
                dim,
                dim
            )));
        }
    }

    let gate_count = circuit.gates().len();
    if let Some((step, index)) = circuit
        .sequence()
        .iter()
        .enumerate()
        .find(|&(_, &index)| index >= gate_count)
    {
        return Err(SimError::invalid(format!(
            "step {} refers to gate #{} but only {} gates are defined",
            step, index, gate_count
        )));
    }

    Ok(())
}
