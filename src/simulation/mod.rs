// src/simulation/mod.rs

//! Executes a populated `densq::circuits::Circuit`.
//! This module contains the `Simulator` entry point and the internal
//! row-parallel engine that evolves the state one gate at a time.

mod results;
pub mod engine;

// Re-export the main public interface types
pub use results::SimulationResult;
pub use engine::row_partition;

use crate::circuits::{Circuit, CircuitPhase};
use crate::core::{SimError, SimResult};
use crate::validation::{check_normalization, norm_squared, validate_circuit};
use engine::SimulationEngine;
use std::time::Instant;
use tracing::{info, warn};

/// Tunables for a [`Simulator`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Worker threads per gate. Must be at least 1.
    pub workers: usize,
    /// Log a warning when the final state is not normalized.
    pub check_normalization: bool,
    /// Allowed deviation of Σ|c_i|² from 1.0 for the normalization check.
    pub norm_tolerance: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            check_normalization: false,
            norm_tolerance: 1e-9,
        }
    }
}

/// The main simulator orchestrating the execution of circuits.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a simulator that splits every gate across `workers` threads.
    pub fn new(workers: usize) -> Self {
        Self::with_config(SimulatorConfig { workers, ..SimulatorConfig::default() })
    }

    /// Creates a simulator from an explicit configuration.
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Runs the circuit's gate sequence against its state.
    ///
    /// Gates are applied strictly in sequence order; each one is distributed
    /// over the configured workers and fully joined before the next starts.
    /// On success the circuit's state holds the final amplitudes and the
    /// circuit is `Executed`.
    ///
    /// # Arguments
    /// * `circuit` - A `Ready` circuit.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` describing the run.
    /// * `Err(SimError)` if the worker count is zero, the circuit violates its
    ///   contract, a buffer cannot be allocated or a worker panics. The
    ///   circuit's state is left exactly as it was before the call.
    pub fn run(&self, circuit: &mut Circuit) -> SimResult<SimulationResult> {
        let engine = SimulationEngine::new(self.config.workers)?;

        if circuit.phase() == CircuitPhase::Executed {
            return Err(SimError::invalid(
                "circuit has already been executed; assign a new state before running it again",
            ));
        }
        validate_circuit(circuit)?;

        info!(
            n_qubits = circuit.n_qubits(),
            dim = circuit.dim(),
            gates = circuit.sequence().len(),
            workers = self.config.workers,
            "starting simulation"
        );

        let started = Instant::now();
        if let Some(final_state) = engine.execute(circuit)? {
            circuit.commit_state(final_state);
        } else {
            // Empty program: the state is left untouched.
            circuit.mark_executed();
        }
        let elapsed = started.elapsed();

        let final_norm_sq = norm_squared(circuit.state());
        if self.config.check_normalization {
            if let Err(e) = check_normalization(circuit.state(), Some(self.config.norm_tolerance)) {
                warn!(error = %e, "final state is not normalized");
            }
        }

        let result = SimulationResult::new(
            circuit.sequence().len(),
            self.config.workers,
            circuit.dim(),
            elapsed,
            final_norm_sq,
        );
        info!(elapsed_ms = elapsed.as_millis() as u64, "simulation finished");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ComplexMatrix, ComplexVector, EPSILON, approx_equal};
    use num_complex::Complex;

    fn bell_prep() -> SimResult<Circuit> {
        // H ⊗ I followed by CNOT, written as full 4x4 operators.
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let r = |x: f64| Complex::new(x, 0.0);
        let h_i = ComplexMatrix::from_rows(&[
            [r(h), r(0.0), r(h), r(0.0)],
            [r(0.0), r(h), r(0.0), r(h)],
            [r(h), r(0.0), r(-h), r(0.0)],
            [r(0.0), r(h), r(0.0), r(-h)],
        ])?;
        let cnot = ComplexMatrix::from_rows(&[
            [r(1.0), r(0.0), r(0.0), r(0.0)],
            [r(0.0), r(1.0), r(0.0), r(0.0)],
            [r(0.0), r(0.0), r(0.0), r(1.0)],
            [r(0.0), r(0.0), r(1.0), r(0.0)],
        ])?;
        let mut c = Circuit::init(2)?;
        c.set_state(ComplexVector::from_vec(vec![r(1.0), r(0.0), r(0.0), r(0.0)]))?;
        c.add_gate("HI", h_i)?;
        c.add_gate("CNOT", cnot)?;
        c.set_sequence(vec![0, 1])?;
        Ok(c)
    }

    #[test]
    fn test_bell_state() -> SimResult<()> {
        let mut c = bell_prep()?;
        let result = Simulator::new(2).run(&mut c)?;
        assert_eq!(result.gates_applied(), 2);
        assert_eq!(c.phase(), CircuitPhase::Executed);

        let h = std::f64::consts::FRAC_1_SQRT_2;
        let expected = [h, 0.0, 0.0, h];
        for (amp, want) in c.state().as_slice().iter().zip(expected) {
            assert!(approx_equal(*amp, Complex::new(want, 0.0), EPSILON));
        }
        assert!((result.final_norm_sq() - 1.0).abs() < EPSILON);
        Ok(())
    }

    #[test]
    fn test_zero_workers_rejected_before_touching_state() -> SimResult<()> {
        let mut c = bell_prep()?;
        let before = c.state().clone();
        assert!(matches!(Simulator::new(0).run(&mut c), Err(SimError::InvalidInput { .. })));
        assert_eq!(c.state(), &before);
        assert_eq!(c.phase(), CircuitPhase::Ready);
        Ok(())
    }

    #[test]
    fn test_uninitialized_circuit_is_not_run() -> SimResult<()> {
        let mut c = Circuit::init(1)?;
        c.add_gate("I", ComplexMatrix::identity(2)?)?;
        c.set_sequence(vec![0])?;
        assert!(matches!(Simulator::new(1).run(&mut c), Err(SimError::InvalidInput { .. })));
        Ok(())
    }

    #[test]
    fn test_second_run_requires_new_state() -> SimResult<()> {
        let mut c = bell_prep()?;
        Simulator::new(1).run(&mut c)?;
        assert!(Simulator::new(1).run(&mut c).is_err());

        let r = |x: f64| Complex::new(x, 0.0);
        c.set_state(ComplexVector::from_vec(vec![r(1.0), r(0.0), r(0.0), r(0.0)]))?;
        Simulator::new(1).run(&mut c)?;
        Ok(())
    }

    #[test]
    fn test_config_defaults() {
        let sim = Simulator::default();
        assert_eq!(sim.config().workers, 1);
        assert!(!sim.config().check_normalization);
    }
}
