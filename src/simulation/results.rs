// src/simulation/results.rs
use std::fmt;
use std::time::Duration;

/// Summary of one simulator run.
///
/// The amplitudes themselves stay in the circuit; this only records what
/// the run did.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    gates_applied: usize,
    workers: usize,
    dim: usize,
    elapsed: Duration,
    /// Σ|c_i|² of the final state.
    final_norm_sq: f64,
}

impl SimulationResult {
    /// Creates a new result record. (Internal visibility)
    pub(crate) fn new(gates_applied: usize, workers: usize, dim: usize, elapsed: Duration, final_norm_sq: f64) -> Self {
        Self { gates_applied, workers, dim, elapsed, final_norm_sq }
    }

    /// Number of gate applications performed.
    pub fn gates_applied(&self) -> usize {
        self.gates_applied
    }

    /// Worker count used for every gate.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// State dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Wall-clock time spent in the gate loop.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Squared norm of the final state vector.
    pub fn final_norm_sq(&self) -> f64 {
        self.final_norm_sq
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "densq::SimulationResult[{} gates, dim {}, {} workers, {:?}, norm² {:.6}]",
            self.gates_applied, self.dim, self.workers, self.elapsed, self.final_norm_sq
        )
    }
}
