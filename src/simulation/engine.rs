// src/simulation/engine.rs

//! Row-parallel gate application.
//!
//! Each gate is applied as a full dense matrix-vector product. The output
//! rows are split into contiguous blocks, one per worker; every worker reads
//! the shared matrix and input and writes only its own block. The workers of
//! one gate are joined before the next gate starts, and the two state
//! buffers then trade roles without copying.

use crate::circuits::Circuit;
use crate::core::matrix::row_dot;
use crate::core::vector::try_alloc_zeroed;
use crate::core::{ComplexMatrix, ComplexScalar, ComplexVector, SimError, SimResult};
use std::ops::Range;
use std::time::Instant;
use tracing::{debug, trace};

/// Splits the rows `[0, dim)` into contiguous blocks, one per worker.
///
/// The first `dim % workers` blocks hold `⌈dim / workers⌉` rows and the rest
/// hold `⌊dim / workers⌋`, in row order, so the blocks cover every row
/// exactly once. When `workers > dim` the trailing blocks would be empty and
/// are left out, so at most `min(workers, dim)` blocks are returned.
/// Returns no blocks when `workers == 0` or `dim == 0`.
pub fn row_partition(dim: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }
    let block = dim / workers;
    let mut remainder = dim % workers;
    let mut start = 0;
    (0..workers.min(dim))
        .map(|_| {
            let len = block + usize::from(remainder > 0);
            remainder = remainder.saturating_sub(1);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// The two state buffers of a run: `current` feeds the next gate, the other
/// slot receives its output.
pub(crate) struct StateBuffers {
    slots: [Vec<ComplexScalar>; 2],
    current: usize,
}

impl StateBuffers {
    /// Seeds the current slot with `initial` and allocates an equally sized scratch slot.
    pub(crate) fn new(initial: Vec<ComplexScalar>) -> SimResult<Self> {
        let scratch = try_alloc_zeroed(initial.len())?;
        Ok(Self { slots: [initial, scratch], current: 0 })
    }

    /// Borrows the current slot for reading and the scratch slot for writing.
    pub(crate) fn split(&mut self) -> (&[ComplexScalar], &mut [ComplexScalar]) {
        let [first, second] = &mut self.slots;
        if self.current == 0 {
            (first.as_slice(), second.as_mut_slice())
        } else {
            (second.as_slice(), first.as_mut_slice())
        }
    }

    /// Makes the scratch slot current. Only the slot index changes.
    pub(crate) fn swap(&mut self) {
        self.current ^= 1;
    }

    /// Read-only view of the current slot.
    pub(crate) fn current(&self) -> &[ComplexScalar] {
        &self.slots[self.current]
    }

    /// Consumes the buffers, keeping the current slot and dropping the scratch one.
    pub(crate) fn into_current(self) -> Vec<ComplexScalar> {
        let [first, second] = self.slots;
        if self.current == 0 { first } else { second }
    }
}

/// Computes `output = matrix · input` with one scoped worker per non-empty block.
///
/// Blocks are carved out of `output` with `split_at_mut`, so no two workers
/// can ever hold overlapping rows. Returns once every worker has finished.
pub(crate) fn apply_gate_parallel(
    matrix: &ComplexMatrix,
    input: &[ComplexScalar],
    output: &mut [ComplexScalar],
    partition: &[Range<usize>],
    step: usize,
) -> SimResult<()> {
    if matrix.cols() != input.len() || matrix.rows() != output.len() {
        return Err(SimError::DimensionMismatch {
            operation: "apply_gate_parallel",
            left: matrix.shape(),
            right: (input.len(), 1),
        });
    }

    crossbeam_utils::thread::scope(|scope| {
        let mut rest = output;
        for range in partition {
            let (block, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            if block.is_empty() {
                continue;
            }
            let first_row = range.start;
            scope.spawn(move |_| {
                for (offset, out) in block.iter_mut().enumerate() {
                    *out = row_dot(matrix.row(first_row + offset), input);
                }
            });
        }
    })
    .map_err(|_| SimError::WorkerPanicked { gate: step })
}

/// Drives a circuit's state through its gate sequence. (Internal visibility)
pub(crate) struct SimulationEngine {
    workers: usize,
}

impl SimulationEngine {
    pub(crate) fn new(workers: usize) -> SimResult<Self> {
        if workers == 0 {
            return Err(SimError::invalid("worker count must be at least 1"));
        }
        Ok(Self { workers })
    }

    /// Applies every scheduled gate in order and returns the final state.
    ///
    /// The circuit is only read; the caller installs the result. Returns
    /// `None` for an empty sequence, in which case nothing is allocated and
    /// no thread is started.
    pub(crate) fn execute(&self, circuit: &Circuit) -> SimResult<Option<ComplexVector>> {
        if circuit.sequence().is_empty() {
            return Ok(None);
        }

        let dim = circuit.dim();
        let partition = row_partition(dim, self.workers);
        trace!(?partition, "row partition");

        // Work on a private copy so a failure leaves the circuit state untouched.
        let mut initial = try_alloc_zeroed(dim)?;
        initial.copy_from_slice(circuit.state().as_slice());
        let mut buffers = StateBuffers::new(initial)?;

        for (step, &gate_index) in circuit.sequence().iter().enumerate() {
            let gate = circuit.gate(gate_index).ok_or_else(|| {
                SimError::invalid(format!("step {} refers to undefined gate #{}", step, gate_index))
            })?;

            let started = Instant::now();
            let (input, output) = buffers.split();
            apply_gate_parallel(gate.matrix(), input, output, &partition, step)?;
            buffers.swap();
            debug!(
                step,
                gate = gate.name(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "gate applied"
            );
        }

        trace!(len = buffers.current().len(), "sequence complete");
        Ok(Some(ComplexVector::from_vec(buffers.into_current())))
    }
}
