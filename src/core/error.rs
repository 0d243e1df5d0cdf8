//! Error handling logic

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Error types raised while building or running a circuit.
///
/// Every variant corresponds to a distinct failure category, so callers can
/// tell resource exhaustion, dimension mismatches and contract violations
/// apart without inspecting the message text.
#[derive(Debug, Error)]
pub enum SimError {
    /// A vector or matrix buffer could not be allocated.
    #[error("Resource Exhausted: failed to allocate {requested} complex entries")]
    ResourceExhausted {
        /// Number of complex entries that were requested
        requested: usize,
    },

    /// Operands of a multiplication have incompatible inner dimensions.
    #[error("Dimension Mismatch in {operation}: left is {left:?}, right is {right:?}")]
    DimensionMismatch {
        /// Name of the failing operation (e.g. "matrix_mul")
        operation: &'static str,
        /// Shape of the left operand as (rows, cols)
        left: (usize, usize),
        /// Shape of the right operand as (rows, cols); vectors are (size, 1)
        right: (usize, usize),
    },

    /// The circuit handed to the engine violates its structural contract.
    #[error("Invalid Input: {message}")]
    InvalidInput {
        /// InvalidInput failure message
        message: String,
    },

    /// A circuit or initialization file could not be parsed.
    #[error("Parse Error ({source_name}:{line}): {message}")]
    Parse {
        /// Name of the file (or buffer) being parsed
        source_name: String,
        /// 1-based line number where the problem was found
        line: usize,
        /// Parse failure message
        message: String,
    },

    /// A file could not be opened or read.
    #[error("I/O Error ({}): {source}", path.display())]
    Io {
        /// Path of the file being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked while applying a gate.
    #[error("Worker Panicked while applying gate #{gate}")]
    WorkerPanicked {
        /// Position of the gate in the sequence
        gate: usize,
    },
}

impl SimError {
    /// Shorthand for building an [`SimError::InvalidInput`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidInput { message: message.into() }
    }
}
