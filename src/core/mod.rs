// src/core/mod.rs

//! Core data structures and types: complex scalars, vectors, matrices and
//! the crate-wide error type.

// Declare modules within core
pub mod error;
pub mod complex;
pub mod vector;
pub mod matrix;

// Re-export public types for convenient access via `densq::core::TypeName`
pub use error::{SimError, SimResult};
pub use complex::{ComplexScalar, ScalarDisplay, add, approx_equal, modulus, multiply};
pub use vector::ComplexVector;
pub use matrix::ComplexMatrix;

pub mod constants;
pub use constants::densq_constants::EPSILON; // Re-export
