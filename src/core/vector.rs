// src/core/vector.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

use super::complex::{ComplexScalar, ScalarDisplay};
use super::error::{SimError, SimResult};

/// Allocates a zero-filled buffer of `len` amplitudes, reporting allocator
/// failure as [`SimError::ResourceExhausted`] instead of aborting.
pub(crate) fn try_alloc_zeroed(len: usize) -> SimResult<Vec<ComplexScalar>> {
    let mut data: Vec<ComplexScalar> = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| SimError::ResourceExhausted { requested: len })?;
    data.resize(len, Complex::zero());
    Ok(data)
}

/// An owned, fixed-length, heap-resident array of complex amplitudes.
///
/// The buffer is non-empty iff `size() > 0`. A released vector owns no
/// storage and reports a size of zero.
#[derive(Debug, Clone, PartialEq, Default)] // Avoid Eq for floating-point complex numbers
pub struct ComplexVector {
    data: Vec<ComplexScalar>,
}

impl ComplexVector {
    /// Allocates a vector of `size` entries.
    ///
    /// Contents start at `0 + 0i`; callers are expected to assign every
    /// amplitude before the vector is used as a simulation state.
    pub fn alloc(size: usize) -> SimResult<Self> {
        Ok(Self { data: try_alloc_zeroed(size)? })
    }

    /// Wraps an existing buffer without copying it.
    pub fn from_vec(data: Vec<ComplexScalar>) -> Self {
        Self { data }
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the vector owns no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only access to the amplitudes.
    pub fn as_slice(&self) -> &[ComplexScalar] {
        &self.data
    }

    /// Mutable access to the amplitudes.
    pub fn as_mut_slice(&mut self) -> &mut [ComplexScalar] {
        &mut self.data
    }

    /// Entry at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<ComplexScalar> {
        self.data.get(index).copied()
    }

    /// Resets every entry to `0 + 0i`. No-op on an empty vector.
    pub fn zero(&mut self) {
        self.data.fill(Complex::zero());
    }

    /// Frees the underlying storage. Safe to call any number of times.
    pub fn release(&mut self) {
        self.data = Vec::new();
    }

    /// Consumes the vector, yielding its buffer.
    pub fn into_vec(self) -> Vec<ComplexScalar> {
        self.data
    }
}

impl From<Vec<ComplexScalar>> for ComplexVector {
    fn from(data: Vec<ComplexScalar>) -> Self {
        Self::from_vec(data)
    }
}

impl fmt::Display for ComplexVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.data.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { ", " } else { "" }, ScalarDisplay(*c))?;
        }
        write!(f, "]")
    }
}
