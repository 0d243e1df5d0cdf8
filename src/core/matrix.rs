// src/core/matrix.rs

//! Dense row-major complex matrices and the two fundamental products.

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

use super::complex::{ComplexScalar, ScalarDisplay, add, multiply};
use super::error::{SimError, SimResult};
use super::vector::{ComplexVector, try_alloc_zeroed};

/// Dot product of one matrix row with a vector, accumulated from `0 + 0i` in
/// ascending column order.
///
/// Both the serial product and the parallel engine go through this function,
/// which is what makes results independent of how rows are distributed.
#[inline]
pub(crate) fn row_dot(row: &[ComplexScalar], v: &[ComplexScalar]) -> ComplexScalar {
    row.iter()
        .zip(v)
        .fold(Complex::zero(), |sum, (m, x)| add(sum, multiply(*m, *x)))
}

/// An owned `rows × cols` matrix of complex entries stored row-major.
///
/// Element `(i, j)` lives at `data[i * cols + j]`; `rows * cols == data.len()`
/// always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexMatrix {
    rows: usize,
    cols: usize,
    data: Vec<ComplexScalar>,
}

impl ComplexMatrix {
    /// Allocates a zero-filled `rows × cols` matrix.
    pub fn alloc(rows: usize, cols: usize) -> SimResult<Self> {
        let len = rows
            .checked_mul(cols)
            .ok_or(SimError::ResourceExhausted { requested: usize::MAX })?;
        Ok(Self { rows, cols, data: try_alloc_zeroed(len)? })
    }

    /// Builds a matrix from a row-major buffer. Fails if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<ComplexScalar>) -> SimResult<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(SimError::invalid(format!(
                "matrix buffer holds {} entries, expected {} x {}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows. All rows must have the same length.
    pub fn from_rows<R>(rows: &[R]) -> SimResult<Self>
    where
        R: AsRef<[ComplexScalar]>,
    {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(SimError::invalid(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    /// The `n × n` identity.
    pub fn identity(n: usize) -> SimResult<Self> {
        let mut m = Self::alloc(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = Complex::one();
        }
        Ok(m)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns `true` if the matrix is `n × n` for some `n`.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[ComplexScalar] {
        &self.data
    }

    /// Entry `(i, j)`, if in bounds.
    pub fn get(&self, i: usize, j: usize) -> Option<ComplexScalar> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Overwrites entry `(i, j)`. Out-of-range indices are an `InvalidInput` error.
    pub fn set(&mut self, i: usize, j: usize, value: ComplexScalar) -> SimResult<()> {
        if i >= self.rows || j >= self.cols {
            return Err(SimError::invalid(format!(
                "index ({}, {}) out of range for {} x {} matrix",
                i, j, self.rows, self.cols
            )));
        }
        self.data[i * self.cols + j] = value;
        Ok(())
    }

    /// Row `i` as a slice of length `cols`.
    ///
    /// # Panics
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[ComplexScalar] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Independent deep copy, allocated through the fallible path.
    pub fn duplicate(&self) -> SimResult<Self> {
        let mut data = try_alloc_zeroed(self.data.len())?;
        data.copy_from_slice(&self.data);
        Ok(Self { rows: self.rows, cols: self.cols, data })
    }

    /// Frees the underlying storage; the matrix becomes `0 × 0`.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.rows = 0;
        self.cols = 0;
    }

    /// Matrix product `a · b`. Requires `a.cols == b.rows`.
    pub fn matrix_mul(a: &ComplexMatrix, b: &ComplexMatrix) -> SimResult<ComplexMatrix> {
        if a.cols != b.rows {
            return Err(SimError::DimensionMismatch {
                operation: "matrix_mul",
                left: a.shape(),
                right: b.shape(),
            });
        }

        let mut result = ComplexMatrix::alloc(a.rows, b.cols)?;
        for i in 0..a.rows {
            for j in 0..b.cols {
                let mut sum = Complex::zero();
                for k in 0..a.cols {
                    sum = add(sum, multiply(a.data[i * a.cols + k], b.data[k * b.cols + j]));
                }
                result.data[i * b.cols + j] = sum;
            }
        }
        Ok(result)
    }

    /// Matrix-vector product `a · v`. Requires `a.cols == v.size()`.
    pub fn matrix_vector_mul(a: &ComplexMatrix, v: &ComplexVector) -> SimResult<ComplexVector> {
        if a.cols != v.size() {
            return Err(SimError::DimensionMismatch {
                operation: "matrix_vector_mul",
                left: a.shape(),
                right: (v.size(), 1),
            });
        }

        let mut result = ComplexVector::alloc(a.rows)?;
        let input = v.as_slice();
        for (i, out) in result.as_mut_slice().iter_mut().enumerate() {
            *out = row_dot(a.row(i), input);
        }
        Ok(result)
    }
}

impl fmt::Display for ComplexMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[ ")?;
            for c in self.row(i) {
                write!(f, "{} ", ScalarDisplay(*c))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
