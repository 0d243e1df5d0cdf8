// src/core/complex.rs

//! Scalar complex arithmetic.
//!
//! Amplitudes are `num_complex::Complex<f64>` values. The free functions in
//! this module spell out the exact arithmetic the matrix kernels rely on, so
//! that every product and every accumulation step is performed the same way
//! regardless of which worker thread evaluates it.

use num_complex::Complex;
use std::fmt;

use super::constants::densq_constants::PRINT_PRECISION;

/// A single complex amplitude: `{re: f64, im: f64}`.
pub type ComplexScalar = Complex<f64>;

/// Component-wise sum `(a.re + b.re, a.im + b.im)`.
#[inline]
pub fn add(a: ComplexScalar, b: ComplexScalar) -> ComplexScalar {
    Complex::new(a.re + b.re, a.im + b.im)
}

/// Complex product `(a.re*b.re − a.im*b.im, a.re*b.im + a.im*b.re)`.
#[inline]
pub fn multiply(a: ComplexScalar, b: ComplexScalar) -> ComplexScalar {
    Complex::new(a.re * b.re - a.im * b.im, a.re * b.im + a.im * b.re)
}

/// Euclidean modulus `sqrt(re² + im²)`.
#[inline]
pub fn modulus(a: ComplexScalar) -> f64 {
    (a.re * a.re + a.im * a.im).sqrt()
}

/// Tolerance-based equality: both components must differ by strictly less than `eps`.
#[inline]
pub fn approx_equal(a: ComplexScalar, b: ComplexScalar, eps: f64) -> bool {
    (a.re - b.re).abs() < eps && (a.im - b.im).abs() < eps
}

/// Display adapter rendering an amplitude as `"re + i|im|"` or `"re - i|im|"`.
///
/// `num_complex` has its own `Display`; this one fixes the precision and
/// always writes both components.
#[derive(Debug, Clone, Copy)]
pub struct ScalarDisplay(pub ComplexScalar);

impl fmt::Display for ScalarDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        if c.im < 0.0 {
            write!(f, "{:.p$} - i{:.p$}", c.re, -c.im, p = PRINT_PRECISION)
        } else {
            write!(f, "{:.p$} + i{:.p$}", c.re, c.im.abs(), p = PRINT_PRECISION)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::densq_constants::EPSILON;

    #[test]
    fn test_multiply_follows_textbook_formula() {
        // (1 + 2i)(3 - i) = 3 - i + 6i - 2i² = 5 + 5i
        let p = multiply(Complex::new(1.0, 2.0), Complex::new(3.0, -1.0));
        assert!(approx_equal(p, Complex::new(5.0, 5.0), EPSILON));
    }

    #[test]
    fn test_i_squared_is_minus_one() {
        let i = Complex::new(0.0, 1.0);
        assert_eq!(multiply(i, i), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn test_modulus_of_three_four() {
        assert_eq!(modulus(Complex::new(3.0, -4.0)), 5.0);
    }

    #[test]
    fn test_approx_equal_is_strict_at_the_boundary() {
        let a = Complex::new(1.0, 0.0);
        assert!(approx_equal(a, Complex::new(1.0 + 1e-10, 0.0), EPSILON));
        // Differences equal to or above eps are not equal.
        assert!(!approx_equal(a, Complex::new(1.5, 0.0), 0.5));
        assert!(!approx_equal(a, Complex::new(1.0, 1e-3), EPSILON));
    }

    #[test]
    fn test_display_uses_sign_of_imaginary_part() {
        assert_eq!(ScalarDisplay(Complex::new(0.5, 0.25)).to_string(), "0.50000 + i0.25000");
        assert_eq!(ScalarDisplay(Complex::new(-1.0, -2.0)).to_string(), "-1.00000 - i2.00000");
        assert_eq!(ScalarDisplay(Complex::new(0.0, 0.0)).to_string(), "0.00000 + i0.00000");
        // Negative zero prints as a plain magnitude.
        assert_eq!(ScalarDisplay(Complex::new(1.0, -0.0)).to_string(), "1.00000 + i0.00000");
    }
}
