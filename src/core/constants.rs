//! Numeric constants shared by the simulation layers.

/// Tolerances and fixed values used across the crate
pub mod densq_constants {
    /// Default tolerance for component-wise complex equality.
    pub const EPSILON: f64 = 1e-9;
    /// 1/√2, the entry magnitude of the Hadamard gate.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
    /// Decimal places used when rendering amplitudes.
    pub const PRINT_PRECISION: usize = 5;
}
