// src/lib.rs

//! `densq` - Dense state-vector simulation of quantum circuits
//!
//! Every gate is a full `2^n × 2^n` complex matrix applied to the whole
//! state vector. Each application is a matrix-vector product whose rows are
//! split across a fixed number of worker threads; gates run strictly in
//! sequence, and the two state buffers swap roles between gates.

pub mod core;
pub mod circuits;
pub mod simulation;
pub mod validation;
pub mod parser;

// Re-export the most common types for easier top-level use
pub use core::{ComplexMatrix, ComplexScalar, ComplexVector, SimError, SimResult, EPSILON};
pub use circuits::{Circuit, CircuitBuilder, CircuitPhase, Gate};
pub use simulation::{SimulationResult, Simulator, SimulatorConfig};
pub use parser::load_circuit;
pub use validation::{check_normalization, validate_circuit};

// Example 1: Bit flip
// Applies the Pauli-X gate to |0> once and twice and checks the resulting
// basis states.
/// ```
/// use densq::{CircuitBuilder, ComplexMatrix, Simulator, SimError};
/// use num_complex::Complex;
///
/// let zero = Complex::new(0.0, 0.0);
/// let one = Complex::new(1.0, 0.0);
/// let x = ComplexMatrix::from_rows(&[[zero, one], [one, zero]])?;
///
/// let mut circuit = CircuitBuilder::new(1)
///     .state(vec![one, zero])
///     .gate("X", x.clone())
///     .apply("X")
///     .build()?;
/// Simulator::new(2).run(&mut circuit)?;
/// assert_eq!(circuit.state().as_slice(), &[zero, one]);
///
/// let mut twice = CircuitBuilder::new(1)
///     .state(vec![one, zero])
///     .gate("X", x)
///     .apply("X")
///     .apply("X")
///     .build()?;
/// Simulator::new(1).run(&mut twice)?;
/// assert_eq!(twice.state().as_slice(), &[one, zero]);
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Loading from text
// Builds the same kind of circuit through the two text front ends.
/// ```
/// use densq::parser::{parse_circ_str, parse_init_str};
/// use densq::{Simulator, SimError, EPSILON};
/// use densq::core::approx_equal;
/// use num_complex::Complex;
///
/// let mut circuit = parse_init_str("init.q", "#qubits 1\n#init [1, 0]")?;
/// parse_circ_str(
///     "circ.q",
///     "#define H [(0.7071067811865476, 0) (0.7071067811865476, 0)\n\
///                 (0.7071067811865476, 0) (-0.7071067811865476, 0)]\n\
///      #circ H",
///     &mut circuit,
/// )?;
/// Simulator::new(4).run(&mut circuit)?;
///
/// let h = std::f64::consts::FRAC_1_SQRT_2;
/// for amp in circuit.state().as_slice() {
///     assert!(approx_equal(*amp, Complex::new(h, 0.0), EPSILON));
/// }
/// # Ok::<(), SimError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
