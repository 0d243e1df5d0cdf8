// src/circuits/mod.rs

//! Defines the circuit description consumed by the simulator: the qubit
//! count, the state vector, the dictionary of named gates and the ordered
//! sequence of gate applications.
//!
//! A `Circuit` moves through three phases. It starts `Uninitialized` (the
//! state vector is allocated but holds no assigned amplitudes), becomes
//! `Ready` once a full state vector is supplied, and ends `Executed` after
//! the simulator has evolved the state through the sequence.

use crate::core::{ComplexMatrix, ComplexVector, SimError, SimResult};
use std::fmt;

/// A named, square, dense operator over the whole state space.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    name: String,
    matrix: ComplexMatrix,
}

impl Gate {
    /// The gate's name as registered in the circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The gate's `dim × dim` matrix.
    pub fn matrix(&self) -> &ComplexMatrix {
        &self.matrix
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gate {}:", self.name)?;
        write!(f, "{}", self.matrix)
    }
}

/// Lifecycle of a circuit's state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitPhase {
    /// The state vector is allocated but its amplitudes have not been assigned.
    Uninitialized,
    /// Every amplitude is assigned; the circuit can be executed.
    Ready,
    /// The simulator has consumed the sequence; the state holds the result.
    Executed,
}

impl fmt::Display for CircuitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitPhase::Uninitialized => write!(f, "uninitialized"),
            CircuitPhase::Ready => write!(f, "ready"),
            CircuitPhase::Executed => write!(f, "executed"),
        }
    }
}

/// The aggregate root of a simulation: qubit count, live state, gate
/// dictionary and the program to run.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    n_qubits: u32,
    /// Always `2^n_qubits`.
    dim: usize,
    state: ComplexVector,
    /// Insertion ordered. Names are not required to be unique.
    gates: Vec<Gate>,
    /// Indices into `gates`, in application order.
    sequence: Vec<usize>,
    phase: CircuitPhase,
}

impl Circuit {
    /// Creates a circuit over `n_qubits` qubits and allocates its `2^n` state.
    ///
    /// The circuit starts `Uninitialized`; assign the state with
    /// [`Circuit::set_state`] before running it.
    pub fn init(n_qubits: u32) -> SimResult<Self> {
        let dim = 1usize.checked_shl(n_qubits).ok_or_else(|| {
            SimError::invalid(format!(
                "{} qubits overflow the addressable state dimension",
                n_qubits
            ))
        })?;
        let state = ComplexVector::alloc(dim)?;
        Ok(Self {
            n_qubits,
            dim,
            state,
            gates: Vec::new(),
            sequence: Vec::new(),
            phase: CircuitPhase::Uninitialized,
        })
    }

    /// Number of qubits.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// State-space dimension `2^n_qubits`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> CircuitPhase {
        self.phase
    }

    /// The state vector. After a run it holds the final amplitudes.
    pub fn state(&self) -> &ComplexVector {
        &self.state
    }

    /// Assigns every amplitude of the state and marks the circuit `Ready`.
    ///
    /// The vector must have exactly `dim` entries.
    pub fn set_state(&mut self, state: ComplexVector) -> SimResult<()> {
        if state.size() != self.dim {
            return Err(SimError::invalid(format!(
                "state vector has {} amplitudes, circuit dimension is {}",
                state.size(),
                self.dim
            )));
        }
        self.state = state;
        self.phase = CircuitPhase::Ready;
        Ok(())
    }

    /// Registers a gate and returns its index.
    ///
    /// Duplicate names are accepted. Lookups by name resolve to the earliest
    /// registration, so a later gate with a colliding name is stored but
    /// shadowed (see [`Circuit::gate_index`]).
    pub fn add_gate(&mut self, name: impl Into<String>, matrix: ComplexMatrix) -> SimResult<usize> {
        let name = name.into();
        if matrix.shape() != (self.dim, self.dim) {
            return Err(SimError::invalid(format!(
                "gate '{}' is {} x {}, circuit requires {} x {}",
                name,
                matrix.rows(),
                matrix.cols(),
                self.dim,
                self.dim
            )));
        }
        self.gates.push(Gate { name, matrix });
        Ok(self.gates.len() - 1)
    }

    /// Registered gates in insertion order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Gate at `index`, if any.
    pub fn gate(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Index of the first gate named exactly `name` (case-sensitive).
    pub fn gate_index(&self, name: &str) -> Option<usize> {
        self.gates.iter().position(|g| g.name == name)
    }

    /// Replaces the program with `indices`. Every index must refer to a
    /// registered gate.
    pub fn set_sequence(&mut self, indices: impl Into<Vec<usize>>) -> SimResult<()> {
        let indices = indices.into();
        if let Some(bad) = indices.iter().find(|&&i| i >= self.gates.len()) {
            return Err(SimError::invalid(format!(
                "sequence refers to gate #{} but only {} gates are defined",
                bad,
                self.gates.len()
            )));
        }
        self.sequence = indices;
        Ok(())
    }

    /// The program as gate indices.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Consumes the circuit and hands back its state vector.
    pub fn into_state(self) -> ComplexVector {
        self.state
    }

    /// Installs the final state produced by the engine. (Internal visibility)
    pub(crate) fn commit_state(&mut self, state: ComplexVector) {
        debug_assert_eq!(state.size(), self.dim);
        self.state = state;
        self.mark_executed();
    }

    /// Marks the sequence as consumed without touching the state. (Internal visibility)
    pub(crate) fn mark_executed(&mut self) {
        self.phase = CircuitPhase::Executed;
    }

    /// Renders gate `index` as `Gate NAME:` followed by its matrix rows.
    pub fn format_gate(&self, index: usize) -> Option<String> {
        self.gates.get(index).map(|g| g.to_string())
    }

    /// Prints the state vector to stdout.
    pub fn print_state(&self) {
        println!("{}", self.state);
    }

    /// Prints gate `index` to stdout. Out-of-range indices print nothing.
    pub fn print_gate(&self, index: usize) {
        if let Some(text) = self.format_gate(index) {
            print!("{}", text);
        }
    }

    /// Prints every registered gate to stdout.
    pub fn print_all_gates(&self) {
        for index in 0..self.gates.len() {
            self.print_gate(index);
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "densq::Circuit[{} qubits, dim {}, {} gates, {} steps, {}]",
            self.n_qubits,
            self.dim,
            self.gates.len(),
            self.sequence.len(),
            self.phase
        )?;
        let names: Vec<&str> = self.sequence.iter().map(|&i| self.gates[i].name()).collect();
        writeln!(f, "sequence: {}", names.join(" "))?;
        write!(f, "state: {}", self.state)
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
///
/// The first failing step is remembered and reported by [`CircuitBuilder::build`];
/// later steps are skipped.
pub struct CircuitBuilder {
    circuit: SimResult<Circuit>,
    sequence: Vec<usize>,
}

impl CircuitBuilder {
    /// Starts a circuit over `n_qubits` qubits.
    pub fn new(n_qubits: u32) -> Self {
        Self {
            circuit: Circuit::init(n_qubits),
            sequence: Vec::new(),
        }
    }

    /// Assigns the initial state.
    pub fn state(mut self, state: impl Into<ComplexVector>) -> Self {
        if let Ok(circuit) = self.circuit.as_mut() {
            if let Err(e) = circuit.set_state(state.into()) {
                self.circuit = Err(e);
            }
        }
        self
    }

    /// Registers a gate.
    pub fn gate(mut self, name: &str, matrix: ComplexMatrix) -> Self {
        if let Ok(circuit) = self.circuit.as_mut() {
            if let Err(e) = circuit.add_gate(name, matrix) {
                self.circuit = Err(e);
            }
        }
        self
    }

    /// Appends an application of the gate named `name` to the program.
    pub fn apply(mut self, name: &str) -> Self {
        if let Ok(circuit) = self.circuit.as_ref() {
            match circuit.gate_index(name) {
                Some(index) => self.sequence.push(index),
                None => {
                    self.circuit = Err(SimError::invalid(format!("gate '{}' is not defined", name)));
                }
            }
        }
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> SimResult<Circuit> {
        let mut circuit = self.circuit?;
        circuit.set_sequence(self.sequence)?;
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    fn pauli_x() -> ComplexMatrix {
        let zero = Complex::new(0.0, 0.0);
        let one = Complex::new(1.0, 0.0);
        ComplexMatrix::from_rows(&[[zero, one], [one, zero]]).unwrap()
    }

    #[test]
    fn test_init_computes_dimension() -> SimResult<()> {
        let c = Circuit::init(3)?;
        assert_eq!(c.n_qubits(), 3);
        assert_eq!(c.dim(), 8);
        assert_eq!(c.state().size(), 8);
        assert_eq!(c.phase(), CircuitPhase::Uninitialized);
        Ok(())
    }

    #[test]
    fn test_init_rejects_unaddressable_dimension() {
        assert!(matches!(Circuit::init(200), Err(SimError::InvalidInput { .. })));
    }

    #[test]
    fn test_set_state_checks_length_and_marks_ready() -> SimResult<()> {
        let mut c = Circuit::init(1)?;
        assert!(c.set_state(ComplexVector::alloc(3)?).is_err());
        assert_eq!(c.phase(), CircuitPhase::Uninitialized);
        c.set_state(ComplexVector::alloc(2)?)?;
        assert_eq!(c.phase(), CircuitPhase::Ready);
        Ok(())
    }

    #[test]
    fn test_add_gate_rejects_wrong_shape() -> SimResult<()> {
        let mut c = Circuit::init(2)?;
        assert!(matches!(c.add_gate("X", pauli_x()), Err(SimError::InvalidInput { .. })));
        assert!(c.gates().is_empty());
        Ok(())
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_registration() -> SimResult<()> {
        let mut c = Circuit::init(1)?;
        let first = c.add_gate("U", pauli_x())?;
        let second = c.add_gate("U", ComplexMatrix::identity(2)?)?;
        assert_eq!((first, second), (0, 1));
        assert_eq!(c.gates().len(), 2);
        assert_eq!(c.gate_index("U"), Some(0));
        assert_eq!(c.gate(1).map(|g| g.matrix().clone()), Some(ComplexMatrix::identity(2)?));
        Ok(())
    }

    #[test]
    fn test_gate_lookup_is_case_sensitive() -> SimResult<()> {
        let mut c = Circuit::init(1)?;
        c.add_gate("H", ComplexMatrix::identity(2)?)?;
        assert_eq!(c.gate_index("H"), Some(0));
        assert_eq!(c.gate_index("h"), None);
        Ok(())
    }

    #[test]
    fn test_set_sequence_validates_indices() -> SimResult<()> {
        let mut c = Circuit::init(1)?;
        c.add_gate("X", pauli_x())?;
        assert!(c.set_sequence(vec![0, 1]).is_err());
        assert!(c.sequence().is_empty());
        c.set_sequence(vec![0, 0])?;
        assert_eq!(c.sequence(), &[0, 0]);
        // Replacing, not appending
        c.set_sequence(vec![0])?;
        assert_eq!(c.sequence(), &[0]);
        Ok(())
    }

    #[test]
    fn test_builder_resolves_names_and_reports_first_error() -> SimResult<()> {
        let one = Complex::new(1.0, 0.0);
        let zero = Complex::new(0.0, 0.0);
        let c = CircuitBuilder::new(1)
            .state(vec![one, zero])
            .gate("X", pauli_x())
            .apply("X")
            .apply("X")
            .build()?;
        assert_eq!(c.sequence(), &[0, 0]);
        assert_eq!(c.phase(), CircuitPhase::Ready);

        let err = CircuitBuilder::new(1).gate("X", pauli_x()).apply("Y").apply("X").build();
        assert!(matches!(err, Err(SimError::InvalidInput { .. })));
        Ok(())
    }

    #[test]
    fn test_format_gate() -> SimResult<()> {
        let mut c = Circuit::init(1)?;
        c.add_gate("X", pauli_x())?;
        let text = c.format_gate(0).unwrap();
        assert!(text.starts_with("Gate X:\n[ 0.00000 + i0.00000 1.00000 + i0.00000 ]"));
        assert_eq!(c.format_gate(1), None);
        Ok(())
    }
}
