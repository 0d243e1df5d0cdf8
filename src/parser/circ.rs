// src/parser/circ.rs

//! Circuit file parser.
//!
//! ```text
//! #define X [(0, 0) (1, 0)
//!            (1, 0) (0, 0)]
//! #circ X X
//! ```
//!
//! * `#define NAME [ … ]` registers a `dim × dim` gate, entries in row-major
//!   order.
//! * `#circ G1 G2 …` sets the program. Names resolve to the first gate
//!   registered under that name; a later `#circ` replaces an earlier one.
//! * `#qubits N` is accepted when it matches the circuit being extended.
//!
//! Unrecognized lines are logged and skipped.

use super::literal::{parse_matrix_entry, split_matrix_entries};
use super::{ParseContext, collect_bracketed, is_skippable, parse_qubits, read_source};
use crate::circuits::Circuit;
use crate::core::{ComplexMatrix, SimResult};
use std::path::Path;
use tracing::{debug, warn};

/// Parses a circuit file from disk into an already initialized circuit.
pub fn parse_circ_file(path: &Path, circuit: &mut Circuit) -> SimResult<()> {
    let text = read_source(path)?;
    parse_circ_str(&path.display().to_string(), &text, circuit)
}

/// Parses circuit text, registering gates and the sequence on `circuit`.
pub fn parse_circ_str(source_name: &str, text: &str, circuit: &mut Circuit) -> SimResult<()> {
    let ctx = ParseContext { source_name };
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    while let Some((line_no, raw)) = lines.next() {
        let line = raw.trim();
        if is_skippable(line) {
            continue;
        }

        if let Some(rest) = line.strip_prefix("#qubits") {
            let n = parse_qubits(&ctx, line_no, rest)?;
            if n != circuit.n_qubits() {
                return Err(ctx.error(
                    line_no,
                    format!("#qubits {} does not match the initialized {} qubits", n, circuit.n_qubits()),
                ));
            }
        } else if let Some(rest) = line.strip_prefix("#define") {
            let rest = rest.trim_start();
            let name_end = rest
                .find(|c: char| c.is_whitespace() || c == '[')
                .unwrap_or(rest.len());
            let name = &rest[..name_end];
            if name.is_empty() {
                return Err(ctx.error(line_no, "invalid gate name"));
            }

            let body = collect_bracketed(&ctx, line_no, &rest[name_end..], &mut lines)?;
            let entries = split_matrix_entries(&body)
                .ok_or_else(|| ctx.error(line_no, format!("unbalanced parentheses in gate '{}'", name)))?;

            let dim = circuit.dim();
            if entries.len() != dim * dim {
                return Err(ctx.error(
                    line_no,
                    format!("gate '{}' has {} entries, expected {}", name, entries.len(), dim * dim),
                ));
            }
            let mut data = Vec::with_capacity(entries.len());
            for entry in entries {
                let value = parse_matrix_entry(entry)
                    .ok_or_else(|| ctx.error(line_no, format!("invalid matrix entry '{}' in gate '{}'", entry, name)))?;
                data.push(value);
            }

            let index = circuit.add_gate(name, ComplexMatrix::from_vec(dim, dim, data)?)?;
            if circuit.gate_index(name) != Some(index) {
                warn!(gate = name, line = line_no, "duplicate gate name; earlier definition takes precedence");
            }
            debug!(gate = name, index, "gate defined");
        } else if let Some(rest) = line.strip_prefix("#circ") {
            let mut sequence = Vec::new();
            for token in rest.split_whitespace() {
                let index = circuit
                    .gate_index(token)
                    .ok_or_else(|| ctx.error(line_no, format!("gate '{}' not defined", token)))?;
                sequence.push(index);
            }
            debug!(steps = sequence.len(), "sequence set");
            circuit.set_sequence(sequence)?;
        } else {
            warn!(source = source_name, line = line_no, "ignoring unrecognized line");
        }
    }

    Ok(())
}
