// src/parser/init.rs

//! Initialization file parser.
//!
//! ```text
//! % one qubit in |0>
//! #qubits 1
//! #init [1, 0]
//! ```
//!
//! `#qubits N` must come before `#init`. The `#init` list holds exactly
//! `2^N` comma-separated amplitudes and may span lines up to the closing `]`.

use super::literal::parse_scalar;
use super::{ParseContext, collect_bracketed, is_skippable, parse_qubits, read_source};
use crate::circuits::Circuit;
use crate::core::{ComplexVector, SimResult};
use std::path::Path;
use tracing::debug;

/// Parses an initialization file from disk.
pub fn parse_init_file(path: &Path) -> SimResult<Circuit> {
    let text = read_source(path)?;
    parse_init_str(&path.display().to_string(), &text)
}

/// Parses initialization text. `source_name` only appears in error messages.
///
/// Returns a `Ready` circuit if `#init` was present, otherwise an
/// `Uninitialized` one.
pub fn parse_init_str(source_name: &str, text: &str) -> SimResult<Circuit> {
    let ctx = ParseContext { source_name };
    let mut circuit: Option<Circuit> = None;
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
    let mut last_line = 0;

    while let Some((line_no, raw)) = lines.next() {
        last_line = line_no;
        let line = raw.trim();
        if is_skippable(line) {
            continue;
        }

        if let Some(rest) = line.strip_prefix("#qubits") {
            let n = parse_qubits(&ctx, line_no, rest)?;
            circuit = Some(Circuit::init(n)?);
            debug!(n_qubits = n, "qubit count set");
        } else if line.starts_with("#init") {
            let c = circuit
                .as_mut()
                .ok_or_else(|| ctx.error(line_no, "#init before #qubits"))?;
            let body = collect_bracketed(&ctx, line_no, line, &mut lines)?;

            let mut amplitudes = Vec::with_capacity(c.dim());
            for token in body.split(',') {
                let amp = parse_scalar(token)
                    .ok_or_else(|| ctx.error(line_no, format!("invalid amplitude '{}'", token.trim())))?;
                amplitudes.push(amp);
            }
            if amplitudes.len() != c.dim() {
                return Err(ctx.error(
                    line_no,
                    format!("wrong number of init amplitudes: got {}, expected {}", amplitudes.len(), c.dim()),
                ));
            }
            c.set_state(ComplexVector::from_vec(amplitudes))?;
            debug!(dim = c.dim(), "initial state assigned");
        } else {
            return Err(ctx.error(line_no, format!("unknown directive '{}'", line)));
        }
    }

    circuit.ok_or_else(|| ctx.error(last_line, "missing #qubits"))
}
