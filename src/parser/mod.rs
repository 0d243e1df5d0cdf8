// src/parser/mod.rs

//! Text front ends that build a [`Circuit`] from the two input files.
//!
//! * The initialization file (`#qubits`, `#init`) fixes the qubit count and
//!   assigns the state vector. See [`init`].
//! * The circuit file (`#define`, `#circ`) registers gates and sets the
//!   program. See [`circ`].
//!
//! Both formats are line oriented. Blank lines and lines starting with `%`
//! are skipped, and bracketed payloads (`[ … ]`) may span several lines.

pub mod literal;
pub mod init;
pub mod circ;

pub use circ::{parse_circ_file, parse_circ_str};
pub use init::{parse_init_file, parse_init_str};

use crate::circuits::Circuit;
use crate::core::{SimError, SimResult};
use std::path::Path;
use tracing::info;

/// Reads both input files and returns the populated circuit.
pub fn load_circuit(init_path: impl AsRef<Path>, circ_path: impl AsRef<Path>) -> SimResult<Circuit> {
    let mut circuit = parse_init_file(init_path.as_ref())?;
    parse_circ_file(circ_path.as_ref(), &mut circuit)?;
    info!(
        init = %init_path.as_ref().display(),
        circ = %circ_path.as_ref().display(),
        gates = circuit.gates().len(),
        steps = circuit.sequence().len(),
        "circuit loaded"
    );
    Ok(circuit)
}

/// Reads a whole input file, mapping failures to [`SimError::Io`].
pub(crate) fn read_source(path: &Path) -> SimResult<String> {
    std::fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Position-aware error construction shared by both front ends.
pub(crate) struct ParseContext<'a> {
    pub(crate) source_name: &'a str,
}

impl ParseContext<'_> {
    pub(crate) fn error(&self, line: usize, message: impl Into<String>) -> SimError {
        SimError::Parse {
            source_name: self.source_name.to_string(),
            line,
            message: message.into(),
        }
    }
}

/// Returns `true` for lines both formats skip.
pub(crate) fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('%')
}

/// Collects a bracketed payload that starts on `first` and may continue on
/// the following lines. Returns the text strictly between the first `[` and
/// the first `]`.
pub(crate) fn collect_bracketed<'a, I>(
    ctx: &ParseContext<'_>,
    line_no: usize,
    first: &str,
    lines: &mut I,
) -> SimResult<String>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let open = first
        .find('[')
        .ok_or_else(|| ctx.error(line_no, "missing '['"))?;
    let mut buffer = first[open + 1..].to_string();
    while !buffer.contains(']') {
        let (_, next) = lines
            .next()
            .ok_or_else(|| ctx.error(line_no, "missing closing ']'"))?;
        buffer.push('\n');
        buffer.push_str(next);
    }
    let close = buffer.find(']').unwrap_or(buffer.len());
    buffer.truncate(close);
    Ok(buffer)
}

/// Parses the argument of a `#qubits` directive.
pub(crate) fn parse_qubits(ctx: &ParseContext<'_>, line_no: usize, rest: &str) -> SimResult<u32> {
    rest.split_whitespace()
        .next()
        .and_then(|n| n.parse::<u32>().ok())
        .ok_or_else(|| ctx.error(line_no, "invalid #qubits"))
}
