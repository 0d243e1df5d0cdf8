// src/parser/literal.rs

//! Complex number literals as written in initialization and circuit files.
//!
//! Scalar forms: `a`, `a+ib`, `a-ib`, `a + ib`, `ib`, `-ib`, `i`, `+i`, `-i`
//! and `a+i` / `a-i` (unit imaginary part). Circuit files additionally use
//! the pair form `a, b` (usually parenthesized) whose second component may
//! be written `b`, `ib`, `-ib`, `i`, `+i` or `-i`.

use crate::core::ComplexScalar;
use num_complex::Complex;

/// Parses a scalar literal. Whitespace anywhere inside the literal is ignored.
/// Returns `None` for malformed text.
pub fn parse_scalar(text: &str) -> Option<ComplexScalar> {
    let s: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if s.is_empty() {
        return None;
    }
    if let Ok(re) = s.parse::<f64>() {
        return Some(Complex::new(re, 0.0));
    }

    let idx = s.find('i')?;
    let (prefix, suffix) = (&s[..idx], &s[idx + 1..]);
    let magnitude = if suffix.is_empty() { 1.0 } else { suffix.parse::<f64>().ok()? };

    let (real_text, sign) = if let Some(r) = prefix.strip_suffix('+') {
        (r, 1.0)
    } else if let Some(r) = prefix.strip_suffix('-') {
        (r, -1.0)
    } else if prefix.is_empty() {
        ("", 1.0)
    } else {
        return None;
    };
    let re = if real_text.is_empty() { 0.0 } else { real_text.parse::<f64>().ok()? };
    Some(Complex::new(re, sign * magnitude))
}

/// Parses the imaginary component of a pair literal: `b`, `ib`, `+ib`, `-ib`, `i`, `+i`, `-i`.
fn parse_imaginary_component(text: &str) -> Option<f64> {
    let s: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1.0, &s[1..]),
        Some(b'-') => (-1.0, &s[1..]),
        _ => (1.0, s.as_str()),
    };
    let digits = rest.strip_prefix('i')?;
    let magnitude = if digits.is_empty() { 1.0 } else { digits.parse::<f64>().ok()? };
    Some(sign * magnitude)
}

/// Parses one matrix entry from a circuit file: either the pair form
/// `re, im` (parentheses already stripped) or any scalar form.
pub fn parse_matrix_entry(text: &str) -> Option<ComplexScalar> {
    match text.split_once(',') {
        Some((re, im)) => {
            let re = re.trim();
            let re = if re.is_empty() { 0.0 } else { re.parse::<f64>().ok()? };
            Some(Complex::new(re, parse_imaginary_component(im)?))
        }
        None => parse_scalar(text),
    }
}

/// Splits a matrix body into entry texts.
///
/// Parenthesized groups `( … )` form one entry each, commas and spaces
/// included; outside parentheses entries are separated by whitespace.
/// Returns `None` if a parenthesis is left open.
pub fn split_matrix_entries(body: &str) -> Option<Vec<&str>> {
    let mut entries = Vec::new();
    let mut rest = body.trim_start();
    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix('(') {
            let close = inner.find(')')?;
            entries.push(&inner[..close]);
            rest = inner[close + 1..].trim_start();
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '(')
                .unwrap_or(rest.len());
            entries.push(&rest[..end]);
            rest = rest[end..].trim_start();
        }
    }
    Some(entries)
}
