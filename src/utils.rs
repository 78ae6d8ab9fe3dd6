//! utils.rs
//!
//! Small accessors shared by the pattern-driven passes, translated from the
//! `termStringValue`/`termIntValue` helpers in the original parser's
//! `utils.cpp`. Passes use these instead of matching on [`crate::term::Term`]
//! directly so that a captured `Invalid` slot (an ellipsis capture that
//! never matched, or a `%N` beyond the end of the sequence) decodes to
//! `None` rather than panicking.

use crate::term::{Literal, Term};

/// Returns the string value of `term` if it is a `Literal(String)`, else `None`.
pub fn term_string_value(term: &Term) -> Option<&str> {
    match term.as_literal() {
        Some(Literal::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Returns the integer value of `term` if it is a `Literal(Integer)`, else `None`.
pub fn term_int_value(term: &Term) -> Option<i64> {
    match term.as_literal() {
        Some(Literal::Integer(i)) => Some(*i),
        _ => None,
    }
}

/// Returns the numeric value of `term` (integer or double) if present.
pub fn term_numeric_value(term: &Term) -> Option<f64> {
    term.as_literal().and_then(Literal::as_double)
}
