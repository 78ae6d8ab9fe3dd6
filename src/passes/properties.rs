//! passes/properties.rs
//!
//! Properties (specification §4.3.7), grounded on
//! `original_source/pass_properties.cpp`. The original's `PassSentBy` is
//! folded into this as a plain `Range::String` instance configured with the
//! sender property — `sent by %1` produces exactly the same
//! `Comparison(messageFrom, "Alice", Contains)` shape either way (see
//! `DESIGN.md`).

use std::collections::HashMap;

use crate::term::{Comparator, Literal, Term, TermKind};

/// The type range a captured literal must fit for this property to accept
/// it (specification §4.3.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    Integer,
    IntegerOrDouble,
    String,
    DateTime,
    Tag,
}

/// `captures[0]` is the property phrase's single slot (a bare literal, or a
/// `Comparison` already carrying a comparator from an earlier
/// [`super::comparators`] match). `tags` resolves a `Range::Tag` literal to
/// its resource URI, same cache as [`super::tags`].
pub fn run(captures: &[Term], property: &str, range: Range, tags: &HashMap<String, String>) -> Vec<Term> {
    match &captures[0].kind {
        TermKind::Comparison { subterm, comparator, .. } => {
            let Some(coerced) = coerce(subterm, range, tags) else {
                return Vec::new();
            };
            vec![Term::comparison(Some(property.to_string()), coerced, *comparator)]
        }
        TermKind::Literal(_) => {
            let Some(coerced) = coerce(&captures[0], range, tags) else {
                return Vec::new();
            };
            let comparator = if matches!(coerced.kind, TermKind::Literal(Literal::String(_))) {
                Comparator::Contains
            } else {
                Comparator::Equal
            };
            vec![Term::comparison(Some(property.to_string()), coerced, comparator)]
        }
        _ => Vec::new(),
    }
}

/// A bare numeric comparison no property phrase claimed defaults to file
/// size — the only numeric property this crate's catalog otherwise exposes.
/// `"images larger than 2 mib"` never spells out a "size" keyword; the
/// comparator phrase alone is expected to imply it (see `DESIGN.md`). Runs
/// last in the property group, so any comparison an explicit property pass
/// already claimed (`property: Some(_)`) is left untouched.
pub fn default_to_file_size(captures: &[Term]) -> Vec<Term> {
    match &captures[0].kind {
        TermKind::Comparison { property: None, subterm, comparator } if subterm.as_literal().map_or(false, Literal::is_numeric) => {
            vec![Term::comparison(
                Some(crate::vocab::FILE_SIZE.to_string()),
                (**subterm).clone(),
                *comparator,
            )]
        }
        _ => Vec::new(),
    }
}

fn coerce(term: &Term, range: Range, tags: &HashMap<String, String>) -> Option<Term> {
    let literal = term.as_literal()?;

    match range {
        Range::Integer => matches!(literal, Literal::Integer(_)).then(|| term.clone()),
        Range::IntegerOrDouble => literal.is_numeric().then(|| term.clone()),
        Range::String => literal.is_string().then(|| term.clone()),
        Range::DateTime => matches!(literal, Literal::DateTime(_)).then(|| term.clone()),
        Range::Tag => {
            let name = literal.as_str()?;
            tags.get(name).map(|uri| Term::resource(uri.clone()))
        }
    }
}
