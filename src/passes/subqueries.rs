//! passes/subqueries.rs
//!
//! Subqueries (specification §4.3.11), grounded on
//! `original_source/pass_subqueries.cpp`. Every ellipsis-captured term in
//! `"related to ..."` is itself a fully-formed boolean subtree by the time
//! this pass runs, so it just hands the whole run to [`crate::fuser`] and
//! attaches the result under a single property comparison.

use crate::fuser;
use crate::term::{Comparator, Term};

/// `captures` is the ellipsis run from a pattern with zero named `%N`
/// slots (e.g. `"related to ...;similar to ..."`).
pub fn run(captures: &[Term], property: &str) -> Vec<Term> {
    if captures.is_empty() {
        return Vec::new();
    }

    let (fused, _) = fuser::fuse_terms(captures, 0);
    vec![Term::comparison(Some(property.to_string()), fused, Comparator::Equal)]
}
