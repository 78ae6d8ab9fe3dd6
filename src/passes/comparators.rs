//! passes/comparators.rs
//!
//! Comparators (specification §4.3.6), grounded on
//! `original_source/pass_comparators.cpp`. The driver calls this once per
//! comparator phrase (`Contains`, `Greater`, `Smaller`, `Equal`),
//! reconfiguring `comparator` between invocations.

use crate::term::{Comparator, Term, TermKind};

/// `captures[0]` is the single `%N` slot shared by every comparator phrase
/// (e.g. `"(greater|bigger|more) than %1"`).
pub fn run(captures: &[Term], comparator: Comparator) -> Vec<Term> {
    match &captures[0].kind {
        TermKind::Comparison { property, subterm, .. } => {
            vec![Term::comparison(property.clone(), (**subterm).clone(), comparator)]
        }
        TermKind::Literal(_) => {
            // The property is left unset; a later Properties pass attaches
            // it when the comparator phrase sits next to a property phrase
            // (specification §4.3.6: "age > 5" matches "> 5" first).
            vec![Term::comparison(None, captures[0].clone(), comparator)]
        }
        _ => Vec::new(),
    }
}
