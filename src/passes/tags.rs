//! passes/tags.rs
//!
//! Tags (specification §4.3.5), grounded on
//! `original_source/pass_tags.cpp`. The name→URI cache itself is owned and
//! lazily filled by [`crate::driver::Parser`] (specification §5: "cached on
//! first access... per-parser-instance and effectively immutable after
//! population"); this module only does the case-sensitive lookup and emits
//! the comparison.

use std::collections::HashMap;

use crate::term::{Comparator, Term};
use crate::utils::term_string_value;
use crate::vocab;

/// `captures[0]` is the driver's `"tagged as %1;has tag %1;tag is %1;# %1"`
/// pattern's single slot. `tags` maps a label to its resource URI,
/// case-sensitively, matching the original's plain `QHash<QString, QUrl>`
/// lookup.
pub fn run(captures: &[Term], tags: &HashMap<String, String>) -> Vec<Term> {
    let Some(name) = term_string_value(&captures[0]) else {
        return Vec::new();
    };

    if name.is_empty() {
        return Vec::new();
    }

    match tags.get(name) {
        Some(uri) => vec![Term::comparison(
            Some(vocab::HAS_TAG.to_string()),
            Term::resource(uri.clone()),
            Comparator::Equal,
        )],
        None => Vec::new(),
    }
}
