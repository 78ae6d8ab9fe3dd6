//! passes/filesize.rs
//!
//! FileSize (specification §4.3.3), grounded on
//! `original_source/pass_filesize.cpp`. Runs before the file-size
//! [`super::properties`] instance (§5) so `"2 mb"` becomes a literal size
//! quantity before a `"size"` keyword attaches a property to it.

use std::collections::HashMap;

use crate::term::{Literal, Term};

/// `captures[0]` and `captures[1]` are the `%1 %2` pattern's two slots: a
/// number and its unit.
pub fn run(captures: &[Term], multipliers: &HashMap<String, i64>) -> Vec<Term> {
    let number = captures[0].as_literal();
    let unit = captures[1]
        .as_literal()
        .and_then(Literal::as_str)
        .map(|s| s.to_lowercase());

    let (Some(number), Some(unit)) = (number, unit) else {
        return Vec::new();
    };

    let Some(&multiplier) = multipliers.get(&unit) else {
        return Vec::new();
    };

    match number {
        Literal::Double(d) => vec![Term::double(d * multiplier as f64)],
        Literal::Integer(i) => vec![Term::integer(i * multiplier)],
        _ => Vec::new(),
    }
}

/// Builds the SI (powers of 1000) and binary (powers of 1024) multiplier
/// tables from a locale's word lists, keyed as registered in
/// `locale/english.rs` (`filesize.kb`, `filesize.kib`, ...).
pub fn multiplier_table(catalog: &dyn crate::adapters::LocaleCatalog) -> HashMap<String, i64> {
    let mut table = HashMap::new();
    let si: [(&str, i64); 4] = [
        ("filesize.kb", 1_000),
        ("filesize.mb", 1_000_000),
        ("filesize.gb", 1_000_000_000),
        ("filesize.tb", 1_000_000_000_000),
    ];
    let binary: [(&str, i64); 4] = [
        ("filesize.kib", 1 << 10),
        ("filesize.mib", 1 << 20),
        ("filesize.gib", 1 << 30),
        ("filesize.tib", 1 << 40),
    ];

    for (key, multiplier) in si.into_iter().chain(binary) {
        if let Some(words) = catalog.word_list(key) {
            for word in words {
                table.insert(word.to_string(), multiplier);
            }
        }
    }

    table
}
