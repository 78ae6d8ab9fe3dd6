//! passes/typehints.rs
//!
//! TypeHints (specification §4.3.4), grounded on
//! `original_source/pass_typehints.cpp`. Matches word-for-word against the
//! locale's hint table, case-sensitively, the same way the original matches
//! the raw captured string against its (lowercase-only) hint hash — so
//! `"Images"` does not match where `"images"` does, reproducing the
//! original's behavior rather than "fixing" it into a case-insensitive
//! lookup (see `DESIGN.md`).

use std::collections::HashMap;

use crate::term::{Term, TermKind};
use crate::utils::term_string_value;
use crate::vocab;

/// Builds the word-to-resource-type table from the locale's
/// `typehints.file`/`.image`/`.video`/`.audio`/`.document`/`.email` word
/// lists.
pub fn hint_table(catalog: &dyn crate::adapters::LocaleCatalog) -> HashMap<String, String> {
    let mut table = HashMap::new();
    let groups: [(&str, &str); 6] = [
        ("typehints.file", vocab::TYPE_FILE),
        ("typehints.image", vocab::TYPE_IMAGE),
        ("typehints.video", vocab::TYPE_VIDEO),
        ("typehints.audio", vocab::TYPE_AUDIO),
        ("typehints.document", vocab::TYPE_DOCUMENT),
        ("typehints.email", vocab::TYPE_EMAIL),
    ];

    for (key, uri) in groups {
        if let Some(words) = catalog.word_list(key) {
            for word in words {
                table.insert(word.to_string(), uri.to_string());
            }
        }
    }

    table
}

/// `captures[0]` is the driver's blanket `"%1"` pattern, run against every
/// term. `type_hints` maps a locale word to the resource-type URI it names.
pub fn run(captures: &[Term], type_hints: &HashMap<String, String>) -> Vec<Term> {
    let Some(value) = term_string_value(&captures[0]) else {
        return Vec::new();
    };

    match type_hints.get(value) {
        Some(uri) => vec![Term::new(TermKind::ResourceType(uri.clone()))],
        None => Vec::new(),
    }
}
