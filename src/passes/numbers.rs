//! passes/numbers.rs
//!
//! Numbers (specification §4.3.2), grounded on
//! `original_source/pass_numbers.cpp`. Runs after [`super::splitunits`] so
//! unit suffixes are already detached, and again at the very end of the
//! pipeline against the `%1 . %2` pattern in the original — this crate's
//! default locale does not ship a decimal-point pass (see `DESIGN.md`), so
//! here it only ever runs against a single captured term.

use std::collections::HashMap;

use crate::term::Term;
use crate::utils::term_string_value;

/// Builds the name-to-value table from a locale's `numbers.0`..`numbers.10`
/// word lists.
pub fn number_name_table(catalog: &dyn crate::adapters::LocaleCatalog) -> HashMap<String, i64> {
    let mut table = HashMap::new();

    for n in 0..=10 {
        let key = format!("numbers.{}", n);
        if let Some(words) = catalog.word_list(&key) {
            for word in words {
                table.insert(word.to_string(), n);
            }
        }
    }

    table
}

/// `captures[0]` is the `%1` slot. `number_names` maps a localized name
/// (`"zero"`, `"first"`, ...) to the integer it denotes.
pub fn run(captures: &[Term], number_names: &HashMap<String, i64>) -> Vec<Term> {
    let Some(value) = term_string_value(&captures[0]) else {
        return Vec::new();
    };
    let lowered = value.to_lowercase();

    if let Some(&n) = number_names.get(&lowered) {
        return vec![Term::integer(n)];
    }

    // Prefer integers over doubles, matching the original's
    // "try toLongLong first" order.
    if let Ok(i) = lowered.parse::<i64>() {
        return vec![Term::integer(i)];
    }
    if let Ok(d) = lowered.parse::<f64>() {
        return vec![Term::double(d)];
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> HashMap<String, i64> {
        let mut m = HashMap::new();
        m.insert("zero".into(), 0);
        m.insert("one".into(), 1);
        m.insert("a".into(), 1);
        m.insert("first".into(), 1);
        m.insert("two".into(), 2);
        m
    }

    #[test]
    fn named_number_wins_over_parse() {
        let out = run(&[Term::string("first")], &names());
        assert_eq!(out, vec![Term::integer(1)]);
    }

    #[test]
    fn parses_plain_integer() {
        let out = run(&[Term::string("42")], &names());
        assert_eq!(out, vec![Term::integer(42)]);
    }

    #[test]
    fn parses_plain_double() {
        let out = run(&[Term::string("2.5")], &names());
        assert_eq!(out, vec![Term::double(2.5)]);
    }

    #[test]
    fn declines_on_non_numeric_text() {
        assert!(run(&[Term::string("hello")], &names()).is_empty());
    }

    #[test]
    fn declines_on_non_literal_capture() {
        assert!(run(&[Term::invalid()], &names()).is_empty());
    }
}
