//! passes/splitunits.rs
//!
//! SplitUnits (specification §4.3.1), grounded on
//! `original_source/pass_splitunits.cpp`. Runs first in the pipeline (§5):
//! unit suffixes must be detached before [`super::numbers`] gets a chance to
//! parse the remaining digits.
//!
//! Unlike the original, which preserves whichever side the letters were on
//! (prefix-then-digits emits `(unit, value)`, digits-then-suffix emits
//! `(value, unit)`), this pass always emits `(value, unit)` in that order —
//! the canonical order specification §4.3.1 names regardless of input
//! orientation.

use std::collections::HashSet;

use crate::term::{Position, Term};
use crate::utils::term_string_value;

/// Builds the known-unit set from the locale's `splitunits.known` word
/// list.
pub fn known_unit_set(catalog: &dyn crate::adapters::LocaleCatalog) -> HashSet<String> {
    catalog
        .word_list("splitunits.known")
        .map(|words| words.iter().map(|w| w.to_lowercase()).collect())
        .unwrap_or_default()
}

/// `captures[0]` is the single `%1` slot the driver invokes this pass with
/// (pattern `"%1"`, run against every term in the sequence).
pub fn run(captures: &[Term], known_units: &HashSet<String>) -> Vec<Term> {
    let Some(value) = term_string_value(&captures[0]) else {
        return Vec::new();
    };

    let chars: Vec<char> = value.chars().collect();
    let position = captures[0].position;

    let prefix_len = chars.iter().take_while(|c| c.is_alphabetic()).count();
    if prefix_len > 0 && prefix_len < chars.len() {
        let prefix: String = chars[..prefix_len].iter().collect::<String>().to_lowercase();
        if known_units.contains(&prefix) {
            let number: String = chars[prefix_len..].iter().collect();
            return split_at(&number, &prefix, prefix_len, chars.len(), position);
        }
    }

    let suffix_len = chars.iter().rev().take_while(|c| c.is_alphabetic()).count();
    if suffix_len > 0 && suffix_len < chars.len() {
        let split_point = chars.len() - suffix_len;
        let suffix: String = chars[split_point..].iter().collect::<String>().to_lowercase();
        if known_units.contains(&suffix) {
            let number: String = chars[..split_point].iter().collect();
            return split_at(&number, &suffix, split_point, chars.len(), position);
        }
    }

    Vec::new()
}

fn split_at(
    number: &str,
    unit: &str,
    split_point: usize,
    total_len: usize,
    position: Option<Position>,
) -> Vec<Term> {
    let (number_pos, unit_pos) = match position {
        Some(p) => {
            // Byte offsets of `split_point`/`total_len` assume ASCII digits
            // and letters, which is all the known unit table contains.
            let number_start = p.start;
            let unit_start = p.start + split_point;
            (
                Some(Position::new(number_start, split_point)),
                Some(Position::new(unit_start, total_len - split_point)),
            )
        }
        None => (None, None),
    };

    let mut number_term = Term::string(number);
    number_term.position = number_pos;
    let mut unit_term = Term::string(unit);
    unit_term.position = unit_pos;

    vec![number_term, unit_term]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> HashSet<String> {
        ["kb", "mb", "gb", "tb", "kib", "mib", "gib", "tib", "k", "m", "g", "b"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn splits_digits_then_unit() {
        let captures = vec![Term::string("2mb").positioned(Position::new(5, 3))];
        let out = run(&captures, &units());
        assert_eq!(out.len(), 2);
        assert_eq!(term_string_value(&out[0]), Some("2"));
        assert_eq!(term_string_value(&out[1]), Some("mb"));
        assert_eq!(out[0].position.unwrap(), Position::new(5, 1));
        assert_eq!(out[1].position.unwrap(), Position::new(6, 2));
    }

    #[test]
    fn splits_unit_then_digits_in_value_unit_order() {
        let captures = vec![Term::string("kb5")];
        let out = run(&captures, &units());
        assert_eq!(out.len(), 2);
        assert_eq!(term_string_value(&out[0]), Some("5"));
        assert_eq!(term_string_value(&out[1]), Some("kb"));
    }

    #[test]
    fn declines_on_unknown_unit() {
        let captures = vec![Term::string("2xy")];
        assert!(run(&captures, &units()).is_empty());
    }

    #[test]
    fn declines_on_pure_alpha_or_pure_numeric() {
        let captures = vec![Term::string("hello")];
        assert!(run(&captures, &units()).is_empty());
        let captures = vec![Term::string("123")];
        assert!(run(&captures, &units()).is_empty());
    }
}
