//! passes/dateperiods.rs
//!
//! DatePeriods (specification §4.3.8), grounded on
//! `original_source/pass_dateperiods.{h,cpp}`. Each locale phrase ("next
//! %1", "%1 ago", "%1", a bare period name) is wired to its own configured
//! instance of this pass by the driver; [`ValueKind`] distinguishes an
//! absolute value from a signed offset, and [`Period::Variable`] (see
//! `term.rs`) marks the handful of instances that read the period itself
//! out of the match rather than having one fixed at construction.
//!
//! The original reads the numeric value from an `int value = 0` default
//! parameter, indistinguishable from a real zero; this uses `Option<i64>`
//! instead (`forced_value`) so a literal "0" in the query is never silently
//! treated as "no value supplied" (see `DESIGN.md`).

use std::collections::HashMap;

use crate::term::{Period, Term};
use crate::utils::{term_int_value, term_string_value};
use crate::vocab::dateperiod_property;

/// Whether the captured/forced integer is an absolute value, a forward
/// offset, or a backward ("ago", "last") offset that must be negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Value,
    Offset,
    InvertedOffset,
}

/// Builds the word-to-period lookup a `Period::Variable` instance needs
/// from the locale's `dateperiods.year`/`.month`/... word lists, grounded
/// on `pass_dateperiods.cpp`'s `registerPeriod` (every locale variant of a
/// period's name, plus the canonical name itself, maps to that period).
pub fn period_name_table(catalog: &dyn crate::adapters::LocaleCatalog) -> HashMap<String, Period> {
    let mut table = HashMap::new();

    for period in [
        Period::Year,
        Period::Month,
        Period::Week,
        Period::Day,
        Period::Hour,
        Period::Minute,
        Period::Second,
        Period::DayOfWeek,
    ] {
        table.insert(period.name().to_string(), period);

        let key = format!("dateperiods.{}", period.name());
        if let Some(words) = catalog.word_list(&key) {
            for word in words {
                table.insert(word.to_string(), period);
            }
        }
    }

    table
}

/// `period` is `Period::Variable` when the phrase itself names the period
/// (e.g. a bare `"%1"` matching any registered period word); otherwise it
/// is fixed ahead of time by the driver (e.g. the `"tomorrow"` instance
/// configures `Period::Day` with `forced_value = Some(1)`,
/// `kind = Offset`). `period_names` is only consulted when `period` is
/// `Period::Variable`; see [`period_name_table`].
pub fn run(
    captures: &[Term],
    period: Period,
    kind: ValueKind,
    forced_value: Option<i64>,
    period_names: &HashMap<String, Period>,
) -> Vec<Term> {
    let mut value_index = 0;
    let resolved_period = if period == Period::Variable {
        let Some(name) = term_string_value(&captures[0]) else {
            return Vec::new();
        };
        let Some(&p) = period_names.get(name) else {
            return Vec::new();
        };
        value_index = 1;
        p
    } else {
        period
    };

    let value = match forced_value {
        Some(v) => v,
        None => {
            let Some(term) = captures.get(value_index) else {
                return Vec::new();
            };
            let Some(v) = term_int_value(term) else {
                return Vec::new();
            };
            v
        }
    };

    let signed = if kind == ValueKind::InvertedOffset { -value } else { value };
    let property = dateperiod_property(resolved_period, kind != ValueKind::Value);

    vec![Term::comparison(
        Some(property),
        Term::integer(signed),
        crate::term::Comparator::Equal,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::EnglishCatalog;
    use crate::term::TermKind;

    fn names() -> HashMap<String, Period> {
        period_name_table(&EnglishCatalog::new())
    }

    fn property_of(term: &Term) -> &str {
        match &term.kind {
            TermKind::Comparison { property, .. } => property.as_deref().unwrap(),
            other => panic!("expected Comparison, got {:?}", other),
        }
    }

    fn value_of(term: &Term) -> i64 {
        match &term.kind {
            TermKind::Comparison { subterm, .. } => subterm.as_literal().unwrap().as_int().unwrap(),
            other => panic!("expected Comparison, got {:?}", other),
        }
    }

    #[test]
    fn fixed_period_with_captured_value() {
        let out = run(&[Term::integer(3)], Period::Year, ValueKind::Offset, None, &names());
        assert_eq!(out.len(), 1);
        assert_eq!(property_of(&out[0]), "internal://dateperiod/year?offset");
        assert_eq!(value_of(&out[0]), 3);
    }

    #[test]
    fn forced_value_ignores_the_capture() {
        let out = run(&[], Period::Day, ValueKind::Offset, Some(1), &names());
        assert_eq!(property_of(&out[0]), "internal://dateperiod/day?offset");
        assert_eq!(value_of(&out[0]), 1);
    }

    #[test]
    fn inverted_offset_negates_the_value() {
        let out = run(&[Term::integer(2)], Period::Week, ValueKind::InvertedOffset, None, &names());
        assert_eq!(value_of(&out[0]), -2);
    }

    #[test]
    fn variable_period_is_parsed_from_the_first_capture() {
        let out = run(
            &[Term::string("month"), Term::integer(5)],
            Period::Variable,
            ValueKind::Value,
            None,
            &names(),
        );
        assert_eq!(property_of(&out[0]), "internal://dateperiod/month?value");
        assert_eq!(value_of(&out[0]), 5);
    }

    #[test]
    fn variable_period_matches_a_plural_locale_word() {
        let out = run(
            &[Term::string("years"), Term::integer(2)],
            Period::Variable,
            ValueKind::Offset,
            None,
            &names(),
        );
        assert_eq!(property_of(&out[0]), "internal://dateperiod/year?offset");
    }

    #[test]
    fn variable_period_declines_on_unknown_name() {
        let out = run(
            &[Term::string("fortnight"), Term::integer(5)],
            Period::Variable,
            ValueKind::Value,
            None,
            &names(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn declines_when_no_value_available() {
        let out = run(&[], Period::Year, ValueKind::Value, None, &names());
        assert!(out.is_empty());
    }
}
