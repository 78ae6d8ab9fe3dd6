//! passes/periodnames.rs
//!
//! PeriodNames (specification §4.3.9), grounded on
//! `original_source/pass_periodnames.cpp`. Unlike the original, indices are
//! 1-based (Monday = 1, January = 1) and the weekday comparison is attached
//! to `dayofweek`, not `day` — the original conflates the two and carries a
//! transcription bug that maps September twice instead of December; both
//! are fixed here per the locale's own `periodnames.day`/`periodnames.month`
//! word lists (see `DESIGN.md`).

use crate::term::{Comparator, Period, Term};
use crate::utils::term_string_value;
use crate::vocab::dateperiod_property;

/// `captures[0]` is the driver's blanket `"%1"` pattern, tried after every
/// more specific date pass has had a chance to match. `day_names` and
/// `month_names` are the locale's `periodnames.day`/`periodnames.month`
/// word lists, in order, lowercased.
pub fn run(captures: &[Term], day_names: &[String], month_names: &[String]) -> Vec<Term> {
    let Some(raw) = term_string_value(&captures[0]) else {
        return Vec::new();
    };
    let name = raw.to_lowercase();

    if let Some(index) = day_names.iter().position(|n| *n == name) {
        return vec![Term::comparison(
            Some(dateperiod_property(Period::DayOfWeek, false)),
            Term::integer(index as i64 + 1),
            Comparator::Equal,
        )];
    }

    if let Some(index) = month_names.iter().position(|n| *n == name) {
        return vec![Term::comparison(
            Some(dateperiod_property(Period::Month, false)),
            Term::integer(index as i64 + 1),
            Comparator::Equal,
        )];
    }

    Vec::new()
}

/// Reads the ordered day/month name lists out of a locale catalog, lowered
/// so lookups in [`run`] need not re-lower the table on every call.
pub fn name_tables(catalog: &dyn crate::adapters::LocaleCatalog) -> (Vec<String>, Vec<String>) {
    let days = catalog
        .word_list("periodnames.day")
        .map(|words| words.iter().map(|w| w.to_lowercase()).collect())
        .unwrap_or_default();
    let months = catalog
        .word_list("periodnames.month")
        .map(|words| words.iter().map(|w| w.to_lowercase()).collect())
        .unwrap_or_default();
    (days, months)
}
