//! passes/datevalues.rs
//!
//! DateValues (specification §4.3.10), grounded on
//! `original_source/pass_datevalues.cpp`, with HourMinute (specification
//! §4.3.12) folded in as [`run_hour_minute`], grounded on
//! `original_source/pass_hourminute.cpp` — both write the same
//! `internal://dateperiod/<period>?value` comparisons
//! [`crate::datefolder`] later folds, so the driver keeps them as one
//! module (see `SPEC_FULL.md`).
//!
//! [`run`] must only report progress (a non-empty return) when it produces
//! at least one comparison that was not already sitting in its input,
//! otherwise the driver's fixpoint loop (specification §4.4) never
//! terminates: the pass is re-tried against its own prior output on every
//! iteration, and a `%1 %2 %3 %4 %5 %6 %7` pattern with no literal left to
//! convert would match again and again.

use crate::term::{Comparator, Period, Term, TermKind};
use crate::utils::term_int_value;
use crate::vocab::dateperiod_property;

const SLOTS: [(Period, i64, i64); 7] = [
    (Period::Year, 0, 1 << 30),
    (Period::Month, 1, 60),
    (Period::Day, 1, 500),
    (Period::DayOfWeek, 1, 7),
    (Period::Hour, 0, 24),
    (Period::Minute, 0, 60),
    (Period::Second, 0, 60),
]; // min/max mirror the original's deliberately generous bounds, since not
   // every calendar adapter starts its year count from a common epoch.

/// `captures` has up to 7 slots, one per entry of [`SLOTS`], each either
/// `Term::invalid()` (unmatched) or a literal integer / an
/// already-converted comparison on that slot's period.
pub fn run(captures: &[Term], pm: bool) -> Vec<Term> {
    let mut out = Vec::new();
    let mut progress = false;

    for (i, (period, min, max)) in SLOTS.into_iter().enumerate() {
        let Some(term) = captures.get(i) else { break };
        if term.is_invalid() {
            continue;
        }

        if let Some(value) = term_int_value(term) {
            if value < min || value > max {
                return Vec::new();
            }

            let value = if period == Period::Hour && pm { value + 12 } else { value };
            progress = true;
            out.push(Term::comparison(
                Some(dateperiod_property(period, false)),
                Term::integer(value),
                Comparator::Equal,
            ));
            continue;
        }

        match &term.kind {
            TermKind::Comparison { property, .. } if property.as_deref() == Some(dateperiod_property(period, false).as_str()) => {
                out.push(term.clone());
            }
            _ => return Vec::new(),
        }
    }

    if progress {
        out
    } else {
        Vec::new()
    }
}

/// `captures[0]` is the hour slot; `captures[1]`, if present, is the
/// minute slot (driver registers a `"%1:%2"` pattern alongside a bare
/// `"%1"` one).
pub fn run_hour_minute(captures: &[Term], pm: bool) -> Vec<Term> {
    let Some(hour) = term_int_value(&captures[0]) else {
        return Vec::new();
    };

    let minute = if captures.len() == 2 {
        let Some(m) = term_int_value(&captures[1]) else {
            return Vec::new();
        };
        Some(m)
    } else {
        None
    };

    let hour = if pm { hour + 12 } else { hour };
    let mut out = vec![Term::comparison(
        Some(dateperiod_property(Period::Hour, false)),
        Term::integer(hour),
        Comparator::Equal,
    )];

    if let Some(minute) = minute {
        out.push(Term::comparison(
            Some(dateperiod_property(Period::Minute, false)),
            Term::integer(minute),
            Comparator::Equal,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_run(n: usize) -> Vec<Term> {
        (0..n).map(|_| Term::invalid()).collect()
    }

    #[test]
    fn single_year_slot_makes_progress() {
        let mut captures = invalid_run(7);
        captures[0] = Term::integer(2024);
        let out = run(&captures, false);
        assert_eq!(out.len(), 1);
        match &out[0].kind {
            TermKind::Comparison { property, .. } => {
                assert_eq!(property.as_deref(), Some("internal://dateperiod/year?value"));
            }
            other => panic!("expected Comparison, got {:?}", other),
        }
    }

    #[test]
    fn all_invalid_declines() {
        assert!(run(&invalid_run(7), false).is_empty());
    }

    #[test]
    fn out_of_range_value_declines_entirely() {
        let mut captures = invalid_run(7);
        captures[1] = Term::integer(99); // month slot, max 60
        assert!(run(&captures, false).is_empty());
    }

    #[test]
    fn pm_flag_adds_twelve_hours() {
        let mut captures = invalid_run(7);
        captures[4] = Term::integer(3);
        let out = run(&captures, true);
        match &out[0].kind {
            TermKind::Comparison { subterm, .. } => assert_eq!(subterm.as_literal().unwrap().as_int(), Some(15)),
            other => panic!("expected Comparison, got {:?}", other),
        }
    }

    #[test]
    fn already_converted_comparison_passes_through_without_counting_as_progress() {
        let mut captures = invalid_run(7);
        captures[0] = Term::comparison(
            Some(dateperiod_property(Period::Year, false)),
            Term::integer(2024),
            Comparator::Equal,
        );
        assert!(run(&captures, false).is_empty());
    }

    #[test]
    fn hour_minute_bare_hour() {
        let out = run_hour_minute(&[Term::integer(9)], false);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn hour_minute_pair_with_pm() {
        let out = run_hour_minute(&[Term::integer(9), Term::integer(30)], true);
        assert_eq!(out.len(), 2);
        match &out[0].kind {
            TermKind::Comparison { subterm, .. } => assert_eq!(subterm.as_literal().unwrap().as_int(), Some(21)),
            other => panic!("expected Comparison, got {:?}", other),
        }
    }
}
