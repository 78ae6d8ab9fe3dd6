//! fuser.rs
//!
//! The final boolean-tree reduction (specification §4.5), translated from
//! `original_source/utils.cpp`'s free-standing `fuseTerms`/`intervalComparison`
//! functions. Used both as the very last step of the pipeline
//! ([`crate::driver`]) and, recursively, by the subqueries pass to collapse
//! an ellipsis-captured run into one subtree.

use crate::term::{Comparator, Literal, Term, TermKind};

/// Fuses `terms[start..]` into a single [`Term`], stopping at (and
/// consuming) a matching `)` if one is found, and returns the index just
/// past the terms it consumed. Mirrors the reference `fuseTerms`: a flat
/// left-to-right scan with two sticky flags (`build_and`, `build_not`) reset
/// after every term actually added to the accumulator, but *not* reset by
/// connective/negation/stopword tokens, which simply `continue`.
pub fn fuse_terms(terms: &[Term], start: usize) -> (Term, usize) {
    let mut fused: Option<Term> = None;
    let mut build_and = true;
    let mut build_not = false;
    let mut index = start;

    while index < terms.len() {
        let raw = &terms[index];
        let mut term = raw.clone();

        if let TermKind::Comparison {
            comparator: Comparator::Equal,
            subterm,
            property,
        } = &raw.kind
        {
            if let Some(Literal::DateTime(dt)) = subterm.as_literal() {
                term = interval_comparison(property.clone(), *dt);
            }
        } else if let Some(Literal::String(s)) = raw.as_literal() {
            let content = s.to_lowercase();

            match content.as_str() {
                "or" => {
                    build_and = false;
                    index += 1;
                    continue;
                }
                "and" | "+" => {
                    build_and = true;
                    index += 1;
                    continue;
                }
                "!" | "not" | "-" => {
                    build_not = true;
                    index += 1;
                    continue;
                }
                "(" => {
                    let (nested, next) = fuse_terms(terms, index + 1);
                    term = nested;
                    index = next;
                    apply(&mut fused, term, build_and, build_not);
                    build_and = true;
                    build_not = false;
                    continue;
                }
                ")" => {
                    return (fused.unwrap_or_else(Term::invalid), index + 1);
                }
                _ if content.chars().count() <= 2 => {
                    index += 1;
                    continue;
                }
                _ => {}
            }
        }

        apply(&mut fused, term, build_and, build_not);
        build_and = true;
        build_not = false;
        index += 1;
    }

    (fused.unwrap_or_else(Term::invalid), index)
}

fn apply(fused: &mut Option<Term>, mut term: Term, build_and: bool, build_not: bool) {
    if build_not {
        term = Term::new(TermKind::Negation(Box::new(term)));
    }

    match fused.take() {
        None => *fused = Some(term),
        Some(acc) => {
            *fused = Some(if build_and {
                match acc.kind {
                    TermKind::And(mut subterms) => {
                        subterms.push(term);
                        Term::new(TermKind::And(subterms))
                    }
                    _ => Term::new(TermKind::And(vec![acc, term])),
                }
            } else {
                match acc.kind {
                    TermKind::Or(mut subterms) => {
                        subterms.push(term);
                        Term::new(TermKind::Or(subterms))
                    }
                    _ => Term::new(TermKind::Or(vec![acc, term])),
                }
            });
        }
    }
}

/// Expands an `Equal` comparison over a `Literal(DateTime)` into a half-open
/// interval, per specification §4.4 step 6 / §4.5: the deepest-defined
/// period is tunneled through the date-time's millisecond field by
/// [`crate::datefolder`], and selects the interval width here.
fn interval_comparison(property: crate::term::PropertyRef, start: chrono::NaiveDateTime) -> Term {
    use crate::term::Period;
    use chrono::Timelike;

    let period = Period::from_depth(start.nanosecond() / 1_000_000).unwrap_or(Period::Day);
    let end = end_of_period(start, period);

    Term::new(TermKind::And(vec![
        Term::comparison(
            property.clone(),
            Term::new(TermKind::Literal(Literal::DateTime(start))),
            Comparator::GreaterOrEqual,
        ),
        Term::comparison(
            property,
            Term::new(TermKind::Literal(Literal::DateTime(end))),
            Comparator::SmallerOrEqual,
        ),
    ]))
}

fn end_of_period(start: chrono::NaiveDateTime, period: crate::term::Period) -> chrono::NaiveDateTime {
    use crate::term::Period;
    use chrono::{Datelike, Duration};

    match period {
        Period::Year => start
            .with_year(start.year() + 1)
            .unwrap_or_else(|| start + Duration::days(365)),
        Period::Month => add_one_month(start),
        // Mirrors `intervalComparison`'s Week case exactly: advances by the
        // ISO day-of-week (1 = Monday .. 7 = Sunday) rather than a flat day,
        // unlike the plain 1-day advance `DayOfWeek`/`Day` get below.
        Period::Week => start + Duration::days(start.weekday().number_from_monday() as i64),
        Period::DayOfWeek | Period::Day => start + Duration::days(1),
        Period::Hour => start + Duration::hours(1),
        Period::Minute => start + Duration::minutes(1),
        Period::Second => start + Duration::seconds(1),
        Period::Variable => start,
    }
}

fn add_one_month(dt: chrono::NaiveDateTime) -> chrono::NaiveDateTime {
    use chrono::Datelike;

    let (year, month) = if dt.month() == 12 {
        (dt.year() + 1, 1)
    } else {
        (dt.year(), dt.month() + 1)
    };

    dt.with_year(year)
        .and_then(|d| d.with_month(month))
        .unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Comparator;

    fn s(v: &str) -> Term {
        Term::string(v)
    }

    #[test]
    fn or_then_and_is_left_folded_and_greedy() {
        // "a OR b AND c" -> Or(a, And(b, c))
        let terms = vec![s("a"), s("or"), s("b"), s("and"), s("c")];
        let (fused, end) = fuse_terms(&terms, 0);
        assert_eq!(end, terms.len());
        match fused.kind {
            TermKind::Or(subterms) => {
                assert_eq!(subterms.len(), 2);
                assert!(matches!(subterms[0].kind, TermKind::Literal(Literal::String(ref s)) if s == "a"));
                assert!(matches!(subterms[1].kind, TermKind::And(_)));
            }
            other => panic!("expected Or, got {:?}", other),
        }
    }

    #[test]
    fn short_stopwords_are_dropped() {
        let terms = vec![s("to"), s("alice")];
        let (fused, _) = fuse_terms(&terms, 0);
        assert!(matches!(fused.kind, TermKind::Literal(Literal::String(ref s)) if s == "alice"));
    }

    #[test]
    fn negation_applies_to_the_next_term_only() {
        let terms = vec![s("not"), s("tagged"), s("work")];
        let (fused, _) = fuse_terms(&terms, 0);
        match fused.kind {
            TermKind::And(subterms) => {
                assert!(matches!(subterms[0].kind, TermKind::Negation(_)));
                assert!(!matches!(subterms[1].kind, TermKind::Negation(_)));
            }
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn parenthesis_recurses_and_consumes_closing_paren() {
        let terms = vec![s("("), s("a"), s("or"), s("b"), s(")"), s("and"), s("c")];
        let (fused, end) = fuse_terms(&terms, 0);
        assert_eq!(end, terms.len());
        match fused.kind {
            TermKind::And(subterms) => {
                assert!(matches!(subterms[0].kind, TermKind::Or(_)));
            }
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn equal_datetime_comparison_expands_to_interval() {
        use chrono::NaiveDate;
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_milli_opt(0, 0, 0, 4) // Day = index 4
            .unwrap();
        let term = Term::comparison(
            Some("nie:contentLastModified".to_string()),
            Term::new(TermKind::Literal(Literal::DateTime(dt))),
            Comparator::Equal,
        );
        let (fused, _) = fuse_terms(&[term], 0);
        match fused.kind {
            TermKind::And(subterms) => {
                assert_eq!(subterms.len(), 2);
                assert!(matches!(subterms[0].kind, TermKind::Comparison { comparator: Comparator::GreaterOrEqual, .. }));
                assert!(matches!(subterms[1].kind, TermKind::Comparison { comparator: Comparator::SmallerOrEqual, .. }));
            }
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn week_period_extends_by_day_of_week_not_one_day() {
        use crate::term::Literal;
        use chrono::NaiveDate;

        // 2024-03-14 is a Thursday (ISO day-of-week 4).
        let dt = NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_milli_opt(0, 0, 0, 2) // Week = index 2
            .unwrap();
        let term = Term::comparison(
            Some("internal://dateperiod/week?value".to_string()),
            Term::new(TermKind::Literal(Literal::DateTime(dt))),
            Comparator::Equal,
        );
        let (fused, _) = fuse_terms(&[term], 0);
        match fused.kind {
            TermKind::And(subterms) => {
                let end = match &subterms[1].kind {
                    TermKind::Comparison { subterm, .. } => match subterm.as_literal().unwrap() {
                        Literal::DateTime(dt) => dt.date(),
                        other => panic!("expected DateTime, got {:?}", other),
                    },
                    other => panic!("expected Comparison, got {:?}", other),
                };
                assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
            }
            other => panic!("expected And, got {:?}", other),
        }
    }
}
