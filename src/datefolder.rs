//! datefolder.rs
//!
//! The date-time folder (specification §4.4), grounded on the aggregate
//! behavior of `original_source/pass_datevalues.cpp` plus the date-assembly
//! logic implied by `parser.cpp`'s top-level pass-invocation loop (that
//! source tree keeps the folding step inline in the driver rather than as a
//! separate translation unit; this crate pulls it out into its own module
//! since specification §4.4 treats it as a distinct pipeline stage).
//!
//! Walks the flat term sequence once, accumulating a [`DateTimeSpec`] out of
//! consecutive synthetic `internal://dateperiod/...` comparisons and
//! flushing it into one `Literal(DateTime)` term whenever a non-synthetic
//! term is encountered (or the sequence ends).

use chrono::{NaiveDate, NaiveDateTime};

use crate::adapters::CalendarAdapter;
use crate::term::{Literal, Period, Term, TermKind};
use crate::vocab::INTERNAL_DATEPERIOD_SCHEME;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Unset,
    Absolute,
    Relative,
}

#[derive(Debug, Clone, Copy)]
struct Field {
    value: i64,
    flag: Flag,
}

impl Default for Field {
    fn default() -> Self {
        Field { value: 0, flag: Flag::Unset }
    }
}

impl Field {
    fn is_set(&self) -> bool {
        self.flag != Flag::Unset
    }
}

/// Accumulates date/time component comparisons between two non-synthetic
/// terms. One field per [`Period`] variant except [`Period::Variable`].
#[derive(Debug, Default, Clone, Copy)]
struct DateTimeSpec {
    year: Field,
    month: Field,
    week: Field,
    dayofweek: Field,
    day: Field,
    hour: Field,
    minute: Field,
    second: Field,
}

impl DateTimeSpec {
    fn has_data(&self) -> bool {
        self.year.is_set()
            || self.month.is_set()
            || self.week.is_set()
            || self.dayofweek.is_set()
            || self.day.is_set()
            || self.hour.is_set()
            || self.minute.is_set()
            || self.second.is_set()
    }

    fn field_mut(&mut self, period: Period) -> Option<&mut Field> {
        Some(match period {
            Period::Year => &mut self.year,
            Period::Month => &mut self.month,
            Period::Week => &mut self.week,
            Period::DayOfWeek => &mut self.dayofweek,
            Period::Day => &mut self.day,
            Period::Hour => &mut self.hour,
            Period::Minute => &mut self.minute,
            Period::Second => &mut self.second,
            Period::Variable => return None,
        })
    }

    fn deepest_date(&self) -> Option<Period> {
        [
            (Period::Day, self.day),
            (Period::DayOfWeek, self.dayofweek),
            (Period::Week, self.week),
            (Period::Month, self.month),
            (Period::Year, self.year),
        ]
        .into_iter()
        .find(|(_, f)| f.is_set())
        .map(|(p, _)| p)
    }

    fn deepest_time(&self) -> Option<Period> {
        [
            (Period::Second, self.second),
            (Period::Minute, self.minute),
            (Period::Hour, self.hour),
        ]
        .into_iter()
        .find(|(_, f)| f.is_set())
        .map(|(p, _)| p)
    }

    fn deepest(&self) -> Option<Period> {
        self.deepest_time().or_else(|| self.deepest_date())
    }
}

/// Decodes a synthetic `internal://dateperiod/<period>?offset|value` URI
/// into `(period, is_offset)`.
fn decode_synthetic(property: &str) -> Option<(Period, bool)> {
    let rest = property.strip_prefix(INTERNAL_DATEPERIOD_SCHEME)?;
    let (name, kind) = rest.split_once('?')?;
    let period = Period::from_name(name)?;
    let is_offset = match kind {
        "offset" => true,
        "value" => false,
        _ => return None,
    };
    Some((period, is_offset))
}

/// Folds every run of synthetic date-period comparisons in `terms` into a
/// single `Literal(DateTime)` term, in place.
pub fn fold(terms: Vec<Term>, calendar: &dyn CalendarAdapter) -> Vec<Term> {
    let mut output = Vec::with_capacity(terms.len());
    let mut spec = DateTimeSpec::default();

    for term in terms {
        if let TermKind::Comparison { property, subterm, .. } = &term.kind {
            if let Some(prop) = property {
                if let Some((period, is_offset)) = decode_synthetic(prop) {
                    if let Some(value) = subterm.as_literal().and_then(Literal::as_int) {
                        if let Some(field) = spec.field_mut(period) {
                            field.value = value;
                            field.flag = if is_offset { Flag::Relative } else { Flag::Absolute };
                        }
                        continue;
                    }
                }
            }
        }

        if spec.has_data() {
            output.push(assemble(&spec, calendar));
            spec = DateTimeSpec::default();
        }

        output.push(term);
    }

    if spec.has_data() {
        output.push(assemble(&spec, calendar));
    }

    output
}

fn assemble(spec: &DateTimeSpec, calendar: &dyn CalendarAdapter) -> Term {
    let today = calendar.today();
    let date = resolve_date(spec, calendar, today);
    let (hour, minute, second) = resolve_time(spec);

    let mut dt = date
        .and_hms_opt(hour.rem_euclid(24) as u32, minute.rem_euclid(60) as u32, second.rem_euclid(60) as u32)
        .unwrap_or_else(|| date.and_hms_opt(0, 0, 0).unwrap());

    dt += relative_time_delta(spec);

    let period = spec.deepest().unwrap_or(Period::Day);
    let encoded = encode_period(dt, period);

    Term::new(TermKind::Literal(Literal::DateTime(encoded)))
}

/// Resolves year/month/day, and (if week or day-of-week data is present)
/// overrides the day component via ISO-week arithmetic, then applies any
/// relative (offset) deltas in Year, Month, Week, Day order.
fn resolve_date(spec: &DateTimeSpec, calendar: &dyn CalendarAdapter, today: NaiveDate) -> NaiveDate {
    let year_value = match spec.year.flag {
        Flag::Absolute => spec.year.value as i32,
        _ => calendar.year(today),
    };

    let month_explicit = spec.month.is_set();
    let day_explicit = spec.day.is_set();

    let mut date = if month_explicit {
        let month_value = match spec.month.flag {
            Flag::Absolute => spec.month.value as u32,
            _ => calendar.month(today),
        };
        let day_value = match spec.day.flag {
            Flag::Absolute => spec.day.value as u32,
            _ if day_explicit => calendar.day(today),
            _ => 1,
        };
        calendar
            .set_date(year_value, month_value, day_value)
            .unwrap_or(today)
    } else if day_explicit {
        // Month was never mentioned: the day value is interpreted directly
        // as a day-of-year (specification §4.4 step 2).
        let day_of_year = match spec.day.flag {
            Flag::Absolute => spec.day.value as u32,
            _ => calendar.day_of_year(today),
        };
        calendar
            .set_date_from_day_of_year(year_value, day_of_year)
            .unwrap_or(today)
    } else {
        calendar.set_date(year_value, 1, 1).unwrap_or(today)
    };

    if spec.week.is_set() || spec.dayofweek.is_set() {
        date = resolve_week(spec, calendar, date, month_explicit);
    }

    // Step 4: relative deltas, in Year, Month, Week, Day order.
    if spec.year.flag == Flag::Relative {
        date = calendar.add_years(date, spec.year.value as i32);
    }
    if spec.month.flag == Flag::Relative {
        date = calendar.add_months(date, spec.month.value as i32);
    }
    if spec.week.flag == Flag::Relative {
        let days_in_week = calendar.days_in_week(date) as i64;
        date = calendar.add_days(date, spec.week.value * days_in_week);
    }
    if spec.day.flag == Flag::Relative {
        date = calendar.add_days(date, spec.day.value);
    }

    date
}

/// Week-of-month when a month is given alongside an absolute week, plain
/// ISO-week arithmetic otherwise, per specification §4.4 step 3.
fn resolve_week(spec: &DateTimeSpec, calendar: &dyn CalendarAdapter, date: NaiveDate, month_explicit: bool) -> NaiveDate {
    let (iso_week_base, iso_year) = calendar.week(date);

    let target_week = match spec.week.flag {
        Flag::Absolute if month_explicit => {
            let first_of_month = calendar.set_date(calendar.year(date), calendar.month(date), 1).unwrap_or(date);
            let (first_week, _) = calendar.week(first_of_month);
            first_week + (spec.week.value as u32).saturating_sub(1)
        }
        Flag::Absolute => spec.week.value as u32,
        _ => iso_week_base,
    };

    let target_day = match spec.dayofweek.flag {
        Flag::Absolute => spec.dayofweek.value as u32,
        _ => calendar.day_of_week(date),
    };

    calendar
        .set_date_iso_week(iso_year, target_week, target_day)
        .unwrap_or(date)
}

fn resolve_time(spec: &DateTimeSpec) -> (i64, i64, i64) {
    let hour = match spec.hour.flag {
        Flag::Absolute => spec.hour.value,
        _ => 0,
    };
    let minute = match spec.minute.flag {
        Flag::Absolute => spec.minute.value,
        _ => 0,
    };
    let second = match spec.second.flag {
        Flag::Absolute => spec.second.value,
        _ => 0,
    };
    (hour, minute, second)
}

fn relative_time_delta(spec: &DateTimeSpec) -> chrono::Duration {
    let mut seconds = 0i64;
    if spec.hour.flag == Flag::Relative {
        seconds += spec.hour.value * 3600;
    }
    if spec.minute.flag == Flag::Relative {
        seconds += spec.minute.value * 60;
    }
    if spec.second.flag == Flag::Relative {
        seconds += spec.second.value;
    }
    chrono::Duration::seconds(seconds)
}

/// Tunnels `period`'s depth through `dt`'s millisecond field (specification
/// §4.4 step 6); [`crate::fuser`] decodes it back out.
fn encode_period(dt: NaiveDateTime, period: Period) -> NaiveDateTime {
    use chrono::Timelike;
    dt.with_nanosecond(period.depth() * 1_000_000).unwrap_or(dt)
}
