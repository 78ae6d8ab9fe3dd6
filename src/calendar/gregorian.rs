//! calendar/gregorian.rs
//!
//! A [`crate::adapters::CalendarAdapter`] built on `chrono`'s proleptic
//! Gregorian calendar. This is the default calendar the crate ships so
//! `Parser::new_default` (see `lib.rs`) is runnable without a caller
//! supplying their own locale-specific calendar system.

use chrono::{Datelike, Duration, NaiveDate};

use crate::adapters::CalendarAdapter;

#[derive(Debug, Clone, Copy, Default)]
pub struct GregorianCalendar;

impl GregorianCalendar {
    pub fn new() -> Self {
        GregorianCalendar
    }
}

impl CalendarAdapter for GregorianCalendar {
    fn year(&self, date: NaiveDate) -> i32 {
        date.year()
    }

    fn month(&self, date: NaiveDate) -> u32 {
        date.month()
    }

    fn day(&self, date: NaiveDate) -> u32 {
        date.day()
    }

    fn day_of_year(&self, date: NaiveDate) -> u32 {
        date.ordinal()
    }

    fn days_in_week(&self, _date: NaiveDate) -> u32 {
        7
    }

    fn day_of_week(&self, date: NaiveDate) -> u32 {
        date.weekday().number_from_monday()
    }

    fn week(&self, date: NaiveDate) -> (u32, i32) {
        let iso = date.iso_week();
        (iso.week(), iso.year())
    }

    fn set_date(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn set_date_from_day_of_year(&self, year: i32, day_of_year: u32) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(year, day_of_year)
    }

    fn set_date_iso_week(&self, iso_year: i32, iso_week: u32, iso_day: u32) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(iso_year, iso_week, weekday_from_iso_day(iso_day))
    }

    fn add_years(&self, date: NaiveDate, years: i32) -> NaiveDate {
        let target_year = date.year() + years;
        self.set_date(target_year, date.month(), date.day())
            // Feb 29 landing on a non-leap year: fall back to Feb 28, the
            // convention also used by `chrono`'s own `checked_add_months`.
            .unwrap_or_else(|| {
                self.set_date(target_year, date.month(), date.day() - 1)
                    .unwrap_or(date)
            })
    }

    fn add_months(&self, date: NaiveDate, months: i32) -> NaiveDate {
        let total = date.month() as i32 - 1 + months;
        let year_offset = total.div_euclid(12);
        let month = (total.rem_euclid(12)) as u32 + 1;
        let year = date.year() + year_offset;
        let last_day = last_day_of_month(year, month);
        self.set_date(year, month, date.day().min(last_day)).unwrap_or(date)
    }

    fn add_days(&self, date: NaiveDate, days: i64) -> NaiveDate {
        date + Duration::days(days)
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// 1 = Monday .. 7 = Sunday (ISO 8601), clamped into range before converting.
fn weekday_from_iso_day(iso_day: u32) -> chrono::Weekday {
    use chrono::Weekday::*;
    match iso_day.clamp(1, 7) {
        1 => Mon,
        2 => Tue,
        3 => Wed,
        4 => Thu,
        5 => Fri,
        6 => Sat,
        _ => Sun,
    }
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap();
    (next_month_first - Duration::days(1)).day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_week_matches_iso() {
        let cal = GregorianCalendar::new();
        // 2024-03-15 is a Friday.
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(cal.day_of_week(d), 5);
    }

    #[test]
    fn add_months_clamps_to_shorter_month() {
        let cal = GregorianCalendar::new();
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(cal.add_months(jan31, 1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn add_years_handles_leap_day() {
        let cal = GregorianCalendar::new();
        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(cal.add_years(leap_day, 1), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }
}
