//! adapters.rs
//!
//! Ports to the three external collaborators the specification keeps
//! outside the core (§1, §6): the localization backend, the calendar
//! backend, and the tag/resource lookup backend. The core is generic over
//! these traits; it ships one concrete implementation of each so the crate
//! is runnable standalone ([`crate::locale::english::EnglishCatalog`],
//! [`crate::calendar::gregorian::GregorianCalendar`]), but a caller
//! embedding the parser in a real desktop-search stack is expected to
//! supply its own.

use chrono::NaiveDate;

/// Supplies translated pattern strings and word lists to the passes.
///
/// Pattern strings use `%1`..`%N` captures and `;`-separated alternative
/// rules (specification §4.2, §6); translators are expected to preserve
/// capture indices when translating a key into another language.
pub trait LocaleCatalog {
    /// Returns the translated pattern/rule string for `key`, or `None` if
    /// this catalog has no entry for it (the pass invocation is then
    /// skipped for this locale, rather than treated as an error).
    fn pattern(&self, key: &str) -> Option<&str>;

    /// Returns a space-separated word list (e.g. unit suffixes, digit
    /// names, day/month names) registered under `key`.
    fn word_list(&self, key: &str) -> Option<&[&str]>;

    /// The single-character separator set used by the splitter
    /// (specification §4.1). Returned as a `&str` of one-character tokens.
    fn separators(&self) -> &str;
}

/// A locale's answer to "what is the Nth day/month, how many days are in
/// this week, what's today plus N months" — every operation the date-time
/// folder (`crate::datefolder`) needs and nothing else. The parser itself
/// stays calendar-agnostic (specification §6).
pub trait CalendarAdapter {
    fn year(&self, date: NaiveDate) -> i32;
    fn month(&self, date: NaiveDate) -> u32;
    fn day(&self, date: NaiveDate) -> u32;
    fn day_of_year(&self, date: NaiveDate) -> u32;
    /// Number of days in the ISO week containing `date` (normally 7; a
    /// hook for non-Gregorian calendars with irregular weeks).
    fn days_in_week(&self, date: NaiveDate) -> u32;
    /// 1 = Monday .. 7 = Sunday, per ISO 8601.
    fn day_of_week(&self, date: NaiveDate) -> u32;
    /// Returns `(iso_week, iso_year)` for `date`.
    fn week(&self, date: NaiveDate) -> (u32, i32);

    fn set_date(&self, year: i32, month: u32, day: u32) -> Option<NaiveDate>;
    fn set_date_from_day_of_year(&self, year: i32, day_of_year: u32) -> Option<NaiveDate>;
    fn set_date_iso_week(&self, iso_year: i32, iso_week: u32, iso_day: u32) -> Option<NaiveDate>;

    fn add_years(&self, date: NaiveDate, years: i32) -> NaiveDate;
    fn add_months(&self, date: NaiveDate, months: i32) -> NaiveDate;
    fn add_days(&self, date: NaiveDate, days: i64) -> NaiveDate;

    /// Today's date, used to default fields shallower than the deepest
    /// defined field during date assembly (specification §4.4 step 1).
    fn today(&self) -> NaiveDate;
}

/// The single operation the tag backend needs to support: all `(label,
/// uri)` pairs for tag resources. Called lazily, at most once per parser
/// instance (specification §5).
pub trait TagBackend {
    fn all_tags(&self) -> Vec<(String, String)>;
}
