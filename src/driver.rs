//! driver.rs
//!
//! The pipeline driver (specification §4.1, §4.4, §5), grounded on
//! `original_source/parser.cpp`'s `Parser::parse()`: split the query into
//! terms, run every pass to a fixpoint, fold the accumulated date-period
//! comparisons into `DateTime` literals, then fuse everything into one
//! boolean tree.
//!
//! Every pass invocation's locale pattern string and lookup table is
//! resolved once, at [`Pipeline::new`] time, from a
//! [`crate::adapters::LocaleCatalog`] — `run` itself never touches the
//! catalog again, so a `Pipeline` can be rebuilt once per locale and reused
//! across every query a [`crate::Parser`] handles.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::adapters::LocaleCatalog;
use crate::error::ParserError;
use crate::patternmatcher::{run_pass, validate_rule};
use crate::passes::{
    comparators, dateperiods, datevalues, filesize, numbers, periodnames, properties, splitunits,
    subqueries, tags, typehints,
};
use crate::term::{Comparator, Period, Term};
use crate::vocab;

/// One `(locale pattern key, owned pattern string)` pair resolved at
/// construction time, plus whatever lookup table the pass configured on it
/// needs.
struct Rule {
    pattern: String,
}

impl Rule {
    fn resolve(catalog: &dyn LocaleCatalog, key: &str) -> Result<Rule, ParserError> {
        let pattern = catalog.pattern(key).ok_or_else(|| ParserError::InvalidPattern {
            rule: key.to_string(),
            token: key.to_string(),
            reason: "missing from locale catalog".to_string(),
        })?;
        validate_rule(pattern)?;
        Ok(Rule { pattern: pattern.to_string() })
    }
}

/// The compiled, locale-bound pipeline. Built once per [`crate::Parser`]
/// instance (specification §5: "cached... per-parser-instance").
pub struct Pipeline {
    separators: String,

    tags_rule: Rule,

    comparator_contains: Rule,
    comparator_greater: Rule,
    comparator_smaller: Rule,
    comparator_equal: Rule,

    property_sent_by: Rule,
    property_subject: Rule,
    property_recipient: Rule,
    property_file_size: Rule,
    property_file_name: Rule,

    property_modified_date: Rule,
    property_created_date: Rule,
    property_sent_date: Rule,
    property_received_date: Rule,

    dateperiods_offset: Rule,
    dateperiods_inverted_offset: Rule,
    dateperiods_next: Rule,
    dateperiods_last: Rule,
    dateperiods_tomorrow: Rule,
    dateperiods_yesterday: Rule,
    dateperiods_today: Rule,
    dateperiods_first: Rule,
    dateperiods_last_value: Rule,
    dateperiods_value: Rule,

    hourminute_pm: Rule,
    hourminute_am: Rule,

    datevalues_combined: Rule,

    subqueries_related_to: Rule,

    known_units: HashSet<String>,
    number_names: HashMap<String, i64>,
    filesize_multipliers: HashMap<String, i64>,
    type_hints: HashMap<String, String>,
    period_names: HashMap<String, Period>,
    day_names: Vec<String>,
    month_names: Vec<String>,
}

impl Pipeline {
    pub fn new(catalog: &dyn LocaleCatalog) -> Result<Pipeline, ParserError> {
        let (day_names, month_names) = periodnames::name_tables(catalog);

        Ok(Pipeline {
            separators: catalog.separators().to_string(),

            tags_rule: Rule::resolve(catalog, "tags.rule")?,

            comparator_contains: Rule::resolve(catalog, "comparators.contains")?,
            comparator_greater: Rule::resolve(catalog, "comparators.greater")?,
            comparator_smaller: Rule::resolve(catalog, "comparators.smaller")?,
            comparator_equal: Rule::resolve(catalog, "comparators.equal")?,

            property_sent_by: Rule::resolve(catalog, "properties.sent_by")?,
            property_subject: Rule::resolve(catalog, "properties.subject")?,
            property_recipient: Rule::resolve(catalog, "properties.recipient")?,
            property_file_size: Rule::resolve(catalog, "properties.file_size")?,
            property_file_name: Rule::resolve(catalog, "properties.file_name")?,

            property_modified_date: Rule::resolve(catalog, "properties.modified_date")?,
            property_created_date: Rule::resolve(catalog, "properties.created_date")?,
            property_sent_date: Rule::resolve(catalog, "properties.sent_date")?,
            property_received_date: Rule::resolve(catalog, "properties.received_date")?,

            dateperiods_offset: Rule::resolve(catalog, "dateperiods.offset")?,
            dateperiods_inverted_offset: Rule::resolve(catalog, "dateperiods.inverted_offset")?,
            dateperiods_next: Rule::resolve(catalog, "dateperiods.next")?,
            dateperiods_last: Rule::resolve(catalog, "dateperiods.last")?,
            dateperiods_tomorrow: Rule::resolve(catalog, "dateperiods.tomorrow")?,
            dateperiods_yesterday: Rule::resolve(catalog, "dateperiods.yesterday")?,
            dateperiods_today: Rule::resolve(catalog, "dateperiods.today")?,
            dateperiods_first: Rule::resolve(catalog, "dateperiods.first")?,
            dateperiods_last_value: Rule::resolve(catalog, "dateperiods.last")?,
            dateperiods_value: Rule::resolve(catalog, "dateperiods.value")?,

            hourminute_pm: Rule::resolve(catalog, "hourminute.pm")?,
            hourminute_am: Rule::resolve(catalog, "hourminute.am")?,

            datevalues_combined: Rule::resolve(catalog, "datevalues.combined")?,

            subqueries_related_to: Rule::resolve(catalog, "subqueries.related_to")?,

            known_units: splitunits::known_unit_set(catalog),
            number_names: numbers::number_name_table(catalog),
            filesize_multipliers: filesize::multiplier_table(catalog),
            type_hints: typehints::hint_table(catalog),
            period_names: dateperiods::period_name_table(catalog),
            day_names,
            month_names,
        })
    }

    pub fn separators(&self) -> &str {
        &self.separators
    }

    /// Runs every pass to a fixpoint against `terms` (specification §4.1,
    /// §5's `while(progress)` loop), `tags` being the parser instance's
    /// lazily-filled name→URI cache.
    pub fn run(&self, mut terms: Vec<Term>, tags: &HashMap<String, String>) -> Vec<Term> {
        let mut progress = true;
        let mut iteration = 0u32;

        while progress {
            progress = false;
            iteration += 1;
            trace!("pipeline iteration {iteration} starting with {} terms", terms.len());

            progress |= run_pass(&mut terms, "%1", |c, _| splitunits::run(c, &self.known_units));
            progress |= run_pass(&mut terms, "%1", |c, _| numbers::run(c, &self.number_names));
            progress |= run_pass(&mut terms, "%1 %2", |c, _| filesize::run(c, &self.filesize_multipliers));
            progress |= run_pass(&mut terms, "%1", |c, _| typehints::run(c, &self.type_hints));
            progress |= run_pass(&mut terms, &self.tags_rule.pattern, |c, _| tags::run(c, tags));

            progress |= run_pass(&mut terms, &self.comparator_contains.pattern, |c, _| {
                comparators::run(c, Comparator::Contains)
            });
            progress |= run_pass(&mut terms, &self.comparator_greater.pattern, |c, _| {
                comparators::run(c, Comparator::Greater)
            });
            progress |= run_pass(&mut terms, &self.comparator_smaller.pattern, |c, _| {
                comparators::run(c, Comparator::Smaller)
            });
            progress |= run_pass(&mut terms, &self.comparator_equal.pattern, |c, _| {
                comparators::run(c, Comparator::Equal)
            });

            progress |= run_pass(&mut terms, &self.property_sent_by.pattern, |c, _| {
                properties::run(c, vocab::MESSAGE_FROM, properties::Range::String, tags)
            });
            progress |= run_pass(&mut terms, &self.property_subject.pattern, |c, _| {
                properties::run(c, vocab::MESSAGE_SUBJECT, properties::Range::String, tags)
            });
            progress |= run_pass(&mut terms, &self.property_recipient.pattern, |c, _| {
                properties::run(c, vocab::MESSAGE_TO, properties::Range::String, tags)
            });
            progress |= run_pass(&mut terms, &self.property_file_size.pattern, |c, _| {
                properties::run(c, vocab::FILE_SIZE, properties::Range::IntegerOrDouble, tags)
            });
            progress |= run_pass(&mut terms, &self.property_file_name.pattern, |c, _| {
                properties::run(c, vocab::FILE_NAME, properties::Range::String, tags)
            });
            progress |= run_pass(&mut terms, "%1", |c, _| properties::default_to_file_size(c));

            progress |= run_pass(&mut terms, "%1", |c, _| {
                periodnames::run(c, &self.day_names, &self.month_names)
            });

            progress |= run_pass(&mut terms, &self.dateperiods_offset.pattern, |c, _| {
                dateperiods::run(c, Period::Variable, dateperiods::ValueKind::Offset, None, &self.period_names)
            });
            progress |= run_pass(&mut terms, &self.dateperiods_inverted_offset.pattern, |c, _| {
                dateperiods::run(c, Period::Variable, dateperiods::ValueKind::InvertedOffset, None, &self.period_names)
            });
            progress |= run_pass(&mut terms, &self.dateperiods_next.pattern, |c, _| {
                dateperiods::run(c, Period::Variable, dateperiods::ValueKind::Offset, Some(1), &self.period_names)
            });
            progress |= run_pass(&mut terms, &self.dateperiods_last.pattern, |c, _| {
                dateperiods::run(c, Period::Variable, dateperiods::ValueKind::Offset, Some(-1), &self.period_names)
            });

            progress |= run_pass(&mut terms, &self.dateperiods_tomorrow.pattern, |c, _| {
                dateperiods::run(c, Period::Day, dateperiods::ValueKind::Offset, Some(1), &self.period_names)
            });
            progress |= run_pass(&mut terms, &self.dateperiods_yesterday.pattern, |c, _| {
                dateperiods::run(c, Period::Day, dateperiods::ValueKind::Offset, Some(-1), &self.period_names)
            });
            progress |= run_pass(&mut terms, &self.dateperiods_today.pattern, |c, _| {
                dateperiods::run(c, Period::Day, dateperiods::ValueKind::Offset, Some(0), &self.period_names)
            });

            progress |= run_pass(&mut terms, &self.hourminute_pm.pattern, |c, _| {
                datevalues::run_hour_minute(c, true)
            });
            progress |= run_pass(&mut terms, &self.hourminute_am.pattern, |c, _| {
                datevalues::run_hour_minute(c, false)
            });

            progress |= run_pass(&mut terms, &self.dateperiods_first.pattern, |c, _| {
                dateperiods::run(c, Period::Variable, dateperiods::ValueKind::Value, Some(0), &self.period_names)
            });
            progress |= run_pass(&mut terms, &self.dateperiods_last_value.pattern, |c, _| {
                dateperiods::run(c, Period::Variable, dateperiods::ValueKind::Value, Some(-1), &self.period_names)
            });
            progress |= run_pass(&mut terms, &self.dateperiods_value.pattern, |c, _| {
                dateperiods::run(c, Period::Variable, dateperiods::ValueKind::Value, None, &self.period_names)
            });

            progress |= run_pass(&mut terms, &self.datevalues_combined.pattern, |c, _| {
                datevalues::run(c, false)
            });

            progress |= run_pass(&mut terms, &self.subqueries_related_to.pattern, |c, _| {
                subqueries::run(c, vocab::RELATED_TO)
            });

            debug!("pipeline iteration {iteration} made progress: {progress}");
        }

        terms
    }

    /// Attaches a date-bearing property to a just-folded `Literal(DateTime)`
    /// term (specification §5: "date folding precedes the comparator-less
    /// `Properties` date cases"). Called once, after
    /// [`crate::datefolder::fold`] and before [`crate::fuser::fuse_terms`] —
    /// these phrases never match anything inside [`Pipeline::run`]'s
    /// fixpoint, since a synthetic `internal://dateperiod/...` comparison is
    /// not yet a `Literal(DateTime)` and already carries its own property.
    pub fn run_date_properties(&self, mut terms: Vec<Term>, tags: &HashMap<String, String>) -> Vec<Term> {
        let mut progress = true;

        while progress {
            progress = false;

            progress |= run_pass(&mut terms, &self.property_modified_date.pattern, |c, _| {
                properties::run(c, vocab::MODIFIED_DATE, properties::Range::DateTime, tags)
            });
            progress |= run_pass(&mut terms, &self.property_created_date.pattern, |c, _| {
                properties::run(c, vocab::CREATED_DATE, properties::Range::DateTime, tags)
            });
            progress |= run_pass(&mut terms, &self.property_sent_date.pattern, |c, _| {
                properties::run(c, vocab::SENT_DATE, properties::Range::DateTime, tags)
            });
            progress |= run_pass(&mut terms, &self.property_received_date.pattern, |c, _| {
                properties::run(c, vocab::RECEIVED_DATE, properties::Range::DateTime, tags)
            });
        }

        terms
    }
}
