//! A multi-pass, term-rewriting parser that turns a locale-sensitive
//! free-text search query into a structured [`Query`] of typed predicates
//! over a semantic-desktop vocabulary (file size, type hints, tags,
//! comparators, properties, date/time components, subqueries).
//!
//! The core is deliberately decoupled from localization, calendar
//! arithmetic and tag/resource lookup: every locale-specific or
//! backend-specific concern is expressed as a trait in [`adapters`], with
//! one concrete, English/Gregorian implementation shipped so the crate is
//! runnable standalone.
//!
//! # Usage
//!
//! ```ignore
//! use nepomuk_query_parser::Parser;
//!
//! let mut parser = Parser::new().expect("built-in locale is well-formed");
//! let query = parser.parse("size > 2 mb");
//! ```

pub mod adapters;
pub mod calendar;
pub mod datefolder;
pub mod driver;
pub mod error;
pub mod fuser;
pub mod locale;
pub mod passes;
pub mod patternmatcher;
pub mod splitter;
pub mod term;
pub mod utils;
pub mod vocab;

use std::collections::HashMap;

use calendar::GregorianCalendar;
use locale::EnglishCatalog;

pub use adapters::{CalendarAdapter, LocaleCatalog, TagBackend};
pub use error::ParserError;
pub use term::Term;

/// A fully-formed query, ready to be handed to a downstream search engine:
/// the root of the boolean tree [`fuser::fuse_terms`] produces (§4.5 of the
/// design notes). Wraps [`Term`] rather than being a bare type alias so the
/// crate can grow query-level metadata later without breaking callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    root: Term,
}

impl Query {
    pub fn root(&self) -> &Term {
        &self.root
    }

    pub fn into_root(self) -> Term {
        self.root
    }
}

/// A backend with no tags at all, used when a caller has no tag system to
/// plug in. `"tagged as ..."`/`"has tag ..."` phrases then simply never
/// match (specification §4.3.5: an unresolvable tag name declines, it does
/// not error).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTags;

impl TagBackend for NoTags {
    fn all_tags(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// The parser facade (specification §6): owns the locale catalog, the
/// calendar adapter, the tag backend, and the per-instance state the
/// pipeline accumulates across calls to [`Parser::parse`].
pub struct Parser {
    catalog: Box<dyn LocaleCatalog>,
    calendar: Box<dyn CalendarAdapter>,
    tag_backend: Box<dyn TagBackend>,
    pipeline: driver::Pipeline,
    tags: Option<HashMap<String, String>>,
    terms: Vec<Term>,
}

impl Parser {
    /// Builds a parser over the built-in English locale and Gregorian
    /// calendar, with no tag backend (tag phrases never match until
    /// [`Parser::with_tag_backend`] supplies one).
    pub fn new() -> Result<Parser, ParserError> {
        Parser::with_adapters(Box::new(EnglishCatalog::new()), Box::new(GregorianCalendar), Box::new(NoTags))
    }

    /// Builds a parser over caller-supplied locale, calendar and tag
    /// adapters (specification §6).
    pub fn with_adapters(
        catalog: Box<dyn LocaleCatalog>,
        calendar: Box<dyn CalendarAdapter>,
        tag_backend: Box<dyn TagBackend>,
    ) -> Result<Parser, ParserError> {
        let pipeline = driver::Pipeline::new(catalog.as_ref())?;

        Ok(Parser {
            catalog,
            calendar,
            tag_backend,
            pipeline,
            tags: None,
            terms: Vec::new(),
        })
    }

    /// Swaps in a different tag backend, invalidating the cached tag
    /// lookup table so it is rebuilt lazily on the next call that needs it.
    pub fn with_tag_backend(mut self, tag_backend: Box<dyn TagBackend>) -> Parser {
        self.tag_backend = tag_backend;
        self.tags = None;
        self
    }

    /// Clears accumulated per-query state (specification §6: `reset()`).
    /// The tag cache and compiled patterns survive a reset — only the term
    /// buffer from a prior, not-yet-started `parse` call is discarded.
    pub fn reset(&mut self) {
        self.terms.clear();
    }

    /// Parses `query` into a [`Query`] (specification §6). Infallible per
    /// §7: every query, however malformed, yields *some* query tree.
    pub fn parse(&mut self, query: &str) -> Query {
        self.reset();

        log::debug!("parsing query {query:?}");

        self.terms = splitter::split_query(query, self.pipeline.separators());

        let tags = self.tags.get_or_insert_with(|| {
            self.tag_backend
                .all_tags()
                .into_iter()
                .collect::<HashMap<String, String>>()
        });

        let terms = self.pipeline.run(std::mem::take(&mut self.terms), tags);
        let terms = datefolder::fold(terms, self.calendar.as_ref());
        let terms = self.pipeline.run_date_properties(terms, tags);
        let (root, _) = fuser::fuse_terms(&terms, 0);

        log::debug!("parsed query {query:?} into {root:?}");

        Query { root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{Comparator, TermKind};

    #[test]
    fn builds_with_the_default_english_gregorian_setup() {
        Parser::new().expect("built-in locale is well-formed");
    }

    #[test]
    fn reset_clears_in_progress_state_without_touching_caches() {
        let mut parser = Parser::new().unwrap();
        parser.terms.push(Term::string("leftover"));
        parser.reset();
        assert!(parser.terms.is_empty());
    }

    #[test]
    fn size_greater_than_converts_units_and_attaches_a_property() {
        let mut parser = Parser::new().unwrap();
        let query = parser.parse("size > 2 mb");

        match &query.root().kind {
            TermKind::Comparison { property, comparator, subterm } => {
                assert_eq!(property.as_deref(), Some(vocab::FILE_SIZE));
                assert_eq!(*comparator, Comparator::Greater);
                assert_eq!(subterm.as_literal().and_then(|l| l.as_int()), Some(2_000_000));
            }
            other => panic!("expected Comparison, got {:?}", other),
        }
    }

    #[test]
    fn unknown_tag_backend_never_matches_a_tag_phrase() {
        let mut parser = Parser::new().unwrap();
        let query = parser.parse("tagged as Work");

        // With no tags registered the phrase never resolves to a
        // Comparison; it falls through to the fuser as plain string terms.
        assert!(!matches!(query.root().kind, TermKind::Comparison { .. }));
    }
}
