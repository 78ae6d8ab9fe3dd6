//! error.rs
//!
//! The only externally visible failure mode (specification §7): a
//! malformed pattern string supplied by a locale catalog. Everything else —
//! a pass declining, a date value outside its period's range, a tag backend
//! returning nothing — is internal control flow and never surfaces as an
//! `Err`; `Parser::parse` always returns a `Query`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserError {
    /// A pattern token compiled from a locale catalog string was not a
    /// valid regular expression. This can only happen if a locale catalog
    /// is itself malformed; it is a programmer/translator error, not a
    /// runtime condition a well-formed query can trigger.
    #[error("invalid pattern token {token:?} in rule {rule:?}: {reason}")]
    InvalidPattern {
        rule: String,
        token: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ParserError>;
