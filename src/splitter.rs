//! splitter.rs
//!
//! The splitter (specification §4.1), translated from
//! `original_source/parser.cpp`'s `Parser::Private::split`. Two modes share
//! one scanner: splitting the input query (separators are boundaries *and*
//! emitted as their own terms) and splitting a pattern string into pattern
//! tokens (whitespace only, separators pass through untouched so a pattern
//! author can write a literal `\>` token).

use crate::term::{Position, Term};

/// Splits `query` into string-literal terms, honoring quoted spans and
/// emitting locale separators as their own one-character terms.
///
/// A `.` separator immediately inside a run of digits does not occur here:
/// the crate's reference configuration excludes `.` from decimal handling
/// (see `DESIGN.md`), so `.` always behaves as an ordinary separator.
pub fn split_query(query: &str, separators: &str) -> Vec<Term> {
    split(query, separators, true)
}

/// Splits a locale rule string into pattern tokens: whitespace is the only
/// boundary, and no separate separator terms are emitted.
pub fn split_pattern(rule: &str) -> Vec<String> {
    split(rule, "", false)
        .into_iter()
        .map(|t| match t.as_literal().and_then(|l| l.as_str()) {
            Some(s) => s.to_string(),
            None => String::new(),
        })
        .collect()
}

fn split(input: &str, separators: &str, split_separators: bool) -> Vec<Term> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_start = 0usize;
    let mut between_quotes = false;
    let mut escape_next = false;

    let chars: Vec<(usize, char)> = input.char_indices().collect();

    for (idx, (byte_pos, c)) in chars.iter().copied().enumerate() {
        if between_quotes && escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        if between_quotes && c == '\\' {
            // Peek: only treat as an escape if the next char is a quote,
            // matching "unescaped double quotes" from the splitter rules;
            // a lone backslash elsewhere is kept literally.
            if chars.get(idx + 1).map(|(_, n)| *n) == Some('"') {
                escape_next = true;
                continue;
            }
            current.push(c);
            continue;
        }

        if !between_quotes && (c.is_whitespace() || (split_separators && separators.contains(c))) {
            if !current.is_empty() {
                parts.push(Term::string(std::mem::take(&mut current)).positioned(Position::new(
                    current_start,
                    byte_pos - current_start,
                )));
            }

            if split_separators && separators.contains(c) {
                parts.push(Term::string(c.to_string()).positioned(Position::new(byte_pos, c.len_utf8())));
            }

            current_start = byte_pos + c.len_utf8();
        } else if c == '"' {
            if current.is_empty() {
                current_start = byte_pos + c.len_utf8();
            }
            between_quotes = !between_quotes;
        } else {
            if current.is_empty() {
                current_start = byte_pos;
            }
            current.push(c);
        }
    }

    if !current.is_empty() {
        let end = input.len();
        parts.push(Term::string(current).positioned(Position::new(current_start, end - current_start)));
    }

    parts
}
