//! patternmatcher.rs
//!
//! The pattern matcher (specification §4.2), grounded on
//! `original_source/patternmatcher.h`/`.cpp`'s `PatternMatcher` class. A
//! pattern is a list of tokens split from one rule string by
//! [`crate::splitter::split_pattern`]; a token is either a capture
//! placeholder (`%1`, `%2`, ...), the ellipsis catch-all (`...`), or a
//! literal compiled to a case-insensitive, whole-string regular expression.
//!
//! The original's `matched_terms` buffer is sized to the pattern's highest
//! `%N` capture slot and ellipsis-consumed terms are simply appended past
//! the end of it (`patternmatcher.h`'s `runPass`); this port reproduces that
//! exactly as one flat `Vec<Term>` handed to the pass: indices
//! `0..capture_count` are the named captures (`Term::invalid()` where a
//! slot was never assigned), and anything beyond that is the ellipsis run,
//! in source order (specification §4.2 "captured terms are appended to the
//! captured vector starting after the highest indexed named capture").
//!
//! Unlike the pattern matcher's C++ ancestor (one `PatternMatcher` per
//! pattern, with `terms` borrowed by reference and mutated in place by
//! `runPass`), this port separates "match" from "splice": [`run_pass`] owns
//! the restart-from-zero splice loop, and the pass closure only has to turn
//! a matched capture buffer into a replacement `Vec<Term>`.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::term::Term;

/// One token of a compiled pattern.
#[derive(Debug, Clone)]
enum Token {
    /// `%N`, one-based in the source text; stored zero-based as a capture
    /// slot index.
    Capture(usize),
    /// `...`, Matches zero or more terms up to (but not including) the next
    /// literal or capture token, or to the end of the term list if the
    /// pattern ends in an ellipsis.
    Ellipsis,
    /// A literal token, matched case-insensitively against a whole literal
    /// string term's value.
    Literal(String),
}

/// Compiles `tokens` (as produced by [`crate::splitter::split_pattern`])
/// into a [`Token`] sequence and its capture count (specification §4.2:
/// "capture slots are numbered from `%1`; the capture buffer is sized to
/// the highest-numbered slot referenced anywhere in the pattern").
fn compile(tokens: &[String]) -> (Vec<Token>, usize) {
    let mut compiled = Vec::with_capacity(tokens.len());
    let mut capture_count = 0;

    for tok in tokens {
        if tok == "..." {
            compiled.push(Token::Ellipsis);
        } else if let Some(rest) = tok.strip_prefix('%') {
            if let Ok(n) = rest.parse::<usize>() {
                capture_count = capture_count.max(n);
                compiled.push(Token::Capture(n - 1));
                continue;
            }
            compiled.push(Token::Literal(tok.clone()));
        } else {
            compiled.push(Token::Literal(tok.clone()));
        }
    }

    (compiled, capture_count)
}

static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Matches a literal pattern token against a term's literal string value.
/// Compiled regular expressions are cached process-wide, keyed by the raw
/// token text, since the same locale pattern is reused across every query
/// a `Parser` handles over its lifetime.
fn literal_matches(pattern: &str, term: &Term) -> bool {
    let value = match term.as_literal().and_then(|l| l.as_str()) {
        Some(v) => v,
        None => return false,
    };

    let mut cache = REGEX_CACHE.lock().unwrap();
    let regex = cache.entry(pattern.to_string()).or_insert_with(|| {
        let anchored = format!("(?i)^(?:{})$", pattern);
        Regex::new(&anchored)
            .unwrap_or_else(|_| Regex::new(&format!("(?i)^{}$", regex::escape(pattern))).unwrap())
    });

    regex.is_match(value)
}

/// Compiles every literal token of `rule` (and its `;`-separated
/// alternatives), using the same two-stage attempt as [`literal_matches`]
/// (the alternation regex as written, falling back to an escaped literal
/// match) and surfacing a [`crate::error::ParserError::InvalidPattern`]
/// only when neither compiles. Called once per registered rule when a
/// [`crate::driver::Pipeline`] is constructed (specification §7: the one
/// externally visible failure mode is a malformed locale pattern).
pub fn validate_rule(rule: &str) -> Result<(), crate::error::ParserError> {
    for alternative in rule.split(';') {
        let tokens = crate::splitter::split_pattern(alternative);
        let (compiled, _) = compile(&tokens);

        for token in compiled {
            if let Token::Literal(pattern) = token {
                let anchored = format!("(?i)^(?:{})$", pattern);
                let escaped = format!("(?i)^{}$", regex::escape(&pattern));

                if Regex::new(&anchored).is_err() && Regex::new(&escaped).is_err() {
                    return Err(crate::error::ParserError::InvalidPattern {
                        rule: rule.to_string(),
                        token: pattern,
                        reason: "token compiles neither as a regex alternation nor as an escaped literal".to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// A single pattern's match attempt starting at term index `index`.
///
/// Returns `Some((matched_len, captures))` on success, `None` if the pattern
/// does not match at this starting position. `captures[0..capture_count]`
/// are the named `%N` slots (`Term::invalid()` if a slot was never
/// assigned); anything appended past `capture_count` is the ellipsis run, in
/// source order — exactly the layout `original_source/patternmatcher.h`'s
/// `runPass` builds by appending catch-all terms onto the same buffer.
fn match_pattern(
    tokens: &[Token],
    capture_count: usize,
    terms: &[Term],
    index: usize,
) -> Option<(usize, Vec<Term>)> {
    let mut captures: Vec<Term> = vec![Term::invalid(); capture_count];
    let mut pattern_index = 0usize;
    let mut term_index = index;
    let mut match_anything = false;
    let mut contains_catchall = false;

    while pattern_index < tokens.len() && term_index < terms.len() {
        let term = &terms[term_index];

        match &tokens[pattern_index] {
            Token::Ellipsis => {
                match_anything = true;
                contains_catchall = true;
                pattern_index += 1;
                continue;
            }
            Token::Capture(slot) => {
                captures[*slot] = term.clone();
                match_anything = false;
                pattern_index += 1;
            }
            Token::Literal(pattern) => {
                let matched = literal_matches(pattern, term);

                if match_anything {
                    if !matched {
                        captures.push(term.clone());
                        term_index += 1;
                        continue;
                    }
                    match_anything = false;
                    pattern_index += 1;
                } else if matched {
                    pattern_index += 1;
                } else {
                    return None;
                }
            }
        }

        term_index += 1;
    }

    // The catch-all may still be open when the pattern runs out of terms
    // (the trailing terminator simply never shows up); that is a successful
    // match of whatever was consumed, matching the original's comment that
    // catch-all patterns "typically end with an optional terminating term".
    if !contains_catchall && pattern_index != tokens.len() {
        return None;
    }

    Some((term_index - index, captures))
}

/// Runs a compiled rule list (one pattern, or several alternatives split on
/// `;`) against `terms`, splicing in whatever `pass` returns on the first
/// match found scanning left to right, and restarting the scan from index 0
/// after every successful splice — the same "re-explore the terms vector as
/// indexes have changed" behavior as the reference `runPass`.
///
/// `pass` receives the ordered capture buffer (`captures[0..capture_count]`
/// are the named `%N` slots, `Term::invalid()` where a slot never matched;
/// anything past that is the ellipsis run in source order) plus the full
/// matched-term span, and returns the replacement terms. An empty `Vec`
/// means "matched but declined" — nothing is spliced and the scan continues
/// past this position.
pub fn run_pass<F>(terms: &mut Vec<Term>, rules: &str, mut pass: F) -> bool
where
    F: FnMut(&[Term], &[Term]) -> Vec<Term>,
{
    let mut any_progress = false;
    let alternatives: Vec<(Vec<Token>, usize)> = rules
        .split(';')
        .map(|rule| crate::splitter::split_pattern(rule))
        .map(|tokens| compile(&tokens))
        .collect();

    let mut index = 0usize;

    while index < terms.len() {
        let mut spliced = false;

        for (tokens, capture_count) in &alternatives {
            if let Some((matched_len, captures)) = match_pattern(tokens, *capture_count, terms, index) {
                if matched_len == 0 {
                    continue;
                }

                let matched_span = &terms[index..index + matched_len];
                let start_position = matched_span.first().and_then(|t| t.position);
                let end_position = matched_span.last().and_then(|t| t.position);
                let mut replacement = pass(&captures, matched_span);

                if !replacement.is_empty() {
                    // Only a single replacement term inherits the matched
                    // span's position; a pass returning several terms (e.g.
                    // the subqueries pass splicing a whole `Or`'s operands)
                    // is responsible for positioning them itself.
                    if replacement.len() == 1 {
                        if let (Some(start), Some(end)) = (start_position, end_position) {
                            replacement[0].position = Some(crate::term::Position::span(&start, &end));
                        }
                    }

                    terms.splice(index..index + matched_len, replacement);

                    spliced = true;
                    any_progress = true;
                    index = 0;
                    break;
                }
            }
        }

        if !spliced {
            index += 1;
        }
    }

    any_progress
}
