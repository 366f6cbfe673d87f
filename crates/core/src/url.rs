// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! URL sniffing for dev-server log output.
//!
//! This is a best-effort matcher for log lines such as
//! `  ➜  Local:   http://localhost:5173/`, not a URL validator. A URL split
//! across two output chunks is not reassembled.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Terminal escape sequences: CSI (colours, cursor movement), OSC (titles,
/// hyperlinks) and two-byte escapes.
#[allow(clippy::expect_used)]
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(?:\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(?:\x07|\x1b\\)|[@-Z\\-_])")
        .expect("constant regex pattern is valid")
});

/// `http://` or `https://` followed by a run of non-whitespace.
#[allow(clippy::expect_used)]
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("constant regex pattern is valid"));

/// Punctuation that ends a sentence around a URL rather than belonging to it.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

/// Closing brackets and their openers. A closing bracket is kept when the
/// URL also contains its opener, as in `/wiki/Foo_(bar)`.
const BRACKETS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];

/// Remove terminal escape sequences from `text`.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Return the first `http`/`https` URL in `text`, if any.
///
/// Escape sequences are stripped first so coloured output matches the same
/// way as plain output. Trailing sentence punctuation is dropped from the
/// match.
pub fn extract_url(text: &str) -> Option<String> {
    let plain = strip_ansi(text);
    URL_PATTERN.find_iter(&plain).find_map(|m| {
        let candidate = trim_trailing(m.as_str());
        let (_, rest) = candidate.split_once("://")?;
        if rest.is_empty() {
            return None;
        }
        Some(candidate.to_string())
    })
}

/// Drop trailing sentence punctuation and unbalanced closing brackets.
fn trim_trailing(candidate: &str) -> &str {
    let mut end = candidate;
    while let Some(last) = end.chars().last() {
        let strip = if TRAILING_PUNCTUATION.contains(&last) {
            true
        } else if let Some(&(open, close)) = BRACKETS.iter().find(|(_, c)| *c == last) {
            end.matches(close).count() > end.matches(open).count()
        } else {
            false
        };
        if !strip {
            break;
        }
        end = &end[..end.len() - last.len_utf8()];
    }
    end
}

#[cfg(test)]
#[path = "url_tests.rs"]
mod tests;
