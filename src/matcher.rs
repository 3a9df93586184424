/**
 * Deciding whether a free-text guess counts as a correct title or author.
 *
 * The lenient matcher strips diacritics, lowercases, splits into words and accepts a
 * guess that shares at least one word of three or more characters with the answer, so
 * that "van gogh" is accepted for "Vincent van Gogh". The exact matcher only accepts
 * the whole answer, ignoring case and surrounding whitespace.
 *
 * Version: October 2026
 */
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::common::{QuizError, Result};


/// Words shorter than this are ignored by the lenient matcher ("el", "da", "of").
const MIN_WORD_LENGTH: usize = 3;


#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Any shared word of three or more letters is enough.
    Lenient,
    /// The whole answer must be given.
    Exact,
}


impl Default for Strictness {
    fn default() -> Self {
        Strictness::Lenient
    }
}


impl FromStr for Strictness {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(Strictness::Lenient),
            "exact" => Ok(Strictness::Exact),
            other => Err(QuizError::BadArgument(
                format!("unknown strictness '{}' (expected lenient or exact)", other)
            )),
        }
    }
}


impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strictness::Lenient => write!(f, "lenient"),
            Strictness::Exact => write!(f, "exact"),
        }
    }
}


/// Return `true` if `guess` is accepted for `canonical` under `strictness`.
pub fn check(strictness: Strictness, guess: &str, canonical: &str) -> bool {
    match strictness {
        Strictness::Lenient => matches(guess, canonical),
        Strictness::Exact => matches_exactly(guess, canonical),
    }
}


/// Return `true` if `guess` and `canonical` share a word once both are normalized.
pub fn matches(guess: &str, canonical: &str) -> bool {
    if guess.trim().is_empty() {
        return false;
    }

    let guess_words = words(guess);
    if guess_words.is_empty() {
        return false;
    }
    let canonical_words = words(canonical);
    guess_words.iter().any(|word| canonical_words.contains(word))
}


/// Return `true` if `guess` equals `canonical` apart from case and surrounding
/// whitespace.
pub fn matches_exactly(guess: &str, canonical: &str) -> bool {
    let guess = guess.trim();
    if guess.is_empty() {
        return false;
    }
    guess.to_lowercase() == canonical.trim().to_lowercase()
}


/// Decompose accented characters and drop the combining marks, e.g. "Výkřik" becomes
/// "Vykrik".
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}


fn normalize(text: &str) -> String {
    strip_diacritics(text).to_lowercase()
}


fn words(text: &str) -> HashSet<String> {
    normalize(text)
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_WORD_LENGTH)
        .map(String::from)
        .collect()
}
