//! Word-level checks: capitalisation, articles, repetition.

use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

use super::{lines_where, matching_lines};
use crate::allow_lists::{AllowLists, ER_THAT_WORDS, REPEATABLE_TOKENS, is_label_like};

static DOUBLE_CAPITAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s~]([A-Z][A-Z][a-z][a-z]+?|[A-Z][A-Z][a-rt-z])[\s~]").expect("valid regex")
});

static MISSING_CAPITAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*\.[)\]}']*[\s~]+[a-z].*$").expect("valid regex"));

static AN_CONSONANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?:.*[ \t~])?[Aa]n[\s~]+(?:[bcdfgjklmnpqrstvwxyz]|[BCDFGJKLMNPQRSTVWXYZ][a-z]).*$",
    )
    .expect("valid regex")
});

/// Only a/e/i: "a unicorn" and "a one-off" are fine.
static A_VOWEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^(?:.*[ \t~])?a[\s~]+[aei].*$").expect("valid regex"));

static ER_THAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^.*er[\s~]+that[\s~].*$|^(?:.*[ \t~])?less[\s~]+that(?:[ \t~].*)?$")
        .expect("valid regex")
});

static ER_THAT_ALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:{})[\s~]+that", ER_THAT_WORDS.join("|"))).expect("valid regex")
});

static LY_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^.*ly-[a-z].*$").expect("valid regex"));

/// Lines containing a word with two leading capitals (`THe`, `NMr`).
pub fn double_capitalisation(text: &str, lists: &AllowLists) -> Vec<String> {
    let mut tokens: Vec<&str> = Vec::new();
    for caps in DOUBLE_CAPITAL_TOKEN.captures_iter(text) {
        if let Some(m) = caps.get(1)
            && !lists.is_double_cap(m.as_str())
            && !tokens.contains(&m.as_str())
        {
            tokens.push(m.as_str());
        }
    }
    if tokens.is_empty() {
        return Vec::new();
    }
    tracing::trace!(?tokens, "double-capital tokens");
    let matcher = AhoCorasick::new(&tokens).expect("short literal tokens build a matcher");
    lines_where(text, |line| matcher.is_match(line))
}

/// A full stop followed by a lower-case letter.
pub fn missing_capitalisation(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&MISSING_CAPITAL, text)
}

/// "an" before a consonant.
pub fn an_consonant(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&AN_CONSONANT, text)
}

/// "a" before a vowel.
pub fn a_vowel(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&A_VOWEL, text)
}

/// "bigger that", "less that" and friends, where "than" was meant.
pub fn er_that(text: &str, _lists: &AllowLists) -> Vec<String> {
    ER_THAT
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|line| !ER_THAT_ALLOWED.is_match(line))
        .map(str::to_string)
        .collect()
}

/// Hyphen after an "-ly" adverb.
pub fn ly_hyphen(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&LY_HYPHEN, text)
}

/// The same token twice in a row.
///
/// The token stream runs across line breaks; a repeat that straddles two
/// lines is reported as `... <word>` followed by the second line.
pub fn repetition(text: &str, _lists: &AllowLists) -> Vec<String> {
    let mut hits = Vec::new();
    let mut last = "";
    for line in text.lines() {
        for (i, word) in line.split_whitespace().enumerate() {
            if word == last && !REPEATABLE_TOKENS.contains(&word) && !is_label_like(word) {
                if i == 0 {
                    hits.push(format!("... {word}\n{line}"));
                } else {
                    hits.push(line.to_string());
                }
            }
            last = word;
        }
    }
    hits
}
