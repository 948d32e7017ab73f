//! Acronym definition checks.
//!
//! An acronym counts as defined when it appears in brackets, e.g.
//! "density functional theory (DFT)", and is used again somewhere after.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::allow_lists::{AllowLists, is_roman_numeral};

/// An upper-case token in running text, optionally followed by `\@`.
static ACRONYM_USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s([A-Z][A-Z\d]+)(?:\\@)?[\s.,;!?~']").expect("valid regex")
});

/// A bracketed definition, `(DFT)` or `(DFT\@)`.
static ACRONYM_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Z][A-Z\d]+)(?:\\@)?\)").expect("valid regex"));

/// Sections are split at the end of the abstract: acronyms defined in the
/// abstract may be defined again in the body.
const SECTION_BREAK: &str = r"\end{abstract}";

/// Acronyms used without a bracketed definition followed by a later use.
///
/// Tokens are returned once each, in order of first use.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn undefined(text: &str, lists: &AllowLists) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    for caps in ACRONYM_USE.captures_iter(text) {
        if let Some(m) = caps.get(1)
            && !seen.contains(&m.as_str())
        {
            seen.push(m.as_str());
        }
    }

    seen.into_iter()
        .filter(|a| !lists.is_known_acronym(a) && !is_roman_numeral(a))
        .filter(|a| !is_defined(text, a))
        .map(str::to_string)
        .collect()
}

fn is_defined(text: &str, acronym: &str) -> bool {
    let a = regex::escape(acronym);
    let pattern = format!(r"(?s)\({a}(?:\\@|s)?\).*\s{a}(?:\\@)?[\s.,;!?~']");
    Regex::new(&pattern).is_ok_and(|re| re.is_match(text))
}

/// Acronyms given a bracketed definition more than once in one section.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn multiply_defined(text: &str, _lists: &AllowLists) -> Vec<String> {
    let mut multiple = Vec::new();
    for section in text.split(SECTION_BREAK) {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for caps in ACRONYM_DEFINITION.captures_iter(section) {
            let Some(m) = caps.get(1) else { continue };
            let count = counts.entry(m.as_str()).or_insert(0);
            if *count == 0 {
                order.push(m.as_str());
            }
            *count += 1;
        }
        multiple.extend(
            order
                .into_iter()
                .filter(|a| counts[a] > 1 && !is_roman_numeral(a))
                .map(str::to_string),
        );
    }
    multiple
}
