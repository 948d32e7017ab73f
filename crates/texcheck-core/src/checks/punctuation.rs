//! Punctuation and spacing checks.

use std::sync::LazyLock;

use regex::Regex;

use super::{lines_where, matching_lines};
use crate::allow_lists::AllowLists;

/// Capital-initialled word ending a sentence: TeX will set an inter-word
/// space after the period unless the author writes `\@`.
static END_OF_SENTENCE_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^.*\w[A-Z][)\]']*\.[)\]']*(?:[ \t~].*)?$").expect("valid regex")
});

static LATIN_ABBREVIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^.*(?:i\.e\.|e\.g\.|n\.b\.)(?:[ \t~].*)?$").expect("valid regex")
});

static ARBITRARY_UNITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*a\.u\.\s+[a-z].*$").expect("valid regex"));

/// Straight double quote, apostrophe used as an opening quote, or a
/// backtick that is never closed.
static SPEECH_MARKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^.*[^\\\n]".*$|^(?:.*[ \t~])?'.*$|^.*`(?:[ \t~].*)?$"#).expect("valid regex")
});

static STOP_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*\.:(?:[ \t~].*)?$").expect("valid regex"));

/// A numeric range such as `3-6`, unless inside a brace argument.
static NUMERIC_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:.*[^{\d\n][ \t~]*)?\d+[\s~$]*-[\s~$]*\d.*$").expect("valid regex")
});

static DASH_SPACE_BEFORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:.*[ \t~])?--.*$").expect("valid regex"));

static DASH_SPACE_AFTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*[^\d\n]--(?:[ \t~].*)?$").expect("valid regex"));

static TEXT_MINUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:.*(?:[ \t~]|[^{\n]\d))?-\d.*$").expect("valid regex")
});

const PUNCTUATION: &[char] = &['.', ',', ':', ';', '?', '!'];

/// Returns `true` for the characters TeX authors use between words.
const fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '~')
}

/// `..` anywhere except in `\right..` style delimiters.
pub fn double_dots(text: &str, _lists: &AllowLists) -> Vec<String> {
    lines_where(text, |line| {
        line.match_indices('.')
            .any(|(i, _)| line[i + 1..].starts_with('.') && !line[..i].ends_with("right"))
    })
}

/// Capitalised abbreviation followed by a full stop and more text.
pub fn end_of_sentence_space(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&END_OF_SENTENCE_SPACE, text)
}

/// `i.e.`, `e.g.` or `n.b.` followed by a plain space.
pub fn latin_abbreviation_space(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&LATIN_ABBREVIATION, text)
}

/// `a.u.` followed by a lower-case word.
pub fn unit_abbreviation_space(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&ARBITRARY_UNITS, text)
}

/// Straight or back-to-front quotation marks.
pub fn speech_marks(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&SPEECH_MARKS, text)
}

/// Whitespace or a tie before a punctuation mark.
///
/// `{\tt .}` style typewriter literals are exempt.
pub fn space_before_punctuation(text: &str, _lists: &AllowLists) -> Vec<String> {
    lines_where(text, |line| {
        line.char_indices().any(|(i, c)| {
            PUNCTUATION.contains(&c)
                && line[..i].chars().next_back().is_none_or(is_separator)
                && !line[..i].ends_with(r"\tt ")
        })
    })
}

/// `.:` should be `.\:` to avoid the extra stop space.
pub fn stop_colon(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&STOP_COLON, text)
}

/// Numeric range written with a hyphen.
pub fn en_dash(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&NUMERIC_RANGE, text)
}

/// A space before `--`.
pub fn dash_space_before(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&DASH_SPACE_BEFORE, text)
}

/// A space after a non-numeric `--`.
pub fn dash_space_after(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&DASH_SPACE_AFTER, text)
}

/// A hyphen used as a minus sign in running text.
pub fn math_minus(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&TEXT_MINUS, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: fn(&str, &AllowLists) -> Vec<String>, text: &str) -> Vec<String> {
        f(text, &AllowLists::default())
    }

    #[test]
    fn double_dots_flagged() {
        assert_eq!(run(double_dots, "The end.. really"), vec!["The end.. really"]);
    }

    #[test]
    fn double_dots_after_right_ignored() {
        assert!(run(double_dots, r"\left( x \right.. y").is_empty());
    }

    #[test]
    fn triple_dot_after_right_still_flagged() {
        // the second pair is preceded by "ight." rather than "right"
        assert_eq!(run(double_dots, r"\right...").len(), 1);
    }

    #[test]
    fn end_of_sentence_space_flagged() {
        let hits = run(end_of_sentence_space, "We used DFT. Then we stopped.");
        assert_eq!(hits, vec!["We used DFT. Then we stopped."]);
    }

    #[test]
    fn end_of_sentence_space_with_at_ignored() {
        assert!(run(end_of_sentence_space, r"We used DFT\@. Then we stopped.").is_empty());
    }

    #[test]
    fn latin_abbreviation_needs_backslash_space() {
        assert_eq!(run(latin_abbreviation_space, "metals, e.g. copper").len(), 1);
        assert_eq!(run(latin_abbreviation_space, "metals, I.E. copper").len(), 1);
        assert!(run(latin_abbreviation_space, r"metals, e.g.\ copper").is_empty());
        assert!(run(latin_abbreviation_space, "metals (e.g., copper)").is_empty());
    }

    #[test]
    fn arbitrary_units() {
        assert_eq!(run(unit_abbreviation_space, "1.5 a.u. along x").len(), 1);
        assert!(run(unit_abbreviation_space, r"1.5 a.u.\ along x").is_empty());
    }

    #[test]
    fn straight_quotes_flagged() {
        assert_eq!(run(speech_marks, r#"a "quoted" word"#).len(), 1);
        assert_eq!(run(speech_marks, "a 'quoted' word").len(), 1);
        assert_eq!(run(speech_marks, "a word`").len(), 1);
    }

    #[test]
    fn tex_quotes_pass() {
        assert!(run(speech_marks, "a ``quoted'' word").is_empty());
        assert!(run(speech_marks, r#"an umlaut \"o"#).is_empty());
    }

    #[test]
    fn space_before_punctuation_flagged() {
        assert_eq!(run(space_before_punctuation, "the end .").len(), 1);
        assert_eq!(run(space_before_punctuation, "so~, then").len(), 1);
        assert_eq!(run(space_before_punctuation, ", leading").len(), 1);
        assert!(run(space_before_punctuation, "the end.").is_empty());
    }

    #[test]
    fn typewriter_punctuation_exempt() {
        assert!(run(space_before_punctuation, r"type {\tt .} here").is_empty());
    }

    #[test]
    fn stop_colon_flagged() {
        assert_eq!(run(stop_colon, "as follows etc.: one").len(), 1);
        assert!(run(stop_colon, "as follows: one").is_empty());
    }

    #[test]
    fn numeric_range_needs_en_dash() {
        assert_eq!(run(en_dash, "pages 3-6 of"), vec!["pages 3-6 of"]);
        assert!(run(en_dash, "pages 3--6 of").is_empty());
        assert!(run(en_dash, r"\cite{2-3}").is_empty());
    }

    #[test]
    fn dash_spacing() {
        assert_eq!(run(dash_space_before, "word --- word").len(), 1);
        assert!(run(dash_space_before, "word---word").is_empty());
        assert_eq!(run(dash_space_after, "word--- word").len(), 1);
        assert!(run(dash_space_after, "pages 3-- 6").is_empty());
    }

    #[test]
    fn text_minus_flagged() {
        assert_eq!(run(math_minus, "a charge of -1 here").len(), 1);
        assert!(run(math_minus, "a charge of $-1$ here").is_empty());
        assert!(run(math_minus, r"\vspace{-2pt}").is_empty());
    }
}
