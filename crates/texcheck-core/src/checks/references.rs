//! Cross-reference and citation style checks.

use std::sync::LazyLock;

use regex::Regex;

use super::matching_lines;
use crate::allow_lists::AllowLists;

static EQ_REF_WITHOUT_BRACKETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:.*[ \t~])?(?:[eE]qn?s?\.?\\?|[eE]quations?)[\s~]+(?:\\ref|\d).*$")
        .expect("valid regex")
});

/// Matches any line with a reference abbreviation followed by a separator
/// or the end of the line, including the correct `Fig.~` form.
static ABBREVIATION_SPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:.*[ \t~])?(?:[eE]qn?|[rR]ef|[fF]ig|[sS]ec)s?\.?(?:[ \t~].*)?$")
        .expect("valid regex")
});

static ABBREVIATION_AT_SENTENCE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^.*\.\s+(?:Eqn?|Ref|Fig|Sec)s?\..*$").expect("valid regex")
});

static FULL_FORM_MID_SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^.*[A-Z,;:a-z]\s+(?:Equation|Reference|Figure|Section)[\s~]*(?:\(?\\ref|\d).*$")
        .expect("valid regex")
});

static LOWERCASE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:.*[ \t~])?(?:eqn?|fig|sec|table|ref)s?\.$").expect("valid regex")
});

static SPACED_CITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:.*[ \t~])?\\cite.*$").expect("valid regex"));

static UNSPACED_CITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*[^\s~\n]\\cite.*$").expect("valid regex"));

/// "Eq. \ref{x}" or "Eq. 3" where "Eq. (\ref{x})" is wanted.
pub fn eq_ref_brackets(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&EQ_REF_WITHOUT_BRACKETS, text)
}

/// "Fig. 3" where "Fig.\ 3" is wanted.
pub fn abbreviation_space(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&ABBREVIATION_SPACE, text)
}

/// "… end. Fig. 3 shows" where a sentence should open with "Figure".
pub fn abbreviation_at_sentence_start(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&ABBREVIATION_AT_SENTENCE_START, text)
}

/// "in Figure 3" where "in Fig.~3" is wanted.
pub fn full_form_mid_sentence(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&FULL_FORM_MID_SENTENCE, text)
}

/// "see fig." at the end of a line.
pub fn reference_case(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&LOWERCASE_REFERENCE, text)
}

/// Whitespace before `\cite`, for journals that cite in running text.
pub fn word_cite(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&SPACED_CITE, text)
}

/// `\cite` glued to the preceding word, for superscript-citation styles.
pub fn superscript_cite(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&UNSPACED_CITE, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: fn(&str, &AllowLists) -> Vec<String>, text: &str) -> Vec<String> {
        f(text, &AllowLists::default())
    }

    #[test]
    fn eq_ref_needs_brackets() {
        assert_eq!(run(eq_ref_brackets, r"as in Eq.~\ref{e1} we").len(), 1);
        assert_eq!(run(eq_ref_brackets, "from equation 4 we").len(), 1);
        assert!(run(eq_ref_brackets, r"as in Eq.~(\ref{e1}) we").is_empty());
    }

    /// Known-fragile rule: it fires on every separated abbreviation,
    /// including the tie form authors are told to use.
    #[test]
    fn abbreviation_space_is_broad() {
        assert_eq!(run(abbreviation_space, "see Fig. 3 for"), vec!["see Fig. 3 for"]);
        assert_eq!(run(abbreviation_space, "see Fig.~3 for").len(), 1);
        assert_eq!(run(abbreviation_space, "Sec."), vec!["Sec."]);
        assert!(run(abbreviation_space, r"see Fig.\ 3 for").is_empty());
        assert!(run(abbreviation_space, "see Figure 3 for").is_empty());
    }

    #[test]
    fn abbreviation_at_sentence_start_flagged() {
        assert_eq!(run(abbreviation_at_sentence_start, "It works. Fig. 2 shows").len(), 1);
        assert_eq!(run(abbreviation_at_sentence_start, "It works.  eqs. 2 show").len(), 1);
        assert!(run(abbreviation_at_sentence_start, "It works. Figure 2 shows").is_empty());
    }

    #[test]
    fn full_form_mid_sentence_flagged() {
        assert_eq!(run(full_form_mid_sentence, r"shown in Figure \ref{f}").len(), 1);
        assert_eq!(run(full_form_mid_sentence, r"see Equation (\ref{e})").len(), 1);
        assert_eq!(run(full_form_mid_sentence, "in Section 3").len(), 1);
        assert!(run(full_form_mid_sentence, r"Figure \ref{f} shows").is_empty());
    }

    #[test]
    fn lowercase_reference_at_line_end() {
        assert_eq!(run(reference_case, "shown in fig."), vec!["shown in fig."]);
        assert_eq!(run(reference_case, "see eqs.").len(), 1);
        assert!(run(reference_case, "shown in Fig.").is_empty());
        assert!(run(reference_case, "shown in fig. 3").is_empty());
    }

    #[test]
    fn word_style_citations() {
        assert_eq!(run(word_cite, r"as shown \cite{a}.").len(), 1);
        assert_eq!(run(word_cite, r"as shown~\cite{a}.").len(), 1);
        assert!(run(word_cite, r"as shown.\cite{a}").is_empty());
    }

    #[test]
    fn superscript_style_citations() {
        assert_eq!(run(superscript_cite, r"as shown.\cite{a}").len(), 1);
        assert!(run(superscript_cite, r"as shown \cite{a}.").is_empty());
        assert!(run(superscript_cite, r"\cite{a} opens").is_empty());
    }
}
