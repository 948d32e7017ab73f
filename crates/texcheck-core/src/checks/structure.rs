//! Document-level checks and class-specific markup.

use std::sync::LazyLock;

use regex::Regex;

use super::matching_lines;
use crate::allow_lists::AllowLists;

static NON_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^.*[^\x20-\x7E\n\r].*$").expect("valid regex"));

static BIBLIOGRAPHY_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{thebibliography\}\{\d*\}").expect("valid regex"));

const BIBITEM: &str = r"\bibitem";

/// Build a single-command line matcher such as `^.*\\textit.*$`.
macro_rules! markup_check {
    ($(#[$doc:meta])* $name:ident, $re:literal) => {
        $(#[$doc])*
        pub fn $name(text: &str, _lists: &AllowLists) -> Vec<String> {
            static RE: LazyLock<Regex> =
                LazyLock::new(|| Regex::new(concat!(r"(?m)^.*", $re)).expect("valid regex"));
            matching_lines(&RE, text)
        }
    };
}

/// Lines with characters outside printable ASCII.
pub fn non_ascii(text: &str, _lists: &AllowLists) -> Vec<String> {
    matching_lines(&NON_ASCII, text)
}

/// A notice if the document has DOS line endings.
pub fn carriage_returns(text: &str, _lists: &AllowLists) -> Vec<String> {
    if text.contains('\r') {
        vec!["MS-DOS-style carriage returns.  Run dos2unix.".to_string()]
    } else {
        Vec::new()
    }
}

/// Digit width expected for `n` bibliography items.
///
/// `thebibliography` takes its widest label as an argument, conventionally
/// a run of as many digits as the item count has.
pub fn label_width(n: usize) -> usize {
    (n as f64).log10().floor() as usize + 1
}

/// Compare the `\bibitem` count against the `thebibliography` label width.
///
/// Returns the item count and the declaration found (if any) when they
/// disagree.
pub fn bibliography_size(text: &str, _lists: &AllowLists) -> Vec<String> {
    let items = text.matches(BIBITEM).count();
    if items == 0 {
        return Vec::new();
    }
    let width = label_width(items);
    let expected = format!(r"\{{thebibliography\}}\{{\d{{{width}}}\}}");
    if Regex::new(&expected).is_ok_and(|re| re.is_match(text)) {
        return Vec::new();
    }
    tracing::debug!(items, width, "bibliography label width mismatch");

    let declared = BIBLIOGRAPHY_DECLARATION.find(text).map_or_else(
        || "thebibliography is missing.".to_string(),
        |m| format!("File contains     : {}", m.as_str()),
    );
    vec![format!("Number of bibitems: {items}"), declared]
}

markup_check!(
    /// `\textit` in slides.
    foils_textit,
    r"\\textit.*$"
);
markup_check!(
    /// `\textsc` in slides.
    foils_textsc,
    r"\\textsc.*$"
);
markup_check!(
    /// Numbered equations in slides.
    foils_equation,
    r"\\begin\{equation\}.*$"
);
markup_check!(
    /// A footnote in slides not opened with a tie.
    foils_footnote,
    r"\\footnote\{[^~].*$"
);
markup_check!(
    /// `\textsl` in a manuscript.
    textsl,
    r"\\textsl.*$"
);
markup_check!(
    /// The `displaymath` environment in a manuscript.
    displaymath,
    r"\\begin\{displaymath\}.*$"
);
markup_check!(
    /// The `eqnarray*` environment in a manuscript.
    eqnarray_star,
    r"\\begin\{eqnarray\*\}.*$"
);
markup_check!(
    /// A footnote opened with a tie in a manuscript.
    footnote_tie,
    r"\\footnote\{~.*$"
);
