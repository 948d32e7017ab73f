//! Text normalisation.
//!
//! Produces the views the check battery runs over. Line endings are
//! unified to `\n` first; after that each stage only substitutes text.
//! Newlines inside a collapsed equation are kept inside the placeholder,
//! before its closing marker, so line `n` of a view is line `n` of the
//! source and text after the marker stays on its line. The verbatim/listing
//! collapse is the exception and drops the block's lines.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A line whose first non-blank character starts a comment.
static FULL_LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*%.*$").expect("valid regex"));

/// A trailing comment: the first `%` not escaped by a backslash.
static TRAILING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(.*?[^\\\n])%.*$").expect("valid regex"));

static VERBATIM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\begin\{verbatim\}.*?\\end\{verbatim\}").expect("valid regex")
});

static LSTLISTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\begin\{lstlisting\}.*?\\end\{lstlisting\}").expect("valid regex")
});

/// Display maths: a named environment or a `\(`/`\[` delimiter pair.
static DISPLAY_EQUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)(\\begin\{(?:math|equation\*?|displaymath|eqnarray\*?|align)\}|\\[\(\[])",
        r".*?",
        r"(\\end\{(?:math|equation\*?|displaymath|eqnarray\*?|align)\}|\\[\]\)])",
    ))
    .expect("valid regex")
});

static INLINE_DOUBLE_DOLLAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)([^\\])\$\$.*?[^\\]\$\$").expect("valid regex"));

static INLINE_DOLLAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)([^\\])\$.*?[^\\]\$").expect("valid regex"));

/// Which normalised view a check consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// The text exactly as read, line endings included.
    Raw,
    /// Comments and verbatim blocks removed.
    Stripped,
    /// [`ViewKind::Stripped`] plus display equations collapsed.
    NoEquations,
    /// [`ViewKind::NoEquations`] plus inline maths collapsed.
    NoMath,
}

/// The raw and normalised views of one document.
#[derive(Debug, Clone)]
pub struct Views {
    raw: String,
    stripped: String,
    no_equations: String,
    no_math: String,
}

impl Views {
    /// Build every view from raw document text.
    #[tracing::instrument(skip_all, fields(text_len = raw.len()))]
    pub fn build(raw: &str) -> Self {
        let stripped = strip_noise(&unify_line_endings(raw));
        let no_equations = strip_display_equations(&stripped);
        let no_math = strip_inline_equations(&no_equations);
        Self {
            raw: raw.to_string(),
            stripped,
            no_equations,
            no_math,
        }
    }

    /// Borrow one view.
    pub fn get(&self, kind: ViewKind) -> &str {
        match kind {
            ViewKind::Raw => &self.raw,
            ViewKind::Stripped => &self.stripped,
            ViewKind::NoEquations => &self.no_equations,
            ViewKind::NoMath => &self.no_math,
        }
    }
}

/// Turn `\r\n` and lone `\r` line endings into `\n`.
pub fn unify_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Remove comments, and collapse verbatim and listing blocks.
pub fn strip_noise(text: &str) -> String {
    let text = FULL_LINE_COMMENT.replace_all(text, "");
    let text = TRAILING_COMMENT.replace_all(&text, "${1}");
    let text = VERBATIM.replace_all(&text, r"\begin{verbatim} \end{verbatim}");
    LSTLISTING
        .replace_all(&text, r"\begin{lstlisting} \end{lstlisting}")
        .into_owned()
}

/// Collapse display equations to `<open> xxx <close>`.
///
/// A multi-line equation keeps its newlines between `xxx` and the closing
/// marker.
pub fn strip_display_equations(text: &str) -> String {
    DISPLAY_EQUATION
        .replace_all(text, |caps: &Captures<'_>| {
            format!(
                "{} xxx{} {}",
                &caps[1],
                newlines_in(&caps[0]),
                &caps[2]
            )
        })
        .into_owned()
}

/// Collapse `$$…$$` and `$…$` spans to `$xxx$`.
///
/// Run this on the output of [`strip_display_equations`].
pub fn strip_inline_equations(text: &str) -> String {
    let text = INLINE_DOUBLE_DOLLAR.replace_all(text, collapse_inline);
    INLINE_DOLLAR.replace_all(&text, collapse_inline).into_owned()
}

fn collapse_inline(caps: &Captures<'_>) -> String {
    let lead = &caps[1];
    let body = &caps[0][lead.len()..];
    format!("{lead}$xxx{}$", newlines_in(body))
}

fn newlines_in(s: &str) -> String {
    "\n".repeat(s.matches('\n').count())
}
