//! The check battery.
//!
//! Every check is a pure function over one normalised view, returning the
//! offending lines in document order. [`BATTERY`] lists them in the order
//! the driver runs them; callers can also look a check up by id with
//! [`find`] and run it on its own.

pub mod acronyms;
pub mod punctuation;
pub mod references;
pub mod structure;
pub mod wording;

use regex::Regex;

use crate::allow_lists::AllowLists;
use crate::document::DocumentClass;
use crate::normalize::ViewKind::{NoEquations, NoMath, Raw, Stripped};
use crate::normalize::{ViewKind, Views};

/// Signature shared by every check.
pub type CheckFn = fn(&str, &AllowLists) -> Vec<String>;

/// How a check's results are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A "Possible <label>:" heading followed by one offending line per row.
    Lines,
    /// A "Possible <label>:" heading followed by a comma-joined list.
    Terms,
    /// Each result is a standalone notice; the label is not printed.
    Notice,
}

/// Which documents a check applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applies {
    /// Every document.
    Always,
    /// Documents not using the Nature class.
    NotNature,
    /// Slide (foils) documents.
    Foils,
    /// Everything except foils.
    NotFoils,
    /// Journals that put citations in running text (APS, ACS, Nature).
    WordCitations,
    /// Journals with superscript citations (all others).
    SuperscriptCitations,
}

impl Applies {
    /// Returns `true` if a document with `class` should run this check.
    pub const fn matches(self, class: &DocumentClass) -> bool {
        match self {
            Self::Always => true,
            Self::NotNature => !class.nature,
            Self::Foils => class.foils,
            Self::NotFoils => !class.foils,
            Self::WordCitations => class.aps || class.nature,
            Self::SuperscriptCitations => !(class.aps || class.nature),
        }
    }
}

/// A named check in the battery.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    /// Stable identifier, used by `skip_checks`.
    pub id: &'static str,
    /// Category label printed after "Possible".
    pub label: &'static str,
    /// The view this check reads.
    pub view: ViewKind,
    /// Documents this check applies to.
    pub applies: Applies,
    /// Presentation of the results.
    pub layout: Layout,
    /// The matching function.
    pub run: CheckFn,
}

impl Check {
    /// Run this check against the appropriate view.
    pub fn run_on(&self, views: &Views, lists: &AllowLists) -> Vec<String> {
        (self.run)(views.get(self.view), lists)
    }
}

/// Look up a check by id.
pub fn find(id: &str) -> Option<&'static Check> {
    BATTERY.iter().find(|c| c.id == id)
}

/// Every match of `re` in `text`, as owned strings.
///
/// Patterns are written `^...$` in multi-line mode, so each match is a
/// whole line (or, for patterns whose `\s` crosses a newline, a run of
/// lines).
pub(crate) fn matching_lines(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// All lines of `text` for which `pred` holds.
pub(crate) fn lines_where(text: &str, pred: impl Fn(&str) -> bool) -> Vec<String> {
    text.split('\n')
        .filter(|line| pred(line))
        .map(str::to_string)
        .collect()
}

const fn check(
    id: &'static str,
    label: &'static str,
    view: ViewKind,
    run: CheckFn,
) -> Check {
    Check {
        id,
        label,
        view,
        applies: Applies::Always,
        layout: Layout::Lines,
        run,
    }
}

const fn only(mut c: Check, applies: Applies) -> Check {
    c.applies = applies;
    c
}

const fn laid_out(mut c: Check, layout: Layout) -> Check {
    c.layout = layout;
    c
}

/// The full battery in run order.
pub static BATTERY: &[Check] = &[
    check("non-ascii", "non-printable-ASCII character(s)", Stripped, structure::non_ascii),
    laid_out(
        check("carriage-returns", "MS-DOS-style carriage returns", Raw, structure::carriage_returns),
        Layout::Notice,
    ),
    check("double-dots", "double dots", Stripped, punctuation::double_dots),
    check("end-of-sentence-space", r#"need for "\@""#, NoEquations, punctuation::end_of_sentence_space),
    check("double-capitalisation", "double capitalisation", NoMath, wording::double_capitalisation),
    check("missing-capitalisation", "missing capitalisation", NoEquations, wording::missing_capitalisation),
    check("latin-abbreviation-space", r#"missing "\ ""#, NoEquations, punctuation::latin_abbreviation_space),
    check("unit-abbreviation-space", r#"missing "\ ""#, NoEquations, punctuation::unit_abbreviation_space),
    check("speech-marks", "erroneous speech marks", Stripped, punctuation::speech_marks),
    check("an-consonant", r#""an consonant""#, NoMath, wording::an_consonant),
    check("a-vowel", r#""a vowel""#, NoMath, wording::a_vowel),
    check("er-that", r#""...er that""#, NoEquations, wording::er_that),
    check("space-before-punctuation", "space before punctuation mark", NoEquations, punctuation::space_before_punctuation),
    check("stop-colon", "need for backslash after colon", NoEquations, punctuation::stop_colon),
    check("ly-hyphen", "unnecessary hyphen", NoEquations, wording::ly_hyphen),
    check("en-dash", "need for an en-dash", NoEquations, punctuation::en_dash),
    check("repetition", "repetition of words", NoEquations, wording::repetition),
    check("eq-ref-brackets", r#""Eq.\ \ref" (brackets needed)"#, NoEquations, references::eq_ref_brackets),
    check("reference-abbreviation-space", r#"missing "\ ""#, NoEquations, references::abbreviation_space),
    check(
        "abbreviation-sentence-start",
        "need to use nonabbreviated form at start of a sentence",
        NoEquations,
        references::abbreviation_at_sentence_start,
    ),
    only(
        check(
            "abbreviation-mid-sentence",
            "need to use abbreviated form in middle of a sentence",
            NoEquations,
            references::full_form_mid_sentence,
        ),
        Applies::NotNature,
    ),
    check("dash-space-before", "need to delete space before dash", NoMath, punctuation::dash_space_before),
    check("dash-space-after", "need to delete space after dash", NoMath, punctuation::dash_space_after),
    check("reference-case", "need to use a capital letter", NoEquations, references::reference_case),
    check("math-minus", "need to use math mode for minus sign", NoMath, punctuation::math_minus),
    check("bibliography-size", "problem with number of bibitems", Stripped, structure::bibliography_size),
    laid_out(
        check("undefined-acronyms", "need to define the following acronyms", NoEquations, acronyms::undefined),
        Layout::Terms,
    ),
    laid_out(
        check("multiple-acronyms", "multiple definitions of acronyms", NoEquations, acronyms::multiply_defined),
        Layout::Terms,
    ),
    only(check("foils-textit", r#""\textit""#, Stripped, structure::foils_textit), Applies::Foils),
    only(check("foils-textsc", r#""\textsc""#, Stripped, structure::foils_textsc), Applies::Foils),
    only(check("foils-equation", r#""equation""#, Stripped, structure::foils_equation), Applies::Foils),
    only(check("foils-footnote", r#"missing "~""#, Stripped, structure::foils_footnote), Applies::Foils),
    only(check("textsl", r#""\textsl""#, Stripped, structure::textsl), Applies::NotFoils),
    only(check("displaymath", r#""displaymath""#, Stripped, structure::displaymath), Applies::NotFoils),
    only(check("eqnarray-star", r#""eqnarray*""#, Stripped, structure::eqnarray_star), Applies::NotFoils),
    only(check("footnote-tie", r#""\footnote{~""#, Stripped, structure::footnote_tie), Applies::NotFoils),
    only(check("word-cite", r#"" \cite""#, NoEquations, references::word_cite), Applies::WordCitations),
    only(
        check("superscript-cite", r#"".\cite""#, NoEquations, references::superscript_cite),
        Applies::SuperscriptCitations,
    ),
];
