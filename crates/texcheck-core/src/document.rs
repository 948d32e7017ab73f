//! Documents and their classification.

use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;

use crate::error::{InputError, InputResult};

/// File extension every input must carry.
pub const TEX_EXTENSION: &str = ".tex";

static FOILS_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\documentclass.*foils").expect("valid regex"));

/// Phys. Rev. B (`revtex` with the `prb` option) or ACS (`achemso`).
static APS_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\documentclass.*(?:prb\s*[,\]]|achemso)").expect("valid regex")
});

static NATURE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\documentclass.*nature").expect("valid regex"));

/// Fail with [`InputError::NotTex`] unless `path` ends in `.tex`.
///
/// # Errors
///
/// [`InputError::NotTex`] for any other path.
pub fn ensure_tex(path: &Utf8Path) -> InputResult<()> {
    if path.as_str().ends_with(TEX_EXTENSION) {
        Ok(())
    } else {
        Err(InputError::NotTex {
            path: path.to_path_buf(),
        })
    }
}

/// What kind of document the `\documentclass` line declares.
///
/// The flags are independent; only foils-vs-not selects between
/// mutually exclusive rule sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentClass {
    /// A `foils` slide document.
    pub foils: bool,
    /// An APS (`prb`) or ACS (`achemso`) journal manuscript.
    pub aps: bool,
    /// A Nature manuscript.
    pub nature: bool,
}

impl DocumentClass {
    /// Classify from comment-stripped text.
    pub fn detect(text: &str) -> Self {
        Self {
            foils: FOILS_CLASS.is_match(text),
            aps: APS_CLASS.is_match(text),
            nature: NATURE_CLASS.is_match(text),
        }
    }
}

/// A TeX document read into memory.
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the text came from.
    pub path: Utf8PathBuf,
    /// The raw text.
    pub text: String,
}

impl Document {
    /// Wrap already-loaded text.
    pub fn new(path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a `.tex` file.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD, so legacy 8-bit
    /// encodings still load and their lines show up as non-ASCII.
    ///
    /// # Errors
    ///
    /// [`InputError::NotTex`] if the path lacks the `.tex` suffix,
    /// [`InputError::Unreadable`] if the file cannot be read.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn read(path: &Utf8Path) -> InputResult<Self> {
        ensure_tex(path)?;
        let bytes = std::fs::read(path.as_std_path()).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).unwrap_or_else(|err| {
            tracing::warn!(offset = err.utf8_error().valid_up_to(), "document is not valid UTF-8");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        });
        tracing::debug!(bytes = text.len(), "document read");
        Ok(Self::new(path.to_path_buf(), text))
    }
}
