//! Lint execution engine.
//!
//! Runs [`BATTERY`] over one document: the text is normalised once, the
//! document class picks which checks apply, and every check that finds
//! something yields an [`Issue`].

use std::collections::HashSet;

use camino::Utf8PathBuf;

use crate::allow_lists::AllowLists;
use crate::checks::{BATTERY, Check};
use crate::config::Config;
use crate::document::{Document, DocumentClass};
use crate::normalize::{ViewKind, Views};

/// One check's findings in one document.
#[derive(Debug, Clone)]
pub struct Issue {
    /// The check that fired.
    pub check: &'static Check,
    /// Offending lines, terms or notices, in document order.
    pub items: Vec<String>,
}

/// Everything found in one document.
#[derive(Debug, Clone)]
pub struct LintReport {
    /// The file that was checked.
    pub path: Utf8PathBuf,
    /// The class its `\documentclass` line declared.
    pub class: DocumentClass,
    /// Issues in battery order.
    pub issues: Vec<Issue>,
}

impl LintReport {
    /// Returns `true` if no check fired.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Runs the battery with one set of allow-lists and skipped checks.
#[derive(Debug, Clone)]
pub struct Linter {
    lists: AllowLists,
    skip: HashSet<String>,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(AllowLists::default(), std::iter::empty::<String>())
    }
}

impl Linter {
    /// A linter with explicit allow-lists and check ids to leave out.
    pub fn new<I, S>(lists: AllowLists, skip: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lists,
            skip: skip.into_iter().map(Into::into).collect(),
        }
    }

    /// A linter set up from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(AllowLists::from_config(config), config.skip_checks.iter().cloned())
    }

    /// Skipped ids that name no check.
    pub fn unknown_skips(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .skip
            .iter()
            .map(String::as_str)
            .filter(|id| crate::checks::find(id).is_none())
            .collect();
        unknown.sort_unstable();
        unknown
    }

    /// Checks that would run on a document of `class`, in order.
    pub fn applicable(&self, class: &DocumentClass) -> impl Iterator<Item = &'static Check> + '_ {
        let class = *class;
        BATTERY
            .iter()
            .filter(move |c| c.applies.matches(&class) && !self.skip.contains(c.id))
    }

    /// Check raw document text.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn check_text(&self, text: &str) -> (DocumentClass, Vec<Issue>) {
        let views = Views::build(text);
        let class = DocumentClass::detect(views.get(ViewKind::Stripped));
        tracing::debug!(?class, "document classified");

        let issues = self
            .applicable(&class)
            .filter_map(|check| {
                let items = check.run_on(&views, &self.lists);
                tracing::debug!(check = check.id, hits = items.len(), "check ran");
                (!items.is_empty()).then_some(Issue { check, items })
            })
            .collect();
        (class, issues)
    }

    /// Check a loaded document.
    #[tracing::instrument(skip_all, fields(path = %doc.path))]
    pub fn check_document(&self, doc: &Document) -> LintReport {
        let (class, issues) = self.check_text(&doc.text);
        tracing::debug!(issues = issues.len(), "document checked");
        LintReport {
            path: doc.path.clone(),
            class,
            issues,
        }
    }
}
