//! The check command: run the battery over each file in turn.
//!
//! Output is plain text on stdout, coloured when the terminal allows: a
//! banner, a "Checking file" line and the issues for each file, then a
//! closing "Done.".

use std::io::{self, Write};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument, warn};

use texcheck_core::config::Config;
use texcheck_core::{Document, Issue, Layout, LintReport, Linter, ensure_tex};

/// Column at which acronym lists are wrapped.
pub const WRAP_WIDTH: usize = 70;

/// Check every file, stopping at the first that is misnamed or unreadable.
///
/// All names are validated before any output, so a bad suffix aborts the
/// run cleanly; read failures can only surface once the file is reached.
#[instrument(name = "cmd_check", skip_all, fields(files = files.len()))]
pub fn cmd_check(files: &[Utf8PathBuf], config: &Config) -> anyhow::Result<()> {
    for path in files {
        ensure_tex(path)?;
    }

    let linter = Linter::from_config(config);
    for id in linter.unknown_skips() {
        warn!(check = id, "skip_checks names an unknown check");
    }

    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    reporter.banner().context("failed to write output")?;
    for path in files {
        reporter.checking(path).context("failed to write output")?;
        let doc = Document::read(path)?;
        let report = linter.check_document(&doc);
        debug!(file = %path, issues = report.issues.len(), "file checked");
        reporter.report(&report).context("failed to write output")?;
    }
    reporter.done().context("failed to write output")?;
    Ok(())
}

/// Writes the human-readable report.
#[derive(Debug)]
pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    /// Report to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// The program banner.
    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "TeX Checker".if_supports_color(Stream::Stdout, |t| t.blue()))?;
        writeln!(self.out, "{}", "===========".if_supports_color(Stream::Stdout, |t| t.blue()))?;
        writeln!(self.out)
    }

    /// The per-file heading.
    pub fn checking(&mut self, path: &Utf8Path) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {}.",
            "Checking file".if_supports_color(Stream::Stdout, |t| t.blue()),
            path.as_str().if_supports_color(Stream::Stdout, |t| t.green()),
        )?;
        writeln!(self.out)
    }

    /// Every issue in one document, in battery order.
    pub fn report(&mut self, report: &LintReport) -> io::Result<()> {
        report.issues.iter().try_for_each(|issue| self.issue(issue))
    }

    fn issue(&mut self, issue: &Issue) -> io::Result<()> {
        match issue.check.layout {
            Layout::Lines => {
                self.heading(issue.check.label)?;
                writeln!(self.out, "{}", issue.items.join("\n"))?;
            }
            Layout::Terms => {
                self.heading(issue.check.label)?;
                writeln!(self.out, "{}", fill(&issue.items.join(", "), WRAP_WIDTH))?;
            }
            Layout::Notice => {
                for item in &issue.items {
                    writeln!(
                        self.out,
                        "{}",
                        item.as_str().if_supports_color(Stream::Stdout, |t| t.purple())
                    )?;
                }
            }
        }
        writeln!(self.out)
    }

    fn heading(&mut self, label: &str) -> io::Result<()> {
        let heading = format!("Possible {label}:");
        writeln!(
            self.out,
            "{}",
            heading.if_supports_color(Stream::Stdout, |t| t.purple())
        )
    }

    /// The closing line.
    pub fn done(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "Done.".if_supports_color(Stream::Stdout, |t| t.blue()))?;
        self.out.flush()
    }
}

/// Greedy word wrap at `width` columns.
///
/// Words longer than the width get a line of their own.
pub fn fill(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_len = 0;
    for word in text.split_whitespace() {
        if line_len > 0 && line_len + 1 + word.len() > width {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(word);
        line_len += word.len();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        owo_colors::set_override(false);
        let doc = Document::new("paper.tex", text);
        let report = Linter::default().check_document(&doc);
        let mut reporter = Reporter::new(Vec::new());
        reporter.report(&report).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn clean_document_prints_nothing() {
        assert_eq!(render("Hello world.\n"), "");
    }

    #[test]
    fn lines_block() {
        assert_eq!(render("Stop here..\n"), "Possible double dots:\nStop here..\n\n");
    }

    #[test]
    fn terms_block_is_comma_joined() {
        let out = render("We saw XYZ and PQR here.\n");
        assert!(
            out.contains("Possible need to define the following acronyms:\nXYZ, PQR\n\n"),
            "{out}"
        );
    }

    #[test]
    fn notice_has_no_heading() {
        let out = render("Hello world.\r\n");
        assert!(out.contains("MS-DOS-style carriage returns.  Run dos2unix.\n\n"), "{out}");
        assert!(!out.contains("Possible MS-DOS"), "{out}");
    }

    #[test]
    fn banner_and_done() {
        owo_colors::set_override(false);
        let mut reporter = Reporter::new(Vec::new());
        reporter.banner().unwrap();
        reporter.checking(Utf8Path::new("a.tex")).unwrap();
        reporter.done().unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(out, "\nTeX Checker\n===========\n\nChecking file a.tex.\n\nDone.\n");
    }

    #[test]
    fn fill_wraps_at_width() {
        assert_eq!(fill("aa, bb, cc", 6), "aa,\nbb,\ncc");
        assert_eq!(fill("aa, bb", 70), "aa, bb");
        assert_eq!(fill("", 10), "");
    }

    #[test]
    fn fill_keeps_long_words_whole() {
        assert_eq!(fill("short averyveryverylongword x", 8), "short\naveryveryverylongword\nx");
    }
}
