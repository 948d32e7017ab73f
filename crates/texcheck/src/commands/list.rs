//! `--list-checks`: print the battery.

use std::io::{self, Write};

use anyhow::Context;
use texcheck_core::checks::{Applies, BATTERY, Check};

/// Print each check id with its label and, where limited, the documents it
/// runs on.
pub fn cmd_list_checks() -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_checks(&mut out, BATTERY).context("failed to write output")
}

/// Write one row per check.
pub fn write_checks(out: &mut impl Write, checks: &[Check]) -> io::Result<()> {
    let width = checks.iter().map(|c| c.id.len()).max().unwrap_or(0);
    for check in checks {
        match scope(check.applies) {
            Some(scope) => writeln!(out, "{:<width$}  {} ({scope})", check.id, check.label)?,
            None => writeln!(out, "{:<width$}  {}", check.id, check.label)?,
        }
    }
    out.flush()
}

const fn scope(applies: Applies) -> Option<&'static str> {
    match applies {
        Applies::Always => None,
        Applies::NotNature => Some("not Nature"),
        Applies::Foils => Some("foils only"),
        Applies::NotFoils => Some("not foils"),
        Applies::WordCitations => Some("APS, ACS and Nature"),
        Applies::SuperscriptCitations => Some("superscript-citation journals"),
    }
}
