//! Library interface for the `texcheck` CLI.
//!
//! Exposes the argument parser and the check command so both can be
//! tested without spawning the binary. The entry point is in `main.rs`.

pub mod commands;

use camino::Utf8PathBuf;
use clap::{CommandFactory, Parser};

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // detected per stream when printing
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

/// The single-dash help spelling older scripts pass.
pub const LEGACY_HELP: &str = "-help";

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, texcheck_core=trace)
    TEXCHECK_LOG_PATH      Explicit log file path
    TEXCHECK_LOG_DIR       Log directory
    TEXCHECK_SKIP_CHECKS   Check ids to skip, e.g. [repetition,non-ascii]
";

/// Command-line interface definition for texcheck.
#[derive(Parser, Debug)]
#[command(name = "texcheck")]
#[command(
    about = "Check LaTeX manuscripts for common typographical and stylistic slips",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// TeX files to check, in order
    #[arg(value_name = "FILE", required_unless_present = "list_checks")]
    pub files: Vec<Utf8PathBuf>,

    /// Path to configuration file (merged over discovered config)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, value_name = "DIR")]
    pub chdir: Option<Utf8PathBuf>,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// More log detail (repeatable; e.g. -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// List the check ids and labels, then exit
    #[arg(long)]
    pub list_checks: bool,
}

/// Returns `true` if `args` (without the program name) ask for help
/// using the single-dash spelling.
pub fn wants_legacy_help<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    args.into_iter().any(|a| a.as_ref() == LEGACY_HELP)
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
