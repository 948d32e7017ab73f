//! Core library for texcheck.
//!
//! A heuristic checker for LaTeX manuscripts: a document is normalised
//! into three views (comments stripped, display equations collapsed, all
//! maths collapsed) and a fixed battery of pattern checks runs over them.
//!
//! # Modules
//!
//! - [`normalize`] - Comment, verbatim and equation stripping
//! - [`checks`] - The check battery
//! - [`allow_lists`] - Built-in and configured token allow-lists
//! - [`document`] - Reading documents and detecting their class
//! - [`lint`] - Running the battery over a document
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8Path;
//! use texcheck_core::{ConfigLoader, Document, Linter};
//!
//! let (config, _) = ConfigLoader::new().load().expect("configuration");
//! let doc = Document::read(Utf8Path::new("paper.tex")).expect("readable file");
//! let report = Linter::from_config(&config).check_document(&doc);
//! for issue in &report.issues {
//!     println!("{}: {}", issue.check.id, issue.items.len());
//! }
//! ```
#![deny(unsafe_code)]

pub mod allow_lists;
pub mod checks;
pub mod config;
pub mod document;
pub mod error;
pub mod lint;
pub mod normalize;

pub use allow_lists::AllowLists;
pub use checks::{BATTERY, Check, Layout};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use document::{Document, DocumentClass, ensure_tex};
pub use error::{ConfigError, ConfigResult, InputError, InputResult};
pub use lint::{Issue, LintReport, Linter};
pub use normalize::{ViewKind, Views};
