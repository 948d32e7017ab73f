//! Fixed configuration tables used by the check battery.
//!
//! The built-in lists live here as constants; [`AllowLists`] merges them
//! with any extra tokens supplied through configuration.

use std::collections::HashSet;

use crate::config::Config;

/// Tokens with two leading capitals that are legitimate (units, degrees).
pub const DOUBLE_CAPS: &[&str] = &[
    "MHz", "GHz", "THz", "MPa", "GPa", "TPa", "MPhys", "OKed", "OKing", "HCl", "BSc", "MSci",
];

/// Upper-case tokens that never need a definition.
pub const KNOWN_ACRONYMS: &[&str] = &[
    "NDD", "LA1", "4YB", "CB3", "0HE", "UK", "USA", "EU", "UAE", "OK", "GNU", "AMD", "AOL", "BAE",
    "BMW", "BP", "CV", "HSBC", "IBM", "KFC", "CCSD",
];

/// Words for which "<word> that" is correct usage.
pub const ER_THAT_WORDS: &[&str] = &[
    "remember",
    "order",
    "layer",
    "however",
    "compiler",
    "power",
    "parameter",
    "barrier",
];

/// Markup tokens that legitimately repeat (table rules, alignment, line breaks).
pub const REPEATABLE_TOKENS: &[&str] = &[
    r"\hline",
    "&",
    r"\\",
    r"\end{itemize}",
    r"\end{enumerate}",
    r"\end{description}",
];

/// The allow-lists in effect for one run.
#[derive(Debug, Clone)]
pub struct AllowLists {
    double_caps: HashSet<String>,
    acronyms: HashSet<String>,
}

impl AllowLists {
    /// Merge the built-in tables with the extras from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_extras(&config.allowed_double_caps, &config.known_acronyms)
    }

    /// Merge the built-in tables with explicit extras.
    pub fn with_extras(double_caps: &[String], acronyms: &[String]) -> Self {
        let double_caps = DOUBLE_CAPS
            .iter()
            .map(|s| (*s).to_string())
            .chain(double_caps.iter().cloned())
            .collect();
        let acronyms = KNOWN_ACRONYMS
            .iter()
            .map(|s| (*s).to_string())
            .chain(acronyms.iter().cloned())
            .collect();
        Self {
            double_caps,
            acronyms,
        }
    }

    /// Returns `true` if `token` is a legitimate double-capital token.
    pub fn is_double_cap(&self, token: &str) -> bool {
        self.double_caps.contains(token)
    }

    /// Returns `true` if `token` is an acronym that needs no definition.
    pub fn is_known_acronym(&self, token: &str) -> bool {
        self.acronyms.contains(token)
    }
}

impl Default for AllowLists {
    fn default() -> Self {
        Self::with_extras(&[], &[])
    }
}

/// Returns `true` if `token` consists only of Roman-numeral letters.
///
/// The empty string counts, matching `^[IVXLCDM]*$`.
pub fn is_roman_numeral(token: &str) -> bool {
    token.chars().all(|c| matches!(c, 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M'))
}

/// Returns `true` if `token` is a bare number (optionally comma-terminated)
/// or a single-capital label such as `A.` or `B\`.
pub fn is_label_like(token: &str) -> bool {
    let number = token.strip_suffix(',').unwrap_or(token);
    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() {
        return false;
    }
    let rest = chars.as_str();
    matches!(rest, "" | "." | "\\" | ".\\")
}
