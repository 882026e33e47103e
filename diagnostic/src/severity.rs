use std::fmt;

use colored::Colorize;

/// Severity of a single diagnostic. tmplkit only ever produces `Error`
/// diagnostics (parsing and evaluation are fail-fast), but the other
/// variants are kept for future non-fatal advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "{}", "error".red().bold()),
            Severity::Warning => write!(f, "{}", "warning".yellow().bold()),
            Severity::Note => write!(f, "{}", "note".cyan().bold()),
            Severity::Help => write!(f, "{}", "help".green().bold()),
        }
    }
}
