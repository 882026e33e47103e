use diagnostic::{Diagnostic, DiagnosticFormatter};
use thiserror::Error;

/// Any error from scanning or assembling a template.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Scan(#[from] scanner::ScanError),

    #[error(transparent)]
    Assemble(#[from] parser::AssembleError),
}

impl ParseError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Scan(e) => e.to_diagnostic(),
            ParseError::Assemble(e) => e.to_diagnostic(),
        }
    }

    /// Renders this error rustc-style against the source it was parsed from.
    pub fn render(&self, source: &str) -> String {
        DiagnosticFormatter::new(&self.to_diagnostic(), source).format()
    }
}

/// Any error from the one-shot [`crate::format`]/[`crate::format_with_options`]
/// calls, covering both parsing and evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TemplateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] evaluator::EvalError),
}

impl TemplateError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            TemplateError::Parse(e) => e.to_diagnostic(),
            TemplateError::Eval(e) => e.to_diagnostic(),
        }
    }

    /// Renders this error rustc-style against the source it came from.
    pub fn render(&self, source: &str) -> String {
        DiagnosticFormatter::new(&self.to_diagnostic(), source).format()
    }
}
