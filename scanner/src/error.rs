use diagnostic::{Diagnostic, Label, Span};
use thiserror::Error;

/// Errors produced while splitting source into statements or tokenizing a
/// directive body into identifiers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScanError {
    #[error("unterminated directive starting at line {line}: {src:?}")]
    UnterminatedDirective { src: String, line: u32 },

    #[error("invalid token {token:?} in directive at line {line}, column {column}")]
    InvalidToken { token: String, line: u32, column: u32 },
}

impl ScanError {
    /// Renders this error as a [`Diagnostic`] anchored at its source position.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (span, help) = match self {
            ScanError::UnterminatedDirective { line, .. } => {
                (Span::point(*line, 1), Some("every `{{` needs a matching `}}`"))
            }
            ScanError::InvalidToken { line, column, .. } => (Span::point(*line, *column), None),
        };
        let mut diag = Diagnostic::error(self.to_string()).with_label(Label::primary(span, "here"));
        if let Some(help) = help {
            diag = diag.with_help(help);
        }
        diag
    }
}
