use classifier::ClassifyError;
use diagnostic::{Diagnostic, Label, Span};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExpressionParseError {
    #[error("expected an operand at line {line}")]
    ExpectedOperand { line: u32 },

    #[error("unmatched `(` at line {line}")]
    UnmatchedParen { line: u32 },

    #[error("unexpected `)` at line {line}")]
    UnmatchedRParen { line: u32 },

    #[error("trailing tokens after expression at line {line}")]
    TrailingTokens { line: u32 },
}

impl ExpressionParseError {
    fn line(&self) -> u32 {
        match self {
            ExpressionParseError::ExpectedOperand { line }
            | ExpressionParseError::UnmatchedParen { line }
            | ExpressionParseError::UnmatchedRParen { line }
            | ExpressionParseError::TrailingTokens { line } => *line,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string()).with_label(Label::primary(Span::point(self.line(), 1), "here"))
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssembleError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Expression(#[from] ExpressionParseError),

    #[error("unexpected statement at line {line}: {src:?}")]
    UnexpectedStatement { src: String, line: u32 },

    #[error("missing `endif` for `if` opened at line {line}")]
    MissingEndif { line: u32 },

    #[error("missing `endfor` for `for` opened at line {line}")]
    MissingEndfor { line: u32 },

    #[error("missing `endswitch` for `switch` opened at line {line}")]
    MissingEndswitch { line: u32 },

    #[error("`for` header at line {line} must be `for <var> [, <var>] in <var>`")]
    MalformedForHeader { line: u32 },

    #[error("value statement at line {line} must be a single variable or literal")]
    MalformedValue { line: u32 },

    #[error("switch target at line {line} must be a single variable")]
    MalformedSwitchTarget { line: u32 },

    #[error("`else` at line {line} must be the last branch of an `if`")]
    ElseNotLast { line: u32 },

    #[error("`default` at line {line} must be the last case of a `switch`")]
    DefaultNotLast { line: u32 },
}

impl AssembleError {
    /// Renders this error as a [`Diagnostic`], delegating to the wrapped
    /// error's own rendering where one is carried.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            AssembleError::Classify(inner) => inner.to_diagnostic(),
            AssembleError::Expression(inner) => inner.to_diagnostic(),
            AssembleError::UnexpectedStatement { line, .. }
            | AssembleError::MissingEndif { line }
            | AssembleError::MissingEndfor { line }
            | AssembleError::MissingEndswitch { line }
            | AssembleError::MalformedForHeader { line }
            | AssembleError::MalformedValue { line }
            | AssembleError::MalformedSwitchTarget { line }
            | AssembleError::ElseNotLast { line }
            | AssembleError::DefaultNotLast { line } => {
                Diagnostic::error(self.to_string()).with_label(Label::primary(Span::point(*line, 1), "here"))
            }
        }
    }
}
