use diagnostic::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("unbound variable {name:?}")]
    Unbound { name: String },

    #[error("cannot access field {field:?} on a {kind} value")]
    NotRecord { field: String, kind: String },

    #[error("no field {field:?} on this record")]
    NoSuchField { field: String },

    #[error("no key {key} in this associative value")]
    NoSuchKey { key: String },

    #[error("index kind mismatch: value accepts {expected} keys, got {got}")]
    WrongIndexKind { expected: String, got: String },

    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: i64, len: usize },

    #[error("cannot iterate a {kind} value")]
    NotIterable { kind: String },

    #[error("type mismatch comparing {left} to {right}")]
    TypeMismatch { left: String, right: String },

    #[error("operator {op} is not supported for {kind} values")]
    UnsupportedOperator { op: String, kind: String },

    #[error("expected a boolean value, got {kind}")]
    NotBoolean { kind: String },

    #[error("cannot render a {kind} value")]
    UnsupportedValueType { kind: String },

    #[error("indirection resolved to an invalid value while accessing {path}")]
    NullIndirection { path: String },
}

impl EvalError {
    /// Renders this error as a [`Diagnostic`]. Evaluation errors are runtime
    /// (resolved against live values, not source positions), so unlike the
    /// parse-side errors this carries a message only, with no label.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
    }
}
