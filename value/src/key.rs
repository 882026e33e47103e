use std::fmt;

/// A typed key used for associative lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKey {
    Str(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for ValueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKey::Str(s) => write!(f, "{s:?}"),
            ValueKey::Int(i) => write!(f, "{i}"),
            ValueKey::Float(v) => write!(f, "{v}"),
        }
    }
}

/// The kind of key an associative value accepts, independent of any
/// particular lookup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKeyKind {
    String,
    Integer,
    Float,
}

impl fmt::Display for ValueKeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKeyKind::String => "string",
            ValueKeyKind::Integer => "integer",
            ValueKeyKind::Float => "float",
        };
        write!(f, "{name}")
    }
}
