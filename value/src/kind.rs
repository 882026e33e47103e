use std::fmt;

/// The coarse-grained kind of a dynamic value, used for error messages and
/// kind-strict comparison/formatting dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Bool,
    Sequence,
    Associative,
    Record,
    Other,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Sequence => "sequence",
            ValueKind::Associative => "associative",
            ValueKind::Record => "record",
            ValueKind::Other => "other",
        };
        write!(f, "{name}")
    }
}
