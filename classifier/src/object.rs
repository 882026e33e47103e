use scanner::{Identifier, IdentKind};

/// A variable access path: a name followed by zero or more `.field` or
/// `[index]` segments.
#[derive(Debug, Clone, PartialEq)]
pub struct VariablePath {
    pub name: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Field(String),
    Index(IndexLit),
}

/// A literal used inside an index segment (`[...]`). Index literals are
/// always literal tokens, never nested variables.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexLit {
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjKind {
    Variable(VariablePath),
    IntConst(i64),
    FloatConst(f64),
    StrConst(String),
    ChrConst(char),
    BoolConst(bool),
    Operator(IdentKind),
    Keyword(IdentKind),
    Punctuator,
    Paren(ParenSide),
}

/// A classified semantic token, retaining the raw identifiers it was built
/// from so error messages can point at the exact source.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub kind: ObjKind,
    pub idents: Vec<Identifier>,
}

impl Object {
    pub fn new(kind: ObjKind, idents: Vec<Identifier>) -> Self {
        Self { kind, idents }
    }

    pub fn line(&self) -> u32 {
        self.idents.first().map(|i| i.line).unwrap_or(0)
    }
}
