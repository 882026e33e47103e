use crate::Identifier;

/// The kind of statement a directive (or literal text run) resolves to,
/// decided from the leading identifier once the directive body has been
/// tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtKind {
    Template,
    If,
    Elseif,
    Else,
    Endif,
    For,
    Endfor,
    Switch,
    Case,
    Default,
    Endswitch,
    Value,
}

/// A single unit produced by the scanner: either a literal text run or a
/// tokenized directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StmtKind,
    /// The raw source text of the statement (the literal run, or the full
    /// `{{ ... }}` directive including delimiters) — kept for diagnostics.
    pub src: String,
    /// Tokenized identifiers; empty for `Template` statements.
    pub idents: Vec<Identifier>,
    pub line: u32,
}

impl Statement {
    pub fn template(src: impl Into<String>, line: u32) -> Self {
        Self { kind: StmtKind::Template, src: src.into(), idents: Vec::new(), line }
    }

    pub fn directive(kind: StmtKind, src: impl Into<String>, idents: Vec<Identifier>, line: u32) -> Self {
        Self { kind, src: src.into(), idents, line }
    }

    /// The directive body identifiers with the leading keyword/variable
    /// stripped, for callers that only care about the remainder (e.g. an
    /// `if`'s condition, or a `for`'s header).
    pub fn rest(&self) -> &[Identifier] {
        if self.idents.is_empty() {
            &self.idents
        } else {
            &self.idents[1..]
        }
    }
}
