//! Stage 3: classifies a directive's identifier stream into semantic
//! [`Object`]s — variable access paths, literals, operators, keywords,
//! punctuation and parentheses.

mod classify;
mod error;
mod object;

pub use classify::classify;
pub use error::ClassifyError;
pub use object::{IndexLit, Object, ObjKind, ParenSide, Segment, VariablePath};
