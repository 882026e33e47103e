//! Stage 1 (statement splitting) and stage 2 (directive tokenizing).
//!
//! [`scan`] turns raw template source into an ordered list of [`Statement`]s:
//! literal text runs and `{{ ... }}` directives whose bodies have already
//! been tokenized into [`Identifier`]s.

mod error;
mod ident;
mod scan;
mod statement;

pub use error::ScanError;
pub use ident::{Identifier, IdentKind};
pub use scan::scan;
pub use statement::{Statement, StmtKind};
