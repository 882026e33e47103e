//! Stage 4 (block assembler) and stage 5 (expression parser).
//!
//! [`assemble`] consumes the scanner's statement stream and produces a tree
//! of [`Block`]s; along the way, each conditional construct's buffered
//! objects are parsed into an [`Expression`] tree by [`parse_expr`].

mod assemble;
mod block;
mod error;
mod expression;

pub use assemble::assemble;
pub use block::{Block, IfCase, SwitchCase};
pub use error::{AssembleError, ExpressionParseError};
pub use expression::{parse_expr, Expression};
