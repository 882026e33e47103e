//! Stage 6: walks the block tree against an [`Environment`] and produces
//! output, or the first error encountered (evaluation is fail-fast — no
//! partial output is returned).

mod compare;
mod environment;
mod error;
mod eval;
mod options;
mod resolve;

pub use environment::Environment;
pub use error::EvalError;
pub use eval::{evaluate, evaluate_with_options};
pub use options::EngineOptions;
