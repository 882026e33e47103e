//! `tmplkit`: a small logic-and-substitution template engine.
//!
//! The public surface is a six-stage pipeline hidden behind three calls:
//! [`parse`] turns source text into a [`Template`] (scanning, tokenizing,
//! classifying, and assembling it into a block tree), [`evaluate`] walks
//! that tree against an [`Environment`] to produce output, and [`format`]
//! does both in one step for callers who don't need to reuse a parsed
//! template across environments.
//!
//! ```
//! use tmplkit::Environment;
//!
//! let mut env = Environment::from_json_object(serde_json::json!({ "name": "world" }));
//! let out = tmplkit::format("Hello, {{ name }}!", &mut env).unwrap();
//! assert_eq!(out, "Hello, world!");
//! ```

mod error;

pub use diagnostic::{Diagnostic, DiagnosticFormatter};
pub use error::{ParseError, TemplateError};
pub use evaluator::{evaluate, evaluate_with_options, EngineOptions, Environment};
pub use parser::Block;
pub use value::{DynValue, Value, ValueKey, ValueKeyKind, ValueKind};

/// A parsed template: an ordered tree of blocks, ready to be evaluated
/// against any number of environments.
#[derive(Debug, Clone)]
pub struct Template {
    blocks: Vec<Block>,
}

impl Template {
    /// The parsed block tree, for callers that want to walk it directly.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// Parses `source` into a [`Template`] using the default [`EngineOptions`].
pub fn parse(source: &str) -> Result<Template, ParseError> {
    parse_with_options(source, &EngineOptions::default())
}

/// Parses `source` into a [`Template`]. `options` only affects evaluation,
/// not parsing, but is accepted here so callers can build a template and an
/// options value together and pass the same options to [`evaluate_template`].
pub fn parse_with_options(source: &str, _options: &EngineOptions) -> Result<Template, ParseError> {
    let statements = scanner::scan(source)?;
    let blocks = parser::assemble(&statements)?;
    Ok(Template { blocks })
}

/// Evaluates a parsed [`Template`] against `env` using the default
/// [`EngineOptions`].
pub fn evaluate_template(template: &Template, env: &mut Environment) -> Result<String, evaluator::EvalError> {
    evaluator::evaluate(&template.blocks, env)
}

/// Like [`evaluate_template`], with explicit [`EngineOptions`].
pub fn evaluate_template_with_options(
    template: &Template,
    env: &mut Environment,
    options: &EngineOptions,
) -> Result<String, evaluator::EvalError> {
    evaluator::evaluate_with_options(&template.blocks, env, options)
}

/// Parses and evaluates `source` in one step, using the default
/// [`EngineOptions`].
pub fn format(source: &str, env: &mut Environment) -> Result<String, TemplateError> {
    format_with_options(source, env, &EngineOptions::default())
}

/// Like [`format`], with explicit [`EngineOptions`].
pub fn format_with_options(source: &str, env: &mut Environment, options: &EngineOptions) -> Result<String, TemplateError> {
    let template = parse_with_options(source, options)?;
    let out = evaluator::evaluate_with_options(&template.blocks, env, options)?;
    Ok(out)
}
