use classifier::{ObjKind, Object};
use logger::{LogType, Logger};
use parser::{Block, Expression};
use scanner::IdentKind;
use value::{Value, ValueKey, ValueKind};

use crate::compare::compare;
use crate::options::EngineOptions;
use crate::resolve::{key_to_json, resolve_operand, resolve_variable, snapshot, Scalar};
use crate::{EvalError, Environment};

const STAGE: &str = "evaluator";

/// Walks `blocks` against `env` using the default [`EngineOptions`],
/// returning the rendered output or the first error encountered. No partial
/// output is returned on error.
pub fn evaluate(blocks: &[Block], env: &mut Environment) -> Result<String, EvalError> {
    evaluate_with_options(blocks, env, &EngineOptions::default())
}

/// Like [`evaluate`], with explicit [`EngineOptions`].
pub fn evaluate_with_options(blocks: &[Block], env: &mut Environment, options: &EngineOptions) -> Result<String, EvalError> {
    let mut out = String::new();
    for block in blocks {
        eval_block(block, env, &mut out, options)?;
    }
    Logger::log(LogType::Trace(&format!("evaluated {} bytes of output", out.len())), STAGE);
    Ok(out)
}

fn eval_block(block: &Block, env: &mut Environment, out: &mut String, options: &EngineOptions) -> Result<(), EvalError> {
    match block {
        Block::Template { text } => {
            out.push_str(text);
            Ok(())
        }
        Block::Value { expr } => {
            out.push_str(&render_object(expr, env)?);
            Ok(())
        }
        Block::If { branches } => eval_if(branches, env, out, options),
        Block::For { index_name, value_name, iter, body } => eval_for(index_name, value_name, iter, body, env, out, options),
        Block::Switch { target, cases } => eval_switch(target, cases, env, out, options),
    }
}

fn eval_if(branches: &[parser::IfCase], env: &mut Environment, out: &mut String, options: &EngineOptions) -> Result<(), EvalError> {
    for branch in branches {
        let matched = match &branch.cond {
            Some(expr) => eval_expr(expr, env, options)?,
            None => true,
        };
        if matched {
            for b in &branch.body {
                eval_block(b, env, out, options)?;
            }
            break;
        }
    }
    Ok(())
}

fn eval_for(
    index_name: &str,
    value_name: &str,
    iter: &Object,
    body: &[Block],
    env: &mut Environment,
    out: &mut String,
    options: &EngineOptions,
) -> Result<(), EvalError> {
    let path = match &iter.kind {
        ObjKind::Variable(path) => path,
        _ => return Err(EvalError::NotIterable { kind: "literal".to_string() }),
    };
    let target = resolve_variable(env, path)?;

    match target.kind() {
        ValueKind::Sequence => {
            let len = target.len().unwrap_or(0);
            let elements: Vec<serde_json::Value> =
                (0..len).map(|i| snapshot(target.seq_get(i).expect("index in bounds"))).collect();
            for (idx, elem) in elements.into_iter().enumerate() {
                bind_loop_vars(env, index_name, value_name, serde_json::Value::from(idx as i64), elem);
                for b in body {
                    eval_block(b, env, out, options)?;
                }
            }
            Ok(())
        }
        ValueKind::Record | ValueKind::Associative => {
            let keys = target.keys().ok_or_else(|| EvalError::NotIterable { kind: target.kind().to_string() })?;
            let pairs: Vec<(ValueKey, serde_json::Value)> = keys
                .into_iter()
                .map(|k| {
                    let v = target.map_get(&k).map(snapshot).unwrap_or(serde_json::Value::Null);
                    (k, v)
                })
                .collect();
            for (key, val) in pairs {
                bind_loop_vars(env, index_name, value_name, key_to_json(&key), val);
                for b in body {
                    eval_block(b, env, out, options)?;
                }
            }
            Ok(())
        }
        other => Err(EvalError::NotIterable { kind: other.to_string() }),
    }
}

fn bind_loop_vars(env: &mut Environment, index_name: &str, value_name: &str, index: serde_json::Value, value: serde_json::Value) {
    if !index_name.is_empty() {
        env.set_owned(index_name.to_string(), index);
    }
    if !value_name.is_empty() {
        env.set_owned(value_name.to_string(), value);
    }
}

fn eval_switch(
    target: &Object,
    cases: &[parser::SwitchCase],
    env: &mut Environment,
    out: &mut String,
    options: &EngineOptions,
) -> Result<(), EvalError> {
    let target_scalar = resolve_operand(env, target)?;
    env.set_switch_target(scalar_to_json(&target_scalar));

    for case in cases {
        let matches = match &case.values {
            None => true,
            Some(values) => {
                let mut matched = false;
                for value_obj in values {
                    let candidate = resolve_operand(env, value_obj)?;
                    if scalars_equal(&target_scalar, &candidate) {
                        matched = true;
                        break;
                    }
                }
                matched
            }
        };
        if matches {
            for b in &case.body {
                eval_block(b, env, out, options)?;
            }
            return Ok(());
        }
    }
    Ok(())
}

fn scalars_equal(a: &Scalar, b: &Scalar) -> bool {
    compare(a, IdentKind::Eq, b).unwrap_or(false)
}

fn scalar_to_json(s: &Scalar) -> serde_json::Value {
    match s {
        Scalar::Str(v) => serde_json::Value::String(v.clone()),
        Scalar::Int(v) => serde_json::Value::from(*v),
        Scalar::Float(v) => serde_json::Value::from(*v),
        Scalar::Bool(v) => serde_json::Value::Bool(*v),
    }
}

/// Evaluates a boolean expression tree under `options.strict_chain_precedence`:
/// the reference behavior (`true`, the default) chains `&&`/`||` with equal,
/// short-circuit, left-to-right precedence. The conventional alternative
/// (`false`) gives `&&` tighter binding than `||`, at the cost of evaluating
/// every term in the chain eagerly rather than short-circuiting across it.
fn eval_expr(expr: &Expression, env: &Environment, options: &EngineOptions) -> Result<bool, EvalError> {
    if options.strict_chain_precedence {
        eval_expr_strict(expr, env, options)
    } else {
        eval_expr_conventional(expr, env, options)
    }
}

fn eval_expr_strict(expr: &Expression, env: &Environment, options: &EngineOptions) -> Result<bool, EvalError> {
    let value = eval_expr_term(expr, env, options)?;

    match expr.rel_op {
        None => Ok(value),
        Some(IdentKind::And) => {
            if !value {
                Ok(false)
            } else {
                eval_expr_strict(expr.next.as_ref().expect("relOp implies next"), env, options)
            }
        }
        Some(IdentKind::Or) => {
            if value {
                Ok(true)
            } else {
                eval_expr_strict(expr.next.as_ref().expect("relOp implies next"), env, options)
            }
        }
        _ => unreachable!("only && and || are stored as relOp"),
    }
}

/// Evaluates a single chain link (`sub`/`op`-comparison/bare-bool, with
/// `negate` applied) without following `next`. A parenthesized `sub`
/// recurses through [`eval_expr`] so it honors the caller's precedence mode
/// rather than always reverting to strict chaining.
fn eval_expr_term(expr: &Expression, env: &Environment, options: &EngineOptions) -> Result<bool, EvalError> {
    let mut value = if let Some(sub) = &expr.sub {
        eval_expr(sub, env, options)?
    } else if let Some(op) = expr.op {
        let left = resolve_operand(env, expr.left.as_ref().expect("op implies left"))?;
        let right = resolve_operand(env, expr.right.as_ref().expect("op implies right"))?;
        let right = if expr.right_negate { negate_bool_operand(right)? } else { right };
        compare(&left, op, &right)?
    } else {
        let left = resolve_operand(env, expr.left.as_ref().expect("expression always has a left operand"))?;
        match left {
            Scalar::Bool(b) => b,
            other => return Err(EvalError::NotBoolean { kind: other.kind_name().to_string() }),
        }
    };

    if expr.negate {
        value = !value;
    }
    Ok(value)
}

/// Applies a leading `!` on a comparison's right operand (e.g. `a == !b`):
/// the operand must be a bool, which is then flipped before comparison.
fn negate_bool_operand(operand: Scalar) -> Result<Scalar, EvalError> {
    match operand {
        Scalar::Bool(b) => Ok(Scalar::Bool(!b)),
        other => Err(EvalError::NotBoolean { kind: other.kind_name().to_string() }),
    }
}

/// Flattens the chain into terms joined by relOps, evaluating each term
/// eagerly (sacrificing short-circuiting across the chain — a term that is
/// itself a parenthesized `sub` recurses through [`eval_expr`] under the
/// same conventional options, so it sacrifices it too), then folds with
/// `&&` binding tighter than `||`.
fn eval_expr_conventional(expr: &Expression, env: &Environment, options: &EngineOptions) -> Result<bool, EvalError> {
    let mut terms = vec![eval_expr_term(expr, env, options)?];
    let mut ops = Vec::new();
    let mut cursor = expr;
    while let Some(rel_op) = cursor.rel_op {
        let next = cursor.next.as_ref().expect("relOp implies next");
        terms.push(eval_expr_term(next, env, options)?);
        ops.push(rel_op);
        cursor = next;
    }

    // Fold AND-groups first, then OR across the resulting groups.
    let mut or_groups = vec![terms[0]];
    for (op, term) in ops.into_iter().zip(terms.into_iter().skip(1)) {
        match op {
            IdentKind::And => {
                let last = or_groups.last_mut().expect("seeded with first term");
                *last = *last && term;
            }
            IdentKind::Or => or_groups.push(term),
            _ => unreachable!("only && and || are stored as relOp"),
        }
    }
    Ok(or_groups.into_iter().any(|v| v))
}

fn render_object(obj: &Object, env: &Environment) -> Result<String, EvalError> {
    match &obj.kind {
        ObjKind::Variable(path) => format_value(resolve_variable(env, path)?),
        ObjKind::IntConst(i) => Ok(i.to_string()),
        ObjKind::FloatConst(f) => Ok(format!("{f:.6}")),
        ObjKind::StrConst(s) => Ok(s.clone()),
        ObjKind::ChrConst(c) => Ok(c.to_string()),
        ObjKind::BoolConst(b) => Ok(b.to_string()),
        _ => Err(EvalError::UnsupportedValueType { kind: "non-value object".to_string() }),
    }
}

/// Formats a resolved value for interpolation: strings as-is, integers
/// decimal, floats fixed to six fractional digits (matching the reference
/// implementation's `%f`-style default), bools as `true`/`false`,
/// everything else via JSON serialization.
fn format_value(v: &dyn Value) -> Result<String, EvalError> {
    if let Some(s) = v.to_output_string() {
        return Ok(s);
    }
    match v.kind() {
        ValueKind::String => Ok(v.as_str().unwrap_or_default().to_string()),
        ValueKind::Integer => v.as_int().map(|i| i.to_string()).ok_or_else(|| unsupported(v)),
        ValueKind::Float => v.as_float().map(|f| format!("{f:.6}")).ok_or_else(|| unsupported(v)),
        ValueKind::Bool => v.as_bool().map(|b| b.to_string()).ok_or_else(|| unsupported(v)),
        ValueKind::Sequence | ValueKind::Associative | ValueKind::Record | ValueKind::Other => {
            v.to_json().map(|j| j.to_string()).ok_or_else(|| unsupported(v))
        }
    }
}

fn unsupported(v: &dyn Value) -> EvalError {
    EvalError::UnsupportedValueType { kind: v.kind().to_string() }
}
