use classifier::{IndexLit, ObjKind, Object, Segment, VariablePath};
use value::{Value, ValueKey, ValueKeyKind, ValueKind};

use crate::{EvalError, Environment};

/// A resolved scalar operand, ready for kind-strict comparison or literal
/// interpolation.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Str(_) => "string",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "bool",
        }
    }
}

/// Resolves a variable access path against the environment, stripping
/// indirection after every step.
pub fn resolve_variable<'b>(env: &'b Environment, path: &VariablePath) -> Result<&'b dyn Value, EvalError> {
    let root = env.get(&path.name).ok_or_else(|| EvalError::Unbound { name: path.name.clone() })?;
    let mut current = root.strip();

    for seg in &path.segments {
        current = match seg {
            Segment::Field(name) => resolve_field(current, name)?,
            Segment::Index(lit) => resolve_index(current, lit)?,
        };
        current = current.strip();
    }

    Ok(current)
}

fn resolve_field<'b>(current: &'b dyn Value, name: &str) -> Result<&'b dyn Value, EvalError> {
    // `Other` means indirection-stripping ran out without landing on a
    // concrete value (a null, or a host `Any` that held nothing usable) —
    // distinct from "this is a value of the wrong concrete kind".
    if current.kind() == ValueKind::Other {
        return Err(EvalError::NullIndirection { path: name.to_string() });
    }
    if current.kind() != ValueKind::Record {
        return Err(EvalError::NotRecord { field: name.to_string(), kind: current.kind().to_string() });
    }
    current.field(name).ok_or_else(|| EvalError::NoSuchField { field: name.to_string() })
}

fn resolve_index<'b>(current: &'b dyn Value, lit: &IndexLit) -> Result<&'b dyn Value, EvalError> {
    if current.kind() == ValueKind::Other {
        return Err(EvalError::NullIndirection { path: index_lit_description(lit) });
    }
    match lit {
        IndexLit::Int(i) => {
            let len = current
                .len()
                .ok_or_else(|| EvalError::WrongIndexKind { expected: "integer".to_string(), got: current.kind().to_string() })?;
            let idx = normalize_index(*i, len)?;
            match current.kind() {
                ValueKind::Sequence => current.seq_get(idx),
                ValueKind::Record => current.field_at(idx),
                _ => None,
            }
            .ok_or(EvalError::OutOfBounds { index: *i, len })
        }
        IndexLit::Float(f) => match current.key_kind() {
            Some(ValueKeyKind::Float) => current
                .map_get(&ValueKey::Float(*f))
                .ok_or_else(|| EvalError::NoSuchKey { key: f.to_string() }),
            other => Err(EvalError::WrongIndexKind {
                expected: "float".to_string(),
                got: other.map(|k| k.to_string()).unwrap_or_else(|| current.kind().to_string()),
            }),
        },
        IndexLit::Str(s) => match current.key_kind() {
            Some(ValueKeyKind::String) => current
                .map_get(&ValueKey::Str(s.clone()))
                .ok_or_else(|| EvalError::NoSuchKey { key: s.clone() }),
            other => Err(EvalError::WrongIndexKind {
                expected: "string".to_string(),
                got: other.map(|k| k.to_string()).unwrap_or_else(|| current.kind().to_string()),
            }),
        },
    }
}

fn index_lit_description(lit: &IndexLit) -> String {
    match lit {
        IndexLit::Int(i) => format!("[{i}]"),
        IndexLit::Float(f) => format!("[{f}]"),
        IndexLit::Str(s) => format!("[{s:?}]"),
    }
}

/// Negative-index normalization: `i < 0` maps to `len + i`; the result
/// must land in `0..len`.
pub fn normalize_index(i: i64, len: usize) -> Result<usize, EvalError> {
    let normalized = if i < 0 { i + len as i64 } else { i };
    if normalized < 0 || normalized as usize >= len {
        return Err(EvalError::OutOfBounds { index: i, len });
    }
    Ok(normalized as usize)
}

/// Resolves an object (variable or literal) to a comparable scalar.
pub fn resolve_operand(env: &Environment, obj: &Object) -> Result<Scalar, EvalError> {
    match &obj.kind {
        ObjKind::Variable(path) => scalar_from_value(resolve_variable(env, path)?),
        ObjKind::IntConst(i) => Ok(Scalar::Int(*i)),
        ObjKind::FloatConst(f) => Ok(Scalar::Float(*f)),
        ObjKind::StrConst(s) => Ok(Scalar::Str(s.clone())),
        ObjKind::ChrConst(c) => Ok(Scalar::Str(c.to_string())),
        ObjKind::BoolConst(b) => Ok(Scalar::Bool(*b)),
        _ => Err(EvalError::TypeMismatch { left: "operator".to_string(), right: "operand".to_string() }),
    }
}

fn scalar_from_value(v: &dyn Value) -> Result<Scalar, EvalError> {
    match v.kind() {
        ValueKind::String => Ok(Scalar::Str(v.as_str().unwrap_or_default().to_string())),
        ValueKind::Integer => Ok(Scalar::Int(v.as_int().unwrap_or_default())),
        ValueKind::Float => Ok(Scalar::Float(v.as_float().unwrap_or_default())),
        ValueKind::Bool => Ok(Scalar::Bool(v.as_bool().unwrap_or_default())),
        other => Err(EvalError::TypeMismatch { left: other.to_string(), right: "scalar".to_string() }),
    }
}

/// Snapshots any [`Value`] into an owned JSON tree, for writing loop
/// variables and the switch target into the environment.
pub fn snapshot(v: &dyn Value) -> serde_json::Value {
    if let Some(json) = v.to_json() {
        return json;
    }
    match v.kind() {
        ValueKind::String => v.as_str().map(|s| serde_json::Value::String(s.to_string())).unwrap_or(serde_json::Value::Null),
        ValueKind::Integer => v.as_int().map(|i| serde_json::Value::from(i)).unwrap_or(serde_json::Value::Null),
        ValueKind::Float => v.as_float().map(|f| serde_json::Value::from(f)).unwrap_or(serde_json::Value::Null),
        ValueKind::Bool => v.as_bool().map(serde_json::Value::Bool).unwrap_or(serde_json::Value::Null),
        _ => serde_json::Value::Null,
    }
}

pub fn key_to_json(key: &ValueKey) -> serde_json::Value {
    match key {
        ValueKey::Str(s) => serde_json::Value::String(s.clone()),
        ValueKey::Int(i) => serde_json::Value::from(*i),
        ValueKey::Float(f) => serde_json::Value::from(*f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_index_wraps_negative() {
        assert_eq!(normalize_index(-1, 3).unwrap(), 2);
        assert_eq!(normalize_index(0, 3).unwrap(), 0);
    }

    #[test]
    fn normalize_index_rejects_out_of_bounds() {
        assert!(normalize_index(-4, 3).is_err());
        assert!(normalize_index(3, 3).is_err());
    }

    #[test]
    fn resolve_variable_walks_field_and_index() {
        let target = serde_json::json!({ "T": { "U": [10, 20, 30] } });
        let env = Environment::from_json_object(target);
        let path = VariablePath {
            name: "T".to_string(),
            segments: vec![Segment::Field("U".to_string()), Segment::Index(IndexLit::Int(-1))],
        };
        let resolved = resolve_variable(&env, &path).unwrap();
        assert_eq!(resolved.as_int(), Some(30));
    }
}
