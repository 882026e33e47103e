use scanner::IdentKind;

use crate::resolve::Scalar;
use crate::EvalError;

/// Kind-strict comparison: both operands must be the same scalar kind.
/// Float comparisons use IEEE-754 semantics (`NaN` is unequal to everything,
/// including itself) via `f64`'s own `PartialOrd`/`PartialEq`.
pub fn compare(left: &Scalar, op: IdentKind, right: &Scalar) -> Result<bool, EvalError> {
    match (left, right) {
        (Scalar::Str(a), Scalar::Str(b)) => compare_ord(op, a, b),
        (Scalar::Int(a), Scalar::Int(b)) => compare_ord(op, a, b),
        (Scalar::Float(a), Scalar::Float(b)) => compare_ord(op, a, b),
        (Scalar::Bool(a), Scalar::Bool(b)) => match op {
            IdentKind::Eq => Ok(a == b),
            IdentKind::Ne => Ok(a != b),
            _ => Err(EvalError::UnsupportedOperator { op: format!("{op}"), kind: "bool".to_string() }),
        },
        _ => Err(EvalError::TypeMismatch { left: left.kind_name().to_string(), right: right.kind_name().to_string() }),
    }
}

fn compare_ord<T: PartialOrd>(op: IdentKind, a: T, b: T) -> Result<bool, EvalError> {
    Ok(match op {
        IdentKind::Eq => a == b,
        IdentKind::Ne => a != b,
        IdentKind::Lt => a < b,
        IdentKind::Le => a <= b,
        IdentKind::Gt => a > b,
        IdentKind::Ge => a >= b,
        other => return Err(EvalError::UnsupportedOperator { op: format!("{other}"), kind: "value".to_string() }),
    })
}
