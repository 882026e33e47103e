use classifier::{ObjKind, Object, ParenSide};
use scanner::IdentKind;

use crate::ExpressionParseError;

/// A node of the boolean expression tree. Either `sub` is set (a
/// parenthesized subexpression replaces `left`/`op`/`right`), or `left` is
/// the whole expression (`op`/`right` absent, `left` must be boolean), or
/// `left`/`op`/`right` form a full comparison triple. `rel_op`/`next` chain
/// to a sibling with equal, left-to-right precedence for `&&`/`||`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub negate: bool,
    pub left: Option<Object>,
    pub op: Option<IdentKind>,
    pub right: Option<Object>,
    /// Set when the right operand of `op` was written with a leading `!`
    /// (e.g. `a == !b`); the right operand must resolve to a bool, which is
    /// negated before comparison.
    pub right_negate: bool,
    pub rel_op: Option<IdentKind>,
    pub next: Option<Box<Expression>>,
    pub sub: Option<Box<Expression>>,
}

impl Default for Expression {
    fn default() -> Self {
        Self {
            negate: false,
            left: None,
            op: None,
            right: None,
            right_negate: false,
            rel_op: None,
            next: None,
            sub: None,
        }
    }
}

/// Parses a boolean expression from a classified object stream, starting
/// at `objs[*pos]` and advancing `*pos` past everything consumed.
pub fn parse_expr(objs: &[Object], pos: &mut usize) -> Result<Expression, ExpressionParseError> {
    let mut expr = Expression::default();

    if is_operator(objs.get(*pos), IdentKind::Bang) {
        expr.negate = true;
        *pos += 1;
    }

    if is_paren(objs.get(*pos), ParenSide::Left) {
        *pos += 1;
        let sub = parse_expr(objs, pos)?;
        match objs.get(*pos) {
            Some(Object { kind: ObjKind::Paren(ParenSide::Right), .. }) => {
                *pos += 1;
            }
            other => return Err(ExpressionParseError::UnmatchedParen { line: line_of(other, objs, *pos) }),
        }
        expr.sub = Some(Box::new(sub));
    } else {
        let left = take_operand(objs, pos)?;
        expr.left = Some(left);

        if let Some(op_kind) = comparison_op(objs.get(*pos)) {
            expr.op = Some(op_kind);
            *pos += 1;
            if is_operator(objs.get(*pos), IdentKind::Bang) {
                expr.right_negate = true;
                *pos += 1;
            }
            let right = take_operand(objs, pos)?;
            expr.right = Some(right);
        }
    }

    if let Some(rel_kind) = logical_op(objs.get(*pos)) {
        expr.rel_op = Some(rel_kind);
        *pos += 1;
        let next = parse_expr(objs, pos)?;
        expr.next = Some(Box::new(next));
    }

    Ok(expr)
}

fn take_operand(objs: &[Object], pos: &mut usize) -> Result<Object, ExpressionParseError> {
    match objs.get(*pos) {
        Some(obj) if is_operand_kind(&obj.kind) => {
            *pos += 1;
            Ok(obj.clone())
        }
        other => Err(ExpressionParseError::ExpectedOperand { line: line_of(other, objs, *pos) }),
    }
}

fn is_operand_kind(kind: &ObjKind) -> bool {
    matches!(
        kind,
        ObjKind::Variable(_)
            | ObjKind::IntConst(_)
            | ObjKind::FloatConst(_)
            | ObjKind::StrConst(_)
            | ObjKind::ChrConst(_)
            | ObjKind::BoolConst(_)
    )
}

fn comparison_op(obj: Option<&Object>) -> Option<IdentKind> {
    match obj.map(|o| &o.kind) {
        Some(ObjKind::Operator(k))
            if matches!(
                k,
                IdentKind::Eq | IdentKind::Ne | IdentKind::Lt | IdentKind::Le | IdentKind::Gt | IdentKind::Ge
            ) =>
        {
            Some(*k)
        }
        _ => None,
    }
}

fn logical_op(obj: Option<&Object>) -> Option<IdentKind> {
    match obj.map(|o| &o.kind) {
        Some(ObjKind::Operator(k)) if matches!(k, IdentKind::And | IdentKind::Or) => Some(*k),
        _ => None,
    }
}

fn is_operator(obj: Option<&Object>, want: IdentKind) -> bool {
    matches!(obj.map(|o| &o.kind), Some(ObjKind::Operator(k)) if *k == want)
}

fn is_paren(obj: Option<&Object>, side: ParenSide) -> bool {
    matches!(obj.map(|o| &o.kind), Some(ObjKind::Paren(s)) if *s == side)
}

fn line_of(obj: Option<&Object>, objs: &[Object], pos: usize) -> u32 {
    obj.or_else(|| objs.last())
        .map(|o| o.line())
        .unwrap_or(pos as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(kind: ObjKind) -> Object {
        Object::new(kind, Vec::new())
    }

    #[test]
    fn single_comparison() {
        let objs = vec![bare(ObjKind::IntConst(1)), bare(ObjKind::Operator(IdentKind::Lt)), bare(ObjKind::IntConst(2))];
        let mut pos = 0;
        let expr = parse_expr(&objs, &mut pos).unwrap();
        assert_eq!(pos, objs.len());
        assert_eq!(expr.op, Some(IdentKind::Lt));
        assert!(expr.rel_op.is_none());
    }

    #[test]
    fn chained_and_or_is_left_to_right() {
        // a && b || c
        let objs = vec![
            bare(ObjKind::BoolConst(true)),
            bare(ObjKind::Operator(IdentKind::And)),
            bare(ObjKind::BoolConst(false)),
            bare(ObjKind::Operator(IdentKind::Or)),
            bare(ObjKind::BoolConst(true)),
        ];
        let mut pos = 0;
        let expr = parse_expr(&objs, &mut pos).unwrap();
        assert_eq!(pos, objs.len());
        assert_eq!(expr.rel_op, Some(IdentKind::And));
        let next = expr.next.unwrap();
        assert_eq!(next.rel_op, Some(IdentKind::Or));
    }

    #[test]
    fn leading_bang_sets_negate() {
        let objs = vec![bare(ObjKind::Operator(IdentKind::Bang)), bare(ObjKind::BoolConst(true))];
        let mut pos = 0;
        let expr = parse_expr(&objs, &mut pos).unwrap();
        assert!(expr.negate);
    }

    #[test]
    fn parenthesized_subexpression() {
        let objs = vec![
            bare(ObjKind::Paren(ParenSide::Left)),
            bare(ObjKind::BoolConst(true)),
            bare(ObjKind::Paren(ParenSide::Right)),
        ];
        let mut pos = 0;
        let expr = parse_expr(&objs, &mut pos).unwrap();
        assert_eq!(pos, objs.len());
        assert!(expr.sub.is_some());
        assert!(expr.left.is_none());
    }

    #[test]
    fn unmatched_paren_errors() {
        let objs = vec![bare(ObjKind::Paren(ParenSide::Left)), bare(ObjKind::BoolConst(true))];
        let mut pos = 0;
        let err = parse_expr(&objs, &mut pos).unwrap_err();
        assert!(matches!(err, ExpressionParseError::UnmatchedParen { .. }));
    }

    #[test]
    fn bang_before_right_operand_is_accepted() {
        // a == !b
        use classifier::VariablePath;

        let var = |name: &str| VariablePath { name: name.to_string(), segments: Vec::new() };
        let objs = vec![
            bare(ObjKind::Variable(var("a"))),
            bare(ObjKind::Operator(IdentKind::Eq)),
            bare(ObjKind::Operator(IdentKind::Bang)),
            bare(ObjKind::Variable(var("b"))),
        ];
        let mut pos = 0;
        let expr = parse_expr(&objs, &mut pos).unwrap();
        assert_eq!(pos, objs.len());
        assert!(expr.right_negate);
        assert!(expr.right.is_some());
    }

    #[test]
    fn missing_operand_errors() {
        let objs = vec![bare(ObjKind::Operator(IdentKind::Eq))];
        let mut pos = 0;
        let err = parse_expr(&objs, &mut pos).unwrap_err();
        assert!(matches!(err, ExpressionParseError::ExpectedOperand { .. }));
    }
}
