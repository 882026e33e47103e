use logger::{LogType, Logger};
use scanner::{IdentKind, Identifier};

use crate::{ClassifyError, IndexLit, ObjKind, Object, ParenSide, Segment, VariablePath};

const STAGE: &str = "classifier";

/// Classifies a directive's identifier stream into a list of [`Object`]s.
pub fn classify(idents: &[Identifier]) -> Result<Vec<Object>, ClassifyError> {
    let mut objects = Vec::new();
    let mut i = 0usize;

    while i < idents.len() {
        let ident = &idents[i];
        match ident.kind {
            IdentKind::Var => {
                let (obj, consumed) = classify_variable(idents, i)?;
                objects.push(obj);
                i += consumed;
            }
            IdentKind::Num => {
                let (obj, consumed) = classify_number(idents, i)?;
                objects.push(obj);
                i += consumed;
            }
            IdentKind::Str => {
                objects.push(Object::new(ObjKind::StrConst(ident.name.clone()), vec![ident.clone()]));
                i += 1;
            }
            IdentKind::Chr => {
                let mut chars = ident.name.chars();
                let c = chars.next().ok_or(ClassifyError::InvalidCharLiteral {
                    lexeme: ident.name.clone(),
                    line: ident.line,
                })?;
                if chars.next().is_some() {
                    return Err(ClassifyError::InvalidCharLiteral { lexeme: ident.name.clone(), line: ident.line });
                }
                objects.push(Object::new(ObjKind::ChrConst(c), vec![ident.clone()]));
                i += 1;
            }
            IdentKind::Bool => {
                objects.push(Object::new(ObjKind::BoolConst(ident.name == "true"), vec![ident.clone()]));
                i += 1;
            }
            IdentKind::Dot => {
                return Err(ClassifyError::InvalidDot { line: ident.line });
            }
            IdentKind::Comma => {
                objects.push(Object::new(ObjKind::Punctuator, vec![ident.clone()]));
                i += 1;
            }
            IdentKind::LParen => {
                objects.push(Object::new(ObjKind::Paren(ParenSide::Left), vec![ident.clone()]));
                i += 1;
            }
            IdentKind::RParen => {
                objects.push(Object::new(ObjKind::Paren(ParenSide::Right), vec![ident.clone()]));
                i += 1;
            }
            IdentKind::LBracket => {
                return Err(ClassifyError::UnexpectedBracket { line: ident.line });
            }
            IdentKind::RBracket => {
                return Err(ClassifyError::UnmatchedRBracket { line: ident.line });
            }
            IdentKind::LBrace | IdentKind::RBrace => {
                return Err(ClassifyError::UnexpectedToken { ident: ident.clone(), line: ident.line });
            }
            k if k.is_operator() => {
                objects.push(Object::new(ObjKind::Operator(k), vec![ident.clone()]));
                i += 1;
            }
            k if k.is_keyword() || k == IdentKind::In => {
                objects.push(Object::new(ObjKind::Keyword(k), vec![ident.clone()]));
                i += 1;
            }
            _ => unreachable!("every IdentKind variant is handled above"),
        }
    }

    validate_sequence(&objects)?;

    Logger::log(LogType::Trace(&format!("classified {} objects", objects.len())), STAGE);
    Ok(objects)
}

fn classify_variable(idents: &[Identifier], start: usize) -> Result<(Object, usize), ClassifyError> {
    let name = idents[start].name.clone();
    let mut i = start + 1;
    let mut segments = Vec::new();

    loop {
        match idents.get(i).map(|id| id.kind) {
            Some(IdentKind::Dot) => {
                let dot_line = idents[i].line;
                match idents.get(i + 1) {
                    Some(field) if field.kind == IdentKind::Var => {
                        segments.push(Segment::Field(field.name.clone()));
                        i += 2;
                    }
                    _ => return Err(ClassifyError::InvalidDot { line: dot_line }),
                }
            }
            Some(IdentKind::LBracket) => {
                let bracket_line = idents[i].line;
                let (lit, consumed) = classify_index_lit(idents, i + 1, bracket_line)?;
                i += 1 + consumed;
                match idents.get(i).map(|id| id.kind) {
                    Some(IdentKind::RBracket) => i += 1,
                    _ => return Err(ClassifyError::UnmatchedBracket { line: bracket_line }),
                }
                segments.push(Segment::Index(lit));
            }
            _ => break,
        }
    }

    let consumed = i - start;
    let obj = Object::new(ObjKind::Variable(VariablePath { name, segments }), idents[start..i].to_vec());
    Ok((obj, consumed))
}

fn classify_index_lit(idents: &[Identifier], at: usize, line: u32) -> Result<(IndexLit, usize), ClassifyError> {
    match idents.get(at).map(|id| id.kind) {
        Some(IdentKind::Num) => {
            if idents.get(at + 1).map(|id| id.kind) == Some(IdentKind::Dot)
                && idents.get(at + 2).map(|id| id.kind) == Some(IdentKind::Num)
            {
                let combined = format!("{}.{}", idents[at].name, idents[at + 2].name);
                let val: f64 = combined
                    .parse()
                    .map_err(|_| ClassifyError::InvalidNumber { lexeme: combined.clone(), line })?;
                Ok((IndexLit::Float(val), 3))
            } else {
                let val: i64 = idents[at]
                    .name
                    .parse()
                    .map_err(|_| ClassifyError::InvalidNumber { lexeme: idents[at].name.clone(), line })?;
                Ok((IndexLit::Int(val), 1))
            }
        }
        Some(IdentKind::Str) => Ok((IndexLit::Str(idents[at].name.clone()), 1)),
        _ => Err(ClassifyError::InvalidIndex { line }),
    }
}

fn classify_number(idents: &[Identifier], start: usize) -> Result<(Object, usize), ClassifyError> {
    let ident = &idents[start];
    if idents.get(start + 1).map(|id| id.kind) == Some(IdentKind::Dot)
        && idents.get(start + 2).map(|id| id.kind) == Some(IdentKind::Num)
    {
        let combined = format!("{}.{}", ident.name, idents[start + 2].name);
        let val: f64 = combined
            .parse()
            .map_err(|_| ClassifyError::InvalidNumber { lexeme: combined.clone(), line: ident.line })?;
        let obj = Object::new(ObjKind::FloatConst(val), idents[start..start + 3].to_vec());
        Ok((obj, 3))
    } else {
        let val: i64 = ident
            .name
            .parse()
            .map_err(|_| ClassifyError::InvalidNumber { lexeme: ident.name.clone(), line: ident.line })?;
        let obj = Object::new(ObjKind::IntConst(val), vec![ident.clone()]);
        Ok((obj, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanner::scan;

    fn idents_for(directive: &str) -> Vec<Identifier> {
        let stmts = scan(directive).unwrap();
        stmts.into_iter().next().unwrap().idents
    }

    #[test]
    fn classifies_field_and_index_chain() {
        let idents = idents_for("{{ T.U[1].Value }}");
        let objs = classify(&idents).unwrap();
        assert_eq!(objs.len(), 1);
        let ObjKind::Variable(path) = &objs[0].kind else { panic!("expected a variable") };
        assert_eq!(path.name, "T");
        assert_eq!(path.segments, vec![Segment::Field("U".to_string()), Segment::Index(IndexLit::Int(1)), Segment::Field("Value".to_string())]);
    }

    #[test]
    fn fuses_dotted_number_into_float() {
        let idents = idents_for("{{ 1.230000 }}");
        let objs = classify(&idents).unwrap();
        assert_eq!(objs.len(), 1);
        assert!(matches!(objs[0].kind, ObjKind::FloatConst(f) if (f - 1.23).abs() < 1e-9));
    }

    #[test]
    fn rejects_leading_comma() {
        let idents = idents_for("{{ switch , a }}");
        let err = classify(&idents[1..]).unwrap_err();
        assert!(matches!(err, ClassifyError::LeadingComma { .. }));
    }

    #[test]
    fn rejects_consecutive_operators_except_bang() {
        let idents = idents_for("{{ if a == == b }}");
        let err = classify(&idents[1..]).unwrap_err();
        assert!(matches!(err, ClassifyError::ConsecutiveOperators { .. }));
    }

    #[test]
    fn allows_bang_after_operator() {
        let idents = idents_for("{{ if a == !b }}");
        let objs = classify(&idents[1..]).unwrap();
        assert_eq!(objs.len(), 4);
    }

    #[test]
    fn unmatched_bracket_errors() {
        let idents = idents_for("{{ xs[1 }}");
        let err = classify(&idents).unwrap_err();
        assert!(matches!(err, ClassifyError::UnmatchedBracket { .. }));
    }
}

fn validate_sequence(objects: &[Object]) -> Result<(), ClassifyError> {
    if let Some(first) = objects.first() {
        if matches!(first.kind, ObjKind::Punctuator) {
            return Err(ClassifyError::LeadingComma { line: first.line() });
        }
    }

    for pair in objects.windows(2) {
        if let (ObjKind::Operator(_), ObjKind::Operator(next_kind)) = (&pair[0].kind, &pair[1].kind) {
            if *next_kind != IdentKind::Bang {
                return Err(ClassifyError::ConsecutiveOperators { line: pair[1].line() });
            }
        }
    }

    Ok(())
}
