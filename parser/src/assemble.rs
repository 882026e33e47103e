use classifier::{classify, ObjKind, Object};
use logger::{LogType, Logger};
use scanner::{IdentKind, Statement, StmtKind};

use crate::{AssembleError, Block, ExpressionParseError, IfCase, SwitchCase};
use crate::expression::parse_expr;

const STAGE: &str = "parser";

/// Assembles a flat statement stream into a block tree, parsing each
/// conditional construct's expression along the way.
pub fn assemble(statements: &[Statement]) -> Result<Vec<Block>, AssembleError> {
    let mut pos = 0usize;
    let blocks = assemble_body(statements, &mut pos, |_| false)?;
    if pos != statements.len() {
        let stmt = &statements[pos];
        return Err(AssembleError::UnexpectedStatement { src: stmt.src.clone(), line: stmt.line });
    }
    Logger::log(LogType::Trace(&format!("assembled {} top-level blocks", blocks.len())), STAGE);
    Ok(blocks)
}

fn assemble_body(
    stmts: &[Statement],
    pos: &mut usize,
    stop: fn(StmtKind) -> bool,
) -> Result<Vec<Block>, AssembleError> {
    let mut blocks = Vec::new();
    while *pos < stmts.len() {
        if stop(stmts[*pos].kind) {
            break;
        }
        blocks.push(build_block(stmts, pos)?);
    }
    Ok(blocks)
}

fn build_block(stmts: &[Statement], pos: &mut usize) -> Result<Block, AssembleError> {
    let stmt = &stmts[*pos];
    match stmt.kind {
        StmtKind::Template => {
            *pos += 1;
            Ok(Block::Template { text: stmt.src.clone() })
        }
        StmtKind::Value => {
            let objects = classify(&stmt.idents)?;
            if objects.len() != 1 {
                return Err(AssembleError::MalformedValue { line: stmt.line });
            }
            *pos += 1;
            Ok(Block::Value { expr: objects.into_iter().next().unwrap() })
        }
        StmtKind::If => build_if_block(stmts, pos),
        StmtKind::For => build_for_block(stmts, pos),
        StmtKind::Switch => build_switch_block(stmts, pos),
        _ => Err(AssembleError::UnexpectedStatement { src: stmt.src.clone(), line: stmt.line }),
    }
}

fn parse_condition(stmt: &Statement) -> Result<crate::Expression, AssembleError> {
    let objects = classify(stmt.rest())?;
    let mut epos = 0usize;
    let cond = parse_expr(&objects, &mut epos)?;
    if epos != objects.len() {
        return Err(ExpressionParseError::TrailingTokens { line: stmt.line }.into());
    }
    Ok(cond)
}

fn build_if_block(stmts: &[Statement], pos: &mut usize) -> Result<Block, AssembleError> {
    let open_line = stmts[*pos].line;
    let mut branches = Vec::new();

    let cond = parse_condition(&stmts[*pos])?;
    *pos += 1;
    let body = assemble_body(stmts, pos, |k| {
        matches!(k, StmtKind::Elseif | StmtKind::Else | StmtKind::Endif)
    })?;
    branches.push(IfCase { cond: Some(cond), body });

    let mut seen_else = false;
    loop {
        match stmts.get(*pos).map(|s| s.kind) {
            Some(StmtKind::Elseif) => {
                if seen_else {
                    return Err(AssembleError::ElseNotLast { line: stmts[*pos].line });
                }
                let cond = parse_condition(&stmts[*pos])?;
                *pos += 1;
                let body = assemble_body(stmts, pos, |k| {
                    matches!(k, StmtKind::Elseif | StmtKind::Else | StmtKind::Endif)
                })?;
                branches.push(IfCase { cond: Some(cond), body });
            }
            Some(StmtKind::Else) => {
                seen_else = true;
                *pos += 1;
                let body = assemble_body(stmts, pos, |k| matches!(k, StmtKind::Endif))?;
                branches.push(IfCase { cond: None, body });
            }
            Some(StmtKind::Endif) => {
                *pos += 1;
                break;
            }
            _ => return Err(AssembleError::MissingEndif { line: open_line }),
        }
    }

    Ok(Block::If { branches })
}

fn build_for_block(stmts: &[Statement], pos: &mut usize) -> Result<Block, AssembleError> {
    let open_line = stmts[*pos].line;
    let objects = classify(stmts[*pos].rest())?;
    let (index_name, value_name, iter) = parse_for_header(&objects, open_line)?;
    *pos += 1;

    let body = assemble_body(stmts, pos, |k| matches!(k, StmtKind::Endfor))?;
    match stmts.get(*pos).map(|s| s.kind) {
        Some(StmtKind::Endfor) => *pos += 1,
        _ => return Err(AssembleError::MissingEndfor { line: open_line }),
    }

    Ok(Block::For { index_name, value_name, iter, body })
}

fn parse_for_header(objects: &[Object], line: u32) -> Result<(String, String, Object), AssembleError> {
    let bad = AssembleError::MalformedForHeader { line };
    match objects {
        // Single-variable form binds the iterated element itself (matching
        // the reference implementation's one-variable `for` loop); the
        // index/key is not bound.
        [a, Object { kind: ObjKind::Keyword(IdentKind::In), .. }, target] => {
            let val = var_name(a).ok_or_else(|| bad.clone())?;
            if !matches!(target.kind, ObjKind::Variable(_)) {
                return Err(bad);
            }
            Ok((String::new(), val, target.clone()))
        }
        [a, Object { kind: ObjKind::Punctuator, .. }, b, Object { kind: ObjKind::Keyword(IdentKind::In), .. }, target] => {
            let idx = var_name(a).ok_or_else(|| bad.clone())?;
            let val = var_name(b).ok_or_else(|| bad.clone())?;
            if !matches!(target.kind, ObjKind::Variable(_)) {
                return Err(bad);
            }
            Ok((idx, val, target.clone()))
        }
        _ => Err(bad),
    }
}

fn var_name(obj: &Object) -> Option<String> {
    match &obj.kind {
        ObjKind::Variable(v) if v.segments.is_empty() => Some(v.name.clone()),
        _ => None,
    }
}

fn build_switch_block(stmts: &[Statement], pos: &mut usize) -> Result<Block, AssembleError> {
    let open_line = stmts[*pos].line;
    let objects = classify(stmts[*pos].rest())?;
    if objects.len() != 1 || !matches!(objects[0].kind, ObjKind::Variable(_)) {
        return Err(AssembleError::MalformedSwitchTarget { line: open_line });
    }
    let target = objects.into_iter().next().unwrap();
    *pos += 1;

    // Text (and bare value interpolation) between `switch` and the first
    // `case`/`default` cannot execute and is discarded.
    while let Some(kind) = stmts.get(*pos).map(|s| s.kind) {
        match kind {
            StmtKind::Case | StmtKind::Default | StmtKind::Endswitch => break,
            StmtKind::Template | StmtKind::Value => *pos += 1,
            _ => {
                let stmt = &stmts[*pos];
                return Err(AssembleError::UnexpectedStatement { src: stmt.src.clone(), line: stmt.line });
            }
        }
    }

    let mut cases = Vec::new();
    let mut seen_default = false;
    loop {
        match stmts.get(*pos).map(|s| s.kind) {
            Some(StmtKind::Case) => {
                if seen_default {
                    return Err(AssembleError::DefaultNotLast { line: stmts[*pos].line });
                }
                let case_objects = classify(stmts[*pos].rest())?;
                let values = split_case_values(&case_objects);
                *pos += 1;
                let body = assemble_body(stmts, pos, |k| {
                    matches!(k, StmtKind::Case | StmtKind::Default | StmtKind::Endswitch)
                })?;
                cases.push(SwitchCase { values: Some(values), body });
            }
            Some(StmtKind::Default) => {
                if seen_default {
                    return Err(AssembleError::DefaultNotLast { line: stmts[*pos].line });
                }
                seen_default = true;
                *pos += 1;
                let body = assemble_body(stmts, pos, |k| {
                    matches!(k, StmtKind::Case | StmtKind::Default | StmtKind::Endswitch)
                })?;
                cases.push(SwitchCase { values: None, body });
            }
            Some(StmtKind::Endswitch) => {
                *pos += 1;
                break;
            }
            _ => return Err(AssembleError::MissingEndswitch { line: open_line }),
        }
    }

    Ok(Block::Switch { target, cases })
}

fn split_case_values(objects: &[Object]) -> Vec<Object> {
    objects.iter().filter(|o| !matches!(o.kind, ObjKind::Punctuator)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble_src(src: &str) -> Result<Vec<Block>, AssembleError> {
        let statements = scanner::scan(src).unwrap();
        assemble(&statements)
    }

    #[test]
    fn switch_with_single_default_assembles() {
        let blocks = assemble_src("{{ switch x }}{{ case 1 }}a{{ default }}b{{ endswitch }}").unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn switch_rejects_second_default() {
        let err = assemble_src("{{ switch x }}{{ default }}a{{ default }}b{{ endswitch }}").unwrap_err();
        assert!(matches!(err, AssembleError::DefaultNotLast { .. }));
    }

    #[test]
    fn switch_rejects_case_after_default() {
        let err = assemble_src("{{ switch x }}{{ default }}a{{ case 1 }}b{{ endswitch }}").unwrap_err();
        assert!(matches!(err, AssembleError::DefaultNotLast { .. }));
    }
}
