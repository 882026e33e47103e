use logger::{LogType, Logger};

use crate::{Identifier, IdentKind, ScanError, Statement, StmtKind};

const STAGE: &str = "scanner";

/// Splits `source` into statements and tokenizes each directive's body.
///
/// Combines stage 1 (statement splitting on `{{ ... }}`) and stage 2
/// (directive-body tokenizing) in one pass, mirroring the reference
/// implementation's `split` followed immediately by `splitBlock` per code
/// unit.
pub fn scan(source: &str) -> Result<Vec<Statement>, ScanError> {
    let bytes = source.as_bytes();
    let mut statements = Vec::new();

    let mut i = 0usize;
    let mut line = 1u32;
    let mut text_start = 0usize;
    let mut text_line = 1u32;

    while i < bytes.len() {
        if bytes[i] == b'{' && bytes.get(i + 1) == Some(&b'{') {
            if i > text_start {
                statements.push(Statement::template(&source[text_start..i], text_line));
            }

            let dir_start = i;
            let dir_line = line;
            i += 2;
            let body_start = i;
            let mut closed = false;

            while i < bytes.len() {
                if bytes[i] == b'}' && bytes.get(i + 1) == Some(&b'}') {
                    closed = true;
                    break;
                }
                if bytes[i] == b'\n' {
                    line += 1;
                }
                i += 1;
            }

            if !closed {
                return Err(ScanError::UnterminatedDirective {
                    src: source[dir_start..].to_string(),
                    line: dir_line,
                });
            }

            let body = &source[body_start..i];
            i += 2;

            let idents = tokenize_body(body, dir_line)?;
            let kind = classify_stmt_kind(&idents);
            statements.push(Statement::directive(kind, &source[dir_start..i], idents, dir_line));

            text_start = i;
            text_line = line;
        } else {
            if bytes[i] == b'\n' {
                line += 1;
            }
            i += 1;
        }
    }

    if text_start < bytes.len() {
        statements.push(Statement::template(&source[text_start..], text_line));
    }

    Logger::log(LogType::Trace(&format!("scanned {} statements", statements.len())), STAGE);
    Ok(statements)
}

fn classify_stmt_kind(idents: &[Identifier]) -> StmtKind {
    match idents.first().map(|i| i.kind) {
        Some(IdentKind::If) => StmtKind::If,
        Some(IdentKind::Elseif) => StmtKind::Elseif,
        Some(IdentKind::Else) => StmtKind::Else,
        Some(IdentKind::Endif) => StmtKind::Endif,
        Some(IdentKind::For) => StmtKind::For,
        Some(IdentKind::Endfor) => StmtKind::Endfor,
        Some(IdentKind::Switch) => StmtKind::Switch,
        Some(IdentKind::Case) => StmtKind::Case,
        Some(IdentKind::Default) => StmtKind::Default,
        Some(IdentKind::Endswitch) => StmtKind::Endswitch,
        _ => StmtKind::Value,
    }
}

fn tokenize_body(body: &str, line: u32) -> Result<Vec<Identifier>, ScanError> {
    let bytes = body.as_bytes();
    let mut idents = Vec::new();
    let mut i = 0usize;
    let mut column = 1u32;

    macro_rules! push {
        ($kind:expr, $name:expr, $col:expr) => {
            idents.push(Identifier::new($kind, $name, line, $col))
        };
    }

    while i < bytes.len() {
        let c = bytes[i] as char;
        let start_col = column;

        match c {
            ' ' | '\t' | '\r' | '\n' => {
                i += 1;
                column += 1;
            }
            '"' | '`' => {
                let quote = bytes[i];
                let content_start = i + 1;
                let mut j = content_start;
                while j < bytes.len() && bytes[j] != quote {
                    j += 1;
                }
                if j >= bytes.len() {
                    return Err(ScanError::InvalidToken {
                        token: body[i..].to_string(),
                        line,
                        column: start_col,
                    });
                }
                push!(IdentKind::Str, &body[content_start..j], start_col);
                column += (j + 1 - i) as u32;
                i = j + 1;
            }
            '\'' => {
                let content_start = i + 1;
                let mut j = content_start;
                while j < bytes.len() && bytes[j] != b'\'' {
                    j += 1;
                }
                if j >= bytes.len() {
                    return Err(ScanError::InvalidToken {
                        token: body[i..].to_string(),
                        line,
                        column: start_col,
                    });
                }
                push!(IdentKind::Chr, &body[content_start..j], start_col);
                column += (j + 1 - i) as u32;
                i = j + 1;
            }
            '.' => {
                push!(IdentKind::Dot, ".", start_col);
                i += 1;
                column += 1;
            }
            ',' => {
                push!(IdentKind::Comma, ",", start_col);
                i += 1;
                column += 1;
            }
            '(' => {
                push!(IdentKind::LParen, "(", start_col);
                i += 1;
                column += 1;
            }
            ')' => {
                push!(IdentKind::RParen, ")", start_col);
                i += 1;
                column += 1;
            }
            '[' => {
                push!(IdentKind::LBracket, "[", start_col);
                i += 1;
                column += 1;
            }
            ']' => {
                push!(IdentKind::RBracket, "]", start_col);
                i += 1;
                column += 1;
            }
            '{' => {
                push!(IdentKind::LBrace, "{", start_col);
                i += 1;
                column += 1;
            }
            '}' => {
                push!(IdentKind::RBrace, "}", start_col);
                i += 1;
                column += 1;
            }
            '=' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    push!(IdentKind::Eq, "==", start_col);
                    i += 2;
                    column += 2;
                } else {
                    return Err(ScanError::InvalidToken { token: "=".to_string(), line, column: start_col });
                }
            }
            '!' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    push!(IdentKind::Ne, "!=", start_col);
                    i += 2;
                    column += 2;
                } else {
                    push!(IdentKind::Bang, "!", start_col);
                    i += 1;
                    column += 1;
                }
            }
            '<' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    push!(IdentKind::Le, "<=", start_col);
                    i += 2;
                    column += 2;
                } else {
                    push!(IdentKind::Lt, "<", start_col);
                    i += 1;
                    column += 1;
                }
            }
            '>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    push!(IdentKind::Ge, ">=", start_col);
                    i += 2;
                    column += 2;
                } else {
                    push!(IdentKind::Gt, ">", start_col);
                    i += 1;
                    column += 1;
                }
            }
            '&' => {
                if bytes.get(i + 1) == Some(&b'&') {
                    push!(IdentKind::And, "&&", start_col);
                    i += 2;
                    column += 2;
                } else {
                    return Err(ScanError::InvalidToken { token: "&".to_string(), line, column: start_col });
                }
            }
            '|' => {
                if bytes.get(i + 1) == Some(&b'|') {
                    push!(IdentKind::Or, "||", start_col);
                    i += 2;
                    column += 2;
                } else {
                    return Err(ScanError::InvalidToken { token: "|".to_string(), line, column: start_col });
                }
            }
            '-' if bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit()) => {
                let start = i;
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                push!(IdentKind::Num, &body[start..i], start_col);
                column += (i - start) as u32;
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                push!(IdentKind::Num, &body[start..i], start_col);
                column += (i - start) as u32;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                let word = &body[start..i];
                push!(resolve_word(word), word, start_col);
                column += (i - start) as u32;
            }
            _ => {
                return Err(ScanError::InvalidToken {
                    token: c.to_string(),
                    line,
                    column: start_col,
                });
            }
        }
    }

    Ok(idents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_literal_and_directive() {
        let stmts = scan("hello {{ name }} world").unwrap();
        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[0].kind, StmtKind::Template);
        assert_eq!(stmts[0].src, "hello ");
        assert_eq!(stmts[1].kind, StmtKind::Value);
        assert_eq!(stmts[2].src, " world");
    }

    #[test]
    fn unterminated_directive_errors() {
        let err = scan("hello {{ if x").unwrap_err();
        assert!(matches!(err, ScanError::UnterminatedDirective { .. }));
    }

    #[test]
    fn tokenizes_operators_greedily() {
        let idents = tokenize_body("a == b != c <= d", 1).unwrap();
        let kinds: Vec<IdentKind> = idents.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                IdentKind::Var,
                IdentKind::Eq,
                IdentKind::Var,
                IdentKind::Ne,
                IdentKind::Var,
                IdentKind::Le,
                IdentKind::Var,
            ]
        );
    }

    #[test]
    fn negative_number_is_a_single_token() {
        let idents = tokenize_body("xs[-1]", 1).unwrap();
        let nums: Vec<&str> = idents.iter().filter(|i| i.kind == IdentKind::Num).map(|i| i.name.as_str()).collect();
        assert_eq!(nums, vec!["-1"]);
    }

    #[test]
    fn multiline_directive_tracks_line_numbers() {
        let stmts = scan("{{ if a }}\n{{ else }}").unwrap();
        let directives: Vec<&Statement> = stmts.iter().filter(|s| s.kind != StmtKind::Template).collect();
        assert_eq!(directives[0].line, 1);
        assert_eq!(directives[1].line, 2);
    }
}

fn resolve_word(word: &str) -> IdentKind {
    match word {
        "if" => IdentKind::If,
        "elseif" => IdentKind::Elseif,
        "else" => IdentKind::Else,
        "endif" => IdentKind::Endif,
        "for" => IdentKind::For,
        "in" => IdentKind::In,
        "endfor" => IdentKind::Endfor,
        "switch" => IdentKind::Switch,
        "case" => IdentKind::Case,
        "default" => IdentKind::Default,
        "endswitch" => IdentKind::Endswitch,
        "true" | "false" => IdentKind::Bool,
        _ => IdentKind::Var,
    }
}
