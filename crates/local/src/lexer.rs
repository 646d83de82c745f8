use stratus_core::{SYNTAX_ERROR, ServerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Word(String),
    QuotedIdent(String),
    StringLiteral(String),
    Number(u64),
    Dot,
    Equals,
    Semicolon,
}

pub(crate) fn tokenize(sql: &str) -> Result<Vec<Token>, ServerError> {
    let mut tokens = Vec::new();
    let mut chars = sql.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        match ch {
            ch if ch.is_whitespace() => {
                chars.next();
            }
            '-' if sql[offset..].starts_with("--") => {
                for (_, ch) in chars.by_ref() {
                    if ch == '\n' {
                        break;
                    }
                }
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((_, '"')) if chars.peek().map(|&(_, ch)| ch) == Some('"') => {
                            chars.next();
                            value.push('"');
                        }
                        Some((_, '"')) => break,
                        Some((_, ch)) => value.push(ch),
                        None => return Err(syntax_error(offset, "unterminated quoted identifier")),
                    }
                }
                tokens.push(Token::QuotedIdent(value));
            }
            '\'' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some((_, '\\')) => match chars.next() {
                            Some((_, escaped)) => value.push(escaped),
                            None => return Err(syntax_error(offset, "unterminated string literal")),
                        },
                        Some((_, '\'')) if chars.peek().map(|&(_, ch)| ch) == Some('\'') => {
                            chars.next();
                            value.push('\'');
                        }
                        Some((_, '\'')) => break,
                        Some((_, ch)) => value.push(ch),
                        None => return Err(syntax_error(offset, "unterminated string literal")),
                    }
                }
                tokens.push(Token::StringLiteral(value));
            }
            '0'..='9' => {
                let mut digits = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !ch.is_ascii_digit() {
                        break;
                    }
                    digits.push(ch);
                    chars.next();
                }
                let number = digits
                    .parse()
                    .map_err(|_| syntax_error(offset, "number out of range"))?;
                tokens.push(Token::Number(number));
            }
            ch if ch.is_alphabetic() || ch == '_' => {
                let mut word = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if !(ch.is_alphanumeric() || ch == '_' || ch == '$') {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Equals);
            }
            ';' => {
                chars.next();
                tokens.push(Token::Semicolon);
            }
            other => {
                return Err(syntax_error(
                    offset,
                    &format!("unexpected character '{other}'"),
                ));
            }
        }
    }

    Ok(tokens)
}

pub(crate) fn syntax_error(offset: usize, message: &str) -> ServerError {
    ServerError::new(
        SYNTAX_ERROR,
        format!("SQL compilation error: syntax error at position {offset}: {message}"),
    )
}

#[cfg(test)]
mod tests {
    use super::{Token, tokenize};

    #[test]
    fn tokenizes_quoted_identifiers_and_escaped_literals() {
        let tokens = tokenize(r#"SHOW TAGS LIKE 'it\'s' IN SCHEMA "a""b".c -- trailing"#)
            .expect("tokenize");

        assert_eq!(
            tokens,
            vec![
                Token::Word("SHOW".to_string()),
                Token::Word("TAGS".to_string()),
                Token::Word("LIKE".to_string()),
                Token::StringLiteral("it's".to_string()),
                Token::Word("IN".to_string()),
                Token::Word("SCHEMA".to_string()),
                Token::QuotedIdent("a\"b".to_string()),
                Token::Dot,
                Token::Word("c".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_literal_is_a_syntax_error() {
        let error = tokenize("SHOW DATABASES LIKE 'oops").expect_err("must fail");
        assert_eq!(error.code, stratus_core::SYNTAX_ERROR);
    }
}
