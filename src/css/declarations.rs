//! Inline declaration parser: `"color: red; width: 120px"` into ordered pairs.
//!
//! Uses the logos-based tokenizer from [`crate::css::tokenizer`]. Values are
//! kept verbatim as the source slice between the colon and the next semicolon,
//! so shorthand values like `1px solid #ccc` survive untouched.

use crate::css::tokenizer::{tokenize, Token};

/// Errors from declaration parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleParseError {
    #[error("unexpected input at byte {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("declaration '{property}' has no value")]
    EmptyValue { property: String },
}

/// Parse a declaration list into `(property, value)` pairs in source order.
///
/// Stray semicolons are ignored. A later declaration of the same property is
/// returned as a separate pair; merging is up to the caller.
pub fn parse_declarations(input: &str) -> Result<Vec<(String, String)>, StyleParseError> {
    let tokens = tokenize(input).map_err(|span| StyleParseError::UnexpectedToken {
        position: span.start,
        message: format!("cannot read '{}'", &input[span]),
    })?;
    let mut result = Vec::new();
    let mut cursor = 0;

    while cursor < tokens.len() {
        let head = &tokens[cursor];
        match head.token {
            Token::Semicolon => {
                cursor += 1;
                continue;
            }
            Token::Ident => {}
            _ => {
                return Err(StyleParseError::UnexpectedToken {
                    position: head.span.start,
                    message: format!("expected property name, got {:?}", head.token),
                })
            }
        }
        let property = input[head.span.clone()].to_string();
        cursor += 1;

        match tokens.get(cursor) {
            Some(tok) if tok.token == Token::Colon => cursor += 1,
            Some(tok) => {
                return Err(StyleParseError::UnexpectedToken {
                    position: tok.span.start,
                    message: format!("expected ':' after '{property}', got {:?}", tok.token),
                })
            }
            None => {
                return Err(StyleParseError::UnexpectedToken {
                    position: input.len(),
                    message: format!("expected ':' after '{property}'"),
                })
            }
        }

        let value_start = cursor;
        while cursor < tokens.len() && tokens[cursor].token != Token::Semicolon {
            cursor += 1;
        }
        if cursor == value_start {
            return Err(StyleParseError::EmptyValue { property });
        }
        let value = input[tokens[value_start].span.start..tokens[cursor - 1].span.end].to_string();
        result.push((property, value));
    }

    Ok(result)
}
