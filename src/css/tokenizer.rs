//! logos-based tokenizer for inline style declarations.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `10px` as Dimension beats `10` as Number)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `#ff00aa` matches [`Token::HexColor`]
//! - `120px` matches [`Token::Dimension`], not `Number` + `Ident`
//! - `url(/img/a.png)` is one [`Token::Url`], so paths never have to lex

use std::ops::Range;

use logos::Logos;

/// Token produced by the declaration lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `!important` flag.
    #[token("!important")]
    Important,

    /// `url(...)` with an unquoted or quoted body.
    #[regex(r"url\([^)]*\)")]
    Url,

    /// Hex color: `#fff`, `#ff00aa`, `#ff00aa80` (3-8 hex digits).
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Dimension: number with unit suffix like `120px`, `50%`, `1.5em`.
    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)([a-zA-Z]+|%)")]
    Dimension,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Number: integer or float, possibly negative.
    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)")]
    Number,

    /// Identifier: property names, keywords, color names, vendor prefixes.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,

    /// `/` (shorthand separators such as `font: 12px/1.5`)
    #[token("/")]
    Slash,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
}

/// Tokenize a declaration string.
///
/// Fails with the span of the first input that does not lex.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, Range<usize>> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok(Spanned { token, span }),
            Err(()) => Err(span),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    fn texts(input: &str) -> Vec<(Token, String)> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| (s.token, input[s.span].to_string()))
            .collect()
    }

    #[test]
    fn punctuation() {
        assert_eq!(
            tokens(": ; , / ( )"),
            vec![
                Token::Colon,
                Token::Semicolon,
                Token::Comma,
                Token::Slash,
                Token::ParenOpen,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn idents_with_vendor_prefix() {
        let result = texts("text-align -webkit-box center");
        assert_eq!(result[0], (Token::Ident, "text-align".into()));
        assert_eq!(result[1], (Token::Ident, "-webkit-box".into()));
        assert_eq!(result[2], (Token::Ident, "center".into()));
    }

    #[test]
    fn dimensions_beat_numbers() {
        let result = texts("120px 50% 1.5em .5rem 3");
        assert_eq!(result[0], (Token::Dimension, "120px".into()));
        assert_eq!(result[1], (Token::Dimension, "50%".into()));
        assert_eq!(result[2], (Token::Dimension, "1.5em".into()));
        assert_eq!(result[3], (Token::Dimension, ".5rem".into()));
        assert_eq!(result[4], (Token::Number, "3".into()));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(tokens("#fff #ff00aa"), vec![Token::HexColor, Token::HexColor]);
    }

    #[test]
    fn url_is_one_token() {
        let result = texts("url(/img/bg.png)");
        assert_eq!(result, vec![(Token::Url, "url(/img/bg.png)".into())]);
    }

    #[test]
    fn strings_and_important() {
        assert_eq!(
            tokens(r#""Open Sans" 'x' !important"#),
            vec![Token::StringLiteral, Token::StringLiteralSingle, Token::Important]
        );
    }

    #[test]
    fn unlexable_input_reports_its_span() {
        assert_eq!(tokenize("color: r@d"), Err(8..9));
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(tokens("  color \n\t: red  "), vec![Token::Ident, Token::Colon, Token::Ident]);
    }
}
