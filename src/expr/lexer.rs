//! Tokenizer for the expression grammar.

use std::ops::Range;

use super::error::{ParseError, ParseErrorKind};

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `**` or `^`.
    Caret,
    LParen,
    RParen,
    Comma,
}

/// A token and the byte range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Range<usize>,
}

/// Split `source` into tokens, skipping whitespace.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let b = bytes[pos];

        if b.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;
        let kind = match b {
            b'+' => {
                pos += 1;
                TokenKind::Plus
            },
            b'-' => {
                pos += 1;
                TokenKind::Minus
            },
            b'*' if bytes.get(pos + 1) == Some(&b'*') => {
                pos += 2;
                TokenKind::Caret
            },
            b'*' => {
                pos += 1;
                TokenKind::Star
            },
            b'/' => {
                pos += 1;
                TokenKind::Slash
            },
            b'^' => {
                pos += 1;
                TokenKind::Caret
            },
            b'(' => {
                pos += 1;
                TokenKind::LParen
            },
            b')' => {
                pos += 1;
                TokenKind::RParen
            },
            b',' => {
                pos += 1;
                TokenKind::Comma
            },
            b'0'..=b'9' | b'.' => {
                pos = scan_number(bytes, pos);
                let text = &source[start..pos];
                match text.parse::<f64>() {
                    Ok(value) if value.is_finite() => TokenKind::Number(value),
                    _ => {
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidNumber,
                            source,
                            start..pos,
                        ))
                    },
                }
            },
            b if b.is_ascii_alphabetic() || b == b'_' => {
                while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_')
                {
                    pos += 1;
                }
                TokenKind::Ident(source[start..pos].to_string())
            },
            _ => {
                // Report the whole (possibly multi-byte) character.
                let ch = source[start..].chars().next().unwrap_or('\u{fffd}');
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedChar(ch),
                    source,
                    start..start + ch.len_utf8(),
                ));
            },
        };

        tokens.push(Token {
            kind,
            span: start..pos,
        });
    }

    Ok(tokens)
}

/// Advance over `digits [. digits] [(e|E) [+|-] digits]` and return the end offset.
fn scan_number(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            pos = exp;
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn double_star_and_caret_are_the_same_token() {
        assert_eq!(kinds("x**2"), kinds("x^2"));
        assert_eq!(
            kinds("x**2"),
            vec![
                TokenKind::Ident("x".to_string()),
                TokenKind::Caret,
                TokenKind::Number(2.0)
            ]
        );
    }

    #[test]
    fn numbers_with_fraction_and_exponent() {
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("2.5e-3"), vec![TokenKind::Number(2.5e-3)]);
        assert_eq!(kinds("1E2"), vec![TokenKind::Number(100.0)]);
    }

    #[test]
    fn trailing_e_is_not_swallowed_by_the_number() {
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number(2.0), TokenKind::Ident("e".to_string())]
        );
    }

    #[test]
    fn spans_point_into_the_source() {
        let tokens = tokenize("  sin(x)").unwrap();
        assert_eq!(tokens[0].span, 2..5);
        assert_eq!(tokens[1].span, 5..6);
    }

    #[test]
    fn rejects_characters_outside_the_grammar() {
        let err = tokenize("x; import os").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar(';'));
        assert_eq!(err.span, 1..2);

        let err = tokenize("x·2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('·'));
        assert_eq!(err.fragment, "·");
    }

    #[test]
    fn rejects_malformed_and_overflowing_numbers() {
        assert_eq!(
            tokenize("1.2.3").unwrap_err().kind,
            ParseErrorKind::InvalidNumber
        );
        assert_eq!(
            tokenize("1e999").unwrap_err().kind,
            ParseErrorKind::InvalidNumber
        );
        assert_eq!(tokenize(".").unwrap_err().kind, ParseErrorKind::InvalidNumber);
    }
}
