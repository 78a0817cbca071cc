//! Recursive-descent parser for the restricted expression grammar.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := number | constant | 'x' | function '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//!
//! `**` binds tighter than a leading minus and groups to the right, so
//! `-x**2` is `-(x**2)` and `2**3**2` is `2**(3**2)`.

use super::ast::{BinaryOp, Constant, Function, Node};
use super::error::{ParseError, ParseErrorKind};
use super::lexer::{tokenize, Token, TokenKind};

/// Maximum input length in characters.
pub const MAX_INPUT_LEN: usize = 512;

/// Maximum nesting of parentheses and unary operators.
pub const MAX_DEPTH: usize = 64;

/// Parse `source` into an expression tree.
pub(crate) fn parse_tree(source: &str) -> Result<Node, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, source, 0..0));
    }
    if source.chars().count() > MAX_INPUT_LEN {
        return Err(ParseError::new(
            ParseErrorKind::TooLong { max: MAX_INPUT_LEN },
            source,
            0..0,
        ));
    }

    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        depth: 0,
    };

    let node = parser.expr()?;
    match parser.peek() {
        None => Ok(node),
        Some(token) => Err(parser.unexpected(token)),
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, kind: ParseErrorKind, span: std::ops::Range<usize>) -> ParseError {
        ParseError::new(kind, self.source, span)
    }

    fn unexpected(&self, token: &Token) -> ParseError {
        let text = self.source[token.span.clone()].to_string();
        self.error(ParseErrorKind::UnexpectedToken(text), token.span.clone())
    }

    fn end(&self) -> ParseError {
        let len = self.source.len();
        self.error(ParseErrorKind::UnexpectedEnd, len..len)
    }

    fn expr(&mut self) -> Result<Node, ParseError> {
        let mut node = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(node),
            };
            self.pos += 1;
            let rhs = self.term()?;
            node = Node::binary(op, node, rhs);
        }
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        let mut node = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => return Ok(node),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            node = Node::binary(op, node, rhs);
        }
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.depth >= MAX_DEPTH {
            let span = self
                .peek()
                .map(|t| t.span.clone())
                .unwrap_or(self.source.len()..self.source.len());
            return Err(self.error(ParseErrorKind::TooDeep { max: MAX_DEPTH }, span));
        }

        self.depth += 1;
        let result = match self.peek_kind() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                self.unary().map(|inner| Node::Negate(Box::new(inner)))
            },
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.unary()
            },
            _ => self.power(),
        };
        self.depth -= 1;
        result
    }

    fn power(&mut self) -> Result<Node, ParseError> {
        let base = self.primary()?;
        if matches!(self.peek_kind(), Some(TokenKind::Caret)) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(Node::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.advance() else {
            return Err(self.end());
        };

        match token.kind {
            TokenKind::Number(value) => Ok(Node::Number(value)),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect_close(token.span.start)?;
                Ok(inner)
            },
            TokenKind::Ident(ref name) => self.identifier(name, &token),
            _ => Err(self.unexpected(&token)),
        }
    }

    fn identifier(&mut self, name: &str, token: &Token) -> Result<Node, ParseError> {
        let is_call = matches!(self.peek_kind(), Some(TokenKind::LParen));

        if is_call {
            let Some(function) = Function::from_name(name) else {
                return Err(self.error(
                    ParseErrorKind::UnknownFunction(name.to_string()),
                    token.span.clone(),
                ));
            };
            return self.call(function, token);
        }

        if name == "x" {
            return Ok(Node::Variable);
        }
        if let Some(constant) = Constant::from_name(name) {
            return Ok(Node::Constant(constant));
        }
        if Function::from_name(name).is_some() {
            return Err(self.error(
                ParseErrorKind::MissingCall(name.to_string()),
                token.span.clone(),
            ));
        }
        Err(self.error(
            ParseErrorKind::DisallowedVariable(name.to_string()),
            token.span.clone(),
        ))
    }

    fn call(&mut self, function: Function, name: &Token) -> Result<Node, ParseError> {
        let open = self.advance().map(|t| t.span.start).unwrap_or(name.span.end);

        let mut args = Vec::new();
        if matches!(self.peek_kind(), Some(TokenKind::RParen)) {
            self.pos += 1;
        } else {
            loop {
                args.push(self.expr()?);
                match self.peek_kind() {
                    Some(TokenKind::Comma) => self.pos += 1,
                    _ => {
                        self.expect_close(open)?;
                        break;
                    },
                }
            }
        }

        let found = args.len();
        if let Some(node) = Node::call(function, args) {
            return Ok(node);
        }

        let arity = function.arity();
        let expected = if arity.start() == arity.end() {
            arity.start().to_string()
        } else {
            format!("{} to {}", arity.start(), arity.end())
        };
        let end = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map(|t| t.span.end)
            .unwrap_or(self.source.len());
        Err(self.error(
            ParseErrorKind::WrongArity {
                function: function.name().to_string(),
                expected,
                found,
            },
            name.span.start..end,
        ))
    }

    fn expect_close(&mut self, open: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => {
                self.pos += 1;
                Ok(())
            },
            Some(token) => Err(self.unexpected(token)),
            None => Err(self.error(ParseErrorKind::UnclosedParen, open..open + 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(source: &str) -> ParseErrorKind {
        parse_tree(source).unwrap_err().kind
    }

    #[test]
    fn parses_the_sample_prompt() {
        let node = parse_tree("x**2 + 2*x - 3").unwrap();
        assert_eq!(node.to_string(), "x**2 + 2*x - 3");
    }

    #[test]
    fn unary_minus_wraps_power() {
        let node = parse_tree("-x**2").unwrap();
        assert!(matches!(node, Node::Negate(ref inner) if matches!(**inner, Node::Binary { op: BinaryOp::Pow, .. })));
    }

    #[test]
    fn power_is_right_associative() {
        let node = parse_tree("2**3**2").unwrap();
        let Node::Binary { op, rhs, .. } = node else {
            panic!("expected a binary node");
        };
        assert_eq!(op, BinaryOp::Pow);
        assert!(matches!(*rhs, Node::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn rejects_other_variables() {
        assert_eq!(kind("y + 1"), ParseErrorKind::DisallowedVariable("y".to_string()));
        assert_eq!(kind("x*t"), ParseErrorKind::DisallowedVariable("t".to_string()));
        assert_eq!(kind("xx"), ParseErrorKind::DisallowedVariable("xx".to_string()));
    }

    #[test]
    fn rejects_code_disguised_as_math() {
        assert_eq!(
            kind("__import__(x)"),
            ParseErrorKind::UnknownFunction("__import__".to_string())
        );
        assert_eq!(kind("eval(x)"), ParseErrorKind::UnknownFunction("eval".to_string()));
        assert_eq!(kind("x.real"), ParseErrorKind::InvalidNumber);
        assert_eq!(kind("x[0]"), ParseErrorKind::UnexpectedChar('['));
        assert_eq!(kind("\"x\""), ParseErrorKind::UnexpectedChar('"'));
    }

    #[test]
    fn function_errors() {
        assert_eq!(kind("sin"), ParseErrorKind::MissingCall("sin".to_string()));
        assert_eq!(
            kind("sin(x, 2)"),
            ParseErrorKind::WrongArity {
                function: "sin".to_string(),
                expected: "1".to_string(),
                found: 2
            }
        );
        assert_eq!(
            kind("log()"),
            ParseErrorKind::WrongArity {
                function: "log".to_string(),
                expected: "1 to 2".to_string(),
                found: 0
            }
        );
        assert_eq!(kind("x(2)"), ParseErrorKind::UnknownFunction("x".to_string()));
    }

    #[test]
    fn structural_errors() {
        assert_eq!(kind(""), ParseErrorKind::Empty);
        assert_eq!(kind("   "), ParseErrorKind::Empty);
        assert_eq!(kind("x +"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(kind("(x + 1"), ParseErrorKind::UnclosedParen);
        assert_eq!(kind("x + 1)"), ParseErrorKind::UnexpectedToken(")".to_string()));
        assert_eq!(kind("2 x"), ParseErrorKind::UnexpectedToken("x".to_string()));
        assert_eq!(kind("x * * 2"), ParseErrorKind::UnexpectedToken("*".to_string()));
    }

    #[test]
    fn error_points_at_offending_text() {
        let err = parse_tree("x**2 + foo").unwrap_err();
        assert_eq!(err.span, 7..10);
        assert_eq!(err.fragment, "foo");
    }

    #[test]
    fn limits_nesting_and_length() {
        let deep = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(kind(&deep), ParseErrorKind::TooDeep { max: MAX_DEPTH });

        let minus = format!("{}x", "-".repeat(100));
        assert_eq!(kind(&minus), ParseErrorKind::TooDeep { max: MAX_DEPTH });

        let long = "x+".repeat(300) + "x";
        assert_eq!(kind(&long), ParseErrorKind::TooLong { max: MAX_INPUT_LEN });

        let shallow = format!("{}x{}", "(".repeat(20), ")".repeat(20));
        assert!(parse_tree(&shallow).is_ok());
    }
}
