//! Safe parsing and evaluation of single-variable formulas.
//!
//! Input text is tokenized and parsed by a restricted grammar into an
//! explicit [`Node`] tree. Only the variable `x`, numeric literals, the
//! constants `pi` and `e`, the arithmetic operators and a fixed list of
//! elementary functions are accepted; anything else is a [`ParseError`].
//! Nothing in the input is ever executed as code.
//!
//! # Example
//!
//! ```
//! use exprplot::expr::parse;
//!
//! let expr = parse("x**2 + 2*x - 3").unwrap();
//! assert_eq!(expr.eval(1.0), Ok(0.0));
//! assert!(parse("y + 1").is_err());
//! ```

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;

use std::fmt;
use std::str::FromStr;

pub use ast::{BinaryOp, Constant, Function, Node};
pub use error::{ParseError, ParseErrorKind};
pub use eval::EvaluationSentinel;
pub use parser::{MAX_DEPTH, MAX_INPUT_LEN};

/// A parsed formula in the free variable `x`.
#[derive(Debug, Clone)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    /// The text the expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Root of the expression tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluate at a single point.
    pub fn eval(&self, x: f64) -> Result<f64, EvaluationSentinel> {
        self.root.eval(x)
    }

    /// Whether the value depends on `x` at all.
    pub fn is_constant(&self) -> bool {
        !self.root.references_x()
    }
}

/// Two expressions are equal when their trees are, whatever the source text.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse `text` into an [`Expression`].
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    let root = parser::parse_tree(text)?;
    Ok(Expression {
        source: text.to_string(),
        root,
    })
}
