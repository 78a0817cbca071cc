//! Parse errors for the expression grammar.

use std::ops::Range;

use thiserror::Error;

/// Why an expression string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The input was empty or only whitespace.
    #[error("expression is empty")]
    Empty,

    /// The input exceeds the accepted length.
    #[error("expression is longer than {max} characters")]
    TooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// A character outside the grammar's alphabet.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// A numeric literal that is malformed or does not fit in an `f64`.
    #[error("invalid number")]
    InvalidNumber,

    /// A free variable other than `x`.
    #[error("unknown variable '{0}' (only 'x' is allowed)")]
    DisallowedVariable(String),

    /// A call to a function outside the allow-list.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// A supported function used without an argument list.
    #[error("function '{0}' must be called with parentheses")]
    MissingCall(String),

    /// A supported function called with the wrong number of arguments.
    #[error("function '{function}' takes {expected} argument(s), got {found}")]
    WrongArity {
        /// Function name.
        function: String,
        /// Human-readable accepted argument count.
        expected: String,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A token that cannot appear at this position.
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),

    /// The input ended where an operand or closing token was required.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// An opening parenthesis was never closed.
    #[error("missing closing parenthesis")]
    UnclosedParen,

    /// Parentheses or unary operators nested too deeply.
    #[error("expression is nested more than {max} levels deep")]
    TooDeep {
        /// Maximum accepted nesting depth.
        max: usize,
    },
}

/// A rejected expression: the reason plus where in the input it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", location(.span, .fragment))]
pub struct ParseError {
    /// Why the input was rejected.
    pub kind: ParseErrorKind,
    /// Byte range of the offending input.
    pub span: Range<usize>,
    /// The offending substring (empty when the problem is the end of input).
    pub fragment: String,
}

impl ParseError {
    /// Create an error covering `span` of `source`.
    pub fn new(kind: ParseErrorKind, source: &str, span: Range<usize>) -> Self {
        let fragment = source.get(span.clone()).unwrap_or_default().to_string();
        Self {
            kind,
            span,
            fragment,
        }
    }
}

fn location(span: &Range<usize>, fragment: &str) -> String {
    if fragment.is_empty() {
        String::new()
    } else {
        format!(" at position {}: '{}'", span.start, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_includes_fragment_and_position() {
        let err = ParseError::new(
            ParseErrorKind::DisallowedVariable("y".to_string()),
            "y + 1",
            0..1,
        );
        assert_eq!(
            err.to_string(),
            "unknown variable 'y' (only 'x' is allowed) at position 0: 'y'"
        );
    }

    #[test]
    fn message_without_fragment_is_just_the_reason() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEnd, "x +", 3..3);
        assert_eq!(err.to_string(), "unexpected end of expression");
    }
}
