//! Expression tree and the operator/function allow-list.

use std::fmt;
use std::ops::RangeInclusive;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a ** b`
    Pow,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => " + ",
            BinaryOp::Sub => " - ",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "**",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 4,
        }
    }
}

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    /// Look up a constant by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" | "E" => Some(Constant::E),
            _ => None,
        }
    }

    /// Canonical source name.
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    /// Numeric value.
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Elementary functions accepted by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    /// Natural log, or `log(a, base)` with two arguments.
    Log,
    Sqrt,
    Cbrt,
    Abs,
    Sign,
    Floor,
    Ceil,
}

impl Function {
    /// Look up a function by its source name. `ln` and `Abs` are aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "cot" => Function::Cot,
            "sec" => Function::Sec,
            "csc" => Function::Csc,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "asinh" => Function::Asinh,
            "acosh" => Function::Acosh,
            "atanh" => Function::Atanh,
            "exp" => Function::Exp,
            "log" | "ln" => Function::Log,
            "sqrt" => Function::Sqrt,
            "cbrt" => Function::Cbrt,
            "abs" | "Abs" => Function::Abs,
            "sign" => Function::Sign,
            "floor" => Function::Floor,
            "ceil" => Function::Ceil,
            _ => return None,
        };
        Some(function)
    }

    /// Canonical source name.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Cot => "cot",
            Function::Sec => "sec",
            Function::Csc => "csc",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Asinh => "asinh",
            Function::Acosh => "acosh",
            Function::Atanh => "atanh",
            Function::Exp => "exp",
            Function::Log => "log",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Abs => "abs",
            Function::Sign => "sign",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
        }
    }

    /// Accepted argument counts.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Function::Log => 1..=2,
            _ => 1..=1,
        }
    }
}

/// A node of the parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Finite numeric literal.
    Number(f64),
    /// Named constant.
    Constant(Constant),
    /// The free variable `x`.
    Variable,
    /// Unary minus.
    Negate(Box<Node>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Node>,
        /// Right operand.
        rhs: Box<Node>,
    },
    /// Call to an allow-listed function. Built with [`Node::call`].
    #[non_exhaustive]
    Call {
        /// Function.
        function: Function,
        /// Arguments, already checked against [`Function::arity`].
        args: Vec<Node>,
    },
}

const NEGATE_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 5;

impl Node {
    /// Build a binary node.
    pub fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Self {
        Node::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Build a call node, or `None` when `args` does not fit the arity.
    pub fn call(function: Function, args: Vec<Node>) -> Option<Self> {
        function
            .arity()
            .contains(&args.len())
            .then_some(Node::Call { function, args })
    }

    /// Whether the tree mentions `x` anywhere.
    pub fn references_x(&self) -> bool {
        match self {
            Node::Variable => true,
            Node::Number(_) | Node::Constant(_) => false,
            Node::Negate(inner) => inner.references_x(),
            Node::Binary { lhs, rhs, .. } => lhs.references_x() || rhs.references_x(),
            Node::Call { args, .. } => args.iter().any(Node::references_x),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Node::Binary { op, .. } => op.precedence(),
            Node::Negate(_) => NEGATE_PRECEDENCE,
            _ => ATOM_PRECEDENCE,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, node: &Node, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", node)
    } else {
        write!(f, "{}", node)
    }
}

// Positional notation outside this range spells out hundreds of digits.
const PLAIN_NUMBER_RANGE: std::ops::Range<f64> = 1e-5..1e16;

fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value == 0.0 || PLAIN_NUMBER_RANGE.contains(&value.abs()) {
        write!(f, "{}", value)
    } else {
        write!(f, "{:e}", value)
    }
}

// Printing inserts the fewest parentheses that make the text re-parse into
// the same tree under the grammar in `parser.rs`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write_number(f, *value),
            Node::Constant(constant) => f.write_str(constant.name()),
            Node::Variable => f.write_str("x"),
            Node::Negate(inner) => {
                f.write_str("-")?;
                write_operand(f, inner, inner.precedence() < NEGATE_PRECEDENCE)
            },
            Node::Binary {
                op: BinaryOp::Pow,
                lhs,
                rhs,
            } => {
                write_operand(f, lhs, lhs.precedence() <= BinaryOp::Pow.precedence())?;
                f.write_str(BinaryOp::Pow.symbol())?;
                write_operand(f, rhs, rhs.precedence() < NEGATE_PRECEDENCE)
            },
            Node::Binary { op, lhs, rhs } => {
                write_operand(f, lhs, lhs.precedence() < op.precedence())?;
                f.write_str(op.symbol())?;
                write_operand(f, rhs, rhs.precedence() <= op.precedence())
            },
            Node::Call { function, args } => {
                write!(f, "{}(", function.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            },
        }
    }
}
