//! Numeric evaluation of expression trees.

use thiserror::Error;

use super::ast::{BinaryOp, Function, Node};

/// Why a single sample has no finite real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvaluationSentinel {
    /// Division by zero or a logarithmic/hyperbolic singularity.
    #[error("undefined (pole)")]
    Pole,
    /// The real result does not exist (the value would be complex).
    #[error("not a real number")]
    NonReal,
    /// The result is too large to represent.
    #[error("overflow")]
    Overflow,
}

fn finite(value: f64) -> Result<f64, EvaluationSentinel> {
    if value.is_nan() {
        Err(EvaluationSentinel::NonReal)
    } else if value.is_infinite() {
        Err(EvaluationSentinel::Overflow)
    } else {
        Ok(value)
    }
}

fn reciprocal(value: f64) -> Result<f64, EvaluationSentinel> {
    if value == 0.0 {
        Err(EvaluationSentinel::Pole)
    } else {
        finite(1.0 / value)
    }
}

fn ln(value: f64) -> Result<f64, EvaluationSentinel> {
    if value < 0.0 {
        Err(EvaluationSentinel::NonReal)
    } else if value == 0.0 {
        Err(EvaluationSentinel::Pole)
    } else {
        finite(value.ln())
    }
}

fn power(base: f64, exponent: f64) -> Result<f64, EvaluationSentinel> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvaluationSentinel::Pole);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvaluationSentinel::NonReal);
    }
    finite(base.powf(exponent))
}

fn apply(function: Function, args: &[f64]) -> Result<f64, EvaluationSentinel> {
    let a = args[0];
    match function {
        Function::Sin => finite(a.sin()),
        Function::Cos => finite(a.cos()),
        Function::Tan => finite(a.tan()),
        Function::Cot => reciprocal(a.tan()),
        Function::Sec => reciprocal(a.cos()),
        Function::Csc => reciprocal(a.sin()),
        Function::Asin | Function::Acos if a.abs() > 1.0 => Err(EvaluationSentinel::NonReal),
        Function::Asin => finite(a.asin()),
        Function::Acos => finite(a.acos()),
        Function::Atan => finite(a.atan()),
        Function::Sinh => finite(a.sinh()),
        Function::Cosh => finite(a.cosh()),
        Function::Tanh => finite(a.tanh()),
        Function::Asinh => finite(a.asinh()),
        Function::Acosh if a < 1.0 => Err(EvaluationSentinel::NonReal),
        Function::Acosh => finite(a.acosh()),
        Function::Atanh if a.abs() > 1.0 => Err(EvaluationSentinel::NonReal),
        Function::Atanh if a.abs() == 1.0 => Err(EvaluationSentinel::Pole),
        Function::Atanh => finite(a.atanh()),
        Function::Exp => finite(a.exp()),
        Function::Log => match args.get(1) {
            None => ln(a),
            Some(&base) => {
                let denominator = ln(base)?;
                if denominator == 0.0 {
                    return Err(EvaluationSentinel::Pole);
                }
                finite(ln(a)? / denominator)
            },
        },
        Function::Sqrt if a < 0.0 => Err(EvaluationSentinel::NonReal),
        Function::Sqrt => finite(a.sqrt()),
        Function::Cbrt => finite(a.cbrt()),
        Function::Abs => finite(a.abs()),
        Function::Sign => Ok(if a > 0.0 {
            1.0
        } else if a < 0.0 {
            -1.0
        } else {
            0.0
        }),
        Function::Floor => finite(a.floor()),
        Function::Ceil => finite(a.ceil()),
    }
}

impl Node {
    /// Evaluate the tree with the free variable bound to `x`.
    ///
    /// The first operation that leaves the real numbers (or the finite
    /// range of `f64`) short-circuits with the matching sentinel.
    pub fn eval(&self, x: f64) -> Result<f64, EvaluationSentinel> {
        match self {
            Node::Number(value) => Ok(*value),
            Node::Constant(constant) => Ok(constant.value()),
            Node::Variable => finite(x),
            Node::Negate(inner) => Ok(-inner.eval(x)?),
            Node::Binary { op, lhs, rhs } => {
                let a = lhs.eval(x)?;
                let b = rhs.eval(x)?;
                match op {
                    BinaryOp::Add => finite(a + b),
                    BinaryOp::Sub => finite(a - b),
                    BinaryOp::Mul => finite(a * b),
                    BinaryOp::Div if b == 0.0 => Err(EvaluationSentinel::Pole),
                    BinaryOp::Div => finite(a / b),
                    BinaryOp::Pow => power(a, b),
                }
            },
            Node::Call { function, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(x))
                    .collect::<Result<Vec<f64>, _>>()?;
                apply(*function, &values)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parse;

    fn eval(source: &str, x: f64) -> Result<f64, EvaluationSentinel> {
        parse(source).unwrap().eval(x)
    }

    #[test]
    fn polynomial_root() {
        assert_eq!(eval("x**2 + 2*x - 3", 1.0), Ok(0.0));
        assert_eq!(eval("x**2 + 2*x - 3", -3.0), Ok(0.0));
    }

    #[test]
    fn precedence_follows_python() {
        assert_eq!(eval("-x**2", 3.0), Ok(-9.0));
        assert_eq!(eval("2**3**2", 0.0), Ok(512.0));
        assert_eq!(eval("2**-1", 0.0), Ok(0.5));
        assert_eq!(eval("8/2/2", 0.0), Ok(2.0));
        assert_eq!(eval("10 - 4 - 3", 0.0), Ok(3.0));
    }

    #[test]
    fn division_by_zero_is_a_pole() {
        assert_eq!(eval("1/x", 0.0), Err(EvaluationSentinel::Pole));
        assert_eq!(eval("x**-1", 0.0), Err(EvaluationSentinel::Pole));
        assert_eq!(eval("log(x)", 0.0), Err(EvaluationSentinel::Pole));
        assert_eq!(eval("cot(x)", 0.0), Err(EvaluationSentinel::Pole));
        assert_eq!(eval("atanh(x)", 1.0), Err(EvaluationSentinel::Pole));
        assert_eq!(eval("log(x, 1)", 2.0), Err(EvaluationSentinel::Pole));
    }

    #[test]
    fn complex_results_are_non_real() {
        assert_eq!(eval("sqrt(x)", -1.0), Err(EvaluationSentinel::NonReal));
        assert_eq!(eval("log(x)", -2.0), Err(EvaluationSentinel::NonReal));
        assert_eq!(eval("asin(x)", 2.0), Err(EvaluationSentinel::NonReal));
        assert_eq!(eval("acosh(x)", 0.5), Err(EvaluationSentinel::NonReal));
        assert_eq!(eval("x**0.5", -4.0), Err(EvaluationSentinel::NonReal));
    }

    #[test]
    fn negative_base_with_integer_exponent_is_real() {
        assert_eq!(eval("x**3", -2.0), Ok(-8.0));
        assert_eq!(eval("x^2", -3.0), Ok(9.0));
    }

    #[test]
    fn huge_results_overflow() {
        assert_eq!(eval("exp(x)", 1000.0), Err(EvaluationSentinel::Overflow));
        assert_eq!(eval("x**400", 10.0), Err(EvaluationSentinel::Overflow));
        assert_eq!(eval("1e300*x", 1e10), Err(EvaluationSentinel::Overflow));
    }

    #[test]
    fn functions_and_constants() {
        assert!((eval("sin(pi/2)", 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((eval("log(e)", 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((eval("log(8, 2)", 0.0).unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(eval("abs(x)", -2.5), Ok(2.5));
        assert_eq!(eval("Abs(x)", -2.5), Ok(2.5));
        assert!((eval("cbrt(x)", -8.0).unwrap() + 2.0).abs() < 1e-12);
        assert_eq!(eval("sign(x)", 0.0), Ok(0.0));
        assert_eq!(eval("floor(x) + ceil(x)", 1.5), Ok(3.0));
    }

    #[test]
    fn call_nodes_respect_arity() {
        assert_eq!(Node::call(Function::Sin, Vec::new()), None);
        assert_eq!(
            Node::call(Function::Sqrt, vec![Node::Variable, Node::Variable]),
            None
        );
        let log = Node::call(Function::Log, vec![Node::Number(8.0), Node::Number(2.0)]).unwrap();
        assert!((log.eval(0.0).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_to_the_zero_is_one() {
        assert_eq!(eval("x**0", 0.0), Ok(1.0));
    }
}
