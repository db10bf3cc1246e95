use rust_decimal::Decimal;

use crate::ast::{BinOp, BracketStyle};

/// Abstract Syntax Tree node representing a parsed formula expression.
///
/// The node set is closed: the evaluator and the printer match on it
/// exhaustively. Nodes never hold evaluation results.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal number
    ///
    /// # Example
    /// ```text
    /// 42
    /// 0.5
    /// ```
    NumberLiteral(Decimal),

    /// Named property, resolved at evaluation time
    ///
    /// # Example
    /// ```text
    /// velocity
    /// 'Story Points'
    /// ```
    PropertyReference(String),

    /// `left + right`
    Addition { left: Box<Expr>, right: Box<Expr> },

    /// `left - right`
    Subtraction { left: Box<Expr>, right: Box<Expr> },

    /// `left * right`
    Multiplication { left: Box<Expr>, right: Box<Expr> },

    /// `left / right`
    Division { left: Box<Expr>, right: Box<Expr> },

    /// Unary minus
    ///
    /// # Example
    /// ```text
    /// -estimate
    /// ```
    Negation(Box<Expr>),

    /// Explicitly bracketed sub-expression
    ///
    /// # Examples
    /// ```text
    /// (a + b)
    /// {a + b}
    /// [a + b]
    /// ```
    Grouping { inner: Box<Expr>, style: BracketStyle },
}

impl Expr {
    pub fn number(value: impl Into<Decimal>) -> Self {
        Expr::NumberLiteral(value.into())
    }

    pub fn property(name: impl Into<String>) -> Self {
        Expr::PropertyReference(name.into())
    }

    /// Builds the binary node for `op`.
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        let left = Box::new(left);
        let right = Box::new(right);
        match op {
            BinOp::Add => Expr::Addition { left, right },
            BinOp::Subtract => Expr::Subtraction { left, right },
            BinOp::Multiply => Expr::Multiplication { left, right },
            BinOp::Divide => Expr::Division { left, right },
        }
    }

    pub fn negate(operand: Expr) -> Self {
        Expr::Negation(Box::new(operand))
    }

    pub fn group(inner: Expr, style: BracketStyle) -> Self {
        Expr::Grouping {
            inner: Box::new(inner),
            style,
        }
    }

    /// Splits a binary node into its operator and operands.
    pub fn as_binary(&self) -> Option<(BinOp, &Expr, &Expr)> {
        match self {
            Expr::Addition { left, right } => Some((BinOp::Add, left, right)),
            Expr::Subtraction { left, right } => Some((BinOp::Subtract, left, right)),
            Expr::Multiplication { left, right } => Some((BinOp::Multiply, left, right)),
            Expr::Division { left, right } => Some((BinOp::Divide, left, right)),
            _ => None,
        }
    }

    /// Depth-first, left-to-right visit of every property reference.
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Expr::NumberLiteral(_) => {}
            Expr::PropertyReference(name) => f(name),
            Expr::Negation(operand) => operand.for_each_reference(f),
            Expr::Grouping { inner, .. } => inner.for_each_reference(f),
            _ => {
                if let Some((_, left, right)) = self.as_binary() {
                    left.for_each_reference(f);
                    right.for_each_reference(f);
                }
            }
        }
    }
}
