use rust_decimal::Decimal;

use crate::{
    ast::{BinOp, Expr, Output},
    value::{Resolved, Resolver},
};

/// Evaluation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Treat an absent property value as `0` instead of null
    pub null_is_zero: bool,
}

impl EvalOptions {
    pub fn null_is_zero(null_is_zero: bool) -> Self {
        EvalOptions { null_is_zero }
    }
}

/// Errors that can occur while computing a formula for one record.
///
/// A null result is not an error; see [`Evaluator::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// The resolver has no property by this name
    #[error("Unknown property: '{0}'")]
    UnknownReference(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Result does not fit in a decimal
    #[error("Arithmetic overflow in '{}'", .0.symbol())]
    Overflow(BinOp),
}

/// Walks a formula tree against a resolver.
///
/// Holds no state besides its inputs: the same tree can be evaluated any
/// number of times, from any number of threads, with different resolvers.
pub struct Evaluator<'r, R: Resolver + ?Sized> {
    resolver: &'r R,
    options: EvalOptions,
}

impl<'r, R: Resolver + ?Sized> Evaluator<'r, R> {
    pub fn new(resolver: &'r R, options: EvalOptions) -> Self {
        Evaluator { resolver, options }
    }

    /// Computes the value of a formula.
    ///
    /// Returns `Ok(None)` when a property the result depends on has no value
    /// and `null_is_zero` is off. Once an operand is null the rest of that
    /// operation is skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use formula_lang::{EvalOptions, Evaluator, Resolved};
    /// use rust_decimal::Decimal;
    ///
    /// let formula = formula_lang::parse("size * 2").unwrap();
    /// let resolver = |name: &str| match name {
    ///     "size" => Resolved::Value(Decimal::from(3)),
    ///     _ => Resolved::Unknown,
    /// };
    ///
    /// let evaluator = Evaluator::new(&resolver, EvalOptions::default());
    /// assert_eq!(evaluator.evaluate(&formula).unwrap(), Some(Decimal::from(6)));
    /// ```
    pub fn evaluate(&self, output: &Output) -> Result<Option<Decimal>, EvalError> {
        self.eval_expr(&output.root)
    }

    fn eval_expr(&self, expr: &Expr) -> Result<Option<Decimal>, EvalError> {
        match expr {
            Expr::NumberLiteral(n) => Ok(Some(*n)),
            Expr::PropertyReference(name) => self.eval_reference(name),
            Expr::Negation(operand) => Ok(self.eval_expr(operand)?.map(|v| -v)),
            Expr::Grouping { inner, .. } => self.eval_expr(inner),
            Expr::Addition { left, right } => self.eval_binary(BinOp::Add, left, right),
            Expr::Subtraction { left, right } => self.eval_binary(BinOp::Subtract, left, right),
            Expr::Multiplication { left, right } => self.eval_binary(BinOp::Multiply, left, right),
            Expr::Division { left, right } => self.eval_binary(BinOp::Divide, left, right),
        }
    }

    fn eval_reference(&self, name: &str) -> Result<Option<Decimal>, EvalError> {
        match self.resolver.resolve(name) {
            Resolved::Value(v) => Ok(Some(v)),
            Resolved::Absent if self.options.null_is_zero => Ok(Some(Decimal::ZERO)),
            Resolved::Absent => {
                log::debug!("property '{}' has no value, formula result is null", name);
                Ok(None)
            }
            Resolved::Unknown => {
                log::debug!("formula references unknown property '{}'", name);
                Err(EvalError::UnknownReference(name.to_string()))
            }
        }
    }

    fn eval_binary(&self, op: BinOp, left: &Expr, right: &Expr) -> Result<Option<Decimal>, EvalError> {
        let Some(left) = self.eval_expr(left)? else {
            return Ok(None);
        };
        let Some(right) = self.eval_expr(right)? else {
            return Ok(None);
        };
        apply_binop(op, left, right).map(Some)
    }
}

fn apply_binop(op: BinOp, left: Decimal, right: Decimal) -> Result<Decimal, EvalError> {
    let result = match op {
        BinOp::Add => left.checked_add(right),
        BinOp::Subtract => left.checked_sub(right),
        BinOp::Multiply => left.checked_mul(right),
        BinOp::Divide => {
            if right.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            left.checked_div(right)
        }
    };
    result.ok_or(EvalError::Overflow(op))
}

/// Evaluates `ast` against `resolver`.
pub fn evaluate<R: Resolver + ?Sized>(
    ast: &Output,
    resolver: &R,
    null_is_zero: bool,
) -> Result<Option<Decimal>, EvalError> {
    Evaluator::new(resolver, EvalOptions::null_is_zero(null_is_zero)).evaluate(ast)
}
