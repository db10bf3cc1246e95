pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BinOp, BracketStyle, Expr, Output, Token, TokenKind};
pub use error::FormulaError;
pub use evaluator::{EvalError, EvalOptions, Evaluator, evaluate};
pub use lexer::{LexError, Lexer, tokenize};
pub use parser::{Parser, SyntaxError};
pub use printer::{FormulaPrinter, serialize, serialize_compact};
pub use value::{Resolved, Resolver};

use rust_decimal::Decimal;

/// Lexes and parses formula text.
///
/// # Examples
///
/// ```
/// use formula_lang::{BracketStyle, Expr};
///
/// let formula = formula_lang::parse("{1 + 2}").unwrap();
/// assert!(matches!(formula.root, Expr::Grouping { style: BracketStyle::Curly, .. }));
/// assert_eq!(formula_lang::serialize(&formula), "{1 + 2}");
/// ```
pub fn parse(text: &str) -> Result<Output, FormulaError> {
    let tokens = tokenize(text)?;
    let output = parser::parse(tokens)?;
    log::debug!("parsed formula {:?}", text);
    Ok(output)
}

/// Parses and evaluates formula text in one step.
pub fn evaluate_str<R: Resolver + ?Sized>(
    text: &str,
    resolver: &R,
    options: EvalOptions,
) -> Result<Option<Decimal>, FormulaError> {
    let output = parse(text)?;
    Ok(Evaluator::new(resolver, options).evaluate(&output)?)
}
