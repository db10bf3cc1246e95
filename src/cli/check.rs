//! Validate, format and evaluate formulas

use rust_decimal::Decimal;

use super::{CliError, parse_values};
use crate::{EvalOptions, Evaluator, Token, printer::FormulaPrinter};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The formula to check
    pub formula: String,
    /// JSON object of property values
    pub values: Option<String>,
    /// Treat properties without a value as 0
    pub null_is_zero: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid {
        /// The formula as it will be stored
        formula: String,
        /// Property names the formula uses
        references: Vec<String>,
    },
    /// Formula evaluated; `None` is a null result
    Success(Option<Decimal>),
}

/// Execute a formula check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let output = crate::parse(&options.formula)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid {
            formula: crate::serialize(&output),
            references: output.references().into_iter().map(String::from).collect(),
        });
    }

    let json_str = options.values.as_ref().ok_or(CliError::NoInput)?;
    let values = parse_values(json_str)?;

    let evaluator = Evaluator::new(&values, EvalOptions::null_is_zero(options.null_is_zero));
    let result = evaluator.evaluate(&output)?;
    Ok(CheckResult::Success(result.map(|v| v.normalize())))
}

/// Parse a formula and print it back in canonical form
pub fn format_formula(formula: &str, compact: bool) -> Result<String, CliError> {
    let output = crate::parse(formula)?;
    Ok(FormulaPrinter::new(!compact).print(&output))
}

/// Lex a formula into its tokens, END included
pub fn list_tokens(formula: &str) -> Result<Vec<Token>, CliError> {
    Ok(crate::tokenize(formula)?)
}
