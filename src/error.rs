use crate::{evaluator::EvalError, lexer::LexError, parser::SyntaxError};

/// Any error raised while turning formula text into a value.
///
/// Lex and syntax errors mean the formula text itself is rejected; eval
/// errors concern one record's computed value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl FormulaError {
    /// True for errors that reject the formula text rather than one evaluation.
    pub fn is_definition_error(&self) -> bool {
        matches!(self, FormulaError::Lex(_) | FormulaError::Syntax(_))
    }
}
