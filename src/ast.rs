//! # Formula Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for the
//! formula language used by derived ("formula") properties. A formula is a
//! four-operator arithmetic expression over numeric literals and property
//! references:
//!
//! ```text
//! size * 2 / velocity
//! 'Story Points' + 1
//! {estimate - [spent + 0.5]} * 2
//! ```
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Binary operators and grouping bracket styles
//! - **[expressions]** - Expression nodes (literals, references, operations, groupings)
//! - **[output]** - The top-level wrapper returned by a successful parse
//!
//! ## Grouping Notations
//!
//! `( )`, `{ }` and `[ ]` are interchangeable ways to group a sub-expression.
//! They mean the same thing to the evaluator; the tree keeps the notation the
//! user typed so that printing the formula back gives the same brackets.
//!
//! ## Property References
//!
//! A bare word such as `velocity` names a property. Names containing spaces,
//! operators or quotes are written quoted, with the quote character doubled
//! inside:
//!
//! ```text
//! 'Story Points'
//! "Owner's ""Estimate"""
//! ```
pub mod expressions;
pub mod operators;
pub mod output;
pub mod tokens;

pub use expressions::Expr;
pub use operators::{BinOp, BracketStyle};
pub use output::Output;
pub use tokens::{Token, TokenKind};
