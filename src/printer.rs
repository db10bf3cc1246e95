//! Formula text output for parsed formula trees.
//!
//! Printing is the inverse of parsing: the text produced for a tree parses
//! back to an equal tree. Grouping nodes are written with the bracket pair
//! they were parsed from, so `{a + b} * 2` stays `{a + b} * 2`.
//!
//! # Features
//!
//! - **Spaced output** via [`serialize()`] - one space around binary operators
//! - **Compact output** via [`serialize_compact()`] - no whitespace at all
//! - **Identifier quoting** - names that would not lex back as a single bare
//!   word are written as `'...'` with inner `'` doubled
//!
//! # Examples
//!
//! ```
//! use formula_lang::printer::{serialize, serialize_compact};
//!
//! let formula = formula_lang::parse("'Story Points'*[1+ velocity]").unwrap();
//!
//! assert_eq!(serialize(&formula), "'Story Points' * [1 + velocity]");
//! assert_eq!(serialize_compact(&formula), "'Story Points'*[1+velocity]");
//! ```

use crate::ast::{BinOp, Expr, Output};
use crate::lexer::is_bare_identifier;

/// Binding strength of negation; above every binary operator.
const UNARY_PRECEDENCE: u8 = 3;
/// Binding strength of literals, references and groupings.
const ATOM_PRECEDENCE: u8 = 4;

pub struct FormulaPrinter {
    spaced: bool,
}

impl FormulaPrinter {
    pub fn new(spaced: bool) -> Self {
        FormulaPrinter { spaced }
    }

    pub fn print(&self, output: &Output) -> String {
        let mut result = String::new();
        self.print_expr(&output.root, &mut result);
        result
    }

    fn print_expr(&self, expr: &Expr, out: &mut String) {
        match expr {
            Expr::NumberLiteral(n) => out.push_str(&n.to_string()),
            Expr::PropertyReference(name) => out.push_str(&quote_identifier(name)),
            Expr::Grouping { inner, style } => {
                out.push(style.open());
                self.print_expr(inner, out);
                out.push(style.close());
            }
            Expr::Negation(operand) => {
                out.push('-');
                self.print_operand(operand, UNARY_PRECEDENCE, false, out);
            }
            Expr::Addition { left, right } => self.print_binary(BinOp::Add, left, right, out),
            Expr::Subtraction { left, right } => {
                self.print_binary(BinOp::Subtract, left, right, out)
            }
            Expr::Multiplication { left, right } => {
                self.print_binary(BinOp::Multiply, left, right, out)
            }
            Expr::Division { left, right } => self.print_binary(BinOp::Divide, left, right, out),
        }
    }

    fn print_binary(&self, op: BinOp, left: &Expr, right: &Expr, out: &mut String) {
        self.print_operand(left, op.precedence(), false, out);
        if self.spaced {
            out.push(' ');
            out.push(op.symbol());
            out.push(' ');
        } else {
            out.push(op.symbol());
        }
        self.print_operand(right, op.precedence(), op.is_right_sensitive(), out);
    }

    /// Prints a child of an operator, adding `( )` only where a hand-built
    /// tree would otherwise read back with a different shape. Trees from the
    /// parser already carry their groupings and never need this.
    fn print_operand(&self, child: &Expr, min_precedence: u8, strict: bool, out: &mut String) {
        let precedence = precedence_of(child);
        let wrap = precedence < min_precedence || (strict && precedence == min_precedence);
        if wrap {
            out.push('(');
        }
        self.print_expr(child, out);
        if wrap {
            out.push(')');
        }
    }
}

fn precedence_of(expr: &Expr) -> u8 {
    match expr {
        Expr::NumberLiteral(n) if n.is_sign_negative() => UNARY_PRECEDENCE,
        Expr::NumberLiteral(_) | Expr::PropertyReference(_) | Expr::Grouping { .. } => {
            ATOM_PRECEDENCE
        }
        Expr::Negation(_) => UNARY_PRECEDENCE,
        _ => expr
            .as_binary()
            .map_or(ATOM_PRECEDENCE, |(op, _, _)| op.precedence()),
    }
}

/// Returns true when `name` must be quoted to read back as the same property.
pub fn needs_quoting(name: &str) -> bool {
    !is_bare_identifier(name)
}

/// Writes a property name the way a user would type it.
///
/// ```
/// use formula_lang::printer::quote_identifier;
///
/// assert_eq!(quote_identifier("velocity"), "velocity");
/// assert_eq!(quote_identifier("Story Points"), "'Story Points'");
/// assert_eq!(quote_identifier("It's"), "'It''s'");
/// ```
pub fn quote_identifier(name: &str) -> String {
    if needs_quoting(name) {
        format!("'{}'", name.replace('\'', "''"))
    } else {
        name.to_string()
    }
}

// Convenience functions

/// Converts a formula tree to text with spaces around binary operators.
pub fn serialize(output: &Output) -> String {
    FormulaPrinter::new(true).print(output)
}

/// Converts a formula tree to text without any whitespace.
pub fn serialize_compact(output: &Output) -> String {
    FormulaPrinter::new(false).print(output)
}
