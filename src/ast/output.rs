use std::collections::HashSet;
use std::fmt;

use crate::ast::Expr;
use crate::printer::FormulaPrinter;

/// Complete parsed formula.
///
/// Built once per formula text and read-only afterwards; evaluating or
/// printing it never changes it, so one tree can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    /// Root expression
    pub root: Expr,
}

impl Output {
    pub fn new(root: Expr) -> Self {
        Output { root }
    }

    /// Distinct property names used by the formula, in order of first appearance.
    pub fn references(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut names: Vec<&str> = Vec::new();
        self.root.for_each_reference(&mut |name| {
            if seen.insert(name) {
                names.push(name);
            }
        });
        names
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&FormulaPrinter::new(true).print(self))
    }
}
