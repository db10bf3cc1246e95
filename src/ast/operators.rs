use crate::ast::TokenKind;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
}

impl BinOp {
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Subtract => '-',
            BinOp::Multiply => '*',
            BinOp::Divide => '/',
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Subtract => 1,
            BinOp::Multiply | BinOp::Divide => 2,
        }
    }

    /// Operators whose right operand must be grouped even at equal precedence
    /// (`a - (b - c)` is not `a - b - c`).
    pub fn is_right_sensitive(self) -> bool {
        matches!(self, BinOp::Subtract | BinOp::Divide)
    }
}

/// The bracket pair a grouping was written with.
///
/// All three are equivalent when evaluating; the style only matters when the
/// formula is printed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BracketStyle {
    /// `( )`
    #[default]
    Paren,
    /// `{ }`
    Curly,
    /// `[ ]`
    Box,
}

impl BracketStyle {
    pub fn open(self) -> char {
        match self {
            BracketStyle::Paren => '(',
            BracketStyle::Curly => '{',
            BracketStyle::Box => '[',
        }
    }

    pub fn close(self) -> char {
        match self {
            BracketStyle::Paren => ')',
            BracketStyle::Curly => '}',
            BracketStyle::Box => ']',
        }
    }

    /// The pair as written, e.g. `"{}"`.
    pub fn as_str(self) -> &'static str {
        match self {
            BracketStyle::Paren => "()",
            BracketStyle::Curly => "{}",
            BracketStyle::Box => "[]",
        }
    }

    pub fn from_pair(pair: &str) -> Option<Self> {
        match pair {
            "()" => Some(BracketStyle::Paren),
            "{}" => Some(BracketStyle::Curly),
            "[]" => Some(BracketStyle::Box),
            _ => None,
        }
    }

    /// Style opened by `kind`, if it is an opening bracket.
    pub fn opened_by(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::LParen => Some(BracketStyle::Paren),
            TokenKind::LCurly => Some(BracketStyle::Curly),
            TokenKind::LBox => Some(BracketStyle::Box),
            _ => None,
        }
    }

    pub fn closing_token(self) -> TokenKind {
        match self {
            BracketStyle::Paren => TokenKind::RParen,
            BracketStyle::Curly => TokenKind::RCurly,
            BracketStyle::Box => TokenKind::RBox,
        }
    }
}
