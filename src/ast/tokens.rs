use std::fmt;

use rust_decimal::Decimal;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Decimal number
    ///
    /// # Examples
    /// ```text
    /// 12
    /// 12.5
    /// .5
    /// 12.
    /// ```
    Number,

    /// Addition (`+`)
    Plus,

    /// Subtraction or unary negation (`-`)
    Minus,

    /// Multiplication (`*`)
    Multiply,

    /// Division (`/`)
    Divide,

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// `[`
    LBox,
    /// `]`
    RBox,

    /// Property name, bare or quoted
    ///
    /// # Examples
    /// ```text
    /// velocity
    /// 'Story Points'
    /// "Owner's ""Estimate"""
    /// ```
    Identifier,

    /// The bare word `today`.
    ///
    /// Reserved for a date pseudo-literal; no grammar rule consumes it yet.
    Today,

    /// End of input
    End,
}

impl TokenKind {
    /// Short human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Multiply => "'*'",
            TokenKind::Divide => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LCurly => "'{'",
            TokenKind::RCurly => "'}'",
            TokenKind::LBox => "'['",
            TokenKind::RBox => "']'",
            TokenKind::Identifier => "property name",
            TokenKind::Today => "TODAY",
            TokenKind::End => "end of formula",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::LParen => "L_PAREN",
            TokenKind::RParen => "R_PAREN",
            TokenKind::LCurly => "L_CURLY",
            TokenKind::RCurly => "R_CURLY",
            TokenKind::LBox => "L_BOX",
            TokenKind::RBox => "R_BOX",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Today => "TODAY",
            TokenKind::End => "END",
        };
        f.pad(name)
    }
}

/// A token produced by the lexer.
///
/// For identifiers the lexeme is the property name with quoting removed;
/// for every other kind it is the source text of the token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Parsed value, present only for [`TokenKind::Number`]
    pub value: Option<Decimal>,
    /// Character offset of the token in the formula text
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            value: None,
            position,
        }
    }

    pub fn number(lexeme: impl Into<String>, value: Decimal, position: usize) -> Self {
        Token {
            kind: TokenKind::Number,
            lexeme: lexeme.into(),
            value: Some(value),
            position,
        }
    }

    pub fn end(position: usize) -> Self {
        Token::new(TokenKind::End, "", position)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
