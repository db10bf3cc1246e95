use std::mem;

use crate::ast::{BinOp, BracketStyle, Expr, Output, Token, TokenKind};

/// Maximum nesting of groupings and unary minus.
pub const MAX_DEPTH: usize = 64;

/// Maximum number of binary operators in one formula. Every operator in a
/// chain such as `1 + 1 + ... + 1` adds a level to the tree, which the
/// evaluator and printer walk recursively.
pub const MAX_OPERATORS: usize = 512;

/// A grammar violation: an unexpected token, an unmatched bracket or an
/// incomplete expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Syntax error at position {position}: {message}, found {found}")]
pub struct SyntaxError {
    pub message: String,
    /// Kind of the offending token
    pub token: TokenKind,
    pub lexeme: String,
    pub position: usize,
    found: String,
}

impl SyntaxError {
    fn at(token: &Token, message: impl Into<String>) -> Self {
        let found = match token.kind {
            TokenKind::Number | TokenKind::Identifier => {
                format!("{} '{}'", token.kind.describe(), token.lexeme)
            }
            kind => kind.describe().to_string(),
        };
        SyntaxError {
            message: message.into(),
            token: token.kind,
            lexeme: token.lexeme.clone(),
            position: token.position,
            found,
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    /// Creates a parser over `tokens`. An END token is appended if missing.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::End)) {
            let position = tokens
                .last()
                .map(|t| t.position + t.lexeme.chars().count())
                .unwrap_or(0);
            tokens.push(Token::end(position));
        }
        Parser {
            tokens,
            index: 0,
            depth: 0,
            operators: 0,
        }
    }

    fn current(&self) -> &Token {
        // `new` guarantees a trailing END, and `advance` never moves past it.
        &self.tokens[self.index]
    }

    fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    fn expect(&mut self, kind: TokenKind, message: impl Into<String>) -> Result<(), SyntaxError> {
        if !self.check(kind) {
            return Err(SyntaxError::at(self.current(), message));
        }
        self.advance();
        Ok(())
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::at(
                self.current(),
                format!("formula is nested more than {MAX_DEPTH} levels deep"),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Counts the binary operator at the current token.
    fn count_operator(&mut self) -> Result<(), SyntaxError> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(SyntaxError::at(
                self.current(),
                format!("formula has more than {MAX_OPERATORS} operators"),
            ));
        }
        Ok(())
    }

    /// Parse primary expressions (atoms): numbers, property names and groupings
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let kind = self.current().kind;
        match kind {
            TokenKind::Number => {
                let token = self.current();
                let value = token
                    .value
                    .ok_or_else(|| SyntaxError::at(token, "number token has no value"))?;
                self.advance();
                Ok(Expr::NumberLiteral(value))
            }
            TokenKind::Identifier => {
                let name = mem::take(&mut self.tokens[self.index].lexeme);
                self.advance();
                Ok(Expr::PropertyReference(name))
            }
            TokenKind::LParen | TokenKind::LCurly | TokenKind::LBox => {
                let style = BracketStyle::opened_by(kind).unwrap_or_default();
                self.parse_grouping(style)
            }
            TokenKind::Today => Err(SyntaxError::at(
                self.current(),
                "TODAY is not supported in formulas",
            )),
            TokenKind::End => Err(SyntaxError::at(
                self.current(),
                "unexpected end of formula, expected a number, property name or '('",
            )),
            _ => Err(SyntaxError::at(
                self.current(),
                "expected a number, property name or '('",
            )),
        }
    }

    fn parse_grouping(&mut self, style: BracketStyle) -> Result<Expr, SyntaxError> {
        let opened_at = self.current().position;
        self.advance(); // Consume the opening bracket
        self.enter()?;
        let inner = self.parse_expression()?;
        self.expect(
            style.closing_token(),
            format!(
                "expected '{}' to close '{}' opened at position {}",
                style.close(),
                style.open(),
                opened_at
            ),
        )?;
        self.leave();
        Ok(Expr::group(inner, style))
    }

    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        if self.check(TokenKind::Minus) {
            self.advance();
            self.enter()?;
            let operand = self.parse_unary()?;
            self.leave();
            return Ok(Expr::negate(operand));
        }
        self.parse_primary()
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Multiply => BinOp::Multiply,
                TokenKind::Divide => BinOp::Divide,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Subtract,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_additive()
    }

    /// Parses a complete formula: one expression followed by END.
    pub fn parse(&mut self) -> Result<Output, SyntaxError> {
        let root = self.parse_expression()?;
        self.expect(TokenKind::End, "unexpected input after a complete expression")?;
        Ok(Output::new(root))
    }
}

/// Parses a token sequence into a formula tree.
pub fn parse(tokens: Vec<Token>) -> Result<Output, SyntaxError> {
    Parser::new(tokens).parse()
}
