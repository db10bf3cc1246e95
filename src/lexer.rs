use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::ast::{Token, TokenKind};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+").unwrap());
// Tried before IDENTIFIER so that `12` is always a number.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").unwrap());
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^'((?:[^']|'')*)'").unwrap());
static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"((?:[^"]|"")*)""#).unwrap());
// Anything but whitespace, operators, brackets, quotes and reserved punctuation.
static BARE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^\s+\-*/(){}\[\]'"&|^=<>!,;\\]+"#).unwrap());

/// Number of characters of remaining input quoted in a [`LexError`].
const PREVIEW_LEN: usize = 10;

/// Errors raised while splitting formula text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// No token rule matches the input at `position`.
    #[error("Unrecognized input at position {position}: '{preview}'")]
    Unrecognized { position: usize, preview: String },

    /// A number literal too large to represent.
    #[error("Number '{lexeme}' at position {position} is out of range")]
    NumberOutOfRange { position: usize, lexeme: String },
}

impl LexError {
    pub fn position(&self) -> usize {
        match self {
            LexError::Unrecognized { position, .. } | LexError::NumberOutOfRange { position, .. } => {
                *position
            }
        }
    }
}

/// Up to [`PREVIEW_LEN`] characters of `rest`, with `..` when more than nine remain.
fn preview(rest: &str) -> String {
    let mut shown: String = rest.chars().take(PREVIEW_LEN).collect();
    if rest.chars().count() > PREVIEW_LEN - 1 {
        shown.push_str("..");
    }
    shown
}

/// True when `name` written without quotes lexes back as exactly one IDENTIFIER.
pub fn is_bare_identifier(name: &str) -> bool {
    let whole_word = BARE_IDENTIFIER
        .find(name)
        .is_some_and(|m| m.end() == name.len());
    whole_word
        && !NUMBER.is_match(name)
        && !name.eq_ignore_ascii_case("today")
}

fn single_char_kind(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Multiply,
        '/' => TokenKind::Divide,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '{' => TokenKind::LCurly,
        '}' => TokenKind::RCurly,
        '[' => TokenKind::LBox,
        ']' => TokenKind::RBox,
        _ => return None,
    };
    Some(kind)
}

/// Parses number text, accepting the `.5` and `12.` forms.
///
/// Returns `None` when the value does not fit in a `Decimal` or would lose
/// fractional digits to rounding.
fn parse_number(text: &str) -> Option<Decimal> {
    let trimmed = text.strip_suffix('.').unwrap_or(text);
    let value = if trimmed.starts_with('.') {
        Decimal::from_str(&format!("0{trimmed}")).ok()?
    } else {
        Decimal::from_str(trimmed).ok()?
    };
    let fraction_digits = trimmed.split_once('.').map_or(0, |(_, digits)| digits.len());
    (value.scale() as usize == fraction_digits).then_some(value)
}

pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset into `input`
    offset: usize,
    /// Character offset, reported in tokens and errors
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            offset: 0,
            position: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Consumes `text`, which must be a prefix of the remaining input.
    fn advance(&mut self, text: &str) {
        self.offset += text.len();
        self.position += text.chars().count();
    }

    fn skip_whitespace(&mut self) {
        if let Some(m) = WHITESPACE.find(self.rest()) {
            self.advance(m.as_str());
        }
    }

    fn read_number(&mut self, text: &'a str) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(text);
        match parse_number(text) {
            Some(value) => Ok(Token::number(text, value, start)),
            None => Err(LexError::NumberOutOfRange {
                position: start,
                lexeme: text.to_string(),
            }),
        }
    }

    /// Reads a quoted identifier; a doubled quote inside stands for one quote.
    fn read_quoted(&mut self, quote: char) -> Option<Token> {
        let pattern = if quote == '\'' {
            &SINGLE_QUOTED
        } else {
            &DOUBLE_QUOTED
        };
        let caps = pattern.captures(self.rest())?;
        let whole = caps.get(0)?.as_str();
        let body = caps.get(1)?.as_str();
        let doubled: String = [quote, quote].iter().collect();
        let name = body.replace(&doubled, &quote.to_string());

        let start = self.position;
        self.advance(whole);
        Some(Token::new(TokenKind::Identifier, name, start))
    }

    fn read_bare(&mut self) -> Option<Token> {
        let word = BARE_IDENTIFIER.find(self.rest())?.as_str();
        let start = self.position;
        self.advance(word);

        let kind = if word.eq_ignore_ascii_case("today") {
            TokenKind::Today
        } else {
            TokenKind::Identifier
        };
        Some(Token::new(kind, word, start))
    }

    fn unrecognized(&self) -> LexError {
        LexError::Unrecognized {
            position: self.position,
            preview: preview(self.rest()),
        }
    }

    /// Returns the next token. Once the input is exhausted every call yields END.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let rest = self.rest();
        let Some(ch) = rest.chars().next() else {
            return Ok(Token::end(self.position));
        };

        let token = if let Some(m) = NUMBER.find(rest) {
            self.read_number(m.as_str())?
        } else if let Some(kind) = single_char_kind(ch) {
            let start = self.position;
            self.advance(&rest[..ch.len_utf8()]);
            Token::new(kind, ch.to_string(), start)
        } else if ch == '\'' || ch == '"' {
            self.read_quoted(ch).ok_or_else(|| self.unrecognized())?
        } else {
            self.read_bare().ok_or_else(|| self.unrecognized())?
        };

        log::trace!("lexed {} {:?} at {}", token.kind, token.lexeme, token.position);
        Ok(token)
    }

    /// Lexes the whole input; the last token is always END.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::End);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Splits `text` into tokens, ending with END.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(text).tokenize()
}

#[test]
fn test_operators_and_brackets() {
    let kinds: Vec<TokenKind> = tokenize("+-*/(){}[]")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Multiply,
            TokenKind::Divide,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LCurly,
            TokenKind::RCurly,
            TokenKind::LBox,
            TokenKind::RBox,
            TokenKind::End,
        ]
    );
}

#[test]
fn test_preview_truncation() {
    assert_eq!(preview("& 2"), "& 2");
    assert_eq!(preview("123456789"), "123456789");
    assert_eq!(preview("1234567890"), "1234567890..");
    assert_eq!(preview("1234567890abc"), "1234567890..");
}

#[test]
fn test_number_forms() {
    assert_eq!(parse_number("12"), Some(Decimal::from(12)));
    assert_eq!(parse_number("12."), Some(Decimal::from(12)));
    assert_eq!(parse_number(".5"), Decimal::from_str("0.5").ok());
    assert_eq!(parse_number("12.5"), Decimal::from_str("12.5").ok());
    assert_eq!(parse_number("1.50"), Decimal::from_str("1.50").ok());
}

#[test]
fn test_number_precision_limit() {
    let max_scale = format!("0.{}1", "0".repeat(27));
    assert_eq!(parse_number(&max_scale).map(|d| d.scale()), Some(28));

    let too_precise = format!("0.{}1", "0".repeat(28));
    assert_eq!(parse_number(&too_precise), None);
}
