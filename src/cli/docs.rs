//! Documentation content for the formula CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Identifiers,
    Nulls,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "grouping" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "identifiers" | "properties" | "names" | "quoting" => Some(Self::Identifiers),
            "nulls" | "null" | "null_is_zero" => Some(Self::Nulls),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"FORMULA DOCUMENTATION

Formulas compute a derived property value from other properties of the same
record. A formula is arithmetic over numbers and property names.

DOCUMENTATION CATEGORIES

  syntax            Numbers, grouping brackets and whitespace
  operators         + - * / and unary minus, precedence and associativity
  identifiers       Bare and quoted property names
  nulls             Properties without a value and --null-is-zero

QUICK REFERENCE

  size * 2 / velocity           Arithmetic over properties
  'Story Points' + 1            Quoted property name
  {estimate - spent} * [1.5]    Any of ( ) { } [ ] groups

Run 'formula doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Identifiers) => Ok(IDENTIFIERS_DOC),
        Some(DocCategory::Nulls) => Ok(NULLS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Numbers and Grouping

NUMBERS
  12    12.5    .5    12.
    Decimal numbers. Arithmetic is exact decimal arithmetic, so
    0.1 + 0.2 is exactly 0.3.

GROUPING
  (a + b)    {a + b}    [a + b]
    The three bracket pairs mean the same thing. A formula keeps the
    pair you typed when it is saved and shown again.

    Example:
      Formula:  {estimate - spent} * 2
      Stored:   {estimate - spent} * 2

    Constraints:
      - A group must be closed with the matching bracket: (a] is an error

WHITESPACE
    Spaces between tokens are ignored.

TODAY
    The word today is reserved. Quote it ('today') to name a property.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Arithmetic

ARITHMETIC OPERATORS
  +     Addition
  -     Subtraction
  *     Multiplication
  /     Division
  -x    Negation (prefix)

PRECEDENCE (tightest first)
  1. unary minus
  2. *  /
  3. +  -

  All binary operators are left-associative:
    10 - 4 - 3     = 3
    1 + 2 * 3      = 7
    (1 + 2) * 3    = 9
    -1 + 2         = 1
    -(1 + 2)       = -3

  Constraints:
    - Division by zero is an error, never infinity
    - A result too large for a decimal is an overflow error
"#;

const IDENTIFIERS_DOC: &str = r#"IDENTIFIERS - Property Names

BARE NAMES
  velocity    story_points    Größe    done%    v2.0
    Any run of characters except whitespace, operators, brackets,
    quotes and the reserved punctuation  & | ^ = < > ! , ; \
    A bare name may not start like a number.

QUOTED NAMES
  'Story Points'    "Story Points"
    Any other name is quoted with ' or ". Write the quote character
    twice to include it in the name:

      'It''s big'       names   It's big
      "Say ""hi"""      names   Say "hi"

    Saved formulas quote with ' and only when needed.

UNKNOWN NAMES
    Evaluating a formula that names a property the record type does
    not have is an error.
"#;

const NULLS_DOC: &str = r#"NULLS - Properties Without a Value

DEFAULT BEHAVIOUR
    If any property used by an operation has no value, the result of
    that operation is null, and so is the formula.

      Values:  {"size": null}
      Formula: size + 1
      Output:  null

NULL IS ZERO
  --null-is-zero
    Treat properties without a value as 0.

      Values:  {"size": null}
      Formula: size + 1
      Output:  1

  Note: an unknown property name is always an error, in either mode.
"#;
