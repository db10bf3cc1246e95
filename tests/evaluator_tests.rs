use formula_lang::{
    EvalError, EvalOptions, Evaluator, FormulaError, Resolved, Resolver, evaluate, evaluate_str,
    parse,
};
use formula_lang::parser::MAX_OPERATORS;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn record(pairs: Vec<(&str, Option<&str>)>) -> HashMap<String, Option<Decimal>> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.map(dec)))
        .collect()
}

fn eval_with<R: Resolver>(formula: &str, resolver: &R, null_is_zero: bool) -> Result<Option<Decimal>, EvalError> {
    let output = parse(formula).unwrap();
    evaluate(&output, resolver, null_is_zero)
}

fn eval_const(formula: &str) -> Decimal {
    let empty = record(vec![]);
    eval_with(formula, &empty, false).unwrap().unwrap()
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_precedence() {
    assert_eq!(eval_const("1+2*3"), dec("7"));
    assert_eq!(eval_const("(1+2)*3"), dec("9"));
}

#[test]
fn test_unary_minus() {
    assert_eq!(eval_const("-1+2"), dec("1"));
    assert_eq!(eval_const("-(1+2)"), dec("-3"));
    assert_eq!(eval_const("--4"), dec("4"));
    assert_eq!(eval_const("3 - -4"), dec("7"));
}

#[test]
fn test_left_associativity() {
    assert_eq!(eval_const("10 - 4 - 3"), dec("3"));
    assert_eq!(eval_const("64 / 4 / 2"), dec("8"));
    assert_eq!(eval_const("8 / 4 * 2"), dec("4"));
}

#[test]
fn test_all_bracket_styles_are_equivalent() {
    assert_eq!(eval_const("(1 + 2) * 3"), eval_const("{1 + 2} * 3"));
    assert_eq!(eval_const("{1 + 2} * 3"), eval_const("[1 + 2] * 3"));
}

#[test]
fn test_decimal_arithmetic_is_exact() {
    assert_eq!(eval_const("0.1 + 0.2"), dec("0.3"));
    assert_eq!(eval_const(".5 * 12."), dec("6"));
    assert_eq!(eval_const("1 / 4"), dec("0.25"));
}

#[test]
fn test_properties() {
    let values = record(vec![("size", Some("8")), ("velocity", Some("4")), ("Story Points", Some("3"))]);
    assert_eq!(eval_with("size * 2 / velocity", &values, false).unwrap(), Some(dec("4")));
    assert_eq!(eval_with("'Story Points' + 1", &values, false).unwrap(), Some(dec("4")));
}

// ============================================================================
// Nulls
// ============================================================================

#[test]
fn test_absent_value_propagates_null() {
    let values = record(vec![("x", None)]);
    assert_eq!(eval_with("x + 1", &values, false).unwrap(), None);
    assert_eq!(eval_with("1 + x", &values, false).unwrap(), None);
    assert_eq!(eval_with("-x", &values, false).unwrap(), None);
    assert_eq!(eval_with("{x}", &values, false).unwrap(), None);
    assert_eq!(eval_with("x", &values, false).unwrap(), None);
}

#[test]
fn test_null_is_zero() {
    let values = record(vec![("x", None)]);
    assert_eq!(eval_with("x + 1", &values, true).unwrap(), Some(dec("1")));
    assert_eq!(eval_with("x * 5 - 2", &values, true).unwrap(), Some(dec("-2")));
}

#[test]
fn test_null_short_circuits_remaining_operand() {
    let values = record(vec![("x", None)]);
    // The unknown name on the right is never resolved.
    assert_eq!(eval_with("x * missing", &values, false).unwrap(), None);
    // Nor is a zero divisor checked.
    assert_eq!(eval_with("x / 0", &values, false).unwrap(), None);
}

#[test]
fn test_null_does_not_hide_errors_before_it() {
    let values = record(vec![("x", None)]);
    assert_eq!(
        eval_with("missing * x", &values, false),
        Err(EvalError::UnknownReference("missing".to_string()))
    );
}

#[test]
fn test_null_propagates_outward() {
    let values = record(vec![("x", None), ("y", Some("2"))]);
    assert_eq!(eval_with("y * (x + 1) + 10", &values, false).unwrap(), None);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_division_by_zero() {
    let empty = record(vec![]);
    assert_eq!(eval_with("1/0", &empty, false), Err(EvalError::DivisionByZero));
    assert_eq!(eval_with("1/0", &empty, true), Err(EvalError::DivisionByZero));
    assert_eq!(eval_with("1/(2-2)", &empty, false), Err(EvalError::DivisionByZero));
}

#[test]
fn test_division_by_zero_from_null_is_zero() {
    let values = record(vec![("x", None)]);
    assert_eq!(eval_with("1 / x", &values, true), Err(EvalError::DivisionByZero));
}

#[test]
fn test_unknown_reference() {
    let values = record(vec![("x", Some("1"))]);
    let err = eval_with("x + y", &values, true).unwrap_err();
    assert_eq!(err, EvalError::UnknownReference("y".to_string()));
    assert_eq!(err.to_string(), "Unknown property: 'y'");
}

#[test]
fn test_overflow() {
    let empty = record(vec![]);
    let max = Decimal::MAX.to_string();
    let result = eval_with(&format!("{max} + {max}"), &empty, false);
    assert!(matches!(result, Err(EvalError::Overflow(_))));
}

#[test]
fn test_longest_chain_evaluates() {
    let formula = format!("{}1", "1 + ".repeat(MAX_OPERATORS));
    assert_eq!(eval_const(&formula), Decimal::from(MAX_OPERATORS + 1));

    let nested = format!("[{}x]", "x * ".repeat(MAX_OPERATORS));
    let values = record(vec![("x", Some("1"))]);
    assert_eq!(eval_with(&nested, &values, false).unwrap(), Some(dec("1")));
}

#[test]
fn test_overlong_chain_is_a_syntax_error() {
    let values = record(vec![]);
    let formula = format!("{}1", "1+".repeat(10_000));
    let err = evaluate_str(&formula, &values, EvalOptions::default()).unwrap_err();
    assert!(matches!(err, FormulaError::Syntax(_)));
}

#[test]
fn test_tiny_divisor_is_not_rounded_to_zero() {
    let values = record(vec![]);
    let divisor = format!("0.{}1", "0".repeat(31));
    let err = evaluate_str(&format!("1 / {divisor}"), &values, EvalOptions::default()).unwrap_err();
    assert!(matches!(err, FormulaError::Lex(_)));

    let smallest = format!("0.{}1", "0".repeat(27));
    assert_eq!(eval_const(&format!("{smallest} * 2")), dec(&format!("0.{}2", "0".repeat(27))));
}

// ============================================================================
// Resolvers
// ============================================================================

#[test]
fn test_closure_resolver() {
    let resolver = |name: &str| match name {
        "estimate" => Resolved::Value(dec("5")),
        "spent" => Resolved::Absent,
        _ => Resolved::Unknown,
    };
    assert_eq!(eval_with("estimate * 2", &resolver, false).unwrap(), Some(dec("10")));
    assert_eq!(eval_with("estimate - spent", &resolver, false).unwrap(), None);
    assert_eq!(eval_with("estimate - spent", &resolver, true).unwrap(), Some(dec("5")));
}

#[test]
fn test_same_tree_different_records() {
    let output = parse("size * 2").unwrap();
    let small = record(vec![("size", Some("1"))]);
    let large = record(vec![("size", Some("100"))]);

    let options = EvalOptions::default();
    assert_eq!(Evaluator::new(&small, options).evaluate(&output).unwrap(), Some(dec("2")));
    assert_eq!(Evaluator::new(&large, options).evaluate(&output).unwrap(), Some(dec("200")));
    // Evaluation leaves the tree untouched.
    assert_eq!(output, parse("size * 2").unwrap());
}

#[test]
fn test_concurrent_evaluation() {
    let output = parse("n * n").unwrap();
    std::thread::scope(|s| {
        for i in 1..=4i64 {
            let output = &output;
            s.spawn(move || {
                let resolver = move |_: &str| Resolved::Value(Decimal::from(i));
                let result = evaluate(output, &resolver, false).unwrap();
                assert_eq!(result, Some(Decimal::from(i * i)));
            });
        }
    });
}

#[test]
fn test_evaluate_str_reports_each_stage() {
    let values = record(vec![("x", Some("2"))]);
    let options = EvalOptions::default();

    assert_eq!(evaluate_str("x * 3", &values, options).unwrap(), Some(dec("6")));
    assert!(matches!(evaluate_str("x & 3", &values, options), Err(FormulaError::Lex(_))));
    assert!(matches!(evaluate_str("x *", &values, options), Err(FormulaError::Syntax(_))));
    assert!(matches!(evaluate_str("x / 0", &values, options), Err(FormulaError::Eval(_))));

    let err = evaluate_str("x *", &values, options).unwrap_err();
    assert!(err.is_definition_error());
    let err = evaluate_str("y", &values, options).unwrap_err();
    assert!(!err.is_definition_error());
}
