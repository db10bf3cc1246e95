use formula_lang::ast::{BinOp, BracketStyle, Expr, Output};
use formula_lang::{Resolved, evaluate, parse, serialize, serialize_compact};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn number() -> impl Strategy<Value = Decimal> {
    (0i64..100_000, 0u32..4).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,6}",
        "[a-zA-Z0-9 '\"+*/(){}\\[\\]-]{0,8}",
        Just("today".to_string()),
    ]
}

fn op() -> impl Strategy<Value = BinOp> {
    prop_oneof![
        Just(BinOp::Add),
        Just(BinOp::Subtract),
        Just(BinOp::Multiply),
        Just(BinOp::Divide),
    ]
}

fn style() -> impl Strategy<Value = BracketStyle> {
    prop_oneof![
        Just(BracketStyle::Paren),
        Just(BracketStyle::Curly),
        Just(BracketStyle::Box),
    ]
}

fn expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        number().prop_map(Expr::NumberLiteral),
        name().prop_map(Expr::PropertyReference),
    ];
    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (op(), inner.clone(), inner.clone())
                .prop_map(|(op, left, right)| Expr::binary(op, left, right)),
            inner.clone().prop_map(Expr::negate),
            (inner, style()).prop_map(|(inner, style)| Expr::group(inner, style)),
        ]
    })
}

fn resolve(name: &str) -> Resolved {
    match name.len() % 4 {
        0 => Resolved::Absent,
        n => Resolved::Value(Decimal::from(n)),
    }
}

proptest! {
    #[test]
    fn parsed_trees_survive_a_roundtrip(tree in expr()) {
        let parsed = parse(&serialize(&Output::new(tree))).unwrap();
        let reparsed = parse(&serialize(&parsed)).unwrap();
        prop_assert_eq!(reparsed, parsed);
    }

    #[test]
    fn compact_and_spaced_parse_alike(tree in expr()) {
        let output = Output::new(tree);
        prop_assert_eq!(
            parse(&serialize_compact(&output)).unwrap(),
            parse(&serialize(&output)).unwrap()
        );
    }

    #[test]
    fn printing_is_idempotent(tree in expr()) {
        let first = serialize(&Output::new(tree));
        let second = serialize(&parse(&first).unwrap());
        prop_assert_eq!(second, first);
    }

    #[test]
    fn printed_text_evaluates_the_same(tree in expr(), null_is_zero in any::<bool>()) {
        let output = Output::new(tree);
        let reparsed = parse(&serialize(&output)).unwrap();
        let resolver = |name: &str| resolve(name);
        prop_assert_eq!(
            evaluate(&reparsed, &resolver, null_is_zero),
            evaluate(&output, &resolver, null_is_zero)
        );
    }

    #[test]
    fn names_roundtrip_as_references(name in name()) {
        let output = Output::new(Expr::PropertyReference(name));
        prop_assert_eq!(parse(&serialize(&output)).unwrap(), output);
    }
}
