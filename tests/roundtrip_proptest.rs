//! Property-based tests for the scanner, parser and unparser.
//!
//! Generated sources are always syntactically valid, so every one of them
//! must parse, unparse, and parse again to an equal tree.

use matc::frontend::{parse, parse_expression, tokenize, TokenKind, Unparse};
use proptest::prelude::*;

/// Names start with `v` so they never collide with a keyword.
fn name_strategy() -> impl Strategy<Value = String> {
    "v[a-z0-9_]{0,5}"
}

fn operator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "+", "-", "*", "/", "<", "<=", ">", ">=", "==", "!=", "&&", "||",
    ])
}

fn leaf_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        name_strategy(),
        // Integer constants
        "[0-9]{1,4}",
        // Float constants
        "[0-9]{1,3}\\.[0-9]{1,3}",
        // String constants, including escaped quotes and raw newlines
        "\"([a-z ]|\\\\\"){0,6}\"",
        "\"[a-z]{0,2}\n[ a-z]{0,3}\"",
        Just("True".to_string()),
        Just("False".to_string()),
    ]
}

fn expr_strategy() -> impl Strategy<Value = String> {
    leaf_strategy().prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (inner.clone(), operator_strategy(), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            inner.clone().prop_map(|e| format!("({})", e)),
            inner.clone().prop_map(|e| format!("!{}", e)),
            (name_strategy(), inner.clone()).prop_map(|(f, arg)| format!("{}({})", f, arg)),
            (name_strategy(), inner.clone(), inner.clone())
                .prop_map(|(m, r, c)| format!("{}[{} : {}]", m, r, c)),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| format!("if {} then {} else {}", c, t, e)),
            (name_strategy(), inner.clone(), inner)
                .prop_map(|(v, e, r)| format!("let {} = {}; in {} end", v, e, r)),
        ]
    })
}

fn stmt_strategy() -> impl Strategy<Value = String> {
    let simple = prop_oneof![
        (name_strategy(), expr_strategy()).prop_map(|(v, e)| format!("{} = {};", v, e)),
        (name_strategy(), expr_strategy(), expr_strategy(), expr_strategy())
            .prop_map(|(m, r, c, e)| format!("{}[{} : {}] = {};", m, r, c, e)),
        expr_strategy().prop_map(|e| format!("print({});", e)),
        name_strategy().prop_map(|v| format!("int {};", v)),
        (name_strategy(), expr_strategy()).prop_map(|(m, e)| format!("matrix {} = {};", m, e)),
        Just(";".to_string()),
    ];
    simple.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|s| format!("{{ {} }}", s.join(" "))),
            (expr_strategy(), inner.clone()).prop_map(|(c, s)| format!("if ({}) {}", c, s)),
            (expr_strategy(), inner.clone(), inner.clone())
                .prop_map(|(c, t, e)| format!("if ({}) {} else {}", c, t, e)),
            (expr_strategy(), inner.clone()).prop_map(|(c, s)| format!("while ({}) {}", c, s)),
            (name_strategy(), expr_strategy(), expr_strategy(), inner)
                .prop_map(|(v, a, b, s)| format!("repeat ({} = {} to {}) {}", v, a, b, s)),
        ]
    })
}

fn program_strategy() -> impl Strategy<Value = String> {
    (name_strategy(), prop::collection::vec(stmt_strategy(), 0..6))
        .prop_map(|(name, stmts)| format!("{} () {{\n{}\n}}", name, stmts.join("\n")))
}

proptest! {
    #[test]
    fn test_scan_never_panics(input in ".{0,64}") {
        let tokens = tokenize(&input);
        prop_assert!(tokens.last().map(|t| t.kind == TokenKind::EndOfFile).unwrap_or(false));
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
        for token in &tokens[..tokens.len() - 1] {
            prop_assert!(!token.lexeme.is_empty());
        }
    }

    #[test]
    fn test_expression_round_trip(source in expr_strategy()) {
        let first = parse_expression(&source).unwrap();
        let rendered = first.unparse();
        let second = parse_expression(&rendered).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(rendered, second.unparse());
    }

    #[test]
    fn test_program_round_trip(source in program_strategy()) {
        let first = parse(&source).unwrap();
        let rendered = first.unparse();
        let second = parse(&rendered).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(rendered, second.unparse());
    }

    #[test]
    fn test_translation_is_total(source in program_strategy()) {
        let cpp = matc::translate(&source).unwrap();
        prop_assert!(cpp.starts_with("#include <iostream>\n"));
        prop_assert!(cpp.ends_with("}\n"), "output does not end with closing brace");
    }
}
