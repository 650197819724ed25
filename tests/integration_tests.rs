//! Integration tests for the translation pipeline.

use matc::prelude::*;
use matc::{translate, translate_file, translate_with, unparse};

#[test]
fn test_keyword_wins_tie_with_identifier() {
    let tokens = tokenize("int");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::IntKwd);
    assert!(tokens[1].is_eof());

    let tokens = tokenize("intx");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::VariableName);
    assert_eq!(tokens[0].lexeme, "intx");
}

#[test]
fn test_left_associativity() {
    let expr = parse_expression("8 - 3 - 2").expect("Failed to parse");
    let expected = Expr::binary(
        BinaryOp::Sub,
        Expr::binary(BinaryOp::Sub, Expr::int("8"), Expr::int("3")),
        Expr::int("2"),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_precedence() {
    let expr = parse_expression("1 + 2 * 3").expect("Failed to parse");
    let expected = Expr::binary(
        BinaryOp::Add,
        Expr::int("1"),
        Expr::binary(BinaryOp::Mul, Expr::int("2"), Expr::int("3")),
    );
    assert_eq!(expr, expected);
    assert_eq!(CppCodeGen::default().generate_expr(&expr), "(1 + (2 * 3))");
}

#[test]
fn test_matrix_cell_codegen() {
    let source = "p () { matrix m [ 3 : 3 ] i : j = 0 ; m [ 1 : 2 ] = 5 ; }";
    let cpp = translate(source).expect("Failed to translate");
    assert!(cpp.contains("    *(m.access(1, 2)) = 5;\n"));
}

#[test]
fn test_long_matrix_declaration_expansion() {
    let stmt = parse_statement("matrix m [ 2 : 2 ] i : j = i + j ;").expect("Failed to parse");
    let cpp = CppCodeGen::default().generate_stmt(&stmt);
    let lines: Vec<&str> = cpp.lines().map(str::trim).collect();
    assert_eq!(
        lines,
        vec![
            "matrix m(2, 2);",
            "for (int i = 0; i < 2; i++) {",
            "for (int j = 0; j < 2; j++) {",
            "*(m.access(i, j)) = (i + j);",
            "}",
            "}",
        ]
    );
}

#[test]
fn test_fail_fast_diagnostics() {
    let err = parse_statement("int 5 ;").expect_err("Parse should fail");
    assert_eq!(err.kind, ParseErrorKind::ExpectedToken);
    assert_eq!(err.expected.as_deref(), Some("variable name"));
    assert_eq!(err.found.as_deref(), Some("integer constant"));
    assert_eq!(err.to_string(), "Expected variable name but found integer constant at 1:5-6");
}

#[test]
fn test_program_structure() {
    let program = parse("p ( ) { print ( 1 ) ; }").expect("Failed to parse");
    assert_eq!(program.name.as_str(), "p");
    let stmts: Vec<&Stmt> = program.stmts.iter().collect();
    assert_eq!(stmts, vec![&Stmt::Print(Expr::int("1"))]);
}

#[test]
fn test_round_trip_stability() {
    let source = r#"
        sample () {
            // scalars
            int i; float f; string s; boolean b;
            i = 0; f = 2.5; s = "tab\tand \"quote\""; b = True;

            /* matrices */
            matrix a = matrix_read("a.data");
            matrix id [ n_rows(a) : n_cols(a) ] r : c = if r == c then 1 else 0;
            matrix p = a * id;

            repeat (i = 0 to n_rows(p) - 1) {
                if (p[i : i] >= 1 || !b) p[i : i] = p[i : i] / 2;
                else {
                    print(p[i : i]);
                    ;
                }
            }
            while (i > 0 && (f < 10.0)) { i = i - 1; f = f * 2.0; }
            print(let int t; t = i; in t + 1 end);
            { }
        }
    "#;

    let first = parse(source).expect("Failed to parse");
    let rendered = unparse(&first);
    let second = parse(&rendered).expect("Unparsed output should re-parse");
    assert_eq!(first, second);
    assert_eq!(rendered, unparse(&second));
}

#[test]
fn test_lexical_error_reported_with_position() {
    let source = "p () {\n    x = 3 @ 4;\n}";
    let err = parse(source).expect_err("Parse should fail");
    assert_eq!(err.kind, ParseErrorKind::Lexical);
    assert_eq!(err.span.start.line, 2);
    assert_eq!(err.span.start.column, 11);

    let snippet = SourceMap::new(source).snippet(&err.span).unwrap();
    assert_eq!(snippet, "    x = 3 @ 4;\n          ^");
}

#[test]
fn test_translation_of_complete_program() {
    let source = r#"
        main () {
            matrix m = matrix_read("data/m.data");
            int k;
            repeat (k = 0 to n_rows(m) - 1) {
                print(m[k : 0]);
            }
            if (k < 3) print("small"); else print("large");
        }
    "#;
    let cpp = translate(source).expect("Failed to translate");
    let expected = concat!(
        "#include <iostream>\n",
        "#include \"include/Matrix.h\"\n",
        "#include <math.h>\n",
        "using namespace std;\n",
        "\n",
        "int main() {\n",
        "    matrix m(matrix::matrix_read(\"data/m.data\"));\n",
        "    int k;\n",
        "    for (k = 0; k <= (m.n_rows() - 1); k++) {\n",
        "        cout << *(m.access(k, 0));\n",
        "    }\n",
        "    (((k < 3)) ? (void)((cout << \"small\")) : (void)((cout << \"large\")));\n",
        "}\n",
    );
    assert_eq!(cpp, expected);
}

#[test]
fn test_translate_with_custom_config() {
    let config = CodegenConfig::default()
        .with_indent_width(2)
        .with_matrix_header("runtime/matrix.hpp");
    let cpp = translate_with("p () { { x = 1; } }", &config).expect("Failed to translate");
    assert!(cpp.contains("#include \"runtime/matrix.hpp\"\n"));
    assert!(cpp.contains("int main() {\n  {\n    x = 1;\n  }\n}\n"));
}

#[test]
fn test_ast_serializes_to_json() {
    let program = parse("p () { x = !True; }").expect("Failed to parse");
    let json = serde_json::to_value(&program).expect("Failed to serialize");
    assert_eq!(json["name"], "p");
    let first = &json["stmts"][0]["Assign"];
    assert_eq!(first["name"], "x");
    assert_eq!(first["value"]["Not"]["Bool"], true);
}

#[test]
fn test_long_flat_program_stays_within_stack() {
    let source = format!("p () {{\n{}}}", "x = 1;\n".repeat(100_000));
    let program = parse(&source).expect("Failed to parse");
    assert_eq!(program.stmts.len(), 100_000);

    let again = parse(&unparse(&program)).expect("Failed to re-parse");
    assert_eq!(program, again);
    assert!(translate(&source).is_ok());
    assert!(serde_json::to_string(&program).is_ok());

    drop(again);
    drop(program);
}

#[test]
fn test_string_constant_newlines_round_trip() {
    let source = "p () { { s = \"a\nb\"; } x = let s = \"c\n  d\"; in s end; }";
    let program = parse(source).expect("Failed to parse");
    assert_eq!(parse(&unparse(&program)).expect("Failed to re-parse"), program);

    let cpp = translate(source).expect("Failed to translate");
    assert!(cpp.contains("s = \"a\nb\";"));
    assert!(cpp.contains("({ s = \"c\n  d\"; s; })"));
}

#[test]
fn test_no_partial_output_on_error() {
    assert!(translate("p () { x = 1; y = ; }").is_err());
    assert!(translate("p () { x = 1; }").is_ok());
}

#[test]
fn test_translate_file() {
    let dir = std::env::temp_dir();
    let good = dir.join(format!("matc_good_{}.mat", std::process::id()));
    let bad = dir.join(format!("matc_bad_{}.mat", std::process::id()));
    std::fs::write(&good, "p () { print(1); }").unwrap();
    std::fs::write(&bad, "p () { print(1) }").unwrap();

    let config = CodegenConfig::default();
    let cpp = translate_file(&good, &config).expect("Failed to translate file");
    assert!(cpp.contains("cout << 1;"));
    assert!(matches!(translate_file(&bad, &config), Err(MatcError::Parse(_))));
    assert!(matches!(
        translate_file(dir.join("matc_missing_file.mat"), &config),
        Err(MatcError::Io(_))
    ));

    std::fs::remove_file(good).unwrap();
    std::fs::remove_file(bad).unwrap();
}
