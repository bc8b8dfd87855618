// End-to-end tests for the compile pipeline

use parenc::compiler::constants::MAX_NESTING;
use parenc::compiler::CompileError;
use parenc::parser::lexer::{LexError, LexErrorKind};
use parenc::parser::parse::ParseError;
use parenc::{compile, CompileOptions, Compiler};

fn unoptimized(source: &str) -> Result<String, CompileError> {
    Compiler::new(CompileOptions {
        optimize: false,
        ..CompileOptions::default()
    })
    .compile(source)
}

#[test]
fn test_nested_calls() {
    let out = compile("(add 10 (subtract 10 6))").unwrap();
    insta::assert_snapshot!(out, @"add(10, subtract(10, 6));");
}

#[test]
fn test_string_and_boolean_arguments() {
    let out = compile("(print \"Hello\" true)").unwrap();
    insta::assert_snapshot!(out, @r#"print("Hello", true);"#);
}

#[test]
fn test_operator_names_without_optimizer() {
    let out = unoptimized("(+ 5 (* 3 2))").unwrap();
    insta::assert_snapshot!(out, @"+(5, *(3, 2));");
}

#[test]
fn test_operator_calls_fold() {
    assert_eq!(compile("(+ 5 (* 3 2))").unwrap(), "11");
    assert_eq!(compile("(print (- 10 (/ 7 2)))").unwrap(), "print(6.5);");
    assert_eq!(compile("(/ 1 0)").unwrap(), "inf");
}

#[test]
fn test_partial_folding() {
    // Only the all-literal call collapses
    let out = compile("(+ 1 (f 2) (* 2 2))").unwrap();
    insta::assert_snapshot!(out, @"+(1, f(2), 4);");
}

#[test]
fn test_binary_expressions() {
    let out = compile("(f + 1 2 * 3 (g 4))").unwrap();
    insta::assert_snapshot!(out, @"f(1 + 2, 3 * g(4));");

    assert_eq!(compile("- 9 (h)").unwrap(), "9 - h()");
}

#[test]
fn test_multiple_programs_entries() {
    let out = compile("(a 1)\n (b \"x\")  (c false)").unwrap();
    insta::assert_snapshot!(out, @r#"
    a(1);
    b("x");
    c(false);
    "#);
}

#[test]
fn test_empty_source() {
    assert_eq!(compile("").unwrap(), "");
    assert_eq!(compile("   ").unwrap(), "");
}

#[test]
fn test_inlining_definitions() {
    let source = "(define \"answer\" 0 (* 6 7)) (print (answer) (other))";
    let out = compile(source).unwrap();
    insta::assert_snapshot!(out, @r#"
    define("answer", 0, 42);
    print(42, other());
    "#);

    // Without the optimizer the call stays a call
    assert_eq!(
        unoptimized(source).unwrap(),
        "define(\"answer\", 0, *(6, 7));\nprint(answer(), other());"
    );
}

#[test]
fn test_recursive_definition_is_rejected() {
    let err = compile("(define \"loop\" 0 (loop)) (loop)").unwrap_err();
    assert_eq!(
        err,
        CompileError::RecursiveInline {
            name: "loop".to_string()
        }
    );
    assert_eq!(err.to_string(), "cannot inline 'loop': definition is recursive");
}

#[test]
fn test_inline_depth_option() {
    let shallow = Compiler::new(CompileOptions {
        max_inline_depth: 1,
        ..CompileOptions::default()
    });
    let err = shallow
        .compile("(define \"a\" 0 (b)) (define \"b\" 0 1) (a)")
        .unwrap_err();

    assert_eq!(
        err,
        CompileError::InlineDepthExceeded {
            name: "b".to_string(),
            limit: 1
        }
    );
}

#[test]
fn test_unexpected_character() {
    let err = compile("(add 2 @)").unwrap_err();
    assert_eq!(
        err,
        CompileError::Lex(LexError {
            kind: LexErrorKind::UnexpectedCharacter,
            ch: '@',
            offset: 7,
        })
    );
}

#[test]
fn test_only_spaces_and_line_breaks_separate_tokens() {
    let err = compile("(add 2\t3)").unwrap_err();
    assert_eq!(
        err,
        CompileError::Lex(LexError {
            kind: LexErrorKind::UnexpectedCharacter,
            ch: '\t',
            offset: 6,
        })
    );
}

#[test]
fn test_deeply_nested_input_is_rejected() {
    let depth = 50_000;
    let source = format!("{}{}", "(a ".repeat(depth), ")".repeat(depth));

    assert!(matches!(
        compile(&source),
        Err(CompileError::Parse(ParseError::TooDeep { limit: MAX_NESTING, .. }))
    ));

    let depth = 200;
    let source = format!("{}{}", "(a ".repeat(depth), ")".repeat(depth));
    assert!(compile(&source).is_ok());
}

#[test]
fn test_exponential_inlining_is_rejected() {
    let mut source = String::new();
    for level in 1..26 {
        let name = "d".repeat(level);
        let next = "d".repeat(level + 1);
        source.push_str(&format!("(define \"{}\" 0 (w ({}) ({}))) ", name, next, next));
    }
    source.push_str(&format!("(define \"{}\" 0 1) (d)", "d".repeat(26)));

    assert!(matches!(
        compile(&source),
        Err(CompileError::InlineExpansionTooLarge { .. })
    ));
}

#[test]
fn test_unterminated_string() {
    let err = compile("(print \"Hello)").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Lex(LexError {
            kind: LexErrorKind::UnterminatedString,
            ..
        })
    ));
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        compile("(add 1"),
        Err(CompileError::Parse(ParseError::UnexpectedEnd { .. }))
    ));
    assert!(matches!(
        compile(")"),
        Err(CompileError::Parse(ParseError::UnexpectedToken { .. }))
    ));
    assert!(matches!(
        compile("()"),
        Err(CompileError::Parse(ParseError::UnexpectedToken { .. }))
    ));
    assert!(matches!(
        compile("(f x)"),
        Err(CompileError::Parse(ParseError::UnexpectedToken { .. }))
    ));
}

#[test]
fn test_error_messages() {
    insta::assert_snapshot!(
        compile("(f").unwrap_err().to_string(),
        @"parse error: unexpected end of input while parsing a closing paren"
    );
}

#[test]
fn test_compiler_shared_across_threads() {
    let compiler = std::sync::Arc::new(Compiler::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let compiler = compiler.clone();
            std::thread::spawn(move || compiler.compile(&format!("(f {})", i)))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap().unwrap(), format!("f({});", i));
    }
}
