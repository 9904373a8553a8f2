//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used by input diagnostics.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Invariants: Hints never contain the rejected payload.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_eof_errors() {
    let syntax_err = parse::from_str::<Value>(r#"{"a":}"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = parse::from_str::<Value>(r#"{"value": 5"#).unwrap_err();
    assert_eq!(parse::categorize_error(&eof_err), ParseFailureCategory::Eof);

    let empty_err = parse::from_str::<Value>("").unwrap_err();
    assert_eq!(parse::categorize_error(&empty_err), ParseFailureCategory::Eof);
}

#[test]
fn category_mapping_handles_typed_data_errors() {
    let data_err = parse::from_str::<u8>("300").unwrap_err();
    assert_eq!(parse::categorize_error(&data_err), ParseFailureCategory::Data);
}

#[test]
fn hint_contains_category_and_context() {
    let err = parse::from_str::<Value>("secret-payload").unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: syntax"));
    assert!(hint.contains("context: test.context"));
    assert!(!hint.contains("secret-payload"));
}

#[test]
fn labels_are_stable() {
    let cases = [
        (ParseFailureCategory::Syntax, "syntax"),
        (ParseFailureCategory::Eof, "unexpected-eof"),
        (ParseFailureCategory::Data, "data"),
        (ParseFailureCategory::Io, "io"),
    ];
    for (category, label) in cases {
        assert_eq!(category.label(), label);
    }
}
