// tests/evaluator_tests.rs

use serde_json::json;
use sift_lang::{EvalError, Value, evaluate};

fn eval(expression: &str, document: serde_json::Value) -> Result<Value, EvalError> {
    let context = Value::from(document);
    evaluate(expression, &context)
}

fn eval_empty(expression: &str) -> Result<Value, EvalError> {
    eval(expression, json!({}))
}

// ============================================================================
// Arithmetic and Precedence
// ============================================================================

#[test]
fn test_precedence() {
    assert_eq!(eval_empty("2 + 3 * 4").unwrap(), Value::Integer(14));
}

#[test]
fn test_parenthesized_precedence() {
    assert_eq!(eval_empty("( 2 + 3 ) * 4").unwrap(), Value::Integer(20));
    // Parens self-delimit, so the spaced and unspaced forms agree
    assert_eq!(eval_empty("(2 + 3) * 4").unwrap(), Value::Integer(20));
}

#[test]
fn test_same_precedence_is_left_to_right() {
    assert_eq!(eval_empty("10 - 2 - 3").unwrap(), Value::Integer(5));
    assert_eq!(eval_empty("24 / 4 / 2").unwrap(), Value::Integer(3));
}

#[test]
fn test_division_results() {
    // Exact quotients stay integers; inexact ones go float
    assert_eq!(eval_empty("6 / 2").unwrap(), Value::Integer(3));
    assert_eq!(eval_empty("5 / 2").unwrap(), Value::Float(2.5));
}

#[test]
fn test_division_by_zero_is_float_like() {
    assert_eq!(eval_empty("1 / 0").unwrap(), Value::Float(f64::INFINITY));
    assert_eq!(
        eval_empty("0 - 1 / 0").unwrap(),
        Value::Float(f64::NEG_INFINITY)
    );
    match eval_empty("0 / 0").unwrap() {
        Value::Float(n) => assert!(n.is_nan()),
        other => panic!("Expected NaN, got {:?}", other),
    }
}

#[test]
fn test_mixed_integer_float_arithmetic_preserves_whole_results() {
    let doc = json!({"half": 2.5});
    assert_eq!(eval("half * 2", doc.clone()).unwrap(), Value::Integer(5));
    assert_eq!(eval("half + half", doc).unwrap(), Value::Float(5.0));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        eval_empty("'foo' + 'bar'").unwrap(),
        Value::String("foobar".to_string())
    );
}

#[test]
fn test_mixed_kind_arithmetic_is_an_error() {
    assert!(matches!(
        eval_empty("1 + 'x'"),
        Err(EvalError::TypeError(_))
    ));
    assert!(matches!(
        eval_empty("true * 2"),
        Err(EvalError::TypeError(_))
    ));
    assert!(matches!(
        eval_empty("null - 1"),
        Err(EvalError::TypeError(_))
    ));
}

// ============================================================================
// Parenthesis Balance
// ============================================================================

#[test]
fn test_unclosed_open_paren() {
    match eval_empty("( 1 + 2") {
        Err(EvalError::UnbalancedParens(positions)) => assert_eq!(positions, vec![0]),
        other => panic!("Expected UnbalancedParens, got {:?}", other),
    }
}

#[test]
fn test_extra_close_paren() {
    match eval_empty("1 + 2 )") {
        Err(EvalError::UnbalancedParens(positions)) => assert_eq!(positions, vec![3]),
        other => panic!("Expected UnbalancedParens, got {:?}", other),
    }
}

#[test]
fn test_innermost_open_matches_first() {
    // The close pairs with the inner open; the outer one is reported
    match eval_empty("( ( 1 )") {
        Err(EvalError::UnbalancedParens(positions)) => assert_eq!(positions, vec![0]),
        other => panic!("Expected UnbalancedParens, got {:?}", other),
    }
}

#[test]
fn test_multiple_unbalanced_positions() {
    match eval_empty(") (") {
        Err(EvalError::UnbalancedParens(positions)) => assert_eq!(positions, vec![0, 1]),
        other => panic!("Expected UnbalancedParens, got {:?}", other),
    }
}

#[test]
fn test_unbalanced_error_names_positions() {
    let message = eval_empty("( 1 + 2").unwrap_err().to_string();
    assert!(message.contains('0'), "message was: {}", message);
}

// ============================================================================
// Equality and Ordering
// ============================================================================

#[test]
fn test_strict_equality() {
    assert_eq!(eval_empty("1 == 1").unwrap(), Value::Boolean(true));
    assert_eq!(eval_empty("'a' == 'a'").unwrap(), Value::Boolean(true));
    // No coercion across kinds
    assert_eq!(eval_empty("1 == '1'").unwrap(), Value::Boolean(false));
    assert_eq!(eval_empty("true == 1").unwrap(), Value::Boolean(false));
}

#[test]
fn test_integer_and_float_compare_numerically() {
    let doc = json!({"count": 2.0});
    assert_eq!(eval("count == 2", doc).unwrap(), Value::Boolean(true));
}

#[test]
fn test_null_and_undefined_are_distinct() {
    let doc = json!({"present": null});
    assert_eq!(
        eval("present == null", doc.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("present == undefined", doc.clone()).unwrap(),
        Value::Boolean(false)
    );
    // A missing field resolves to undefined, not null
    assert_eq!(
        eval("absent == undefined", doc.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(eval("absent == null", doc).unwrap(), Value::Boolean(false));
}

#[test]
fn test_numeric_ordering() {
    assert_eq!(eval_empty("2 > 1").unwrap(), Value::Boolean(true));
    assert_eq!(eval_empty("2 < 1").unwrap(), Value::Boolean(false));
}

#[test]
fn test_string_ordering_is_lexicographic() {
    assert_eq!(eval_empty("'abc' < 'abd'").unwrap(), Value::Boolean(true));
    assert_eq!(eval_empty("'b' > 'a'").unwrap(), Value::Boolean(true));
}

#[test]
fn test_incomparable_kinds_order_as_false() {
    // Consistent either way round: comparisons against a missing field
    // answer false rather than failing
    assert_eq!(
        eval("missing > 3", json!({})).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(
        eval("missing < 3", json!({})).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(eval_empty("'a' > 1").unwrap(), Value::Boolean(false));
}

// ============================================================================
// Logical Operators
// ============================================================================

#[test]
fn test_negation() {
    assert_eq!(eval_empty("!true == false").unwrap(), Value::Boolean(true));
    assert_eq!(eval_empty("!0").unwrap(), Value::Boolean(true));
    assert_eq!(eval_empty("!'x'").unwrap(), Value::Boolean(false));
    assert_eq!(eval_empty("!missing").unwrap(), Value::Boolean(true));
}

#[test]
fn test_and_or_return_the_deciding_operand() {
    assert_eq!(eval_empty("0 || 5").unwrap(), Value::Integer(5));
    assert_eq!(
        eval_empty("'' || 'fallback'").unwrap(),
        Value::String("fallback".to_string())
    );
    assert_eq!(eval_empty("1 && 2").unwrap(), Value::Integer(2));
    assert_eq!(eval_empty("0 && 2").unwrap(), Value::Integer(0));
    assert_eq!(eval_empty("null || false").unwrap(), Value::Boolean(false));
}

#[test]
fn test_logical_chain() {
    let doc = json!({"a": {"b": 5}, "c": {"d": "x"}});
    assert_eq!(
        eval("a.b > 3 && c.d == 'x'", doc.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("a.b > 9 || c.d == 'x'", doc).unwrap(),
        Value::Boolean(true)
    );
}

// ============================================================================
// Identifier Resolution
// ============================================================================

#[test]
fn test_dotted_path_lookup() {
    let doc = json!({"a": {"b": 5}});
    assert_eq!(eval("a.b > 3", doc.clone()).unwrap(), Value::Boolean(true));
    assert_eq!(eval("a.b == 5", doc).unwrap(), Value::Boolean(true));
}

#[test]
fn test_missing_path_resolves_to_undefined() {
    let doc = json!({"a": {"b": 5}});
    // Never a lookup error, whatever the depth of the miss
    assert_eq!(eval("a.c > 3", doc.clone()).unwrap(), Value::Boolean(false));
    assert_eq!(
        eval("a.b.c.d == undefined", doc.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("x.y.z == undefined", doc).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_numeric_segments_index_arrays() {
    let doc = json!({"items": [10, 20, 30]});
    assert_eq!(
        eval("items.1 == 20", doc.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("items.9 == undefined", doc).unwrap(),
        Value::Boolean(true)
    );
}

// ============================================================================
// contains and hasLength
// ============================================================================

#[test]
fn test_contains_json_predicate_deep_match() {
    let doc = json!({"a": [{"x": 1}, {"x": 2}]});
    assert_eq!(
        eval("a contains '{\"x\":2}'", doc.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("a contains '{\"x\":3}'", doc).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_contains_predicate_needs_every_pair() {
    let doc = json!({"users": [{"name": "ada", "admin": true}, {"name": "bob", "admin": false}]});
    assert_eq!(
        eval(
            "users contains '{\"name\":\"ada\",\"admin\":true}'",
            doc.clone()
        )
        .unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("users contains '{\"name\":\"bob\",\"admin\":true}'", doc).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_contains_literal_fallback() {
    // 'x' is not valid JSON, so membership falls back to the literal
    let doc = json!({"a": ["x", "y"]});
    assert_eq!(
        eval("a contains 'x'", doc.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("a contains 'z'", doc).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_contains_parses_scalar_json() {
    // '2' parses as the JSON number 2
    let doc = json!({"a": [1, 2, 3]});
    assert_eq!(eval("a contains '2'", doc).unwrap(), Value::Boolean(true));
}

#[test]
fn test_contains_treats_absent_as_empty() {
    assert_eq!(
        eval("missing contains 'x'", json!({})).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(
        eval("a contains 'x'", json!({"a": null})).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_has_length() {
    let doc = json!({"a": [1, 2, 3]});
    assert_eq!(
        eval("a hasLength 3", doc.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(eval("a hasLength 2", doc).unwrap(), Value::Boolean(false));
}

#[test]
fn test_has_length_treats_absent_as_empty() {
    assert_eq!(
        eval("missing hasLength 0", json!({})).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval("a hasLength 0", json!({"a": null})).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_has_length_on_strings_and_scalars() {
    assert_eq!(
        eval("s hasLength 3", json!({"s": "abc"})).unwrap(),
        Value::Boolean(true)
    );
    // A kind with no length never matches, not even zero
    assert_eq!(
        eval("n hasLength 0", json!({"n": 7})).unwrap(),
        Value::Boolean(false)
    );
}

// ============================================================================
// Malformed Expressions
// ============================================================================

#[test]
fn test_missing_operand_is_an_error() {
    assert_eq!(
        eval_empty("1 +").unwrap_err(),
        EvalError::MissingOperand("+")
    );
    assert_eq!(
        eval_empty("contains 'x'").unwrap_err(),
        EvalError::MissingOperand("contains")
    );
}

#[test]
fn test_leftover_values_are_an_error() {
    assert_eq!(
        eval_empty("1 2").unwrap_err(),
        EvalError::UnexpectedResult(2)
    );
}

#[test]
fn test_empty_expression_is_an_error() {
    assert_eq!(eval_empty("").unwrap_err(), EvalError::UnexpectedResult(0));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_repeated_evaluation_is_stable() {
    let context = Value::from(json!({"a": {"b": 5}, "tags": ["x", "y"]}));
    let expression = "a.b > 3 && tags contains 'x'";

    let first = evaluate(expression, &context).unwrap();
    let second = evaluate(expression, &context).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Value::Boolean(true));
}

#[test]
fn test_string_quirk_survives_evaluation() {
    assert_eq!(eval_empty("'a''b' == 'ab'").unwrap(), Value::Boolean(true));
}
