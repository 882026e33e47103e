use evaluator::{EngineOptions, EvalError};
use serde_json::json;
use tmplkit::{evaluate_template, evaluate_template_with_options, format, parse, Environment};

#[test]
fn s1_conditional_and_negation() {
    let src = "{{ if !table.BoolList[2] }}\n\tsuccess\n{{ else }}\n\tnot false\n{{ endif }}";
    let mut env = Environment::from_json_object(json!({ "table": { "BoolList": [false, true, true] } }));
    let out = format(src, &mut env).unwrap();
    assert!(out.contains("not false"));
    assert!(!out.contains("success"));
}

#[test]
fn s2_for_nested_switch_elseif() {
    let src = "{{ for k, v in m }}{{ if v }}{{ switch k }}{{ case \"hello\" }}{{ k }}{{ default }}not hello{{ endswitch }}{{ elseif v == false }}false{{ endif }}{{ endfor }}";
    let mut env = Environment::from_json_object(json!({ "m": { "hell": true, "world": false } }));
    let out = format(src, &mut env).unwrap();
    assert!(out.contains("not hello"));
    assert!(out.contains("false"));
}

#[test]
fn s3_sequence_indexing_inside_switch_target() {
    let src = "{{ switch hello[1] }}{{ case 9 }}9{{ case 8 }}8{{ case 7 }}7{{ default }}-1{{ endswitch }}";
    let mut env = Environment::from_json_object(json!({ "hello": [9, 8, 7, 6] }));
    let out = format(src, &mut env).unwrap();
    assert_eq!(out, "8");
}

#[test]
fn s4_value_interpolation_with_field_access() {
    let src = "value {{ T.U.Value }}";
    let mut env = Environment::from_json_object(json!({ "T": { "U": { "Value": 1.23 } } }));
    let out = format(src, &mut env).unwrap();
    assert_eq!(out, "value 1.230000");
}

#[test]
fn s5_error_unbound() {
    let src = "{{ missing }}";
    let mut env = Environment::from_json_object(json!({}));
    let err = format(src, &mut env).unwrap_err();
    let tmplkit::TemplateError::Eval(EvalError::Unbound { name }) = err else {
        panic!("expected Unbound, got {err:?}");
    };
    assert_eq!(name, "missing");
}

#[test]
fn s6_error_unterminated() {
    let src = "hello {{ if x";
    let err = parse(src).unwrap_err();
    assert!(matches!(err, tmplkit::ParseError::Scan(scanner::ScanError::UnterminatedDirective { .. })));
}

#[test]
fn parse_error_renders_with_source_context() {
    let src = "hello {{ if x";
    let err = parse(src).unwrap_err();
    let rendered = err.render(src);
    assert!(rendered.contains("unterminated directive"));
}

#[test]
fn literal_only_template_is_verbatim() {
    let src = "just some plain text, no directives here.\n";
    let mut env = Environment::from_json_object(json!({}));
    let out = format(src, &mut env).unwrap();
    assert_eq!(out, src);
}

#[test]
fn negative_indexing_matches_tail_element() {
    let src = "{{ xs[-1] }}";
    let mut env = Environment::from_json_object(json!({ "xs": [10, 20, 30] }));
    let out = format(src, &mut env).unwrap();
    assert_eq!(out, "30");
}

#[test]
fn negative_indexing_out_of_bounds() {
    let src = "{{ xs[-4] }}";
    let mut env = Environment::from_json_object(json!({ "xs": [10, 20, 30] }));
    let err = format(src, &mut env).unwrap_err();
    assert!(matches!(err, tmplkit::TemplateError::Eval(EvalError::OutOfBounds { .. })));
}

#[test]
fn short_circuit_and_skips_right_operand() {
    // `b` is unbound, but since `a` is false the `&&` never resolves it.
    let src = "{{ if a && b }}yes{{ else }}no{{ endif }}";
    let mut env = Environment::from_json_object(json!({ "a": false }));
    let out = format(src, &mut env).unwrap();
    assert_eq!(out, "no");
}

#[test]
fn switch_runs_exactly_one_case() {
    let src = "{{ switch x }}{{ case 1 }}one{{ case 2 }}two{{ default }}other{{ endswitch }}";
    let mut env = Environment::from_json_object(json!({ "x": 2 }));
    let out = format(src, &mut env).unwrap();
    assert_eq!(out, "two");
}

#[test]
fn kind_strict_comparison_rejects_mixed_kinds() {
    let src = "{{ if a == b }}same{{ endif }}";
    let mut env = Environment::from_json_object(json!({ "a": "1", "b": 1 }));
    let err = format(src, &mut env).unwrap_err();
    assert!(matches!(err, tmplkit::TemplateError::Eval(EvalError::TypeMismatch { .. })));
}

#[test]
fn unbalanced_if_fails_to_parse() {
    let src = "{{ if x }}unclosed";
    let err = parse(src).unwrap_err();
    assert!(matches!(
        err,
        tmplkit::ParseError::Assemble(parser::AssembleError::MissingEndif { .. })
    ));
}

#[test]
fn switch_rejects_a_second_default_case() {
    let src = "{{ switch x }}{{ default }}a{{ default }}b{{ endswitch }}";
    let err = parse(src).unwrap_err();
    assert!(matches!(err, tmplkit::ParseError::Assemble(parser::AssembleError::DefaultNotLast { .. })));
}

#[test]
fn parse_is_deterministic() {
    let src = "{{ if x }}a{{ else }}b{{ endif }}";
    let t1 = parse(src).unwrap();
    let t2 = parse(src).unwrap();
    assert_eq!(t1.blocks(), t2.blocks());
}

#[test]
fn loop_variable_retains_last_binding_after_the_loop() {
    // Loop variables are written into the shared environment as an
    // observable side effect (like `_targetVal`); they are not scoped or
    // cleared once the loop body finishes.
    let src = "{{ for v in xs }}{{ v }}{{ endfor }}-{{ v }}";
    let mut env = Environment::from_json_object(json!({ "xs": [1, 2] }));
    let template = parse(src).unwrap();
    let out = evaluate_template(&template, &mut env).unwrap();
    assert_eq!(out, "12-2");
}

#[test]
fn field_access_through_null_is_null_indirection() {
    let src = "{{ x.y }}";
    let mut env = Environment::from_json_object(json!({ "x": null }));
    let err = format(src, &mut env).unwrap_err();
    assert!(matches!(err, tmplkit::TemplateError::Eval(EvalError::NullIndirection { .. })));
}

#[test]
fn bang_before_right_comparison_operand_parses_and_negates() {
    let src = "{{ if a == !b }}match{{ else }}no match{{ endif }}";
    let mut env = Environment::from_json_object(json!({ "a": false, "b": true }));
    let out = format(src, &mut env).unwrap();
    assert_eq!(out, "match");
}

#[test]
fn parenthesized_subexpression_honors_conventional_precedence() {
    // x && y || z with x=false, y=true, z=true: under strict (equal,
    // left-to-right, short-circuit) precedence the leading `x && y` short
    // circuits to `false` without ever consulting `z`. Under conventional
    // (`&&` binds tighter) precedence this is `(x && y) || z` = `false ||
    // true` = `true`. Wrapping it in parens must still dispatch on the
    // caller's options rather than always falling back to strict chaining.
    let src = "{{ if (x && y || z) }}yes{{ else }}no{{ endif }}";
    let mut env = Environment::from_json_object(json!({ "x": false, "y": true, "z": true }));
    let template = parse(src).unwrap();
    let options = EngineOptions { strict_chain_precedence: false };
    let out = evaluate_template_with_options(&template, &mut env, &options).unwrap();
    assert_eq!(out, "yes");
}

#[test]
fn float_interpolation_uses_six_decimal_places() {
    let src = "{{ pi }}";
    let mut env = Environment::from_json_object(json!({ "pi": 3.5 }));
    let out = format(src, &mut env).unwrap();
    assert_eq!(out, "3.500000");
}
