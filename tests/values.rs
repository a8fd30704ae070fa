use sassling::NodeKind;

use macros::{child, kinds, parse, should_eval, text};

/// The value node of the first declaration of the first ruleset.
fn first_value(sheet: &sassling::StyleSheet) -> sassling::NodeId {
    let ruleset = child(sheet, sheet.root(), 0);
    let rule = child(sheet, child(sheet, ruleset, 1), 0);
    child(sheet, rule, 1)
}

/// The value node of a top-level assignment.
fn assigned_value(sheet: &sassling::StyleSheet) -> sassling::NodeId {
    child(sheet, child(sheet, sheet.root(), 0), 1)
}

#[test]
fn addition_is_parsed_not_reduced() {
    let sheet = parse("$x: 1 + 2;");
    let expression = assigned_value(&sheet);
    assert_eq!(sheet.kind(expression), NodeKind::Expression);
    assert_eq!(
        kinds(&sheet, expression),
        vec![
            NodeKind::TextualNumber,
            NodeKind::Add,
            NodeKind::TextualNumber
        ]
    );
    assert!(should_eval(&sheet, expression));
    assert!(should_eval(&sheet, child(&sheet, expression, 0)));
    assert!(should_eval(&sheet, child(&sheet, expression, 2)));
}

#[test]
fn minus_prefixed_number_is_not_subtraction() {
    let sheet = parse("$x: 1 -2;");
    let list = assigned_value(&sheet);
    assert_eq!(sheet.kind(list), NodeKind::SpaceList);
    assert_eq!(
        kinds(&sheet, list),
        vec![NodeKind::TextualNumber, NodeKind::TextualNumber]
    );
    assert_eq!(text(&sheet, child(&sheet, list, 1)), "-2");
    assert!(!should_eval(&sheet, list));
}

#[test]
fn spaced_minus_is_subtraction() {
    let sheet = parse("$x: 1 - 2;");
    let expression = assigned_value(&sheet);
    assert_eq!(sheet.kind(expression), NodeKind::Expression);
    assert_eq!(sheet.kind(child(&sheet, expression, 1)), NodeKind::Sub);
}

#[test]
fn multiplication_forces_eval() {
    let sheet = parse("$x: 2 * 3;");
    let term = assigned_value(&sheet);
    assert_eq!(sheet.kind(term), NodeKind::Term);
    assert_eq!(
        kinds(&sheet, term),
        vec![
            NodeKind::TextualNumber,
            NodeKind::Mul,
            NodeKind::TextualNumber
        ]
    );
    assert!(should_eval(&sheet, term));
}

#[test]
fn lone_slash_stays_textual() {
    // font shorthand: 12px/30px must survive as written
    let sheet = parse("a { font: 12px/30px; }");
    let term = first_value(&sheet);
    assert_eq!(sheet.kind(term), NodeKind::Term);
    assert_eq!(
        kinds(&sheet, term),
        vec![
            NodeKind::TextualDimension,
            NodeKind::Div,
            NodeKind::TextualDimension
        ]
    );
    assert!(!should_eval(&sheet, term));
}

#[test]
fn slash_with_variable_operand_evals() {
    let sheet = parse("a { width: $w/2; }");
    let term = first_value(&sheet);
    assert_eq!(sheet.kind(term), NodeKind::Term);
    assert!(should_eval(&sheet, term));
}

#[test]
fn relation_is_strictly_binary() {
    let sheet = parse("$x: 1 < 2;");
    let relation = assigned_value(&sheet);
    assert_eq!(sheet.kind(relation), NodeKind::Relation);
    assert_eq!(
        kinds(&sheet, relation),
        vec![NodeKind::TextualNumber, NodeKind::Lt, NodeKind::TextualNumber]
    );
    assert!(should_eval(&sheet, relation));
}

#[test]
fn boolean_connectives() {
    let sheet = parse("$x: true and false;");
    let conjunction = assigned_value(&sheet);
    assert_eq!(sheet.kind(conjunction), NodeKind::Conjunction);
    assert_eq!(
        kinds(&sheet, conjunction),
        vec![NodeKind::Boolean, NodeKind::Boolean]
    );
    assert!(should_eval(&sheet, conjunction));
    assert_eq!(text(&sheet, child(&sheet, conjunction, 0)), "true");
}

#[test]
fn boolean_keyword_must_stand_alone() {
    let sheet = parse("$x: truely;");
    let value = assigned_value(&sheet);
    assert_eq!(sheet.kind(value), NodeKind::Identifier);
    assert_eq!(text(&sheet, value), "truely");
}

#[test]
fn disjunction() {
    let sheet = parse("$x: $a or $b;");
    let disjunction = assigned_value(&sheet);
    assert_eq!(sheet.kind(disjunction), NodeKind::Disjunction);
    assert_eq!(
        kinds(&sheet, disjunction),
        vec![NodeKind::Variable, NodeKind::Variable]
    );
}

#[test]
fn variable_reference_evals() {
    let sheet = parse("$x: $y;");
    let value = assigned_value(&sheet);
    assert_eq!(sheet.kind(value), NodeKind::Variable);
    assert!(should_eval(&sheet, value));
}

#[test]
fn parenthesized_singleton_forces_eval() {
    let sheet = parse("$x: (1);");
    let value = assigned_value(&sheet);
    assert_eq!(sheet.kind(value), NodeKind::TextualNumber);
    assert!(should_eval(&sheet, value));
}

#[test]
fn comma_list_of_literals() {
    let sheet = parse("$x: 1, 2, 3;");
    let list = assigned_value(&sheet);
    assert_eq!(sheet.kind(list), NodeKind::CommaList);
    assert_eq!(sheet.children(list).len(), 3);
    assert!(!should_eval(&sheet, list));
}

#[test]
fn space_list_with_important() {
    let sheet = parse("a { color: red !important; }");
    let list = first_value(&sheet);
    assert_eq!(sheet.kind(list), NodeKind::SpaceList);
    assert_eq!(
        kinds(&sheet, list),
        vec![NodeKind::Identifier, NodeKind::Important]
    );
}

#[test]
fn empty_value_is_nil() {
    let sheet = parse("$x: ;");
    let value = assigned_value(&sheet);
    assert_eq!(sheet.kind(value), NodeKind::Nil);
}

#[test]
fn textual_values_keep_their_spelling() {
    let sheet = parse("$x: 10px 50% #a1b2c3 2.5;");
    let list = assigned_value(&sheet);
    assert_eq!(
        kinds(&sheet, list),
        vec![
            NodeKind::TextualDimension,
            NodeKind::TextualPercentage,
            NodeKind::TextualHex,
            NodeKind::TextualNumber
        ]
    );
    assert_eq!(text(&sheet, child(&sheet, list, 0)), "10px");
    assert_eq!(text(&sheet, child(&sheet, list, 1)), "50%");
    assert_eq!(text(&sheet, child(&sheet, list, 2)), "#a1b2c3");
    assert_eq!(text(&sheet, child(&sheet, list, 3)), "2.5");
}

#[test]
fn function_call() {
    let sheet = parse("a { color: rgba(0, 0, 0, 0.5); }");
    let call = first_value(&sheet);
    assert_eq!(sheet.kind(call), NodeKind::FunctionCall);
    assert!(should_eval(&sheet, call));
    assert_eq!(
        kinds(&sheet, call),
        vec![NodeKind::Identifier, NodeKind::Arguments]
    );
    assert_eq!(text(&sheet, child(&sheet, call, 0)), "rgba");

    let args = child(&sheet, call, 1);
    assert_eq!(sheet.children(args).len(), 4);
    assert!(should_eval(&sheet, child(&sheet, args, 0)));
}

#[test]
fn url_is_an_opaque_uri() {
    let sheet = parse("a { background: url(images/bg.png); }");
    let uri = first_value(&sheet);
    assert_eq!(sheet.kind(uri), NodeKind::Uri);
    assert_eq!(text(&sheet, uri), "images/bg.png");
}

#[test]
fn url_with_variable_falls_through_to_function_call() {
    let sheet = parse("a { background: url($asset); }");
    let call = first_value(&sheet);
    assert_eq!(sheet.kind(call), NodeKind::FunctionCall);
    assert_eq!(text(&sheet, child(&sheet, call, 0)), "url");

    let args = child(&sheet, call, 1);
    assert_eq!(kinds(&sheet, args), vec![NodeKind::Variable]);
}

#[test]
fn plain_string_constant() {
    let sheet = parse("$x: \"hello\";");
    let value = assigned_value(&sheet);
    assert_eq!(sheet.kind(value), NodeKind::StringConstant);
    assert_eq!(text(&sheet, value), "\"hello\"");
}

#[test]
fn string_schema() {
    let sheet = parse("$x: \"a#{$b}c\";");
    let schema = assigned_value(&sheet);
    assert_eq!(sheet.kind(schema), NodeKind::StringSchema);
    assert_eq!(
        kinds(&sheet, schema),
        vec![NodeKind::Identifier, NodeKind::Variable, NodeKind::Identifier]
    );
    // the quotes stay inside the outermost fragments
    assert_eq!(text(&sheet, child(&sheet, schema, 0)), "\"a");
    assert_eq!(text(&sheet, child(&sheet, schema, 2)), "c\"");
    assert!(should_eval(&sheet, schema));
}

#[test]
fn value_schema() {
    let sheet = parse("a { width: #{$w}px; }");
    let schema = first_value(&sheet);
    assert_eq!(sheet.kind(schema), NodeKind::ValueSchema);
    assert_eq!(
        kinds(&sheet, schema),
        vec![NodeKind::Variable, NodeKind::Identifier]
    );
    assert_eq!(text(&sheet, child(&sheet, schema, 1)), "px");
    assert!(should_eval(&sheet, schema));
}

#[test]
fn interpolant_closes_at_first_brace() {
    let sheet = parse("a { width: #{$w}; }");
    let schema = first_value(&sheet);
    assert_eq!(sheet.kind(schema), NodeKind::ValueSchema);
    assert_eq!(kinds(&sheet, schema), vec![NodeKind::Variable]);
}
