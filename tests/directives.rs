use sassling::NodeKind;

use macros::{child, kinds, parse, should_eval, text};

#[test]
fn for_through_is_inclusive_kind() {
    let sheet = parse("@for $i from 1 through 3 { a { width: $i; } }");
    let root = sheet.root();
    assert_eq!(kinds(&sheet, root), vec![NodeKind::ForThroughDirective]);

    let loop_node = child(&sheet, root, 0);
    assert_eq!(
        kinds(&sheet, loop_node),
        vec![
            NodeKind::Variable,
            NodeKind::TextualNumber,
            NodeKind::TextualNumber,
            NodeKind::Block
        ]
    );
    assert_eq!(text(&sheet, child(&sheet, loop_node, 0)), "$i");
    assert_eq!(text(&sheet, child(&sheet, loop_node, 1)), "1");
    assert_eq!(text(&sheet, child(&sheet, loop_node, 2)), "3");

    let body = child(&sheet, loop_node, 3);
    assert_eq!(kinds(&sheet, body), vec![NodeKind::Ruleset]);
}

#[test]
fn for_to_is_exclusive_kind() {
    let sheet = parse("@for $i from 1 to 3 { }");
    assert_eq!(kinds(&sheet, sheet.root()), vec![NodeKind::ForToDirective]);
}

#[test]
fn each_directive() {
    let sheet = parse("@each $animal in puma, sea-slug { }");
    let each = child(&sheet, sheet.root(), 0);
    assert_eq!(sheet.kind(each), NodeKind::EachDirective);
    assert_eq!(
        kinds(&sheet, each),
        vec![NodeKind::Variable, NodeKind::CommaList, NodeKind::Block]
    );

    let list = child(&sheet, each, 1);
    assert_eq!(
        kinds(&sheet, list),
        vec![NodeKind::Identifier, NodeKind::Identifier]
    );
    assert_eq!(text(&sheet, child(&sheet, list, 1)), "sea-slug");
}

#[test]
fn while_directive() {
    let sheet = parse("@while $i > 0 { }");
    let while_node = child(&sheet, sheet.root(), 0);
    assert_eq!(sheet.kind(while_node), NodeKind::WhileDirective);
    assert_eq!(
        kinds(&sheet, while_node),
        vec![NodeKind::Relation, NodeKind::Block]
    );

    let predicate = child(&sheet, while_node, 0);
    assert_eq!(
        kinds(&sheet, predicate),
        vec![NodeKind::Variable, NodeKind::Gt, NodeKind::TextualNumber]
    );
}

#[test]
fn if_with_else() {
    let sheet = parse("@if true { a { color: red; } } @else { b { color: blue; } }");
    let conditional = child(&sheet, sheet.root(), 0);
    assert_eq!(sheet.kind(conditional), NodeKind::IfDirective);
    assert_eq!(
        kinds(&sheet, conditional),
        vec![NodeKind::Boolean, NodeKind::Block, NodeKind::Block]
    );
}

#[test]
fn if_with_else_if_chain() {
    let sheet = parse("@if $a { } @else if $b { } @else { }");
    let conditional = child(&sheet, sheet.root(), 0);
    assert_eq!(
        kinds(&sheet, conditional),
        vec![
            NodeKind::Variable,
            NodeKind::Block,
            NodeKind::Variable,
            NodeKind::Block,
            NodeKind::Block
        ]
    );
}

#[test]
fn warn_argument_always_evals() {
    let sheet = parse("a { @warn \"watch out\"; }");
    let block = child(&sheet, child(&sheet, sheet.root(), 0), 1);
    assert_eq!(kinds(&sheet, block), vec![NodeKind::Warning]);

    let warning = child(&sheet, block, 0);
    let message = child(&sheet, warning, 0);
    assert_eq!(sheet.kind(message), NodeKind::StringConstant);
    assert!(should_eval(&sheet, message));
}

#[test]
fn return_directive() {
    let sheet = parse("@function f() { @return 1; }");
    let function = child(&sheet, sheet.root(), 0);
    assert_eq!(sheet.kind(function), NodeKind::Function);
    assert_eq!(
        kinds(&sheet, function),
        vec![NodeKind::Identifier, NodeKind::Parameters, NodeKind::Block]
    );

    let body = child(&sheet, function, 2);
    assert_eq!(kinds(&sheet, body), vec![NodeKind::ReturnDirective]);
    let ret = child(&sheet, body, 0);
    assert_eq!(kinds(&sheet, ret), vec![NodeKind::TextualNumber]);
}

#[test]
fn extend_records_enclosing_ruleset() {
    let sheet = parse(".error { color: red; } .badError { @extend .error; }");
    let root = sheet.root();
    assert_eq!(
        kinds(&sheet, root),
        vec![NodeKind::Ruleset, NodeKind::Ruleset]
    );

    let pairs: Vec<_> = sheet.extensions().iter().collect();
    assert_eq!(pairs.len(), 1);

    let (extendee, ruleset) = pairs[0];
    assert_eq!(sheet.kind(extendee), NodeKind::SimpleSelector);
    assert_eq!(text(&sheet, extendee), ".error");
    assert_eq!(ruleset, child(&sheet, root, 1));
}

#[test]
fn extend_requires_enclosing_ruleset() {
    // a media block is not a rule context
    let err = macros::parse_err("@media screen { @extend .a; }");
    assert_eq!(err, "Error: @extend directive may only be used within rules");
}

#[test]
fn media_query_single_disjunct() {
    let sheet = parse("@media screen and (min-width: 100px) { a { color: red; } }");
    let media = child(&sheet, sheet.root(), 0);
    assert_eq!(sheet.kind(media), NodeKind::MediaQuery);
    assert_eq!(
        kinds(&sheet, media),
        vec![NodeKind::MediaExpression, NodeKind::Block]
    );

    let expression = child(&sheet, media, 0);
    assert_eq!(
        kinds(&sheet, expression),
        vec![NodeKind::Identifier, NodeKind::Identifier, NodeKind::Rule]
    );
    assert_eq!(text(&sheet, child(&sheet, expression, 0)), "screen");
    assert_eq!(text(&sheet, child(&sheet, expression, 1)), "and");

    let property = child(&sheet, expression, 2);
    assert_eq!(text(&sheet, child(&sheet, property, 0)), "min-width");
}

#[test]
fn media_query_group() {
    let sheet = parse("@media screen, print { }");
    let media = child(&sheet, sheet.root(), 0);
    assert_eq!(
        kinds(&sheet, media),
        vec![NodeKind::MediaExpressionGroup, NodeKind::Block]
    );

    let group = child(&sheet, media, 0);
    assert_eq!(
        kinds(&sheet, group),
        vec![NodeKind::MediaExpression, NodeKind::MediaExpression]
    );
}

#[test]
fn media_query_not_qualifier() {
    let sheet = parse("@media not screen { }");
    let expression = child(&sheet, child(&sheet, sheet.root(), 0), 0);
    assert_eq!(
        kinds(&sheet, expression),
        vec![NodeKind::Identifier, NodeKind::Identifier]
    );
    assert_eq!(text(&sheet, child(&sheet, expression, 0)), "not");
    assert_eq!(text(&sheet, child(&sheet, expression, 1)), "screen");
}

#[test]
fn unknown_blockless_directive() {
    let sheet = parse("@page;");
    let root = sheet.root();
    assert_eq!(kinds(&sheet, root), vec![NodeKind::BlocklessDirective]);
    assert_eq!(text(&sheet, child(&sheet, root, 0)), "@page");
}

#[test]
fn unknown_block_directive() {
    let sheet = parse("@font-face { font-family: x; }");
    let dir = child(&sheet, sheet.root(), 0);
    assert_eq!(sheet.kind(dir), NodeKind::BlockDirective);
    assert_eq!(
        kinds(&sheet, dir),
        vec![NodeKind::BlocklessDirective, NodeKind::Block]
    );
    assert_eq!(text(&sheet, child(&sheet, dir, 0)), "@font-face");

    let block = child(&sheet, dir, 1);
    assert_eq!(kinds(&sheet, block), vec![NodeKind::Rule]);
}
