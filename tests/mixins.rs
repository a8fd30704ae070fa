use sassling::NodeKind;

use macros::{child, kinds, parse, should_eval, text};

#[test]
fn definition_and_call() {
    let sheet = parse("@mixin m($x, $y: 2) { a: $x; } .r { @include m(1); }");
    let root = sheet.root();
    assert_eq!(kinds(&sheet, root), vec![NodeKind::Mixin, NodeKind::Ruleset]);

    let mixin = child(&sheet, root, 0);
    assert_eq!(
        kinds(&sheet, mixin),
        vec![NodeKind::Identifier, NodeKind::Parameters, NodeKind::Block]
    );
    assert_eq!(text(&sheet, child(&sheet, mixin, 0)), "m");

    let params = child(&sheet, mixin, 1);
    assert_eq!(
        kinds(&sheet, params),
        vec![NodeKind::Variable, NodeKind::Assignment]
    );
    let default = child(&sheet, params, 1);
    assert_eq!(
        kinds(&sheet, default),
        vec![NodeKind::Variable, NodeKind::TextualNumber]
    );
    assert_eq!(text(&sheet, child(&sheet, default, 1)), "2");

    let block = child(&sheet, child(&sheet, root, 1), 1);
    assert_eq!(kinds(&sheet, block), vec![NodeKind::Expansion]);

    let call = child(&sheet, block, 0);
    assert_eq!(
        kinds(&sheet, call),
        vec![NodeKind::Identifier, NodeKind::Arguments]
    );
    assert_eq!(text(&sheet, child(&sheet, call, 0)), "m");

    let args = child(&sheet, call, 1);
    assert_eq!(kinds(&sheet, args), vec![NodeKind::TextualNumber]);
    assert!(should_eval(&sheet, child(&sheet, args, 0)));
}

#[test]
fn concise_definition_and_call() {
    let sheet = parse("=m { color: red; } a { +m; }");
    let root = sheet.root();
    assert_eq!(kinds(&sheet, root), vec![NodeKind::Mixin, NodeKind::Ruleset]);

    let block = child(&sheet, child(&sheet, root, 1), 1);
    assert_eq!(kinds(&sheet, block), vec![NodeKind::Expansion]);
}

#[test]
fn parameterless_definition() {
    let sheet = parse("@mixin m { color: red; }");
    let mixin = child(&sheet, sheet.root(), 0);
    let params = child(&sheet, mixin, 1);
    assert_eq!(sheet.kind(params), NodeKind::Parameters);
    assert!(sheet.children(params).is_empty());
}

#[test]
fn keyword_argument() {
    let sheet = parse("a { @include m($width: 10px); }");
    let call = child(&sheet, child(&sheet, child(&sheet, sheet.root(), 0), 1), 0);
    let args = child(&sheet, call, 1);
    assert_eq!(kinds(&sheet, args), vec![NodeKind::Assignment]);

    let keyword = child(&sheet, args, 0);
    assert_eq!(
        kinds(&sheet, keyword),
        vec![NodeKind::Variable, NodeKind::TextualDimension]
    );
    assert_eq!(text(&sheet, child(&sheet, keyword, 0)), "$width");
}

#[test]
fn mixin_body_may_contain_nested_rules() {
    let sheet = parse("@mixin m { a { color: red; } }");
    let body = child(&sheet, child(&sheet, sheet.root(), 0), 2);
    assert_eq!(kinds(&sheet, body), vec![NodeKind::Ruleset]);
}
