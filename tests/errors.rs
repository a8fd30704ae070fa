use macros::parse_err;

#[test]
fn invalid_top_level_expression() {
    assert_eq!(
        parse_err("a { color: red; } }"),
        "Error: invalid top-level expression"
    );
}

#[test]
fn invalid_property_name() {
    assert_eq!(parse_err("a { 123: red; }"), "Error: invalid property name");
}

#[test]
fn property_requires_colon() {
    assert_eq!(
        parse_err("a { color red; }"),
        "Error: property \"color\" must be followed by a ':'"
    );
}

#[test]
fn assignment_requires_colon() {
    assert_eq!(
        parse_err("$x 1;"),
        "Error: expected ':' after $x in assignment statement"
    );
}

#[test]
fn top_level_assignment_requires_semicolon() {
    assert_eq!(
        parse_err("$x: 1 a { color: red; }"),
        "Error: top-level variable binding must be terminated by ';'"
    );
}

#[test]
fn unclosed_parenthesis() {
    assert_eq!(parse_err("$x: (1;"), "Error: unclosed parenthesis");
}

#[test]
fn unterminated_uri() {
    assert_eq!(
        parse_err("a { background: url(x; }"),
        "Error: URI is missing ')'"
    );
}

#[test]
fn mixin_requires_name() {
    assert_eq!(
        parse_err("@mixin { color: red; }"),
        "Error: invalid name in @mixin directive"
    );
}

#[test]
fn function_body_is_restricted() {
    assert_eq!(
        parse_err("@function f() { a { color: red; } }"),
        "Error: only variable declarations and control directives are allowed inside functions"
    );
}

#[test]
fn import_is_rejected_inside_mixin() {
    assert_eq!(
        parse_err("@mixin m { @import \"a\"; }"),
        "Error: @import directive not allowed inside definition of mixin or function"
    );
}

#[test]
fn import_is_rejected_inside_function() {
    assert_eq!(
        parse_err("@function f() { @import \"a\"; }"),
        "Error: @import directive not allowed inside definition of mixin or function"
    );
}

#[test]
fn for_requires_from() {
    assert_eq!(
        parse_err("@for $i in 1 through 3 { }"),
        "Error: expected 'from' keyword in @for directive"
    );
}

#[test]
fn for_requires_bound_keyword() {
    assert_eq!(
        parse_err("@for $i from 1 until 3 { }"),
        "Error: expected 'through' or 'to' keyword in @for directive"
    );
}

#[test]
fn statements_require_semicolons() {
    assert_eq!(
        parse_err("a { @include m() width: 1px; }"),
        "Error: non-terminal statement or declaration must end with ';'"
    );
}

#[test]
fn empty_propset_is_rejected() {
    assert_eq!(
        parse_err("a { font: { } }"),
        "Error: namespaced property cannot be empty"
    );
}

#[test]
fn missing_values_are_reported() {
    // the last successfully lexed token is the colon of the declaration
    assert_eq!(
        parse_err("a { color: ~; }"),
        "Error: error reading values after :"
    );
}

#[test]
fn empty_parameter_list_entry() {
    assert_eq!(
        parse_err("@mixin m($a,) { }"),
        "Error: expected a variable name (e.g. $x) for the parameter list for m"
    );
}
