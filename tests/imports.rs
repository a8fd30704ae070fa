use sassling::NodeKind;

use macros::{child, kinds, text, TestFs};

fn parse_with_fs(input: &str, fs: &TestFs) -> sassling::StyleSheet {
    sassling::parse_string(input, &sassling::Options::default().fs(fs))
        .unwrap_or_else(|e| panic!("failed to parse {:?}: {}", input, e))
}

#[test]
fn quoted_import_splices_children() {
    let mut fs = TestFs::new();
    fs.add_file("_partial.scss", "a { color: red; }");

    let sheet = parse_with_fs("@import \"partial\"; b { color: blue; }", &fs);
    let root = sheet.root();
    assert_eq!(
        kinds(&sheet, root),
        vec![NodeKind::Ruleset, NodeKind::Ruleset]
    );
    assert_eq!(text(&sheet, child(&sheet, child(&sheet, root, 0), 0)), "a");
    assert_eq!(text(&sheet, child(&sheet, child(&sheet, root, 1), 0)), "b");
}

#[test]
fn import_preserves_surrounding_order() {
    let mut fs = TestFs::new();
    fs.add_file("a.scss", "x { color: red; } @import \"b\"; y { color: blue; }");
    fs.add_file("b.scss", "z { color: green; }");

    let sheet = parse_with_fs("@import \"a\";", &fs);
    let root = sheet.root();
    assert_eq!(sheet.children(root).len(), 3);

    let selectors: Vec<_> = sheet
        .children(root)
        .iter()
        .map(|&ruleset| text(&sheet, child(&sheet, ruleset, 0)))
        .collect();
    assert_eq!(selectors, vec!["x", "z", "y"]);
}

#[test]
fn import_inside_block_splices_into_it() {
    let mut fs = TestFs::new();
    fs.add_file("decls.scss", "b { color: red; }");

    let sheet = parse_with_fs("a { @import \"decls\"; }", &fs);
    let block = child(&sheet, child(&sheet, sheet.root(), 0), 1);
    assert_eq!(kinds(&sheet, block), vec![NodeKind::Ruleset]);
}

#[test]
fn imported_tree_matches_directly_parsed_tree() {
    let source = "a { width: 1 + 2; }";
    let mut fs = TestFs::new();
    fs.add_file("lib.scss", source);

    let direct = macros::parse(source);
    let imported = parse_with_fs("@import \"lib\";", &fs);

    let direct_rule = child(
        &direct,
        child(&direct, child(&direct, direct.root(), 0), 1),
        0,
    );
    let imported_rule = child(
        &imported,
        child(&imported, child(&imported, imported.root(), 0), 1),
        0,
    );
    assert_eq!(
        kinds(&direct, direct_rule),
        kinds(&imported, imported_rule)
    );

    let direct_value = child(&direct, direct_rule, 1);
    let imported_value = child(&imported, imported_rule, 1);
    assert_eq!(
        kinds(&direct, direct_value),
        kinds(&imported, imported_value)
    );
}

#[test]
fn url_import_with_bareword() {
    let sheet = macros::parse("@import url(foo.css);");
    let root = sheet.root();
    assert_eq!(kinds(&sheet, root), vec![NodeKind::CssImport]);

    let import = child(&sheet, root, 0);
    assert_eq!(kinds(&sheet, import), vec![NodeKind::Identifier]);
    assert_eq!(text(&sheet, child(&sheet, import, 0)), "foo.css");
}

#[test]
fn url_import_with_string() {
    let sheet = macros::parse("@import url(\"foo.css\");");
    let import = child(&sheet, sheet.root(), 0);
    assert_eq!(sheet.kind(import), NodeKind::CssImport);
    assert_eq!(kinds(&sheet, import), vec![NodeKind::StringConstant]);
    assert_eq!(text(&sheet, child(&sheet, import, 0)), "\"foo.css\"");
}

#[test]
fn missing_import_is_a_read_error() {
    let err = match sassling::parse_string(
        "@import \"missing\";",
        &sassling::Options::default().fs(&sassling::NullFs),
    ) {
        Ok(..) => panic!("did not fail"),
        Err(e) => e.to_string(),
    };
    assert!(
        err.starts_with("Error: error reading file \"missing\""),
        "unexpected error: {}",
        err
    );
}

#[test]
fn import_loop_is_rejected() {
    let mut fs = TestFs::new();
    fs.add_file("a.scss", "@import \"a\";");

    let err = match sassling::parse_string("@import \"a\";", &sassling::Options::default().fs(&fs))
    {
        Ok(..) => panic!("did not fail"),
        Err(e) => e.to_string(),
    };
    assert!(
        err.starts_with("Error: import loop detected"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn directory_import_resolves_to_index_partial() {
    let mut fs = TestFs::new();
    fs.add_file("theme/_index.scss", "a { color: red; }");

    let sheet = parse_with_fs("@import \"theme\";", &fs);
    assert_eq!(kinds(&sheet, sheet.root()), vec![NodeKind::Ruleset]);
}

#[test]
fn load_paths_are_consulted_after_relative_lookup() {
    let mut fs = TestFs::new();
    fs.add_file("vendor/_lib.scss", "a { color: red; }");

    let sheet = sassling::parse_string(
        "@import \"lib\";",
        &sassling::Options::default().fs(&fs).load_path("vendor"),
    )
    .expect("failed to parse");
    assert_eq!(kinds(&sheet, sheet.root()), vec![NodeKind::Ruleset]);
}
