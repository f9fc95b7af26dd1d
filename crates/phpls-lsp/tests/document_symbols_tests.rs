use super::*;

/// Flatten a symbol list into `(kind, name)` pairs for order-sensitive
/// comparison at one nesting level.
fn outline(symbols: &[DocumentSymbol]) -> Vec<(SymbolKind, &str)> {
    symbols
        .iter()
        .map(|s| (s.kind, s.name.as_str()))
        .collect()
}

#[test]
fn test_single_variable() {
    let source = "<?php\n$name = \"Alice\";\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Variable, "name")]);
    // Named and positioned by the bare name, without the `$` sigil.
    assert_eq!(symbols[0].range.start, Position::new(1, 1));
    assert_eq!(symbols[0].range.end, Position::new(1, 5));
    assert_eq!(symbols[0].selection_range, symbols[0].range);
}

#[test]
fn test_multiple_variables_in_declaration_order() {
    let source = "<?php\n$name = \"Alice\";\n$age = 30;\n$city = \"Oslo\";\n";
    let symbols = extract(source);

    assert_eq!(
        outline(&symbols),
        vec![
            (SymbolKind::Variable, "name"),
            (SymbolKind::Variable, "age"),
            (SymbolKind::Variable, "city"),
        ]
    );
}

#[test]
fn test_function_with_body_locals() {
    let source = "<?php\nfunction greet() {\n    $name = \"Alice\";\n    $msg = \"hi\";\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Function, "greet")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![
            (SymbolKind::Variable, "name"),
            (SymbolKind::Variable, "msg"),
        ]
    );
    // The function symbol spans the whole declaration, not just its name.
    assert_eq!(symbols[0].range.start.line, 1);
    assert_eq!(symbols[0].range.end.line, 4);
}

#[test]
fn test_nested_function() {
    let source = "<?php\nfunction outer() {\n    function inner() {\n        $x = 1;\n    }\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Function, "outer")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![(SymbolKind::Function, "inner")]
    );
    assert_eq!(
        outline(&symbols[0].children[0].children),
        vec![(SymbolKind::Variable, "x")]
    );
}

#[test]
fn test_class_heritage_clauses() {
    let source = "<?php\nclass Foo extends Bar implements Baz {\n    use Qux;\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Class, "Foo")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![
            (SymbolKind::Class, "Bar"),
            (SymbolKind::Interface, "Baz"),
            (SymbolKind::Class, "Qux"),
        ]
    );
}

#[test]
fn test_interface_extends_interface() {
    let source = "<?php\ninterface Foo extends Bar {\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Interface, "Foo")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![(SymbolKind::Interface, "Bar")]
    );
}

#[test]
fn test_trait_declaration() {
    let source = "<?php\ntrait Greets {\n    public function greet() {}\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Class, "Greets")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![(SymbolKind::Method, "greet")]
    );
}

#[test]
fn test_class_methods() {
    let source = "<?php\nclass Foo {\n    public function bar() {}\n    public function baz() {}\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Class, "Foo")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![(SymbolKind::Method, "bar"), (SymbolKind::Method, "baz")]
    );
}

#[test]
fn test_class_properties_and_constant() {
    let source =
        "<?php\nclass Foo {\n    public $bar;\n    private $baz;\n    const QUX = 1;\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Class, "Foo")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![
            (SymbolKind::Property, "bar"),
            (SymbolKind::Property, "baz"),
            (SymbolKind::Constant, "QUX"),
        ]
    );
}

#[test]
fn test_define_call_keeps_quotes() {
    let source = "<?php\ndefine('FOO', 1);\nconst BAR = 2;\n";
    let symbols = extract(source);

    assert_eq!(
        outline(&symbols),
        vec![
            (SymbolKind::Constant, "'FOO'"),
            (SymbolKind::Constant, "BAR"),
        ]
    );
}

#[test]
fn test_method_locals_nest_under_class() {
    let source = "<?php\nclass Foo {\n    public function bar() {\n        $name = \"a\";\n        $github = \"b\";\n    }\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Class, "Foo")]);
    // The method is a leaf, so its body locals surface as class children
    // after it, in source order.
    assert_eq!(
        outline(&symbols[0].children),
        vec![
            (SymbolKind::Method, "bar"),
            (SymbolKind::Variable, "name"),
            (SymbolKind::Variable, "github"),
        ]
    );
}

#[test]
fn test_abstract_class_and_method() {
    let source = "<?php\nabstract class Foo {\n    abstract public function bar();\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Class, "Foo")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![(SymbolKind::Method, "bar")]
    );
}

#[test]
fn test_function_parameters_are_children() {
    let source = "<?php\nfunction add($a, $b) {\n    $sum = $a + $b;\n}\n";
    let symbols = extract(source);

    assert_eq!(outline(&symbols), vec![(SymbolKind::Function, "add")]);
    assert_eq!(
        outline(&symbols[0].children),
        vec![
            (SymbolKind::Variable, "a"),
            (SymbolKind::Variable, "b"),
            (SymbolKind::Variable, "sum"),
            (SymbolKind::Variable, "a"),
            (SymbolKind::Variable, "b"),
        ]
    );
}

#[test]
fn test_empty_and_non_php_text() {
    assert!(extract("").is_empty());
    assert!(extract("just some text, no php tag").is_empty());
}

#[test]
fn test_parent_ranges_contain_children() {
    let source = "<?php\nclass Foo extends Bar {\n    public $baz;\n    public function qux() {\n        $local = 1;\n    }\n}\nfunction standalone() {\n    $x = 2;\n}\n";
    let symbols = extract(source);

    fn check(symbols: &[DocumentSymbol]) {
        for symbol in symbols {
            for child in &symbol.children {
                assert!(
                    symbol.range.contains_lines(&child.range),
                    "{} ({:?}) does not contain {} ({:?})",
                    symbol.name,
                    symbol.range,
                    child.name,
                    child.range
                );
            }
            check(&symbol.children);
        }
    }
    check(&symbols);
}

#[test]
fn test_symbol_serializes_with_lsp_field_names() {
    let source = "<?php\n$x = 1;\n";
    let symbols = extract(source);
    let json = serde_json::to_value(&symbols[0]).unwrap();

    assert_eq!(json["kind"], 13);
    assert!(json.get("selectionRange").is_some());
    assert!(json.get("selection_range").is_none());
}
