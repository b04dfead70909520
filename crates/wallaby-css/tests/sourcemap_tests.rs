//! Integration tests for source map generation and upstream composition.

use wallaby_css::{parse, stringify, MapOption, ParseOptions, SourceMap, StringifyOptions};
use wallaby_sourcemap::{Mapping, SourceMapBuilder, SourceMapConsumer};

/// Parse with a `from` identifier.
fn parse_from(input: &str, from: &str) -> wallaby_css::CssTree {
    parse(input, &ParseOptions { from: Some(from.to_string()) }).unwrap()
}

// ========== generation ==========

#[test]
fn test_map_is_produced_with_css() {
    let tree = parse_from("a { color: black }", "in.css");
    let output = stringify(
        &tree,
        &StringifyOptions {
            to: Some("out.css".to_string()),
            map: MapOption::New,
            ..StringifyOptions::default()
        },
    )
    .unwrap();

    assert_eq!(output.css, "a { color: black }");
    let map = SourceMap::from_json(&output.map.unwrap()).unwrap();
    assert_eq!(map.version, 3);
    assert_eq!(map.file.as_deref(), Some("out.css"));
    assert_eq!(map.sources, vec!["in.css".to_string()]);
    assert!(!map.mappings.is_empty());
}

#[test]
fn test_mappings_point_at_node_starts() {
    let tree = parse_from("a { color: black }", "in.css");
    let output = stringify(
        &tree,
        &StringifyOptions { map: MapOption::New, ..StringifyOptions::default() },
    )
    .unwrap();

    let map = SourceMap::from_json(&output.map.unwrap()).unwrap();
    let consumer = SourceMapConsumer::new(&map).unwrap();

    // The rule starts at output 1:1 and came from input 1:1.
    let rule = consumer.original_position_for(1, 1).unwrap();
    assert_eq!(rule.source, "in.css");
    assert_eq!((rule.line, rule.column), (1, 1));

    // The declaration starts at output column 5 and came from input 1:5.
    let decl = consumer.original_position_for(1, 5).unwrap();
    assert_eq!((decl.line, decl.column), (1, 5));
}

#[test]
fn test_multiline_output_mappings() {
    let tree = parse_from("a {\n  color: red;\n}\nb {\n  top: 0;\n}\n", "in.css");
    let output = stringify(
        &tree,
        &StringifyOptions { map: MapOption::New, ..StringifyOptions::default() },
    )
    .unwrap();

    let map = SourceMap::from_json(&output.map.unwrap()).unwrap();
    let consumer = SourceMapConsumer::new(&map).unwrap();

    let second_decl = consumer.original_position_for(5, 3).unwrap();
    assert_eq!((second_decl.line, second_decl.column), (5, 3));
}

#[test]
fn test_edited_nodes_still_map_to_their_origin() {
    let mut tree = parse_from("a { color: black }", "in.css");
    let rule = tree.first_child(tree.root()).unwrap();
    let decl = tree.children(rule)[0];
    tree.as_decl_mut(decl).unwrap().value = "white".to_string();

    let output = stringify(
        &tree,
        &StringifyOptions { map: MapOption::New, ..StringifyOptions::default() },
    )
    .unwrap();
    assert_eq!(output.css, "a { color: white }");

    let map = SourceMap::from_json(&output.map.unwrap()).unwrap();
    let consumer = SourceMapConsumer::new(&map).unwrap();
    let position = consumer.original_position_for(1, 5).unwrap();
    assert_eq!((position.line, position.column), (1, 5));
}

// ========== composition ==========

/// An upstream map pretending our input was compiled from `a.scss`:
/// input 1:1 came from 5:3 and input 1:3 from 6:7.
fn upstream() -> SourceMap {
    let mut builder = SourceMapBuilder::new(Some("x.css".to_string()));
    let source = builder.add_source("a.scss");
    builder.add_mapping(Mapping {
        generated_line: 1,
        generated_column: 1,
        source_index: source,
        original_line: 5,
        original_column: 3,
    });
    builder.add_mapping(Mapping {
        generated_line: 1,
        generated_column: 3,
        source_index: source,
        original_line: 6,
        original_column: 7,
    });
    builder.build()
}

#[test]
fn test_composition_resolves_through_the_upstream_map() {
    let tree = parse_from("x{color:red}", "x.css");
    let output = stringify(
        &tree,
        &StringifyOptions { map: MapOption::Prior(upstream()), ..StringifyOptions::default() },
    )
    .unwrap();
    assert_eq!(output.css, "x{color:red}");

    let map = SourceMap::from_json(&output.map.unwrap()).unwrap();
    assert_eq!(map.sources, vec!["a.scss".to_string()]);

    let consumer = SourceMapConsumer::new(&map).unwrap();
    // Output 1:1 is the rule, which the upstream traces to a.scss 5:3.
    let rule = consumer.original_position_for(1, 1).unwrap();
    assert_eq!(rule.source, "a.scss");
    assert_eq!((rule.line, rule.column), (5, 3));

    // Output 1:3 is the declaration, traced to a.scss 6:7.
    let decl = consumer.original_position_for(1, 3).unwrap();
    assert_eq!((decl.line, decl.column), (6, 7));
}

#[test]
fn test_composition_accepts_json_text() {
    let json = upstream().to_json().unwrap();
    let tree = parse_from("x{color:red}", "x.css");
    let output = stringify(
        &tree,
        &StringifyOptions { map: MapOption::PriorJson(json), ..StringifyOptions::default() },
    )
    .unwrap();

    let map = SourceMap::from_json(&output.map.unwrap()).unwrap();
    assert_eq!(map.sources, vec!["a.scss".to_string()]);
}

#[test]
fn test_malformed_upstream_json_fails_atomically() {
    let tree = parse_from("x{color:red}", "x.css");
    let result = stringify(
        &tree,
        &StringifyOptions {
            map: MapOption::PriorJson("not a map".to_string()),
            ..StringifyOptions::default()
        },
    );
    assert!(result.is_err());
}
