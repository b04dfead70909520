//! Integration tests for the Source Map v3 model, builder, and consumer.

use wallaby_sourcemap::{
    MapError, Mapping, SourceMap, SourceMapBuilder, SourceMapConsumer, VlqError,
};

/// Helper building a one-source map from `(gen_line, gen_col, orig_line,
/// orig_col)` tuples (all 1-indexed).
fn map_of(mappings: &[(usize, usize, usize, usize)]) -> SourceMap {
    let mut builder = SourceMapBuilder::new(None);
    let source = builder.add_source("a.css");
    for &(generated_line, generated_column, original_line, original_column) in mappings {
        builder.add_mapping(Mapping {
            generated_line,
            generated_column,
            source_index: source,
            original_line,
            original_column,
        });
    }
    builder.build()
}

// ========== encoding ==========

#[test]
fn test_single_mapping_encodes_to_aaaa() {
    let map = map_of(&[(1, 1, 1, 1)]);
    assert_eq!(map.mappings, "AAAA");
    assert_eq!(map.version, 3);
}

#[test]
fn test_columns_are_delta_encoded_within_a_line() {
    let map = map_of(&[(1, 1, 1, 1), (1, 5, 1, 5)]);
    // Second segment: +4 generated column, same source, same line, +4 column.
    assert_eq!(map.mappings, "AAAA,IAAI");
}

#[test]
fn test_lines_are_separated_by_semicolons() {
    let map = map_of(&[(1, 1, 1, 1), (2, 1, 2, 1)]);
    assert_eq!(map.mappings, "AAAA;AACA");
}

#[test]
fn test_skipped_generated_lines_leave_empty_groups() {
    let map = map_of(&[(1, 1, 1, 1), (3, 1, 2, 1)]);
    assert_eq!(map.mappings, "AAAA;;AACA");
}

#[test]
fn test_builder_interns_sources() {
    let mut builder = SourceMapBuilder::new(None);
    let first = builder.add_source("a.css");
    let second = builder.add_source("b.css");
    let again = builder.add_source("a.css");
    assert_eq!(first, 0);
    assert_eq!(second, 1);
    assert_eq!(again, 0);
    assert_eq!(builder.build().sources, vec!["a.css".to_string(), "b.css".to_string()]);
}

// ========== JSON ==========

#[test]
fn test_json_round_trip() {
    let map = map_of(&[(1, 1, 2, 3)]);
    let json = map.to_json().unwrap();
    let back = SourceMap::from_json(&json).unwrap();
    assert_eq!(back, map);
}

#[test]
fn test_json_uses_camel_case_and_omits_absent_file() {
    let map = map_of(&[(1, 1, 1, 1)]);
    let json = map.to_json().unwrap();
    assert!(json.contains("\"mappings\""));
    assert!(json.contains("\"sources\""));
    assert!(!json.contains("\"file\""));
    assert!(!json.contains("sources_content"));
}

#[test]
fn test_json_without_names_key_parses() {
    let json = r#"{"version":3,"sources":["a.css"],"mappings":"AAAA"}"#;
    let map = SourceMap::from_json(json).unwrap();
    assert!(map.names.is_empty());
}

// ========== consumption ==========

#[test]
fn test_consumer_resolves_exact_positions() {
    let map = map_of(&[(1, 1, 3, 2), (2, 5, 7, 9)]);
    let consumer = SourceMapConsumer::new(&map).unwrap();

    let first = consumer.original_position_for(1, 1).unwrap();
    assert_eq!(first.source, "a.css");
    assert_eq!((first.line, first.column), (3, 2));

    let second = consumer.original_position_for(2, 5).unwrap();
    assert_eq!((second.line, second.column), (7, 9));
}

#[test]
fn test_consumer_picks_the_nearest_preceding_segment() {
    let map = map_of(&[(1, 1, 1, 1), (1, 10, 4, 4)]);
    let consumer = SourceMapConsumer::new(&map).unwrap();

    // Column 6 falls between the two segments: the first one wins.
    let hit = consumer.original_position_for(1, 6).unwrap();
    assert_eq!((hit.line, hit.column), (1, 1));

    // Past the last segment, the last one wins.
    let tail = consumer.original_position_for(1, 40).unwrap();
    assert_eq!((tail.line, tail.column), (4, 4));
}

#[test]
fn test_consumer_misses_return_none() {
    let map = map_of(&[(2, 5, 1, 1)]);
    let consumer = SourceMapConsumer::new(&map).unwrap();

    // No mappings on line 1 at all.
    assert_eq!(consumer.original_position_for(1, 1), None);
    // Line 2 before the first mapped column.
    assert_eq!(consumer.original_position_for(2, 2), None);
    // A line past the end of the map.
    assert_eq!(consumer.original_position_for(9, 1), None);
}

#[test]
fn test_consumer_round_trips_builder_output() {
    let mappings = [(1, 1, 10, 2), (1, 8, 11, 5), (4, 3, 12, 1)];
    let consumer = SourceMapConsumer::new(&map_of(&mappings)).unwrap();
    for (generated_line, generated_column, original_line, original_column) in mappings {
        let hit = consumer
            .original_position_for(generated_line, generated_column)
            .unwrap();
        assert_eq!((hit.line, hit.column), (original_line, original_column));
    }
}

// ========== malformed input ==========

#[test]
fn test_invalid_base64_character_is_rejected() {
    let map = SourceMap {
        version: 3,
        file: None,
        sources: vec!["a.css".to_string()],
        sources_content: None,
        names: Vec::new(),
        mappings: "A!A".to_string(),
    };
    assert!(matches!(
        SourceMapConsumer::new(&map),
        Err(MapError::Vlq(VlqError::InvalidCharacter('!')))
    ));
}

#[test]
fn test_bad_segment_length_is_rejected() {
    let map = SourceMap {
        version: 3,
        file: None,
        sources: vec!["a.css".to_string()],
        sources_content: None,
        names: Vec::new(),
        mappings: "AA".to_string(),
    };
    assert!(matches!(
        SourceMapConsumer::new(&map),
        Err(MapError::BadSegmentLength(2))
    ));
}

#[test]
fn test_out_of_range_source_is_rejected() {
    let map = SourceMap {
        version: 3,
        file: None,
        sources: vec!["a.css".to_string()],
        sources_content: None,
        names: Vec::new(),
        mappings: "ACAA".to_string(),
    };
    assert!(matches!(
        SourceMapConsumer::new(&map),
        Err(MapError::SourceOutOfRange { index: 1, len: 1 })
    ));
}
