//! Source Map v3 support for the wallaby CSS processor.
//!
//! # Scope
//!
//! This crate implements the
//! [Source Map Revision 3 Proposal](https://sourcemaps.info/spec.html) far
//! enough for a CSS postprocessor:
//! - **Model** - the JSON object (`version`, `file`, `sources`, `names`,
//!   `mappings`), serialized with serde
//! - **Builder** - collects absolute mappings during stringification and
//!   delta-encodes them into the VLQ `mappings` string
//! - **Consumer** - decodes an upstream map and resolves generated positions
//!   back to original ones, which is what map *composition* needs
//!
//! All positions in this crate's public API are 1-indexed lines and columns;
//! the 0-indexed convention of the wire format stays internal.

pub mod vlq;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use vlq::VlqError;

/// A Source Map v3 JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    /// Always 3.
    pub version: u32,
    /// The generated file this map describes, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Original source identifiers.
    pub sources: Vec<String>,
    /// Embedded source contents, parallel to `sources`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_content: Option<Vec<Option<String>>>,
    /// Symbol names referenced by mappings (unused by the CSS pipeline but
    /// preserved on round trips).
    #[serde(default)]
    pub names: Vec<String>,
    /// The VLQ-encoded mappings string.
    pub mappings: String,
}

impl SourceMap {
    /// Parse a map from its JSON encoding.
    ///
    /// # Errors
    ///
    /// Any JSON shape mismatch.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the map to its JSON encoding.
    ///
    /// # Errors
    ///
    /// Propagated from the JSON serializer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Failure to decode an upstream map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The `mappings` string is not valid VLQ.
    #[error("malformed mappings: {0}")]
    Vlq(#[from] VlqError),
    /// A mapping segment had a field count other than 1, 4, or 5.
    #[error("malformed mappings: segment with {0} fields")]
    BadSegmentLength(usize),
    /// A mapping referenced a source index outside `sources`.
    #[error("mapping references source {index} but the map has {len} sources")]
    SourceOutOfRange {
        /// The referenced index.
        index: usize,
        /// Number of sources in the map.
        len: usize,
    },
}

/// One absolute mapping collected by the builder.
///
/// All fields are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    /// Line in the generated output.
    pub generated_line: usize,
    /// Column in the generated output.
    pub generated_column: usize,
    /// Index into the builder's sources.
    pub source_index: usize,
    /// Line in the original source.
    pub original_line: usize,
    /// Column in the original source.
    pub original_column: usize,
}

/// Accumulates mappings during stringification and encodes the final map.
#[derive(Debug, Default)]
pub struct SourceMapBuilder {
    file: Option<String>,
    sources: Vec<String>,
    source_indices: HashMap<String, usize>,
    mappings: Vec<Mapping>,
}

impl SourceMapBuilder {
    /// Create a builder for the given generated file identifier.
    #[must_use]
    pub fn new(file: Option<String>) -> Self {
        Self { file, ..Self::default() }
    }

    /// Intern a source identifier, returning its index.
    pub fn add_source(&mut self, source: &str) -> usize {
        if let Some(&index) = self.source_indices.get(source) {
            return index;
        }
        let index = self.sources.len();
        self.sources.push(source.to_string());
        let _ = self.source_indices.insert(source.to_string(), index);
        index
    }

    /// Record one mapping (all positions 1-indexed).
    pub fn add_mapping(&mut self, mapping: Mapping) {
        self.mappings.push(mapping);
    }

    /// Encode everything into a [`SourceMap`].
    #[must_use]
    pub fn build(mut self) -> SourceMap {
        self.mappings
            .sort_by_key(|m| (m.generated_line, m.generated_column));

        let mut mappings = String::new();
        let mut current_line = 1;
        let mut previous_generated_column: i64 = 0;
        let mut previous_source: i64 = 0;
        let mut previous_original_line: i64 = 0;
        let mut previous_original_column: i64 = 0;
        let mut first_in_line = true;

        for m in &self.mappings {
            while current_line < m.generated_line {
                mappings.push(';');
                current_line += 1;
                previous_generated_column = 0;
                first_in_line = true;
            }
            if !first_in_line {
                mappings.push(',');
            }
            first_in_line = false;

            let generated_column = to_wire(m.generated_column);
            #[allow(clippy::cast_possible_wrap)]
            let source = m.source_index as i64;
            let original_line = to_wire(m.original_line);
            let original_column = to_wire(m.original_column);

            vlq::encode(generated_column - previous_generated_column, &mut mappings);
            vlq::encode(source - previous_source, &mut mappings);
            vlq::encode(original_line - previous_original_line, &mut mappings);
            vlq::encode(original_column - previous_original_column, &mut mappings);

            previous_generated_column = generated_column;
            previous_source = source;
            previous_original_line = original_line;
            previous_original_column = original_column;
        }

        SourceMap {
            version: 3,
            file: self.file,
            sources: self.sources,
            sources_content: None,
            names: Vec::new(),
            mappings,
        }
    }
}

/// Convert a 1-indexed position component to the wire format's 0-indexed one.
#[allow(clippy::cast_possible_wrap)]
fn to_wire(value: usize) -> i64 {
    value.saturating_sub(1) as i64
}

/// A resolved original position, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
    /// The original source identifier.
    pub source: String,
    /// 1-indexed line in the original source.
    pub line: usize,
    /// 1-indexed column in the original source.
    pub column: usize,
}

/// One decoded segment of an upstream map.
#[derive(Debug, Clone, Copy)]
struct Segment {
    /// 0-indexed generated column.
    generated_column: usize,
    /// `(source index, 0-indexed line, 0-indexed column)` when present.
    original: Option<(usize, usize, usize)>,
}

/// Decoded upstream map, queryable by generated position.
#[derive(Debug, Clone)]
pub struct SourceMapConsumer {
    sources: Vec<String>,
    /// Segments per generated line, sorted by generated column.
    lines: Vec<Vec<Segment>>,
}

impl SourceMapConsumer {
    /// Decode a map for querying.
    ///
    /// # Errors
    ///
    /// [`MapError`] when the `mappings` string is malformed or references a
    /// source that does not exist.
    pub fn new(map: &SourceMap) -> Result<Self, MapError> {
        let mut lines = Vec::new();
        let mut source: i64 = 0;
        let mut original_line: i64 = 0;
        let mut original_column: i64 = 0;

        for line_text in map.mappings.split(';') {
            let mut segments = Vec::new();
            let mut generated_column: i64 = 0;
            for segment_text in line_text.split(',') {
                if segment_text.is_empty() {
                    continue;
                }
                let bytes = segment_text.as_bytes();
                let mut position = 0;
                let mut fields = [0_i64; 5];
                let mut count = 0;
                while position < bytes.len() {
                    if count >= fields.len() {
                        return Err(MapError::BadSegmentLength(count + 1));
                    }
                    fields[count] = vlq::decode(bytes, &mut position)?;
                    count += 1;
                }
                if !matches!(count, 1 | 4 | 5) {
                    return Err(MapError::BadSegmentLength(count));
                }

                generated_column += fields[0];
                let original = if count >= 4 {
                    source += fields[1];
                    original_line += fields[2];
                    original_column += fields[3];
                    let index = usize::try_from(source).unwrap_or_default();
                    if index >= map.sources.len() {
                        return Err(MapError::SourceOutOfRange {
                            index,
                            len: map.sources.len(),
                        });
                    }
                    Some((
                        index,
                        usize::try_from(original_line).unwrap_or_default(),
                        usize::try_from(original_column).unwrap_or_default(),
                    ))
                } else {
                    None
                };
                segments.push(Segment {
                    generated_column: usize::try_from(generated_column).unwrap_or_default(),
                    original,
                });
            }
            lines.push(segments);
        }

        Ok(Self { sources: map.sources.clone(), lines })
    }

    /// The original source identifiers of the upstream map.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Resolve a generated position (1-indexed) to its original position.
    ///
    /// Follows consumer convention: the match is the last segment on the
    /// line whose generated column is at or before the queried column.
    #[must_use]
    pub fn original_position_for(&self, line: usize, column: usize) -> Option<OriginalPosition> {
        let segments = self.lines.get(line.checked_sub(1)?)?;
        let wire_column = column.checked_sub(1)?;
        let segment = segments
            .iter()
            .rev()
            .find(|s| s.generated_column <= wire_column)?;
        let (index, original_line, original_column) = segment.original?;
        Some(OriginalPosition {
            source: self.sources.get(index)?.clone(),
            line: original_line + 1,
            column: original_column + 1,
        })
    }
}
