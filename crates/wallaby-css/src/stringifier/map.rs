//! A stringifier sink that records source-map mappings as it writes.
//!
//! The sink keeps a running line/column cursor over the output. Whenever a
//! node's own body starts (the stringifier pushes those with the node
//! attached), one mapping is recorded from the current output position to
//! the node's `source.start`, resolved through the upstream map first when
//! one is being composed.

use wallaby_ast::{CssTree, NodeId};
use wallaby_sourcemap::{Mapping, SourceMap, SourceMapBuilder, SourceMapConsumer};

use super::stringifier::Builder;

/// Sink producing CSS text plus a source map.
pub struct MapSink<'a> {
    tree: &'a CssTree,
    css: String,
    /// 1-indexed line of the next character to be written.
    line: usize,
    /// 1-indexed column of the next character to be written.
    column: usize,
    builder: SourceMapBuilder,
    /// Upstream map being composed, if any.
    consumer: Option<SourceMapConsumer>,
    /// Interned index of the input itself (no-upstream case).
    own_source: Option<usize>,
}

impl<'a> MapSink<'a> {
    /// Create a sink.
    ///
    /// `file` is the generated-file identifier (`to`), `source_name` labels
    /// the parsed input. With an upstream `consumer`, mappings resolve
    /// through it and the produced map carries the upstream's sources list;
    /// without one, the input itself is the only source.
    #[must_use]
    pub fn new(
        tree: &'a CssTree,
        file: Option<String>,
        source_name: &str,
        consumer: Option<SourceMapConsumer>,
    ) -> Self {
        let mut builder = SourceMapBuilder::new(file);
        let own_source = match &consumer {
            Some(upstream) => {
                // The produced map references the upstream's sources.
                for source in upstream.sources() {
                    let _ = builder.add_source(source);
                }
                None
            }
            None => Some(builder.add_source(source_name)),
        };
        Self { tree, css: String::new(), line: 1, column: 1, builder, consumer, own_source }
    }

    /// Finish, returning the CSS text and the encoded map.
    #[must_use]
    pub fn finish(self) -> (String, SourceMap) {
        (self.css, self.builder.build())
    }
}

impl Builder for MapSink<'_> {
    fn push(&mut self, text: &str, node: Option<NodeId>) {
        if let Some(id) = node
            && let Some(span) = self.tree.source(id)
        {
            let start = span.start;
            match &self.consumer {
                Some(upstream) => {
                    // Composition: output -> this input -> original source.
                    if let Some(original) =
                        upstream.original_position_for(start.line, start.column)
                    {
                        let source_index = self.builder.add_source(&original.source);
                        self.builder.add_mapping(Mapping {
                            generated_line: self.line,
                            generated_column: self.column,
                            source_index,
                            original_line: original.line,
                            original_column: original.column,
                        });
                    }
                }
                None => {
                    if let Some(source_index) = self.own_source {
                        self.builder.add_mapping(Mapping {
                            generated_line: self.line,
                            generated_column: self.column,
                            source_index,
                            original_line: start.line,
                            original_column: start.column,
                        });
                    }
                }
            }
        }

        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.css.push_str(text);
    }
}
