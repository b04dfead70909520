//! Lossless CSS tokenizer, parser, and stringifier for the wallaby
//! postprocessor.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a verbatim-lexeme scanner (no value decoding, every
//!   input byte survives in some token)
//! - **Parser** - a single-pass structural parser producing the editable
//!   [`CssTree`], with raw records and whitespace side channels attached to
//!   every node
//! - **Stringifier** - tree-to-text emission preferring original bytes for
//!   untouched nodes and style-matched defaults for synthesized ones
//! - **Entry points** - [`parse`], [`stringify`], and [`apply`] with their
//!   option types, plus source-map generation and upstream-map composition
//!
//! # Not in scope
//!
//! Selector semantics, specificity, cascade, value parsing, file I/O, and
//! plugin chaining all live outside this crate. Transformations receive the
//! tree, mutate it, and hand it back; everything else is plumbing around
//! that.
//!
//! # Round-trip guarantee
//!
//! For any input `s`, `stringify(&parse(s, ..)?, ..)` reproduces `s`
//! byte-for-byte as long as no node was modified. Modifying a node only
//! changes the bytes of that node's own footprint.

/// Structural parser per the grammar outline of
/// [CSS Syntax Level 3 § 5](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Tree-to-text stringifier with raw-byte preference.
pub mod stringifier;
/// Lossless tokenizer.
pub mod tokenizer;

use thiserror::Error;
use wallaby_sourcemap::SourceMapConsumer;

pub use parser::CssParser;
pub use stringifier::{Builder, MapSink, StringBuilder, Stringifier};
pub use tokenizer::{CssTokenizer, Token, TokenKind};

// Re-exports for convenience: the types a transformation touches.
pub use wallaby_ast::{AtRuleBody, ChildRef, CssTree, NodeId, NodeKind, Raw, TreeError};
pub use wallaby_common::{Position, Span, SyntaxError, Warning};
pub use wallaby_sourcemap::{MapError, SourceMap};

/// Stand-in source label when neither `from` nor a parse-time filename is
/// available.
const ANONYMOUS_SOURCE: &str = "<css input>";

/// Options for [`parse`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Input file identifier, recorded on the tree and in error messages.
    pub from: Option<String>,
}

/// What kind of source map [`stringify`] should produce.
#[derive(Debug, Clone, Default)]
pub enum MapOption {
    /// No map.
    #[default]
    Off,
    /// Produce a fresh map from the parsed input.
    New,
    /// Compose with an upstream map (already decoded).
    Prior(SourceMap),
    /// Compose with an upstream map (JSON text).
    PriorJson(String),
}

/// Options for [`stringify`].
#[derive(Debug, Clone, Default)]
pub struct StringifyOptions {
    /// Input file identifier; overrides the one recorded at parse time.
    pub from: Option<String>,
    /// Output file identifier, stored in the produced map's `file` key.
    pub to: Option<String>,
    /// Source map behavior.
    pub map: MapOption,
}

/// The result of [`stringify`]: CSS text and, when requested, a JSON-encoded
/// source map. Produced atomically: on error, neither is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// The emitted CSS text.
    pub css: String,
    /// The JSON-encoded Source Map v3 object, when one was requested.
    pub map: Option<String>,
}

/// Any error the processing pipeline can surface.
#[derive(Debug, Error)]
pub enum CssError {
    /// The parser could not proceed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A tree edit violated a container's shape.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The upstream source map could not be decoded.
    #[error("invalid source map: {0}")]
    Map(#[from] MapError),
    /// The upstream source map (or produced map) was not valid JSON.
    #[error("invalid source map JSON: {0}")]
    MapJson(#[from] serde_json::Error),
    /// An error raised inside a user transformation.
    #[error("[plugin: {plugin}] {message}")]
    Plugin {
        /// Identifier of the transformation that failed.
        plugin: String,
        /// Its rendered error.
        message: String,
    },
}

/// Parse CSS text into an editable [`CssTree`].
///
/// # Errors
///
/// A [`SyntaxError`] carrying position, the `from` file identifier, and the
/// input text for excerpt rendering.
pub fn parse(css: &str, options: &ParseOptions) -> Result<CssTree, SyntaxError> {
    CssParser::new(css, options.from.clone()).parse()
}

/// Stringify a tree back to CSS text, optionally with a source map.
///
/// # Errors
///
/// Only map handling can fail: a malformed upstream map surfaces before any
/// output is produced.
pub fn stringify(tree: &CssTree, options: &StringifyOptions) -> Result<Output, CssError> {
    let consumer = match &options.map {
        MapOption::Off => {
            let mut sink = StringBuilder::new();
            Stringifier::new(tree, &mut sink).stringify();
            return Ok(Output { css: sink.finish(), map: None });
        }
        MapOption::New => None,
        MapOption::Prior(map) => Some(SourceMapConsumer::new(map)?),
        MapOption::PriorJson(json) => Some(SourceMapConsumer::new(&SourceMap::from_json(json)?)?),
    };

    let source_name = options
        .from
        .clone()
        .or_else(|| tree.filename().map(str::to_string))
        .unwrap_or_else(|| ANONYMOUS_SOURCE.to_string());
    let mut sink = MapSink::new(tree, options.to.clone(), &source_name, consumer);
    Stringifier::new(tree, &mut sink).stringify();
    let (css, map) = sink.finish();
    let map = map.to_json()?;
    Ok(Output { css, map: Some(map) })
}

/// Run one transformation over a tree.
///
/// The transformation may mutate the tree in place (return `Ok(None)`) or
/// hand back a replacement tree (`Ok(Some(..))`). Errors are re-surfaced
/// with the plugin identifier attached: syntax errors keep their kind, any
/// other error is wrapped as [`CssError::Plugin`].
///
/// # Errors
///
/// Whatever the transformation raises, tagged as described.
pub fn apply<F>(tree: CssTree, plugin: Option<&str>, transform: F) -> Result<CssTree, CssError>
where
    F: FnOnce(&mut CssTree) -> Result<Option<CssTree>, CssError>,
{
    let mut tree = tree;
    match transform(&mut tree) {
        Ok(None) => Ok(tree),
        Ok(Some(replacement)) => Ok(replacement),
        Err(error) => Err(tag_plugin(error, plugin)),
    }
}

/// Stamp a plugin identifier onto an error surfaced from a transformation.
fn tag_plugin(error: CssError, plugin: Option<&str>) -> CssError {
    let Some(plugin) = plugin else { return error };
    match error {
        CssError::Syntax(e) if e.plugin.is_none() => CssError::Syntax(e.with_plugin(plugin)),
        CssError::Syntax(e) => CssError::Syntax(e),
        CssError::Plugin { plugin: existing, message } => {
            CssError::Plugin { plugin: existing, message }
        }
        other => CssError::Plugin { plugin: plugin.to_string(), message: other.to_string() },
    }
}
