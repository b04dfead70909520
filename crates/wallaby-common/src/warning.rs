//! Parser and transformation warnings.
//!
//! The parser never fails on recoverable oddities (a stray semicolon, for
//! example) because the byte-preserving tree keeps their bytes intact
//! anyway. Instead each oddity is recorded as a [`Warning`] carrying its
//! position, collected on the tree it was noticed in, so lint-style tooling
//! can report it with the same precision as a [`crate::SyntaxError`].
//! Transformations may add their own warnings, tagged with a plugin
//! identifier.

use core::fmt;

/// A recoverable oddity noticed while parsing or transforming.
///
/// The `Display` output mirrors the syntax-error message format, minus the
/// file (the tree that collects warnings knows its own file identifier):
///
/// ```text
/// [plugin: stripper] 3:7: Ignored stray semicolon
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Human-readable description, e.g. `"Ignored stray semicolon"`.
    pub text: String,
    /// 1-indexed line of the odd byte.
    pub line: usize,
    /// 1-indexed column of the odd byte.
    pub column: usize,
    /// Identifier of the transformation that raised the warning, if any.
    pub plugin: Option<String>,
}

impl Warning {
    /// Create a warning with a description and a position.
    #[must_use]
    pub fn new(text: impl Into<String>, line: usize, column: usize) -> Self {
        Self { text: text.into(), line, column, plugin: None }
    }

    /// Attach the identifier of the plugin that raised the warning.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    /// The one-line message: `[plugin: NAME] LINE:COL: TEXT`.
    #[must_use]
    pub fn message(&self) -> String {
        let position = format!("{}:{}: {}", self.line, self.column, self.text);
        match &self.plugin {
            Some(plugin) => format!("[plugin: {plugin}] {position}"),
            None => position,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
