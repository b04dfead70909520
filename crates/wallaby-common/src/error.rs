//! Syntax error values.
//!
//! A [`SyntaxError`] records everything needed to point a human at the broken
//! byte: the reason, the originating file (if known), the 1-indexed position,
//! the full input text (for excerpt rendering), and the plugin that raised it
//! (if any). Rendering is plain text; colorizing is left to front ends.

use core::fmt;
use std::error::Error;

/// Stand-in file label used when no `from` identifier was supplied.
const ANONYMOUS_INPUT: &str = "<css input>";

/// A CSS syntax error.
///
/// The `Display` output is the contractual message format:
///
/// ```text
/// [plugin: autoprefixer] main.css:1:4: Unclosed block
/// ```
///
/// where the `[plugin: ...]` prefix appears only when a plugin identifier is
/// set, and `<css input>` stands in for a missing file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable reason, e.g. `"Unclosed block"`.
    pub reason: String,
    /// File identifier the input came from, if one was supplied.
    pub file: Option<String>,
    /// 1-indexed line of the offending character.
    pub line: usize,
    /// 1-indexed column of the offending character.
    pub column: usize,
    /// The complete input text, kept for excerpt rendering.
    pub source: Option<String>,
    /// Identifier of the transformation that raised the error, if any.
    pub plugin: Option<String>,
}

impl SyntaxError {
    /// Create an error with a reason and a position.
    #[must_use]
    pub fn new(reason: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            reason: reason.into(),
            file: None,
            line,
            column,
            source: None,
            plugin: None,
        }
    }

    /// Attach the originating file identifier.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attach the full input text so [`SyntaxError::show_source_code`] can
    /// render an excerpt.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the identifier of the plugin that raised the error.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = Some(plugin.into());
        self
    }

    /// The one-line message: `[plugin: NAME] FILE:LINE:COL: REASON`.
    #[must_use]
    pub fn message(&self) -> String {
        let file = self.file.as_deref().unwrap_or(ANONYMOUS_INPUT);
        let position = format!("{file}:{}:{}: {}", self.line, self.column, self.reason);
        match &self.plugin {
            Some(plugin) => format!("[plugin: {plugin}] {position}"),
            None => position,
        }
    }

    /// Render a plain-text excerpt around the offending position:
    /// the preceding line, the offending line with a `>` marker, a caret
    /// pointing at the column, and the following line.
    ///
    /// ```text
    ///   1 | a {
    /// > 2 |   color
    ///     |   ^
    ///   3 | }
    /// ```
    ///
    /// Returns `None` when no source text was attached.
    #[must_use]
    pub fn show_source_code(&self) -> Option<String> {
        let source = self.source.as_deref()?;
        let lines: Vec<&str> = source.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
        if self.line == 0 || self.line > lines.len() {
            return None;
        }

        let first = self.line.saturating_sub(2);
        let last = self.line.min(lines.len() - 1);
        let gutter = (last + 1).to_string().len();

        let mut excerpt = String::new();
        for (index, text) in lines.iter().enumerate().take(last + 1).skip(first) {
            let number = index + 1;
            let marker = if number == self.line { ">" } else { " " };
            excerpt.push_str(&format!("{marker} {number:>gutter$} | {text}\n"));
            if number == self.line {
                let padding = " ".repeat(self.column.saturating_sub(1));
                excerpt.push_str(&format!("  {blank:>gutter$} | {padding}^\n", blank = ""));
            }
        }
        // Drop the trailing newline so callers control spacing.
        let _ = excerpt.pop();
        Some(excerpt)
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl Error for SyntaxError {}
