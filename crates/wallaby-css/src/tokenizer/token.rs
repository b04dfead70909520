//! Token types for the lossless CSS tokenizer.
//!
//! Unlike a validating tokenizer built on
//! [CSS Syntax Level 3 § 4](https://www.w3.org/TR/css-syntax-3/#tokenization),
//! this one never interprets values: every token carries its verbatim lexeme,
//! so concatenating the lexemes of all tokens reproduces the input exactly.
//! Numbers, dimensions, and URLs are all just [`TokenKind::Word`]s here;
//! the postprocessor treats them as opaque bytes.

use strum_macros::Display;
use wallaby_common::Position;

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    /// A run of whitespace characters.
    Space,
    /// A `/* ... */` block comment, terminator included.
    Comment,
    /// A single- or double-quoted string, quotes included, with backslash
    /// escapes kept verbatim.
    String,
    /// An identifier-like run: letters, digits, hyphens, vendor prefixes,
    /// and any other character with no structural meaning.
    Word,
    /// `@` followed by at least one word character.
    AtWord,
    /// `#` followed by at least one word character.
    Hash,
    /// `{`
    OpenCurly,
    /// `}`
    CloseCurly,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[`
    OpenSquare,
    /// `]`
    CloseSquare,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// A single character that fits no other category (a bare `@` or `#`).
    Other,
}

impl TokenKind {
    /// Whether this token is whitespace or a comment: the two kinds that
    /// may separate structural tokens without meaning anything themselves.
    #[must_use]
    pub const fn is_filler(self) -> bool {
        matches!(self, Self::Space | Self::Comment)
    }
}

/// A single token: its kind, its verbatim text, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// The exact input characters this token covers.
    pub lexeme: String,
    /// Position of the first character.
    pub start: Position,
    /// Position one past the last character.
    pub end: Position,
}

impl Token {
    /// Create a token.
    #[must_use]
    pub const fn new(kind: TokenKind, lexeme: String, start: Position, end: Position) -> Self {
        Self { kind, lexeme, start, end }
    }
}
