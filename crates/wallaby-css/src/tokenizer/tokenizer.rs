//! Lossless CSS tokenizer.
//!
//! A pull-based scanner: [`CssTokenizer::next_token`] yields one token at a
//! time until end of input. Tokens keep their verbatim lexemes, so the
//! stream as a whole is a partition of the input; nothing is normalized,
//! decoded, or dropped.

use wallaby_common::{Position, SyntaxError};

use super::token::{Token, TokenKind};

/// Whitespace per [CSS Syntax Level 3 § 4.2](https://www.w3.org/TR/css-syntax-3/#whitespace),
/// extended with carriage return and form feed (which the preprocessing step
/// of a validating tokenizer would have normalized away; we keep them).
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{C}')
}

/// Characters that terminate a [`TokenKind::Word`].
const fn is_word_end(c: char) -> bool {
    is_whitespace(c)
        || matches!(
            c,
            '"' | '\'' | '(' | ')' | '[' | ']' | '{' | '}' | ':' | ';' | ',' | '@' | '#'
        )
}

/// Lossless CSS tokenizer over a character stream.
pub struct CssTokenizer {
    /// The input as characters (columns count characters, not bytes).
    input: Vec<char>,
    /// Index of the next character to consume.
    position: usize,
    /// 1-indexed line of the next character.
    line: usize,
    /// 1-indexed column of the next character.
    column: usize,
}

impl CssTokenizer {
    /// Create a tokenizer over the given input.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self { input: input.chars().collect(), position: 0, line: 1, column: 1 }
    }

    /// The position of the next character to be consumed.
    #[must_use]
    pub const fn pos(&self) -> Position {
        Position::new(self.position, self.line, self.column)
    }

    /// Whether the whole input has been consumed.
    #[must_use]
    pub const fn end_of_file(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Produce the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// `Unclosed string` / `Unclosed comment`, positioned at the opening
    /// delimiter.
    pub fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        let start = self.pos();
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let kind = match c {
            c if is_whitespace(c) => {
                self.consume_whitespace();
                TokenKind::Space
            }
            '"' | '\'' => {
                self.consume_string(start)?;
                TokenKind::String
            }
            '/' if self.peek_at(1) == Some('*') => {
                self.consume_comment(start)?;
                TokenKind::Comment
            }
            '{' => self.consume_as(TokenKind::OpenCurly),
            '}' => self.consume_as(TokenKind::CloseCurly),
            '(' => self.consume_as(TokenKind::OpenParen),
            ')' => self.consume_as(TokenKind::CloseParen),
            '[' => self.consume_as(TokenKind::OpenSquare),
            ']' => self.consume_as(TokenKind::CloseSquare),
            ':' => self.consume_as(TokenKind::Colon),
            ';' => self.consume_as(TokenKind::Semicolon),
            ',' => self.consume_as(TokenKind::Comma),
            '@' | '#' => {
                let _ = self.advance();
                let marker_end = self.position;
                self.consume_word();
                if self.position > marker_end {
                    if c == '@' { TokenKind::AtWord } else { TokenKind::Hash }
                } else {
                    // A bare marker with nothing attachable after it.
                    TokenKind::Other
                }
            }
            _ => {
                self.consume_word();
                TokenKind::Word
            }
        };

        let lexeme: String = self.input[start.offset..self.position].iter().collect();
        Ok(Some(Token::new(kind, lexeme, start, self.pos())))
    }

    /// Collect every remaining token into a vector.
    ///
    /// # Errors
    ///
    /// Propagates the first tokenization error.
    pub fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Look at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Look `n` characters past the next one.
    fn peek_at(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Consume one character, tracking line and column.
    ///
    /// `\n` advances the line unless it completes a `\r\n` pair (the `\r`
    /// already advanced it); a bare `\r` advances the line on its own.
    fn advance(&mut self) -> Option<char> {
        let c = *self.input.get(self.position)?;
        self.position += 1;
        match c {
            '\r' => {
                self.line += 1;
                self.column = 1;
            }
            '\n' => {
                if self.position < 2 || self.input[self.position - 2] != '\r' {
                    self.line += 1;
                }
                self.column = 1;
            }
            _ => self.column += 1,
        }
        Some(c)
    }

    /// Consume a single character and tag it with the given kind.
    fn consume_as(&mut self, kind: TokenKind) -> TokenKind {
        let _ = self.advance();
        kind
    }

    /// Consume a run of whitespace.
    fn consume_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            let _ = self.advance();
        }
    }

    /// Consume a run of word characters; a backslash escapes the character
    /// after it (so `\{` stays inside the word).
    fn consume_word(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\\' {
                let _ = self.advance();
                let _ = self.advance();
                continue;
            }
            if is_word_end(c) || (c == '/' && self.peek_at(1) == Some('*')) {
                break;
            }
            let _ = self.advance();
        }
    }

    /// Consume a quoted string, escapes included, up to the matching quote.
    fn consume_string(&mut self, start: Position) -> Result<(), SyntaxError> {
        let quote = self.advance().unwrap_or('"');
        loop {
            match self.advance() {
                None => {
                    return Err(SyntaxError::new("Unclosed string", start.line, start.column));
                }
                Some('\\') => {
                    let _ = self.advance();
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// Consume a `/* ... */` comment including the terminator.
    fn consume_comment(&mut self, start: Position) -> Result<(), SyntaxError> {
        let _ = self.advance(); // /
        let _ = self.advance(); // *
        loop {
            match self.advance() {
                None => {
                    return Err(SyntaxError::new("Unclosed comment", start.line, start.column));
                }
                Some('*') if self.peek() == Some('/') => {
                    let _ = self.advance();
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }
}
