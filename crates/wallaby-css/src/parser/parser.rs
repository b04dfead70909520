//! Structural CSS parser.
//!
//! A single pass over the token stream with one token of pushback, following
//! the grammar outline of
//! [CSS Syntax Level 3 § 5](https://www.w3.org/TR/css-syntax-3/#parsing) but
//! building a lossless tree: every byte of the input lands either in a node's
//! cleaned value, in its raw record, or in one of the whitespace side
//! channels (`before`, `between`, `after`).
//!
//! The parser maintains:
//! - a stack of open containers, rooted at the tree's Root
//! - a pending-whitespace buffer that becomes the next node's `before`
//! - a flag recording whether the last declaration ended with a semicolon

use wallaby_ast::{AtRuleBody, CssTree, NodeId, NodeKind, Raw};
use wallaby_common::{Position, Span, SyntaxError, Warning};

use crate::tokenizer::{CssTokenizer, Token, TokenKind};

/// Structural CSS parser producing a [`CssTree`].
pub struct CssParser {
    /// Token source.
    tokenizer: CssTokenizer,
    /// Pushback stack: tokens handed back to be re-read (LIFO).
    pushback: Vec<Token>,
    /// The tree under construction.
    tree: CssTree,
    /// Open containers; the root is always at the bottom.
    stack: Vec<NodeId>,
    /// Whitespace (and merged stray semicolons) awaiting the next node.
    spaces: String,
    /// Whether the most recent declaration ended with a semicolon.
    semicolon: bool,
    /// Copy of the input, for error excerpts.
    input: String,
    /// The `from` file identifier, for error messages.
    filename: Option<String>,
}

impl CssParser {
    /// Create a parser for the given input and optional file identifier.
    #[must_use]
    pub fn new(css: &str, filename: Option<String>) -> Self {
        let mut tree = CssTree::with_source(css, filename.clone());
        let root = tree.root();
        if let Some(node) = tree.get_mut(root) {
            node.source = Some(Span::new(Position::start(), Position::start()));
        }
        Self {
            tokenizer: CssTokenizer::new(css),
            pushback: Vec::new(),
            tree,
            stack: vec![root],
            spaces: String::new(),
            semicolon: false,
            input: css.to_string(),
            filename,
        }
    }

    /// Run the parse to completion and return the tree.
    ///
    /// # Errors
    ///
    /// Any syntax error, decorated with the file identifier and the input
    /// text for excerpt rendering.
    pub fn parse(mut self) -> Result<CssTree, SyntaxError> {
        while let Some(token) = self.next_token()? {
            match token.kind {
                TokenKind::Space => self.spaces.push_str(&token.lexeme),
                TokenKind::Semicolon => self.free_semicolon(&token),
                TokenKind::CloseCurly => self.end(&token)?,
                TokenKind::Comment => self.comment(&token)?,
                TokenKind::AtWord => self.at_rule(token)?,
                TokenKind::OpenCurly => self.empty_rule(&token)?,
                _ => self.other(token)?,
            }
        }
        self.end_file()?;
        Ok(self.tree)
    }

    // ===== Token plumbing =====

    /// Next token, preferring pushed-back tokens.
    fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        if let Some(token) = self.pushback.pop() {
            return Ok(Some(token));
        }
        self.tokenizer.next_token().map_err(|e| self.decorate(e))
    }

    /// Hand a token back; it will be the next one read.
    fn back(&mut self, token: Token) {
        self.pushback.push(token);
    }

    /// The innermost open container.
    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    // ===== Node dispatch =====

    /// A standalone comment at a structural position becomes a Comment node.
    fn comment(&mut self, token: &Token) -> Result<(), SyntaxError> {
        let interior = &token.lexeme[2..token.lexeme.len() - 2];
        let text = interior.trim();
        let raw = if text == interior {
            None
        } else {
            Some(Raw::new(interior, text))
        };

        let id = self.tree.alloc(NodeKind::comment(text));
        if let Some(data) = self.tree.as_comment_mut(id) {
            data.raw = raw;
        }
        self.init(id, token.start, token.end)
    }

    /// An at-word begins an at-rule; its params run to the first `;`
    /// (childless), `{` (body follows), or the end of the container.
    fn at_rule(&mut self, first: Token) -> Result<(), SyntaxError> {
        let name: String = first.lexeme.chars().skip(1).collect();
        let start = first.start;
        let mut end_pos = first.end;

        let mut params: Vec<Token> = Vec::new();
        let mut brackets: Vec<TokenKind> = Vec::new();
        let mut bracket_pos: Option<Position> = None;
        let mut open = false;
        let mut ended_by_semicolon = false;

        while let Some(token) = self.next_token()? {
            end_pos = token.end;
            match token.kind {
                TokenKind::OpenParen => {
                    if brackets.is_empty() {
                        bracket_pos = Some(token.start);
                    }
                    brackets.push(TokenKind::CloseParen);
                    params.push(token);
                }
                TokenKind::OpenSquare => {
                    if brackets.is_empty() {
                        bracket_pos = Some(token.start);
                    }
                    brackets.push(TokenKind::CloseSquare);
                    params.push(token);
                }
                kind if !brackets.is_empty() => {
                    if brackets.last() == Some(&kind) {
                        let _ = brackets.pop();
                    }
                    params.push(token);
                }
                TokenKind::Semicolon => {
                    ended_by_semicolon = true;
                    break;
                }
                TokenKind::OpenCurly => {
                    open = true;
                    break;
                }
                TokenKind::CloseCurly => {
                    end_pos = token.start;
                    self.back(token);
                    break;
                }
                _ => params.push(token),
            }
        }

        if !brackets.is_empty() {
            let pos = bracket_pos.unwrap_or(start);
            return Err(self.error("Unclosed bracket", pos));
        }

        let after_name = drain_leading_filler(&mut params);
        let between = if open { pop_trailing_filler(&mut params) } else { String::new() };
        let (clean, raw) = raw_value(&params);

        let id = self.tree.alloc(NodeKind::at_rule(name, clean));
        if let Some(data) = self.tree.as_at_rule_mut(id) {
            data.params_raw = raw;
            data.after_name = Some(after_name);
            data.between = Some(between);
            if open {
                data.body = AtRuleBody::Undecided;
            }
        }
        self.init(id, start, end_pos)?;

        if open {
            self.stack.push(id);
        } else if ended_by_semicolon {
            self.semicolon = true;
        }
        Ok(())
    }

    /// A `{` with no preceding selector opens a rule with an empty selector.
    fn empty_rule(&mut self, token: &Token) -> Result<(), SyntaxError> {
        let id = self.tree.alloc(NodeKind::rule(""));
        if let Some(data) = self.tree.as_rule_mut(id) {
            data.between = Some(String::new());
        }
        self.init(id, token.start, token.end)?;
        self.stack.push(id);
        Ok(())
    }

    /// Any other token run: collect until `{` (a rule), `;` after a
    /// top-level colon (a declaration), or `}`/EOF (a final declaration, or
    /// an error when no colon was seen). Paren/bracket groups are opaque.
    fn other(&mut self, first: Token) -> Result<(), SyntaxError> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut brackets: Vec<TokenKind> = Vec::new();
        let mut bracket_pos: Option<Position> = None;
        let mut colon = false;
        let mut ended = false;

        let mut token = Some(first);
        loop {
            let Some(t) = token else {
                ended = true;
                break;
            };
            match t.kind {
                TokenKind::OpenParen => {
                    if brackets.is_empty() {
                        bracket_pos = Some(t.start);
                    }
                    brackets.push(TokenKind::CloseParen);
                    tokens.push(t);
                }
                TokenKind::OpenSquare => {
                    if brackets.is_empty() {
                        bracket_pos = Some(t.start);
                    }
                    brackets.push(TokenKind::CloseSquare);
                    tokens.push(t);
                }
                kind if !brackets.is_empty() => {
                    if brackets.last() == Some(&kind) {
                        let _ = brackets.pop();
                    }
                    tokens.push(t);
                }
                TokenKind::Semicolon => {
                    if colon {
                        tokens.push(t);
                        return self.decl(tokens);
                    }
                    // A semicolon before any colon: not a declaration.
                    break;
                }
                TokenKind::OpenCurly => {
                    return self.rule(tokens, &t);
                }
                TokenKind::CloseCurly => {
                    self.back(t);
                    ended = true;
                    break;
                }
                TokenKind::Colon => {
                    colon = true;
                    tokens.push(t);
                }
                _ => tokens.push(t),
            }
            token = self.next_token()?;
        }

        if !brackets.is_empty() {
            let pos = bracket_pos.unwrap_or(Position::start());
            return Err(self.error("Unclosed bracket", pos));
        }

        if ended && colon {
            // Trailing whitespace/comments belong to the container, not the
            // declaration; hand them back so the main loop records them.
            while let Some(last) = tokens.last() {
                if !last.kind.is_filler() {
                    break;
                }
                if let Some(t) = tokens.pop() {
                    self.back(t);
                }
            }
            return self.decl(tokens);
        }

        let pos = tokens.first().map_or(Position::start(), |t| t.start);
        Err(self.error("Unknown word", pos))
    }

    /// Build a Rule from the collected selector tokens and open its block.
    fn rule(&mut self, mut tokens: Vec<Token>, open_brace: &Token) -> Result<(), SyntaxError> {
        let start = tokens.first().map_or(open_brace.start, |t| t.start);
        let between = pop_trailing_filler(&mut tokens);
        let (clean, raw) = raw_value(&tokens);

        let id = self.tree.alloc(NodeKind::rule(clean));
        if let Some(data) = self.tree.as_rule_mut(id) {
            data.selector_raw = raw;
            data.between = Some(between);
        }
        self.init(id, start, open_brace.end)?;
        self.stack.push(id);
        Ok(())
    }

    /// Build a Declaration from the collected tokens (trailing `;` included
    /// when one terminated it).
    fn decl(&mut self, mut tokens: Vec<Token>) -> Result<(), SyntaxError> {
        let mut terminated = false;
        if tokens.last().is_some_and(|t| t.kind == TokenKind::Semicolon) {
            terminated = true;
            let _ = tokens.pop();
        }

        let start = tokens.first().map_or(Position::start(), |t| t.start);
        let end_pos = tokens.last().map_or(start, |t| t.end);

        // Property: the token run before the first colon or filler.
        let mut index = 0;
        let mut prop = String::new();
        while index < tokens.len() {
            let t = &tokens[index];
            if matches!(t.kind, TokenKind::Colon | TokenKind::Space | TokenKind::Comment) {
                break;
            }
            prop.push_str(&t.lexeme);
            index += 1;
        }
        if prop.is_empty() {
            return Err(self.error("Unknown word", start));
        }

        // Between: everything through the colon.
        let mut between = String::new();
        while index < tokens.len() {
            let t = &tokens[index];
            let is_colon = t.kind == TokenKind::Colon;
            between.push_str(&t.lexeme);
            index += 1;
            if is_colon {
                break;
            }
        }

        // Whitespace after the colon joins `between` so the cleaned value
        // starts at its first meaningful byte.
        while index < tokens.len() && tokens[index].kind.is_filler() {
            between.push_str(&tokens[index].lexeme);
            index += 1;
        }

        let value_tokens = &tokens[index..];
        if !value_tokens.iter().any(|t| !t.kind.is_filler()) {
            return Err(self.error("Empty declaration value", start));
        }
        let (clean, raw) = raw_value(value_tokens);

        let id = self.tree.alloc(NodeKind::decl(prop, clean));
        if let Some(data) = self.tree.as_decl_mut(id) {
            data.value_raw = raw;
            data.between = Some(between);
        }
        self.init(id, start, end_pos)?;
        if terminated {
            self.semicolon = true;
        }
        Ok(())
    }

    /// A semicolon with nothing pending: keep its bytes in the whitespace
    /// channel (so output is unchanged) but create no node, only a warning.
    fn free_semicolon(&mut self, token: &Token) {
        self.spaces.push_str(&token.lexeme);
        let position = token.start;
        self.tree.push_warning(Warning::new(
            "Ignored stray semicolon",
            position.line,
            position.column,
        ));
    }

    /// Close the current container on `}`.
    fn end(&mut self, token: &Token) -> Result<(), SyntaxError> {
        if self.stack.len() <= 1 {
            return Err(self.error("Unexpected }", token.start));
        }
        let current = self.current();
        if !self.tree.children(current).is_empty() {
            self.tree.set_semicolon(current, self.semicolon);
        }
        self.semicolon = false;
        let after = std::mem::take(&mut self.spaces);
        self.tree.set_after(current, after);
        if let Some(node) = self.tree.get_mut(current)
            && let Some(span) = node.source.as_mut()
        {
            span.end = token.end;
        }
        let _ = self.stack.pop();
        Ok(())
    }

    /// End of input: every container must be closed, and the root collects
    /// the trailing whitespace.
    fn end_file(&mut self) -> Result<(), SyntaxError> {
        if self.stack.len() > 1 {
            let current = self.current();
            let pos = self
                .tree
                .source(current)
                .map_or(Position::start(), |span| span.start);
            return Err(self.error("Unclosed block", pos));
        }
        let root = self.tree.root();
        if !self.tree.children(root).is_empty() {
            self.tree.set_semicolon(root, self.semicolon);
        }
        let after = std::mem::take(&mut self.spaces);
        self.tree.set_after(root, after);
        let end = self.tokenizer.pos();
        if let Some(node) = self.tree.get_mut(root)
            && let Some(span) = node.source.as_mut()
        {
            span.end = end;
        }
        Ok(())
    }

    // ===== Helpers =====

    /// Attach a freshly allocated node: record its `before`, its span, and
    /// append it to the innermost open container.
    fn init(&mut self, id: NodeId, start: Position, end: Position) -> Result<(), SyntaxError> {
        let before = std::mem::take(&mut self.spaces);
        let is_comment = matches!(self.tree.get(id).map(|n| &n.kind), Some(NodeKind::Comment(_)));
        if let Some(node) = self.tree.get_mut(id) {
            node.before = Some(before);
            node.source = Some(Span::new(start, end));
        }
        let current = self.current();
        self.tree
            .append(current, id)
            .map_err(|e| self.error(e.to_string(), start))?;
        if !is_comment {
            self.semicolon = false;
        }
        Ok(())
    }

    /// Build a syntax error at a position, with file and source attached.
    fn error(&self, reason: impl Into<String>, pos: Position) -> SyntaxError {
        self.decorate(SyntaxError::new(reason, pos.line, pos.column))
    }

    /// Attach the file identifier and input text to an error.
    fn decorate(&self, mut err: SyntaxError) -> SyntaxError {
        if err.source.is_none() {
            err = err.with_source(self.input.clone());
        }
        if err.file.is_none()
            && let Some(file) = &self.filename
        {
            err = err.with_file(file.clone());
        }
        err
    }
}

/// Concatenate the lexemes of a token run and derive its cleaned form
/// (comments removed, outer whitespace trimmed). Returns the cleaned value
/// and, when the two differ, a [`Raw`] record pairing them.
fn raw_value(tokens: &[Token]) -> (String, Option<Raw>) {
    let raw: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    let clean: String = tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .map(|t| t.lexeme.as_str())
        .collect();
    let clean = clean.trim().to_string();
    if clean == raw {
        (clean, None)
    } else {
        let record = Raw::new(raw, clean.clone());
        (clean, Some(record))
    }
}

/// Remove leading whitespace/comment tokens, returning their bytes.
fn drain_leading_filler(tokens: &mut Vec<Token>) -> String {
    let count = tokens.iter().take_while(|t| t.kind.is_filler()).count();
    tokens.drain(..count).map(|t| t.lexeme).collect()
}

/// Remove trailing whitespace/comment tokens, returning their bytes.
fn pop_trailing_filler(tokens: &mut Vec<Token>) -> String {
    let mut trailing: Vec<String> = Vec::new();
    while tokens.last().is_some_and(|t| t.kind.is_filler()) {
        if let Some(t) = tokens.pop() {
            trailing.push(t.lexeme);
        }
    }
    trailing.reverse();
    trailing.concat()
}
