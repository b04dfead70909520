//! Node types for the CSS tree.
//!
//! Five node variants cover a stylesheet: the root, rules, at-rules,
//! declarations, and comments. Every string the user sees (a selector, an
//! at-rule's params, a declaration's value) exists in a *cleaned* form and,
//! when the original bytes differed from it, in a paired [`Raw`] record
//! holding those original bytes verbatim. The stringifier prefers the raw
//! bytes for untouched nodes, which is what makes reparse-and-print
//! byte-exact.

use wallaby_common::Span;

/// A type-safe index into the CSS tree.
///
/// All parent/child/sibling relationships are stored as `NodeId`s into the
/// tree's arena, giving O(1) access in any direction without borrow checker
/// issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// Paired storage of an attribute's original bytes and its cleaned form.
///
/// `value` is the cleaned form at the time of parsing (outer whitespace
/// trimmed, interior comments removed); `raw` is the verbatim input. As long
/// as the node's current cleaned value still equals `value`, the stringifier
/// emits `raw`; once the user assigns something new, the record no longer
/// matches and the new cleaned value is emitted instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    /// Verbatim bytes from the input, comments and interior whitespace intact.
    pub raw: String,
    /// The cleaned form those bytes reduce to.
    pub value: String,
}

impl Raw {
    /// Create a raw record.
    #[must_use]
    pub fn new(raw: impl Into<String>, value: impl Into<String>) -> Self {
        Self { raw: raw.into(), value: value.into() }
    }
}

/// Body shape of an at-rule.
///
/// An at-rule is childless (`@charset "utf-8";`), a declaration container
/// (`@font-face { ... }`), or a rule container (`@media ... { ... }`). The
/// shape is not knowable from the prelude alone, so it starts `Undecided`
/// when braces are seen and is fixed by the first structural child, either
/// during parsing or when the first child is appended to a manually built
/// at-rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtRuleBody {
    /// No braces: the at-rule is terminated by a semicolon (or EOF).
    #[default]
    None,
    /// Braces seen (or children expected), but no structural child yet.
    Undecided,
    /// Fixed as a declaration container.
    Decls,
    /// Fixed as a rule container.
    Rules,
}

/// Data for the root node: the whole stylesheet.
#[derive(Debug, Clone, Default)]
pub struct RootData {
    /// Whitespace between the last child and end-of-file.
    pub after: Option<String>,
    /// Whether the last declaration-like child ended with a semicolon.
    pub semicolon: bool,
}

/// Data for a rule: a selector plus a block of declarations.
#[derive(Debug, Clone)]
pub struct RuleData {
    /// Cleaned selector (outer whitespace trimmed, interior comments removed).
    pub selector: String,
    /// Original selector bytes, when they differ from the cleaned form.
    pub selector_raw: Option<Raw>,
    /// Bytes between the selector and the opening `{`.
    pub between: Option<String>,
    /// Whitespace between the last child and the closing `}`.
    pub after: Option<String>,
    /// Whether the last declaration ended with a semicolon.
    pub semicolon: bool,
}

/// Data for an at-rule: `@name params` plus an optional body.
#[derive(Debug, Clone)]
pub struct AtRuleData {
    /// The at-rule name, without the `@`.
    pub name: String,
    /// Cleaned params (may be empty, e.g. for `@font-face`).
    pub params: String,
    /// Original params bytes, when they differ from the cleaned form.
    pub params_raw: Option<Raw>,
    /// Bytes between `@name` and the params.
    pub after_name: Option<String>,
    /// Bytes between the params and the opening `{` (or the semicolon).
    pub between: Option<String>,
    /// Whitespace between the last child and the closing `}`.
    pub after: Option<String>,
    /// Whether the last declaration ended with a semicolon.
    pub semicolon: bool,
    /// Container shape; see [`AtRuleBody`].
    pub body: AtRuleBody,
}

/// Data for a declaration: an opaque property/value pair.
///
/// Values carry no semantics here; `!important`, functions, and escapes are
/// all just bytes.
#[derive(Debug, Clone)]
pub struct DeclData {
    /// Property name.
    pub prop: String,
    /// Cleaned value (outer whitespace trimmed, interior comments removed).
    pub value: String,
    /// Original value bytes, when they differ from the cleaned form.
    pub value_raw: Option<Raw>,
    /// Bytes from the end of the property through the colon to the value.
    pub between: Option<String>,
}

/// Data for a standalone `/* ... */` comment between nodes.
///
/// Comments *inside* selectors, params, or values are not nodes; they live in
/// the adjacent node's raw record.
#[derive(Debug, Clone)]
pub struct CommentData {
    /// Trimmed interior text.
    pub text: String,
    /// Verbatim interior (padding included), when it differs from `text`.
    pub raw: Option<Raw>,
}

/// The tagged variant stored in every node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The top-level container.
    Root(RootData),
    /// A CSS rule: selector and declaration block.
    Rule(RuleData),
    /// An at-rule, childless or with a body.
    AtRule(AtRuleData),
    /// A property/value declaration.
    Decl(DeclData),
    /// A standalone comment.
    Comment(CommentData),
}

impl NodeKind {
    /// A fresh root.
    #[must_use]
    pub fn root() -> Self {
        Self::Root(RootData::default())
    }

    /// A rule with the given selector and no formatting history.
    #[must_use]
    pub fn rule(selector: impl Into<String>) -> Self {
        Self::Rule(RuleData {
            selector: selector.into(),
            selector_raw: None,
            between: None,
            after: None,
            semicolon: false,
        })
    }

    /// An at-rule with the given name (no `@`) and params.
    ///
    /// The shape starts [`AtRuleBody::None`]; appending the first child
    /// promotes it to a container.
    #[must_use]
    pub fn at_rule(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self::AtRule(AtRuleData {
            name: name.into(),
            params: params.into(),
            params_raw: None,
            after_name: None,
            between: None,
            after: None,
            semicolon: false,
            body: AtRuleBody::None,
        })
    }

    /// A declaration with the given property and value.
    #[must_use]
    pub fn decl(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Decl(DeclData {
            prop: prop.into(),
            value: value.into(),
            value_raw: None,
            between: None,
        })
    }

    /// A comment with the given (already trimmed) text.
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(CommentData { text: text.into(), raw: None })
    }

    /// The variant name, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Root(_) => "Root",
            Self::Rule(_) => "Rule",
            Self::AtRule(_) => "AtRule",
            Self::Decl(_) => "Declaration",
            Self::Comment(_) => "Comment",
        }
    }
}

/// A node in the CSS tree.
///
/// Relationships are stored as indices for O(1) traversal in any direction;
/// `children` is the authoritative order, the sibling links are kept in sync
/// by the tree's mutation operations.
#[derive(Debug, Clone)]
pub struct Node {
    /// The variant and its data.
    pub kind: NodeKind,
    /// Parent container, or `None` for the root and detached nodes.
    pub parent: Option<NodeId>,
    /// Ordered children (empty for declarations and comments).
    pub children: Vec<NodeId>,
    /// Sibling immediately before this node under the same parent.
    pub prev_sibling: Option<NodeId>,
    /// Sibling immediately after this node under the same parent.
    pub next_sibling: Option<NodeId>,
    /// Where this node came from in the input, if it was parsed.
    pub source: Option<Span>,
    /// Whitespace preceding the node within its parent.
    ///
    /// `None` means the node was synthesized and the stringifier should
    /// derive a value from its siblings.
    pub before: Option<String>,
}

impl Node {
    /// Create a detached node of the given kind.
    #[must_use]
    pub const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            prev_sibling: None,
            next_sibling: None,
            source: None,
            before: None,
        }
    }
}
