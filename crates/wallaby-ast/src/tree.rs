//! The arena-based CSS tree and its editing operations.
//!
//! All nodes live in a contiguous vector and refer to each other by
//! [`NodeId`]. This provides:
//! - O(1) access to any node by `NodeId`
//! - O(1) parent/sibling traversal
//! - No borrowing issues (indices instead of references)
//!
//! Removal detaches a node but never frees its slot, so a `NodeId` stays
//! valid for the lifetime of the tree; a detached node can be re-inserted
//! anywhere.

use std::ops::ControlFlow;

use thiserror::Error;
use wallaby_common::{Span, Warning};

use crate::node::{
    AtRuleBody, AtRuleData, CommentData, DeclData, Node, NodeId, NodeKind, RootData, RuleData,
};

/// Structural misuse of the tree's editing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The container's determined shape cannot hold this child kind, e.g.
    /// a Rule inside a declaration-container at-rule.
    #[error("{container} nodes cannot contain {child} children")]
    IncompatibleChild {
        /// Variant name of the container.
        container: &'static str,
        /// Variant name of the rejected child.
        child: &'static str,
    },
    /// The target of an insertion is a leaf node.
    #[error("{kind} nodes cannot contain children")]
    NotAContainer {
        /// Variant name of the leaf.
        kind: &'static str,
    },
    /// The reference node is not a child of the given container.
    #[error("the reference node is not a child of the container")]
    NotAChild,
    /// An index reference pointed past the container's children.
    #[error("child index {index} is out of bounds for a container with {len} children")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of children the container actually has.
        len: usize,
    },
}

/// A reference to a child of a container: either the child node itself or
/// its integer index (the index form is an O(1) lookup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRef {
    /// Refer to the child by identity.
    Node(NodeId),
    /// Refer to the child by position.
    Index(usize),
}

impl From<NodeId> for ChildRef {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<usize> for ChildRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl ChildRef {
    /// Resolve to an index into `container`'s children.
    fn resolve(self, tree: &CssTree, container: NodeId) -> Result<usize, TreeError> {
        match self {
            Self::Index(index) => {
                let len = tree.children(container).len();
                if index < len {
                    Ok(index)
                } else {
                    Err(TreeError::IndexOutOfBounds { index, len })
                }
            }
            Self::Node(id) => tree.index_of(container, id).ok_or(TreeError::NotAChild),
        }
    }
}

/// An editable CSS tree.
///
/// The tree owns the input text it was parsed from (for spans and error
/// excerpts), an arena of nodes, and the warnings collected over its
/// lifetime; the root is always [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct CssTree {
    /// All nodes, indexed by `NodeId`. The root is at index 0.
    nodes: Vec<Node>,
    /// The input text this tree was parsed from (empty for built trees).
    input: String,
    /// The `from` file identifier, if one was supplied.
    filename: Option<String>,
    /// Recoverable oddities noticed by the parser or by transformations.
    warnings: Vec<Warning>,
}

impl CssTree {
    /// Create a tree containing just an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::root())],
            input: String::new(),
            filename: None,
            warnings: Vec::new(),
        }
    }

    /// Create a tree for the given input text and optional file identifier.
    ///
    /// Used by the parser; the input is retained for error excerpts only.
    #[must_use]
    pub fn with_source(input: impl Into<String>, filename: Option<String>) -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::root())],
            input: input.into(),
            filename,
            warnings: Vec::new(),
        }
    }

    /// Record a recoverable oddity against this tree.
    pub fn push_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// The warnings collected so far, in the order they were noticed.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The input text this tree was parsed from.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The `from` file identifier recorded at parse time.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// The root node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Number of node slots in the arena (detached nodes included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty (never true: the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new detached node and return its ID.
    ///
    /// The node has no parent and no siblings until inserted with one of the
    /// container operations.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    // ===== Relationship queries =====

    /// Get the parent of a node (`None` for the root and detached nodes).
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Returns the index of `child` among `container`'s children.
    #[must_use]
    pub fn index_of(&self, container: NodeId, child: NodeId) -> Option<usize> {
        self.children(container).iter().position(|&c| c == child)
    }

    /// Returns an iterator over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator { tree: self, current: self.parent(id) }
    }

    // ===== Typed accessors =====

    /// Get root data if this node is the root.
    #[must_use]
    pub fn as_root(&self, id: NodeId) -> Option<&RootData> {
        match &self.get(id)?.kind {
            NodeKind::Root(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable root data if this node is the root.
    pub fn as_root_mut(&mut self, id: NodeId) -> Option<&mut RootData> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Root(data) => Some(data),
            _ => None,
        }
    }

    /// Get rule data if this node is a rule.
    #[must_use]
    pub fn as_rule(&self, id: NodeId) -> Option<&RuleData> {
        match &self.get(id)?.kind {
            NodeKind::Rule(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable rule data if this node is a rule.
    pub fn as_rule_mut(&mut self, id: NodeId) -> Option<&mut RuleData> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Rule(data) => Some(data),
            _ => None,
        }
    }

    /// Get at-rule data if this node is an at-rule.
    #[must_use]
    pub fn as_at_rule(&self, id: NodeId) -> Option<&AtRuleData> {
        match &self.get(id)?.kind {
            NodeKind::AtRule(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable at-rule data if this node is an at-rule.
    pub fn as_at_rule_mut(&mut self, id: NodeId) -> Option<&mut AtRuleData> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::AtRule(data) => Some(data),
            _ => None,
        }
    }

    /// Get declaration data if this node is a declaration.
    #[must_use]
    pub fn as_decl(&self, id: NodeId) -> Option<&DeclData> {
        match &self.get(id)?.kind {
            NodeKind::Decl(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable declaration data if this node is a declaration.
    pub fn as_decl_mut(&mut self, id: NodeId) -> Option<&mut DeclData> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Decl(data) => Some(data),
            _ => None,
        }
    }

    /// Get comment data if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&CommentData> {
        match &self.get(id)?.kind {
            NodeKind::Comment(data) => Some(data),
            _ => None,
        }
    }

    /// Get mutable comment data if this node is a comment.
    pub fn as_comment_mut(&mut self, id: NodeId) -> Option<&mut CommentData> {
        match &mut self.get_mut(id)?.kind {
            NodeKind::Comment(data) => Some(data),
            _ => None,
        }
    }

    // ===== Formatting side channels =====

    /// The whitespace recorded before a node, if any.
    #[must_use]
    pub fn before(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.before.as_deref()
    }

    /// Set the whitespace emitted before a node.
    pub fn set_before(&mut self, id: NodeId, before: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            node.before = Some(before.into());
        }
    }

    /// The source span recorded for a node, if it was parsed.
    #[must_use]
    pub fn source(&self, id: NodeId) -> Option<Span> {
        self.get(id)?.source
    }

    /// The whitespace between a container's last child and its closing
    /// delimiter (`None` for leaves and when never recorded).
    #[must_use]
    pub fn after(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Root(data) => data.after.as_deref(),
            NodeKind::Rule(data) => data.after.as_deref(),
            NodeKind::AtRule(data) => data.after.as_deref(),
            NodeKind::Decl(_) | NodeKind::Comment(_) => None,
        }
    }

    /// Set the closing whitespace of a container. Ignored on leaves.
    pub fn set_after(&mut self, id: NodeId, after: impl Into<String>) {
        let after = after.into();
        match &mut self.nodes[id.0].kind {
            NodeKind::Root(data) => data.after = Some(after),
            NodeKind::Rule(data) => data.after = Some(after),
            NodeKind::AtRule(data) => data.after = Some(after),
            NodeKind::Decl(_) | NodeKind::Comment(_) => {}
        }
    }

    /// Whether the container's last declaration ended with a semicolon.
    #[must_use]
    pub fn semicolon(&self, id: NodeId) -> bool {
        match self.get(id).map(|n| &n.kind) {
            Some(NodeKind::Root(data)) => data.semicolon,
            Some(NodeKind::Rule(data)) => data.semicolon,
            Some(NodeKind::AtRule(data)) => data.semicolon,
            _ => false,
        }
    }

    /// Set the trailing-semicolon flag of a container. Ignored on leaves.
    pub fn set_semicolon(&mut self, id: NodeId, semicolon: bool) {
        match &mut self.nodes[id.0].kind {
            NodeKind::Root(data) => data.semicolon = semicolon,
            NodeKind::Rule(data) => data.semicolon = semicolon,
            NodeKind::AtRule(data) => data.semicolon = semicolon,
            NodeKind::Decl(_) | NodeKind::Comment(_) => {}
        }
    }

    // ===== Container mutation =====

    /// Append a child to the end of a container.
    ///
    /// The child is detached from any previous parent first.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotAContainer`] when `container` is a leaf,
    /// [`TreeError::IncompatibleChild`] when the container's shape cannot
    /// hold this child kind.
    pub fn append(&mut self, container: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_child(container, child)?;
        self.remove_self(child);
        let index = self.children(container).len();
        self.insert_at(container, index, child)
    }

    /// Append a freshly allocated node; shorthand for `alloc` + `append`.
    ///
    /// # Errors
    ///
    /// Same as [`CssTree::append`].
    pub fn append_new(&mut self, container: NodeId, kind: NodeKind) -> Result<NodeId, TreeError> {
        let child = self.alloc(kind);
        self.append(container, child)?;
        Ok(child)
    }

    /// Insert a child at the front of a container.
    ///
    /// # Errors
    ///
    /// Same as [`CssTree::append`].
    pub fn prepend(&mut self, container: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_child(container, child)?;
        self.remove_self(child);
        self.insert_at(container, 0, child)
    }

    /// Prepend a freshly allocated node; shorthand for `alloc` + `prepend`.
    ///
    /// # Errors
    ///
    /// Same as [`CssTree::append`].
    pub fn prepend_new(&mut self, container: NodeId, kind: NodeKind) -> Result<NodeId, TreeError> {
        let child = self.alloc(kind);
        self.prepend(container, child)?;
        Ok(child)
    }

    /// Insert `child` immediately before the referenced child.
    ///
    /// The child is detached from any previous parent before the reference
    /// is resolved, so moving a node within its own container lands it
    /// exactly before the reference.
    ///
    /// # Errors
    ///
    /// As [`CssTree::append`], plus [`TreeError::NotAChild`] /
    /// [`TreeError::IndexOutOfBounds`] for a bad reference.
    pub fn insert_before(
        &mut self,
        container: NodeId,
        reference: impl Into<ChildRef>,
        child: NodeId,
    ) -> Result<(), TreeError> {
        self.check_child(container, child)?;
        self.remove_self(child);
        let index = reference.into().resolve(self, container)?;
        self.insert_at(container, index, child)
    }

    /// Insert `child` immediately after the referenced child.
    ///
    /// # Errors
    ///
    /// Same as [`CssTree::insert_before`].
    pub fn insert_after(
        &mut self,
        container: NodeId,
        reference: impl Into<ChildRef>,
        child: NodeId,
    ) -> Result<(), TreeError> {
        self.check_child(container, child)?;
        self.remove_self(child);
        let index = reference.into().resolve(self, container)?;
        self.insert_at(container, index + 1, child)
    }

    /// Remove the referenced child from a container and return it.
    ///
    /// The node stays allocated and can be re-inserted.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotAChild`] / [`TreeError::IndexOutOfBounds`] for a bad
    /// reference.
    pub fn remove(
        &mut self,
        container: NodeId,
        reference: impl Into<ChildRef>,
    ) -> Result<NodeId, TreeError> {
        let index = reference.into().resolve(self, container)?;
        let child = self.children(container)[index];
        self.remove_self(child);
        Ok(child)
    }

    /// Detach a node from its parent, fixing up sibling links.
    ///
    /// After this call `parent`, `prev_sibling`, and `next_sibling` are all
    /// `None`. A no-op for already-detached nodes and the root.
    pub fn remove_self(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent else {
            return;
        };
        let prev = self.nodes[id.0].prev_sibling;
        let next = self.nodes[id.0].next_sibling;
        if let Some(p) = prev {
            self.nodes[p.0].next_sibling = next;
        }
        if let Some(n) = next {
            self.nodes[n.0].prev_sibling = prev;
        }
        if let Some(position) = self.index_of(parent, id) {
            let _ = self.nodes[parent.0].children.remove(position);
        }
        let node = &mut self.nodes[id.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Produce a detached deep copy of a node and its subtree.
    ///
    /// Formatting side channels (`before`, raw records) and source spans are
    /// copied verbatim; the copy has no parent.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let (kind, source, before, children) = {
            let node = &self.nodes[id.0];
            (node.kind.clone(), node.source, node.before.clone(), node.children.clone())
        };
        let copy = self.alloc(kind);
        self.nodes[copy.0].source = source;
        self.nodes[copy.0].before = before;

        let mut prev: Option<NodeId> = None;
        for child in children {
            let child_copy = self.deep_clone(child);
            self.nodes[child_copy.0].parent = Some(copy);
            self.nodes[child_copy.0].prev_sibling = prev;
            if let Some(p) = prev {
                self.nodes[p.0].next_sibling = Some(child_copy);
            }
            self.nodes[copy.0].children.push(child_copy);
            prev = Some(child_copy);
        }
        copy
    }

    // ===== Iteration =====

    /// Short-circuiting existence test over direct children.
    pub fn some(&self, container: NodeId, mut pred: impl FnMut(&Node) -> bool) -> bool {
        self.children(container).iter().any(|&id| pred(&self.nodes[id.0]))
    }

    /// Short-circuiting universal test over direct children.
    pub fn every(&self, container: NodeId, mut pred: impl FnMut(&Node) -> bool) -> bool {
        self.children(container).iter().all(|&id| pred(&self.nodes[id.0]))
    }

    /// Safe forward iteration over a container's direct children.
    ///
    /// The callback may mutate the tree, including the container being
    /// iterated. The cursor follows the *last visited child*: after each
    /// callback, iteration continues at the position one past wherever that
    /// child now is. If the child was removed, iteration continues at the
    /// index it used to occupy (which now holds the next child). No child is
    /// visited twice and none is skipped.
    ///
    /// Returning [`ControlFlow::Break`] stops the iteration and propagates.
    pub fn each<F>(&mut self, container: NodeId, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId, usize) -> ControlFlow<()>,
    {
        let mut last: Option<(NodeId, usize)> = None;
        loop {
            let index = match last {
                None => 0,
                Some((node, index)) => self.index_of(container, node).map_or(index, |i| i + 1),
            };
            let Some(&child) = self.children(container).get(index) else {
                return ControlFlow::Continue(());
            };
            last = Some((child, index));
            f(self, child, index)?;
        }
    }

    /// Depth-first pre-order traversal of a container's subtree, with the
    /// same mutation-safety contract as [`CssTree::each`] at every level.
    ///
    /// A child's subtree is only entered while it is still attached to the
    /// container it was visited under.
    pub fn walk<F>(&mut self, container: NodeId, f: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId, usize) -> ControlFlow<()>,
    {
        let mut last: Option<(NodeId, usize)> = None;
        loop {
            let index = match last {
                None => 0,
                Some((node, index)) => self.index_of(container, node).map_or(index, |i| i + 1),
            };
            let Some(&child) = self.children(container).get(index) else {
                return ControlFlow::Continue(());
            };
            last = Some((child, index));
            f(self, child, index)?;
            if self.parent(child) == Some(container) && !self.children(child).is_empty() {
                self.walk(child, f)?;
            }
        }
    }

    /// Visit every declaration in the subtree, depth-first pre-order.
    pub fn each_decl<F>(&mut self, container: NodeId, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId, usize) -> ControlFlow<()>,
    {
        self.walk(container, &mut |tree, id, index| {
            if matches!(tree.nodes[id.0].kind, NodeKind::Decl(_)) {
                f(tree, id, index)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Visit every rule in the subtree, depth-first pre-order.
    pub fn each_rule<F>(&mut self, container: NodeId, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId, usize) -> ControlFlow<()>,
    {
        self.walk(container, &mut |tree, id, index| {
            if matches!(tree.nodes[id.0].kind, NodeKind::Rule(_)) {
                f(tree, id, index)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Visit every at-rule in the subtree, depth-first pre-order.
    pub fn each_at_rule<F>(&mut self, container: NodeId, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId, usize) -> ControlFlow<()>,
    {
        self.walk(container, &mut |tree, id, index| {
            if matches!(tree.nodes[id.0].kind, NodeKind::AtRule(_)) {
                f(tree, id, index)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Visit every comment in the subtree, depth-first pre-order.
    pub fn each_comment<F>(&mut self, container: NodeId, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&mut Self, NodeId, usize) -> ControlFlow<()>,
    {
        self.walk(container, &mut |tree, id, index| {
            if matches!(tree.nodes[id.0].kind, NodeKind::Comment(_)) {
                f(tree, id, index)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    // ===== Internals =====

    /// Validate that `container` may hold `child` given its current shape.
    fn check_child(&self, container: NodeId, child: NodeId) -> Result<(), TreeError> {
        let container_kind = &self.nodes[container.0].kind;
        let child_kind = &self.nodes[child.0].kind;
        let allowed = match container_kind {
            NodeKind::Root(_) => matches!(
                child_kind,
                NodeKind::Rule(_) | NodeKind::AtRule(_) | NodeKind::Comment(_)
            ),
            NodeKind::Rule(_) => matches!(child_kind, NodeKind::Decl(_) | NodeKind::Comment(_)),
            NodeKind::AtRule(data) => match data.body {
                AtRuleBody::None | AtRuleBody::Undecided => !matches!(child_kind, NodeKind::Root(_)),
                AtRuleBody::Decls => {
                    matches!(child_kind, NodeKind::Decl(_) | NodeKind::Comment(_))
                }
                AtRuleBody::Rules => matches!(
                    child_kind,
                    NodeKind::Rule(_) | NodeKind::AtRule(_) | NodeKind::Comment(_)
                ),
            },
            NodeKind::Decl(_) | NodeKind::Comment(_) => {
                return Err(TreeError::NotAContainer { kind: container_kind.type_name() });
            }
        };
        if allowed {
            Ok(())
        } else {
            Err(TreeError::IncompatibleChild {
                container: container_kind.type_name(),
                child: child_kind.type_name(),
            })
        }
    }

    /// Splice a detached child into `container` at `index` and fix links.
    fn insert_at(&mut self, container: NodeId, index: usize, child: NodeId) -> Result<(), TreeError> {
        let len = self.nodes[container.0].children.len();
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }
        self.nodes[container.0].children.insert(index, child);

        let prev = index.checked_sub(1).map(|i| self.nodes[container.0].children[i]);
        let next = self.nodes[container.0].children.get(index + 1).copied();
        {
            let node = &mut self.nodes[child.0];
            node.parent = Some(container);
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if let Some(p) = prev {
            self.nodes[p.0].next_sibling = Some(child);
        }
        if let Some(n) = next {
            self.nodes[n.0].prev_sibling = Some(child);
        }
        self.promote_shape(container, child);
        Ok(())
    }

    /// Fix an at-rule's body shape on first insertion.
    fn promote_shape(&mut self, container: NodeId, child: NodeId) {
        let promoted = match &self.nodes[child.0].kind {
            NodeKind::Decl(_) => AtRuleBody::Decls,
            NodeKind::Rule(_) | NodeKind::AtRule(_) => AtRuleBody::Rules,
            // Comments give a childless at-rule braces but fix nothing.
            NodeKind::Comment(_) => AtRuleBody::Undecided,
            NodeKind::Root(_) => return,
        };
        if let NodeKind::AtRule(data) = &mut self.nodes[container.0].kind
            && matches!(data.body, AtRuleBody::None | AtRuleBody::Undecided)
        {
            data.body = promoted;
        }
    }
}

impl Default for CssTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator that walks up the tree from a node to the root.
pub struct AncestorIterator<'a> {
    tree: &'a CssTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
