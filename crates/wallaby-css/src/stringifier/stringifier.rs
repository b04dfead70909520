//! Tree-to-text stringifier.
//!
//! Walks the tree depth-first and emits CSS text through a [`Builder`] sink.
//! For every attribute with a raw record, the original bytes are emitted as
//! long as the record still matches the current cleaned value; anything the
//! user touched is emitted in its cleaned form with defaults filled in from
//! siblings (style inheritance).

use wallaby_ast::{AtRuleBody, CssTree, NodeId, NodeKind, Raw};

/// Default `before` for nodes synthesized inside a rule or at-rule body.
const DEFAULT_INDENT: &str = "\n    ";
/// Default `before` for nodes synthesized at the root.
const DEFAULT_BEFORE: &str = "\n";
/// Default bytes between a property and its value.
const DEFAULT_COLON: &str = ": ";
/// Default bytes between a selector (or params) and the opening brace.
const DEFAULT_BEFORE_OPEN: &str = " ";

/// Output sink for the stringifier.
///
/// `node` is set when `text` begins that node's own body, the anchor point
/// a source-map generator records a mapping for. Whitespace and closing
/// delimiters are pushed with `None`.
pub trait Builder {
    /// Append a piece of output text.
    fn push(&mut self, text: &str, node: Option<NodeId>);
}

/// The plain sink: collects text and ignores anchors.
#[derive(Debug, Default)]
pub struct StringBuilder {
    css: String,
}

impl StringBuilder {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the sink and return the collected CSS text.
    #[must_use]
    pub fn finish(self) -> String {
        self.css
    }
}

impl Builder for StringBuilder {
    fn push(&mut self, text: &str, _node: Option<NodeId>) {
        self.css.push_str(text);
    }
}

/// Depth-first stringifier over a [`CssTree`].
pub struct Stringifier<'a, B: Builder> {
    tree: &'a CssTree,
    out: &'a mut B,
}

impl<'a, B: Builder> Stringifier<'a, B> {
    /// Create a stringifier writing into the given sink.
    #[must_use]
    pub fn new(tree: &'a CssTree, out: &'a mut B) -> Self {
        Self { tree, out }
    }

    /// Stringify the whole tree starting at the root.
    pub fn stringify(&mut self) {
        let root = self.tree.root();
        self.body(root);
        let after = self.tree.after(root).unwrap_or("").to_string();
        if !after.is_empty() {
            self.out.push(&after, None);
        }
    }

    /// Emit one node (and its subtree). `semicolon` tells declarations and
    /// childless at-rules whether to terminate themselves.
    fn node(&mut self, id: NodeId, semicolon: bool) {
        // Copy the tree reference out so node data can stay borrowed across
        // the recursive `body` calls below.
        let tree = self.tree;
        let Some(node) = tree.get(id) else { return };
        match &node.kind {
            NodeKind::Root(_) => self.body(id),
            NodeKind::Rule(data) => {
                let selector = raw_or(data.selector_raw.as_ref(), &data.selector);
                let between = data.between.clone().unwrap_or_else(|| DEFAULT_BEFORE_OPEN.to_string());
                let after = data.after.clone().unwrap_or_else(|| self.default_after(id));
                self.out.push(&format!("{selector}{between}{{"), Some(id));
                self.body(id);
                self.out.push(&format!("{after}}}"), None);
            }
            NodeKind::AtRule(data) => {
                let params = raw_or(data.params_raw.as_ref(), &data.params);
                let after_name = data.after_name.clone().unwrap_or_else(|| {
                    if params.is_empty() { String::new() } else { DEFAULT_BEFORE_OPEN.to_string() }
                });
                let name = &data.name;
                match data.body {
                    AtRuleBody::None => {
                        let between = data.between.clone().unwrap_or_default();
                        let terminator = if semicolon { ";" } else { "" };
                        self.out.push(
                            &format!("@{name}{after_name}{params}{between}{terminator}"),
                            Some(id),
                        );
                    }
                    AtRuleBody::Undecided | AtRuleBody::Decls | AtRuleBody::Rules => {
                        let between = data
                            .between
                            .clone()
                            .unwrap_or_else(|| DEFAULT_BEFORE_OPEN.to_string());
                        let after = data.after.clone().unwrap_or_else(|| self.default_after(id));
                        self.out.push(&format!("@{name}{after_name}{params}{between}{{"), Some(id));
                        self.body(id);
                        self.out.push(&format!("{after}}}"), None);
                    }
                }
            }
            NodeKind::Decl(data) => {
                let between = data.between.clone().unwrap_or_else(|| DEFAULT_COLON.to_string());
                let value = raw_or(data.value_raw.as_ref(), &data.value);
                let terminator = if semicolon { ";" } else { "" };
                self.out.push(
                    &format!("{prop}{between}{value}{terminator}", prop = data.prop),
                    Some(id),
                );
            }
            NodeKind::Comment(data) => {
                let interior = match &data.raw {
                    Some(raw) if raw.value == data.text => raw.raw.clone(),
                    _ => data.text.clone(),
                };
                self.out.push(&format!("/*{interior}*/"), Some(id));
            }
        }
    }

    /// Emit a container's children, handling `before` and the trailing
    /// semicolon rule: the last non-comment child is terminated only when
    /// the container's `semicolon` flag is set; everything before it always
    /// is.
    fn body(&mut self, id: NodeId) {
        let children: Vec<NodeId> = self.tree.children(id).to_vec();
        if children.is_empty() {
            return;
        }

        let mut last = children.len() - 1;
        while last > 0 {
            if !matches!(self.tree.get(children[last]).map(|n| &n.kind), Some(NodeKind::Comment(_)))
            {
                break;
            }
            last -= 1;
        }

        let semicolon = self.tree.semicolon(id);
        for (index, &child) in children.iter().enumerate() {
            let before = self.before_of(child, index);
            if !before.is_empty() {
                self.out.push(&before, None);
            }
            self.node(child, index != last || semicolon);
        }
    }

    /// Default closing whitespace for a synthesized container: the brace
    /// stays put when there are no children, otherwise it moves to its own
    /// line.
    fn default_after(&self, id: NodeId) -> String {
        if self.tree.children(id).is_empty() {
            String::new()
        } else {
            DEFAULT_BEFORE.to_string()
        }
    }

    /// Resolve the whitespace emitted before a child.
    ///
    /// An explicit `before` always wins. Synthesized nodes inherit style:
    /// the first child of the root gets nothing; otherwise the nearest
    /// preceding sibling of the same kind is copied, then any sibling with a
    /// recorded `before`, then a bare newline at the root and a
    /// newline-plus-indent inside blocks.
    fn before_of(&self, id: NodeId, index: usize) -> String {
        if let Some(before) = self.tree.before(id) {
            return before.to_string();
        }
        let Some(parent) = self.tree.parent(id) else {
            return String::new();
        };
        let at_root = matches!(self.tree.get(parent).map(|n| &n.kind), Some(NodeKind::Root(_)));
        if at_root && index == 0 {
            return String::new();
        }

        let siblings = self.tree.children(parent);
        let own_kind = self.tree.get(id).map(|n| core::mem::discriminant(&n.kind));

        // Nearest preceding sibling of the same kind.
        let preceding = siblings[..index]
            .iter()
            .rev()
            .find(|&&sibling| {
                self.tree.get(sibling).map(|n| core::mem::discriminant(&n.kind)) == own_kind
                    && self.tree.before(sibling).is_some()
            })
            .and_then(|&sibling| self.tree.before(sibling));
        if let Some(before) = preceding {
            return before.to_string();
        }

        // Any other sibling with a recorded before.
        let any = siblings
            .iter()
            .find(|&&sibling| sibling != id && self.tree.before(sibling).is_some())
            .and_then(|&sibling| self.tree.before(sibling));
        if let Some(before) = any {
            return before.to_string();
        }

        if at_root { DEFAULT_BEFORE.to_string() } else { DEFAULT_INDENT.to_string() }
    }
}

/// Prefer the raw bytes while the record still matches the cleaned value.
fn raw_or(raw: Option<&Raw>, value: &str) -> String {
    match raw {
        Some(record) if record.value == value => record.raw.clone(),
        _ => value.to_string(),
    }
}
