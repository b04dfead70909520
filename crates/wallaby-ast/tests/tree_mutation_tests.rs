//! Tests for tree mutation: insertion, removal, shape enforcement, safe
//! iteration, and deep cloning.

use std::ops::ControlFlow;

use wallaby_ast::{AtRuleBody, CssTree, NodeId, NodeKind, TreeError};

/// Helper to allocate a detached rule.
fn rule(tree: &mut CssTree, selector: &str) -> NodeId {
    tree.alloc(NodeKind::rule(selector))
}

/// Helper to allocate a detached declaration.
fn decl(tree: &mut CssTree, prop: &str, value: &str) -> NodeId {
    tree.alloc(NodeKind::decl(prop, value))
}

/// Helper reading a rule's selector.
fn selector_of(tree: &CssTree, id: NodeId) -> String {
    tree.as_rule(id).map(|data| data.selector.clone()).unwrap_or_default()
}

// ========== append / prepend ==========

#[test]
fn test_append_sets_parent_and_index() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    tree.append(tree.root(), a).unwrap();

    assert_eq!(tree.parent(a), Some(tree.root()));
    assert_eq!(tree.index_of(tree.root(), a), Some(0));
    assert_eq!(tree.children(tree.root()), &[a]);
}

#[test]
fn test_append_maintains_sibling_links() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    let b = rule(&mut tree, "b");
    tree.append(tree.root(), a).unwrap();
    tree.append(tree.root(), b).unwrap();

    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_prepend_goes_to_front() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    let b = rule(&mut tree, "b");
    tree.append(tree.root(), a).unwrap();
    tree.prepend(tree.root(), b).unwrap();

    assert_eq!(tree.children(tree.root()), &[b, a]);
    assert_eq!(tree.next_sibling(b), Some(a));
    assert_eq!(tree.prev_sibling(a), Some(b));
}

#[test]
fn test_append_detaches_from_previous_parent() {
    let mut tree = CssTree::new();
    let first = rule(&mut tree, "a");
    let second = rule(&mut tree, "b");
    tree.append(tree.root(), first).unwrap();
    tree.append(tree.root(), second).unwrap();

    let moved = decl(&mut tree, "color", "red");
    tree.append(first, moved).unwrap();
    tree.append(second, moved).unwrap();

    assert_eq!(tree.children(first).len(), 0);
    assert_eq!(tree.children(second), &[moved]);
    assert_eq!(tree.parent(moved), Some(second));
}

// ========== insert_before / insert_after ==========

#[test]
fn test_insert_before_by_node() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    let c = rule(&mut tree, "c");
    tree.append(tree.root(), a).unwrap();
    tree.append(tree.root(), c).unwrap();

    let b = rule(&mut tree, "b");
    tree.insert_before(tree.root(), c, b).unwrap();

    assert_eq!(tree.children(tree.root()), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_after_by_index() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    let c = rule(&mut tree, "c");
    tree.append(tree.root(), a).unwrap();
    tree.append(tree.root(), c).unwrap();

    let b = rule(&mut tree, "b");
    tree.insert_after(tree.root(), 0, b).unwrap();

    assert_eq!(tree.children(tree.root()), &[a, b, c]);
}

#[test]
fn test_insert_with_bad_reference_fails() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    tree.append(tree.root(), a).unwrap();

    let b = rule(&mut tree, "b");
    let orphan = rule(&mut tree, "x");
    assert_eq!(
        tree.insert_before(tree.root(), orphan, b),
        Err(TreeError::NotAChild)
    );
    assert_eq!(
        tree.insert_before(tree.root(), 5, b),
        Err(TreeError::IndexOutOfBounds { index: 5, len: 1 })
    );
}

// ========== remove ==========

#[test]
fn test_remove_middle_of_three() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    let b = rule(&mut tree, "b");
    let c = rule(&mut tree, "c");
    tree.append(tree.root(), a).unwrap();
    tree.append(tree.root(), b).unwrap();
    tree.append(tree.root(), c).unwrap();

    let removed = tree.remove(tree.root(), b).unwrap();

    assert_eq!(removed, b);
    assert_eq!(tree.children(tree.root()), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.prev_sibling(b), None);
    assert_eq!(tree.next_sibling(b), None);
}

#[test]
fn test_remove_by_index() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    let b = rule(&mut tree, "b");
    tree.append(tree.root(), a).unwrap();
    tree.append(tree.root(), b).unwrap();

    let removed = tree.remove(tree.root(), 0).unwrap();
    assert_eq!(removed, a);
    assert_eq!(tree.children(tree.root()), &[b]);
}

#[test]
fn test_remove_self_clears_parent() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    tree.append(tree.root(), a).unwrap();

    tree.remove_self(a);
    assert_eq!(tree.parent(a), None);
    assert!(tree.children(tree.root()).is_empty());

    // A second detach is a no-op.
    tree.remove_self(a);
    assert_eq!(tree.parent(a), None);
}

// ========== shape enforcement ==========

#[test]
fn test_root_rejects_declarations() {
    let mut tree = CssTree::new();
    let stray = decl(&mut tree, "color", "red");
    assert_eq!(
        tree.append(tree.root(), stray),
        Err(TreeError::IncompatibleChild { container: "Root", child: "Declaration" })
    );
}

#[test]
fn test_leaves_are_not_containers() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    tree.append(tree.root(), a).unwrap();
    let d = decl(&mut tree, "color", "red");
    tree.append(a, d).unwrap();

    let nested = decl(&mut tree, "top", "0");
    assert_eq!(
        tree.append(d, nested),
        Err(TreeError::NotAContainer { kind: "Declaration" })
    );
}

#[test]
fn test_at_rule_shape_fixed_by_first_declaration() {
    let mut tree = CssTree::new();
    let at = tree.alloc(NodeKind::at_rule("font-face", ""));
    tree.append(tree.root(), at).unwrap();
    assert_eq!(tree.as_at_rule(at).unwrap().body, AtRuleBody::None);

    let d = decl(&mut tree, "font-family", "x");
    tree.append(at, d).unwrap();
    assert_eq!(tree.as_at_rule(at).unwrap().body, AtRuleBody::Decls);

    // The shape is now fixed: rules are rejected.
    let r = rule(&mut tree, "a");
    assert_eq!(
        tree.append(at, r),
        Err(TreeError::IncompatibleChild { container: "AtRule", child: "Rule" })
    );
}

#[test]
fn test_at_rule_comment_does_not_fix_shape() {
    let mut tree = CssTree::new();
    let at = tree.alloc(NodeKind::at_rule("media", "screen"));
    tree.append(tree.root(), at).unwrap();

    let c = tree.alloc(NodeKind::comment("note"));
    tree.append(at, c).unwrap();
    assert_eq!(tree.as_at_rule(at).unwrap().body, AtRuleBody::Undecided);

    // A rule can still decide the shape afterwards.
    let r = rule(&mut tree, "a");
    tree.append(at, r).unwrap();
    assert_eq!(tree.as_at_rule(at).unwrap().body, AtRuleBody::Rules);
}

// ========== predicates ==========

#[test]
fn test_some_and_every() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    tree.append(tree.root(), a).unwrap();
    let d1 = decl(&mut tree, "color", "red");
    let d2 = decl(&mut tree, "top", "0");
    tree.append(a, d1).unwrap();
    tree.append(a, d2).unwrap();

    assert!(tree.some(a, |n| matches!(&n.kind, NodeKind::Decl(d) if d.prop == "top")));
    assert!(!tree.some(a, |n| matches!(&n.kind, NodeKind::Comment(_))));
    assert!(tree.every(a, |n| matches!(&n.kind, NodeKind::Decl(_))));
}

// ========== safe iteration ==========

#[test]
fn test_each_visits_each_original_once_while_prepending_clones() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    let b = rule(&mut tree, "b");
    tree.append(tree.root(), a).unwrap();
    tree.append(tree.root(), b).unwrap();

    let mut visited = Vec::new();
    let root = tree.root();
    let flow = tree.each(root, |tree, child, _index| {
        visited.push(selector_of(tree, child));
        let copy = tree.deep_clone(child);
        tree.prepend(root, copy).unwrap();
        ControlFlow::Continue(())
    });

    assert_eq!(flow, ControlFlow::Continue(()));
    // Each original child visited exactly once, clones never visited.
    assert_eq!(visited, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(tree.children(root).len(), 4);
}

#[test]
fn test_each_survives_removing_the_current_child() {
    let mut tree = CssTree::new();
    for name in ["a", "b", "c"] {
        let r = rule(&mut tree, name);
        tree.append(tree.root(), r).unwrap();
    }

    let mut visited = Vec::new();
    let root = tree.root();
    let _ = tree.each(root, |tree, child, _index| {
        visited.push(selector_of(tree, child));
        tree.remove_self(child);
        ControlFlow::Continue(())
    });

    assert_eq!(visited, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    assert!(tree.children(root).is_empty());
}

#[test]
fn test_each_break_propagates() {
    let mut tree = CssTree::new();
    for name in ["a", "b", "c"] {
        let r = rule(&mut tree, name);
        tree.append(tree.root(), r).unwrap();
    }

    let mut visited = 0;
    let flow = tree.each(tree.root(), |_, _, _| {
        visited += 1;
        ControlFlow::Break(())
    });

    assert_eq!(flow, ControlFlow::Break(()));
    assert_eq!(visited, 1);
}

#[test]
fn test_each_decl_is_depth_first() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    tree.append(tree.root(), a).unwrap();
    let d1 = decl(&mut tree, "color", "red");
    tree.append(a, d1).unwrap();

    let at = tree.alloc(NodeKind::at_rule("media", "screen"));
    tree.append(tree.root(), at).unwrap();
    let b = rule(&mut tree, "b");
    tree.append(at, b).unwrap();
    let d2 = decl(&mut tree, "top", "0");
    tree.append(b, d2).unwrap();

    let mut props = Vec::new();
    let _ = tree.each_decl(tree.root(), |tree, id, _| {
        props.push(tree.as_decl(id).unwrap().prop.clone());
        ControlFlow::Continue(())
    });

    assert_eq!(props, vec!["color".to_string(), "top".to_string()]);
}

// ========== deep clone ==========

#[test]
fn test_deep_clone_is_detached_and_complete() {
    let mut tree = CssTree::new();
    let a = rule(&mut tree, "a");
    tree.append(tree.root(), a).unwrap();
    tree.set_before(a, "\n");
    let d = decl(&mut tree, "color", "red");
    tree.append(a, d).unwrap();

    let copy = tree.deep_clone(a);

    assert_ne!(copy, a);
    assert_eq!(tree.parent(copy), None);
    assert_eq!(tree.before(copy), Some("\n"));
    assert_eq!(selector_of(&tree, copy), "a");
    assert_eq!(tree.children(copy).len(), 1);

    let copied_decl = tree.children(copy)[0];
    assert_ne!(copied_decl, d);
    assert_eq!(tree.parent(copied_decl), Some(copy));
    assert_eq!(tree.as_decl(copied_decl).unwrap().prop, "color");

    // The original is untouched.
    assert_eq!(tree.parent(a), Some(tree.root()));
    assert_eq!(tree.children(a), &[d]);
}

// ========== ancestors ==========

#[test]
fn test_ancestors_walks_to_root() {
    let mut tree = CssTree::new();
    let at = tree.alloc(NodeKind::at_rule("media", "screen"));
    tree.append(tree.root(), at).unwrap();
    let a = rule(&mut tree, "a");
    tree.append(at, a).unwrap();
    let d = decl(&mut tree, "color", "red");
    tree.append(a, d).unwrap();

    let chain: Vec<NodeId> = tree.ancestors(d).collect();
    assert_eq!(chain, vec![a, at, tree.root()]);
}
