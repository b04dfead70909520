//! Arena-based CSS node tree for the wallaby postprocessor.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow checker
//! issues. Every node keeps the formatting side channels (`before`/`after`
//! whitespace, raw records) that make unmodified subtrees stringify back to
//! their original bytes.
//!
//! # Scope
//!
//! This crate provides:
//! - **Node model** - Root, Rule, AtRule, Declaration, and Comment variants
//!   with cleaned values paired to raw records
//! - **Container editing** - append/prepend/insert/remove with
//!   detach-on-insert and shape validation for at-rule bodies
//! - **Safe iteration** - cursor-based `each`/`walk` that survive mutation
//!   of the container being iterated
//! - **Deep clone** - detached copies with formatting history intact
//!
//! Parsing and stringification live in `wallaby-css`; this crate never looks
//! at CSS text itself.

pub mod node;
pub mod tree;

pub use node::{
    AtRuleBody, AtRuleData, CommentData, DeclData, Node, NodeId, NodeKind, Raw, RootData, RuleData,
};
pub use tree::{AncestorIterator, ChildRef, CssTree, TreeError};
