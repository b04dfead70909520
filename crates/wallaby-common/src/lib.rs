//! Common infrastructure for the wallaby CSS processor.
//!
//! This crate provides the pieces shared by every other component:
//! - **Positions** - 1-indexed line/column coordinates and source spans
//! - **Syntax errors** - position-carrying error values with excerpt rendering
//! - **Warnings** - position-carrying values for recoverable oddities

pub mod error;
pub mod position;
pub mod warning;

pub use error::SyntaxError;
pub use position::{Position, Span};
pub use warning::Warning;
