//! DOM Module - owned element tree
//!
//! - [`Node`]: named element with an [`AttributeMap`](crate::AttributeMap) and a [`Body`]
//! - [`Document`]: the top-level nodes of one parse
//! - [`Container`]: ordered-children lookup shared by both

pub mod container;
pub mod document;
pub mod node;

pub use container::{Container, Match, Predicate};
pub use document::Document;
pub use node::{validate_name, Body, Node};
