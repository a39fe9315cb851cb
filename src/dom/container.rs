//! Ordered-children capability shared by [`Document`](super::Document) and [`Node`]
//!
//! Implementors only provide storage access; lookup by name or attribute is
//! built on top of [`Container::nodes`]. Lookups return references into the
//! owning tree in their original order.

use super::node::Node;
use crate::error::TreeError;

/// One condition a child node can satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'a> {
    /// Node name equals the given name (case-sensitive)
    Name(&'a str),
    /// Node carries the attribute, whatever its value
    HasAttribute(&'a str),
    /// Node carries the attribute with exactly this value
    AttributeEquals(&'a str, &'a str),
}

impl Predicate<'_> {
    pub fn matches(&self, node: &Node) -> bool {
        match *self {
            Predicate::Name(name) => node.name() == name,
            Predicate::HasAttribute(attr) => node.has_attribute(attr),
            Predicate::AttributeEquals(attr, value) => node.attribute(attr) == Some(value),
        }
    }
}

/// How a list of predicates combines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Match {
    /// Every predicate must hold ("strict")
    #[default]
    All,
    /// At least one predicate must hold
    Any,
}

impl Match {
    /// Test a node against `predicates`
    ///
    /// An empty predicate list matches every node in both modes.
    pub fn test(self, predicates: &[Predicate<'_>], node: &Node) -> bool {
        if predicates.is_empty() {
            return true;
        }
        match self {
            Match::All => predicates.iter().all(|p| p.matches(node)),
            Match::Any => predicates.iter().any(|p| p.matches(node)),
        }
    }
}

/// Ordered child storage with lookup, insertion, and removal
pub trait Container {
    /// Children in order
    fn nodes(&self) -> &[Node];

    /// Insert a child at `index` (clamped to the current length)
    fn insert(&mut self, index: usize, node: Node) -> Result<&mut Node, TreeError>;

    /// Remove the child at `index`
    fn remove(&mut self, index: usize) -> Option<Node>;

    /// Remove every child for which `f` returns true, keeping the rest in order
    fn remove_where<F>(&mut self, f: F) -> Vec<Node>
    where
        F: FnMut(&Node) -> bool;

    /// Remove all children
    fn clear(&mut self);

    /// Append a child
    fn add(&mut self, node: Node) -> Result<&mut Node, TreeError> {
        let len = self.len();
        self.insert(len, node)
    }

    fn len(&self) -> usize {
        self.nodes().len()
    }

    fn is_empty(&self) -> bool {
        self.nodes().is_empty()
    }

    fn get(&self, index: usize) -> Option<&Node> {
        self.nodes().get(index)
    }

    /// Children matching `predicates` combined according to `mode`
    fn select(&self, predicates: &[Predicate<'_>], mode: Match) -> Vec<&Node> {
        self.nodes()
            .iter()
            .filter(|node| mode.test(predicates, node))
            .collect()
    }

    /// Children with the given name
    fn nodes_named(&self, name: &str) -> Vec<&Node> {
        self.select(&[Predicate::Name(name)], Match::All)
    }

    /// Children whose name is any of `names`
    fn nodes_named_any(&self, names: &[&str]) -> Vec<&Node> {
        let predicates: Vec<_> = names.iter().map(|&name| Predicate::Name(name)).collect();
        self.select(&predicates, Match::Any)
    }

    fn first_named(&self, name: &str) -> Option<&Node> {
        self.nodes().iter().find(|node| node.name() == name)
    }

    /// Children carrying all (or any) of the attribute names
    fn nodes_with_attributes(&self, names: &[&str], mode: Match) -> Vec<&Node> {
        let predicates: Vec<_> = names
            .iter()
            .map(|&name| Predicate::HasAttribute(name))
            .collect();
        self.select(&predicates, mode)
    }

    /// Children carrying all (or any) of the attribute name/value pairs
    fn nodes_with_attribute_values(&self, pairs: &[(&str, &str)], mode: Match) -> Vec<&Node> {
        let predicates: Vec<_> = pairs
            .iter()
            .map(|&(name, value)| Predicate::AttributeEquals(name, value))
            .collect();
        self.select(&predicates, mode)
    }

    /// Remove every child with the given name
    fn remove_named(&mut self, name: &str) -> Vec<Node> {
        self.remove_where(|node| node.name() == name)
    }
}
