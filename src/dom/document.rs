//! Document - ordered collection of top-level nodes

use super::container::Container;
use super::node::Node;
use crate::error::{Error, TreeError};
use crate::options::SerializeOptions;
use std::str::FromStr;

/// Top-level nodes produced by a parse, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Document { nodes }
    }

    /// Append a top-level node
    ///
    /// Documents accept any node, so unlike [`Container::add`] this cannot fail.
    pub fn push(&mut self, node: Node) -> &mut Node {
        self.nodes.push(node);
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Serialize with explicit options
    pub fn to_string_with(&self, options: &SerializeOptions) -> String {
        crate::serialize::serialize_document(self, options.indent_width)
    }
}

impl Container for Document {
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn insert(&mut self, index: usize, node: Node) -> Result<&mut Node, TreeError> {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node);
        Ok(&mut self.nodes[index])
    }

    fn remove(&mut self, index: usize) -> Option<Node> {
        (index < self.nodes.len()).then(|| self.nodes.remove(index))
    }

    fn remove_where<F>(&mut self, mut f: F) -> Vec<Node>
    where
        F: FnMut(&Node) -> bool,
    {
        let (removed, kept) = std::mem::take(&mut self.nodes)
            .into_iter()
            .partition(|n| f(n));
        self.nodes = kept;
        removed
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl From<Vec<Node>> for Document {
    fn from(nodes: Vec<Node>) -> Self {
        Document { nodes }
    }
}

impl FromIterator<Node> for Document {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Document {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_order() {
        let mut doc = Document::new();
        doc.push(Node::new("a").unwrap());
        doc.add(Node::new("c").unwrap()).unwrap();
        doc.insert(1, Node::new("b").unwrap()).unwrap();
        let names: Vec<_> = doc.iter().map(Node::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut doc: Document = ["a", "b", "a"]
            .into_iter()
            .map(|n| Node::new(n).unwrap())
            .collect();
        assert!(doc.remove(3).is_none());
        assert_eq!(doc.remove(1).map(|n| n.name().to_string()), Some("b".into()));
        assert_eq!(doc.remove_named("a").len(), 2);
        assert!(doc.is_empty());
        doc.push(Node::new("z").unwrap());
        doc.clear();
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_from_str() {
        let doc: Document = "<a/><b>x</b>".parse().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get(1).and_then(Node::text), Some("x"));
        assert!("<a>".parse::<Document>().is_err());
    }

    #[test]
    fn test_into_iter() {
        let doc: Document = "<a/><b/>".parse().unwrap();
        let borrowed: Vec<_> = (&doc).into_iter().map(Node::name).collect();
        assert_eq!(borrowed, vec!["a", "b"]);
        let owned: Vec<Node> = doc.into_iter().collect();
        assert_eq!(owned.len(), 2);
    }
}
