//! Element node representation
//!
//! A node owns its name, its attributes, and a [`Body`] that is either
//! empty, a text payload, or an ordered list of child nodes. Text and
//! children are mutually exclusive, and a self-closing node has no body.

use super::container::Container;
use crate::core::attributes::AttributeMap;
use crate::error::TreeError;
use crate::options::SerializeOptions;

/// Content held between an element's start and end tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No content
    #[default]
    Empty,
    /// Text payload, never empty
    Text(String),
    /// Child elements, never empty
    Children(Vec<Node>),
}

/// A named element with attributes and a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    attributes: AttributeMap,
    body: Body,
    self_closing: bool,
}

/// Check a node or attribute name
///
/// A name is non-empty, does not start with an ASCII digit or ASCII
/// punctuation, and contains no whitespace or markup delimiters.
pub fn validate_name(name: &str) -> Result<(), TreeError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        None => false,
        Some(first) => {
            !first.is_ascii_digit()
                && !first.is_ascii_punctuation()
                && !first.is_whitespace()
                && chars.all(|c| !c.is_whitespace() && !is_delimiter(c))
        }
    };
    if valid {
        Ok(())
    } else {
        Err(TreeError::InvalidName(name.to_string()))
    }
}

#[inline]
fn is_delimiter(c: char) -> bool {
    matches!(c, '<' | '>' | '/' | '=' | '!' | '?' | '[' | ']' | '"' | '\'')
}

impl Node {
    /// Create an empty node
    pub fn new(name: impl Into<String>) -> Result<Self, TreeError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Node {
            name,
            attributes: AttributeMap::new(),
            body: Body::Empty,
            self_closing: false,
        })
    }

    /// Create a node with attributes in the given order
    pub fn with_attributes<I, K, V>(name: impl Into<String>, attributes: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut node = Node::new(name)?;
        node.set_attributes(attributes)?;
        Ok(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self, TreeError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(self)
    }

    // ---- attributes ----

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Set one attribute, replacing an existing value in place
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, TreeError> {
        let name = name.into();
        validate_name(&name)?;
        self.attributes.put(name, value);
        Ok(self)
    }

    /// Add several attributes, keeping the given order for new names
    ///
    /// Names are validated up front; on failure nothing is changed.
    pub fn set_attributes<I, K, V>(&mut self, attributes: I) -> Result<&mut Self, TreeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: Vec<(String, String)> = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        for (name, _) in &pairs {
            validate_name(name)?;
        }
        self.attributes.extend(pairs);
        Ok(self)
    }

    /// Replace the whole attribute map
    pub fn replace_attributes(&mut self, attributes: AttributeMap) -> Result<&mut Self, TreeError> {
        for name in attributes.keys() {
            validate_name(name)?;
        }
        self.attributes = attributes;
        Ok(self)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// Order attributes alphabetically by name
    pub fn sort_attributes(&mut self) {
        self.attributes.sort();
    }

    // ---- body ----

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Text payload, if any
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn has_text(&self) -> bool {
        matches!(self.body, Body::Text(_))
    }

    pub fn has_children(&self) -> bool {
        matches!(self.body, Body::Children(_))
    }

    /// Replace the text payload; an empty string clears it
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<&mut Self, TreeError> {
        self.check_text_allowed()?;
        let text = text.into();
        self.body = if text.is_empty() {
            Body::Empty
        } else {
            Body::Text(text)
        };
        Ok(self)
    }

    /// Append to the text payload; appending nothing is always allowed
    pub fn push_text(&mut self, text: &str) -> Result<&mut Self, TreeError> {
        if text.is_empty() {
            return Ok(self);
        }
        self.check_text_allowed()?;
        match &mut self.body {
            Body::Text(existing) => existing.push_str(text),
            body => *body = Body::Text(text.to_string()),
        }
        Ok(self)
    }

    /// Drop any text payload
    pub fn clear_text(&mut self) {
        if self.has_text() {
            self.body = Body::Empty;
        }
    }

    fn check_text_allowed(&self) -> Result<(), TreeError> {
        if self.self_closing {
            return Err(TreeError::TextOnSelfClosing(self.name.clone()));
        }
        if self.has_children() {
            return Err(TreeError::TextWithChildren(self.name.clone()));
        }
        Ok(())
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Mark or unmark the node as self-closing
    ///
    /// Only a node with an empty body may become self-closing.
    pub fn set_self_closing(&mut self, self_closing: bool) -> Result<&mut Self, TreeError> {
        if self_closing && self.body != Body::Empty {
            return Err(TreeError::SelfClosingWithBody(self.name.clone()));
        }
        self.self_closing = self_closing;
        Ok(self)
    }

    /// Serialize with explicit options
    pub fn to_string_with(&self, options: &SerializeOptions) -> String {
        crate::serialize::serialize_node(self, 0, options.indent_width)
    }
}

impl Container for Node {
    fn nodes(&self) -> &[Node] {
        match &self.body {
            Body::Children(children) => children,
            _ => &[],
        }
    }

    fn insert(&mut self, index: usize, node: Node) -> Result<&mut Node, TreeError> {
        if self.self_closing {
            return Err(TreeError::ChildOfSelfClosing(self.name.clone()));
        }
        if self.has_text() {
            return Err(TreeError::ChildWithText(self.name.clone()));
        }
        if self.body == Body::Empty {
            self.body = Body::Children(Vec::new());
        }
        match &mut self.body {
            Body::Children(children) => {
                let index = index.min(children.len());
                children.insert(index, node);
                Ok(&mut children[index])
            }
            // Empty was just replaced and Text was rejected above
            _ => Err(TreeError::ChildWithText(self.name.clone())),
        }
    }

    fn remove(&mut self, index: usize) -> Option<Node> {
        let Body::Children(children) = &mut self.body else {
            return None;
        };
        if index >= children.len() {
            return None;
        }
        let removed = children.remove(index);
        if children.is_empty() {
            self.body = Body::Empty;
        }
        Some(removed)
    }

    fn remove_where<F>(&mut self, mut f: F) -> Vec<Node>
    where
        F: FnMut(&Node) -> bool,
    {
        let Body::Children(children) = &mut self.body else {
            return Vec::new();
        };
        let (removed, kept): (Vec<Node>, Vec<Node>) =
            std::mem::take(children).into_iter().partition(|n| f(n));
        self.body = if kept.is_empty() {
            Body::Empty
        } else {
            Body::Children(kept)
        };
        removed
    }

    fn clear(&mut self) {
        if self.has_children() {
            self.body = Body::Empty;
        }
    }
}
