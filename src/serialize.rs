//! Tree to markup serialization
//!
//! Nodes are written with an explicit stack instead of recursion, so output
//! depth is not bounded by the thread stack.

use crate::core::entities::escape_to;
use crate::dom::{Body, Container, Document, Node};
use crate::options::DEFAULT_INDENT_WIDTH;
use std::fmt;

enum Step<'a> {
    /// Start tag and, for leaves, the whole element
    Open {
        node: &'a Node,
        level: usize,
        newline: bool,
    },
    /// End tag of an element with children
    Close { node: &'a Node, level: usize },
}

/// Serialize one node starting at nesting `level`
///
/// With `width > 0` the node is prefixed by `level * width` spaces and each
/// child goes on its own line one level deeper. `width == 0` writes
/// everything on one line.
pub fn serialize_node(node: &Node, level: usize, width: usize) -> String {
    let mut out = String::with_capacity(64);
    write_node(&mut out, node, level, width);
    out
}

/// Serialize every top-level node, one per line unless `width == 0`
pub fn serialize_document(doc: &Document, width: usize) -> String {
    let mut out = String::with_capacity(64 * doc.nodes().len());
    for (i, node) in doc.iter().enumerate() {
        if i > 0 && width > 0 {
            out.push('\n');
        }
        write_node(&mut out, node, 0, width);
    }
    out
}

fn write_node(out: &mut String, root: &Node, level: usize, width: usize) {
    let mut stack = Vec::with_capacity(16);
    stack.push(Step::Open {
        node: root,
        level,
        newline: false,
    });

    while let Some(step) = stack.pop() {
        match step {
            Step::Open {
                node,
                level,
                newline,
            } => {
                if width > 0 {
                    if newline {
                        out.push('\n');
                    }
                    indent(out, level * width);
                }
                write_start_tag(out, node);
                if node.is_self_closing() {
                    continue;
                }
                match node.body() {
                    Body::Empty => write_end_tag(out, node),
                    Body::Text(text) => {
                        escape_to(text, out);
                        write_end_tag(out, node);
                    }
                    Body::Children(children) => {
                        stack.push(Step::Close { node, level });
                        for child in children.iter().rev() {
                            stack.push(Step::Open {
                                node: child,
                                level: level + 1,
                                newline: true,
                            });
                        }
                    }
                }
            }
            Step::Close { node, level } => {
                if width > 0 {
                    out.push('\n');
                    indent(out, level * width);
                }
                write_end_tag(out, node);
            }
        }
    }
}

fn write_start_tag(out: &mut String, node: &Node) {
    out.push('<');
    out.push_str(node.name());
    for (name, value) in node.attributes().iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_to(value, out);
        out.push('"');
    }
    out.push_str(if node.is_self_closing() { "/>" } else { ">" });
}

#[inline]
fn write_end_tag(out: &mut String, node: &Node) {
    out.push_str("</");
    out.push_str(node.name());
    out.push('>');
}

#[inline]
fn indent(out: &mut String, spaces: usize) {
    out.extend(std::iter::repeat(' ').take(spaces));
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_node(self, 0, DEFAULT_INDENT_WIDTH))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_document(self, DEFAULT_INDENT_WIDTH))
    }
}
