//! Elixir Term Conversion Utilities
//!
//! Converts parsed trees to Elixir terms. Each node becomes
//! `{name, [{attr, value}], body, self_closing?}` where `body` is a list of
//! child nodes, or a binary when the node holds text.

use crate::dom::{Body, Container, Document, Node};
use rustler::{Encoder, Env, NewBinary, Term};

/// Convert the top-level nodes of a document to a list
pub fn document_to_term<'a>(env: Env<'a>, doc: &Document) -> Term<'a> {
    nodes_to_term(env, doc.nodes())
}

/// Convert one node, including its subtree
pub fn node_to_term<'a>(env: Env<'a>, node: &Node) -> Term<'a> {
    let name = str_to_binary(env, node.name());

    // Build in reverse so prepending keeps source order
    let mut attrs = Term::list_new_empty(env);
    for (attr, value) in node.attributes().iter().rev() {
        let pair = (str_to_binary(env, attr), str_to_binary(env, value));
        attrs = attrs.list_prepend(pair.encode(env));
    }

    let body = match node.body() {
        Body::Empty => Term::list_new_empty(env),
        Body::Text(text) => str_to_binary(env, text),
        Body::Children(children) => nodes_to_term(env, children),
    };

    (name, attrs, body, node.is_self_closing()).encode(env)
}

fn nodes_to_term<'a>(env: Env<'a>, nodes: &[Node]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for node in nodes.iter().rev() {
        list = list.list_prepend(node_to_term(env, node));
    }
    list
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
