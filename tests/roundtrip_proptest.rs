//! Property-based tests for serialize/parse round trips
//!
//! Trees are generated through the public node API, so every generated tree
//! already satisfies the node invariants:
//! - text and children are never both present
//! - self-closing nodes have no body
//! - text has no leading or trailing whitespace (the parser trims it)

use proptest::prelude::*;
use txml::{Container, Document, Node};

/// Generate valid node and attribute names
fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9]{0,6}",
        "[a-zA-Z][a-zA-Z0-9_.-]{0,8}",
        "[a-z]{1,4}:[a-z]{1,4}",
    ]
}

/// Generate attribute values, including characters that need escaping
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 &<>\"'.,;=/-]{0,12}"
}

/// Generate trimmed, non-empty text
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 &<>\"'.,;=/-]{1,16}"
        .prop_map(|s| s.trim().to_string())
        .prop_filter("text must not be blank", |s| !s.is_empty())
}

fn attributes_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((name_strategy(), value_strategy()), 0..4)
}

#[derive(Debug, Clone)]
enum Leaf {
    Empty,
    SelfClosing,
    Text(String),
}

fn leaf_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        Just(Leaf::Empty),
        Just(Leaf::SelfClosing),
        text_strategy().prop_map(Leaf::Text),
    ];
    (name_strategy(), attributes_strategy(), leaf).prop_map(|(name, attrs, leaf)| {
        let mut node = Node::with_attributes(name, attrs).unwrap();
        match leaf {
            Leaf::Empty => {}
            Leaf::SelfClosing => {
                node.set_self_closing(true).unwrap();
            }
            Leaf::Text(text) => {
                node.set_text(text).unwrap();
            }
        }
        node
    })
}

fn node_strategy() -> impl Strategy<Value = Node> {
    leaf_strategy().prop_recursive(4, 48, 4, |inner| {
        (
            name_strategy(),
            attributes_strategy(),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(name, attrs, children)| {
                let mut node = Node::with_attributes(name, attrs).unwrap();
                for child in children {
                    node.add(child).unwrap();
                }
                node
            })
    })
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::vec(node_strategy(), 0..4).prop_map(Document::from_nodes)
}

proptest! {
    #[test]
    fn test_parse_inverts_serialize(doc in document_strategy(), width in 0usize..5) {
        let text = txml::serialize_document(&doc, width);
        let reparsed = txml::parse(&text);
        prop_assert!(reparsed.is_ok(), "failed to parse {:?}: {:?}", text, reparsed);
        prop_assert_eq!(reparsed.unwrap(), doc);
    }

    #[test]
    fn test_reformatting_is_idempotent(doc in document_strategy(), width in 0usize..5) {
        let once = txml::serialize_document(&doc, width);
        let twice = txml::serialize_document(&txml::parse(&once).unwrap(), width);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_compact_output_is_one_line(node in node_strategy()) {
        let text = txml::serialize_node(&node, 0, 0);
        prop_assert!(!text.contains('\n'));
    }

    #[test]
    fn test_attribute_order_survives(attrs in attributes_strategy()) {
        let mut node = Node::with_attributes("a", attrs).unwrap();
        node.set_self_closing(true).unwrap();
        let doc = txml::parse(&node.to_string()).unwrap();
        let expected: Vec<_> = node.attributes().keys().collect();
        let actual: Vec<_> = doc.nodes()[0].attributes().keys().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn test_arbitrary_input_never_panics(input in "\\PC{0,64}") {
        let _ = txml::parse(&input);
    }

    #[test]
    fn test_markup_soup_never_panics(input in "[<>/!?=\\[\\]\"'&;#a-cx0-9 -]{0,48}") {
        let _ = txml::parse(&input);
    }
}
