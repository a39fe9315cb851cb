//! TXML - small XML dialect parser and serializer
//!
//! Parses markup into an owned tree of [`Node`]s collected in a [`Document`],
//! and writes trees back out either indented or compact.
//!
//! ```
//! use txml::{Container, SerializeOptions};
//!
//! let doc = txml::parse(r#"<note id="7"><to>Tove</to><body>a &lt;b&gt; c</body></note>"#)?;
//! let note = &doc.nodes()[0];
//! assert_eq!(note.attribute("id"), Some("7"));
//! assert_eq!(note.first_named("body").and_then(|n| n.text()), Some("a <b> c"));
//!
//! let compact = doc.to_string_with(&SerializeOptions::compact());
//! assert_eq!(compact, r#"<note id="7"><to>Tove</to><body>a &lt;b&gt; c</body></note>"#);
//! # Ok::<(), txml::Error>(())
//! ```
//!
//! Modules:
//! - `core`: scanner, tokenizer, entity handling, attribute map
//! - `dom`: node tree and the [`Container`] lookup trait
//! - `parser`: tree construction with an explicit element stack
//! - `serialize`: tree to text
//!
//! With the `nif` feature the crate also builds as an Erlang NIF library.

use std::io::Read;

pub mod core;
pub mod dom;
pub mod error;
pub mod options;
pub mod parser;
pub mod serialize;
#[cfg(feature = "nif")]
mod term;

pub use crate::core::attributes::AttributeMap;
pub use dom::{Body, Container, Document, Match, Node, Predicate};
pub use error::{Error, ErrorKind, Position, Result, TreeError};
pub use options::{ParseOptions, SerializeOptions};
pub use parser::Parser;
pub use serialize::{serialize_document, serialize_node};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(all(feature = "nif", feature = "mimalloc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Parsing Entry Points
// ============================================================================

/// Parse a whole document with default options
pub fn parse(input: &str) -> Result<Document> {
    Parser::new(input).parse_document()
}

/// Parse a whole document with explicit options
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Document> {
    Parser::with_options(input, *options).parse_document()
}

/// Read a source to the end, then parse it
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Document> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse(&input)
}

// ============================================================================
// NIF Bindings
// ============================================================================

#[cfg(feature = "nif")]
rustler::atoms! {
    ok,
    error,
}

#[cfg(feature = "nif")]
fn parse_binary(input: &rustler::Binary) -> std::result::Result<Document, String> {
    let text = std::str::from_utf8(input.as_slice())
        .map_err(|e| format!("input is not valid UTF-8: {}", e))?;
    parse(text).map_err(|e| e.to_string())
}

/// Parse a binary into `{:ok, nodes}` or `{:error, message}`
#[cfg(feature = "nif")]
#[rustler::nif(name = "parse")]
fn nif_parse<'a>(env: rustler::Env<'a>, input: rustler::Binary<'a>) -> rustler::NifResult<rustler::Term<'a>> {
    use rustler::Encoder;

    match parse_binary(&input) {
        Ok(doc) => Ok((ok(), term::document_to_term(env, &doc)).encode(env)),
        Err(msg) => Ok((error(), msg).encode(env)),
    }
}

/// Reformat a binary with the given indent width (0 for compact output)
#[cfg(feature = "nif")]
#[rustler::nif(name = "format")]
fn nif_format<'a>(
    env: rustler::Env<'a>,
    input: rustler::Binary<'a>,
    indent: usize,
) -> rustler::NifResult<rustler::Term<'a>> {
    use rustler::Encoder;

    match parse_binary(&input) {
        Ok(doc) => {
            let text = serialize_document(&doc, indent);
            Ok((ok(), term::str_to_binary(env, &text)).encode(env))
        }
        Err(msg) => Ok((error(), msg).encode(env)),
    }
}

#[cfg(feature = "nif")]
rustler::init!("Elixir.Txml.Native");
