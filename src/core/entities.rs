//! XML entity handling
//!
//! Decoding side:
//! - Built-in entities only: &lt; &gt; &amp; &quot; &apos;
//! - Anything else, numeric references included, is left to the caller
//!
//! Encoding side escapes the characters the parser would otherwise read as
//! markup. Uses Cow for zero-copy when nothing needs escaping.

use memchr::{memchr, memchr3};
use std::borrow::Cow;

/// Decode a single entity name (without & and ;)
///
/// Names are matched ignoring ASCII case. Returns `None` for names outside
/// the fixed table, including numeric references like `#65`.
pub fn decode_entity(entity: &str) -> Option<char> {
    const TABLE: [(&str, char); 5] = [
        ("amp", '&'),
        ("apos", '\''),
        ("gt", '>'),
        ("lt", '<'),
        ("quot", '"'),
    ];
    TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(entity))
        .map(|&(_, c)| c)
}

/// Encode text for XML output (escape special characters)
pub fn encode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check if any escaping needed
    let bytes = input.as_bytes();
    if memchr3(b'<', b'>', b'&', bytes).is_none() && memchr(b'"', bytes).is_none() {
        return Cow::Borrowed(input);
    }

    // Slow path: escape
    let mut result = String::with_capacity(input.len() + 16);
    escape_to(input, &mut result);
    Cow::Owned(result)
}

/// Encode text for use in a double-quoted attribute value
pub fn encode_attribute(input: &str) -> Cow<'_, str> {
    encode_text(input)
}

/// Escape XML special characters to buffer
#[inline]
pub(crate) fn escape_to(input: &str, buf: &mut String) {
    for c in input.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            _ => buf.push(c),
        }
    }
}
