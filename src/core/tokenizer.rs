//! XML Tokenizer - lexical primitives for the tree parser
//!
//! Wraps a [`Scanner`] and reads the pieces the parser asks for:
//! - Outer tokens: `<` or the text up to the next `<`
//! - Inner tokens inside a tag: syntax characters, quoted values, names
//! - Meta tokens inside `<!...>` and `<?...?>`, whose values are ignored
//! - CDATA bodies, entity references, and backslash-escaped strings

use super::entities::decode_entity;
use super::scanner::Scanner;
use crate::error::{Error, Position};

/// Token read between `<` and `>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `>`
    Gt,
    /// `/`
    Slash,
    /// `=`
    Eq,
    /// `!`
    Bang,
    /// `?`
    Quest,
    /// Bare name
    Name(String),
    /// Quoted string, entities decoded
    Quoted(String),
}

/// Token read inside `<!...>` or `<?...?>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meta {
    Lt,
    Gt,
    Slash,
    Eq,
    Bang,
    Quest,
    /// A name or quoted string; the value is not kept
    Literal,
}

/// Token read outside of tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// `<`, the start of some markup
    Lt,
    /// Trimmed text with entities decoded
    Text(String),
}

/// XML tokenizer over an in-memory source
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
        }
    }

    /// Get the current position in the input
    pub fn position(&self) -> Position {
        self.scanner.position()
    }

    pub fn next(&mut self) -> Option<char> {
        self.scanner.next()
    }

    pub fn back(&mut self) -> Result<(), Error> {
        self.scanner.back()
    }

    pub fn more(&mut self) -> Result<bool, Error> {
        self.scanner.more()
    }

    pub fn skip_to(&mut self, target: char) -> Option<char> {
        self.scanner.skip_to(target)
    }

    pub fn syntax_error(&self, message: impl Into<String>) -> Error {
        self.scanner.syntax_error(message)
    }

    pub fn structure_error(&self, message: impl Into<String>) -> Error {
        self.scanner.structure_error(message)
    }

    /// Skip whitespace and report whether anything else remains
    pub fn more_content(&mut self) -> Result<bool, Error> {
        loop {
            match self.scanner.next() {
                Some(c) if c.is_whitespace() => {}
                Some(_) => {
                    self.scanner.back()?;
                    return Ok(true);
                }
                None => return Ok(false),
            }
        }
    }

    /// Get the next character that is not whitespace or a control character
    pub fn next_clean(&mut self) -> Option<char> {
        loop {
            match self.scanner.next() {
                Some(c) if c <= ' ' => {}
                other => return other,
            }
        }
    }

    /// Read up to and including the closing `quote`, processing backslash escapes
    pub fn next_string(&mut self, quote: char) -> Result<String, Error> {
        let mut out = String::new();
        loop {
            match self.scanner.next() {
                None | Some('\n') | Some('\r') => {
                    return Err(self.syntax_error("unterminated string"));
                }
                Some('\\') => match self.scanner.next() {
                    Some('b') => out.push('\u{8}'),
                    Some('t') => out.push('\t'),
                    Some('n') => out.push('\n'),
                    Some('f') => out.push('\u{c}'),
                    Some('r') => out.push('\r'),
                    Some('u') => out.push(self.next_unicode_escape()?),
                    Some(c @ ('"' | '\'' | '\\' | '/')) => out.push(c),
                    _ => return Err(self.syntax_error("illegal escape")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    fn next_unicode_escape(&mut self) -> Result<char, Error> {
        let hex = self.scanner.next_n(4)?;
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.syntax_error(format!("illegal unicode escape '\\u{}'", hex)))
    }

    /// Read up to a delimiter, a line break, or the end of input
    ///
    /// The delimiter is left unconsumed and the result is trimmed.
    pub fn next_to(&mut self, delimiters: &str) -> Result<String, Error> {
        let mut out = String::new();
        loop {
            match self.scanner.next() {
                None => return Ok(out.trim().to_string()),
                Some(c) if delimiters.contains(c) || c == '\n' || c == '\r' => {
                    self.scanner.back()?;
                    return Ok(out.trim().to_string());
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// Read the body of a CDATA block, consuming the closing `]]>`
    pub fn next_cdata(&mut self) -> Result<String, Error> {
        let start = self.scanner.offset();
        loop {
            if self.scanner.next().is_none() {
                return Err(self.syntax_error("unclosed CDATA"));
            }
            if let Some(body) = self.scanner.consumed_since(start).strip_suffix("]]>") {
                return Ok(body.to_string());
            }
        }
    }

    /// Get the next outer token, skipping leading whitespace
    ///
    /// Returns `None` if only whitespace remained.
    pub fn next_content(&mut self) -> Result<Option<Content>, Error> {
        let mut c = loop {
            match self.scanner.next() {
                Some(c) if c.is_whitespace() => {}
                Some(c) => break c,
                None => return Ok(None),
            }
        };
        if c == '<' {
            return Ok(Some(Content::Lt));
        }

        let mut text = String::new();
        loop {
            if c == '&' {
                self.next_entity(&mut text)?;
            } else {
                text.push(c);
            }
            match self.scanner.next() {
                None => break,
                Some('<') => {
                    self.scanner.back()?;
                    break;
                }
                Some(next) => c = next,
            }
        }
        Ok(Some(Content::Text(text.trim().to_string())))
    }

    /// Read an entity reference after its `&` and append the decoded text
    ///
    /// The name is lowercased before lookup; names outside the entity table
    /// are appended as `&name;` in that lowercased form.
    pub fn next_entity(&mut self, out: &mut String) -> Result<(), Error> {
        let mut name = String::new();
        loop {
            match self.scanner.next() {
                Some(c) if c.is_alphanumeric() || c == '#' => name.push(c),
                Some(';') => break,
                _ => {
                    return Err(self.syntax_error(format!("missing ';' in entity: &{}", name)));
                }
            }
        }
        let name = name.to_lowercase();
        match decode_entity(&name) {
            Some(c) => out.push(c),
            None => {
                out.push('&');
                out.push_str(&name);
                out.push(';');
            }
        }
        Ok(())
    }

    /// Get the next meta token, used to skip `<!...>` and `<?...?>` constructs
    pub fn next_meta(&mut self) -> Result<Meta, Error> {
        let c = loop {
            match self.scanner.next() {
                Some(c) if c.is_whitespace() => {}
                Some(c) => break c,
                None => return Err(self.syntax_error("misshaped meta tag")),
            }
        };
        match c {
            '<' => Ok(Meta::Lt),
            '>' => Ok(Meta::Gt),
            '/' => Ok(Meta::Slash),
            '=' => Ok(Meta::Eq),
            '!' => Ok(Meta::Bang),
            '?' => Ok(Meta::Quest),
            '"' | '\'' => {
                let quote = c;
                loop {
                    match self.scanner.next() {
                        None => return Err(self.syntax_error("unterminated string")),
                        Some(c) if c == quote => return Ok(Meta::Literal),
                        Some(_) => {}
                    }
                }
            }
            _ => loop {
                match self.scanner.next() {
                    None => return Ok(Meta::Literal),
                    Some(c) if c.is_whitespace() => return Ok(Meta::Literal),
                    Some('<' | '>' | '/' | '=' | '!' | '?' | '"' | '\'') => {
                        self.scanner.back()?;
                        return Ok(Meta::Literal);
                    }
                    Some(_) => {}
                }
            },
        }
    }

    /// Get the next token inside a tag
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let c = loop {
            match self.scanner.next() {
                Some(c) if c.is_whitespace() => {}
                Some(c) => break c,
                None => return Err(self.syntax_error("misshaped element")),
            }
        };
        match c {
            '<' => Err(self.syntax_error("misplaced '<'")),
            '>' => Ok(Token::Gt),
            '/' => Ok(Token::Slash),
            '=' => Ok(Token::Eq),
            '!' => Ok(Token::Bang),
            '?' => Ok(Token::Quest),
            '"' | '\'' => {
                let quote = c;
                let mut value = String::new();
                loop {
                    match self.scanner.next() {
                        None => return Err(self.syntax_error("unterminated string")),
                        Some(c) if c == quote => return Ok(Token::Quoted(value)),
                        Some('&') => self.next_entity(&mut value)?,
                        Some(c) => value.push(c),
                    }
                }
            }
            _ => {
                let mut name = String::new();
                name.push(c);
                loop {
                    match self.scanner.next() {
                        None => return Ok(Token::Name(name)),
                        Some(c) if c.is_whitespace() => return Ok(Token::Name(name)),
                        Some('>' | '/' | '=' | '!' | '?' | '[' | ']') => {
                            self.scanner.back()?;
                            return Ok(Token::Name(name));
                        }
                        Some('<' | '"' | '\'') => {
                            return Err(self.syntax_error("bad character in a name"));
                        }
                        Some(c) => name.push(c),
                    }
                }
            }
        }
    }

    /// Consume input until `marker` has just been consumed
    ///
    /// Returns false, leaving the tokenizer at the end of input, if the
    /// marker never appears.
    pub fn skip_past(&mut self, marker: &str) -> bool {
        let start = self.scanner.offset();
        loop {
            if self.scanner.next().is_none() {
                return false;
            }
            if self.scanner.consumed_since(start).ends_with(marker) {
                return true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_next_content_lt_and_text() {
        let mut tok = Tokenizer::new("  <root>  hello world  </root>");
        assert_eq!(tok.next_content().unwrap(), Some(Content::Lt));
        assert_eq!(tok.next_token().unwrap(), Token::Name("root".into()));
        assert_eq!(tok.next_token().unwrap(), Token::Gt);
        assert_eq!(
            tok.next_content().unwrap(),
            Some(Content::Text("hello world".into()))
        );
        // the terminating '<' is pushed back
        assert_eq!(tok.next_content().unwrap(), Some(Content::Lt));
    }

    #[test]
    fn test_next_content_whitespace_only() {
        let mut tok = Tokenizer::new(" \n\t ");
        assert_eq!(tok.next_content().unwrap(), None);
    }

    #[test]
    fn test_next_content_decodes_entities() {
        let mut tok = Tokenizer::new("a &lt;b&gt; c &custom; d</x>");
        assert_eq!(
            tok.next_content().unwrap(),
            Some(Content::Text("a <b> c &custom; d".into()))
        );
    }

    #[test]
    fn test_unknown_entities_are_lowercased() {
        let mut tok = Tokenizer::new("&NBSP; &Custom; &LT; &#65; &#X41;<");
        assert_eq!(
            tok.next_content().unwrap(),
            Some(Content::Text("&nbsp; &custom; < &#65; &#x41;".into()))
        );
    }

    #[test]
    fn test_entity_missing_semicolon() {
        let mut tok = Tokenizer::new("fish & chips<");
        let err = tok.next_content().unwrap_err();
        assert!(err.to_string().starts_with("missing ';' in entity"));
    }

    #[test]
    fn test_next_token_kinds() {
        let mut tok = Tokenizer::new(r#"a b="x &amp; y" c='1'/>"#);
        assert_eq!(tok.next_token().unwrap(), Token::Name("a".into()));
        assert_eq!(tok.next_token().unwrap(), Token::Name("b".into()));
        assert_eq!(tok.next_token().unwrap(), Token::Eq);
        assert_eq!(tok.next_token().unwrap(), Token::Quoted("x & y".into()));
        assert_eq!(tok.next_token().unwrap(), Token::Name("c".into()));
        assert_eq!(tok.next_token().unwrap(), Token::Eq);
        assert_eq!(tok.next_token().unwrap(), Token::Quoted("1".into()));
        assert_eq!(tok.next_token().unwrap(), Token::Slash);
        assert_eq!(tok.next_token().unwrap(), Token::Gt);
    }

    #[test]
    fn test_next_token_quoted_keeps_backslashes() {
        let mut tok = Tokenizer::new(r#""a\nb""#);
        assert_eq!(tok.next_token().unwrap(), Token::Quoted(r"a\nb".into()));
    }

    #[rstest]
    #[case("ab<c", "bad character in a name")]
    #[case("ab\"c", "bad character in a name")]
    #[case("<", "misplaced '<'")]
    #[case("   ", "misshaped element")]
    #[case("\"open", "unterminated string")]
    fn test_next_token_errors(#[case] input: &str, #[case] message: &str) {
        let mut tok = Tokenizer::new(input);
        let err = tok.next_token().unwrap_err();
        assert!(err.to_string().starts_with(message), "{}", err);
    }

    #[test]
    fn test_name_stops_at_bracket() {
        let mut tok = Tokenizer::new("CDATA[x");
        assert_eq!(tok.next_token().unwrap(), Token::Name("CDATA".into()));
        assert_eq!(tok.next(), Some('['));
    }

    #[test]
    fn test_next_string_escapes() {
        let mut tok = Tokenizer::new(r#"a\tb\"cA\/"rest"#);
        assert_eq!(tok.next_string('"').unwrap(), "a\tb\"cA/");
        assert_eq!(tok.next(), Some('r'));
    }

    #[rstest]
    #[case(r#"\u0041""#, "A")]
    #[case(r#"x\u00e9y""#, "x\u{e9}y")]
    #[case(r#"\u263A!""#, "\u{263a}!")]
    fn test_next_string_unicode_escapes(#[case] input: &str, #[case] expected: &str) {
        let mut tok = Tokenizer::new(input);
        assert_eq!(tok.next_string('"').unwrap(), expected);
        assert_eq!(tok.next(), None);
    }

    #[rstest]
    #[case("abc")]
    #[case("ab\ncd\"")]
    #[case(r#"a\qb""#)]
    #[case(r#"\u00G1""#)]
    fn test_next_string_errors(#[case] input: &str) {
        let mut tok = Tokenizer::new(input);
        assert!(tok.next_string('"').is_err());
    }

    #[test]
    fn test_next_to() {
        let mut tok = Tokenizer::new("  key = value\nnext");
        assert_eq!(tok.next_to("=").unwrap(), "key");
        assert_eq!(tok.next(), Some('='));
        assert_eq!(tok.next_to("=").unwrap(), "value");
        assert_eq!(tok.next(), Some('\n'));
        assert_eq!(tok.next_to(";").unwrap(), "next");
    }

    #[test]
    fn test_next_cdata() {
        let mut tok = Tokenizer::new("<raw & ]] unparsed>]]>tail");
        assert_eq!(tok.next_cdata().unwrap(), "<raw & ]] unparsed>");
        assert_eq!(tok.next(), Some('t'));
    }

    #[test]
    fn test_next_cdata_unclosed() {
        let mut tok = Tokenizer::new("never closed ]]");
        assert!(tok.next_cdata().is_err());
    }

    #[test]
    fn test_next_meta() {
        let mut tok = Tokenizer::new(r#"DOCTYPE html "x>y" [<!ENTITY>]>"#);
        let mut seen = Vec::new();
        for _ in 0..8 {
            seen.push(tok.next_meta().unwrap());
        }
        assert_eq!(
            seen,
            vec![
                Meta::Literal,
                Meta::Literal,
                Meta::Literal,
                Meta::Literal,
                Meta::Lt,
                Meta::Bang,
                Meta::Literal,
                Meta::Gt,
            ]
        );
    }

    #[test]
    fn test_next_meta_eof() {
        let mut tok = Tokenizer::new("  ");
        assert!(tok.next_meta().is_err());
    }

    #[test]
    fn test_skip_past() {
        let mut tok = Tokenizer::new(" a comment -- still -->rest");
        assert!(tok.skip_past("-->"));
        assert_eq!(tok.next(), Some('r'));

        let mut tok = Tokenizer::new("no end here");
        assert!(!tok.skip_past("?>"));
        assert_eq!(tok.next(), None);
    }

    #[test]
    fn test_skip_past_ignores_earlier_input() {
        let mut tok = Tokenizer::new("--x>");
        tok.next();
        tok.next();
        assert!(!tok.skip_past("-->"));
    }

    #[test]
    fn test_next_clean() {
        let mut tok = Tokenizer::new(" \t\r\n x");
        assert_eq!(tok.next_clean(), Some('x'));
        assert_eq!(tok.next_clean(), None);
    }

    #[test]
    fn test_more_content() {
        let mut tok = Tokenizer::new("  \n <a/>");
        assert!(tok.more_content().unwrap());
        assert_eq!(tok.next(), Some('<'));

        let mut tok = Tokenizer::new("  \n ");
        assert!(!tok.more_content().unwrap());
    }

    #[test]
    fn test_error_position() {
        let mut tok = Tokenizer::new("\nab<");
        let err = tok.next_token().unwrap_err();
        let pos = err.position().unwrap();
        assert_eq!(pos.line, 2);
        assert_eq!(pos.index, 4);
        assert_eq!(pos.column, 3);
    }
}
