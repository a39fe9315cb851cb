//! Parser building a [`Document`] from a [`Tokenizer`]
//!
//! [`Parser::parse_element`] reads a whole element. The element being filled
//! is the current parent for [`Parser::parse_body`], which stops at the next
//! start or end tag; its open ancestors wait on a stack until their end tags
//! arrive and are checked against their names.

use crate::core::tokenizer::{Content, Meta, Token, Tokenizer};
use crate::dom::{Container, Document, Node};
use crate::error::{Error, Result, TreeError};
use crate::options::ParseOptions;
use tracing::{debug, trace};

/// What followed a `<`
enum Markup {
    /// Start tag with this name; attributes not read yet
    Open(String),
    /// Complete closing tag
    Close(String),
    /// CDATA body
    Cdata(String),
    /// Comment, processing instruction, or declaration
    Skipped,
}

/// Tag that ended a run of element content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Start tag name; attributes not read yet
    Open(String),
    /// Closing tag name, not yet checked against the open element
    Close(String),
}

/// Parser over a single input
pub struct Parser<'a> {
    tok: Tokenizer<'a>,
    options: ParseOptions,
    input_len: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Parser {
            tok: Tokenizer::new(input),
            options,
            input_len: input.len(),
        }
    }

    /// Parse every top-level node until the input is exhausted
    pub fn parse_document(mut self) -> Result<Document> {
        let mut doc = Document::new();
        while let Some(node) = self.parse_node()? {
            doc.push(node);
        }
        debug!(nodes = doc.len(), bytes = self.input_len, "parsed document");
        Ok(doc)
    }

    /// Parse the next top-level node
    ///
    /// Comments, processing instructions, and declarations before the node are
    /// skipped. Returns `None` once only whitespace and skipped constructs
    /// remain.
    pub fn parse_node(&mut self) -> Result<Option<Node>> {
        loop {
            match self.tok.next_content()? {
                None => return Ok(None),
                Some(Content::Text(_)) => {
                    return Err(self.tok.structure_error("text outside of an element"));
                }
                Some(Content::Lt) => match self.next_markup()? {
                    Markup::Skipped => {}
                    Markup::Open(name) => return self.parse_element(name, 1).map(Some),
                    Markup::Cdata(_) => {
                        return Err(self.tok.structure_error("CDATA outside of an element"));
                    }
                    Markup::Close(name) => {
                        return Err(self
                            .tok
                            .structure_error(format!("closing tag '{}' without an open element", name)));
                    }
                },
            }
        }
    }

    /// Parse an element whose `<name` has just been read, subtree included
    ///
    /// `depth` is 1 for a top-level element. Open ancestors are kept on an
    /// explicit stack, so nesting never grows the call stack.
    pub fn parse_element(&mut self, name: String, depth: usize) -> Result<Node> {
        let (mut current, closed) = self.parse_start_tag(name, depth)?;
        if closed {
            return Ok(current);
        }

        let mut ancestors: Vec<Node> = Vec::new();
        loop {
            match self.parse_body(&mut current)? {
                Tag::Open(name) => {
                    if current.has_text() {
                        return Err(self.tree_error(TreeError::ChildWithText(current.name().to_string())));
                    }
                    let (child, closed) = self.parse_start_tag(name, depth + ancestors.len() + 1)?;
                    if closed {
                        current.add(child).map_err(|e| self.tree_error(e))?;
                    } else {
                        ancestors.push(std::mem::replace(&mut current, child));
                    }
                }
                Tag::Close(name) => {
                    if name != current.name() {
                        return Err(Error::MismatchedTag {
                            expected: current.name().to_string(),
                            found: name,
                            position: self.tok.position(),
                        });
                    }
                    trace!(name = current.name(), "close element");
                    let Some(parent) = ancestors.pop() else {
                        return Ok(current);
                    };
                    let finished = std::mem::replace(&mut current, parent);
                    current.add(finished).map_err(|e| self.tree_error(e))?;
                }
            }
        }
    }

    /// Read attributes up to the end of a start tag
    ///
    /// Returns the new node and whether the tag was self-closing.
    fn parse_start_tag(&mut self, name: String, depth: usize) -> Result<(Node, bool)> {
        if depth > self.options.max_depth {
            return Err(self.tok.structure_error("nesting too deep"));
        }
        let mut node = Node::new(name).map_err(|e| self.tree_error(e))?;
        trace!(name = node.name(), depth, "open element");

        let mut token = self.tok.next_token()?;
        while let Token::Name(attr) = token {
            token = self.tok.next_token()?;
            let value = if token == Token::Eq {
                let value = match self.tok.next_token()? {
                    Token::Quoted(value) | Token::Name(value) => value,
                    _ => {
                        return Err(self
                            .tok
                            .structure_error(format!("missing value for attribute '{}'", attr)));
                    }
                };
                token = self.tok.next_token()?;
                value
            } else {
                String::new()
            };
            node.set_attribute(attr, value).map_err(|e| self.tree_error(e))?;
        }

        match token {
            Token::Slash => {
                if self.tok.next_token()? != Token::Gt {
                    return Err(self.tok.syntax_error("misshaped tag"));
                }
                node.set_self_closing(true).map_err(|e| self.tree_error(e))?;
                trace!(name = node.name(), "self-closing element");
                Ok((node, true))
            }
            Token::Gt => Ok((node, false)),
            _ => Err(self.tok.syntax_error("misshaped tag")),
        }
    }

    /// Read text and CDATA into `parent` up to the next start or end tag
    ///
    /// The tag is returned unchecked; comments and declarations in between
    /// are skipped.
    pub fn parse_body(&mut self, parent: &mut Node) -> Result<Tag> {
        loop {
            match self.tok.next_content()? {
                None => {
                    return Err(Error::UnexpectedEnd {
                        position: self.tok.position(),
                    });
                }
                Some(Content::Text(text)) => {
                    parent.push_text(&text).map_err(|e| self.tree_error(e))?;
                }
                Some(Content::Lt) => match self.next_markup()? {
                    Markup::Skipped => {}
                    Markup::Cdata(text) => {
                        parent.push_text(&text).map_err(|e| self.tree_error(e))?;
                    }
                    Markup::Close(name) => return Ok(Tag::Close(name)),
                    Markup::Open(name) => return Ok(Tag::Open(name)),
                },
            }
        }
    }

    /// Classify the markup after a `<`
    fn next_markup(&mut self) -> Result<Markup> {
        match self.tok.next_token()? {
            Token::Name(name) => Ok(Markup::Open(name)),
            Token::Slash => {
                let Token::Name(name) = self.tok.next_token()? else {
                    return Err(self.tok.syntax_error("misshaped close tag"));
                };
                if self.tok.next_token()? != Token::Gt {
                    return Err(self.tok.syntax_error("misshaped close tag"));
                }
                Ok(Markup::Close(name))
            }
            Token::Quest => {
                if !self.tok.skip_past("?>") {
                    return Err(self.tok.syntax_error("unterminated processing instruction"));
                }
                trace!("skipped processing instruction");
                Ok(Markup::Skipped)
            }
            Token::Bang => self.next_bang(),
            _ => Err(self.tok.syntax_error("misshaped tag")),
        }
    }

    /// Handle `<!`: comment, CDATA, or a declaration to skip
    fn next_bang(&mut self) -> Result<Markup> {
        match self.tok.next() {
            None => return Err(self.tok.syntax_error("misshaped meta tag")),
            Some('-') => {
                if self.tok.next() == Some('-') {
                    if !self.tok.skip_past("-->") {
                        return Err(self.tok.syntax_error("unterminated comment"));
                    }
                    trace!("skipped comment");
                    return Ok(Markup::Skipped);
                }
                self.tok.back()?;
            }
            Some('[') => {
                let is_cdata = matches!(self.tok.next_token()?, Token::Name(ref n) if n == "CDATA")
                    && self.tok.next() == Some('[');
                if !is_cdata {
                    return Err(self.tok.syntax_error("expected 'CDATA['"));
                }
                return Ok(Markup::Cdata(self.tok.next_cdata()?));
            }
            Some(_) => self.tok.back()?,
        }

        let mut depth = 1usize;
        while depth > 0 {
            match self.tok.next_meta()? {
                Meta::Lt => depth += 1,
                Meta::Gt => depth -= 1,
                _ => {}
            }
        }
        trace!("skipped declaration");
        Ok(Markup::Skipped)
    }

    fn tree_error(&self, source: TreeError) -> Error {
        Error::Tree {
            source,
            position: self.tok.position(),
        }
    }
}
