//! Error types
//!
//! Parse failures carry the tokenizer [`Position`] at the point of detection.
//! Misuse of the tree API is reported through [`TreeError`]; when the parser
//! trips over one it is wrapped together with the current position.

use std::fmt;
use thiserror::Error;

/// Location of the tokenizer when an error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Number of characters consumed so far
    pub index: usize,
    /// 1-based line number
    pub line: usize,
    /// Characters consumed on the current line
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            index: 0,
            line: 1,
            column: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " at {} [character {} line {}]",
            self.index, self.column, self.line
        )
    }
}

/// Broad classification of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed characters: strings, escapes, entities, names, unterminated blocks
    Lexical,
    /// Malformed tree shape: tag mismatches, text/children conflicts, missing values
    Structural,
    /// A name or required field that fails validation
    Validation,
    /// The source could not be read
    Io,
}

/// Misuse of the node tree API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("invalid name '{0}'")]
    InvalidName(String),
    #[error("node '{0}' has children and cannot hold text")]
    TextWithChildren(String),
    #[error("node '{0}' has text and cannot hold children")]
    ChildWithText(String),
    #[error("self-closing node '{0}' cannot hold children")]
    ChildOfSelfClosing(String),
    #[error("self-closing node '{0}' cannot hold text")]
    TextOnSelfClosing(String),
    #[error("node '{0}' has a body and cannot be self-closing")]
    SelfClosingWithBody(String),
}

impl TreeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TreeError::InvalidName(_) => ErrorKind::Validation,
            _ => ErrorKind::Structural,
        }
    }
}

/// Parse error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Lexical failure reported by the tokenizer
    #[error("{message}{position}")]
    Syntax { message: String, position: Position },

    /// Well-formed tokens in an ill-formed arrangement
    #[error("{message}{position}")]
    Structure { message: String, position: Position },

    /// A closing tag that does not match the open element
    #[error("mismatched tag: expected '{expected}' but found '{found}'{position}")]
    MismatchedTag {
        expected: String,
        found: String,
        position: Position,
    },

    /// Input ended inside an element
    #[error("unexpected end of input{position}")]
    UnexpectedEnd { position: Position },

    /// The tree rejected a node, attribute, or text produced by the parser
    #[error("{source}{position}")]
    Tree { source: TreeError, position: Position },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax { .. } => ErrorKind::Lexical,
            Error::Structure { .. } | Error::MismatchedTag { .. } | Error::UnexpectedEnd { .. } => {
                ErrorKind::Structural
            }
            Error::Tree { source, .. } => source.kind(),
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Where the error was detected, if it came from the tokenizer
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Syntax { position, .. }
            | Error::Structure { position, .. }
            | Error::MismatchedTag { position, .. }
            | Error::UnexpectedEnd { position }
            | Error::Tree { position, .. } => Some(*position),
            Error::Io(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
