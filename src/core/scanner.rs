//! Character cursor over an in-memory source
//!
//! Hands out one character at a time with a single slot of pushback and
//! tracks the character index, line and column for diagnostics. The whole
//! source is held as a `&str`, so stepping back or rewinding is a cursor
//! restore rather than a reader reset.

use crate::error::{Error, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    /// Byte offset into the input
    pos: usize,
    /// Characters consumed
    index: usize,
    line: usize,
    column: usize,
    /// Last character consumed, used to fold `\r\n` into one line break
    previous: Option<char>,
}

impl Cursor {
    fn start() -> Self {
        Cursor {
            pos: 0,
            index: 0,
            line: 1,
            column: 0,
            previous: None,
        }
    }
}

/// Scanner with one character of pushback
pub struct Scanner<'a> {
    input: &'a str,
    cursor: Cursor,
    /// Cursor before the last `next()`; `back()` may use it once
    saved: Option<Cursor>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    pub fn new(input: &'a str) -> Self {
        Scanner {
            input,
            cursor: Cursor::start(),
            saved: None,
        }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> Position {
        Position {
            index: self.cursor.index,
            line: self.cursor.line,
            column: self.cursor.column,
        }
    }

    /// Get the unconsumed input
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor.pos..]
    }

    /// Get the input consumed since byte offset `start`
    #[inline]
    pub fn consumed_since(&self, start: usize) -> &'a str {
        &self.input[start..self.cursor.pos]
    }

    /// Byte offset of the cursor
    #[inline]
    pub fn offset(&self) -> usize {
        self.cursor.pos
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cursor.pos >= self.input.len()
    }

    /// Consume the next character, or `None` at the end of input
    pub fn next(&mut self) -> Option<char> {
        let before = self.cursor;
        self.saved = Some(before);

        let c = self.remaining().chars().next()?;
        let cursor = &mut self.cursor;
        cursor.pos += c.len_utf8();
        cursor.index += 1;
        match c {
            '\r' => {
                cursor.line += 1;
                cursor.column = 0;
            }
            '\n' if before.previous == Some('\r') => cursor.column = 0,
            '\n' => {
                cursor.line += 1;
                cursor.column = 0;
            }
            _ => cursor.column += 1,
        }
        cursor.previous = Some(c);
        Some(c)
    }

    /// Un-consume the last character
    ///
    /// Only one step of pushback is kept: calling this twice without an
    /// intervening `next()`, or before anything was read, is an error.
    pub fn back(&mut self) -> Result<(), Error> {
        match self.saved.take() {
            Some(cursor) => {
                self.cursor = cursor;
                Ok(())
            }
            None => Err(self.syntax_error("stepping back two steps is not supported")),
        }
    }

    /// Test for remaining input without consuming it
    pub fn more(&mut self) -> Result<bool, Error> {
        if self.next().is_none() {
            return Ok(false);
        }
        self.back()?;
        Ok(true)
    }

    /// Consume exactly `n` characters
    pub fn next_n(&mut self, n: usize) -> Result<String, Error> {
        let mut out = String::with_capacity(n);
        for _ in 0..n {
            match self.next() {
                Some(c) => out.push(c),
                None => return Err(self.syntax_error("substring bounds error")),
            }
        }
        Ok(out)
    }

    /// Move forward so that the next character read is `target`
    ///
    /// If `target` never occurs, the scanner is left exactly where it was and
    /// `None` is returned.
    pub fn skip_to(&mut self, target: char) -> Option<char> {
        let start = self.cursor;
        let saved = self.saved;
        loop {
            let before = self.cursor;
            match self.next() {
                Some(c) if c == target => {
                    self.cursor = before;
                    self.saved = None;
                    return Some(c);
                }
                Some(_) => {}
                None => {
                    self.cursor = start;
                    self.saved = saved;
                    return None;
                }
            }
        }
    }

    /// Build a lexical error at the current position
    pub fn syntax_error(&self, message: impl Into<String>) -> Error {
        Error::Syntax {
            message: message.into(),
            position: self.position(),
        }
    }

    /// Build a structural error at the current position
    pub fn structure_error(&self, message: impl Into<String>) -> Error {
        Error::Structure {
            message: message.into(),
            position: self.position(),
        }
    }
}
