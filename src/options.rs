//! Parse and serialize configuration

/// Spaces per nesting level when no width is given
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Deepest element nesting the parser accepts by default
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum element nesting depth; deeper input is rejected
    pub max_depth: usize,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Options for serializing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Spaces per nesting level; 0 writes everything on one line
    pub indent_width: usize,
}

impl SerializeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output with no indentation
    pub fn compact() -> Self {
        SerializeOptions { indent_width: 0 }
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}
