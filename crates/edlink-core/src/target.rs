//! Decoded file location produced by the URI parser

use std::fmt;

/// A file path plus optional 1-based line number, decoded from an `editor:` URI.
///
/// Once `line` is populated, `path` no longer carries the `:line` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTarget {
    /// Percent-decoded file path
    pub path: String,
    /// Line number, if the URI carried one
    pub line: Option<u32>,
}

impl DecodedTarget {
    pub fn new(path: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Editor arguments shared by the vi/emacs families: `[+<line>, path]`.
    ///
    /// The `+<line>` argument is omitted when there is no line number.
    pub fn line_args(&self) -> Vec<String> {
        match self.line {
            Some(line) => vec![format!("+{}", line), self.path.clone()],
            None => vec![self.path.clone()],
        }
    }
}

impl fmt::Display for DecodedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}
