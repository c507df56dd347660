//! Error types for cml

use std::fmt;
use thiserror::Error;

/// Position in source text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: usize, col: usize) -> Self {
        Self { offset, line, col }
    }
}

/// Every way a document can be rejected. All of them abort the parse.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("mismatched closing tag: expected [/{expected}], found [/{found}]")]
    MismatchedClosingTag { expected: String, found: String },

    #[error("missing closing tag for [{name}]")]
    UnclosedOpeningTag { name: String },

    #[error("closing tag [/{found}] without a matching opening tag")]
    UnexpectedClosingTag { found: String },

    #[error("corrupt opening tag: no ']' before end of line")]
    CorruptOpeningTag,

    #[error("corrupt closing tag: no ']' before end of line")]
    CorruptClosingTag,

    #[error("invalid tag name: {name:?}")]
    InvalidTagName { name: String },

    #[error("expected '=' after key {key}")]
    MissingSeparator { key: String },

    #[error("unclosed quote in value of {key}")]
    UnclosedQuote { key: String },

    #[error("line-end expected, found trailing characters")]
    TrailingGarbage,

    #[error("malformed line")]
    MalformedLine,

    #[error("max depth exceeded: {max}")]
    MaxDepthExceeded { max: usize },

    #[error("max size exceeded: {max}")]
    MaxSizeExceeded { max: usize },
}

/// A rejected document: what went wrong and where.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{pos}: {kind}")]
pub struct Error {
    kind: ErrorKind,
    pos: Pos,
}

impl Error {
    pub const fn new(kind: ErrorKind, pos: Pos) -> Self {
        Self { kind, pos }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub const fn pos(&self) -> Pos {
        self.pos
    }

    /// 1-based line the error was detected on
    pub const fn line(&self) -> usize {
        self.pos.line
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }
}

/// Result type alias for cml
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_display() {
        let pos = Pos::new(42, 10, 5);
        assert_eq!(pos.to_string(), "line 10, column 5");
    }

    #[test]
    fn test_error_display() {
        let err = Error::new(
            ErrorKind::MismatchedClosingTag {
                expected: "a".to_string(),
                found: "b".to_string(),
            },
            Pos::new(4, 2, 1),
        );
        let display = err.to_string();
        assert!(display.starts_with("line 2, column 1"));
        assert!(display.contains("expected [/a], found [/b]"));
    }

    #[test]
    fn test_error_accessors() {
        let err = Error::new(ErrorKind::MalformedLine, Pos::new(0, 3, 7));
        assert_eq!(err.line(), 3);
        assert_eq!(err.pos().col, 7);
        assert_eq!(err.into_kind(), ErrorKind::MalformedLine);
    }
}
