//! Error types for KFF parsing, writing and path resolution.
//!
//! This module provides comprehensive error reporting with enough positional
//! context to locate the offending text or path segment.
//!
//! ## Error Categories
//!
//! - **Parse Errors**: Malformed input, with document name and line/column
//! - **End of Input**: Input ended before a construct was complete
//! - **Name Errors**: An identifier violates `[A-Za-z_][A-Za-z0-9_]*`
//! - **Presence Errors**: A tag or index required by a path is absent
//! - **Read/Write Errors**: A node's kind or type is incompatible with the operation
//! - **Type Mismatches**: A list element disagrees with the list's element type
//!
//! ## Examples
//!
//! ```rust
//! use serde_kff::{from_str, Error};
//!
//! let result = from_str("settings.kff", "Health = 50");
//! assert!(matches!(result, Err(Error::UnexpectedEof { .. })));
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//! }
//! ```

use crate::value::DataType;
use std::fmt;
use thiserror::Error;

/// A position inside a named document, used by parse diagnostics.
///
/// Lines and columns are 1-based. Columns count characters, not bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePosition {
    pub document: String,
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    /// Computes the line and column of byte `offset` inside `text`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::error::SourcePosition;
    ///
    /// let pos = SourcePosition::locate("doc", "A = 1;\nB = x;", 11);
    /// assert_eq!((pos.line, pos.column), (2, 5));
    /// ```
    pub fn locate(document: &str, text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        SourcePosition {
            document: document.to_string(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' line {}, column {}",
            self.document, self.line, self.column
        )
    }
}

fn describe_at(at: &Option<SourcePosition>) -> String {
    at.as_ref()
        .map(|pos| format!(" ({})", pos))
        .unwrap_or_default()
}

/// Represents all possible errors raised by this crate.
///
/// None of them are retried internally; each one is terminal for the call that raised it.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed input
    #[error("Parse error in '{document}' at line {line}, column {column}: {msg}")]
    Parse {
        document: String,
        line: usize,
        column: usize,
        msg: String,
    },

    /// Input ended before the current construct was complete
    #[error("Unexpected end of input in '{document}' at line {line}, column {column}\nExpected: {expected}")]
    UnexpectedEof {
        document: String,
        line: usize,
        column: usize,
        expected: String,
    },

    /// Identifier does not match `[A-Za-z_][A-Za-z0-9_]*`
    #[error("Invalid name '{name}': {reason}")]
    Name { name: String, reason: String },

    /// A tag or index required by an operation is absent
    #[error("Not found at segment {position} of path '{path}': {msg}")]
    Presence {
        path: String,
        position: usize,
        msg: String,
    },

    /// The node reached is structurally incompatible with the operation
    #[error("Cannot access '{path}': {msg}")]
    ReadWrite { path: String, msg: String },

    /// List element type disagrees with the list's established type
    #[error("List type mismatch: expected {expected}, found {found}{}", describe_at(.at))]
    TypeMismatch {
        expected: DataType,
        found: DataType,
        at: Option<SourcePosition>,
    },

    /// Malformed path string
    #[error("Invalid path '{path}': {msg}")]
    InvalidPath { path: String, msg: String },

    /// `List::add` was called without payloads
    #[error("Cannot add an empty batch of payloads to a list")]
    EmptyAppend,

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error at byte `offset` of `text`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::Error;
    ///
    /// let err = Error::parse("doc", "A = ?;", 4, "unexpected character '?'");
    /// assert!(err.to_string().contains("column 5"));
    /// ```
    pub fn parse(document: &str, text: &str, offset: usize, msg: &str) -> Self {
        let pos = SourcePosition::locate(document, text, offset);
        Error::Parse {
            document: pos.document,
            line: pos.line,
            column: pos.column,
            msg: msg.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error at byte `offset` of `text`.
    pub fn unexpected_eof(document: &str, text: &str, offset: usize, expected: &str) -> Self {
        let pos = SourcePosition::locate(document, text, offset);
        Error::UnexpectedEof {
            document: pos.document,
            line: pos.line,
            column: pos.column,
            expected: expected.to_string(),
        }
    }

    /// Creates a name error for an identifier that breaks the naming rules.
    pub fn name(name: &str, reason: &str) -> Self {
        Error::Name {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a presence error for segment `position` of `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kff::Error;
    ///
    /// let err = Error::presence("A.B", 1, "no tag named 'B'");
    /// assert!(err.to_string().contains("segment 1"));
    /// ```
    pub fn presence(path: &str, position: usize, msg: &str) -> Self {
        Error::Presence {
            path: path.to_string(),
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates a read/write error for an operation on `path`.
    pub fn read_write(path: &str, msg: &str) -> Self {
        Error::ReadWrite {
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a list type mismatch error, optionally positioned in source text.
    pub fn type_mismatch(expected: DataType, found: DataType, at: Option<SourcePosition>) -> Self {
        Error::TypeMismatch {
            expected,
            found,
            at,
        }
    }

    /// Creates an invalid path error.
    pub fn invalid_path(path: &str, msg: &str) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for malformed-input errors, including truncated input.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::UnexpectedEof { .. })
    }

    /// Returns `true` if the input ended before a construct was complete.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::UnexpectedEof { .. })
    }

    /// Returns the `(line, column)` of errors raised while reading text.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Parse { line, column, .. } | Error::UnexpectedEof { line, column, .. } => {
                Some((*line, *column))
            }
            Error::TypeMismatch { at: Some(at), .. } => Some((at.line, at.column)),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
