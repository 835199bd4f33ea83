//! Error handling and diagnostics for the Cobalt lexer
//!
//! The lexer itself never returns errors: malformed input comes back as an
//! error-kind token. This module turns such tokens into owned error values
//! with a human-readable location, and holds the error type for tools built
//! on the lexer.

use crate::lexer::{Span, Token};
use std::fmt;
use std::path::PathBuf;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for Cobalt tooling
pub type CobaltResult<T> = Result<T, CobaltError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in bytes)
    pub column: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            filename,
        }
    }

    /// Create a source location without a filename
    pub fn at(line: usize, column: usize) -> Self {
        Self::new(line, column, None)
    }

    /// Resolve a byte offset into a line and column.
    ///
    /// Offsets past the end of `source` resolve to the position just after
    /// the last byte.
    pub fn from_offset(source: &str, offset: usize, filename: Option<&str>) -> Self {
        let before = &source.as_bytes()[..offset.min(source.len())];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |newline| newline + 1);
        Self::new(line, before.len() - line_start + 1, filename.map(str::to_string))
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Classes of malformed input the lexer reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// A character no token can start with
    UnexpectedCharacter,
    /// A numeric literal that does not fit its representation
    NumericOverflow,
    /// A `/*` with no closing `*/`
    UnterminatedBlockComment,
}

impl LexErrorKind {
    pub fn describe(&self, lexeme: &str) -> String {
        match self {
            Self::UnexpectedCharacter => format!("Unexpected character {:?}", lexeme),
            Self::NumericOverflow => format!("Numeric literal '{}' is out of range", lexeme),
            Self::UnterminatedBlockComment => "Unterminated block comment".to_string(),
        }
    }
}

/// A lexical error lifted out of an error-kind token
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Lexer Error: {message} at {location}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub span: Span,
    pub location: SourceLocation,
}

impl LexError {
    /// Build an error from a token, `None` if the token is not an error
    pub fn from_token(token: &Token<'_>, source: &str, filename: Option<&str>) -> Option<Self> {
        let kind = token.kind.error_kind()?;
        Some(Self {
            kind,
            message: kind.describe(token.text),
            span: token.span,
            location: SourceLocation::from_offset(source, token.span.start, filename),
        })
    }
}

/// Main error type for Cobalt tooling
#[derive(Debug, thiserror::Error)]
pub enum CobaltError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Failed to read file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
