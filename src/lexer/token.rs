//! Token definitions for the Cobalt language
//!
//! This module defines the token kinds produced by lexical analysis, the
//! span type tying each token back to the source buffer, and the semantic
//! values carried by identifiers and numeric literals.

use crate::error::LexErrorKind;
use std::fmt;
use std::ops::Range;

/// A byte range in the source buffer: `start` offset plus `len` bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Span covering `start..end`
    pub fn between(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, len: end - start }
    }

    /// Offset one past the last byte
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// A token in the Cobalt language
///
/// `text` borrows from the source buffer the token was scanned from, so a
/// token can never outlive that buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    /// Create a new token
    pub fn new(kind: TokenKind, span: Span, text: &'src str) -> Self {
        Self { kind, span, text }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }
}

/// Token kinds in the Cobalt language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    EndOfLine,               // \n
    ParameterListBegin,      // (
    ParameterListEnd,        // )
    FunctionBodyBegin,       // {
    FunctionBodyEnd,         // }
    PropertyBodyBegin,       // [
    PropertyBodyEnd,         // ]
    Equal,                   // =
    TypeConstraintSeparator, // :
    Separator,               // ,

    // Reserved words
    Return,
    Break,
    Continue,

    // Identifiers and literals
    Identifier,
    LiteralInt,
    LiteralFloat,

    // Sentinels
    EndOfFile,
    Unexpected,

    // Malformed input
    LiteralOutOfRange,
    UnterminatedComment,
}

/// Literal punctuation, tried top to bottom at the cursor.
///
/// No literal is a prefix of another, so the order only fixes tie-breaks.
pub const FIXED_TOKENS: [(&str, TokenKind); 10] = [
    ("\n", TokenKind::EndOfLine),
    ("(", TokenKind::ParameterListBegin),
    (")", TokenKind::ParameterListEnd),
    ("{", TokenKind::FunctionBodyBegin),
    ("}", TokenKind::FunctionBodyEnd),
    ("[", TokenKind::PropertyBodyBegin),
    ("]", TokenKind::PropertyBodyEnd),
    ("=", TokenKind::Equal),
    (":", TokenKind::TypeConstraintSeparator),
    (",", TokenKind::Separator),
];

impl TokenKind {
    /// Get the reserved-word kind for an identifier-shaped lexeme
    pub fn from_reserved(s: &str) -> Option<Self> {
        match s {
            "return" => Some(Self::Return),
            "break" => Some(Self::Break),
            "continue" => Some(Self::Continue),
            _ => None,
        }
    }

    /// The literal source text of a table-driven or reserved-word kind
    pub fn fixed_literal(&self) -> Option<&'static str> {
        match self {
            Self::Return => Some("return"),
            Self::Break => Some("break"),
            Self::Continue => Some("continue"),
            _ => FIXED_TOKENS
                .iter()
                .find(|(_, kind)| kind == self)
                .map(|(literal, _)| *literal),
        }
    }

    /// Map an error-token kind onto the error taxonomy
    pub fn error_kind(&self) -> Option<LexErrorKind> {
        match self {
            Self::Unexpected => Some(LexErrorKind::UnexpectedCharacter),
            Self::LiteralOutOfRange => Some(LexErrorKind::NumericOverflow),
            Self::UnterminatedComment => Some(LexErrorKind::UnterminatedBlockComment),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_kind().is_some()
    }

    /// Whether tokens of this kind publish a semantic value
    pub fn carries_value(&self) -> bool {
        matches!(self, Self::Identifier | Self::LiteralInt | Self::LiteralFloat)
    }

    /// Get string representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndOfLine => "end of line",
            Self::ParameterListBegin => "(",
            Self::ParameterListEnd => ")",
            Self::FunctionBodyBegin => "{",
            Self::FunctionBodyEnd => "}",
            Self::PropertyBodyBegin => "[",
            Self::PropertyBodyEnd => "]",
            Self::Equal => "=",
            Self::TypeConstraintSeparator => ":",
            Self::Separator => ",",
            Self::Return => "keyword 'return'",
            Self::Break => "keyword 'break'",
            Self::Continue => "keyword 'continue'",
            Self::Identifier => "identifier",
            Self::LiteralInt => "integer literal",
            Self::LiteralFloat => "float literal",
            Self::EndOfFile => "EOF",
            Self::Unexpected => "unexpected character",
            Self::LiteralOutOfRange => "out-of-range literal",
            Self::UnterminatedComment => "unterminated comment",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload published alongside identifier and numeric literal tokens
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SemanticValue {
    #[default]
    None,
    Str(String),
    Int(i64),
    Float(f64),
}

impl SemanticValue {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// A token bundled with the semantic value produced for it
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme<'src> {
    pub token: Token<'src>,
    pub value: SemanticValue,
}
