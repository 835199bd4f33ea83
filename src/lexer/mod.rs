//! Lexical analysis module
//!
//! This module handles tokenization of Cobalt source code.

pub mod cursor;
pub mod options;
pub mod scanner;
pub mod token;

pub use cursor::Cursor;
pub use options::LexerOptions;
pub use scanner::Lexer;
pub use token::{Lexeme, SemanticValue, Span, Token, TokenKind, FIXED_TOKENS};
