//! # Cobalt Lexer
//!
//! The lexical-analysis stage of the Cobalt compiler front-end. Source text
//! goes in; a stream of classified tokens comes out, one `next_token` call at
//! a time, ready for a parser to consume.
//!
//! ## Architecture
//!
//! - `lexer`: the cursor, the token model and the scanner itself
//! - `error`: error taxonomy, source locations and diagnostics
//!
//! ## Example
//!
//! ```
//! use cobalt_lexer::{Lexer, SemanticValue, TokenKind};
//!
//! let mut lexer = Lexer::new("answer = 42");
//! assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
//! assert_eq!(lexer.current_value(), &SemanticValue::Str("answer".into()));
//! assert_eq!(lexer.next_token().kind, TokenKind::Equal);
//! assert_eq!(lexer.next_token().kind, TokenKind::LiteralInt);
//! assert_eq!(lexer.current_value(), &SemanticValue::Int(42));
//! assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
//! ```

pub mod error;
pub mod lexer;

// Re-export commonly used types
pub use error::{CobaltError, CobaltResult, Diagnostic, LexError, LexErrorKind, SourceLocation};
pub use lexer::{Lexeme, Lexer, LexerOptions, SemanticValue, Span, Token, TokenKind};

/// Version of the Cobalt lexer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tokenize a whole source buffer with default options.
///
/// The returned lexemes stop before `EndOfFile`. Error tokens are included
/// in place; see [`collect_errors`] to pull them out.
pub fn tokenize(source: &str) -> Vec<Lexeme<'_>> {
    tokenize_with(source, LexerOptions::default())
}

pub fn tokenize_with(source: &str, options: LexerOptions) -> Vec<Lexeme<'_>> {
    Lexer::with_options(source, options).collect()
}

/// Run the lexer to the end of `source` and return every lexical error
pub fn collect_errors(source: &str, options: LexerOptions, filename: Option<&str>) -> Vec<LexError> {
    Lexer::with_options(source, options)
        .filter_map(|lexeme| LexError::from_token(&lexeme.token, source, filename))
        .collect()
}
