//! Lexer/Scanner implementation for the Cobalt language
//!
//! This module implements lexical analysis, converting source code into tokens
//! one call at a time. Each call skips whitespace and comments, then offers the
//! cursor position to the fixed-token table, the identifier classifier and the
//! number scanner in that order. The first one to claim the position produces
//! the token; if none does, one character is reported as `Unexpected`.

use super::cursor::Cursor;
use super::options::LexerOptions;
use super::token::{Lexeme, SemanticValue, Span, Token, TokenKind, FIXED_TOKENS};
use std::iter::FusedIterator;

/// Whitespace that separates tokens. `\n` is excluded: it is a token.
fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\x0B' | b'\x0C')
}

fn is_first_identifier_char(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

fn is_identifier_char(b: u8) -> bool {
    is_first_identifier_char(b) || b.is_ascii_digit()
}

/// Lexer for Cobalt source code
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    options: LexerOptions,
    value: SemanticValue,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer with default options
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    pub fn with_options(source: &'src str, options: LexerOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            options,
            value: SemanticValue::None,
        }
    }

    /// Current byte offset into the source
    pub fn position(&self) -> usize {
        self.cursor.pos()
    }

    /// Semantic value of the token most recently returned by `next_token`.
    ///
    /// Overwritten by the following call, so read it first.
    pub fn current_value(&self) -> &SemanticValue {
        &self.value
    }

    /// Scan the next token.
    ///
    /// Never fails: malformed input comes back as an error-kind token, and
    /// once the buffer is exhausted every call returns `EndOfFile`.
    pub fn next_token(&mut self) -> Token<'src> {
        self.value = SemanticValue::None;

        if let Some(token) = self.skip_trivia() {
            return self.emit(token);
        }

        if self.cursor.is_at_end() {
            let end = self.cursor.pos();
            return self.emit(Token::new(TokenKind::EndOfFile, Span::new(end, 1), ""));
        }

        let token = self
            .scan_fixed()
            .or_else(|| self.scan_identifier())
            .or_else(|| self.scan_number())
            .unwrap_or_else(|| self.scan_unexpected());

        self.emit(token)
    }

    /// Skip whitespace and comments until neither applies.
    ///
    /// Returns a token only for an unterminated block comment that should be
    /// reported.
    fn skip_trivia(&mut self) -> Option<Token<'src>> {
        loop {
            self.cursor.advance_while(is_blank);

            if self.cursor.matches("//") {
                // The newline stays behind to become an EndOfLine token
                self.cursor.advance_until_byte(b'\n');
            } else if self.cursor.matches("/*") {
                let start = self.cursor.pos();
                self.cursor.advance(2);
                let closed = self.cursor.advance_past("*/");
                if !closed && self.options.report_unterminated_comments {
                    return Some(self.token_from(TokenKind::UnterminatedComment, start));
                }
            } else {
                return None;
            }
        }
    }

    /// Try the fixed punctuation table at the cursor
    fn scan_fixed(&mut self) -> Option<Token<'src>> {
        let (literal, kind) = FIXED_TOKENS
            .iter()
            .find(|(literal, _)| self.cursor.matches(literal))?;

        let start = self.cursor.pos();
        self.cursor.advance(literal.len());
        Some(self.token_from(*kind, start))
    }

    /// Scan an identifier or reserved word
    fn scan_identifier(&mut self) -> Option<Token<'src>> {
        if !self.cursor.current_is(is_first_identifier_char) {
            return None;
        }

        let start = self.cursor.pos();
        self.cursor.advance_while(is_identifier_char);
        let lexeme = self.cursor.slice_from(start);

        if let Some(kind) = TokenKind::from_reserved(lexeme) {
            return Some(self.token_from(kind, start));
        }

        self.value = SemanticValue::Str(lexeme.to_string());
        Some(self.token_from(TokenKind::Identifier, start))
    }

    /// Scan a number literal (integer or float)
    fn scan_number(&mut self) -> Option<Token<'src>> {
        if !self.cursor.current_is(|b| b.is_ascii_digit()) {
            return None;
        }

        let start = self.cursor.pos();
        self.cursor.advance_while(|b| b.is_ascii_digit());

        let digit_follows = self.cursor.peek_at(1).is_some_and(|b| b.is_ascii_digit());
        let is_float = self.cursor.matches_byte(b'.')
            && (self.options.allow_trailing_dot_float || digit_follows);

        if is_float {
            self.cursor.advance(1); // consume '.'
            self.cursor.advance_while(|b| b.is_ascii_digit());
            let lexeme = self.cursor.slice_from(start);

            return Some(match lexeme.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    self.value = SemanticValue::Float(value);
                    self.token_from(TokenKind::LiteralFloat, start)
                }
                _ => self.token_from(TokenKind::LiteralOutOfRange, start),
            });
        }

        let lexeme = self.cursor.slice_from(start);
        Some(match lexeme.parse::<i64>() {
            Ok(value) => {
                self.value = SemanticValue::Int(value);
                self.token_from(TokenKind::LiteralInt, start)
            }
            Err(_) => self.token_from(TokenKind::LiteralOutOfRange, start),
        })
    }

    /// Consume one unrecognised character
    fn scan_unexpected(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        self.cursor.advance_char();
        self.token_from(TokenKind::Unexpected, start)
    }

    /// Token spanning `start` to the cursor
    fn token_from(&self, kind: TokenKind, start: usize) -> Token<'src> {
        Token::new(
            kind,
            Span::between(start, self.cursor.pos()),
            self.cursor.slice_from(start),
        )
    }

    fn emit(&self, token: Token<'src>) -> Token<'src> {
        tracing::trace!(
            kind = ?token.kind,
            start = token.span.start,
            len = token.span.len,
            "token"
        );
        if let Some(error) = token.kind.error_kind() {
            tracing::debug!(?error, span = %token.span, text = token.text, "lexical error");
        }
        token
    }
}

/// Yields every token before `EndOfFile` together with its semantic value
impl<'src> Iterator for Lexer<'src> {
    type Item = Lexeme<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            return None;
        }
        Some(Lexeme {
            token,
            value: self.value.clone(),
        })
    }
}

impl FusedIterator for Lexer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        kinds_with(source, LexerOptions::default())
    }

    fn kinds_with(source: &str, options: LexerOptions) -> Vec<TokenKind> {
        let mut lexer = Lexer::with_options(source, options);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token();
            kinds.push(token.kind);
            if token.is_eof() {
                return kinds;
            }
        }
    }

    /// Lex a source expected to hold exactly one token before EOF
    fn single(source: &str) -> (TokenKind, String, SemanticValue) {
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token();
        let value = lexer.current_value().clone();
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
        (token.kind, token.text.to_string(), value)
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), vec![TokenKind::EndOfFile]);
    }

    #[test]
    fn test_fixed_tokens_alone() {
        for (literal, kind) in FIXED_TOKENS {
            let mut lexer = Lexer::new(literal);
            let token = lexer.next_token();
            assert_eq!(token.kind, kind);
            assert_eq!(token.span, Span::new(0, literal.len()));
            assert_eq!(token.text, literal);
            assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
        }
    }

    #[test]
    fn test_punctuation_sequence() {
        assert_eq!(
            kinds("(){}[]=:,"),
            vec![
                TokenKind::ParameterListBegin,
                TokenKind::ParameterListEnd,
                TokenKind::FunctionBodyBegin,
                TokenKind::FunctionBodyEnd,
                TokenKind::PropertyBodyBegin,
                TokenKind::PropertyBodyEnd,
                TokenKind::Equal,
                TokenKind::TypeConstraintSeparator,
                TokenKind::Separator,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_newline_is_not_swallowed_as_whitespace() {
        assert_eq!(
            kinds("  \t\n \r\n"),
            vec![TokenKind::EndOfLine, TokenKind::EndOfLine, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(single("return"), (TokenKind::Return, "return".into(), SemanticValue::None));
        assert_eq!(single("break"), (TokenKind::Break, "break".into(), SemanticValue::None));
        assert_eq!(
            single("continue"),
            (TokenKind::Continue, "continue".into(), SemanticValue::None)
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            single("returns"),
            (TokenKind::Identifier, "returns".into(), SemanticValue::Str("returns".into()))
        );
        assert_eq!(
            single("myVar123"),
            (TokenKind::Identifier, "myVar123".into(), SemanticValue::Str("myVar123".into()))
        );
    }

    #[test]
    fn test_identifier_excludes_underscore() {
        assert_eq!(
            kinds("a_b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Unexpected,
                TokenKind::Identifier,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_digit_then_letters_splits() {
        assert_eq!(
            kinds("9lives"),
            vec![TokenKind::LiteralInt, TokenKind::Identifier, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(single("042"), (TokenKind::LiteralInt, "042".into(), SemanticValue::Int(42)));
        assert_eq!(single("0"), (TokenKind::LiteralInt, "0".into(), SemanticValue::Int(0)));
        assert_eq!(
            single("9223372036854775807"),
            (
                TokenKind::LiteralInt,
                "9223372036854775807".into(),
                SemanticValue::Int(i64::MAX)
            )
        );
    }

    #[test]
    fn test_integer_overflow_is_reported_not_fatal() {
        let mut lexer = Lexer::new("9223372036854775808 1");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::LiteralOutOfRange);
        assert_eq!(token.text, "9223372036854775808");
        assert!(lexer.current_value().is_none());
        assert_eq!(lexer.next_token().kind, TokenKind::LiteralInt);
        assert_eq!(lexer.current_value(), &SemanticValue::Int(1));
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(single("3.5"), (TokenKind::LiteralFloat, "3.5".into(), SemanticValue::Float(3.5)));
        assert_eq!(
            single("0.25"),
            (TokenKind::LiteralFloat, "0.25".into(), SemanticValue::Float(0.25))
        );
    }

    #[test]
    fn test_trailing_dot_float_accepted_by_default() {
        assert_eq!(single("3."), (TokenKind::LiteralFloat, "3.".into(), SemanticValue::Float(3.0)));
    }

    #[test]
    fn test_trailing_dot_float_rejected_when_strict() {
        let options = LexerOptions::default().with_trailing_dot_float(false);
        assert_eq!(
            kinds_with("3.", options),
            vec![TokenKind::LiteralInt, TokenKind::Unexpected, TokenKind::EndOfFile]
        );
        assert_eq!(
            kinds_with("3.5", options),
            vec![TokenKind::LiteralFloat, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_second_dot_is_unexpected() {
        assert_eq!(
            kinds("1.2.3"),
            vec![
                TokenKind::LiteralFloat,
                TokenKind::Unexpected,
                TokenKind::LiteralInt,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_huge_float_is_out_of_range() {
        let source = format!("{}.0", "9".repeat(400));
        assert_eq!(
            kinds(&source),
            vec![TokenKind::LiteralOutOfRange, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_line_comment_keeps_newline() {
        let mut lexer = Lexer::new("// comment\n42");
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfLine);
        assert_eq!(lexer.next_token().kind, TokenKind::LiteralInt);
        assert_eq!(lexer.current_value(), &SemanticValue::Int(42));
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_block_comment() {
        let mut lexer = Lexer::new("/* a */ 42");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::LiteralInt);
        assert_eq!(token.span, Span::new(8, 2));
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_interleaved_comments_and_whitespace() {
        assert_eq!(
            kinds("  /* a */ // b\n /* c */ /* d */ x"),
            vec![TokenKind::EndOfLine, TokenKind::Identifier, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        assert_eq!(
            kinds("/* /* */ x */"),
            vec![
                TokenKind::Identifier,
                TokenKind::Unexpected,
                TokenKind::Unexpected,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        assert_eq!(
            kinds("/* a\nb */ c"),
            vec![TokenKind::Identifier, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_unterminated_block_comment_reported() {
        let mut lexer = Lexer::new("x /* never closed");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::UnterminatedComment);
        assert_eq!(token.text, "/* never closed");
        assert_eq!(lexer.next_token().kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_comment_opener_does_not_close_itself() {
        assert_eq!(
            kinds("/*/"),
            vec![TokenKind::UnterminatedComment, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_unterminated_block_comment_silent() {
        let options = LexerOptions::default().with_unterminated_comment_reports(false);
        assert_eq!(
            kinds_with("x /* never closed", options),
            vec![TokenKind::Identifier, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_lone_slash_is_unexpected() {
        assert_eq!(
            kinds("a / b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Unexpected,
                TokenKind::Identifier,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_unexpected_advances_one_byte() {
        let mut lexer = Lexer::new("@x");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Unexpected);
        assert_eq!(token.span, Span::new(0, 1));
        assert_eq!(lexer.position(), 1);
    }

    #[test]
    fn test_string_quote_is_unexpected() {
        assert_eq!(
            kinds("\"a\""),
            vec![
                TokenKind::Unexpected,
                TokenKind::Identifier,
                TokenKind::Unexpected,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_non_ascii_consumes_whole_character() {
        let mut lexer = Lexer::new("é1");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Unexpected);
        assert_eq!(token.text, "é");
        assert_eq!(lexer.position(), 2);
        assert_eq!(lexer.next_token().kind, TokenKind::LiteralInt);
    }

    #[test]
    fn test_end_of_file_is_terminal() {
        let mut lexer = Lexer::new("x ");
        lexer.next_token();
        let eof = lexer.next_token();
        assert_eq!(eof.kind, TokenKind::EndOfFile);
        assert_eq!(eof.span, Span::new(2, 1));
        assert_eq!(eof.text, "");
        for _ in 0..3 {
            assert_eq!(lexer.next_token(), eof);
            assert_eq!(lexer.position(), 2);
        }
    }

    #[test]
    fn test_value_cleared_by_next_token() {
        let mut lexer = Lexer::new("name ,");
        lexer.next_token();
        assert_eq!(lexer.current_value().as_str(), Some("name"));
        lexer.next_token();
        assert!(lexer.current_value().is_none());
    }

    #[test]
    fn test_function_definition() {
        let source = "add(a: int, b: int): int {\n\treturn a\n}";
        let tokens: Vec<_> = Lexer::new(source).map(|lexeme| lexeme.token.kind).collect();
        assert_eq!(
            tokens,
            vec![
                TokenKind::Identifier,
                TokenKind::ParameterListBegin,
                TokenKind::Identifier,
                TokenKind::TypeConstraintSeparator,
                TokenKind::Identifier,
                TokenKind::Separator,
                TokenKind::Identifier,
                TokenKind::TypeConstraintSeparator,
                TokenKind::Identifier,
                TokenKind::ParameterListEnd,
                TokenKind::TypeConstraintSeparator,
                TokenKind::Identifier,
                TokenKind::FunctionBodyBegin,
                TokenKind::EndOfLine,
                TokenKind::Return,
                TokenKind::Identifier,
                TokenKind::EndOfLine,
                TokenKind::FunctionBodyEnd,
            ]
        );
    }

    #[test]
    fn test_iterator_bundles_values() {
        let lexemes: Vec<_> = Lexer::new("x = 1.5").collect();
        assert_eq!(lexemes.len(), 3);
        assert_eq!(lexemes[0].value, SemanticValue::Str("x".into()));
        assert_eq!(lexemes[1].value, SemanticValue::None);
        assert_eq!(lexemes[2].value, SemanticValue::Float(1.5));
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut lexer = Lexer::new("a");
        assert!(lexer.next().is_some());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    proptest! {
        #[test]
        fn prop_spans_advance_and_terminate(source in "\\PC{0,64}") {
            let mut lexer = Lexer::new(&source);
            let mut last_end = 0;
            let mut steps = 0;
            loop {
                let token = lexer.next_token();
                if token.is_eof() {
                    prop_assert_eq!(token.span.start, source.len());
                    break;
                }
                prop_assert!(token.span.len >= 1);
                prop_assert!(token.span.start >= last_end);
                prop_assert_eq!(&source[token.span.range()], token.text);
                last_end = token.span.end();
                steps += 1;
                prop_assert!(steps <= source.len());
            }
        }

        #[test]
        fn prop_identifier_value_matches_text(name in "[a-zA-Z][a-zA-Z0-9]{0,16}") {
            prop_assume!(TokenKind::from_reserved(&name).is_none());
            let mut lexer = Lexer::new(&name);
            let token = lexer.next_token();
            prop_assert_eq!(token.kind, TokenKind::Identifier);
            prop_assert_eq!(lexer.current_value().as_str(), Some(name.as_str()));
        }

        #[test]
        fn prop_integer_value_matches_digits(n in 0u64..=i64::MAX as u64, zeros in 0usize..3) {
            let source = format!("{}{}", "0".repeat(zeros), n);
            let mut lexer = Lexer::new(&source);
            prop_assert_eq!(lexer.next_token().kind, TokenKind::LiteralInt);
            prop_assert_eq!(lexer.current_value().as_int(), i64::try_from(n).ok());
        }

        #[test]
        fn prop_unexpected_ascii_advances_exactly_one(b in prop::sample::select(b"!#$%&*+-;<>?@^`|~\"'\\".to_vec())) {
            let source = (b as char).to_string();
            let mut lexer = Lexer::new(&source);
            let token = lexer.next_token();
            prop_assert_eq!(token.kind, TokenKind::Unexpected);
            prop_assert_eq!(lexer.position(), 1);
        }
    }
}
