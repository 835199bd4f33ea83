//! Byte cursor over an immutable source buffer
//!
//! Every motion the scanner performs is built from the primitives here. The
//! cursor only ever moves forward and is clamped to the end of the buffer.

/// Read position within a borrowed source buffer
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of `source`
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Check if we've reached the end of the source
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The byte under the cursor, `None` at end of buffer
    pub fn current(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    /// The byte `offset` places past the cursor, `None` beyond the buffer
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    /// Whether the remaining buffer starts with `literal`
    pub fn matches(&self, literal: &str) -> bool {
        self.source.as_bytes()[self.pos..].starts_with(literal.as_bytes())
    }

    /// Whether the byte under the cursor is `byte`; never true at end of buffer
    pub fn matches_byte(&self, byte: u8) -> bool {
        self.current() == Some(byte)
    }

    /// Whether the byte under the cursor satisfies `pred`
    pub fn current_is(&self, pred: impl FnOnce(u8) -> bool) -> bool {
        self.current().is_some_and(pred)
    }

    /// Move forward `n` bytes, stopping at the end of the buffer
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    /// Move forward one byte at a time while `pred` holds
    pub fn advance_while(&mut self, mut pred: impl FnMut(u8) -> bool) {
        while self.current_is(&mut pred) {
            self.pos += 1;
        }
    }

    /// Move forward until the cursor sits on `byte` or the end of buffer
    pub fn advance_until_byte(&mut self, byte: u8) {
        self.advance_while(|b| b != byte);
    }

    /// Move forward until `literal` matches or the end of buffer.
    /// Returns whether the literal was found.
    pub fn advance_until(&mut self, literal: &str) -> bool {
        while !self.is_at_end() {
            if self.matches(literal) {
                return true;
            }
            self.pos += 1;
        }
        false
    }

    /// Skip up to and including the first byte satisfying `pred`
    pub fn advance_past_where(&mut self, mut pred: impl FnMut(u8) -> bool) {
        self.advance_while(|b| !pred(b));
        self.advance(1);
    }

    /// Skip up to and including the next `byte`
    pub fn advance_past_byte(&mut self, byte: u8) {
        self.advance_until_byte(byte);
        self.advance(1);
    }

    /// Skip up to and including the next `literal`.
    /// Returns whether the literal was found before the end of buffer.
    pub fn advance_past(&mut self, literal: &str) -> bool {
        let found = self.advance_until(literal);
        if found {
            self.advance(literal.len());
        }
        found
    }

    /// Move past the character under the cursor, however many bytes it takes
    pub fn advance_char(&mut self) {
        let width = self.source[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.advance(width);
    }

    /// Source text from `start` to the cursor
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }
}
