//! Lexer configuration

/// Policies for input the lexer may either accept or flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Accept `3.` as a float with an empty fractional part.
    /// When off, the `.` is only taken if a digit follows it.
    pub allow_trailing_dot_float: bool,
    /// Emit an `UnterminatedComment` token for a `/*` with no closing `*/`.
    /// When off, the comment silently runs to the end of the buffer.
    pub report_unterminated_comments: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            allow_trailing_dot_float: true,
            report_unterminated_comments: true,
        }
    }
}

impl LexerOptions {
    pub fn with_trailing_dot_float(mut self, allow: bool) -> Self {
        self.allow_trailing_dot_float = allow;
        self
    }

    pub fn with_unterminated_comment_reports(mut self, report: bool) -> Self {
        self.report_unterminated_comments = report;
        self
    }
}
