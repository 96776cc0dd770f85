//! Parser helper methods for token navigation, error recording, and
//! synchronization after a syntax error.

use super::{MAX_ERRORS, ParseError, Parser};
use crate::token::{Span, TokenKind};

impl<'a> Parser<'a> {
    /// Returns a user-friendly display string for a token kind.
    pub(super) fn token_kind_display(kind: &TokenKind) -> String {
        match kind {
            TokenKind::Func => "'func'".to_string(),
            TokenKind::Let => "'let'".to_string(),
            TokenKind::Const => "'const'".to_string(),
            TokenKind::Return => "'return'".to_string(),
            TokenKind::If => "'if'".to_string(),
            TokenKind::Else => "'else'".to_string(),
            TokenKind::LeftParen => "'('".to_string(),
            TokenKind::RightParen => "')'".to_string(),
            TokenKind::LeftBrace => "'{'".to_string(),
            TokenKind::RightBrace => "'}'".to_string(),
            TokenKind::Arrow => "'->'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::Identifier(name) => format!("identifier '{}'", name),
            TokenKind::Number(n) => format!("number '{}'", n),
            TokenKind::String(s) => format!("string \"{}\"", s),
            TokenKind::Newline => "newline".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Error(msg) => format!("invalid token ({})", msg),
            other => format!("{:?}", other),
        }
    }

    pub(super) fn current_kind(&self) -> &TokenKind {
        &self.current.kind
    }

    pub(super) fn current_span(&self) -> Span {
        self.current.span
    }

    pub(super) fn previous_span(&self) -> Span {
        self.previous.span
    }

    pub(super) fn is_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Advances to the next token, pulling one out of the lexer.
    pub(super) fn advance(&mut self) {
        if self.is_eof() {
            return;
        }
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current = self.lexer.next_token();
    }

    /// Skips all consecutive `Newline` tokens.
    pub(super) fn skip_newlines(&mut self) {
        while matches!(self.current_kind(), TokenKind::Newline) {
            self.advance();
        }
    }

    /// Optionally consumes a single trailing `;`, without requiring one.
    pub(super) fn skip_optional_semicolon(&mut self) {
        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Expects the current token to match `expected` and advances past it.
    pub(super) fn expect(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if self.current_kind() == &expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {}, found {}",
                Self::token_kind_display(&expected),
                Self::token_kind_display(self.current_kind())
            )))
        }
    }

    /// Expects an identifier token and returns its interned name.
    pub(super) fn expect_identifier(&mut self) -> Result<&'a str, ParseError> {
        if let TokenKind::Identifier(name) = self.current_kind() {
            let name = self.arena.alloc_str(name);
            self.advance();
            Ok(name)
        } else {
            Err(self.error(format!(
                "expected identifier, found {}",
                Self::token_kind_display(self.current_kind())
            )))
        }
    }

    /// Builds a [`ParseError`] at the current token's span.
    pub(super) fn error(&self, message: String) -> ParseError {
        ParseError { message, span: self.current_span() }
    }

    /// Records a parse error, capping how many are kept.
    pub(super) fn record_error(&mut self, err: ParseError) {
        self.had_error = true;
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(err);
        }
    }

    /// Reports that a syntactic construct is tokenized but not implemented,
    /// then synchronizes past it.
    pub(super) fn not_yet_supported(&mut self, what: &str) {
        let err = self.error(format!("{} is not yet supported", what));
        self.record_error(err);
    }

    /// Skips tokens until a likely statement/declaration boundary: past a
    /// `;`, past a `}`, or up to a statement/declaration starting keyword.
    ///
    /// Always makes forward progress (advances at least one token) unless
    /// it is already sitting at a boundary, so repeated failed parses at
    /// top level cannot loop forever.
    pub(super) fn synchronize(&mut self) {
        self.had_error = true;
        loop {
            if self.is_eof() || matches!(self.previous.kind, TokenKind::Semicolon) {
                return;
            }
            if matches!(self.current_kind(), TokenKind::RightBrace) {
                self.advance();
                return;
            }
            if matches!(
                self.current_kind(),
                TokenKind::Func
                    | TokenKind::Let
                    | TokenKind::Const
                    | TokenKind::Return
                    | TokenKind::If
                    | TokenKind::While
                    | TokenKind::For
            ) {
                return;
            }
            self.advance();
        }
    }

    /// Like [`Parser::synchronize`], but used for statement-level recovery
    /// inside a block: it never consumes the block's closing `}`, leaving
    /// it for the block parser's own loop condition.
    pub(super) fn synchronize_stmt(&mut self) {
        self.had_error = true;
        loop {
            if self.is_eof()
                || matches!(self.previous.kind, TokenKind::Semicolon)
                || matches!(self.current_kind(), TokenKind::RightBrace)
            {
                return;
            }
            if matches!(
                self.current_kind(),
                TokenKind::Let
                    | TokenKind::Const
                    | TokenKind::Return
                    | TokenKind::If
                    | TokenKind::While
                    | TokenKind::For
            ) {
                return;
            }
            self.advance();
        }
    }
}
