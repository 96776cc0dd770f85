//! Function and parameter list parsing.

use super::Parser;
use crate::ast::{FunctionDecl, Param};
use crate::token::{Span, TokenKind};

impl<'a> Parser<'a> {
    /// Parses one top-level function declaration.
    ///
    /// Returns `None` (having recorded an error) when the current token
    /// cannot start a function declaration at all; the caller
    /// synchronizes in that case. At least one token is always consumed
    /// on that path so the top-level loop cannot stall.
    pub(super) fn parse_function_decl(&mut self) -> Option<FunctionDecl<'a>> {
        if !self.check(&TokenKind::Func) {
            let err = self.error(format!(
                "expected a function declaration, found {}",
                Self::token_kind_display(self.current_kind())
            ));
            self.record_error(err);
            self.advance();
            return None;
        }

        let start = self.current_span();
        self.advance(); // 'func'

        let name = self.expect_identifier().map_err(|e| self.record_error(e)).ok()?;

        self.expect(TokenKind::LeftParen).map_err(|e| self.record_error(e)).ok()?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RightParen).map_err(|e| self.record_error(e)).ok()?;
        self.expect(TokenKind::Arrow).map_err(|e| self.record_error(e)).ok()?;
        let return_type = self.parse_type().map_err(|e| self.record_error(e)).ok()?;

        self.skip_newlines();
        let body = self.parse_block()?;

        let span = Span::new(start.start, body.span.end, start.line, start.column);
        Some(FunctionDecl { name, params, return_type, body, span })
    }

    /// Parses a comma-separated parameter list. An empty list (`()`) is
    /// valid and yields an empty slice.
    fn parse_params(&mut self) -> Option<&'a [Param<'a>]> {
        let mut params = Vec::new();
        if self.check(&TokenKind::RightParen) {
            return Some(self.arena.alloc_slice(params));
        }

        loop {
            let span_start = self.current_span();
            let name = self.expect_identifier().map_err(|e| self.record_error(e)).ok()?;
            self.expect(TokenKind::Colon).map_err(|e| self.record_error(e)).ok()?;
            let ty = self.parse_type().map_err(|e| self.record_error(e)).ok()?;
            let span = Span::new(span_start.start, self.previous_span().end, span_start.line, span_start.column);
            params.push(Param { name, ty, span });

            if self.check(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }

        Some(self.arena.alloc_slice(params))
    }
}
