//! Statement and block parsing.

use super::Parser;
use crate::ast::{Block, Stmt};
use crate::token::{Span, TokenKind};

impl<'a> Parser<'a> {
    /// Parses a `{` ... `}` block.
    pub(super) fn parse_block(&mut self) -> Option<&'a Block<'a>> {
        let start = self.current_span();
        self.expect(TokenKind::LeftBrace).map_err(|e| self.record_error(e)).ok()?;
        self.skip_newlines();

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_eof() {
            match self.parse_stmt() {
                Some(stmt) => stmts.push(&*self.arena.alloc(stmt)),
                None => self.synchronize_stmt(),
            }
            self.skip_newlines();
        }

        let end = self.current_span();
        self.expect(TokenKind::RightBrace).map_err(|e| self.record_error(e)).ok()?;

        let span = Span::new(start.start, end.end, start.line, start.column);
        Some(self.arena.alloc(Block { stmts: self.arena.alloc_slice(stmts), span }))
    }

    /// Parses a single statement.
    pub(super) fn parse_stmt(&mut self) -> Option<Stmt<'a>> {
        match self.current_kind() {
            TokenKind::Let | TokenKind::Const => self.parse_var_decl(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::LeftBrace => self.parse_block().map(Stmt::Block),
            TokenKind::While | TokenKind::For => {
                let what = if self.check(&TokenKind::While) { "'while'" } else { "'for'" };
                self.not_yet_supported(what);
                self.advance();
                None
            }
            TokenKind::Switch | TokenKind::Throw | TokenKind::Catch | TokenKind::Try => {
                let display = Self::token_kind_display(self.current_kind());
                self.not_yet_supported(&display);
                self.advance();
                None
            }
            _ => self.parse_expr_stmt(),
        }
    }

    /// `("let" | "const") IDENTIFIER (":" type)? ("=" expr)? ";"`
    fn parse_var_decl(&mut self) -> Option<Stmt<'a>> {
        let start = self.current_span();
        let is_const = self.check(&TokenKind::Const);
        self.advance(); // 'let' or 'const'

        let name = self.expect_identifier().map_err(|e| self.record_error(e)).ok()?;

        let declared_type = if self.check(&TokenKind::Colon) {
            self.advance();
            Some(self.parse_type().map_err(|e| self.record_error(e)).ok()?)
        } else {
            None
        };

        let initializer = if self.check(&TokenKind::Equals) {
            self.advance();
            Some(&*self.arena.alloc(self.parse_expr()?))
        } else {
            None
        };

        let end = self.current_span();
        self.expect(TokenKind::Semicolon).map_err(|e| self.record_error(e)).ok()?;

        let span = Span::new(start.start, end.start, start.line, start.column);
        Some(Stmt::VarDecl { name, declared_type, initializer, is_const, span })
    }

    /// `"return" expr? ";"`
    fn parse_return_stmt(&mut self) -> Option<Stmt<'a>> {
        let start = self.current_span();
        self.advance(); // 'return'

        let value = if matches!(self.current_kind(), TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof) {
            None
        } else {
            Some(&*self.arena.alloc(self.parse_expr()?))
        };

        let end = self.current_span();
        self.skip_optional_semicolon();
        let span = Span::new(start.start, end.end, start.line, start.column);
        Some(Stmt::Return { value, span })
    }

    /// `"if" "(" expr ")" block ("else" block)?`
    fn parse_if_stmt(&mut self) -> Option<Stmt<'a>> {
        let start = self.current_span();
        self.advance(); // 'if'

        self.expect(TokenKind::LeftParen).map_err(|e| self.record_error(e)).ok()?;
        let condition = &*self.arena.alloc(self.parse_expr()?);
        self.expect(TokenKind::RightParen).map_err(|e| self.record_error(e)).ok()?;

        self.skip_newlines();
        let then_block = self.parse_block()?;

        self.skip_newlines();
        let mut lookahead_end = then_block.span.end;
        let else_block = if self.check(&TokenKind::Else) {
            self.advance(); // 'else'
            self.skip_newlines();
            let block = self.parse_block()?;
            lookahead_end = block.span.end;
            Some(block)
        } else {
            None
        };

        let span = Span::new(start.start, lookahead_end, start.line, start.column);
        Some(Stmt::If { condition, then_block, else_block, span })
    }

    /// `expr ";"?`
    fn parse_expr_stmt(&mut self) -> Option<Stmt<'a>> {
        let expr = self.parse_expr()?;
        self.skip_optional_semicolon();
        Some(Stmt::Expression(&*self.arena.alloc(expr)))
    }
}
