//! Expression parsing using precedence climbing.
//!
//! Implements every level below assignment in the grammar documented on
//! [`super::Parser`]: logical or/and, equality, comparison, additive,
//! multiplicative, unary, and call/primary.

use super::Parser;
use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::token::{Span, TokenKind};

/// Precedence level, low to high. Binds the way C-family languages do:
/// `||` loosest, call/primary tightest.
const PREC_OR: u8 = 0;
const PREC_AND: u8 = 1;
const PREC_EQUALITY: u8 = 2;
const PREC_COMPARISON: u8 = 3;
const PREC_ADDITIVE: u8 = 4;
const PREC_MULTIPLICATIVE: u8 = 5;

fn binary_op(kind: &TokenKind) -> Option<(BinaryOp, u8)> {
    match kind {
        TokenKind::OrOr => Some((BinaryOp::Or, PREC_OR)),
        TokenKind::AndAnd => Some((BinaryOp::And, PREC_AND)),
        TokenKind::EqualEqual => Some((BinaryOp::Eq, PREC_EQUALITY)),
        TokenKind::BangEqual => Some((BinaryOp::NotEq, PREC_EQUALITY)),
        TokenKind::Is => Some((BinaryOp::Is, PREC_EQUALITY)),
        TokenKind::Less => Some((BinaryOp::Lt, PREC_COMPARISON)),
        TokenKind::LessEqual => Some((BinaryOp::LtEq, PREC_COMPARISON)),
        TokenKind::Greater => Some((BinaryOp::Gt, PREC_COMPARISON)),
        TokenKind::GreaterEqual => Some((BinaryOp::GtEq, PREC_COMPARISON)),
        TokenKind::Plus => Some((BinaryOp::Add, PREC_ADDITIVE)),
        TokenKind::Minus => Some((BinaryOp::Sub, PREC_ADDITIVE)),
        TokenKind::Star => Some((BinaryOp::Mul, PREC_MULTIPLICATIVE)),
        TokenKind::Slash => Some((BinaryOp::Div, PREC_MULTIPLICATIVE)),
        TokenKind::Percent => Some((BinaryOp::Mod, PREC_MULTIPLICATIVE)),
        _ => None,
    }
}

impl<'a> Parser<'a> {
    /// Entry point for expression parsing.
    ///
    /// Assignment operators (`=`, `+=`, `-=`, `*=`, `/=`) have a precedence
    /// slot below `||` in the grammar table but no AST node: there is no
    /// assignment expression kind to build one into. An identifier
    /// immediately followed by one is reported as not-yet-supported
    /// rather than silently mis-parsed.
    pub(super) fn parse_expr(&mut self) -> Option<Expr<'a>> {
        let expr = self.parse_binary(PREC_OR)?;
        if matches!(
            self.current_kind(),
            TokenKind::Equals | TokenKind::PlusEquals | TokenKind::MinusEquals | TokenKind::StarEquals | TokenKind::SlashEquals
        ) {
            self.not_yet_supported("assignment expressions");
            self.advance();
            return None;
        }
        Some(expr)
    }

    fn parse_binary(&mut self, min_prec: u8) -> Option<Expr<'a>> {
        let mut left = self.parse_unary()?;

        while let Some((op, prec)) = binary_op(self.current_kind()) {
            if prec < min_prec {
                break;
            }
            self.advance();
            self.skip_newlines();
            let right = self.parse_binary(prec + 1)?;
            let span = Span::new(left.span().start, right.span().end, left.span().line, left.span().column);
            left = Expr::Binary {
                op,
                left: self.arena.alloc(left),
                right: self.arena.alloc(right),
                span,
            };
        }

        Some(left)
    }

    /// `("-" | "!") unary | call`
    fn parse_unary(&mut self) -> Option<Expr<'a>> {
        let start = self.current_span();
        let op = match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Bang => Some(UnaryOp::Not),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            self.skip_newlines();
            let operand = self.parse_unary()?;
            let span = Span::new(start.start, operand.span().end, start.line, start.column);
            return Some(Expr::Unary { op, operand: self.arena.alloc(operand), span });
        }

        self.parse_call()
    }

    /// `primary ("(" arguments? ")")*`
    fn parse_call(&mut self) -> Option<Expr<'a>> {
        let start = self.current_span();
        let mut expr = self.parse_primary()?;

        while self.check(&TokenKind::LeftParen) {
            self.advance();
            self.skip_newlines();
            let mut args = Vec::new();
            if !self.check(&TokenKind::RightParen) {
                loop {
                    args.push(&*self.arena.alloc(self.parse_expr()?));
                    self.skip_newlines();
                    if self.check(&TokenKind::Comma) {
                        self.advance();
                        self.skip_newlines();
                    } else {
                        break;
                    }
                }
            }
            let end = self.current_span();
            self.expect(TokenKind::RightParen).map_err(|e| self.record_error(e)).ok()?;
            let span = Span::new(start.start, end.end, start.line, start.column);
            expr = Expr::Call { callee: self.arena.alloc(expr), args: self.arena.alloc_slice(args), span };
        }

        Some(expr)
    }

    /// `NUMBER | STRING | "true" | "false" | "null" | IDENTIFIER | "(" expr ")"`
    fn parse_primary(&mut self) -> Option<Expr<'a>> {
        let span = self.current_span();
        match self.current_kind().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Some(Expr::Literal(Literal::Number(n), span))
            }
            TokenKind::String(ref s) => {
                let s = self.arena.alloc_str(s);
                self.advance();
                Some(Expr::Literal(Literal::String(s), span))
            }
            TokenKind::True => {
                self.advance();
                Some(Expr::Literal(Literal::Bool(true), span))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::Literal(Literal::Bool(false), span))
            }
            TokenKind::Null => {
                self.advance();
                Some(Expr::Literal(Literal::Null, span))
            }
            TokenKind::Identifier(ref name) => {
                let name = self.arena.alloc_str(name);
                self.advance();
                Some(Expr::Identifier(name, span))
            }
            TokenKind::LeftParen => {
                self.advance();
                self.skip_newlines();
                let inner = self.parse_expr()?;
                self.skip_newlines();
                self.expect(TokenKind::RightParen).map_err(|e| self.record_error(e)).ok()?;
                Some(inner)
            }
            other => {
                let err = self.error(format!(
                    "expected an expression, found {}",
                    Self::token_kind_display(&other)
                ));
                self.record_error(err);
                self.advance();
                None
            }
        }
    }
}
