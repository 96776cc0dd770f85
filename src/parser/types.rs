//! Type annotation parsing.

use super::{ParseError, Parser};
use crate::ast::Type;
use crate::token::TokenKind;

impl<'a> Parser<'a> {
    /// Parses a type annotation.
    ///
    /// ```text
    /// type → "i32" | "f64" | "string" | "bool" | "void"
    ///      | "?" type
    ///      | IDENTIFIER "[" "]"
    ///      | IDENTIFIER
    /// ```
    ///
    /// Optional types, array types, and named type aliases parse
    /// successfully but fold to [`Type::Unknown`]: nothing downstream can
    /// lower them to machine code.
    pub(super) fn parse_type(&mut self) -> Result<Type, ParseError> {
        if self.check(&TokenKind::Question) {
            self.advance();
            self.parse_type()?;
            return Ok(Type::Unknown);
        }

        let ty = match self.current_kind() {
            TokenKind::I32 => Type::I32,
            TokenKind::F64 => Type::F64,
            TokenKind::StringType => Type::String,
            TokenKind::Bool => Type::Bool,
            TokenKind::Void => Type::Void,
            TokenKind::Identifier(_) => Type::Unknown,
            other => {
                return Err(self.error(format!(
                    "expected a type name, found {}",
                    Self::token_kind_display(other)
                )));
            }
        };
        self.advance();

        if self.check(&TokenKind::LeftBracket) {
            self.advance();
            self.expect(TokenKind::RightBracket)?;
            return Ok(Type::Unknown);
        }

        Ok(ty)
    }
}
