//! Parser for the Flint programming language.
//!
//! This module provides the [`Parser`] struct which transforms a lazily
//! produced token stream into an Abstract Syntax Tree ([`Program`])
//! allocated out of a [`crate::arena::Arena`].
//!
//! # Overview
//!
//! The parser is recursive descent with one token of lookahead. It owns a
//! [`crate::lexer::Lexer`] directly rather than a pre-tokenized vector,
//! pulling tokens on demand via [`crate::lexer::Lexer::next_token`].
//!
//! Parsing never aborts at the first error. A syntax error is recorded and
//! the parser synchronizes to the next likely statement or declaration
//! boundary (`;`, `}`, or a statement-starting keyword) before resuming,
//! up to [`MAX_ERRORS`] recorded errors. [`Parser::had_error`] reports
//! whether any were recorded; [`Parser::parse`] always returns a
//! `Program`, possibly a partial one.
//!
//! # Grammar
//!
//! ```text
//! program      → function* EOF
//! function     → "func" IDENTIFIER "(" params? ")" "->" type block
//! params       → param ("," param)*
//! param        → IDENTIFIER ":" type
//! type         → "i32" | "f64" | "string" | "bool" | "void"
//!              | "?" type | IDENTIFIER "[" "]" | IDENTIFIER
//! block        → "{" stmt* "}"
//! stmt         → var_decl | return_stmt | if_stmt | block | expr_stmt
//! var_decl     → ("let" | "const") IDENTIFIER (":" type)? ("=" expr)? ";"
//! return_stmt  → "return" expr? ";"
//! if_stmt      → "if" "(" expr ")" block ("else" block)?
//! expr_stmt    → expr ";"?
//! expr         → logic_or
//! logic_or     → logic_and ("||" logic_and)*
//! logic_and    → equality ("&&" equality)*
//! equality     → comparison (("==" | "!=" | "is") comparison)*
//! comparison   → additive (("<" | "<=" | ">" | ">=") additive)*
//! additive     → multiplicative (("+" | "-") multiplicative)*
//! multiplicative → unary (("*" | "/" | "%") unary)*
//! unary        → ("-" | "!") unary | call
//! call         → primary ("(" arguments? ")")*
//! arguments    → expr ("," expr)*
//! primary      → NUMBER | STRING | "true" | "false" | "null"
//!              | IDENTIFIER | "(" expr ")"
//! ```
//!
//! Assignment (`=`, `+=`, `-=`, `*=`, `/=`) has a grammar slot at the
//! bottom of the precedence table but no AST representation: the AST has
//! no assignment expression node, so an identifier followed by an
//! assignment operator is reported as "not yet supported" rather than
//! parsed into something the backend cannot lower. The same applies to
//! `while`, `for`, `switch`, `throw`, `catch`, and `try`: they tokenize
//! but are not implemented as statements.
//!
//! # Module Structure
//!
//! - [`error`] - Parse error type
//! - `helpers` - Token navigation, synchronization, and basic operations
//! - `fn_def` - Function and parameter list parsing
//! - `stmt` - Statement and block parsing
//! - `types` - Type annotation parsing
//! - `expr` - Expression parsing (precedence climbing)
//!
//! # See Also
//!
//! * [`crate::lexer`] - Produces the token stream consumed by the parser
//! * [`crate::ast`] - Defines the AST types produced by the parser
//! * [`crate::backend`] - Consumes the AST to generate machine instructions

mod error;
mod expr;
mod fn_def;
mod helpers;
mod stmt;
mod types;

#[cfg(test)]
mod tests;

pub use error::ParseError;

use crate::arena::Arena;
use crate::ast::Program;
use crate::lexer::Lexer;
use crate::token::Token;

/// The parser stops recording new errors after this many; it keeps
/// synchronizing and parsing so a pathological file still terminates
/// quickly instead of flooding the user with thousands of diagnostics.
const MAX_ERRORS: usize = 20;

/// A recursive descent parser for the Flint language.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    arena: &'a Arena,
    current: Token,
    previous: Token,
    had_error: bool,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser over `source`, allocating AST nodes in `arena`.
    pub fn new(source: &'a str, arena: &'a Arena) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let previous = current.clone();
        Parser {
            lexer,
            arena,
            current,
            previous,
            had_error: false,
            errors: Vec::new(),
        }
    }

    /// Parses the entire token stream into a [`Program`].
    ///
    /// Always returns a `Program`, even when errors were recorded: check
    /// [`Parser::had_error`] and [`Parser::errors`] to find out.
    pub fn parse(&mut self) -> Program<'a> {
        self.skip_newlines();
        let mut functions = Vec::new();

        while !self.is_eof() {
            match self.parse_function_decl() {
                Some(func) => functions.push(&*self.arena.alloc(func)),
                None => self.synchronize(),
            }
            self.skip_newlines();
        }

        Program {
            functions: self.arena.alloc_slice(functions),
        }
    }

    /// Whether any parse error was recorded.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// The parse errors recorded so far, in source order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}
