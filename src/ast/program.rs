//! Top-level program structure for the Flint AST.

use crate::token::Span;

use super::stmt::Block;
use super::types::Type;

/// A function parameter.
#[derive(Debug, Clone, Copy)]
pub struct Param<'a> {
    pub name: &'a str,
    pub ty: Type,
    pub span: Span,
}

/// A function declaration.
///
/// Functions are the only top-level declaration: there is no global
/// variable storage, so a `let`/`const` at file scope has nowhere to
/// live. Every program must declare a `main` function as its entry
/// point; its absence is a fatal backend error, not a parse error.
#[derive(Debug)]
pub struct FunctionDecl<'a> {
    pub name: &'a str,
    pub params: &'a [Param<'a>],
    pub return_type: Type,
    pub body: &'a Block<'a>,
    pub span: Span,
}

/// The root node of a Flint program's AST.
#[derive(Debug)]
pub struct Program<'a> {
    pub functions: &'a [&'a FunctionDecl<'a>],
}
