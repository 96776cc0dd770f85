//! The Flint programming language compiler library.
//!
//! This library provides the core components of the Flint compiler: a
//! lexer, a recursive-descent parser, a native x86-64 instruction
//! selector, a two-pass machine encoder, and a raw ELF64 writer. Together
//! they lower Flint source text directly to a runnable executable with no
//! external assembler, linker, or C toolchain.
//!
//! # Modules
//!
//! - [`token`] - Token types and source location tracking
//! - [`lexer`] - Lexical analysis (tokenization)
//! - [`arena`] - Bump allocation for the AST
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`parser`] - Recursive descent parser
//! - [`backend`] - Native code generator: AST to pseudo-instructions
//! - [`encode`] - Machine encoder: pseudo-instructions to x86-64 bytes
//! - [`elf`] - Raw ELF64 executable writer
//!
//! # Example
//!
//! ```no_run
//! use flintc::arena::Arena;
//! use flintc::parser::Parser;
//! use flintc::backend::Backend;
//! use flintc::encode::{self, StringLiteral};
//! use flintc::elf;
//!
//! let arena = Arena::new();
//! let mut parser = Parser::new(r#"func main() -> i32 { return 0; }"#, &arena);
//! let program = parser.parse();
//! assert!(!parser.had_error());
//!
//! let generated = Backend::new().generate(&program).expect("backend error");
//! let owned: Vec<(String, Vec<u8>)> = generated
//!     .strings
//!     .entries()
//!     .iter()
//!     .map(|e| (e.label.clone(), e.content.as_bytes().to_vec()))
//!     .collect();
//! let strings: Vec<StringLiteral> =
//!     owned.iter().map(|(label, bytes)| StringLiteral { label, bytes }).collect();
//! let encoded = encode::encode(&generated.instrs, &strings, "_start").expect("encode error");
//! let image = elf::build_executable(&encoded).expect("elf error");
//! assert_eq!(&image[0..4], b"\x7fELF");
//! ```

pub mod arena;
pub mod ast;
pub mod backend;
pub mod elf;
pub mod encode;
pub mod lexer;
pub mod parser;
pub mod token;
