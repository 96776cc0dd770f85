//! Common test utilities for Flint integration tests.
//!
//! This module provides shared helper functions used across all
//! integration test files.

// Each test file is compiled as a separate crate, so not all functions
// are used in every test file.
#![allow(dead_code)]

use flintc::arena::Arena;
use flintc::backend::{Backend, BackendError};
use flintc::elf;
use flintc::encode::{self, EncodeError, StringLiteral};
use flintc::parser::{ParseError, Parser};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::ExitStatusExt;
use std::process::Command;
use tempfile::tempdir;

/// Everything that can go wrong compiling a program, flattened for test
/// assertions (the driver's richer `CompileError` lives in the binary
/// crate and isn't reachable from here).
#[derive(Debug)]
pub enum BuildError {
    Parse(Vec<String>),
    Backend(BackendError),
    Encode(EncodeError),
}

/// Compiles `source` straight through to a raw ELF64 image: parse, lower,
/// encode, assemble. No external assembler, linker, or C toolchain runs
/// anywhere in this path.
pub fn compile(source: &str) -> Result<Vec<u8>, BuildError> {
    let arena = Arena::new();
    let mut parser = Parser::new(source, &arena);
    let program = parser.parse();

    if parser.had_error() {
        return Err(BuildError::Parse(parser.errors().iter().map(ParseError::to_string).collect()));
    }

    let generated = Backend::new().generate(&program).map_err(BuildError::Backend)?;

    let owned: Vec<(String, Vec<u8>)> =
        generated.strings.entries().iter().map(|e| (e.label.clone(), e.content.as_bytes().to_vec())).collect();
    let strings: Vec<StringLiteral> = owned.iter().map(|(label, bytes)| StringLiteral { label, bytes }).collect();

    let encoded = encode::encode(&generated.instrs, &strings, "_start").map_err(BuildError::Encode)?;

    Ok(elf::build_executable(&encoded).expect("image within size limits"))
}

/// Compiles `source`, writes the resulting image to a temp file with the
/// executable bit set, runs it, and returns its exit code.
pub fn compile_and_run(source: &str) -> i32 {
    let image = compile(source).expect("program should compile");

    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("program");
    std::fs::write(&path, &image).expect("write executable");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();

    let status = Command::new(&path).status().expect("run compiled program");
    status.code().unwrap_or_else(|| 128 + status.signal().unwrap_or(0))
}
