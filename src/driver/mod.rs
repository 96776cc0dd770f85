//! Orchestrates the full pipeline: source text in, a runnable ELF64
//! executable out.
//!
//! `lex` is not a separate driver phase: [`crate::parser::Parser`] owns
//! its [`crate::lexer::Lexer`] and pulls tokens from it as it parses, per
//! the core's single-threaded, no-shared-state resource model. A
//! compilation therefore runs: create arena → parse → lower (backend) →
//! encode → write ELF, in that order, with no stage skipped on success
//! and no remaining stage attempted on failure.

use flintc::arena::Arena;
use flintc::backend::{Backend, BackendError};
use flintc::elf::{self, ElfError};
use flintc::encode::{self, EncodeError, StringLiteral};
use flintc::parser::{ParseError, Parser};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tempfile::TempDir;

#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;

/// A compilation error from any phase of the pipeline.
///
/// This enum unifies errors from parsing, code generation, machine
/// encoding, and ELF writing to simplify error handling in the build
/// pipeline.
pub(crate) enum CompileError {
    /// Parsing collected one or more syntax errors.
    Parse(Vec<ParseError>),
    /// An error while lowering the AST to instructions.
    Backend(BackendError),
    /// An error while encoding instructions to machine code.
    Encode(EncodeError),
    /// An error while writing the ELF executable.
    Elf(ElfError),
    /// Failed to read a source file.
    FileReadError { path: String, source: std::io::Error },
    /// Failed to create a temporary directory.
    TempDirCreationError(std::io::Error),
    /// Failed to run the compiled executable.
    ExecutableRunError(std::io::Error),
    /// Cannot determine filename from path or filename is not valid UTF-8.
    FilenameError { path: String, reason: &'static str },
}

impl CompileError {
    fn file_read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        CompileError::FileReadError { path: path.into(), source }
    }

    fn temp_dir_creation_error(source: std::io::Error) -> Self {
        CompileError::TempDirCreationError(source)
    }

    fn executable_run_error(source: std::io::Error) -> Self {
        CompileError::ExecutableRunError(source)
    }

    fn filename_error(path: impl Into<String>, reason: &'static str) -> Self {
        CompileError::FilenameError { path: path.into(), reason }
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Parse(errors) => {
                write!(f, "{} syntax error(s)", errors.len())
            }
            CompileError::Backend(e) => write!(f, "{}", e),
            CompileError::Encode(e) => write!(f, "{}", e),
            CompileError::Elf(e) => write!(f, "{}", e),
            CompileError::FileReadError { path, source } => {
                write!(f, "failed to read file '{}': {}", path, source)
            }
            CompileError::TempDirCreationError(source) => {
                write!(f, "failed to create temporary directory: {}", source)
            }
            CompileError::ExecutableRunError(source) => {
                write!(f, "failed to run executable: {}", source)
            }
            CompileError::FilenameError { path, reason } => {
                write!(f, "{}: {}", reason, path)
            }
        }
    }
}

/// Context needed for compiling a source file.
#[derive(Clone)]
struct CompileContext {
    filename: String,
    source: String,
}

impl CompileContext {
    fn new(filename: impl Into<String>, source: impl Into<String>) -> Self {
        Self { filename: filename.into(), source: source.into() }
    }

    fn with_error(self, error: CompileError) -> CompileErrorWithContext {
        CompileErrorWithContext { context: self, error }
    }
}

/// A compilation error with the context needed for reporting.
pub(crate) struct CompileErrorWithContext {
    context: CompileContext,
    error: CompileError,
}

impl CompileErrorWithContext {
    pub(crate) fn filename(&self) -> &str {
        &self.context.filename
    }

    pub(crate) fn source(&self) -> &str {
        &self.context.source
    }

    pub(crate) fn error(&self) -> &CompileError {
        &self.error
    }
}

/// Returns the exit code from an exit status, handling signals on Unix.
fn get_exit_code_with_signal(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        if let Some(signal) = status.signal() {
            eprintln!("Program terminated by signal {}", signal);
            return 128 + signal;
        }
    }

    eprintln!("Program terminated abnormally");
    1
}

/// Compiles `source` to a fully-linked-in-place ELF64 image.
///
/// This is the shared pipeline used by both `build` and `run`: parse,
/// lower to instructions, encode to machine code, then assemble the
/// executable image. No external assembler, linker, or C toolchain is
/// invoked anywhere in this path.
fn compile_to_image(source: &str) -> Result<Vec<u8>, CompileError> {
    let arena = Arena::new();
    let mut parser = Parser::new(source, &arena);
    let program = parser.parse();

    if parser.had_error() {
        return Err(CompileError::Parse(parser.errors().iter().map(copy_parse_error).collect()));
    }

    let generated = Backend::new().generate(&program).map_err(CompileError::Backend)?;

    let owned_strings: Vec<(String, Vec<u8>)> =
        generated.strings.entries().iter().map(|e| (e.label.clone(), e.content.as_bytes().to_vec())).collect();
    let string_literals: Vec<StringLiteral> =
        owned_strings.iter().map(|(label, bytes)| StringLiteral { label, bytes }).collect();

    let encoded = encode::encode(&generated.instrs, &string_literals, "_start").map_err(CompileError::Encode)?;

    elf::build_executable(&encoded).map_err(CompileError::Elf)
}

fn copy_parse_error(e: &ParseError) -> ParseError {
    ParseError { message: e.message.clone(), span: e.span }
}

/// Builds a Flint source file into a native executable.
///
/// Given an input file `example.fl`:
/// - Without `-o`: produces `example` executable
/// - With `-o myapp`: produces `myapp` executable
pub(crate) fn build(file: &str, output: Option<&str>) -> Result<(), Box<CompileErrorWithContext>> {
    let source = std::fs::read_to_string(file)
        .map_err(|e| Box::new(CompileContext::new(file, "").with_error(CompileError::file_read_error(file, e))))?;

    let context = CompileContext::new(file, source.clone());

    let source_path = Path::new(file);
    let stem = source_path
        .file_stem()
        .ok_or_else(|| {
            Box::new(context.clone().with_error(CompileError::filename_error(file, "cannot determine filename from path")))
        })?
        .to_str()
        .ok_or_else(|| Box::new(context.clone().with_error(CompileError::filename_error(file, "filename contains invalid UTF-8"))))?;

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(stem.to_string()),
    };

    let image = compile_to_image(&source).map_err(|e| Box::new(context.with_error(e)))?;
    elf::write_executable(&output_path, &image)
        .map_err(|e| Box::new(CompileContext::new(file, source).with_error(CompileError::Elf(e))))?;

    println!("Built: {}", output_path.display());
    Ok(())
}

/// Compiles and runs a Flint source file, returning the exit code of the
/// executed program.
pub(crate) fn run(file: &str) -> Result<i32, Box<CompileErrorWithContext>> {
    let source = std::fs::read_to_string(file)
        .map_err(|e| Box::new(CompileContext::new(file, "").with_error(CompileError::file_read_error(file, e))))?;

    let context = CompileContext::new(file, source.clone());

    let image = compile_to_image(&source).map_err(|e| Box::new(context.clone().with_error(e)))?;

    let temp_dir = TempDir::new()
        .map_err(|e| Box::new(context.clone().with_error(CompileError::temp_dir_creation_error(e))))?;
    let executable_path = temp_dir.path().join("program");

    elf::write_executable(&executable_path, &image)
        .map_err(|e| Box::new(context.clone().with_error(CompileError::Elf(e))))?;

    let status = Command::new(&executable_path)
        .status()
        .map_err(|e| Box::new(context.with_error(CompileError::executable_run_error(e))))?;

    let exit_code = get_exit_code_with_signal(&status);

    drop(temp_dir);

    Ok(exit_code)
}
