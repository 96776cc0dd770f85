//! The Flint programming language compiler CLI.
//!
//! This binary provides `flintc build` and `flintc run` commands and
//! delegates compilation/encode/write orchestration to the driver module.

use clap::{Parser, Subcommand};

mod diagnostics;
mod driver;

/// Command-line interface for the Flint compiler.
#[derive(Parser)]
#[command(name = "flintc")]
#[command(about = "The Flint programming language", long_about = None)]
struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Build a Flint program into a native ELF64 executable.
    Build {
        /// The source file to compile (e.g., `hello.fl`).
        file: String,

        /// Output path for the executable (e.g., `-o myprogram`).
        /// If not specified, uses the input filename without extension.
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
    /// Compile and run a Flint program.
    Run {
        /// The source file to run (e.g., `hello.fl`).
        file: String,
    },
}

/// Entry point for the Flint compiler.
fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { file, output } => {
            if let Err(error) = driver::build(&file, output.as_deref()) {
                report_and_exit(*error);
            }
        }
        Commands::Run { file } => match driver::run(&file) {
            Ok(exit_code) => std::process::exit(exit_code),
            Err(error) => report_and_exit(*error),
        },
    }
}

fn report_and_exit(error: driver::CompileErrorWithContext) -> ! {
    diagnostics::report_error(error.filename(), error.source(), error.error());
    std::process::exit(1);
}
