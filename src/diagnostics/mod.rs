//! Renders [`crate::driver::CompileError`] to the terminal via `ariadne`.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::driver::CompileError;
use flintc::parser::ParseError;

fn print_range_report(
    filename: &str,
    source: &str,
    span_range: Range<usize>,
    short_message: &str,
    label_message: &str,
) -> std::io::Result<()> {
    let report = Report::build(ReportKind::Error, (filename, span_range.clone()))
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_message(short_message)
        .with_label(Label::new((filename, span_range)).with_message(label_message).with_color(Color::Red))
        .finish();

    report.eprint((filename, Source::from(source)))
}

fn report_parse_error(filename: &str, source: &str, error: &ParseError) {
    if let Err(report_err) =
        print_range_report(filename, source, error.span.start..error.span.end, "syntax error", &error.message)
    {
        eprintln!("{}:{}: {}", error.span.line, error.span.column, error.message);
        eprintln!("(failed to display detailed error report: {})", report_err);
    }
}

pub(crate) fn report_error(filename: &str, source: &str, error: &CompileError) {
    match error {
        CompileError::Parse(errors) => {
            for error in errors {
                report_parse_error(filename, source, error);
            }
        }
        CompileError::Backend(_)
        | CompileError::Encode(_)
        | CompileError::Elf(_)
        | CompileError::FileReadError { .. }
        | CompileError::TempDirCreationError(_)
        | CompileError::ExecutableRunError(_)
        | CompileError::FilenameError { .. } => {
            eprintln!("Error: {}", error);
        }
    }
}
