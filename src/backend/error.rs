//! Backend (instruction-list-builder) error type.
//!
//! Every variant here is a semantic error per the error-handling design:
//! fatal for the current compilation, never accumulated the way the
//! parser accumulates syntax errors. The backend therefore propagates
//! with an ordinary `Result` and `?` rather than a sticky flag — there is
//! nothing useful to keep generating once one of these is hit.

#[derive(Debug)]
pub enum BackendError {
    /// No function named `main` was found in the program.
    MissingMain,
    /// An identifier expression did not resolve to a declared variable.
    UndefinedIdentifier(String),
    /// A call's callee was not a bare identifier.
    UnsupportedCallee,
    /// A call named a function other than `print` (or an undeclared one).
    UnsupportedCall(String),
    /// `print` was called with zero arguments or a non-string-literal one.
    PrintRequiresStringLiteral,
    /// A `let`/`const` with neither a declared type nor an initializer:
    /// nothing says how much space to reserve or what value to store.
    UntypedUninitializedVariable(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::MissingMain => {
                write!(f, "no function named 'main' was found")
            }
            BackendError::UndefinedIdentifier(name) => {
                write!(f, "undefined identifier '{}'", name)
            }
            BackendError::UnsupportedCallee => {
                write!(f, "only direct calls to a named function are supported")
            }
            BackendError::UnsupportedCall(name) => {
                write!(f, "'{}' is not callable; only 'print' is supported", name)
            }
            BackendError::PrintRequiresStringLiteral => {
                write!(f, "'print' requires a single string literal argument")
            }
            BackendError::UntypedUninitializedVariable(name) => {
                write!(
                    f,
                    "variable '{}' has neither a declared type nor an initializer",
                    name
                )
            }
        }
    }
}

impl std::error::Error for BackendError {}
