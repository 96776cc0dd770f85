//! Machine-encoder error type.

/// An error raised while encoding the pseudo-instruction list to bytes.
#[derive(Debug)]
pub struct EncodeError {
    message: String,
}

impl EncodeError {
    pub(super) fn unresolved_label(name: &str) -> Self {
        EncodeError {
            message: format!("call or jump target label '{}' was never defined", name),
        }
    }

    pub(super) fn no_main_label() -> Self {
        EncodeError {
            message: "no function labeled as the program entry was generated".to_string(),
        }
    }
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EncodeError {}
