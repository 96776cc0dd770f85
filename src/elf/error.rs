//! ELF writer error type.

#[derive(Debug)]
pub enum ElfError {
    /// The code and data region exceeded what a 32-bit program header
    /// field (`p_filesz`/`p_memsz`) can represent.
    ImageTooLarge,
    /// Writing the output file failed.
    Io(std::io::Error),
}

impl std::fmt::Display for ElfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElfError::ImageTooLarge => write!(f, "compiled image exceeds the maximum loadable segment size"),
            ElfError::Io(e) => write!(f, "failed to write executable: {}", e),
        }
    }
}

impl std::error::Error for ElfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ElfError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ElfError {
    fn from(e: std::io::Error) -> Self {
        ElfError::Io(e)
    }
}
