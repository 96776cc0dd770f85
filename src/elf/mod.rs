//! The ELF writer: turns the encoder's machine code and string data into
//! a raw, directly-runnable ELF64 executable.
//!
//! # Layout
//!
//! ```text
//! [ELF64 header][one program header][machine code][string data]
//! ```
//!
//! A single `PT_LOAD` segment covers the whole file starting at file
//! offset 0 and virtual address [`crate::encode::BASE_VADDR`]; there are
//! no section headers, no BSS, and no dynamic linking. On POSIX hosts the
//! output file is written with mode `0755`.
//!
//! # Module Structure
//!
//! - [`header`] - Byte layout of the file header and program header
//! - [`error`] - ELF writer error type

mod error;
mod header;


pub use error::ElfError;

use crate::encode::Encoded;

/// Builds the full on-disk image: header, program header, then the
/// encoder's code-and-data bytes.
pub fn build_executable(encoded: &Encoded) -> Result<Vec<u8>, ElfError> {
    if encoded.bytes.len() > u32::MAX as usize {
        return Err(ElfError::ImageTooLarge);
    }

    let mut out = Vec::with_capacity(64 + 56 + encoded.bytes.len());
    header::write_elf_header(&mut out, encoded.entry_vaddr);
    header::write_program_header(&mut out, encoded.bytes.len() as u64);
    out.extend_from_slice(&encoded.bytes);
    Ok(out)
}

/// Writes `image` to `path`, setting the executable bit on POSIX hosts.
/// On other hosts the file is written with the platform's default
/// executable semantics; see the module's layout note.
pub fn write_executable(path: &std::path::Path, image: &[u8]) -> Result<(), ElfError> {
    std::fs::write(path, image)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}
