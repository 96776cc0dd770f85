//! The machine encoder: turns the backend's pseudo-instruction list into
//! raw x86-64 machine code.
//!
//! # Two-pass fix-up encoding
//!
//! Branch, call, and string-address targets are all forward references at
//! the point the backend emits them — a `jmp` to `if_0_end` is built before
//! that label's instruction exists. The encoder resolves this with two
//! passes: pass one walks the instruction list computing every
//! instruction's length (via [`x86::instr_len`], which depends only on
//! instruction shape, never on resolved addresses) to record each label's
//! virtual address; pass two walks it again and emits real bytes, looking
//! up each label in the table built by pass one. An unresolved label is a
//! fatal [`EncodeError`].
//!
//! # Module Structure
//!
//! - [`register`] - The 16 x86-64 GPRs and their bit-level encoding
//! - [`x86`] - The pseudo-instruction IR (`Instr`/`Opcode`/`Operand`) and
//!   per-instruction byte encoding
//! - [`error`] - Encoder error type

mod error;
mod register;
mod x86;

pub use error::EncodeError;
pub use register::Reg;
pub use x86::{Instr, Opcode, Operand};

use std::collections::HashMap;

/// Base virtual address of the single `PT_LOAD` segment, per the ELF
/// writer's layout.
pub const BASE_VADDR: u64 = 0x400000;
/// Size in bytes of the ELF64 file header this repository emits.
pub const ELF_HEADER_SIZE: u64 = 64;
/// Size in bytes of the single ELF64 program header this repository emits.
pub const PROGRAM_HEADER_SIZE: u64 = 56;

/// The virtual address of the first byte of machine code: the load
/// address plus the on-disk header and program-header region that
/// precedes it in the file.
pub const CODE_LOAD_ADDR: u64 = BASE_VADDR + ELF_HEADER_SIZE + PROGRAM_HEADER_SIZE;

/// A string literal awaiting placement in the data region that follows
/// the machine code in the single loadable segment.
pub struct StringLiteral<'a> {
    pub label: &'a str,
    pub bytes: &'a [u8],
}

/// The result of encoding: the raw bytes of code followed by the string
/// data region, and the resolved entry point address for `_start`.
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub entry_vaddr: u64,
}

/// Encodes `instrs` to machine code, appending `strings`' bytes as the
/// data region described in the module doc comment.
///
/// `entry_label` names the instruction that should become the ELF entry
/// point (`_start`).
pub fn encode(
    instrs: &[Instr],
    strings: &[StringLiteral],
    entry_label: &str,
) -> Result<Encoded, EncodeError> {
    let mut labels: HashMap<String, u64> = HashMap::new();

    // Pass 1: lay out instructions, then the string data region, and
    // record every label's resolved virtual address.
    let mut offset = 0u64;
    for instr in instrs {
        if let Some(label) = &instr.label {
            labels.insert(label.clone(), CODE_LOAD_ADDR + offset);
        }
        offset += x86::instr_len(instr);
    }
    let code_len = offset;
    for string in strings {
        labels.insert(string.label.to_string(), CODE_LOAD_ADDR + offset);
        offset += string.bytes.len() as u64;
    }

    let entry_vaddr = labels
        .get(entry_label)
        .copied()
        .ok_or_else(EncodeError::no_main_label)?;

    // Pass 2: emit real bytes, resolving every label reference.
    let resolve = |name: &str| labels.get(name).copied();
    let mut bytes = Vec::with_capacity(offset as usize);
    let mut cursor = 0u64;
    for instr in instrs {
        let len = x86::instr_len(instr);
        let next_addr = CODE_LOAD_ADDR + cursor + len;
        bytes.extend(x86::encode_instr(instr, next_addr, &resolve)?);
        cursor += len;
    }
    debug_assert_eq!(bytes.len() as u64, code_len);
    for string in strings {
        bytes.extend_from_slice(string.bytes);
    }

    Ok(Encoded { bytes, entry_vaddr })
}
