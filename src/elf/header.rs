//! Raw byte layout of the ELF64 file header and the single program header
//! this writer emits.

use crate::encode::{BASE_VADDR, ELF_HEADER_SIZE, PROGRAM_HEADER_SIZE};

const ET_EXEC: u16 = 2;
const EM_X86_64: u16 = 62;
const EV_CURRENT: u32 = 1;
const PT_LOAD: u32 = 1;
const PF_X: u32 = 1;
const PF_R: u32 = 4;
const SEGMENT_ALIGN: u64 = 0x1000;

/// Appends the 64-byte ELF64 file header. `entry` is the virtual address
/// execution starts at; `phoff` is always immediately after this header.
pub fn write_elf_header(out: &mut Vec<u8>, entry: u64) {
    out.extend_from_slice(b"\x7fELF");
    out.push(2); // EI_CLASS: ELFCLASS64
    out.push(1); // EI_DATA: ELFDATA2LSB
    out.push(1); // EI_VERSION
    out.push(0); // EI_OSABI: System V
    out.extend_from_slice(&[0u8; 8]); // EI_PAD + EI_ABIVERSION

    out.extend_from_slice(&ET_EXEC.to_le_bytes());
    out.extend_from_slice(&EM_X86_64.to_le_bytes());
    out.extend_from_slice(&EV_CURRENT.to_le_bytes());
    out.extend_from_slice(&entry.to_le_bytes()); // e_entry
    out.extend_from_slice(&ELF_HEADER_SIZE.to_le_bytes()); // e_phoff
    out.extend_from_slice(&0u64.to_le_bytes()); // e_shoff: no section headers
    out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    out.extend_from_slice(&(ELF_HEADER_SIZE as u16).to_le_bytes()); // e_ehsize
    out.extend_from_slice(&(PROGRAM_HEADER_SIZE as u16).to_le_bytes()); // e_phentsize
    out.extend_from_slice(&1u16.to_le_bytes()); // e_phnum
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shentsize
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx

    debug_assert_eq!(out.len() as u64, ELF_HEADER_SIZE);
}

/// Appends the single `PT_LOAD` program header covering the whole file
/// (header, program header, machine code, and string data region).
pub fn write_program_header(out: &mut Vec<u8>, image_len: u64) {
    let total_len = ELF_HEADER_SIZE + PROGRAM_HEADER_SIZE + image_len;

    out.extend_from_slice(&PT_LOAD.to_le_bytes());
    out.extend_from_slice(&(PF_R | PF_X).to_le_bytes());
    out.extend_from_slice(&0u64.to_le_bytes()); // p_offset
    out.extend_from_slice(&BASE_VADDR.to_le_bytes()); // p_vaddr
    out.extend_from_slice(&BASE_VADDR.to_le_bytes()); // p_paddr
    out.extend_from_slice(&total_len.to_le_bytes()); // p_filesz
    out.extend_from_slice(&total_len.to_le_bytes()); // p_memsz
    out.extend_from_slice(&SEGMENT_ALIGN.to_le_bytes()); // p_align

    debug_assert_eq!(out.len() as u64, ELF_HEADER_SIZE + PROGRAM_HEADER_SIZE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_starts_with_elf_magic() {
        let mut out = Vec::new();
        write_elf_header(&mut out, BASE_VADDR + ELF_HEADER_SIZE + PROGRAM_HEADER_SIZE);
        assert_eq!(&out[0..4], b"\x7fELF");
    }

    #[test]
    fn test_header_size_is_64_bytes() {
        let mut out = Vec::new();
        write_elf_header(&mut out, 0);
        assert_eq!(out.len(), 64);
    }

    #[test]
    fn test_program_header_size_is_56_bytes() {
        let mut out = Vec::new();
        write_program_header(&mut out, 0);
        assert_eq!(out.len(), 56);
    }

    #[test]
    fn test_entry_matches_code_load_addr() {
        let mut out = Vec::new();
        let entry = BASE_VADDR + ELF_HEADER_SIZE + PROGRAM_HEADER_SIZE;
        write_elf_header(&mut out, entry);
        let e_entry = u64::from_le_bytes(out[24..32].try_into().unwrap());
        assert_eq!(e_entry, entry);
    }
}
