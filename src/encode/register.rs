//! x86-64 general-purpose register identifiers and their bit-level encoding.

/// One of the 16 x86-64 general-purpose registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    Rax,
    Rcx,
    Rdx,
    Rbx,
    Rsp,
    Rbp,
    Rsi,
    Rdi,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
}

impl Reg {
    /// The register's full 4-bit x86-64 encoding (0-15).
    pub fn code(self) -> u8 {
        match self {
            Reg::Rax => 0,
            Reg::Rcx => 1,
            Reg::Rdx => 2,
            Reg::Rbx => 3,
            Reg::Rsp => 4,
            Reg::Rbp => 5,
            Reg::Rsi => 6,
            Reg::Rdi => 7,
            Reg::R8 => 8,
            Reg::R9 => 9,
            Reg::R10 => 10,
            Reg::R11 => 11,
            Reg::R12 => 12,
            Reg::R13 => 13,
            Reg::R14 => 14,
            Reg::R15 => 15,
        }
    }

    /// The low 3 bits used directly in opcode and ModR/M fields.
    pub fn low3(self) -> u8 {
        self.code() & 0x7
    }

    /// Whether this register is one of R8-R15, requiring a REX extension
    /// bit (B, R, or X depending on the field it occupies) to address.
    pub fn is_extended(self) -> bool {
        self.code() >= 8
    }
}
