//! The pseudo-instruction IR the backend builds and the encoder consumes,
//! plus the byte-level encoding of each supported instruction form.

use super::register::Reg;

/// Opcode tags for the minimum instruction set the backend may emit.
///
/// `Lea`, `Int3`, `SetCc`, and `Movzx` are named here because they belong
/// to the minimum opcode set, but the backend never constructs them: every
/// value the backend needs is either loaded directly or produced by a
/// compare-and-branch sequence. They fall through to a single `0x90` (NOP)
/// byte in [`encode_instr`], exactly as unsupported opcodes are specified
/// to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Mov,
    Push,
    Pop,
    Add,
    Sub,
    Mul,
    Cqo,
    Idiv,
    Cmp,
    Jmp,
    Je,
    Jne,
    Jl,
    Jle,
    Jg,
    Jge,
    Call,
    Ret,
    Nop,
    Syscall,
    Xor,
    Lea,
    Int3,
    SetCc,
    Movzx,
}

/// An instruction operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Reg(Reg),
    Imm(i64),
    /// `[base + disp]`.
    Mem { base: Reg, disp: i32 },
    /// A `jmp`/`jcc`/`call` target, resolved to a rel32 displacement
    /// against the resolved label's address during encoding.
    Label(String),
    /// An absolute-address immediate load resolved against the string
    /// table's data region during encoding, used only with `Mov`.
    StringAddr(String),
}

/// One pseudo-instruction: an opcode, its operands, and an optional label
/// marking this instruction's own address.
#[derive(Debug, Clone)]
pub struct Instr {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
    pub label: Option<String>,
}

impl Instr {
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Instr { opcode, operands, label: None }
    }
}

fn rex(w: bool, r: bool, x: bool, b: bool) -> u8 {
    0x40 | ((w as u8) << 3) | ((r as u8) << 2) | ((x as u8) << 1) | (b as u8)
}

fn modrm(modbits: u8, reg: u8, rm: u8) -> u8 {
    (modbits << 6) | ((reg & 0x7) << 3) | (rm & 0x7)
}

/// The fixed byte length of `instr` once encoded. Must stay in lockstep
/// with [`encode_instr`] — every branch there has a matching branch here
/// returning the same length, since pass one of the encoder needs label
/// addresses before it has resolved bytes to measure.
pub fn instr_len(instr: &Instr) -> u64 {
    use Opcode::*;
    match (instr.opcode, instr.operands.as_slice()) {
        (Mov, [Operand::Reg(_), Operand::Imm(_)]) => 10,
        (Mov, [Operand::Reg(_), Operand::StringAddr(_)]) => 10,
        (Mov, [Operand::Reg(_), Operand::Reg(_)]) => 3,
        (Mov, [Operand::Reg(_), Operand::Mem { .. }]) => 7,
        (Mov, [Operand::Mem { .. }, Operand::Reg(_)]) => 7,
        (Push, [Operand::Reg(r)]) => if r.is_extended() { 2 } else { 1 },
        (Pop, [Operand::Reg(r)]) => if r.is_extended() { 2 } else { 1 },
        (Add, [Operand::Reg(_), Operand::Reg(_)]) => 3,
        (Sub, [Operand::Reg(_), Operand::Reg(_)]) => 3,
        (Xor, [Operand::Reg(_), Operand::Reg(_)]) => 3,
        (Mul, [Operand::Reg(_), Operand::Reg(_)]) => 4,
        (Cqo, []) => 2,
        (Idiv, [Operand::Reg(_)]) => 3,
        (Cmp, [Operand::Reg(_), Operand::Imm(_)]) => 7,
        (Cmp, [Operand::Reg(_), Operand::Reg(_)]) => 3,
        (Jmp, [Operand::Label(_)]) => 5,
        (Je, [Operand::Label(_)])
        | (Jne, [Operand::Label(_)])
        | (Jl, [Operand::Label(_)])
        | (Jle, [Operand::Label(_)])
        | (Jg, [Operand::Label(_)])
        | (Jge, [Operand::Label(_)]) => 6,
        (Call, [Operand::Label(_)]) => 5,
        (Ret, []) => 1,
        (Syscall, []) => 2,
        (Lea, _) | (Int3, _) | (SetCc, _) | (Movzx, _) | (Nop, _) => 1,
        other => unreachable!("unsupported instruction shape in instr_len: {:?}", other),
    }
}

/// Encodes `instr` to machine code bytes.
///
/// `next_addr` is the virtual address of the byte immediately following
/// this instruction (needed for rel32 math). `resolve` maps a label name
/// to its resolved virtual address, used for jump/call targets and
/// string-address loads.
pub fn encode_instr(
    instr: &Instr,
    next_addr: u64,
    resolve: &dyn Fn(&str) -> Option<u64>,
) -> Result<Vec<u8>, super::EncodeError> {
    use Opcode::*;
    let bytes = match (instr.opcode, instr.operands.as_slice()) {
        (Mov, [Operand::Reg(dst), Operand::Imm(imm)]) => {
            let mut out = vec![rex(true, false, false, dst.is_extended()), 0xB8 + dst.low3()];
            out.extend_from_slice(&imm.to_le_bytes());
            out
        }
        (Mov, [Operand::Reg(dst), Operand::StringAddr(label)]) => {
            let addr = resolve(label).ok_or_else(|| super::EncodeError::unresolved_label(label))?;
            let mut out = vec![rex(true, false, false, dst.is_extended()), 0xB8 + dst.low3()];
            out.extend_from_slice(&addr.to_le_bytes());
            out
        }
        (Mov, [Operand::Reg(dst), Operand::Reg(src)]) => vec![
            rex(true, src.is_extended(), false, dst.is_extended()),
            0x89,
            modrm(0b11, src.low3(), dst.low3()),
        ],
        (Mov, [Operand::Reg(dst), Operand::Mem { base, disp }]) => {
            let mut out = vec![
                rex(true, dst.is_extended(), false, base.is_extended()),
                0x8B,
                modrm(0b10, dst.low3(), base.low3()),
            ];
            out.extend_from_slice(&disp.to_le_bytes());
            out
        }
        (Mov, [Operand::Mem { base, disp }, Operand::Reg(src)]) => {
            let mut out = vec![
                rex(true, src.is_extended(), false, base.is_extended()),
                0x89,
                modrm(0b10, src.low3(), base.low3()),
            ];
            out.extend_from_slice(&disp.to_le_bytes());
            out
        }
        (Push, [Operand::Reg(r)]) => {
            if r.is_extended() {
                vec![rex(false, false, false, true), 0x50 + r.low3()]
            } else {
                vec![0x50 + r.low3()]
            }
        }
        (Pop, [Operand::Reg(r)]) => {
            if r.is_extended() {
                vec![rex(false, false, false, true), 0x58 + r.low3()]
            } else {
                vec![0x58 + r.low3()]
            }
        }
        (Add, [Operand::Reg(dst), Operand::Reg(src)]) => vec![
            rex(true, src.is_extended(), false, dst.is_extended()),
            0x01,
            modrm(0b11, src.low3(), dst.low3()),
        ],
        (Sub, [Operand::Reg(dst), Operand::Reg(src)]) => vec![
            rex(true, src.is_extended(), false, dst.is_extended()),
            0x29,
            modrm(0b11, src.low3(), dst.low3()),
        ],
        (Xor, [Operand::Reg(dst), Operand::Reg(src)]) => vec![
            rex(true, src.is_extended(), false, dst.is_extended()),
            0x31,
            modrm(0b11, src.low3(), dst.low3()),
        ],
        (Mul, [Operand::Reg(dst), Operand::Reg(src)]) => vec![
            rex(true, dst.is_extended(), false, src.is_extended()),
            0x0F,
            0xAF,
            modrm(0b11, dst.low3(), src.low3()),
        ],
        (Cqo, []) => vec![rex(true, false, false, false), 0x99],
        (Idiv, [Operand::Reg(divisor)]) => vec![
            rex(true, false, false, divisor.is_extended()),
            0xF7,
            modrm(0b11, 7, divisor.low3()),
        ],
        (Cmp, [Operand::Reg(dst), Operand::Imm(imm)]) => {
            let mut out =
                vec![rex(true, false, false, dst.is_extended()), 0x81, modrm(0b11, 7, dst.low3())];
            out.extend_from_slice(&(*imm as i32).to_le_bytes());
            out
        }
        (Cmp, [Operand::Reg(dst), Operand::Reg(src)]) => vec![
            rex(true, src.is_extended(), false, dst.is_extended()),
            0x39,
            modrm(0b11, src.low3(), dst.low3()),
        ],
        (Jmp, [Operand::Label(label)]) => {
            let target = resolve(label).ok_or_else(|| super::EncodeError::unresolved_label(label))?;
            let rel = (target as i64 - next_addr as i64) as i32;
            let mut out = vec![0xE9];
            out.extend_from_slice(&rel.to_le_bytes());
            out
        }
        (jcc @ (Je | Jne | Jl | Jle | Jg | Jge), [Operand::Label(label)]) => {
            let target = resolve(label).ok_or_else(|| super::EncodeError::unresolved_label(label))?;
            let rel = (target as i64 - next_addr as i64) as i32;
            let opcode_byte = match jcc {
                Je => 0x84,
                Jne => 0x85,
                Jl => 0x8C,
                Jge => 0x8D,
                Jle => 0x8E,
                Jg => 0x8F,
                _ => unreachable!(),
            };
            let mut out = vec![0x0F, opcode_byte];
            out.extend_from_slice(&rel.to_le_bytes());
            out
        }
        (Call, [Operand::Label(label)]) => {
            let target = resolve(label).ok_or_else(|| super::EncodeError::unresolved_label(label))?;
            let rel = (target as i64 - next_addr as i64) as i32;
            let mut out = vec![0xE8];
            out.extend_from_slice(&rel.to_le_bytes());
            out
        }
        (Ret, []) => vec![0xC3],
        (Syscall, []) => vec![0x0F, 0x05],
        (Lea, _) | (Int3, _) | (SetCc, _) | (Movzx, _) | (Nop, _) => vec![0x90],
        other => unreachable!("unsupported instruction shape in encode_instr: {:?}", other),
    };

    debug_assert_eq!(bytes.len() as u64, instr_len(instr));
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_none(_: &str) -> Option<u64> {
        None
    }

    #[test]
    fn test_mov_reg_imm64() {
        let instr = Instr::new(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Imm(42)]);
        let bytes = encode_instr(&instr, 0, &resolve_none).unwrap();
        assert_eq!(bytes[0], 0x48);
        assert_eq!(bytes[1], 0xB8);
        assert_eq!(&bytes[2..10], &42i64.to_le_bytes());
    }

    #[test]
    fn test_ret_and_syscall() {
        assert_eq!(encode_instr(&Instr::new(Opcode::Ret, vec![]), 0, &resolve_none).unwrap(), vec![0xC3]);
        assert_eq!(
            encode_instr(&Instr::new(Opcode::Syscall, vec![]), 0, &resolve_none).unwrap(),
            vec![0x0F, 0x05]
        );
    }

    #[test]
    fn test_push_pop_extended_register_sets_rex_b() {
        let push = Instr::new(Opcode::Push, vec![Operand::Reg(Reg::R12)]);
        let bytes = encode_instr(&push, 0, &resolve_none).unwrap();
        assert_eq!(bytes, vec![0x41, 0x50 + Reg::R12.low3()]);
    }

    #[test]
    fn test_unresolved_label_is_error() {
        let instr = Instr::new(Opcode::Call, vec![Operand::Label("missing".to_string())]);
        assert!(encode_instr(&instr, 0, &resolve_none).is_err());
    }

    #[test]
    fn test_call_rel32_is_relative_to_next_instruction() {
        let resolve = |name: &str| if name == "target" { Some(0x1000) } else { None };
        let instr = Instr::new(Opcode::Call, vec![Operand::Label("target".to_string())]);
        let bytes = encode_instr(&instr, 0x1010, &resolve).unwrap();
        assert_eq!(bytes[0], 0xE8);
        let rel = i32::from_le_bytes(bytes[1..5].try_into().unwrap());
        assert_eq!(rel, 0x1000 - 0x1010);
    }

    #[test]
    fn test_nop_fallback_for_unimplemented_opcodes() {
        for opcode in [Opcode::Lea, Opcode::Int3, Opcode::SetCc, Opcode::Movzx] {
            let instr = Instr::new(opcode, vec![]);
            assert_eq!(encode_instr(&instr, 0, &resolve_none).unwrap(), vec![0x90]);
        }
    }

    #[test]
    fn test_instr_len_matches_encoded_length() {
        let cases = vec![
            Instr::new(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Imm(1)]),
            Instr::new(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Reg(Reg::Rbx)]),
            Instr::new(Opcode::Add, vec![Operand::Reg(Reg::Rax), Operand::Reg(Reg::Rbx)]),
            Instr::new(Opcode::Push, vec![Operand::Reg(Reg::Rax)]),
            Instr::new(Opcode::Cmp, vec![Operand::Reg(Reg::Rax), Operand::Imm(0)]),
        ];
        let resolve = |_: &str| Some(0u64);
        for instr in cases {
            let bytes = encode_instr(&instr, 0, &resolve).unwrap();
            assert_eq!(bytes.len() as u64, instr_len(&instr));
        }
    }
}
