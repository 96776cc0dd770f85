//! The native code generator: walks the AST and builds the ordered list
//! of pseudo-instructions the [`crate::encode`] module turns into bytes.
//!
//! # Calling convention and frame layout
//!
//! Every function's prologue is exactly `push rbp; mov rbp, rsp`, and
//! every return path's epilogue is exactly `mov rsp, rbp; pop rbp; ret`.
//! Parameters and locals each reserve an 8-byte slot at `[rbp - offset]`
//! regardless of declared type, starting at offset 8. Parameter slots are
//! allocated so identifier lookups resolve, but nothing marshals an
//! incoming argument into them — this repository calls no function other
//! than the special-cased `print`, so no call site ever needs to place an
//! argument into a callee's parameter slot.
//!
//! # Entry point
//!
//! After every function is lowered, a `_start` label is emitted:
//! `call <main>; mov rdi, rax; mov rax, 60; syscall`. A program with no
//! `main` function is a fatal [`BackendError`].
//!
//! # Module Structure
//!
//! - [`error`] - Backend error type
//! - `frame` - Per-function variable symbol table and slot allocation
//! - `strings` - String literal table
//! - `expr` - Expression lowering
//! - `stmt` - Statement and block lowering
//!
//! # See Also
//!
//! * [`crate::ast`] - The tree this module consumes
//! * [`crate::encode`] - Consumes the instruction list this module builds

mod error;
mod expr;
mod frame;
mod stmt;
mod strings;

#[cfg(test)]
mod tests;

pub use error::BackendError;
pub use strings::StringTable;

use crate::ast::{Block, FunctionDecl, Program, Stmt};
use crate::encode::{Instr, Opcode, Operand, Reg};
use frame::Frame;

/// The generated program: the flat instruction list (every function, in
/// declaration order, followed by `_start`) and the string literal table
/// collected while lowering it.
pub struct GeneratedCode {
    pub instrs: Vec<Instr>,
    pub strings: StringTable,
}

/// Builds the pseudo-instruction list for a whole [`Program`].
pub struct Backend {
    instrs: Vec<Instr>,
    strings: StringTable,
    label_counter: usize,
    pending_label: Option<String>,
}

impl Backend {
    pub fn new() -> Self {
        Backend { instrs: Vec::new(), strings: StringTable::new(), label_counter: 0, pending_label: None }
    }

    /// Emits `_start` first, then lowers every function declaration.
    ///
    /// `_start` has to come first so its resolved address is
    /// `CODE_LOAD_ADDR`, matching `e_entry`; the `call <main>` inside it is
    /// a forward reference, resolved like any other label in pass two.
    pub fn generate(mut self, program: &Program) -> Result<GeneratedCode, BackendError> {
        let main_label = program
            .functions
            .iter()
            .position(|func| func.name == "main")
            .map(|i| format!("func_{}", i))
            .ok_or(BackendError::MissingMain)?;
        self.emit_start(&main_label);

        for (i, func) in program.functions.iter().enumerate() {
            let label = format!("func_{}", i);
            self.lower_function(func, &label)?;
        }

        Ok(GeneratedCode { instrs: self.instrs, strings: self.strings })
    }

    fn lower_function(&mut self, func: &FunctionDecl, label: &str) -> Result<(), BackendError> {
        self.set_pending_label(label.to_string());
        self.push(Opcode::Push, vec![Operand::Reg(Reg::Rbp)]);
        self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rbp), Operand::Reg(Reg::Rsp)]);

        let mut frame = Frame::new();
        for param in func.params {
            frame.declare(param.name, param.ty, false);
        }

        self.lower_block(func.body, &mut frame)?;

        if !Self::block_ends_in_return(func.body) {
            self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Imm(0)]);
            self.emit_epilogue();
        }

        Ok(())
    }

    fn block_ends_in_return(block: &Block) -> bool {
        matches!(block.stmts.last(), Some(Stmt::Return { .. }))
    }

    fn emit_start(&mut self, main_label: &str) {
        self.set_pending_label("_start".to_string());
        self.push(Opcode::Call, vec![Operand::Label(main_label.to_string())]);
        self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rdi), Operand::Reg(Reg::Rax)]);
        self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Imm(60)]);
        self.push(Opcode::Syscall, vec![]);
    }

    pub(super) fn emit_epilogue(&mut self) {
        self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rsp), Operand::Reg(Reg::Rbp)]);
        self.push(Opcode::Pop, vec![Operand::Reg(Reg::Rbp)]);
        self.push(Opcode::Ret, vec![]);
    }

    /// Appends an instruction, attaching any pending label to it.
    pub(super) fn push(&mut self, opcode: Opcode, operands: Vec<Operand>) {
        let mut instr = Instr::new(opcode, operands);
        instr.label = self.pending_label.take();
        self.instrs.push(instr);
    }

    /// Marks `label` to be attached to the next instruction pushed,
    /// whichever one that turns out to be.
    pub(super) fn set_pending_label(&mut self, label: String) {
        self.pending_label = Some(label);
    }

    /// Generates a unique label with the given prefix (e.g. `if_0_else`).
    pub(super) fn next_label(&mut self, prefix: &str) -> String {
        let label = format!("{}_{}", prefix, self.label_counter);
        self.label_counter += 1;
        label
    }

    pub(super) fn intern_string(&mut self, content: &str) -> String {
        self.strings.intern(content)
    }

    pub(super) fn lower_block(&mut self, block: &Block, frame: &mut Frame) -> Result<(), BackendError> {
        for stmt in block.stmts {
            self.lower_stmt(stmt, frame)?;
        }
        Ok(())
    }
}

impl Default for Backend {
    fn default() -> Self {
        Backend::new()
    }
}
