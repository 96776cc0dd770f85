//! Expression lowering.
//!
//! Every expression materializes its result into a caller-specified
//! register; `rax` and `rbx` are free for lowering to use as scratch
//! while doing so.

use super::frame::Frame;
use super::{Backend, BackendError};
use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::encode::{Opcode, Operand, Reg};

impl Backend {
    pub(super) fn lower_expr(
        &mut self,
        expr: &Expr,
        frame: &Frame,
        target: Reg,
    ) -> Result<(), BackendError> {
        match expr {
            Expr::Literal(lit, _) => self.lower_literal(lit, target),
            Expr::Identifier(name, _) => self.lower_identifier(name, frame, target),
            Expr::Binary { op, left, right, .. } => self.lower_binary(*op, left, right, frame, target),
            Expr::Unary { op, operand, .. } => self.lower_unary(*op, operand, frame, target),
            Expr::Call { callee, args, .. } => self.lower_call(callee, args, frame, target),
        }
    }

    fn lower_literal(&mut self, lit: &Literal, target: Reg) -> Result<(), BackendError> {
        match lit {
            Literal::Number(n) => self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Imm(*n as i64)]),
            Literal::Bool(b) => {
                self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Imm(if *b { 1 } else { 0 })])
            }
            Literal::Null => self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Imm(0)]),
            Literal::String(s) => {
                let label = self.intern_string(s);
                self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::StringAddr(label)]);
            }
        }
        Ok(())
    }

    fn lower_identifier(&mut self, name: &str, frame: &Frame, target: Reg) -> Result<(), BackendError> {
        let var = frame
            .resolve(name)
            .ok_or_else(|| BackendError::UndefinedIdentifier(name.to_string()))?;
        self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Mem { base: Reg::Rbp, disp: -var.offset }]);
        Ok(())
    }

    fn lower_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
        frame: &Frame,
        target: Reg,
    ) -> Result<(), BackendError> {
        self.lower_expr(left, frame, Reg::Rax)?;
        self.push(Opcode::Push, vec![Operand::Reg(Reg::Rax)]);
        self.lower_expr(right, frame, Reg::Rbx)?;
        self.push(Opcode::Pop, vec![Operand::Reg(Reg::Rax)]);

        match op {
            BinaryOp::Add | BinaryOp::Or => {
                // `||` reuses ADD: both operands are already 0/1, and the
                // result only ever needs to be tested against zero.
                self.push(Opcode::Add, vec![Operand::Reg(Reg::Rax), Operand::Reg(Reg::Rbx)]);
                self.move_if_needed(Reg::Rax, target);
            }
            BinaryOp::Sub => {
                self.push(Opcode::Sub, vec![Operand::Reg(Reg::Rax), Operand::Reg(Reg::Rbx)]);
                self.move_if_needed(Reg::Rax, target);
            }
            BinaryOp::Mul | BinaryOp::And => {
                // `&&` reuses MUL for the same reason `||` reuses ADD.
                self.push(Opcode::Mul, vec![Operand::Reg(Reg::Rax), Operand::Reg(Reg::Rbx)]);
                self.move_if_needed(Reg::Rax, target);
            }
            BinaryOp::Div => {
                self.push(Opcode::Cqo, vec![]);
                self.push(Opcode::Idiv, vec![Operand::Reg(Reg::Rbx)]);
                self.move_if_needed(Reg::Rax, target);
            }
            BinaryOp::Mod => {
                self.push(Opcode::Cqo, vec![]);
                self.push(Opcode::Idiv, vec![Operand::Reg(Reg::Rbx)]);
                self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Reg(Reg::Rdx)]);
                self.move_if_needed(Reg::Rax, target);
            }
            BinaryOp::Eq | BinaryOp::Is => self.materialize_condition(Opcode::Je, target),
            BinaryOp::NotEq => self.materialize_condition(Opcode::Jne, target),
            BinaryOp::Lt => self.materialize_condition(Opcode::Jl, target),
            BinaryOp::LtEq => self.materialize_condition(Opcode::Jle, target),
            BinaryOp::Gt => self.materialize_condition(Opcode::Jg, target),
            BinaryOp::GtEq => self.materialize_condition(Opcode::Jge, target),
        }

        Ok(())
    }

    /// Compares `rax` against `rbx` and materializes `1`/`0` into `target`
    /// depending on whether `jcc` would be taken, without ever needing a
    /// `SETcc` instruction.
    fn materialize_condition(&mut self, jcc: Opcode, target: Reg) {
        self.push(Opcode::Cmp, vec![Operand::Reg(Reg::Rax), Operand::Reg(Reg::Rbx)]);
        let true_label = self.next_label("cond_true");
        let end_label = self.next_label("cond_end");
        self.push(jcc, vec![Operand::Label(true_label.clone())]);
        self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Imm(0)]);
        self.push(Opcode::Jmp, vec![Operand::Label(end_label.clone())]);
        self.set_pending_label(true_label);
        self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Imm(1)]);
        self.set_pending_label(end_label);
    }

    fn lower_unary(&mut self, op: UnaryOp, operand: &Expr, frame: &Frame, target: Reg) -> Result<(), BackendError> {
        self.lower_expr(operand, frame, target)?;
        match op {
            UnaryOp::Neg => {
                // Scratch register must differ from `target`, or loading
                // -1 into it would clobber the operand just computed there.
                let scratch = if target == Reg::Rax { Reg::Rbx } else { Reg::Rax };
                self.push(Opcode::Mov, vec![Operand::Reg(scratch), Operand::Imm(-1)]);
                self.push(Opcode::Mul, vec![Operand::Reg(target), Operand::Reg(scratch)]);
            }
            UnaryOp::Not => {
                self.push(Opcode::Cmp, vec![Operand::Reg(target), Operand::Imm(0)]);
                let true_label = self.next_label("not_true");
                let end_label = self.next_label("not_end");
                self.push(Opcode::Je, vec![Operand::Label(true_label.clone())]);
                self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Imm(0)]);
                self.push(Opcode::Jmp, vec![Operand::Label(end_label.clone())]);
                self.set_pending_label(true_label);
                self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Imm(1)]);
                self.set_pending_label(end_label);
            }
        }
        Ok(())
    }

    /// Only direct calls to the built-in `print` are supported; everything
    /// else is a fatal backend error per the core's non-goals.
    fn lower_call(&mut self, callee: &Expr, args: &[&Expr], frame: &Frame, target: Reg) -> Result<(), BackendError> {
        let Expr::Identifier(name, _) = callee else {
            return Err(BackendError::UnsupportedCallee);
        };

        if *name != "print" {
            return Err(BackendError::UnsupportedCall((*name).to_string()));
        }

        let Some(Expr::Literal(Literal::String(text), _)) = args.first().copied() else {
            return Err(BackendError::PrintRequiresStringLiteral);
        };

        let label = self.intern_string(text);
        self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Imm(1)]);
        self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rdi), Operand::Imm(1)]);
        self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rsi), Operand::StringAddr(label)]);
        self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rdx), Operand::Imm(text.len() as i64)]);
        self.push(Opcode::Syscall, vec![]);

        // `print` has no return value; leave `target` at a defined value.
        self.move_if_needed_from_imm(0, target);
        Ok(())
    }

    fn move_if_needed(&mut self, from: Reg, target: Reg) {
        if from != target {
            self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Reg(from)]);
        }
    }

    fn move_if_needed_from_imm(&mut self, imm: i64, target: Reg) {
        self.push(Opcode::Mov, vec![Operand::Reg(target), Operand::Imm(imm)]);
    }
}
