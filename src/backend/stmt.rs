//! Statement and block lowering.

use super::frame::Frame;
use super::{Backend, BackendError};
use crate::ast::{Stmt, Type};
use crate::encode::{Opcode, Operand, Reg};

impl Backend {
    pub(super) fn lower_stmt(&mut self, stmt: &Stmt, frame: &mut Frame) -> Result<(), BackendError> {
        match stmt {
            Stmt::VarDecl { name, declared_type, initializer, is_const, .. } => {
                self.lower_var_decl(name, *declared_type, *initializer, *is_const, frame)
            }
            Stmt::Return { value, .. } => self.lower_return(*value, frame),
            Stmt::If { condition, then_block, else_block, .. } => {
                self.lower_if(condition, then_block, *else_block, frame)
            }
            Stmt::Block(block) => self.lower_block(block, frame),
            Stmt::Expression(expr) => {
                self.lower_expr(expr, frame, Reg::Rax)?;
                Ok(())
            }
        }
    }

    fn lower_var_decl(
        &mut self,
        name: &str,
        declared_type: Option<Type>,
        initializer: Option<&crate::ast::Expr>,
        is_const: bool,
        frame: &mut Frame,
    ) -> Result<(), BackendError> {
        if declared_type.is_none() && initializer.is_none() {
            return Err(BackendError::UntypedUninitializedVariable(name.to_string()));
        }

        let ty = declared_type.unwrap_or(Type::Unknown);

        match initializer {
            Some(expr) => {
                self.lower_expr(expr, frame, Reg::Rax)?;
                let offset = frame.declare(name, ty, is_const);
                self.push(Opcode::Mov, vec![Operand::Mem { base: Reg::Rbp, disp: -offset }, Operand::Reg(Reg::Rax)]);
            }
            None => {
                let offset = frame.declare(name, ty, is_const);
                self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Imm(0)]);
                self.push(Opcode::Mov, vec![Operand::Mem { base: Reg::Rbp, disp: -offset }, Operand::Reg(Reg::Rax)]);
            }
        }

        Ok(())
    }

    fn lower_return(&mut self, value: Option<&crate::ast::Expr>, frame: &Frame) -> Result<(), BackendError> {
        match value {
            Some(expr) => self.lower_expr(expr, frame, Reg::Rax)?,
            None => self.push(Opcode::Mov, vec![Operand::Reg(Reg::Rax), Operand::Imm(0)]),
        }
        self.emit_epilogue();
        Ok(())
    }

    fn lower_if(
        &mut self,
        condition: &crate::ast::Expr,
        then_block: &crate::ast::Block,
        else_block: Option<&crate::ast::Block>,
        frame: &mut Frame,
    ) -> Result<(), BackendError> {
        self.lower_expr(condition, frame, Reg::Rax)?;
        self.push(Opcode::Cmp, vec![Operand::Reg(Reg::Rax), Operand::Imm(0)]);

        let end_label = self.next_label("if_end");

        match else_block {
            Some(else_block) => {
                let else_label = self.next_label("if_else");
                self.push(Opcode::Je, vec![Operand::Label(else_label.clone())]);
                self.lower_block(then_block, frame)?;
                self.push(Opcode::Jmp, vec![Operand::Label(end_label.clone())]);
                self.set_pending_label(else_label);
                self.lower_block(else_block, frame)?;
            }
            None => {
                // No else branch: a false condition jumps straight past
                // the then-block to `end_label`.
                self.push(Opcode::Je, vec![Operand::Label(end_label.clone())]);
                self.lower_block(then_block, frame)?;
            }
        }

        self.set_pending_label(end_label);
        Ok(())
    }
}
