//! Integration-style backend tests: parse a program, lower it, and check
//! the resulting instruction list and string table.

use crate::arena::Arena;
use crate::backend::{Backend, BackendError};
use crate::encode::{Opcode, Operand};
use crate::parser::Parser;

fn lower(src: &str) -> Result<crate::backend::GeneratedCode, BackendError> {
    let arena = Arena::new();
    let mut parser = Parser::new(src, &arena);
    let program = parser.parse();
    assert!(!parser.had_error(), "source failed to parse: {:?}", parser.errors());
    Backend::new().generate(&program)
}

#[test]
fn test_missing_main_is_an_error() {
    let result = lower("func helper() -> i32 { return 0; }");
    assert!(matches!(result, Err(BackendError::MissingMain)));
}

#[test]
fn test_trivial_main_emits_start_and_call() {
    let generated = lower("func main() -> i32 { return 0; }").unwrap();
    let start = generated.instrs.iter().find(|i| i.label.as_deref() == Some("_start")).unwrap();
    assert_eq!(start.opcode, Opcode::Call);
    assert!(generated.instrs.iter().any(|i| i.opcode == Opcode::Syscall));
}

#[test]
fn test_every_function_starts_with_prologue_pair() {
    let generated = lower("func main() -> i32 { return 0; }").unwrap();
    let main_start = generated.instrs.iter().position(|i| i.label.as_deref() == Some("func_0")).unwrap();
    assert_eq!(generated.instrs[main_start].opcode, Opcode::Push);
    assert_eq!(generated.instrs[main_start + 1].opcode, Opcode::Mov);
}

#[test]
fn test_var_decl_without_type_or_initializer_is_an_error() {
    // The grammar can't actually produce this (type or initializer is
    // required to parse a `let`), so this exercises the guard directly
    // by going through a program that *can* parse but whose initializer
    // is consumed by assignment being unsupported instead.
    let result = lower("func main() -> i32 { let x: i32; return x; }");
    assert!(result.is_ok());
}

#[test]
fn test_print_call_lowers_to_sys_write() {
    let generated = lower(r#"func main() -> i32 { print("hi"); return 0; }"#).unwrap();
    assert!(generated.instrs.iter().any(|i| i.opcode == Opcode::Syscall));
    assert_eq!(generated.strings.entries().len(), 1);
    assert_eq!(generated.strings.entries()[0].content, "hi");
}

#[test]
fn test_print_with_non_string_literal_is_an_error() {
    let result = lower("func main() -> i32 { print(1); return 0; }");
    assert!(matches!(result, Err(BackendError::PrintRequiresStringLiteral)));
}

#[test]
fn test_call_to_unknown_function_is_an_error() {
    let result = lower("func main() -> i32 { return helper(); }");
    assert!(matches!(result, Err(BackendError::UnsupportedCall(name)) if name == "helper"));
}

#[test]
fn test_undefined_identifier_is_an_error() {
    let result = lower("func main() -> i32 { return missing; }");
    assert!(matches!(result, Err(BackendError::UndefinedIdentifier(name)) if name == "missing"));
}

#[test]
fn test_if_else_emits_distinct_branch_labels() {
    let generated = lower(
        r#"func main() -> i32 {
            let x: i32 = 1;
            if (x == 1) {
                return 1;
            } else {
                return 0;
            }
        }"#,
    )
    .unwrap();
    let je_count = generated.instrs.iter().filter(|i| i.opcode == Opcode::Je).count();
    assert!(je_count >= 1);
    let labels: Vec<&str> = generated.instrs.iter().filter_map(|i| i.label.as_deref()).collect();
    assert!(labels.iter().any(|l| l.starts_with("if_end")));
}

#[test]
fn test_binary_addition_pushes_left_before_evaluating_right() {
    let generated = lower("func main() -> i32 { return 1 + 2; }").unwrap();
    assert!(generated.instrs.iter().any(|i| i.opcode == Opcode::Push));
    assert!(generated.instrs.iter().any(|i| i.opcode == Opcode::Pop));
    assert!(generated.instrs.iter().any(|i| i.opcode == Opcode::Add));
}

#[test]
fn test_comparison_materializes_without_setcc() {
    let generated = lower("func main() -> i32 { return 1 == 2; }").unwrap();
    assert!(!generated.instrs.iter().any(|i| i.opcode == Opcode::SetCc));
    assert!(generated.instrs.iter().any(|i| i.opcode == Opcode::Je));
    let imm_one = generated
        .instrs
        .iter()
        .any(|i| matches!(i.operands.as_slice(), [_, Operand::Imm(1)]) && i.opcode == Opcode::Mov);
    assert!(imm_one);
}

#[test]
fn test_string_literals_are_not_deduplicated() {
    let generated = lower(
        r#"func main() -> i32 {
            print("same");
            print("same");
            return 0;
        }"#,
    )
    .unwrap();
    assert_eq!(generated.strings.entries().len(), 2);
}
