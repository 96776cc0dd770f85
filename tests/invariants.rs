//! Backend and ELF invariants from the testable-properties list.

mod common;

use common::compile;

#[test]
fn test_elf_starts_with_magic() {
    let image = compile("func main() -> i32 { return 0; }").unwrap();
    assert_eq!(&image[0..4], b"\x7fELF");
}

#[test]
fn test_elf_entry_matches_header_and_phdr_size() {
    let image = compile("func main() -> i32 { return 0; }").unwrap();
    let e_entry = u64::from_le_bytes(image[24..32].try_into().unwrap());
    let p_vaddr = u64::from_le_bytes(image[64 + 16..64 + 24].try_into().unwrap());
    assert_eq!(e_entry, p_vaddr + 64 + 56);
}

#[test]
fn test_elf_filesz_equals_memsz_equals_whole_image() {
    let image = compile("func main() -> i32 { print(\"x\"); return 0; }").unwrap();
    let filesz = u64::from_le_bytes(image[64 + 32..64 + 40].try_into().unwrap());
    let memsz = u64::from_le_bytes(image[64 + 40..64 + 48].try_into().unwrap());
    assert_eq!(filesz, memsz);
    assert_eq!(filesz, image.len() as u64);
}

#[test]
fn test_if_else_exit_codes_take_the_right_branch() {
    let taken = "func main() -> i32 { if (1 == 1) { return 11; } else { return 22; } }";
    let not_taken = "func main() -> i32 { if (1 == 2) { return 11; } else { return 22; } }";
    assert_eq!(common::compile_and_run(taken), 11);
    assert_eq!(common::compile_and_run(not_taken), 22);
}

#[test]
fn test_if_without_else_falls_through() {
    let src = "func main() -> i32 { if (false) { return 1; } return 5; }";
    assert_eq!(common::compile_and_run(src), 5);
}

#[test]
fn test_boolean_and_or_short_circuit_truthiness() {
    let src = "func main() -> i32 { if ((1 == 1) && (2 == 2)) { return 1; } return 0; }";
    assert_eq!(common::compile_and_run(src), 1);
    let src = "func main() -> i32 { if ((1 == 2) || (2 == 2)) { return 1; } return 0; }";
    assert_eq!(common::compile_and_run(src), 1);
}

#[test]
fn test_unary_not_and_negation() {
    let src = "func main() -> i32 { if (!(1 == 2)) { return 9; } return 0; }";
    assert_eq!(common::compile_and_run(src), 9);
}

#[test]
fn test_division_and_modulo() {
    let src = "func main() -> i32 { let x: i32 = 17; let y: i32 = 5; return x % y; }";
    assert_eq!(common::compile_and_run(src), 2);
    let src = "func main() -> i32 { let x: i32 = 20; let y: i32 = 4; return x / y; }";
    assert_eq!(common::compile_and_run(src), 5);
}
