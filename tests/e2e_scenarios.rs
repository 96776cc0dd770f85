//! The eight literal end-to-end scenarios.

mod common;

use common::{compile, compile_and_run, BuildError};

#[test]
fn test_return_zero() {
    assert_eq!(compile_and_run("func main() -> i32 { return 0; }"), 0);
}

#[test]
fn test_return_fixed_value() {
    assert_eq!(compile_and_run("func main() -> i32 { return 42; }"), 42);
}

#[test]
fn test_variables_and_addition() {
    let src = "func main() -> i32 { let x: i32 = 10; let y: i32 = 20; return x + y; }";
    assert_eq!(compile_and_run(src), 30);
}

#[test]
fn test_variables_and_subtraction() {
    let src = "func main() -> i32 { let x: i32 = 100; let y: i32 = 40; return x - y; }";
    assert_eq!(compile_and_run(src), 60);
}

#[test]
fn test_print_a_string_literal() {
    // print's sys_write is a side effect on stdout; the process still
    // exits 0 and compiles to a valid image either way.
    assert_eq!(compile_and_run(r#"func main() -> i32 { print("hi"); return 0; }"#), 0);
}

#[test]
fn test_dormant_function_is_emitted_but_not_executed() {
    let src = "func add(a: i32, b: i32) -> i32 { return a + b; } func main() -> i32 { return 7; }";
    assert_eq!(compile_and_run(src), 7);
}

#[test]
fn test_truncated_source_is_a_parse_error_and_nothing_is_written() {
    let result = compile("func main() -> i32 { return");
    assert!(matches!(result, Err(BuildError::Parse(_))));
}

#[test]
fn test_missing_main_is_a_backend_error() {
    let result = compile("func helper() -> i32 { return 0; }");
    assert!(matches!(result, Err(BuildError::Backend(_))));
}
