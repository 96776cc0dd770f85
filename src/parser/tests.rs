//! Integration-style parser tests spanning multiple statements and
//! declarations at once.

use crate::arena::Arena;
use crate::ast::{BinaryOp, Expr, Stmt};
use crate::parser::Parser;

#[test]
fn test_parses_multiple_functions() {
    let arena = Arena::new();
    let mut parser = Parser::new(
        "func add(a: i32, b: i32) -> i32 { return a + b; }\nfunc main() -> i32 { return add(1, 2); }",
        &arena,
    );
    let program = parser.parse();
    assert!(!parser.had_error());
    assert_eq!(program.functions.len(), 2);
    assert_eq!(program.functions[0].name, "add");
    assert_eq!(program.functions[1].name, "main");
}

#[test]
fn test_if_else_and_var_decl() {
    let arena = Arena::new();
    let src = r#"
    func main() -> i32 {
        let x: i32 = 1;
        if (x == 1) {
            return 1;
        } else {
            return 0;
        }
    }
    "#;
    let mut parser = Parser::new(src, &arena);
    let program = parser.parse();
    assert!(!parser.had_error());
    let body = program.functions[0].body;
    assert_eq!(body.stmts.len(), 2);
    assert!(matches!(body.stmts[0], Stmt::VarDecl { .. }));
    match body.stmts[1] {
        Stmt::If { else_block: Some(_), .. } => {}
        _ => panic!("expected if/else"),
    }
}

#[test]
fn test_else_if_is_not_supported() {
    // else only accepts a block, not a nested if, per the grammar.
    let arena = Arena::new();
    let src = "func main() -> i32 { if (true) { return 1; } else if (false) { return 0; } }";
    let mut parser = Parser::new(src, &arena);
    parser.parse();
    assert!(parser.had_error());
}

#[test]
fn test_expression_precedence() {
    let arena = Arena::new();
    let mut parser = Parser::new("func main() -> i32 { return 1 + 2 * 3; }", &arena);
    let program = parser.parse();
    assert!(!parser.had_error());
    let Stmt::Return { value: Some(expr), .. } = program.functions[0].body.stmts[0] else {
        panic!("expected return statement");
    };
    match expr {
        Expr::Binary { op: BinaryOp::Add, right, .. } => {
            assert!(matches!(right, Expr::Binary { op: BinaryOp::Mul, .. }));
        }
        _ => panic!("expected top-level addition"),
    }
}

#[test]
fn test_assignment_expression_is_not_supported() {
    let arena = Arena::new();
    let mut parser = Parser::new("func main() -> i32 { x = 1; return 0; }", &arena);
    parser.parse();
    assert!(parser.had_error());
}

#[test]
fn test_multiple_errors_collected_and_recovery_continues() {
    let arena = Arena::new();
    let src = "func a( -> i32 { }\nfunc b() -> i32 { return 1; }";
    let mut parser = Parser::new(src, &arena);
    let program = parser.parse();
    assert!(parser.had_error());
    assert!(!parser.errors().is_empty());
    // Recovery should still reach the second, well-formed function.
    assert!(program.functions.iter().any(|f| f.name == "b"));
}

#[test]
fn test_stray_closing_brace_at_top_level_does_not_stall() {
    let arena = Arena::new();
    let mut parser = Parser::new("}\nfunc main() -> i32 { return 0; }", &arena);
    let program = parser.parse();
    assert!(parser.had_error());
    assert_eq!(program.functions.len(), 1);
    assert_eq!(program.functions[0].name, "main");
}

#[test]
fn test_call_with_arguments_and_nested_expression() {
    let arena = Arena::new();
    let mut parser = Parser::new("func main() -> i32 { return add((1 + 2), 3); }", &arena);
    let program = parser.parse();
    assert!(!parser.had_error());
    let Stmt::Return { value: Some(Expr::Call { args, .. }), .. } = program.functions[0].body.stmts[0] else {
        panic!("expected a call expression");
    };
    assert_eq!(args.len(), 2);
}
