// quill-vm - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for the quill-vm integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! Programs are built directly as trees (parsing is an external
//! collaborator): one [`AstBuilder`] per program hands out node ids, and the
//! statement helpers below cut the construction noise.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::io::Cursor;

#[allow(unused_imports)]
pub use quill_syntax::{AstBuilder, BinOp, Expr, Program, Stmt, Ty, UnOp};
#[allow(unused_imports)]
pub use quill_vm::{
    CheckResult, Ins, Listing, RuntimeError, TypeTag, Value, Vm, check, generate,
};

/// A machine wired to in-memory streams.
pub type TestVm = Vm<Cursor<Vec<u8>>, Vec<u8>>;

/// Declare `names` with one type: `int a, b;`.
pub fn decl(ty: Ty, names: &[&str]) -> Stmt {
    Stmt::VarDecl {
        ty,
        names: names.iter().map(|n| n.to_string()).collect(),
    }
}

/// An expression statement: `e;`.
pub fn expr_stmt(e: Expr) -> Stmt {
    Stmt::Expr(e)
}

/// A write statement: `write e1, e2;`.
pub fn write(args: Vec<Expr>) -> Stmt {
    Stmt::Write { args }
}

/// A read statement: `read a, b;`.
pub fn read(targets: &[&str]) -> Stmt {
    Stmt::Read {
        targets: targets.iter().map(|n| n.to_string()).collect(),
    }
}

/// Wrap statements in a program.
pub fn program(stmts: Vec<Stmt>) -> Program {
    Program { stmts }
}

/// Check a program, asserting it is clean, and return its listing.
pub fn compile(program: &Program) -> Listing {
    let result = check(program);
    assert!(
        !result.has_error,
        "expected a clean program, got errors: {:?}",
        result.errors
    );
    generate(program, &result.types)
}

/// Check a program, asserting it has errors, and return the result.
pub fn check_expecting_errors(program: &Program) -> CheckResult {
    let result = check(program);
    assert!(result.has_error, "expected type errors, got none");
    assert!(
        !result.errors.is_empty(),
        "has_error is set but the error set is empty"
    );
    result
}

/// Execute a listing against the given input text, returning the machine
/// and the run result for inspection.
pub fn exec(listing: &Listing, input: &str) -> (quill_vm::Result<()>, TestVm) {
    let mut vm = Vm::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let result = vm.run(listing);
    (result, vm)
}

/// Execute a listing, asserting success, and return the captured output.
pub fn run_ok(listing: &Listing, input: &str) -> String {
    let (result, vm) = exec(listing, input);
    assert!(result.is_ok(), "unexpected runtime error: {:?}", result);
    assert_eq!(vm.stack_depth(), 0, "operand stack not balanced");
    String::from_utf8(vm.output().clone()).expect("utf8 output")
}

/// Assert the error set contains a message with the given fragment.
pub fn assert_has_error(result: &CheckResult, fragment: &str) {
    assert!(
        result.errors.iter().any(|e| e.contains(fragment)),
        "no error containing '{}' in {:?}",
        fragment,
        result.errors
    );
}

/// The listing rendered as one line of text per instruction.
pub fn listing_lines(listing: &Listing) -> Vec<String> {
    listing.iter().map(|ins| ins.to_string()).collect()
}
