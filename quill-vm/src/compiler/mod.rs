// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Bytecode compiler: transforms the Quill tree to an instruction listing.
//!
//! The compiler operates in two passes over the same tree:
//! 1. Annotation: scope-aware type checking, producing a per-node type table
//!    and a set of diagnostics
//! 2. Code generation: lowering the certified tree to flat instructions

pub mod annotate;
pub mod codegen;
pub mod types;

pub use annotate::{CheckResult, TypeChecker, check};
pub use codegen::{CodeGen, generate};
pub use types::{ScopeStack, TypeTable};
