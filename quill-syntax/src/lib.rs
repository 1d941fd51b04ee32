// quill-syntax - Abstract syntax tree for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # quill-syntax
//!
//! The typed abstract syntax tree the Quill parser front-end produces and
//! the compiler consumes. Parsing itself lives outside this workspace; this
//! crate is the contract between the two sides.

pub mod ast;
pub mod builder;
pub mod ty;

pub use ast::{BinOp, Expr, ExprKind, Lit, NodeId, Program, Stmt, UnOp};
pub use builder::AstBuilder;
pub use ty::Ty;
