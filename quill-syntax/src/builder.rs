// quill-syntax - Abstract syntax tree for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Expression construction with automatic id allocation.
//!
//! The parser front-end (and the test suites) build trees through one
//! [`AstBuilder`] per program so that every expression node receives a
//! distinct [`NodeId`]. The id counter lives in a `Cell` and the methods
//! take `&self`, so constructions nest:
//!
//! ```
//! use quill_syntax::{AstBuilder, BinOp};
//!
//! let b = AstBuilder::new();
//! let sum = b.binary(BinOp::Add, b.int(1), b.int(2));
//! let assignment = b.assign("x", sum);
//! # let _ = assignment;
//! ```

use std::cell::Cell;

use crate::ast::{BinOp, Expr, ExprKind, Lit, NodeId, UnOp};

/// Allocates node ids and assembles expression nodes.
///
/// One builder per program; ids are unique within a builder's lifetime.
#[derive(Debug, Default)]
pub struct AstBuilder {
    next_id: Cell<u32>,
}

impl AstBuilder {
    /// Create a builder whose first node gets id 0.
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
        }
    }

    fn fresh(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId(id)
    }

    fn expr(&self, kind: ExprKind) -> Expr {
        Expr {
            id: self.fresh(),
            kind,
        }
    }

    /// An integer literal.
    pub fn int(&self, value: i64) -> Expr {
        self.expr(ExprKind::Lit(Lit::Int(value)))
    }

    /// A float literal.
    pub fn float(&self, value: f64) -> Expr {
        self.expr(ExprKind::Lit(Lit::Float(value)))
    }

    /// A string literal.
    pub fn string(&self, value: &str) -> Expr {
        self.expr(ExprKind::Lit(Lit::Str(value.to_string())))
    }

    /// A boolean literal.
    pub fn boolean(&self, value: bool) -> Expr {
        self.expr(ExprKind::Lit(Lit::Bool(value)))
    }

    /// An identifier reference.
    pub fn ident(&self, name: &str) -> Expr {
        self.expr(ExprKind::Ident(name.to_string()))
    }

    /// A parenthesized expression.
    pub fn paren(&self, inner: Expr) -> Expr {
        self.expr(ExprKind::Paren(Box::new(inner)))
    }

    /// A unary application.
    pub fn unary(&self, op: UnOp, operand: Expr) -> Expr {
        self.expr(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// A binary application.
    pub fn binary(&self, op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
        self.expr(ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// An assignment expression.
    pub fn assign(&self, target: &str, value: Expr) -> Expr {
        self.expr(ExprKind::Assign {
            target: target.to_string(),
            value: Box::new(value),
        })
    }
}
