// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Code generation: lowers the certified tree to an instruction listing.
//!
//! This pass runs only on a tree the annotation pass has certified clean —
//! it performs no semantic validation of its own and uses the type table
//! purely to place `itof` widening and pick arithmetic result tags. Label
//! ids come from a counter owned by the one generator instance per
//! compilation.

use quill_syntax::{BinOp, Expr, ExprKind, Lit, Program, Stmt, Ty, UnOp};

use super::types::{ScopeStack, TypeTable};
use crate::ins::{Ins, Listing};
use crate::value::{TypeTag, Value};

/// Lower a certified program to a listing.
pub fn generate(program: &Program, types: &TypeTable) -> Listing {
    CodeGen::new(types).generate(program)
}

/// The code generation state.
#[derive(Debug)]
pub struct CodeGen<'a> {
    types: &'a TypeTable,
    scopes: ScopeStack<TypeTag>,
    next_label: u32,
    out: Listing,
}

impl<'a> CodeGen<'a> {
    /// Create a generator over the annotation table.
    pub fn new(types: &'a TypeTable) -> Self {
        Self {
            types,
            scopes: ScopeStack::new(),
            next_label: 0,
            out: Listing::new(),
        }
    }

    /// Lower the whole program and consume the generator.
    pub fn generate(mut self, program: &Program) -> Listing {
        self.scopes.push();
        for stmt in &program.stmts {
            self.stmt(stmt);
        }
        self.scopes.pop();
        self.out
    }

    fn emit(&mut self, ins: Ins) {
        self.out.emit(ins);
    }

    fn fresh_label(&mut self) -> u32 {
        let id = self.next_label;
        self.next_label += 1;
        id
    }

    /// The annotated type of an expression node.
    fn ty_of(&self, expr: &Expr) -> Ty {
        self.types
            .get(expr.id)
            .expect("expression missing from the annotation table")
    }

    /// The runtime tag a name was declared with.
    fn declared_tag(&self, name: &str) -> TypeTag {
        self.scopes
            .lookup(name)
            .expect("undeclared variable survived checking")
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { ty, names } => {
                let tag = TypeTag::of(*ty).expect("UNKNOWN declaration survived checking");
                for name in names {
                    self.scopes.declare(name, tag);
                    self.emit(Ins::Push(Value::zero(tag)));
                    self.emit(Ins::Save(name.clone()));
                }
            }
            Stmt::Expr(expr) => {
                // Every expression leaves exactly one value; drop it so the
                // stack returns to its pre-statement depth.
                self.expr(expr);
                self.emit(Ins::Pop);
            }
            Stmt::Read { targets } => {
                for name in targets {
                    let tag = self.declared_tag(name);
                    self.emit(Ins::Read(tag));
                    self.emit(Ins::Save(name.clone()));
                }
            }
            Stmt::Write { args } => {
                for arg in args {
                    self.expr(arg);
                }
                self.emit(Ins::Print(args.len()));
            }
            Stmt::Block(stmts) => {
                self.scopes.push();
                for stmt in stmts {
                    self.stmt(stmt);
                }
                self.scopes.pop();
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let else_label = self.fresh_label();
                let end_label = self.fresh_label();
                self.expr(cond);
                self.emit(Ins::Fjmp(else_label));
                self.stmt(then_branch);
                self.emit(Ins::Jmp(end_label));
                self.emit(Ins::Label(else_label));
                if let Some(else_branch) = else_branch {
                    self.stmt(else_branch);
                }
                self.emit(Ins::Label(end_label));
            }
            Stmt::While { cond, body } => {
                let start_label = self.fresh_label();
                let end_label = self.fresh_label();
                self.emit(Ins::Label(start_label));
                self.expr(cond);
                self.emit(Ins::Fjmp(end_label));
                self.stmt(body);
                self.emit(Ins::Jmp(start_label));
                self.emit(Ins::Label(end_label));
            }
            Stmt::For {
                init,
                cond,
                step,
                body,
            } => {
                let start_label = self.fresh_label();
                let end_label = self.fresh_label();
                self.expr(init);
                self.emit(Ins::Pop);
                self.emit(Ins::Label(start_label));
                self.expr(cond);
                self.emit(Ins::Fjmp(end_label));
                self.stmt(body);
                self.expr(step);
                self.emit(Ins::Pop);
                self.emit(Ins::Jmp(start_label));
                self.emit(Ins::Label(end_label));
            }
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Lit(lit) => {
                let value = match lit {
                    Lit::Int(n) => Value::Int(*n),
                    Lit::Float(x) => Value::Float(*x),
                    Lit::Str(s) => Value::Str(s.clone()),
                    Lit::Bool(b) => Value::Bool(*b),
                };
                self.emit(Ins::Push(value));
            }
            ExprKind::Ident(name) => {
                self.emit(Ins::Load(name.clone()));
            }
            ExprKind::Paren(inner) => self.expr(inner),
            ExprKind::Unary { op, operand } => {
                self.expr(operand);
                match op {
                    UnOp::Not => self.emit(Ins::Not),
                    UnOp::Neg => self.emit(Ins::Uminus),
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_ty = self.ty_of(lhs);
                let rhs_ty = self.ty_of(rhs);
                self.expr(lhs);
                if lhs_ty == Ty::Int && rhs_ty == Ty::Float {
                    self.emit(Ins::Itof);
                }
                self.expr(rhs);
                if lhs_ty == Ty::Float && rhs_ty == Ty::Int {
                    self.emit(Ins::Itof);
                }
                self.binary_op(*op, lhs_ty, rhs_ty);
            }
            ExprKind::Assign { target, value } => {
                let value_ty = self.ty_of(value);
                self.expr(value);
                let tag = self.declared_tag(target);
                if tag == TypeTag::F && value_ty == Ty::Int {
                    self.emit(Ins::Itof);
                }
                // Save then re-load, so the assignment yields its value and
                // chains as an expression.
                self.emit(Ins::Save(target.clone()));
                self.emit(Ins::Load(target.clone()));
            }
        }
    }

    /// Emit the opcode(s) for a binary operator whose operands are already
    /// on the stack (widened to a common numeric type where needed).
    fn binary_op(&mut self, op: BinOp, lhs_ty: Ty, rhs_ty: Ty) {
        let num_tag = if lhs_ty == Ty::Float || rhs_ty == Ty::Float {
            TypeTag::F
        } else {
            TypeTag::I
        };
        match op {
            BinOp::Add => self.emit(Ins::Add(num_tag)),
            BinOp::Sub => self.emit(Ins::Sub(num_tag)),
            BinOp::Mul => self.emit(Ins::Mul(num_tag)),
            BinOp::Div => self.emit(Ins::Div(num_tag)),
            BinOp::Mod => self.emit(Ins::Mod),
            BinOp::Concat => self.emit(Ins::Concat),
            BinOp::And => self.emit(Ins::And),
            BinOp::Or => self.emit(Ins::Or),
            BinOp::Gt => self.emit(Ins::Gt),
            BinOp::Lt => self.emit(Ins::Lt),
            BinOp::Eq => self.emit(Ins::Eq),
            // No native not-equal / at-most / at-least opcodes: synthesize
            // from the primitive comparison plus a negation.
            BinOp::Ne => {
                self.emit(Ins::Eq);
                self.emit(Ins::Not);
            }
            BinOp::Le => {
                self.emit(Ins::Gt);
                self.emit(Ins::Not);
            }
            BinOp::Ge => {
                self.emit(Ins::Lt);
                self.emit(Ins::Not);
            }
        }
    }
}
