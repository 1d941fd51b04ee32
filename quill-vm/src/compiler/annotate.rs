// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Type annotation pass: scope-aware static checking.
//!
//! A single traversal that types every expression node, records the result
//! in a [`TypeTable`], and collects diagnostics without aborting — one run
//! surfaces the whole error set. `Ty::Unknown` marks an expression whose
//! error has already been reported; it propagates outward silently so one
//! fault produces one message, not a cascade.

use std::collections::HashSet;

use quill_syntax::{BinOp, Expr, ExprKind, Program, Stmt, Ty, UnOp};

use super::types::{ScopeStack, TypeTable};

/// Everything the annotation pass produces.
#[derive(Debug)]
pub struct CheckResult {
    /// Inferred type per expression node.
    pub types: TypeTable,
    /// De-duplicated, unordered diagnostic messages.
    pub errors: HashSet<String>,
    /// True whenever any error was recorded.
    pub has_error: bool,
}

impl CheckResult {
    /// True when the program is certified for code generation.
    pub fn is_clean(&self) -> bool {
        !self.has_error
    }
}

/// Check a program in one traversal.
pub fn check(program: &Program) -> CheckResult {
    TypeChecker::new().check(program)
}

/// The annotation pass state.
#[derive(Debug, Default)]
pub struct TypeChecker {
    scopes: ScopeStack<Ty>,
    types: TypeTable,
    errors: HashSet<String>,
    has_error: bool,
}

impl TypeChecker {
    /// Create a fresh checker.
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
            types: TypeTable::new(),
            errors: HashSet::new(),
            has_error: false,
        }
    }

    /// Run the pass and consume the checker.
    pub fn check(mut self, program: &Program) -> CheckResult {
        self.scopes.push();
        for stmt in &program.stmts {
            self.stmt(stmt);
        }
        self.scopes.pop();
        CheckResult {
            types: self.types,
            errors: self.errors,
            has_error: self.has_error,
        }
    }

    /// Every diagnostic goes through here, so a non-empty error set always
    /// implies the flag.
    fn report(&mut self, message: String) {
        self.has_error = true;
        self.errors.insert(message);
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { ty, names } => {
                debug_assert!(ty.is_declarable(), "parser produced an UNKNOWN declaration");
                for name in names {
                    if self.scopes.contains(name) {
                        self.report(format!(
                            "Variable with the identifier \"{}\" has already been declared",
                            name
                        ));
                    } else {
                        self.scopes.declare(name, *ty);
                    }
                }
            }
            Stmt::Expr(expr) => {
                self.expr(expr);
            }
            Stmt::Read { targets } => {
                for name in targets {
                    if !self.scopes.contains(name) {
                        self.report(format!("Variable \"{}\" has not been declared", name));
                    }
                }
            }
            Stmt::Write { args } => {
                for arg in args {
                    self.expr(arg);
                }
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
                if self.expr(cond) != Ty::Bool {
                    self.report("Condition must be of type BOOL".to_string());
                }
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.stmt(else_branch);
                }
            }
            Stmt::While { cond, body } => {
                if self.expr(cond) != Ty::Bool {
                    self.report("Condition must be of type BOOL".to_string());
                }
                self.stmt(body);
            }
            Stmt::For {
                init,
                cond,
                step,
                body,
            } => {
                if self.expr(init) == Ty::Unknown {
                    self.report(
                        "The first expression in a for statement must have a type \
                         but has type UNKNOWN"
                            .to_string(),
                    );
                }
                if self.expr(cond) != Ty::Bool {
                    self.report(
                        "The second expression in a for statement must be of type BOOL"
                            .to_string(),
                    );
                }
                if self.expr(step) == Ty::Unknown {
                    self.report(
                        "The third expression in a for statement must have a type \
                         but has type UNKNOWN"
                            .to_string(),
                    );
                }
                self.stmt(body);
            }
        }
    }

    /// Type one expression, record the annotation, and return the type.
    fn expr(&mut self, expr: &Expr) -> Ty {
        let ty = match &expr.kind {
            ExprKind::Lit(lit) => lit.ty(),
            ExprKind::Ident(name) => match self.scopes.lookup(name) {
                Some(ty) => ty,
                None => {
                    self.report(format!("Variable \"{}\" has not been declared", name));
                    Ty::Unknown
                }
            },
            ExprKind::Paren(inner) => self.expr(inner),
            ExprKind::Unary { op, operand } => {
                let operand_ty = self.expr(operand);
                if operand_ty == Ty::Unknown {
                    // Already reported at its origin.
                    Ty::Unknown
                } else {
                    let result = unary_result(*op, operand_ty);
                    if result == Ty::Unknown {
                        self.report(format!(
                            "Cannot use operator \"{}\" with variable of type {}",
                            op.symbol(),
                            operand_ty
                        ));
                    }
                    result
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs_ty = self.expr(lhs);
                let rhs_ty = self.expr(rhs);
                if lhs_ty == Ty::Unknown || rhs_ty == Ty::Unknown {
                    Ty::Unknown
                } else {
                    let result = binary_result(*op, lhs_ty, rhs_ty);
                    if result == Ty::Unknown {
                        self.report(format!(
                            "Cannot use operator \"{}\" with variables of type {} and {}",
                            op.symbol(),
                            lhs_ty,
                            rhs_ty
                        ));
                    }
                    result
                }
            }
            ExprKind::Assign { target, value } => {
                let value_ty = self.expr(value);
                match self.scopes.lookup(target) {
                    None => {
                        self.report(format!(
                            "Attempt to assign value to an undeclared variable \"{}\"",
                            target
                        ));
                        Ty::Unknown
                    }
                    Some(target_ty) if target_ty == value_ty => target_ty,
                    Some(Ty::Float) if value_ty == Ty::Int => Ty::Float,
                    Some(_) if value_ty == Ty::Unknown => Ty::Unknown,
                    Some(target_ty) => {
                        self.report(format!(
                            "Attempt to assign a variable of type {} to a variable of type {}",
                            value_ty, target_ty
                        ));
                        // Yield the mismatched right-hand type so enclosing
                        // expressions keep checking.
                        value_ty
                    }
                }
            }
        };
        self.types.insert(expr.id, ty);
        ty
    }
}

/// The fixed unary operator table.
fn unary_result(op: UnOp, operand: Ty) -> Ty {
    match op {
        UnOp::Not if operand == Ty::Bool => Ty::Bool,
        UnOp::Neg if operand.is_numeric() => operand,
        _ => Ty::Unknown,
    }
}

/// The fixed binary operator table. Any combination not listed is `Unknown`.
fn binary_result(op: BinOp, lhs: Ty, rhs: Ty) -> Ty {
    use BinOp::*;
    use Ty::*;
    match op {
        Add | Sub | Mul | Div => match (lhs, rhs) {
            (Int, Int) => Int,
            (Int, Float) | (Float, Int) | (Float, Float) => Float,
            _ => Unknown,
        },
        Mod => match (lhs, rhs) {
            (Int, Int) => Int,
            _ => Unknown,
        },
        Lt | Gt | Le | Ge => {
            if lhs.is_numeric() && rhs.is_numeric() {
                Bool
            } else {
                Unknown
            }
        }
        Eq | Ne => match (lhs, rhs) {
            (Int, Int) | (Float, Float) | (String, String) => Bool,
            (Int, Float) | (Float, Int) => Bool,
            _ => Unknown,
        },
        And | Or => match (lhs, rhs) {
            (Bool, Bool) => Bool,
            _ => Unknown,
        },
        Concat => match (lhs, rhs) {
            (String, String) => String,
            _ => Unknown,
        },
    }
}
