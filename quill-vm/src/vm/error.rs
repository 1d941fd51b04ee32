// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Runtime errors for the VM.
//!
//! All of these are fatal for the current execution only; a driver running a
//! batch of programs reports the failure and moves on.

use std::fmt;

/// Runtime error during VM execution.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// An instruction popped more values than the stack held.
    StackUnderflow,
    /// Integer division or modulo by zero.
    DivisionByZero,
    /// A jump names a label id with no `label` marker in the listing.
    UnresolvedLabel(u32),
    /// A `load` named a variable no `save` has created.
    UndefinedVariable(String),
    /// An operand's tag does not fit the instruction.
    TypeError { expected: &'static str, got: String },
    /// The listing is structurally bad (e.g. a duplicated label id).
    Malformed(String),
    /// `read` exhausted its retry budget without a valid value.
    ReadFailed { expected: &'static str, attempts: u32 },
    /// The input stream ended while `read` was waiting for a value.
    EndOfInput { expected: &'static str },
    /// The configured step limit was reached before the program halted.
    StepLimitExceeded(u64),
    /// The output or input stream failed.
    Io(String),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::StackUnderflow => write!(f, "Stack underflow"),
            RuntimeError::DivisionByZero => write!(f, "Division by zero"),
            RuntimeError::UnresolvedLabel(id) => {
                write!(f, "Jump to unresolved label {}", id)
            }
            RuntimeError::UndefinedVariable(name) => {
                write!(f, "Undefined variable: {}", name)
            }
            RuntimeError::TypeError { expected, got } => {
                write!(f, "Type error: expected {}, got {}", expected, got)
            }
            RuntimeError::Malformed(msg) => write!(f, "Malformed listing: {}", msg),
            RuntimeError::ReadFailed { expected, attempts } => {
                write!(
                    f,
                    "No valid {} value supplied within {} attempts",
                    expected, attempts
                )
            }
            RuntimeError::EndOfInput { expected } => {
                write!(f, "Input ended while reading a {} value", expected)
            }
            RuntimeError::StepLimitExceeded(limit) => {
                write!(f, "Execution exceeded the step limit of {}", limit)
            }
            RuntimeError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for VM operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;
