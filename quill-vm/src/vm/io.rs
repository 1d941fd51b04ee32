// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `print` and `read` opcode handlers.

use std::io::{BufRead, Write};

use crate::value::{TypeTag, Value};

use super::{Result, RuntimeError, Vm};

impl<R: BufRead, W: Write> Vm<R, W> {
    /// Pop `n` values and write them as one line, restoring push order so
    /// the arguments appear left to right with no separator.
    pub(crate) fn execute_print(&mut self, n: usize) -> Result<()> {
        let values = self.stack.pop_n(n)?;
        let mut line = String::new();
        for value in &values {
            line.push_str(&value.to_string());
        }
        writeln!(self.output, "{}", line).map_err(io_err)
    }

    /// Prompt for a value of the tagged type and read lines until one parses.
    ///
    /// Strings accept any line verbatim; the other types parse strictly and
    /// re-prompt on failure, up to the configured retry budget.
    pub(crate) fn execute_read(&mut self, tag: TypeTag) -> Result<()> {
        let expected = tag.type_name();
        writeln!(self.output, "Provide a value of type {}", expected).map_err(io_err)?;
        self.output.flush().map_err(io_err)?;

        let mut attempts = 0u32;
        loop {
            if attempts >= self.read_retry_limit {
                return Err(RuntimeError::ReadFailed {
                    expected,
                    attempts,
                });
            }
            attempts += 1;

            let mut line = String::new();
            let bytes = self.input.read_line(&mut line).map_err(io_err)?;
            if bytes == 0 {
                return Err(RuntimeError::EndOfInput { expected });
            }
            let line = line.trim_end_matches(['\n', '\r']);

            let parsed = match tag {
                TypeTag::S => Some(Value::Str(line.to_string())),
                TypeTag::I => line.trim().parse::<i64>().ok().map(Value::Int),
                TypeTag::F => line.trim().parse::<f64>().ok().map(Value::Float),
                TypeTag::B => line.trim().parse::<bool>().ok().map(Value::Bool),
            };

            match parsed {
                Some(value) => {
                    self.stack.push(value);
                    return Ok(());
                }
                None => {
                    writeln!(self.output, "Not a valid {} value, try again", expected)
                        .map_err(io_err)?;
                    self.output.flush().map_err(io_err)?;
                }
            }
        }
    }
}

fn io_err(err: std::io::Error) -> RuntimeError {
    RuntimeError::Io(err.to_string())
}
