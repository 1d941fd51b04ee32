// quill - Driver for the Quill bytecode virtual machine
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process;

use quill_vm::{Listing, Vm};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.len() == 2 && (args[1] == "--version" || args[1] == "-v") {
        println!("Quill v0.1.0");
        return;
    }

    if args.len() != 2 {
        eprintln!("Usage: quill <program>.qbc");
        process::exit(2);
    }

    if let Err(e) = run_file(&args[1]) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

/// Load a persisted listing and execute it on stdin/stdout.
fn run_file(file_path: &str) -> Result<(), String> {
    let path = Path::new(file_path);

    // Validate file extension
    match path.extension().and_then(|e| e.to_str()) {
        Some("qbc") => {}
        Some(ext) => {
            return Err(format!(
                "Error: unsupported file extension '.{}' for '{}' (expected .qbc)",
                ext, file_path
            ));
        }
        None => {
            return Err(format!(
                "Error: file '{}' has no extension (expected .qbc)",
                file_path
            ));
        }
    }

    let source =
        fs::read_to_string(path).map_err(|e| format!("Error reading '{}': {}", file_path, e))?;

    let listing: Listing = source
        .parse()
        .map_err(|e| format!("Error in '{}': {}", file_path, e))?;

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut vm = Vm::new(stdin, stdout);
    vm.run(&listing)
        .map_err(|e| format!("Error in '{}': {}", file_path, e))
}
