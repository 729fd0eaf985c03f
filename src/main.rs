//! Thin binary entry point: runs the CLI and maps any unrecovered error to a
//! `Error: <msg>` message on stderr with exit code 1.

use std::process;

fn main() {
    if let Err(err) = promptforge::cli::main() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
