//! Thin binary: all CLI behavior lives in `cli/`, this file only runs it and turns
//! an error into a message and an exit code.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
