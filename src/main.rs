//! Kiln - JSON-metadata static site pipeline

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = kiln::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
