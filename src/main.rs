//! # file-dedup CLI
//!
//! Finds files with identical content and asks which copy to keep.
//!
//! ## Usage
//! ```bash
//! file-dedup ~/Documents
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    duplicate_file_resolver::init_tracing();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Error messages already carry their causes
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
