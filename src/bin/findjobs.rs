// src/bin/findjobs.rs
use std::process::ExitCode;

use findjobs::cli;

fn main() -> ExitCode {
    let _ = color_eyre::install();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            eprintln!("Error: {:?}", color_eyre::Report::new(e));
            ExitCode::from(code)
        }
    }
}
