use std::process::ExitCode;

use routeguard::cli;

fn main() -> ExitCode {
    match cli::run_cli() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::from(2)
        }
    }
}
