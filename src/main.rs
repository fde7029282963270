use std::process::ExitCode;

fn main() -> ExitCode {
    match overrun::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(overrun::errors::get_exit_code(&e))
        }
    }
}
