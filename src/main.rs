use std::process::ExitCode;

fn main() -> ExitCode {
    refpress::cli::run()
}
