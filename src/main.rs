use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    arith_validator::cli::run()
}
