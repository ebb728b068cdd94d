use std::process::ExitCode;

fn main() -> ExitCode {
    moviebot_lib::run()
}
