fn main() -> std::process::ExitCode {
    rackreplace::cli::run(std::env::args_os())
}
