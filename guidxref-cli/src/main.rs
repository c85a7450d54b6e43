// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: progress, summary and error messages go to the terminal.
// - exit: the process exit status carries the failure class to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

mod cli;
mod logging;
mod output_file;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(cli::exit_code(&e));
    }
}
